//! Walk configuration.

use std::io::BufRead;

use serde::Deserialize;

use crate::error::{ConfigError, ErrorPolicy, ReadError};
use crate::reader::DelimitedReader;

/// Entries whose name starts with this prefix are skipped.
pub const DEFAULT_HIDDEN_PREFIX: &str = ".";

/// Field separator used by `WalkConfig::delimited_reader`.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Options controlling a walk.
///
/// Every field has a default, so a config document only needs to name the
/// options it changes:
///
/// ```yaml
/// error_policy: accumulate
/// max_depth: 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    /// Name prefix marking hidden entries
    pub hidden_prefix: String,
    /// What to do with failures below the root path
    pub error_policy: ErrorPolicy,
    /// Visit siblings in file name order instead of listing order
    pub sort_entries: bool,
    /// Deepest level visited; the root directory's children are level 1
    pub max_depth: Option<usize>,
    /// Field separator for readers built with `WalkConfig::delimited_reader`.
    ///
    /// The walker never reads file contents, so it does not apply this
    /// itself; a parser that wants it keeps the config and builds its
    /// reader from it in `Parser::init`.
    pub separator: String,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            hidden_prefix: DEFAULT_HIDDEN_PREFIX.into(),
            error_policy: ErrorPolicy::default(),
            sort_entries: true,
            max_depth: None,
            separator: DEFAULT_SEPARATOR.into(),
        }
    }
}

impl WalkConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hidden entry prefix.
    pub fn with_hidden_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.hidden_prefix = prefix.into();
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Visit siblings sorted by name (`true`) or in listing order.
    pub fn with_sorted_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Limit how deep the walk descends.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the field separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hidden_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "hidden_prefix",
                reason: "must not be empty; it would hide every entry".into(),
            });
        }
        if self.separator.is_empty() {
            return Err(ConfigError::Invalid {
                field: "separator",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Build a `DelimitedReader` over `stream` using the configured separator.
    pub fn delimited_reader<R: BufRead>(&self, stream: R) -> Result<DelimitedReader<R>, ReadError> {
        DelimitedReader::new(stream, self.separator.as_str())
    }

    /// Whether an entry name is hidden under this configuration.
    pub fn is_hidden(&self, name: &std::ffi::OsStr) -> bool {
        name.as_encoded_bytes()
            .starts_with(self.hidden_prefix.as_bytes())
    }
}
