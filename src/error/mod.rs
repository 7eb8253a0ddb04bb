//! Error types and policies for walking and parsing.
//!
//! This module provides:
//! - `ErrorPolicy`: What the walker does with failures below the root path
//! - `Stage`: Indicates where in a file's lifecycle an error occurred
//! - `PathError`: A single failure tied to a path
//! - `AggregateError`: A collection of path errors returned from a walk
//! - `ProcessError`: Failures a processor reports for one file
//! - `ReadError`: Failures produced by record readers
//! - `ConfigError`: Failures loading or validating a `WalkConfig`

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Boxed error returned by user-supplied strategies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Controls how failures on entries below the root path are handled.
///
/// Failures on the root path itself are always returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the failure and keep walking; the walk still succeeds
    #[default]
    Swallow,
    /// Keep walking and return every failure at the end
    Accumulate,
    /// Stop at the first failure encountered
    FastFail,
}

impl ErrorPolicy {
    /// Parse a policy from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "swallow" | "ignore" => Some(ErrorPolicy::Swallow),
            "accumulate" => Some(ErrorPolicy::Accumulate),
            "fast_fail" | "fastfail" => Some(ErrorPolicy::FastFail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while reading path metadata
    Stat,
    /// Error while listing a directory
    ListDir,
    /// Error while opening a file
    Open,
    /// The parser rejected the stream before any record was read
    Init,
    /// The parser failed to finalize
    Close,
    /// Opaque failure reported by a processor
    Process,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Stat => write!(f, "Stat"),
            Stage::ListDir => write!(f, "ListDir"),
            Stage::Open => write!(f, "Open"),
            Stage::Init => write!(f, "Init"),
            Stage::Close => write!(f, "Close"),
            Stage::Process => write!(f, "Process"),
        }
    }
}

#[derive(Debug)]
pub struct PathError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// The file or directory being handled
    pub path: PathBuf,
    /// The underlying error
    pub error: BoxError,
}

impl PathError {
    pub fn new(stage: Stage, path: impl Into<PathBuf>, error: impl Into<BoxError>) -> Self {
        Self {
            stage,
            path: path.into(),
            error: error.into(),
        }
    }

    pub(crate) fn io(stage: Stage, path: &Path, error: std::io::Error) -> Self {
        Self::new(stage, path, error)
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.path.display(), self.error)
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// An aggregate of path errors collected during a walk.
///
/// Under `ErrorPolicy::Accumulate` this holds every failure in visit order.
/// Under the other policies it holds exactly one error.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors
    pub errors: Vec<PathError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "walk encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: PathError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathError> {
        self.errors.iter()
    }
}

impl From<PathError> for AggregateError {
    fn from(error: PathError) -> Self {
        Self::single(error)
    }
}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a PathError;
    type IntoIter = std::slice::Iter<'a, PathError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors returned by a `Processor` for one file.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The file could not be opened
    #[error("open failed: {0}")]
    Open(#[from] std::io::Error),

    /// `Parser::init` rejected the stream
    #[error("init failed: {0}")]
    Init(BoxError),

    /// `Parser::close` failed
    #[error("close failed: {0}")]
    Close(BoxError),

    /// Any other processor-specific failure
    #[error("{0}")]
    Other(BoxError),
}

impl ProcessError {
    /// Wrap an arbitrary error as `ProcessError::Other`.
    pub fn other(error: impl Into<BoxError>) -> Self {
        ProcessError::Other(error.into())
    }

    /// The lifecycle stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            ProcessError::Open(_) => Stage::Open,
            ProcessError::Init(_) => Stage::Init,
            ProcessError::Close(_) => Stage::Close,
            ProcessError::Other(_) => Stage::Process,
        }
    }

    pub(crate) fn into_path_error(self, path: &Path) -> PathError {
        let stage = self.stage();
        let error: BoxError = match self {
            ProcessError::Open(e) => Box::new(e),
            ProcessError::Init(e) | ProcessError::Close(e) | ProcessError::Other(e) => e,
        };
        PathError {
            stage,
            path: path.to_path_buf(),
            error,
        }
    }
}

/// Errors produced by a `RecordReader`.
///
/// Every variant except `EmptySeparator` is record-level: the caller skips
/// the record and reads on.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: u64 },

    /// Separator must contain at least one character
    #[error("record separator must not be empty")]
    EmptySeparator,

    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors loading or validating a `WalkConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// No enabled loader matches the file extension
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[cfg(feature = "json")]
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "toml")]
    #[error("TOML config error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
