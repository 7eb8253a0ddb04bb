use std::ffi::OsStr;
use std::io::Cursor;

use crate::config::WalkConfig;
use crate::error::{ConfigError, ErrorPolicy};
use crate::reader::RecordReader;

#[test]
fn defaults_match_legacy_behaviour() {
    let cfg = WalkConfig::default();
    assert_eq!(cfg.hidden_prefix, ".");
    assert_eq!(cfg.error_policy, ErrorPolicy::Swallow);
    assert!(cfg.sort_entries);
    assert_eq!(cfg.max_depth, None);
    assert_eq!(cfg.separator, ",");
    assert!(cfg.validate().is_ok());
}

#[test]
fn builder_setters_apply() {
    let cfg = WalkConfig::new()
        .with_hidden_prefix("_")
        .with_error_policy(ErrorPolicy::FastFail)
        .with_sorted_entries(false)
        .with_max_depth(4)
        .with_separator("|");

    assert_eq!(cfg.hidden_prefix, "_");
    assert_eq!(cfg.error_policy, ErrorPolicy::FastFail);
    assert!(!cfg.sort_entries);
    assert_eq!(cfg.max_depth, Some(4));
    assert_eq!(cfg.separator, "|");
}

#[test]
fn validate_rejects_empty_values() {
    let err = WalkConfig::new().with_separator("").validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "separator", .. }));

    let err = WalkConfig::new().with_hidden_prefix("").validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "hidden_prefix", .. }));
}

#[test]
fn is_hidden_checks_the_prefix() {
    let cfg = WalkConfig::default();
    assert!(cfg.is_hidden(OsStr::new(".git")));
    assert!(cfg.is_hidden(OsStr::new(".")));
    assert!(!cfg.is_hidden(OsStr::new("a.txt")));
    assert!(!cfg.is_hidden(OsStr::new("x.")));
}

#[test]
fn delimited_reader_uses_configured_separator() {
    let cfg = WalkConfig::new().with_separator(";");
    let mut reader = cfg.delimited_reader(Cursor::new("a;b\n")).unwrap();
    assert_eq!(
        reader.read().unwrap(),
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

#[cfg(feature = "json")]
#[test]
fn json_config_fills_defaults() {
    let cfg = WalkConfig::from_json_str(r#"{"error_policy": "accumulate", "max_depth": 2}"#)
        .expect("valid json config");
    assert_eq!(cfg.error_policy, ErrorPolicy::Accumulate);
    assert_eq!(cfg.max_depth, Some(2));
    assert_eq!(cfg.hidden_prefix, ".");
    assert!(cfg.sort_entries);
}

#[cfg(feature = "json")]
#[test]
fn json_config_rejects_unknown_fields_and_bad_values() {
    assert!(matches!(
        WalkConfig::from_json_str(r#"{"follow_links": true}"#),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        WalkConfig::from_json_str(r#"{"separator": ""}"#),
        Err(ConfigError::Invalid { .. })
    ));
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_config_parses() {
    let yaml = r#"
error_policy: fast_fail
hidden_prefix: "_"
sort_entries: false
"#;
    let cfg = WalkConfig::from_yaml_str(yaml).expect("valid yaml config");
    assert_eq!(cfg.error_policy, ErrorPolicy::FastFail);
    assert_eq!(cfg.hidden_prefix, "_");
    assert!(!cfg.sort_entries);
}

#[cfg(feature = "toml")]
#[test]
fn toml_config_parses() {
    let cfg = WalkConfig::from_toml_str("separator = \"\\t\"\nmax_depth = 1\n")
        .expect("valid toml config");
    assert_eq!(cfg.separator, "\t");
    assert_eq!(cfg.max_depth, Some(1));
}

#[test]
fn from_file_rejects_unknown_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("walk.ini");
    std::fs::write(&path, "separator=,").unwrap();

    assert!(matches!(
        WalkConfig::from_file(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[cfg(feature = "json")]
#[test]
fn from_file_picks_loader_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("walk.JSON");
    std::fs::write(&path, r#"{"separator": "|"}"#).unwrap();

    let cfg = WalkConfig::from_file(&path).unwrap();
    assert_eq!(cfg.separator, "|");
}

/// Builds its reader from the walk config, the way callers pick up
/// `WalkConfig::separator`.
struct ConfiguredParser {
    config: WalkConfig,
    records: Vec<crate::reader::Record>,
}

impl crate::parser::Parser for ConfiguredParser {
    fn init(
        &mut self,
        stream: Box<dyn std::io::BufRead + Send>,
        _source: &str,
    ) -> Result<Box<dyn RecordReader + Send>, crate::error::BoxError> {
        Ok(Box::new(self.config.delimited_reader(stream)?))
    }

    fn parse_record(&mut self, record: crate::reader::Record) -> Result<(), crate::error::BoxError> {
        self.records.push(record);
        Ok(())
    }

    fn close(&mut self) -> Result<(), crate::error::BoxError> {
        Ok(())
    }
}

#[test]
fn separator_reaches_parsers_that_build_readers_from_the_config() {
    let dir = tempfile::tempdir().unwrap();
    crate::tests::support::write_file(dir.path(), "rows.txt", "a;b\nc,d\n");

    let config = WalkConfig::new().with_separator(";");
    let walker = crate::walker::Walker::new(config.clone());
    let mut parser = ConfiguredParser {
        config,
        records: Vec::new(),
    };
    walker.parse_path(dir.path(), &mut parser).unwrap();

    assert_eq!(
        parser.records,
        vec![vec!["a".to_string(), "b".to_string()], vec!["c,d".to_string()]]
    );

    // The walker alone leaves the separator to the parser.
    let mut default_parser = crate::tests::support::RecordingParser::new();
    walker.parse_path(dir.path(), &mut default_parser).unwrap();
    assert_eq!(default_parser.records()[0], vec!["a;b".to_string()]);
}
