//! Shared fixtures: a parser that records its lifecycle and a tree builder.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::BoxError;
use crate::reader::{DelimitedReader, Record, RecordReader};
use crate::parser::Parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Init(String),
    Record(Record),
    Close,
}

/// A parser that logs every lifecycle call.
#[derive(Debug, Default)]
pub(crate) struct RecordingParser {
    pub events: Vec<Event>,
    /// `init` fails for sources ending with this suffix
    pub fail_init_suffix: Option<String>,
    /// `parse_record` fails for records whose first field equals this
    pub reject_first_field: Option<String>,
    pub fail_close: bool,
}

impl RecordingParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_init(suffix: &str) -> Self {
        Self {
            fail_init_suffix: Some(suffix.into()),
            ..Self::default()
        }
    }

    pub fn rejecting(first_field: &str) -> Self {
        Self {
            reject_first_field: Some(first_field.into()),
            ..Self::default()
        }
    }

    /// Sources passed to `init`, in call order.
    pub fn sources(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Init(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn records(&self) -> Vec<Record> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Record(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn closes(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Close).count()
    }
}

impl Parser for RecordingParser {
    fn init(
        &mut self,
        stream: Box<dyn BufRead + Send>,
        source: &str,
    ) -> Result<Box<dyn RecordReader + Send>, BoxError> {
        self.events.push(Event::Init(source.to_string()));
        if let Some(suffix) = &self.fail_init_suffix {
            if source.ends_with(suffix.as_str()) {
                return Err("malformed header".into());
            }
        }
        Ok(Box::new(DelimitedReader::comma(stream)))
    }

    fn parse_record(&mut self, record: Record) -> Result<(), BoxError> {
        let rejected = self
            .reject_first_field
            .as_ref()
            .is_some_and(|f| record.first() == Some(f));
        self.events.push(Event::Record(record));
        if rejected {
            return Err("rejected record".into());
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), BoxError> {
        self.events.push(Event::Close);
        if self.fail_close {
            return Err("flush failed".into());
        }
        Ok(())
    }
}

/// Write `content` to `root/rel`, creating parent directories.
pub(crate) fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, content).expect("write fixture file");
    path
}

/// Strip `root` from every source, using `/` as separator.
pub(crate) fn relative(root: &Path, sources: &[String]) -> Vec<String> {
    sources
        .iter()
        .map(|s| {
            Path::new(s)
                .strip_prefix(root)
                .expect("source under root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

/// The tree used by most traversal tests:
///
/// ```text
/// root/
///   a.txt       "1,2\n3,4\n"
///   .hidden     "x\n"
///   b.txt       "5\n"
///   sub/c.txt   "6,7,8\n"
/// ```
pub(crate) fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(dir.path(), "a.txt", "1,2\n3,4\n");
    write_file(dir.path(), ".hidden", "x\n");
    write_file(dir.path(), "b.txt", "5\n");
    write_file(dir.path(), "sub/c.txt", "6,7,8\n");
    dir
}
