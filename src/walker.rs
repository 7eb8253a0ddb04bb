//! Traversal engine: drive a processor over a file or directory tree.
//!
//! Directories are walked depth-first in pre-order with `walkdir`, which
//! keeps its own stack, so deep trees do not grow the call stack. Symbolic
//! links are followed like any other entry; a link cycle is reported as a
//! failure on the looping entry.

use std::cell::Cell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::WalkConfig;
use crate::error::{AggregateError, ErrorPolicy, PathError, Stage};
use crate::parser::{Parser, RecordStats};
use crate::processor::{ParserProcessor, Processor};

/// Counters describing one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Files handed to the processor successfully
    pub files: u64,
    /// Directories listed, including the root; directories at the depth
    /// limit are not listed and not counted
    pub directories: u64,
    /// Hidden entries skipped
    pub hidden_skipped: u64,
    /// Failures below the root that did not stop the walk
    pub failures: u64,
    /// Record accounting, filled in by `parse_path`
    pub records: RecordStats,
}

/// Walks paths and hands every file to a processor.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Process a file, or every non-hidden file below a directory.
    ///
    /// Failures on `path` itself are always returned. Failures below it are
    /// handled according to the configured `ErrorPolicy`.
    pub fn process_path<P>(
        &self,
        path: impl AsRef<Path>,
        processor: &mut P,
    ) -> Result<WalkReport, AggregateError>
    where
        P: Processor + ?Sized,
    {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| PathError::io(Stage::Stat, path, e))?;

        let mut report = WalkReport::default();
        if metadata.is_dir() {
            self.walk_dir(path, processor, &mut report)?;
        } else {
            self.process_file(path, processor)?;
            report.files += 1;
        }

        info!(
            path = %path.display(),
            files = report.files,
            directories = report.directories,
            hidden_skipped = report.hidden_skipped,
            failures = report.failures,
            "walk finished"
        );
        Ok(report)
    }

    /// Open `path`, hand it to `processor`, and release the handle.
    pub fn process_file<P>(&self, path: impl AsRef<Path>, processor: &mut P) -> Result<(), PathError>
    where
        P: Processor + ?Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PathError::io(Stage::Open, path, e))?;
        debug!(path = %path.display(), "processing file");

        let result = processor.process(path);
        drop(file);
        result.map_err(|e| e.into_path_error(path))
    }

    /// Like `process_path`, driving `parser` over every file.
    ///
    /// The returned report carries the record accounting of every file that
    /// closed successfully.
    pub fn parse_path<P>(
        &self,
        path: impl AsRef<Path>,
        parser: &mut P,
    ) -> Result<WalkReport, AggregateError>
    where
        P: Parser + ?Sized,
    {
        let mut processor = ParserProcessor::new(parser);
        let mut report = self.process_path(path, &mut processor)?;
        report.records = processor.stats();
        Ok(report)
    }

    fn walk_dir<P>(
        &self,
        root: &Path,
        processor: &mut P,
        report: &mut WalkReport,
    ) -> Result<(), AggregateError>
    where
        P: Processor + ?Sized,
    {
        // Drops trailing separators and `.` components.
        let root: PathBuf = root.components().collect();

        let mut walk = WalkDir::new(&root).follow_links(true);
        if self.config.sort_entries {
            walk = walk.sort_by_file_name();
        }
        if let Some(max) = self.config.max_depth {
            walk = walk.max_depth(max);
        }

        let hidden = Cell::new(0u64);
        let entries = walk.into_iter().filter_entry(|e| {
            if e.depth() == 0 || !self.config.is_hidden(e.file_name()) {
                return true;
            }
            trace!(path = %e.path().display(), "skipping hidden entry");
            hidden.set(hidden.get() + 1);
            false
        });

        let mut errors = Vec::new();
        for entry in entries {
            let result = match entry {
                Ok(entry) => self.visit(&entry, processor, report),
                Err(err) if err.depth() == 0 => {
                    report.hidden_skipped = hidden.get();
                    return Err(walk_error(&root, err).into());
                }
                // Links are resolved before the filter sees them, so a broken
                // hidden link surfaces here instead.
                Err(err) if err.path().and_then(Path::file_name).is_some_and(|n| self.config.is_hidden(n)) => {
                    trace!(path = ?err.path(), "skipping hidden entry");
                    hidden.set(hidden.get() + 1);
                    continue;
                }
                Err(err) => Err(walk_error(&root, err)),
            };
            let Err(err) = result else {
                continue;
            };
            report.failures += 1;
            match self.config.error_policy {
                ErrorPolicy::Swallow => {
                    warn!(stage = %err.stage, path = %err.path.display(), error = %err.error, "skipping failed entry");
                }
                ErrorPolicy::Accumulate => errors.push(err),
                ErrorPolicy::FastFail => {
                    report.hidden_skipped = hidden.get();
                    return Err(AggregateError::single(err));
                }
            }
        }
        report.hidden_skipped = hidden.get();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError { errors })
        }
    }

    fn visit<P>(
        &self,
        entry: &DirEntry,
        processor: &mut P,
        report: &mut WalkReport,
    ) -> Result<(), PathError>
    where
        P: Processor + ?Sized,
    {
        if entry.file_type().is_dir() {
            // Directories at the depth limit are yielded but never listed.
            if self.config.max_depth.is_none_or(|max| entry.depth() < max) {
                report.directories += 1;
            } else {
                trace!(path = %entry.path().display(), "max depth reached");
            }
            return Ok(());
        }
        self.process_file(entry.path(), processor)?;
        report.files += 1;
        Ok(())
    }
}

/// Map a `walkdir` failure to the stage it happened in.
///
/// Listing failures are reported against a path that is itself a directory;
/// everything else (dangling links, link loops, vanished entries) failed
/// while reading metadata.
fn walk_error(root: &Path, err: walkdir::Error) -> PathError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let stage = if err.loop_ancestor().is_none() && fs::metadata(&path).is_ok_and(|m| m.is_dir()) {
        Stage::ListDir
    } else {
        Stage::Stat
    };
    PathError::new(stage, path, err)
}

/// Process `path` with the default configuration.
///
/// See [`Walker::process_path`].
pub fn process_path<P>(path: impl AsRef<Path>, processor: &mut P) -> Result<WalkReport, AggregateError>
where
    P: Processor + ?Sized,
{
    Walker::default().process_path(path, processor)
}

/// Process a single file with the default configuration.
pub fn process_file<P>(path: impl AsRef<Path>, processor: &mut P) -> Result<(), PathError>
where
    P: Processor + ?Sized,
{
    Walker::default().process_file(path, processor)
}

/// Drive `parser` over `path` with the default configuration.
///
/// See [`Walker::parse_path`].
pub fn parse_path<P>(path: impl AsRef<Path>, parser: &mut P) -> Result<WalkReport, AggregateError>
where
    P: Parser + ?Sized,
{
    Walker::default().parse_path(path, parser)
}

/// Drive `parser` over one file and return its record accounting.
pub fn parse_file<P>(path: impl AsRef<Path>, parser: &mut P) -> Result<RecordStats, PathError>
where
    P: Parser + ?Sized,
{
    let path = path.as_ref();
    ParserProcessor::new(parser)
        .parse_file(path)
        .map_err(|e| e.into_path_error(path))
}
