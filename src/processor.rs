//! Processor strategy: whole-file handling.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::ProcessError;
use crate::parser::{Parser, RecordStats, parse_stream};

/// A strategy that owns the full open-read-close sequence of one file.
pub trait Processor {
    fn process(&mut self, path: &Path) -> Result<(), ProcessError>;
}

impl<P: Processor + ?Sized> Processor for &mut P {
    fn process(&mut self, path: &Path) -> Result<(), ProcessError> {
        (**self).process(path)
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn process(&mut self, path: &Path) -> Result<(), ProcessError> {
        (**self).process(path)
    }
}

/// Adapts a `Parser` into a `Processor`.
///
/// Each `process` call opens the file, runs `Parser::init`, feeds it every
/// record and calls `Parser::close`. Record accounting accumulates across
/// files and is available from `stats`.
#[derive(Debug)]
pub struct ParserProcessor<P> {
    parser: P,
    stats: RecordStats,
    files: u64,
}

impl<P: Parser> ParserProcessor<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            stats: RecordStats::default(),
            files: 0,
        }
    }

    /// Parse a single file and return its own record accounting.
    pub fn parse_file(&mut self, path: &Path) -> Result<RecordStats, ProcessError> {
        let file = File::open(path)?;
        let source = path.to_string_lossy();
        debug!(path = %source, "parsing file");

        let stats = parse_stream(Box::new(BufReader::new(file)), &mut self.parser, &source)?;
        self.stats += stats;
        self.files += 1;
        Ok(stats)
    }

    /// Totals over every file that closed successfully.
    pub fn stats(&self) -> RecordStats {
        self.stats
    }

    /// Number of files that closed successfully.
    pub fn files(&self) -> u64 {
        self.files
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn parser_mut(&mut self) -> &mut P {
        &mut self.parser
    }

    pub fn into_inner(self) -> P {
        self.parser
    }
}

impl<P: Parser> Processor for ParserProcessor<P> {
    fn process(&mut self, path: &Path) -> Result<(), ProcessError> {
        self.parse_file(path).map(|_| ())
    }
}

/// A processor backed by a closure.
///
/// # Example
///
/// ```rust,ignore
/// use dirparse::{FnProcessor, process_path};
///
/// let mut seen = Vec::new();
/// let mut processor = FnProcessor::new(|path: &std::path::Path| {
///     seen.push(path.to_path_buf());
///     Ok(())
/// });
/// process_path("data", &mut processor)?;
/// ```
pub struct FnProcessor<F> {
    f: F,
}

impl<F> FnProcessor<F>
where
    F: FnMut(&Path) -> Result<(), ProcessError>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Processor for FnProcessor<F>
where
    F: FnMut(&Path) -> Result<(), ProcessError>,
{
    fn process(&mut self, path: &Path) -> Result<(), ProcessError> {
        (self.f)(path)
    }
}

impl<F> std::fmt::Debug for FnProcessor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProcessor").finish()
    }
}
