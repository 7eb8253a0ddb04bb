//! Parser strategy: per-record consumption of a stream.

use std::io::BufRead;
use std::ops::AddAssign;

use tracing::debug;

use crate::error::{BoxError, ProcessError};
use crate::reader::{Record, RecordReader};

/// A record-oriented parsing strategy.
///
/// The lifecycle for one stream is `init`, then zero or more
/// `parse_record` calls, then `close`. `close` is called exactly once for
/// every stream whose `init` succeeded, no matter how many records failed.
/// It is never called when `init` fails.
///
/// One parser instance handles one stream at a time; a walk reuses it for
/// every file in turn.
pub trait Parser {
    /// Bind to a stream and return the reader that will produce its records.
    ///
    /// `source` names the stream (usually the file path) and is meant for
    /// diagnostics only. An error here aborts the file before any record is
    /// read.
    fn init(
        &mut self,
        stream: Box<dyn BufRead + Send>,
        source: &str,
    ) -> Result<Box<dyn RecordReader + Send>, BoxError>;

    /// Handle one record. An error drops this record only.
    fn parse_record(&mut self, record: Record) -> Result<(), BoxError>;

    /// Finalize the current stream.
    fn close(&mut self) -> Result<(), BoxError>;
}

impl<P: Parser + ?Sized> Parser for &mut P {
    fn init(
        &mut self,
        stream: Box<dyn BufRead + Send>,
        source: &str,
    ) -> Result<Box<dyn RecordReader + Send>, BoxError> {
        (**self).init(stream, source)
    }

    fn parse_record(&mut self, record: Record) -> Result<(), BoxError> {
        (**self).parse_record(record)
    }

    fn close(&mut self) -> Result<(), BoxError> {
        (**self).close()
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    fn init(
        &mut self,
        stream: Box<dyn BufRead + Send>,
        source: &str,
    ) -> Result<Box<dyn RecordReader + Send>, BoxError> {
        (**self).init(stream, source)
    }

    fn parse_record(&mut self, record: Record) -> Result<(), BoxError> {
        (**self).parse_record(record)
    }

    fn close(&mut self) -> Result<(), BoxError> {
        (**self).close()
    }
}

/// Record accounting for one or more streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordStats {
    /// Records accepted by `parse_record`
    pub records: u64,
    /// Records the reader failed to produce
    pub read_errors: u64,
    /// Records `parse_record` returned an error for
    pub rejected: u64,
}

impl RecordStats {
    /// Total records attempted, successful or not.
    pub fn attempted(&self) -> u64 {
        self.records + self.read_errors + self.rejected
    }

    /// Whether every attempted record was accepted.
    pub fn is_clean(&self) -> bool {
        self.read_errors == 0 && self.rejected == 0
    }
}

impl AddAssign for RecordStats {
    fn add_assign(&mut self, rhs: Self) {
        self.records += rhs.records;
        self.read_errors += rhs.read_errors;
        self.rejected += rhs.rejected;
    }
}

/// Drive `parser` over `stream` to completion.
///
/// Read failures and rejected records are logged, counted and skipped.
/// Returns the stream's record accounting, or the `init`/`close` failure.
pub fn parse_stream<P>(
    stream: Box<dyn BufRead + Send>,
    parser: &mut P,
    source: &str,
) -> Result<RecordStats, ProcessError>
where
    P: Parser + ?Sized,
{
    let mut reader = parser.init(stream, source).map_err(ProcessError::Init)?;
    let mut stats = RecordStats::default();

    loop {
        let record = match reader.read() {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(e) => {
                debug!(source, error = %e, "skipping unreadable record");
                stats.read_errors += 1;
                continue;
            }
        };

        match parser.parse_record(record) {
            Ok(()) => stats.records += 1,
            Err(e) => {
                debug!(source, error = %e, "parser rejected record");
                stats.rejected += 1;
            }
        }
    }
    drop(reader);

    parser.close().map_err(ProcessError::Close)?;
    debug!(
        source,
        records = stats.records,
        read_errors = stats.read_errors,
        rejected = stats.rejected,
        "finished stream"
    );
    Ok(stats)
}
