//! Record readers: turning byte streams into records.
//!
//! This module provides:
//! - `Record`: One parsed line as an ordered list of fields
//! - `RecordReader`: Trait for stateful record cursors
//! - `DelimitedReader`: Line reader splitting on a separator string
//! - `CsvRecordReader`: Quoting-aware reader backed by the `csv` crate

mod delimited;

pub use delimited::DelimitedReader;

#[cfg(feature = "csv")]
mod csv_reader;

#[cfg(feature = "csv")]
pub use csv_reader::CsvRecordReader;

use crate::error::ReadError;

/// One parsed line, fields in input order.
pub type Record = Vec<String>;

/// A stateful cursor producing records from a byte stream.
///
/// Each call to `read` returns one of:
/// - `Ok(Some(record))` for the next record
/// - `Ok(None)` once the stream is exhausted
/// - `Err(_)` for a failure on the current record
///
/// End of stream is terminal. Once a reader has returned `Ok(None)` every
/// further call must return `Ok(None)` as well. Readers are not restartable.
pub trait RecordReader {
    fn read(&mut self) -> Result<Option<Record>, ReadError>;
}

impl<R: RecordReader + ?Sized> RecordReader for Box<R> {
    fn read(&mut self) -> Result<Option<Record>, ReadError> {
        (**self).read()
    }
}

impl<R: RecordReader + ?Sized> RecordReader for &mut R {
    fn read(&mut self) -> Result<Option<Record>, ReadError> {
        (**self).read()
    }
}
