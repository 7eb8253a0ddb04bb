//! Quoting-aware record reader backed by the `csv` crate.

use std::io::Read;

use super::{Record, RecordReader};
use crate::error::ReadError;

/// Reads CSV records with quoting support.
///
/// Every row is a record, including the first (no header handling). Rows may
/// have differing field counts and fields are trimmed of surrounding
/// whitespace.
pub struct CsvRecordReader<R> {
    inner: csv::Reader<R>,
    row: csv::StringRecord,
    done: bool,
}

impl<R: Read> CsvRecordReader<R> {
    /// Create a reader splitting fields on a single-byte delimiter.
    pub fn new(stream: R, delimiter: u8) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .delimiter(delimiter)
            .from_reader(stream);
        Self {
            inner,
            row: csv::StringRecord::new(),
            done: false,
        }
    }

    /// Create a reader from a separator string.
    ///
    /// The separator must be exactly one ASCII byte.
    pub fn with_separator(stream: R, separator: &str) -> Result<Self, ReadError> {
        match separator.as_bytes() {
            [] => Err(ReadError::EmptySeparator),
            [b] if b.is_ascii() => Ok(Self::new(stream, *b)),
            _ => Err(ReadError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("CSV separator must be a single ASCII byte, got {separator:?}"),
            ))),
        }
    }
}

impl<R: Read> RecordReader for CsvRecordReader<R> {
    fn read(&mut self) -> Result<Option<Record>, ReadError> {
        if self.done {
            return Ok(None);
        }
        match self.inner.read_record(&mut self.row) {
            Ok(true) => Ok(Some(self.row.iter().map(str::to_owned).collect())),
            Ok(false) => {
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                if e.is_io_error() {
                    self.done = true;
                }
                Err(ReadError::Csv(e))
            }
        }
    }
}

impl<R> std::fmt::Debug for CsvRecordReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvRecordReader")
            .field("done", &self.done)
            .finish()
    }
}
