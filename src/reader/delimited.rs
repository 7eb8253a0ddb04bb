//! Delimiter-splitting line reader.

use std::io::{BufRead, BufReader, Read};

use super::{Record, RecordReader};
use crate::error::ReadError;

/// Reads one record per line, splitting the trimmed line on a separator.
///
/// No quoting or escaping is performed: a separator inside a field is
/// indistinguishable from a field boundary. Lines have no length cap; the
/// line buffer grows as needed and is reused between reads.
///
/// An empty line yields a record with a single empty field.
#[derive(Debug)]
pub struct DelimitedReader<R> {
    stream: R,
    separator: String,
    buf: Vec<u8>,
    line: u64,
    done: bool,
}

impl<R: BufRead> DelimitedReader<R> {
    /// Create a reader over a buffered stream.
    ///
    /// Returns `ReadError::EmptySeparator` if `separator` is empty.
    pub fn new(stream: R, separator: impl Into<String>) -> Result<Self, ReadError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ReadError::EmptySeparator);
        }
        Ok(Self {
            stream,
            separator,
            buf: Vec::new(),
            line: 0,
            done: false,
        })
    }

    /// Create a reader splitting on `,`.
    pub fn comma(stream: R) -> Self {
        Self {
            stream,
            separator: ",".into(),
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }

    /// The separator this reader splits on.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> u64 {
        self.line
    }

    /// Whether the reader has reached end of stream.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn into_inner(self) -> R {
        self.stream
    }
}

impl<R: Read> DelimitedReader<BufReader<R>> {
    /// Wrap an unbuffered stream in a `BufReader` first.
    pub fn from_reader(stream: R, separator: impl Into<String>) -> Result<Self, ReadError> {
        Self::new(BufReader::new(stream), separator)
    }
}

impl<R: BufRead> RecordReader for DelimitedReader<R> {
    fn read(&mut self) -> Result<Option<Record>, ReadError> {
        if self.done {
            return Ok(None);
        }

        self.buf.clear();
        match self.stream.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                return Ok(None);
            }
            Ok(_) => {}
            Err(e) => {
                // A failing stream is not retried; the next read reports end.
                self.done = true;
                return Err(ReadError::Io(e));
            }
        }
        self.line += 1;

        let text = std::str::from_utf8(&self.buf)
            .map_err(|_| ReadError::InvalidUtf8 { line: self.line })?;

        Ok(Some(
            text.trim()
                .split(self.separator.as_str())
                .map(str::to_owned)
                .collect(),
        ))
    }
}

impl<R: BufRead> Iterator for DelimitedReader<R> {
    type Item = Result<Record, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        RecordReader::read(self).transpose()
    }
}

impl<R: BufRead> std::iter::FusedIterator for DelimitedReader<R> {}
