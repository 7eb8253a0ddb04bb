//! # dirparse
//!
//! Walk a file or directory tree and drive a record-oriented parser over
//! every file in it.
//!
//! ## Overview
//!
//! dirparse separates three concerns:
//! - **Readers** (`RecordReader`): turn a byte stream into records, one per
//!   line. `DelimitedReader` splits trimmed lines on a separator string.
//! - **Parsers** (`Parser`): bind a reader to a stream in `init`, consume
//!   records in `parse_record`, and finalize in `close`.
//! - **Processors** (`Processor`): own a whole file. `ParserProcessor`
//!   adapts any parser into a processor.
//!
//! The `Walker` ties them together: it visits a file directly, or walks a
//! directory depth-first, skipping hidden entries (names starting with `.`).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::io::BufRead;
//!
//! use dirparse::{BoxError, DelimitedReader, Parser, Record, RecordReader, parse_path};
//!
//! #[derive(Default)]
//! struct FieldCounter {
//!     fields: usize,
//! }
//!
//! impl Parser for FieldCounter {
//!     fn init(
//!         &mut self,
//!         stream: Box<dyn BufRead + Send>,
//!         _source: &str,
//!     ) -> Result<Box<dyn RecordReader + Send>, BoxError> {
//!         Ok(Box::new(DelimitedReader::new(stream, ",")?))
//!     }
//!
//!     fn parse_record(&mut self, record: Record) -> Result<(), BoxError> {
//!         self.fields += record.len();
//!         Ok(())
//!     }
//!
//!     fn close(&mut self) -> Result<(), BoxError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut counter = FieldCounter::default();
//!     let report = parse_path("data/", &mut counter)?;
//!     println!("{} files, {} fields", report.files, counter.fields);
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! - Failures on the path passed in (stat, listing the root directory,
//!   opening a root file) are always returned.
//! - Failures below the root follow `ErrorPolicy`: `Swallow` (default) logs
//!   and counts them, `Accumulate` returns them all once the walk is done,
//!   `FastFail` stops at the first.
//! - A failing `Parser::init` aborts that file before any record is read;
//!   `close` is not called.
//! - Unreadable or rejected records are skipped and counted in
//!   `RecordStats`; `close` still runs once.
//!
//! ## Features
//!
//! - `json` - Load `WalkConfig` from JSON (enabled by default)
//! - `yaml` - Load `WalkConfig` from YAML
//! - `toml` - Load `WalkConfig` from TOML
//! - `csv` - `CsvRecordReader`, a quoting-aware reader
//! - `miette` - Pretty error reporting with miette
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod config;
pub mod error;
pub mod parser;
pub mod processor;
pub mod reader;
pub mod walker;

// Re-exports for convenience
pub use config::WalkConfig;
pub use error::{
    AggregateError, BoxError, ConfigError, ErrorPolicy, PathError, ProcessError, ReadError, Stage,
};
pub use parser::{Parser, RecordStats, parse_stream};
pub use processor::{FnProcessor, ParserProcessor, Processor};
#[cfg(feature = "csv")]
pub use reader::CsvRecordReader;
pub use reader::{DelimitedReader, Record, RecordReader};
pub use walker::{WalkReport, Walker, parse_file, parse_path, process_file, process_path};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::WalkDiagnostic;
