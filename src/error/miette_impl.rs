//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AggregateError, BoxError, PathError, Stage};

/// A diagnostic wrapper for walk errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct WalkDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<BoxError>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Stat | Stage::ListDir | Stage::Open => {
            "Check that the path exists and is readable"
        }
        Stage::Init => "The parser rejected the file before reading any record",
        Stage::Close => "The parser failed while finalizing its output",
        Stage::Process => "The processor reported a failure for this file",
    }
}

impl From<PathError> for WalkDiagnostic {
    fn from(e: PathError) -> Self {
        WalkDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.path.display()),
            help: Some(help_for(e.stage).into()),
            source: Some(e.error),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for WalkDiagnostic {
    fn from(agg: AggregateError) -> Self {
        let total = agg.errors.len();
        match agg.errors.into_iter().next() {
            Some(first) => {
                let mut diag = WalkDiagnostic::from(first);
                if total > 1 {
                    diag.message = format!("{} (and {} more)", diag.message, total - 1);
                }
                diag
            }
            None => WalkDiagnostic {
                message: "Unknown walk error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            },
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(WalkDiagnostic::from(agg))
    }
}
