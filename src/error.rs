//! Infrastructure-level errors.
//!
//! Only failures to read or write timetable state are errors. Data problems
//! inside a dataset are reported as [`Diagnostic`](crate::models::Diagnostic)s
//! and never abort a run.

use thiserror::Error;

use crate::validation::ValidationError;

/// Fatal failure of a whole operation.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Snapshot JSON could not be parsed or produced.
    #[error("failed to (de)serialize timetable snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The store could not load or commit state.
    #[error("timetable store failure: {0}")]
    Store(String),

    /// A commit batch contained an occurrence the store refuses.
    #[error("rejected placement: {}", summarize(.0))]
    InvalidPlacement(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, TimetableError>;
