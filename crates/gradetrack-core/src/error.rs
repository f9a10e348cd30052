//! Store and catalog error types.
//!
//! The taxonomy is intentionally narrow: a missing record, rejected input, and
//! a malformed subject catalog. Unparseable scores are never errors; they are
//! degraded to "missing" by the score policy in [`crate::score`].

use thiserror::Error;

use crate::model::ExamId;

/// Errors returned by store, goal, and catalog operations.
#[derive(Debug, Error)]
pub enum GradeError {
    /// Update or delete of an id that is not in the store.
    #[error("exam not found: {0}")]
    NotFound(ExamId),

    /// Input rejected before mutation (e.g. a blank exam name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The subject catalog is empty, has duplicate ids, or a bad full score.
    #[error("invalid subject catalog: {0}")]
    InvalidCatalog(String),

    /// A subject id that the catalog does not define.
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
}

impl GradeError {
    /// Returns `true` if this is a "not found" outcome rather than a rejection.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GradeError::NotFound(_))
    }
}

/// Convenience alias for results carrying a [`GradeError`].
pub type Result<T, E = GradeError> = std::result::Result<T, E>;
