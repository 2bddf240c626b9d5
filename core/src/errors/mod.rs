//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{IssueError, VerifyError};

use thiserror::Error;

/// Core domain errors (general purpose)
///
/// Closed sessions do not produce an error: every call on a closed
/// session is a deliberate no-op that reports the frozen state instead.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Issue(#[from] IssueError),

    #[error(transparent)]
    Verify(#[from] VerifyError),
}

pub type DomainResult<T> = Result<T, DomainError>;
