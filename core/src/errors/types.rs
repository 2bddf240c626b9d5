//! Domain-specific error types for OTP issuance and verification
//!
//! This module provides error type definitions for the two backend
//! operations. User-facing message selection happens in the session layer;
//! these variants carry just enough structure to distinguish a wrong guess
//! from an infrastructure fault.

use thiserror::Error;

/// Errors from requesting a code be sent
///
/// None of these are retried automatically. Recovery is always a manual
/// resend from the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    #[error("Server rejected send request with status {status}")]
    ServerRejected { status: u16 },

    #[error("Malformed send response")]
    MalformedResponse,
}

/// Errors from verifying a candidate code
///
/// `IncorrectCode` is the one terminal-to-the-guess outcome: the backend
/// was reached and explicitly rejected the code. The rest are transport or
/// server faults and say nothing about the code itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Incorrect verification code")]
    IncorrectCode,

    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    #[error("Server rejected verify request with status {status}")]
    ServerRejected { status: u16 },

    #[error("Malformed verify response")]
    MalformedResponse,
}

impl VerifyError {
    /// True for failures that say nothing about whether the code was right
    pub fn is_transient(&self) -> bool {
        !matches!(self, VerifyError::IncorrectCode)
    }
}
