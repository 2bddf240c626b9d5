//! Traits for OTP backend integration

use async_trait::async_trait;

use crate::domain::value_objects::{OtpCode, PhoneNumber};
use crate::errors::{IssueError, VerifyError};

use super::types::{Dispatched, Verified};

/// Trait for requesting that a verification code be sent
///
/// Implementations perform exactly one bounded network call per invocation
/// and never retry on their own.
#[async_trait]
pub trait OtpIssuerTrait: Send + Sync {
    /// Ask the backend to dispatch a code to `phone`
    async fn send(&self, phone: &PhoneNumber) -> Result<Dispatched, IssueError>;
}

/// Trait for checking a candidate code against the backend
///
/// Implementations forward the code as-is; the [`OtpCode`] type already
/// guarantees the six-digit invariant. The outcome is always definitive,
/// there is no partial success.
#[async_trait]
pub trait OtpVerifierTrait: Send + Sync {
    /// Ask the backend whether `code` is the one sent to `phone`
    async fn verify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<Verified, VerifyError>;
}
