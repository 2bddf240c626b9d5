//! One-time passcode value objects.

use pv_shared::utils::input::{is_complete_code, sanitize_code_input};

use crate::errors::DomainError;

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// In-progress code input buffer
///
/// Holds whatever the user has typed so far, sanitized on every mutation:
/// non-digit characters are dropped and the buffer never grows past
/// [`CODE_LENGTH`] digits. A complete buffer converts into an [`OtpCode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBuffer(String);

impl CodeBuffer {
    /// Creates an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the buffer contents with the sanitized form of `raw`
    ///
    /// Called with the full field text on every keystroke, so the invariant
    /// holds at all times rather than only at submission.
    pub fn set(&mut self, raw: &str) {
        self.0 = sanitize_code_input(raw, CODE_LENGTH);
    }

    /// Empties the buffer
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Current buffer contents (digits only)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits entered so far
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing has been entered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when exactly [`CODE_LENGTH`] digits have been entered
    pub fn is_complete(&self) -> bool {
        is_complete_code(&self.0, CODE_LENGTH)
    }

    /// Converts a complete buffer into a code, `None` otherwise
    pub fn to_code(&self) -> Option<OtpCode> {
        if self.is_complete() {
            Some(OtpCode(self.0.clone()))
        } else {
            None
        }
    }
}

/// A complete, exactly-[`CODE_LENGTH`]-digit verification code
///
/// Only constructible from input that already satisfies the invariant, so a
/// verify request can never carry a partial or non-numeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Creates a code from a string, validating the digit-count invariant
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if !is_complete_code(&raw, CODE_LENGTH) {
            return Err(DomainError::Validation {
                message: format!("Verification code must be exactly {} digits", CODE_LENGTH),
            });
        }
        Ok(Self(raw))
    }

    /// The code digits, for request bodies
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
