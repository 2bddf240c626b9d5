//! Phone number value object.

use pv_shared::utils::phone::mask_phone_number;

use crate::errors::DomainError;

/// Destination phone number for a verification code
///
/// The only invariant enforced client-side is non-emptiness; dialing-plan
/// validation is the backend's contract. `Display` renders the masked form
/// so a raw number never ends up in logs by accident; use [`as_str`] when
/// building a request body.
///
/// [`as_str`]: PhoneNumber::as_str
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a phone number from raw input
    ///
    /// # Arguments
    ///
    /// * `raw` - The phone number as entered by the user
    ///
    /// # Returns
    ///
    /// The trimmed phone number, or a validation error when the input is
    /// empty or whitespace
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation {
                message: "Phone number must not be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw phone number, for request bodies
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for display and logs (e.g., +14****2671)
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.masked())
    }
}
