//! Value objects representing immutable domain concepts.

pub mod otp_code;
pub mod phone_number;

// Re-export commonly used types
pub use otp_code::{CodeBuffer, OtpCode, CODE_LENGTH};
pub use phone_number::PhoneNumber;
