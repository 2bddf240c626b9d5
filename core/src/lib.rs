//! # PhoneVerify Core
//!
//! Core domain logic for the PhoneVerify client SDK. This crate contains
//! the verification session entity and state machine, the session service,
//! the issuer/verifier abstractions over the OTP backend, and the domain
//! error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
