//! Session service module for the client-side OTP flow
//!
//! This module composes the issuer and verifier into the verification
//! session workflow:
//! - Initial dispatch gating session creation
//! - Code submission with single-flight verify attempts
//! - Resend with cooldown enforcement
//! - A cancellable 1 Hz cooldown ticker bound to the session lifetime

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::SessionConfig;
pub use service::{SessionHandle, SessionService};
pub use traits::{OtpIssuerTrait, OtpVerifierTrait};
pub use types::{Dispatched, Verified};
