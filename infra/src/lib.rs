//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the PhoneVerify SDK.
//! It provides concrete implementations of the OTP issuer and verifier
//! traits defined in the core crate.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **HTTP backend**: OTP dispatch and verification against the backend API
//! - **Mock backend**: Console-logging implementation for development
//! - **Factory**: Provider selection from configuration

// Re-export core types for convenience
pub use pv_core::errors::*;

// Re-export the backend configuration from the shared crate
pub use pv_shared::config::backend::BackendConfig;

/// Backend module - OTP issuer and verifier implementations
pub mod backend;

pub use backend::{create_otp_backend, HttpOtpBackend, MockOtpBackend, OtpBackend};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client error for external services
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
