//! OTP Backend Module
//!
//! This module provides the OTP backend implementations used to dispatch
//! and verify codes. It includes the production HTTP client and a mock
//! implementation for development.
//!
//! ## Features
//!
//! - **HTTP backend**: Production dispatch and verification over HTTP
//! - **Mock backend**: Console output for development
//! - **Factory**: Provider selection from configuration

use async_trait::async_trait;

use pv_core::domain::value_objects::{OtpCode, PhoneNumber};
use pv_core::errors::{IssueError, VerifyError};
use pv_core::services::session::{Dispatched, OtpIssuerTrait, OtpVerifierTrait, Verified};
use pv_shared::config::backend::BackendConfig;

pub mod http;
pub mod mock;

// Re-export commonly used types
pub use http::HttpOtpBackend;
pub use mock::MockOtpBackend;

/// OTP backend selected from configuration
///
/// Wraps the concrete implementations so one configured value can be handed
/// to the session service as both issuer and verifier.
pub enum OtpBackend {
    Http(HttpOtpBackend),
    Mock(MockOtpBackend),
}

#[async_trait]
impl OtpIssuerTrait for OtpBackend {
    async fn send(&self, phone: &PhoneNumber) -> Result<Dispatched, IssueError> {
        match self {
            OtpBackend::Http(backend) => backend.send(phone).await,
            OtpBackend::Mock(backend) => backend.send(phone).await,
        }
    }
}

#[async_trait]
impl OtpVerifierTrait for OtpBackend {
    async fn verify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<Verified, VerifyError> {
        match self {
            OtpBackend::Http(backend) => backend.verify(phone, code).await,
            OtpBackend::Mock(backend) => backend.verify(phone, code).await,
        }
    }
}

/// Create an OTP backend based on configuration
///
/// Returns the appropriate backend implementation based on the provider
/// specified in the configuration.
///
/// # Arguments
///
/// * `config` - Backend configuration containing provider settings
pub fn create_otp_backend(config: &BackendConfig) -> OtpBackend {
    match config.provider.as_str() {
        "mock" => OtpBackend::Mock(MockOtpBackend::new()),
        "http" => match HttpOtpBackend::new(config.clone()) {
            Ok(backend) => OtpBackend::Http(backend),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP OTP backend: {}", e);
                tracing::warn!("Falling back to mock OTP backend");
                OtpBackend::Mock(MockOtpBackend::new())
            }
        },
        other => {
            tracing::warn!(
                "Unknown OTP provider '{}', using mock implementation",
                other
            );
            OtpBackend::Mock(MockOtpBackend::new())
        }
    }
}
