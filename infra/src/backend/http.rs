//! HTTP OTP Backend Implementation
//!
//! This module talks to the OTP backend over HTTP. It implements the
//! issuer and verifier traits for production use.
//!
//! ## Endpoints
//!
//! - `POST {base}/send-otp` with `{"phone": "..."}`
//! - `POST {base}/verify-otp` with `{"phone": "...", "code": "..."}`
//!
//! ## Features
//!
//! - Bounded request timeouts from configuration
//! - Tolerant response parsing across backend versions
//! - Security: Phone number masking in logs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use pv_core::domain::value_objects::{OtpCode, PhoneNumber};
use pv_core::errors::{IssueError, VerifyError};
use pv_core::services::session::{Dispatched, OtpIssuerTrait, OtpVerifierTrait, Verified};
use pv_shared::config::backend::BackendConfig;

use crate::InfrastructureError;

/// Request body for the send-otp endpoint
#[derive(Debug, Serialize)]
struct SendOtpRequest<'a> {
    phone: &'a str,
}

/// Request body for the verify-otp endpoint
#[derive(Debug, Serialize)]
struct VerifyOtpRequest<'a> {
    phone: &'a str,
    code: &'a str,
}

/// OTP backend client over HTTP
pub struct HttpOtpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpOtpBackend {
    /// Create a new HTTP OTP backend
    pub fn new(config: BackendConfig) -> Result<Self, InfrastructureError> {
        config.validate().map_err(InfrastructureError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.request_timeout_secs,
            "HTTP OTP backend initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::new(BackendConfig::from_env())
    }

    /// Interpret a 200 response body from the send-otp endpoint
    ///
    /// Two response shapes are in the wild: newer backends answer with
    /// `{"status": "pending"}`, older ones with `{"success": true}`. The
    /// status field is checked first and wins when both are present.
    fn interpret_send_body(body: &Value) -> Result<(), IssueError> {
        if body.get("status").and_then(Value::as_str) == Some("pending") {
            debug!(shape = "status", "Dispatch confirmed via status field");
            return Ok(());
        }

        match body.get("success").and_then(Value::as_bool) {
            Some(true) => {
                debug!(shape = "success", "Dispatch confirmed via success field");
                Ok(())
            }
            // The backend answered 200 but explicitly declined to send
            Some(false) => Err(IssueError::ServerRejected { status: 200 }),
            None => Err(IssueError::MalformedResponse),
        }
    }

    /// Interpret a 200 response body from the verify-otp endpoint
    fn interpret_verify_body(body: &Value) -> Result<(), VerifyError> {
        match body.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(()),
            Some(false) => Err(VerifyError::IncorrectCode),
            None => Err(VerifyError::MalformedResponse),
        }
    }
}

#[async_trait]
impl OtpIssuerTrait for HttpOtpBackend {
    async fn send(&self, phone: &PhoneNumber) -> Result<Dispatched, IssueError> {
        let url = self.config.send_otp_url();

        debug!(
            phone = %phone.masked(),
            url = %url,
            "Requesting OTP dispatch"
        );

        let response = self
            .client
            .post(&url)
            .json(&SendOtpRequest {
                phone: phone.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                warn!(
                    phone = %phone.masked(),
                    error = %e,
                    "OTP dispatch request failed"
                );
                IssueError::NetworkFailure {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                phone = %phone.masked(),
                status = status.as_u16(),
                "OTP dispatch rejected by backend"
            );
            return Err(IssueError::ServerRejected {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            warn!(error = %e, "OTP dispatch response was not valid JSON");
            IssueError::MalformedResponse
        })?;

        Self::interpret_send_body(&body)?;

        info!(
            phone = %phone.masked(),
            "OTP dispatch confirmed by backend"
        );

        Ok(Dispatched::now())
    }
}

#[async_trait]
impl OtpVerifierTrait for HttpOtpBackend {
    async fn verify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<Verified, VerifyError> {
        let url = self.config.verify_otp_url();

        debug!(
            phone = %phone.masked(),
            url = %url,
            "Submitting code for verification"
        );

        let response = self
            .client
            .post(&url)
            .json(&VerifyOtpRequest {
                phone: phone.as_str(),
                code: code.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                warn!(
                    phone = %phone.masked(),
                    error = %e,
                    "Code verification request failed"
                );
                VerifyError::NetworkFailure {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                phone = %phone.masked(),
                status = status.as_u16(),
                "Code verification rejected by backend"
            );
            return Err(VerifyError::ServerRejected {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            warn!(error = %e, "Code verification response was not valid JSON");
            VerifyError::MalformedResponse
        })?;

        match Self::interpret_verify_body(&body) {
            Ok(()) => {
                info!(
                    phone = %phone.masked(),
                    "Code verification confirmed by backend"
                );
                Ok(Verified::now())
            }
            Err(VerifyError::IncorrectCode) => {
                debug!(
                    phone = %phone.masked(),
                    "Backend rejected submitted code"
                );
                Err(VerifyError::IncorrectCode)
            }
            Err(e) => Err(e),
        }
    }
}
