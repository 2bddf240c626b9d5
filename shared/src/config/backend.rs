//! OTP backend endpoint configuration module

use serde::{Deserialize, Serialize};

/// OTP backend endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the OTP backend (send-otp / verify-otp live under it)
    pub base_url: String,

    /// Timeout for backend requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Backend provider ("http" for the real backend, "mock" for development)
    #[serde(default = "default_provider")]
    pub provider: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:3000"),
            request_timeout_secs: default_request_timeout(),
            provider: default_provider(),
        }
    }
}

impl BackendConfig {
    /// Create a new backend configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OTP_BACKEND_URL")
                .unwrap_or_else(|_| String::from("http://localhost:3000")),
            request_timeout_secs: std::env::var("OTP_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
            provider: std::env::var("OTP_PROVIDER").unwrap_or_else(|_| default_provider()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "OTP backend base URL must start with http:// or https://, got: {}",
                self.base_url
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(String::from("OTP backend request timeout must be non-zero"));
        }
        Ok(())
    }

    /// URL of the send-otp endpoint
    pub fn send_otp_url(&self) -> String {
        format!("{}/send-otp", self.base_url.trim_end_matches('/'))
    }

    /// URL of the verify-otp endpoint
    pub fn verify_otp_url(&self) -> String {
        format!("{}/verify-otp", self.base_url.trim_end_matches('/'))
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_provider() -> String {
    String::from("http")
}
