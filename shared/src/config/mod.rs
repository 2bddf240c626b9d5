//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `backend` - OTP backend endpoint and HTTP client configuration
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Verification flow knobs (cooldown, tick interval)

pub mod backend;
pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use backend::BackendConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::VerificationConfig;

/// Complete SDK configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// OTP backend configuration
    pub backend: BackendConfig,

    /// Verification flow configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            backend: BackendConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig::from_env(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            backend: BackendConfig::from_env(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}
