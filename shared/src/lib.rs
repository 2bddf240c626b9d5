//! Shared utilities and common types for the PhoneVerify client SDK
//!
//! This crate provides common functionality used across the SDK crates:
//! - Configuration types (backend endpoint, verification knobs, environment)
//! - Utility functions (phone masking, code input sanitizing)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, Environment, LogFormat, LoggingConfig, VerificationConfig,
};
pub use utils::{input, phone};
