//! Verification flow configuration module

use serde::{Deserialize, Serialize};

/// Verification flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Cooldown between code sends in seconds
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: u32,

    /// Cooldown tick interval in seconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: default_resend_cooldown(),
            tick_interval_secs: default_tick_interval(),
        }
    }
}

fn default_resend_cooldown() -> u32 {
    60
}

fn default_tick_interval() -> u64 {
    1
}
