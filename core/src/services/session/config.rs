//! Configuration for the session service

use pv_shared::config::VerificationConfig;

use crate::domain::entities::session::DEFAULT_RESEND_COOLDOWN_SECONDS;

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seconds a fresh or resent code locks the resend action
    pub resend_cooldown_seconds: u32,
    /// Seconds between cooldown ticks
    pub tick_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            tick_interval_secs: 1,
        }
    }
}

impl From<&VerificationConfig> for SessionConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            tick_interval_secs: config.tick_interval_secs,
        }
    }
}
