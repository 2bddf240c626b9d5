//! Types for OTP backend outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmation that the backend dispatched a verification code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispatched {
    /// When the dispatch was confirmed
    pub dispatched_at: DateTime<Utc>,
}

impl Dispatched {
    /// Confirmation stamped with the current time
    pub fn now() -> Self {
        Self {
            dispatched_at: Utc::now(),
        }
    }
}

/// Confirmation that the backend accepted the submitted code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verified {
    /// When the verification was confirmed
    pub verified_at: DateTime<Utc>,
}

impl Verified {
    /// Confirmation stamped with the current time
    pub fn now() -> Self {
        Self {
            verified_at: Utc::now(),
        }
    }
}
