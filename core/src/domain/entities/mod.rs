//! Domain entities representing core business objects.

pub mod session;

// Re-export commonly used types
pub use session::{
    SessionState, VerificationSession, VerifyPhase,
    DEFAULT_RESEND_COOLDOWN_SECONDS, GENERIC_ERROR_MESSAGE, INCORRECT_CODE_MESSAGE,
};
