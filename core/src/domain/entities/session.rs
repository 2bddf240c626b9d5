//! Verification session entity for the client-side OTP flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{CodeBuffer, OtpCode, PhoneNumber};
use crate::errors::{IssueError, VerifyError};

/// Default cooldown between code sends in seconds
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u32 = 60;

/// Message shown when the backend rejects the entered code
pub const INCORRECT_CODE_MESSAGE: &str = "Incorrect code. Please try again.";

/// Message shown for transport and server faults
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Position on the verification axis
///
/// Orthogonal to the resend cooldown: the user retries code entry without
/// waiting for the cooldown, and the cooldown ticks regardless of what the
/// current verify attempt is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPhase {
    /// Waiting for the user to enter and submit a code
    AwaitingCode,
    /// A verify request is in flight
    Verifying,
    /// The backend confirmed the code (terminal)
    Verified,
}

/// The single state reported to the presentation layer
///
/// Derived on read from the verification axis, the cooldown counter and the
/// last surfaced error. `Rejected` and `ResendAvailable` both sit on the
/// `AwaitingCode` axis; resend eligibility is independent of whether an
/// error is currently shown, so gate the resend button on
/// [`VerificationSession::can_resend`] rather than on this enum alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for code input while the resend cooldown runs
    AwaitingCode { resend_cooldown: u32 },
    /// A verify request is in flight
    Verifying,
    /// Verification succeeded (terminal)
    Verified,
    /// The last attempt failed; `message` is user-presentable
    Rejected { message: String },
    /// Cooldown elapsed, a new code may be requested
    ResendAvailable,
}

/// Verification session for one phone number
///
/// Owned by the presentation layer for the lifetime of one verification
/// attempt and never persisted. Created only once the backend has confirmed
/// a code was dispatched, so a session always starts with a running
/// cooldown.
#[derive(Debug, Clone)]
pub struct VerificationSession {
    /// Unique identifier for the session
    pub id: Uuid,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    phone: PhoneNumber,
    code: CodeBuffer,
    phase: VerifyPhase,
    cooldown_seconds_remaining: u32,
    cooldown_window_seconds: u32,
    last_error: Option<String>,
    resend_in_flight: bool,
    closed: bool,
}

impl VerificationSession {
    /// Creates a session with the default resend cooldown
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number a code was just dispatched to
    pub fn new(phone: PhoneNumber) -> Self {
        Self::new_with_cooldown(phone, DEFAULT_RESEND_COOLDOWN_SECONDS)
    }

    /// Creates a session with a custom resend cooldown
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number a code was just dispatched to
    /// * `cooldown_seconds` - Seconds until a resend becomes available
    pub fn new_with_cooldown(phone: PhoneNumber, cooldown_seconds: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            phone,
            code: CodeBuffer::new(),
            phase: VerifyPhase::AwaitingCode,
            cooldown_seconds_remaining: cooldown_seconds,
            cooldown_window_seconds: cooldown_seconds,
            last_error: None,
            resend_in_flight: false,
            closed: false,
        }
    }

    /// The phone number this session verifies
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Current code input (digits only, at most six)
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Current position on the verification axis
    pub fn phase(&self) -> VerifyPhase {
        self.phase
    }

    /// Seconds left until a resend becomes available
    pub fn cooldown_seconds_remaining(&self) -> u32 {
        self.cooldown_seconds_remaining
    }

    /// The currently surfaced error message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the session reached the terminal verified state
    pub fn is_verified(&self) -> bool {
        self.phase == VerifyPhase::Verified
    }

    /// Whether the session has been disposed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replaces the code input with the sanitized form of `raw`
    ///
    /// Non-digits are dropped and the buffer is truncated to six digits on
    /// every call, so the invariant holds mid-typing, not just at submit.
    /// Editing also clears any surfaced error. Ignored once the session is
    /// verified or closed.
    pub fn set_code_input(&mut self, raw: &str) {
        if self.closed || self.phase == VerifyPhase::Verified {
            return;
        }
        self.code.set(raw);
        self.last_error = None;
    }

    /// Whether a submit is currently allowed
    ///
    /// True exactly when the buffer holds six digits and no verify attempt
    /// is in flight.
    pub fn can_submit(&self) -> bool {
        !self.closed && self.phase == VerifyPhase::AwaitingCode && self.code.is_complete()
    }

    /// Starts a verify attempt
    ///
    /// # Returns
    ///
    /// The complete code to send when submission is allowed, `None`
    /// otherwise (state unchanged)
    pub fn begin_verify(&mut self) -> Option<OtpCode> {
        if !self.can_submit() {
            return None;
        }
        let code = self.code.to_code()?;
        self.phase = VerifyPhase::Verifying;
        self.last_error = None;
        Some(code)
    }

    /// Applies the outcome of a verify attempt
    ///
    /// Ignored unless an attempt is actually in flight and the session is
    /// still live, so a stale response cannot mutate a discarded session.
    /// An incorrect code clears the buffer; transport and server faults
    /// keep it so the user can resubmit as-is.
    pub fn complete_verify(&mut self, outcome: Result<(), VerifyError>) {
        if self.closed || self.phase != VerifyPhase::Verifying {
            return;
        }
        match outcome {
            Ok(()) => {
                self.phase = VerifyPhase::Verified;
                self.last_error = None;
            }
            Err(VerifyError::IncorrectCode) => {
                self.phase = VerifyPhase::AwaitingCode;
                self.code.clear();
                self.last_error = Some(INCORRECT_CODE_MESSAGE.to_string());
            }
            Err(_) => {
                self.phase = VerifyPhase::AwaitingCode;
                self.last_error = Some(GENERIC_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Whether a resend is currently allowed
    ///
    /// True exactly when the cooldown has elapsed, no resend is already in
    /// flight, and no verify attempt holds the axis.
    pub fn can_resend(&self) -> bool {
        !self.closed
            && self.phase == VerifyPhase::AwaitingCode
            && self.cooldown_seconds_remaining == 0
            && !self.resend_in_flight
    }

    /// Starts a resend attempt
    ///
    /// # Returns
    ///
    /// `true` when the resend may proceed; `false` is a no-op (cooldown
    /// still running, resend already in flight, or session not awaiting)
    pub fn begin_resend(&mut self) -> bool {
        if !self.can_resend() {
            return false;
        }
        self.resend_in_flight = true;
        true
    }

    /// Applies the outcome of a resend attempt
    ///
    /// On success the cooldown restarts at the full window and the code
    /// buffer resets for the new code. On failure the error is surfaced and
    /// the cooldown stays elapsed, leaving resend available.
    pub fn complete_resend(&mut self, outcome: Result<(), IssueError>) {
        if self.closed {
            return;
        }
        self.resend_in_flight = false;
        if self.phase == VerifyPhase::Verified {
            return;
        }
        match outcome {
            Ok(()) => {
                self.cooldown_seconds_remaining = self.cooldown_window_seconds;
                self.code.clear();
                self.last_error = None;
            }
            Err(_) => {
                self.last_error = Some(GENERIC_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Advances the cooldown by one second
    ///
    /// # Returns
    ///
    /// `true` exactly when this tick moved the counter to zero; the counter
    /// never goes below zero and later ticks return `false`
    pub fn tick(&mut self) -> bool {
        if self.closed || self.cooldown_seconds_remaining == 0 {
            return false;
        }
        self.cooldown_seconds_remaining -= 1;
        self.cooldown_seconds_remaining == 0
    }

    /// Marks the session as disposed
    ///
    /// All later mutations, ticks and async outcomes become no-ops.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// The single state to present
    pub fn state(&self) -> SessionState {
        match self.phase {
            VerifyPhase::Verified => SessionState::Verified,
            VerifyPhase::Verifying => SessionState::Verifying,
            VerifyPhase::AwaitingCode => {
                if let Some(message) = &self.last_error {
                    SessionState::Rejected {
                        message: message.clone(),
                    }
                } else if self.cooldown_seconds_remaining == 0 {
                    SessionState::ResendAvailable
                } else {
                    SessionState::AwaitingCode {
                        resend_cooldown: self.cooldown_seconds_remaining,
                    }
                }
            }
        }
    }
}
