//! Session service and handle for the client verification flow

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::session::{SessionState, VerificationSession};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::DomainResult;

use super::config::SessionConfig;
use super::traits::{OtpIssuerTrait, OtpVerifierTrait};

/// Entry point for starting verification sessions
///
/// Holds the issuer and verifier implementations and hands out one
/// [`SessionHandle`] per confirmed dispatch. The service itself is
/// stateless; every session is an explicitly owned object scoped to the
/// flow that requested it.
pub struct SessionService<I: OtpIssuerTrait, V: OtpVerifierTrait> {
    /// Issuer used for the initial send and resends
    issuer: Arc<I>,
    /// Verifier used for code submissions
    verifier: Arc<V>,
    /// Service configuration
    config: SessionConfig,
}

impl<I: OtpIssuerTrait, V: OtpVerifierTrait> SessionService<I, V> {
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `issuer` - OTP issuer implementation
    /// * `verifier` - OTP verifier implementation
    /// * `config` - Service configuration
    pub fn new(issuer: Arc<I>, verifier: Arc<V>, config: SessionConfig) -> Self {
        Self {
            issuer,
            verifier,
            config,
        }
    }

    /// Start a verification flow for a phone number
    ///
    /// Performs the initial send. A session only comes to exist once the
    /// backend confirms the dispatch; it starts with a full resend cooldown
    /// and a running one-second ticker.
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number to verify
    ///
    /// # Returns
    ///
    /// * `Ok(SessionHandle)` - Handle owning the new session
    /// * `Err(DomainError)` - If the backend did not confirm the dispatch
    pub async fn begin_verification(&self, phone: PhoneNumber) -> DomainResult<SessionHandle<I, V>> {
        debug!(
            phone = %phone,
            event = "otp_dispatch_requested",
            "Requesting initial verification code"
        );

        let dispatched = self.issuer.send(&phone).await.map_err(|e| {
            warn!(
                phone = %phone,
                error = %e,
                event = "otp_dispatch_failed",
                "Initial verification code dispatch failed"
            );
            e
        })?;

        info!(
            phone = %phone,
            event = "otp_dispatched",
            dispatched_at = %dispatched.dispatched_at,
            "Verification code dispatched, starting session"
        );

        Ok(SessionHandle::start(
            phone,
            Arc::clone(&self.issuer),
            Arc::clone(&self.verifier),
            self.config.clone(),
        ))
    }
}

/// Owned handle to one verification session
///
/// The handle wraps the session behind a mutex shared only with the
/// cooldown ticker task; the lock is never held across an await, so a
/// submit or resend round-trip cannot block ticks. Disposing (or dropping)
/// the handle closes the session and aborts the ticker, after which any
/// late network response is ignored.
pub struct SessionHandle<I: OtpIssuerTrait, V: OtpVerifierTrait> {
    session: Arc<Mutex<VerificationSession>>,
    issuer: Arc<I>,
    verifier: Arc<V>,
    ticker: JoinHandle<()>,
    session_id: Uuid,
}

impl<I: OtpIssuerTrait, V: OtpVerifierTrait> SessionHandle<I, V> {
    /// Create the session and spawn its cooldown ticker
    fn start(phone: PhoneNumber, issuer: Arc<I>, verifier: Arc<V>, config: SessionConfig) -> Self {
        let session =
            VerificationSession::new_with_cooldown(phone, config.resend_cooldown_seconds);
        let session_id = session.id;
        let session = Arc::new(Mutex::new(session));
        let ticker = spawn_ticker(Arc::clone(&session), config.tick_interval_secs);

        debug!(
            session_id = %session_id,
            cooldown_seconds = config.resend_cooldown_seconds,
            event = "session_started",
            "Verification session started"
        );

        Self {
            session,
            issuer,
            verifier,
            ticker,
            session_id,
        }
    }

    /// Identifier of the underlying session
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The single state to present
    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    /// Current code input (digits only, at most six)
    pub async fn code(&self) -> String {
        self.session.lock().await.code().to_string()
    }

    /// Replace the code input with the sanitized form of `raw`
    pub async fn set_code(&self, raw: &str) {
        self.session.lock().await.set_code_input(raw);
    }

    /// Whether a submit is currently allowed
    pub async fn can_submit(&self) -> bool {
        self.session.lock().await.can_submit()
    }

    /// Whether a resend is currently allowed
    pub async fn can_resend(&self) -> bool {
        self.session.lock().await.can_resend()
    }

    /// Seconds left until a resend becomes available
    pub async fn cooldown_seconds_remaining(&self) -> u32 {
        self.session.lock().await.cooldown_seconds_remaining()
    }

    /// The currently surfaced error message, if any
    pub async fn error_message(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .error_message()
            .map(|m| m.to_string())
    }

    /// Whether the session reached the terminal verified state
    pub async fn is_verified(&self) -> bool {
        self.session.lock().await.is_verified()
    }

    /// The phone number this session verifies
    pub async fn phone(&self) -> PhoneNumber {
        self.session.lock().await.phone().clone()
    }

    /// Submit the entered code for verification
    ///
    /// A no-op returning the current state unless the buffer holds six
    /// digits and no attempt is already in flight. The backend outcome is
    /// folded into the session: success is terminal, an incorrect code
    /// clears the buffer and surfaces its message, transient faults keep
    /// the buffer for immediate resubmission. Nothing is retried
    /// automatically.
    pub async fn submit(&self) -> SessionState {
        let (code, phone) = {
            let mut session = self.session.lock().await;
            match session.begin_verify() {
                Some(code) => (code, session.phone().clone()),
                None => return session.state(),
            }
        };

        debug!(
            session_id = %self.session_id,
            phone = %phone,
            event = "otp_verify_started",
            "Submitting verification code"
        );

        let outcome = self.verifier.verify(&phone, &code).await;

        match &outcome {
            Ok(verified) => info!(
                session_id = %self.session_id,
                phone = %phone,
                event = "otp_verified",
                verified_at = %verified.verified_at,
                "Phone number verified"
            ),
            Err(e) if e.is_transient() => warn!(
                session_id = %self.session_id,
                phone = %phone,
                error = %e,
                event = "otp_verify_failed",
                "Verification attempt failed"
            ),
            Err(_) => info!(
                session_id = %self.session_id,
                phone = %phone,
                event = "otp_rejected",
                "Verification code rejected"
            ),
        }

        let mut session = self.session.lock().await;
        session.complete_verify(outcome.map(|_| ()));
        session.state()
    }

    /// Request that a fresh code be sent
    ///
    /// A no-op returning the current state unless the cooldown has elapsed
    /// and no resend is already in flight. A confirmed dispatch restarts
    /// the cooldown at the full window and resets the code buffer; a
    /// failure surfaces its message and leaves resend available, the
    /// cooldown is not restarted.
    pub async fn resend(&self) -> SessionState {
        let phone = {
            let mut session = self.session.lock().await;
            if !session.begin_resend() {
                return session.state();
            }
            session.phone().clone()
        };

        debug!(
            session_id = %self.session_id,
            phone = %phone,
            event = "otp_resend_started",
            "Requesting new verification code"
        );

        let outcome = self.issuer.send(&phone).await;

        match &outcome {
            Ok(dispatched) => info!(
                session_id = %self.session_id,
                phone = %phone,
                event = "otp_resent",
                dispatched_at = %dispatched.dispatched_at,
                "Verification code resent"
            ),
            Err(e) => warn!(
                session_id = %self.session_id,
                phone = %phone,
                error = %e,
                event = "otp_resend_failed",
                "Resend failed"
            ),
        }

        let mut session = self.session.lock().await;
        session.complete_resend(outcome.map(|_| ()));
        session.state()
    }

    /// Dispose of the session
    ///
    /// Closes the session and stops the ticker. Idempotent; the handle
    /// stays readable and reports its frozen state. Any in-flight network
    /// response arriving later is ignored.
    pub async fn dispose(&self) {
        {
            let mut session = self.session.lock().await;
            if session.is_closed() {
                return;
            }
            session.close();
        }
        self.ticker.abort();

        debug!(
            session_id = %self.session_id,
            event = "session_disposed",
            "Verification session disposed"
        );
    }
}

impl<I: OtpIssuerTrait, V: OtpVerifierTrait> Drop for SessionHandle<I, V> {
    fn drop(&mut self) {
        // Best effort close; the abort alone already stops the ticker
        if let Ok(mut session) = self.session.try_lock() {
            session.close();
        }
        self.ticker.abort();
    }
}

/// Spawn the 1 Hz cooldown ticker for a session
///
/// The task ends on its own once the session is closed, and is aborted on
/// disposal either way, so it can never outlive the handle.
fn spawn_ticker(session: Arc<Mutex<VerificationSession>>, tick_interval_secs: u64) -> JoinHandle<()> {
    // tokio::time::interval panics on a zero period; clamp to one second
    let interval = Duration::from_secs(tick_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval_timer = tokio::time::interval(interval);
        // The first tick completes immediately; consume it so the countdown
        // starts one full interval after session creation
        interval_timer.tick().await;

        loop {
            interval_timer.tick().await;

            let mut session = session.lock().await;
            if session.is_closed() {
                break;
            }
            if session.tick() {
                debug!(
                    session_id = %session.id,
                    event = "resend_available",
                    "Resend cooldown elapsed"
                );
            }
        }
    })
}
