//! Mock OTP Backend Implementation
//!
//! A mock implementation of the OTP backend for development and testing.
//! Codes are generated locally and printed to the console instead of being
//! dispatched over SMS.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pv_core::domain::value_objects::{OtpCode, PhoneNumber, CODE_LENGTH};
use pv_core::errors::{IssueError, VerifyError};
use pv_core::services::session::{Dispatched, OtpIssuerTrait, OtpVerifierTrait, Verified};
use pv_shared::utils::phone::is_valid_e164;

/// Mock OTP backend for development and testing
///
/// This implementation:
/// - Generates codes locally and remembers the latest one per instance
/// - Prints dispatched codes to the console
/// - Tracks call counts for testing
#[derive(Clone)]
pub struct MockOtpBackend {
    /// Counter for dispatched codes
    send_count: Arc<AtomicU64>,
    /// Counter for verification attempts
    verify_count: Arc<AtomicU64>,
    /// The most recently dispatched code
    current_code: Arc<Mutex<Option<String>>>,
    /// Fixed code to issue instead of a random one
    fixed_code: Option<String>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print dispatched codes to the console
    console_output: bool,
}

impl MockOtpBackend {
    /// Create a new mock OTP backend
    pub fn new() -> Self {
        Self {
            send_count: Arc::new(AtomicU64::new(0)),
            verify_count: Arc::new(AtomicU64::new(0)),
            current_code: Arc::new(Mutex::new(None)),
            fixed_code: None,
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock backend with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            simulate_failure,
            console_output,
            ..Self::new()
        }
    }

    /// Always issue `code` instead of a random one
    pub fn with_fixed_code(mut self, code: impl Into<String>) -> Self {
        self.fixed_code = Some(code.into());
        self
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    /// Get the total number of dispatched codes
    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    /// Get the total number of verification attempts
    pub fn verify_count(&self) -> u64 {
        self.verify_count.load(Ordering::SeqCst)
    }

    /// Reset both call counters
    pub fn reset_counters(&self) {
        self.send_count.store(0, Ordering::SeqCst);
        self.verify_count.store(0, Ordering::SeqCst);
    }

    /// The most recently dispatched code, if any
    pub async fn last_code(&self) -> Option<String> {
        self.current_code.lock().await.clone()
    }

    fn generate_code(&self) -> String {
        match &self.fixed_code {
            Some(code) => code.clone(),
            None => format!(
                "{:0width$}",
                rand::thread_rng().gen_range(0..1_000_000u32),
                width = CODE_LENGTH
            ),
        }
    }
}

impl Default for MockOtpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpIssuerTrait for MockOtpBackend {
    async fn send(&self, phone: &PhoneNumber) -> Result<Dispatched, IssueError> {
        if self.simulate_failure {
            warn!(
                phone = %phone.masked(),
                "Mock OTP backend simulating dispatch failure"
            );
            return Err(IssueError::NetworkFailure {
                message: String::from("Simulated dispatch failure"),
            });
        }

        // The real backend would reject numbers it cannot route; here the
        // format check is advisory only
        if !is_valid_e164(phone.as_str()) {
            warn!(
                phone = %phone.masked(),
                "Dispatching to a number that is not in E.164 format"
            );
        }

        let code = self.generate_code();
        *self.current_code.lock().await = Some(code.clone());

        let dispatch_id = format!("mock_{}", Uuid::new_v4());
        let count = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            // Console output for development - show the full code
            println!("\n{}", "=".repeat(60));
            println!("📱 MOCK OTP BACKEND - DISPATCH #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} (masked: {})", phone.as_str(), phone.masked());
            println!("Dispatch ID: {}", dispatch_id);
            println!("Code: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "otp_backend",
            provider = "mock",
            phone = %phone.masked(),
            dispatch_id = %dispatch_id,
            "Verification code dispatched (mock)"
        );

        // Simulate network delay
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Dispatched::now())
    }
}

#[async_trait]
impl OtpVerifierTrait for MockOtpBackend {
    async fn verify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<Verified, VerifyError> {
        if self.simulate_failure {
            warn!(
                phone = %phone.masked(),
                "Mock OTP backend simulating verification failure"
            );
            return Err(VerifyError::NetworkFailure {
                message: String::from("Simulated verification failure"),
            });
        }

        self.verify_count.fetch_add(1, Ordering::SeqCst);

        // Simulate network delay
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let current = self.current_code.lock().await;
        match current.as_deref() {
            Some(expected) if expected == code.as_str() => {
                info!(
                    target: "otp_backend",
                    provider = "mock",
                    phone = %phone.masked(),
                    "Code verification confirmed (mock)"
                );
                Ok(Verified::now())
            }
            _ => {
                debug!(
                    target: "otp_backend",
                    provider = "mock",
                    phone = %phone.masked(),
                    "Code verification rejected (mock)"
                );
                Err(VerifyError::IncorrectCode)
            }
        }
    }
}
