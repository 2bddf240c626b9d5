//! Unit tests for the session service

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::entities::session::{
    SessionState, GENERIC_ERROR_MESSAGE, INCORRECT_CODE_MESSAGE,
};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{DomainError, IssueError, VerifyError};
use crate::services::session::{SessionConfig, SessionService};

use super::mocks::{MockOtpIssuer, MockOtpVerifier};

fn phone() -> PhoneNumber {
    PhoneNumber::new("+15551234567").unwrap()
}

fn service(
    issuer: Arc<MockOtpIssuer>,
    verifier: Arc<MockOtpVerifier>,
) -> SessionService<MockOtpIssuer, MockOtpVerifier> {
    SessionService::new(issuer, verifier, SessionConfig::default())
}

fn service_with_cooldown(
    issuer: Arc<MockOtpIssuer>,
    verifier: Arc<MockOtpVerifier>,
    cooldown_seconds: u32,
) -> SessionService<MockOtpIssuer, MockOtpVerifier> {
    let config = SessionConfig {
        resend_cooldown_seconds: cooldown_seconds,
        tick_interval_secs: 1,
    };
    SessionService::new(issuer, verifier, config)
}

#[tokio::test(start_paused = true)]
async fn test_begin_verification_creates_session_in_cooldown() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer.clone(), verifier);

    let handle = service.begin_verification(phone()).await.unwrap();

    assert_eq!(issuer.send_count(), 1);
    assert_eq!(
        handle.state().await,
        SessionState::AwaitingCode {
            resend_cooldown: 60
        }
    );
    assert_eq!(handle.cooldown_seconds_remaining().await, 60);
    assert!(handle.code().await.is_empty());
    assert!(!handle.can_resend().await);
}

#[tokio::test(start_paused = true)]
async fn test_begin_verification_requires_confirmed_dispatch() {
    let issuer = Arc::new(MockOtpIssuer::failing_with(IssueError::ServerRejected {
        status: 503,
    }));
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer.clone(), verifier);

    let result = service.begin_verification(phone()).await;
    assert_eq!(issuer.send_count(), 1);

    match result {
        Err(DomainError::Issue(IssueError::ServerRejected { status })) => {
            assert_eq!(status, 503);
        }
        _ => panic!("Expected dispatch failure"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_submit_success_is_terminal() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer, verifier.clone());

    let handle = service.begin_verification(phone()).await.unwrap();
    handle.set_code("123456").await;
    assert!(handle.can_submit().await);

    let state = handle.submit().await;
    assert_eq!(state, SessionState::Verified);
    assert!(handle.is_verified().await);

    // The verifier saw the raw phone and the complete code
    let calls = verifier.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("+15551234567".to_string(), "123456".to_string())]);

    // Further submissions are no-ops
    let state = handle.submit().await;
    assert_eq!(state, SessionState::Verified);
    assert_eq!(verifier.verify_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_submit_incorrect_code_clears_buffer() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("999999"));
    let service = service(issuer, verifier.clone());

    let handle = service.begin_verification(phone()).await.unwrap();
    handle.set_code("123456").await;

    let state = handle.submit().await;
    assert_eq!(
        state,
        SessionState::Rejected {
            message: INCORRECT_CODE_MESSAGE.to_string()
        }
    );
    assert_eq!(handle.code().await, "");
    assert_eq!(
        handle.error_message().await,
        Some(INCORRECT_CODE_MESSAGE.to_string())
    );
    assert!(!handle.can_submit().await);
    assert_eq!(verifier.verify_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_submit_server_error_keeps_buffer() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::failing_with(VerifyError::ServerRejected {
        status: 500,
    }));
    let service = service(issuer, verifier.clone());

    let handle = service.begin_verification(phone()).await.unwrap();
    handle.set_code("123456").await;

    let state = handle.submit().await;
    assert_eq!(
        state,
        SessionState::Rejected {
            message: GENERIC_ERROR_MESSAGE.to_string()
        }
    );

    // Buffer kept so the user can resubmit the same code
    assert_eq!(handle.code().await, "123456");
    assert!(handle.can_submit().await);

    // Exactly one call went out, nothing is retried automatically
    assert_eq!(verifier.verify_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_submit_disabled_for_partial_code() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer, verifier.clone());

    let handle = service.begin_verification(phone()).await.unwrap();
    handle.set_code("12345").await;

    assert!(!handle.can_submit().await);
    let state = handle.submit().await;
    assert_eq!(
        state,
        SessionState::AwaitingCode {
            resend_cooldown: 60
        }
    );
    assert_eq!(verifier.verify_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_code_input_is_filtered() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer, verifier);

    let handle = service.begin_verification(phone()).await.unwrap();
    handle.set_code("12a3456789").await;
    assert_eq!(handle.code().await, "123456");
}

#[tokio::test(start_paused = true)]
async fn test_resend_is_noop_during_cooldown() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer.clone(), verifier);

    let handle = service.begin_verification(phone()).await.unwrap();
    let state = handle.resend().await;

    assert_eq!(
        state,
        SessionState::AwaitingCode {
            resend_cooldown: 60
        }
    );
    // Only the initial dispatch went out
    assert_eq!(issuer.send_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_ticks_down_once_per_second() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer, verifier);

    let handle = service.begin_verification(phone()).await.unwrap();
    assert_eq!(handle.cooldown_seconds_remaining().await, 60);

    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(handle.cooldown_seconds_remaining().await, 50);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.cooldown_seconds_remaining().await, 40);
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_elapses_exactly_once() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service_with_cooldown(issuer, verifier, 3);

    let handle = service.begin_verification(phone()).await.unwrap();
    sleep(Duration::from_millis(3_500)).await;

    assert_eq!(handle.cooldown_seconds_remaining().await, 0);
    assert_eq!(handle.state().await, SessionState::ResendAvailable);
    assert!(handle.can_resend().await);

    // Stays at zero, no wrap-around or re-trigger
    sleep(Duration::from_secs(5)).await;
    assert_eq!(handle.cooldown_seconds_remaining().await, 0);
    assert_eq!(handle.state().await, SessionState::ResendAvailable);
}

#[tokio::test(start_paused = true)]
async fn test_resend_after_cooldown_restarts_window() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("999999"));
    let service = service_with_cooldown(issuer.clone(), verifier, 2);

    let handle = service.begin_verification(phone()).await.unwrap();

    // Leave an error and a stale partial input behind first
    handle.set_code("123456").await;
    handle.submit().await;
    assert!(handle.error_message().await.is_some());
    handle.set_code("12").await;

    sleep(Duration::from_millis(2_500)).await;
    assert!(handle.can_resend().await);

    let state = handle.resend().await;
    assert_eq!(issuer.send_count(), 2);
    assert_eq!(
        state,
        SessionState::AwaitingCode { resend_cooldown: 2 }
    );
    assert_eq!(handle.cooldown_seconds_remaining().await, 2);

    // A new send resets the input and clears the old error
    assert_eq!(handle.code().await, "");
    assert_eq!(handle.error_message().await, None);
    assert!(!handle.can_resend().await);
}

#[tokio::test(start_paused = true)]
async fn test_failed_resend_leaves_resend_available() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service_with_cooldown(issuer.clone(), verifier, 1);

    let handle = service.begin_verification(phone()).await.unwrap();
    sleep(Duration::from_millis(1_500)).await;

    issuer.set_failure(Some(IssueError::NetworkFailure {
        message: "connection reset".to_string(),
    }));
    let state = handle.resend().await;

    assert_eq!(issuer.send_count(), 2);
    assert_eq!(
        state,
        SessionState::Rejected {
            message: GENERIC_ERROR_MESSAGE.to_string()
        }
    );
    // Cooldown is not restarted, the user may try again immediately
    assert_eq!(handle.cooldown_seconds_remaining().await, 0);
    assert!(handle.can_resend().await);

    // The next attempt can succeed and restart the window
    issuer.set_failure(None);
    let state = handle.resend().await;
    assert_eq!(issuer.send_count(), 3);
    assert_eq!(
        state,
        SessionState::AwaitingCode { resend_cooldown: 1 }
    );
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_elapses_while_verify_in_flight() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(
        MockOtpVerifier::failing_with(VerifyError::IncorrectCode)
            .with_delay(Duration::from_secs(5)),
    );
    let service = service_with_cooldown(issuer.clone(), verifier.clone(), 3);

    let handle = Arc::new(service.begin_verification(phone()).await.unwrap());
    handle.set_code("123456").await;

    let submit_handle = Arc::clone(&handle);
    let submit_task = tokio::spawn(async move { submit_handle.submit().await });

    // Cooldown hits zero while the verify call is still in flight
    sleep(Duration::from_millis(4_000)).await;
    assert_eq!(handle.cooldown_seconds_remaining().await, 0);
    assert_eq!(handle.state().await, SessionState::Verifying);
    assert!(!handle.can_resend().await);

    // Resend stays a no-op until the attempt resolves
    handle.resend().await;
    assert_eq!(issuer.send_count(), 1);

    // Once the attempt resolves short of verified, resend opens up
    sleep(Duration::from_secs(2)).await;
    let final_state = submit_task.await.unwrap();
    assert_eq!(
        final_state,
        SessionState::Rejected {
            message: INCORRECT_CODE_MESSAGE.to_string()
        }
    );
    assert!(handle.can_resend().await);
    assert_eq!(verifier.verify_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dispose_stops_ticker_and_ignores_late_response() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier =
        Arc::new(MockOtpVerifier::accepting("123456").with_delay(Duration::from_secs(10)));
    let service = service(issuer, verifier.clone());

    let handle = Arc::new(service.begin_verification(phone()).await.unwrap());
    handle.set_code("123456").await;

    let submit_handle = Arc::clone(&handle);
    let submit_task = tokio::spawn(async move { submit_handle.submit().await });

    // One tick lands, then the session is disposed mid-flight
    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(verifier.verify_count(), 1);
    handle.dispose().await;
    let frozen_cooldown = handle.cooldown_seconds_remaining().await;

    // The delayed verify response arrives after disposal and is ignored
    sleep(Duration::from_secs(30)).await;
    submit_task.await.unwrap();
    assert!(!handle.is_verified().await);

    // The ticker stopped with the session
    assert_eq!(handle.cooldown_seconds_remaining().await, frozen_cooldown);

    // Dispose is idempotent
    handle.dispose().await;
    assert!(!handle.is_verified().await);
}

#[tokio::test(start_paused = true)]
async fn test_submit_and_resend_after_dispose_are_inert() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let service = service(issuer.clone(), verifier.clone());

    let handle = service.begin_verification(phone()).await.unwrap();
    handle.set_code("123456").await;
    handle.dispose().await;
    let frozen = handle.state().await;

    // Neither call reaches the backend once the session is closed
    let state = handle.submit().await;
    assert_eq!(state, frozen);
    assert_eq!(verifier.verify_count(), 0);

    let state = handle.resend().await;
    assert_eq!(state, frozen);
    assert_eq!(issuer.send_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_tick_interval_falls_back_to_one_second() {
    let issuer = Arc::new(MockOtpIssuer::new());
    let verifier = Arc::new(MockOtpVerifier::accepting("123456"));
    let config = SessionConfig {
        resend_cooldown_seconds: 2,
        tick_interval_secs: 0,
    };
    let service = SessionService::new(issuer, verifier, config);

    let handle = service.begin_verification(phone()).await.unwrap();
    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(handle.cooldown_seconds_remaining().await, 1);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.state().await, SessionState::ResendAvailable);
}
