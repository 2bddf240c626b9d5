//! Example demonstrating the full verification flow against the mock backend
//!
//! Logging comes from the app configuration (`OTP_ENV` selects the preset,
//! `RUST_LOG` overrides the level). Run with:
//! cargo run --example verification_flow_demo

use std::sync::Arc;
use std::time::Duration;

use pv_core::domain::value_objects::PhoneNumber;
use pv_core::services::session::{SessionConfig, SessionService};
use pv_infra::backend::MockOtpBackend;
use pv_shared::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::from_env();
    config.logging.init();
    println!("Environment: {}", config.environment);

    // Mock backend with console output so the dispatched code is visible
    let backend = MockOtpBackend::new();
    let issuer = Arc::new(backend.clone());
    let verifier = Arc::new(backend.clone());

    // Short cooldown so the demo does not wait a full minute
    config.verification.resend_cooldown_seconds = 5;
    let service = SessionService::new(issuer, verifier, SessionConfig::from(&config.verification));

    println!("\n=== Starting Verification ===");
    let phone = PhoneNumber::new("+15551234567")?;
    let handle = service.begin_verification(phone).await?;
    println!("Session {} started, state: {:?}", handle.session_id(), handle.state().await);

    // A wrong guess first
    println!("\n=== Submitting a Wrong Code ===");
    handle.set_code("000000").await;
    let state = handle.submit().await;
    println!("State after wrong code: {:?}", state);

    // Now the code the mock actually dispatched
    println!("\n=== Submitting the Dispatched Code ===");
    let code = backend.last_code().await.unwrap_or_default();
    handle.set_code(&code).await;
    let state = handle.submit().await;
    println!("State after correct code: {:?}", state);
    println!("Verified: {}", handle.is_verified().await);

    // Watch the cooldown for a moment
    println!("\n=== Resend Cooldown ===");
    for _ in 0..3 {
        println!(
            "Cooldown remaining: {}s, resend allowed: {}",
            handle.cooldown_seconds_remaining().await,
            handle.can_resend().await
        );
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    handle.dispose().await;
    println!("\nSession disposed.");

    Ok(())
}
