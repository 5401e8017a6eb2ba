//! Shared setup for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use serde_json::{json, Value};

use tk_api::AppState;
use tk_core::services::auth::AuthServiceConfig;
use tk_core::services::token::{ManualClock, TokenService, TokenServiceConfig};
use tk_infra::InMemoryUserRepository;

pub const TEST_SECRET: &str = "api-integration-test-secret";
pub const TEST_TTL_SECONDS: i64 = 3600;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub repository: Arc<InMemoryUserRepository>,
    pub clock: Arc<ManualClock>,
}

/// State over an empty in-memory user store and a clock pinned to the present
pub fn test_context() -> TestContext {
    let clock = Arc::new(ManualClock::starting_now());
    let token_service = Arc::new(
        TokenService::with_clock(
            TokenServiceConfig::new(TEST_SECRET).with_ttl_seconds(TEST_TTL_SECONDS),
            clock.clone(),
        )
        .expect("Failed to create token service"),
    );
    let repository = Arc::new(InMemoryUserRepository::new());

    let state = web::Data::new(AppState::new(
        repository.clone(),
        token_service,
        AuthServiceConfig { bcrypt_cost: 4 },
    ));

    TestContext {
        state,
        repository,
        clock,
    }
}

pub fn ada_registration() -> Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "correct horse",
        "password_confirmation": "correct horse"
    })
}
