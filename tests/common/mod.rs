#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use srs_dashboard::domain::clock::FixedClock;
use srs_dashboard::domain::random::StdRandomSource;
use srs_dashboard::infrastructure::memory::FixtureCatalog;
use srs_dashboard::routes::api_router;
use srs_dashboard::state::AppState;
use std::sync::Arc;

pub const TEST_SEED: u64 = 7;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
}

pub fn create_test_state() -> AppState {
    create_seeded_state(TEST_SEED)
}

pub fn create_seeded_state(seed: u64) -> AppState {
    AppState::new(
        FixtureCatalog::sample(),
        "test-signing-secret".to_string(),
        Arc::new(FixedClock(fixed_now())),
        Arc::new(StdRandomSource::seeded(seed)),
    )
}

/// Full router (auth, tracing) without the rate limiter, which needs a peer
/// address that the in-process transport does not supply.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(api_router(state, false)).unwrap()
}

pub async fn signup(server: &TestServer, username: &str, password: &str) {
    server
        .post("/signup")
        .json(&json!({ "username": username, "password": password }))
        .await
        .assert_status_ok();
}

pub async fn signup_and_login(server: &TestServer, username: &str, password: &str) -> String {
    signup(server, username, password).await;

    let response = server
        .post("/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}
