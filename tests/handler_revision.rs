mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_revision_session_requires_token() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/v2/revision-session").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_revision_session_rejects_unknown_token() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .get("/v2/revision-session")
        .authorization_bearer("0123456789abcdef0123456789abcdef")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revision_session_returns_user_and_subject() {
    let server = common::create_test_server(common::create_test_state());
    let token = common::signup_and_login(&server, "alice", "pw").await;

    let response = server
        .get("/v2/revision-session")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["user"], "alice");

    let id = json["subject"]["id"].as_u64().unwrap();
    assert!(id == 1 || id == 2);
    assert!(json["subject"]["data"]["characters"].is_string());
}

#[tokio::test]
async fn test_same_seed_picks_same_subjects() {
    async fn picks(seed: u64) -> Vec<u64> {
        let server = common::create_test_server(common::create_seeded_state(seed));
        let token = common::signup_and_login(&server, "alice", "pw").await;

        let mut ids = Vec::new();
        for _ in 0..8 {
            let json = server
                .get("/v2/revision-session")
                .authorization_bearer(&token)
                .await
                .json::<serde_json::Value>();
            ids.push(json["subject"]["id"].as_u64().unwrap());
        }
        ids
    }

    assert_eq!(picks(common::TEST_SEED).await, picks(common::TEST_SEED).await);
}

#[tokio::test]
async fn test_tokens_are_not_shared_between_states() {
    let first = common::create_test_server(common::create_test_state());
    let token = common::signup_and_login(&first, "alice", "pw").await;

    let second = common::create_test_server(common::create_test_state());
    let response = second
        .get("/v2/revision-session")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trailing_slash_is_not_a_route() {
    let server = common::create_test_server(common::create_test_state());

    // Normalization lives in `app_router`; the bare router is strict.
    server
        .get("/v2/summary/")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_store_counts() {
    let server = common::create_test_server(common::create_test_state());
    common::signup_and_login(&server, "alice", "pw").await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
    assert_eq!(json["checks"]["users"]["status"], "ok");
    assert_eq!(json["checks"]["users"]["message"], "1 accounts");
    assert_eq!(json["checks"]["tokens"]["message"], "1 sessions");
    assert_eq!(json["checks"]["catalog"]["message"], "2 subjects");
}
