//! API Integration Tests
//!
//! Each test starts the real application on an ephemeral port with in-memory
//! storage, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Wait long enough that a 1 ms inactivity threshold makes everyone stale
async fn let_time_pass() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Participant Tests
// ============================================================================

#[tokio::test]
async fn test_register_participant() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    let response = server.post("/participants", &request).await.unwrap();
    let created: ParticipantBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.name, request.name);
    assert!(created.last_status > 0);

    let response = server.get("/participants").await.unwrap();
    let listed: Vec<ParticipantBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.iter().any(|p| p.name == request.name));
}

#[tokio::test]
async fn test_register_duplicate_name() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    server.post("/participants", &request).await.unwrap();
    let response = server.post("/participants", &request).await.unwrap();
    let err: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.error.code, "PARTICIPANT_ALREADY_EXISTS");

    let response = server.get("/participants").await.unwrap();
    let listed: Vec<ParticipantBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.iter().filter(|p| p.name == request.name).count(), 1);
}

#[tokio::test]
async fn test_register_invalid_body() {
    let server = TestServer::start().await.unwrap();

    let response = server.post("/participants", &RegisterRequest::new("")).await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    let response = server
        .post("/participants", &serde_json::json!({"nome": "Ana"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
}

#[tokio::test]
async fn test_registration_is_announced() {
    let server = TestServer::start().await.unwrap();
    server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();

    let response = server.get_as("/messages", "Bia").await.unwrap();
    let messages: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].from, "Ana");
    assert_eq!(messages[0].kind, "status");
    assert_eq!(messages[0].text, "entra na sala...");
}

// ============================================================================
// Heartbeat Tests
// ============================================================================

#[tokio::test]
async fn test_heartbeat() {
    let server = TestServer::start().await.unwrap();
    server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();

    let response = server.heartbeat("Ana").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_heartbeat_unknown_participant() {
    let server = TestServer::start().await.unwrap();

    let response = server.heartbeat("Ghost").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.post("/status", &serde_json::json!({})).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/participants").await.unwrap();
    let listed: Vec<ParticipantBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.is_empty());
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_post_message() {
    let server = TestServer::start().await.unwrap();
    server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();

    let response = server
        .post_as("/messages", "Ana", &PostMessageRequest::public("oi"))
        .await
        .unwrap();
    let created: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.from, "Ana");
    assert_eq!(created.to, "Todos");
    assert_eq!(created.time.len(), 8);

    let response = server.get_as("/messages", "Ana").await.unwrap();
    let messages: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages[0].text, "oi");
}

#[tokio::test]
async fn test_post_message_unknown_sender() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_as("/messages", "Ghost", &PostMessageRequest::public("oi"))
        .await
        .unwrap();
    let err: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(err.error.code, "UNKNOWN_SENDER");
}

#[tokio::test]
async fn test_post_message_invalid_type() {
    let server = TestServer::start().await.unwrap();
    server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();

    for kind in ["status", "shout"] {
        let request = PostMessageRequest {
            to: "Todos".to_string(),
            text: "oi".to_string(),
            kind: kind.to_string(),
        };
        let response = server.post_as("/messages", "Ana", &request).await.unwrap();
        assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
    }
}

#[tokio::test]
async fn test_private_messages_not_visible_to_others() {
    let server = TestServer::start().await.unwrap();
    for name in ["Ana", "Bia", "Caio"] {
        server.post("/participants", &RegisterRequest::new(name)).await.unwrap();
    }

    server
        .post_as("/messages", "Ana", &PostMessageRequest::private("Bia", "segredo"))
        .await
        .unwrap();

    for (reader, sees) in [("Ana", true), ("Bia", true), ("Caio", false)] {
        let response = server.get_as("/messages", reader).await.unwrap();
        let messages: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(messages.iter().any(|m| m.text == "segredo"), sees, "{reader}");
    }
}

#[tokio::test]
async fn test_message_limit() {
    let server = TestServer::start().await.unwrap();
    server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();
    for i in 1..=5 {
        server
            .post_as("/messages", "Ana", &PostMessageRequest::public(i.to_string()))
            .await
            .unwrap();
    }

    let response = server.get_as("/messages?limit=2", "Ana").await.unwrap();
    let messages: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["5", "4"]);
}

#[tokio::test]
async fn test_message_limit_invalid() {
    let server = TestServer::start().await.unwrap();

    for query in ["limit=0", "limit=-3", "limit=abc"] {
        let response = server.get_as(&format!("/messages?{query}"), "Ana").await.unwrap();
        assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
    }
}

// ============================================================================
// Eviction Tests
// ============================================================================

#[tokio::test]
async fn test_idle_participant_is_evicted() {
    let server = TestServer::start().await.unwrap();
    server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();

    let_time_pass().await;
    let report = server.sweep(Duration::from_millis(1)).await.unwrap();
    assert_eq!(report.evicted, vec!["Ana".to_string()]);

    let response = server.get("/participants").await.unwrap();
    let listed: Vec<ParticipantBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.is_empty());

    let response = server.get_as("/messages", "Bia").await.unwrap();
    let messages: Vec<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let left: Vec<_> = messages.iter().filter(|m| m.text == "left").collect();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].from, "Ana");
    assert_eq!(left[0].kind, "status");

    // Gone participants can no longer heartbeat, but may join again.
    let response = server.heartbeat("Ana").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_active_participant_survives_sweep() {
    let server = TestServer::start().await.unwrap();
    server.post("/participants", &RegisterRequest::new("Ana")).await.unwrap();

    let report = server.sweep(Duration::from_secs(10)).await.unwrap();
    assert!(report.is_empty());

    let response = server.get("/participants").await.unwrap();
    let listed: Vec<ParticipantBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
}
