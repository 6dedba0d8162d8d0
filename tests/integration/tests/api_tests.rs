//! API Integration Tests
//!
//! The server runs over the in-memory store; no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, reaction_event_json, unique_chat_id, DigestBody, ErrorEnvelope,
    EventAck, RecordBody, TestServer,
};
use reqwest::StatusCode;

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

    server.store.set_available(false);
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
    assert_eq!(body["checks"]["database"], "unhealthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Reaction Event Tests
// ============================================================================

#[tokio::test]
async fn test_events_update_the_record() {
    let server = TestServer::start().await.expect("Failed to start server");
    let chat_id = unique_chat_id();

    let response = server
        .post("/api/v1/reactions/events", &reaction_event_json(42, chat_id, &[], &["👍"]))
        .await
        .unwrap();
    let ack: EventAck = assert_json(response, StatusCode::ACCEPTED).await.unwrap();
    assert!(ack.applied);
    assert_eq!(ack.reactions_count, Some(1));

    let response = server
        .post(
            "/api/v1/reactions/events",
            &reaction_event_json(42, chat_id, &["👍"], &["👍", "🔥"]),
        )
        .await
        .unwrap();
    let ack: EventAck = assert_json(response, StatusCode::ACCEPTED).await.unwrap();
    assert_eq!(ack.reactions_count, Some(2));

    let path = format!("/api/v1/chats/{chat_id}/messages/42/reactions");
    let response = server.get(&path).await.unwrap();
    let record: RecordBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(record.message_id, 42);
    assert_eq!(record.chat_id, chat_id.into_inner());
    assert_eq!(record.reactions_count, Some(2));
}

#[tokio::test]
async fn test_failed_event_is_still_accepted() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.store.set_available(false);

    let response = server
        .post(
            "/api/v1/reactions/events",
            &reaction_event_json(1, unique_chat_id(), &[], &["👍"]),
        )
        .await
        .unwrap();
    let ack: EventAck = assert_json(response, StatusCode::ACCEPTED).await.unwrap();
    assert!(!ack.applied);
    assert!(ack.reactions_count.is_none());
}

#[tokio::test]
async fn test_malformed_event_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_raw("/api/v1/reactions/events", "application/json", "{\"message_id\": ")
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");
    assert!(server.store.is_empty());
}

// ============================================================================
// Digest Tests
// ============================================================================

#[tokio::test]
async fn test_digest_endpoint() {
    let server = TestServer::start().await.expect("Failed to start server");
    let chat_id = unique_chat_id();

    for (message_id, reactions) in [(1, vec!["👍"]), (2, vec!["👍", "🔥", "🎉"]), (3, vec!["👍", "🔥"])] {
        let response = server
            .post(
                "/api/v1/reactions/events",
                &reaction_event_json(message_id, chat_id, &[], &reactions),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::ACCEPTED).await.unwrap();
    }

    let path = format!("/api/v1/chats/{chat_id}/digest?period=day&limit=2&username=rustaceans");
    let response = server.get(&path).await.unwrap();
    let digest: DigestBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(digest.chat_id, chat_id.into_inner());
    assert_eq!(digest.period, "day");
    assert_eq!(digest.title, "Top reactions in this chat for the last day:");
    assert_eq!(digest.total, 3);
    let ranked: Vec<(i32, i64)> = digest
        .items
        .iter()
        .map(|item| (item.reactions_count, item.message_id))
        .collect();
    assert_eq!(ranked, vec![(3, 2), (2, 3)]);
    assert_eq!(digest.items[0].link, "https://t.me/rustaceans/2");
}

#[tokio::test]
async fn test_digest_text_endpoint() {
    let server = TestServer::start().await.expect("Failed to start server");
    let chat_id = unique_chat_id();

    let response = server
        .post(
            "/api/v1/reactions/events",
            &reaction_event_json(5, chat_id, &[], &["👍", "🔥"]),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::ACCEPTED).await.unwrap();

    let path = format!("/api/v1/chats/{chat_id}/digest/text?period=digest:week&username=rustaceans");
    let response = server.get(&path).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "Top reactions in this chat for the last week:\nReactions: 2 Link: https://t.me/rustaceans/5"
    );
}

#[tokio::test]
async fn test_digest_unknown_period() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/chats/100/digest?period=fortnight")
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PERIOD");
}

#[tokio::test]
async fn test_digest_query_validation() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/chats/100/digest?period=day&limit=0")
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");

    let response = server.get("/api/v1/chats/100/digest").await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_digest_invalid_chat_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/chats/not-a-chat/digest?period=day")
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Record Tests
// ============================================================================

#[tokio::test]
async fn test_record_not_found() {
    let server = TestServer::start().await.expect("Failed to start server");

    let path = format!("/api/v1/chats/{}/messages/1/reactions", unique_chat_id());
    let response = server.get(&path).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_record() {
    let server = TestServer::start().await.expect("Failed to start server");
    let chat_id = unique_chat_id();

    let response = server
        .post("/api/v1/reactions/events", &reaction_event_json(9, chat_id, &[], &["👍"]))
        .await
        .unwrap();
    assert_status(response, StatusCode::ACCEPTED).await.unwrap();

    let path = format!("/api/v1/chats/{chat_id}/messages/9/reactions");
    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
