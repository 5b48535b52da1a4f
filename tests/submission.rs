//! End-to-end submission cycles: stored key, mocked Gemini endpoint,
//! rendered conversation log.

use gemchat::api::{GeminiClient, GEMINI_MODEL};
use gemchat::app::{request_reply, App, MISSING_KEY_REPLY};
use gemchat::chat::Owner;
use gemchat::key_store::KeyStore;
use gemchat::status::StatusVariant;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generate_content_path() -> String {
    format!("/models/{}:generateContent", GEMINI_MODEL)
}

#[tokio::test]
async fn submitting_with_a_stored_key_renders_the_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .and(query_param("key", "stored-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello there!" }] } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = KeyStore::at(dir.path().join("api_key"));
    store.save("stored-key").unwrap();

    let client = GeminiClient::with_base_url(server.uri());
    let mut app = App::new();
    app.input = "Hi".to_string();

    let message = app.begin_submission().unwrap();
    assert!(app.awaiting_reply);

    let api_key = store.load().unwrap_or_default();
    let outcome = request_reply(&client, &message, &api_key).await;
    app.apply_outcome(outcome);

    assert!(!app.awaiting_reply);
    assert_eq!(app.messages.len(), 2);
    assert_eq!(app.messages[0].owner, Owner::User);
    assert_eq!(app.messages[0].text, "Hi");

    let reply = &app.messages[1];
    assert_eq!(reply.owner, Owner::Assistant);
    assert_eq!(reply.text, "Hello there!");

    // Timestamp renders as hour:minute.
    let label = reply.timestamp_label();
    assert_eq!(label.len(), 5);
    assert_eq!(label.as_bytes()[2], b':');
}

#[tokio::test]
async fn submitting_without_a_key_makes_no_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let store = KeyStore::at(dir.path().join("api_key"));

    let client = GeminiClient::with_base_url(server.uri());
    let mut app = App::new();
    app.input = "Hi".to_string();

    let message = app.begin_submission().unwrap();
    let api_key = store.load().unwrap_or_default();
    let outcome = request_reply(&client, &message, &api_key).await;
    app.apply_outcome(outcome);

    assert!(!app.awaiting_reply);
    let last = app.messages.last().unwrap();
    assert_eq!(last.owner, Owner::Assistant);
    assert_eq!(last.text, MISSING_KEY_REPLY);
    assert_eq!(app.banner.variant(), StatusVariant::Error);
}

#[tokio::test]
async fn failures_render_one_uniform_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "quota exceeded" }
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url(server.uri());
    let mut app = App::new();
    app.input = "Hi".to_string();

    let message = app.begin_submission().unwrap();
    let outcome = request_reply(&client, &message, "stored-key").await;
    app.apply_outcome(outcome);

    assert!(!app.awaiting_reply);
    let last = app.messages.last().unwrap();
    assert_eq!(last.owner, Owner::Assistant);
    // The provider detail stays out of the conversation log.
    assert!(!last.text.contains("quota exceeded"));
    assert!(last.text.contains("couldn't reach Gemini"));
}

#[tokio::test]
async fn a_second_submission_while_pending_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first reply" }] } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url(server.uri());
    let mut app = App::new();

    app.input = "first".to_string();
    let message = app.begin_submission().unwrap();

    // Second submit while the first is in flight starts no cycle.
    app.input = "second".to_string();
    assert!(app.begin_submission().is_none());

    // The pending request is not cancelled; its reply still lands.
    let outcome = request_reply(&client, &message, "stored-key").await;
    app.apply_outcome(outcome);

    assert_eq!(app.messages.len(), 2);
    assert_eq!(app.messages[1].text, "first reply");
    assert!(!app.awaiting_reply);
}
