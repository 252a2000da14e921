//! Integration tests for the Zendesk adapter against a mock server.
//!
//! Each test mounts only the endpoints the operation under test is
//! allowed to hit; an unexpected request 404s and fails the assertion.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use helpdesk_bridge::config::{OauthCredentials, ZendeskCredentials};
use helpdesk_bridge::error::BridgeError;
use helpdesk_bridge::helpdesk::HelpDesk;
use helpdesk_bridge::models::{Comment, Priority, Status, Ticket, User};
use helpdesk_bridge::zendesk::{oauth, ZendeskHelpDesk};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> ZendeskCredentials {
    ZendeskCredentials {
        email: "agent@example.com".to_string(),
        token: "test_token".to_string(),
        subdomain: "acme".to_string(),
        timeout_secs: 5,
    }
}

fn adapter(server: &MockServer) -> ZendeskHelpDesk {
    ZendeskHelpDesk::with_base_url(&credentials(), &server.uri()).unwrap()
}

fn expected_auth_header() -> String {
    format!(
        "Basic {}",
        BASE64_STANDARD.encode("agent@example.com/token:test_token")
    )
}

#[tokio::test]
async fn requests_carry_token_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me.json"))
        .and(header("Authorization", expected_auth_header().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 9000, "name": "Agent", "email": "agent@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let actor = adapter(&server).get_or_create_user(None).await.unwrap();
    assert_eq!(actor.id, Some(9000));
}

#[tokio::test]
async fn create_ticket_resolves_user_then_submits() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/create_or_update.json"))
        .and(body_partial_json(json!({
            "user": {"name": "Jim Example", "email": "test@example.com"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "Jim Example", "email": "test@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The confirmed user id must feed both submitter and requester.
    Mock::given(method("POST"))
        .and(path("/tickets.json"))
        .and(body_partial_json(json!({
            "ticket": {
                "subject": "subject123",
                "description": "Field: value",
                "requester_id": 1,
                "submitter_id": 1,
                "priority": "high"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ticket": {
                "id": 35436,
                "subject": "subject123",
                "description": "Field: value",
                "status": "new",
                "priority": "high",
                "requester_id": 1,
                "submitter_id": 1,
                "created_at": "2024-02-01T09:30:00Z"
            },
            "audit": {"id": 123}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = adapter(&server)
        .create_ticket(
            Ticket::new("subject123")
                .with_body("Field: value")
                .with_priority(Priority::High)
                .with_user(User::from_name_and_email("Jim Example", "test@example.com")),
        )
        .await
        .unwrap();

    assert_eq!(created.id, Some(35436));
    assert_eq!(created.topic, "subject123");
    assert_eq!(created.body.as_deref(), Some("Field: value"));
    assert_eq!(created.status, Some(Status::New));
    assert_eq!(created.user.and_then(|u| u.id), Some(1));
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn get_missing_ticket_signals_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/42.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "RecordNotFound", "description": "Not found"
        })))
        .mount(&server)
        .await;

    let err = adapter(&server).get_ticket(42).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("42"));
}

#[tokio::test]
async fn close_ticket_sets_status_and_updates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": {"id": 7, "subject": "open one", "status": "open", "requester_id": 3}
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/tickets/7.json"))
        .and(body_partial_json(json!({"ticket": {"status": "closed"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": {"id": 7, "subject": "open one", "status": "closed", "requester_id": 3},
            "audit": {"id": 99}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let closed = adapter(&server).close_ticket(7).await.unwrap();
    assert_eq!(closed.status, Some(Status::Closed));
    assert_eq!(closed.id, Some(7));
}

#[tokio::test]
async fn closing_a_closed_ticket_is_a_noop() {
    let server = MockServer::start().await;

    // Only the GET is mounted: an update attempt would 404 and error.
    Mock::given(method("GET"))
        .and(path("/tickets/8.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": {"id": 8, "subject": "done", "status": "closed"}
        })))
        .mount(&server)
        .await;

    let ticket = adapter(&server).close_ticket(8).await.unwrap();
    assert_eq!(ticket.status, Some(Status::Closed));
}

#[tokio::test]
async fn add_comment_defaults_author_to_ticket_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/5.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": {"id": 5, "subject": "quiet", "status": "open", "requester_id": 77}
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/tickets/5.json"))
        .and(body_partial_json(json!({
            "ticket": {"comment": {"body": "any update?", "public": true, "author_id": 77}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": {"id": 5, "subject": "quiet", "status": "open", "requester_id": 77}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = adapter(&server)
        .add_comment(5, Comment::new("any update?"))
        .await
        .unwrap();
    assert_eq!(ticket.id, Some(5));
}

#[tokio::test]
async fn update_of_unknown_ticket_signals_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/tickets/404.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "RecordNotFound"
        })))
        .mount(&server)
        .await;

    let mut ticket = Ticket::new("ghost");
    ticket.id = Some(404);

    let err = adapter(&server).update_ticket(ticket).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_without_id_is_rejected_locally() {
    // No mocks: the request must never leave the adapter.
    let server = MockServer::start().await;

    let err = adapter(&server)
        .update_ticket(Ticket::new("no id"))
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::Validation(_)));
}

#[tokio::test]
async fn invalid_credentials_surface_as_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Couldn't authenticate you"
        })))
        .mount(&server)
        .await;

    let err = adapter(&server).get_ticket(1).await.unwrap_err();
    assert!(matches!(err, BridgeError::Authentication));
}

#[tokio::test]
async fn server_errors_are_surfaced_not_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/1.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = adapter(&server).get_ticket(1).await.unwrap_err();
    match err {
        BridgeError::HttpStatus { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn oauth_exchange_posts_authorization_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/tokens"))
        .and(body_partial_json(json!({
            "grant_type": "authorization_code",
            "code": "auth_code_123",
            "client_id": "client_abc",
            "redirect_uri": "https://app.example.com/callback"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok_1",
            "token_type": "bearer",
            "scope": "read write"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = oauth::exchange_token_at(
        &format!("{}/oauth/tokens", server.uri()),
        "https://app.example.com/callback",
        &OauthCredentials {
            client_id: "client_abc".to_string(),
            client_secret: "secret_xyz".to_string(),
        },
        Some("auth_code_123"),
    )
    .await
    .unwrap();

    assert_eq!(token.access_token, "tok_1");
    assert_eq!(token.scope.as_deref(), Some("read write"));
}

#[tokio::test]
async fn oauth_exchange_sanitizes_secret_in_error_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/tokens"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("invalid client: secret_xyz rejected"),
        )
        .mount(&server)
        .await;

    let err = oauth::exchange_token_at(
        &format!("{}/oauth/tokens", server.uri()),
        "https://app.example.com/callback",
        &OauthCredentials {
            client_id: "client_abc".to_string(),
            client_secret: "secret_xyz".to_string(),
        },
        Some("auth_code_123"),
    )
    .await
    .unwrap_err();

    let message = err.to_string();
    assert!(!message.contains("secret_xyz"));
    assert!(message.contains("[REDACTED]"));
}
