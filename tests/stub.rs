//! Contract tests for the in-memory backend.
//!
//! The stub substitutes for a vendor adapter, so these tests pin the
//! behaviors callers rely on: monotonic identifier assignment, NotFound
//! on misses, and idempotent close.

use helpdesk_bridge::helpdesk::HelpDesk;
use helpdesk_bridge::models::{Comment, Status, Ticket, User};
use helpdesk_bridge::stub::StubHelpDesk;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn ticket_ids_are_unique_and_monotonic() {
    let desk = StubHelpDesk::new();

    let mut seen = Vec::new();
    for n in 0..5 {
        let ticket = desk
            .create_ticket(Ticket::new(format!("ticket {}", n)))
            .await
            .unwrap();
        seen.push(ticket.id.unwrap());
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn fetching_a_missing_ticket_signals_not_found() {
    let desk = StubHelpDesk::new();
    let err = desk.get_ticket(12345).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn created_tickets_round_trip_through_get() {
    let desk = StubHelpDesk::new();

    let created = desk
        .create_ticket(
            Ticket::new("round trip")
                .with_body("body text")
                .with_tags(vec!["one".to_string(), "two".to_string()]),
        )
        .await
        .unwrap();

    let fetched = desk.get_ticket(created.id.unwrap()).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn user_resolution_is_consistent_between_ticket_and_requester() {
    let desk = StubHelpDesk::new();

    let ticket = desk
        .create_ticket(
            Ticket::new("needs a user")
                .with_user(User::from_name_and_email("Jim Example", "test@example.com")),
        )
        .await
        .unwrap();

    let resolved = ticket.user.unwrap();
    assert_eq!(resolved.id, Some(1));

    // A second lookup by the same email must hit the same record.
    let again = desk
        .get_or_create_user(Some(User::from_name_and_email(
            "Jim Example",
            "test@example.com",
        )))
        .await
        .unwrap();
    assert_eq!(again.id, Some(1));
}

/// The end-to-end scenario: user 1, ticket 1, idempotent close.
#[tokio::test]
async fn create_then_close_scenario() {
    let desk = StubHelpDesk::new();

    let user = desk
        .get_or_create_user(Some(User::from_name_and_email(
            "Jim Example",
            "test@example.com",
        )))
        .await
        .unwrap();
    assert_eq!(user.id, Some(1));

    let ticket = desk
        .create_ticket(
            Ticket::new("subject123")
                .with_body("Field: value")
                .with_user(user),
        )
        .await
        .unwrap();

    // The ticket counter is independent of the user counter.
    assert_eq!(ticket.id, Some(1));
    assert_eq!(ticket.topic, "subject123");
    assert_eq!(ticket.body.as_deref(), Some("Field: value"));

    let closed = desk.close_ticket(1).await.unwrap();
    assert_eq!(closed.status, Some(Status::Closed));

    // Closing again is a no-op: same state, no error, timestamps frozen.
    let closed_again = desk.close_ticket(1).await.unwrap();
    assert_eq!(closed_again.status, Some(Status::Closed));
    assert_eq!(closed_again.updated_at, closed.updated_at);
    assert_eq!(closed_again.closed_at, closed.closed_at);
}

#[tokio::test]
async fn add_comment_updates_the_stored_ticket() {
    let desk = StubHelpDesk::new();

    let ticket = desk
        .create_ticket(
            Ticket::new("commented")
                .with_user(User::from_name_and_email("Jim Example", "test@example.com")),
        )
        .await
        .unwrap();
    let id = ticket.id.unwrap();

    let updated = desk
        .add_comment(id, Comment::new("any update?").internal())
        .await
        .unwrap();

    let comment = updated.comment.clone().unwrap();
    assert_eq!(comment.body, "any update?");
    assert!(!comment.public);
    assert_eq!(comment.author_id, Some(1));

    // The mutation is visible on a fresh fetch.
    let fetched = desk.get_ticket(id).await.unwrap();
    assert_eq!(fetched.comment, updated.comment);
}

#[tokio::test]
async fn update_preserves_identifier_and_creation_time() {
    let desk = StubHelpDesk::new();

    let created = desk.create_ticket(Ticket::new("original")).await.unwrap();
    let id = created.id.unwrap();

    let mut edited = created.clone();
    edited.topic = "edited".to_string();
    let updated = desk.update_ticket(edited).await.unwrap();

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.topic, "edited");
    assert_eq!(updated.created_at, created.created_at);
}
