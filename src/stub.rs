//! In-memory help-desk backend.
//!
//! `StubHelpDesk` implements the full adapter contract against two
//! in-memory maps, so it can substitute transparently in tests or when no
//! vendor is configured. No network access, no credentials.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::BridgeError;
use crate::helpdesk::HelpDesk;
use crate::models::{Comment, Status, Ticket, User};

/// Mutable state behind the stub.
#[derive(Default)]
struct StubState {
    tickets: HashMap<u64, Ticket>,
    users: HashMap<u64, User>,
    next_ticket_id: u64,
    next_user_id: u64,
    /// Lazily-created authenticated actor, used as comment-author fallback.
    actor_id: Option<u64>,
}

/// An in-memory implementation of the adapter contract.
///
/// Identifiers are monotonically increasing from 1, with independent
/// counters for tickets and users. Mutation timestamps are stamped with
/// the current time at the moment of each operation.
///
/// The state sits behind a `Mutex` only to satisfy the trait's
/// `Send + Sync` bound; the intended usage is one instance per caller
/// context, matching the vendor adapters.
pub struct StubHelpDesk {
    state: Mutex<StubState>,
}

impl StubHelpDesk {
    /// Creates an empty stub.
    pub fn new() -> Self {
        StubHelpDesk {
            state: Mutex::new(StubState {
                next_ticket_id: 1,
                next_user_id: 1,
                ..StubState::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        // A poisoned lock means a previous test panicked; the state is
        // still structurally valid for these plain maps.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StubHelpDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl StubState {
    /// Resolves a user the way a vendor would, allocating ids as needed.
    fn resolve_user(&mut self, user: Option<User>) -> Result<User, BridgeError> {
        match user {
            Some(user) if user.id.is_some() => {
                let id = user.id.unwrap_or_default();
                self.users
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| BridgeError::user_not_found(format!("with id {}", id)))
            }
            Some(user) if !user.is_anonymous() => {
                // Create-or-update keyed by email.
                let existing = self
                    .users
                    .values()
                    .find(|u| u.email == user.email)
                    .cloned();
                match existing {
                    Some(found) => Ok(found),
                    None => {
                        let id = self.next_user_id;
                        self.next_user_id += 1;
                        let created = User {
                            id: Some(id),
                            ..user
                        };
                        self.users.insert(id, created.clone());
                        Ok(created)
                    }
                }
            }
            _ => Ok(self.actor()),
        }
    }

    /// Returns the stub's authenticated actor, creating it on first use.
    fn actor(&mut self) -> User {
        if let Some(id) = self.actor_id {
            if let Some(actor) = self.users.get(&id) {
                return actor.clone();
            }
        }
        let id = self.next_user_id;
        self.next_user_id += 1;
        let actor = User {
            id: Some(id),
            full_name: Some("Authenticated Actor".to_string()),
            email: None,
        };
        self.users.insert(id, actor.clone());
        self.actor_id = Some(id);
        actor
    }
}

#[async_trait]
impl HelpDesk for StubHelpDesk {
    async fn get_or_create_user(&self, user: Option<User>) -> Result<User, BridgeError> {
        self.lock().resolve_user(user)
    }

    async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError> {
        let mut state = self.lock();

        let user = state.resolve_user(ticket.user.clone())?;
        let id = state.next_ticket_id;
        state.next_ticket_id += 1;

        let created = Ticket {
            id: Some(id),
            user: Some(user),
            status: ticket.status.or(Some(Status::New)),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            ..ticket
        };
        state.tickets.insert(id, created.clone());

        tracing::debug!(ticket_id = id, "created stub ticket");
        Ok(created)
    }

    async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError> {
        self.lock()
            .tickets
            .get(&ticket_id)
            .cloned()
            .ok_or_else(|| BridgeError::ticket_not_found(ticket_id))
    }

    async fn close_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError> {
        let mut state = self.lock();
        let ticket = state
            .tickets
            .get_mut(&ticket_id)
            .ok_or_else(|| BridgeError::ticket_not_found(ticket_id))?;

        if ticket.is_closed() {
            tracing::warn!(ticket_id, "ticket has already been closed");
            return Ok(ticket.clone());
        }

        ticket.status = Some(Status::Closed);
        ticket.updated_at = Some(Utc::now());
        ticket.closed_at = Some(Utc::now());
        Ok(ticket.clone())
    }

    async fn add_comment(&self, ticket_id: u64, comment: Comment) -> Result<Ticket, BridgeError> {
        let mut state = self.lock();

        if !state.tickets.contains_key(&ticket_id) {
            return Err(BridgeError::ticket_not_found(ticket_id));
        }

        let author_fallback = match comment.author_id {
            Some(_) => None,
            None => {
                let ticket_user_id = state
                    .tickets
                    .get(&ticket_id)
                    .and_then(|t| t.user.as_ref())
                    .and_then(|u| u.id);
                Some(match ticket_user_id {
                    Some(id) => id,
                    None => state.actor().id.unwrap_or_default(),
                })
            }
        };

        let ticket = state
            .tickets
            .get_mut(&ticket_id)
            .ok_or_else(|| BridgeError::ticket_not_found(ticket_id))?;
        ticket.comment = Some(Comment {
            author_id: comment.author_id.or(author_fallback),
            ..comment
        });
        ticket.updated_at = Some(Utc::now());
        Ok(ticket.clone())
    }

    async fn update_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError> {
        let id = ticket
            .id
            .ok_or_else(|| BridgeError::validation("cannot update a ticket without an id"))?;

        let mut state = self.lock();
        let existing = state
            .tickets
            .get(&id)
            .ok_or_else(|| BridgeError::ticket_not_found(id))?;

        let updated = Ticket {
            created_at: existing.created_at,
            updated_at: Some(Utc::now()),
            ..ticket
        };
        state.tickets.insert(id, updated.clone());
        Ok(updated)
    }
}
