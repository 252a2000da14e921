//! Zendesk vendor adapter.
//!
//! `ZendeskHelpDesk` implements the adapter contract against the Zendesk
//! Support API, translating between the neutral models and Zendesk's wire
//! shapes. The translation is a fixed field-by-field mapping with
//! presence filtering: a field absent on the source side is omitted from
//! the output entirely, which Zendesk reads as "leave untouched".

mod client;
pub mod oauth;
pub mod wire;

pub use self::client::ZendeskClient;

use async_trait::async_trait;

use crate::config::ZendeskCredentials;
use crate::error::BridgeError;
use crate::helpdesk::HelpDesk;
use crate::models::{Comment, CustomField, Priority, Status, Ticket, User};

use self::wire::{ZendeskComment, ZendeskCustomField, ZendeskTicket, ZendeskUser};

/// Zendesk-backed implementation of the adapter contract.
pub struct ZendeskHelpDesk {
    client: ZendeskClient,
}

impl ZendeskHelpDesk {
    /// Creates an adapter from credentials.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(credentials: &ZendeskCredentials) -> Result<Self, BridgeError> {
        Ok(Self {
            client: ZendeskClient::new(credentials)?,
        })
    }

    /// Creates an adapter targeting an explicit base URL.
    ///
    /// Intended for pointing the adapter at a mock server in tests.
    pub fn with_base_url(
        credentials: &ZendeskCredentials,
        base_url: &str,
    ) -> Result<Self, BridgeError> {
        Ok(Self {
            client: ZendeskClient::with_base_url(credentials, base_url)?,
        })
    }

    /// Resolves a neutral user to a confirmed Zendesk identity.
    async fn resolve_user(&self, user: Option<&User>) -> Result<User, BridgeError> {
        let resolved = match user {
            Some(user) if user.id.is_some() => {
                self.client.get_user(user.id.unwrap_or_default()).await?
            }
            Some(user) if !user.is_anonymous() => {
                self.client
                    .create_or_update_user(&user_to_wire(user))
                    .await?
            }
            // No identifying information: fall back to the actor the
            // credentials authenticate as.
            _ => self.client.me().await?,
        };
        Ok(user_from_wire(resolved))
    }
}

#[async_trait]
impl HelpDesk for ZendeskHelpDesk {
    async fn get_or_create_user(&self, user: Option<User>) -> Result<User, BridgeError> {
        self.resolve_user(user.as_ref()).await
    }

    async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError> {
        // Resolve the user first; the confirmed identity feeds both the
        // submitter and requester fields of the outgoing ticket.
        let user = self.resolve_user(ticket.user.as_ref()).await?;
        let ticket = Ticket {
            user: Some(user.clone()),
            ..ticket
        };

        let created = self.client.create_ticket(&ticket_to_wire(&ticket, &user)).await?;
        tracing::debug!(ticket_id = ?created.id, "created Zendesk ticket");
        Ok(ticket_from_wire(created))
    }

    async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError> {
        tracing::debug!(ticket_id, "looking up Zendesk ticket");
        let ticket = self.client.get_ticket(ticket_id).await?;
        Ok(ticket_from_wire(ticket))
    }

    async fn close_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError> {
        let mut ticket = self.get_ticket(ticket_id).await?;

        if ticket.is_closed() {
            tracing::warn!(ticket_id, "ticket has already been closed");
            return Ok(ticket);
        }

        ticket.status = Some(Status::Closed);
        let closed = self.update_ticket(ticket).await?;
        tracing::debug!(ticket_id, "closed Zendesk ticket");
        Ok(closed)
    }

    async fn add_comment(&self, ticket_id: u64, comment: Comment) -> Result<Ticket, BridgeError> {
        let mut ticket = self.get_ticket(ticket_id).await?;

        let comment = if comment.author_id.is_some() {
            comment
        } else {
            // Default the author to the ticket's user, else the actor.
            let author_id = match ticket.user.as_ref().and_then(|u| u.id) {
                Some(id) => Some(id),
                None => user_from_wire(self.client.me().await?).id,
            };
            Comment {
                author_id,
                ..comment
            }
        };

        ticket.comment = Some(comment);
        self.update_ticket(ticket).await
    }

    async fn update_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError> {
        let id = ticket
            .id
            .ok_or_else(|| BridgeError::validation("cannot update a ticket without an id"))?;

        let user = ticket.user.clone().unwrap_or_default();
        let updated = self
            .client
            .update_ticket(id, &ticket_to_wire(&ticket, &user))
            .await?;
        Ok(ticket_from_wire(updated))
    }
}

/// Maps a neutral ticket to the Zendesk wire shape.
///
/// Every entry translates one neutral field to its Zendesk name; absent
/// values stay absent so the vendor leaves those fields untouched. The
/// resolved user feeds both submitter and requester.
fn ticket_to_wire(ticket: &Ticket, user: &User) -> ZendeskTicket {
    ZendeskTicket {
        id: ticket.id,
        subject: Some(ticket.topic.clone()),
        description: ticket.body.clone(),
        status: ticket.status.map(|s| s.as_str().to_string()),
        priority: ticket.priority.map(|p| p.as_str().to_string()),
        requester_id: user.id,
        submitter_id: user.id,
        assignee_id: ticket.assignee_id,
        group_id: ticket.group_id,
        external_id: ticket.external_id,
        recipient: ticket.recipient_email.clone(),
        tags: ticket.tags.clone(),
        custom_fields: ticket.custom_fields.as_ref().map(|fields| {
            fields
                .iter()
                .map(|f| ZendeskCustomField {
                    id: f.id,
                    value: f.value.clone(),
                })
                .collect()
        }),
        comment: ticket.comment.as_ref().map(|c| ZendeskComment {
            body: c.body.clone(),
            public: Some(c.public),
            author_id: c.author_id.or(user.id),
        }),
        requester: None,
        created_at: None,
        updated_at: None,
        due_at: ticket.due_at,
    }
}

/// Maps a Zendesk wire ticket back to the neutral shape.
///
/// The embedded requester is preferred when Zendesk sends it; otherwise
/// the bare requester id is kept as a user reference.
fn ticket_from_wire(ticket: ZendeskTicket) -> Ticket {
    let user = match ticket.requester {
        Some(requester) => Some(user_from_wire(requester)),
        None => ticket.requester_id.map(User::from_id),
    };

    Ticket {
        id: ticket.id,
        topic: ticket.subject.unwrap_or_default(),
        body: ticket.description,
        user,
        group_id: ticket.group_id,
        external_id: ticket.external_id,
        assignee_id: ticket.assignee_id,
        recipient_email: ticket.recipient,
        tags: ticket.tags,
        custom_fields: ticket.custom_fields.map(|fields| {
            fields
                .into_iter()
                .map(|f| CustomField {
                    id: f.id,
                    value: f.value,
                })
                .collect()
        }),
        comment: ticket.comment.map(|c| Comment {
            body: c.body,
            public: c.public.unwrap_or(true),
            author_id: c.author_id,
        }),
        status: ticket.status.as_deref().and_then(Status::parse),
        priority: ticket.priority.as_deref().and_then(Priority::parse),
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
        due_at: ticket.due_at,
        closed_at: None,
    }
}

/// Maps a neutral user to the Zendesk wire shape.
fn user_to_wire(user: &User) -> ZendeskUser {
    match user.id {
        // An id is the whole lookup key; name and email are ignored.
        Some(id) => ZendeskUser {
            id: Some(id),
            ..ZendeskUser::default()
        },
        None => ZendeskUser {
            id: None,
            name: user.full_name.clone(),
            email: user.email.clone(),
        },
    }
}

/// Maps a Zendesk wire user back to the neutral shape.
fn user_from_wire(user: ZendeskUser) -> User {
    User {
        id: user.id,
        full_name: user.name,
        email: user.email,
    }
}
