//! Halo vendor adapter.
//!
//! `HaloHelpDesk` implements the adapter contract against the Halo API.
//! The mapping follows the same presence-filtering rule as the Zendesk
//! adapter, with Halo's quirks handled in one place: numeric status and
//! priority identifiers, comma-separated tags, and notes posted as
//! separate actions rather than embedded in the ticket payload.

mod client;
pub mod wire;

pub use self::client::HaloClient;

use async_trait::async_trait;

use crate::config::HaloCredentials;
use crate::error::BridgeError;
use crate::helpdesk::HelpDesk;
use crate::models::{Comment, CustomField, Ticket, User};

use self::wire::{HaloAction, HaloCustomField, HaloTicket, HaloUser};

/// Halo-backed implementation of the adapter contract.
pub struct HaloHelpDesk {
    client: HaloClient,
}

impl HaloHelpDesk {
    /// Creates an adapter, performing the initial token exchange.
    pub async fn connect(credentials: &HaloCredentials) -> Result<Self, BridgeError> {
        Ok(Self {
            client: HaloClient::connect(credentials).await?,
        })
    }

    /// Creates an adapter targeting an explicit base URL.
    ///
    /// Intended for pointing the adapter at a mock server in tests.
    pub async fn connect_to(
        credentials: &HaloCredentials,
        base_url: &str,
    ) -> Result<Self, BridgeError> {
        Ok(Self {
            client: HaloClient::connect_to(credentials, base_url).await?,
        })
    }

    /// Resolves a neutral user to a confirmed Halo identity.
    ///
    /// Halo has no "authenticated actor" endpoint, so a user without any
    /// identifying information cannot be resolved.
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
            _ => {
                return Err(BridgeError::validation(
                    "Halo cannot resolve a user without an id or email",
                ))
            }
        };
        Ok(user_from_wire(resolved))
    }
}

#[async_trait]
impl HelpDesk for HaloHelpDesk {
    async fn get_or_create_user(&self, user: Option<User>) -> Result<User, BridgeError> {
        self.resolve_user(user.as_ref()).await
    }

    async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError> {
        let user = self.resolve_user(ticket.user.as_ref()).await?;
        let ticket = Ticket {
            user: Some(user.clone()),
            ..ticket
        };

        let created = self.client.create_ticket(&ticket_to_wire(&ticket, &user)).await?;
        tracing::debug!(ticket_id = ?created.id, "created Halo ticket");
        let mut created = ticket_from_wire(created);

        // Halo carries notes as actions, so a pending comment goes out
        // as a follow-up call rather than inside the create payload.
        if let Some(comment) = ticket.comment {
            if let Some(id) = created.id {
                created = self.add_comment(id, comment).await?;
            }
        }

        Ok(created)
    }

    async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError> {
        tracing::debug!(ticket_id, "looking up Halo ticket");
        let ticket = self.client.get_ticket(ticket_id).await?;
        Ok(ticket_from_wire(ticket))
    }

    async fn close_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError> {
        let mut ticket = self.get_ticket(ticket_id).await?;

        if ticket.is_closed() {
            tracing::warn!(ticket_id, "ticket has already been closed");
            return Ok(ticket);
        }

        ticket.status = Some(crate::models::Status::Closed);
        let closed = self.update_ticket(ticket).await?;
        tracing::debug!(ticket_id, "closed Halo ticket");
        Ok(closed)
    }

    async fn add_comment(&self, ticket_id: u64, comment: Comment) -> Result<Ticket, BridgeError> {
        let ticket = self.get_ticket(ticket_id).await?;

        let author_id = comment
            .author_id
            .or_else(|| ticket.user.as_ref().and_then(|u| u.id));

        self.client
            .post_action(&HaloAction {
                ticket_id,
                note: comment.body.clone(),
                hiddenfromuser: Some(!comment.public),
                who_agentid: author_id,
            })
            .await?;

        let mut updated = self.get_ticket(ticket_id).await?;
        updated.comment = Some(Comment {
            author_id,
            ..comment
        });
        Ok(updated)
    }

    async fn update_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError> {
        if ticket.id.is_none() {
            return Err(BridgeError::validation(
                "cannot update a ticket without an id",
            ));
        }

        let user = ticket.user.clone().unwrap_or_default();
        let updated = self
            .client
            .update_ticket(&ticket_to_wire(&ticket, &user))
            .await?;
        Ok(ticket_from_wire(updated))
    }
}

/// Maps a neutral ticket to the Halo wire shape.
fn ticket_to_wire(ticket: &Ticket, user: &User) -> HaloTicket {
    HaloTicket {
        id: ticket.id,
        summary: Some(ticket.topic.clone()),
        details: ticket.body.clone(),
        user_id: user.id,
        status_id: ticket.status.map(wire::status_to_id),
        priority_id: ticket.priority.map(wire::priority_to_id),
        agent_id: ticket.assignee_id,
        team_id: ticket.group_id,
        ticket_tags: ticket.tags.as_deref().map(wire::tags_to_wire),
        third_party_id: ticket.external_id,
        emailcclist: ticket
            .recipient_email
            .as_ref()
            .map(|email| vec![email.clone()]),
        custom_fields: ticket.custom_fields.as_ref().map(|fields| {
            fields
                .iter()
                .map(|f| HaloCustomField {
                    id: f.id,
                    value: f.value.clone(),
                })
                .collect()
        }),
        datecreated: None,
        lastactiondate: None,
        dateclosed: None,
    }
}

/// Maps a Halo wire ticket back to the neutral shape.
fn ticket_from_wire(ticket: HaloTicket) -> Ticket {
    Ticket {
        id: ticket.id,
        topic: ticket.summary.unwrap_or_default(),
        body: ticket.details,
        user: ticket.user_id.map(User::from_id),
        group_id: ticket.team_id,
        external_id: ticket.third_party_id,
        assignee_id: ticket.agent_id,
        recipient_email: ticket
            .emailcclist
            .and_then(|list| list.into_iter().next()),
        tags: ticket.ticket_tags.as_deref().map(wire::tags_from_wire),
        custom_fields: ticket.custom_fields.map(|fields| {
            fields
                .into_iter()
                .map(|f| CustomField {
                    id: f.id,
                    value: f.value,
                })
                .collect()
        }),
        comment: None,
        status: ticket.status_id.and_then(wire::status_from_id),
        priority: ticket.priority_id.and_then(wire::priority_from_id),
        created_at: ticket.datecreated,
        updated_at: ticket.lastactiondate,
        due_at: None,
        closed_at: ticket.dateclosed,
    }
}

/// Maps a neutral user to the Halo wire shape.
fn user_to_wire(user: &User) -> HaloUser {
    match user.id {
        Some(id) => HaloUser {
            id: Some(id),
            ..HaloUser::default()
        },
        None => HaloUser {
            id: None,
            name: user.full_name.clone(),
            emailaddress: user.email.clone(),
        },
    }
}

/// Maps a Halo wire user back to the neutral shape.
fn user_from_wire(user: HaloUser) -> User {
    User {
        id: user.id,
        full_name: user.name,
        email: user.emailaddress,
    }
}
