//! The vendor-neutral adapter contract and vendor registry.
//!
//! Every vendor adapter (and the in-memory stub) implements [`HelpDesk`],
//! so callers are insulated from vendor-specific field names and can swap
//! implementations without code changes.

use async_trait::async_trait;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::halo::HaloHelpDesk;
use crate::models::{Comment, Ticket, User};
use crate::stub::StubHelpDesk;
use crate::zendesk::ZendeskHelpDesk;

/// The six-operation contract every help-desk backend implements.
///
/// Each operation fails with `BridgeError::NotFound` when the backend
/// reports no matching record and with `BridgeError::Config` when required
/// credentials are absent. Lookup misses mid-operation (an update naming an
/// unknown identifier) are also `NotFound` - records are never silently
/// created.
#[async_trait]
pub trait HelpDesk: Send + Sync {
    /// Resolves a user against the backend.
    ///
    /// With an identifier, fetches by identifier; with a (name, email)
    /// pair, creates-or-updates; with no identifying information, falls
    /// back to the authenticated actor where the backend has one.
    async fn get_or_create_user(&self, user: Option<User>) -> Result<User, BridgeError>;

    /// Creates a ticket.
    ///
    /// The ticket's user is resolved first and replaced with the
    /// backend-confirmed identity before the ticket is submitted. The
    /// backend assigns the identifier and creation timestamp.
    async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError>;

    /// Fetches a ticket by identifier.
    async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError>;

    /// Closes a ticket.
    ///
    /// Closing an already-closed ticket is a no-op that returns the
    /// current state with a diagnostic warning.
    async fn close_ticket(&self, ticket_id: u64) -> Result<Ticket, BridgeError>;

    /// Attaches a comment to an existing ticket.
    ///
    /// The comment author defaults to the ticket's user, falling back to
    /// the authenticated actor, when unset.
    async fn add_comment(&self, ticket_id: u64, comment: Comment) -> Result<Ticket, BridgeError>;

    /// Updates an existing ticket.
    ///
    /// The ticket must carry the identifier assigned at creation.
    async fn update_ticket(&self, ticket: Ticket) -> Result<Ticket, BridgeError>;
}

/// Resolves the configured vendor key to an adapter instance.
///
/// The key is matched once at startup; no vendor configured means the
/// in-memory stub. Unknown keys are a configuration error rather than a
/// silent fallback.
///
/// # Example
///
/// ```ignore
/// let config = BridgeConfig::from_env()?;
/// let desk = helpdesk::from_config(&config).await?;
/// let ticket = desk.get_ticket(42).await?;
/// ```
pub async fn from_config(config: &BridgeConfig) -> Result<Box<dyn HelpDesk>, BridgeError> {
    match config.vendor.as_deref() {
        Some("zendesk") => {
            let credentials = config
                .zendesk
                .as_ref()
                .ok_or_else(|| BridgeError::invalid_config("no Zendesk credentials provided"))?;
            Ok(Box::new(ZendeskHelpDesk::new(credentials)?))
        }
        Some("halo") => {
            let credentials = config
                .halo
                .as_ref()
                .ok_or_else(|| BridgeError::invalid_config("no Halo credentials provided"))?;
            Ok(Box::new(HaloHelpDesk::connect(credentials).await?))
        }
        Some("stub") | None => Ok(Box::new(StubHelpDesk::new())),
        Some(other) => Err(BridgeError::invalid_config(format!(
            "unknown help-desk vendor: {:?}",
            other
        ))),
    }
}
