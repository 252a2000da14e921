//! Wire-format types for the Halo API.
//!
//! Halo represents status and priority as numeric identifiers and tags as
//! a comma-separated string; the tables and helpers here translate those
//! to the neutral enumerations. As with Zendesk, absent fields are
//! omitted from serialized output entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Priority, Status};

/// A ticket as Halo represents it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HaloTicket {
    /// Halo-assigned ticket id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Requesting end-user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// Numeric status identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,

    /// Numeric priority identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,

    /// Agent assigned to the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<u64>,

    /// Team assigned to the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,

    /// Comma-separated labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_tags: Option<String>,

    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party_id: Option<u64>,

    /// CC list of email addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emailcclist: Option<Vec<String>>,

    /// Vendor-defined fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<HaloCustomField>>,

    /// Creation timestamp, set by Halo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datecreated: Option<DateTime<Utc>>,

    /// Timestamp of the most recent action, set by Halo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastactiondate: Option<DateTime<Utc>>,

    /// Closure timestamp, set by Halo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dateclosed: Option<DateTime<Utc>>,
}

/// A user as Halo represents it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HaloUser {
    /// Halo-assigned user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emailaddress: Option<String>,
}

/// A custom field id/value pair as Halo represents it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaloCustomField {
    /// Field identifier.
    pub id: u64,

    /// Opaque field value.
    pub value: serde_json::Value,
}

/// An action (note) posted against a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaloAction {
    /// Ticket the action belongs to.
    pub ticket_id: u64,

    /// Note text.
    pub note: String,

    /// Whether the note is hidden from the end user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiddenfromuser: Option<bool>,

    /// Agent or user who authored the note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_agentid: Option<u64>,
}

/// Token payload returned by the Halo auth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HaloToken {
    /// Bearer token for API requests.
    pub access_token: String,

    /// Token type, normally `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,

    /// Space-separated scopes granted.
    #[serde(default)]
    pub scope: Option<String>,

    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Returns Halo's numeric identifier for a status.
pub fn status_to_id(status: Status) -> u64 {
    match status {
        Status::New => 1,
        Status::Open => 2,
        Status::Pending => 3,
        Status::Closed => 9,
    }
}

/// Translates a Halo status identifier, `None` for ids without a
/// neutral counterpart.
pub fn status_from_id(id: u64) -> Option<Status> {
    match id {
        1 => Some(Status::New),
        2 => Some(Status::Open),
        3 => Some(Status::Pending),
        9 => Some(Status::Closed),
        _ => None,
    }
}

/// Returns Halo's numeric identifier for a priority.
pub fn priority_to_id(priority: Priority) -> u64 {
    match priority {
        Priority::Urgent => 1,
        Priority::High => 2,
        Priority::Normal => 3,
        Priority::Low => 4,
    }
}

/// Translates a Halo priority identifier, `None` for ids without a
/// neutral counterpart.
pub fn priority_from_id(id: u64) -> Option<Priority> {
    match id {
        1 => Some(Priority::Urgent),
        2 => Some(Priority::High),
        3 => Some(Priority::Normal),
        4 => Some(Priority::Low),
        _ => None,
    }
}

/// Joins neutral tags into Halo's comma-separated form.
pub fn tags_to_wire(tags: &[String]) -> String {
    tags.join(",")
}

/// Splits Halo's comma-separated tags into neutral form.
pub fn tags_from_wire(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
