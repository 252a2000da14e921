//! Wire-format types for the Zendesk API.
//!
//! These structs mirror the JSON shapes Zendesk sends and accepts. Every
//! optional field is skipped entirely when absent rather than serialized
//! as null - Zendesk treats omitted fields as "leave untouched", which is
//! what gives updates their partial semantics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ticket as Zendesk represents it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZendeskTicket {
    /// Zendesk-assigned ticket id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Body of the first comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lowercase status name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Lowercase priority name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// User the ticket is opened for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,

    /// User who submitted the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<u64>,

    /// Agent assigned to the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,

    /// Group assigned to the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<u64>,

    /// Original recipient email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Ticket labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Vendor-defined fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<ZendeskCustomField>>,

    /// Comment to attach on create or update (write-only in practice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<ZendeskComment>,

    /// Embedded requester details, present on some read responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<ZendeskUser>,

    /// Creation timestamp, set by Zendesk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last-update timestamp, set by Zendesk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Due timestamp for task tickets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
}

/// A user as Zendesk represents it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZendeskUser {
    /// Zendesk-assigned user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A ticket comment as Zendesk represents it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZendeskComment {
    /// Comment body text.
    pub body: String,

    /// Whether the requester can see the comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Comment author id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,
}

/// A custom field id/value pair as Zendesk represents it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZendeskCustomField {
    /// Field identifier.
    pub id: u64,

    /// Opaque field value.
    pub value: serde_json::Value,
}

/// Envelope wrapping a single ticket in requests and responses.
///
/// Create and update responses also carry an `audit` object; unknown
/// fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketEnvelope {
    /// The wrapped ticket.
    pub ticket: ZendeskTicket,
}

/// Envelope wrapping a single user in requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The wrapped user.
    pub user: ZendeskUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_suppressed() {
        let ticket = ZendeskTicket {
            subject: Some("subject123".to_string()),
            ..ZendeskTicket::default()
        };
        let json = serde_json::to_value(&ticket).unwrap();

        assert_eq!(json.get("subject").unwrap(), "subject123");
        assert!(json.get("status").is_none());
        assert!(json.get("requester_id").is_none());
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_envelope_ignores_audit() {
        let body = r#"{
            "ticket": {"id": 35436, "subject": "Help!", "status": "new"},
            "audit": {"id": 123, "events": []}
        }"#;
        let envelope: TicketEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.ticket.id, Some(35436));
        assert_eq!(envelope.ticket.status.as_deref(), Some("new"));
    }

    #[test]
    fn test_timestamps_parse_iso8601() {
        let body = r#"{"id": 1, "created_at": "2024-02-01T09:30:00Z"}"#;
        let ticket: ZendeskTicket = serde_json::from_str(body).unwrap();
        assert!(ticket.created_at.is_some());
    }
}
