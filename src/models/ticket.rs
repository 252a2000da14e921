//! The vendor-neutral ticket model.
//!
//! This module defines the `Ticket` record exchanged at the adapter
//! boundary, together with its `Status` and `Priority` enumerations and
//! the `CustomField` id/value pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Comment, User};

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Newly created, not yet triaged.
    New,
    /// Being worked on.
    Open,
    /// Waiting on the requester.
    Pending,
    /// Resolved and closed.
    Closed,
}

impl Status {
    /// Returns the lowercase wire name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Open => "open",
            Status::Pending => "pending",
            Status::Closed => "closed",
        }
    }

    /// Parses a lowercase wire name into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Status::New),
            "open" => Some(Status::Open),
            "pending" => Some(Status::Pending),
            "closed" => Some(Status::Closed),
            _ => None,
        }
    }
}

/// Priority of a ticket, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default priority.
    Normal,
    /// Needs attention soon.
    High,
    /// Needs attention now.
    Urgent,
}

impl Priority {
    /// Returns the lowercase wire name for this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Parses a lowercase wire name into a priority.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }
}

/// A vendor-defined field attached to a ticket.
///
/// The value is opaque to this crate and round-trips verbatim. Uniqueness
/// by id is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    /// Vendor-assigned field identifier.
    pub id: u64,

    /// Opaque field value.
    pub value: serde_json::Value,
}

impl CustomField {
    /// Creates a custom field from an id and any JSON-representable value.
    pub fn new(id: u64, value: impl Into<serde_json::Value>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// A vendor-neutral help-desk ticket.
///
/// The identifier is absent until the first successful create; every
/// mutation after creation preserves it. A ticket owns at most one pending
/// comment - the one most recently attached, not a persisted history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ticket {
    /// Vendor-assigned identifier, absent until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Subject line.
    pub topic: String,

    /// Body text of the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Requester of the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Group the ticket is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    /// Identifier in an external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<u64>,

    /// Agent the ticket is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,

    /// Email address of the original recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,

    /// Unordered labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Vendor-defined fields, ordered as supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomField>>,

    /// The pending comment to attach on the next mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,

    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// When the vendor created the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the vendor last updated the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// When a response is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,

    /// When the ticket was closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Creates a ticket with the given topic and everything else unset.
    pub fn new(topic: impl Into<String>) -> Self {
        Ticket {
            topic: topic.into(),
            ..Ticket::default()
        }
    }

    /// Sets the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the requester.
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the custom fields.
    pub fn with_custom_fields(mut self, fields: Vec<CustomField>) -> Self {
        self.custom_fields = Some(fields);
        self
    }

    /// Attaches a pending comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Returns true if the ticket is closed.
    pub fn is_closed(&self) -> bool {
        self.status == Some(Status::Closed)
    }
}
