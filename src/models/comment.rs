//! The vendor-neutral comment model.

use serde::{Deserialize, Serialize};

/// A comment to attach to a ticket.
///
/// When `author_id` is unset at send time the adapter fills in the
/// ticket's resolved user, falling back to the authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment body text.
    pub body: String,

    /// Whether the comment is visible to the requester.
    #[serde(default = "default_public")]
    pub public: bool,

    /// Vendor identifier of the comment author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,
}

fn default_public() -> bool {
    true
}

impl Comment {
    /// Creates a public comment with no explicit author.
    pub fn new(body: impl Into<String>) -> Self {
        Comment {
            body: body.into(),
            public: true,
            author_id: None,
        }
    }

    /// Marks the comment as internal (hidden from the requester).
    pub fn internal(mut self) -> Self {
        self.public = false;
        self
    }

    /// Sets an explicit author.
    pub fn with_author(mut self, author_id: u64) -> Self {
        self.author_id = Some(author_id);
        self
    }
}
