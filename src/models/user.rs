//! The vendor-neutral user model.

use serde::{Deserialize, Serialize};

/// A help-desk user at the adapter boundary.
///
/// The lookup key is the identifier when present; otherwise the
/// (full name, email) pair is used to create-or-fetch the vendor record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Vendor-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Full display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Creates a user reference from an existing vendor identifier.
    pub fn from_id(id: u64) -> Self {
        User {
            id: Some(id),
            ..User::default()
        }
    }

    /// Creates a user to be looked up or created by name and email.
    pub fn from_name_and_email(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id: None,
            full_name: Some(full_name.into()),
            email: Some(email.into()),
        }
    }

    /// Returns true if the user carries nothing to identify it by.
    pub fn is_anonymous(&self) -> bool {
        self.id.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        let user = User::from_id(42);
        assert_eq!(user.id, Some(42));
        assert!(user.full_name.is_none());
        assert!(!user.is_anonymous());
    }

    #[test]
    fn test_from_name_and_email() {
        let user = User::from_name_and_email("Jim Example", "test@example.com");
        assert!(user.id.is_none());
        assert_eq!(user.email.as_deref(), Some("test@example.com"));
        assert!(!user.is_anonymous());
    }

    #[test]
    fn test_anonymous_user() {
        assert!(User::default().is_anonymous());
    }
}
