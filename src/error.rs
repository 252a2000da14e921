//! Error types for the helpdesk-bridge crate.
//!
//! This module defines `BridgeError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! Error messages built from transport responses may echo request data back.
//! Use `sanitize_message()` before logging anything that could contain an
//! API token or client secret.

use thiserror::Error;

/// Unified error type for all helpdesk-bridge operations.
///
/// The taxonomy mirrors the adapter contract: lookup misses surface as
/// `NotFound`, missing or invalid credentials as `Config`, and non-success
/// vendor responses as `HttpStatus` rather than being swallowed.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration error - missing or invalid credentials, or no vendor selected.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested ticket or user was not found at the vendor or stub.
    #[error("{resource} not found")]
    NotFound {
        /// Description of the missing resource, e.g. `ticket 42`.
        resource: String,
    },

    /// Authentication failed - likely an invalid token or secret.
    #[error("authentication failed - check the configured credentials")]
    Authentication,

    /// Input validation failed before any request was issued.
    #[error("validation error: {0}")]
    Validation(String),
}

impl BridgeError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        BridgeError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        BridgeError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        BridgeError::Validation(message.into())
    }

    /// Creates a not found error for a ticket ID.
    pub fn ticket_not_found(id: u64) -> Self {
        BridgeError::NotFound {
            resource: format!("ticket {}", id),
        }
    }

    /// Creates a not found error for a user.
    pub fn user_not_found(description: impl Into<String>) -> Self {
        BridgeError::NotFound {
            resource: format!("user {}", description.into()),
        }
    }

    /// Returns true if this error signals a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, BridgeError::NotFound { .. })
    }

    /// Sanitizes a message to remove any occurrence of a secret.
    ///
    /// Tokens and client secrets must never appear in logs or error
    /// messages surfaced to callers.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `secret` - The secret to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the secret replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }
}
