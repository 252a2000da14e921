//! HTTP client for the Zendesk API.
//!
//! This module provides the `ZendeskClient` struct for making
//! authenticated requests to the Zendesk Support REST API. It owns
//! transport concerns only; field translation lives in the adapter.
//!
//! There is deliberately no retry logic here - retry policy belongs to
//! the caller.
//!
//! # Security
//!
//! The API token is never logged. Error bodies are sanitized before they
//! can reach logs or callers.

use std::time::Duration;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use reqwest::{Client, Method, StatusCode};

use crate::config::ZendeskCredentials;
use crate::error::BridgeError;

use super::wire::{TicketEnvelope, UserEnvelope, ZendeskTicket, ZendeskUser};

/// Maximum length for HTTP error response bodies kept in error values.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the Zendesk Support API.
///
/// Handles authentication, request formatting and response parsing for
/// the ticket and user endpoints the adapter needs.
#[derive(Clone)]
pub struct ZendeskClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL for the API (e.g. `https://acme.zendesk.com/api/v2`).
    base_url: String,

    /// Email of the authenticating agent.
    email: String,

    /// API token.
    /// SECURITY: Never log this value!
    token: String,
}

impl ZendeskClient {
    /// Creates a client from credentials, targeting the subdomain's
    /// production endpoint.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(credentials: &ZendeskCredentials) -> Result<Self, BridgeError> {
        let base_url = format!("https://{}.zendesk.com/api/v2", credentials.subdomain);
        Self::with_base_url(credentials, &base_url)
    }

    /// Creates a client targeting an explicit base URL.
    ///
    /// Intended for pointing the client at a mock server in tests.
    pub fn with_base_url(
        credentials: &ZendeskCredentials,
        base_url: &str,
    ) -> Result<Self, BridgeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(credentials.timeout_secs))
            .build()
            .map_err(BridgeError::HttpClient)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            email: credentials.email.clone(),
            token: credentials.token.clone(),
        })
    }

    /// Builds the basic-auth header for API-token authentication.
    ///
    /// Zendesk expects the username `{email}/token` with the token as
    /// password.
    fn auth_header(&self) -> String {
        let credentials = format!("{}/token:{}", self.email, self.token);
        format!("Basic {}", BASE64_STANDARD.encode(credentials))
    }

    /// Makes a request and parses the JSON response.
    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, BridgeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(method = %method, path = %path, "making Zendesk API request");

        let mut req = self
            .http
            .request(method, &url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json");

        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(BridgeError::Http)?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let body = response.text().await.map_err(BridgeError::Http)?;
        serde_json::from_str(&body).map_err(BridgeError::Serialization)
    }

    /// Classifies a non-success response into a `BridgeError`.
    async fn handle_http_error(&self, status: StatusCode, response: reqwest::Response) -> BridgeError {
        let body = response.text().await.unwrap_or_default();
        // Strip the token before the body can reach logs or callers.
        let body = BridgeError::sanitize_message(&body, &self.token);
        let body = if body.len() > MAX_ERROR_BODY_LEN {
            format!("{}...[truncated]", &body[..MAX_ERROR_BODY_LEN])
        } else {
            body
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BridgeError::Authentication,
            StatusCode::NOT_FOUND => BridgeError::NotFound {
                resource: "resource".to_string(),
            },
            _ => BridgeError::HttpStatus { status, body },
        }
    }

    /// Fetches a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::NotFound` if the ticket doesn't exist.
    pub async fn get_ticket(&self, id: u64) -> Result<ZendeskTicket, BridgeError> {
        let path = format!("/tickets/{}.json", id);
        let envelope: TicketEnvelope =
            self.request(Method::GET, &path, None).await.map_err(|e| {
                if e.is_not_found() {
                    BridgeError::ticket_not_found(id)
                } else {
                    e
                }
            })?;
        Ok(envelope.ticket)
    }

    /// Creates a ticket. Zendesk assigns the id and creation timestamp.
    pub async fn create_ticket(&self, ticket: &ZendeskTicket) -> Result<ZendeskTicket, BridgeError> {
        let body = serde_json::to_value(TicketEnvelope {
            ticket: ticket.clone(),
        })?;
        let envelope: TicketEnvelope =
            self.request(Method::POST, "/tickets.json", Some(&body)).await?;
        Ok(envelope.ticket)
    }

    /// Updates a ticket in place.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::NotFound` if Zendesk has no ticket with
    /// this id - the record is never created implicitly.
    pub async fn update_ticket(
        &self,
        id: u64,
        ticket: &ZendeskTicket,
    ) -> Result<ZendeskTicket, BridgeError> {
        let path = format!("/tickets/{}.json", id);
        let body = serde_json::to_value(TicketEnvelope {
            ticket: ticket.clone(),
        })?;
        let envelope: TicketEnvelope = self
            .request(Method::PUT, &path, Some(&body))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    BridgeError::ticket_not_found(id)
                } else {
                    e
                }
            })?;
        Ok(envelope.ticket)
    }

    /// Fetches a user by id.
    pub async fn get_user(&self, id: u64) -> Result<ZendeskUser, BridgeError> {
        let path = format!("/users/{}.json", id);
        let envelope: UserEnvelope =
            self.request(Method::GET, &path, None).await.map_err(|e| {
                if e.is_not_found() {
                    BridgeError::user_not_found(format!("with id {}", id))
                } else {
                    e
                }
            })?;
        Ok(envelope.user)
    }

    /// Creates a user, or updates the existing record matching its email.
    pub async fn create_or_update_user(
        &self,
        user: &ZendeskUser,
    ) -> Result<ZendeskUser, BridgeError> {
        let body = serde_json::to_value(UserEnvelope { user: user.clone() })?;
        let envelope: UserEnvelope = self
            .request(Method::POST, "/users/create_or_update.json", Some(&body))
            .await?;
        Ok(envelope.user)
    }

    /// Fetches the authenticated actor.
    pub async fn me(&self) -> Result<ZendeskUser, BridgeError> {
        let envelope: UserEnvelope = self.request(Method::GET, "/users/me.json", None).await?;
        Ok(envelope.user)
    }
}
