//! HTTP client for the Halo API.
//!
//! This module provides the `HaloClient` struct for making authenticated
//! requests to the Halo REST API. The client performs a client-credentials
//! token exchange at construction and holds the bearer token for the
//! lifetime of the instance; `reauthenticate()` refreshes it.
//!
//! # Security
//!
//! The client secret and bearer token are never logged. Error bodies are
//! sanitized before they can reach logs or callers.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};

use crate::config::{HaloCredentials, DEFAULT_TIMEOUT_SECS};
use crate::error::BridgeError;

use super::wire::{HaloAction, HaloTicket, HaloToken, HaloUser};

/// Maximum length for HTTP error response bodies kept in error values.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the Halo API.
pub struct HaloClient {
    /// The underlying HTTP client.
    http: Client,

    /// Base URL for the instance (e.g. `https://acme.haloitsm.com`).
    base_url: String,

    /// Credentials used for the token exchange.
    credentials: HaloCredentials,

    /// Bearer token from the last exchange.
    /// SECURITY: Never log this value!
    access_token: RwLock<String>,
}

impl HaloClient {
    /// Creates a client and performs the initial token exchange against
    /// the subdomain's production endpoint.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::HttpClient` if the HTTP client fails to
    /// initialize, or any transport/authentication error from the token
    /// exchange.
    pub async fn connect(credentials: &HaloCredentials) -> Result<Self, BridgeError> {
        let base_url = format!("https://{}.haloitsm.com", credentials.subdomain);
        Self::connect_to(credentials, &base_url).await
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Intended for pointing the client at a mock server in tests.
    pub async fn connect_to(
        credentials: &HaloCredentials,
        base_url: &str,
    ) -> Result<Self, BridgeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(BridgeError::HttpClient)?;

        let client = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: credentials.clone(),
            access_token: RwLock::new(String::new()),
        };
        client.reauthenticate().await?;
        Ok(client)
    }

    /// Exchanges client credentials for a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Authentication` on a 401/403 response and
    /// `BridgeError::HttpStatus` on any other non-success status.
    pub async fn reauthenticate(&self) -> Result<(), BridgeError> {
        let token_url = format!("{}/auth/token", self.base_url);

        tracing::debug!("exchanging Halo client credentials for a token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", self.credentials.scope.as_str()),
        ];

        let response = self
            .http
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(BridgeError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let token: HaloToken = response.json().await.map_err(BridgeError::Http)?;
        *self.write_token() = token.access_token;
        Ok(())
    }

    fn write_token(&self) -> std::sync::RwLockWriteGuard<'_, String> {
        self.access_token.write().unwrap_or_else(|e| e.into_inner())
    }

    fn bearer(&self) -> String {
        let token = self.access_token.read().unwrap_or_else(|e| e.into_inner());
        format!("Bearer {}", token)
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

        tracing::debug!(method = %method, path = %path, "making Halo API request");

        let mut req = self
            .http
            .request(method, &url)
            .header("Authorization", self.bearer())
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
        let body = BridgeError::sanitize_message(&body, &self.credentials.client_secret);
        let token = self.access_token.read().unwrap_or_else(|e| e.into_inner());
        let body = BridgeError::sanitize_message(&body, &token);
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
    pub async fn get_ticket(&self, id: u64) -> Result<HaloTicket, BridgeError> {
        let path = format!("/api/tickets/{}", id);
        self.request(Method::GET, &path, None).await.map_err(|e| {
            if e.is_not_found() {
                BridgeError::ticket_not_found(id)
            } else {
                e
            }
        })
    }

    /// Creates a ticket. The endpoint accepts a batch; this client
    /// submits a single-element batch and Halo returns the created record.
    pub async fn create_ticket(&self, ticket: &HaloTicket) -> Result<HaloTicket, BridgeError> {
        let body = serde_json::to_value([ticket])?;
        self.request(Method::POST, "/api/tickets", Some(&body)).await
    }

    /// Updates a ticket. Halo uses the same endpoint as create; the id
    /// on the payload selects the record to update.
    pub async fn update_ticket(&self, ticket: &HaloTicket) -> Result<HaloTicket, BridgeError> {
        let id = ticket
            .id
            .ok_or_else(|| BridgeError::validation("cannot update a ticket without an id"))?;
        let body = serde_json::to_value([ticket])?;
        self.request(Method::POST, "/api/tickets", Some(&body))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    BridgeError::ticket_not_found(id)
                } else {
                    e
                }
            })
    }

    /// Posts a note against a ticket.
    pub async fn post_action(&self, action: &HaloAction) -> Result<HaloAction, BridgeError> {
        let body = serde_json::to_value([action])?;
        self.request(Method::POST, "/api/actions", Some(&body))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    BridgeError::ticket_not_found(action.ticket_id)
                } else {
                    e
                }
            })
    }

    /// Fetches a user by id.
    pub async fn get_user(&self, id: u64) -> Result<HaloUser, BridgeError> {
        let path = format!("/api/users/{}", id);
        self.request(Method::GET, &path, None).await.map_err(|e| {
            if e.is_not_found() {
                BridgeError::user_not_found(format!("with id {}", id))
            } else {
                e
            }
        })
    }

    /// Creates a user, or updates the existing record matching its email.
    pub async fn create_or_update_user(&self, user: &HaloUser) -> Result<HaloUser, BridgeError> {
        let body = serde_json::to_value(user)?;
        self.request(Method::POST, "/api/users", Some(&body)).await
    }
}
