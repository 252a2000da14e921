//! Zendesk OAuth token exchange.
//!
//! A single stateless operation: trade an authorization code for an
//! access token. The parsed payload is returned verbatim - known fields
//! are typed and everything else the vendor sends is preserved.

use serde::Deserialize;

use crate::config::OauthCredentials;
use crate::error::BridgeError;

/// Token payload returned by the Zendesk OAuth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The access token to authenticate API requests with.
    pub access_token: String,

    /// Token type, normally `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,

    /// Space-separated scopes granted.
    #[serde(default)]
    pub scope: Option<String>,

    /// Any additional fields the vendor included, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Exchanges an authorization code for an access token.
///
/// Issues one POST to `https://{subdomain}.zendesk.com/oauth/tokens` and
/// returns the parsed payload. A missing authorization code is rejected
/// before any request is sent; a non-success HTTP status is surfaced as
/// `BridgeError::HttpStatus` rather than swallowed.
///
/// # Arguments
///
/// * `subdomain` - Zendesk subdomain the app is installed on
/// * `redirect_uri` - The redirect URI registered with the OAuth client
/// * `credentials` - OAuth client id and secret
/// * `code` - The authorization code from the redirect, if present
pub async fn exchange_token(
    subdomain: &str,
    redirect_uri: &str,
    credentials: &OauthCredentials,
    code: Option<&str>,
) -> Result<TokenResponse, BridgeError> {
    let token_url = format!("https://{}.zendesk.com/oauth/tokens", subdomain);
    exchange_token_at(&token_url, redirect_uri, credentials, code).await
}

/// Exchanges an authorization code against an explicit token URL.
///
/// Intended for pointing the exchange at a mock server in tests.
pub async fn exchange_token_at(
    token_url: &str,
    redirect_uri: &str,
    credentials: &OauthCredentials,
    code: Option<&str>,
) -> Result<TokenResponse, BridgeError> {
    let code = code.ok_or_else(|| {
        tracing::error!("the code parameter was missing in the request");
        BridgeError::validation("the code parameter was missing in the request")
    })?;

    tracing::debug!(token_url = %token_url, redirect_uri = %redirect_uri, "exchanging authorization code");

    let body = serde_json::json!({
        "grant_type": "authorization_code",
        "code": code,
        "client_id": credentials.client_id,
        "client_secret": credentials.client_secret,
        "redirect_uri": redirect_uri,
    });

    let response = reqwest::Client::new()
        .post(token_url)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(BridgeError::Http)?;

    let status = response.status();
    tracing::debug!(status = %status, "token endpoint responded");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body = BridgeError::sanitize_message(&body, &credentials.client_secret);
        return Err(BridgeError::HttpStatus { status, body });
    }

    let body = response.text().await.map_err(BridgeError::Http)?;
    serde_json::from_str(&body).map_err(BridgeError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> OauthCredentials {
        OauthCredentials {
            client_id: "client_abc".to_string(),
            client_secret: "secret_xyz".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_code_is_rejected_without_a_request() {
        // An unroutable URL proves no request is attempted.
        let err = exchange_token_at(
            "http://invalid.invalid/oauth/tokens",
            "https://app.example.com/callback",
            &test_credentials(),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, BridgeError::Validation(_)));
        assert!(err.to_string().contains("code parameter"));
    }

    #[test]
    fn test_token_response_keeps_unknown_fields() {
        let body = r#"{
            "access_token": "tok_1",
            "token_type": "bearer",
            "scope": "read write",
            "refresh_token": "ref_2"
        }"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.access_token, "tok_1");
        assert_eq!(
            parsed.extra.get("refresh_token").and_then(|v| v.as_str()),
            Some("ref_2")
        );
    }
}
