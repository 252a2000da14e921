//! Configuration for the helpdesk-bridge crate.
//!
//! This module handles vendor selection and credential loading from
//! environment variables, with validation to ensure all required values
//! are present before any adapter is constructed.

use crate::error::BridgeError;
use std::env;

/// Default timeout for vendor API calls in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Credentials for the Zendesk API.
///
/// Zendesk uses API-token authentication: requests carry a basic-auth
/// header built from `{email}/token:{token}`. The token must never be
/// logged or included in error messages.
#[derive(Clone)]
pub struct ZendeskCredentials {
    /// Email address of the authenticating agent.
    pub email: String,

    /// API token.
    /// This value must never be logged or included in error messages.
    pub token: String,

    /// Zendesk subdomain, e.g. `acme` for `acme.zendesk.com`.
    pub subdomain: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Credentials for the Halo API.
///
/// Halo uses OAuth client-credentials: the client exchanges id/secret for
/// a bearer token at construction time.
#[derive(Clone)]
pub struct HaloCredentials {
    /// OAuth client id.
    pub client_id: String,

    /// OAuth client secret.
    /// This value must never be logged or included in error messages.
    pub client_secret: String,

    /// Halo subdomain, e.g. `acme` for `acme.haloitsm.com`.
    pub subdomain: String,

    /// OAuth scope to request. Defaults to `all`.
    pub scope: String,
}

/// OAuth client credentials for the Zendesk authorization-code exchange.
#[derive(Clone)]
pub struct OauthCredentials {
    /// OAuth client id.
    pub client_id: String,

    /// OAuth client secret.
    /// This value must never be logged or included in error messages.
    pub client_secret: String,
}

/// Top-level configuration: which vendor to use and its credentials.
///
/// When `vendor` is `None` the registry falls back to the in-memory stub,
/// so a completely empty configuration is valid for tests.
#[derive(Clone, Default)]
pub struct BridgeConfig {
    /// Vendor selection key: `"zendesk"`, `"halo"` or `"stub"`.
    pub vendor: Option<String>,

    /// Zendesk credentials, required when vendor is `"zendesk"`.
    pub zendesk: Option<ZendeskCredentials>,

    /// Halo credentials, required when vendor is `"halo"`.
    pub halo: Option<HaloCredentials>,
}

impl BridgeConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HELPDESK_VENDOR`: optional vendor key (`zendesk`, `halo`, `stub`)
    /// - `ZENDESK_EMAIL`, `ZENDESK_TOKEN`, `ZENDESK_SUBDOMAIN`: required
    ///   when the vendor is `zendesk`
    /// - `HALO_CLIENT_ID`, `HALO_CLIENT_SECRET`, `HALO_SUBDOMAIN`: required
    ///   when the vendor is `halo`
    /// - `HALO_SCOPE`: optional, defaults to `all`
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` if a required variable for the selected
    /// vendor is missing or fails validation.
    pub fn from_env() -> Result<Self, BridgeError> {
        let vendor = optional_env("HELPDESK_VENDOR");

        let zendesk = match vendor.as_deref() {
            Some("zendesk") => Some(ZendeskCredentials::from_env()?),
            _ => None,
        };
        let halo = match vendor.as_deref() {
            Some("halo") => Some(HaloCredentials::from_env()?),
            _ => None,
        };

        Ok(BridgeConfig {
            vendor,
            zendesk,
            halo,
        })
    }
}

impl ZendeskCredentials {
    /// Loads Zendesk credentials from `ZENDESK_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, BridgeError> {
        let email = get_required_env("ZENDESK_EMAIL")?;
        let token = get_required_env("ZENDESK_TOKEN")?;
        let subdomain = get_required_env("ZENDESK_SUBDOMAIN")?;

        let subdomain = validate_subdomain(&subdomain)?;
        validate_secret("ZENDESK_TOKEN", &token)?;

        Ok(ZendeskCredentials {
            email,
            token,
            subdomain,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

impl HaloCredentials {
    /// Loads Halo credentials from `HALO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, BridgeError> {
        // Halo supports several grants; this crate only speaks
        // client_credentials, so anything else configured is an error.
        if let Some(grant) = optional_env("HALO_GRANT_TYPE") {
            if grant != "client_credentials" {
                return Err(BridgeError::invalid_config(format!(
                    "unsupported HALO_GRANT_TYPE: {:?} (only client_credentials is supported)",
                    grant
                )));
            }
        }

        let client_id = get_required_env("HALO_CLIENT_ID")?;
        let client_secret = get_required_env("HALO_CLIENT_SECRET")?;
        let subdomain = get_required_env("HALO_SUBDOMAIN")?;

        let subdomain = validate_subdomain(&subdomain)?;
        validate_secret("HALO_CLIENT_SECRET", &client_secret)?;

        Ok(HaloCredentials {
            client_id,
            client_secret,
            subdomain,
            scope: optional_env("HALO_SCOPE").unwrap_or_else(|| "all".to_string()),
        })
    }
}

/// Gets a required environment variable, returning an error if missing or empty.
fn get_required_env(name: &str) -> Result<String, BridgeError> {
    env::var(name)
        .map_err(|_| BridgeError::missing_env(name))
        .and_then(|value| {
            if value.trim().is_empty() {
                Err(BridgeError::missing_env(name))
            } else {
                Ok(value)
            }
        })
}

/// Gets an optional environment variable, treating empty values as absent.
fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates and normalizes a vendor subdomain.
///
/// A subdomain is a single DNS label; anything with dots, slashes or
/// scheme prefixes is rejected so it cannot rewrite the request URL.
fn validate_subdomain(subdomain: &str) -> Result<String, BridgeError> {
    let subdomain = subdomain.trim().to_lowercase();

    if subdomain.is_empty() {
        return Err(BridgeError::invalid_config("subdomain must not be empty"));
    }

    let valid = subdomain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !subdomain.starts_with('-')
        && !subdomain.ends_with('-');

    if !valid {
        return Err(BridgeError::invalid_config(format!(
            "subdomain must be a single DNS label, got: {:?}",
            subdomain
        )));
    }

    Ok(subdomain)
}

/// Validates a secret is not a placeholder value.
fn validate_secret(name: &str, secret: &str) -> Result<(), BridgeError> {
    let secret_lower = secret.to_lowercase();
    let placeholder_patterns = ["your_token", "your_secret", "placeholder", "xxx", "changeme"];

    for pattern in placeholder_patterns {
        if secret_lower.contains(pattern) {
            return Err(BridgeError::invalid_config(format!(
                "{} appears to be a placeholder value",
                name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_subdomain_lowercases_and_trims() {
        let result = validate_subdomain("  Acme-Support ").unwrap();
        assert_eq!(result, "acme-support");
    }

    #[test]
    fn test_validate_subdomain_rejects_dots() {
        assert!(validate_subdomain("acme.zendesk.com").is_err());
    }

    #[test]
    fn test_validate_subdomain_rejects_url() {
        assert!(validate_subdomain("https://acme").is_err());
    }

    #[test]
    fn test_validate_subdomain_rejects_empty() {
        assert!(validate_subdomain("   ").is_err());
    }

    #[test]
    fn test_validate_subdomain_rejects_leading_dash() {
        assert!(validate_subdomain("-acme").is_err());
    }

    #[test]
    fn test_validate_secret_rejects_placeholder() {
        assert!(validate_secret("ZENDESK_TOKEN", "your_token_here").is_err());
    }

    #[test]
    fn test_validate_secret_accepts_real_value() {
        assert!(validate_secret("ZENDESK_TOKEN", "abc123def456").is_ok());
    }

    #[test]
    fn test_default_config_has_no_vendor() {
        let config = BridgeConfig::default();
        assert!(config.vendor.is_none());
        assert!(config.zendesk.is_none());
        assert!(config.halo.is_none());
    }
}
