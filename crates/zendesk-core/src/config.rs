//! Configuration structures for Zendesk clients.
//!
//! This module provides the account configuration shared by the Support and
//! Help Center clients: the account URL, credentials, and request settings.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Environment variable holding the full account URL.
pub const ENV_URL: &str = "ZENDESK_URL";
/// Environment variable holding the account subdomain.
pub const ENV_SUBDOMAIN: &str = "ZENDESK_SUBDOMAIN";
/// Environment variable holding the agent email for API token auth.
pub const ENV_EMAIL: &str = "ZENDESK_EMAIL";
/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "ZENDESK_API_TOKEN";
/// Environment variable holding an OAuth access token.
pub const ENV_OAUTH_TOKEN: &str = "ZENDESK_OAUTH_TOKEN";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "ZENDESK_TIMEOUT_SECS";

/// Path prefix of the Zendesk REST API.
pub const API_PATH: &str = "api/v2";

/// Credentials used to authenticate against Zendesk.
#[derive(Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Agent email plus API token, sent as basic auth `{email}/token:{token}`.
    ApiToken {
        /// Agent email address
        email: String,
        /// API token
        token: SecretString,
    },
    /// OAuth access token sent as a bearer token.
    OAuth {
        /// Access token
        token: SecretString,
    },
    /// Plain basic authentication.
    Basic {
        /// Username (usually the agent email)
        username: String,
        /// Password
        password: SecretString,
    },
}

impl Credentials {
    /// API token credentials.
    #[must_use]
    pub fn api_token(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self::ApiToken {
            email: email.into(),
            token: SecretString::from(token.into()),
        }
    }

    /// OAuth bearer credentials.
    #[must_use]
    pub fn oauth(token: impl Into<String>) -> Self {
        Self::OAuth {
            token: SecretString::from(token.into()),
        }
    }

    /// Basic authentication credentials.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Apply the credentials to an outgoing request.
    #[must_use]
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::ApiToken { email, token } => {
                request.basic_auth(format!("{email}/token"), Some(token.expose_secret()))
            }
            Self::OAuth { token } => request.bearer_auth(token.expose_secret()),
            Self::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiToken { email, .. } => f
                .debug_struct("ApiToken")
                .field("email", email)
                .field("token", &"[REDACTED]")
                .finish(),
            Self::OAuth { .. } => f
                .debug_struct("OAuth")
                .field("token", &"[REDACTED]")
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Configuration for a Zendesk client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ZendeskClientConfig {
    /// Account URL, e.g. `https://acme.zendesk.com`
    #[validate(url)]
    pub url: String,

    /// Credentials, never serialized
    #[serde(default, skip_serializing)]
    pub credentials: Option<Credentials>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of transport-level retries for idempotent requests
    #[validate(range(min = 0, max = 10))]
    #[serde(default)]
    pub max_retries: u32,

    /// Optional User-Agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl ZendeskClientConfig {
    /// Create a new configuration for the given account URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            url: url.into(),
            credentials: None,
            tls_verify: default_tls_verify(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: 0,
            user_agent: None,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Create a configuration for `https://{subdomain}.zendesk.com`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subdomain contains characters outside `[a-z0-9-]`.
    pub fn for_subdomain(subdomain: &str) -> Result<Self, Error> {
        let valid = !subdomain.is_empty()
            && subdomain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(Error::ConfigError(format!(
                "Invalid Zendesk subdomain `{subdomain}`"
            )));
        }

        Self::new(format!("https://{}.zendesk.com", subdomain.to_ascii_lowercase()))
    }

    /// Build a configuration from `ZENDESK_*` environment variables.
    ///
    /// `ZENDESK_URL` takes precedence over `ZENDESK_SUBDOMAIN`. Credentials are
    /// taken from `ZENDESK_EMAIL` + `ZENDESK_API_TOKEN`, falling back to
    /// `ZENDESK_OAUTH_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if no account is configured or a value is invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match (lookup(ENV_URL), lookup(ENV_SUBDOMAIN)) {
            (Some(url), _) => Self::new(url)?,
            (None, Some(subdomain)) => Self::for_subdomain(&subdomain)?,
            (None, None) => {
                return Err(Error::ConfigError(format!(
                    "Neither {ENV_URL} nor {ENV_SUBDOMAIN} is set"
                )))
            }
        };

        if let (Some(email), Some(token)) = (lookup(ENV_EMAIL), lookup(ENV_API_TOKEN)) {
            config = config.with_api_token(email, token);
        } else if let Some(token) = lookup(ENV_OAUTH_TOKEN) {
            config = config.with_oauth_token(token);
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs = timeout.parse::<u64>().map_err(|e| {
                Error::ConfigError(format!("Invalid {ENV_TIMEOUT_SECS} `{timeout}`: {e}"))
            })?;
            config = config.with_timeout(secs);
            config.validate()?;
        }

        Ok(config)
    }

    /// Authenticate with an agent email and API token.
    #[must_use]
    pub fn with_api_token(mut self, email: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::api_token(email, token));
        self
    }

    /// Authenticate with an OAuth access token.
    #[must_use]
    pub fn with_oauth_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::oauth(token));
        self
    }

    /// Authenticate with basic credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::basic(username, password));
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set maximum transport retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Override the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL of the REST API, always ending in `/api/v2/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the account URL cannot be parsed.
    pub fn api_base_url(&self) -> Result<Url, Error> {
        let trimmed = self.url.trim_end_matches('/');
        let base = if trimmed.ends_with(&format!("/{API_PATH}")) {
            format!("{trimmed}/")
        } else {
            format!("{trimmed}/{API_PATH}/")
        };

        Url::parse(&base).map_err(|e| Error::ConfigError(format!("Invalid Zendesk URL: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn new_config_has_defaults() {
        let config = ZendeskClientConfig::new("https://acme.zendesk.com").unwrap();
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 0);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = ZendeskClientConfig::new("not a url").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn subdomain_expands_to_account_url() {
        let config = ZendeskClientConfig::for_subdomain("Acme").unwrap();
        assert_eq!(config.url, "https://acme.zendesk.com");
        assert!(ZendeskClientConfig::for_subdomain("bad/sub").is_err());
        assert!(ZendeskClientConfig::for_subdomain("").is_err());
    }

    #[test]
    fn api_base_url_appends_api_path_once() {
        let config = ZendeskClientConfig::new("https://acme.zendesk.com").unwrap();
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://acme.zendesk.com/api/v2/"
        );

        let config = ZendeskClientConfig::new("https://acme.zendesk.com/api/v2/").unwrap();
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://acme.zendesk.com/api/v2/"
        );
    }

    #[test]
    fn api_base_url_matches_whole_api_segment() {
        let config = ZendeskClientConfig::new("https://proxy.example.com/myapi/v2").unwrap();
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://proxy.example.com/myapi/v2/api/v2/"
        );
    }

    #[test]
    fn timeout_out_of_range_fails_validation() {
        let config = ZendeskClientConfig::new("https://acme.zendesk.com")
            .unwrap()
            .with_timeout(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ZendeskClientConfig::new("https://acme.zendesk.com")
            .unwrap()
            .with_api_token("agent@acme.com", "s3cr3t");
        let printed = format!("{config:?}");
        assert!(printed.contains("agent@acme.com"));
        assert!(!printed.contains("s3cr3t"));
    }

    #[test]
    fn serialization_skips_credentials() {
        let config = ZendeskClientConfig::new("https://acme.zendesk.com")
            .unwrap()
            .with_oauth_token("tok");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("tok\""));
        assert!(!json.contains("credentials"));
    }

    #[test]
    fn deserializes_with_credentials() {
        let config: ZendeskClientConfig = serde_json::from_str(
            r#"{
                "url": "https://acme.zendesk.com",
                "credentials": {"type": "api_token", "email": "a@b.c", "token": "t"}
            }"#,
        )
        .unwrap();
        assert!(matches!(
            config.credentials,
            Some(Credentials::ApiToken { ref email, .. }) if email == "a@b.c"
        ));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn from_env_prefers_url_and_api_token() {
        let config = ZendeskClientConfig::from_lookup(lookup(&[
            (ENV_URL, "https://help.acme.com"),
            (ENV_SUBDOMAIN, "ignored"),
            (ENV_EMAIL, "agent@acme.com"),
            (ENV_API_TOKEN, "abc"),
            (ENV_OAUTH_TOKEN, "unused"),
            (ENV_TIMEOUT_SECS, "45"),
        ]))
        .unwrap();

        assert_eq!(config.url, "https://help.acme.com");
        assert_eq!(config.request_timeout_secs, 45);
        assert!(matches!(config.credentials, Some(Credentials::ApiToken { .. })));
    }

    #[test]
    fn from_env_falls_back_to_subdomain_and_oauth() {
        let config = ZendeskClientConfig::from_lookup(lookup(&[
            (ENV_SUBDOMAIN, "acme"),
            (ENV_OAUTH_TOKEN, "tok"),
        ]))
        .unwrap();

        assert_eq!(config.url, "https://acme.zendesk.com");
        assert!(matches!(config.credentials, Some(Credentials::OAuth { .. })));
    }

    #[test]
    fn from_env_requires_account() {
        let err = ZendeskClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn from_env_rejects_bad_timeout() {
        let err = ZendeskClientConfig::from_lookup(lookup(&[
            (ENV_SUBDOMAIN, "acme"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = ZendeskClientConfig::from_lookup(lookup(&[
            (ENV_SUBDOMAIN, "acme"),
            (ENV_TIMEOUT_SECS, "9000"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
