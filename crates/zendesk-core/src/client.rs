//! HTTP transport shared by the Zendesk clients.
//!
//! [`ServiceClient`] owns the `reqwest` client, the account base URL and the
//! credentials. It returns raw responses so that resource code decides which
//! statuses are expected. Retries happen here and only here.

use crate::config::{Credentials, ZendeskClientConfig};
use crate::error::{map_status_to_error, Error, Result};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

/// Default timeout for Support API requests
pub const SUPPORT_DEFAULT_TIMEOUT: u64 = 30;

/// Default timeout for Help Center requests
pub const HELP_CENTER_DEFAULT_TIMEOUT: u64 = 30;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

// Retry settings

/// Default maximum number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default initial retry delay in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Default maximum retry delay in milliseconds (for exponential backoff)
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5000;

/// Upper bound honoured for a server supplied `Retry-After`, in seconds
pub const MAX_RETRY_AFTER_SECS: u64 = 60;

/// Retry policy with exponential backoff.
///
/// Only the transport consults the policy, and only for idempotent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial delay before first retry
    pub initial_delay: Duration,

    /// Maximum delay between retries (cap for exponential backoff)
    pub max_delay: Duration,

    /// Backoff multiplier (typically 2 for exponential backoff)
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    /// Create a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            backoff_multiplier: 2,
        }
    }

    /// Create a retry policy with no retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1,
        }
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate delay for a given attempt number.
    ///
    /// Uses exponential backoff: delay = min(initial_delay * multiplier^(attempt-1), max_delay)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let multiplier = self.backoff_multiplier.saturating_pow(attempt - 1);
        let initial_ms = u64::try_from(self.initial_delay.as_millis()).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(initial_ms.saturating_mul(u64::from(multiplier)));

        std::cmp::min(delay, self.max_delay)
    }

    /// Check if retries are enabled.
    #[must_use]
    pub const fn has_retries(&self) -> bool {
        self.max_retries > 0
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Retry policy
    pub retry_policy: RetryPolicy,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Emit a tracing event per request
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    ///
    /// Retries are disabled unless a policy is set explicitly.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(SUPPORT_DEFAULT_TIMEOUT),
            retry_policy: RetryPolicy::no_retry(),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Disable retries.
    #[must_use]
    pub const fn without_retries(mut self) -> Self {
        self.retry_policy = RetryPolicy::no_retry();
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the transport may send a request more than once.
///
/// Ticket updates that carry a comment go out as [`Delivery::Once`]; a
/// replay after a timeout posts the comment again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    /// Retry idempotent methods according to the retry policy.
    #[default]
    Retryable,
    /// Send exactly once.
    Once,
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    user_agent: String,
    credentials: Option<Credentials>,
    tls_verify: bool,
}

impl ServiceClientBuilder {
    /// Create a builder for the given API base URL.
    ///
    /// A trailing slash is added when missing so relative paths join below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let raw = base_url.as_ref();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| Error::InvalidEndpoint(format!("Invalid base URL `{raw}`: {e}")))?;

        Ok(Self {
            base_url,
            http_config: ClientConfig::new().with_timeout(timeout),
            user_agent: concat!("zendesk-core/", env!("CARGO_PKG_VERSION")).to_string(),
            credentials: None,
            tls_verify: true,
        })
    }

    /// Create a builder from an account configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation or the
    /// configured URL is invalid.
    pub fn from_config(config: &ZendeskClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        let base_url = config.api_base_url()?;
        let retry_policy = if config.max_retries == 0 {
            RetryPolicy::no_retry()
        } else {
            RetryPolicy::new().with_max_retries(config.max_retries)
        };

        let mut builder = Self::new(base_url.as_str(), config.timeout())?
            .with_retry_policy(retry_policy)
            .with_tls_verify(config.tls_verify);

        if let Some(credentials) = &config.credentials {
            builder = builder.with_credentials(credentials.clone());
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.with_user_agent(user_agent.clone());
        }

        Ok(builder)
    }

    /// Override the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.http_config.retry_policy = retry;
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set the credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Authenticate with an agent email and API token.
    #[must_use]
    pub fn with_api_token(self, email: impl Into<String>, token: impl Into<String>) -> Self {
        self.with_credentials(Credentials::api_token(email, token))
    }

    /// Authenticate with an OAuth access token.
    #[must_use]
    pub fn with_oauth_token(self, token: impl Into<String>) -> Self {
        self.with_credentials(Credentials::oauth(token))
    }

    /// Configure HTTP basic authentication credentials.
    #[must_use]
    pub fn with_basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_credentials(Credentials::basic(username, password))
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn build(self) -> Result<ServiceClient> {
        let config = &self.http_config;
        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent.as_str())
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT))
            .gzip(config.enable_compression);

        if !self.tls_verify {
            warn!(base_url = %self.base_url, "TLS verification disabled for Zendesk client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(ServiceClient {
            http,
            base_url: self.base_url,
            credentials: self.credentials,
            retry_policy: self.http_config.retry_policy,
            log_requests: self.http_config.enable_logging,
        })
    }
}

/// Authenticated HTTP transport for one Zendesk account.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: Url,
    credentials: Option<Credentials>,
    retry_policy: RetryPolicy,
    log_requests: bool,
}

impl ServiceClient {
    /// Start a builder for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ServiceClientBuilder> {
        ServiceClientBuilder::new(base_url, Duration::from_secs(SUPPORT_DEFAULT_TIMEOUT))
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Resolve a relative API path against the base URL.
    ///
    /// The result always stays below the base URL: dot segments, schemes,
    /// queries and fragments are refused rather than resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the path would leave the base URL
    /// or cannot be joined.
    pub fn build_url(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        if escapes_base(relative) {
            return Err(Error::InvalidEndpoint(format!(
                "Path `{path}` is not a relative API path"
            )));
        }

        self.base_url
            .join(relative)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid path `{path}`: {err}")))
    }

    /// Send a request and return the response whatever its status.
    ///
    /// `configure` is applied on every attempt and adds headers or a body.
    /// Idempotent requests are retried on transient transport failures and on
    /// 429/502/503/504 responses, up to the configured retry policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn execute<F>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        configure: F,
    ) -> Result<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        self.execute_with(method, path, params, configure, Delivery::Retryable)
            .await
    }

    /// Like [`execute`](Self::execute), but [`Delivery::Once`] sends the
    /// request a single time whatever its method.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn execute_with<F>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        configure: F,
        delivery: Delivery,
    ) -> Result<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = self.build_url(path)?;
        let idempotent = delivery == Delivery::Retryable && is_idempotent(&method);
        let mut attempt: u32 = 0;

        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .query(params)
                .header(ACCEPT, "application/json");

            if let Some(credentials) = &self.credentials {
                request = credentials.apply(request);
            }
            request = configure(request);

            if self.log_requests {
                debug!(method = %method, path = %path, attempt, "Sending Zendesk request");
            }

            let may_retry = idempotent && attempt < self.retry_policy.max_retries;

            let retry_after = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if !(may_retry && is_transient_status(status)) {
                        if self.log_requests {
                            debug!(method = %method, path = %path, status = status.as_u16(), "Zendesk response");
                        }
                        return Ok(response);
                    }

                    warn!(method = %method, path = %path, status = status.as_u16(), attempt, "Transient Zendesk response, retrying");
                    retry_after_secs(&response)
                }
                Err(err) => {
                    let error = Error::from(err);
                    if !(may_retry && error.is_retryable()) {
                        return Err(error);
                    }

                    warn!(method = %method, path = %path, attempt, error = %error, "Zendesk request failed, retrying");
                    None
                }
            };

            attempt += 1;
            let delay = retry_after.map_or_else(
                || self.retry_policy.delay_for_attempt(attempt),
                |secs| Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECS)),
            );
            if delay > Duration::from_millis(0) {
                debug!(?delay, "Waiting before retrying Zendesk request");
                sleep(delay).await;
            }
        }
    }
}

/// Turn a non-success response into a typed error.
pub async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let retry_after = retry_after_secs(&response);
    let body = response.text().await.unwrap_or_default();
    map_status_to_error(status, &body, retry_after)
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn escapes_base(relative: &str) -> bool {
    if relative.contains(['?', '#', '\\', ':']) {
        return true;
    }
    relative.split('/').any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}

fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS
    )
}

const fn is_transient_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}
