//! Asynchronous Help Center client.

use crate::resources::{ArticlesResource, CategoriesResource, SectionsResource};
use crate::Result;
use std::time::Duration;
use url::Url;
use zendesk_core::client::{
    ClientConfig, RetryPolicy, ServiceClient, ServiceClientBuilder, HELP_CENTER_DEFAULT_TIMEOUT,
};
use zendesk_core::{Error, ZendeskClientConfig};

const USER_AGENT: &str = concat!("zendesk-helpcenter/", env!("CARGO_PKG_VERSION"));
const HELP_CENTER_ROOT: &str = "help_center";

/// Builder for [`HelpCenterClient`].
#[derive(Debug, Clone)]
pub struct HelpCenterClientBuilder {
    inner: ServiceClientBuilder,
    locale: Option<String>,
}

impl HelpCenterClientBuilder {
    /// Create a builder for the specified API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder =
            ServiceClientBuilder::new(base_url, Duration::from_secs(HELP_CENTER_DEFAULT_TIMEOUT))?
                .with_user_agent(USER_AGENT);

        Ok(Self {
            inner: builder,
            locale: None,
        })
    }

    /// Create a builder from an account configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid.
    pub fn from_config(config: &ZendeskClientConfig) -> Result<Self> {
        let mut inner = ServiceClientBuilder::from_config(config)?;
        if config.user_agent.is_none() {
            inner = inner.with_user_agent(USER_AGENT);
        }
        Ok(Self {
            inner,
            locale: None,
        })
    }

    /// Read and write the given translation, e.g. `en-us`.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(retry);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Authenticate with an agent email and API token.
    #[must_use]
    pub fn with_api_token(mut self, email: impl Into<String>, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_api_token(email, token);
        self
    }

    /// Authenticate with an OAuth access token.
    #[must_use]
    pub fn with_oauth_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_oauth_token(token);
        self
    }

    /// Configure HTTP basic authentication credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.inner = self.inner.with_basic_auth(username, password);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a malformed locale, or an error if
    /// the HTTP client cannot be created.
    pub fn build(self) -> Result<HelpCenterClient> {
        let locale = self.locale.map(|locale| normalize_locale(&locale)).transpose()?;
        let inner = self.inner.build()?;
        Ok(HelpCenterClient { inner, locale })
    }
}

fn normalize_locale(locale: &str) -> Result<String> {
    let locale = locale.trim().to_ascii_lowercase();
    let valid = !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(locale)
    } else {
        Err(Error::ConfigError(format!("invalid Help Center locale `{locale}`")))
    }
}

/// Asynchronous Help Center client.
#[derive(Debug, Clone)]
pub struct HelpCenterClient {
    inner: ServiceClient,
    locale: Option<String>,
}

impl HelpCenterClient {
    /// Construct an unauthenticated client without a locale.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        HelpCenterClientBuilder::new(base_url)?.build()
    }

    /// Construct a client from an account configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &ZendeskClientConfig) -> Result<Self> {
        HelpCenterClientBuilder::from_config(config)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// The bound locale, if any.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// The same client bound to another locale.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a malformed locale.
    pub fn for_locale(&self, locale: &str) -> Result<Self> {
        Ok(Self {
            inner: self.inner.clone(),
            locale: Some(normalize_locale(locale)?),
        })
    }

    /// The underlying transport.
    #[must_use]
    pub const fn service(&self) -> &ServiceClient {
        &self.inner
    }

    /// Knowledge base categories.
    #[must_use]
    pub const fn categories(&self) -> CategoriesResource<'_> {
        CategoriesResource::new(self)
    }

    /// Sections.
    #[must_use]
    pub const fn sections(&self) -> SectionsResource<'_> {
        SectionsResource::new(self)
    }

    /// Articles.
    #[must_use]
    pub const fn articles(&self) -> ArticlesResource<'_> {
        ArticlesResource::new(self)
    }

    /// Path below `help_center/`, prefixed with the locale when bound.
    pub(crate) fn localized(&self, rest: &str) -> String {
        match &self.locale {
            Some(locale) => format!("{HELP_CENTER_ROOT}/{locale}/{rest}"),
            None => self.unlocalized(rest),
        }
    }

    /// Path below `help_center/` that ignores the locale.
    pub(crate) fn unlocalized(&self, rest: &str) -> String {
        format!("{HELP_CENTER_ROOT}/{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_prefixes_paths() {
        let client = HelpCenterClientBuilder::new("https://acme.zendesk.com/api/v2")
            .unwrap()
            .with_locale("EN-US")
            .build()
            .unwrap();
        assert_eq!(client.locale(), Some("en-us"));
        assert_eq!(client.localized("sections.json"), "help_center/en-us/sections.json");
        assert_eq!(client.unlocalized("articles/1.json"), "help_center/articles/1.json");
    }

    #[test]
    fn paths_without_locale() {
        let client = HelpCenterClient::new("https://acme.zendesk.com/api/v2/").unwrap();
        assert_eq!(client.locale(), None);
        assert_eq!(client.localized("categories.json"), "help_center/categories.json");
    }

    #[test]
    fn rejects_malformed_locale() {
        let err = HelpCenterClientBuilder::new("https://acme.zendesk.com/api/v2")
            .unwrap()
            .with_locale("en/../us")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let client = HelpCenterClient::new("https://acme.zendesk.com/api/v2").unwrap();
        assert!(client.for_locale("").is_err());
        assert_eq!(client.for_locale("de").unwrap().locale(), Some("de"));
    }
}
