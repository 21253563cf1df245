//! Asynchronous Zendesk Support client.

use crate::resources::{
    AttachmentsResource, GroupsResource, OrganizationsResource, SearchResource,
    TicketCommentsResource, TicketFieldsResource, TicketsResource, UserFieldsResource,
    UsersResource,
};
use crate::Result;
use std::time::Duration;
use url::Url;
use zendesk_core::client::{
    ClientConfig, RetryPolicy, ServiceClient, ServiceClientBuilder, SUPPORT_DEFAULT_TIMEOUT,
};
use zendesk_core::ZendeskClientConfig;

const USER_AGENT: &str = concat!("zendesk-support/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ZendeskClient`].
#[derive(Debug, Clone)]
pub struct ZendeskClientBuilder {
    inner: ServiceClientBuilder,
}

impl ZendeskClientBuilder {
    /// Create a builder for the specified API base URL, e.g.
    /// `https://acme.zendesk.com/api/v2/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder =
            ServiceClientBuilder::new(base_url, Duration::from_secs(SUPPORT_DEFAULT_TIMEOUT))?
                .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from an account configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid.
    pub fn from_config(config: &ZendeskClientConfig) -> Result<Self> {
        let mut builder = ServiceClientBuilder::from_config(config)?;
        if config.user_agent.is_none() {
            builder = builder.with_user_agent(USER_AGENT);
        }
        Ok(Self { inner: builder })
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
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(self) -> Result<ZendeskClient> {
        let inner = self.inner.build()?;
        Ok(ZendeskClient { inner })
    }
}

/// Asynchronous Zendesk Support client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ZendeskClient {
    inner: ServiceClient,
}

impl ZendeskClient {
    /// Construct an unauthenticated client directly from the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ZendeskClientBuilder::new(base_url)?.build()
    }

    /// Construct a client from an account configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &ZendeskClientConfig) -> Result<Self> {
        ZendeskClientBuilder::from_config(config)?.build()
    }

    /// Wrap an existing transport.
    #[must_use]
    pub const fn from_service(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// The underlying transport, for endpoints without a typed handle.
    #[must_use]
    pub const fn service(&self) -> &ServiceClient {
        &self.inner
    }

    /// Tickets.
    #[must_use]
    pub const fn tickets(&self) -> TicketsResource<'_> {
        TicketsResource::new(&self.inner)
    }

    /// Comments on tickets.
    #[must_use]
    pub const fn ticket_comments(&self) -> TicketCommentsResource<'_> {
        TicketCommentsResource::new(&self.inner)
    }

    /// Custom ticket fields.
    #[must_use]
    pub const fn ticket_fields(&self) -> TicketFieldsResource<'_> {
        TicketFieldsResource::new(&self.inner)
    }

    /// Users.
    #[must_use]
    pub const fn users(&self) -> UsersResource<'_> {
        UsersResource::new(&self.inner)
    }

    /// Custom user fields.
    #[must_use]
    pub const fn user_fields(&self) -> UserFieldsResource<'_> {
        UserFieldsResource::new(&self.inner)
    }

    /// Organizations.
    #[must_use]
    pub const fn organizations(&self) -> OrganizationsResource<'_> {
        OrganizationsResource::new(&self.inner)
    }

    /// Agent groups.
    #[must_use]
    pub const fn groups(&self) -> GroupsResource<'_> {
        GroupsResource::new(&self.inner)
    }

    /// Unified search.
    #[must_use]
    pub const fn search(&self) -> SearchResource<'_> {
        SearchResource::new(&self.inner)
    }

    /// File uploads and attachments.
    #[must_use]
    pub const fn attachments(&self) -> AttachmentsResource<'_> {
        AttachmentsResource::new(&self.inner)
    }
}
