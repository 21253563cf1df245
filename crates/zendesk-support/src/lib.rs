//! Zendesk Support API client and data models.
//!
//! Provides typed records and an asynchronous client for tickets, users,
//! organizations, groups, custom fields, search and attachment uploads.
//!
//! ```no_run
//! use zendesk_support::{PageRequest, ZendeskClient};
//! use zendesk_core::ZendeskClientConfig;
//!
//! # async fn example() -> zendesk_support::Result<()> {
//! let config = ZendeskClientConfig::for_subdomain("acme")?
//!     .with_api_token("agent@acme.com", "token");
//! let client = ZendeskClient::from_config(&config)?;
//!
//! let page = client.tickets().list(&PageRequest::first_cursor(50)).await?;
//! for ticket in &page {
//!     println!("#{} {}", ticket.id, ticket.subject.as_deref().unwrap_or(""));
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod resources;

pub use client::{ZendeskClient, ZendeskClientBuilder};
pub use models::{
    Attachment, CreateOrganizationRequest, CreateTicketRequest, CreateUserRequest,
    CustomFieldOption, CustomFieldValue, Group, GroupRequest, NewComment, Organization,
    OrganizationListParams, Requester, SearchParams, SearchResult, SortOrder, Ticket,
    TicketComment, TicketField, TicketFieldRequest, TicketPriority, TicketStatus, TicketType,
    UpdateOrganizationRequest, UpdateTicketRequest, UpdateUserRequest, Upload, User, UserField,
    UserFieldRequest, UserListParams, UserRole,
};
pub use zendesk_core::pagination::{CursorPager, Page, PageRequest, PagerParameters};
pub use zendesk_core::{Error, ZendeskClientConfig};

/// Convenient result alias that reuses the shared Zendesk error type.
pub type Result<T> = zendesk_core::Result<T>;
