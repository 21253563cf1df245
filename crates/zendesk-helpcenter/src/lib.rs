//! Zendesk Help Center API client and data models.
//!
//! Covers the knowledge base hierarchy: categories contain sections, sections
//! contain articles. A client may be bound to a locale, in which case reads
//! and writes go through `help_center/{locale}/...` and return that
//! translation.
//!
//! ```no_run
//! use zendesk_helpcenter::{HelpCenterClientBuilder, PageRequest};
//!
//! # async fn example() -> zendesk_helpcenter::Result<()> {
//! let client = HelpCenterClientBuilder::new("https://acme.zendesk.com/api/v2")?
//!     .with_api_token("agent@acme.com", "token")
//!     .with_locale("en-us")
//!     .build()?;
//!
//! let sections = client.sections().list(&PageRequest::default()).await?;
//! for section in &sections {
//!     println!("{} {}", section.id, section.name);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod resources;

pub use client::{HelpCenterClient, HelpCenterClientBuilder};
pub use models::{
    Article, ArticleRequest, ArticleSearchParams, Category, CategoryRequest, Section,
    SectionRequest,
};
pub use zendesk_core::pagination::{CursorPager, Page, PageRequest, PagerParameters};
pub use zendesk_core::{Error, ZendeskClientConfig};

/// Convenient result alias that reuses the shared Zendesk error type.
pub type Result<T> = zendesk_core::Result<T>;
