//! # zendesk-core
//!
//! Shared building blocks for the Zendesk API client crates.
//!
//! This crate owns the request pipeline every resource goes through: the HTTP
//! transport, the mapping of HTTP failures onto typed errors, and the generic
//! pagination abstraction used by all list endpoints.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`ids`] - Strongly-typed numeric identifiers for Zendesk records
//! - [`config`] - Account configuration and credentials
//! - [`client`] - HTTP transport, retry policy and connection settings
//! - [`query`] - Query string builder
//! - [`pagination`] - Offset and cursor pagination
//! - [`resource`] - Uniform get/list/create/update/delete pipeline

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod pagination;
pub mod query;
pub mod resource;

// Re-export commonly used types
pub use client::{Delivery, ServiceClient, ServiceClientBuilder};
pub use config::{Credentials, ZendeskClientConfig};
pub use error::{Error, Result};
pub use pagination::{CursorPager, Page, PageRequest, PagerParameters};
pub use resource::Resource;
