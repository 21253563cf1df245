//! Resource handles returned by [`crate::ZendeskClient`].
//!
//! Each handle borrows the client's transport and maps one family of
//! endpoints onto the shared request pipeline.

mod attachments;
mod fields;
mod groups;
mod organizations;
mod search;
mod ticket_comments;
mod tickets;
mod users;

pub use attachments::AttachmentsResource;
pub use fields::{TicketFieldsResource, UserFieldsResource};
pub use groups::GroupsResource;
pub use organizations::OrganizationsResource;
pub use search::SearchResource;
pub use ticket_comments::TicketCommentsResource;
pub use tickets::TicketsResource;
pub use users::UsersResource;
