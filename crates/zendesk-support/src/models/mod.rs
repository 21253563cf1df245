//! Support API models.
//!
//! Records decode leniently: every field Zendesk may omit is optional or
//! defaulted, and unknown enum values fall back to an `Unknown` variant.

mod attachments;
mod fields;
mod groups;
mod organizations;
mod search;
mod tickets;
mod users;

pub use attachments::{Attachment, Upload};
pub use fields::{
    CustomFieldOption, TicketField, TicketFieldRequest, UserField, UserFieldRequest,
};
pub use groups::{Group, GroupRequest};
pub use organizations::{
    CreateOrganizationRequest, Organization, OrganizationListParams, UpdateOrganizationRequest,
};
pub use search::{SearchParams, SearchResult, SortOrder};
pub use tickets::{
    CreateTicketRequest, CustomFieldValue, NewComment, Requester, Ticket, TicketComment,
    TicketPriority, TicketStatus, TicketType, UpdateTicketRequest,
};
pub use users::{CreateUserRequest, UpdateUserRequest, User, UserListParams, UserRole};
