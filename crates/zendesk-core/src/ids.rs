//! Strongly-typed identifiers for Zendesk records.
//!
//! Zendesk identifies records with 64-bit integers. Wrapping them per record
//! type prevents passing a user id where a ticket id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed id wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new id wrapper.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Parses an id from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not a non-negative integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                input
                    .trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| Error::InvalidRequest(format!("invalid id `{input}`")))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(TicketId, "Ticket id");
id_type!(CommentId, "Ticket comment id");
id_type!(TicketFieldId, "Ticket field id");
id_type!(TicketFormId, "Ticket form id");
id_type!(UserId, "User id");
id_type!(UserFieldId, "User field id");
id_type!(OrganizationId, "Organization id");
id_type!(GroupId, "Group id");
id_type!(AttachmentId, "Attachment id");
id_type!(BrandId, "Brand id");
id_type!(CategoryId, "Help Center category id");
id_type!(SectionId, "Help Center section id");
id_type!(ArticleId, "Help Center article id");
