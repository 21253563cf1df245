use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zendesk_core::query::QueryParams;

use super::{Group, Organization, Ticket, User};

/// One hit of a unified search, typed by its `result_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// A ticket.
    Ticket(Box<Ticket>),
    /// A user.
    User(Box<User>),
    /// An organization.
    Organization(Box<Organization>),
    /// A group.
    Group(Box<Group>),
    /// Any other record type, kept as raw JSON.
    Other(Value),
}

impl SearchResult {
    /// The `result_type` this hit was decoded from.
    #[must_use]
    pub fn result_type(&self) -> &str {
        match self {
            Self::Ticket(_) => "ticket",
            Self::User(_) => "user",
            Self::Organization(_) => "organization",
            Self::Group(_) => "group",
            Self::Other(value) => value
                .get("result_type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }

    /// The ticket, if this hit is one.
    #[must_use]
    pub fn as_ticket(&self) -> Option<&Ticket> {
        match self {
            Self::Ticket(ticket) => Some(&**ticket),
            _ => None,
        }
    }

    /// The user, if this hit is one.
    #[must_use]
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(&**user),
            _ => None,
        }
    }

    /// The organization, if this hit is one.
    #[must_use]
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Self::Organization(organization) => Some(&**organization),
            _ => None,
        }
    }

    /// The group, if this hit is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(&**group),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("result_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let result = match kind.as_str() {
            "ticket" => Self::Ticket(Box::new(
                serde_json::from_value(value).map_err(D::Error::custom)?,
            )),
            "user" => Self::User(Box::new(
                serde_json::from_value(value).map_err(D::Error::custom)?,
            )),
            "organization" => Self::Organization(Box::new(
                serde_json::from_value(value).map_err(D::Error::custom)?,
            )),
            "group" => Self::Group(Box::new(
                serde_json::from_value(value).map_err(D::Error::custom)?,
            )),
            _ => Self::Other(value),
        };
        Ok(result)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A search query with optional ordering.
///
/// The query uses Zendesk search syntax, e.g. `type:ticket status:open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Query string.
    pub query: String,
    /// Field to sort by (`updated_at`, `created_at`, `priority`, ...).
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}

impl SearchParams {
    /// Search for `query` with the server's default ordering.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sort_by: None,
            sort_order: None,
        }
    }

    /// Sort results by `field` in `order`.
    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Convert to query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push("query", &self.query);
        params.push_opt("sort_by", self.sort_by.as_deref());
        params.push_opt("sort_order", self.sort_order.map(SortOrder::as_str));
        params.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dispatches_on_result_type() {
        let hits: Vec<SearchResult> = serde_json::from_value(json!([
            {"result_type": "ticket", "id": 35436, "subject": "Help"},
            {"result_type": "user", "id": 7, "name": "Agent"},
            {"result_type": "organization", "id": 9, "name": "Acme"},
            {"result_type": "topic", "id": 1},
            {"result_type": "group", "id": 12, "name": "Tier 2"}
        ]))
        .unwrap();

        assert_eq!(hits[0].as_ticket().unwrap().id.get(), 35436);
        assert_eq!(hits[1].as_user().unwrap().name, "Agent");
        assert_eq!(hits[2].as_organization().unwrap().name, "Acme");
        assert!(matches!(hits[3], SearchResult::Other(_)));
        assert_eq!(hits[3].result_type(), "topic");
        assert_eq!(hits[4].as_group().unwrap().name, "Tier 2");
        assert!(hits[4].as_ticket().is_none());
    }

    #[test]
    fn params_include_sorting_when_set() {
        let params = SearchParams::new("status:open").sorted_by("created_at", SortOrder::Desc);
        assert_eq!(
            params.to_pairs(),
            vec![
                ("query", "status:open".to_string()),
                ("sort_by", "created_at".to_string()),
                ("sort_order", "desc".to_string()),
            ]
        );
        assert_eq!(SearchParams::new("x").to_pairs().len(), 1);
    }
}
