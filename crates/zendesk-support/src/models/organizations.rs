use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;
use zendesk_core::ids::{GroupId, OrganizationId};
use zendesk_core::query::QueryParams;
use zendesk_core::Resource;

/// An organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    /// Organization id.
    pub id: OrganizationId,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Unique name.
    pub name: String,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Email domains whose users join the organization automatically.
    #[serde(default)]
    pub domain_names: Vec<String>,
    /// Details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Group new tickets are assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Whether members see each other's tickets.
    #[serde(default)]
    pub shared_tickets: bool,
    /// Whether members can comment on each other's tickets.
    #[serde(default)]
    pub shared_comments: bool,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Values of custom organization fields, by field key.
    #[serde(default)]
    pub organization_fields: Map<String, Value>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Organization {
    const SINGULAR: &'static str = "organization";
    const PLURAL: &'static str = "organizations";
}

/// Payload for creating an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct CreateOrganizationRequest {
    /// Unique name; required.
    #[validate(length(min = 1))]
    pub name: String,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Email domains.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_names: Vec<String>,
    /// Details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Group new tickets are assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Whether members see each other's tickets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_tickets: Option<bool>,
    /// Whether members can comment on each other's tickets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_comments: Option<bool>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Values of custom organization fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub organization_fields: Map<String, Value>,
}

impl CreateOrganizationRequest {
    /// Organization with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Payload for updating an organization. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct UpdateOrganizationRequest {
    /// Name.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Replaces the email domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_names: Option<Vec<String>>,
    /// Details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Group new tickets are assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Whether members see each other's tickets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_tickets: Option<bool>,
    /// Whether members can comment on each other's tickets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_comments: Option<bool>,
    /// Replaces all tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Values of custom organization fields to set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_fields: Option<Map<String, Value>>,
}

/// Filters for listing organizations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationListParams {
    /// Only organizations with these external ids.
    pub external_ids: Vec<String>,
    /// Only organizations with this name.
    pub name: Option<String>,
}

impl OrganizationListParams {
    /// Convert to query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_list("external_ids", &self.external_ids);
        params.push_opt("name", self.name.as_deref());
        params.into_pairs()
    }
}
