use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use zendesk_core::ids::{TicketFieldId, UserFieldId};
use zendesk_core::Resource;

/// Option of a drop-down or multi-select field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomFieldOption {
    /// Option id, absent when creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Display name.
    pub name: String,
    /// Display name before dynamic content is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_name: Option<String>,
    /// Stored value, used as a tag.
    pub value: String,
    /// Whether this option is preselected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

impl CustomFieldOption {
    /// New option with a name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            raw_name: None,
            value: value.into(),
            default: None,
        }
    }
}

/// A ticket field definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketField {
    /// Field id.
    pub id: TicketFieldId,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Field type, e.g. `text`, `tagger`, `checkbox`.
    #[serde(rename = "type", default)]
    pub field_type: String,
    /// Title shown to agents.
    #[serde(default)]
    pub title: String,
    /// Title before dynamic content is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Description before dynamic content is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_description: Option<String>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Whether the field is active.
    #[serde(default)]
    pub active: bool,
    /// Whether agents must fill the field to solve.
    #[serde(default)]
    pub required: bool,
    /// Whether the field is collapsed in the agent interface.
    #[serde(default)]
    pub collapsed_for_agents: bool,
    /// Validation regular expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp_for_validation: Option<String>,
    /// Title shown to end users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_in_portal: Option<String>,
    /// Whether end users can see the field.
    #[serde(default)]
    pub visible_in_portal: bool,
    /// Whether end users can edit the field.
    #[serde(default)]
    pub editable_in_portal: bool,
    /// Whether end users must fill the field.
    #[serde(default)]
    pub required_in_portal: bool,
    /// Tag added for checkbox fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Options for drop-down fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_field_options: Vec<CustomFieldOption>,
    /// Whether this is a built-in field.
    #[serde(default)]
    pub removable: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for TicketField {
    const SINGULAR: &'static str = "ticket_field";
    const PLURAL: &'static str = "ticket_fields";
}

/// Payload for creating or updating a ticket field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct TicketFieldRequest {
    /// Field type; required on create.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Title; required on create.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Whether the field is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Whether agents must fill the field to solve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Validation regular expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp_for_validation: Option<String>,
    /// Title shown to end users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_in_portal: Option<String>,
    /// Whether end users can see the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_in_portal: Option<bool>,
    /// Whether end users can edit the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable_in_portal: Option<bool>,
    /// Tag added for checkbox fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Options for drop-down fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field_options: Option<Vec<CustomFieldOption>>,
}

impl TicketFieldRequest {
    /// New field of the given type.
    #[must_use]
    pub fn new(field_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// A user field definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserField {
    /// Field id.
    pub id: UserFieldId,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Key used in `user_fields` on users.
    #[serde(default)]
    pub key: String,
    /// Field type, e.g. `text`, `dropdown`, `date`.
    #[serde(rename = "type", default)]
    pub field_type: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Title before dynamic content is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Description before dynamic content is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_description: Option<String>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Whether the field is active.
    #[serde(default)]
    pub active: bool,
    /// Whether this is a system field.
    #[serde(default)]
    pub system: bool,
    /// Validation regular expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp_for_validation: Option<String>,
    /// Tag added for checkbox fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Options for drop-down fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_field_options: Vec<CustomFieldOption>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for UserField {
    const SINGULAR: &'static str = "user_field";
    const PLURAL: &'static str = "user_fields";
}

/// Payload for creating or updating a user field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct UserFieldRequest {
    /// Key; required on create, immutable afterwards.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Field type; required on create.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Title; required on create.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw title, may reference dynamic content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Whether the field is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Validation regular expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp_for_validation: Option<String>,
    /// Tag added for checkbox fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Options for drop-down fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field_options: Option<Vec<CustomFieldOption>>,
}

impl UserFieldRequest {
    /// New field of the given type.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        field_type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            field_type: Some(field_type.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
