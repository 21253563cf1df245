use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;
use zendesk_core::ids::{GroupId, OrganizationId, UserId};
use zendesk_core::query::QueryParams;
use zendesk_core::Resource;

use super::attachments::Attachment;

/// Role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Customer.
    #[serde(rename = "end-user")]
    EndUser,
    /// Agent.
    #[serde(rename = "agent")]
    Agent,
    /// Administrator.
    #[serde(rename = "admin")]
    Admin,
    /// Any role this client does not know about.
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// Wire value of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndUser => "end-user",
            Self::Agent => "agent",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }
}

/// A Zendesk user (end user, agent or admin).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// User id.
    pub id: UserId,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Primary email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Custom agent role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_role_id: Option<u64>,
    /// Default organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// Default group for agents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group_id: Option<GroupId>,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Alias shown to end users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Time zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// IANA time zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iana_time_zone: Option<String>,
    /// Locale, e.g. `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Locale id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<u64>,
    /// Whether the user is active (not deleted).
    #[serde(default)]
    pub active: bool,
    /// Whether the primary identity is verified.
    #[serde(default)]
    pub verified: bool,
    /// Whether the user is suspended.
    #[serde(default)]
    pub suspended: bool,
    /// Whether the user is shared from another account.
    #[serde(default)]
    pub shared: bool,
    /// Whether the agent is restricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted_agent: Option<bool>,
    /// Which tickets the user can access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_restriction: Option<String>,
    /// Whether the agent can only add private comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_private_comments: Option<bool>,
    /// Agent signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Values of custom user fields, by field key.
    #[serde(default)]
    pub user_fields: Map<String, Value>,
    /// Profile picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Attachment>,
    /// Last sign-in timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for User {
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
}

/// Payload for creating a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct CreateUserRequest {
    /// Name; required.
    #[validate(length(min = 1))]
    pub name: String,
    /// Primary email.
    #[validate(email)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role, defaults to end user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Default organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Mark the email as verified, skipping the verification mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Time zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Locale, e.g. `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Values of custom user fields, by field key.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub user_fields: Map<String, Value>,
}

impl CreateUserRequest {
    /// User with a name and email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Set the role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Payload for updating a user. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct UpdateUserRequest {
    /// Name.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary email.
    #[validate(email)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Default organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Suspend or unsuspend the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    /// Time zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Replaces all tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Values of custom user fields to set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fields: Option<Map<String, Value>>,
}

/// Filters for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListParams {
    /// Only users with these roles.
    pub roles: Vec<UserRole>,
    /// Only agents with this custom role.
    pub permission_set: Option<u64>,
    /// Only the user with this external id.
    pub external_id: Option<String>,
}

impl UserListParams {
    /// Convert to query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        match self.roles.as_slice() {
            [] => {}
            [role] => params.push("role", role.as_str()),
            roles => {
                for role in roles {
                    params.push("role[]", role.as_str());
                }
            }
        }
        params.push_opt("permission_set", self.permission_set);
        params.push_opt("external_id", self.external_id.as_deref());
        params.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_uses_hyphenated_wire_value() {
        let role: UserRole = serde_json::from_value(json!("end-user")).unwrap();
        assert_eq!(role, UserRole::EndUser);
        assert_eq!(serde_json::to_value(UserRole::EndUser).unwrap(), json!("end-user"));
        let role: UserRole = serde_json::from_value(json!("light-agent")).unwrap();
        assert_eq!(role, UserRole::Unknown);
    }

    #[test]
    fn list_params_use_array_syntax_for_multiple_roles() {
        let single = UserListParams {
            roles: vec![UserRole::Agent],
            ..UserListParams::default()
        };
        assert_eq!(single.to_pairs(), vec![("role", "agent".to_string())]);

        let many = UserListParams {
            roles: vec![UserRole::Agent, UserRole::Admin],
            external_id: Some("ext-1".into()),
            ..UserListParams::default()
        };
        assert_eq!(
            many.to_pairs(),
            vec![
                ("role[]", "agent".to_string()),
                ("role[]", "admin".to_string()),
                ("external_id", "ext-1".to_string()),
            ]
        );
    }

    #[test]
    fn create_request_validates_email() {
        assert!(CreateUserRequest::new("Roger", "roger@example.com")
            .validate()
            .is_ok());
        assert!(CreateUserRequest::new("Roger", "nope").validate().is_err());
        assert!(CreateUserRequest::new("", "roger@example.com")
            .validate()
            .is_err());
    }
}
