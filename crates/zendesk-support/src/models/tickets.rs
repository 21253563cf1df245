use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use zendesk_core::ids::{
    BrandId, CommentId, GroupId, OrganizationId, TicketFormId, TicketId, UserId,
};
use zendesk_core::Resource;

use super::attachments::Attachment;

/// Ticket status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Not yet opened by an agent.
    New,
    /// Assigned and being worked on.
    Open,
    /// Waiting on the requester.
    Pending,
    /// Waiting on a third party.
    Hold,
    /// Solved, may still be reopened.
    Solved,
    /// Closed for good.
    Closed,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    /// Urgent.
    Urgent,
    /// High.
    High,
    /// Normal.
    Normal,
    /// Low.
    Low,
    /// Any priority this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Ticket type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// Problem.
    Problem,
    /// Incident linked to a problem.
    Incident,
    /// Question.
    Question,
    /// Task with a due date.
    Task,
    /// Any type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Value of a custom field on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomFieldValue {
    /// Ticket field id.
    pub id: u64,
    /// Field value; shape depends on the field type.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl CustomFieldValue {
    /// Build a custom field value.
    #[must_use]
    pub fn new(id: u64, value: impl Into<serde_json::Value>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// A Zendesk ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Ticket id.
    pub id: TicketId,
    /// API URL of the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Ticket type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    /// Subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Subject before dynamic content is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_subject: Option<String>,
    /// First comment on the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    /// Status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    /// Original recipient address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<UserId>,
    /// Submitter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<UserId>,
    /// Assigned agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    /// Organization of the requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// Assigned group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
    /// Ticket form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_form_id: Option<TicketFormId>,
    /// CC'd users.
    #[serde(default)]
    pub collaborator_ids: Vec<UserId>,
    /// Followers.
    #[serde(default)]
    pub follower_ids: Vec<UserId>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Custom field values.
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldValue>,
    /// Problem ticket this incident is linked to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<TicketId>,
    /// Due date for tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Whether incidents are linked to this problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_incidents: Option<bool>,
    /// Whether any comment is public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Ticket {
    const SINGULAR: &'static str = "ticket";
    const PLURAL: &'static str = "tickets";
}

/// A comment on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketComment {
    /// Comment id.
    pub id: CommentId,
    /// Comment type, `Comment` or `VoiceComment`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub comment_type: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    /// Text body.
    #[serde(default)]
    pub body: String,
    /// HTML body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    /// Plain text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_body: Option<String>,
    /// Whether the requester can see the comment.
    #[serde(default = "default_public")]
    pub public: bool,
    /// Attachments.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Audit that created the comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_id: Option<u64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

const fn default_public() -> bool {
    true
}

impl Resource for TicketComment {
    const SINGULAR: &'static str = "comment";
    const PLURAL: &'static str = "comments";
}

/// New comment added when creating or updating a ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    /// Text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// HTML body, used instead of `body` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    /// Whether the comment is public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Author, defaults to the authenticated user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    /// Upload tokens to attach.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<String>,
}

impl NewComment {
    /// Public plain text comment.
    #[must_use]
    pub fn public(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            public: Some(true),
            ..Self::default()
        }
    }

    /// Internal note.
    #[must_use]
    pub fn private(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            public: Some(false),
            ..Self::default()
        }
    }

    /// Attach a previously uploaded file.
    #[must_use]
    pub fn with_upload(mut self, token: impl Into<String>) -> Self {
        self.uploads.push(token.into());
        self
    }

    pub(crate) fn has_content(&self) -> bool {
        self.body.as_deref().is_some_and(|b| !b.trim().is_empty())
            || self.html_body.as_deref().is_some_and(|b| !b.trim().is_empty())
    }
}

/// Requester created on the fly with a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Requester {
    /// Display name.
    pub name: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Locale id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<u64>,
}

/// Payload for creating a ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct CreateTicketRequest {
    /// Subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// First comment; required.
    pub comment: NewComment,
    /// Existing requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<UserId>,
    /// Requester to create or look up by email.
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<Requester>,
    /// Submitter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<UserId>,
    /// Assigned agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    /// Assigned group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// Ticket type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    /// Status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Custom field values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Due date for tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Ticket form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_form_id: Option<TicketFormId>,
}

impl CreateTicketRequest {
    /// Ticket with a subject and a public first comment.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            comment: NewComment::public(body),
            ..Self::default()
        }
    }
}

/// Payload for updating a ticket. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTicketRequest {
    /// Subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Comment to add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<NewComment>,
    /// Requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<UserId>,
    /// Assigned agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    /// Assigned group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// Ticket type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    /// Priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    /// Status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    /// Replaces all tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Custom field values to set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomFieldValue>>,
    /// External id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Due date for tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Rejects the update if the ticket changed after this timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_stamp: Option<DateTime<Utc>>,
    /// Required with `updated_stamp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_update: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_falls_back() {
        let status: TicketStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, TicketStatus::Unknown);
        let status: TicketStatus = serde_json::from_value(json!("hold")).unwrap();
        assert_eq!(status, TicketStatus::Hold);
    }

    #[test]
    fn ticket_type_uses_type_key() {
        let ticket: Ticket = serde_json::from_value(json!({
            "id": 35436,
            "type": "incident",
            "subject": "Help, my printer is on fire!",
            "status": "open",
            "priority": "high",
            "tags": ["enterprise", "other_tag"],
            "custom_fields": [{"id": 27642, "value": "745"}],
            "created_at": "2009-07-20T22:55:29Z"
        }))
        .unwrap();

        assert_eq!(ticket.id, TicketId::new(35436));
        assert_eq!(ticket.ticket_type, Some(TicketType::Incident));
        assert_eq!(ticket.priority, Some(TicketPriority::High));
        assert_eq!(ticket.custom_fields[0].value, json!("745"));
        assert!(ticket.collaborator_ids.is_empty());
    }

    #[test]
    fn create_request_skips_empty_fields() {
        let request = CreateTicketRequest::new("Printer", "It is on fire");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "subject": "Printer",
                "comment": {"body": "It is on fire", "public": true}
            })
        );
    }

    #[test]
    fn comment_content_check() {
        assert!(NewComment::public("hi").has_content());
        assert!(!NewComment::public("   ").has_content());
        assert!(!NewComment::default().has_content());
    }

    #[test]
    fn requester_email_is_validated() {
        let request = CreateTicketRequest {
            requester: Some(Requester {
                name: "Jo".into(),
                email: "not-an-email".into(),
                locale_id: None,
            }),
            ..CreateTicketRequest::new("s", "b")
        };
        assert!(request.validate().is_err());
    }
}
