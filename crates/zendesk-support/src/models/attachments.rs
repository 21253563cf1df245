use serde::{Deserialize, Serialize};
use zendesk_core::ids::AttachmentId;
use zendesk_core::Resource;

/// A file attached to a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    /// Attachment id.
    pub id: AttachmentId,
    /// File name.
    #[serde(default)]
    pub file_name: String,
    /// Download URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    /// Download URL on the host-mapped domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_content_url: Option<String>,
    /// MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Image width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Image height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Whether the attachment is shown inline.
    #[serde(default)]
    pub inline: bool,
    /// Whether the attachment was redacted.
    #[serde(default)]
    pub deleted: bool,
    /// Thumbnails for images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnails: Vec<Attachment>,
}

impl Resource for Attachment {
    const SINGULAR: &'static str = "attachment";
    const PLURAL: &'static str = "attachments";
}

/// Result of uploading a file.
///
/// The token is passed in [`crate::NewComment::uploads`] to attach the file to a
/// comment. Further files can be added to the same upload by passing the token
/// back when uploading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Upload {
    /// Upload token.
    pub token: String,
    /// When the token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    /// The attachment just uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Every attachment in this upload.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}
