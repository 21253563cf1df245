use crate::models::{Attachment, Upload};
use crate::Result;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use tracing::debug;
use zendesk_core::ids::AttachmentId;
use zendesk_core::query::QueryParams;
use zendesk_core::resource::decode_entry;
use zendesk_core::{Error, ServiceClient};

/// Upload and attachment endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentsResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> AttachmentsResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// Upload a file.
    ///
    /// Pass the returned token in a comment's `uploads` to attach it. Passing
    /// `token` adds the file to an existing upload instead of starting one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an empty file name, otherwise a
    /// typed error for any status other than 201.
    pub async fn upload(
        &self,
        filename: &str,
        content: Bytes,
        content_type: &str,
        token: Option<&str>,
    ) -> Result<Upload> {
        if filename.trim().is_empty() {
            return Err(Error::InvalidRequest("upload needs a file name".to_string()));
        }

        let mut params = QueryParams::new();
        params.push("filename", filename);
        params.push_opt("token", token);

        debug!(filename, size = content.len(), "Uploading attachment");
        let body = self
            .client
            .send_expecting(
                Method::POST,
                "uploads.json",
                &params.into_pairs(),
                |request| {
                    request
                        .header(CONTENT_TYPE, content_type)
                        .body(content.clone())
                },
                &[StatusCode::CREATED],
            )
            .await?;
        decode_entry(&body, "upload")
    }

    /// Fetch attachment metadata, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: AttachmentId) -> Result<Option<Attachment>> {
        self.client.get(&format!("attachments/{id}.json")).await
    }

    /// Discard an upload that was never attached to a comment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] unless the token is a non-empty run of
    /// ASCII letters and digits, otherwise a typed error for any status other
    /// than 204.
    pub async fn delete_upload(&self, token: &str) -> Result<()> {
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidRequest(format!(
                "`{token}` is not an upload token"
            )));
        }
        self.client.delete(&format!("uploads/{token}.json")).await
    }
}
