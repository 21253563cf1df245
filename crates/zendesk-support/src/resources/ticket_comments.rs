use crate::models::{NewComment, Ticket, TicketComment};
use crate::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;
use zendesk_core::ids::{CommentId, TicketId};
use zendesk_core::resource::envelope;
use zendesk_core::{Delivery, Error, Page, PageRequest, Resource, ServiceClient};

/// Ticket comment endpoints.
///
/// Zendesk has no endpoint for posting a comment on its own; comments are
/// added by updating the ticket with a `comment` attribute.
#[derive(Debug, Clone, Copy)]
pub struct TicketCommentsResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> TicketCommentsResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// List one page of a ticket's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(
        &self,
        ticket_id: TicketId,
        request: &PageRequest,
    ) -> Result<Page<TicketComment>> {
        let path = format!("tickets/{ticket_id}/comments.json");
        self.client.list(&path, request, &[]).await
    }

    /// Add a comment to a ticket, returning the updated ticket or `None` if
    /// the ticket does not exist.
    ///
    /// The PUT is never retried, so a timeout cannot post the comment twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an empty comment, otherwise a
    /// typed error for any status other than 200 or 404.
    pub async fn add(&self, ticket_id: TicketId, comment: &NewComment) -> Result<Option<Ticket>> {
        if !comment.has_content() {
            return Err(Error::InvalidRequest("comment body is empty".to_string()));
        }

        let payload = envelope(Ticket::SINGULAR, &json!({ "comment": comment }))?;
        self.client
            .put_entry(
                &format!("tickets/{ticket_id}.json"),
                Ticket::SINGULAR,
                &payload,
                Delivery::Once,
            )
            .await
    }

    /// Turn a public comment into an internal note.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200.
    pub async fn make_private(&self, ticket_id: TicketId, comment_id: CommentId) -> Result<()> {
        let path = format!("tickets/{ticket_id}/comments/{comment_id}/make_private.json");
        self.client
            .send_expecting(Method::PUT, &path, &[], |r| r, &[StatusCode::OK])
            .await?;
        Ok(())
    }
}
