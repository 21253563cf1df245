use crate::models::{CreateTicketRequest, Ticket, UpdateTicketRequest};
use crate::Result;
use reqwest::{Method, StatusCode};
use tracing::debug;
use validator::Validate;
use zendesk_core::ids::{OrganizationId, TicketId, UserId};
use zendesk_core::{Delivery, Error, Page, PageRequest, ServiceClient};

/// Ticket endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TicketsResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> TicketsResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// List one page of tickets.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<Ticket>> {
        self.client.list("tickets.json", request, &[]).await
    }

    /// List every ticket, walking cursor pages of `page_size` records.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while walking the pages.
    pub async fn list_all(&self, page_size: u32) -> Result<Vec<Ticket>> {
        self.client
            .list_all("tickets.json", &[], PageRequest::first_cursor(page_size))
            .await
    }

    /// List the tickets of an organization.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
        request: &PageRequest,
    ) -> Result<Page<Ticket>> {
        let path = format!("organizations/{organization_id}/tickets.json");
        self.client.list(&path, request, &[]).await
    }

    /// List the tickets a user requested.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_requested_by(
        &self,
        user_id: UserId,
        request: &PageRequest,
    ) -> Result<Page<Ticket>> {
        let path = format!("users/{user_id}/tickets/requested.json");
        self.client.list(&path, request, &[]).await
    }

    /// List the tickets assigned to an agent.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_assigned_to(
        &self,
        user_id: UserId,
        request: &PageRequest,
    ) -> Result<Page<Ticket>> {
        let path = format!("users/{user_id}/tickets/assigned.json");
        self.client.list(&path, request, &[]).await
    }

    /// Fetch a ticket, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: TicketId) -> Result<Option<Ticket>> {
        self.client.get(&format!("tickets/{id}.json")).await
    }

    /// Fetch several tickets at once. Unknown ids are skipped by the server.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn get_many(&self, ids: &[TicketId]) -> Result<Vec<Ticket>> {
        self.client.get_many("tickets/show_many.json", ids).await
    }

    /// Create a ticket.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the request is malformed or has no
    /// first comment, otherwise a typed error for any status other than 201.
    pub async fn create(&self, request: &CreateTicketRequest) -> Result<Ticket> {
        request.validate()?;
        if !request.comment.has_content() {
            return Err(Error::InvalidRequest(
                "a ticket needs a first comment with a body".to_string(),
            ));
        }

        let ticket: Ticket = self.client.create("tickets.json", request).await?;
        debug!(ticket_id = %ticket.id, "Created ticket");
        Ok(ticket)
    }

    /// Update a ticket, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404; a
    /// conflicting `safe_update` surfaces as [`Error::Conflict`].
    pub async fn update(
        &self,
        id: TicketId,
        request: &UpdateTicketRequest,
    ) -> Result<Option<Ticket>> {
        // a replayed comment shows up twice on the ticket
        let delivery = if request.comment.is_some() {
            Delivery::Once
        } else {
            Delivery::Retryable
        };
        self.client
            .update_with(&format!("tickets/{id}.json"), request, delivery)
            .await
    }

    /// Delete a ticket.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: TicketId) -> Result<()> {
        self.client.delete(&format!("tickets/{id}.json")).await
    }

    /// Mark a ticket as spam and suspend its requester.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200.
    pub async fn mark_as_spam(&self, id: TicketId) -> Result<()> {
        let path = format!("tickets/{id}/mark_as_spam.json");
        self.client
            .send_expecting(Method::PUT, &path, &[], |r| r, &[StatusCode::OK])
            .await?;
        Ok(())
    }
}
