use crate::models::{
    CreateOrganizationRequest, Organization, OrganizationListParams, UpdateOrganizationRequest,
};
use crate::Result;
use validator::Validate;
use zendesk_core::ids::{OrganizationId, UserId};
use zendesk_core::{Error, Page, PageRequest, ServiceClient};

/// Organization endpoints.
#[derive(Debug, Clone, Copy)]
pub struct OrganizationsResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> OrganizationsResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// List one page of organizations.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(
        &self,
        params: &OrganizationListParams,
        request: &PageRequest,
    ) -> Result<Page<Organization>> {
        self.client
            .list("organizations.json", request, &params.to_pairs())
            .await
    }

    /// List the organizations a user belongs to.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        request: &PageRequest,
    ) -> Result<Page<Organization>> {
        let path = format!("users/{user_id}/organizations.json");
        self.client.list(&path, request, &[]).await
    }

    /// Fetch an organization, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: OrganizationId) -> Result<Option<Organization>> {
        self.client.get(&format!("organizations/{id}.json")).await
    }

    /// Create an organization.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing name, otherwise a typed
    /// error for any status other than 201. A duplicate name is rejected by
    /// Zendesk with 422.
    pub async fn create(&self, request: &CreateOrganizationRequest) -> Result<Organization> {
        request.validate()?;
        self.client.create("organizations.json", request).await
    }

    /// Update an organization, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(
        &self,
        id: OrganizationId,
        request: &UpdateOrganizationRequest,
    ) -> Result<Option<Organization>> {
        request.validate()?;
        self.client
            .update(&format!("organizations/{id}.json"), request)
            .await
    }

    /// Delete an organization.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: OrganizationId) -> Result<()> {
        self.client
            .delete(&format!("organizations/{id}.json"))
            .await
    }

    /// Organizations whose name starts with `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when `name` has fewer than two
    /// characters, otherwise a typed error on any non-200 response.
    pub async fn autocomplete(
        &self,
        name: &str,
        request: &PageRequest,
    ) -> Result<Page<Organization>> {
        if name.trim().chars().count() < 2 {
            return Err(Error::InvalidRequest(
                "autocomplete needs at least two characters".to_string(),
            ));
        }
        self.client
            .list(
                "organizations/autocomplete.json",
                request,
                &[("name", name.trim().to_string())],
            )
            .await
    }
}
