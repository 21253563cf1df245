use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserListParams};
use crate::Result;
use tracing::debug;
use validator::Validate;
use zendesk_core::ids::{GroupId, OrganizationId, UserId};
use zendesk_core::{Error, Page, PageRequest, ServiceClient};

/// User endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UsersResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> UsersResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// List one page of users matching `params`.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(
        &self,
        params: &UserListParams,
        request: &PageRequest,
    ) -> Result<Page<User>> {
        self.client
            .list("users.json", request, &params.to_pairs())
            .await
    }

    /// List every user matching `params`, walking cursor pages.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while walking the pages.
    pub async fn list_all(&self, params: &UserListParams, page_size: u32) -> Result<Vec<User>> {
        self.client
            .list_all(
                "users.json",
                &params.to_pairs(),
                PageRequest::first_cursor(page_size),
            )
            .await
    }

    /// List the agents of a group.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_in_group(
        &self,
        group_id: GroupId,
        request: &PageRequest,
    ) -> Result<Page<User>> {
        let path = format!("groups/{group_id}/users.json");
        self.client.list(&path, request, &[]).await
    }

    /// List the members of an organization.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_in_organization(
        &self,
        organization_id: OrganizationId,
        request: &PageRequest,
    ) -> Result<Page<User>> {
        let path = format!("organizations/{organization_id}/users.json");
        self.client.list(&path, request, &[]).await
    }

    /// Fetch a user, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: UserId) -> Result<Option<User>> {
        self.client.get(&format!("users/{id}.json")).await
    }

    /// Fetch several users at once.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>> {
        self.client.get_many("users/show_many.json", ids).await
    }

    /// The authenticated user.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn me(&self) -> Result<User> {
        self.client
            .get("users/me.json")
            .await?
            .ok_or_else(|| Error::NotFound("authenticated user".to_string()))
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed request, otherwise a typed
    /// error for any status other than 201.
    pub async fn create(&self, request: &CreateUserRequest) -> Result<User> {
        request.validate()?;
        let user: User = self.client.create("users.json", request).await?;
        debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    /// Create a user, or update the one matching the email or external id.
    ///
    /// Zendesk answers 201 when it creates the user and 200 when it updates it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed request, otherwise a typed
    /// error for any status other than 201 or 200.
    pub async fn create_or_update(&self, request: &CreateUserRequest) -> Result<User> {
        request.validate()?;
        self.client
            .create("users/create_or_update.json", request)
            .await
    }

    /// Update a user, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(&self, id: UserId, request: &UpdateUserRequest) -> Result<Option<User>> {
        request.validate()?;
        self.client.update(&format!("users/{id}.json"), request).await
    }

    /// Delete (deactivate) a user.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 204.
    pub async fn delete(&self, id: UserId) -> Result<()> {
        self.client.delete(&format!("users/{id}.json")).await
    }

    /// Search users by name, email, phone, external id or tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a blank query, otherwise a typed
    /// error on any non-200 response.
    pub async fn search(&self, query: &str, request: &PageRequest) -> Result<Page<User>> {
        if query.trim().is_empty() {
            return Err(Error::InvalidRequest("search query is empty".to_string()));
        }
        self.client
            .list("users/search.json", request, &[("query", query.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::resources::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_filters_by_role() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users.json"))
            .and(query_param("role", "agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [{"id": 1, "name": "Agent", "role": "agent", "active": true}],
                "next_page": null,
                "count": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let params = UserListParams {
            roles: vec![UserRole::Agent],
            ..UserListParams::default()
        };
        let page = UsersResource::new(&client)
            .list(&params, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items[0].role, Some(UserRole::Agent));
    }

    #[tokio::test]
    async fn me_returns_authenticated_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": 42, "name": "Me", "email": "agent@acme.com", "role": "admin"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let me = UsersResource::new(&client).me().await.unwrap();
        assert_eq!(me.id, UserId::new(42));
        assert_eq!(me.role, Some(UserRole::Admin));
    }

    #[tokio::test]
    async fn create_or_update_accepts_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/create_or_update.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": 9, "name": "Roger", "email": "roger@example.com"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let user = UsersResource::new(&client)
            .create_or_update(&CreateUserRequest::new("Roger", "roger@example.com"))
            .await
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("roger@example.com"));
    }

    #[tokio::test]
    async fn create_validates_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = UsersResource::new(&client)
            .create(&CreateUserRequest::new("Roger", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[tokio::test]
    async fn unauthorized_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/1.json"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "Couldn't authenticate you"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = UsersResource::new(&client)
            .get(UserId::new(1))
            .await
            .unwrap_err();
        assert_eq!(err, Error::Unauthorized("Couldn't authenticate you".to_string()));
    }

    #[tokio::test]
    async fn search_passes_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/search.json"))
            .and(query_param("query", "roger@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [{"id": 9, "name": "Roger"}],
                "next_page": null
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let users = UsersResource::new(&client);
        let page = users
            .search("roger@example.com", &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert!(users.search(" ", &PageRequest::default()).await.is_err());
    }

    #[tokio::test]
    async fn delete_accepts_200_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/9.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": 9, "name": "Roger", "active": false}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        UsersResource::new(&client)
            .delete(UserId::new(9))
            .await
            .unwrap();
    }
}
