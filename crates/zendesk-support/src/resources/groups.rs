use crate::models::{Group, GroupRequest};
use crate::Result;
use validator::Validate;
use zendesk_core::ids::{GroupId, UserId};
use zendesk_core::{Error, Page, PageRequest, ServiceClient};

/// Agent group endpoints.
#[derive(Debug, Clone, Copy)]
pub struct GroupsResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> GroupsResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// List one page of groups.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<Group>> {
        self.client.list("groups.json", request, &[]).await
    }

    /// List the groups tickets can be assigned to.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_assignable(&self, request: &PageRequest) -> Result<Page<Group>> {
        self.client.list("groups/assignable.json", request, &[]).await
    }

    /// List the groups an agent belongs to.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        request: &PageRequest,
    ) -> Result<Page<Group>> {
        let path = format!("users/{user_id}/groups.json");
        self.client.list(&path, request, &[]).await
    }

    /// Fetch a group, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: GroupId) -> Result<Option<Group>> {
        self.client.get(&format!("groups/{id}.json")).await
    }

    /// Create a group. A name is required.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing name, otherwise a typed error
    /// for any status other than 201.
    pub async fn create(&self, request: &GroupRequest) -> Result<Group> {
        request.validate()?;
        if request.name.is_none() {
            return Err(Error::InvalidRequest("group needs a name".to_string()));
        }
        self.client.create("groups.json", request).await
    }

    /// Update a group, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(&self, id: GroupId, request: &GroupRequest) -> Result<Option<Group>> {
        request.validate()?;
        self.client.update(&format!("groups/{id}.json"), request).await
    }

    /// Delete a group.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: GroupId) -> Result<()> {
        self.client.delete(&format!("groups/{id}.json")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_assignable_decodes_groups() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups/assignable.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "groups": [{"id": 211, "name": "DJs", "default": true}],
                "next_page": null,
                "count": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let page = GroupsResource::new(&client)
            .list_assignable(&PageRequest::default())
            .await
            .unwrap();
        assert!(page.items[0].default);
        assert_eq!(page.items[0].id, GroupId::new(211));
    }

    #[tokio::test]
    async fn create_requires_name() {
        let server = MockServer::start().await;
        let client = client_for(&server.uri());
        let err = GroupsResource::new(&client)
            .create(&GroupRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/groups/211.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "group": {"id": 211, "name": "Support"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/groups/211.json"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let groups = GroupsResource::new(&client);
        let group = groups
            .update(GroupId::new(211), &GroupRequest::named("Support"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(group.name, "Support");
        groups.delete(GroupId::new(211)).await.unwrap();
    }
}
