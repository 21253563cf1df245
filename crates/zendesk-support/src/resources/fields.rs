use crate::models::{TicketField, TicketFieldRequest, UserField, UserFieldRequest};
use crate::Result;
use validator::Validate;
use zendesk_core::ids::{TicketFieldId, UserFieldId};
use zendesk_core::{Error, Page, PageRequest, ServiceClient};

/// Custom ticket field endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TicketFieldsResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> TicketFieldsResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// List ticket fields, system fields included.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<TicketField>> {
        self.client.list("ticket_fields.json", request, &[]).await
    }

    /// Fetch a ticket field, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: TicketFieldId) -> Result<Option<TicketField>> {
        self.client.get(&format!("ticket_fields/{id}.json")).await
    }

    /// Create a ticket field. `type` and `title` are required.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete request, otherwise a
    /// typed error for any status other than 201.
    pub async fn create(&self, request: &TicketFieldRequest) -> Result<TicketField> {
        request.validate()?;
        if request.field_type.is_none() || request.title.is_none() {
            return Err(Error::InvalidRequest(
                "ticket field needs a type and a title".to_string(),
            ));
        }
        self.client.create("ticket_fields.json", request).await
    }

    /// Update a ticket field, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(
        &self,
        id: TicketFieldId,
        request: &TicketFieldRequest,
    ) -> Result<Option<TicketField>> {
        request.validate()?;
        self.client
            .update(&format!("ticket_fields/{id}.json"), request)
            .await
    }

    /// Delete a ticket field.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: TicketFieldId) -> Result<()> {
        self.client.delete(&format!("ticket_fields/{id}.json")).await
    }
}

/// Custom user field endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserFieldsResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> UserFieldsResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// List user fields.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<UserField>> {
        self.client.list("user_fields.json", request, &[]).await
    }

    /// Fetch a user field, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: UserFieldId) -> Result<Option<UserField>> {
        self.client.get(&format!("user_fields/{id}.json")).await
    }

    /// Create a user field. `key`, `type` and `title` are required.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete request, otherwise a
    /// typed error for any status other than 201.
    pub async fn create(&self, request: &UserFieldRequest) -> Result<UserField> {
        request.validate()?;
        if request.key.is_none() || request.field_type.is_none() || request.title.is_none() {
            return Err(Error::InvalidRequest(
                "user field needs a key, a type and a title".to_string(),
            ));
        }
        self.client.create("user_fields.json", request).await
    }

    /// Update a user field, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(
        &self,
        id: UserFieldId,
        request: &UserFieldRequest,
    ) -> Result<Option<UserField>> {
        request.validate()?;
        self.client
            .update(&format!("user_fields/{id}.json"), request)
            .await
    }

    /// Delete a user field.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: UserFieldId) -> Result<()> {
        self.client.delete(&format!("user_fields/{id}.json")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomFieldOption;
    use crate::resources::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Create, fetch, update and delete one user field against a scripted server.
    #[tokio::test]
    async fn user_field_lifecycle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user_fields.json"))
            .and(body_json(json!({
                "user_field": {
                    "key": "support_description",
                    "type": "text",
                    "title": "Support description"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user_field": {
                    "id": 7,
                    "key": "support_description",
                    "type": "text",
                    "title": "Support description",
                    "active": true
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user_fields/7.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_field": {"id": 7, "key": "support_description", "type": "text", "title": "Support description"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/user_fields/7.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_field": {"id": 7, "key": "support_description", "type": "text", "title": "Renamed"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/user_fields/7.json"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user_fields/8.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let fields = UserFieldsResource::new(&client);

        let created = fields
            .create(&UserFieldRequest::new(
                "support_description",
                "text",
                "Support description",
            ))
            .await
            .unwrap();
        assert_eq!(created.id, UserFieldId::new(7));
        assert!(created.active);

        let fetched = fields.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.key, "support_description");

        let update = UserFieldRequest {
            title: Some("Renamed".into()),
            ..UserFieldRequest::default()
        };
        let updated = fields.update(created.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.title, "Renamed");

        fields.delete(created.id).await.unwrap();
        assert!(fields.get(UserFieldId::new(8)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_requires_key() {
        let server = MockServer::start().await;
        let client = client_for(&server.uri());
        let request = UserFieldRequest {
            field_type: Some("text".into()),
            title: Some("Missing key".into()),
            ..UserFieldRequest::default()
        };
        let err = UserFieldsResource::new(&client)
            .create(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn create_ticket_field_with_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ticket_fields.json"))
            .and(body_json(json!({
                "ticket_field": {
                    "type": "tagger",
                    "title": "Product",
                    "custom_field_options": [{"name": "Printer", "value": "printer"}]
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "ticket_field": {
                    "id": 21,
                    "type": "tagger",
                    "title": "Product",
                    "custom_field_options": [{"id": 1, "name": "Printer", "value": "printer"}]
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let mut request = TicketFieldRequest::new("tagger", "Product");
        request.custom_field_options = Some(vec![CustomFieldOption::new("Printer", "printer")]);
        let field = TicketFieldsResource::new(&client)
            .create(&request)
            .await
            .unwrap();
        assert_eq!(field.id, TicketFieldId::new(21));
        assert_eq!(field.custom_field_options.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let server = MockServer::start().await;
        let client = client_for(&server.uri());
        let err = TicketFieldsResource::new(&client)
            .create(&TicketFieldRequest::new("text", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
