//! Resource handles returned by [`HelpCenterClient`].
//!
//! Reads and writes honour the client's locale. Deletes and article search
//! are locale independent; search filters by locale through its own
//! parameter instead.

use crate::client::HelpCenterClient;
use crate::models::{
    Article, ArticleRequest, ArticleSearchParams, Category, CategoryRequest, Section,
    SectionRequest,
};
use crate::Result;
use tracing::debug;
use validator::Validate;
use zendesk_core::ids::{ArticleId, CategoryId, SectionId};
use zendesk_core::{Error, Page, PageRequest};

fn require_name(name: Option<&String>, what: &str) -> Result<()> {
    if name.is_none() {
        return Err(Error::InvalidRequest(format!("{what} needs a name")));
    }
    Ok(())
}

/// Category endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CategoriesResource<'a> {
    client: &'a HelpCenterClient,
}

impl<'a> CategoriesResource<'a> {
    pub(crate) const fn new(client: &'a HelpCenterClient) -> Self {
        Self { client }
    }

    /// List one page of categories.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<Category>> {
        let path = self.client.localized("categories.json");
        self.client.service().list(&path, request, &[]).await
    }

    /// Fetch a category, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        let path = self.client.localized(&format!("categories/{id}.json"));
        self.client.service().get(&path).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing name, otherwise a typed error
    /// for any status other than 201.
    pub async fn create(&self, request: &CategoryRequest) -> Result<Category> {
        request.validate()?;
        require_name(request.name.as_ref(), "category")?;
        let path = self.client.localized("categories.json");
        self.client.service().create(&path, request).await
    }

    /// Update a category, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(
        &self,
        id: CategoryId,
        request: &CategoryRequest,
    ) -> Result<Option<Category>> {
        request.validate()?;
        let path = self.client.localized(&format!("categories/{id}.json"));
        self.client.service().update(&path, request).await
    }

    /// Delete a category with all its sections and articles.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: CategoryId) -> Result<()> {
        let path = self.client.unlocalized(&format!("categories/{id}.json"));
        self.client.service().delete(&path).await
    }
}

/// Section endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SectionsResource<'a> {
    client: &'a HelpCenterClient,
}

impl<'a> SectionsResource<'a> {
    pub(crate) const fn new(client: &'a HelpCenterClient) -> Self {
        Self { client }
    }

    /// List one page of sections.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<Section>> {
        let path = self.client.localized("sections.json");
        self.client.service().list(&path, request, &[]).await
    }

    /// List the sections of a category.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_in_category(
        &self,
        category_id: CategoryId,
        request: &PageRequest,
    ) -> Result<Page<Section>> {
        let path = self
            .client
            .localized(&format!("categories/{category_id}/sections.json"));
        self.client.service().list(&path, request, &[]).await
    }

    /// Fetch a section, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: SectionId) -> Result<Option<Section>> {
        let path = self.client.localized(&format!("sections/{id}.json"));
        self.client.service().get(&path).await
    }

    /// Create a section in a category.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing name, otherwise a typed error
    /// for any status other than 201.
    pub async fn create(
        &self,
        category_id: CategoryId,
        request: &SectionRequest,
    ) -> Result<Section> {
        request.validate()?;
        require_name(request.name.as_ref(), "section")?;
        let path = self
            .client
            .localized(&format!("categories/{category_id}/sections.json"));
        self.client.service().create(&path, request).await
    }

    /// Update a section, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(
        &self,
        id: SectionId,
        request: &SectionRequest,
    ) -> Result<Option<Section>> {
        request.validate()?;
        let path = self.client.localized(&format!("sections/{id}.json"));
        self.client.service().update(&path, request).await
    }

    /// Delete a section with all its articles.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: SectionId) -> Result<()> {
        let path = self.client.unlocalized(&format!("sections/{id}.json"));
        self.client.service().delete(&path).await
    }
}

/// Article endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ArticlesResource<'a> {
    client: &'a HelpCenterClient,
}

impl<'a> ArticlesResource<'a> {
    pub(crate) const fn new(client: &'a HelpCenterClient) -> Self {
        Self { client }
    }

    /// List one page of articles.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<Article>> {
        let path = self.client.localized("articles.json");
        self.client.service().list(&path, request, &[]).await
    }

    /// List the articles of a section.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_in_section(
        &self,
        section_id: SectionId,
        request: &PageRequest,
    ) -> Result<Page<Article>> {
        let path = self
            .client
            .localized(&format!("sections/{section_id}/articles.json"));
        self.client.service().list(&path, request, &[]).await
    }

    /// List the articles of every section in a category.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response.
    pub async fn list_in_category(
        &self,
        category_id: CategoryId,
        request: &PageRequest,
    ) -> Result<Page<Article>> {
        let path = self
            .client
            .localized(&format!("categories/{category_id}/articles.json"));
        self.client.service().list(&path, request, &[]).await
    }

    /// Fetch an article, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get(&self, id: ArticleId) -> Result<Option<Article>> {
        let path = self.client.localized(&format!("articles/{id}.json"));
        self.client.service().get(&path).await
    }

    /// Create an article in a section.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing title, otherwise a typed
    /// error for any status other than 201.
    pub async fn create(
        &self,
        section_id: SectionId,
        request: &ArticleRequest,
    ) -> Result<Article> {
        request.validate()?;
        if request.title.is_none() {
            return Err(Error::InvalidRequest("article needs a title".to_string()));
        }
        let path = self
            .client
            .localized(&format!("sections/{section_id}/articles.json"));
        let article: Article = self.client.service().create(&path, request).await?;
        debug!(article_id = %article.id, section_id = %section_id, "Created article");
        Ok(article)
    }

    /// Update an article's metadata, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update(
        &self,
        id: ArticleId,
        request: &ArticleRequest,
    ) -> Result<Option<Article>> {
        request.validate()?;
        let path = self.client.localized(&format!("articles/{id}.json"));
        self.client.service().update(&path, request).await
    }

    /// Archive an article. Archived articles can be restored from the
    /// Guide admin.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204.
    pub async fn delete(&self, id: ArticleId) -> Result<()> {
        let path = self.client.unlocalized(&format!("articles/{id}.json"));
        self.client.service().delete(&path).await
    }

    /// Full text search over published articles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a blank query, otherwise a typed
    /// error on any non-200 response.
    pub async fn search(
        &self,
        params: &ArticleSearchParams,
        request: &PageRequest,
    ) -> Result<Page<Article>> {
        if params.query.trim().is_empty() {
            return Err(Error::InvalidRequest("search query is empty".to_string()));
        }

        let mut pairs = params.to_pairs();
        if params.locale.is_none() {
            if let Some(locale) = self.client.locale() {
                pairs.push(("locale", locale.to_string()));
            }
        }

        let path = self.client.unlocalized("articles/search.json");
        self.client
            .service()
            .list_page(&path, "results", request, &pairs)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HelpCenterClientBuilder;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str, locale: Option<&str>) -> HelpCenterClient {
        let mut builder = HelpCenterClientBuilder::new(uri)
            .unwrap()
            .with_api_token("agent@acme.com", "abc");
        if let Some(locale) = locale {
            builder = builder.with_locale(locale);
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn list_sections_uses_locale_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/help_center/en-us/sections.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sections": [{"id": 1, "name": "Getting started", "category_id": 10, "locale": "en-us"}],
                "next_page": null,
                "count": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Some("en-us"));
        let page = client.sections().list(&PageRequest::default()).await.unwrap();
        assert_eq!(page.items[0].category_id, Some(CategoryId::new(10)));
    }

    #[tokio::test]
    async fn create_section_in_category() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/help_center/categories/10/sections.json"))
            .and(body_json(json!({"section": {"name": "Billing"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "section": {"id": 5, "name": "Billing", "category_id": 10}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let section = client
            .sections()
            .create(CategoryId::new(10), &SectionRequest::named("Billing"))
            .await
            .unwrap();
        assert_eq!(section.id, SectionId::new(5));
    }

    #[tokio::test]
    async fn category_lifecycle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/help_center/categories.json"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "category": {"id": 10, "name": "FAQ", "position": 0}
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/help_center/categories/10.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "category": {"id": 10, "name": "Questions"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/help_center/categories/10.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/help_center/categories/10.json"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let categories = client.categories();
        let created = categories.create(&CategoryRequest::named("FAQ")).await.unwrap();
        let renamed = categories
            .update(created.id, &CategoryRequest::named("Questions"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Questions");
        categories.delete(created.id).await.unwrap();
        assert!(categories.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_category_requires_name() {
        let server = MockServer::start().await;
        let client = client_for(&server.uri(), None);
        let err = client
            .categories()
            .create(&CategoryRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn create_article_in_section() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/help_center/de/sections/5/articles.json"))
            .and(body_json(json!({
                "article": {"title": "Rechnung", "body": "<p>Hallo</p>", "user_segment_id": 7}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "article": {"id": 99, "title": "Rechnung", "section_id": 5, "locale": "de", "draft": true}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Some("de"));
        let request = ArticleRequest {
            user_segment_id: Some(7),
            ..ArticleRequest::new("Rechnung", "<p>Hallo</p>")
        };
        let article = client
            .articles()
            .create(SectionId::new(5), &request)
            .await
            .unwrap();
        assert_eq!(article.id, ArticleId::new(99));
        assert!(article.draft);
    }

    #[tokio::test]
    async fn delete_article_ignores_locale() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/help_center/articles/99.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Some("de"));
        client.articles().delete(ArticleId::new(99)).await.unwrap();
    }

    #[tokio::test]
    async fn search_defaults_to_client_locale() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/help_center/articles/search.json"))
            .and(query_param("query", "password"))
            .and(query_param("locale", "en-us"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 1, "title": "Reset your password", "result_type": "article", "snippet": "reset"}
                ],
                "next_page": null,
                "count": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Some("en-us"));
        let page = client
            .articles()
            .search(&ArticleSearchParams::new("password"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].title, "Reset your password");
    }

    #[tokio::test]
    async fn list_in_category_maps_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/help_center/categories/3/articles.json"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), None);
        let err = client
            .articles()
            .list_in_category(CategoryId::new(3), &PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RateLimited { retry_after: Some(7), .. }));
    }
}
