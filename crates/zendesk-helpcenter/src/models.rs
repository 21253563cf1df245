//! Help Center models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use zendesk_core::ids::{ArticleId, CategoryId, SectionId, UserId};
use zendesk_core::query::QueryParams;
use zendesk_core::Resource;

/// A knowledge base category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Category id.
    pub id: CategoryId,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Public URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Name in `locale`.
    #[serde(default)]
    pub name: String,
    /// Description in `locale`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Locale of the returned translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Locale the category was authored in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_locale: Option<String>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Whether the translation is behind the source.
    #[serde(default)]
    pub outdated: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Category {
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct CategoryRequest {
    /// Name; required on create.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Locale of the translation being written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl CategoryRequest {
    /// Request setting only the name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A section within a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Section id.
    pub id: SectionId,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Public URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Owning category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Parent section, for nested sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_section_id: Option<SectionId>,
    /// Name in `locale`.
    #[serde(default)]
    pub name: String,
    /// Description in `locale`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Locale of the returned translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Locale the section was authored in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_locale: Option<String>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Article ordering, e.g. `manual`, `created_at`, `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<String>,
    /// Theme template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_template: Option<String>,
    /// Whether the translation is behind the source.
    #[serde(default)]
    pub outdated: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Section {
    const SINGULAR: &'static str = "section";
    const PLURAL: &'static str = "sections";
}

/// Payload for creating or updating a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct SectionRequest {
    /// Name; required on create.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Locale of the translation being written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Moves the section to another category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Nests the section under another section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_section_id: Option<SectionId>,
    /// Sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Article ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<String>,
}

impl SectionRequest {
    /// Request setting only the name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A knowledge base article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Article id.
    pub id: ArticleId,
    /// API URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Public URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Section holding the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<SectionId>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    /// Title in `locale`.
    #[serde(default)]
    pub title: String,
    /// HTML body in `locale`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Locale of the returned translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Locale the article was authored in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_locale: Option<String>,
    /// Whether the translation is a draft.
    #[serde(default)]
    pub draft: bool,
    /// Whether the article is featured.
    #[serde(default)]
    pub promoted: bool,
    /// Whether comments are closed.
    #[serde(default)]
    pub comments_disabled: bool,
    /// Whether the translation is behind the source.
    #[serde(default)]
    pub outdated: bool,
    /// Sort position within the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Sum of up and down votes.
    #[serde(default)]
    pub vote_sum: i64,
    /// Number of votes.
    #[serde(default)]
    pub vote_count: u64,
    /// Labels.
    #[serde(default)]
    pub label_names: Vec<String>,
    /// Segment allowed to view the article, `None` for everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_segment_id: Option<u64>,
    /// Group allowed to edit the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_group_id: Option<u64>,
    /// Content tags.
    #[serde(default)]
    pub content_tag_ids: Vec<String>,
    /// Search snippet, present on search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Last edit of the translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl Resource for Article {
    const SINGULAR: &'static str = "article";
    const PLURAL: &'static str = "articles";
}

/// Payload for creating or updating an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct ArticleRequest {
    /// Title; required on create.
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTML body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Locale of the translation being written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    /// Moves the article to another section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<SectionId>,
    /// Save as draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Feature the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted: Option<bool>,
    /// Close comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_disabled: Option<bool>,
    /// Sort position within the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    /// Replaces the labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_names: Option<Vec<String>>,
    /// Segment allowed to view the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_segment_id: Option<u64>,
    /// Group allowed to edit the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_group_id: Option<u64>,
}

impl ArticleRequest {
    /// Article with a title and HTML body.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            ..Self::default()
        }
    }
}

/// Article search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleSearchParams {
    /// Full text query.
    pub query: String,
    /// Only articles in this locale, `*` for all.
    pub locale: Option<String>,
    /// Only articles in these categories.
    pub category_ids: Vec<CategoryId>,
    /// Only articles in these sections.
    pub section_ids: Vec<SectionId>,
    /// Only articles carrying all these labels.
    pub label_names: Vec<String>,
}

impl ArticleSearchParams {
    /// Search for `query`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Convert to query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push("query", &self.query);
        params.push_opt("locale", self.locale.as_deref());
        params.push_list("category", &self.category_ids);
        params.push_list("section", &self.section_ids);
        params.push_list("label_names", &self.label_names);
        params.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn article_decodes_search_hit() {
        let article: Article = serde_json::from_value(json!({
            "id": 360001,
            "result_type": "article",
            "title": "Resetting your password",
            "snippet": "Click <em>reset</em> on the sign-in page",
            "section_id": 42,
            "label_names": ["account"],
            "vote_sum": -2,
            "draft": false
        }))
        .unwrap();
        assert_eq!(article.section_id, Some(SectionId::new(42)));
        assert_eq!(article.vote_sum, -2);
        assert!(article.snippet.is_some());
    }

    #[test]
    fn search_params_join_filters() {
        let params = ArticleSearchParams {
            locale: Some("en-us".into()),
            section_ids: vec![SectionId::new(1), SectionId::new(2)],
            ..ArticleSearchParams::new("password")
        };
        assert_eq!(
            params.to_pairs(),
            vec![
                ("query", "password".to_string()),
                ("locale", "en-us".to_string()),
                ("section", "1,2".to_string()),
            ]
        );
    }

    #[test]
    fn request_skips_unset_fields() {
        let value = serde_json::to_value(ArticleRequest::new("Title", "<p>Body</p>")).unwrap();
        assert_eq!(value, json!({"title": "Title", "body": "<p>Body</p>"}));
    }
}
