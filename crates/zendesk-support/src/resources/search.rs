use crate::models::{SearchParams, SearchResult};
use crate::Result;
use zendesk_core::{Error, Page, PageRequest, ServiceClient};

const RESULTS_KEY: &str = "results";

/// Unified search across tickets, users, organizations and groups.
#[derive(Debug, Clone, Copy)]
pub struct SearchResource<'a> {
    client: &'a ServiceClient,
}

impl<'a> SearchResource<'a> {
    pub(crate) const fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    /// Fetch one page of search hits. Search only supports offset paging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a blank query, otherwise a typed
    /// error on any non-200 response.
    pub async fn search(
        &self,
        params: &SearchParams,
        request: &PageRequest,
    ) -> Result<Page<SearchResult>> {
        ensure_query(&params.query)?;
        self.client
            .list_page("search.json", RESULTS_KEY, request, &params.to_pairs())
            .await
    }

    /// Number of records matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a blank query, otherwise a typed
    /// error on any non-200 response.
    pub async fn count(&self, query: &str) -> Result<u64> {
        ensure_query(query)?;
        self.client
            .get_entry("search/count.json", "count", &[("query", query.to_string())])
            .await?
            .ok_or_else(|| Error::NotFound("search count".to_string()))
    }
}

fn ensure_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(Error::InvalidRequest("search query is empty".to_string()));
    }
    Ok(())
}
