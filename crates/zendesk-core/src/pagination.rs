//! Offset and cursor pagination.
//!
//! Zendesk list endpoints return a JSON object holding the records under a
//! resource-specific key (`"tickets"`, `"sections"`, ...) next to paging
//! metadata. Offset pagination reports `next_page`/`previous_page` URLs and a
//! `count`; cursor pagination reports a `meta` object with `has_more` and
//! `after_cursor`. [`Page`] decodes both shapes and knows how to request the
//! page that follows.

use crate::error::{Error, Result};
use crate::query::QueryParams;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Largest page size Zendesk accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Offset pagination parameters (`page`, `per_page`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerParameters {
    /// 1-based page number
    pub page: Option<u32>,
    /// Records per page, at most [`MAX_PAGE_SIZE`]
    pub page_size: Option<u32>,
}

impl PagerParameters {
    /// Request a specific page.
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Request the first page with the given size.
    #[must_use]
    pub const fn with_page_size(page_size: u32) -> Self {
        Self {
            page: None,
            page_size: Some(page_size),
        }
    }

    /// Query pairs for this request.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("page", self.page);
        params.push_opt("per_page", self.page_size.map(|size| size.min(MAX_PAGE_SIZE)));
        params.into_pairs()
    }
}

/// Cursor pagination parameters (`page[size]`, `page[after]`, `page[before]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorPager {
    /// Records per page, at most [`MAX_PAGE_SIZE`]
    pub size: Option<u32>,
    /// Cursor of the page to fetch after
    pub after: Option<String>,
    /// Cursor of the page to fetch before
    pub before: Option<String>,
}

impl CursorPager {
    /// First page with the given size.
    #[must_use]
    pub const fn with_size(size: u32) -> Self {
        Self {
            size: Some(size),
            after: None,
            before: None,
        }
    }

    /// Continue after the given cursor.
    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self.before = None;
        self
    }

    /// Go back before the given cursor.
    #[must_use]
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self.after = None;
        self
    }

    /// Query pairs for this request.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("page[size]", self.size.map(|size| size.min(MAX_PAGE_SIZE)));
        params.push_opt("page[after]", self.after.as_deref());
        params.push_opt("page[before]", self.before.as_deref());
        params.into_pairs()
    }
}

/// Which page of a collection to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// Offset pagination
    Offset(PagerParameters),
    /// Cursor pagination
    Cursor(CursorPager),
}

impl PageRequest {
    /// First page using cursor pagination.
    #[must_use]
    pub const fn first_cursor(size: u32) -> Self {
        Self::Cursor(CursorPager::with_size(size))
    }

    /// Query pairs for this request.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Offset(pager) => pager.to_pairs(),
            Self::Cursor(pager) => pager.to_pairs(),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Offset(PagerParameters::default())
    }
}

impl From<PagerParameters> for PageRequest {
    fn from(pager: PagerParameters) -> Self {
        Self::Offset(pager)
    }
}

impl From<CursorPager> for PageRequest {
    fn from(pager: CursorPager) -> Self {
        Self::Cursor(pager)
    }
}

/// Cursor pagination metadata.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CursorMeta {
    /// Whether another page follows
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page
    #[serde(default)]
    pub after_cursor: Option<String>,
    /// Cursor for the previous page
    #[serde(default)]
    pub before_cursor: Option<String>,
}

/// Cursor pagination links.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CursorLinks {
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub prev: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PageEnvelope {
    #[serde(default)]
    next_page: Option<String>,
    #[serde(default)]
    previous_page: Option<String>,
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    meta: Option<CursorMeta>,
    #[serde(default)]
    links: Option<CursorLinks>,
}

/// One page of a Zendesk collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// URL of the next page (offset pagination)
    pub next_page: Option<String>,
    /// URL of the previous page (offset pagination)
    pub previous_page: Option<String>,
    /// Total number of records (offset pagination)
    pub count: Option<u64>,
    /// Cursor metadata (cursor pagination)
    pub meta: Option<CursorMeta>,
    /// Cursor links (cursor pagination)
    pub links: Option<CursorLinks>,
}

impl<T> Page<T> {
    /// A single page holding `items` and no paging metadata.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items,
            next_page: None,
            previous_page: None,
            count: None,
            meta: None,
            links: None,
        }
    }

    /// Number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns true if the collection continues past this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        match &self.meta {
            Some(meta) => meta.has_more,
            None => self.next_page.is_some(),
        }
    }

    /// The request for the page following this one, given the request that
    /// produced it. `None` once the collection is exhausted.
    #[must_use]
    pub fn next_request(&self, current: &PageRequest) -> Option<PageRequest> {
        match current {
            PageRequest::Offset(pager) => self.next_page.as_ref().map(|_| {
                PageRequest::Offset(PagerParameters {
                    page: Some(pager.page.unwrap_or(1).saturating_add(1)),
                    page_size: pager.page_size,
                })
            }),
            PageRequest::Cursor(pager) => {
                let meta = self.meta.as_ref().filter(|meta| meta.has_more)?;
                let cursor = meta.after_cursor.clone()?;
                Some(PageRequest::Cursor(CursorPager {
                    size: pager.size,
                    after: Some(cursor),
                    before: None,
                }))
            }
        }
    }

    /// Transform the records, keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_page: self.next_page,
            previous_page: self.previous_page,
            count: self.count,
            meta: self.meta,
            links: self.links,
        }
    }

    /// Consume the page, returning its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a page from a response body whose records sit under `key`.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the body is not a JSON object, `key` is
    /// missing, or a record fails to decode.
    pub fn from_json(body: &[u8], key: &str) -> Result<Self> {
        let mut root: Map<String, Value> = serde_json::from_slice(body)?;
        let items = root
            .remove(key)
            .ok_or_else(|| Error::ParseError(format!("response is missing `{key}`")))?;
        let items: Vec<T> = if items.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(items)?
        };
        let envelope: PageEnvelope = serde_json::from_value(Value::Object(root))?;

        Ok(Self {
            items,
            next_page: envelope.next_page,
            previous_page: envelope.previous_page,
            count: envelope.count,
            meta: envelope.meta,
            links: envelope.links,
        })
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Anything that can fetch pages of a collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource<T: Send + Sync + 'static>: Send + Sync {
    /// Fetch the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched or decoded.
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>>;
}

/// Walk a collection from `first`, concatenating every page.
///
/// Stops when a page reports no successor, when the successor request would
/// repeat the current one, or after `max_pages` pages.
///
/// # Errors
///
/// Returns the first error raised by the source.
pub async fn collect_all<T, S>(
    source: &S,
    first: PageRequest,
    max_pages: Option<usize>,
) -> Result<Vec<T>>
where
    T: Send + Sync + 'static,
    S: PageSource<T> + ?Sized,
{
    let mut items = Vec::new();
    let mut request = first;
    let mut fetched = 0usize;

    loop {
        let page = source.fetch_page(request.clone()).await?;
        fetched += 1;
        let next = page.next_request(&request);
        items.extend(page.items);

        match next {
            Some(next)
                if next != request && max_pages.map_or(true, |limit| fetched < limit) =>
            {
                request = next;
            }
            _ => break,
        }
    }

    Ok(items)
}
