//! Uniform request pipeline shared by every Zendesk resource.
//!
//! Zendesk wraps single records in an envelope named after the record type
//! (`{"ticket": {...}}`) and lists under the plural name (`{"tickets": [...]}`).
//! The methods here perform the request, check the status the operation
//! expects, unwrap the envelope and map everything else onto [`Error`].
//!
//! | operation | success            | 404         |
//! |-----------|--------------------|-------------|
//! | `get`     | 200                | `Ok(None)`  |
//! | `list`    | 200                | error       |
//! | `create`  | 201 or 200         | error       |
//! | `update`  | 200                | `Ok(None)`  |
//! | `delete`  | 204 or 200         | error       |

use crate::client::{error_from_response, Delivery, ServiceClient};
use crate::error::{Error, Result};
use crate::pagination::{collect_all, Page, PageRequest, PageSource, MAX_PAGE_SIZE};
use crate::query::QueryParams;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Display;
use std::marker::PhantomData;

/// A record type exposed by the Zendesk API.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Envelope key for a single record, e.g. `"ticket"`.
    const SINGULAR: &'static str;
    /// Envelope key for a collection, e.g. `"tickets"`.
    const PLURAL: &'static str;
}

const GET_OK: &[StatusCode] = &[StatusCode::OK];
const CREATE_OK: &[StatusCode] = &[StatusCode::CREATED, StatusCode::OK];
const DELETE_OK: &[StatusCode] = &[StatusCode::NO_CONTENT, StatusCode::OK];

impl ServiceClient {
    /// Send a request and return the body if the status is one of `expected`.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any other status or transport failure.
    pub async fn send_expecting<F>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        configure: F,
        expected: &[StatusCode],
    ) -> Result<Bytes>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let response = self.execute(method, path, params, configure).await?;
        if !expected.contains(&response.status()) {
            return Err(error_from_response(response).await);
        }
        response.bytes().await.map_err(Error::from)
    }

    /// Fetch one page of a collection stored under `key`.
    ///
    /// `params` carries endpoint filters; paging pairs come from `request`.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response or decode failure.
    pub async fn list_page<T>(
        &self,
        path: &str,
        key: &str,
        request: &PageRequest,
        params: &[(&'static str, String)],
    ) -> Result<Page<T>>
    where
        T: DeserializeOwned,
    {
        let mut pairs = params.to_vec();
        pairs.extend(request.to_pairs());

        let body = self
            .send_expecting(Method::GET, path, &pairs, |r| r, GET_OK)
            .await?;
        Page::from_json(&body, key)
    }

    /// Fetch one page of a resource collection.
    ///
    /// # Errors
    ///
    /// Returns a typed error on any non-200 response or decode failure.
    pub async fn list<T: Resource>(
        &self,
        path: &str,
        request: &PageRequest,
        params: &[(&'static str, String)],
    ) -> Result<Page<T>> {
        self.list_page(path, T::PLURAL, request, params).await
    }

    /// Fetch every record of a collection, starting at `first`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while walking the pages.
    pub async fn list_all<T: Resource>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        first: PageRequest,
    ) -> Result<Vec<T>> {
        let endpoint = ListEndpoint::<T>::new(self.clone(), path, T::PLURAL, params.to_vec());
        collect_all(&endpoint, first, None).await
    }

    /// Fetch records by id from a `show_many` endpoint.
    ///
    /// Zendesk takes at most [`MAX_PAGE_SIZE`] ids per call, so longer lists
    /// are fetched in batches and concatenated in order.
    ///
    /// # Errors
    ///
    /// Returns the first typed error raised by any batch.
    pub async fn get_many<T, I>(&self, path: &str, ids: I) -> Result<Vec<T>>
    where
        T: Resource,
        I: IntoIterator,
        I::Item: Display,
    {
        let ids: Vec<String> = ids.into_iter().map(|id| id.to_string()).collect();
        let mut records = Vec::with_capacity(ids.len());

        for batch in ids.chunks(MAX_PAGE_SIZE as usize) {
            let mut params = QueryParams::new();
            params.push_list("ids", batch);
            let page: Page<T> = self
                .list_page(path, T::PLURAL, &PageRequest::default(), &params.into_pairs())
                .await?;
            records.extend(page.into_items());
        }

        Ok(records)
    }

    /// Fetch a single record, returning `None` on 404.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get<T: Resource>(&self, path: &str) -> Result<Option<T>> {
        self.get_entry(path, T::SINGULAR, &[]).await
    }

    /// Fetch the value stored under `key`, returning `None` on 404.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn get_entry<T>(
        &self,
        path: &str,
        key: &str,
        params: &[(&'static str, String)],
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(Method::GET, path, params, |r| r).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if response.status() != StatusCode::OK {
            return Err(error_from_response(response).await);
        }

        let body = response.bytes().await?;
        decode_entry(&body, key).map(Some)
    }

    /// Create a record. The body is wrapped as `{SINGULAR: body}`.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 201 or 200.
    pub async fn create<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: Resource,
        B: Serialize + ?Sized,
    {
        let payload = envelope(T::SINGULAR, body)?;
        let bytes = self
            .send_expecting(
                Method::POST,
                path,
                &[],
                |request| request.json(&payload),
                CREATE_OK,
            )
            .await?;
        decode_entry(&bytes, T::SINGULAR)
    }

    /// Update a record, returning `None` on 404.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update<T, B>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        T: Resource,
        B: Serialize + ?Sized,
    {
        self.update_with(path, body, Delivery::Retryable).await
    }

    /// Update a record, choosing whether the PUT may be replayed.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn update_with<T, B>(
        &self,
        path: &str,
        body: &B,
        delivery: Delivery,
    ) -> Result<Option<T>>
    where
        T: Resource,
        B: Serialize + ?Sized,
    {
        let payload = envelope(T::SINGULAR, body)?;
        self.put_entry(path, T::SINGULAR, &payload, delivery).await
    }

    /// PUT a raw JSON payload and decode the value under `key`, `None` on 404.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 200 or 404.
    pub async fn put_entry<T>(
        &self,
        path: &str,
        key: &str,
        payload: &Value,
        delivery: Delivery,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .execute_with(
                Method::PUT,
                path,
                &[],
                |request| request.json(payload),
                delivery,
            )
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if response.status() != StatusCode::OK {
            return Err(error_from_response(response).await);
        }

        let body = response.bytes().await?;
        decode_entry(&body, key).map(Some)
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204 or 200.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.delete_with(path, &[]).await
    }

    /// Delete with query parameters.
    ///
    /// # Errors
    ///
    /// Returns a typed error for any status other than 204 or 200.
    pub async fn delete_with(&self, path: &str, params: &[(&'static str, String)]) -> Result<()> {
        self.send_expecting(Method::DELETE, path, params, |r| r, DELETE_OK)
            .await
            .map(|_| ())
    }
}

/// Wrap `body` as `{key: body}`.
///
/// # Errors
///
/// Returns a parse error if `body` cannot be serialized.
pub fn envelope<B: Serialize + ?Sized>(key: &str, body: &B) -> Result<Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), serde_json::to_value(body)?);
    Ok(Value::Object(map))
}

/// Decode the value stored under `key` of a JSON object body.
///
/// # Errors
///
/// Returns a parse error if the body is not an object or `key` is missing.
pub fn decode_entry<T: DeserializeOwned>(body: &[u8], key: &str) -> Result<T> {
    let mut root: Map<String, Value> = serde_json::from_slice(body)?;
    let value = root
        .remove(key)
        .ok_or_else(|| Error::ParseError(format!("response is missing `{key}`")))?;
    serde_json::from_value(value).map_err(Error::from)
}

/// A collection endpoint that can be walked page by page.
pub struct ListEndpoint<T> {
    client: ServiceClient,
    path: String,
    key: String,
    params: Vec<(&'static str, String)>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ListEndpoint<T> {
    /// Describe the collection at `path` whose records sit under `key`.
    #[must_use]
    pub fn new(
        client: ServiceClient,
        path: impl Into<String>,
        key: impl Into<String>,
        params: Vec<(&'static str, String)>,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            key: key.into(),
            params,
            _marker: PhantomData,
        }
    }

    /// Endpoint path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T> PageSource<T> for ListEndpoint<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>> {
        self.client
            .list_page(&self.path, &self.key, &request, &self.params)
            .await
    }
}
