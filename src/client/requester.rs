//! The single HTTP entry point shared by every object the client produces.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::auth::Credential;
use crate::{Error, Result};

use super::links::PaginationLinks;
use super::params::Params;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful response: status, decoded body and pagination links.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code (always 2xx)
    pub status: u16,
    /// JSON body, or `Value::String` for non-JSON content, or `Value::Null`
    /// when the body was empty
    pub body: Value,
    /// Links from the `Link` header
    pub links: PaginationLinks,
}

impl RawResponse {
    /// Take the body, requiring a JSON object.
    pub fn into_object(self) -> Result<serde_json::Map<String, Value>> {
        match self.body {
            Value::Object(map) => Ok(map),
            other => Err(Error::UnexpectedPayload {
                expected: "object",
                found: value_kind(&other),
            }),
        }
    }

    /// Take the body, requiring a top-level JSON array.
    pub fn into_array(self) -> Result<Vec<Value>> {
        match self.body {
            Value::Array(items) => Ok(items),
            other => Err(Error::UnexpectedPayload {
                expected: "array",
                found: value_kind(&other),
            }),
        }
    }
}

/// Name of a JSON value's shape, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Performs authenticated calls against one fixed base URL.
///
/// Cloning is cheap and every clone shares the same transport and
/// connection pool. Hydrated objects each hold a clone so they can issue
/// follow-up requests relative to themselves.
#[derive(Clone)]
pub struct Requester {
    inner: Arc<RequesterInner>,
}

struct RequesterInner {
    base_url: String,
    authorization: HeaderValue,
    http: reqwest::Client,
    per_page: Option<u32>,
}

impl Requester {
    /// Create a requester for `base_url` (e.g. `https://canvas.example.edu/api/v1`).
    pub fn new(base_url: &str, credential: &Credential, http: reqwest::Client) -> Result<Self> {
        Self::with_per_page(base_url, credential, http, None)
    }

    /// Same as [`new`](Self::new), also requesting `per_page` items on the
    /// first page of every collection when set.
    pub(crate) fn with_per_page(
        base_url: &str,
        credential: &Credential,
        http: reqwest::Client,
        per_page: Option<u32>,
    ) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            inner: Arc::new(RequesterInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                authorization: credential.header_value()?,
                http,
                per_page,
            }),
        })
    }

    /// The base URL every relative path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(crate) fn per_page(&self) -> Option<u32> {
        self.inner.per_page
    }

    /// Check whether two handles share the same underlying requester.
    pub fn ptr_eq(&self, other: &Requester) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolve `path` against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
        }
    }

    /// Perform one HTTP call.
    ///
    /// Non-2xx statuses become [`Error::ResourceNotFound`],
    /// [`Error::Unauthorized`] or [`Error::RequestFailed`]; failures to reach
    /// the server become [`Error::Transport`]. Nothing is retried.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = self.resolve(path);
        tracing::debug!(%method, %url, "Sending request");

        let mut builder = self
            .inner
            .http
            .request(method.into(), &url)
            .header(AUTHORIZATION, self.inner.authorization.clone());
        if !params.is_empty() {
            builder = builder.query(params.as_slice());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let links = PaginationLinks::from_headers(response.headers());
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));
        let text = response.text().await?;

        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");

        if status.is_success() {
            let body = if text.trim().is_empty() {
                Value::Null
            } else if is_json {
                serde_json::from_str(&text)?
            } else {
                Value::String(text)
            };
            return Ok(RawResponse {
                status: status.as_u16(),
                body,
                links,
            });
        }

        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        tracing::warn!(%method, %url, status = status.as_u16(), "Request failed");
        Err(Error::from_status(status.as_u16(), body))
    }

    /// GET with query parameters.
    pub async fn get(&self, path: &str, params: &Params) -> Result<RawResponse> {
        self.request(Method::Get, path, params, None).await
    }

    /// POST a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<RawResponse> {
        self.request(Method::Post, path, &Params::new(), Some(body)).await
    }

    /// PUT a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<RawResponse> {
        self.request(Method::Put, path, &Params::new(), Some(body)).await
    }

    /// DELETE with query parameters.
    pub async fn delete(&self, path: &str, params: &Params) -> Result<RawResponse> {
        self.request(Method::Delete, path, params, None).await
    }
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester")
            .field("base_url", &self.inner.base_url)
            .field("per_page", &self.inner.per_page)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn requester(base: &str) -> Requester {
        Requester::new(base, &Credential::new("t"), reqwest::Client::new()).unwrap()
    }

    #[test]
    fn test_resolve_relative_paths() {
        let r = requester("https://host/api/v1/");
        assert_eq!(r.resolve("courses/1"), "https://host/api/v1/courses/1");
        assert_eq!(r.resolve("/courses/1"), "https://host/api/v1/courses/1");
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let r = requester("https://host/api/v1");
        let next = "https://other/api/v1/courses/1/users?page=2";
        assert_eq!(r.resolve(next), next);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Requester::new("not a url", &Credential::new("t"), reqwest::Client::new())
            .unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[test]
    fn test_clones_share_identity() {
        let a = requester("https://host/api/v1");
        let b = a.clone();
        let c = requester("https://host/api/v1");
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn test_per_page_is_recorded() {
        let r = Requester::with_per_page(
            "https://host/api/v1",
            &Credential::new("t"),
            reqwest::Client::new(),
            Some(25),
        )
        .unwrap();
        assert_eq!(r.per_page(), Some(25));

        let plain = requester("https://host/api/v1");
        assert_eq!(plain.per_page(), None);
    }

    #[test]
    fn test_per_page_survives_shared_handles() {
        let r = Requester::with_per_page(
            "https://host/api/v1",
            &Credential::new("t"),
            reqwest::Client::new(),
            Some(10),
        )
        .unwrap();
        let copy = r.clone();
        assert_eq!(copy.per_page(), Some(10));
        assert!(copy.ptr_eq(&r));
    }

    #[test]
    fn test_raw_response_shape_checks() {
        let response = RawResponse {
            status: 200,
            body: json!({"id": 1}),
            links: PaginationLinks::default(),
        };
        let err = response.clone().into_array().unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedPayload { expected: "array", found: "object" }
        ));
        assert_eq!(response.into_object().unwrap()["id"], 1);
    }
}
