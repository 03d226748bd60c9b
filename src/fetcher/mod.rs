//! Request/response seam between list controllers and the REST backend.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use errors::{FetchError, FetchResult};

/// Response header carrying the row count of the whole filtered listing.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of a single request. Auth headers are attached unless disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: Method,
    pub body: Option<Value>,
    pub params: Vec<(String, String)>,
    pub include_auth: bool,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            method: Method::Get,
            body: None,
            params: Vec::new(),
            include_auth: true,
        }
    }
}

impl FetchRequest {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Self::default()
        }
    }

    /// Request with a JSON body serialized from `body`.
    pub fn with_json<B: Serialize + ?Sized>(method: Method, body: &B) -> FetchResult<Self> {
        Ok(Self {
            method,
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    pub fn params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.include_auth = false;
        self
    }

    /// First value of the named query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchResponse {
    pub status: u16,
    /// Header names are lower-case.
    pub headers: HashMap<String, String>,
    /// JSON body; `Value::Null` when the response had none.
    pub body: Value,
}

impl FetchResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Total row count from `x-total-count`. Missing or unparseable values count as zero.
    pub fn total_count(&self) -> u64 {
        self.header(TOTAL_COUNT_HEADER)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }
}

/// Performs one HTTP exchange against the backend.
///
/// Implementations own transport concerns (base URL, headers, timeouts);
/// callers only see the decoded response or a [`FetchError`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, request: FetchRequest) -> FetchResult<FetchResponse>;
}
