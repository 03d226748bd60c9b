//! reqwest-backed [`Fetcher`] talking to the back-office API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::auth::AuthContext;
use crate::fetcher::{FetchError, FetchRequest, FetchResponse, FetchResult, Fetcher, Method};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest raw error body quoted in a [`FetchError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

pub struct HttpFetcher {
    base_url: Url,
    auth: AuthContext,
    http: HttpClient,
}

impl HttpFetcher {
    /// Creates a fetcher resolving relative endpoints against `base_url`.
    pub fn new(base_url: &str, auth: AuthContext, timeout: Duration) -> FetchResult<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let http = HttpClient::builder()
            .user_agent(concat!("backoffice-console/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url,
            auth,
            http,
        })
    }

    /// Absolute URLs pass through; paths are appended to the base URL,
    /// keeping any path prefix it carries (e.g. `/api/v1`).
    pub fn resolve(&self, endpoint: &str) -> FetchResult<Url> {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return Ok(Url::parse(endpoint)?);
        }

        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Best-effort human readable message from an error response body.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorResponse {
        message: Option<String>,
        error: Option<String>,
        detail: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_slice::<ErrorResponse>(body) {
        if let Some(message) = parsed.message.or(parsed.detail).or(parsed.error) {
            return message;
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    text.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, request: FetchRequest) -> FetchResult<FetchResponse> {
        let url = self.resolve(url)?;
        log::debug!("{} {url} params={:?}", request.method, request.params);

        let mut builder = self.http.request(to_reqwest_method(request.method), url);

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        for (name, value) in self.auth.headers(request.include_auth) {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(status, &bytes),
            });
        }

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(FetchResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .finish()
    }
}
