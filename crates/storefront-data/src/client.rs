//! JSON-over-HTTP client for the catalog API.

use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client for the storefront API.
///
/// A thin wrapper around [`reqwest::Client`] that resolves paths against a
/// base URL, turns non-2xx answers into [`FetchError::HttpError`], and
/// decodes JSON bodies.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
}

impl FetchClient {
    /// Create a client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers: HeaderMap::new(),
        }
    }

    /// Add a header sent with every request. Invalid names or values are
    /// rejected.
    pub fn with_default_header(mut self, key: &str, value: &str) -> Result<Self, FetchError> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| FetchError::RequestError(format!("invalid header name: {}", e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::RequestError(format!("invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Resolve `path` and append `segment` as one percent-encoded path
    /// segment, so `/`, `?` and `#` in it stay part of the segment.
    pub fn url_with_segment(&self, path: &str, segment: &str) -> Result<String, FetchError> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|e| FetchError::RequestError(format!("invalid URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::RequestError("URL cannot take path segments".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url.into())
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self
            .http
            .get(self.url(path))
            .headers(self.default_headers.clone())
            .send()
            .await?;
        decode(response).await
    }

    /// POST `body` as JSON to `path` and decode the JSON answer.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let body = serde_json::to_vec(body)?;
        let response = self
            .http
            .post(self.url(path))
            .headers(self.default_headers.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(FetchError::HttpError {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::ParseError(e.to_string()))
}
