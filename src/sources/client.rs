//! Shared reqwest client bound to the configured backend.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiError, Result};
use crate::config::{Settings, normalize_base_url};

/// HTTP client for the wallpaper backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    mobile_filter: bool,
}

impl ApiClient {
    /// What: Build a client from settings.
    ///
    /// Inputs:
    /// - `settings`: Backend URL, timeouts and the mobile-filter switch.
    ///
    /// Output:
    /// - Configured client with JSON `Accept` header and an `upwall/<version>` user agent.
    ///
    /// # Errors
    /// - `Transport` when the TLS backend cannot be initialised.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout())
            .user_agent(format!("upwall/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(&settings.backend_url),
            mobile_filter: settings.mobile_filter,
        })
    }

    /// Backend base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether public listings are passed through the mobile filter.
    #[must_use]
    pub const fn mobile_filter(&self) -> bool {
        self.mobile_filter
    }

    /// Underlying reqwest client, for requests outside the backend (image downloads).
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Absolute URL for a backend path starting with `/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Start a GET request, attaching the bearer token when given.
    pub(crate) fn get(&self, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        with_token(self.http.get(self.url(path)), token)
    }

    /// Start a POST request, attaching the bearer token when given.
    pub(crate) fn post(&self, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        with_token(self.http.post(self.url(path)), token)
    }

    /// Start a DELETE request with the bearer token.
    pub(crate) fn delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.http.delete(self.url(path)).bearer_auth(token)
    }

    /// What: Send a request and parse the JSON body.
    ///
    /// Inputs:
    /// - `request`: Prepared request.
    /// - `label`: Short name used in log lines.
    ///
    /// Output:
    /// - Parsed body; `Value::Null` for an empty success body.
    ///
    /// # Errors
    /// - `Transport` when sending or reading fails.
    /// - `Status` for non-success codes, carrying the body's `message` when present.
    /// - `Malformed` when a success body is not JSON.
    pub(crate) async fn send_json(&self, request: reqwest::RequestBuilder, label: &str) -> Result<Value> {
        let resp = request.send().await.map_err(|e| {
            warn!(endpoint = label, error = %e, "[Api] request failed");
            ApiError::from(e)
        })?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(endpoint = label, status = status.as_u16(), bytes = body.len(), "[Api] response received");
        if !status.is_success() {
            let preview: String = body.chars().take(300).collect();
            warn!(endpoint = label, status = status.as_u16(), preview = preview, "[Api] non-success status");
            return Err(status_error(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn with_token(request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
    match token {
        Some(t) => request.bearer_auth(t),
        None => request,
    }
}

/// What: Build the error for a non-success response.
///
/// Inputs:
/// - `status`: HTTP status code.
/// - `body`: Raw response body.
///
/// Output:
/// - `ApiError::Status` with the body's non-empty `message`, else `HTTP error! status: <code>`.
#[must_use]
pub fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| crate::util::ss(&v, &["message", "error"]))
        .unwrap_or_else(|| format!("HTTP error! status: {status}"));
    ApiError::Status { status, message }
}
