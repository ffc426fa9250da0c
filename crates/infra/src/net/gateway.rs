//! Blocking JSON-over-HTTP gateway to the Cloud Controller API.
//!
//! Every call returns either decoded data or an [`ApiResponse`] describing
//! why it failed. The gateway never panics on remote failures and performs no
//! retries.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use cfctl_auth::{AccessToken, Configuration};

use crate::net::ApiResponse;

/// Request timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Error body returned by the Cloud Controller on non-2xx answers.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

/// HTTP client bound to one API endpoint and one bearer token.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl Gateway {
    pub fn new(config: &Configuration) -> Result<Self, GatewayError> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(config: &Configuration, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cfctl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            token: config.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET` a path and decode the JSON body.
    pub fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiResponse>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(path)).query(query);
        let response = self.send("GET", path, request)?;

        response
            .json::<T>()
            .map_err(|e| ApiResponse::with_error("Invalid JSON response from server", e))
    }

    /// `PUT` a JSON body; only the status matters.
    pub fn put_json<B>(&self, path: &str, body: &B) -> ApiResponse
    where
        B: Serialize + ?Sized,
    {
        let request = self.client.put(self.url(path)).json(body);
        into_response(self.send("PUT", path, request))
    }

    /// `PUT` without a body (association endpoints).
    pub fn put(&self, path: &str) -> ApiResponse {
        let request = self.client.put(self.url(path));
        into_response(self.send("PUT", path, request))
    }

    pub fn delete(&self, path: &str, query: &[(&str, &str)]) -> ApiResponse {
        let request = self.client.delete(self.url(path)).query(query);
        into_response(self.send("DELETE", path, request))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<Response, ApiResponse> {
        let request = if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(self.token.credential())
        };

        tracing::debug!(method, path, "sending request");

        let response = request.send().map_err(|e| {
            tracing::warn!(method, path, error = %e, "request failed");
            ApiResponse::with_error("Error performing request", e)
        })?;

        let status = response.status();
        tracing::debug!(method, path, status = status.as_u16(), "received response");

        if status.is_success() {
            return Ok(response);
        }

        Err(classify_failure(status.as_u16(), response.text().unwrap_or_default()))
    }
}

fn into_response(result: Result<Response, ApiResponse>) -> ApiResponse {
    match result {
        Ok(_) => ApiResponse::success(),
        Err(failure) => failure,
    }
}

/// Turn a non-2xx answer into an `ApiResponse::Error` carrying the status.
pub(crate) fn classify_failure(status: u16, body: String) -> ApiResponse {
    let parsed = serde_json::from_str::<ErrorBody>(&body).ok();

    let error_code = parsed.as_ref().and_then(|b| {
        b.error_code
            .clone()
            .or_else(|| b.code.as_ref().map(|c| c.to_string().trim_matches('"').to_string()))
    });

    let description = parsed
        .and_then(|b| b.description)
        .filter(|d| !d.trim().is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()));

    let message = match (&error_code, description) {
        (Some(code), Some(desc)) => {
            format!("Server error, status code: {status}, error code: {code}, message: {desc}")
        }
        (None, Some(desc)) => format!("Server error, status code: {status}, message: {desc}"),
        (_, None) => format!("Server error, status code: {status}"),
    };

    tracing::warn!(status, "server returned an error");
    ApiResponse::with_status(message, status, error_code)
}
