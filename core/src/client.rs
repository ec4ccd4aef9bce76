//! Typed request execution
//!
//! A single generic request function serves both protocol endpoints: the
//! caller names the expected success-response shape and gets back exactly
//! one of the three failure classifications on error. One request per
//! call, no retries.

use http::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::RequestError;
use crate::platform::HttpClient;
use crate::problem::Problem;

const USER_AGENT: &str = concat!("pyx-publish/", env!("CARGO_PKG_VERSION"));

/// Perform one HTTP request and decode the success body as `T`.
///
/// Failures are classified disjointly: `Transport` when no HTTP response
/// was received, `Protocol` for a non-success status (body decoded as a
/// Problem), `Payload` for a success status whose body does not decode
/// as `T`.
pub async fn request<T: DeserializeOwned>(
    http: &dyn HttpClient,
    method: Method,
    url: &Url,
    body: Option<&serde_json::Value>,
) -> Result<T, RequestError> {
    let headers = [
        ("Accept", "application/json"),
        ("Content-Type", "application/json"),
        ("User-Agent", USER_AGENT),
    ];

    debug!(%method, %url, "sending registry request");

    let result = if method == Method::POST {
        let bytes = body.map(|b| b.to_string().into_bytes()).unwrap_or_default();
        http.post(url.as_str(), &headers, &bytes).await
    } else {
        http.get(url.as_str(), &headers).await
    };

    let response = result.map_err(|e| RequestError::Transport {
        message: e.to_string(),
    })?;

    if !response.is_success() {
        return Err(RequestError::Protocol {
            problem: Problem::from_response(response.status, &response.body),
        });
    }

    response.json().map_err(|e| RequestError::Payload {
        message: e.to_string(),
    })
}
