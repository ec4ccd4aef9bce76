//! Platform abstraction traits
//!
//! These traits define the boundary between the exchange protocol and its
//! host environment (GitHub Actions runner, tests, other CI platforms).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Transport-level failure: the request never produced an HTTP response
/// (DNS, TCP, TLS, timeout).
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Failure of the ambient credential provider itself, distinct from the
/// provider succeeding but finding no token.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct CredentialError(pub String);

/// HTTP client for outbound requests (audience discovery, token minting)
#[async_trait(?Send)]
pub trait HttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError>;
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, TransportError>;
}

/// HTTP response from an outbound request
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status line reports success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Ambient OIDC credential discovery.
///
/// `obtain` returns `Ok(None)` when the environment offers no identity token
/// for the given audience; provider-level failures (the platform's token
/// endpoint misbehaving) are `Err` instead.
#[async_trait(?Send)]
pub trait CredentialProvider {
    async fn obtain(&self, audience: &str) -> Result<Option<String>, CredentialError>;
}

/// Sink for secret values that must never appear in diagnostic output.
///
/// The orchestrator calls this with the minted registry token before the
/// token is returned to the caller.
pub trait Masker {
    fn mask(&self, value: &str);
}
