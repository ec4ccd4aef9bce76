//! GitHub Actions platform implementations
//!
//! Implements the core platform traits for an Actions runner:
//! - HttpClient: reqwest
//! - CredentialProvider: the runner's OIDC token endpoint
//! - Masker: `::add-mask::` workflow command

use async_trait::async_trait;
use serde::Deserialize;
use std::env;

use pyx_publish_core::platform::{
    CredentialError, CredentialProvider, HttpClient, HttpResponse, Masker, TransportError,
};

use crate::workflow;

/// reqwest-based HTTP client
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(url);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(format!("HTTP GET failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("failed to read response: {e}")))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }

    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(url).body(body.to_vec());
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(format!("HTTP POST failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("failed to read response: {e}")))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// Ambient OIDC credential discovery on a GitHub Actions runner.
///
/// Outside Actions, or on a runner that was not granted the
/// `id-token: write` permission, there is no token to obtain; that is
/// reported as "no credential" rather than an error. Failures of the
/// runner's own token endpoint are provider errors.
pub struct ActionsOidcProvider {
    client: reqwest::Client,
}

impl ActionsOidcProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct IdTokenResponse {
    value: String,
}

#[async_trait(?Send)]
impl CredentialProvider for ActionsOidcProvider {
    async fn obtain(&self, audience: &str) -> Result<Option<String>, CredentialError> {
        if env::var("GITHUB_ACTIONS").map_or(true, |v| v != "true") {
            return Ok(None);
        }

        // Both are injected by the runner only when the job has the
        // `id-token: write` permission.
        let (Ok(request_url), Ok(request_token)) = (
            env::var("ACTIONS_ID_TOKEN_REQUEST_URL"),
            env::var("ACTIONS_ID_TOKEN_REQUEST_TOKEN"),
        ) else {
            return Ok(None);
        };

        let response = self
            .client
            .get(&request_url)
            .query(&[("audience", audience)])
            .bearer_auth(&request_token)
            .send()
            .await
            .map_err(|e| CredentialError(format!("OIDC token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CredentialError(format!(
                "OIDC token request returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let body: IdTokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError(format!("invalid OIDC token response: {e}")))?;

        if body.value.is_empty() {
            return Ok(None);
        }
        Ok(Some(body.value))
    }
}

/// Masker that emits `::add-mask::` workflow commands
pub struct WorkflowMasker;

impl Masker for WorkflowMasker {
    fn mask(&self, value: &str) {
        workflow::add_mask(value);
    }
}
