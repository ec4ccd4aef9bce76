//! Trusted publishing exchange orchestration
//!
//! Linear sequence: audience discovery, ambient credential lookup, token
//! minting. Every step either advances or terminates the exchange with a
//! single explained error; there is no partial-success result and no
//! retry at any step.

use http::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client;
use crate::endpoints;
use crate::error::{ExchangeError, Result};
use crate::platform::{CredentialProvider, HttpClient, Masker};
use crate::upload_url::UploadUrl;

/// Successful exchange result: the normalized upload URL plus the minted token
#[derive(Debug)]
pub struct ExchangeOutcome {
    pub upload_url: UploadUrl,
    pub token: RegistryToken,
}

/// Short-lived registry credential returned by the mint endpoint
#[derive(Deserialize)]
pub struct RegistryToken {
    pub token: String,
    /// Expiry as epoch seconds
    pub expires: u64,
}

impl std::fmt::Debug for RegistryToken {
    // The token value is a secret; keep it out of debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryToken")
            .field("token", &"<masked>")
            .field("expires", &self.expires)
            .finish()
    }
}

#[derive(Deserialize)]
struct AudienceResponse {
    audience: String,
}

/// Perform the full trusted publishing exchange against the registry that
/// owns `upload_url`.
///
/// The minted token value is passed to `masker` before this function
/// returns, so no later diagnostic output can echo it in cleartext.
pub async fn exchange(
    upload_url: UploadUrl,
    http: &dyn HttpClient,
    credentials: &dyn CredentialProvider,
    masker: &dyn Masker,
) -> Result<ExchangeOutcome> {
    debug!(url = %upload_url, "starting trusted publishing exchange");

    let audience = resolve_audience(&upload_url, http).await?;
    debug!(%audience, "registry expects audience");

    let id_token = credentials
        .obtain(&audience)
        .await
        .map_err(|e| ExchangeError::oidc_discovery(e.to_string()))?
        .ok_or(ExchangeError::OidcMissingToken)?;

    let token = mint_token(&upload_url, &id_token, http).await?;

    // Mask before returning so nothing downstream can log the value.
    masker.mask(&token.token);

    Ok(ExchangeOutcome { upload_url, token })
}

/// Ask the registry which OIDC audience it expects
async fn resolve_audience(upload_url: &UploadUrl, http: &dyn HttpClient) -> Result<String> {
    let audience_url = endpoints::audience_endpoint(upload_url);
    debug!(%audience_url, "using audience URL");

    let response: AudienceResponse = client::request(http, Method::GET, &audience_url, None)
        .await
        .map_err(|source| ExchangeError::AudienceDiscovery { source })?;

    Ok(response.audience)
}

/// Exchange the identity token for a registry token
async fn mint_token(
    upload_url: &UploadUrl,
    id_token: &str,
    http: &dyn HttpClient,
) -> Result<RegistryToken> {
    let mint_url = endpoints::mint_endpoint(upload_url)?;
    debug!(%mint_url, "using token mint URL");

    client::request(http, Method::POST, &mint_url, Some(&json!({ "token": id_token })))
        .await
        .map_err(|source| ExchangeError::MintToken { source })
}
