//! Error types for the trusted publishing exchange

use thiserror::Error;

use crate::problem::Problem;

/// Result type alias for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Failure of a single HTTP request/response cycle.
///
/// The three variants are disjoint: a request either never produced an HTTP
/// response, produced a non-success response, or produced a success response
/// whose body did not decode as the expected shape.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("request could not be completed ({message}); the registry may be down or unreachable from this runner")]
    Transport { message: String },

    #[error("registry reported {problem}")]
    Protocol { problem: Problem },

    #[error("response body did not match the expected shape ({message}); this is likely a registry bug")]
    Payload { message: String },
}

/// Terminal exchange error with a user-facing narrative per failure kind
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("invalid upload URL '{url}': {reason} (expected https://HOST/v1/upload/WORKSPACE/REGISTRY)")]
    InvalidUploadUrl { url: String, reason: String },

    #[error("unexpected upload URL path '{path}': expected /v1/upload/WORKSPACE/REGISTRY")]
    MalformedUploadPath { path: String },

    #[error("failed to retrieve expected audience from registry: {source}")]
    AudienceDiscovery { source: RequestError },

    #[error("OIDC credential discovery failed: {message}")]
    OidcDiscovery { message: String },

    #[error("no ambient OIDC token available; the workflow likely lacks the 'id-token: write' permission or runs from a trigger that does not allow OIDC")]
    OidcMissingToken,

    #[error("failed to mint registry token: {source}")]
    MintToken { source: RequestError },
}

impl ExchangeError {
    pub fn invalid_upload_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUploadUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_upload_path(path: impl Into<String>) -> Self {
        Self::MalformedUploadPath { path: path.into() }
    }

    pub fn oidc_discovery(message: impl Into<String>) -> Self {
        Self::OidcDiscovery {
            message: message.into(),
        }
    }
}
