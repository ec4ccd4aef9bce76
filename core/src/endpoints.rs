//! Registry endpoint derivation
//!
//! The audience and mint endpoints live on the upload URL's origin with
//! fixed/templated paths. Both are recomputed per exchange and carry no
//! query or fragment from the original URL.

use url::Url;

use crate::error::{ExchangeError, Result};
use crate::upload_url::UploadUrl;

/// Fixed path of the audience discovery endpoint
pub const AUDIENCE_PATH: &str = "/v1/trusted-publishing/audience";

/// Audience discovery endpoint for an upload URL's registry
pub fn audience_endpoint(upload: &UploadUrl) -> Url {
    let mut url = upload.as_url().clone();
    url.set_path(AUDIENCE_PATH);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Token mint endpoint for an upload URL's workspace and registry.
///
/// The upload path must be exactly `/v1/upload/{workspace}/{registry}`
/// with both segments non-empty; any other shape is a
/// `MalformedUploadPath` error, raised before any request is attempted.
pub fn mint_endpoint(upload: &UploadUrl) -> Result<Url> {
    let path = upload.as_url().path();
    let parts: Vec<&str> = path.split('/').collect();

    let (workspace, registry) = match parts.as_slice() {
        ["", "v1", "upload", workspace, registry]
            if !workspace.is_empty() && !registry.is_empty() =>
        {
            (*workspace, *registry)
        }
        _ => return Err(ExchangeError::malformed_upload_path(path)),
    };

    let mut url = upload.as_url().clone();
    url.set_path(&format!(
        "/v1/trusted-publishing/{}/{}/mint-token",
        workspace, registry
    ));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
