//! Upload URL discovery from a project manifest
//!
//! The `index` input names a `[[tool.uv.index]]` entry in the project's
//! `pyproject.toml`; the entry's `publish-url` is the upload URL.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("pyproject.toml not found")]
    ManifestMissing,

    #[error("failed to parse pyproject.toml: {0}")]
    ManifestInvalid(String),

    #[error("index '{0}' not found in pyproject.toml")]
    IndexMissing(String),

    #[error("index '{0}' does not have a 'publish-url'")]
    PublishUrlMissing(String),

    #[error("index '{0}' has an invalid 'publish-url'")]
    PublishUrlInvalid(String),
}

#[derive(Deserialize, Default)]
struct PyProject {
    #[serde(default)]
    tool: Tool,
}

#[derive(Deserialize, Default)]
struct Tool {
    #[serde(default)]
    uv: Uv,
}

#[derive(Deserialize, Default)]
struct Uv {
    #[serde(default)]
    index: Vec<Index>,
}

#[derive(Deserialize)]
struct Index {
    #[serde(default)]
    name: Option<String>,
    // Kept as a raw value so a non-string `publish-url` is reported as
    // invalid rather than failing the whole manifest parse.
    #[serde(default, rename = "publish-url")]
    publish_url: Option<toml::Value>,
}

/// Resolve the publish URL of the named index from `dir/pyproject.toml`
pub fn publish_url_for_index(dir: &Path, index: &str) -> Result<String, DiscoveryError> {
    let path = dir.join("pyproject.toml");
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DiscoveryError::ManifestMissing)
        }
        Err(e) => return Err(DiscoveryError::ManifestInvalid(e.to_string())),
    };

    let pyproject: PyProject =
        toml::from_str(&raw).map_err(|e| DiscoveryError::ManifestInvalid(e.to_string()))?;

    let entry = pyproject
        .tool
        .uv
        .index
        .into_iter()
        .find(|i| i.name.as_deref() == Some(index))
        .ok_or_else(|| DiscoveryError::IndexMissing(index.to_string()))?;

    match entry.publish_url {
        Some(toml::Value::String(url)) => Ok(url),
        Some(_) => Err(DiscoveryError::PublishUrlInvalid(index.to_string())),
        None => Err(DiscoveryError::PublishUrlMissing(index.to_string())),
    }
}
