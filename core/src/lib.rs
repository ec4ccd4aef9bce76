//! pyx-publish-core: Platform-agnostic core logic for the pyx Trusted Publishing exchange
//!
//! This crate contains all protocol logic for deriving registry endpoints from an
//! upload URL, discovering the registry's expected OIDC audience, and exchanging an
//! ambient identity token for a short-lived registry publish token. It depends only
//! on abstract platform traits (HttpClient, CredentialProvider, Masker) and never
//! imports platform-specific code.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod exchange;
pub mod platform;
pub mod problem;
pub mod upload_url;

#[cfg(test)]
pub mod test_support;
