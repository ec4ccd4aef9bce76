//! pyx-publish: GitHub Actions adapter for the pyx Trusted Publishing exchange
//!
//! Resolves the registry upload URL from the action's inputs, runs the
//! exchange against the registry, and surfaces the minted token as a step
//! output. Uses a single-threaded tokio runtime (compatible with core's
//! !Send async traits).

use std::path::Path;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use pyx_publish_core::exchange;
use pyx_publish_core::upload_url::UploadUrl;

mod platform;
mod pyproject;
mod workflow;

use platform::{ActionsOidcProvider, ReqwestHttpClient, WorkflowMasker};

fn die(msg: &str) -> ! {
    workflow::error(msg);
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let index = workflow::get_input("index");
    let workspace = workflow::get_input("workspace");
    let registry = workflow::get_input("registry");
    let raw_url = workflow::get_input("url");

    let Some(api_base) = workflow::get_input("internal-api-base") else {
        // The action metadata defaults this input; its absence means the
        // action was invoked outside its intended wrapper.
        die("'internal-api-base' should have a default value");
    };

    // index, workspace/registry, and url are mutually exclusive.
    let exclusive = [index.is_some(), workspace.is_some(), raw_url.is_some()];
    if exclusive.iter().filter(|set| **set).count() != 1 {
        die("Specify exactly one of 'index', 'workspace'/'registry', or 'url'");
    }

    let upload_url = if let Some(index) = &index {
        match pyproject::publish_url_for_index(Path::new("."), index) {
            Ok(url) => url,
            Err(e) => die(&format!("Can't discover upload URL for index '{index}': {e}")),
        }
    } else if let Some(raw_url) = raw_url {
        raw_url
    } else if let Some(workspace) = &workspace {
        let Some(registry) = &registry else {
            die("'registry' is required when 'workspace' is specified");
        };
        build_upload_url(&api_base, workspace, registry)
    } else {
        die("Specify exactly one of 'index', 'workspace'/'registry', or 'url'");
    };

    workflow::debug(&format!("Using upload URL: {upload_url}"));

    let upload_url = match UploadUrl::parse(&upload_url) {
        Ok(url) => url,
        Err(e) => die(&e.to_string()),
    };

    let http = ReqwestHttpClient::new();
    let credentials = ActionsOidcProvider::new();
    let masker = WorkflowMasker;

    let start = Instant::now();
    let outcome = match exchange::exchange(upload_url, &http, &credentials, &masker).await {
        Ok(outcome) => outcome,
        Err(e) => die(&e.to_string()),
    };
    let duration = start.elapsed().as_secs_f64();

    workflow::notice(&format!("✨ Successfully exchanged token in {duration:.4}s"));

    if let Err(e) = workflow::set_output("url", outcome.upload_url.as_str()) {
        die(&format!("failed to write step output: {e}"));
    }
    if let Err(e) = workflow::set_output("token", &outcome.token.token) {
        die(&format!("failed to write step output: {e}"));
    }
}

/// Build an upload URL from the API base and explicit workspace/registry inputs
fn build_upload_url(api_base: &str, workspace: &str, registry: &str) -> String {
    format!(
        "{}/v1/upload/{}/{}",
        api_base.trim_end_matches('/'),
        workspace,
        registry
    )
}
