//! Mock implementations of platform traits for testing

use async_trait::async_trait;
use std::sync::Mutex;

use crate::platform::{
    CredentialError, CredentialProvider, HttpClient, HttpResponse, Masker, TransportError,
};

/// A request observed by [`MockHttp`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: String,
}

/// Mock HTTP client with pre-configured responses, keyed by URL substring.
///
/// A request whose URL matches no pattern fails at the transport level,
/// which doubles as the way to simulate an unreachable registry.
pub struct MockHttp {
    responses: Vec<(&'static str, u16, Vec<u8>)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttp {
    pub fn new(responses: Vec<(&'static str, u16, Vec<u8>)>) -> Self {
        Self {
            responses,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests issued so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(
        &self,
        method: &'static str,
        url: &str,
        body: String,
    ) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
        });

        for (pattern, status, body) in &self.responses {
            if url.contains(pattern) {
                return Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                });
            }
        }
        Err(TransportError(format!(
            "connection refused (no mock response for {} {})",
            method, url
        )))
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttp {
    async fn get(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        self.respond("GET", url, String::new())
    }

    async fn post(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        self.respond("POST", url, String::from_utf8_lossy(body).into_owned())
    }
}

/// Canned credential provider: a fixed token, no token, or a provider error
pub struct StaticCredentials {
    outcome: Result<Option<String>, String>,
    audiences: Mutex<Vec<String>>,
}

impl StaticCredentials {
    pub fn token(token: &str) -> Self {
        Self {
            outcome: Ok(Some(token.to_string())),
            audiences: Mutex::new(Vec::new()),
        }
    }

    pub fn absent() -> Self {
        Self {
            outcome: Ok(None),
            audiences: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            audiences: Mutex::new(Vec::new()),
        }
    }

    /// Audiences the orchestrator asked for, in order
    pub fn requested_audiences(&self) -> Vec<String> {
        self.audiences.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl CredentialProvider for StaticCredentials {
    async fn obtain(&self, audience: &str) -> Result<Option<String>, CredentialError> {
        self.audiences.lock().unwrap().push(audience.to_string());
        match &self.outcome {
            Ok(token) => Ok(token.clone()),
            Err(message) => Err(CredentialError(message.clone())),
        }
    }
}

/// Masker that records every value it was asked to hide
pub struct RecordingMasker {
    masked: Mutex<Vec<String>>,
}

impl RecordingMasker {
    pub fn new() -> Self {
        Self {
            masked: Mutex::new(Vec::new()),
        }
    }

    pub fn masked(&self) -> Vec<String> {
        self.masked.lock().unwrap().clone()
    }
}

impl Masker for RecordingMasker {
    fn mask(&self, value: &str) {
        self.masked.lock().unwrap().push(value.to_string());
    }
}
