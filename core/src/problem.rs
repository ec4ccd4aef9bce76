//! RFC 9457-style problem decoding
//!
//! Registries report failures as `application/problem+json` bodies, but a
//! degraded registry (or an intermediary) may answer with plain text or an
//! HTML error page. Decoding therefore never fails; missing fields are
//! defaulted from the HTTP status line.

use std::fmt;

use serde::Deserialize;

fn default_problem_type() -> String {
    "about:blank".to_string()
}

/// Structured description of an HTTP-level failure reported by the registry
#[derive(Debug, Clone, Deserialize)]
pub struct Problem {
    #[serde(rename = "type", default = "default_problem_type")]
    pub problem_type: String,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
}

impl Problem {
    /// Decode a non-success response body into a Problem.
    ///
    /// On parse failure the result is a synthetic Problem carrying the
    /// parse error as its detail; `status` and `title` are filled from the
    /// triggering response's status line when the body omits them.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let mut problem = match serde_json::from_slice::<Problem>(body) {
            Ok(problem) => problem,
            Err(e) => Problem {
                problem_type: default_problem_type(),
                status: None,
                title: Some("Unknown Error".to_string()),
                detail: Some(e.to_string()),
                instance: None,
            },
        };

        problem.status.get_or_insert(status);
        if problem.title.is_none() {
            problem.title = Some(
                reason_phrase(status)
                    .unwrap_or("Unknown Error")
                    .to_string(),
            );
        }
        problem
    }
}

/// Standard reason phrase for a status code, if it has one
fn reason_phrase(status: u16) -> Option<&'static str> {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}", status)?,
            None => write!(f, "an error")?,
        }
        if let Some(title) = &self.title {
            write!(f, ": {}", title)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}
