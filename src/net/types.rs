//! Wire-level DTOs for the identity service boundary.
//!
//! DESIGN
//! ======
//! Response bodies are kept as raw text at the transport layer and decoded
//! here, so a body that fails to parse is a distinct, testable outcome rather
//! than a transport failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::Deserialize;

pub const PROBE_PATH: &str = "/user/me";
pub const LOGIN_PATH: &str = "/auth";
pub const SIGNUP_PATH: &str = "/user";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Outgoing request as handed to a `Transport`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Full `Authorization` header value, e.g. `Bearer abc`.
    pub authorization: String,
    /// JSON body, if any.
    pub body: Option<String>,
}

/// Completed HTTP exchange: status plus undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Successful `/auth` body.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body returned by the identity service on non-2xx responses.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}
