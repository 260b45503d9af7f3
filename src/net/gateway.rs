//! Auth gateway: the three identity-service calls and their outcomes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dialogs and the root component call into `AuthGateway`; it attaches the
//! persisted bearer token to every request (login and signup included),
//! stores the token issued by a successful login, and turns every failure
//! into a `FormError`. Session transitions are returned as `SessionEvent`s
//! for the caller to fold into its `SessionState`.
//!
//! ERROR HANDLING
//! ==============
//! Rejections surface the service's `message` verbatim. Malformed bodies and
//! transport failures both collapse into the operation's fallback text, so
//! nothing past this module ever sees a `GatewayError`.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use serde::Serialize;

use super::transport::{Transport, TransportError};
use super::types::{
    ErrorResponse, HttpRequest, HttpResponse, LOGIN_PATH, Method, PROBE_PATH, SIGNUP_PATH, TokenResponse,
};
use crate::config::ClientConfig;
use crate::state::form::{Credentials, FormError};
use crate::state::session::SessionEvent;
use crate::util::token_storage::{TokenStorage, bearer_header};

pub const LOGIN_FALLBACK: &str = "There was a problem logging in";
pub const SIGNUP_FALLBACK: &str = "There was a problem signing up";

/// Submission operations that can fail with a user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Signup,
}

impl Operation {
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Login => LOGIN_FALLBACK,
            Self::Signup => SIGNUP_FALLBACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("malformed response body (status {status})")]
    MalformedResponse { status: u16 },
}

impl GatewayError {
    /// User-facing message for this failure of `op`.
    #[must_use]
    pub fn into_form_error(self, op: Operation) -> FormError {
        match self {
            Self::Rejected { message, .. } => FormError(message),
            Self::Transport(_) | Self::MalformedResponse { .. } => FormError::new(op.fallback_message()),
        }
    }
}

/// Session decision for a probe outcome: anything but a 401 counts as a live session.
#[must_use]
pub fn probe_authenticated(result: &Result<HttpResponse, TransportError>) -> bool {
    matches!(result, Ok(resp) if resp.status != 401)
}

/// Decode a non-2xx response into a rejection carrying the service's message.
fn rejection(resp: &HttpResponse) -> GatewayError {
    match serde_json::from_str::<ErrorResponse>(&resp.body) {
        Ok(body) => GatewayError::Rejected {
            status: resp.status,
            message: body.message,
        },
        Err(_) => GatewayError::MalformedResponse { status: resp.status },
    }
}

/// Extract the issued token from a login response.
///
/// # Errors
///
/// Returns `Rejected` or `MalformedResponse` for non-2xx responses, and
/// `MalformedResponse` for a 2xx body without a `token`.
pub fn interpret_login(resp: &HttpResponse) -> Result<String, GatewayError> {
    if !resp.is_success() {
        return Err(rejection(resp));
    }
    serde_json::from_str::<TokenResponse>(&resp.body)
        .map(|body| body.token)
        .map_err(|_| GatewayError::MalformedResponse { status: resp.status })
}

/// Accept any 2xx signup response; the body is not read.
///
/// # Errors
///
/// Returns `Rejected` or `MalformedResponse` for non-2xx responses.
pub fn interpret_signup(resp: &HttpResponse) -> Result<(), GatewayError> {
    if resp.is_success() { Ok(()) } else { Err(rejection(resp)) }
}

/// Session transition implied by a finished login.
#[must_use]
pub fn login_event(result: &Result<(), FormError>) -> SessionEvent {
    match result {
        Ok(()) => SessionEvent::LoginSucceeded,
        Err(_) => SessionEvent::LoginFailed,
    }
}

/// Client for the identity service.
#[derive(Clone, Debug)]
pub struct AuthGateway<T, S> {
    config: ClientConfig,
    transport: T,
    storage: S,
}

impl<T: Transport, S: TokenStorage> AuthGateway<T, S> {
    pub fn new(config: ClientConfig, transport: T, storage: S) -> Self {
        Self {
            config,
            transport,
            storage,
        }
    }

    fn request(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: self.config.endpoint(path),
            authorization: bearer_header(self.storage.load().as_deref()),
            body,
        }
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpResponse, GatewayError> {
        let json = serde_json::to_string(body).map_err(|e| TransportError(e.to_string()))?;
        let request = self.request(Method::Post, path, Some(json));
        log::debug!("gateway: POST {}", request.url);
        Ok(self.transport.send(request).await?)
    }

    /// Ask the service whether the stored token still names a live session.
    pub async fn probe_session(&self) -> bool {
        let request = self.request(Method::Get, PROBE_PATH, None);
        log::debug!("gateway: GET {}", request.url);
        let result = self.transport.send(request).await;
        if let Err(e) = &result {
            log::warn!("gateway: session probe failed: {e}");
        }
        let authenticated = probe_authenticated(&result);
        log::info!("gateway: session probe resolved, authenticated={authenticated}");
        authenticated
    }

    /// Log in and persist the issued token.
    ///
    /// # Errors
    ///
    /// Returns the message to show beneath the login form; the caller should
    /// apply `login_event` either way.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), FormError> {
        let result = self
            .post_json(LOGIN_PATH, credentials)
            .await
            .and_then(|resp| interpret_login(&resp));
        match result {
            Ok(token) => {
                self.storage.save(&token);
                log::info!("gateway: login succeeded");
                Ok(())
            }
            Err(e) => {
                log::warn!("gateway: login failed: {e}");
                Err(e.into_form_error(Operation::Login))
            }
        }
    }

    /// Create an account. Success does not authenticate the caller.
    ///
    /// # Errors
    ///
    /// Returns the message to show beneath the signup form.
    pub async fn signup(&self, credentials: &Credentials) -> Result<(), FormError> {
        let result = self
            .post_json(SIGNUP_PATH, credentials)
            .await
            .and_then(|resp| interpret_signup(&resp));
        result.map_err(|e| {
            log::warn!("gateway: signup failed: {e}");
            e.into_form_error(Operation::Signup)
        })
    }

    /// Forget the stored token. The caller applies `SessionEvent::LoggedOut`.
    pub fn logout(&self) -> SessionEvent {
        self.storage.clear();
        log::info!("gateway: logged out");
        SessionEvent::LoggedOut
    }
}
