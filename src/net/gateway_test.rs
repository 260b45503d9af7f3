use super::*;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::executor::block_on;

use crate::state::form::{CredentialForm, Field};
use crate::state::session::{SessionPhase, SessionState};
use crate::util::token_storage::MemoryTokenStorage;

/// Transport that replays canned results and records what was sent.
#[derive(Clone, Default)]
struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    fn replying(reply: Result<HttpResponse, TransportError>) -> Self {
        let transport = Self::default();
        transport.replies.borrow_mut().push_back(reply);
        transport
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_owned())))
    }
}

fn scripted_gateway(
    reply: Result<HttpResponse, TransportError>,
    storage: MemoryTokenStorage,
) -> (AuthGateway<ScriptedTransport, MemoryTokenStorage>, ScriptedTransport) {
    let transport = ScriptedTransport::replying(reply);
    let gateway = AuthGateway::new(
        ClientConfig::new("https://users.example.com"),
        transport.clone(),
        storage,
    );
    (gateway, transport)
}

fn ok(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(status, body))
}

fn offline() -> Result<HttpResponse, TransportError> {
    Err(TransportError("connection refused".to_owned()))
}

fn login_credentials() -> Credentials {
    Credentials {
        email: "user@example.com".to_owned(),
        first_name: None,
        last_name: None,
        password: "secret1".to_owned(),
    }
}

fn signup_credentials() -> Credentials {
    Credentials {
        email: "user@example.com".to_owned(),
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
        password: "secret1".to_owned(),
    }
}

// =============================================================
// Pure outcome mapping
// =============================================================

#[test]
fn probe_authenticated_accepts_any_non_401() {
    assert!(probe_authenticated(&ok(200, "")));
    assert!(probe_authenticated(&ok(403, "")));
    assert!(probe_authenticated(&ok(500, "not json")));
    assert!(!probe_authenticated(&ok(401, "")));
    assert!(!probe_authenticated(&offline()));
}

#[test]
fn interpret_login_reads_token_on_success() {
    let resp = HttpResponse::new(200, r#"{"token":"abc"}"#);
    assert_eq!(interpret_login(&resp), Ok("abc".to_owned()));
}

#[test]
fn interpret_login_treats_tokenless_success_as_malformed() {
    let resp = HttpResponse::new(200, "{}");
    assert_eq!(interpret_login(&resp), Err(GatewayError::MalformedResponse { status: 200 }));
}

#[test]
fn interpret_signup_ignores_success_body() {
    assert_eq!(interpret_signup(&HttpResponse::new(201, "garbage")), Ok(()));
}

#[test]
fn into_form_error_uses_message_or_fallback() {
    let rejected = GatewayError::Rejected {
        status: 401,
        message: "bad credentials".to_owned(),
    };
    assert_eq!(rejected.into_form_error(Operation::Login).message(), "bad credentials");
    assert_eq!(
        GatewayError::MalformedResponse { status: 500 }
            .into_form_error(Operation::Signup)
            .message(),
        SIGNUP_FALLBACK
    );
    assert_eq!(
        GatewayError::Transport(TransportError("dns".to_owned()))
            .into_form_error(Operation::Login)
            .message(),
        LOGIN_FALLBACK
    );
}

#[test]
fn login_event_follows_result() {
    assert_eq!(login_event(&Ok(())), SessionEvent::LoginSucceeded);
    assert_eq!(login_event(&Err(FormError::new("x"))), SessionEvent::LoginFailed);
}

// =============================================================
// Probe
// =============================================================

#[test]
fn probe_sends_get_with_stored_bearer() {
    let (gateway, transport) = scripted_gateway(ok(200, "{}"), MemoryTokenStorage::with_token("abc"));
    assert!(block_on(gateway.probe_session()));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, "https://users.example.com/user/me");
    assert_eq!(sent[0].authorization, "Bearer abc");
    assert_eq!(sent[0].body, None);
}

#[test]
fn probe_without_token_sends_empty_bearer() {
    let (gateway, transport) = scripted_gateway(ok(401, ""), MemoryTokenStorage::default());
    assert!(!block_on(gateway.probe_session()));
    assert_eq!(transport.sent()[0].authorization, "Bearer ");
}

#[test]
fn probe_transport_failure_is_anonymous() {
    let (gateway, _) = scripted_gateway(offline(), MemoryTokenStorage::default());
    assert!(!block_on(gateway.probe_session()));
}

#[test]
fn probes_resolving_out_of_order_leave_latest_result() {
    let (state, first) = SessionState::default().begin_probe();
    let (state, second) = state.begin_probe();

    let (authed, _) = scripted_gateway(ok(200, ""), MemoryTokenStorage::default());
    let (anon, _) = scripted_gateway(ok(401, ""), MemoryTokenStorage::default());
    let first_result = block_on(authed.probe_session());
    let second_result = block_on(anon.probe_session());

    let state = state
        .apply(SessionEvent::ProbeResolved { ticket: second, authenticated: second_result })
        .apply(SessionEvent::ProbeResolved { ticket: first, authenticated: first_result });
    assert_eq!(state.phase, SessionPhase::Anonymous);
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_success_persists_token_and_authenticates() {
    let storage = MemoryTokenStorage::default();
    let (gateway, transport) = scripted_gateway(ok(200, r#"{"token":"abc"}"#), storage.clone());

    let result = block_on(gateway.login(&login_credentials()));
    let state = SessionState::default().apply(login_event(&result));

    assert_eq!(result, Ok(()));
    assert!(state.is_authenticated());
    assert_eq!(storage.load().as_deref(), Some("abc"));

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "https://users.example.com/auth");
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap_or_default()).expect("json body");
    assert_eq!(body, serde_json::json!({ "email": "user@example.com", "password": "secret1" }));
}

#[test]
fn login_attaches_existing_token() {
    let storage = MemoryTokenStorage::with_token("old");
    let (gateway, transport) = scripted_gateway(ok(200, r#"{"token":"new"}"#), storage.clone());
    block_on(gateway.login(&login_credentials())).expect("login");
    assert_eq!(transport.sent()[0].authorization, "Bearer old");
    assert_eq!(storage.load().as_deref(), Some("new"));
}

#[test]
fn login_rejection_surfaces_message_and_resets_session() {
    let storage = MemoryTokenStorage::with_token("old");
    let (gateway, _) = scripted_gateway(ok(401, r#"{"message":"bad credentials"}"#), storage.clone());

    let authed = SessionState::default().apply(SessionEvent::LoginSucceeded);
    let result = block_on(gateway.login(&login_credentials()));
    let state = authed.apply(login_event(&result));

    assert_eq!(result, Err(FormError::new("bad credentials")));
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(storage.load().as_deref(), Some("old"));
}

#[test]
fn login_unparsable_rejection_uses_fallback() {
    let (gateway, _) = scripted_gateway(ok(401, "<html>nope</html>"), MemoryTokenStorage::default());
    let result = block_on(gateway.login(&login_credentials()));
    assert_eq!(result, Err(FormError::new("There was a problem logging in")));
}

#[test]
fn login_transport_failure_uses_fallback() {
    let (gateway, _) = scripted_gateway(offline(), MemoryTokenStorage::default());
    let result = block_on(gateway.login(&login_credentials()));
    assert_eq!(result, Err(FormError::new(LOGIN_FALLBACK)));
    assert_eq!(login_event(&result), SessionEvent::LoginFailed);
}

#[test]
fn invalid_form_never_reaches_transport() {
    let (gateway, transport) = scripted_gateway(ok(200, r#"{"token":"abc"}"#), MemoryTokenStorage::default());
    let mut form = CredentialForm::login();
    form.set_field(Field::Email, "nope".to_owned());
    form.set_field(Field::Password, "123".to_owned());

    if let Ok((_, creds)) = form.begin_submit() {
        let _ = block_on(gateway.login(&creds));
    }
    assert!(transport.sent().is_empty());
}

// =============================================================
// Signup
// =============================================================

#[test]
fn signup_success_marks_signed_up_without_token() {
    let storage = MemoryTokenStorage::default();
    let (gateway, transport) = scripted_gateway(ok(201, r#"{"token":"ignored"}"#), storage.clone());

    let mut form = CredentialForm::signup();
    form.set_field(Field::Email, "user@example.com".to_owned());
    form.set_field(Field::FirstName, "Ada".to_owned());
    form.set_field(Field::LastName, "Lovelace".to_owned());
    form.set_field(Field::Password, "secret1".to_owned());
    let (ticket, creds) = form.begin_submit().expect("valid");
    form.finish_submit(ticket, block_on(gateway.signup(&creds)));

    assert!(form.signed_up);
    assert_eq!(storage.load(), None);
    let sent = transport.sent();
    assert_eq!(sent[0].url, "https://users.example.com/user");
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap_or_default()).expect("json body");
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["lastName"], "Lovelace");
}

#[test]
fn signup_rejection_keeps_dialog_open() {
    let (gateway, _) = scripted_gateway(ok(400, r#"{"message":"email taken"}"#), MemoryTokenStorage::default());
    let mut form = CredentialForm::signup();
    form.set_field(Field::Email, "user@example.com".to_owned());
    form.set_field(Field::FirstName, "Ada".to_owned());
    form.set_field(Field::LastName, "Lovelace".to_owned());
    form.set_field(Field::Password, "secret1".to_owned());
    let (ticket, creds) = form.begin_submit().expect("valid");
    form.finish_submit(ticket, block_on(gateway.signup(&creds)));

    assert_eq!(form.error, Some(FormError::new("email taken")));
    assert!(!form.signed_up);
}

#[test]
fn signup_failures_use_signup_fallback() {
    let (gateway, _) = scripted_gateway(ok(500, ""), MemoryTokenStorage::default());
    assert_eq!(
        block_on(gateway.signup(&signup_credentials())),
        Err(FormError::new("There was a problem signing up"))
    );

    let (gateway, _) = scripted_gateway(offline(), MemoryTokenStorage::default());
    assert_eq!(
        block_on(gateway.signup(&signup_credentials())),
        Err(FormError::new(SIGNUP_FALLBACK))
    );
}

#[test]
fn signup_attaches_existing_token() {
    let (gateway, transport) = scripted_gateway(ok(201, ""), MemoryTokenStorage::with_token("abc"));
    block_on(gateway.signup(&signup_credentials())).expect("signup");
    assert_eq!(transport.sent()[0].authorization, "Bearer abc");
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_token_and_yields_anonymous() {
    let storage = MemoryTokenStorage::with_token("abc");
    let (gateway, _) = scripted_gateway(ok(200, ""), storage.clone());
    let state = SessionState::default().apply(SessionEvent::LoginSucceeded);

    let state = state.apply(gateway.logout());
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(storage.load(), None);
}
