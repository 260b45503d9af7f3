//! Credential form model for the login and signup dialogs.
//!
//! DESIGN
//! ======
//! Pure data plus validation. Dialog components hold a `CredentialForm` in a
//! signal, feed keystrokes through `set_field`, and only reach the network
//! when `begin_submit` hands back a validated `Credentials` value.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Must be at least 6 characters";

/// Which dialog the form backs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Signup,
}

/// Form field identifiers, named as they appear on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    FirstName,
    LastName,
}

impl Field {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
        }
    }
}

/// Field name to validation message. Absent key means the field is valid.
pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Validated request payload for `/auth` or `/user`.
///
/// Login payloads leave the name fields `None`, which keeps them off the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub password: String,
}

/// User-facing message describing why a submission was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormError(pub String);

impl FormError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why `begin_submit` declined to produce credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A request from this form is still outstanding.
    InFlight,
    /// At least one field failed validation.
    Invalid(FieldErrors),
}

/// Handed out by `begin_submit`; ties a result back to the dialog opening
/// that sent the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// Field values, validation state and submission status for one dialog.
///
/// `in_flight` survives `reset`: closing the dialog does not abort the
/// request, so reopening it must still refuse a second submission until the
/// first one finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialForm {
    pub mode: FormMode,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub field_errors: FieldErrors,
    /// Message shown beneath the submit control after a failed submission.
    pub error: Option<FormError>,
    /// True while a login/signup request for this form is outstanding.
    pub in_flight: bool,
    /// Set once a signup request succeeds.
    pub signed_up: bool,
    /// Bumped by `reset`; results of requests sent before it are stale.
    epoch: u64,
}

impl CredentialForm {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            field_errors: FieldErrors::new(),
            error: None,
            in_flight: false,
            signed_up: false,
            epoch: 0,
        }
    }

    pub fn login() -> Self {
        Self::new(FormMode::Login)
    }

    pub fn signup() -> Self {
        Self::new(FormMode::Signup)
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
        }
    }

    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.get(&field).copied()
    }

    /// Update one field and re-run the full rule set.
    ///
    /// Name fields are ignored on the login form.
    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::FirstName | Field::LastName if self.mode == FormMode::Login => return,
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
        }
        self.field_errors = self.validate();
    }

    /// Evaluate every rule for the current mode against the current values.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.email.trim().is_empty() {
            errors.insert(Field::Email, MSG_REQUIRED);
        } else if !is_valid_email(&self.email) {
            errors.insert(Field::Email, MSG_INVALID_EMAIL);
        }

        if self.password.is_empty() {
            if self.mode == FormMode::Signup {
                errors.insert(Field::Password, MSG_REQUIRED);
            }
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(Field::Password, MSG_PASSWORD_TOO_SHORT);
        }

        if self.mode == FormMode::Signup {
            if self.first_name.trim().is_empty() {
                errors.insert(Field::FirstName, MSG_REQUIRED);
            }
            if self.last_name.trim().is_empty() {
                errors.insert(Field::LastName, MSG_REQUIRED);
            }
        }

        errors
    }

    /// Start a submission attempt.
    ///
    /// Clears the previous form error, refuses while another request from this
    /// form is in flight, and marks the form in flight when validation passes.
    ///
    /// # Errors
    ///
    /// Returns `SubmitBlocked` when a request is outstanding or a field is invalid;
    /// no network call may be issued in either case.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, Credentials), SubmitBlocked> {
        if self.in_flight {
            return Err(SubmitBlocked::InFlight);
        }
        self.error = None;
        self.field_errors = self.validate();
        if !self.field_errors.is_empty() {
            return Err(SubmitBlocked::Invalid(self.field_errors.clone()));
        }
        self.in_flight = true;
        Ok((SubmitTicket(self.epoch), self.credentials()))
    }

    /// Record the outcome of the request started by `begin_submit`.
    ///
    /// Success discards the entered values; failure keeps them so the user can
    /// correct and resubmit. A result for a ticket issued before the last
    /// `reset` only releases the in-flight flag.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, outcome: Result<(), FormError>) {
        self.in_flight = false;
        if ticket.0 != self.epoch {
            log::debug!("form: dropping result of request sent before reset");
            return;
        }
        match outcome {
            Ok(()) => {
                let signed_up = self.mode == FormMode::Signup;
                self.clear_entries();
                self.signed_up = signed_up;
            }
            Err(err) => self.error = Some(err),
        }
    }

    /// Drop all values and messages, as when the dialog closes.
    pub fn reset(&mut self) {
        self.clear_entries();
        self.epoch += 1;
    }

    fn clear_entries(&mut self) {
        let in_flight = self.in_flight;
        let epoch = self.epoch;
        *self = Self::new(self.mode);
        self.in_flight = in_flight;
        self.epoch = epoch;
    }

    fn credentials(&self) -> Credentials {
        let names = self.mode == FormMode::Signup;
        Credentials {
            email: self.email.trim().to_owned(),
            first_name: names.then(|| self.first_name.trim().to_owned()),
            last_name: names.then(|| self.last_name.trim().to_owned()),
            password: self.password.clone(),
        }
    }
}

/// Shape check for an email address: one `@`, non-empty local part, and a
/// dotted domain with no empty labels at either end.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') && !domain.contains("..")
}
