//! Login and signup dialogs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both dialogs run the same cycle: validate through `CredentialForm`, send
//! through the gateway, then fold the outcome back into the form and (for
//! login) the session. Requests are bound to a `TaskGuard` so a dialog torn
//! down mid-request leaves the session untouched. Closing the dialog only
//! hides it; the form's submit ticket keeps a late result off the reopened
//! form and its in-flight flag blocks a second request until then.

use leptos::prelude::*;

use crate::app::BrowserGateway;
use crate::components::credential_field::CredentialField;
#[cfg(feature = "csr")]
use crate::net::gateway::login_event;
use crate::state::form::{CredentialForm, Field, FormMode};
use crate::state::session::SessionState;
use crate::util::task::TaskGuard;

/// Modal form for `mode`. Visible while `open` is set; the signup dialog also
/// closes itself once the account has been created.
#[component]
pub fn CredentialDialog(mode: FormMode, open: RwSignal<bool>) -> impl IntoView {
    let gateway = expect_context::<BrowserGateway>();
    let session = expect_context::<RwSignal<SessionState>>();
    let form = RwSignal::new(CredentialForm::new(mode));
    let guard = TaskGuard::scoped();

    let title = match mode {
        FormMode::Login => "Login",
        FormMode::Signup => "Sign Up",
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((ticket, credentials)) = form.try_update(|f| f.begin_submit().ok()).flatten() else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            let gateway = gateway.clone();
            let guard = guard.clone();
            leptos::task::spawn_local(async move {
                let outcome = match mode {
                    FormMode::Login => guard.run(gateway.login(&credentials)).await,
                    FormMode::Signup => guard.run(gateway.signup(&credentials)).await,
                };
                let Some(result) = outcome else {
                    return;
                };
                if mode == FormMode::Login {
                    session.update(|state| *state = state.apply(login_event(&result)));
                }
                form.update(|f| f.finish_submit(ticket, result));
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (ticket, credentials, &gateway, &guard, session);
        }
    };

    let close = move |_: leptos::ev::MouseEvent| {
        open.set(false);
        form.update(CredentialForm::reset);
    };

    let visible = move || open.get() && !form.with(|f| f.signed_up);

    view! {
        <Show when=visible>
            <div class="dialog-backdrop">
                <div class="dialog" role="dialog" aria-label=title>
                    <h2 class="dialog__title">{title}</h2>
                    <form class="dialog__form" on:submit=on_submit.clone()>
                        <CredentialField form=form field=Field::Email label="Email" input_type="email"/>
                        <Show when=move || mode == FormMode::Signup>
                            <CredentialField form=form field=Field::FirstName label="First name"/>
                            <CredentialField form=form field=Field::LastName label="Last name"/>
                        </Show>
                        <CredentialField form=form field=Field::Password label="Password" input_type="password"/>
                        <div class="dialog__actions">
                            <button
                                class="dialog__submit"
                                type="submit"
                                disabled=move || form.with(|f| f.in_flight)
                            >
                                "Submit"
                            </button>
                            <button class="dialog__close" type="button" on:click=close>
                                "Close"
                            </button>
                        </div>
                        <p class="dialog__error">
                            {move || form.with(|f| f.error.as_ref().map(ToString::to_string).unwrap_or_default())}
                        </p>
                    </form>
                </div>
            </div>
        </Show>
    }
}
