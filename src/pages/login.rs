//! Open landing page with the Sign Up and Login dialogs.
//!
//! Rendered for anonymous and pending sessions; an authenticated session is
//! sent on to `/`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::credential_dialog::CredentialDialog;
use crate::state::form::FormMode;
use crate::state::session::SessionState;
use crate::util::guard::{LOGIN_PATH, install_guard_redirect};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_guard_redirect(session, LOGIN_PATH, use_navigate());

    let show_signup = RwSignal::new(false);
    let show_login = RwSignal::new(false);

    view! {
        <div class="login-page">
            <header class="login-page__bar">
                <button class="login-page__action" on:click=move |_| show_signup.update(|v| *v = !*v)>
                    "Sign Up"
                </button>
                <button class="login-page__action" on:click=move |_| show_login.update(|v| *v = !*v)>
                    "Login"
                </button>
            </header>
            <CredentialDialog mode=FormMode::Signup open=show_signup/>
            <CredentialDialog mode=FormMode::Login open=show_login/>
            <h1>"Badgerer"</h1>
            <p class="login-page__subtitle">
                "Removing the work of managing badgework and attendance for scout leaders."
            </p>
        </div>
    }
}
