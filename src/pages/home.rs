//! Protected landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows a neutral placeholder while the session probe is in flight, the app
//! once the session is authenticated, and redirects to `/login` otherwise.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::BrowserGateway;
use crate::state::session::SessionState;
use crate::util::guard::{PROTECTED_PATH, RouteDecision, decide, install_guard_redirect};

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let gateway = expect_context::<BrowserGateway>();
    install_guard_redirect(session, PROTECTED_PATH, use_navigate());

    let on_logout = move |_: leptos::ev::MouseEvent| {
        let event = gateway.logout();
        session.update(|state| *state = state.apply(event));
    };

    move || match decide(session.get().phase, PROTECTED_PATH) {
        RouteDecision::RenderProtected => view! {
            <div class="home-page">
                <header class="home-page__bar">
                    <h1>"Badgerer"</h1>
                    <button class="home-page__logout" on:click=on_logout.clone()>
                        "Log out"
                    </button>
                </header>
                <p>"Submit who attended and what badgework was completed; Badgerer handles the rest."</p>
            </div>
        }
        .into_any(),
        RouteDecision::Placeholder => view! { <div class="session-pending">"Checking session..."</div> }.into_any(),
        _ => ().into_any(),
    }
}
