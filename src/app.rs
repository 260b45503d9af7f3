//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::gateway::AuthGateway;
use crate::net::transport::FetchTransport;
use crate::pages::{home::HomePage, login::LoginPage};
#[cfg(feature = "csr")]
use crate::state::session::SessionEvent;
use crate::state::session::SessionState;
use crate::util::task::TaskGuard;
use crate::util::token_storage::BrowserTokenStorage;

/// Gateway wired to browser `fetch` and `localStorage`.
pub type BrowserGateway = AuthGateway<FetchTransport, BrowserTokenStorage>;

/// Build the browser gateway for `config`.
pub fn browser_gateway(config: ClientConfig) -> BrowserGateway {
    let storage = BrowserTokenStorage::new(config.token_key.clone());
    AuthGateway::new(config, FetchTransport, storage)
}

/// Root application component.
///
/// Provides the session signal and gateway, then probes the stored token once
/// per load. Until the probe resolves the session stays `Pending`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let gateway = browser_gateway(ClientConfig::from_build_env());
    let session = RwSignal::new(SessionState::default());
    provide_context(gateway.clone());
    provide_context(session);

    let guard = TaskGuard::scoped();
    let (pending, ticket) = session.get_untracked().begin_probe();
    session.set(pending);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        if let Some(authenticated) = guard.run(gateway.probe_session()).await {
            session.update(|state| {
                *state = state.apply(SessionEvent::ProbeResolved { ticket, authenticated });
            });
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (guard, ticket);
    }

    view! {
        <Title text="Badgerer"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}
