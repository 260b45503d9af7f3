//! Route guard for the authenticated/anonymous boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/` is protected and `/login` is open. Route components call
//! `install_guard_redirect` so both pages apply identical redirect behavior,
//! and render through `decide` so a pending session shows a placeholder
//! instead of flashing the login view.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::{SessionPhase, SessionState};

pub const PROTECTED_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// What the router should do for a path in a given session phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    RenderProtected,
    RenderLogin,
    /// Session not known yet; render a neutral placeholder.
    Placeholder,
    Redirect(&'static str),
    NotFound,
}

#[must_use]
pub fn decide(phase: SessionPhase, path: &str) -> RouteDecision {
    match (normalize_path(path), phase) {
        (PROTECTED_PATH, SessionPhase::Pending) => RouteDecision::Placeholder,
        (PROTECTED_PATH, SessionPhase::Anonymous) => RouteDecision::Redirect(LOGIN_PATH),
        (PROTECTED_PATH, SessionPhase::Authenticated) => RouteDecision::RenderProtected,
        (LOGIN_PATH, SessionPhase::Authenticated) => RouteDecision::Redirect(PROTECTED_PATH),
        (LOGIN_PATH, _) => RouteDecision::RenderLogin,
        _ => RouteDecision::NotFound,
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { PROTECTED_PATH } else { trimmed }
}

/// Navigate away from `path` whenever the session phase calls for a redirect.
pub fn install_guard_redirect<F>(session: RwSignal<SessionState>, path: &'static str, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let RouteDecision::Redirect(target) = decide(session.get().phase, path) {
            log::debug!("guard: {path} -> {target}");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
