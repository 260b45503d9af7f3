//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by the root component and provided as `RwSignal<SessionState>`.
//! The route guard reads it; only gateway outcomes write it, and they do so
//! by producing a new value through `SessionState::apply`.
//!
//! ORDERING
//! ========
//! Every probe takes a `ProbeTicket`. A probe result is applied only if its
//! ticket is still the newest one, and login/logout retire all outstanding
//! tickets, so a slow probe can never overwrite a later decision.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Where the session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// App just loaded; the first probe has not resolved.
    #[default]
    Pending,
    Anonymous,
    Authenticated,
}

/// Sequence number handed out by `SessionState::begin_probe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeTicket(u64);

/// A transition produced by the auth gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    ProbeResolved { ticket: ProbeTicket, authenticated: bool },
    LoginSucceeded,
    LoginFailed,
    LoggedOut,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    latest_probe: u64,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == SessionPhase::Pending
    }

    /// Issue a ticket for a new probe. The phase is left alone until the
    /// probe resolves.
    #[must_use]
    pub fn begin_probe(&self) -> (Self, ProbeTicket) {
        let next = Self {
            phase: self.phase,
            latest_probe: self.latest_probe + 1,
        };
        (next, ProbeTicket(next.latest_probe))
    }

    /// Fold one event into a new state.
    #[must_use]
    pub fn apply(&self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::ProbeResolved { ticket, authenticated } => {
                if ticket.0 != self.latest_probe {
                    log::debug!("session: ignoring stale probe result");
                    return *self;
                }
                Self {
                    phase: phase_for(authenticated),
                    latest_probe: self.latest_probe,
                }
            }
            SessionEvent::LoginSucceeded => self.retire_probes(SessionPhase::Authenticated),
            SessionEvent::LoginFailed | SessionEvent::LoggedOut => self.retire_probes(SessionPhase::Anonymous),
        }
    }

    fn retire_probes(&self, phase: SessionPhase) -> Self {
        Self {
            phase,
            latest_probe: self.latest_probe + 1,
        }
    }
}

fn phase_for(authenticated: bool) -> SessionPhase {
    if authenticated {
        SessionPhase::Authenticated
    } else {
        SessionPhase::Anonymous
    }
}
