//! Cancellation for async work tied to a component's lifetime.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gateway calls run via `spawn_local` and cannot be aborted mid-flight. A
//! `TaskGuard` is cancelled when its owning component is cleaned up; work
//! routed through `TaskGuard::run` then drops its result instead of writing
//! into signals that no longer have a reader.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug, Default)]
pub struct TaskGuard {
    cancelled: Arc<AtomicBool>,
}

impl TaskGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard cancelled automatically when the current reactive owner is disposed.
    pub fn scoped() -> Self {
        let guard = Self::new();
        let on_drop = guard.clone();
        leptos::prelude::on_cleanup(move || on_drop.cancel());
        guard
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Await `fut`, yielding its output only if the guard is still live.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        if self.is_cancelled() {
            log::debug!("task guard: dropping result of cancelled task");
            return None;
        }
        Some(output)
    }
}
