//! # badgerer-client
//!
//! Leptos + WASM frontend that gates the Badgerer app behind a bearer-token
//! session. The identity service is an external collaborator reached over
//! HTTP; this crate owns the session state machine, the credential forms,
//! the token slot in `localStorage`, and the route guard.
//!
//! Browser-only glue is behind the `csr` feature. Without it the crate builds
//! natively so the auth core can be tested with plain `cargo test`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let config = config::ClientConfig::from_build_env();
    let _ = console_log::init_with_level(config.log_level);
    leptos::mount::mount_to_body(app::App);
}
