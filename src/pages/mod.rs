//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page applies the route guard for its own path and delegates form
//! handling to `components`.

pub mod home;
pub mod login;
