//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is app-wide and provided through context; `form` is owned by
//! each credential dialog.

pub mod form;
pub mod session;
