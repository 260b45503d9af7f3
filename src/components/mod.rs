//! Reusable UI components.

pub mod credential_dialog;
pub mod credential_field;
