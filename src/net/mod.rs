//! Networking modules for the identity service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` owns the three auth calls, `transport` is the fetch seam the
//! gateway sends through, and `types` defines request/response shapes.

pub mod gateway;
pub mod transport;
pub mod types;
