//! Networking modules for the registry backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` adapts `gloo-net` to the registry `Transport` trait and `api`
//! exposes the page-level calls over the shared client.

pub mod api;
pub mod transport;
