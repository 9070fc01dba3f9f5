//! WebEye API Library Crate
//!
//! The HTTP layer of the WebEye assistant: configuration, shared state,
//! handlers and routing. The `api` binary is a thin wrapper around this
//! library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
