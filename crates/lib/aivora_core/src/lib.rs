//! # aivora_core
//!
//! Core domain logic for the Aivora support assistant.

pub mod auth;
pub mod chat;
pub mod model;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
