//! Domain models shared by the API, client and widget crates.

pub mod auth;
pub mod chat;
