//! Starship explorer library
//!
//! Exposes the data client, response cache, list derivation, detail loading,
//! session and routing modules used by the terminal app and integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod detail;
pub mod listing;
pub mod route;
pub mod session;
pub mod ui;
