//! Snooze: command-line client for a Hack-or-Snooze style story service.
//!
//! Thin data-access layer over the remote REST API (stories, sessions,
//! favorites) plus the state and credential plumbing the CLI needs.
//!
//! This lib exposes the client, the entities, and the application state.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
// Persisted (token, username) pair for session restoration across runs
pub mod session;
// Explicit owner of the current session + story list, with the
// duplicate-request guard
pub mod state;
pub mod stories;
pub mod user;
