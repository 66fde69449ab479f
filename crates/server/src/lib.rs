//! BrightDesk CRM backend library.
//!
//! This crate provides the CRM backend as a library, allowing the query
//! surface, services, and jobs to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Build the full application router with its state attached.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes().with_state(state)
}
