//! Notes Service
//!
//! A small HTTP service for creating, listing, fetching, updating and
//! deleting text notes kept in a single JSON file.
//!
//! # Architecture
//!
//! - **Server**: Axum HTTP server with tracing, body limit and timeout layers
//! - **Service**: load, transform and save cycle over the whole collection
//! - **Persistence**: pluggable [`persistence::NoteStore`] providers
//!
//! # Modules
//!
//! - [`api`]: route handlers and error responses
//! - [`config`]: layered configuration (defaults, file, env, CLI)
//! - [`domain`]: note records and collection transformations
//! - [`persistence`]: file and in-memory stores
//! - [`service`]: note operations over an injected store
//! - [`telemetry`]: tracing subscriber setup

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod domain;
pub mod persistence;
pub mod server;
pub mod service;
pub mod telemetry;

use axum::extract::FromRef;
use service::NoteService;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Note operations over the configured store.
    pub notes: NoteService,
}

impl AppState {
    pub fn new(notes: NoteService) -> Self {
        Self { notes }
    }
}

impl FromRef<AppState> for NoteService {
    fn from_ref(state: &AppState) -> Self {
        state.notes.clone()
    }
}
