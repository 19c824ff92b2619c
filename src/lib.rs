//! Book registry library -- create, read and delete books by ISBN.
//!
//! Books live in a single key-value table keyed by ISBN; every handled
//! request also writes an access-log object to blob storage.  This crate
//! provides the configuration, domain model, store adapters, access-log
//! sink, HTTP handlers and router; the binaries only wire them together.

use std::sync::Arc;

pub mod audit;
pub mod blob;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod model;
pub mod project;
pub mod server;
pub mod startup;
pub mod store;

use crate::audit::AccessLogSink;
use crate::config::Config;
use crate::project::ProjectInfo;
use crate::store::BookStore;

/// Shared application state passed to all handlers via `axum::extract::State`.
pub struct AppState {
    /// Service configuration.
    pub config: Config,
    /// Project metadata from the crate manifest.
    pub project: ProjectInfo,
    /// Books table.
    pub books: Arc<dyn BookStore>,
    /// Access-log writer.
    pub access_logs: AccessLogSink,
}
