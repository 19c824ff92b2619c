//! Write-only audit record emitted for every handled book request.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One access-log entry, stored as a single JSON object in blob storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessLog {
    /// ISO-8601 UTC timestamp, fixed when the record is built.
    pub timestamp: String,
    /// Random per-request identifier, also used in the object key.
    pub request_id: String,
    /// Free-text description of what happened.
    pub event: String,
}

impl AccessLog {
    /// Build a record for a fresh request id, stamped with the current time.
    pub fn new(event: impl Into<String>) -> Self {
        Self::at(Utc::now(), Uuid::new_v4().to_string(), event)
    }

    /// Build a record with an explicit time and request id.
    pub fn at(now: DateTime<Utc>, request_id: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
            request_id: request_id.into(),
            event: event.into(),
        }
    }
}

/// Book operations that produce an access-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Created,
    Retrieved,
    Deleted,
}

impl BookAction {
    /// Past-tense verb used in the event text.
    pub fn as_str(self) -> &'static str {
        match self {
            BookAction::Created => "created",
            BookAction::Retrieved => "retrieved",
            BookAction::Deleted => "deleted",
        }
    }

    /// Event text for the access log, e.g. `Book with ISBN 123 created`.
    pub fn event(self, isbn: &str) -> String {
        format!("Book with ISBN {isbn} {}", self.as_str())
    }
}
