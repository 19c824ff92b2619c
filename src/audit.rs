//! Access-log sink.
//!
//! Every handled book request produces one [`AccessLog`] written as a JSON
//! object to blob storage under
//! `logs/{yyyy}/{MM}/{dd}/{HHmmss}_{request_id}.json`.  Writes are
//! best-effort: failures are logged with the request id and swallowed, so
//! the caller's response never depends on the log bucket.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::{error, info};

use crate::blob::BlobStore;
use crate::metrics::ACCESS_LOGS_TOTAL;
use crate::model::AccessLog;

/// Content type of every access-log object.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Object key for a log record written at `now`.
pub fn object_key(now: DateTime<Utc>, request_id: &str) -> String {
    format!("logs/{}_{request_id}.json", now.format("%Y/%m/%d/%H%M%S"))
}

/// Writes [`AccessLog`] records to a [`BlobStore`].
#[derive(Clone)]
pub struct AccessLogSink {
    store: Arc<dyn BlobStore>,
}

impl AccessLogSink {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Write `log` once, keyed by the current UTC time.
    ///
    /// Never fails: the outcome is reported through tracing and metrics only.
    pub async fn record(&self, log: &AccessLog) {
        self.record_at(Utc::now(), log).await
    }

    async fn record_at(&self, now: DateTime<Utc>, log: &AccessLog) {
        let key = object_key(now, &log.request_id);

        // serde_json keeps non-ASCII text as literal UTF-8.
        let body = match serde_json::to_vec(log) {
            Ok(body) => Bytes::from(body),
            Err(e) => {
                error!(
                    request_id = %log.request_id,
                    "Failed to serialize access log: {e}"
                );
                counter!(ACCESS_LOGS_TOTAL, "outcome" => "failed").increment(1);
                return;
            }
        };

        match self.store.put(&key, body, CONTENT_TYPE_JSON).await {
            Ok(()) => {
                info!(
                    request_id = %log.request_id,
                    "Access log saved: {}",
                    self.store.location(&key)
                );
                counter!(ACCESS_LOGS_TOTAL, "outcome" => "written").increment(1);
            }
            Err(e) => {
                error!(
                    request_id = %log.request_id,
                    "Unexpected error while saving access log: {e:#}"
                );
                counter!(ACCESS_LOGS_TOTAL, "outcome" => "failed").increment(1);
            }
        }
    }
}
