//! Abstract blob store trait.

use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;

/// Write-only object storage contract.
pub trait BlobStore: Send + Sync + 'static {
    /// Write `body` to `key`, replacing any existing object.
    fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>>;

    /// Human-readable location of `key`, used in log lines.
    fn location(&self, key: &str) -> String;
}
