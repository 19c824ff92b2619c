//! In-memory blob store.
//!
//! Objects are held in a `tokio::sync::RwLock<BTreeMap<...>>`.  Nothing is
//! persisted; intended for local runs and tests.

use bytes::Bytes;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use super::backend::BlobStore;

/// A stored object body and its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub body: Bytes,
    pub content_type: String,
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    /// key -> object, ordered so listings are deterministic.
    objects: tokio::sync::RwLock<BTreeMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored object.
    pub async fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.read().await.get(key).cloned()
    }

    /// All stored keys in lexicographic order.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        let key = key.to_string();
        let content_type = content_type.to_string();
        Box::pin(async move {
            self.objects
                .write()
                .await
                .insert(key, StoredBlob { body, content_type });
            Ok(())
        })
    }

    fn location(&self, key: &str) -> String {
        format!("memory://{key}")
    }
}
