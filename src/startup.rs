//! Process startup shared by the server and Lambda entrypoints: logging,
//! metrics, and construction of the store clients from configuration.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::audit::AccessLogSink;
use crate::blob::aws::S3BlobStore;
use crate::blob::memory::MemoryBlobStore;
use crate::blob::BlobStore;
use crate::config::{Config, LoggingConfig};
use crate::project::ProjectInfo;
use crate::store::dynamodb::DynamoDbBookStore;
use crate::store::memory::MemoryBookStore;
use crate::store::BookStore;
use crate::AppState;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

/// Install the Prometheus recorder when metrics are enabled.
pub fn init_metrics(config: &Config) -> anyhow::Result<()> {
    if config.observability.metrics {
        crate::metrics::init_metrics()?;
        crate::metrics::describe_metrics();
        info!("Prometheus metrics initialized");
    }
    Ok(())
}

/// Build the books table backend selected by `table.backend`.
pub async fn build_book_store(config: &Config) -> anyhow::Result<Arc<dyn BookStore>> {
    match config.table.backend.as_str() {
        "dynamodb" => {
            let store = DynamoDbBookStore::new(&config.table).await?;
            info!("DynamoDB book store initialized: table={}", store.table_name());
            Ok(Arc::new(store))
        }
        "memory" => {
            info!("In-memory book store initialized");
            Ok(Arc::new(MemoryBookStore::new()))
        }
        other => anyhow::bail!("unknown table.backend '{other}'"),
    }
}

/// Build the access-log blob backend selected by `log_bucket.backend`.
pub async fn build_blob_store(config: &Config) -> anyhow::Result<Arc<dyn BlobStore>> {
    match config.log_bucket.backend.as_str() {
        "s3" => Ok(Arc::new(S3BlobStore::new(&config.log_bucket).await?)),
        "memory" => {
            info!("In-memory access-log store initialized");
            Ok(Arc::new(MemoryBlobStore::new()))
        }
        other => anyhow::bail!("unknown log_bucket.backend '{other}'"),
    }
}

/// Construct the shared [`AppState`] with every collaborator injected.
pub async fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let books = build_book_store(&config).await?;
    let blobs = build_blob_store(&config).await?;

    Ok(Arc::new(AppState {
        config,
        project: ProjectInfo::from_manifest(),
        books,
        access_logs: AccessLogSink::new(blobs),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> Config {
        let mut config = Config::default();
        config.table.backend = "memory".to_string();
        config.log_bucket.backend = "memory".to_string();
        config
    }

    #[tokio::test]
    async fn test_build_state_with_memory_backends() {
        let state = build_state(memory_config()).await.unwrap();
        assert_eq!(state.project.name, "book-registry");
        assert!(matches!(
            state.books.get("missing").await,
            Err(crate::store::BookStoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_backend_rejected() {
        let mut config = memory_config();
        config.log_bucket.backend = "gcs".to_string();
        assert!(build_blob_store(&config).await.is_err());
    }
}
