//! AWS S3 blob store.
//!
//! Writes objects into a single S3 bucket, optionally under a key prefix.
//! Credentials are resolved via the standard AWS credential chain
//! (env vars, `~/.aws/credentials`, IAM role, etc.).

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

use super::backend::BlobStore;
use crate::config::LogBucketConfig;

/// Blob store backed by one S3 bucket.
pub struct S3BlobStore {
    /// AWS S3 SDK client.
    client: Client,
    /// Target bucket name.
    bucket: String,
    /// Key prefix for all objects in the bucket.
    prefix: String,
}

impl S3BlobStore {
    /// Create a new S3 blob store from the log bucket configuration.
    ///
    /// Loads AWS credentials from the default credential chain and honours
    /// an optional region, custom endpoint and path-style addressing.
    pub async fn new(config: &LogBucketConfig) -> anyhow::Result<Self> {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &config.region {
            config_loader = config_loader.region(aws_config::Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.endpoint_url {
            config_loader = config_loader.endpoint_url(endpoint);
        }

        let sdk_config = config_loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.use_path_style)
            .build();

        info!(
            "S3 blob store initialized: bucket={} prefix='{}'",
            config.name, config.prefix
        );

        Ok(Self::with_client(
            Client::from_conf(s3_config),
            config.name.clone(),
            config.prefix.clone(),
        ))
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Map a logical key to the key written in the bucket.
    fn s3_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl BlobStore for S3BlobStore {
    fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        let s3_key = self.s3_key(key);
        let content_type = content_type.to_string();
        Box::pin(async move {
            debug!("S3 put_object: bucket={} key={}", self.bucket, s3_key);

            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(&s3_key)
                .content_type(content_type)
                .body(ByteStream::from(body))
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("S3 put_object: {}", DisplayErrorContext(e)))?;

            Ok(())
        })
    }

    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, self.s3_key(key))
    }
}
