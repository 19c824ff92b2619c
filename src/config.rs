//! Configuration loading and types for the book registry.
//!
//! Configuration is read from an optional YAML file and deserialized into
//! the [`Config`] struct.  Deployment-specific values (table name, log
//! bucket name, API version prefix) are then overridden from the process
//! environment, which is how the provisioning layer hands them to the
//! function at runtime.

use serde::Deserialize;
use std::path::Path;

/// Environment variable carrying the DynamoDB table name.
pub const ENV_BOOKS_TABLE_NAME: &str = "BOOKS_TABLE_NAME";

/// Environment variable carrying the access-log bucket name.
pub const ENV_LOG_BUCKET_NAME: &str = "LOG_BUCKET_NAME";

/// Environment variable carrying the API version prefix (e.g. `v1`).
pub const ENV_PROJECT_MAJOR_VERSION: &str = "PROJECT_MAJOR_VERSION";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// HTTP API surface settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Books table settings.
    #[serde(default)]
    pub table: TableConfig,

    /// Access-log bucket settings.
    #[serde(default)]
    pub log_bucket: LogBucketConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Observability settings (metrics).
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// API surface configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Path segment every route is nested under (e.g. `v1` -> `/v1/books`).
    /// Empty or absent serves routes at the root.
    #[serde(default)]
    pub version_prefix: Option<String>,
}

impl ApiConfig {
    /// The normalized mount path, e.g. `/v1`, or `None` for the root.
    pub fn mount_path(&self) -> Option<String> {
        let prefix = self.version_prefix.as_deref()?.trim_matches('/');
        if prefix.is_empty() {
            None
        } else {
            Some(format!("/{prefix}"))
        }
    }
}

/// Books table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Backend type: `dynamodb` or `memory`.
    #[serde(default = "default_table_backend")]
    pub backend: String,

    /// DynamoDB table name.
    #[serde(default)]
    pub name: String,

    /// AWS region override (falls back to the default provider chain).
    #[serde(default)]
    pub region: Option<String>,

    /// Custom DynamoDB endpoint (e.g. DynamoDB Local, LocalStack).
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            backend: default_table_backend(),
            name: String::new(),
            region: None,
            endpoint_url: None,
        }
    }
}

/// Access-log bucket configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogBucketConfig {
    /// Backend type: `s3` or `memory`.
    #[serde(default = "default_bucket_backend")]
    pub backend: String,

    /// S3 bucket name.
    #[serde(default)]
    pub name: String,

    /// AWS region override (falls back to the default provider chain).
    #[serde(default)]
    pub region: Option<String>,

    /// Key prefix prepended to every object key.
    #[serde(default)]
    pub prefix: String,

    /// Custom S3-compatible endpoint (e.g. MinIO, LocalStack).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Force path-style URL addressing.
    #[serde(default)]
    pub use_path_style: bool,
}

impl Default for LogBucketConfig {
    fn default() -> Self {
        Self {
            backend: default_bucket_backend(),
            name: String::new(),
            region: None,
            prefix: String::new(),
            endpoint_url: None,
            use_path_style: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: text or json.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Enable Prometheus metrics collection and the `/metrics` endpoint.
    #[serde(default = "default_true")]
    pub metrics: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { metrics: true }
    }
}

// -- Defaults ----------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_table_backend() -> String {
    "dynamodb".to_string()
}

fn default_bucket_backend() -> String {
    "s3".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

// -- Environment overrides ---------------------------------------------------

impl Config {
    /// Apply deployment overrides from `vars`.
    ///
    /// Only the three provisioning-owned variables are recognized; anything
    /// else is ignored.  Empty values are treated as unset.
    pub fn apply_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let value: String = value.into();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                ENV_BOOKS_TABLE_NAME => self.table.name = value,
                ENV_LOG_BUCKET_NAME => self.log_bucket.name = value,
                ENV_PROJECT_MAJOR_VERSION => self.api.version_prefix = Some(value),
                _ => {}
            }
        }
    }

    /// Check that the selected backends have what they need to start.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.table.backend.as_str() {
            "dynamodb" => {
                if self.table.name.is_empty() {
                    anyhow::bail!(
                        "table.backend is 'dynamodb' but no table name is set \
                         (table.name or {ENV_BOOKS_TABLE_NAME})"
                    );
                }
            }
            "memory" => {}
            other => anyhow::bail!("unknown table.backend '{other}'"),
        }

        match self.log_bucket.backend.as_str() {
            "s3" => {
                if self.log_bucket.name.is_empty() {
                    anyhow::bail!(
                        "log_bucket.backend is 's3' but no bucket name is set \
                         (log_bucket.name or {ENV_LOG_BUCKET_NAME})"
                    );
                }
            }
            "memory" => {}
            other => anyhow::bail!("unknown log_bucket.backend '{other}'"),
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => anyhow::bail!("unknown logging.format '{other}'"),
        }
    }
}

// -- Loader ------------------------------------------------------------------

/// Parse configuration from YAML text.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    // An empty document deserializes to unit, not a mapping.
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
}

/// Load configuration from an optional YAML file at `path`, then apply the
/// process environment and validate the result.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
                anyhow::anyhow!("reading config {}: {e}", path.as_ref().display())
            })?;
            parse_config(&contents)?
        }
        None => Config::default(),
    };
    config.apply_env(std::env::vars());
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.table.backend, "dynamodb");
        assert_eq!(config.log_bucket.backend, "s3");
        assert!(config.observability.metrics);
        assert!(config.api.mount_path().is_none());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
server:
  port: 9000
api:
  version_prefix: v2
table:
  backend: memory
log_bucket:
  name: my-logs
  prefix: audit/
  use_path_style: true
logging:
  format: json
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.table.backend, "memory");
        assert_eq!(config.log_bucket.name, "my-logs");
        assert_eq!(config.log_bucket.prefix, "audit/");
        assert!(config.log_bucket.use_path_style);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.api.mount_path().as_deref(), Some("/v2"));
    }

    #[test]
    fn test_parse_empty_document() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env([
            ("BOOKS_TABLE_NAME", "books"),
            ("LOG_BUCKET_NAME", "logs"),
            ("PROJECT_MAJOR_VERSION", "v1"),
            ("UNRELATED", "ignored"),
        ]);
        assert_eq!(config.table.name, "books");
        assert_eq!(config.log_bucket.name, "logs");
        assert_eq!(config.api.mount_path().as_deref(), Some("/v1"));
    }

    #[test]
    fn test_env_empty_value_ignored() {
        let mut config = Config::default();
        config.table.name = "from-file".to_string();
        config.apply_env([("BOOKS_TABLE_NAME", "")]);
        assert_eq!(config.table.name, "from-file");
    }

    #[test]
    fn test_mount_path_normalization() {
        let api = ApiConfig {
            version_prefix: Some("/v1/".to_string()),
        };
        assert_eq!(api.mount_path().as_deref(), Some("/v1"));

        let api = ApiConfig {
            version_prefix: Some("/".to_string()),
        };
        assert!(api.mount_path().is_none());
    }

    #[test]
    fn test_validate_requires_names_for_cloud_backends() {
        let config = Config::default();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("BOOKS_TABLE_NAME"));

        let mut config = Config::default();
        config.table.name = "books".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("LOG_BUCKET_NAME"));

        config.log_bucket.name = "logs".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_memory_backends() {
        let mut config = Config::default();
        config.table.backend = "memory".to_string();
        config.log_bucket.backend = "memory".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_backend() {
        let mut config = Config::default();
        config.table.backend = "sqlite".to_string();
        assert!(config.validate().is_err());
    }
}
