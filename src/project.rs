//! Project metadata taken from the crate manifest.

/// Name, version and description of the running service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl ProjectInfo {
    /// Read the `[package]` metadata compiled into this binary.
    pub fn from_manifest() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }
}
