//! The `Book` payload shared by the HTTP API and the books table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered book, keyed by its ISBN.
///
/// The ISBN is caller-supplied and taken verbatim; no checksum or format
/// validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// ISBN code of the book.
    #[schema(example = "9780000000001")]
    pub isbn: String,
    /// Title of the book.
    pub title: String,
    /// Author of the book.
    pub author: String,
    /// Publisher of the book, if known. Serialized as `null` when absent.
    #[serde(default)]
    pub publisher: Option<String>,
}
