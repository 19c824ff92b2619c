//! Abstract book store trait.
//!
//! Any table backend must implement [`BookStore`].  Methods return pinned
//! boxed futures so the trait stays object-safe behind `Arc<dyn BookStore>`.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::Book;

/// Errors surfaced by a [`BookStore`].
#[derive(Debug, Error)]
pub enum BookStoreError {
    /// No row exists for the requested ISBN.
    #[error("Book with ISBN {isbn} not found")]
    NotFound { isbn: String },

    /// Any other failure talking to the backing table.
    #[error("book store backend error: {0:#}")]
    Backend(#[from] anyhow::Error),
}

pub type BookStoreResult<T> = Result<T, BookStoreError>;

/// A persisted book row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// The book fields as submitted.
    pub book: Book,
    /// Timestamp of the first write for this ISBN.
    pub created_at: String,
    /// Timestamp of the most recent write for this ISBN.
    pub updated_at: String,
}

impl BookRecord {
    /// Strip the bookkeeping timestamps, returning the API shape.
    pub fn into_book(self) -> Book {
        self.book
    }
}

/// Format a row timestamp (`2025-01-01T00:00:00.000000+0000`).
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.6f+0000").to_string()
}

/// Single-table book persistence keyed by ISBN.
pub trait BookStore: Send + Sync + 'static {
    /// Insert or replace the row for `book.isbn`. Last write wins.
    fn save(&self, book: Book) -> Pin<Box<dyn Future<Output = BookStoreResult<()>> + Send + '_>>;

    /// Fetch the row for `isbn`, or [`BookStoreError::NotFound`].
    fn get(
        &self,
        isbn: &str,
    ) -> Pin<Box<dyn Future<Output = BookStoreResult<BookRecord>> + Send + '_>>;

    /// Remove the row for `isbn`, or [`BookStoreError::NotFound`] if absent.
    fn delete(&self, isbn: &str) -> Pin<Box<dyn Future<Output = BookStoreResult<()>> + Send + '_>>;
}
