//! In-memory book store.
//!
//! Stores all rows in memory with no persistence. Useful for testing and
//! local runs without a table. Uses `RwLock<HashMap>` for thread-safe access.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::book_store::{format_timestamp, BookRecord, BookStore, BookStoreError, BookStoreResult};
use crate::model::Book;

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    rows: RwLock<HashMap<String, BookRecord>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.read_rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every mutation is a single insert or remove, so a poisoned map is
    // still consistent.
    fn read_rows(&self) -> RwLockReadGuard<'_, HashMap<String, BookRecord>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_rows(&self) -> RwLockWriteGuard<'_, HashMap<String, BookRecord>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BookStore for MemoryBookStore {
    fn save(&self, book: Book) -> Pin<Box<dyn Future<Output = BookStoreResult<()>> + Send + '_>> {
        Box::pin(async move {
            let now = format_timestamp(Utc::now());
            let mut rows = self.write_rows();
            let created_at = rows
                .get(&book.isbn)
                .map(|existing| existing.created_at.clone())
                .unwrap_or_else(|| now.clone());
            rows.insert(
                book.isbn.clone(),
                BookRecord {
                    book,
                    created_at,
                    updated_at: now,
                },
            );
            Ok(())
        })
    }

    fn get(
        &self,
        isbn: &str,
    ) -> Pin<Box<dyn Future<Output = BookStoreResult<BookRecord>> + Send + '_>> {
        let isbn = isbn.to_string();
        Box::pin(async move {
            let rows = self.read_rows();
            rows.get(&isbn)
                .cloned()
                .ok_or(BookStoreError::NotFound { isbn })
        })
    }

    fn delete(&self, isbn: &str) -> Pin<Box<dyn Future<Output = BookStoreResult<()>> + Send + '_>> {
        let isbn = isbn.to_string();
        Box::pin(async move {
            let mut rows = self.write_rows();
            match rows.remove(&isbn) {
                Some(_) => Ok(()),
                None => Err(BookStoreError::NotFound { isbn }),
            }
        })
    }
}
