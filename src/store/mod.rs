//! Books table persistence.
//!
//! The [`book_store::BookStore`] trait defines the upsert/get/delete
//! contract keyed by ISBN; [`dynamodb::DynamoDbBookStore`] is the
//! production implementation and [`memory::MemoryBookStore`] backs local
//! runs and tests.

pub mod book_store;
pub mod dynamodb;
pub mod memory;

pub use book_store::{BookRecord, BookStore, BookStoreError, BookStoreResult};
