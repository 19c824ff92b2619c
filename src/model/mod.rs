//! Domain value objects: the [`book::Book`] payload and the
//! [`access_log::AccessLog`] audit record.

pub mod access_log;
pub mod book;

pub use access_log::{AccessLog, BookAction};
pub use book::Book;
