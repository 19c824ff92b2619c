//! Blob storage for access-log objects.
//!
//! The [`backend::BlobStore`] trait abstracts over where log objects are
//! written.  [`aws::S3BlobStore`] writes to the provisioned log bucket;
//! [`memory::MemoryBlobStore`] keeps objects in memory.

pub mod aws;
pub mod backend;
pub mod memory;

pub use backend::BlobStore;
