//! Document store adapter trait
//!
//! Generated PDFs are persisted through this seam so a
//! generated-but-unsent document can always be recovered. Filenames are
//! timestamp-suffixed by the renderer, so adapters never need locking.

use async_trait::async_trait;

use crate::prelude::*;

#[async_trait]
pub trait DocStoreAdapter: Send + Sync {
	/// Persists a generated document, returns its stored location
	/// (local path or object-store URL)
	async fn store_document(&self, filename: &str, data: &[u8]) -> CtResult<Box<str>>;

	/// Reads a stored document back
	async fn read_document(&self, filename: &str) -> CtResult<Box<[u8]>>;

	/// Checks if a document exists, returns its size
	async fn stat_document(&self, filename: &str) -> Option<u64>;
}

// vim: ts=4
