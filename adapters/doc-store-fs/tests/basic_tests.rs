//! Basic document store operation tests
//!
//! Tests store / read / stat round-trips for the filesystem adapter

use closetrack::doc_store::DocStoreAdapter;
use closetrack_doc_store_fs::DocStoreFs;
use tempfile::TempDir;

async fn create_test_adapter() -> (DocStoreFs, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = DocStoreFs::new(temp_dir.path().into())
		.await
		.expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_store_and_read_document() {
	let (adapter, _temp) = create_test_adapter().await;
	let filename = "Disclosure_SELLER_rec12AbC_2026-08-06T15-04-05-000Z.pdf";
	let test_data = b"%PDF-1.7 fake document";

	let path = adapter
		.store_document(filename, test_data)
		.await
		.expect("Failed to store document");
	assert!(path.ends_with(filename));

	let read_back = adapter.read_document(filename).await.expect("Failed to read document");
	assert_eq!(&*read_back, test_data.as_slice());
}

#[tokio::test]
async fn test_stat_document() {
	let (adapter, _temp) = create_test_adapter().await;
	let filename = "Disclosure_BUYER_rec1_2026-01-01T00-00-00-000Z.pdf";
	let test_data = b"%PDF-1.7";

	adapter.store_document(filename, test_data).await.expect("Failed to store document");

	let size = adapter.stat_document(filename).await.expect("Failed to stat document");
	assert_eq!(size as usize, test_data.len());
}

#[tokio::test]
async fn test_stat_missing_document() {
	let (adapter, _temp) = create_test_adapter().await;
	assert!(adapter.stat_document("Disclosure_DUAL_missing_t.pdf").await.is_none());
}

#[tokio::test]
async fn test_store_empty_document() {
	let (adapter, _temp) = create_test_adapter().await;
	let filename = "Disclosure_SELLER_empty_2026-01-01T00-00-00-000Z.pdf";

	adapter.store_document(filename, b"").await.expect("Failed to store empty document");

	let size = adapter.stat_document(filename).await.expect("Failed to stat document");
	assert_eq!(size, 0);
}

#[tokio::test]
async fn test_overwrite_same_filename() {
	// identical filenames are a known collision risk; last write wins
	let (adapter, _temp) = create_test_adapter().await;
	let filename = "Disclosure_SELLER_same_2026-01-01T00-00-00-000Z.pdf";

	adapter.store_document(filename, b"first").await.expect("Failed to store document");
	adapter.store_document(filename, b"second").await.expect("Failed to store document");

	let read_back = adapter.read_document(filename).await.expect("Failed to read document");
	assert_eq!(&*read_back, b"second".as_slice());
}

// vim: ts=4
