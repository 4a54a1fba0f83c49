use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
	fs::{File, create_dir_all, metadata},
	io::{AsyncReadExt, AsyncWriteExt},
};

use closetrack::{doc_store::DocStoreAdapter, prelude::*};

/// Filesystem document store. Documents land flat under the base
/// directory; filenames are already unique (role + identifier +
/// timestamp), so there is no sharding and no locking.
#[derive(Debug)]
pub struct DocStoreFs {
	base_dir: Box<Path>,
}

impl DocStoreFs {
	pub async fn new(base_dir: Box<Path>) -> Result<Self, Error> {
		create_dir_all(&base_dir).await?;
		Ok(Self { base_dir })
	}

	/// Filenames come from the renderer, but a hostile caller must not
	/// be able to escape the base directory
	fn doc_path(&self, filename: &str) -> CtResult<PathBuf> {
		if filename.is_empty()
			|| filename.contains('/')
			|| filename.contains('\\')
			|| filename.contains("..")
		{
			return Err(Error::ValidationError(format!("invalid document filename: {}", filename)));
		}
		Ok(self.base_dir.join(filename))
	}
}

#[async_trait]
impl DocStoreAdapter for DocStoreFs {
	/// Persists a generated document
	async fn store_document(&self, filename: &str, data: &[u8]) -> CtResult<Box<str>> {
		let path = self.doc_path(filename)?;
		info!("store_document: {:?}", path);

		let mut file = File::create(&path).await?;
		file.write_all(data).await?;
		file.sync_all().await?;

		Ok(path.to_string_lossy().into())
	}

	/// Reads a stored document back
	async fn read_document(&self, filename: &str) -> CtResult<Box<[u8]>> {
		let path = self.doc_path(filename)?;
		let mut file = File::open(&path).await.map_err(|_| Error::NotFound)?;
		let mut buf: Vec<u8> = Vec::new();
		file.read_to_end(&mut buf).await?;

		Ok(buf.into_boxed_slice())
	}

	/// Checks if a document exists, returns its size
	async fn stat_document(&self, filename: &str) -> Option<u64> {
		let path = self.doc_path(filename).ok()?;
		let file_metadata = metadata(&path).await.ok()?;
		Some(file_metadata.len())
	}
}

// vim: ts=4
