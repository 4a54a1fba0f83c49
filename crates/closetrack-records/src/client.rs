//! REST client for the transaction record store.

use serde::Deserialize;

use closetrack_core::config::RecordsConfig;
use closetrack_types::types::TransactionRecord;

use crate::prelude::*;

/// Record envelope as returned by the store
#[derive(Debug, Deserialize)]
struct RecordEnvelope {
	#[allow(dead_code)]
	id: String,
	#[serde(default)]
	fields: TransactionRecord,
}

pub struct RecordStoreClient {
	client: reqwest::Client,
	api_url: Box<str>,
	api_key: Box<str>,
	base_id: Box<str>,
}

impl RecordStoreClient {
	pub fn new(config: &RecordsConfig) -> Self {
		Self {
			client: reqwest::Client::new(),
			api_url: config.api_url.clone(),
			api_key: config.api_key.clone(),
			base_id: config.base_id.clone(),
		}
	}

	fn record_url(&self, table_id: &str, record_id: &str) -> String {
		format!(
			"{}/{}/{}/{}",
			self.api_url.trim_end_matches('/'),
			self.base_id,
			table_id,
			record_id
		)
	}

	/// Fetch a transaction record by table and record id.
	///
	/// A missing record is `NotFound`; any other non-2xx answer or a
	/// malformed body is a `FetchError`. The call site wraps this with
	/// backoff retry.
	pub async fn fetch(&self, table_id: &str, record_id: &str) -> CtResult<TransactionRecord> {
		let url = self.record_url(table_id, record_id);
		debug!("Fetching record: {}/{}", table_id, record_id);

		let response = self
			.client
			.get(&url)
			.bearer_auth(&*self.api_key)
			.send()
			.await
			.map_err(|e| Error::FetchError(format!("record store unreachable: {}", e)))?;

		let status = response.status();
		if status == reqwest::StatusCode::NOT_FOUND {
			return Err(Error::NotFound);
		}
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(Error::FetchError(format!("record store returned {}: {}", status, body)));
		}

		let envelope: RecordEnvelope = response
			.json()
			.await
			.map_err(|e| Error::FetchError(format!("malformed record payload: {}", e)))?;

		Ok(envelope.fields)
	}
}


// vim: ts=4
