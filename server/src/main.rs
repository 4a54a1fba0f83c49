use std::sync::Arc;

use closetrack::AppBuilder;
use closetrack::core::Config;
use closetrack_doc_store_fs::DocStoreFs;

#[tokio::main]
async fn main() {
	let mut builder = AppBuilder::new();

	let config = match Config::from_env() {
		Ok(config) => config,
		Err(e) => {
			tracing::error!("FATAL: {}", e);
			std::process::exit(1);
		}
	};

	let doc_store = match DocStoreFs::new((&*config.output_dir).into()).await {
		Ok(doc_store) => Arc::new(doc_store),
		Err(e) => {
			tracing::error!("FATAL: cannot open output directory: {}", e);
			std::process::exit(1);
		}
	};

	builder.config(config).doc_store(doc_store);

	if let Err(e) = builder.run().await {
		tracing::error!("FATAL: {}", e);
		std::process::exit(1);
	}
}

// vim: ts=4
