//! App builder - constructs and runs the Closetrack service

use std::sync::Arc;

use closetrack_core::config::Config;
use closetrack_core::retry::RetryPolicy;
use closetrack_email::{EmailDispatcher, HttpApiEmailTransport, SmtpEmailTransport};
use closetrack_records::RecordStoreClient;
use closetrack_render::{PageSettings, PdfRenderer};
use closetrack_template::TemplateStore;
use closetrack_types::doc_store::DocStoreAdapter;
use closetrack_types::email_transport::EmailTransport;
use closetrack_types::worker::WorkerPool;

use crate::prelude::*;
use crate::routes;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub config: Config,
	pub worker: Arc<WorkerPool>,
	pub templates: TemplateStore,
	pub renderer: PdfRenderer,
	pub doc_store: Arc<dyn DocStoreAdapter>,
	pub dispatcher: Option<EmailDispatcher>,
	pub records: Option<RecordStoreClient>,
	pub retry_policy: RetryPolicy,
}

pub type App = Arc<AppState>;

pub struct AppBuilder {
	config: Option<Config>,
	worker: Option<Arc<WorkerPool>>,
	doc_store: Option<Arc<dyn DocStoreAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		AppBuilder { config: None, worker: None, doc_store: None }
	}

	pub fn config(&mut self, config: Config) -> &mut Self {
		self.config = Some(config);
		self
	}

	pub fn worker(&mut self, worker: Arc<WorkerPool>) -> &mut Self {
		self.worker = Some(worker);
		self
	}

	pub fn doc_store(&mut self, doc_store: Arc<dyn DocStoreAdapter>) -> &mut Self {
		self.doc_store = Some(doc_store);
		self
	}

	/// Assemble the application state without starting the server
	pub fn build(self) -> CtResult<App> {
		let config = match self.config {
			Some(config) => config,
			None => Config::from_env()?,
		};
		let Some(doc_store) = self.doc_store else {
			error!("FATAL: No document store configured");
			return Err(Error::Internal("No document store configured".to_string()));
		};

		let worker =
			self.worker.unwrap_or_else(|| Arc::new(WorkerPool::new(config.worker_threads)));

		// Email transports: SMTP is the primary when both are configured
		let mut transports: Vec<Arc<dyn EmailTransport>> = Vec::new();
		if let Some(smtp) = &config.smtp {
			transports.push(Arc::new(SmtpEmailTransport::new(smtp)?));
		}
		if let Some(api) = &config.email_api {
			transports.push(Arc::new(HttpApiEmailTransport::new(api)));
		}
		let mut transports = transports.into_iter();
		let dispatcher =
			transports.next().map(|primary| EmailDispatcher::new(primary, transports.next()));
		if dispatcher.is_none() {
			warn!("No email provider configured, documents will not be dispatched");
		}

		let records = config.records.as_ref().map(RecordStoreClient::new);
		let templates = TemplateStore::new(&*config.template_dir);
		let renderer = PdfRenderer::new(worker.clone(), PageSettings::default());
		let retry_policy =
			RetryPolicy::new((config.retry_base_seconds, 60), config.retry_attempts);

		Ok(Arc::new(AppState {
			config,
			worker,
			templates,
			renderer,
			doc_store,
			dispatcher,
			records,
			retry_policy,
		}))
	}

	pub async fn run(self) -> CtResult<()> {
		let app = self.build()?;

		info!("Closetrack v{}", VERSION);
		info!("Listening on {}", app.config.listen);

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(&*app.config.listen).await?;
		axum::serve(listener, router)
			.await
			.map_err(|e| Error::Internal(format!("server error: {}", e)))?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
