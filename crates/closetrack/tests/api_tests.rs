//! HTTP surface tests: request validation and response envelopes.
//!
//! These exercise the router up to (but not including) the render step,
//! so they run without a browser installed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use closetrack::app::AppState;
use closetrack::core::config::Config;
use closetrack::core::retry::RetryPolicy;
use closetrack::doc_store::DocStoreAdapter;
use closetrack::error::CtResult;
use closetrack::render::{PageSettings, PdfRenderer};
use closetrack::routes;
use closetrack::template::TemplateStore;
use closetrack::worker::WorkerPool;

struct NullDocStore;

#[async_trait]
impl DocStoreAdapter for NullDocStore {
	async fn store_document(&self, filename: &str, _data: &[u8]) -> CtResult<Box<str>> {
		Ok(format!("/dev/null/{}", filename).into())
	}

	async fn read_document(&self, _filename: &str) -> CtResult<Box<[u8]>> {
		Err(closetrack::error::Error::NotFound)
	}

	async fn stat_document(&self, _filename: &str) -> Option<u64> {
		None
	}
}

fn test_app() -> closetrack::App {
	let config = Config {
		listen: "127.0.0.1:0".into(),
		template_dir: std::path::PathBuf::from("./templates").into(),
		output_dir: std::path::PathBuf::from("./data/generated").into(),
		file_prefix: "Disclosure".into(),
		worker_threads: 1,
		retry_attempts: 0,
		retry_base_seconds: 0,
		email_from: None,
		default_recipient: None,
		smtp: None,
		email_api: None,
		records: None,
	};
	let worker = Arc::new(WorkerPool::new(1));
	Arc::new(AppState {
		templates: TemplateStore::new(&*config.template_dir),
		renderer: PdfRenderer::new(worker.clone(), PageSettings::default()),
		doc_store: Arc::new(NullDocStore),
		dispatcher: None,
		records: None,
		retry_policy: RetryPolicy::new((0, 0), 0),
		worker,
		config,
	})
}

fn post_json(body: &str) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/api/documents")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
	let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
	let router = routes::init(test_app());
	let response = router
		.oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_empty_request_is_bad_request() {
	let router = routes::init(test_app());
	let response = router.oneshot(post_json("{}")).await.unwrap();
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let json = body_json(response).await;
	assert_eq!(json["success"], false);
	assert!(json["error"].as_str().unwrap().contains("formData"));
}

#[tokio::test]
async fn test_missing_required_fields_is_bad_request() {
	let router = routes::init(test_app());
	let response = router
		.oneshot(post_json(r#"{"formData": {"agentName": "Jane Doe"}}"#))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let json = body_json(response).await;
	assert!(json["error"].as_str().unwrap().contains("propertyAddress"));
}

#[tokio::test]
async fn test_record_reference_without_record_store() {
	// tableId/recordId requests need the record store configured
	let router = routes::init(test_app());
	let response = router
		.oneshot(post_json(r#"{"tableId": "tblX", "recordId": "recY"}"#))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	let json = body_json(response).await;
	assert!(json["error"].as_str().unwrap().contains("record store"));
}

#[tokio::test]
async fn test_wrong_method_is_method_not_allowed() {
	let router = routes::init(test_app());
	let response = router
		.oneshot(Request::builder().uri("/api/documents").body(Body::empty()).unwrap())
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// vim: ts=4
