//! REST endpoints for the document service

use axum::{Json, extract::State};

use closetrack_types::types::{GenerateRequest, GenerateResponse};

use crate::pipeline;
use crate::prelude::*;

/// `POST /api/documents`
///
/// Accepts either a direct `formData` payload or a
/// `tableId`/`recordId` reference into the record store. A dispatch
/// failure is reported inside a 200 response (`emailSent: false`)
/// because the document itself was generated; only input, fetch, and
/// render failures produce error statuses.
pub async fn post_document(
	State(app): State<App>,
	Json(request): Json<GenerateRequest>,
) -> CtResult<Json<GenerateResponse>> {
	let response = pipeline::generate(&app, request).await?;
	Ok(Json(response))
}

/// `GET /healthz`
pub async fn get_health() -> Json<serde_json::Value> {
	Json(serde_json::json!({
		"status": "ok",
		"version": crate::VERSION,
	}))
}

// vim: ts=4
