use axum::{
	Router,
	routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::prelude::*;

pub fn init(app: App) -> Router {
	Router::new()
		.route("/api/documents", post(handler::post_document))
		.route("/healthz", get(handler::get_health))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
