//! Error type shared across the Closetrack crates.
//!
//! Hand-rolled enum with an axum `IntoResponse` impl so handlers can
//! bubble errors with `?` and still produce the JSON error envelope the
//! portal frontend expects.

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type CtResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Requested record or template does not exist
	NotFound,
	/// Request payload failed validation (missing fields, bad addresses)
	ValidationError(String),
	/// Missing or inconsistent configuration, detected at startup or first use
	ConfigError(String),
	/// The external record store could not produce the record
	FetchError(String),
	/// Headless-browser render failed (launch, settle timeout, serialization)
	RenderError(String),
	/// An email provider rejected or failed to deliver the message
	DispatchError(String),
	/// A downstream service is temporarily unreachable
	ServiceUnavailable(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::FetchError(msg) => write!(f, "record fetch error: {}", msg),
			Error::RenderError(msg) => write!(f, "render error: {}", msg),
			Error::DispatchError(msg) => write!(f, "email dispatch error: {}", msg),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		let body = serde_json::json!({
			"success": false,
			"error": self.to_string(),
		});
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
