//! HTTP-API email transport.
//!
//! Posts a Resend-style JSON payload with base64 attachments. Any
//! non-2xx response is a dispatch failure carrying the response body so
//! the dispatcher can report which layer rejected the message.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use closetrack_core::config::EmailApiConfig;
use closetrack_types::email_transport::{EmailTransport, OutgoingEmail};

use crate::prelude::*;

#[derive(Serialize)]
struct ApiPayload<'a> {
	from: &'a str,
	to: [&'a str; 1],
	subject: &'a str,
	html: &'a str,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	attachments: Vec<ApiAttachment>,
}

#[derive(Serialize)]
struct ApiAttachment {
	filename: String,
	content: String,
}

#[derive(Deserialize)]
struct ApiResponse {
	#[serde(default)]
	id: Option<String>,
}

pub struct HttpApiEmailTransport {
	client: reqwest::Client,
	url: Box<str>,
	api_key: Box<str>,
}

impl HttpApiEmailTransport {
	pub fn new(config: &EmailApiConfig) -> Self {
		Self {
			client: reqwest::Client::new(),
			url: config.url.clone(),
			api_key: config.api_key.clone(),
		}
	}
}

#[async_trait]
impl EmailTransport for HttpApiEmailTransport {
	fn name(&self) -> &'static str {
		"email-api"
	}

	async fn send(&self, email: &OutgoingEmail) -> CtResult<String> {
		let payload = ApiPayload {
			from: &email.from,
			to: [&email.to],
			subject: &email.subject,
			html: &email.html_body,
			attachments: email
				.attachments
				.iter()
				.map(|a| ApiAttachment {
					filename: a.filename.to_string(),
					content: STANDARD.encode(&a.data),
				})
				.collect(),
		};

		let response = self
			.client
			.post(&*self.url)
			.bearer_auth(&*self.api_key)
			.json(&payload)
			.send()
			.await
			.map_err(|e| Error::ServiceUnavailable(format!("email API unreachable: {}", e)))?;

		let status = response.status();
		if status.is_success() {
			let body: ApiResponse = response.json().await.unwrap_or(ApiResponse { id: None });
			let message_id = body.id.unwrap_or_else(|| "accepted".to_string());
			info!("Email sent via API to {} (id: {})", email.to, message_id);
			Ok(message_id)
		} else {
			let body = response.text().await.unwrap_or_default();
			warn!("Email API rejected message to {}: {} {}", email.to, status, body);
			Err(Error::DispatchError(format!("email API returned {}: {}", status, body)))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use closetrack_types::email_transport::EmailAttachment;

	#[test]
	fn test_payload_shape() {
		let email = OutgoingEmail {
			to: "agent@example.com".into(),
			from: "portal@example.com".into(),
			subject: "Disclosure ready".into(),
			html_body: "<p>Attached.</p>".into(),
			attachments: vec![EmailAttachment::pdf("Disclosure.pdf", vec![1, 2, 3])],
		};
		let payload = ApiPayload {
			from: &email.from,
			to: [&email.to],
			subject: &email.subject,
			html: &email.html_body,
			attachments: email
				.attachments
				.iter()
				.map(|a| ApiAttachment {
					filename: a.filename.to_string(),
					content: STANDARD.encode(&a.data),
				})
				.collect(),
		};
		let json = serde_json::to_value(&payload).unwrap();
		assert_eq!(json["to"][0], "agent@example.com");
		assert_eq!(json["attachments"][0]["filename"], "Disclosure.pdf");
		// base64 of [1, 2, 3]
		assert_eq!(json["attachments"][0]["content"], "AQID");
	}

	#[test]
	fn test_attachments_omitted_when_empty() {
		let payload = ApiPayload {
			from: "a@b.c",
			to: ["d@e.f"],
			subject: "s",
			html: "<p></p>",
			attachments: Vec::new(),
		};
		let json = serde_json::to_value(&payload).unwrap();
		assert!(json.get("attachments").is_none());
	}
}

// vim: ts=4
