//! Cross-provider dispatch.
//!
//! The only fallback in the system lives here: try the primary
//! transport, then the secondary with the identical message. Neither
//! transport is retried individually; same-step retries belong to the
//! caller's backoff around render/fetch, not to dispatch.

use std::sync::Arc;

use closetrack_types::email_transport::{EmailTransport, OutgoingEmail};
use closetrack_types::types::EmailDispatchResult;

use crate::prelude::*;

pub struct EmailDispatcher {
	primary: Arc<dyn EmailTransport>,
	secondary: Option<Arc<dyn EmailTransport>>,
}

impl EmailDispatcher {
	pub fn new(primary: Arc<dyn EmailTransport>, secondary: Option<Arc<dyn EmailTransport>>) -> Self {
		Self { primary, secondary }
	}

	/// Dispatch the message; never returns an error.
	///
	/// A double failure is reported in the result with both underlying
	/// failures concatenated, so the caller can tell which layer broke.
	pub async fn dispatch(&self, email: &OutgoingEmail) -> EmailDispatchResult {
		match self.primary.send(email).await {
			Ok(message_id) => EmailDispatchResult::delivered(self.primary.name(), message_id),
			Err(primary_err) => {
				warn!(
					"Primary email provider {} failed: {}; trying fallback",
					self.primary.name(),
					primary_err
				);

				let Some(secondary) = &self.secondary else {
					return EmailDispatchResult::failed(format!(
						"{}: {}",
						self.primary.name(),
						primary_err
					));
				};

				match secondary.send(email).await {
					Ok(message_id) => {
						info!("Fallback provider {} delivered the message", secondary.name());
						EmailDispatchResult::delivered(secondary.name(), message_id)
					}
					Err(secondary_err) => EmailDispatchResult::failed(format!(
						"{}: {}; {}: {}",
						self.primary.name(),
						primary_err,
						secondary.name(),
						secondary_err
					)),
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;

	struct StubTransport {
		name: &'static str,
		outcome: Result<&'static str, &'static str>,
	}

	#[async_trait]
	impl EmailTransport for StubTransport {
		fn name(&self) -> &'static str {
			self.name
		}

		async fn send(&self, _email: &OutgoingEmail) -> CtResult<String> {
			match self.outcome {
				Ok(id) => Ok(id.to_string()),
				Err(msg) => Err(Error::DispatchError(msg.to_string())),
			}
		}
	}

	fn email() -> OutgoingEmail {
		OutgoingEmail {
			to: "agent@example.com".into(),
			from: "portal@example.com".into(),
			subject: "Disclosure ready".into(),
			html_body: "<p>Attached.</p>".into(),
			attachments: Vec::new(),
		}
	}

	#[tokio::test]
	async fn test_primary_success_skips_fallback() {
		let dispatcher = EmailDispatcher::new(
			Arc::new(StubTransport { name: "smtp", outcome: Ok("msg-1") }),
			Some(Arc::new(StubTransport { name: "email-api", outcome: Err("should not run") })),
		);
		let result = dispatcher.dispatch(&email()).await;
		assert!(result.sent);
		assert_eq!(&*result.provider, "smtp");
		assert_eq!(result.message_id.as_deref(), Some("msg-1"));
		assert!(result.error.is_none());
	}

	#[tokio::test]
	async fn test_fallback_delivers_after_primary_failure() {
		let dispatcher = EmailDispatcher::new(
			Arc::new(StubTransport { name: "smtp", outcome: Err("connection refused") }),
			Some(Arc::new(StubTransport { name: "email-api", outcome: Ok("msg-2") })),
		);
		let result = dispatcher.dispatch(&email()).await;
		assert!(result.sent);
		assert_eq!(&*result.provider, "email-api");
		assert!(result.error.is_none());
	}

	#[tokio::test]
	async fn test_double_failure_concatenates_both_errors() {
		let dispatcher = EmailDispatcher::new(
			Arc::new(StubTransport { name: "smtp", outcome: Err("connection refused") }),
			Some(Arc::new(StubTransport { name: "email-api", outcome: Err("quota exceeded") })),
		);
		let result = dispatcher.dispatch(&email()).await;
		assert!(!result.sent);
		assert!(result.message_id.is_none());
		let error = result.error.unwrap();
		assert!(error.contains("connection refused"));
		assert!(error.contains("quota exceeded"));
		assert!(error.contains("smtp"));
		assert!(error.contains("email-api"));
	}

	#[tokio::test]
	async fn test_single_provider_failure() {
		let dispatcher = EmailDispatcher::new(
			Arc::new(StubTransport { name: "smtp", outcome: Err("connection refused") }),
			None,
		);
		let result = dispatcher.dispatch(&email()).await;
		assert!(!result.sent);
		assert!(result.error.unwrap().contains("connection refused"));
	}
}

// vim: ts=4
