//! Email transport trait
//!
//! The dispatch layer is polymorphic over `{send}`: an SMTP transport
//! and an HTTP-API transport are interchangeable behind this trait, and
//! the dispatcher falls back from primary to secondary on failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// A file attached to an outgoing email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAttachment {
	pub filename: Box<str>,
	pub content_type: Box<str>,
	pub data: Vec<u8>,
}

impl EmailAttachment {
	pub fn pdf(filename: impl Into<Box<str>>, data: Vec<u8>) -> Self {
		Self { filename: filename.into(), content_type: "application/pdf".into(), data }
	}
}

/// Email message handed to a transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingEmail {
	pub to: String,
	pub from: String,
	pub subject: String,
	pub html_body: String,
	#[serde(default)]
	pub attachments: Vec<EmailAttachment>,
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
	/// Provider name reported in `EmailDispatchResult.provider`
	fn name(&self) -> &'static str;

	/// Delivers the message, returns the provider's message id
	async fn send(&self, email: &OutgoingEmail) -> CtResult<String>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pdf_attachment_content_type() {
		let att = EmailAttachment::pdf("Disclosure_SELLER_rec1_t.pdf", vec![0x25, 0x50]);
		assert_eq!(&*att.content_type, "application/pdf");
		assert_eq!(att.data.len(), 2);
	}
}

// vim: ts=4
