//! SMTP email transport using lettre
//!
//! Handles SMTP connection setup and delivery of multipart messages
//! with PDF attachments.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use closetrack_core::config::{SmtpConfig, SmtpTlsMode};
use closetrack_types::email_transport::{EmailTransport, OutgoingEmail};

use crate::prelude::*;

pub struct SmtpEmailTransport {
	mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailTransport {
	/// Build the transport from validated SMTP configuration
	pub fn new(config: &SmtpConfig) -> CtResult<Self> {
		let tls = match config.tls_mode {
			SmtpTlsMode::Tls => {
				debug!("Using TLS mode");
				Tls::Wrapper(
					TlsParameters::builder(config.host.to_string())
						.build()
						.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
				)
			}
			SmtpTlsMode::StartTls => {
				debug!("Using STARTTLS mode");
				Tls::Opportunistic(
					TlsParameters::builder(config.host.to_string())
						.build()
						.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
				)
			}
			SmtpTlsMode::None => {
				debug!("No TLS mode");
				Tls::None
			}
		};

		let credentials =
			Credentials::new(config.username.to_string(), config.password.to_string());
		let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&*config.host)
			.port(config.port)
			.timeout(Some(Duration::from_secs(config.timeout_seconds)))
			.tls(tls)
			.credentials(credentials)
			.build();

		Ok(Self { mailer })
	}

	fn build_message(email: &OutgoingEmail) -> CtResult<Message> {
		if !email.to.contains('@') {
			return Err(Error::ValidationError("Invalid recipient email address".into()));
		}
		if !email.from.contains('@') {
			return Err(Error::ValidationError("Invalid from email address".into()));
		}

		let mut multipart =
			MultiPart::mixed().singlepart(SinglePart::html(email.html_body.clone()));
		for attachment in &email.attachments {
			let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
				Error::ValidationError(format!(
					"Invalid attachment content type {}: {}",
					attachment.content_type, e
				))
			})?;
			multipart = multipart.singlepart(
				Attachment::new(attachment.filename.to_string())
					.body(attachment.data.clone(), content_type),
			);
		}

		Message::builder()
			.from(
				email
					.from
					.parse()
					.map_err(|_| Error::ValidationError("Invalid from email format".into()))?,
			)
			.to(email
				.to
				.parse()
				.map_err(|_| Error::ValidationError("Invalid recipient email format".into()))?)
			.subject(&email.subject)
			.multipart(multipart)
			.map_err(|e| Error::ValidationError(format!("Failed to build email: {}", e)))
	}
}

#[async_trait]
impl EmailTransport for SmtpEmailTransport {
	fn name(&self) -> &'static str {
		"smtp"
	}

	async fn send(&self, email: &OutgoingEmail) -> CtResult<String> {
		let message = Self::build_message(email)?;

		match self.mailer.send(message).await {
			Ok(response) => {
				info!("Email sent via SMTP to {} (code: {})", email.to, response.code());
				let message_id = response
					.message()
					.next()
					.map_or_else(|| "accepted".to_string(), ToString::to_string);
				Ok(message_id)
			}
			Err(e) => {
				warn!("SMTP send to {} failed: {}", email.to, e);
				Err(Error::DispatchError(format!("SMTP send failed: {}", e)))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use closetrack_types::email_transport::EmailAttachment;

	fn sample_email() -> OutgoingEmail {
		OutgoingEmail {
			to: "agent@example.com".into(),
			from: "Closetrack Portal <portal@example.com>".into(),
			subject: "Disclosure ready".into(),
			html_body: "<p>Attached.</p>".into(),
			attachments: vec![EmailAttachment::pdf("Disclosure.pdf", vec![0x25, 0x50, 0x44, 0x46])],
		}
	}

	#[test]
	fn test_build_message_with_attachment() {
		let message = SmtpEmailTransport::build_message(&sample_email()).unwrap();
		let raw = String::from_utf8(message.formatted()).unwrap();
		assert!(raw.contains("Subject: Disclosure ready"));
		assert!(raw.contains("application/pdf"));
		assert!(raw.contains("Disclosure.pdf"));
	}

	#[test]
	fn test_invalid_recipient_rejected() {
		let mut email = sample_email();
		email.to = "not-an-address".into();
		let result = SmtpEmailTransport::build_message(&email);
		assert!(matches!(result, Err(Error::ValidationError(_))));
	}

	#[test]
	fn test_invalid_from_rejected() {
		let mut email = sample_email();
		email.from = "portal".into();
		let result = SmtpEmailTransport::build_message(&email);
		assert!(matches!(result, Err(Error::ValidationError(_))));
	}
}

// vim: ts=4
