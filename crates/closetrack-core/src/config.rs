//! Environment-based configuration.
//!
//! All settings come from the process environment and are validated at
//! startup: a partially-configured SMTP / email-API / record-store
//! block is a hard `ConfigError` naming the missing variable, never a
//! silent no-op at send time.

use std::path::{Path, PathBuf};

use crate::prelude::*;

/// TLS handling for the SMTP transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTlsMode {
	None,
	StartTls,
	Tls,
}

impl SmtpTlsMode {
	pub fn parse(value: &str) -> CtResult<Self> {
		match value {
			"none" => Ok(SmtpTlsMode::None),
			"starttls" => Ok(SmtpTlsMode::StartTls),
			"tls" => Ok(SmtpTlsMode::Tls),
			_ => Err(Error::ConfigError(format!(
				"Invalid TLS mode: {}. Must be 'none', 'starttls', or 'tls'",
				value
			))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
	pub host: Box<str>,
	pub port: u16,
	pub tls_mode: SmtpTlsMode,
	pub username: Box<str>,
	pub password: Box<str>,
	pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct EmailApiConfig {
	pub url: Box<str>,
	pub api_key: Box<str>,
}

#[derive(Debug, Clone)]
pub struct RecordsConfig {
	pub api_url: Box<str>,
	pub api_key: Box<str>,
	pub base_id: Box<str>,
}

#[derive(Debug, Clone)]
pub struct Config {
	pub listen: Box<str>,
	pub template_dir: Box<Path>,
	pub output_dir: Box<Path>,
	/// First segment of generated filenames
	pub file_prefix: Box<str>,
	pub worker_threads: usize,
	pub retry_attempts: u16,
	pub retry_base_seconds: u64,

	pub email_from: Option<Box<str>>,
	pub default_recipient: Option<Box<str>>,
	pub smtp: Option<SmtpConfig>,
	pub email_api: Option<EmailApiConfig>,
	pub records: Option<RecordsConfig>,
}

impl Config {
	pub fn from_env() -> CtResult<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// At least one email provider is configured
	pub fn email_enabled(&self) -> bool {
		self.smtp.is_some() || self.email_api.is_some()
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CtResult<Self> {
		// Empty values count as unset
		let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

		let listen = var("CLOSETRACK_LISTEN").unwrap_or_else(|| "127.0.0.1:8080".into());
		let template_dir = PathBuf::from(var("CLOSETRACK_TEMPLATE_DIR").unwrap_or_else(|| "./templates".into()));
		let output_dir = PathBuf::from(var("CLOSETRACK_OUTPUT_DIR").unwrap_or_else(|| "./data/generated".into()));
		let file_prefix = var("CLOSETRACK_FILE_PREFIX").unwrap_or_else(|| "Disclosure".into());
		let worker_threads = parse_num("CLOSETRACK_WORKER_THREADS", var("CLOSETRACK_WORKER_THREADS"), 2)?;
		let retry_attempts = parse_num("CLOSETRACK_RETRY_ATTEMPTS", var("CLOSETRACK_RETRY_ATTEMPTS"), 3u16)?;
		let retry_base_seconds =
			parse_num("CLOSETRACK_RETRY_BASE_SECONDS", var("CLOSETRACK_RETRY_BASE_SECONDS"), 2u64)?;

		let smtp = match var("SMTP_HOST") {
			Some(host) => Some(SmtpConfig {
				host: host.into(),
				port: parse_num("SMTP_PORT", var("SMTP_PORT"), 587u16)?,
				tls_mode: SmtpTlsMode::parse(
					var("SMTP_TLS_MODE").as_deref().unwrap_or("starttls"),
				)?,
				username: require("SMTP_USERNAME", var("SMTP_USERNAME"), "SMTP_HOST")?,
				password: require("SMTP_PASSWORD", var("SMTP_PASSWORD"), "SMTP_HOST")?,
				timeout_seconds: parse_num("SMTP_TIMEOUT_SECONDS", var("SMTP_TIMEOUT_SECONDS"), 10u64)?,
			}),
			None => {
				for leftover in ["SMTP_USERNAME", "SMTP_PASSWORD"] {
					if var(leftover).is_some() {
						return Err(Error::ConfigError(format!(
							"{} is set but SMTP_HOST is missing",
							leftover
						)));
					}
				}
				None
			}
		};

		let email_api = var("EMAIL_API_KEY").map(|api_key| EmailApiConfig {
			url: var("EMAIL_API_URL")
				.unwrap_or_else(|| "https://api.resend.com/emails".into())
				.into(),
			api_key: api_key.into(),
		});

		let records = match (var("RECORDS_API_KEY"), var("RECORDS_BASE_ID")) {
			(Some(api_key), Some(base_id)) => Some(RecordsConfig {
				api_url: var("RECORDS_API_URL")
					.unwrap_or_else(|| "https://api.airtable.com/v0".into())
					.into(),
				api_key: api_key.into(),
				base_id: base_id.into(),
			}),
			(None, None) => None,
			(Some(_), None) => {
				return Err(Error::ConfigError(
					"RECORDS_API_KEY is set but RECORDS_BASE_ID is missing".into(),
				));
			}
			(None, Some(_)) => {
				return Err(Error::ConfigError(
					"RECORDS_BASE_ID is set but RECORDS_API_KEY is missing".into(),
				));
			}
		};

		let email_from = var("EMAIL_FROM");
		if (smtp.is_some() || email_api.is_some()) && email_from.is_none() {
			return Err(Error::ConfigError(
				"EMAIL_FROM is required when an email provider is configured".into(),
			));
		}

		Ok(Self {
			listen: listen.into(),
			template_dir: template_dir.into(),
			output_dir: output_dir.into(),
			file_prefix: file_prefix.into(),
			worker_threads,
			retry_attempts,
			retry_base_seconds,
			email_from: email_from.map(Into::into),
			default_recipient: var("EMAIL_DEFAULT_RECIPIENT").map(Into::into),
			smtp,
			email_api,
			records,
		})
	}
}

fn require(name: &str, value: Option<String>, because: &str) -> CtResult<Box<str>> {
	value.map(Into::into).ok_or_else(|| {
		Error::ConfigError(format!("{} is required when {} is set", name, because))
	})
}

fn parse_num<T: std::str::FromStr>(name: &str, value: Option<String>, default: T) -> CtResult<T> {
	match value {
		Some(raw) => raw
			.parse()
			.map_err(|_| Error::ConfigError(format!("{} is not a valid number: {}", name, raw))),
		None => Ok(default),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config_from(pairs: &[(&str, &str)]) -> CtResult<Config> {
		let map: HashMap<String, String> =
			pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
		Config::from_lookup(|name| map.get(name).cloned())
	}

	#[test]
	fn test_defaults_with_empty_environment() {
		let config = config_from(&[]).unwrap();
		assert_eq!(&*config.listen, "127.0.0.1:8080");
		assert_eq!(&*config.file_prefix, "Disclosure");
		assert!(config.smtp.is_none());
		assert!(config.records.is_none());
		assert!(!config.email_enabled());
	}

	#[test]
	fn test_full_smtp_block() {
		let config = config_from(&[
			("SMTP_HOST", "smtp.example.com"),
			("SMTP_PORT", "465"),
			("SMTP_TLS_MODE", "tls"),
			("SMTP_USERNAME", "mailer"),
			("SMTP_PASSWORD", "hunter2"),
			("EMAIL_FROM", "portal@example.com"),
		])
		.unwrap();
		let smtp = config.smtp.as_ref().unwrap();
		assert_eq!(&*smtp.host, "smtp.example.com");
		assert_eq!(smtp.port, 465);
		assert_eq!(smtp.tls_mode, SmtpTlsMode::Tls);
		assert!(config.email_enabled());
	}

	#[test]
	fn test_partial_smtp_block_is_config_error() {
		let result = config_from(&[
			("SMTP_HOST", "smtp.example.com"),
			("SMTP_USERNAME", "mailer"),
			("EMAIL_FROM", "portal@example.com"),
		]);
		match result {
			Err(Error::ConfigError(msg)) => assert!(msg.contains("SMTP_PASSWORD")),
			other => panic!("expected ConfigError, got {:?}", other),
		}
	}

	#[test]
	fn test_orphan_smtp_credentials_rejected() {
		let result = config_from(&[("SMTP_PASSWORD", "hunter2")]);
		match result {
			Err(Error::ConfigError(msg)) => assert!(msg.contains("SMTP_HOST")),
			other => panic!("expected ConfigError, got {:?}", other),
		}
	}

	#[test]
	fn test_email_provider_requires_from_address() {
		let result = config_from(&[("EMAIL_API_KEY", "re_123")]);
		match result {
			Err(Error::ConfigError(msg)) => assert!(msg.contains("EMAIL_FROM")),
			other => panic!("expected ConfigError, got {:?}", other),
		}
	}

	#[test]
	fn test_partial_records_block_is_config_error() {
		let result = config_from(&[("RECORDS_API_KEY", "key123")]);
		assert!(matches!(result, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_records_block_with_default_url() {
		let config =
			config_from(&[("RECORDS_API_KEY", "key123"), ("RECORDS_BASE_ID", "appXYZ")]).unwrap();
		let records = config.records.unwrap();
		assert_eq!(&*records.api_url, "https://api.airtable.com/v0");
		assert_eq!(&*records.base_id, "appXYZ");
	}

	#[test]
	fn test_invalid_tls_mode() {
		let result = config_from(&[
			("SMTP_HOST", "smtp.example.com"),
			("SMTP_TLS_MODE", "ssl3"),
			("SMTP_USERNAME", "mailer"),
			("SMTP_PASSWORD", "hunter2"),
			("EMAIL_FROM", "portal@example.com"),
		]);
		assert!(matches!(result, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_invalid_number_rejected() {
		let result = config_from(&[("CLOSETRACK_RETRY_ATTEMPTS", "lots")]);
		assert!(matches!(result, Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
