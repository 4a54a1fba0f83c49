//! Template file store.
//!
//! The three disclosure templates are plain HTML files in a configured
//! directory, read at request time so edits go live without a restart.

use std::path::Path;

use closetrack_types::types::TemplateKind;

use crate::prelude::*;

pub struct TemplateStore {
	template_dir: Box<Path>,
}

impl TemplateStore {
	pub fn new(template_dir: impl Into<Box<Path>>) -> Self {
		Self { template_dir: template_dir.into() }
	}

	/// Load the raw template document for a template kind.
	///
	/// A missing template file is a deployment problem, not a request
	/// problem, so it surfaces as `ConfigError`.
	pub async fn load(&self, kind: TemplateKind) -> CtResult<String> {
		let path = self.template_dir.join(kind.file_name());
		match tokio::fs::read_to_string(&path).await {
			Ok(content) => {
				debug!("Loaded template: {}", path.display());
				Ok(content)
			}
			Err(e) => Err(Error::ConfigError(format!(
				"Template not found: {} ({})",
				path.display(),
				e
			))),
		}
	}
}


// vim: ts=4
