//! Headless-browser PDF renderer.
//!
//! The browser API is synchronous, so renders run on the worker pool.
//! Each invocation launches its own browser process; dropping the
//! `Browser` handle kills the process, so every exit path from
//! `render_blocking` (including `?` propagation) releases the session.

use std::sync::Arc;
use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};

use closetrack_types::worker::WorkerPool;

use crate::prelude::*;

/// Physical page setup. Templates rely on background-colored elements
/// for structure, so backgrounds are always printed.
#[derive(Debug, Clone)]
pub struct PageSettings {
	/// Paper size in inches (US Letter)
	pub paper_width: f64,
	pub paper_height: f64,
	/// Uniform margin in inches
	pub margin: f64,
	/// How long the page gets to settle before the render is abandoned
	pub settle_timeout: Duration,
}

impl Default for PageSettings {
	fn default() -> Self {
		Self {
			paper_width: 8.5,
			paper_height: 11.0,
			margin: 0.4,
			settle_timeout: Duration::from_secs(30),
		}
	}
}

pub struct PdfRenderer {
	worker: Arc<WorkerPool>,
	page: PageSettings,
}

impl PdfRenderer {
	pub fn new(worker: Arc<WorkerPool>, page: PageSettings) -> Self {
		Self { worker, page }
	}

	/// Render populated HTML to a paginated PDF byte buffer.
	///
	/// All-or-nothing: any failure (launch, settle timeout,
	/// serialization) is a `RenderError`; there is no partial output.
	/// The caller decides whether to retry.
	pub async fn render(&self, html: String) -> CtResult<Vec<u8>> {
		let page = self.page.clone();
		self.worker.try_run(move || render_blocking(&html, &page)).await
	}
}

fn render_blocking(html: &str, page: &PageSettings) -> CtResult<Vec<u8>> {
	let launch_opts = LaunchOptions::default_builder()
		.headless(true)
		.build()
		.map_err(|e| Error::RenderError(format!("browser launch options: {}", e)))?;

	// Browser process is released when `browser` drops, on every path
	let browser = Browser::new(launch_opts)
		.map_err(|e| Error::RenderError(format!("browser launch failed: {}", e)))?;

	let tab = browser
		.new_tab()
		.map_err(|e| Error::RenderError(format!("browser tab failed: {}", e)))?;
	tab.set_default_timeout(page.settle_timeout);

	// base64 data URL: the document may legitimately contain '#' or '?'
	let url = format!("data:text/html;base64,{}", STANDARD.encode(html));

	tab.navigate_to(&url)
		.and_then(|tab| tab.wait_until_navigated())
		.map_err(|e| Error::RenderError(format!("page failed to settle: {}", e)))?;

	let pdf = tab
		.print_to_pdf(Some(PrintToPdfOptions {
			display_header_footer: Some(false),
			print_background: Some(true),
			paper_width: Some(page.paper_width),
			paper_height: Some(page.paper_height),
			margin_top: Some(page.margin),
			margin_bottom: Some(page.margin),
			margin_left: Some(page.margin),
			margin_right: Some(page.margin),
			..PrintToPdfOptions::default()
		}))
		.map_err(|e| Error::RenderError(format!("pdf serialization failed: {}", e)))?;

	debug!("Rendered PDF: {} bytes", pdf.len());
	Ok(pdf)
}


// vim: ts=4
