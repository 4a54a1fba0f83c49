//! PDF rendering through a headless browser.
//!
//! One scoped browser session per render: acquired on entry, released
//! on every exit path, never pooled or shared between requests.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod filename;
pub mod renderer;

pub use filename::document_filename;
pub use renderer::{PageSettings, PdfRenderer};

mod prelude;

// vim: ts=4
