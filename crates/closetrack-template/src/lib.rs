//! Template population and selection.
//!
//! This crate owns the three fixed disclosure templates and everything
//! that turns transaction data into populated HTML:
//! - placeholder substitution with `{{#if}}` / `{{#unless}}` / `{{#eq}}`
//!   blocks (never fails; absent data degrades to blank text)
//! - total role normalization and template selection
//! - the record → context mapping with documented defaults

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod context;
pub mod populate;
pub mod select;
pub mod store;

pub use context::{context_from_json, context_from_record, format_currency, format_date};
pub use populate::populate;
pub use select::{TemplateSelection, select_template};
pub use store::TemplateStore;

mod prelude;

// vim: ts=4
