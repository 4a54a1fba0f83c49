//! Closetrack is the document service behind the agent portal of a
//! real-estate transaction-coordination business.
//!
//! # What it does
//!
//! - Populates one of three disclosure templates (`Buyer`, `Seller`,
//!   `DualAgent`) from transaction data — a direct form payload or a
//!   record fetched from the external record store
//! - Renders the populated HTML to a paginated PDF through a scoped
//!   headless-browser session
//! - Persists the document and dispatches it by email, with
//!   cross-provider fallback

// Re-export shared types and adapter traits from closetrack-types
pub use closetrack_types::doc_store;
pub use closetrack_types::email_transport;
pub use closetrack_types::error;
pub use closetrack_types::types;
pub use closetrack_types::worker;

// Feature crate re-exports
pub use closetrack_core as core;
pub use closetrack_email as email;
pub use closetrack_records as records;
pub use closetrack_render as render;
pub use closetrack_template as template;

// Local modules
pub mod app;
pub mod handler;
pub mod pipeline;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder, AppState, VERSION};

// vim: ts=4
