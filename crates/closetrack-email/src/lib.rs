//! Email dispatch with cross-provider fallback.
//!
//! This crate provides:
//! - SMTP delivery with lettre (rustls)
//! - HTTP-API delivery (Resend-style JSON endpoint) with reqwest
//! - the `EmailDispatcher`, which tries the primary transport and falls
//!   back to the secondary with the identical message

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod dispatch;
pub mod http_api;
pub mod smtp;

pub use dispatch::EmailDispatcher;
pub use http_api::HttpApiEmailTransport;
pub use smtp::SmtpEmailTransport;

mod prelude;

// vim: ts=4
