//! Shared types, adapter traits, and core utilities for the Closetrack
//! transaction document service.
//!
//! This crate contains the foundational types that are shared between the
//! server crate and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! server's feature modules.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod doc_store;
pub mod email_transport;
pub mod error;
pub mod prelude;
pub mod types;
pub mod worker;

// vim: ts=4
