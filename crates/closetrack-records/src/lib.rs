//! Record store client.
//!
//! Transaction data can be fetched from the external record store by
//! table and record id instead of arriving in the request body. The
//! store speaks Airtable-style REST: bearer auth, records wrapped in a
//! `{id, fields}` envelope.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod client;

pub use client::RecordStoreClient;

mod prelude;

// vim: ts=4
