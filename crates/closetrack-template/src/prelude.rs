pub use closetrack_types::prelude::*;

// vim: ts=4
