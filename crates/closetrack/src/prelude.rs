pub use crate::app::App;
pub use closetrack_types::error::{CtResult, Error};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
