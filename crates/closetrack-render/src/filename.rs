//! Generated document filenames.
//!
//! Pattern: `{Prefix}_{ROLE}_{Identifier}_{timestamp}.pdf`, where the
//! timestamp is UTC RFC 3339 with `:` and `.` replaced by `-`. The
//! timestamp plus identifier is the only collision-avoidance mechanism:
//! two requests for the same role and identifier in the same
//! millisecond would collide.

use chrono::{DateTime, SecondsFormat, Utc};

/// Build the filename for a generated document
pub fn document_filename(prefix: &str, role_label: &str, identifier: &str) -> String {
	document_filename_at(prefix, role_label, identifier, Utc::now())
}

fn document_filename_at(
	prefix: &str,
	role_label: &str,
	identifier: &str,
	now: DateTime<Utc>,
) -> String {
	let timestamp = now
		.to_rfc3339_opts(SecondsFormat::Millis, true)
		.replace([':', '.'], "-");
	format!("{}_{}_{}_{}.pdf", prefix, role_label, sanitize(identifier), timestamp)
}

/// Identifiers come from record ids or free-text property addresses;
/// anything outside `[A-Za-z0-9-]` becomes `-`
fn sanitize(identifier: &str) -> String {
	let mut out: String = identifier
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
		.collect();
	if out.is_empty() {
		out.push_str("record");
	}
	out
}


// vim: ts=4
