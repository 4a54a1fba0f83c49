//! Role normalization and template selection.
//!
//! Source data spells the agent's role every way imaginable ("LISTING
//! AGENT", "Seller", "dual-agent", free text from older intake forms).
//! Selection is total: every input resolves to exactly one of the three
//! templates, it never fails a request. Inputs that fall through to the
//! dual-agent default without actually saying "dual" are logged.

use closetrack_types::types::{AgentRole, TemplateKind};

use crate::prelude::*;

/// Result of role normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSelection {
	pub kind: TemplateKind,
	pub role: AgentRole,
}

/// Select the disclosure template for a raw role string.
///
/// Uppercase, strip everything but letters, then test substring
/// membership in priority order: BUYER wins, then SELLER / LISTING,
/// everything else is treated as dual agency.
pub fn select_template(raw_role: &str) -> TemplateSelection {
	let normalized: String =
		raw_role.to_uppercase().chars().filter(char::is_ascii_alphabetic).collect();

	if normalized.contains("BUYER") {
		TemplateSelection { kind: TemplateKind::Buyer, role: AgentRole::BuyersAgent }
	} else if normalized.contains("SELLER") || normalized.contains("LISTING") {
		TemplateSelection { kind: TemplateKind::Seller, role: AgentRole::ListingAgent }
	} else {
		if !normalized.contains("DUAL") {
			warn!("Unrecognized agent role {:?}, defaulting to dual-agent template", raw_role);
		}
		TemplateSelection { kind: TemplateKind::DualAgent, role: AgentRole::DualAgent }
	}
}


// vim: ts=4
