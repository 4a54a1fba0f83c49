//! Record → template context mapping.
//!
//! One validated transformation step replaces the optional-chaining
//! scattered through the old handlers: every template placeholder is
//! produced here, with documented defaults ("N/A" for absent display
//! fields, false for absent flags). Currency and date values are
//! formatted at mapping time so templates only ever substitute text.

use chrono::NaiveDate;

use closetrack_types::types::{CtxValue, TemplateContext, TransactionRecord};

/// Format a dollar amount: `1234.5` → `"$1,234.50"`
pub fn format_currency(value: f64) -> String {
	let negative = value < 0.0;
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let cents = (value.abs() * 100.0).round() as u64;
	let dollars = cents / 100;
	let rem = cents % 100;

	let digits = dollars.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().rev().enumerate() {
		if i > 0 && i % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(c);
	}
	let dollars: String = grouped.chars().rev().collect();

	format!("{}${}.{:02}", if negative { "-" } else { "" }, dollars, rem)
}

/// Format an ISO date (`2026-08-06`) as `August 6, 2026`.
/// Unparseable input is passed through unchanged.
pub fn format_date(raw: &str) -> String {
	match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
		Ok(date) => date.format("%B %-d, %Y").to_string(),
		Err(_) => raw.to_string(),
	}
}

/// Build the template context from a typed transaction record
pub fn context_from_record(record: &TransactionRecord) -> TemplateContext {
	let mut ctx = TemplateContext::new();

	let text = |value: &Option<String>| {
		value
			.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map_or_else(|| "N/A".to_string(), ToString::to_string)
	};

	ctx.set("agentRole", text(&record.agent_role));
	ctx.set("agentName", text(&record.agent_name));
	ctx.set("agentEmail", text(&record.agent_email));
	ctx.set("agentPhone", text(&record.agent_phone));
	ctx.set("brokerage", text(&record.brokerage));
	ctx.set("propertyAddress", text(&record.property_address));
	ctx.set("mlsNumber", text(&record.mls_number));
	ctx.set("clientName", text(&record.client_name));
	ctx.set("clientEmail", text(&record.client_email));
	ctx.set("titleCompany", text(&record.title_company));
	ctx.set("notes", text(&record.notes));

	ctx.set(
		"salePrice",
		record.sale_price.map_or_else(|| "N/A".to_string(), format_currency),
	);
	ctx.set(
		"commissionPercent",
		record.commission_percent.map_or_else(|| "N/A".to_string(), |v| format!("{}%", v)),
	);
	ctx.set(
		"referralFee",
		record.referral_fee.map_or_else(|| "N/A".to_string(), format_currency),
	);
	ctx.set(
		"sellersAssist",
		record.sellers_assist.map_or_else(|| "N/A".to_string(), format_currency),
	);
	ctx.set("hasSellersAssist", record.sellers_assist.unwrap_or(0.0) > 0.0);

	ctx.set(
		"closingDate",
		record.closing_date.as_deref().map_or_else(|| "N/A".to_string(), format_date),
	);
	ctx.set("homeWarranty", record.home_warranty.unwrap_or(false));

	// untyped form fields pass through one level deep
	merge_json_fields(&mut ctx, &record.extra);

	ctx
}

/// Build the template context directly from a form payload.
///
/// Scalars map one-to-one; nested objects are flattened one level (the
/// leaf key wins); arrays and deeper nesting are not addressed by any
/// template and are skipped.
pub fn context_from_json(data: &serde_json::Value) -> TemplateContext {
	let mut ctx = TemplateContext::new();
	if let serde_json::Value::Object(map) = data {
		merge_json_fields(&mut ctx, map);
		for value in map.values() {
			if let serde_json::Value::Object(nested) = value {
				merge_json_fields(&mut ctx, nested);
			}
		}
	}
	ctx
}

fn merge_json_fields(ctx: &mut TemplateContext, map: &serde_json::Map<String, serde_json::Value>) {
	for (key, value) in map {
		match value {
			serde_json::Value::String(s) => {
				ctx.set(key.as_str(), CtxValue::Str(s.clone()));
			}
			serde_json::Value::Bool(b) => {
				ctx.set(key.as_str(), CtxValue::Bool(*b));
			}
			serde_json::Value::Number(n) => {
				ctx.set(key.as_str(), CtxValue::Str(n.to_string()));
			}
			serde_json::Value::Null
			| serde_json::Value::Array(_)
			| serde_json::Value::Object(_) => {}
		}
	}
}


// vim: ts=4
