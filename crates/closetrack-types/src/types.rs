//! Domain types for the document pipeline

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// The agent's relationship to a transaction. Used solely to select a
/// disclosure template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
	ListingAgent,
	BuyersAgent,
	DualAgent,
}

/// One of the three fixed disclosure templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKind {
	Buyer,
	Seller,
	DualAgent,
}

impl TemplateKind {
	/// File name of the template document inside the template directory
	pub fn file_name(self) -> &'static str {
		match self {
			TemplateKind::Buyer => "Buyer.html",
			TemplateKind::Seller => "Seller.html",
			TemplateKind::DualAgent => "DualAgent.html",
		}
	}

	/// Role label used in generated document filenames
	pub fn role_label(self) -> &'static str {
		match self {
			TemplateKind::Buyer => "BUYER",
			TemplateKind::Seller => "SELLER",
			TemplateKind::DualAgent => "DUAL",
		}
	}
}

impl std::fmt::Display for TemplateKind {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			TemplateKind::Buyer => write!(f, "Buyer"),
			TemplateKind::Seller => write!(f, "Seller"),
			TemplateKind::DualAgent => write!(f, "DualAgent"),
		}
	}
}

/// A renderable template value: already-formatted text, or a flag that
/// drives conditional blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum CtxValue {
	Str(String),
	Bool(bool),
}

impl CtxValue {
	/// Truthiness for `{{#if}}` / `{{#unless}}` blocks: flags are
	/// themselves, text is truthy when non-empty.
	pub fn is_truthy(&self) -> bool {
		match self {
			CtxValue::Bool(b) => *b,
			CtxValue::Str(s) => !s.is_empty(),
		}
	}

	/// Stringified form, as inserted into the document
	pub fn render(&self) -> Cow<'_, str> {
		match self {
			CtxValue::Str(s) => Cow::Borrowed(s),
			CtxValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
		}
	}
}

impl From<String> for CtxValue {
	fn from(s: String) -> Self {
		CtxValue::Str(s)
	}
}

impl From<&str> for CtxValue {
	fn from(s: &str) -> Self {
		CtxValue::Str(s.to_string())
	}
}

impl From<bool> for CtxValue {
	fn from(b: bool) -> Self {
		CtxValue::Bool(b)
	}
}

/// Flat mapping from placeholder name to renderable value.
///
/// Keys absent from the context render as empty text, never as a
/// literal `{{key}}` token.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
	values: BTreeMap<Box<str>, CtxValue>,
}

impl TemplateContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, name: impl Into<Box<str>>, value: impl Into<CtxValue>) -> &mut Self {
		self.values.insert(name.into(), value.into());
		self
	}

	pub fn get(&self, name: &str) -> Option<&CtxValue> {
		self.values.get(name)
	}

	pub fn is_truthy(&self, name: &str) -> bool {
		self.values.get(name).is_some_and(CtxValue::is_truthy)
	}

	/// Stringified value for substitution; absent keys degrade to ""
	pub fn render(&self, name: &str) -> Cow<'_, str> {
		self.values.get(name).map_or(Cow::Borrowed(""), CtxValue::render)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<K: Into<Box<str>>, V: Into<CtxValue>> FromIterator<(K, V)> for TemplateContext {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut ctx = Self::new();
		for (k, v) in iter {
			ctx.set(k, v);
		}
		ctx
	}
}

/// Typed transaction record as fetched from the record store or posted
/// directly by the intake form. Every field is optional; the context
/// mapping layer applies documented defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionRecord {
	pub agent_role: Option<String>,
	pub agent_name: Option<String>,
	pub agent_email: Option<String>,
	pub agent_phone: Option<String>,
	pub brokerage: Option<String>,
	pub property_address: Option<String>,
	pub mls_number: Option<String>,
	pub sale_price: Option<f64>,
	pub commission_percent: Option<f64>,
	pub referral_fee: Option<f64>,
	pub sellers_assist: Option<f64>,
	pub client_name: Option<String>,
	pub client_email: Option<String>,
	pub closing_date: Option<String>,
	pub title_company: Option<String>,
	pub home_warranty: Option<bool>,
	pub notes: Option<String>,
	/// Fields the form sends that the typed schema does not model
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Output artifact of one pipeline invocation. Created per request,
/// never cached; ownership moves to the dispatch / persistence step.
#[derive(Debug)]
pub struct GeneratedDocument {
	pub filename: Box<str>,
	pub bytes: Vec<u8>,
	pub stored_path: Option<Box<str>>,
}

/// Outcome of an email dispatch attempt across providers.
///
/// Invariant (enforced by the constructors): `sent` implies a message
/// id and no error; `!sent` implies a non-empty error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDispatchResult {
	pub sent: bool,
	pub provider: Box<str>,
	pub message_id: Option<Box<str>>,
	pub error: Option<String>,
}

impl EmailDispatchResult {
	/// A provider accepted the message
	pub fn delivered(provider: &str, message_id: impl Into<Box<str>>) -> Self {
		Self { sent: true, provider: provider.into(), message_id: Some(message_id.into()), error: None }
	}

	/// Every provider failed; `error` carries the concatenated failures
	pub fn failed(error: impl Into<String>) -> Self {
		Self { sent: false, provider: "none".into(), message_id: None, error: Some(error.into()) }
	}
}

/// Request body of `POST /api/documents`: either a direct form payload
/// or a record-store reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
	pub form_data: Option<serde_json::Value>,
	pub table_id: Option<String>,
	pub record_id: Option<String>,
	pub agent_role: Option<String>,
	pub send_email: Option<bool>,
	pub recipient: Option<String>,
}

/// Response body of `POST /api/documents`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
	pub success: bool,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filename: Option<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<Box<str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email_sent: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email_error: Option<String>,
}


// vim: ts=4
