//! The document pipeline: resolve input → populate → render → persist
//! → dispatch.
//!
//! Strictly sequential within one request. The record fetch and the
//! render are wrapped in backoff retry; dispatch is not retried — it
//! has its own cross-provider fallback, and a dispatch failure never
//! fails a request whose document was already generated.

use closetrack_render::document_filename;
use closetrack_template::{context_from_json, context_from_record, populate, select_template};
use closetrack_types::email_transport::{EmailAttachment, OutgoingEmail};
use closetrack_types::types::{
	GeneratedDocument, GenerateRequest, GenerateResponse, TemplateContext,
};

use crate::app::AppState;
use crate::prelude::*;

/// Resolved pipeline input, independent of where the data came from
#[derive(Debug)]
struct PipelineInput {
	ctx: TemplateContext,
	raw_role: String,
	identifier: String,
	recipient: Option<String>,
}

/// Direct form payloads must at least identify the agent and the
/// property; everything else degrades to template defaults.
const REQUIRED_FORM_FIELDS: [&str; 2] = ["agentName", "propertyAddress"];

fn resolve_form_input(request: &GenerateRequest) -> CtResult<PipelineInput> {
	let Some(form) = &request.form_data else {
		return Err(Error::ValidationError(
			"request must include formData or tableId/recordId".into(),
		));
	};
	let Some(map) = form.as_object() else {
		return Err(Error::ValidationError("formData must be a JSON object".into()));
	};

	let field = |name: &str| {
		map.get(name).and_then(|v| v.as_str()).map(str::trim).filter(|s| !s.is_empty())
	};

	let missing: Vec<&str> =
		REQUIRED_FORM_FIELDS.iter().copied().filter(|name| field(name).is_none()).collect();
	if !missing.is_empty() {
		return Err(Error::ValidationError(format!(
			"missing required fields: {}",
			missing.join(", ")
		)));
	}

	let raw_role = request
		.agent_role
		.clone()
		.or_else(|| field("agentRole").map(ToString::to_string))
		.unwrap_or_default();

	// MLS number identifies the transaction when present, otherwise
	// the property address does
	let identifier = field("mlsNumber")
		.or_else(|| field("propertyAddress"))
		.unwrap_or("record")
		.to_string();

	let recipient =
		request.recipient.clone().or_else(|| field("agentEmail").map(ToString::to_string));

	Ok(PipelineInput { ctx: context_from_json(form), raw_role, identifier, recipient })
}

async fn resolve_record_input(
	app: &AppState,
	request: &GenerateRequest,
) -> CtResult<PipelineInput> {
	let (Some(table_id), Some(record_id)) = (&request.table_id, &request.record_id) else {
		return Err(Error::ValidationError(
			"request must include formData or tableId/recordId".into(),
		));
	};
	let Some(records) = &app.records else {
		return Err(Error::ConfigError("record store is not configured".into()));
	};

	let record = closetrack_core::retry(&app.retry_policy, "record fetch", || {
		records.fetch(table_id, record_id)
	})
	.await?;

	let raw_role =
		request.agent_role.clone().or_else(|| record.agent_role.clone()).unwrap_or_default();
	let recipient = request.recipient.clone().or_else(|| record.agent_email.clone());

	Ok(PipelineInput {
		ctx: context_from_record(&record),
		raw_role,
		identifier: record_id.clone(),
		recipient,
	})
}

/// Run the whole pipeline for one request
pub async fn generate(app: &AppState, request: GenerateRequest) -> CtResult<GenerateResponse> {
	let input = if request.form_data.is_some() {
		resolve_form_input(&request)?
	} else {
		resolve_record_input(app, &request).await?
	};

	let selection = select_template(&input.raw_role);
	info!(
		"Generating document: template={} identifier={}",
		selection.kind, input.identifier
	);

	let template = app.templates.load(selection.kind).await?;
	let html = populate(&template, &input.ctx);

	let pdf = closetrack_core::retry(&app.retry_policy, "pdf render", || {
		app.renderer.render(html.clone())
	})
	.await?;

	let filename =
		document_filename(&app.config.file_prefix, selection.kind.role_label(), &input.identifier);

	// Persist before dispatching so a generated-but-unsent document is
	// always recoverable
	let path = app.doc_store.store_document(&filename, &pdf).await?;
	info!("Document stored: {}", path);

	let document = GeneratedDocument {
		filename: filename.into(),
		bytes: pdf,
		stored_path: Some(path.clone()),
	};
	let filename = document.filename.clone();

	let send_email = request.send_email.unwrap_or(true);
	if !send_email {
		return Ok(GenerateResponse {
			success: true,
			message: "Document generated".into(),
			filename: Some(filename),
			path: Some(path),
			email_sent: None,
			email_error: None,
		});
	}

	let (email_sent, email_error) = dispatch_document(app, &input, document).await;
	let message = if email_sent {
		"Document generated and emailed".to_string()
	} else {
		"Document generated; email not sent".to_string()
	};

	Ok(GenerateResponse {
		success: true,
		message,
		filename: Some(filename),
		path: Some(path),
		email_sent: Some(email_sent),
		email_error,
	})
}

async fn dispatch_document(
	app: &AppState,
	input: &PipelineInput,
	document: GeneratedDocument,
) -> (bool, Option<String>) {
	let Some(dispatcher) = &app.dispatcher else {
		return (false, Some("no email provider configured".into()));
	};
	let Some(from) = &app.config.email_from else {
		// config validation makes this unreachable when a provider exists
		return (false, Some("EMAIL_FROM is not configured".into()));
	};
	let Some(to) = input
		.recipient
		.clone()
		.or_else(|| app.config.default_recipient.as_deref().map(ToString::to_string))
	else {
		return (false, Some("no recipient address available".into()));
	};

	let property = input.ctx.render("propertyAddress");
	let subject = if property.is_empty() || property == "N/A" {
		format!("Transaction disclosure: {}", document.filename)
	} else {
		format!("Transaction disclosure: {}", property)
	};
	let html_body = format!(
		"<p>The attached disclosure document was generated for {}.</p>",
		if property.is_empty() { "your transaction" } else { property.as_ref() }
	);

	let email = OutgoingEmail {
		to,
		from: from.to_string(),
		subject,
		html_body,
		attachments: vec![EmailAttachment::pdf(document.filename, document.bytes)],
	};

	let result = dispatcher.dispatch(&email).await;
	(result.sent, result.error)
}


// vim: ts=4
