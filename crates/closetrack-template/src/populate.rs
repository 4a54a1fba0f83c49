//! Placeholder substitution.
//!
//! `populate` is a pure function over `(template, context)`: it never
//! fails and never leaves a `{{...}}` token visible in the output.
//! Missing data degrades to blank text so a document can always be
//! generated from partial upstream data.
//!
//! Resolution order:
//! 1. `{{#if name}}...{{/if}}` blocks — kept iff the value is truthy
//! 2. `{{#unless name}}...{{/unless}}` blocks — the exact inverse
//! 3. `{{#eq name "literal"}}...{{/eq}}` blocks — kept iff the
//!    stringified value equals the literal
//! 4. `{{ name }}` substitution; unresolved tokens are deleted
//!
//! Each block pass is a single linear scan, non-greedy, spanning
//! newlines; blocks of the same type do not nest (the first closer
//! after an opener terminates it).

use closetrack_types::types::TemplateContext;

#[derive(Clone, Copy)]
enum BlockKind {
	If,
	Unless,
	Eq,
}

impl BlockKind {
	fn open_marker(self) -> &'static str {
		match self {
			BlockKind::If => "{{#if",
			BlockKind::Unless => "{{#unless",
			BlockKind::Eq => "{{#eq",
		}
	}

	fn close_marker(self) -> &'static str {
		match self {
			BlockKind::If => "{{/if}}",
			BlockKind::Unless => "{{/unless}}",
			BlockKind::Eq => "{{/eq}}",
		}
	}
}

/// Populate a template with context values
pub fn populate(template: &str, ctx: &TemplateContext) -> String {
	let pass = resolve_blocks(template, BlockKind::If, ctx);
	let pass = resolve_blocks(&pass, BlockKind::Unless, ctx);
	let pass = resolve_blocks(&pass, BlockKind::Eq, ctx);
	substitute(&pass, ctx)
}

/// One linear pass resolving every block of a single kind.
///
/// Malformed blocks (no closing `}}` on the opener, or no close marker)
/// are left in place; the final substitution pass blanks their markers.
fn resolve_blocks(input: &str, kind: BlockKind, ctx: &TemplateContext) -> String {
	let open_marker = kind.open_marker();
	let close_marker = kind.close_marker();
	let mut out = String::with_capacity(input.len());
	let mut rest = input;

	loop {
		let Some(start) = rest.find(open_marker) else {
			out.push_str(rest);
			break;
		};

		let after_marker = &rest[start + open_marker.len()..];
		// `{{#if}}` must be followed by whitespace, otherwise this is
		// some other token (`{{#iffy}}`) and the scan moves on
		if !after_marker.starts_with(|c: char| c.is_whitespace()) {
			out.push_str(&rest[..start + open_marker.len()]);
			rest = after_marker;
			continue;
		}

		out.push_str(&rest[..start]);

		let Some(tag_end) = after_marker.find("}}") else {
			out.push_str(&rest[start..]);
			break;
		};
		let header = after_marker[..tag_end].trim();
		let body_start = tag_end + 2;

		let Some(close_rel) = after_marker[body_start..].find(close_marker) else {
			out.push_str(&rest[start..]);
			break;
		};

		let body = &after_marker[body_start..body_start + close_rel];
		if block_holds(kind, header, ctx) {
			out.push_str(body);
		}
		rest = &after_marker[body_start + close_rel + close_marker.len()..];
	}

	out
}

fn block_holds(kind: BlockKind, header: &str, ctx: &TemplateContext) -> bool {
	match kind {
		BlockKind::If => ctx.is_truthy(header),
		BlockKind::Unless => !ctx.is_truthy(header),
		BlockKind::Eq => {
			// header is `name "literal"`
			let Some(quote) = header.find('"') else { return false };
			let name = header[..quote].trim();
			let rest = &header[quote + 1..];
			let Some(end_quote) = rest.find('"') else { return false };
			let literal = &rest[..end_quote];
			ctx.get(name).is_some_and(|v| v.render() == literal)
		}
	}
}

/// Replace every remaining `{{ name }}` token with the context value,
/// blanking tokens whose name is absent and stray block markers.
fn substitute(input: &str, ctx: &TemplateContext) -> String {
	let mut out = String::with_capacity(input.len());
	let mut rest = input;

	while let Some(start) = rest.find("{{") {
		out.push_str(&rest[..start]);
		let after_open = &rest[start + 2..];
		let Some(end) = after_open.find("}}") else {
			// unterminated token, emit literally
			out.push_str(&rest[start..]);
			rest = "";
			break;
		};

		let name = after_open[..end].trim();
		// stray block markers (`#if`, `/if`, ...) are deleted outright
		if !name.starts_with('#') && !name.starts_with('/') {
			out.push_str(&ctx.render(name));
		}
		rest = &after_open[end + 2..];
	}
	out.push_str(rest);

	out
}


// vim: ts=4
