//! Custom layout content resolution.
//!
//! A stored preference document never carries custom markup inline: the
//! markup lives in the content store and is spliced back into the document
//! when it is read, so every document handed to a caller is self-contained
//! and the two stores cannot diverge.

use serde_json::{Map, Value};

use brandkit_types::content_adapter::ContentAdapter;

use crate::prelude::*;

pub const LAYOUT_KEY: &str = "layout";
pub const ACTIVE_LAYOUT_KEY: &str = "activeLayout";
pub const CUSTOM_CONTENT_KEY: &str = "customContent";
/// `activeLayout` value selecting user-authored markup
pub const CUSTOM_LAYOUT: &str = "custom";

pub fn is_custom_layout(document: &Value) -> bool {
	document
		.get(LAYOUT_KEY)
		.and_then(|layout| layout.get(ACTIVE_LAYOUT_KEY))
		.and_then(Value::as_str)
		== Some(CUSTOM_LAYOUT)
}

/// Pulls the custom layout content out of a document, if it declares any.
///
/// Absent css/js stay absent here; they are only normalized to empty
/// strings when the content is persisted.
pub fn extract_custom_layout(document: &Value) -> Option<CustomLayoutContent> {
	if !is_custom_layout(document) {
		return None;
	}
	let content = document.get(LAYOUT_KEY)?.get(CUSTOM_CONTENT_KEY)?.as_object()?;
	let html = content.get(ContentType::Html.as_str()).and_then(Value::as_str)?;
	Some(CustomLayoutContent {
		html: html.into(),
		css: content.get(ContentType::Css.as_str()).and_then(Value::as_str).map(Into::into),
		js: content.get(ContentType::Js.as_str()).and_then(Value::as_str).map(Into::into),
	})
}

/// Decides which parts of a content triple are worth writing out:
/// html always, css/js only when non-blank.
pub fn resolve_content_types(content: &CustomContent) -> Vec<(ContentType, &str)> {
	let mut parts = vec![(ContentType::Html, &*content.html)];
	if !content.css.trim().is_empty() {
		parts.push((ContentType::Css, &*content.css));
	}
	if !content.js.trim().is_empty() {
		parts.push((ContentType::Js, &*content.js));
	}
	parts
}

/// Splices stored custom content into a document before it is returned.
///
/// Documents without a custom layout, and scopes without stored content,
/// pass through unchanged.
pub async fn splice_custom_content(
	document: &mut Value,
	scope: &ScopeKey,
	content_store: &dyn ContentAdapter,
) -> BkResult<()> {
	if !is_custom_layout(document) {
		return Ok(());
	}
	let content = content_store.read_content(scope).await?;
	// An empty html part marks an unconfigured scope: a stored scope
	// always carries a non-blank html row
	if content.html.is_empty() {
		return Ok(());
	}
	let mut parts = Map::new();
	for (content_type, text) in resolve_content_types(&content) {
		parts.insert(content_type.as_str().to_owned(), Value::String(text.to_owned()));
	}
	if let Some(layout) = document.get_mut(LAYOUT_KEY).and_then(Value::as_object_mut) {
		layout.insert(CUSTOM_CONTENT_KEY.to_owned(), Value::Object(parts));
	}
	Ok(())
}

/// Removes inline custom content from a document before it is persisted
pub fn strip_custom_content(document: &mut Value) {
	if let Some(layout) = document.get_mut(LAYOUT_KEY).and_then(Value::as_object_mut) {
		layout.remove(CUSTOM_CONTENT_KEY);
	}
}


// vim: ts=4
