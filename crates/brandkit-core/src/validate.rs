//! Preference document validation.
//!
//! Validation is pure and runs at the boundary, before any storage I/O.
//! Every failure is a client error with a stable code; the caller supplied
//! the bad input, so no failure here is a server error.

use regex::Regex;
use serde_json::Value;

use crate::prelude::*;
use crate::resolve;

/// Placeholder token every custom layout html must contain
pub const MAIN_SECTION_COMPONENT: &str = "MainSection";

/// Triple-brace placeholder, tolerant of horizontal whitespace inside the
/// braces: `{{{MainSection}}}`, `{{{ MainSection }}}`, ...
const MAIN_SECTION_PATTERN: &str = r"\{\{\{[ \t]*MainSection[ \t]*\}\}\}";

/// Validates a raw preference document for a tenant
pub fn validate_preference(raw_document: &str, tenant_domain: &str) -> BkResult<()> {
	let document = parse_preference(raw_document, tenant_domain)?;
	validate_custom_layout(&document)
}

/// Parses a raw document, requiring a non-empty key-value tree
pub fn parse_preference(raw_document: &str, tenant: &str) -> BkResult<Value> {
	let document: Value = serde_json::from_str(raw_document)
		.map_err(|_| Error::InvalidPreference { tenant: tenant.into() })?;
	match document.as_object() {
		Some(map) if !map.is_empty() => Ok(document),
		_ => Err(Error::InvalidPreference { tenant: tenant.into() }),
	}
}

/// Checks the custom layout rules of an already parsed document.
/// Documents that do not select the custom layout always pass.
pub fn validate_custom_layout(document: &Value) -> BkResult<()> {
	if !resolve::is_custom_layout(document) {
		return Ok(());
	}
	let html = document
		.get(resolve::LAYOUT_KEY)
		.and_then(|layout| layout.get(resolve::CUSTOM_CONTENT_KEY))
		.and_then(|content| content.get(ContentType::Html.as_str()))
		.and_then(Value::as_str)
		.unwrap_or_default();
	if html.trim().is_empty() {
		return Err(Error::InvalidCustomLayoutContent);
	}
	validate_mandatory_components(html)
}

/// Ensures every mandatory placeholder component is present in the html
pub fn validate_mandatory_components(html: &str) -> BkResult<()> {
	let pattern = Regex::new(MAIN_SECTION_PATTERN)
		.map_err(|err| Error::Internal(format!("invalid component pattern: {}", err)))?;
	if pattern.is_match(html) {
		Ok(())
	} else {
		Err(Error::MandatoryComponentNotFound { component: MAIN_SECTION_COMPONENT.into() })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	const TENANT: &str = "acme.example.com";

	fn custom_doc(html: &str) -> String {
		json!({
			"layout": {
				"activeLayout": "custom",
				"customContent": {"html": html}
			}
		})
		.to_string()
	}

	#[test]
	fn test_rejects_malformed_documents() {
		for raw in ["", "not json", "\"plain string\"", "[1, 2]", "42", "null", "{}"] {
			let result = validate_preference(raw, TENANT);
			assert!(
				matches!(result, Err(Error::InvalidPreference { .. })),
				"{:?} must be rejected",
				raw
			);
		}
	}

	#[test]
	fn test_invalid_preference_cites_tenant_and_code() {
		match validate_preference("{}", TENANT) {
			Err(err @ Error::InvalidPreference { .. }) => {
				assert_eq!(err.code(), "BRANDINGM_00001");
				assert!(err.to_string().contains(TENANT));
				assert!(err.is_client_error());
			}
			other => panic!("expected InvalidPreference, got {:?}", other),
		}
	}

	#[test]
	fn test_accepts_plain_documents() {
		let raw = json!({"organizationDetails": {"displayName": "Acme"}}).to_string();
		assert!(validate_preference(&raw, TENANT).is_ok());

		let raw = json!({"layout": {"activeLayout": "centered"}}).to_string();
		assert!(validate_preference(&raw, TENANT).is_ok());
	}

	#[test]
	fn test_custom_layout_requires_html() {
		let no_content = json!({"layout": {"activeLayout": "custom"}}).to_string();
		assert!(matches!(
			validate_preference(&no_content, TENANT),
			Err(Error::InvalidCustomLayoutContent)
		));
		assert!(matches!(
			validate_preference(&custom_doc(""), TENANT),
			Err(Error::InvalidCustomLayoutContent)
		));
		assert!(matches!(
			validate_preference(&custom_doc("   "), TENANT),
			Err(Error::InvalidCustomLayoutContent)
		));
	}

	#[test]
	fn test_mandatory_component_whitespace_variants_pass() {
		for html in [
			"<div>{{{MainSection}}}</div>",
			"<div>{{{ MainSection}}}</div>",
			"<div>{{{MainSection }}}</div>",
			"<div>{{{  MainSection  }}}</div>",
			"<div>{{{\tMainSection\t}}}</div>",
		] {
			assert!(
				validate_preference(&custom_doc(html), TENANT).is_ok(),
				"{:?} must pass",
				html
			);
		}
	}

	#[test]
	fn test_missing_mandatory_component_is_rejected() {
		for html in [
			"<div>no placeholder</div>",
			"<div>{{MainSection}}</div>",
			"<div>{{{mainsection}}}</div>",
			"<div>{{{Main Section}}}</div>",
		] {
			match validate_preference(&custom_doc(html), TENANT) {
				Err(Error::MandatoryComponentNotFound { component }) => {
					assert_eq!(&*component, MAIN_SECTION_COMPONENT);
				}
				other => panic!("expected MandatoryComponentNotFound for {:?}, got {:?}", html, other),
			}
		}
	}
}

// vim: ts=4
