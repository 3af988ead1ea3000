//! Locale code and resource name helpers.

use std::borrow::Cow;

use crate::prelude::*;

/// Locale a scope falls back to when the caller names none
pub const DEFAULT_LOCALE: &str = "en-US";

const RESOURCE_NAME_SEPARATOR: char = '_';
const LOCALE_SEPARATOR: &str = "-";

/// Canonicalizes a locale code so `en_US` and `en-US` name the same locale.
/// Blank input passes through unchanged.
pub fn normalize_locale(locale: &str) -> Cow<'_, str> {
	if locale.contains(RESOURCE_NAME_SEPARATOR) {
		Cow::Owned(locale.replace(RESOURCE_NAME_SEPARATOR, LOCALE_SEPARATOR))
	} else {
		Cow::Borrowed(locale)
	}
}

/// Storage name of a preference document: the normalized locale, prefixed
/// with the application ID for application scopes.
pub fn resource_name(scope: &ScopeKey, locale: &str) -> String {
	let locale = normalize_locale(locale);
	match scope.app_id() {
		Some(app_id) => format!("{}{}{}", app_id, RESOURCE_NAME_SEPARATOR, locale),
		None => locale.into_owned(),
	}
}


// vim: ts=4
