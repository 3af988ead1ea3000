//! Common types used throughout the Brandkit engine.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

// TnId //
//******//
#[derive(Clone, Copy, Debug)]
pub struct TnId(pub u32);

impl std::fmt::Display for TnId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for TnId {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::Eq for TnId {}

impl std::hash::Hash for TnId {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.0.hash(state);
	}
}

impl Serialize for TnId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_u32(self.0)
	}
}

impl<'de> Deserialize<'de> for TnId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(TnId(u32::deserialize(deserializer)?))
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Self {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs() as i64)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for Timestamp {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::PartialOrd for Timestamp {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::cmp::Eq for Timestamp {}

impl std::cmp::Ord for Timestamp {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.0.cmp(&other.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// Scope //
//*******//

/// Scope discriminator string for organization-wide resources
pub const ORG_TYPE: &str = "ORG";
/// Scope discriminator string for application resources
pub const APP_TYPE: &str = "APP";
/// Reserved scope discriminator accepted from callers alongside ORG and APP
pub const CUSTOM_TYPE: &str = "CUSTOM";

/// The unit a branding resource belongs to: the whole organization or one
/// of its applications.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
	Org,
	App(Box<str>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
	Org,
	App,
}

impl ScopeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			ScopeKind::Org => ORG_TYPE,
			ScopeKind::App => APP_TYPE,
		}
	}
}

impl std::fmt::Display for ScopeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Addressing key for both preference documents and custom content.
///
/// A blank application ID is not a valid application scope: it is
/// normalized to the organization scope on construction, so an `App`
/// scope always carries a non-blank ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeKey {
	pub tn_id: TnId,
	pub scope: Scope,
}

impl ScopeKey {
	pub fn org(tn_id: TnId) -> Self {
		Self { tn_id, scope: Scope::Org }
	}

	pub fn app(tn_id: TnId, app_id: &str) -> Self {
		if app_id.trim().is_empty() {
			Self::org(tn_id)
		} else {
			Self { tn_id, scope: Scope::App(app_id.into()) }
		}
	}

	pub fn kind(&self) -> ScopeKind {
		match self.scope {
			Scope::Org => ScopeKind::Org,
			Scope::App(_) => ScopeKind::App,
		}
	}

	pub fn app_id(&self) -> Option<&str> {
		match &self.scope {
			Scope::Org => None,
			Scope::App(app_id) => Some(app_id),
		}
	}

	/// The resource type preference documents of this scope are filed under
	pub fn resource_type(&self) -> ResourceType {
		match self.scope {
			Scope::Org => ResourceType::BrandingPreferences,
			Scope::App(_) => ResourceType::ApplicationBrandingPreferences,
		}
	}
}

impl std::fmt::Display for ScopeKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.scope {
			Scope::Org => write!(f, "{}/{}", ORG_TYPE, self.tn_id),
			Scope::App(app_id) => write!(f, "{}/{}/{}", APP_TYPE, self.tn_id, app_id),
		}
	}
}

// Resources //
//***********//

/// Tag filing a preference document in the document store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
	BrandingPreferences,
	ApplicationBrandingPreferences,
	CustomText,
}

impl ResourceType {
	pub const ALL: [Self; 3] =
		[Self::BrandingPreferences, Self::ApplicationBrandingPreferences, Self::CustomText];

	pub fn as_str(self) -> &'static str {
		match self {
			ResourceType::BrandingPreferences => "BRANDING_PREFERENCES",
			ResourceType::ApplicationBrandingPreferences => "APPLICATION_BRANDING_PREFERENCES",
			ResourceType::CustomText => "CUSTOM_TEXT",
		}
	}
}

impl std::fmt::Display for ResourceType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

// Custom content //
//****************//

/// Tag of one stored custom content part
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
	Html,
	Css,
	Js,
}

impl ContentType {
	pub const ALL: [Self; 3] = [Self::Html, Self::Css, Self::Js];

	pub fn as_str(self) -> &'static str {
		match self {
			ContentType::Html => "html",
			ContentType::Css => "css",
			ContentType::Js => "js",
		}
	}

	pub fn parse(tag: &str) -> Option<Self> {
		match tag {
			"html" => Some(ContentType::Html),
			"css" => Some(ContentType::Css),
			"js" => Some(ContentType::Js),
			_ => None,
		}
	}
}

impl std::fmt::Display for ContentType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Stored custom layout content of one scope.
///
/// This is the storage-normalized shape: all three parts are always
/// present, and an empty string marks a part that was not provided.
/// A scope with no custom content at all reads as all-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomContent {
	pub html: Box<str>,
	pub css: Box<str>,
	pub js: Box<str>,
}

impl CustomContent {
	pub fn part(&self, content_type: ContentType) -> &str {
		match content_type {
			ContentType::Html => &self.html,
			ContentType::Css => &self.css,
			ContentType::Js => &self.js,
		}
	}

	pub fn set_part(&mut self, content_type: ContentType, content: impl Into<Box<str>>) {
		match content_type {
			ContentType::Html => self.html = content.into(),
			ContentType::Css => self.css = content.into(),
			ContentType::Js => self.js = content.into(),
		}
	}
}

/// Custom layout content as it appears inside a preference document,
/// before it is persisted. Unlike [`CustomContent`], absent css/js are
/// distinguishable from empty ones here.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomLayoutContent {
	pub html: Box<str>,
	pub css: Option<Box<str>>,
	pub js: Option<Box<str>>,
}

impl CustomLayoutContent {
	/// Normalizes into the storage shape, absent parts becoming empty
	pub fn into_stored(self) -> CustomContent {
		CustomContent {
			html: self.html,
			css: self.css.unwrap_or_default(),
			js: self.js.unwrap_or_default(),
		}
	}
}


// vim: ts=4
