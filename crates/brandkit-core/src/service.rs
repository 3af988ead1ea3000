//! Branding service: the main interface for managing branding preferences
//! and custom layout content.

use serde_json::Value;
use std::sync::Arc;

use brandkit_types::content_adapter::ContentAdapter;
use brandkit_types::preference_adapter::{PreferenceAdapter, TenantResolver};

use crate::cache::{CacheHook, NoopCacheHook};
use crate::locale;
use crate::prelude::*;
use crate::resolve;
use crate::validate;

const CONFIGS_KEY: &str = "configs";
const IS_BRANDING_ENABLED_KEY: &str = "isBrandingEnabled";

/// True unless the document explicitly disables branding
pub fn branding_enabled(document: &Value) -> bool {
	document
		.get(CONFIGS_KEY)
		.and_then(|configs| configs.get(IS_BRANDING_ENABLED_KEY))
		.and_then(Value::as_bool)
		.unwrap_or(true)
}

/// Branding service over a content store, a preference document store and
/// a tenant resolver.
pub struct BrandingService {
	content: Arc<dyn ContentAdapter>,
	preferences: Arc<dyn PreferenceAdapter>,
	tenants: Arc<dyn TenantResolver>,
	cache: Arc<dyn CacheHook>,
}

impl BrandingService {
	pub fn new(
		content: Arc<dyn ContentAdapter>,
		preferences: Arc<dyn PreferenceAdapter>,
		tenants: Arc<dyn TenantResolver>,
	) -> Self {
		Self { content, preferences, tenants, cache: Arc::new(NoopCacheHook) }
	}

	/// Replaces the no-op invalidation hook with the platform's resolver cache
	pub fn with_cache_hook(mut self, cache: Arc<dyn CacheHook>) -> Self {
		self.cache = cache;
		self
	}

	/// Resolves a tenant domain into a scope key; a blank application ID
	/// resolves to the organization scope
	pub async fn scope_for_domain(
		&self,
		tenant_domain: &str,
		application_id: Option<&str>,
	) -> BkResult<ScopeKey> {
		let tn_id = self.tenants.tn_id_by_domain(tenant_domain).await?;
		Ok(match application_id {
			Some(app_id) => ScopeKey::app(tn_id, app_id),
			None => ScopeKey::org(tn_id),
		})
	}

	/// Validates a raw preference document without touching storage
	pub fn validate_preference(&self, raw_document: &str, tenant_domain: &str) -> BkResult<()> {
		validate::validate_preference(raw_document, tenant_domain)
	}

	/// Validates and stores a preference document for a scope and locale.
	///
	/// Custom layout markup is split out of the document and persisted in
	/// the content store; the stored document never carries the markup
	/// inline, it is spliced back in on read. Markup of the three parts is
	/// written as one unit.
	pub async fn upsert_preference(
		&self,
		scope: &ScopeKey,
		locale: &str,
		raw_document: &str,
	) -> BkResult<()> {
		let mut document = validate::parse_preference(raw_document, &scope.to_string())?;
		validate::validate_custom_layout(&document)?;

		if let Some(layout_content) = resolve::extract_custom_layout(&document) {
			resolve::strip_custom_content(&mut document);
			self.write_content(scope, &layout_content.into_stored()).await?;
		}

		let name = locale::resource_name(scope, locale);
		self.preferences
			.write_preference(scope.tn_id, scope.resource_type(), &name, &document)
			.await?;
		self.cache.invalidate(scope);

		info!("Branding preference stored for {} ({})", scope, name);
		Ok(())
	}

	/// Reads the stored preference document of a scope and locale, with
	/// custom content spliced in
	pub async fn read_preference(&self, scope: &ScopeKey, locale: &str) -> BkResult<Value> {
		let name = locale::resource_name(scope, locale);
		let document = self
			.preferences
			.read_preference(scope.tn_id, scope.resource_type(), &name)
			.await?;
		let Some(mut document) = document else {
			return Err(Error::not_configured(scope));
		};
		resolve::splice_custom_content(&mut document, scope, self.content.as_ref()).await?;
		Ok(document)
	}

	/// Deletes the stored preference document of a scope and locale
	pub async fn delete_preference(&self, scope: &ScopeKey, locale: &str) -> BkResult<()> {
		let name = locale::resource_name(scope, locale);
		self.preferences.delete_preference(scope.tn_id, scope.resource_type(), &name).await?;
		self.cache.invalidate(scope);

		info!("Branding preference deleted for {} ({})", scope, name);
		Ok(())
	}

	/// Stores custom layout content for a scope, creating or updating as
	/// needed. The html part must be non-blank and carry the mandatory
	/// placeholder components.
	pub async fn upsert_custom_content(
		&self,
		scope: &ScopeKey,
		content: &CustomContent,
	) -> BkResult<()> {
		if content.html.trim().is_empty() {
			return Err(Error::InvalidCustomLayoutContent);
		}
		validate::validate_mandatory_components(&content.html)?;

		self.write_content(scope, content).await?;
		self.cache.invalidate(scope);
		Ok(())
	}

	pub async fn custom_content_exists(&self, scope: &ScopeKey) -> BkResult<bool> {
		self.content.content_exists(scope).await
	}

	pub async fn read_custom_content(&self, scope: &ScopeKey) -> BkResult<CustomContent> {
		self.content.read_content(scope).await
	}

	/// Removes the custom layout content of a scope; an unconfigured scope
	/// is a no-op
	pub async fn delete_custom_content(&self, scope: &ScopeKey) -> BkResult<()> {
		self.content.delete_content(scope).await?;
		self.cache.invalidate(scope);

		info!("Custom layout content deleted for {}", scope);
		Ok(())
	}

	/// Removes every branding resource owned by a tenant: custom content of
	/// both scope kinds and preference documents of every resource type
	pub async fn delete_tenant_branding(&self, tn_id: TnId) -> BkResult<()> {
		self.content.delete_tenant_content(tn_id).await?;
		self.preferences.delete_tenant_preferences(tn_id).await?;
		self.cache.invalidate(&ScopeKey::org(tn_id));

		info!("Branding data removed for tenant {}", tn_id);
		Ok(())
	}

	/// Create-or-update decision for the three content rows of a scope.
	///
	/// The existence check races with concurrent first writers; losing the
	/// race surfaces as `AlreadyExists` from `create_content` and resolves
	/// by retrying once as an update, so writers converge last-write-wins.
	async fn write_content(&self, scope: &ScopeKey, content: &CustomContent) -> BkResult<()> {
		if self.content.content_exists(scope).await? {
			self.content.update_content(scope, content).await?;
			debug!("Custom layout content updated for {}", scope);
			return Ok(());
		}
		match self.content.create_content(scope, content).await {
			Err(Error::AlreadyExists { .. }) => {
				debug!("Create raced with another writer for {}, updating instead", scope);
				self.content.update_content(scope, content).await
			}
			res => {
				if res.is_ok() {
					debug!("Custom layout content created for {}", scope);
				}
				res
			}
		}
	}
}

// vim: ts=4
