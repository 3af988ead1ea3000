//! Branding service orchestration tests
//!
//! These run the full service flow over in-memory adapters: upsert
//! branching, create-conflict fallback, strip-and-splice of custom layout
//! content, cache hook signaling, and error propagation.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use brandkit_core::service::branding_enabled;
use brandkit_core::{BrandingService, CacheHook};
use brandkit_types::content_adapter::ContentAdapter;
use brandkit_types::preference_adapter::{PreferenceAdapter, TenantResolver};
use brandkit_types::prelude::*;

/// In-memory content store with switchable failure modes
#[derive(Debug, Default)]
struct MemContentAdapter {
	rows: Mutex<HashMap<ScopeKey, CustomContent>>,
	conflict_on_create: AtomicBool,
	fail_reads: AtomicBool,
	creates: AtomicU32,
	updates: AtomicU32,
}

#[async_trait]
impl ContentAdapter for MemContentAdapter {
	async fn content_exists(&self, scope: &ScopeKey) -> BkResult<bool> {
		Ok(self.rows.lock().unwrap().contains_key(scope))
	}

	async fn create_content(&self, scope: &ScopeKey, content: &CustomContent) -> BkResult<()> {
		self.creates.fetch_add(1, Ordering::SeqCst);
		if self.conflict_on_create.swap(false, Ordering::SeqCst) {
			// Another writer slipped in between the existence check and us
			self.rows.lock().unwrap().insert(scope.clone(), CustomContent::default());
			return Err(Error::already_exists(scope));
		}
		let mut rows = self.rows.lock().unwrap();
		if rows.contains_key(scope) {
			return Err(Error::already_exists(scope));
		}
		rows.insert(scope.clone(), content.clone());
		Ok(())
	}

	async fn update_content(&self, scope: &ScopeKey, content: &CustomContent) -> BkResult<()> {
		self.updates.fetch_add(1, Ordering::SeqCst);
		self.rows.lock().unwrap().insert(scope.clone(), content.clone());
		Ok(())
	}

	async fn read_content(&self, scope: &ScopeKey) -> BkResult<CustomContent> {
		if self.fail_reads.load(Ordering::SeqCst) {
			return Err(Error::storage(
				StoreOp::ReadContent,
				scope,
				std::io::Error::other("store offline"),
			));
		}
		Ok(self.rows.lock().unwrap().get(scope).cloned().unwrap_or_default())
	}

	async fn delete_content(&self, scope: &ScopeKey) -> BkResult<()> {
		self.rows.lock().unwrap().remove(scope);
		Ok(())
	}

	async fn delete_tenant_content(&self, tn_id: TnId) -> BkResult<()> {
		self.rows.lock().unwrap().retain(|scope, _| scope.tn_id != tn_id);
		Ok(())
	}
}

#[derive(Debug, Default)]
struct MemPreferenceAdapter {
	docs: Mutex<HashMap<(u32, &'static str, String), serde_json::Value>>,
}

#[async_trait]
impl PreferenceAdapter for MemPreferenceAdapter {
	async fn read_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
	) -> BkResult<Option<serde_json::Value>> {
		Ok(self.docs.lock().unwrap().get(&(tn_id.0, res_type.as_str(), name.to_owned())).cloned())
	}

	async fn write_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
		document: &serde_json::Value,
	) -> BkResult<()> {
		self.docs
			.lock()
			.unwrap()
			.insert((tn_id.0, res_type.as_str(), name.to_owned()), document.clone());
		Ok(())
	}

	async fn preference_exists(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
	) -> BkResult<bool> {
		Ok(self.docs.lock().unwrap().contains_key(&(tn_id.0, res_type.as_str(), name.to_owned())))
	}

	async fn delete_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
	) -> BkResult<()> {
		self.docs.lock().unwrap().remove(&(tn_id.0, res_type.as_str(), name.to_owned()));
		Ok(())
	}

	async fn delete_tenant_preferences(&self, tn_id: TnId) -> BkResult<()> {
		self.docs.lock().unwrap().retain(|(doc_tn_id, _, _), _| *doc_tn_id != tn_id.0);
		Ok(())
	}
}

#[derive(Debug)]
struct StaticTenantResolver(u32);

#[async_trait]
impl TenantResolver for StaticTenantResolver {
	async fn tn_id_by_domain(&self, _domain: &str) -> BkResult<TnId> {
		Ok(TnId(self.0))
	}
}

#[derive(Debug, Default)]
struct CountingCacheHook {
	scopes: Mutex<Vec<String>>,
}

impl CacheHook for CountingCacheHook {
	fn invalidate(&self, scope: &ScopeKey) {
		self.scopes.lock().unwrap().push(scope.to_string());
	}
}

fn create_test_service() -> (BrandingService, Arc<MemContentAdapter>, Arc<MemPreferenceAdapter>) {
	let content = Arc::new(MemContentAdapter::default());
	let prefs = Arc::new(MemPreferenceAdapter::default());
	let service =
		BrandingService::new(content.clone(), prefs.clone(), Arc::new(StaticTenantResolver(5)));
	(service, content, prefs)
}

const MAIN_HTML: &str = "<div>{{{MainSection}}}</div>";

fn content(html: &str, css: &str, js: &str) -> CustomContent {
	CustomContent { html: html.into(), css: css.into(), js: js.into() }
}

#[tokio::test]
async fn test_upsert_creates_then_updates() {
	let (service, store, _) = create_test_service();
	let scope = ScopeKey::org(TnId(5));

	service
		.upsert_custom_content(&scope, &content(MAIN_HTML, "", ""))
		.await
		.expect("first upsert failed");
	service
		.upsert_custom_content(&scope, &content(MAIN_HTML, "body {}", ""))
		.await
		.expect("second upsert failed");

	assert_eq!(store.creates.load(Ordering::SeqCst), 1);
	assert_eq!(store.updates.load(Ordering::SeqCst), 1);
	let stored = service.read_custom_content(&scope).await.expect("read failed");
	assert_eq!(stored, content(MAIN_HTML, "body {}", ""));
}

#[tokio::test]
async fn test_create_conflict_falls_back_to_update() {
	let (service, store, _) = create_test_service();
	let scope = ScopeKey::org(TnId(5));
	store.conflict_on_create.store(true, Ordering::SeqCst);

	let expected = content(MAIN_HTML, "main {}", "run();");
	service
		.upsert_custom_content(&scope, &expected)
		.await
		.expect("upsert must absorb the create conflict");

	assert_eq!(store.creates.load(Ordering::SeqCst), 1);
	assert_eq!(store.updates.load(Ordering::SeqCst), 1);
	let stored = service.read_custom_content(&scope).await.expect("read failed");
	assert_eq!(stored, expected, "the losing writer must still win the final state");
}

#[tokio::test]
async fn test_upsert_rejects_blank_html() {
	let (service, store, _) = create_test_service();
	let scope = ScopeKey::org(TnId(5));

	let result = service.upsert_custom_content(&scope, &content("  ", "a {}", "")).await;
	assert!(matches!(result, Err(Error::InvalidCustomLayoutContent)));

	let result = service.upsert_custom_content(&scope, &content("<div>bare</div>", "", "")).await;
	assert!(matches!(result, Err(Error::MandatoryComponentNotFound { .. })));

	assert_eq!(store.creates.load(Ordering::SeqCst), 0, "no write may happen on bad input");
}

#[tokio::test]
async fn test_upsert_preference_strips_markup_and_read_splices_it_back() {
	let (service, store, prefs) = create_test_service();
	let scope = ScopeKey::app(TnId(5), "app-1");
	let raw = json!({
		"organizationDetails": {"displayName": "Acme"},
		"layout": {
			"activeLayout": "custom",
			"customContent": {"html": MAIN_HTML, "css": "main { color: red }"}
		}
	})
	.to_string();

	service.upsert_preference(&scope, "en-US", &raw).await.expect("upsert failed");

	// The stored document must not carry the markup inline
	let stored_doc = prefs
		.docs
		.lock()
		.unwrap()
		.get(&(5, "APPLICATION_BRANDING_PREFERENCES", "app-1_en-US".to_owned()))
		.cloned()
		.expect("document missing from the preference store");
	assert_eq!(stored_doc.pointer("/layout/customContent"), None);

	// The markup landed in the content store instead
	let stored = store.rows.lock().unwrap().get(&scope).cloned().expect("content rows missing");
	assert_eq!(stored, content(MAIN_HTML, "main { color: red }", ""));

	// Reading resolves a self-contained document again
	let resolved = service.read_preference(&scope, "en_US").await.expect("read failed");
	assert_eq!(
		resolved,
		json!({
			"organizationDetails": {"displayName": "Acme"},
			"layout": {
				"activeLayout": "custom",
				"customContent": {"html": MAIN_HTML, "css": "main { color: red }"}
			}
		})
	);
}

#[tokio::test]
async fn test_upsert_preference_without_custom_layout_writes_no_content() {
	let (service, store, _) = create_test_service();
	let scope = ScopeKey::org(TnId(5));
	let raw = json!({"layout": {"activeLayout": "centered"}}).to_string();

	service.upsert_preference(&scope, "en-US", &raw).await.expect("upsert failed");

	assert!(store.rows.lock().unwrap().is_empty());
	assert!(!service.custom_content_exists(&scope).await.expect("exists failed"));
}

#[tokio::test]
async fn test_read_preference_not_configured() {
	let (service, _, _) = create_test_service();
	let scope = ScopeKey::org(TnId(5));

	match service.read_preference(&scope, "en-US").await {
		Err(err @ Error::NotConfigured { .. }) => {
			assert_eq!(err.code(), "BRANDINGM_00002");
			assert!(err.is_client_error());
		}
		other => panic!("expected NotConfigured, got {:?}", other),
	}
}

#[tokio::test]
async fn test_read_failure_propagates_instead_of_returning_empty() {
	let (service, store, prefs) = create_test_service();
	let scope = ScopeKey::org(TnId(5));
	prefs
		.write_preference(
			TnId(5),
			ResourceType::BrandingPreferences,
			"en-US",
			&json!({"layout": {"activeLayout": "custom"}}),
		)
		.await
		.expect("seed failed");
	store.fail_reads.store(true, Ordering::SeqCst);

	let result = service.read_preference(&scope, "en-US").await;
	match result {
		Err(err @ Error::Storage { .. }) => {
			assert!(!err.is_client_error());
			assert!(std::error::Error::source(&err).is_some(), "cause must be preserved");
		}
		other => panic!("a failing store must not yield fabricated output, got {:?}", other),
	}

	let result = service.read_custom_content(&scope).await;
	assert!(matches!(result, Err(Error::Storage { .. })));
}

#[tokio::test]
async fn test_cache_hook_fires_on_writes_only() {
	let (_, store, prefs) = create_test_service();
	let hook = Arc::new(CountingCacheHook::default());
	let service = BrandingService::new(store, prefs, Arc::new(StaticTenantResolver(5)))
		.with_cache_hook(hook.clone());
	let scope = ScopeKey::org(TnId(5));

	let bad = service.upsert_custom_content(&scope, &content("", "", "")).await;
	assert!(bad.is_err());
	assert_eq!(hook.scopes.lock().unwrap().len(), 0, "no signal on rejected input");

	service
		.upsert_custom_content(&scope, &content(MAIN_HTML, "", ""))
		.await
		.expect("upsert failed");
	service.delete_custom_content(&scope).await.expect("delete failed");
	service
		.upsert_preference(&scope, "en-US", &json!({"theme": "dark"}).to_string())
		.await
		.expect("upsert failed");
	service.delete_preference(&scope, "en-US").await.expect("delete failed");
	service.delete_tenant_branding(TnId(5)).await.expect("cleanup failed");

	assert_eq!(hook.scopes.lock().unwrap().len(), 5);
	assert!(hook.scopes.lock().unwrap().iter().all(|scope| scope == "ORG/5"));
}

#[tokio::test]
async fn test_scope_for_domain_normalizes_blank_app_id() {
	let (service, _, _) = create_test_service();

	let scope = service.scope_for_domain("acme.example.com", None).await.expect("resolve failed");
	assert_eq!(scope, ScopeKey::org(TnId(5)));

	let scope =
		service.scope_for_domain("acme.example.com", Some("")).await.expect("resolve failed");
	assert_eq!(scope, ScopeKey::org(TnId(5)), "blank application IDs fall back to ORG");

	let scope =
		service.scope_for_domain("acme.example.com", Some("app-1")).await.expect("resolve failed");
	assert_eq!(scope, ScopeKey::app(TnId(5), "app-1"));
}

#[tokio::test]
async fn test_delete_tenant_branding_clears_both_stores() {
	let (service, store, prefs) = create_test_service();
	let org = ScopeKey::org(TnId(5));
	let app = ScopeKey::app(TnId(5), "app-1");
	let other = ScopeKey::org(TnId(9));

	service.upsert_custom_content(&org, &content(MAIN_HTML, "", "")).await.expect("seed failed");
	service.upsert_custom_content(&app, &content(MAIN_HTML, "", "")).await.expect("seed failed");
	service.upsert_custom_content(&other, &content(MAIN_HTML, "", "")).await.expect("seed failed");
	service
		.upsert_preference(&org, "en-US", &json!({"theme": "dark"}).to_string())
		.await
		.expect("seed failed");

	service.delete_tenant_branding(TnId(5)).await.expect("cleanup failed");

	assert!(!service.custom_content_exists(&org).await.expect("exists failed"));
	assert!(!service.custom_content_exists(&app).await.expect("exists failed"));
	assert!(
		service.custom_content_exists(&other).await.expect("exists failed"),
		"other tenants must be untouched"
	);
	assert!(store.rows.lock().unwrap().len() == 1);
	assert!(prefs.docs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_end_to_end_org_write_and_splice() {
	let (service, store, _) = create_test_service();
	let scope = ScopeKey::org(TnId(5));
	let triple = content(MAIN_HTML, "", "");

	service.upsert_custom_content(&scope, &triple).await.expect("write failed");
	assert!(service.custom_content_exists(&scope).await.expect("exists failed"));
	assert_eq!(service.read_custom_content(&scope).await.expect("read failed"), triple);

	let mut doc = json!({"layout": {"activeLayout": "custom"}});
	brandkit_core::resolve::splice_custom_content(&mut doc, &scope, store.as_ref())
		.await
		.expect("splice failed");
	assert_eq!(
		doc,
		json!({
			"layout": {
				"activeLayout": "custom",
				"customContent": {"html": MAIN_HTML}
			}
		}),
		"blank css/js must be omitted from the spliced map"
	);
}

#[tokio::test]
async fn test_splice_writes_parts_in_order() {
	let (service, store, _) = create_test_service();
	let scope = ScopeKey::org(TnId(5));
	service
		.upsert_custom_content(&scope, &content(MAIN_HTML, "main {}", "run();"))
		.await
		.expect("write failed");

	let mut doc = json!({"layout": {"activeLayout": "custom"}});
	brandkit_core::resolve::splice_custom_content(&mut doc, &scope, store.as_ref())
		.await
		.expect("splice failed");

	let serialized = doc.to_string();
	let html_at = serialized.find("\"html\"").expect("html missing");
	let css_at = serialized.find("\"css\"").expect("css missing");
	let js_at = serialized.find("\"js\"").expect("js missing");
	assert!(html_at < css_at && css_at < js_at, "parts must keep html, css, js order");
}

#[tokio::test]
async fn test_app_scope_never_written_reads_empty() {
	let (service, _, _) = create_test_service();
	let scope = ScopeKey::app(TnId(5), "app-1");

	assert!(!service.custom_content_exists(&scope).await.expect("exists failed"));
	assert_eq!(
		service.read_custom_content(&scope).await.expect("read failed"),
		CustomContent::default(),
		"an unconfigured scope reads as empty parts, not as an error"
	);
}

#[test]
fn test_branding_enabled_defaults_to_true() {
	assert!(branding_enabled(&json!({})));
	assert!(branding_enabled(&json!({"configs": {}})));
	assert!(branding_enabled(&json!({"configs": {"isBrandingEnabled": true}})));
	assert!(!branding_enabled(&json!({"configs": {"isBrandingEnabled": false}})));
}

// vim: ts=4
