//! Collaborator seams the engine calls out to but does not define.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// Generic preference document store keyed by tenant, resource type and
/// resource name. Documents are opaque JSON trees to this seam; absence is
/// reported as `None`, not as an error.
#[async_trait]
pub trait PreferenceAdapter: Debug + Send + Sync {
	/// Reads a stored document, `None` when nothing is stored under the key
	async fn read_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
	) -> BkResult<Option<serde_json::Value>>;

	/// Inserts or replaces the document stored under the key
	async fn write_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
		document: &serde_json::Value,
	) -> BkResult<()>;

	async fn preference_exists(&self, tn_id: TnId, res_type: ResourceType, name: &str)
	-> BkResult<bool>;

	/// Deletes the document stored under the key; an absent key is a no-op
	async fn delete_preference(&self, tn_id: TnId, res_type: ResourceType, name: &str)
	-> BkResult<()>;

	/// Deletes every document of every resource type owned by the tenant
	async fn delete_tenant_preferences(&self, tn_id: TnId) -> BkResult<()>;
}

/// Resolves tenant domains to tenant IDs
#[async_trait]
pub trait TenantResolver: Debug + Send + Sync {
	async fn tn_id_by_domain(&self, domain: &str) -> BkResult<TnId>;
}

// vim: ts=4
