//! Adapter that stores the custom layout content parts of a scope.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// A Brandkit custom content adapter
///
/// Implementations persist the html/css/js parts of a custom layout for an
/// organization or application scope, one row per part. The three parts
/// form one logical unit: `create_content` and `update_content` are
/// all-or-nothing, and a configured scope always carries all three rows
/// (empty css/js rows included). Uniqueness of `(scope, content type)` is
/// enforced by the implementation so concurrent first writers converge.
#[async_trait]
pub trait ContentAdapter: Debug + Send + Sync {
	/// Returns true if at least one content row exists for the scope
	async fn content_exists(&self, scope: &ScopeKey) -> BkResult<bool>;

	/// Writes all three content rows with one shared creation timestamp.
	///
	/// Fails with [`Error::AlreadyExists`] when a row for the scope is
	/// already present; nothing is written in that case.
	async fn create_content(&self, scope: &ScopeKey, content: &CustomContent) -> BkResult<()>;

	/// Rewrites the three content rows, advancing `updated_at` only
	async fn update_content(&self, scope: &ScopeKey, content: &CustomContent) -> BkResult<()>;

	/// Assembles the stored parts; a part with no row reads as an empty string
	async fn read_content(&self, scope: &ScopeKey) -> BkResult<CustomContent>;

	/// Removes every content row of the scope; an absent scope is a no-op
	async fn delete_content(&self, scope: &ScopeKey) -> BkResult<()>;

	/// Removes all content rows owned by a tenant, across both scope kinds
	async fn delete_tenant_content(&self, tn_id: TnId) -> BkResult<()>;
}

// vim: ts=4
