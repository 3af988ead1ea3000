//! Resolver cache invalidation seam.
//!
//! Resolved branding is cached by the platform embedding the engine, not
//! here; after a successful write or delete the engine only reports which
//! scope went stale.

use std::fmt::Debug;

use crate::prelude::*;

/// Receives an invalidation signal after every successful write or delete
pub trait CacheHook: Debug + Send + Sync {
	fn invalidate(&self, scope: &ScopeKey);
}

/// Default hook for deployments without a resolver cache
#[derive(Debug, Default)]
pub struct NoopCacheHook;

impl CacheHook for NoopCacheHook {
	fn invalidate(&self, _scope: &ScopeKey) {}
}

// vim: ts=4
