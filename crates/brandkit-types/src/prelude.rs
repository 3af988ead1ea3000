pub use crate::error::{BkResult, Error, StoreOp};
pub use crate::types::{
	ContentType, CustomContent, CustomLayoutContent, ResourceType, Scope, ScopeKey, ScopeKind,
	Timestamp, TnId,
};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
