//! Branding preference engine.
//!
//! Validates preference documents, keeps their custom layout references
//! synchronized with separately persisted HTML/CSS/JS parts, and resolves
//! complete, self-contained documents back out of the two stores.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod locale;
pub mod resolve;
pub mod service;
pub mod validate;

mod prelude;

pub use cache::{CacheHook, NoopCacheHook};
pub use service::BrandingService;

// vim: ts=4
