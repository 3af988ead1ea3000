//! Shared types, adapter traits, and error types for the Brandkit engine.
//!
//! This crate contains the foundational types that are shared between the
//! engine crate and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! engine's feature modules.

pub mod content_adapter;
pub mod error;
pub mod preference_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
