pub use brandkit_types::prelude::*;

// vim: ts=4
