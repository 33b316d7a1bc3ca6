//! Prelude module for datetime_period crate.
//!
//! Re-exports commonly used derive macros from derive_more.

pub use derive_more::Display;
