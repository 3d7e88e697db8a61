//! Prelude module for age_calc crate.
//!
//! Re-exports the derive_more macros used across the date and result types.

#[allow(unused_imports)]
pub use derive_more::Display;
