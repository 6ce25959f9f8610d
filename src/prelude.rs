//! Prelude module for lunar_date crate.
//!
//! Re-exports the derive_more macros used across the crate.

#[allow(unused_imports)]
pub use derive_more::{Display, Into};
