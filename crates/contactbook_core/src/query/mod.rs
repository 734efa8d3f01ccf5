//! Filter query entry points.
//!
//! # Responsibility
//! - Parse the `field=pattern[,field=pattern...]` DSL into typed conditions.
//! - Select matching records without touching the store.

pub mod filter;
