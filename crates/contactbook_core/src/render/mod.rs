//! Record rendering entry points.
//!
//! # Responsibility
//! - Serialize collections into machine formats (`json`, `yaml`, `csv`).
//! - Display collections in human formats (`text`, `html`).
//!
//! # Invariants
//! - Every render path returns a string; printing is left to callers.
//! - Rendering never mutates or reorders the collection.

pub mod display;
pub mod serialize;
