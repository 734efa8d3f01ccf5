//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory record collection and keep it in sync with storage.
//! - Give CLI callers one entry point for add/filter/render.

pub mod record_store;
