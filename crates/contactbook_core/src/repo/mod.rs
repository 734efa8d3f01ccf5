//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load-all/save-all contract used by the record store.
//! - Keep file format and I/O details out of the store and query layers.
//!
//! # Invariants
//! - A missing backing file is reported as an empty, file-less load, never as
//!   an error.
//! - Saves always write the full collection.

pub mod record_repo;
