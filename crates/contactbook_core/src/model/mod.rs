//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted by the store and read by the
//!   query/render layers.
//!
//! # Invariants
//! - Every record carries exactly the three string fields `name`, `address`
//!   and `phone_number`.
//! - Records have no identity beyond their position in the collection.

pub mod record;
