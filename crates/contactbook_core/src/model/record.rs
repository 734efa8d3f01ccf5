//! Contact record model.
//!
//! # Responsibility
//! - Define the flat `{name, address, phone_number}` record.
//! - Provide by-name field lookup for the filter DSL.
//!
//! # Invariants
//! - Wire field order is `name`, `address`, `phone_number`.
//! - Field lookup only knows the three canonical field names; anything else
//!   is reported as absent rather than as an error.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Wire names of the record fields, in persisted/rendered order.
pub const RECORD_FIELDS: [&str; 3] = ["name", "address", "phone_number"];

/// One person's contact entry.
///
/// Duplicates are allowed; two records with equal fields are indistinguishable
/// except by their position in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub address: String,
    pub phone_number: String,
}

impl Record {
    /// Creates a record from raw field values.
    ///
    /// No validation is applied; empty strings are kept as-is.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Looks up a field value by its wire name.
    ///
    /// Returns `None` for names outside [`RECORD_FIELDS`].
    pub fn field(&self, field_name: &str) -> Option<&str> {
        match field_name {
            "name" => Some(self.name.as_str()),
            "address" => Some(self.address.as_str()),
            "phone_number" => Some(self.phone_number.as_str()),
            _ => None,
        }
    }

    /// Returns field values in wire order.
    pub fn values(&self) -> [&str; 3] {
        [
            self.name.as_str(),
            self.address.as_str(),
            self.phone_number.as_str(),
        ]
    }
}

/// Encodes records as a 4-space indented JSON array.
///
/// Shared by the file store and the `json` render format so both emit the
/// same bytes.
pub fn to_pretty_json(records: &[Record]) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
