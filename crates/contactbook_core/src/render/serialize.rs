//! Machine-readable serialization formats.
//!
//! # Invariants
//! - `json` output is byte-identical to the persisted file format.
//! - `csv` fields are joined verbatim; values containing commas or newlines
//!   are not quoted and will shift columns.

use crate::model::record::{to_pretty_json, Record, RECORD_FIELDS};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RenderResult<T> = Result<T, RenderError>;

/// Serialization error.
#[derive(Debug)]
pub enum RenderError {
    /// Format name is not one of `json|yaml|csv`.
    UnsupportedFormat(String),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat(format) => write!(
                f,
                "unsupported serialize format `{format}`; expected json|yaml|csv"
            ),
            Self::Json(err) => write!(f, "json encoding failed: {err}"),
            Self::Yaml(err) => write!(f, "yaml encoding failed: {err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnsupportedFormat(_) => None,
            Self::Json(err) => Some(err),
            Self::Yaml(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

/// Supported serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeFormat {
    Json,
    Yaml,
    Csv,
}

impl SerializeFormat {
    /// Parses an exact format name (`json`, not `JSON`); `None` otherwise.
    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

/// Serializes `records` in the named format.
///
/// # Errors
/// - [`RenderError::UnsupportedFormat`] for names other than `json|yaml|csv`.
/// - Encoder errors from `serde_json`/`serde_yaml`.
pub fn serialize_records(records: &[Record], format: &str) -> RenderResult<String> {
    let Some(format) = SerializeFormat::from_name(format) else {
        warn!(
            "event=render module=render status=error kind=serialize error_code=unsupported_format"
        );
        return Err(RenderError::UnsupportedFormat(format.to_string()));
    };

    let output = match format {
        SerializeFormat::Json => to_pretty_json(records)?,
        SerializeFormat::Yaml => serde_yaml::to_string(records)?,
        SerializeFormat::Csv => to_csv(records),
    };

    debug!(
        "event=render module=render status=ok kind=serialize format={} records={} bytes={}",
        format.as_str(),
        records.len(),
        output.len()
    );
    Ok(output)
}

fn to_csv(records: &[Record]) -> String {
    let mut output = RECORD_FIELDS.join(",");
    output.push('\n');
    for record in records {
        output.push_str(&record.values().join(","));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{to_csv, SerializeFormat};
    use crate::model::record::Record;

    #[test]
    fn csv_of_empty_collection_is_header_only() {
        assert_eq!(to_csv(&[]), "name,address,phone_number\n");
    }

    #[test]
    fn csv_does_not_quote_embedded_commas() {
        let csv = to_csv(&[Record::new("Doe, Jane", "1 St", "555")]);
        assert_eq!(csv, "name,address,phone_number\nDoe, Jane,1 St,555\n");
    }

    #[test]
    fn format_names_are_case_sensitive() {
        assert_eq!(SerializeFormat::from_name("yaml"), Some(SerializeFormat::Yaml));
        assert_eq!(SerializeFormat::from_name("YAML"), None);
    }
}
