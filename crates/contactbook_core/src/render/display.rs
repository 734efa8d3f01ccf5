//! Human-readable display formats.
//!
//! # Responsibility
//! - Render collections as plain text blocks or as a standalone HTML page.
//! - Report unknown formats through a typed value that still prints as the
//!   user-facing sentinel message.

use crate::model::record::Record;
use log::{debug, warn};
use std::fmt::{self, Display, Formatter};

/// Message shown in place of output for an unknown display format.
pub const UNSUPPORTED_DISPLAY_MESSAGE: &str = "Unsupported output format.";

/// Supported display formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    Text,
    Html,
}

impl DisplayFormat {
    /// Parses an exact format name; returns `None` for anything else.
    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "html" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

/// Outcome of [`display_records`].
///
/// `Unsupported` formats through `Display` as [`UNSUPPORTED_DISPLAY_MESSAGE`],
/// so callers that only print see the same text either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOutput {
    Rendered(String),
    Unsupported { format: String },
}

impl DisplayOutput {
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    /// Returns the rendered text or the sentinel message.
    pub fn into_string(self) -> String {
        match self {
            Self::Rendered(text) => text,
            Self::Unsupported { .. } => UNSUPPORTED_DISPLAY_MESSAGE.to_string(),
        }
    }
}

impl Display for DisplayOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rendered(text) => f.write_str(text),
            Self::Unsupported { .. } => f.write_str(UNSUPPORTED_DISPLAY_MESSAGE),
        }
    }
}

/// Renders `records` in the named display format.
pub fn display_records(records: &[Record], format: &str) -> DisplayOutput {
    let Some(display_format) = DisplayFormat::from_name(format) else {
        warn!("event=render module=render status=unsupported kind=display");
        return DisplayOutput::Unsupported {
            format: format.to_string(),
        };
    };

    let output = match display_format {
        DisplayFormat::Text => render_text(records),
        DisplayFormat::Html => render_html(records),
    };
    debug!(
        "event=render module=render status=ok kind=display format={} records={}",
        display_format.as_str(),
        records.len()
    );
    DisplayOutput::Rendered(output)
}

fn render_text(records: &[Record]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&format!("Name: {}\n", record.name));
        output.push_str(&format!("Address: {}\n", record.address));
        output.push_str(&format!("Phone_number: {}\n\n", record.phone_number));
    }
    output
}

fn render_html(records: &[Record]) -> String {
    let mut output = String::from("<html>\n<body>\n");
    for record in records {
        output.push_str(&format!("<h3>Name: {}</h3>\n", escape_html(&record.name)));
        output.push_str(&format!("<p>Address: {}</p>\n", escape_html(&record.address)));
        output.push_str(&format!(
            "<p>Phone_number: {}</p>\n",
            escape_html(&record.phone_number)
        ));
        output.push_str("<hr/>\n");
    }
    output.push_str("</body>\n</html>");
    output
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_html, DisplayFormat, DisplayOutput, UNSUPPORTED_DISPLAY_MESSAGE};

    #[test]
    fn escape_html_replaces_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"A & B"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn unsupported_output_prints_sentinel() {
        let output = DisplayOutput::Unsupported {
            format: "xml".to_string(),
        };
        assert!(!output.is_supported());
        assert_eq!(output.to_string(), UNSUPPORTED_DISPLAY_MESSAGE);
        assert_eq!(output.into_string(), UNSUPPORTED_DISPLAY_MESSAGE);
    }

    #[test]
    fn format_names_are_exact() {
        assert_eq!(DisplayFormat::from_name("html"), Some(DisplayFormat::Html));
        assert_eq!(DisplayFormat::from_name("Text"), None);
    }
}
