//! Glob-based record filtering.
//!
//! # Responsibility
//! - Parse a comma-separated list of `field=pattern` conditions up front.
//! - Match records against every condition (logical AND).
//!
//! # Invariants
//! - Field names and patterns are trimmed; patterns are lowercased at parse
//!   time and values are lowercased at match time.
//! - A condition on an unknown field never matches; it is not an error.
//! - Patterns follow shell rules: a run of `*` acts as one `*` and an
//!   unclosed `[` matches itself.
//! - Results keep collection order.

use crate::model::record::Record;
use glob::{Pattern, PatternError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Result type for filter APIs.
pub type QueryResult<T> = Result<T, QueryError>;

/// Filter-layer error for query parsing.
#[derive(Debug)]
pub enum QueryError {
    /// A non-empty condition has no `=` separator.
    MalformedCondition { condition: String },
    /// The pattern side is not a valid glob.
    InvalidPattern {
        pattern: String,
        source: PatternError,
    },
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedCondition { condition } => write!(
                f,
                "malformed query condition `{condition}`: expected `field=pattern`"
            ),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid glob pattern `{pattern}`: {source}")
            }
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedCondition { .. } => None,
            Self::InvalidPattern { source, .. } => Some(source),
        }
    }
}

/// Single `field=pattern` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Trimmed field name as written by the caller.
    pub field: String,
    /// Trimmed, lowercased glob.
    pub pattern: Pattern,
}

impl Condition {
    /// Returns whether `record` has `field` and its lowercased value matches.
    pub fn matches(&self, record: &Record) -> bool {
        record
            .field(&self.field)
            .is_some_and(|value| self.pattern.matches(&value.to_lowercase()))
    }
}

/// Parsed filter query; a record matches when every condition matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    conditions: Vec<Condition>,
}

impl FilterQuery {
    /// Parses the comma/equals DSL.
    ///
    /// Each comma-separated condition is split on its first `=`. An empty
    /// condition (for example the empty query) becomes an empty field with an
    /// empty pattern, which no record can satisfy.
    ///
    /// # Errors
    /// - [`QueryError::MalformedCondition`] when a non-empty condition lacks `=`.
    /// - [`QueryError::InvalidPattern`] when a pattern is not a valid glob.
    pub fn parse(query: &str) -> QueryResult<Self> {
        let conditions = query
            .split(',')
            .map(parse_condition)
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(Self { conditions })
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns whether `record` satisfies every condition.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(record))
    }

    /// Returns the matching records in collection order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

impl FromStr for FilterQuery {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Parses `query` and returns the matching records.
///
/// Convenience wrapper over [`FilterQuery::parse`] + [`FilterQuery::apply`].
pub fn filter_records<'a>(records: &'a [Record], query: &str) -> QueryResult<Vec<&'a Record>> {
    let parsed = FilterQuery::parse(query)?;
    let matched = parsed.apply(records);
    info!(
        "event=filter module=query status=ok conditions={} scanned={} matched={}",
        parsed.conditions.len(),
        records.len(),
        matched.len()
    );
    Ok(matched)
}

fn parse_condition(raw: &str) -> QueryResult<Condition> {
    let (field, pattern) = match raw.split_once('=') {
        Some(parts) => parts,
        None if raw.trim().is_empty() => ("", ""),
        None => {
            debug!("event=filter_parse module=query status=error error_code=missing_separator");
            return Err(QueryError::MalformedCondition {
                condition: raw.to_string(),
            });
        }
    };

    let pattern_text = to_glob_syntax(&pattern.trim().to_lowercase());
    let pattern = Pattern::new(&pattern_text).map_err(|source| {
        debug!("event=filter_parse module=query status=error error_code=invalid_pattern");
        QueryError::InvalidPattern {
            pattern: pattern_text.clone(),
            source,
        }
    })?;

    Ok(Condition {
        field: field.trim().to_string(),
        pattern,
    })
}

/// Rewrites shell-glob text into `glob` crate syntax.
///
/// `glob` gives `**` a path meaning and rejects unclosed brackets, while shell
/// matching treats a run of `*` as one `*` and an unclosed `[` as a literal.
fn to_glob_syntax(pattern: &str) -> String {
    let chars = pattern.chars().collect::<Vec<_>>();
    let mut output = String::with_capacity(pattern.len());
    let mut index = 0;

    while index < chars.len() {
        match chars[index] {
            '*' => {
                output.push('*');
                while chars.get(index + 1) == Some(&'*') {
                    index += 1;
                }
            }
            '[' => match class_end(&chars, index) {
                Some(end) => {
                    output.extend(&chars[index..=end]);
                    index = end;
                }
                None => output.push_str("[[]"),
            },
            other => output.push(other),
        }
        index += 1;
    }

    output
}

/// Index of the `]` closing the class opened at `open`.
///
/// A leading `!` and a `]` right after it belong to the class body.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut start = open + 1;
    if chars.get(start) == Some(&'!') {
        start += 1;
    }
    if chars.get(start) == Some(&']') {
        start += 1;
    }
    chars
        .get(start..)?
        .iter()
        .position(|&ch| ch == ']')
        .map(|offset| start + offset)
}

#[cfg(test)]
mod tests {
    use super::{to_glob_syntax, FilterQuery, QueryError};

    #[test]
    fn parse_trims_fields_and_lowercases_patterns() {
        let query = FilterQuery::parse(" name = Al* , address=*St*").unwrap();
        let conditions = query.conditions();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].field, "name");
        assert_eq!(conditions[0].pattern.as_str(), "al*");
        assert_eq!(conditions[1].field, "address");
        assert_eq!(conditions[1].pattern.as_str(), "*st*");
    }

    #[test]
    fn parse_splits_on_first_equals_only() {
        let query = FilterQuery::parse("address=a=b*").unwrap();
        assert_eq!(query.conditions()[0].field, "address");
        assert_eq!(query.conditions()[0].pattern.as_str(), "a=b*");
    }

    #[test]
    fn parse_empty_query_yields_single_empty_condition() {
        let query = FilterQuery::parse("").unwrap();
        assert_eq!(query.conditions().len(), 1);
        assert_eq!(query.conditions()[0].field, "");
        assert_eq!(query.conditions()[0].pattern.as_str(), "");
    }

    #[test]
    fn parse_rejects_condition_without_separator() {
        let err = FilterQuery::parse("name=Al*,address").unwrap_err();
        assert!(
            matches!(err, QueryError::MalformedCondition { ref condition } if condition == "address")
        );
        assert!(err.to_string().contains("expected `field=pattern`"));
    }

    #[test]
    fn star_runs_collapse_to_single_star() {
        assert_eq!(to_glob_syntax("al**"), "al*");
        assert_eq!(to_glob_syntax("***st"), "*st");
        assert_eq!(to_glob_syntax("*li*e**"), "*li*e*");
    }

    #[test]
    fn closed_classes_are_kept_verbatim() {
        assert_eq!(to_glob_syntax("[a-c]*"), "[a-c]*");
        assert_eq!(to_glob_syntax("[!x]"), "[!x]");
        assert_eq!(to_glob_syntax("[]a]"), "[]a]");
        assert_eq!(to_glob_syntax("[**]x"), "[**]x");
    }

    #[test]
    fn unclosed_brackets_become_literals() {
        assert_eq!(to_glob_syntax("[a"), "[[]a");
        assert_eq!(to_glob_syntax("a["), "a[[]");
        assert_eq!(to_glob_syntax("al[]ce"), "al[[]]ce");
        assert_eq!(to_glob_syntax("[!]"), "[[]!]");
    }

    #[test]
    fn parse_accepts_shell_patterns_glob_would_reject() {
        for query in ["name=Al**", "address=**St", "name=[a", "name=al[]ce"] {
            let parsed = FilterQuery::parse(query);
            assert!(parsed.is_ok(), "query `{query}` failed: {parsed:?}");
        }
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let query: FilterQuery = "phone_number=555*".parse().unwrap();
        assert_eq!(query.conditions()[0].field, "phone_number");
    }
}
