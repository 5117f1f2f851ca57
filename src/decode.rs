//! Projection of tabular results into typed rows.
//!
//! A [`Row`] is the driver's view of one result row: ordered cells keyed by
//! column name, each either a string or NULL. Row types implement
//! [`FromRow`] by pulling their columns by name; domain types are built from
//! row types with `From`.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("column {0} missing from result")]
    MissingColumn(String),

    #[error("column {0} is NULL")]
    NullColumn(String),

    #[error("column {column}: cannot parse {value:?} as {expected}")]
    InvalidValue {
        column: String,
        value: String,
        expected: &'static str,
    },
}

/// One result row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn new<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: cells
                .into_iter()
                .map(|(column, value)| (column.into(), value.map(Into::into)))
                .collect(),
        }
    }

    /// Convenience for rows without NULL cells.
    pub fn from_pairs<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(cells.into_iter().map(|(k, v)| (k, Some(v))))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(column, _)| column.as_str())
    }

    /// `None` when the column is absent, `Some(None)` when it is NULL.
    pub fn cell(&self, column: &str) -> Option<Option<&str>> {
        self.cells
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value.as_deref())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cell(column).is_some()
    }

    /// A required, non-NULL column.
    pub fn get(&self, column: &str) -> Result<String, DecodeError> {
        match self.cell(column) {
            None => Err(DecodeError::MissingColumn(column.to_string())),
            Some(None) => Err(DecodeError::NullColumn(column.to_string())),
            Some(Some(value)) => Ok(value.to_string()),
        }
    }

    /// A nullable column; absent and NULL both read as `None`, an empty
    /// string stays `Some("")`.
    pub fn opt(&self, column: &str) -> Option<String> {
        self.cell(column).flatten().map(str::to_string)
    }

    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>, DecodeError> {
        self.opt_parsed(column, "integer", |value| value.trim().parse::<i64>().ok())
    }

    pub fn opt_f64(&self, column: &str) -> Result<Option<f64>, DecodeError> {
        self.opt_parsed(column, "number", |value| value.trim().parse::<f64>().ok())
    }

    pub fn opt_bool(&self, column: &str) -> Result<Option<bool>, DecodeError> {
        self.opt_parsed(column, "boolean", parse_bool)
    }

    pub fn bool(&self, column: &str) -> Result<bool, DecodeError> {
        let value = self.get(column)?;
        parse_bool(&value).ok_or_else(|| DecodeError::InvalidValue {
            column: column.to_string(),
            value,
            expected: "boolean",
        })
    }

    pub fn timestamp(&self, column: &str) -> Result<DateTime<Utc>, DecodeError> {
        let value = self.get(column)?;
        parse_timestamp(&value).ok_or_else(|| DecodeError::InvalidValue {
            column: column.to_string(),
            value,
            expected: "timestamp",
        })
    }

    pub fn opt_timestamp(&self, column: &str) -> Result<Option<DateTime<Utc>>, DecodeError> {
        self.opt_parsed(column, "timestamp", parse_timestamp)
    }

    fn opt_parsed<T>(
        &self,
        column: &str,
        expected: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, DecodeError> {
        match self.cell(column).flatten() {
            None => Ok(None),
            Some(value) if value.trim().is_empty() => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| DecodeError::InvalidValue {
                    column: column.to_string(),
                    value: value.to_string(),
                    expected,
                }),
        }
    }
}

pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, DecodeError>;
}

/// Parses the server's boolean spellings (`Y`/`N`, `true`/`false`, `ON`/`OFF`).
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_uppercase().as_str() {
        "Y" | "YES" | "TRUE" | "ON" | "1" => Some(true),
        "N" | "NO" | "FALSE" | "OFF" | "0" => Some(false),
        _ => None,
    }
}

/// `Y`/`N` flag columns; anything unrecognised reads as `false`.
pub fn yes(value: &str) -> bool {
    parse_bool(value).unwrap_or(false)
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%a, %d %b %Y %H:%M:%S %z",
];

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }
    None
}

/// Splits a server-side list such as `[A, B]`, `A,B` or `["A","B"]`.
pub fn parse_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner
        .split(',')
        .map(|item| item.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Parses an enumeration token; tokens outside the known set read as `None`.
pub fn parse_token<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row() -> Row {
        Row::new([
            ("name", Some("WH1")),
            ("Comment", Some("")),
            ("owner", None),
            ("auto_resume", Some("true")),
            ("created_on", Some("2024-01-02 03:04:05.678 -0800")),
            ("size", Some("12")),
        ])
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let row = row();
        assert_eq!(row.get("NAME").unwrap(), "WH1");
        assert_eq!(row.opt("comment"), Some(String::new()));
    }

    #[test]
    fn test_absent_null_and_empty_are_distinct() {
        let row = row();
        assert_eq!(row.cell("missing"), None);
        assert_eq!(row.cell("owner"), Some(None));
        assert_eq!(row.cell("comment"), Some(Some("")));
        assert_eq!(row.opt("missing"), None);
        assert_eq!(row.opt("owner"), None);
        assert_eq!(
            row.get("missing"),
            Err(DecodeError::MissingColumn("missing".into()))
        );
        assert_eq!(row.get("owner"), Err(DecodeError::NullColumn("owner".into())));
    }

    #[test]
    fn test_typed_accessors() {
        let row = row();
        assert!(row.bool("auto_resume").unwrap());
        assert_eq!(row.opt_i64("size").unwrap(), Some(12));
        assert_eq!(row.opt_i64("missing").unwrap(), None);
        assert_eq!(
            row.timestamp("created_on").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 11, 4, 5).unwrap()
                + chrono::Duration::milliseconds(678)
        );
        assert!(matches!(
            row.opt_i64("name"),
            Err(DecodeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_bool("Y"), Some(true));
        assert_eq!(parse_bool("n"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert!(!yes(""));
        assert_eq!(parse_list("[A, B]"), vec!["A", "B"]);
        assert_eq!(parse_list("[\"x\",\"y\"]"), vec!["x", "y"]);
        assert!(parse_list("[]").is_empty());
        assert!(parse_timestamp("2024-05-06T07:08:09Z").is_some());
        assert!(parse_timestamp("not a time").is_none());
    }
}
