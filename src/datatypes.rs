//! Data-type tokens used in routine signatures, column definitions and
//! argument-bearing identifiers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A data type token.
///
/// Plain tokens are normalised to their canonical family (`INT` → `NUMBER`,
/// `STRING` → `VARCHAR`), matching how the server reports routine signatures.
/// Tokens carrying parameters (`NUMBER(38, 0)`, `VARCHAR(100)`) or unknown
/// tokens are kept verbatim, uppercased, as [`DataType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub enum DataType {
    Array,
    Binary,
    Boolean,
    Date,
    Float,
    Geography,
    Geometry,
    Number,
    Object,
    Time,
    TimestampLtz,
    TimestampNtz,
    TimestampTz,
    Varchar,
    Variant,
    Custom(String),
}

impl DataType {
    /// Parses `token` the same way [`FromStr`] does, so plain synonyms fold
    /// to their family (`custom("varchar") == DataType::Varchar`).
    pub fn custom(token: impl AsRef<str>) -> Self {
        DataType::from(token.as_ref())
    }

    /// The bare family without parameters: `NUMBER(38, 0)` → `NUMBER`.
    /// Routine signatures are reported and matched in this form.
    pub fn family(&self) -> Self {
        match self {
            DataType::Custom(token) => {
                let base = token.split('(').next().unwrap_or(token);
                let base = base.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
                DataType::from_base(&base).unwrap_or(DataType::Custom(base))
            }
            other => other.clone(),
        }
    }

    fn from_base(base: &str) -> Option<Self> {
        let data_type = match base {
            "ARRAY" => DataType::Array,
            "BINARY" | "VARBINARY" => DataType::Binary,
            "BOOLEAN" | "BOOL" => DataType::Boolean,
            "DATE" => DataType::Date,
            "FLOAT" | "FLOAT4" | "FLOAT8" | "DOUBLE" | "DOUBLE PRECISION" | "REAL" => {
                DataType::Float
            }
            "GEOGRAPHY" => DataType::Geography,
            "GEOMETRY" => DataType::Geometry,
            "NUMBER" | "DECIMAL" | "DEC" | "NUMERIC" | "INT" | "INTEGER" | "BIGINT"
            | "SMALLINT" | "TINYINT" | "BYTEINT" => DataType::Number,
            "OBJECT" => DataType::Object,
            "TIME" => DataType::Time,
            "TIMESTAMP_LTZ" => DataType::TimestampLtz,
            "TIMESTAMP" | "TIMESTAMP_NTZ" | "DATETIME" => DataType::TimestampNtz,
            "TIMESTAMP_TZ" => DataType::TimestampTz,
            "VARCHAR" | "STRING" | "TEXT" | "CHAR" | "CHARACTER" | "NCHAR" | "NVARCHAR"
            | "CHAR VARYING" => DataType::Varchar,
            "VARIANT" => DataType::Variant,
            _ => return None,
        };
        Some(data_type)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            DataType::Array => "ARRAY",
            DataType::Binary => "BINARY",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Float => "FLOAT",
            DataType::Geography => "GEOGRAPHY",
            DataType::Geometry => "GEOMETRY",
            DataType::Number => "NUMBER",
            DataType::Object => "OBJECT",
            DataType::Time => "TIME",
            DataType::TimestampLtz => "TIMESTAMP_LTZ",
            DataType::TimestampNtz => "TIMESTAMP_NTZ",
            DataType::TimestampTz => "TIMESTAMP_TZ",
            DataType::Varchar => "VARCHAR",
            DataType::Variant => "VARIANT",
            DataType::Custom(token) => token,
        };
        f.write_str(token)
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.to_string()
    }
}

impl FromStr for DataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        if upper.contains('(') {
            return Ok(DataType::Custom(upper));
        }
        let collapsed = upper.split_whitespace().collect::<Vec<_>>().join(" ");
        Ok(DataType::from_base(&collapsed).unwrap_or(DataType::Custom(upper)))
    }
}

impl From<&str> for DataType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(data_type) => data_type,
            Err(never) => match never {},
        }
    }
}

/// Splits a comma separated list of data types, respecting nested parentheses.
pub fn parse_data_types(list: &str) -> Vec<DataType> {
    split_top_level(list, ',')
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(DataType::from)
        .collect()
}

/// Splits on `separator` outside parentheses and quotes.
pub(crate) fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_single = false;
    let mut in_double = false;
    let mut start = 0;

    for (idx, c) in input.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '(' if !in_single && !in_double => depth += 1,
            ')' if !in_single && !in_double => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 && !in_single && !in_double => {
                parts.push(&input[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}
