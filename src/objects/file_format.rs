//! Named file formats and the type-specific format options shared with
//! stages and external tables.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{In, Like, PropertyDetail, PropertyRow};
use crate::decode::{DecodeError, FromRow, Row, parse_token};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum FileFormatType {
    #[strum(serialize = "CSV")]
    Csv,
    #[strum(serialize = "JSON")]
    Json,
    #[strum(serialize = "AVRO")]
    Avro,
    #[strum(serialize = "ORC")]
    Orc,
    #[strum(serialize = "PARQUET")]
    Parquet,
    #[strum(serialize = "XML")]
    Xml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum Compression {
    #[strum(serialize = "AUTO")]
    Auto,
    #[strum(serialize = "GZIP")]
    Gzip,
    #[strum(serialize = "BZ2")]
    Bz2,
    #[strum(serialize = "BROTLI")]
    Brotli,
    #[strum(serialize = "ZSTD")]
    Zstd,
    #[strum(serialize = "DEFLATE")]
    Deflate,
    #[strum(serialize = "RAW_DEFLATE")]
    RawDeflate,
    #[strum(serialize = "LZO")]
    Lzo,
    #[strum(serialize = "SNAPPY")]
    Snappy,
    #[strum(serialize = "NONE")]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum BinaryFormat {
    #[strum(serialize = "HEX")]
    Hex,
    #[strum(serialize = "BASE64")]
    Base64,
    #[strum(serialize = "UTF8")]
    Utf8,
}

/// A format option that is either a literal string or a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSetting {
    Value(String),
    Auto,
    None,
}

impl FormatSetting {
    pub fn value(value: impl Into<String>) -> Self {
        FormatSetting::Value(value.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvOptions {
    pub compression: Option<Compression>,
    pub record_delimiter: Option<FormatSetting>,
    pub field_delimiter: Option<FormatSetting>,
    pub multi_line: Option<bool>,
    pub file_extension: Option<String>,
    pub parse_header: Option<bool>,
    pub skip_header: Option<u32>,
    pub skip_blank_lines: Option<bool>,
    pub date_format: Option<FormatSetting>,
    pub time_format: Option<FormatSetting>,
    pub timestamp_format: Option<FormatSetting>,
    pub binary_format: Option<BinaryFormat>,
    pub escape: Option<FormatSetting>,
    pub escape_unenclosed_field: Option<FormatSetting>,
    pub trim_space: Option<bool>,
    pub field_optionally_enclosed_by: Option<FormatSetting>,
    pub null_if: Option<Vec<String>>,
    pub error_on_column_count_mismatch: Option<bool>,
    pub replace_invalid_characters: Option<bool>,
    pub empty_field_as_null: Option<bool>,
    pub skip_byte_order_mark: Option<bool>,
    pub encoding: Option<String>,
}

setters!(CsvOptions {
    val compression: Compression,
    val record_delimiter: FormatSetting,
    val field_delimiter: FormatSetting,
    val multi_line: bool,
    opt file_extension: String,
    val parse_header: bool,
    val skip_header: u32,
    val skip_blank_lines: bool,
    val date_format: FormatSetting,
    val time_format: FormatSetting,
    val timestamp_format: FormatSetting,
    val binary_format: BinaryFormat,
    val escape: FormatSetting,
    val escape_unenclosed_field: FormatSetting,
    val trim_space: bool,
    val field_optionally_enclosed_by: FormatSetting,
    val null_if: Vec<String>,
    val error_on_column_count_mismatch: bool,
    val replace_invalid_characters: bool,
    val empty_field_as_null: bool,
    val skip_byte_order_mark: bool,
    opt encoding: String,
});

impl Validate for CsvOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CsvOptions");
        errors.at_most_one_of(
            &["ParseHeader", "SkipHeader"],
            &[&self.parse_header.filter(|on| *on), &self.skip_header],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonOptions {
    pub compression: Option<Compression>,
    pub date_format: Option<FormatSetting>,
    pub time_format: Option<FormatSetting>,
    pub timestamp_format: Option<FormatSetting>,
    pub binary_format: Option<BinaryFormat>,
    pub trim_space: Option<bool>,
    pub multi_line: Option<bool>,
    pub null_if: Option<Vec<String>>,
    pub file_extension: Option<String>,
    pub enable_octal: Option<bool>,
    pub allow_duplicate: Option<bool>,
    pub strip_outer_array: Option<bool>,
    pub strip_null_values: Option<bool>,
    pub replace_invalid_characters: Option<bool>,
    pub ignore_utf8_errors: Option<bool>,
    pub skip_byte_order_mark: Option<bool>,
}

setters!(JsonOptions {
    val compression: Compression,
    val date_format: FormatSetting,
    val time_format: FormatSetting,
    val timestamp_format: FormatSetting,
    val binary_format: BinaryFormat,
    val trim_space: bool,
    val multi_line: bool,
    val null_if: Vec<String>,
    opt file_extension: String,
    val enable_octal: bool,
    val allow_duplicate: bool,
    val strip_outer_array: bool,
    val strip_null_values: bool,
    val replace_invalid_characters: bool,
    val ignore_utf8_errors: bool,
    val skip_byte_order_mark: bool,
});

impl Validate for JsonOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("JsonOptions");
        errors.at_most_one_of(
            &["IgnoreUtf8Errors", "ReplaceInvalidCharacters"],
            &[
                &self.ignore_utf8_errors.filter(|on| *on),
                &self.replace_invalid_characters.filter(|on| *on),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvroOptions {
    pub compression: Option<Compression>,
    pub trim_space: Option<bool>,
    pub replace_invalid_characters: Option<bool>,
    pub null_if: Option<Vec<String>>,
}

setters!(AvroOptions {
    val compression: Compression,
    val trim_space: bool,
    val replace_invalid_characters: bool,
    val null_if: Vec<String>,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrcOptions {
    pub trim_space: Option<bool>,
    pub replace_invalid_characters: Option<bool>,
    pub null_if: Option<Vec<String>>,
}

setters!(OrcOptions {
    val trim_space: bool,
    val replace_invalid_characters: bool,
    val null_if: Vec<String>,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParquetOptions {
    pub compression: Option<Compression>,
    pub binary_as_text: Option<bool>,
    pub use_logical_type: Option<bool>,
    pub trim_space: Option<bool>,
    pub use_vectorized_scanner: Option<bool>,
    pub replace_invalid_characters: Option<bool>,
    pub null_if: Option<Vec<String>>,
}

setters!(ParquetOptions {
    val compression: Compression,
    val binary_as_text: bool,
    val use_logical_type: bool,
    val trim_space: bool,
    val use_vectorized_scanner: bool,
    val replace_invalid_characters: bool,
    val null_if: Vec<String>,
});

impl Validate for ParquetOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ParquetOptions");
        errors.check(
            !matches!(
                self.compression,
                Some(Compression::Gzip | Compression::Bz2 | Compression::Deflate)
            ),
            || {
                Error::invalid_value(
                    "ParquetOptions",
                    "Compression",
                    "must be one of AUTO, LZO, SNAPPY, NONE",
                )
            },
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlOptions {
    pub compression: Option<Compression>,
    pub ignore_utf8_errors: Option<bool>,
    pub preserve_space: Option<bool>,
    pub strip_outer_element: Option<bool>,
    pub disable_snowflake_data: Option<bool>,
    pub disable_auto_convert: Option<bool>,
    pub replace_invalid_characters: Option<bool>,
    pub skip_byte_order_mark: Option<bool>,
}

setters!(XmlOptions {
    val compression: Compression,
    val ignore_utf8_errors: bool,
    val preserve_space: bool,
    val strip_outer_element: bool,
    val disable_snowflake_data: bool,
    val disable_auto_convert: bool,
    val replace_invalid_characters: bool,
    val skip_byte_order_mark: bool,
});

impl Validate for XmlOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("XmlOptions");
        errors.at_most_one_of(
            &["IgnoreUtf8Errors", "ReplaceInvalidCharacters"],
            &[
                &self.ignore_utf8_errors.filter(|on| *on),
                &self.replace_invalid_characters.filter(|on| *on),
            ],
        );
        errors.finish()
    }
}

/// Type-specific options; the variant fixes `TYPE = ...`.
#[derive(Debug, Clone, PartialEq)]
pub enum FileFormatOptions {
    Csv(CsvOptions),
    Json(JsonOptions),
    Avro(AvroOptions),
    Orc(OrcOptions),
    Parquet(ParquetOptions),
    Xml(XmlOptions),
}

impl FileFormatOptions {
    pub fn format_type(&self) -> FileFormatType {
        match self {
            FileFormatOptions::Csv(_) => FileFormatType::Csv,
            FileFormatOptions::Json(_) => FileFormatType::Json,
            FileFormatOptions::Avro(_) => FileFormatType::Avro,
            FileFormatOptions::Orc(_) => FileFormatType::Orc,
            FileFormatOptions::Parquet(_) => FileFormatType::Parquet,
            FileFormatOptions::Xml(_) => FileFormatType::Xml,
        }
    }
}

impl Default for FileFormatOptions {
    fn default() -> Self {
        FileFormatOptions::Csv(CsvOptions::default())
    }
}

impl Validate for FileFormatOptions {
    fn validate(&self) -> Result<()> {
        match self {
            FileFormatOptions::Csv(options) => options.validate(),
            FileFormatOptions::Json(options) => options.validate(),
            FileFormatOptions::Parquet(options) => options.validate(),
            FileFormatOptions::Xml(options) => options.validate(),
            FileFormatOptions::Avro(_) | FileFormatOptions::Orc(_) => Ok(()),
        }
    }
}

/// `FILE_FORMAT = (...)` on stages, pipes and external tables: a named
/// format or inline options.
#[derive(Debug, Clone, PartialEq)]
pub enum StageFileFormat {
    Named(SchemaObjectIdentifier),
    Inline(FileFormatOptions),
}

impl Validate for StageFileFormat {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StageFileFormat");
        match self {
            StageFileFormat::Named(name) => errors.identifier("FormatName", name),
            StageFileFormat::Inline(options) => errors.nested(Some(options)),
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateFileFormatOptions {
    pub or_replace: bool,
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub format: FileFormatOptions,
    pub comment: Option<String>,
}

impl Validate for CreateFileFormatOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateFileFormatOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.nested(Some(&self.format));
        errors.finish()
    }
}

request! {
    CreateFileFormatRequest => CreateFileFormatOptions {
        flag or_replace,
        flag temporary,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreateFileFormatRequest {
    pub fn new(name: SchemaObjectIdentifier, format: FileFormatOptions) -> Self {
        Self {
            options: CreateFileFormatOptions {
                name,
                format,
                ..Default::default()
            },
        }
    }
}

/// `SET` keeps the format type; only its options change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileFormatSet {
    pub format: Option<FileFormatOptions>,
    pub comment: Option<String>,
}

setters!(FileFormatSet {
    val format: FileFormatOptions,
    opt comment: String,
});

impl Validate for FileFormatSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("FileFormatSet");
        errors.at_least_one_of(&["Format", "Comment"], &[&self.format, &self.comment]);
        errors.nested(self.format.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterFileFormatOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<FileFormatSet>,
}

impl Validate for AlterFileFormatOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterFileFormatOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(&["RenameTo", "Set"], &[&self.rename_to, &self.set]);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.nested(self.set.as_ref());
        errors.finish()
    }
}

request! {
    AlterFileFormatRequest => AlterFileFormatOptions {
        flag if_exists,
        opt rename_to: SchemaObjectIdentifier,
        val set: FileFormatSet,
    }
}

impl AlterFileFormatRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterFileFormatOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropFileFormatOptions,
    DropFileFormatRequest,
    "FILE FORMAT",
    SchemaObjectIdentifier
);

target_only!(DescribeFileFormatOptions, "DESCRIBE FILE FORMAT", SchemaObjectIdentifier);

show_objects!(ShowFileFormatOptions, ShowFileFormatRequest, "FILE FORMATS" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileFormatRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub format_type: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub owner_role_type: Option<String>,
    pub format_options: Option<String>,
}

impl FromRow for FileFormatRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            format_type: row.opt("type"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            owner_role_type: row.opt("owner_role_type"),
            format_options: row.opt("format_options"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFormat {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub format_type: Option<FileFormatType>,
    pub owner: String,
    pub comment: String,
    pub owner_role_type: String,
    /// Options as reported by the server, keyed by option name.
    pub format_options: serde_json::Value,
}

impl From<FileFormatRow> for FileFormat {
    fn from(row: FileFormatRow) -> Self {
        let format_options = match row.format_options.as_deref() {
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|error| {
                tracing::warn!(%error, file_format = %row.name, "unparseable format options");
                serde_json::Value::Null
            }),
            None => serde_json::Value::Null,
        };
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            format_type: row.format_type.as_deref().and_then(parse_token),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            format_options,
        }
    }
}

impl FileFormat {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    /// A single reported option, e.g. `FIELD_DELIMITER`.
    pub fn option(&self, name: &str) -> Option<&serde_json::Value> {
        self.format_options.as_object().and_then(|options| {
            options
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }
}

gateway!(FileFormats);

impl FileFormats<'_> {
    pub async fn create(&self, request: &CreateFileFormatRequest) -> Result<()> {
        self.client
            .exec("create file format", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterFileFormatRequest) -> Result<()> {
        self.client
            .exec("alter file format", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropFileFormatRequest) -> Result<()> {
        self.client
            .exec("drop file format", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowFileFormatRequest) -> Result<Vec<FileFormat>> {
        self.client
            .query::<_, FileFormatRow, _>("show file formats", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<FileFormat> {
        let request = ShowFileFormatRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "file format", id, FileFormat::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe file format",
                &DescribeFileFormatOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "FF")
    }

    #[test]
    fn test_csv_header_options_conflict() {
        let format = FileFormatOptions::Csv(
            CsvOptions::default().with_parse_header(true).with_skip_header(1),
        );
        let opts = CreateFileFormatRequest::new(id(), format).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_parquet_compression() {
        let format = FileFormatOptions::Parquet(
            ParquetOptions::default().with_compression(Compression::Gzip),
        );
        let opts = CreateFileFormatRequest::new(id(), format).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_exactly_one() {
        let opts = AlterFileFormatRequest::new(id())
            .with_rename_to(SchemaObjectIdentifier::new("DB", "S", "FF2"))
            .with_set(FileFormatSet::default().with_comment("c"))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_row_format_options() {
        let row = Row::new([
            ("name", Some("FF")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("type", Some("CSV")),
            (
                "format_options",
                Some(r#"{"TYPE":"CSV","FIELD_DELIMITER":"|","SKIP_HEADER":1}"#),
            ),
        ]);
        let format = FileFormat::from(FileFormatRow::from_row(&row).unwrap());
        assert_eq!(format.format_type, Some(FileFormatType::Csv));
        assert_eq!(format.option("field_delimiter"), Some(&serde_json::json!("|")));
        assert_eq!(format.option("skip_header"), Some(&serde_json::json!(1)));
    }
}
