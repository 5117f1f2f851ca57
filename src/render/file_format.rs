use std::fmt;

use crate::identifiers::Identifier;
use crate::objects::file_format::{
    AlterFileFormatOptions, AvroOptions, CreateFileFormatOptions, CsvOptions, FileFormatOptions,
    FileFormatSet, FormatSetting, JsonOptions, OrcOptions, ParquetOptions, StageFileFormat,
    XmlOptions,
};
use crate::render::{RenderSql, SqlBuilder, escape_string, quoted};

impl fmt::Display for FormatSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatSetting::Value(value) => f.write_str(&escape_string(value)),
            FormatSetting::Auto => f.write_str("AUTO"),
            FormatSetting::None => f.write_str("NONE"),
        }
    }
}

fn null_if(sql: &mut SqlBuilder, values: Option<&Vec<String>>) {
    sql.list_paren_eq_allow_empty("NULL_IF", values.map(quoted));
}

impl RenderSql for CsvOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("COMPRESSION", self.compression)
            .parameter("RECORD_DELIMITER", self.record_delimiter.as_ref())
            .parameter("FIELD_DELIMITER", self.field_delimiter.as_ref())
            .parameter("MULTI_LINE", self.multi_line)
            .parameter_quoted("FILE_EXTENSION", self.file_extension.as_ref())
            .parameter("PARSE_HEADER", self.parse_header)
            .parameter("SKIP_HEADER", self.skip_header)
            .parameter("SKIP_BLANK_LINES", self.skip_blank_lines)
            .parameter("DATE_FORMAT", self.date_format.as_ref())
            .parameter("TIME_FORMAT", self.time_format.as_ref())
            .parameter("TIMESTAMP_FORMAT", self.timestamp_format.as_ref())
            .parameter("BINARY_FORMAT", self.binary_format)
            .parameter("ESCAPE", self.escape.as_ref())
            .parameter("ESCAPE_UNENCLOSED_FIELD", self.escape_unenclosed_field.as_ref())
            .parameter("TRIM_SPACE", self.trim_space)
            .parameter(
                "FIELD_OPTIONALLY_ENCLOSED_BY",
                self.field_optionally_enclosed_by.as_ref(),
            );
        null_if(sql, self.null_if.as_ref());
        sql.parameter(
            "ERROR_ON_COLUMN_COUNT_MISMATCH",
            self.error_on_column_count_mismatch,
        )
        .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters)
        .parameter("EMPTY_FIELD_AS_NULL", self.empty_field_as_null)
        .parameter("SKIP_BYTE_ORDER_MARK", self.skip_byte_order_mark)
        .parameter_quoted("ENCODING", self.encoding.as_ref());
    }
}

impl RenderSql for JsonOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("COMPRESSION", self.compression)
            .parameter("DATE_FORMAT", self.date_format.as_ref())
            .parameter("TIME_FORMAT", self.time_format.as_ref())
            .parameter("TIMESTAMP_FORMAT", self.timestamp_format.as_ref())
            .parameter("BINARY_FORMAT", self.binary_format)
            .parameter("TRIM_SPACE", self.trim_space)
            .parameter("MULTI_LINE", self.multi_line);
        null_if(sql, self.null_if.as_ref());
        sql.parameter_quoted("FILE_EXTENSION", self.file_extension.as_ref())
            .parameter("ENABLE_OCTAL", self.enable_octal)
            .parameter("ALLOW_DUPLICATE", self.allow_duplicate)
            .parameter("STRIP_OUTER_ARRAY", self.strip_outer_array)
            .parameter("STRIP_NULL_VALUES", self.strip_null_values)
            .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters)
            .parameter("IGNORE_UTF8_ERRORS", self.ignore_utf8_errors)
            .parameter("SKIP_BYTE_ORDER_MARK", self.skip_byte_order_mark);
    }
}

impl RenderSql for AvroOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("COMPRESSION", self.compression)
            .parameter("TRIM_SPACE", self.trim_space)
            .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters);
        null_if(sql, self.null_if.as_ref());
    }
}

impl RenderSql for OrcOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("TRIM_SPACE", self.trim_space)
            .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters);
        null_if(sql, self.null_if.as_ref());
    }
}

impl RenderSql for ParquetOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("COMPRESSION", self.compression)
            .parameter("BINARY_AS_TEXT", self.binary_as_text)
            .parameter("USE_LOGICAL_TYPE", self.use_logical_type)
            .parameter("TRIM_SPACE", self.trim_space)
            .parameter("USE_VECTORIZED_SCANNER", self.use_vectorized_scanner)
            .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters);
        null_if(sql, self.null_if.as_ref());
    }
}

impl RenderSql for XmlOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("COMPRESSION", self.compression)
            .parameter("IGNORE_UTF8_ERRORS", self.ignore_utf8_errors)
            .parameter("PRESERVE_SPACE", self.preserve_space)
            .parameter("STRIP_OUTER_ELEMENT", self.strip_outer_element)
            .parameter("DISABLE_SNOWFLAKE_DATA", self.disable_snowflake_data)
            .parameter("DISABLE_AUTO_CONVERT", self.disable_auto_convert)
            .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters)
            .parameter("SKIP_BYTE_ORDER_MARK", self.skip_byte_order_mark);
    }
}

fn type_options(format: &FileFormatOptions, sql: &mut SqlBuilder) {
    match format {
        FileFormatOptions::Csv(options) => options.render(sql),
        FileFormatOptions::Json(options) => options.render(sql),
        FileFormatOptions::Avro(options) => options.render(sql),
        FileFormatOptions::Orc(options) => options.render(sql),
        FileFormatOptions::Parquet(options) => options.render(sql),
        FileFormatOptions::Xml(options) => options.render(sql),
    }
}

impl RenderSql for FileFormatOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("TYPE", Some(self.format_type()));
        type_options(self, sql);
    }
}

impl RenderSql for StageFileFormat {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            StageFileFormat::Named(name) => {
                sql.parameter_quoted("FORMAT_NAME", Some(name.fully_qualified_name()));
            }
            StageFileFormat::Inline(options) => options.render(sql),
        }
    }
}

impl RenderSql for CreateFileFormatOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.temporary, "TEMPORARY")
            .keyword("FILE FORMAT")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(Some(&self.format))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for FileFormatSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET");
        if let Some(format) = &self.format {
            type_options(format, sql);
        }
        sql.parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AlterFileFormatOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER FILE FORMAT")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::SchemaObjectIdentifier;
    use crate::objects::file_format::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "FF")
    }

    #[test]
    fn test_create_csv() {
        let format = FileFormatOptions::Csv(
            CsvOptions::default()
                .with_field_delimiter(FormatSetting::value("|"))
                .with_skip_header(1)
                .with_date_format(FormatSetting::Auto)
                .with_null_if(vec!["NULL".to_string(), String::new()])
                .with_encoding("UTF8"),
        );
        let opts = CreateFileFormatRequest::new(id(), format)
            .with_or_replace(true)
            .with_comment("pipes")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE FILE FORMAT \"DB\".\"S\".\"FF\" TYPE = CSV FIELD_DELIMITER = '|' \
             SKIP_HEADER = 1 DATE_FORMAT = AUTO NULL_IF = ('NULL', '') ENCODING = 'UTF8' \
             COMMENT = 'pipes'"
        );
    }

    #[test]
    fn test_create_json_and_parquet() {
        let json = CreateFileFormatRequest::new(
            id(),
            FileFormatOptions::Json(
                JsonOptions::default()
                    .with_compression(Compression::Gzip)
                    .with_strip_outer_array(true),
            ),
        )
        .to_options();
        assert_eq!(
            json.to_sql(),
            "CREATE FILE FORMAT \"DB\".\"S\".\"FF\" TYPE = JSON COMPRESSION = GZIP \
             STRIP_OUTER_ARRAY = true"
        );
        let parquet = CreateFileFormatRequest::new(
            id(),
            FileFormatOptions::Parquet(ParquetOptions::default().with_binary_as_text(false)),
        )
        .to_options();
        assert_eq!(
            parquet.to_sql(),
            "CREATE FILE FORMAT \"DB\".\"S\".\"FF\" TYPE = PARQUET BINARY_AS_TEXT = false"
        );
    }

    #[test]
    fn test_null_if_empty_list() {
        let format = FileFormatOptions::Orc(OrcOptions::default().with_null_if(Vec::new()));
        let opts = CreateFileFormatRequest::new(id(), format).to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE FILE FORMAT \"DB\".\"S\".\"FF\" TYPE = ORC NULL_IF = ()"
        );
    }

    #[test]
    fn test_alter_set_keeps_type() {
        let opts = AlterFileFormatRequest::new(id())
            .with_set(FileFormatSet::default().with_format(FileFormatOptions::Xml(
                XmlOptions::default().with_strip_outer_element(true),
            )))
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "ALTER FILE FORMAT \"DB\".\"S\".\"FF\" SET STRIP_OUTER_ELEMENT = true"
        );
    }

    #[test]
    fn test_stage_file_format() {
        let named = StageFileFormat::Named(id());
        assert_eq!(named.to_sql(), "FORMAT_NAME = '\"DB\".\"S\".\"FF\"'");
        let inline = StageFileFormat::Inline(FileFormatOptions::Avro(AvroOptions::default()));
        assert_eq!(inline.to_sql(), "TYPE = AVRO");
    }
}
