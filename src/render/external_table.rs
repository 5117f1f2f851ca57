use std::fmt;

use crate::objects::external_table::{
    AlterExternalTableOptions, AlterExternalTablePartitionOptions,
    CreateExternalTableOptions, CreateExternalTableUsingTemplateOptions,
    DescribeExternalTableOptions, DropExternalTableOptions, ExternalTableColumn,
    ExternalTableRefresh, PartitionValue,
};
use crate::render::{RenderSql, SqlBuilder, escape_string, idents, quote_ident, quoted};

impl RenderSql for ExternalTableColumn {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.raw(quote_ident(&self.name))
            .raw(self.data_type.to_string())
            .raw(format!("AS ({})", self.as_expression))
            .flag(self.not_null, "NOT NULL");
    }
}

impl fmt::Display for PartitionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", quote_ident(&self.column), escape_string(&self.value))
    }
}

impl RenderSql for CreateExternalTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("EXTERNAL TABLE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested_list("", &self.columns, ", ", true)
            .parameter("INTEGRATION", self.cloud_provider_params.as_ref())
            .list_paren("PARTITION BY", idents(&self.partition_by))
            .parameter("LOCATION", Some(&self.location))
            .parameter("REFRESH_ON_CREATE", self.refresh_on_create)
            .parameter("AUTO_REFRESH", self.auto_refresh)
            .parameter_quoted("PATTERN", self.pattern.as_ref())
            .nested_paren_eq("FILE_FORMAT", self.file_format.as_ref())
            .parameter_quoted("AWS_SNS_TOPIC", self.aws_sns_topic.as_ref())
            .flag(self.user_specified_partitions, "PARTITION_TYPE = USER_SPECIFIED")
            .flag(self.delta_table_format, "TABLE_FORMAT = DELTA")
            .flag(self.copy_grants, "COPY GRANTS")
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .nested(self.row_access_policy.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for CreateExternalTableUsingTemplateOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("EXTERNAL TABLE")
            .identifier(&self.name)
            .flag(self.copy_grants, "COPY GRANTS")
            .raw(format!("USING TEMPLATE ({})", self.query))
            .list_paren("PARTITION BY", idents(&self.partition_by))
            .parameter("LOCATION", Some(&self.location))
            .parameter("REFRESH_ON_CREATE", self.refresh_on_create)
            .parameter("AUTO_REFRESH", self.auto_refresh)
            .parameter_quoted("PATTERN", self.pattern.as_ref())
            .nested_paren_eq("FILE_FORMAT", self.file_format.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for ExternalTableRefresh {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REFRESH").keyword_value(
            "",
            self.path.as_ref(),
            crate::render::Quote::Single,
        );
    }
}

impl RenderSql for AlterExternalTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER EXTERNAL TABLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.refresh.as_ref())
            .list_paren("ADD FILES", quoted(&self.add_files))
            .list_paren("REMOVE FILES", quoted(&self.remove_files))
            .parameter("SET AUTO_REFRESH", self.set_auto_refresh)
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for AlterExternalTablePartitionOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER EXTERNAL TABLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .list_paren("ADD PARTITION", &self.add_partitions)
            .flag(self.drop_partition, "DROP PARTITION")
            .keyword_value("LOCATION", Some(&self.location), crate::render::Quote::Single);
    }
}

impl RenderSql for DropExternalTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("DROP EXTERNAL TABLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .flag(self.cascade, "CASCADE")
            .flag(self.restrict, "RESTRICT");
    }
}

impl RenderSql for DescribeExternalTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        let kind = if self.stage { "STAGE" } else { "COLUMNS" };
        sql.keyword("DESCRIBE EXTERNAL TABLE")
            .identifier(&self.name)
            .parameter("TYPE", Some(kind));
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::SchemaObjectIdentifier;
    use crate::objects::external_table::*;
    use crate::objects::file_format::{
        FileFormatOptions, ParquetOptions, StageFileFormat,
    };
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "EXT")
    }

    #[test]
    fn test_create() {
        let opts = CreateExternalTableRequest::new(
            id(),
            "@DB.S.STG/data/",
            StageFileFormat::Inline(FileFormatOptions::Parquet(ParquetOptions::default())),
        )
        .with_columns([
            ExternalTableColumn::new("ID", "NUMBER", "value:id::number").with_not_null(true),
            ExternalTableColumn::new("P", "VARCHAR", "split_part(metadata$filename, '/', 2)"),
        ])
        .with_partition_by(["P".to_string()])
        .with_auto_refresh(false)
        .with_pattern(".*[.]parquet")
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE EXTERNAL TABLE \"DB\".\"S\".\"EXT\" (\"ID\" NUMBER AS (value:id::number) \
             NOT NULL, \"P\" VARCHAR AS (split_part(metadata$filename, '/', 2))) \
             PARTITION BY (\"P\") LOCATION = @DB.S.STG/data/ AUTO_REFRESH = false \
             PATTERN = '.*[.]parquet' FILE_FORMAT = (TYPE = PARQUET)"
        );
    }

    #[test]
    fn test_create_using_template() {
        let opts = CreateExternalTableUsingTemplateRequest::new(
            id(),
            "SELECT ARRAY_AGG(OBJECT_CONSTRUCT(*)) FROM TABLE(INFER_SCHEMA(LOCATION=>'@STG'))",
            "@STG",
            StageFileFormat::Named(SchemaObjectIdentifier::new("DB", "S", "FF")),
        )
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE EXTERNAL TABLE \"DB\".\"S\".\"EXT\" USING TEMPLATE (SELECT \
             ARRAY_AGG(OBJECT_CONSTRUCT(*)) FROM TABLE(INFER_SCHEMA(LOCATION=>'@STG'))) \
             LOCATION = @STG FILE_FORMAT = (FORMAT_NAME = '\"DB\".\"S\".\"FF\"')"
        );
    }

    #[test]
    fn test_alter() {
        let refresh = AlterExternalTableRequest::new(id())
            .with_refresh(ExternalTableRefresh {
                path: Some("2024/".into()),
            })
            .to_options();
        assert_eq!(
            refresh.to_sql(),
            "ALTER EXTERNAL TABLE \"DB\".\"S\".\"EXT\" REFRESH '2024/'"
        );
        let files = AlterExternalTableRequest::new(id())
            .with_add_files(["a.parquet".to_string(), "b.parquet".to_string()])
            .to_options();
        assert_eq!(
            files.to_sql(),
            "ALTER EXTERNAL TABLE \"DB\".\"S\".\"EXT\" ADD FILES ('a.parquet', 'b.parquet')"
        );
    }

    #[test]
    fn test_partitions_and_describe() {
        let add = AlterExternalTablePartitionRequest::new(id(), "2024/01")
            .with_add_partitions([PartitionValue::new("P", "2024")])
            .to_options();
        assert_eq!(
            add.to_sql(),
            "ALTER EXTERNAL TABLE \"DB\".\"S\".\"EXT\" ADD PARTITION (\"P\" = '2024') \
             LOCATION '2024/01'"
        );
        let describe = DescribeExternalTableOptions {
            name: id(),
            stage: true,
        };
        assert_eq!(
            describe.to_sql(),
            "DESCRIBE EXTERNAL TABLE \"DB\".\"S\".\"EXT\" TYPE = STAGE"
        );
    }
}
