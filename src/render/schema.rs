use crate::objects::schema::{AlterSchemaOptions, CreateSchemaOptions, SchemaSet, SchemaUnset};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateSchemaOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.transient, "TRANSIENT")
            .keyword("SCHEMA")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(self.clone.as_ref())
            .flag(self.with_managed_access, "WITH MANAGED ACCESS")
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter("EXTERNAL_VOLUME", self.external_volume.as_ref())
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .parameter_quoted("LOG_LEVEL", self.log_level)
            .parameter_quoted("TRACE_LEVEL", self.trace_level)
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for SchemaSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .parameter_quoted("LOG_LEVEL", self.log_level)
            .parameter_quoted("TRACE_LEVEL", self.trace_level)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for SchemaUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
                (
                    self.max_data_extension_time_in_days,
                    "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                ),
                (self.default_ddl_collation, "DEFAULT_DDL_COLLATION"),
                (self.log_level, "LOG_LEVEL"),
                (self.trace_level, "TRACE_LEVEL"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterSchemaOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER SCHEMA")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.new_name.as_ref())
            .keyword_identifier("SWAP WITH", self.swap_with.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag)
            .flag(self.enable_managed_access, "ENABLE MANAGED ACCESS")
            .flag(self.disable_managed_access, "DISABLE MANAGED ACCESS");
    }
}
