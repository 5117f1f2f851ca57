use crate::objects::stream::{AlterStreamOptions, CloneStreamOptions, CreateStreamOptions};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateStreamOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("STREAM")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .flag(self.copy_grants, "COPY GRANTS")
            .keyword(self.on.keyword())
            .identifier(self.on.source())
            .nested(self.time_travel.as_ref())
            .parameter("APPEND_ONLY", self.append_only)
            .parameter("INSERT_ONLY", self.insert_only)
            .parameter("SHOW_INITIAL_ROWS", self.show_initial_rows)
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for CloneStreamOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("STREAM")
            .identifier(&self.name)
            .keyword_identifier("CLONE", Some(&self.source))
            .flag(self.copy_grants, "COPY GRANTS");
    }
}

impl RenderSql for AlterStreamOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER STREAM")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .parameter_quoted("SET COMMENT", self.set_comment.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT")
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{In, Like, TimeTravel, TimeTravelPoint};
    use crate::identifiers::{DatabaseObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::stream::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "ST1")
    }

    fn table() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "T1")
    }

    #[test]
    fn test_show_like_in_schema() {
        let opts = ShowStreamRequest::new()
            .with_like(Like::new("S%"))
            .with_in_scope(In::schema(DatabaseObjectIdentifier::new("DB1", "S1")))
            .to_options();
        assert_eq!(opts.to_sql(), "SHOW STREAMS LIKE 'S%' IN SCHEMA \"DB1\".\"S1\"");
    }

    #[test]
    fn test_create_on_table() {
        let opts = CreateStreamRequest::on_table(id(), table())
            .with_or_replace(true)
            .with_time_travel(TimeTravel::at(TimeTravelPoint::Timestamp(
                "2024-01-01 00:00:00".into(),
            )))
            .with_append_only(true)
            .with_comment("cdc")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE STREAM \"DB1\".\"S1\".\"ST1\" ON TABLE \"DB1\".\"S1\".\"T1\" \
             AT (TIMESTAMP => '2024-01-01 00:00:00') APPEND_ONLY = true COMMENT = 'cdc'"
        );
    }

    #[test]
    fn test_create_on_stage_and_external_table() {
        let stage = CreateStreamRequest::on_directory_table(
            id(),
            SchemaObjectIdentifier::new("DB1", "S1", "STG"),
        )
        .with_if_not_exists(true);
        assert_eq!(
            stage.to_options().to_sql(),
            "CREATE STREAM IF NOT EXISTS \"DB1\".\"S1\".\"ST1\" ON STAGE \"DB1\".\"S1\".\"STG\""
        );
        let external = CreateStreamRequest::on_external_table(id(), table())
            .with_insert_only(true)
            .to_options();
        assert_eq!(
            external.to_sql(),
            "CREATE STREAM \"DB1\".\"S1\".\"ST1\" ON EXTERNAL TABLE \"DB1\".\"S1\".\"T1\" INSERT_ONLY = true"
        );
    }

    #[test]
    fn test_clone_alter_drop() {
        let clone = CloneStreamRequest::new(id(), SchemaObjectIdentifier::new("DB1", "S1", "SRC"))
            .with_copy_grants(true);
        assert_eq!(
            clone.to_options().to_sql(),
            "CREATE STREAM \"DB1\".\"S1\".\"ST1\" CLONE \"DB1\".\"S1\".\"SRC\" COPY GRANTS"
        );
        let alter = AlterStreamRequest::new(id()).with_set_comment("x");
        assert_eq!(
            alter.to_options().to_sql(),
            "ALTER STREAM \"DB1\".\"S1\".\"ST1\" SET COMMENT = 'x'"
        );
        assert_eq!(
            DropStreamRequest::new(id()).to_options().to_sql(),
            "DROP STREAM \"DB1\".\"S1\".\"ST1\""
        );
        assert_eq!(
            DescribeStreamOptions::new(id()).to_sql(),
            "DESCRIBE STREAM \"DB1\".\"S1\".\"ST1\""
        );
    }
}
