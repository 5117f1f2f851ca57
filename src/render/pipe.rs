use crate::objects::pipe::{AlterPipeOptions, CreatePipeOptions, PipeRefresh, PipeSet, PipeUnset};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreatePipeOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("PIPE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("AUTO_INGEST", self.auto_ingest)
            .parameter("ERROR_INTEGRATION", self.error_integration.as_ref())
            .parameter_quoted("AWS_SNS_TOPIC", self.aws_sns_topic.as_ref())
            .parameter_quoted("INTEGRATION", self.integration.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .keyword("AS")
            .raw(self.copy_statement.as_str());
    }
}

impl RenderSql for PipeSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("ERROR_INTEGRATION", self.error_integration.as_ref())
            .parameter("PIPE_EXECUTION_PAUSED", self.pipe_execution_paused)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for PipeUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.pipe_execution_paused, "PIPE_EXECUTION_PAUSED"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for PipeRefresh {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REFRESH")
            .parameter_quoted("PREFIX", self.prefix.as_ref())
            .parameter_quoted("MODIFIED_AFTER", self.modified_after.as_ref());
    }
}

impl RenderSql for AlterPipeOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER PIPE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag)
            .nested(self.refresh.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::SchemaObjectIdentifier;
    use crate::objects::pipe::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "P")
    }

    #[test]
    fn test_create() {
        let opts = CreatePipeRequest::new(id(), "COPY INTO DB.S.T FROM @DB.S.STG")
            .with_if_not_exists(true)
            .with_auto_ingest(true)
            .with_comment("ingest")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE PIPE IF NOT EXISTS \"DB\".\"S\".\"P\" AUTO_INGEST = true \
             COMMENT = 'ingest' AS COPY INTO DB.S.T FROM @DB.S.STG"
        );
    }

    #[test]
    fn test_alter() {
        let paused = AlterPipeRequest::new(id())
            .with_set(PipeSet::default().with_pipe_execution_paused(true))
            .to_options();
        assert_eq!(
            paused.to_sql(),
            "ALTER PIPE \"DB\".\"S\".\"P\" SET PIPE_EXECUTION_PAUSED = true"
        );
        let refresh = AlterPipeRequest::new(id())
            .with_if_exists(true)
            .with_refresh(PipeRefresh::default().with_prefix("d1/"))
            .to_options();
        assert_eq!(
            refresh.to_sql(),
            "ALTER PIPE IF EXISTS \"DB\".\"S\".\"P\" REFRESH PREFIX = 'd1/'"
        );
    }
}
