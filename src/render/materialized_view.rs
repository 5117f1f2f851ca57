use crate::objects::materialized_view::{
    AlterMaterializedViewOptions, CreateMaterializedViewOptions, MaterializedViewSet,
    MaterializedViewUnset,
};
use crate::render::{RenderSql, SqlBuilder, idents};

impl RenderSql for CreateMaterializedViewOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.secure, "SECURE")
            .keyword("MATERIALIZED VIEW")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .flag(self.copy_grants, "COPY GRANTS")
            .nested_list("", &self.columns, ", ", true)
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .nested(self.row_access_policy.as_ref())
            .list_paren("TAG", &self.tag)
            .list_paren("CLUSTER BY", idents(&self.cluster_by))
            .keyword("AS")
            .raw(self.query.as_str());
    }
}

impl RenderSql for MaterializedViewSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .flag(self.secure, "SECURE")
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for MaterializedViewUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list("UNSET", &[(self.secure, "SECURE"), (self.comment, "COMMENT")]);
    }
}

impl RenderSql for AlterMaterializedViewOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER MATERIALIZED VIEW")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .list_paren("CLUSTER BY", idents(&self.cluster_by))
            .flag(self.drop_clustering_key, "DROP CLUSTERING KEY")
            .flag(self.suspend_recluster, "SUSPEND RECLUSTER")
            .flag(self.resume_recluster, "RESUME RECLUSTER")
            .flag(self.suspend, "SUSPEND")
            .flag(self.resume, "RESUME")
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
    }
}
