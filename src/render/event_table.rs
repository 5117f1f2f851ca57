use crate::objects::event_table::{
    AlterEventTableOptions, CreateEventTableOptions, EventTableSet, EventTableUnset,
};
use crate::render::{RenderSql, SqlBuilder, idents};

impl RenderSql for CreateEventTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("EVENT TABLE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .list_paren("CLUSTER BY", idents(&self.cluster_by))
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter("CHANGE_TRACKING", self.change_tracking)
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .flag(self.copy_grants, "COPY GRANTS")
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .nested(self.row_access_policy.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for EventTableSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter("CHANGE_TRACKING", self.change_tracking)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for EventTableUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list("UNSET", &self.properties());
    }
}

impl RenderSql for AlterEventTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER TABLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        if let Some(policy) = &self.add_row_access_policy {
            sql.keyword("ADD").nested(Some(policy));
        }
        sql.keyword_identifier("DROP ROW ACCESS POLICY", self.drop_row_access_policy.as_ref())
            .flag(self.drop_all_row_access_policies, "DROP ALL ROW ACCESS POLICIES")
            .list_paren("CLUSTER BY", idents(&self.cluster_by))
            .flag(self.drop_clustering_key, "DROP CLUSTERING KEY")
            .flag(self.suspend_recluster, "SUSPEND RECLUSTER")
            .flag(self.resume_recluster, "RESUME RECLUSTER")
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}
