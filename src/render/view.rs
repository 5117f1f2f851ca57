use crate::objects::view::{
    AlterViewOptions, CreateViewOptions, ViewAggregationPolicy, ViewColumn, ViewColumnAction,
    ViewColumnChange,
};
use crate::render::{Quote, RenderSql, SqlBuilder, idents, quote_ident};

impl RenderSql for ViewColumn {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.raw(quote_ident(&self.name))
            .nested(self.masking_policy.as_ref())
            .keyword_identifier("WITH PROJECTION POLICY", self.projection_policy.as_ref())
            .list_paren("WITH TAG", &self.tag)
            .keyword_value("COMMENT", self.comment.as_ref(), Quote::Single);
    }
}

impl RenderSql for ViewAggregationPolicy {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("AGGREGATION POLICY")
            .identifier(&self.policy)
            .list_paren("ENTITY KEY", idents(&self.entity_key))
            .flag(self.force, "FORCE");
    }
}

impl RenderSql for CreateViewOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.secure, "SECURE")
            .flag(self.temporary, "TEMPORARY")
            .flag(self.recursive, "RECURSIVE")
            .keyword("VIEW")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested_list("", &self.columns, ", ", true)
            .flag(self.copy_grants, "COPY GRANTS")
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .nested(self.row_access_policy.as_ref())
            .nested(self.aggregation_policy.as_ref())
            .list_paren("TAG", &self.tag)
            .keyword("AS")
            .raw(self.query.as_str());
    }
}

impl RenderSql for ViewColumnAction {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER COLUMN").raw(quote_ident(&self.name));
        match &self.change {
            ViewColumnChange::SetMaskingPolicy { policy, force } => {
                sql.keyword("SET MASKING POLICY")
                    .identifier(&policy.policy)
                    .list_paren("USING", idents(&policy.using))
                    .flag(*force, "FORCE");
            }
            ViewColumnChange::UnsetMaskingPolicy => {
                sql.keyword("UNSET MASKING POLICY");
            }
            ViewColumnChange::SetProjectionPolicy { policy, force } => {
                sql.keyword("SET PROJECTION POLICY")
                    .identifier(policy)
                    .flag(*force, "FORCE");
            }
            ViewColumnChange::UnsetProjectionPolicy => {
                sql.keyword("UNSET PROJECTION POLICY");
            }
            ViewColumnChange::SetTag(tags) => {
                sql.list_comma("SET TAG", tags);
            }
            ViewColumnChange::UnsetTag(tags) => {
                sql.list_comma("UNSET TAG", tags);
            }
        }
    }
}

impl RenderSql for AlterViewOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER VIEW")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .parameter_quoted("SET COMMENT", self.set_comment.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT")
            .flag(self.set_secure, "SET SECURE")
            .flag(self.unset_secure, "UNSET SECURE")
            .parameter("SET CHANGE_TRACKING", self.set_change_tracking)
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
        if let Some(policy) = &self.add_row_access_policy {
            sql.keyword("ADD").nested(Some(policy));
        }
        sql.keyword_identifier("DROP ROW ACCESS POLICY", self.drop_row_access_policy.as_ref())
            .flag(self.drop_all_row_access_policies, "DROP ALL ROW ACCESS POLICIES");
        if let Some(policy) = &self.set_aggregation_policy {
            sql.keyword("SET").nested(Some(policy));
        }
        sql.flag(self.unset_aggregation_policy, "UNSET AGGREGATION POLICY")
            .nested(self.column.as_ref());
    }
}
