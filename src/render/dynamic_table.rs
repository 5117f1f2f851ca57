use std::fmt;

use crate::objects::dynamic_table::{
    AlterDynamicTableOptions, CreateDynamicTableOptions, DynamicTableSet, DynamicTableUnset,
    TargetLag,
};
use crate::render::{RenderSql, SqlBuilder, escape_string, idents};

impl fmt::Display for TargetLag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetLag::Lagging(interval) => f.write_str(&escape_string(interval)),
            TargetLag::Downstream => f.write_str("DOWNSTREAM"),
        }
    }
}

impl RenderSql for CreateDynamicTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.transient, "TRANSIENT")
            .keyword("DYNAMIC TABLE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("TARGET_LAG", Some(&self.target_lag))
            .parameter("REFRESH_MODE", self.refresh_mode)
            .parameter("INITIALIZE", self.initialize)
            .parameter("WAREHOUSE", Some(&self.warehouse))
            .list_paren("CLUSTER BY", idents(&self.cluster_by))
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .nested(self.row_access_policy.as_ref())
            .list_paren("TAG", &self.tag)
            .keyword("AS")
            .raw(self.query.as_str());
    }
}

impl RenderSql for DynamicTableSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("TARGET_LAG", self.target_lag.as_ref())
            .parameter("WAREHOUSE", self.warehouse.as_ref())
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for DynamicTableUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list("UNSET", &self.properties());
    }
}

impl RenderSql for AlterDynamicTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER DYNAMIC TABLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .flag(self.suspend, "SUSPEND")
            .flag(self.resume, "RESUME")
            .flag(self.refresh, "REFRESH")
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .keyword_identifier("SWAP WITH", self.swap_with.as_ref())
            .list_paren("CLUSTER BY", idents(&self.cluster_by))
            .flag(self.drop_clustering_key, "DROP CLUSTERING KEY")
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::dynamic_table::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "DT")
    }

    #[test]
    fn test_create() {
        let opts = CreateDynamicTableRequest::new(
            id(),
            AccountObjectIdentifier::new("WH"),
            TargetLag::lagging("1 minute"),
            "SELECT * FROM T",
        )
        .with_or_replace(true)
        .with_refresh_mode(DynamicTableRefreshMode::Incremental)
        .with_initialize(DynamicTableInitialize::OnSchedule)
        .with_comment("dt")
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE DYNAMIC TABLE \"DB\".\"S\".\"DT\" TARGET_LAG = '1 minute' \
             REFRESH_MODE = INCREMENTAL INITIALIZE = ON_SCHEDULE WAREHOUSE = \"WH\" \
             COMMENT = 'dt' AS SELECT * FROM T"
        );
    }

    #[test]
    fn test_alter() {
        let set = AlterDynamicTableRequest::new(id())
            .with_set(DynamicTableSet::default().with_target_lag(TargetLag::Downstream))
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER DYNAMIC TABLE \"DB\".\"S\".\"DT\" SET TARGET_LAG = DOWNSTREAM"
        );
        let unset = AlterDynamicTableRequest::new(id())
            .with_if_exists(true)
            .with_unset(DynamicTableUnset::default().with_comment(true))
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER DYNAMIC TABLE IF EXISTS \"DB\".\"S\".\"DT\" UNSET COMMENT"
        );
        let refresh = AlterDynamicTableRequest::new(id()).with_refresh(true).to_options();
        assert_eq!(refresh.to_sql(), "ALTER DYNAMIC TABLE \"DB\".\"S\".\"DT\" REFRESH");
    }
}
