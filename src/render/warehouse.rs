use crate::objects::warehouse::{
    AlterWarehouseOptions, CreateWarehouseOptions, ShowWarehouseOptions, WarehouseSet,
    WarehouseUnset,
};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateWarehouseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("WAREHOUSE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter_quoted("WAREHOUSE_TYPE", self.warehouse_type)
            .parameter("WAREHOUSE_SIZE", self.warehouse_size)
            .parameter("MAX_CLUSTER_COUNT", self.max_cluster_count)
            .parameter("MIN_CLUSTER_COUNT", self.min_cluster_count)
            .parameter("SCALING_POLICY", self.scaling_policy)
            .parameter("AUTO_SUSPEND", self.auto_suspend)
            .parameter("AUTO_RESUME", self.auto_resume)
            .parameter("INITIALLY_SUSPENDED", self.initially_suspended)
            .parameter("RESOURCE_MONITOR", self.resource_monitor.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("ENABLE_QUERY_ACCELERATION", self.enable_query_acceleration)
            .parameter(
                "QUERY_ACCELERATION_MAX_SCALE_FACTOR",
                self.query_acceleration_max_scale_factor,
            )
            .parameter("MAX_CONCURRENCY_LEVEL", self.max_concurrency_level)
            .parameter(
                "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
                self.statement_queued_timeout_in_seconds,
            )
            .parameter("STATEMENT_TIMEOUT_IN_SECONDS", self.statement_timeout_in_seconds)
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for WarehouseSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter_quoted("WAREHOUSE_TYPE", self.warehouse_type)
            .parameter("WAREHOUSE_SIZE", self.warehouse_size)
            .parameter("WAIT_FOR_COMPLETION", self.wait_for_completion)
            .parameter("MAX_CLUSTER_COUNT", self.max_cluster_count)
            .parameter("MIN_CLUSTER_COUNT", self.min_cluster_count)
            .parameter("SCALING_POLICY", self.scaling_policy)
            .parameter("AUTO_SUSPEND", self.auto_suspend)
            .parameter("AUTO_RESUME", self.auto_resume)
            .parameter("RESOURCE_MONITOR", self.resource_monitor.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("ENABLE_QUERY_ACCELERATION", self.enable_query_acceleration)
            .parameter(
                "QUERY_ACCELERATION_MAX_SCALE_FACTOR",
                self.query_acceleration_max_scale_factor,
            )
            .parameter("MAX_CONCURRENCY_LEVEL", self.max_concurrency_level)
            .parameter(
                "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
                self.statement_queued_timeout_in_seconds,
            )
            .parameter("STATEMENT_TIMEOUT_IN_SECONDS", self.statement_timeout_in_seconds);
    }
}

impl RenderSql for WarehouseUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        let properties = [
            (self.warehouse_type, "WAREHOUSE_TYPE"),
            (self.wait_for_completion, "WAIT_FOR_COMPLETION"),
            (self.max_cluster_count, "MAX_CLUSTER_COUNT"),
            (self.min_cluster_count, "MIN_CLUSTER_COUNT"),
            (self.scaling_policy, "SCALING_POLICY"),
            (self.auto_suspend, "AUTO_SUSPEND"),
            (self.auto_resume, "AUTO_RESUME"),
            (self.resource_monitor, "RESOURCE_MONITOR"),
            (self.comment, "COMMENT"),
            (self.enable_query_acceleration, "ENABLE_QUERY_ACCELERATION"),
            (
                self.query_acceleration_max_scale_factor,
                "QUERY_ACCELERATION_MAX_SCALE_FACTOR",
            ),
            (self.max_concurrency_level, "MAX_CONCURRENCY_LEVEL"),
            (
                self.statement_queued_timeout_in_seconds,
                "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
            ),
            (self.statement_timeout_in_seconds, "STATEMENT_TIMEOUT_IN_SECONDS"),
        ];
        sql.flag_list("UNSET", &properties);
    }
}

impl RenderSql for AlterWarehouseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER WAREHOUSE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .flag(self.suspend, "SUSPEND")
            .flag(self.resume, "RESUME")
            .flag(self.if_suspended, "IF SUSPENDED")
            .flag(self.abort_all_queries, "ABORT ALL QUERIES")
            .keyword_identifier("RENAME TO", self.new_name.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for ShowWarehouseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW WAREHOUSES").nested(self.like.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{Like, TagAssociation};
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::warehouse::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("WH1")
    }

    #[test]
    fn test_create_minimal() {
        let opts = CreateWarehouseRequest::new(id()).to_options();
        assert_eq!(opts.to_sql(), "CREATE WAREHOUSE \"WH1\"");
    }

    #[test]
    fn test_create_size_and_auto_suspend() {
        let opts = CreateWarehouseRequest::new(id())
            .with_warehouse_size(WarehouseSize::XSmall)
            .with_auto_suspend(60)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE WAREHOUSE \"WH1\" WAREHOUSE_SIZE = XSMALL AUTO_SUSPEND = 60"
        );
    }

    #[test]
    fn test_create_complete() {
        let opts = CreateWarehouseRequest::new(id())
            .with_or_replace(true)
            .with_warehouse_type(WarehouseType::SnowparkOptimized)
            .with_warehouse_size(WarehouseSize::X4Large)
            .with_max_cluster_count(3)
            .with_min_cluster_count(1)
            .with_scaling_policy(ScalingPolicy::Economy)
            .with_auto_resume(false)
            .with_initially_suspended(true)
            .with_resource_monitor(AccountObjectIdentifier::new("RM"))
            .with_comment("it's a warehouse")
            .with_tag([TagAssociation::new(
                SchemaObjectIdentifier::new("DB", "S", "COST"),
                "eng",
            )])
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE WAREHOUSE \"WH1\" WAREHOUSE_TYPE = 'SNOWPARK-OPTIMIZED' \
             WAREHOUSE_SIZE = X4LARGE MAX_CLUSTER_COUNT = 3 MIN_CLUSTER_COUNT = 1 \
             SCALING_POLICY = ECONOMY AUTO_RESUME = false INITIALLY_SUSPENDED = true \
             RESOURCE_MONITOR = \"RM\" COMMENT = 'it''s a warehouse' \
             TAG (\"DB\".\"S\".\"COST\" = 'eng')"
        );
    }

    #[test]
    fn test_alter_actions() {
        let suspend = AlterWarehouseRequest::new(id()).with_suspend(true).to_options();
        assert_eq!(suspend.to_sql(), "ALTER WAREHOUSE \"WH1\" SUSPEND");

        let resume = AlterWarehouseRequest::new(id())
            .with_if_exists(true)
            .with_resume(true)
            .with_if_suspended(true)
            .to_options();
        assert_eq!(
            resume.to_sql(),
            "ALTER WAREHOUSE IF EXISTS \"WH1\" RESUME IF SUSPENDED"
        );

        let abort = AlterWarehouseRequest::new(id())
            .with_abort_all_queries(true)
            .to_options();
        assert_eq!(abort.to_sql(), "ALTER WAREHOUSE \"WH1\" ABORT ALL QUERIES");

        let rename = AlterWarehouseRequest::new(id())
            .with_new_name(AccountObjectIdentifier::new("WH2"))
            .to_options();
        assert_eq!(rename.to_sql(), "ALTER WAREHOUSE \"WH1\" RENAME TO \"WH2\"");
    }

    #[test]
    fn test_alter_set_unset() {
        let set = AlterWarehouseRequest::new(id())
            .with_set(
                WarehouseSet::default()
                    .with_warehouse_size(WarehouseSize::Medium)
                    .with_wait_for_completion(true)
                    .with_comment("resized"),
            )
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER WAREHOUSE \"WH1\" SET WAREHOUSE_SIZE = MEDIUM WAIT_FOR_COMPLETION = true \
             COMMENT = 'resized'"
        );

        let unset = AlterWarehouseRequest::new(id())
            .with_unset(
                WarehouseUnset::default()
                    .with_auto_suspend(true)
                    .with_comment(true),
            )
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER WAREHOUSE \"WH1\" UNSET AUTO_SUSPEND, COMMENT"
        );
    }

    #[test]
    fn test_alter_tags() {
        let tag = SchemaObjectIdentifier::new("DB", "S", "T");
        let set = AlterWarehouseRequest::new(id())
            .with_set_tag([
                TagAssociation::new(tag.clone(), "a"),
                TagAssociation::new(SchemaObjectIdentifier::new("DB", "S", "U"), "b"),
            ])
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER WAREHOUSE \"WH1\" SET TAG \"DB\".\"S\".\"T\" = 'a', \"DB\".\"S\".\"U\" = 'b'"
        );

        let unset = AlterWarehouseRequest::new(id())
            .with_unset_tag([tag])
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER WAREHOUSE \"WH1\" UNSET TAG \"DB\".\"S\".\"T\""
        );
    }

    #[test]
    fn test_drop_show_describe() {
        assert_eq!(
            DropWarehouseRequest::new(id()).with_if_exists(true).to_options().to_sql(),
            "DROP WAREHOUSE IF EXISTS \"WH1\""
        );
        assert_eq!(ShowWarehouseRequest::new().to_options().to_sql(), "SHOW WAREHOUSES");
        assert_eq!(
            ShowWarehouseRequest::new()
                .with_like(Like::new("WH%"))
                .to_options()
                .to_sql(),
            "SHOW WAREHOUSES LIKE 'WH%'"
        );
        assert_eq!(
            DescribeWarehouseOptions::new(id()).to_sql(),
            "DESCRIBE WAREHOUSE \"WH1\""
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let opts = CreateWarehouseRequest::new(id())
            .with_warehouse_size(WarehouseSize::Large)
            .with_comment("c")
            .to_options();
        assert_eq!(opts.to_sql(), opts.clone().to_sql());
    }
}
