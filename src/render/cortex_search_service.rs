use crate::objects::cortex_search_service::{
    AlterCortexSearchServiceOptions, CortexSearchServiceSet, CreateCortexSearchServiceOptions,
};
use crate::render::{Quote, RenderSql, SqlBuilder, idents, quote_ident};

impl RenderSql for CreateCortexSearchServiceOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("CORTEX SEARCH SERVICE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .keyword_value("ON", Some(quote_ident(&self.on)), Quote::None)
            .list_comma("ATTRIBUTES", idents(&self.attributes))
            .parameter("WAREHOUSE", Some(&self.warehouse))
            .parameter_quoted("TARGET_LAG", Some(&self.target_lag))
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .keyword_value("AS", Some(&self.query), Quote::None);
    }
}

impl RenderSql for CortexSearchServiceSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter_quoted("TARGET_LAG", self.target_lag.as_ref())
            .parameter("WAREHOUSE", self.warehouse.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AlterCortexSearchServiceOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER CORTEX SEARCH SERVICE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::cortex_search_service::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "CSS")
    }

    #[test]
    fn test_create() {
        let opts = CreateCortexSearchServiceRequest::new(
            id(),
            "TRANSCRIPT",
            AccountObjectIdentifier::new("WH"),
            "1 hour",
            "SELECT TRANSCRIPT, REGION FROM CALLS",
        )
        .with_attributes(["REGION".to_string()])
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE CORTEX SEARCH SERVICE \"DB\".\"S\".\"CSS\" ON \"TRANSCRIPT\" \
             ATTRIBUTES \"REGION\" WAREHOUSE = \"WH\" TARGET_LAG = '1 hour' \
             AS SELECT TRANSCRIPT, REGION FROM CALLS"
        );
    }

    #[test]
    fn test_alter_set() {
        let opts = AlterCortexSearchServiceRequest::new(id())
            .with_set(CortexSearchServiceSet::default().with_target_lag("2 hours"))
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "ALTER CORTEX SEARCH SERVICE \"DB\".\"S\".\"CSS\" SET TARGET_LAG = '2 hours'"
        );
    }

    #[test]
    fn test_show_and_drop() {
        let show = ShowCortexSearchServiceRequest::new()
            .with_like(crate::common::Like::new("C%"))
            .to_options();
        assert_eq!(show.to_sql(), "SHOW CORTEX SEARCH SERVICES LIKE 'C%'");
        let drop = DropCortexSearchServiceRequest::new(id()).to_options();
        assert_eq!(drop.to_sql(), "DROP CORTEX SEARCH SERVICE \"DB\".\"S\".\"CSS\"");
    }
}
