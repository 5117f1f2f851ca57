use crate::objects::streamlit::{
    AlterStreamlitOptions, CreateStreamlitOptions, StreamlitSet, StreamlitUnset,
};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateStreamlitOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("STREAMLIT")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter_quoted("ROOT_LOCATION", Some(&self.root_location))
            .parameter_quoted("MAIN_FILE", Some(&self.main_file))
            .parameter("QUERY_WAREHOUSE", self.query_warehouse.as_ref())
            .list_paren_eq(
                "EXTERNAL_ACCESS_INTEGRATIONS",
                &self.external_access_integrations,
            )
            .parameter_quoted("TITLE", self.title.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for StreamlitSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter_quoted("ROOT_LOCATION", self.root_location.as_ref())
            .parameter_quoted("MAIN_FILE", self.main_file.as_ref())
            .parameter("QUERY_WAREHOUSE", self.query_warehouse.as_ref())
            .list_paren_eq_allow_empty(
                "EXTERNAL_ACCESS_INTEGRATIONS",
                self.external_access_integrations.as_ref(),
            )
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter_quoted("TITLE", self.title.as_ref());
    }
}

impl RenderSql for StreamlitUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.query_warehouse, "QUERY_WAREHOUSE"),
                (self.comment, "COMMENT"),
                (self.title, "TITLE"),
            ],
        );
    }
}

impl RenderSql for AlterStreamlitOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER STREAMLIT")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .keyword_identifier("RENAME TO", self.rename_to.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::streamlit::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "APP")
    }

    #[test]
    fn test_create() {
        let opts = CreateStreamlitRequest::new(id(), "@DB.S.STG/app", "streamlit_app.py")
            .with_query_warehouse(AccountObjectIdentifier::new("WH"))
            .with_external_access_integrations([AccountObjectIdentifier::new("EAI")])
            .with_title("Dashboard")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE STREAMLIT \"DB\".\"S\".\"APP\" ROOT_LOCATION = '@DB.S.STG/app' \
             MAIN_FILE = 'streamlit_app.py' QUERY_WAREHOUSE = \"WH\" \
             EXTERNAL_ACCESS_INTEGRATIONS = (\"EAI\") TITLE = 'Dashboard'"
        );
    }

    #[test]
    fn test_alter() {
        let set = AlterStreamlitRequest::new(id())
            .with_set(StreamlitSet::default().with_external_access_integrations(Vec::new()))
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER STREAMLIT \"DB\".\"S\".\"APP\" SET EXTERNAL_ACCESS_INTEGRATIONS = ()"
        );
        let unset = AlterStreamlitRequest::new(id())
            .with_unset(StreamlitUnset::default().with_query_warehouse(true).with_title(true))
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER STREAMLIT \"DB\".\"S\".\"APP\" UNSET QUERY_WAREHOUSE, TITLE"
        );
    }
}
