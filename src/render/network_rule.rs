use crate::objects::network_rule::{
    AlterNetworkRuleOptions, CreateNetworkRuleOptions, NetworkRuleSet, NetworkRuleUnset,
};
use crate::render::{RenderSql, SqlBuilder, quoted};

impl RenderSql for CreateNetworkRuleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("NETWORK RULE")
            .identifier(&self.name)
            .parameter("TYPE", Some(self.rule_type))
            .list_paren_eq_allow_empty("VALUE_LIST", Some(quoted(&self.value_list)))
            .parameter("MODE", Some(self.mode))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for NetworkRuleSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .list_paren_eq_allow_empty("VALUE_LIST", self.value_list.as_ref().map(quoted))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for NetworkRuleUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[(self.value_list, "VALUE_LIST"), (self.comment, "COMMENT")],
        );
    }
}

impl RenderSql for AlterNetworkRuleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER NETWORK RULE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::SchemaObjectIdentifier;
    use crate::objects::network_rule::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "NR")
    }

    #[test]
    fn test_create() {
        let opts = CreateNetworkRuleRequest::new(
            id(),
            NetworkRuleType::HostPort,
            ["example.com:443".to_string()],
            NetworkRuleMode::Egress,
        )
        .with_or_replace(true)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE NETWORK RULE \"DB\".\"S\".\"NR\" TYPE = HOST_PORT \
             VALUE_LIST = ('example.com:443') MODE = EGRESS"
        );
    }

    #[test]
    fn test_create_empty_value_list() {
        let opts = CreateNetworkRuleRequest::new(
            id(),
            NetworkRuleType::Ipv4,
            Vec::new(),
            NetworkRuleMode::Ingress,
        )
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE NETWORK RULE \"DB\".\"S\".\"NR\" TYPE = IPV4 VALUE_LIST = () MODE = INGRESS"
        );
    }

    #[test]
    fn test_alter() {
        let set = AlterNetworkRuleRequest::new(id())
            .with_set(NetworkRuleSet::default().with_value_list(vec!["1.1.1.1".to_string()]))
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER NETWORK RULE \"DB\".\"S\".\"NR\" SET VALUE_LIST = ('1.1.1.1')"
        );
        let unset = AlterNetworkRuleRequest::new(id())
            .with_unset(NetworkRuleUnset::default().with_value_list(true))
            .to_options();
        assert_eq!(unset.to_sql(), "ALTER NETWORK RULE \"DB\".\"S\".\"NR\" UNSET VALUE_LIST");
    }
}
