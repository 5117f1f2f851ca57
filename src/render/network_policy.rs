use crate::objects::network_policy::{
    AlterNetworkPolicyOptions, CreateNetworkPolicyOptions, NetworkPolicySet, NetworkPolicyUnset,
    NetworkRuleChange,
};
use crate::render::{RenderSql, SqlBuilder, quoted};

impl RenderSql for CreateNetworkPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("NETWORK POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .list_paren_eq("ALLOWED_NETWORK_RULE_LIST", &self.allowed_network_rule_list)
            .list_paren_eq("BLOCKED_NETWORK_RULE_LIST", &self.blocked_network_rule_list)
            .list_paren_eq("ALLOWED_IP_LIST", quoted(&self.allowed_ip_list))
            .list_paren_eq("BLOCKED_IP_LIST", quoted(&self.blocked_ip_list))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for NetworkPolicySet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .list_paren_eq_allow_empty(
                "ALLOWED_NETWORK_RULE_LIST",
                self.allowed_network_rule_list.as_ref(),
            )
            .list_paren_eq_allow_empty(
                "BLOCKED_NETWORK_RULE_LIST",
                self.blocked_network_rule_list.as_ref(),
            )
            .list_paren_eq_allow_empty("ALLOWED_IP_LIST", self.allowed_ip_list.as_deref().map(quoted))
            .list_paren_eq_allow_empty("BLOCKED_IP_LIST", self.blocked_ip_list.as_deref().map(quoted))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for NetworkPolicyUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.allowed_network_rule_list, "ALLOWED_NETWORK_RULE_LIST"),
                (self.blocked_network_rule_list, "BLOCKED_NETWORK_RULE_LIST"),
                (self.allowed_ip_list, "ALLOWED_IP_LIST"),
                (self.blocked_ip_list, "BLOCKED_IP_LIST"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for NetworkRuleChange {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.list_comma("ALLOWED_NETWORK_RULE_LIST =", &self.allowed_network_rule_list)
            .list_comma("BLOCKED_NETWORK_RULE_LIST =", &self.blocked_network_rule_list);
    }
}

impl RenderSql for AlterNetworkPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER NETWORK POLICY")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        if let Some(add) = &self.add {
            sql.keyword("ADD").nested(Some(add));
        }
        if let Some(remove) = &self.remove {
            sql.keyword("REMOVE").nested(Some(remove));
        }
        sql.keyword_identifier("RENAME TO", self.rename_to.as_ref());
    }
}
