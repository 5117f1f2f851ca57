use crate::objects::role::{
    AlterRoleOptions, CreateRoleOptions, GrantRoleOptions, RevokeRoleOptions, RoleGrantee,
    ShowRoleOptions,
};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("ROLE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for AlterRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER ROLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .parameter_quoted("SET COMMENT", self.set_comment.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .flag(self.unset_comment, "UNSET COMMENT")
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for ShowRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW ROLES")
            .nested(self.like.as_ref())
            .keyword_identifier("IN CLASS", self.in_class.as_ref());
    }
}

impl RenderSql for RoleGrantee {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword_identifier("ROLE", self.role.as_ref())
            .keyword_identifier("USER", self.user.as_ref());
    }
}

impl RenderSql for GrantRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("GRANT ROLE")
            .identifier(&self.name)
            .keyword("TO")
            .nested(Some(&self.grant));
    }
}

impl RenderSql for RevokeRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REVOKE ROLE")
            .identifier(&self.name)
            .keyword("FROM")
            .nested(Some(&self.revoke));
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{Like, TagAssociation};
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::role::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("R1")
    }

    #[test]
    fn test_create() {
        assert_eq!(
            CreateRoleRequest::new(id()).to_options().to_sql(),
            "CREATE ROLE \"R1\""
        );
        let opts = CreateRoleRequest::new(id())
            .with_if_not_exists(true)
            .with_comment("analysts")
            .with_tag([TagAssociation::new(SchemaObjectIdentifier::new("D", "S", "T"), "v")])
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE ROLE IF NOT EXISTS \"R1\" COMMENT = 'analysts' TAG (\"D\".\"S\".\"T\" = 'v')"
        );
    }

    #[test]
    fn test_alter() {
        let rename = AlterRoleRequest::new(id())
            .with_if_exists(true)
            .with_rename_to(AccountObjectIdentifier::new("R2"))
            .to_options();
        assert_eq!(rename.to_sql(), "ALTER ROLE IF EXISTS \"R1\" RENAME TO \"R2\"");
        let comment = AlterRoleRequest::new(id()).with_set_comment("x").to_options();
        assert_eq!(comment.to_sql(), "ALTER ROLE \"R1\" SET COMMENT = 'x'");
        let unset = AlterRoleRequest::new(id()).with_unset_comment(true).to_options();
        assert_eq!(unset.to_sql(), "ALTER ROLE \"R1\" UNSET COMMENT");
    }

    #[test]
    fn test_show_grant_revoke_use() {
        assert_eq!(ShowRoleRequest::new().to_options().to_sql(), "SHOW ROLES");
        assert_eq!(
            ShowRoleRequest::new()
                .with_like(Like::new("R%"))
                .to_options()
                .to_sql(),
            "SHOW ROLES LIKE 'R%'"
        );
        let grant = GrantRoleRequest::new(id(), RoleGrantee::role(AccountObjectIdentifier::new("P")));
        assert_eq!(grant.to_options().to_sql(), "GRANT ROLE \"R1\" TO ROLE \"P\"");
        let revoke =
            RevokeRoleRequest::new(id(), RoleGrantee::user(AccountObjectIdentifier::new("U")));
        assert_eq!(revoke.to_options().to_sql(), "REVOKE ROLE \"R1\" FROM USER \"U\"");
        assert_eq!(UseRoleOptions::new(id()).to_sql(), "USE ROLE \"R1\"");
        assert_eq!(
            DropRoleRequest::new(id()).to_options().to_sql(),
            "DROP ROLE \"R1\""
        );
    }
}
