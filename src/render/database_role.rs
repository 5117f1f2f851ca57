use crate::objects::database_role::{
    AlterDatabaseRoleOptions, CreateDatabaseRoleOptions, DatabaseRoleGrantee,
    GrantDatabaseRoleOptions, RevokeDatabaseRoleOptions, ShowDatabaseRoleOptions,
};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateDatabaseRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("DATABASE ROLE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AlterDatabaseRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER DATABASE ROLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .parameter_quoted("SET COMMENT", self.set_comment.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT")
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for ShowDatabaseRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW DATABASE ROLES")
            .nested(self.like.as_ref())
            .keyword("IN DATABASE")
            .identifier(&self.database)
            .nested(self.limit.as_ref());
    }
}

impl RenderSql for DatabaseRoleGrantee {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword_identifier("DATABASE ROLE", self.database_role.as_ref())
            .keyword_identifier("ROLE", self.account_role.as_ref());
    }
}

impl RenderSql for GrantDatabaseRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("GRANT DATABASE ROLE")
            .identifier(&self.name)
            .keyword("TO")
            .nested(Some(&self.grantee));
    }
}

impl RenderSql for RevokeDatabaseRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REVOKE DATABASE ROLE")
            .identifier(&self.name)
            .keyword("FROM")
            .nested(Some(&self.grantee));
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{LimitFrom, Like};
    use crate::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier};
    use crate::objects::database_role::*;
    use crate::render::RenderSql;

    fn id() -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new("DB1", "DR1")
    }

    #[test]
    fn test_create_alter() {
        assert_eq!(
            CreateDatabaseRoleRequest::new(id())
                .with_or_replace(true)
                .with_comment("c")
                .to_options()
                .to_sql(),
            "CREATE OR REPLACE DATABASE ROLE \"DB1\".\"DR1\" COMMENT = 'c'"
        );
        assert_eq!(
            AlterDatabaseRoleRequest::new(id())
                .with_unset_comment(true)
                .to_options()
                .to_sql(),
            "ALTER DATABASE ROLE \"DB1\".\"DR1\" UNSET COMMENT"
        );
    }

    #[test]
    fn test_show() {
        let opts = ShowDatabaseRoleRequest::new(AccountObjectIdentifier::new("DB1"))
            .with_like(Like::new("DR%"))
            .with_limit(LimitFrom::new(3))
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "SHOW DATABASE ROLES LIKE 'DR%' IN DATABASE \"DB1\" LIMIT 3"
        );
    }

    #[test]
    fn test_grant_revoke() {
        let grant =
            GrantDatabaseRoleRequest::to_account_role(id(), AccountObjectIdentifier::new("R1"));
        assert_eq!(
            grant.to_options().to_sql(),
            "GRANT DATABASE ROLE \"DB1\".\"DR1\" TO ROLE \"R1\""
        );
        let revoke = RevokeDatabaseRoleRequest::from_database_role(
            id(),
            DatabaseObjectIdentifier::new("DB1", "PARENT"),
        );
        assert_eq!(
            revoke.to_options().to_sql(),
            "REVOKE DATABASE ROLE \"DB1\".\"DR1\" FROM DATABASE ROLE \"DB1\".\"PARENT\""
        );
    }
}
