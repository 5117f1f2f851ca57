use crate::objects::failover_group::{
    AlterSourceFailoverGroupOptions, AlterTargetFailoverGroupOptions, CreateFailoverGroupOptions,
    CreateSecondaryFailoverGroupOptions, FailoverGroupMove, FailoverGroupSet,
    ShowFailoverGroupOptions, ShowReplicationDatabaseOptions,
};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateFailoverGroupOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE FAILOVER GROUP")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .list_comma("OBJECT_TYPES =", &self.object_types)
            .list_comma("ALLOWED_DATABASES =", &self.allowed_databases)
            .list_comma("ALLOWED_SHARES =", &self.allowed_shares)
            .list_comma("ALLOWED_INTEGRATION_TYPES =", &self.allowed_integration_types)
            .list_comma("ALLOWED_ACCOUNTS =", &self.allowed_accounts)
            .flag(self.ignore_edition_check, "IGNORE EDITION CHECK")
            .parameter_quoted("REPLICATION_SCHEDULE", self.replication_schedule.as_ref());
    }
}

impl RenderSql for CreateSecondaryFailoverGroupOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE FAILOVER GROUP")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .keyword_identifier("AS REPLICA OF", Some(&self.primary));
    }
}

impl RenderSql for FailoverGroupSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .list_comma("OBJECT_TYPES =", &self.object_types)
            .list_comma("ALLOWED_INTEGRATION_TYPES =", &self.allowed_integration_types)
            .parameter_quoted("REPLICATION_SCHEDULE", self.replication_schedule.as_ref());
    }
}

impl RenderSql for FailoverGroupMove {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.list_comma("", &self.names)
            .keyword_identifier("TO FAILOVER GROUP", Some(&self.to));
    }
}

impl RenderSql for AlterSourceFailoverGroupOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER FAILOVER GROUP")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref())
            .list_comma("ADD", &self.add_databases);
        if !self.add_databases.is_empty() {
            sql.keyword("TO ALLOWED_DATABASES");
        }
        if let Some(moved) = &self.move_databases {
            sql.keyword("MOVE DATABASES").nested(Some(moved));
        }
        sql.list_comma("REMOVE", &self.remove_databases);
        if !self.remove_databases.is_empty() {
            sql.keyword("FROM ALLOWED_DATABASES");
        }
        sql.list_comma("ADD", &self.add_shares);
        if !self.add_shares.is_empty() {
            sql.keyword("TO ALLOWED_SHARES");
        }
        if let Some(moved) = &self.move_shares {
            sql.keyword("MOVE SHARES").nested(Some(moved));
        }
        sql.list_comma("REMOVE", &self.remove_shares);
        if !self.remove_shares.is_empty() {
            sql.keyword("FROM ALLOWED_SHARES");
        }
        sql.list_comma("ADD", &self.add_accounts);
        if !self.add_accounts.is_empty() {
            sql.keyword("TO ALLOWED_ACCOUNTS")
                .flag(self.ignore_edition_check, "IGNORE EDITION CHECK");
        }
        sql.list_comma("REMOVE", &self.remove_accounts);
        if !self.remove_accounts.is_empty() {
            sql.keyword("FROM ALLOWED_ACCOUNTS");
        }
    }
}

impl RenderSql for AlterTargetFailoverGroupOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER FAILOVER GROUP")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .flag(self.refresh, "REFRESH")
            .flag(self.primary, "PRIMARY")
            .flag(self.suspend, "SUSPEND")
            .flag(self.resume, "RESUME");
    }
}

impl RenderSql for ShowFailoverGroupOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW FAILOVER GROUPS")
            .keyword_identifier("IN ACCOUNT", self.in_account.as_ref());
    }
}

impl RenderSql for ShowReplicationDatabaseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW REPLICATION DATABASES")
            .nested(self.like.as_ref())
            .keyword_identifier("WITH PRIMARY", self.with_primary.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Like;
    use crate::identifiers::{
        AccountIdentifier, AccountObjectIdentifier, ExternalObjectIdentifier,
    };
    use crate::objects::failover_group::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("FG")
    }

    #[test]
    fn test_create() {
        let opts = CreateFailoverGroupRequest::new(
            id(),
            [PluralObjectType::Databases, PluralObjectType::Roles],
            [AccountIdentifier::new("ORG", "A2")],
        )
        .with_allowed_databases([AccountObjectIdentifier::new("DB1")])
        .with_replication_schedule("10 MINUTE")
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE FAILOVER GROUP \"FG\" OBJECT_TYPES = DATABASES, ROLES \
             ALLOWED_DATABASES = \"DB1\" ALLOWED_ACCOUNTS = \"ORG\".\"A2\" \
             REPLICATION_SCHEDULE = '10 MINUTE'"
        );
    }

    #[test]
    fn test_create_secondary() {
        let primary = ExternalObjectIdentifier::new(
            AccountIdentifier::new("ORG", "A1"),
            AccountObjectIdentifier::new("FG"),
        );
        let opts = CreateSecondaryFailoverGroupRequest::new(id(), primary).to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE FAILOVER GROUP \"FG\" AS REPLICA OF \"ORG\".\"A1\".\"FG\""
        );
    }

    #[test]
    fn test_alter_source() {
        let add = AlterSourceFailoverGroupRequest::new(id())
            .with_add_accounts([AccountIdentifier::new("ORG", "A3")])
            .with_ignore_edition_check(true)
            .to_options();
        assert_eq!(
            add.to_sql(),
            "ALTER FAILOVER GROUP \"FG\" ADD \"ORG\".\"A3\" TO ALLOWED_ACCOUNTS IGNORE EDITION CHECK"
        );
        let moved = AlterSourceFailoverGroupRequest::new(id())
            .with_move_databases(FailoverGroupMove::new(
                [AccountObjectIdentifier::new("DB1")],
                AccountObjectIdentifier::new("FG2"),
            ))
            .to_options();
        assert_eq!(
            moved.to_sql(),
            "ALTER FAILOVER GROUP \"FG\" MOVE DATABASES \"DB1\" TO FAILOVER GROUP \"FG2\""
        );
        let remove = AlterSourceFailoverGroupRequest::new(id())
            .with_remove_shares([AccountObjectIdentifier::new("SH")])
            .to_options();
        assert_eq!(
            remove.to_sql(),
            "ALTER FAILOVER GROUP \"FG\" REMOVE \"SH\" FROM ALLOWED_SHARES"
        );
    }

    #[test]
    fn test_alter_target_and_show() {
        let refresh = AlterTargetFailoverGroupRequest::new(id())
            .with_refresh(true)
            .to_options();
        assert_eq!(refresh.to_sql(), "ALTER FAILOVER GROUP \"FG\" REFRESH");
        assert_eq!(
            ShowFailoverGroupRequest::new()
                .with_in_account(AccountIdentifier::new("ORG", "A1"))
                .to_options()
                .to_sql(),
            "SHOW FAILOVER GROUPS IN ACCOUNT \"ORG\".\"A1\""
        );
        assert_eq!(
            ShowFailoverGroupDatabasesOptions::new(id()).to_sql(),
            "SHOW DATABASES IN FAILOVER GROUP \"FG\""
        );
        assert_eq!(
            ShowReplicationDatabaseRequest::new()
                .with_like(Like::new("DB%"))
                .to_options()
                .to_sql(),
            "SHOW REPLICATION DATABASES LIKE 'DB%'"
        );
        assert_eq!(
            ShowReplicationAccountRequest::new().to_options().to_sql(),
            "SHOW REPLICATION ACCOUNTS"
        );
    }
}
