use crate::objects::database::{
    AlterDatabaseOptions, CreateDatabaseOptions, CreateSecondaryDatabaseOptions,
    CreateSharedDatabaseOptions, DatabaseSet, DatabaseUnset, DisableReplication,
    EnableReplication, ShowDatabaseParametersOptions,
};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateDatabaseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.transient, "TRANSIENT")
            .keyword("DATABASE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(self.clone.as_ref())
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter("EXTERNAL_VOLUME", self.external_volume.as_ref())
            .parameter("CATALOG", self.catalog.as_ref())
            .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters)
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .parameter_quoted("LOG_LEVEL", self.log_level)
            .parameter_quoted("TRACE_LEVEL", self.trace_level)
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for CreateSharedDatabaseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("DATABASE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .keyword("FROM SHARE")
            .identifier(&self.from_share)
            .parameter("EXTERNAL_VOLUME", self.external_volume.as_ref())
            .parameter_quoted("LOG_LEVEL", self.log_level)
            .parameter_quoted("TRACE_LEVEL", self.trace_level)
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for CreateSecondaryDatabaseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("DATABASE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .keyword("AS REPLICA OF")
            .identifier(&self.primary_database)
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for DatabaseSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter("EXTERNAL_VOLUME", self.external_volume.as_ref())
            .parameter("CATALOG", self.catalog.as_ref())
            .parameter("REPLACE_INVALID_CHARACTERS", self.replace_invalid_characters)
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .parameter_quoted("LOG_LEVEL", self.log_level)
            .parameter_quoted("TRACE_LEVEL", self.trace_level)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for DatabaseUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
                (
                    self.max_data_extension_time_in_days,
                    "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                ),
                (self.external_volume, "EXTERNAL_VOLUME"),
                (self.catalog, "CATALOG"),
                (self.replace_invalid_characters, "REPLACE_INVALID_CHARACTERS"),
                (self.default_ddl_collation, "DEFAULT_DDL_COLLATION"),
                (self.log_level, "LOG_LEVEL"),
                (self.trace_level, "TRACE_LEVEL"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for EnableReplication {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ENABLE REPLICATION")
            .list_comma("TO ACCOUNTS", &self.to_accounts)
            .flag(self.ignore_edition_check, "IGNORE EDITION CHECK");
    }
}

impl RenderSql for DisableReplication {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.list_comma("TO ACCOUNTS", &self.to_accounts);
    }
}

impl RenderSql for AlterDatabaseOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER DATABASE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.new_name.as_ref())
            .keyword_identifier("SWAP WITH", self.swap_with.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag)
            .nested(self.enable_replication.as_ref());
        if let Some(disable) = &self.disable_replication {
            sql.keyword("DISABLE REPLICATION").nested(Some(disable));
        }
        sql.flag(self.refresh, "REFRESH")
            .list_comma("ENABLE FAILOVER TO ACCOUNTS", &self.enable_failover_to_accounts);
        if let Some(disable) = &self.disable_failover {
            sql.keyword("DISABLE FAILOVER").nested(Some(disable));
        }
        sql.flag(self.primary, "PRIMARY");
    }
}

impl RenderSql for ShowDatabaseParametersOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW PARAMETERS")
            .nested(self.like.as_ref())
            .keyword("IN DATABASE")
            .identifier(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{CloneSource, Like, LimitFrom, LogLevel};
    use crate::identifiers::{AccountIdentifier, AccountObjectIdentifier, ExternalObjectIdentifier};
    use crate::objects::database::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("DB1")
    }

    #[test]
    fn test_create() {
        assert_eq!(
            CreateDatabaseRequest::new(id()).to_options().to_sql(),
            "CREATE DATABASE \"DB1\""
        );
        let opts = CreateDatabaseRequest::new(id())
            .with_transient(true)
            .with_if_not_exists(true)
            .with_clone(CloneSource::new(AccountObjectIdentifier::new("SRC")))
            .with_data_retention_time_in_days(1)
            .with_log_level(LogLevel::Info)
            .with_comment("c")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE TRANSIENT DATABASE IF NOT EXISTS \"DB1\" CLONE \"SRC\" \
             DATA_RETENTION_TIME_IN_DAYS = 1 LOG_LEVEL = 'INFO' COMMENT = 'c'"
        );
    }

    #[test]
    fn test_create_shared_and_secondary() {
        let share = ExternalObjectIdentifier::new(
            AccountIdentifier::new("ORG", "ACC"),
            AccountObjectIdentifier::new("SHARE1"),
        );
        assert_eq!(
            CreateSharedDatabaseRequest::new(id(), share).to_options().to_sql(),
            "CREATE DATABASE \"DB1\" FROM SHARE \"ORG\".\"ACC\".\"SHARE1\""
        );
        let primary = ExternalObjectIdentifier::new(
            AccountIdentifier::new("ORG", "PRIMARY"),
            AccountObjectIdentifier::new("DB1"),
        );
        assert_eq!(
            CreateSecondaryDatabaseRequest::new(id(), primary)
                .with_comment("replica")
                .to_options()
                .to_sql(),
            "CREATE DATABASE \"DB1\" AS REPLICA OF \"ORG\".\"PRIMARY\".\"DB1\" COMMENT = 'replica'"
        );
    }

    #[test]
    fn test_alter() {
        let swap = AlterDatabaseRequest::new(id())
            .with_swap_with(AccountObjectIdentifier::new("DB2"))
            .to_options();
        assert_eq!(swap.to_sql(), "ALTER DATABASE \"DB1\" SWAP WITH \"DB2\"");

        let set = AlterDatabaseRequest::new(id())
            .with_set(DatabaseSet::default().with_data_retention_time_in_days(7))
            .to_options();
        assert_eq!(set.to_sql(), "ALTER DATABASE \"DB1\" SET DATA_RETENTION_TIME_IN_DAYS = 7");

        let unset = AlterDatabaseRequest::new(id())
            .with_unset(DatabaseUnset::default().with_comment(true).with_log_level(true))
            .to_options();
        assert_eq!(unset.to_sql(), "ALTER DATABASE \"DB1\" UNSET LOG_LEVEL, COMMENT");

        let enable = AlterDatabaseRequest::new(id())
            .with_enable_replication(EnableReplication {
                to_accounts: vec![AccountIdentifier::new("ORG", "A2")],
                ignore_edition_check: true,
            })
            .to_options();
        assert_eq!(
            enable.to_sql(),
            "ALTER DATABASE \"DB1\" ENABLE REPLICATION TO ACCOUNTS \"ORG\".\"A2\" IGNORE EDITION CHECK"
        );

        let disable = AlterDatabaseRequest::new(id())
            .with_disable_replication(DisableReplication::default())
            .to_options();
        assert_eq!(disable.to_sql(), "ALTER DATABASE \"DB1\" DISABLE REPLICATION");

        let refresh = AlterDatabaseRequest::new(id()).with_refresh(true).to_options();
        assert_eq!(refresh.to_sql(), "ALTER DATABASE \"DB1\" REFRESH");
    }

    #[test]
    fn test_show_undrop_use() {
        assert_eq!(ShowDatabaseRequest::new().to_options().to_sql(), "SHOW DATABASES");
        let show = ShowDatabaseRequest::new()
            .with_terse(true)
            .with_history(true)
            .with_like(Like::new("DB%"))
            .with_starts_with("D")
            .with_limit(LimitFrom::new(5))
            .to_options();
        assert_eq!(
            show.to_sql(),
            "SHOW TERSE DATABASES HISTORY LIKE 'DB%' STARTS WITH 'D' LIMIT 5"
        );
        assert_eq!(UndropDatabaseOptions::new(id()).to_sql(), "UNDROP DATABASE \"DB1\"");
        assert_eq!(UseDatabaseOptions::new(id()).to_sql(), "USE DATABASE \"DB1\"");
        let params = ShowDatabaseParametersOptions {
            like: Some(Like::new("DATA%")),
            name: id(),
        };
        assert_eq!(
            params.to_sql(),
            "SHOW PARAMETERS LIKE 'DATA%' IN DATABASE \"DB1\""
        );
    }
}
