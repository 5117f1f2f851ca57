use crate::objects::grant::{
    ApplicationRoleGrantee, BulkScope, GrantApplicationRoleOptions, GrantOn, GrantOwnershipOptions,
    GrantPrivileges, GrantPrivilegesToAccountRoleOptions, GrantPrivilegesToDatabaseRoleOptions,
    OwnershipGrantee, RevokeApplicationRoleOptions, RevokePrivilegesFromAccountRoleOptions,
    RevokePrivilegesFromDatabaseRoleOptions, ShowGrantOptions, ShowGrantsOf, ShowGrantsOn,
    ShowGrantsTo,
};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for GrantPrivileges {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag(self.all_privileges, "ALL PRIVILEGES")
            .list_comma("", &self.privileges);
    }
}

impl RenderSql for BulkScope {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            BulkScope::Database(id) => sql.keyword("IN DATABASE").identifier(id),
            BulkScope::Schema(id) => sql.keyword("IN SCHEMA").identifier(id),
        };
    }
}

impl RenderSql for GrantOn {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ON");
        match self {
            GrantOn::Account => {
                sql.keyword("ACCOUNT");
            }
            GrantOn::AccountObject(object_type, id) => {
                sql.keyword(&object_type.to_string()).identifier(id);
            }
            GrantOn::Schema(id) => {
                sql.keyword("SCHEMA").identifier(id);
            }
            GrantOn::AllSchemas(id) => {
                sql.keyword("ALL SCHEMAS IN DATABASE").identifier(id);
            }
            GrantOn::FutureSchemas(id) => {
                sql.keyword("FUTURE SCHEMAS IN DATABASE").identifier(id);
            }
            GrantOn::SchemaObject(object_type, id) => {
                sql.keyword(&object_type.to_string()).identifier(id);
            }
            GrantOn::All(object_type, scope) => {
                sql.keyword("ALL")
                    .keyword(&object_type.plural())
                    .nested(Some(scope));
            }
            GrantOn::Future(object_type, scope) => {
                sql.keyword("FUTURE")
                    .keyword(&object_type.plural())
                    .nested(Some(scope));
            }
        }
    }
}

impl RenderSql for GrantPrivilegesToAccountRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("GRANT")
            .nested(Some(&self.privileges))
            .nested(Some(&self.on))
            .keyword("TO ROLE")
            .identifier(&self.account_role)
            .flag(self.with_grant_option, "WITH GRANT OPTION");
    }
}

impl RenderSql for RevokePrivilegesFromAccountRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REVOKE")
            .flag(self.grant_option_for, "GRANT OPTION FOR")
            .nested(Some(&self.privileges))
            .nested(Some(&self.on))
            .keyword("FROM ROLE")
            .identifier(&self.account_role);
        if let Some(behavior) = self.behavior {
            sql.keyword(&behavior.to_string());
        }
    }
}

impl RenderSql for GrantPrivilegesToDatabaseRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("GRANT")
            .nested(Some(&self.privileges))
            .nested(Some(&self.on))
            .keyword("TO DATABASE ROLE")
            .identifier(&self.database_role)
            .flag(self.with_grant_option, "WITH GRANT OPTION");
    }
}

impl RenderSql for RevokePrivilegesFromDatabaseRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REVOKE")
            .flag(self.grant_option_for, "GRANT OPTION FOR")
            .nested(Some(&self.privileges))
            .nested(Some(&self.on))
            .keyword("FROM DATABASE ROLE")
            .identifier(&self.database_role);
        if let Some(behavior) = self.behavior {
            sql.keyword(&behavior.to_string());
        }
    }
}

impl RenderSql for OwnershipGrantee {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            OwnershipGrantee::AccountRole(id) => sql.keyword("ROLE").identifier(id),
            OwnershipGrantee::DatabaseRole(id) => sql.keyword("DATABASE ROLE").identifier(id),
        };
    }
}

impl RenderSql for GrantOwnershipOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("GRANT OWNERSHIP")
            .nested(Some(&self.on))
            .keyword("TO")
            .nested(Some(&self.to));
        if let Some(current) = self.current_grants {
            sql.keyword(&current.to_string());
        }
    }
}

impl RenderSql for ApplicationRoleGrantee {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            ApplicationRoleGrantee::AccountRole(id) => sql.keyword("ROLE").identifier(id),
            ApplicationRoleGrantee::Application(id) => sql.keyword("APPLICATION").identifier(id),
        };
    }
}

impl RenderSql for GrantApplicationRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("GRANT APPLICATION ROLE")
            .identifier(&self.name)
            .keyword("TO")
            .nested(Some(&self.to));
    }
}

impl RenderSql for RevokeApplicationRoleOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REVOKE APPLICATION ROLE")
            .identifier(&self.name)
            .keyword("FROM")
            .nested(Some(&self.from));
    }
}

impl RenderSql for ShowGrantOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW")
            .flag(self.future, "FUTURE")
            .keyword("GRANTS");
        match &self.on {
            Some(ShowGrantsOn::Account) => {
                sql.keyword("ON ACCOUNT");
            }
            Some(ShowGrantsOn::Object(object_type, id)) => {
                sql.keyword("ON")
                    .keyword(&object_type.to_string())
                    .identifier(id);
            }
            None => {}
        }
        if let Some(to) = &self.to {
            match to {
                ShowGrantsTo::Role(id) => sql.keyword("TO ROLE").identifier(id),
                ShowGrantsTo::User(id) => sql.keyword("TO USER").identifier(id),
                ShowGrantsTo::DatabaseRole(id) => sql.keyword("TO DATABASE ROLE").identifier(id),
                ShowGrantsTo::Share(id) => sql.keyword("TO SHARE").identifier(id),
                ShowGrantsTo::Application(id) => sql.keyword("TO APPLICATION").identifier(id),
                ShowGrantsTo::ApplicationRole(id) => {
                    sql.keyword("TO APPLICATION ROLE").identifier(id)
                }
            };
        }
        if let Some(of) = &self.of {
            match of {
                ShowGrantsOf::Role(id) => sql.keyword("OF ROLE").identifier(id),
                ShowGrantsOf::DatabaseRole(id) => sql.keyword("OF DATABASE ROLE").identifier(id),
                ShowGrantsOf::Share(id) => sql.keyword("OF SHARE").identifier(id),
                ShowGrantsOf::ApplicationRole(id) => {
                    sql.keyword("OF APPLICATION ROLE").identifier(id)
                }
            };
        }
        sql.nested(self.in_scope.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::common::ObjectType;
    use crate::identifiers::{
        AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier,
    };
    use crate::objects::grant::*;
    use crate::render::RenderSql;

    fn role() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("R1")
    }

    #[test]
    fn test_grant_usage_on_database() {
        let opts = GrantPrivilegesToAccountRoleRequest::new(
            GrantPrivileges::of([Privilege::Usage]),
            GrantOn::database(AccountObjectIdentifier::new("DB1")),
            role(),
        )
        .to_options();
        assert_eq!(opts.to_sql(), "GRANT USAGE ON DATABASE \"DB1\" TO ROLE \"R1\"");
    }

    #[test]
    fn test_grant_bulk_targets() {
        let all = GrantPrivilegesToAccountRoleRequest::new(
            GrantPrivileges::of([Privilege::Select, Privilege::Insert]),
            GrantOn::All(
                ObjectType::Table,
                BulkScope::Schema(DatabaseObjectIdentifier::new("DB1", "S1")),
            ),
            role(),
        )
        .with_with_grant_option(true);
        assert_eq!(
            all.to_options().to_sql(),
            "GRANT SELECT, INSERT ON ALL TABLES IN SCHEMA \"DB1\".\"S1\" TO ROLE \"R1\" WITH GRANT OPTION"
        );
        let future = GrantPrivilegesToDatabaseRoleRequest::new(
            GrantPrivileges::all(),
            GrantOn::FutureSchemas(AccountObjectIdentifier::new("DB1")),
            DatabaseObjectIdentifier::new("DB1", "DR1"),
        );
        assert_eq!(
            future.to_options().to_sql(),
            "GRANT ALL PRIVILEGES ON FUTURE SCHEMAS IN DATABASE \"DB1\" TO DATABASE ROLE \"DB1\".\"DR1\""
        );
    }

    #[test]
    fn test_revoke() {
        let opts = RevokePrivilegesFromAccountRoleRequest::new(
            GrantPrivileges::of([Privilege::Monitor]),
            GrantOn::Account,
            role(),
        )
        .with_grant_option_for(true)
        .with_behavior(RevokeBehavior::Cascade)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "REVOKE GRANT OPTION FOR MONITOR ON ACCOUNT FROM ROLE \"R1\" CASCADE"
        );
    }

    #[test]
    fn test_ownership() {
        let opts = GrantOwnershipRequest::new(
            GrantOn::schema_object(ObjectType::Table, SchemaObjectIdentifier::new("DB1", "S1", "T1")),
            OwnershipGrantee::DatabaseRole(DatabaseObjectIdentifier::new("DB1", "DR1")),
        )
        .with_current_grants(CurrentGrants::Copy)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "GRANT OWNERSHIP ON TABLE \"DB1\".\"S1\".\"T1\" TO DATABASE ROLE \"DB1\".\"DR1\" COPY CURRENT GRANTS"
        );
    }

    #[test]
    fn test_application_role() {
        let grant = GrantApplicationRoleRequest::new(
            DatabaseObjectIdentifier::new("APP", "VIEWER"),
            ApplicationRoleGrantee::AccountRole(role()),
        );
        assert_eq!(
            grant.to_options().to_sql(),
            "GRANT APPLICATION ROLE \"APP\".\"VIEWER\" TO ROLE \"R1\""
        );
        let revoke = RevokeApplicationRoleRequest::new(
            DatabaseObjectIdentifier::new("APP", "VIEWER"),
            ApplicationRoleGrantee::Application(AccountObjectIdentifier::new("OTHER")),
        );
        assert_eq!(
            revoke.to_options().to_sql(),
            "REVOKE APPLICATION ROLE \"APP\".\"VIEWER\" FROM APPLICATION \"OTHER\""
        );
    }

    #[test]
    fn test_show_grants() {
        assert_eq!(ShowGrantRequest::new().to_options().to_sql(), "SHOW GRANTS");
        let on = ShowGrantRequest::new()
            .with_on(ShowGrantsOn::Object(
                ObjectType::Database,
                AccountObjectIdentifier::new("DB1").into(),
            ))
            .to_options();
        assert_eq!(on.to_sql(), "SHOW GRANTS ON DATABASE \"DB1\"");
        let of = ShowGrantRequest::new().with_of(ShowGrantsOf::Role(role())).to_options();
        assert_eq!(of.to_sql(), "SHOW GRANTS OF ROLE \"R1\"");
        let future = ShowGrantRequest::future_in(BulkScope::Database(AccountObjectIdentifier::new(
            "DB1",
        )))
        .to_options();
        assert_eq!(future.to_sql(), "SHOW FUTURE GRANTS IN DATABASE \"DB1\"");
    }
}
