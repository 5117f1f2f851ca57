use std::fmt;

use crate::objects::user::{
    AlterUserOptions, CreateUserOptions, SecondaryRoles, UserProperties, UserUnset,
};
use crate::render::{RenderSql, SqlBuilder};

impl fmt::Display for SecondaryRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecondaryRoles::All => f.write_str("('ALL')"),
            SecondaryRoles::None => f.write_str("()"),
        }
    }
}

impl RenderSql for UserProperties {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter_quoted("PASSWORD", self.password.as_ref())
            .parameter_quoted("LOGIN_NAME", self.login_name.as_ref())
            .parameter_quoted("DISPLAY_NAME", self.display_name.as_ref())
            .parameter_quoted("FIRST_NAME", self.first_name.as_ref())
            .parameter_quoted("MIDDLE_NAME", self.middle_name.as_ref())
            .parameter_quoted("LAST_NAME", self.last_name.as_ref())
            .parameter_quoted("EMAIL", self.email.as_ref())
            .parameter("MUST_CHANGE_PASSWORD", self.must_change_password)
            .parameter("DISABLED", self.disabled)
            .parameter("DAYS_TO_EXPIRY", self.days_to_expiry)
            .parameter("MINS_TO_UNLOCK", self.mins_to_unlock)
            .parameter("DEFAULT_WAREHOUSE", self.default_warehouse.as_ref())
            .parameter_quoted("DEFAULT_NAMESPACE", self.default_namespace.as_ref())
            .parameter("DEFAULT_ROLE", self.default_role.as_ref())
            .parameter("DEFAULT_SECONDARY_ROLES", self.default_secondary_roles)
            .parameter("MINS_TO_BYPASS_MFA", self.mins_to_bypass_mfa)
            .parameter_quoted("RSA_PUBLIC_KEY", self.rsa_public_key.as_ref())
            .parameter_quoted("RSA_PUBLIC_KEY_2", self.rsa_public_key_2.as_ref())
            .parameter("TYPE", self.user_type)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for CreateUserOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("USER")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(Some(&self.properties))
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for UserUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list("UNSET", &self.properties());
    }
}

impl RenderSql for AlterUserOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER USER")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .flag(self.reset_password, "RESET PASSWORD")
            .flag(self.abort_all_queries, "ABORT ALL QUERIES");
        if let Some(set) = &self.set {
            sql.keyword("SET").nested(Some(set));
        }
        sql.nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{LimitFrom, Like};
    use crate::identifiers::AccountObjectIdentifier;
    use crate::objects::user::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("U1")
    }

    #[test]
    fn test_create() {
        let opts = CreateUserRequest::new(id())
            .with_if_not_exists(true)
            .with_properties(
                UserProperties::default()
                    .with_password("p'w")
                    .with_login_name("u1")
                    .with_must_change_password(true)
                    .with_default_role(AccountObjectIdentifier::new("PUBLIC"))
                    .with_default_secondary_roles(SecondaryRoles::All)
                    .with_user_type(UserType::Person),
            )
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE USER IF NOT EXISTS \"U1\" PASSWORD = 'p''w' LOGIN_NAME = 'u1' \
             MUST_CHANGE_PASSWORD = true DEFAULT_ROLE = \"PUBLIC\" \
             DEFAULT_SECONDARY_ROLES = ('ALL') TYPE = PERSON"
        );
    }

    #[test]
    fn test_alter() {
        let set = AlterUserRequest::new(id())
            .with_set(UserProperties::default().with_disabled(true).with_comment("off"))
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER USER \"U1\" SET DISABLED = true COMMENT = 'off'"
        );
        let unset = AlterUserRequest::new(id())
            .with_unset(UserUnset::default().with_email(true).with_comment(true))
            .to_options();
        assert_eq!(unset.to_sql(), "ALTER USER \"U1\" UNSET EMAIL, COMMENT");
        let reset = AlterUserRequest::new(id())
            .with_if_exists(true)
            .with_reset_password(true)
            .to_options();
        assert_eq!(reset.to_sql(), "ALTER USER IF EXISTS \"U1\" RESET PASSWORD");
    }

    #[test]
    fn test_show_describe() {
        let opts = ShowUserRequest::new()
            .with_terse(true)
            .with_like(Like::new("U%"))
            .with_limit(LimitFrom::new(10).from("U0"))
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "SHOW TERSE USERS LIKE 'U%' LIMIT 10 FROM 'U0'"
        );
        assert_eq!(DescribeUserOptions::new(id()).to_sql(), "DESCRIBE USER \"U1\"");
    }
}
