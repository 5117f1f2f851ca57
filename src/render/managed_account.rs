use crate::objects::managed_account::{CreateManagedAccountOptions, DropManagedAccountOptions};
use crate::render::{RenderSql, SqlBuilder, escape_string};

impl RenderSql for CreateManagedAccountOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        // The parameters of this statement are comma separated.
        let mut parameters = vec![
            format!("ADMIN_NAME = {}", escape_string(&self.admin_name)),
            format!("ADMIN_PASSWORD = {}", escape_string(&self.admin_password)),
            "TYPE = READER".to_string(),
        ];
        if let Some(comment) = &self.comment {
            parameters.push(format!("COMMENT = {}", escape_string(comment)));
        }
        sql.keyword("CREATE MANAGED ACCOUNT")
            .identifier(&self.name)
            .raw(parameters.join(", "));
    }
}

impl RenderSql for DropManagedAccountOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("DROP MANAGED ACCOUNT").identifier(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::AccountObjectIdentifier;
    use crate::objects::managed_account::*;
    use crate::render::RenderSql;

    #[test]
    fn test_create() {
        let opts = CreateManagedAccountRequest::new(
            AccountObjectIdentifier::new("R1"),
            "admin",
            "Pa'ss",
        )
        .with_comment("reader")
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE MANAGED ACCOUNT \"R1\" ADMIN_NAME = 'admin', ADMIN_PASSWORD = 'Pa''ss', \
             TYPE = READER, COMMENT = 'reader'"
        );
    }

    #[test]
    fn test_drop_show() {
        assert_eq!(
            DropManagedAccountOptions::new(AccountObjectIdentifier::new("R1")).to_sql(),
            "DROP MANAGED ACCOUNT \"R1\""
        );
        assert_eq!(
            ShowManagedAccountRequest::new().to_options().to_sql(),
            "SHOW MANAGED ACCOUNTS"
        );
    }
}
