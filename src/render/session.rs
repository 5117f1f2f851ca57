use crate::objects::session::{AlterSessionOptions, UseSecondaryRolesOptions};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for UseSecondaryRolesOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("USE SECONDARY ROLES");
        match self {
            UseSecondaryRolesOptions::All => sql.keyword("ALL"),
            UseSecondaryRolesOptions::None => sql.keyword("NONE"),
            UseSecondaryRolesOptions::Roles(roles) => sql.list_comma("", roles),
        };
    }
}

impl RenderSql for AlterSessionOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER SESSION")
            .list_comma("SET", &self.set)
            .list_comma("UNSET", &self.unset);
    }
}
