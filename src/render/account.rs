use std::fmt;

use crate::objects::account::{
    AccountSet, AccountUnset, AlterAccountOptions, ParameterAssignment, ParameterScope,
    ParameterValue, ShowParametersOptions,
};
use crate::render::{RenderSql, SqlBuilder, escape_string};

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(value) => write!(f, "{value}"),
            ParameterValue::Number(value) => write!(f, "{value}"),
            ParameterValue::Text(value) => f.write_str(&escape_string(value)),
            ParameterValue::Keyword(value) => f.write_str(value),
        }
    }
}

impl fmt::Display for ParameterAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

impl RenderSql for AccountSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .list_comma("", &self.parameters)
            .parameter("RESOURCE_MONITOR", self.resource_monitor.as_ref())
            .keyword_identifier("PASSWORD POLICY", self.password_policy.as_ref())
            .keyword_identifier("SESSION POLICY", self.session_policy.as_ref())
            .keyword_identifier("AUTHENTICATION POLICY", self.authentication_policy.as_ref());
    }
}

impl RenderSql for AccountUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("UNSET")
            .list_comma("", &self.parameters)
            .flag(self.password_policy, "PASSWORD POLICY")
            .flag(self.session_policy, "SESSION POLICY")
            .flag(self.authentication_policy, "AUTHENTICATION POLICY");
    }
}

impl RenderSql for AlterAccountOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER ACCOUNT");
        if let Some(name) = &self.name {
            sql.identifier(name);
        }
        sql.nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for ParameterScope {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            ParameterScope::Account => sql.keyword("IN ACCOUNT"),
            ParameterScope::Session => sql.keyword("IN SESSION"),
            ParameterScope::User(id) => sql.keyword("IN USER").identifier(id),
            ParameterScope::Warehouse(id) => sql.keyword("IN WAREHOUSE").identifier(id),
            ParameterScope::Database(id) => sql.keyword("IN DATABASE").identifier(id),
            ParameterScope::Schema(id) => sql.keyword("IN SCHEMA").identifier(id),
            ParameterScope::Task(id) => sql.keyword("IN TASK").identifier(id),
            ParameterScope::Table(id) => sql.keyword("IN TABLE").identifier(id),
        };
    }
}

impl RenderSql for ShowParametersOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SHOW PARAMETERS")
            .nested(self.like.as_ref())
            .nested(self.scope.as_ref());
    }
}
