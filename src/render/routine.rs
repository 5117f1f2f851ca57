use std::fmt;

use crate::identifiers::Identifier;
use crate::objects::routine::{
    ReturnColumn, RoutineArgument, RoutineImplementation, RoutineReturns, SecretReference,
};
use crate::render::{RenderSql, SqlBuilder, dollar_quoted, escape_string, quote_ident, quoted};

impl fmt::Display for RoutineArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_ident(&self.name), self.data_type)?;
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ReturnColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_ident(&self.name), self.data_type)
    }
}

impl fmt::Display for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            escape_string(&self.variable),
            self.secret.fully_qualified_name()
        )
    }
}

/// `(<arguments>)`, always parenthesised even when empty.
pub(crate) fn arguments(sql: &mut SqlBuilder, arguments: &[RoutineArgument]) {
    let joined = arguments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    sql.raw(format!("({joined})"));
}

impl RenderSql for RoutineReturns {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("RETURNS");
        match self {
            RoutineReturns::Value {
                data_type,
                not_null,
            } => {
                sql.raw(data_type.to_string()).flag(*not_null, "NOT NULL");
            }
            RoutineReturns::Table(columns) => {
                let joined = columns
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                sql.raw(format!("TABLE ({joined})"));
            }
        }
    }
}

/// Everything but the body; the body goes last via [`definition`].
impl RenderSql for RoutineImplementation {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter_quoted("RUNTIME_VERSION", self.runtime_version.as_ref())
            .list_paren_eq("IMPORTS", quoted(&self.imports))
            .list_paren_eq("PACKAGES", quoted(&self.packages))
            .parameter_quoted("HANDLER", self.handler.as_ref())
            .list_paren_eq(
                "EXTERNAL_ACCESS_INTEGRATIONS",
                self.external_access_integrations
                    .iter()
                    .map(Identifier::fully_qualified_name),
            )
            .list_paren_eq("SECRETS", &self.secrets)
            .parameter_quoted("TARGET_PATH", self.target_path.as_ref());
    }
}

/// `AS $$<body>$$` when a body is present.
pub(crate) fn definition(sql: &mut SqlBuilder, body: Option<&String>) {
    if let Some(body) = body {
        sql.keyword("AS").raw(dollar_quoted(body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::DataType;
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};

    #[test]
    fn test_arguments_and_returns() {
        let mut sql = SqlBuilder::new();
        arguments(
            &mut sql,
            &[
                RoutineArgument::new("x", DataType::Number),
                RoutineArgument::new("y", "varchar").with_default("'a'"),
            ],
        );
        RoutineReturns::table([ReturnColumn::new("A", DataType::Number)]).render(&mut sql);
        assert_eq!(
            sql.finish(),
            "(\"x\" NUMBER, \"y\" VARCHAR DEFAULT 'a') RETURNS TABLE (\"A\" NUMBER)"
        );

        let mut sql = SqlBuilder::new();
        arguments(&mut sql, &[]);
        assert_eq!(sql.finish(), "()");
    }

    #[test]
    fn test_implementation() {
        let implementation = RoutineImplementation::default()
            .with_runtime_version("3.11")
            .with_packages(["snowflake-snowpark-python".to_string()])
            .with_handler("run")
            .with_external_access_integrations([AccountObjectIdentifier::new("EAI")])
            .with_secrets([SecretReference {
                variable: "cred".into(),
                secret: SchemaObjectIdentifier::new("DB1", "S1", "SEC"),
            }]);
        assert_eq!(
            implementation.to_sql(),
            "RUNTIME_VERSION = '3.11' PACKAGES = ('snowflake-snowpark-python') HANDLER = 'run' \
             EXTERNAL_ACCESS_INTEGRATIONS = (\"EAI\") SECRETS = ('cred' = \"DB1\".\"S1\".\"SEC\")"
        );
    }
}
