use crate::identifiers::Identifier;
use crate::objects::procedure::{
    AlterProcedureOptions, CallProcedureOptions, CreateProcedureOptions, ProcedureSet,
};
use crate::render::routine::{arguments, definition};
use crate::render::{Quote, RenderSql, SqlBuilder};

impl RenderSql for CreateProcedureOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.secure, "SECURE")
            .keyword("PROCEDURE")
            .identifier(&self.name);
        arguments(sql, &self.arguments);
        sql.flag(self.copy_grants, "COPY GRANTS")
            .nested(Some(&self.returns))
            .keyword("LANGUAGE")
            .keyword(&self.language.to_string())
            .nested(Some(&self.implementation));
        if let Some(behavior) = self.null_input_behavior {
            sql.keyword(&behavior.to_string());
        }
        sql.parameter_quoted("COMMENT", self.comment.as_ref())
            .keyword_value("EXECUTE AS", self.execute_as, Quote::None);
        definition(sql, self.implementation.definition.as_ref());
    }
}

impl RenderSql for ProcedureSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter_quoted("LOG_LEVEL", self.log_level)
            .parameter_quoted("TRACE_LEVEL", self.trace_level)
            .list_paren_eq(
                "EXTERNAL_ACCESS_INTEGRATIONS",
                &self.external_access_integrations,
            )
            .list_paren_eq("SECRETS", &self.secrets);
    }
}

impl RenderSql for AlterProcedureOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER PROCEDURE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT")
            .keyword_value("EXECUTE AS", self.execute_as, Quote::None)
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for CallProcedureOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        let args = if self.named_args.is_empty() {
            self.positional_args.join(", ")
        } else {
            self.named_args
                .iter()
                .map(|(name, value)| format!("{name} => {value}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        sql.keyword("CALL")
            .raw(format!("{}({args})", self.name.fully_qualified_name()));
        if let Some(variable) = &self.script_variable {
            sql.raw(format!("INTO :{variable}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{In, Like};
    use crate::datatypes::DataType;
    use crate::identifiers::{DatabaseObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::procedure::*;
    use crate::objects::routine::{ReturnColumn, RoutineArgument, RoutineReturns};
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "P")
    }

    #[test]
    fn test_create_sql() {
        let opts = CreateProcedureRequest::for_sql(
            id(),
            RoutineReturns::value(DataType::Varchar),
            "BEGIN RETURN 'ok'; END",
        )
        .with_or_replace(true)
        .with_arguments([RoutineArgument::new("n", DataType::Number)])
        .with_execute_as(ExecuteAs::Caller)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE PROCEDURE \"DB1\".\"S1\".\"P\" (\"n\" NUMBER) RETURNS VARCHAR \
             LANGUAGE SQL EXECUTE AS CALLER AS $$BEGIN RETURN 'ok'; END$$"
        );
    }

    #[test]
    fn test_create_python_table() {
        let opts = CreateProcedureRequest::for_python(
            id(),
            RoutineReturns::table([ReturnColumn::new("ID", DataType::Number)]),
            "3.11",
            "run",
        )
        .with_execute_as(ExecuteAs::Owner)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE PROCEDURE \"DB1\".\"S1\".\"P\" () RETURNS TABLE (\"ID\" NUMBER) \
             LANGUAGE PYTHON RUNTIME_VERSION = '3.11' HANDLER = 'run' EXECUTE AS OWNER"
        );
    }

    #[test]
    fn test_alter_and_show() {
        let name = id().with_arguments([DataType::Number]);
        assert_eq!(
            AlterProcedureRequest::new(name.clone())
                .with_execute_as(ExecuteAs::RestrictedCaller)
                .to_options()
                .to_sql(),
            "ALTER PROCEDURE \"DB1\".\"S1\".\"P\"(NUMBER) EXECUTE AS RESTRICTED CALLER"
        );
        assert_eq!(
            AlterProcedureRequest::new(name)
                .with_set(ProcedureSet::default().with_comment("c"))
                .to_options()
                .to_sql(),
            "ALTER PROCEDURE \"DB1\".\"S1\".\"P\"(NUMBER) SET COMMENT = 'c'"
        );
        assert_eq!(
            ShowProcedureRequest::new()
                .with_like(Like::new("P%"))
                .with_in_scope(In::schema(DatabaseObjectIdentifier::new("DB1", "S1")))
                .to_options()
                .to_sql(),
            "SHOW PROCEDURES LIKE 'P%' IN SCHEMA \"DB1\".\"S1\""
        );
    }

    #[test]
    fn test_call() {
        let positional = CallProcedureRequest::new(id())
            .with_positional_args(["1".to_string(), "'a'".to_string()])
            .with_script_variable("res")
            .to_options();
        assert_eq!(
            positional.to_sql(),
            "CALL \"DB1\".\"S1\".\"P\"(1, 'a') INTO :res"
        );
        let named = CallProcedureRequest::new(id())
            .with_named_args([("n".to_string(), "5".to_string())])
            .to_options();
        assert_eq!(named.to_sql(), "CALL \"DB1\".\"S1\".\"P\"(n => 5)");
    }
}
