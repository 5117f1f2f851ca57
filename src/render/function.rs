use crate::objects::function::{
    AlterFunctionOptions, CreateFunctionOptions, FunctionSet, FunctionUnset,
};
use crate::render::routine::{arguments, definition};
use crate::render::{RenderSql, SqlBuilder};

impl RenderSql for CreateFunctionOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.temporary, "TEMPORARY")
            .flag(self.secure, "SECURE")
            .keyword("FUNCTION")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name);
        arguments(sql, &self.arguments);
        sql.flag(self.copy_grants, "COPY GRANTS")
            .nested(Some(&self.returns))
            .keyword("LANGUAGE")
            .keyword(&self.language.to_string());
        if let Some(behavior) = self.null_input_behavior {
            sql.keyword(&behavior.to_string());
        }
        if let Some(behavior) = self.return_results_behavior {
            sql.keyword(&behavior.to_string());
        }
        sql.parameter_quoted("COMMENT", self.comment.as_ref())
            .nested(Some(&self.implementation))
            .flag(self.memoizable, "MEMOIZABLE");
        definition(sql, self.implementation.definition.as_ref());
    }
}

impl RenderSql for FunctionSet {
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

impl RenderSql for FunctionUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.comment, "COMMENT"),
                (self.log_level, "LOG_LEVEL"),
                (self.trace_level, "TRACE_LEVEL"),
            ],
        );
    }
}

impl RenderSql for AlterFunctionOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER FUNCTION")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .flag(self.set_secure, "SET SECURE")
            .flag(self.unset_secure, "UNSET SECURE")
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{In, Like, NullInputBehavior};
    use crate::datatypes::DataType;
    use crate::identifiers::{
        DatabaseObjectIdentifier, SchemaObjectIdentifier, SchemaObjectIdentifierWithArguments,
    };
    use crate::objects::function::*;
    use crate::objects::routine::{RoutineArgument, RoutineImplementation, RoutineReturns};
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "F")
    }

    #[test]
    fn test_describe_overloaded() {
        let name = SchemaObjectIdentifierWithArguments::new(
            "DB1",
            "S1",
            "F",
            [DataType::Varchar, DataType::Number],
        );
        assert_eq!(
            DescribeFunctionOptions::new(name).to_sql(),
            "DESCRIBE FUNCTION \"DB1\".\"S1\".\"F\"(VARCHAR, NUMBER)"
        );
    }

    #[test]
    fn test_create_sql() {
        let opts = CreateFunctionRequest::for_sql(id(), RoutineReturns::value(DataType::Number), "x * 2")
            .with_or_replace(true)
            .with_secure(true)
            .with_arguments([RoutineArgument::new("x", DataType::Number)])
            .with_null_input_behavior(NullInputBehavior::ReturnsNullOnNullInput)
            .with_memoizable(true)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE SECURE FUNCTION \"DB1\".\"S1\".\"F\" (\"x\" NUMBER) RETURNS NUMBER \
             LANGUAGE SQL RETURNS NULL ON NULL INPUT MEMOIZABLE AS $$x * 2$$"
        );
    }

    #[test]
    fn test_create_python() {
        let opts = CreateFunctionRequest::for_python(
            id(),
            RoutineReturns::value(DataType::Varchar),
            "3.11",
            "main",
        )
        .with_implementation(
            RoutineImplementation::default()
                .with_runtime_version("3.11")
                .with_handler("main")
                .with_imports(["@stage/lib.zip".to_string()])
                .with_definition("def main(): return 'x'"),
        )
        .with_comment("py")
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE FUNCTION \"DB1\".\"S1\".\"F\" () RETURNS VARCHAR LANGUAGE PYTHON COMMENT = 'py' \
             RUNTIME_VERSION = '3.11' IMPORTS = ('@stage/lib.zip') HANDLER = 'main' \
             AS $$def main(): return 'x'$$"
        );
    }

    #[test]
    fn test_alter_and_drop() {
        let name = id().with_arguments([DataType::Varchar]);
        let rename = AlterFunctionRequest::new(name.clone())
            .with_rename_to(SchemaObjectIdentifier::new("DB1", "S1", "G"))
            .to_options();
        assert_eq!(
            rename.to_sql(),
            "ALTER FUNCTION \"DB1\".\"S1\".\"F\"(VARCHAR) RENAME TO \"DB1\".\"S1\".\"G\""
        );
        let secure = AlterFunctionRequest::new(name.clone())
            .with_set_secure(true)
            .to_options();
        assert_eq!(
            secure.to_sql(),
            "ALTER FUNCTION \"DB1\".\"S1\".\"F\"(VARCHAR) SET SECURE"
        );
        assert_eq!(
            DropFunctionRequest::new(name).with_if_exists(true).to_options().to_sql(),
            "DROP FUNCTION IF EXISTS \"DB1\".\"S1\".\"F\"(VARCHAR)"
        );
    }

    #[test]
    fn test_show() {
        let opts = ShowFunctionRequest::new()
            .with_like(Like::new("F%"))
            .with_in_scope(In::schema(DatabaseObjectIdentifier::new("DB1", "S1")))
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "SHOW USER FUNCTIONS LIKE 'F%' IN SCHEMA \"DB1\".\"S1\""
        );
    }
}
