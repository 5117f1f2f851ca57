//! User-defined functions in Java, JavaScript, Python, Scala and SQL.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{
    In, LogLevel, Like, NullInputBehavior, PropertyDetail, PropertyRow, ReturnResultsBehavior,
    TagAssociation, TraceLevel,
};
use crate::datatypes::DataType;
use crate::decode::{DecodeError, FromRow, Row, parse_list, parse_token, yes};
use crate::error::{Error, Result};
use crate::identifiers::{
    AccountObjectIdentifier, Identifier, SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments,
};
use crate::objects::routine::{
    RoutineArgument, RoutineImplementation, RoutineLanguage, RoutineReturns, SecretReference,
    parse_signature,
};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunctionOptions {
    pub or_replace: bool,
    pub temporary: bool,
    pub secure: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub arguments: Vec<RoutineArgument>,
    pub copy_grants: bool,
    pub returns: RoutineReturns,
    pub language: RoutineLanguage,
    pub null_input_behavior: Option<NullInputBehavior>,
    pub return_results_behavior: Option<ReturnResultsBehavior>,
    pub comment: Option<String>,
    pub implementation: RoutineImplementation,
    pub memoizable: bool,
}

impl Validate for CreateFunctionOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateFunctionOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        self.implementation
            .check(&mut errors, "CreateFunctionOptions", self.language);
        errors.check(
            !self.memoizable || self.language == RoutineLanguage::Sql,
            || {
                Error::invalid_value(
                    "CreateFunctionOptions",
                    "Memoizable",
                    "only SQL functions can be memoizable",
                )
            },
        );
        errors.finish()
    }
}

request! {
    CreateFunctionRequest => CreateFunctionOptions {
        flag or_replace,
        flag temporary,
        flag secure,
        flag if_not_exists,
        vec arguments: RoutineArgument,
        flag copy_grants,
        val null_input_behavior: NullInputBehavior,
        val return_results_behavior: ReturnResultsBehavior,
        opt comment: String,
        flag memoizable,
    }
}

impl CreateFunctionRequest {
    pub fn with_implementation(mut self, implementation: RoutineImplementation) -> Self {
        self.options.implementation = implementation;
        self
    }

    pub fn new(
        name: SchemaObjectIdentifier,
        language: RoutineLanguage,
        returns: RoutineReturns,
    ) -> Self {
        Self {
            options: CreateFunctionOptions {
                or_replace: false,
                temporary: false,
                secure: false,
                if_not_exists: false,
                name,
                arguments: Vec::new(),
                copy_grants: false,
                returns,
                language,
                null_input_behavior: None,
                return_results_behavior: None,
                comment: None,
                implementation: RoutineImplementation::default(),
                memoizable: false,
            },
        }
    }

    pub fn for_java(
        name: SchemaObjectIdentifier,
        returns: RoutineReturns,
        handler: impl Into<String>,
    ) -> Self {
        Self::new(name, RoutineLanguage::Java, returns)
            .with_implementation(RoutineImplementation::default().with_handler(handler))
    }

    pub fn for_javascript(
        name: SchemaObjectIdentifier,
        returns: RoutineReturns,
        definition: impl Into<String>,
    ) -> Self {
        Self::new(name, RoutineLanguage::Javascript, returns)
            .with_implementation(RoutineImplementation::default().with_definition(definition))
    }

    pub fn for_python(
        name: SchemaObjectIdentifier,
        returns: RoutineReturns,
        runtime_version: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self::new(name, RoutineLanguage::Python, returns).with_implementation(
            RoutineImplementation::default()
                .with_runtime_version(runtime_version)
                .with_handler(handler),
        )
    }

    pub fn for_scala(
        name: SchemaObjectIdentifier,
        returns: RoutineReturns,
        runtime_version: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self::new(name, RoutineLanguage::Scala, returns).with_implementation(
            RoutineImplementation::default()
                .with_runtime_version(runtime_version)
                .with_handler(handler),
        )
    }

    pub fn for_sql(
        name: SchemaObjectIdentifier,
        returns: RoutineReturns,
        definition: impl Into<String>,
    ) -> Self {
        Self::new(name, RoutineLanguage::Sql, returns)
            .with_implementation(RoutineImplementation::default().with_definition(definition))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionSet {
    pub comment: Option<String>,
    pub log_level: Option<LogLevel>,
    pub trace_level: Option<TraceLevel>,
    pub external_access_integrations: Vec<AccountObjectIdentifier>,
    pub secrets: Vec<SecretReference>,
}

setters!(FunctionSet {
    opt comment: String,
    val log_level: LogLevel,
    val trace_level: TraceLevel,
    vec external_access_integrations: AccountObjectIdentifier,
    vec secrets: SecretReference,
});

impl Validate for FunctionSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("FunctionSet");
        errors.at_least_one_of(
            &[
                "Comment",
                "LogLevel",
                "TraceLevel",
                "ExternalAccessIntegrations",
                "Secrets",
            ],
            &[
                &self.comment,
                &self.log_level,
                &self.trace_level,
                &self.external_access_integrations,
                &self.secrets,
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionUnset {
    pub comment: bool,
    pub log_level: bool,
    pub trace_level: bool,
}

setters!(FunctionUnset {
    flag comment,
    flag log_level,
    flag trace_level,
});

impl Validate for FunctionUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("FunctionUnset");
        errors.at_least_one_of(
            &["Comment", "LogLevel", "TraceLevel"],
            &[
                &flag(self.comment),
                &flag(self.log_level),
                &flag(self.trace_level),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterFunctionOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifierWithArguments,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<FunctionSet>,
    pub unset: Option<FunctionUnset>,
    pub set_secure: bool,
    pub unset_secure: bool,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterFunctionOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterFunctionOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "RenameTo",
                "Set",
                "Unset",
                "SetSecure",
                "UnsetSecure",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &self.rename_to,
                &self.set,
                &self.unset,
                &flag(self.set_secure),
                &flag(self.unset_secure),
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterFunctionRequest => AlterFunctionOptions {
        flag if_exists,
        opt rename_to: SchemaObjectIdentifier,
        val set: FunctionSet,
        val unset: FunctionUnset,
        flag set_secure,
        flag unset_secure,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterFunctionRequest {
    pub fn new(name: SchemaObjectIdentifierWithArguments) -> Self {
        Self {
            options: AlterFunctionOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropFunctionOptions,
    DropFunctionRequest,
    "FUNCTION",
    SchemaObjectIdentifierWithArguments
);

target_only!(
    DescribeFunctionOptions,
    "DESCRIBE FUNCTION",
    SchemaObjectIdentifierWithArguments
);

show_objects!(ShowFunctionOptions, ShowFunctionRequest, "USER FUNCTIONS" {
    val like: Like,
    val in_scope: In,
});

/// One `SHOW USER FUNCTIONS` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: Option<String>,
    pub is_builtin: Option<String>,
    pub is_aggregate: Option<String>,
    pub is_ansi: Option<String>,
    pub min_num_arguments: Option<i64>,
    pub max_num_arguments: Option<i64>,
    pub arguments: String,
    pub description: Option<String>,
    pub catalog_name: Option<String>,
    pub is_table_function: Option<String>,
    pub valid_for_clustering: Option<String>,
    pub is_secure: Option<String>,
    pub secrets: Option<String>,
    pub external_access_integrations: Option<String>,
    pub is_external_function: Option<String>,
    pub language: Option<String>,
    pub is_memoizable: Option<String>,
}

impl FromRow for FunctionRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            schema_name: row.opt("schema_name"),
            is_builtin: row.opt("is_builtin"),
            is_aggregate: row.opt("is_aggregate"),
            is_ansi: row.opt("is_ansi"),
            min_num_arguments: row.opt_i64("min_num_arguments")?,
            max_num_arguments: row.opt_i64("max_num_arguments")?,
            arguments: row.get("arguments")?,
            description: row.opt("description"),
            catalog_name: row.opt("catalog_name"),
            is_table_function: row.opt("is_table_function"),
            valid_for_clustering: row.opt("valid_for_clustering"),
            is_secure: row.opt("is_secure"),
            secrets: row.opt("secrets"),
            external_access_integrations: row.opt("external_access_integrations"),
            is_external_function: row.opt("is_external_function"),
            language: row.opt("language"),
            is_memoizable: row.opt("is_memoizable"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: String,
    pub catalog_name: String,
    pub is_builtin: bool,
    pub is_aggregate: bool,
    pub is_ansi: bool,
    pub min_num_arguments: i64,
    pub max_num_arguments: i64,
    pub argument_types: Vec<DataType>,
    pub return_type: Option<String>,
    pub arguments_raw: String,
    pub description: String,
    pub is_table_function: bool,
    pub valid_for_clustering: bool,
    pub is_secure: bool,
    pub secrets: Option<String>,
    pub external_access_integrations: Vec<String>,
    pub is_external_function: bool,
    pub language: Option<RoutineLanguage>,
    pub is_memoizable: bool,
}

impl From<FunctionRow> for Function {
    fn from(row: FunctionRow) -> Self {
        let (argument_types, return_type) = parse_signature(&row.arguments);
        Self {
            created_on: row.created_on,
            name: row.name,
            schema_name: row.schema_name.unwrap_or_default(),
            catalog_name: row.catalog_name.unwrap_or_default(),
            is_builtin: row.is_builtin.as_deref().is_some_and(yes),
            is_aggregate: row.is_aggregate.as_deref().is_some_and(yes),
            is_ansi: row.is_ansi.as_deref().is_some_and(yes),
            min_num_arguments: row.min_num_arguments.unwrap_or_default(),
            max_num_arguments: row.max_num_arguments.unwrap_or_default(),
            argument_types,
            return_type,
            arguments_raw: row.arguments,
            description: row.description.unwrap_or_default(),
            is_table_function: row.is_table_function.as_deref().is_some_and(yes),
            valid_for_clustering: row.valid_for_clustering.as_deref().is_some_and(yes),
            is_secure: row.is_secure.as_deref().is_some_and(yes),
            secrets: row.secrets,
            external_access_integrations: row
                .external_access_integrations
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            is_external_function: row.is_external_function.as_deref().is_some_and(yes),
            language: row.language.as_deref().and_then(parse_token),
            is_memoizable: row.is_memoizable.as_deref().is_some_and(yes),
        }
    }
}

impl Function {
    pub fn id(&self) -> SchemaObjectIdentifierWithArguments {
        SchemaObjectIdentifierWithArguments::new(
            &self.catalog_name,
            &self.schema_name,
            &self.name,
            self.argument_types.clone(),
        )
    }
}

gateway!(Functions);

impl Functions<'_> {
    pub async fn create(&self, request: &CreateFunctionRequest) -> Result<()> {
        self.client
            .exec("create function", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterFunctionRequest) -> Result<()> {
        self.client.exec("alter function", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropFunctionRequest) -> Result<()> {
        self.client.exec("drop function", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowFunctionRequest) -> Result<Vec<Function>> {
        self.client
            .query::<_, FunctionRow, _>("show functions", &request.to_options())
            .await
    }

    /// Overloads share a name, so the match includes the argument types.
    pub async fn show_by_id(&self, id: &SchemaObjectIdentifierWithArguments) -> Result<Function> {
        let request = ShowFunctionRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "function", id, Function::id)
    }

    pub async fn describe(
        &self,
        id: &SchemaObjectIdentifierWithArguments,
    ) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe function",
                &DescribeFunctionOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "F")
    }

    #[test]
    fn test_sql_function_needs_definition() {
        let opts = CreateFunctionRequest::new(
            id(),
            RoutineLanguage::Sql,
            RoutineReturns::value(DataType::Number),
        )
        .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
        let opts = CreateFunctionRequest::for_sql(id(), RoutineReturns::value(DataType::Number), "1")
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_memoizable_is_sql_only() {
        let opts = CreateFunctionRequest::for_java(
            id(),
            RoutineReturns::value(DataType::Varchar),
            "Handler.run",
        )
        .with_memoizable(true)
        .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_secure_toggle() {
        let name = id().with_arguments([DataType::Varchar]);
        let opts = AlterFunctionRequest::new(name.clone())
            .with_set_secure(true)
            .with_unset_secure(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        let opts = AlterFunctionRequest::new(name)
            .with_unset(FunctionUnset::default().with_comment(true))
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("created_on", Some("2024-01-02 03:04:05.000 +0000")),
            ("name", Some("F")),
            ("schema_name", Some("S1")),
            ("catalog_name", Some("DB1")),
            ("min_num_arguments", Some("2")),
            ("max_num_arguments", Some("2")),
            ("arguments", Some("F(VARCHAR, NUMBER) RETURN NUMBER")),
            ("is_secure", Some("Y")),
            ("language", Some("PYTHON")),
            ("external_access_integrations", Some("[EAI1, EAI2]")),
        ]);
        let function = Function::from(FunctionRow::from_row(&row).unwrap());
        assert_eq!(
            function.id(),
            id().with_arguments([DataType::Varchar, DataType::Number])
        );
        assert_eq!(function.return_type.as_deref(), Some("NUMBER"));
        assert!(function.is_secure);
        assert_eq!(function.language, Some(RoutineLanguage::Python));
        assert_eq!(function.external_access_integrations, vec!["EAI1", "EAI2"]);
    }
}
