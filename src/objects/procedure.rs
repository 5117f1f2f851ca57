//! Stored procedures and `CALL`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{
    In, LogLevel, Like, NullInputBehavior, PropertyDetail, PropertyRow, TagAssociation,
    TraceLevel,
};
use crate::datatypes::DataType;
use crate::decode::{DecodeError, FromRow, Row, parse_list, yes};
use crate::error::Result;
use crate::identifiers::{
    AccountObjectIdentifier, Identifier, SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments,
};
use crate::objects::routine::{
    RoutineArgument, RoutineImplementation, RoutineLanguage, RoutineReturns, SecretReference,
    parse_signature,
};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum ExecuteAs {
    #[strum(serialize = "CALLER")]
    Caller,
    #[strum(serialize = "OWNER")]
    Owner,
    #[strum(serialize = "RESTRICTED CALLER")]
    RestrictedCaller,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProcedureOptions {
    pub or_replace: bool,
    pub secure: bool,
    pub name: SchemaObjectIdentifier,
    pub arguments: Vec<RoutineArgument>,
    pub copy_grants: bool,
    pub returns: RoutineReturns,
    pub language: RoutineLanguage,
    pub null_input_behavior: Option<NullInputBehavior>,
    pub comment: Option<String>,
    pub execute_as: Option<ExecuteAs>,
    pub implementation: RoutineImplementation,
}

impl Validate for CreateProcedureOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateProcedureOptions");
        errors.identifier("name", &self.name);
        self.implementation
            .check(&mut errors, "CreateProcedureOptions", self.language);
        errors.finish()
    }
}

request! {
    CreateProcedureRequest => CreateProcedureOptions {
        flag or_replace,
        flag secure,
        vec arguments: RoutineArgument,
        flag copy_grants,
        val null_input_behavior: NullInputBehavior,
        opt comment: String,
        val execute_as: ExecuteAs,
    }
}

impl CreateProcedureRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        language: RoutineLanguage,
        returns: RoutineReturns,
    ) -> Self {
        Self {
            options: CreateProcedureOptions {
                or_replace: false,
                secure: false,
                name,
                arguments: Vec::new(),
                copy_grants: false,
                returns,
                language,
                null_input_behavior: None,
                comment: None,
                execute_as: None,
                implementation: RoutineImplementation::default(),
            },
        }
    }

    pub fn with_implementation(mut self, implementation: RoutineImplementation) -> Self {
        self.options.implementation = implementation;
        self
    }

    pub fn for_java(
        name: SchemaObjectIdentifier,
        returns: RoutineReturns,
        runtime_version: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self::new(name, RoutineLanguage::Java, returns).with_implementation(
            RoutineImplementation::default()
                .with_runtime_version(runtime_version)
                .with_handler(handler),
        )
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
pub struct ProcedureSet {
    pub comment: Option<String>,
    pub log_level: Option<LogLevel>,
    pub trace_level: Option<TraceLevel>,
    pub external_access_integrations: Vec<AccountObjectIdentifier>,
    pub secrets: Vec<SecretReference>,
}

setters!(ProcedureSet {
    opt comment: String,
    val log_level: LogLevel,
    val trace_level: TraceLevel,
    vec external_access_integrations: AccountObjectIdentifier,
    vec secrets: SecretReference,
});

impl Validate for ProcedureSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ProcedureSet");
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
pub struct AlterProcedureOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifierWithArguments,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<ProcedureSet>,
    pub unset_comment: bool,
    pub execute_as: Option<ExecuteAs>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterProcedureOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterProcedureOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "RenameTo",
                "Set",
                "UnsetComment",
                "ExecuteAs",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &self.rename_to,
                &self.set,
                &flag(self.unset_comment),
                &self.execute_as,
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.nested(self.set.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterProcedureRequest => AlterProcedureOptions {
        flag if_exists,
        opt rename_to: SchemaObjectIdentifier,
        val set: ProcedureSet,
        flag unset_comment,
        val execute_as: ExecuteAs,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterProcedureRequest {
    pub fn new(name: SchemaObjectIdentifierWithArguments) -> Self {
        Self {
            options: AlterProcedureOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropProcedureOptions,
    DropProcedureRequest,
    "PROCEDURE",
    SchemaObjectIdentifierWithArguments
);

target_only!(
    DescribeProcedureOptions,
    "DESCRIBE PROCEDURE",
    SchemaObjectIdentifierWithArguments
);

show_objects!(ShowProcedureOptions, ShowProcedureRequest, "PROCEDURES" {
    val like: Like,
    val in_scope: In,
});

/// `CALL <name>(<expressions>) [INTO :<variable>]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallProcedureOptions {
    pub name: SchemaObjectIdentifier,
    pub positional_args: Vec<String>,
    pub named_args: Vec<(String, String)>,
    pub script_variable: Option<String>,
}

impl Validate for CallProcedureOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CallProcedureOptions");
        errors.identifier("name", &self.name);
        errors.at_most_one_of(
            &["PositionalArgs", "NamedArgs"],
            &[&self.positional_args, &self.named_args],
        );
        errors.finish()
    }
}

request! {
    CallProcedureRequest => CallProcedureOptions {
        vec positional_args: String,
        vec named_args: (String, String),
        opt script_variable: String,
    }
}

impl CallProcedureRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: CallProcedureOptions {
                name,
                ..Default::default()
            },
        }
    }
}

/// One `SHOW PROCEDURES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcedureRow {
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
}

impl FromRow for ProcedureRow {
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
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Procedure {
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
}

impl From<ProcedureRow> for Procedure {
    fn from(row: ProcedureRow) -> Self {
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
        }
    }
}

impl Procedure {
    pub fn id(&self) -> SchemaObjectIdentifierWithArguments {
        SchemaObjectIdentifierWithArguments::new(
            &self.catalog_name,
            &self.schema_name,
            &self.name,
            self.argument_types.clone(),
        )
    }
}

gateway!(Procedures);

impl Procedures<'_> {
    pub async fn create(&self, request: &CreateProcedureRequest) -> Result<()> {
        self.client
            .exec("create procedure", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterProcedureRequest) -> Result<()> {
        self.client
            .exec("alter procedure", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropProcedureRequest) -> Result<()> {
        self.client
            .exec("drop procedure", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowProcedureRequest) -> Result<Vec<Procedure>> {
        self.client
            .query::<_, ProcedureRow, _>("show procedures", &request.to_options())
            .await
    }

    pub async fn show_by_id(
        &self,
        id: &SchemaObjectIdentifierWithArguments,
    ) -> Result<Procedure> {
        let request = ShowProcedureRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "procedure", id, Procedure::id)
    }

    pub async fn describe(
        &self,
        id: &SchemaObjectIdentifierWithArguments,
    ) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe procedure",
                &DescribeProcedureOptions::new(id.clone()),
            )
            .await
    }

    /// Runs the procedure; its result set comes back as raw rows.
    pub async fn call(&self, request: &CallProcedureRequest) -> Result<Vec<Row>> {
        self.client
            .query_rows("call procedure", &request.to_options())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "P")
    }

    #[test]
    fn test_javascript_needs_body() {
        let opts = CreateProcedureRequest::new(
            id(),
            RoutineLanguage::Javascript,
            RoutineReturns::value(DataType::Varchar),
        )
        .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_scala_requires_runtime() {
        let opts = CreateProcedureRequest::new(
            id(),
            RoutineLanguage::Scala,
            RoutineReturns::value(DataType::Varchar),
        )
        .with_implementation(RoutineImplementation::default().with_handler("Main.run"))
        .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_call_args_exclusive() {
        let opts = CallProcedureRequest::new(id())
            .with_positional_args(["1".to_string()])
            .with_named_args([("a".to_string(), "1".to_string())])
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("name", Some("P")),
            ("schema_name", Some("S1")),
            ("catalog_name", Some("DB1")),
            ("arguments", Some("P(NUMBER) RETURN TABLE ()")),
            ("is_secure", Some("N")),
        ]);
        let procedure = Procedure::from(ProcedureRow::from_row(&row).unwrap());
        assert_eq!(procedure.id(), id().with_arguments([DataType::Number]));
        assert_eq!(procedure.return_type.as_deref(), Some("TABLE ()"));
        assert!(!procedure.is_secure);
    }
}
