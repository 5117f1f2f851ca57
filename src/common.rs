//! Value types shared across object kinds: list filters, tag associations,
//! object-type tokens and describe property rows.

use std::fmt;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::decode::{DecodeError, FromRow, Row};
use crate::error::Error;
use crate::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier};
use crate::render::escape_string;
use crate::validation::Errors;

/// `LIKE '<pattern>'`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Like {
    pub pattern: Option<String>,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
        }
    }
}

/// `IN ACCOUNT | IN DATABASE <db> | IN SCHEMA <schema>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct In {
    pub account: bool,
    pub database: Option<AccountObjectIdentifier>,
    pub schema: Option<DatabaseObjectIdentifier>,
}

impl In {
    pub fn account() -> Self {
        Self {
            account: true,
            ..Default::default()
        }
    }

    pub fn database(id: AccountObjectIdentifier) -> Self {
        Self {
            database: Some(id),
            ..Default::default()
        }
    }

    pub fn schema(id: DatabaseObjectIdentifier) -> Self {
        Self {
            schema: Some(id),
            ..Default::default()
        }
    }
}

/// [`In`] extended with application scopes, for routines and streamlits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedIn {
    pub account: bool,
    pub database: Option<AccountObjectIdentifier>,
    pub schema: Option<DatabaseObjectIdentifier>,
    pub application: Option<AccountObjectIdentifier>,
    pub application_package: Option<AccountObjectIdentifier>,
}

impl ExtendedIn {
    pub fn application(id: AccountObjectIdentifier) -> Self {
        Self {
            application: Some(id),
            ..Default::default()
        }
    }

    pub fn application_package(id: AccountObjectIdentifier) -> Self {
        Self {
            application_package: Some(id),
            ..Default::default()
        }
    }
}

impl From<In> for ExtendedIn {
    fn from(scope: In) -> Self {
        Self {
            account: scope.account,
            database: scope.database,
            schema: scope.schema,
            ..Default::default()
        }
    }
}

/// `LIMIT <rows> [FROM '<name>']`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitFrom {
    pub rows: u32,
    pub from: Option<String>,
}

impl LimitFrom {
    pub fn new(rows: u32) -> Self {
        Self { rows, from: None }
    }

    pub fn from(mut self, name: impl Into<String>) -> Self {
        self.from = Some(name.into());
        self
    }
}

/// `<tag> = '<value>'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssociation {
    pub name: SchemaObjectIdentifier,
    pub value: String,
}

impl TagAssociation {
    pub fn new(name: SchemaObjectIdentifier, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for TagAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, escape_string(&self.value))
    }
}

/// Point in time for `AT | BEFORE (...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeTravelPoint {
    Timestamp(String),
    Offset(i64),
    Statement(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTravel {
    pub before: bool,
    pub point: TimeTravelPoint,
}

impl TimeTravel {
    pub fn at(point: TimeTravelPoint) -> Self {
        Self {
            before: false,
            point,
        }
    }

    pub fn before(point: TimeTravelPoint) -> Self {
        Self {
            before: true,
            point,
        }
    }
}

/// `CLONE <source> [AT | BEFORE (...)]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSource<I> {
    pub source: I,
    pub time_travel: Option<TimeTravel>,
}

impl<I> CloneSource<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            time_travel: None,
        }
    }

    pub fn with_time_travel(mut self, time_travel: TimeTravel) -> Self {
        self.time_travel = Some(time_travel);
        self
    }
}

impl<I: crate::identifiers::Identifier> crate::validation::Validate for CloneSource<I> {
    fn validate(&self) -> crate::error::Result<()> {
        let mut errors = Errors::new("CloneSource");
        errors.identifier("source", &self.source);
        errors.finish()
    }
}

impl Errors {
    pub fn like(&mut self, like: Option<&Like>) {
        if let Some(like) = like
            && like.pattern.is_none()
        {
            self.push(Error::PatternRequiredForLike {
                structure: self.structure(),
            });
        }
    }

    pub fn scope(&mut self, scope: Option<&In>) {
        if let Some(scope) = scope {
            let set = [scope.account, scope.database.is_some(), scope.schema.is_some()];
            if set.iter().filter(|set| **set).count() != 1 {
                self.push(Error::ScopeRequiredForIn {
                    structure: self.structure(),
                });
            }
            self.optional_identifier("In.Database", scope.database.as_ref());
            self.optional_identifier("In.Schema", scope.schema.as_ref());
        }
    }

    pub fn extended_scope(&mut self, scope: Option<&ExtendedIn>) {
        if let Some(scope) = scope {
            let set = [
                scope.account,
                scope.database.is_some(),
                scope.schema.is_some(),
                scope.application.is_some(),
                scope.application_package.is_some(),
            ];
            if set.iter().filter(|set| **set).count() != 1 {
                self.push(Error::ScopeRequiredForIn {
                    structure: self.structure(),
                });
            }
            self.optional_identifier("In.Database", scope.database.as_ref());
            self.optional_identifier("In.Schema", scope.schema.as_ref());
            self.optional_identifier("In.Application", scope.application.as_ref());
            self.optional_identifier(
                "In.ApplicationPackage",
                scope.application_package.as_ref(),
            );
        }
    }

    pub fn tags(&mut self, tags: &[TagAssociation]) {
        for tag in tags {
            self.identifier("Tag", &tag.name);
        }
    }
}

/// A SHOW filter that checks itself against the enclosing options.
pub trait ShowFilter {
    fn check(&self, errors: &mut Errors);
}

impl ShowFilter for Like {
    fn check(&self, errors: &mut Errors) {
        errors.like(Some(self));
    }
}

impl ShowFilter for In {
    fn check(&self, errors: &mut Errors) {
        errors.scope(Some(self));
    }
}

impl ShowFilter for ExtendedIn {
    fn check(&self, errors: &mut Errors) {
        errors.extended_scope(Some(self));
    }
}

impl ShowFilter for LimitFrom {
    fn check(&self, _: &mut Errors) {}
}

impl ShowFilter for String {
    fn check(&self, _: &mut Errors) {}
}

/// Object-type tokens used by grants, tags, comments and SHOW GRANTS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum ObjectType {
    #[strum(serialize = "ACCOUNT")]
    Account,
    #[strum(serialize = "AGGREGATION POLICY")]
    AggregationPolicy,
    #[strum(serialize = "ALERT")]
    Alert,
    #[strum(serialize = "APPLICATION")]
    Application,
    #[strum(serialize = "APPLICATION PACKAGE")]
    ApplicationPackage,
    #[strum(serialize = "APPLICATION ROLE")]
    ApplicationRole,
    #[strum(serialize = "AUTHENTICATION POLICY")]
    AuthenticationPolicy,
    #[strum(serialize = "CORTEX SEARCH SERVICE")]
    CortexSearchService,
    #[strum(serialize = "DATABASE")]
    Database,
    #[strum(serialize = "DATABASE ROLE")]
    DatabaseRole,
    #[strum(serialize = "DYNAMIC TABLE")]
    DynamicTable,
    #[strum(serialize = "EVENT TABLE")]
    EventTable,
    #[strum(serialize = "EXTERNAL TABLE")]
    ExternalTable,
    #[strum(serialize = "EXTERNAL VOLUME")]
    ExternalVolume,
    #[strum(serialize = "FAILOVER GROUP")]
    FailoverGroup,
    #[strum(serialize = "FILE FORMAT")]
    FileFormat,
    #[strum(serialize = "FUNCTION")]
    Function,
    #[strum(serialize = "INTEGRATION")]
    Integration,
    #[strum(serialize = "MASKING POLICY")]
    MaskingPolicy,
    #[strum(serialize = "MATERIALIZED VIEW")]
    MaterializedView,
    #[strum(serialize = "NETWORK POLICY")]
    NetworkPolicy,
    #[strum(serialize = "NETWORK RULE")]
    NetworkRule,
    #[strum(serialize = "PASSWORD POLICY")]
    PasswordPolicy,
    #[strum(serialize = "PIPE")]
    Pipe,
    #[strum(serialize = "PROCEDURE")]
    Procedure,
    #[strum(serialize = "PROJECTION POLICY")]
    ProjectionPolicy,
    #[strum(serialize = "REPLICATION GROUP")]
    ReplicationGroup,
    #[strum(serialize = "RESOURCE MONITOR")]
    ResourceMonitor,
    #[strum(serialize = "ROLE")]
    Role,
    #[strum(serialize = "ROW ACCESS POLICY")]
    RowAccessPolicy,
    #[strum(serialize = "SCHEMA")]
    Schema,
    #[strum(serialize = "SECRET")]
    Secret,
    #[strum(serialize = "SEQUENCE")]
    Sequence,
    #[strum(serialize = "SESSION POLICY")]
    SessionPolicy,
    #[strum(serialize = "SHARE")]
    Share,
    #[strum(serialize = "STAGE")]
    Stage,
    #[strum(serialize = "STREAM")]
    Stream,
    #[strum(serialize = "STREAMLIT")]
    Streamlit,
    #[strum(serialize = "TABLE")]
    Table,
    #[strum(serialize = "TAG")]
    Tag,
    #[strum(serialize = "TASK")]
    Task,
    #[strum(serialize = "USER")]
    User,
    #[strum(serialize = "VIEW")]
    View,
    #[strum(serialize = "WAREHOUSE")]
    Warehouse,
}

impl ObjectType {
    /// Plural token used by `ALL` / `FUTURE` grants and SHOW commands.
    pub fn plural(self) -> String {
        match self {
            ObjectType::Account => "ACCOUNTS".to_string(),
            ObjectType::Application => "APPLICATIONS".to_string(),
            ObjectType::ApplicationPackage => "APPLICATION PACKAGES".to_string(),
            ObjectType::Database => "DATABASES".to_string(),
            ObjectType::DatabaseRole => "DATABASE ROLES".to_string(),
            ObjectType::Integration => "INTEGRATIONS".to_string(),
            ObjectType::AggregationPolicy
            | ObjectType::AuthenticationPolicy
            | ObjectType::MaskingPolicy
            | ObjectType::NetworkPolicy
            | ObjectType::PasswordPolicy
            | ObjectType::ProjectionPolicy
            | ObjectType::RowAccessPolicy
            | ObjectType::SessionPolicy => {
                let singular = self.to_string();
                format!("{}IES", singular.trim_end_matches('Y'))
            }
            ObjectType::CortexSearchService => "CORTEX SEARCH SERVICES".to_string(),
            other => format!("{other}S"),
        }
    }
}

/// Generic `DESCRIBE` output: one row per property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyRow {
    pub property: String,
    pub property_type: Option<String>,
    pub value: Option<String>,
    pub default: Option<String>,
    pub description: Option<String>,
}

impl FromRow for PropertyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            property: row.get("property")?,
            property_type: row.opt("property_type"),
            value: row.opt("property_value").or_else(|| row.opt("value")),
            default: row.opt("property_default").or_else(|| row.opt("default")),
            description: row
                .opt("property_description")
                .or_else(|| row.opt("description")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PropertyDetail {
    pub name: String,
    pub property_type: String,
    pub value: String,
    pub default: String,
    pub description: String,
}

impl From<PropertyRow> for PropertyDetail {
    fn from(row: PropertyRow) -> Self {
        Self {
            name: row.property,
            property_type: row.property_type.unwrap_or_default(),
            value: row.value.unwrap_or_default(),
            default: row.default.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
        }
    }
}

/// Finds a property by name, case-insensitively.
pub fn find_property<'a>(details: &'a [PropertyDetail], name: &str) -> Option<&'a PropertyDetail> {
    details
        .iter()
        .find(|detail| detail.name.eq_ignore_ascii_case(name))
}

/// One `SHOW PARAMETERS` row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterRow {
    pub key: String,
    pub value: Option<String>,
    pub default: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub parameter_type: Option<String>,
}

impl FromRow for ParameterRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            key: row.get("key")?,
            value: row.opt("value"),
            default: row.opt("default"),
            level: row.opt("level"),
            description: row.opt("description"),
            parameter_type: row.opt("type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
    pub default: String,
    pub level: String,
    pub description: String,
    pub parameter_type: String,
}

impl From<ParameterRow> for Parameter {
    fn from(row: ParameterRow) -> Self {
        Self {
            key: row.key,
            value: row.value.unwrap_or_default(),
            default: row.default.unwrap_or_default(),
            level: row.level.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            parameter_type: row.parameter_type.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum TraceLevel {
    #[strum(serialize = "ALWAYS")]
    Always,
    #[strum(serialize = "ON_EVENT")]
    OnEvent,
    #[strum(serialize = "OFF")]
    Off,
}

/// Routine and stream null-handling tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum NullInputBehavior {
    #[strum(serialize = "CALLED ON NULL INPUT")]
    CalledOnNullInput,
    #[strum(serialize = "RETURNS NULL ON NULL INPUT")]
    ReturnsNullOnNullInput,
    #[strum(serialize = "STRICT")]
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum ReturnResultsBehavior {
    Volatile,
    Immutable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_object_type_tokens() {
        assert_eq!(ObjectType::MaskingPolicy.to_string(), "MASKING POLICY");
        assert_eq!(ObjectType::MaskingPolicy.plural(), "MASKING POLICIES");
        assert_eq!(ObjectType::Table.plural(), "TABLES");
        assert_eq!(ObjectType::DatabaseRole.plural(), "DATABASE ROLES");
        assert_eq!(
            "row access policy".parse::<ObjectType>().unwrap(),
            ObjectType::RowAccessPolicy
        );
    }

    #[test]
    fn test_tag_association_display() {
        let tag = TagAssociation::new(SchemaObjectIdentifier::new("DB", "S", "T"), "o'k");
        assert_eq!(tag.to_string(), "\"DB\".\"S\".\"T\" = 'o''k'");
    }

    #[test]
    fn test_like_requires_pattern() {
        let mut errors = Errors::new("ShowX");
        errors.like(Some(&Like::default()));
        assert_eq!(
            errors.finish().unwrap_err().kind(),
            Some(ErrorKind::PatternRequiredForLike)
        );

        let mut errors = Errors::new("ShowX");
        errors.like(Some(&Like::new("")));
        assert!(errors.finish().is_ok());
    }

    #[test]
    fn test_in_requires_exactly_one_scope() {
        let mut errors = Errors::new("ShowX");
        errors.scope(Some(&In::default()));
        assert_eq!(
            errors.finish().unwrap_err().kind(),
            Some(ErrorKind::ScopeRequiredForIn)
        );

        let mut errors = Errors::new("ShowX");
        errors.scope(Some(&In {
            account: true,
            database: Some(AccountObjectIdentifier::new("DB")),
            schema: None,
        }));
        assert_eq!(
            errors.finish().unwrap_err().kind(),
            Some(ErrorKind::ScopeRequiredForIn)
        );

        let mut errors = Errors::new("ShowX");
        errors.scope(Some(&In::schema(DatabaseObjectIdentifier::new("DB", "S"))));
        assert!(errors.finish().is_ok());
    }

    #[test]
    fn test_extended_scope_checks_identifiers() {
        let mut errors = Errors::new("ShowFunctionOptions");
        errors.extended_scope(Some(&ExtendedIn::from(In::database(
            AccountObjectIdentifier::new(""),
        ))));
        assert_eq!(
            errors.finish().unwrap_err().kind(),
            Some(ErrorKind::InvalidObjectIdentifier)
        );

        let mut errors = Errors::new("ShowFunctionOptions");
        errors.extended_scope(Some(&ExtendedIn::from(In::schema(
            DatabaseObjectIdentifier::new("DB", ""),
        ))));
        assert_eq!(
            errors.finish().unwrap_err().kind(),
            Some(ErrorKind::InvalidObjectIdentifier)
        );

        let mut errors = Errors::new("ShowFunctionOptions");
        errors.extended_scope(Some(&ExtendedIn::application_package(
            AccountObjectIdentifier::new(""),
        )));
        assert_eq!(
            errors.finish().unwrap_err().kind(),
            Some(ErrorKind::InvalidObjectIdentifier)
        );

        let mut errors = Errors::new("ShowFunctionOptions");
        errors.extended_scope(Some(&ExtendedIn::application(AccountObjectIdentifier::new(
            "APP",
        ))));
        assert!(errors.finish().is_ok());
    }

    #[test]
    fn test_property_row_decodes_either_column_family() {
        let integration = Row::from_pairs([
            ("property", "ENABLED"),
            ("property_type", "Boolean"),
            ("property_value", "true"),
            ("property_default", "false"),
        ]);
        let detail = PropertyDetail::from(PropertyRow::from_row(&integration).unwrap());
        assert_eq!(detail.value, "true");
        assert_eq!(detail.default, "false");

        let user = Row::from_pairs([("property", "NAME"), ("value", "U1")]);
        let detail = PropertyDetail::from(PropertyRow::from_row(&user).unwrap());
        assert_eq!(detail.value, "U1");
        assert_eq!(detail.description, "");
    }
}
