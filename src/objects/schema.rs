//! Schemas inside a database.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{CloneSource, In, LimitFrom, Like, LogLevel, TagAssociation, TraceLevel};
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::Result;
use crate::identifiers::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, Identifier, SchemaObjectIdentifier,
};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSchemaOptions {
    pub or_replace: bool,
    pub transient: bool,
    pub if_not_exists: bool,
    pub name: DatabaseObjectIdentifier,
    pub clone: Option<CloneSource<DatabaseObjectIdentifier>>,
    pub with_managed_access: bool,
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub external_volume: Option<AccountObjectIdentifier>,
    pub default_ddl_collation: Option<String>,
    pub log_level: Option<LogLevel>,
    pub trace_level: Option<TraceLevel>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateSchemaOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSchemaOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.nested(self.clone.as_ref());
        errors.range(
            "DataRetentionTimeInDays",
            self.data_retention_time_in_days,
            0,
            90,
        );
        errors.range(
            "MaxDataExtensionTimeInDays",
            self.max_data_extension_time_in_days,
            0,
            90,
        );
        errors.optional_identifier("ExternalVolume", self.external_volume.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateSchemaRequest => CreateSchemaOptions {
        flag or_replace,
        flag transient,
        flag if_not_exists,
        val clone: CloneSource<DatabaseObjectIdentifier>,
        flag with_managed_access,
        val data_retention_time_in_days: i64,
        val max_data_extension_time_in_days: i64,
        opt external_volume: AccountObjectIdentifier,
        opt default_ddl_collation: String,
        val log_level: LogLevel,
        val trace_level: TraceLevel,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateSchemaRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            options: CreateSchemaOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSet {
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub default_ddl_collation: Option<String>,
    pub log_level: Option<LogLevel>,
    pub trace_level: Option<TraceLevel>,
    pub comment: Option<String>,
}

setters!(SchemaSet {
    val data_retention_time_in_days: i64,
    val max_data_extension_time_in_days: i64,
    opt default_ddl_collation: String,
    val log_level: LogLevel,
    val trace_level: TraceLevel,
    opt comment: String,
});

impl Validate for SchemaSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SchemaSet");
        errors.at_least_one_of(
            &[
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "DefaultDDLCollation",
                "LogLevel",
                "TraceLevel",
                "Comment",
            ],
            &[
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.default_ddl_collation,
                &self.log_level,
                &self.trace_level,
                &self.comment,
            ],
        );
        errors.range(
            "DataRetentionTimeInDays",
            self.data_retention_time_in_days,
            0,
            90,
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaUnset {
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub default_ddl_collation: bool,
    pub log_level: bool,
    pub trace_level: bool,
    pub comment: bool,
}

setters!(SchemaUnset {
    flag data_retention_time_in_days,
    flag max_data_extension_time_in_days,
    flag default_ddl_collation,
    flag log_level,
    flag trace_level,
    flag comment,
});

impl Validate for SchemaUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SchemaUnset");
        errors.at_least_one_of(
            &[
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "DefaultDDLCollation",
                "LogLevel",
                "TraceLevel",
                "Comment",
            ],
            &[
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.default_ddl_collation,
                &self.log_level,
                &self.trace_level,
                &self.comment,
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterSchemaOptions {
    pub if_exists: bool,
    pub name: DatabaseObjectIdentifier,
    pub new_name: Option<DatabaseObjectIdentifier>,
    pub swap_with: Option<DatabaseObjectIdentifier>,
    pub set: Option<SchemaSet>,
    pub unset: Option<SchemaUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    pub enable_managed_access: bool,
    pub disable_managed_access: bool,
}

impl Validate for AlterSchemaOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterSchemaOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "NewName",
                "SwapWith",
                "Set",
                "Unset",
                "SetTag",
                "UnsetTag",
                "EnableManagedAccess",
                "DisableManagedAccess",
            ],
            &[
                &self.new_name,
                &self.swap_with,
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
                &flag(self.enable_managed_access),
                &flag(self.disable_managed_access),
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("NewName", self.new_name.as_ref());
        errors.optional_identifier("SwapWith", self.swap_with.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterSchemaRequest => AlterSchemaOptions {
        flag if_exists,
        opt new_name: DatabaseObjectIdentifier,
        opt swap_with: DatabaseObjectIdentifier,
        val set: SchemaSet,
        val unset: SchemaUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
        flag enable_managed_access,
        flag disable_managed_access,
    }
}

impl AlterSchemaRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            options: AlterSchemaOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropSchemaOptions, DropSchemaRequest, "SCHEMA", DatabaseObjectIdentifier);

target_only!(UndropSchemaOptions, "UNDROP SCHEMA", DatabaseObjectIdentifier);
target_only!(DescribeSchemaOptions, "DESCRIBE SCHEMA", DatabaseObjectIdentifier);
target_only!(UseSchemaOptions, "USE SCHEMA", DatabaseObjectIdentifier);

show_objects!(ShowSchemaOptions, ShowSchemaRequest, "SCHEMAS" {
    flag terse,
    flag history,
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: LimitFrom,
});

/// One `SHOW SCHEMAS` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: Option<String>,
    pub is_current: Option<String>,
    pub database_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub options: Option<String>,
    pub retention_time: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for SchemaRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            is_default: row.opt("is_default"),
            is_current: row.opt("is_current"),
            database_name: row.get("database_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            options: row.opt("options"),
            retention_time: row.opt("retention_time"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub database_name: String,
    pub owner: String,
    pub comment: String,
    pub transient: bool,
    pub managed_access: bool,
    pub retention_time: i64,
    pub owner_role_type: String,
}

impl From<SchemaRow> for Schema {
    fn from(row: SchemaRow) -> Self {
        let options = row.options.unwrap_or_default().to_ascii_uppercase();
        Self {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.as_deref().is_some_and(yes),
            is_current: row.is_current.as_deref().is_some_and(yes),
            database_name: row.database_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            transient: options.contains("TRANSIENT"),
            managed_access: options.contains("MANAGED ACCESS"),
            retention_time: row
                .retention_time
                .as_deref()
                .and_then(parse_token)
                .unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl Schema {
    pub fn id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database_name, &self.name)
    }
}

/// One `DESCRIBE SCHEMA` row: an object in the schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDetailsRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: String,
}

impl FromRow for SchemaDetailsRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            kind: row.get("kind")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDetails {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: String,
}

impl From<SchemaDetailsRow> for SchemaDetails {
    fn from(row: SchemaDetailsRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            kind: row.kind,
        }
    }
}

gateway!(Schemas);

impl Schemas<'_> {
    pub async fn create(&self, request: &CreateSchemaRequest) -> Result<()> {
        self.client.exec("create schema", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterSchemaRequest) -> Result<()> {
        self.client.exec("alter schema", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropSchemaRequest) -> Result<()> {
        self.client.exec("drop schema", &request.to_options()).await
    }

    pub async fn undrop(&self, id: &DatabaseObjectIdentifier) -> Result<()> {
        self.client
            .exec("undrop schema", &UndropSchemaOptions::new(id.clone()))
            .await
    }

    pub async fn show(&self, request: &ShowSchemaRequest) -> Result<Vec<Schema>> {
        self.client
            .query::<_, SchemaRow, _>("show schemas", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &DatabaseObjectIdentifier) -> Result<Schema> {
        let request = ShowSchemaRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::database(id.database_id()));
        find_by_id(self.show(&request).await?, "schema", id, Schema::id)
    }

    pub async fn describe(&self, id: &DatabaseObjectIdentifier) -> Result<Vec<SchemaDetails>> {
        self.client
            .query::<_, SchemaDetailsRow, _>(
                "describe schema",
                &DescribeSchemaOptions::new(id.clone()),
            )
            .await
    }

    pub async fn use_schema(&self, id: &DatabaseObjectIdentifier) -> Result<()> {
        self.client
            .exec("use schema", &UseSchemaOptions::new(id.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new("DB1", "S1")
    }

    #[test]
    fn test_alter_exactly_one() {
        let opts = AlterSchemaRequest::new(id())
            .with_enable_managed_access(true)
            .with_disable_managed_access(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        let opts = AlterSchemaRequest::new(id())
            .with_enable_managed_access(true)
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_show_scope_must_be_single() {
        let opts = ShowSchemaRequest::new().with_in_scope(In::default()).to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::ScopeRequiredForIn)
        );
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("name", Some("S1")),
            ("database_name", Some("DB1")),
            ("options", Some("TRANSIENT, MANAGED ACCESS")),
            ("retention_time", Some("")),
        ]);
        let schema = Schema::from(SchemaRow::from_row(&row).unwrap());
        assert!(schema.transient);
        assert!(schema.managed_access);
        assert_eq!(schema.retention_time, 0);
        assert_eq!(schema.id(), id());
    }
}
