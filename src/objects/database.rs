//! Databases, including shared and secondary (replica) databases.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{
    CloneSource, LimitFrom, Like, LogLevel, Parameter, ParameterRow, TagAssociation, TraceLevel,
};
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::{Error, Result};
use crate::identifiers::{
    AccountIdentifier, AccountObjectIdentifier, ExternalObjectIdentifier, Identifier,
    SchemaObjectIdentifier,
};
use crate::validation::{Errors, Validate, flag};

fn validate_retention(errors: &mut Errors, retention: Option<i64>, extension: Option<i64>) {
    errors.range("DataRetentionTimeInDays", retention, 0, 90);
    errors.range("MaxDataExtensionTimeInDays", extension, 0, 90);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateDatabaseOptions {
    pub or_replace: bool,
    pub transient: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub clone: Option<CloneSource<AccountObjectIdentifier>>,
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub external_volume: Option<AccountObjectIdentifier>,
    pub catalog: Option<AccountObjectIdentifier>,
    pub replace_invalid_characters: Option<bool>,
    pub default_ddl_collation: Option<String>,
    pub log_level: Option<LogLevel>,
    pub trace_level: Option<TraceLevel>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateDatabaseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateDatabaseOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.nested(self.clone.as_ref());
        validate_retention(
            &mut errors,
            self.data_retention_time_in_days,
            self.max_data_extension_time_in_days,
        );
        errors.optional_identifier("ExternalVolume", self.external_volume.as_ref());
        errors.optional_identifier("Catalog", self.catalog.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateDatabaseRequest => CreateDatabaseOptions {
        flag or_replace,
        flag transient,
        flag if_not_exists,
        val clone: CloneSource<AccountObjectIdentifier>,
        val data_retention_time_in_days: i64,
        val max_data_extension_time_in_days: i64,
        opt external_volume: AccountObjectIdentifier,
        opt catalog: AccountObjectIdentifier,
        val replace_invalid_characters: bool,
        opt default_ddl_collation: String,
        val log_level: LogLevel,
        val trace_level: TraceLevel,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateDatabaseRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: CreateDatabaseOptions {
                name,
                ..Default::default()
            },
        }
    }
}

/// `CREATE DATABASE <name> FROM SHARE <provider>.<share>`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSharedDatabaseOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub from_share: ExternalObjectIdentifier,
    pub external_volume: Option<AccountObjectIdentifier>,
    pub log_level: Option<LogLevel>,
    pub trace_level: Option<TraceLevel>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateSharedDatabaseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSharedDatabaseOptions");
        errors.identifier("name", &self.name);
        errors.identifier("FromShare", &self.from_share);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.optional_identifier("ExternalVolume", self.external_volume.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateSharedDatabaseRequest => CreateSharedDatabaseOptions {
        flag or_replace,
        flag if_not_exists,
        opt external_volume: AccountObjectIdentifier,
        val log_level: LogLevel,
        val trace_level: TraceLevel,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateSharedDatabaseRequest {
    pub fn new(name: AccountObjectIdentifier, from_share: ExternalObjectIdentifier) -> Self {
        Self {
            options: CreateSharedDatabaseOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                from_share,
                external_volume: None,
                log_level: None,
                trace_level: None,
                comment: None,
                tag: Vec::new(),
            },
        }
    }
}

/// `CREATE DATABASE <name> AS REPLICA OF <account>.<primary>`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecondaryDatabaseOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub primary_database: ExternalObjectIdentifier,
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub comment: Option<String>,
}

impl Validate for CreateSecondaryDatabaseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSecondaryDatabaseOptions");
        errors.identifier("name", &self.name);
        errors.identifier("PrimaryDatabase", &self.primary_database);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        validate_retention(
            &mut errors,
            self.data_retention_time_in_days,
            self.max_data_extension_time_in_days,
        );
        errors.finish()
    }
}

request! {
    CreateSecondaryDatabaseRequest => CreateSecondaryDatabaseOptions {
        flag or_replace,
        flag if_not_exists,
        val data_retention_time_in_days: i64,
        val max_data_extension_time_in_days: i64,
        opt comment: String,
    }
}

impl CreateSecondaryDatabaseRequest {
    pub fn new(name: AccountObjectIdentifier, primary_database: ExternalObjectIdentifier) -> Self {
        Self {
            options: CreateSecondaryDatabaseOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                primary_database,
                data_retention_time_in_days: None,
                max_data_extension_time_in_days: None,
                comment: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseSet {
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub external_volume: Option<AccountObjectIdentifier>,
    pub catalog: Option<AccountObjectIdentifier>,
    pub replace_invalid_characters: Option<bool>,
    pub default_ddl_collation: Option<String>,
    pub log_level: Option<LogLevel>,
    pub trace_level: Option<TraceLevel>,
    pub comment: Option<String>,
}

setters!(DatabaseSet {
    val data_retention_time_in_days: i64,
    val max_data_extension_time_in_days: i64,
    opt external_volume: AccountObjectIdentifier,
    opt catalog: AccountObjectIdentifier,
    val replace_invalid_characters: bool,
    opt default_ddl_collation: String,
    val log_level: LogLevel,
    val trace_level: TraceLevel,
    opt comment: String,
});

impl Validate for DatabaseSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DatabaseSet");
        errors.at_least_one_of(
            &[
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "ExternalVolume",
                "Catalog",
                "ReplaceInvalidCharacters",
                "DefaultDDLCollation",
                "LogLevel",
                "TraceLevel",
                "Comment",
            ],
            &[
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.external_volume,
                &self.catalog,
                &self.replace_invalid_characters,
                &self.default_ddl_collation,
                &self.log_level,
                &self.trace_level,
                &self.comment,
            ],
        );
        validate_retention(
            &mut errors,
            self.data_retention_time_in_days,
            self.max_data_extension_time_in_days,
        );
        errors.optional_identifier("ExternalVolume", self.external_volume.as_ref());
        errors.optional_identifier("Catalog", self.catalog.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseUnset {
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub external_volume: bool,
    pub catalog: bool,
    pub replace_invalid_characters: bool,
    pub default_ddl_collation: bool,
    pub log_level: bool,
    pub trace_level: bool,
    pub comment: bool,
}

setters!(DatabaseUnset {
    flag data_retention_time_in_days,
    flag max_data_extension_time_in_days,
    flag external_volume,
    flag catalog,
    flag replace_invalid_characters,
    flag default_ddl_collation,
    flag log_level,
    flag trace_level,
    flag comment,
});

impl Validate for DatabaseUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DatabaseUnset");
        errors.at_least_one_of(
            &[
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "ExternalVolume",
                "Catalog",
                "ReplaceInvalidCharacters",
                "DefaultDDLCollation",
                "LogLevel",
                "TraceLevel",
                "Comment",
            ],
            &[
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.external_volume,
                &self.catalog,
                &self.replace_invalid_characters,
                &self.default_ddl_collation,
                &self.log_level,
                &self.trace_level,
                &self.comment,
            ],
        );
        errors.finish()
    }
}

/// `ENABLE REPLICATION TO ACCOUNTS ... [IGNORE EDITION CHECK]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnableReplication {
    pub to_accounts: Vec<AccountIdentifier>,
    pub ignore_edition_check: bool,
}

/// `DISABLE REPLICATION [TO ACCOUNTS ...]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisableReplication {
    pub to_accounts: Vec<AccountIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterDatabaseOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub new_name: Option<AccountObjectIdentifier>,
    pub swap_with: Option<AccountObjectIdentifier>,
    pub set: Option<DatabaseSet>,
    pub unset: Option<DatabaseUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    pub enable_replication: Option<EnableReplication>,
    pub disable_replication: Option<DisableReplication>,
    pub refresh: bool,
    pub enable_failover_to_accounts: Vec<AccountIdentifier>,
    pub disable_failover: Option<DisableReplication>,
    pub primary: bool,
}

impl Validate for AlterDatabaseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterDatabaseOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "NewName",
                "SwapWith",
                "Set",
                "Unset",
                "SetTag",
                "UnsetTag",
                "EnableReplication",
                "DisableReplication",
                "Refresh",
                "EnableFailover",
                "DisableFailover",
                "Primary",
            ],
            &[
                &self.new_name,
                &self.swap_with,
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
                &self.enable_replication,
                &self.disable_replication,
                &flag(self.refresh),
                &self.enable_failover_to_accounts,
                &self.disable_failover,
                &flag(self.primary),
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("NewName", self.new_name.as_ref());
        errors.optional_identifier("SwapWith", self.swap_with.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        if let Some(enable) = &self.enable_replication {
            errors.check(!enable.to_accounts.is_empty(), || {
                Error::missing_required("AlterDatabaseOptions", "EnableReplication.ToAccounts")
            });
            errors.identifiers("EnableReplication.ToAccounts", &enable.to_accounts);
        }
        errors.identifiers("EnableFailover", &self.enable_failover_to_accounts);
        errors.finish()
    }
}

request! {
    AlterDatabaseRequest => AlterDatabaseOptions {
        flag if_exists,
        opt new_name: AccountObjectIdentifier,
        opt swap_with: AccountObjectIdentifier,
        val set: DatabaseSet,
        val unset: DatabaseUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
        val enable_replication: EnableReplication,
        val disable_replication: DisableReplication,
        flag refresh,
        vec enable_failover_to_accounts: AccountIdentifier,
        val disable_failover: DisableReplication,
        flag primary,
    }
}

impl AlterDatabaseRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterDatabaseOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropDatabaseOptions, DropDatabaseRequest, "DATABASE", AccountObjectIdentifier);

target_only!(UndropDatabaseOptions, "UNDROP DATABASE", AccountObjectIdentifier);
target_only!(DescribeDatabaseOptions, "DESCRIBE DATABASE", AccountObjectIdentifier);
target_only!(UseDatabaseOptions, "USE DATABASE", AccountObjectIdentifier);

show_objects!(ShowDatabaseOptions, ShowDatabaseRequest, "DATABASES" {
    flag terse,
    flag history,
    val like: Like,
    opt starts_with: String,
    val limit: LimitFrom,
});

/// One `SHOW DATABASES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: Option<String>,
    pub is_current: Option<String>,
    pub origin: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub options: Option<String>,
    pub retention_time: Option<String>,
    pub resource_group: Option<String>,
    pub dropped_on: Option<DateTime<Utc>>,
    pub kind: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for DatabaseRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            is_default: row.opt("is_default"),
            is_current: row.opt("is_current"),
            origin: row.opt("origin"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            options: row.opt("options"),
            retention_time: row.opt("retention_time"),
            resource_group: row.opt("resource_group"),
            dropped_on: row.opt_timestamp("dropped_on")?,
            kind: row.opt("kind"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Database {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub origin: String,
    pub owner: String,
    pub comment: String,
    pub transient: bool,
    pub retention_time: i64,
    pub resource_group: String,
    pub dropped_on: Option<DateTime<Utc>>,
    pub kind: String,
    pub owner_role_type: String,
}

impl From<DatabaseRow> for Database {
    fn from(row: DatabaseRow) -> Self {
        let transient = row
            .options
            .as_deref()
            .is_some_and(|options| options.to_ascii_uppercase().contains("TRANSIENT"));
        Self {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.as_deref().is_some_and(yes),
            is_current: row.is_current.as_deref().is_some_and(yes),
            origin: row.origin.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            transient,
            retention_time: row
                .retention_time
                .as_deref()
                .and_then(parse_token)
                .unwrap_or_default(),
            resource_group: row.resource_group.unwrap_or_default(),
            dropped_on: row.dropped_on,
            kind: row.kind.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl Database {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

/// One `DESCRIBE DATABASE` row: a child schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseDetailsRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: String,
}

impl FromRow for DatabaseDetailsRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            kind: row.get("kind")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseDetails {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: String,
}

impl From<DatabaseDetailsRow> for DatabaseDetails {
    fn from(row: DatabaseDetailsRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            kind: row.kind,
        }
    }
}

/// `SHOW PARAMETERS IN DATABASE <name>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowDatabaseParametersOptions {
    pub like: Option<Like>,
    pub name: AccountObjectIdentifier,
}

impl Validate for ShowDatabaseParametersOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowDatabaseParametersOptions");
        errors.like(self.like.as_ref());
        errors.identifier("name", &self.name);
        errors.finish()
    }
}

gateway!(Databases);

impl Databases<'_> {
    pub async fn create(&self, request: &CreateDatabaseRequest) -> Result<()> {
        self.client.exec("create database", &request.to_options()).await
    }

    pub async fn create_shared(&self, request: &CreateSharedDatabaseRequest) -> Result<()> {
        self.client
            .exec("create shared database", &request.to_options())
            .await
    }

    pub async fn create_secondary(&self, request: &CreateSecondaryDatabaseRequest) -> Result<()> {
        self.client
            .exec("create secondary database", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterDatabaseRequest) -> Result<()> {
        self.client.exec("alter database", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropDatabaseRequest) -> Result<()> {
        self.client.exec("drop database", &request.to_options()).await
    }

    pub async fn undrop(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .exec("undrop database", &UndropDatabaseOptions::new(id.clone()))
            .await
    }

    pub async fn show(&self, request: &ShowDatabaseRequest) -> Result<Vec<Database>> {
        self.client
            .query::<_, DatabaseRow, _>("show databases", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Database> {
        let request = ShowDatabaseRequest::new().with_like(Like::new(id.name()));
        find_by_id(self.show(&request).await?, "database", id, Database::id)
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<Vec<DatabaseDetails>> {
        self.client
            .query::<_, DatabaseDetailsRow, _>(
                "describe database",
                &DescribeDatabaseOptions::new(id.clone()),
            )
            .await
    }

    pub async fn show_parameters(
        &self,
        id: &AccountObjectIdentifier,
        like: Option<Like>,
    ) -> Result<Vec<Parameter>> {
        let options = ShowDatabaseParametersOptions {
            like,
            name: id.clone(),
        };
        self.client
            .query::<_, ParameterRow, _>("show database parameters", &options)
            .await
    }

    pub async fn use_database(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .exec("use database", &UseDatabaseOptions::new(id.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::identifiers::ObjectIdentifier;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("DB1")
    }

    #[test]
    fn test_retention_range() {
        let opts = CreateDatabaseRequest::new(id())
            .with_data_retention_time_in_days(91)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_shared_requires_share() {
        let share = ExternalObjectIdentifier::new(
            AccountIdentifier::new("ORG", "ACC"),
            ObjectIdentifier::Account(AccountObjectIdentifier::new("")),
        );
        let opts = CreateSharedDatabaseRequest::new(id(), share).to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::InvalidObjectIdentifier)
        );
    }

    #[test]
    fn test_alter_exactly_one() {
        assert_eq!(
            AlterDatabaseRequest::new(id())
                .to_options()
                .validate()
                .unwrap_err()
                .kind(),
            Some(ErrorKind::ExactlyOneOf)
        );
        let opts = AlterDatabaseRequest::new(id())
            .with_refresh(true)
            .with_primary(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        assert!(
            AlterDatabaseRequest::new(id())
                .with_refresh(true)
                .to_options()
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_enable_replication_needs_accounts() {
        let opts = AlterDatabaseRequest::new(id())
            .with_enable_replication(EnableReplication::default())
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_set_unset_need_a_field() {
        let opts = AlterDatabaseRequest::new(id())
            .with_set(DatabaseSet::default())
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::AtLeastOneOf));
        let opts = AlterDatabaseRequest::new(id())
            .with_unset(DatabaseUnset::default().with_comment(true))
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("created_on", Some("2024-01-02 03:04:05.000 +0000")),
            ("name", Some("DB1")),
            ("is_default", Some("N")),
            ("is_current", Some("Y")),
            ("options", Some("TRANSIENT")),
            ("retention_time", Some("1")),
            ("comment", None),
        ]);
        let database = Database::from(DatabaseRow::from_row(&row).unwrap());
        assert!(database.transient);
        assert!(database.is_current);
        assert_eq!(database.retention_time, 1);
        assert_eq!(database.comment, "");
        assert!(database.created_on.is_some());
        assert_eq!(database.id(), id());
    }
}
