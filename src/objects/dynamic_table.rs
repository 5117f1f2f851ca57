//! Dynamic tables: query-defined tables refreshed towards a target lag.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{In, LimitFrom, Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::objects::table::{RowAccessPolicyOn, TableColumnDetails, TableColumnRow};
use crate::validation::{Errors, Validate, flag};

/// Freshness target: a literal interval or `DOWNSTREAM`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum TargetLag {
    Lagging(String),
    #[default]
    Downstream,
}

impl TargetLag {
    pub fn lagging(interval: impl Into<String>) -> Self {
        TargetLag::Lagging(interval.into())
    }

    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("DOWNSTREAM") {
            TargetLag::Downstream
        } else {
            TargetLag::Lagging(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum DynamicTableRefreshMode {
    #[strum(serialize = "AUTO")]
    Auto,
    #[strum(serialize = "FULL")]
    Full,
    #[strum(serialize = "INCREMENTAL")]
    Incremental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum DynamicTableInitialize {
    #[strum(serialize = "ON_CREATE")]
    OnCreate,
    #[strum(serialize = "ON_SCHEDULE")]
    OnSchedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum DynamicTableSchedulingState {
    #[strum(serialize = "ACTIVE", serialize = "RUNNING")]
    Active,
    #[strum(serialize = "SUSPENDED")]
    Suspended,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateDynamicTableOptions {
    pub or_replace: bool,
    pub transient: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub target_lag: TargetLag,
    pub refresh_mode: Option<DynamicTableRefreshMode>,
    pub initialize: Option<DynamicTableInitialize>,
    pub warehouse: AccountObjectIdentifier,
    pub cluster_by: Vec<String>,
    pub data_retention_time_in_days: Option<u32>,
    pub max_data_extension_time_in_days: Option<u32>,
    pub comment: Option<String>,
    pub row_access_policy: Option<RowAccessPolicyOn>,
    pub tag: Vec<TagAssociation>,
    pub query: String,
}

impl Validate for CreateDynamicTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateDynamicTableOptions");
        errors.identifier("name", &self.name);
        errors.identifier("Warehouse", &self.warehouse);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Query", &self.query);
        if let TargetLag::Lagging(interval) = &self.target_lag {
            errors.check(!interval.trim().is_empty(), || {
                Error::missing_required("CreateDynamicTableOptions", "TargetLag")
            });
        }
        errors.range(
            "DataRetentionTimeInDays",
            self.data_retention_time_in_days.map(i64::from),
            0,
            90,
        );
        errors.nested(self.row_access_policy.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateDynamicTableRequest => CreateDynamicTableOptions {
        flag or_replace,
        flag transient,
        flag if_not_exists,
        val refresh_mode: DynamicTableRefreshMode,
        val initialize: DynamicTableInitialize,
        vec cluster_by: String,
        val data_retention_time_in_days: u32,
        val max_data_extension_time_in_days: u32,
        opt comment: String,
        val row_access_policy: RowAccessPolicyOn,
        vec tag: TagAssociation,
    }
}

impl CreateDynamicTableRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        warehouse: AccountObjectIdentifier,
        target_lag: TargetLag,
        query: impl Into<String>,
    ) -> Self {
        Self {
            options: CreateDynamicTableOptions {
                name,
                warehouse,
                target_lag,
                query: query.into(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicTableSet {
    pub target_lag: Option<TargetLag>,
    pub warehouse: Option<AccountObjectIdentifier>,
    pub data_retention_time_in_days: Option<u32>,
    pub max_data_extension_time_in_days: Option<u32>,
    pub comment: Option<String>,
}

setters!(DynamicTableSet {
    val target_lag: TargetLag,
    opt warehouse: AccountObjectIdentifier,
    val data_retention_time_in_days: u32,
    val max_data_extension_time_in_days: u32,
    opt comment: String,
});

impl Validate for DynamicTableSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DynamicTableSet");
        errors.at_least_one_of(
            &[
                "TargetLag",
                "Warehouse",
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "Comment",
            ],
            &[
                &self.target_lag,
                &self.warehouse,
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.comment,
            ],
        );
        errors.optional_identifier("Warehouse", self.warehouse.as_ref());
        errors.range(
            "DataRetentionTimeInDays",
            self.data_retention_time_in_days.map(i64::from),
            0,
            90,
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicTableUnset {
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub comment: bool,
}

setters!(DynamicTableUnset {
    flag data_retention_time_in_days,
    flag max_data_extension_time_in_days,
    flag comment,
});

impl DynamicTableUnset {
    pub(crate) fn properties(&self) -> [(bool, &'static str); 3] {
        [
            (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
            (
                self.max_data_extension_time_in_days,
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
            ),
            (self.comment, "COMMENT"),
        ]
    }
}

impl Validate for DynamicTableUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DynamicTableUnset");
        errors.check(self.properties().iter().any(|(on, _)| *on), || {
            Error::at_least_one_of(
                "DynamicTableUnset",
                &["DataRetentionTimeInDays", "MaxDataExtensionTimeInDays", "Comment"],
            )
        });
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterDynamicTableOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub suspend: bool,
    pub resume: bool,
    pub refresh: bool,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub swap_with: Option<SchemaObjectIdentifier>,
    pub cluster_by: Vec<String>,
    pub drop_clustering_key: bool,
    pub set: Option<DynamicTableSet>,
    pub unset: Option<DynamicTableUnset>,
}

impl Validate for AlterDynamicTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterDynamicTableOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "Suspend",
                "Resume",
                "Refresh",
                "RenameTo",
                "SwapWith",
                "ClusterBy",
                "DropClusteringKey",
                "Set",
                "Unset",
            ],
            &[
                &flag(self.suspend),
                &flag(self.resume),
                &flag(self.refresh),
                &self.rename_to,
                &self.swap_with,
                &self.cluster_by,
                &flag(self.drop_clustering_key),
                &self.set,
                &self.unset,
            ],
        );
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.optional_identifier("SwapWith", self.swap_with.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.finish()
    }
}

request! {
    AlterDynamicTableRequest => AlterDynamicTableOptions {
        flag if_exists,
        flag suspend,
        flag resume,
        flag refresh,
        opt rename_to: SchemaObjectIdentifier,
        opt swap_with: SchemaObjectIdentifier,
        vec cluster_by: String,
        flag drop_clustering_key,
        val set: DynamicTableSet,
        val unset: DynamicTableUnset,
    }
}

impl AlterDynamicTableRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterDynamicTableOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropDynamicTableOptions,
    DropDynamicTableRequest,
    "DYNAMIC TABLE",
    SchemaObjectIdentifier
);

target_only!(UndropDynamicTableOptions, "UNDROP DYNAMIC TABLE", SchemaObjectIdentifier);
target_only!(
    DescribeDynamicTableOptions,
    "DESCRIBE DYNAMIC TABLE",
    SchemaObjectIdentifier
);

show_objects!(ShowDynamicTableOptions, ShowDynamicTableRequest, "DYNAMIC TABLES" {
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicTableRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub cluster_by: Option<String>,
    pub rows: Option<i64>,
    pub bytes: Option<i64>,
    pub owner: Option<String>,
    pub target_lag: Option<String>,
    pub refresh_mode: Option<String>,
    pub refresh_mode_reason: Option<String>,
    pub warehouse: Option<String>,
    pub comment: Option<String>,
    pub text: Option<String>,
    pub automatic_clustering: Option<String>,
    pub scheduling_state: Option<String>,
    pub last_suspended_on: Option<DateTime<Utc>>,
    pub is_clone: Option<bool>,
    pub is_replica: Option<bool>,
    pub data_timestamp: Option<DateTime<Utc>>,
    pub owner_role_type: Option<String>,
}

impl FromRow for DynamicTableRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            cluster_by: row.opt("cluster_by"),
            rows: row.opt_i64("rows")?,
            bytes: row.opt_i64("bytes")?,
            owner: row.opt("owner"),
            target_lag: row.opt("target_lag"),
            refresh_mode: row.opt("refresh_mode"),
            refresh_mode_reason: row.opt("refresh_mode_reason"),
            warehouse: row.opt("warehouse"),
            comment: row.opt("comment"),
            text: row.opt("text"),
            automatic_clustering: row.opt("automatic_clustering"),
            scheduling_state: row.opt("scheduling_state"),
            last_suspended_on: row.opt_timestamp("last_suspended_on")?,
            is_clone: row.opt_bool("is_clone")?,
            is_replica: row.opt_bool("is_replica")?,
            data_timestamp: row.opt_timestamp("data_timestamp")?,
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicTable {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub cluster_by: String,
    pub rows: i64,
    pub bytes: i64,
    pub owner: String,
    pub target_lag: TargetLag,
    pub refresh_mode: Option<DynamicTableRefreshMode>,
    pub refresh_mode_reason: String,
    pub warehouse: String,
    pub comment: String,
    pub text: String,
    pub automatic_clustering: bool,
    pub scheduling_state: Option<DynamicTableSchedulingState>,
    pub last_suspended_on: Option<DateTime<Utc>>,
    pub is_clone: bool,
    pub is_replica: bool,
    pub data_timestamp: Option<DateTime<Utc>>,
    pub owner_role_type: String,
}

impl From<DynamicTableRow> for DynamicTable {
    fn from(row: DynamicTableRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            cluster_by: row.cluster_by.unwrap_or_default(),
            rows: row.rows.unwrap_or_default(),
            bytes: row.bytes.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            target_lag: row
                .target_lag
                .as_deref()
                .map(TargetLag::parse)
                .unwrap_or_default(),
            refresh_mode: row.refresh_mode.as_deref().and_then(parse_token),
            refresh_mode_reason: row.refresh_mode_reason.unwrap_or_default(),
            warehouse: row.warehouse.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            text: row.text.unwrap_or_default(),
            automatic_clustering: row.automatic_clustering.as_deref().is_some_and(yes),
            scheduling_state: row.scheduling_state.as_deref().and_then(parse_token),
            last_suspended_on: row.last_suspended_on,
            is_clone: row.is_clone.unwrap_or_default(),
            is_replica: row.is_replica.unwrap_or_default(),
            data_timestamp: row.data_timestamp,
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl DynamicTable {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

gateway!(DynamicTables);

impl DynamicTables<'_> {
    pub async fn create(&self, request: &CreateDynamicTableRequest) -> Result<()> {
        self.client
            .exec("create dynamic table", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterDynamicTableRequest) -> Result<()> {
        self.client
            .exec("alter dynamic table", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropDynamicTableRequest) -> Result<()> {
        self.client
            .exec("drop dynamic table", &request.to_options())
            .await
    }

    pub async fn undrop(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        self.client
            .exec("undrop dynamic table", &UndropDynamicTableOptions::new(id.clone()))
            .await
    }

    pub async fn show(&self, request: &ShowDynamicTableRequest) -> Result<Vec<DynamicTable>> {
        self.client
            .query::<_, DynamicTableRow, _>("show dynamic tables", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<DynamicTable> {
        let request = ShowDynamicTableRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(
            self.show(&request).await?,
            "dynamic table",
            id,
            DynamicTable::id,
        )
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<TableColumnDetails>> {
        self.client
            .query::<_, TableColumnRow, _>(
                "describe dynamic table",
                &DescribeDynamicTableOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    fn request() -> CreateDynamicTableRequest {
        CreateDynamicTableRequest::new(
            SchemaObjectIdentifier::new("DB", "S", "DT"),
            AccountObjectIdentifier::new("WH"),
            TargetLag::lagging("1 minute"),
            "SELECT * FROM T",
        )
    }

    #[test]
    fn test_create_valid() {
        assert!(request().to_options().validate().is_ok());
    }

    #[test]
    fn test_empty_lag_rejected() {
        let mut opts = request().to_options();
        opts.target_lag = TargetLag::lagging(" ");
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_retention_range() {
        let opts = request().with_data_retention_time_in_days(91).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[rstest]
    #[case(AlterDynamicTableRequest::new(SchemaObjectIdentifier::new("DB", "S", "DT")), false)]
    #[case(
        AlterDynamicTableRequest::new(SchemaObjectIdentifier::new("DB", "S", "DT")).with_refresh(true),
        true
    )]
    #[case(
        AlterDynamicTableRequest::new(SchemaObjectIdentifier::new("DB", "S", "DT"))
            .with_suspend(true)
            .with_resume(true),
        false
    )]
    fn test_alter_exactly_one(#[case] request: AlterDynamicTableRequest, #[case] valid: bool) {
        assert_eq!(request.to_options().validate().is_ok(), valid);
    }

    #[test]
    fn test_unset_requires_property() {
        let opts = AlterDynamicTableRequest::new(SchemaObjectIdentifier::new("DB", "S", "DT"))
            .with_unset(DynamicTableUnset::default())
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::AtLeastOneOf));
    }

    #[test]
    fn test_row_conversion() {
        let row = Row::new([
            ("name", Some("DT")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("target_lag", Some("DOWNSTREAM")),
            ("refresh_mode", Some("INCREMENTAL")),
            ("scheduling_state", Some("RUNNING")),
            ("is_clone", Some("false")),
        ]);
        let table = DynamicTable::from(DynamicTableRow::from_row(&row).unwrap());
        assert_eq!(table.target_lag, TargetLag::Downstream);
        assert_eq!(table.refresh_mode, Some(DynamicTableRefreshMode::Incremental));
        assert_eq!(table.scheduling_state, Some(DynamicTableSchedulingState::Active));
        assert_eq!(table.id(), SchemaObjectIdentifier::new("DB", "S", "DT"));
    }
}
