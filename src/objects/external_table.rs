//! External tables over staged files, with partition maintenance.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, LimitFrom, Like, PropertyDetail, PropertyRow, TagAssociation};
use crate::datatypes::DataType;
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::objects::file_format::{FileFormatType, StageFileFormat};
use crate::objects::table::{RowAccessPolicyOn, TableColumnDetails, TableColumnRow};
use crate::validation::{Errors, Validate, flag};

/// A virtual column computed from the staged record, `<name> <type> AS (<expr>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalTableColumn {
    pub name: String,
    pub data_type: DataType,
    pub as_expression: String,
    pub not_null: bool,
}

impl ExternalTableColumn {
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<DataType>,
        as_expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            as_expression: as_expression.into(),
            not_null: false,
        }
    }
}

setters!(ExternalTableColumn {
    flag not_null,
});

impl Validate for ExternalTableColumn {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ExternalTableColumn");
        errors.required("Name", &self.name);
        errors.required("AsExpression", &self.as_expression);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateExternalTableOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub columns: Vec<ExternalTableColumn>,
    pub cloud_provider_params: Option<AccountObjectIdentifier>,
    pub partition_by: Vec<String>,
    pub location: String,
    pub refresh_on_create: Option<bool>,
    pub auto_refresh: Option<bool>,
    pub pattern: Option<String>,
    pub file_format: Option<StageFileFormat>,
    pub aws_sns_topic: Option<String>,
    pub user_specified_partitions: bool,
    pub delta_table_format: bool,
    pub copy_grants: bool,
    pub comment: Option<String>,
    pub row_access_policy: Option<RowAccessPolicyOn>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateExternalTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateExternalTableOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Location", &self.location);
        errors.required("FileFormat", &self.file_format);
        errors.nested_all(&self.columns);
        errors.check(
            !self.user_specified_partitions || self.auto_refresh != Some(true),
            || {
                Error::invalid_value(
                    "CreateExternalTableOptions",
                    "AutoRefresh",
                    "user-specified partitions cannot be refreshed automatically",
                )
            },
        );
        errors.at_most_one_of(
            &["UserSpecifiedPartitions", "DeltaTableFormat"],
            &[
                &flag(self.user_specified_partitions),
                &flag(self.delta_table_format),
            ],
        );
        errors.nested(self.file_format.as_ref());
        errors.nested(self.row_access_policy.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateExternalTableRequest => CreateExternalTableOptions {
        flag or_replace,
        flag if_not_exists,
        vec columns: ExternalTableColumn,
        opt cloud_provider_params: AccountObjectIdentifier,
        vec partition_by: String,
        val refresh_on_create: bool,
        val auto_refresh: bool,
        opt pattern: String,
        opt aws_sns_topic: String,
        flag user_specified_partitions,
        flag delta_table_format,
        flag copy_grants,
        opt comment: String,
        val row_access_policy: RowAccessPolicyOn,
        vec tag: TagAssociation,
    }
}

impl CreateExternalTableRequest {
    /// `location` is a stage path such as `@db.s.stage/path/`.
    pub fn new(
        name: SchemaObjectIdentifier,
        location: impl Into<String>,
        file_format: StageFileFormat,
    ) -> Self {
        Self {
            options: CreateExternalTableOptions {
                name,
                location: location.into(),
                file_format: Some(file_format),
                ..Default::default()
            },
        }
    }
}

/// `CREATE EXTERNAL TABLE ... USING TEMPLATE (<query>)`: columns inferred
/// from the staged files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateExternalTableUsingTemplateOptions {
    pub or_replace: bool,
    pub name: SchemaObjectIdentifier,
    pub copy_grants: bool,
    pub query: String,
    pub partition_by: Vec<String>,
    pub location: String,
    pub refresh_on_create: Option<bool>,
    pub auto_refresh: Option<bool>,
    pub pattern: Option<String>,
    pub file_format: Option<StageFileFormat>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateExternalTableUsingTemplateOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateExternalTableUsingTemplateOptions");
        errors.identifier("name", &self.name);
        errors.required("Query", &self.query);
        errors.required("Location", &self.location);
        errors.required("FileFormat", &self.file_format);
        errors.nested(self.file_format.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateExternalTableUsingTemplateRequest => CreateExternalTableUsingTemplateOptions {
        flag or_replace,
        flag copy_grants,
        vec partition_by: String,
        val refresh_on_create: bool,
        val auto_refresh: bool,
        opt pattern: String,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateExternalTableUsingTemplateRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        query: impl Into<String>,
        location: impl Into<String>,
        file_format: StageFileFormat,
    ) -> Self {
        Self {
            options: CreateExternalTableUsingTemplateOptions {
                name,
                query: query.into(),
                location: location.into(),
                file_format: Some(file_format),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalTableRefresh {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterExternalTableOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub refresh: Option<ExternalTableRefresh>,
    pub add_files: Vec<String>,
    pub remove_files: Vec<String>,
    pub set_auto_refresh: Option<bool>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterExternalTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterExternalTableOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "Refresh",
                "AddFiles",
                "RemoveFiles",
                "SetAutoRefresh",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &self.refresh,
                &self.add_files,
                &self.remove_files,
                &self.set_auto_refresh,
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.tags(&self.set_tag);
        errors.finish()
    }
}

request! {
    AlterExternalTableRequest => AlterExternalTableOptions {
        flag if_exists,
        val refresh: ExternalTableRefresh,
        vec add_files: String,
        vec remove_files: String,
        val set_auto_refresh: bool,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterExternalTableRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterExternalTableOptions {
                name,
                ..Default::default()
            },
        }
    }
}

/// `<column> = '<value>'` in a user-specified partition.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionValue {
    pub column: String,
    pub value: String,
}

impl PartitionValue {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Partition maintenance on tables created with user-specified partitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterExternalTablePartitionOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub add_partitions: Vec<PartitionValue>,
    pub drop_partition: bool,
    pub location: String,
}

impl Validate for AlterExternalTablePartitionOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterExternalTablePartitionOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["AddPartitions", "DropPartition"],
            &[&self.add_partitions, &flag(self.drop_partition)],
        );
        errors.required("Location", &self.location);
        errors.finish()
    }
}

request! {
    AlterExternalTablePartitionRequest => AlterExternalTablePartitionOptions {
        flag if_exists,
        vec add_partitions: PartitionValue,
        flag drop_partition,
    }
}

impl AlterExternalTablePartitionRequest {
    pub fn new(name: SchemaObjectIdentifier, location: impl Into<String>) -> Self {
        Self {
            options: AlterExternalTablePartitionOptions {
                name,
                location: location.into(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropExternalTableOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub cascade: bool,
    pub restrict: bool,
}

impl Validate for DropExternalTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DropExternalTableOptions");
        errors.identifier("name", &self.name);
        errors.at_most_one_of(
            &["Cascade", "Restrict"],
            &[&flag(self.cascade), &flag(self.restrict)],
        );
        errors.finish()
    }
}

request! {
    DropExternalTableRequest => DropExternalTableOptions {
        flag if_exists,
        flag cascade,
        flag restrict,
    }
}

impl DropExternalTableRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: DropExternalTableOptions {
                name,
                ..Default::default()
            },
        }
    }
}

/// `DESCRIBE EXTERNAL TABLE ... TYPE = COLUMNS | STAGE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeExternalTableOptions {
    pub name: SchemaObjectIdentifier,
    pub stage: bool,
}

impl Validate for DescribeExternalTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DescribeExternalTableOptions");
        errors.identifier("name", &self.name);
        errors.finish()
    }
}

show_objects!(ShowExternalTableOptions, ShowExternalTableRequest, "EXTERNAL TABLES" {
    flag terse,
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalTableRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub invalid: Option<String>,
    pub invalid_reason: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub stage: Option<String>,
    pub location: Option<String>,
    pub file_format_name: Option<String>,
    pub file_format_type: Option<String>,
    pub cloud: Option<String>,
    pub region: Option<String>,
    pub notification_channel: Option<String>,
    pub last_refreshed_on: Option<DateTime<Utc>>,
    pub table_format: Option<String>,
    pub last_refresh_details: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for ExternalTableRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            invalid: row.opt("invalid"),
            invalid_reason: row.opt("invalid_reason"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            stage: row.opt("stage"),
            location: row.opt("location"),
            file_format_name: row.opt("file_format_name"),
            file_format_type: row.opt("file_format_type"),
            cloud: row.opt("cloud"),
            region: row.opt("region"),
            notification_channel: row.opt("notification_channel"),
            last_refreshed_on: row.opt_timestamp("last_refreshed_on")?,
            table_format: row.opt("table_format"),
            last_refresh_details: row.opt("last_refresh_details"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalTable {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub invalid: bool,
    pub invalid_reason: String,
    pub owner: String,
    pub comment: String,
    pub stage: String,
    pub location: String,
    pub file_format_name: String,
    pub file_format_type: Option<FileFormatType>,
    pub cloud: String,
    pub region: String,
    pub notification_channel: String,
    pub last_refreshed_on: Option<DateTime<Utc>>,
    pub table_format: String,
    pub last_refresh_details: String,
    pub owner_role_type: String,
}

impl From<ExternalTableRow> for ExternalTable {
    fn from(row: ExternalTableRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            invalid: row.invalid.as_deref().is_some_and(yes),
            invalid_reason: row.invalid_reason.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            stage: row.stage.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            file_format_name: row.file_format_name.unwrap_or_default(),
            file_format_type: row.file_format_type.as_deref().and_then(parse_token),
            cloud: row.cloud.unwrap_or_default(),
            region: row.region.unwrap_or_default(),
            notification_channel: row.notification_channel.unwrap_or_default(),
            last_refreshed_on: row.last_refreshed_on,
            table_format: row.table_format.unwrap_or_default(),
            last_refresh_details: row.last_refresh_details.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl ExternalTable {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

gateway!(ExternalTables);

impl ExternalTables<'_> {
    pub async fn create(&self, request: &CreateExternalTableRequest) -> Result<()> {
        self.client
            .exec("create external table", &request.to_options())
            .await
    }

    pub async fn create_using_template(
        &self,
        request: &CreateExternalTableUsingTemplateRequest,
    ) -> Result<()> {
        self.client
            .exec("create external table using template", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterExternalTableRequest) -> Result<()> {
        self.client
            .exec("alter external table", &request.to_options())
            .await
    }

    pub async fn alter_partitions(&self, request: &AlterExternalTablePartitionRequest) -> Result<()> {
        self.client
            .exec("alter external table partitions", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropExternalTableRequest) -> Result<()> {
        self.client
            .exec("drop external table", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowExternalTableRequest) -> Result<Vec<ExternalTable>> {
        self.client
            .query::<_, ExternalTableRow, _>("show external tables", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<ExternalTable> {
        let request = ShowExternalTableRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(
            self.show(&request).await?,
            "external table",
            id,
            ExternalTable::id,
        )
    }

    pub async fn describe_columns(
        &self,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<TableColumnDetails>> {
        let options = DescribeExternalTableOptions {
            name: id.clone(),
            stage: false,
        };
        self.client
            .query::<_, TableColumnRow, _>("describe external table columns", &options)
            .await
    }

    pub async fn describe_stage(&self, id: &SchemaObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        let options = DescribeExternalTableOptions {
            name: id.clone(),
            stage: true,
        };
        self.client
            .query::<_, PropertyRow, _>("describe external table stage", &options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "EXT")
    }

    fn format() -> StageFileFormat {
        StageFileFormat::Named(SchemaObjectIdentifier::new("DB", "S", "FF"))
    }

    #[test]
    fn test_create_valid() {
        let opts = CreateExternalTableRequest::new(id(), "@DB.S.STG/", format())
            .with_columns([ExternalTableColumn::new("C1", "VARCHAR", "value:c1::varchar")])
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_user_partitions_forbid_auto_refresh() {
        let opts = CreateExternalTableRequest::new(id(), "@DB.S.STG/", format())
            .with_user_specified_partitions(true)
            .with_auto_refresh(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_partition_action_exactly_one() {
        let opts = AlterExternalTablePartitionRequest::new(id(), "2024/01")
            .with_add_partitions([PartitionValue::new("P", "1")])
            .with_drop_partition(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_drop_cascade_restrict() {
        let opts = DropExternalTableRequest::new(id())
            .with_cascade(true)
            .with_restrict(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_row_conversion() {
        let row = Row::new([
            ("name", Some("EXT")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("invalid", Some("false")),
            ("file_format_type", Some("PARQUET")),
        ]);
        let table = ExternalTable::from(ExternalTableRow::from_row(&row).unwrap());
        assert_eq!(table.file_format_type, Some(FileFormatType::Parquet));
        assert!(!table.invalid);
    }
}
