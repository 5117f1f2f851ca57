//! Event tables. Columns are fixed by the server, so creation only carries
//! storage properties.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, LimitFrom, Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::objects::table::{RowAccessPolicyOn, TableColumnDetails, TableColumnRow};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateEventTableOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub cluster_by: Vec<String>,
    pub data_retention_time_in_days: Option<u32>,
    pub max_data_extension_time_in_days: Option<u32>,
    pub change_tracking: Option<bool>,
    pub default_ddl_collation: Option<String>,
    pub copy_grants: bool,
    pub comment: Option<String>,
    pub row_access_policy: Option<RowAccessPolicyOn>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateEventTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateEventTableOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
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
    CreateEventTableRequest => CreateEventTableOptions {
        flag or_replace,
        flag if_not_exists,
        vec cluster_by: String,
        val data_retention_time_in_days: u32,
        val max_data_extension_time_in_days: u32,
        val change_tracking: bool,
        opt default_ddl_collation: String,
        flag copy_grants,
        opt comment: String,
        val row_access_policy: RowAccessPolicyOn,
        vec tag: TagAssociation,
    }
}

impl CreateEventTableRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: CreateEventTableOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTableSet {
    pub data_retention_time_in_days: Option<u32>,
    pub max_data_extension_time_in_days: Option<u32>,
    pub change_tracking: Option<bool>,
    pub comment: Option<String>,
}

setters!(EventTableSet {
    val data_retention_time_in_days: u32,
    val max_data_extension_time_in_days: u32,
    val change_tracking: bool,
    opt comment: String,
});

impl Validate for EventTableSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("EventTableSet");
        errors.at_least_one_of(
            &[
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "ChangeTracking",
                "Comment",
            ],
            &[
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.change_tracking,
                &self.comment,
            ],
        );
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
pub struct EventTableUnset {
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub change_tracking: bool,
    pub comment: bool,
}

setters!(EventTableUnset {
    flag data_retention_time_in_days,
    flag max_data_extension_time_in_days,
    flag change_tracking,
    flag comment,
});

impl EventTableUnset {
    pub(crate) fn properties(&self) -> [(bool, &'static str); 4] {
        [
            (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
            (
                self.max_data_extension_time_in_days,
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
            ),
            (self.change_tracking, "CHANGE_TRACKING"),
            (self.comment, "COMMENT"),
        ]
    }
}

impl Validate for EventTableUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("EventTableUnset");
        errors.check(self.properties().iter().any(|(on, _)| *on), || {
            Error::at_least_one_of(
                "EventTableUnset",
                &[
                    "DataRetentionTimeInDays",
                    "MaxDataExtensionTimeInDays",
                    "ChangeTracking",
                    "Comment",
                ],
            )
        });
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterEventTableOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<EventTableSet>,
    pub unset: Option<EventTableUnset>,
    pub add_row_access_policy: Option<RowAccessPolicyOn>,
    pub drop_row_access_policy: Option<SchemaObjectIdentifier>,
    pub drop_all_row_access_policies: bool,
    pub cluster_by: Vec<String>,
    pub drop_clustering_key: bool,
    pub suspend_recluster: bool,
    pub resume_recluster: bool,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterEventTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterEventTableOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "RenameTo",
                "Set",
                "Unset",
                "AddRowAccessPolicy",
                "DropRowAccessPolicy",
                "DropAllRowAccessPolicies",
                "ClusterBy",
                "DropClusteringKey",
                "SuspendRecluster",
                "ResumeRecluster",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &self.rename_to,
                &self.set,
                &self.unset,
                &self.add_row_access_policy,
                &self.drop_row_access_policy,
                &flag(self.drop_all_row_access_policies),
                &self.cluster_by,
                &flag(self.drop_clustering_key),
                &flag(self.suspend_recluster),
                &flag(self.resume_recluster),
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.optional_identifier("DropRowAccessPolicy", self.drop_row_access_policy.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.nested(self.add_row_access_policy.as_ref());
        errors.tags(&self.set_tag);
        errors.finish()
    }
}

request! {
    AlterEventTableRequest => AlterEventTableOptions {
        flag if_exists,
        opt rename_to: SchemaObjectIdentifier,
        val set: EventTableSet,
        val unset: EventTableUnset,
        val add_row_access_policy: RowAccessPolicyOn,
        opt drop_row_access_policy: SchemaObjectIdentifier,
        flag drop_all_row_access_policies,
        vec cluster_by: String,
        flag drop_clustering_key,
        flag suspend_recluster,
        flag resume_recluster,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterEventTableRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterEventTableOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropEventTableOptions,
    DropEventTableRequest,
    "TABLE",
    SchemaObjectIdentifier
);

target_only!(DescribeEventTableOptions, "DESCRIBE EVENT TABLE", SchemaObjectIdentifier);

show_objects!(ShowEventTableOptions, ShowEventTableRequest, "EVENT TABLES" {
    flag terse,
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTableRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for EventTableRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTable {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: String,
    pub owner_role_type: String,
}

impl From<EventTableRow> for EventTable {
    fn from(row: EventTableRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl EventTable {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

gateway!(EventTables);

impl EventTables<'_> {
    pub async fn create(&self, request: &CreateEventTableRequest) -> Result<()> {
        self.client
            .exec("create event table", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterEventTableRequest) -> Result<()> {
        self.client
            .exec("alter event table", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropEventTableRequest) -> Result<()> {
        self.client
            .exec("drop event table", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowEventTableRequest) -> Result<Vec<EventTable>> {
        self.client
            .query::<_, EventTableRow, _>("show event tables", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<EventTable> {
        let request = ShowEventTableRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "event table", id, EventTable::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<TableColumnDetails>> {
        self.client
            .query::<_, TableColumnRow, _>(
                "describe event table",
                &DescribeEventTableOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "EVENTS")
    }

    #[test]
    fn test_create_conflicting_flags() {
        let opts = CreateEventTableRequest::new(id())
            .with_or_replace(true)
            .with_if_not_exists(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_alter_if_exists_with_unset_tag() {
        let opts = AlterEventTableRequest::new(id())
            .with_if_exists(true)
            .with_unset_tag([SchemaObjectIdentifier::new("DB", "S", "T")])
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_alter_requires_action() {
        let opts = AlterEventTableRequest::new(id()).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }
}
