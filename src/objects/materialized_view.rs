//! Materialized views.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::objects::table::{RowAccessPolicyOn, TableColumnDetails, TableColumnRow};
use crate::objects::view::ViewColumn;
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateMaterializedViewOptions {
    pub or_replace: bool,
    pub secure: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub copy_grants: bool,
    pub columns: Vec<ViewColumn>,
    pub comment: Option<String>,
    pub row_access_policy: Option<RowAccessPolicyOn>,
    pub tag: Vec<TagAssociation>,
    pub cluster_by: Vec<String>,
    pub query: String,
}

impl Validate for CreateMaterializedViewOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateMaterializedViewOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Query", &self.query);
        errors.nested_all(&self.columns);
        errors.check(
            self.columns
                .iter()
                .all(|column| column.projection_policy.is_none()),
            || {
                Error::invalid_value(
                    "CreateMaterializedViewOptions",
                    "Columns",
                    "projection policies are not supported on materialized views",
                )
            },
        );
        errors.nested(self.row_access_policy.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateMaterializedViewRequest => CreateMaterializedViewOptions {
        flag or_replace,
        flag secure,
        flag if_not_exists,
        flag copy_grants,
        vec columns: ViewColumn,
        opt comment: String,
        val row_access_policy: RowAccessPolicyOn,
        vec tag: TagAssociation,
        vec cluster_by: String,
    }
}

impl CreateMaterializedViewRequest {
    pub fn new(name: SchemaObjectIdentifier, query: impl Into<String>) -> Self {
        Self {
            options: CreateMaterializedViewOptions {
                name,
                query: query.into(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializedViewSet {
    pub secure: bool,
    pub comment: Option<String>,
}

setters!(MaterializedViewSet {
    flag secure,
    opt comment: String,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializedViewUnset {
    pub secure: bool,
    pub comment: bool,
}

setters!(MaterializedViewUnset {
    flag secure,
    flag comment,
});

impl Validate for MaterializedViewSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("MaterializedViewSet");
        errors.at_least_one_of(&["Secure", "Comment"], &[&flag(self.secure), &self.comment]);
        errors.finish()
    }
}

impl Validate for MaterializedViewUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("MaterializedViewUnset");
        errors.at_least_one_of(
            &["Secure", "Comment"],
            &[&flag(self.secure), &flag(self.comment)],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterMaterializedViewOptions {
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub cluster_by: Vec<String>,
    pub drop_clustering_key: bool,
    pub suspend_recluster: bool,
    pub resume_recluster: bool,
    pub suspend: bool,
    pub resume: bool,
    pub set: Option<MaterializedViewSet>,
    pub unset: Option<MaterializedViewUnset>,
}

impl Validate for AlterMaterializedViewOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterMaterializedViewOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "RenameTo",
                "ClusterBy",
                "DropClusteringKey",
                "SuspendRecluster",
                "ResumeRecluster",
                "Suspend",
                "Resume",
                "Set",
                "Unset",
            ],
            &[
                &self.rename_to,
                &self.cluster_by,
                &flag(self.drop_clustering_key),
                &flag(self.suspend_recluster),
                &flag(self.resume_recluster),
                &flag(self.suspend),
                &flag(self.resume),
                &self.set,
                &self.unset,
            ],
        );
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.finish()
    }
}

request! {
    AlterMaterializedViewRequest => AlterMaterializedViewOptions {
        opt rename_to: SchemaObjectIdentifier,
        vec cluster_by: String,
        flag drop_clustering_key,
        flag suspend_recluster,
        flag resume_recluster,
        flag suspend,
        flag resume,
        val set: MaterializedViewSet,
        val unset: MaterializedViewUnset,
    }
}

impl AlterMaterializedViewRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterMaterializedViewOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropMaterializedViewOptions,
    DropMaterializedViewRequest,
    "MATERIALIZED VIEW",
    SchemaObjectIdentifier
);

target_only!(
    DescribeMaterializedViewOptions,
    "DESCRIBE MATERIALIZED VIEW",
    SchemaObjectIdentifier
);

show_objects!(ShowMaterializedViewOptions, ShowMaterializedViewRequest, "MATERIALIZED VIEWS" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializedViewRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub reserved: Option<String>,
    pub database_name: String,
    pub schema_name: String,
    pub cluster_by: Option<String>,
    pub rows: Option<i64>,
    pub bytes: Option<i64>,
    pub source_database_name: Option<String>,
    pub source_schema_name: Option<String>,
    pub source_table_name: Option<String>,
    pub refreshed_on: Option<DateTime<Utc>>,
    pub compacted_on: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub invalid: Option<String>,
    pub invalid_reason: Option<String>,
    pub behind_by: Option<String>,
    pub comment: Option<String>,
    pub text: Option<String>,
    pub is_secure: Option<String>,
    pub automatic_clustering: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for MaterializedViewRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            reserved: row.opt("reserved"),
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            cluster_by: row.opt("cluster_by"),
            rows: row.opt_i64("rows")?,
            bytes: row.opt_i64("bytes")?,
            source_database_name: row.opt("source_database_name"),
            source_schema_name: row.opt("source_schema_name"),
            source_table_name: row.opt("source_table_name"),
            refreshed_on: row.opt_timestamp("refreshed_on")?,
            compacted_on: row.opt_timestamp("compacted_on")?,
            owner: row.opt("owner"),
            invalid: row.opt("invalid"),
            invalid_reason: row.opt("invalid_reason"),
            behind_by: row.opt("behind_by"),
            comment: row.opt("comment"),
            text: row.opt("text"),
            is_secure: row.opt("is_secure"),
            automatic_clustering: row.opt("automatic_clustering"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterializedView {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub cluster_by: String,
    pub rows: i64,
    pub bytes: i64,
    pub source_table: Option<SchemaObjectIdentifier>,
    pub refreshed_on: Option<DateTime<Utc>>,
    pub compacted_on: Option<DateTime<Utc>>,
    pub owner: String,
    pub invalid: bool,
    pub invalid_reason: String,
    pub behind_by: String,
    pub comment: String,
    pub text: String,
    pub is_secure: bool,
    pub automatic_clustering: bool,
    pub owner_role_type: String,
}

impl From<MaterializedViewRow> for MaterializedView {
    fn from(row: MaterializedViewRow) -> Self {
        let source_table = match (
            row.source_database_name,
            row.source_schema_name,
            row.source_table_name,
        ) {
            (Some(database), Some(schema), Some(table)) => {
                Some(SchemaObjectIdentifier::new(database, schema, table))
            }
            _ => None,
        };
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            cluster_by: row.cluster_by.unwrap_or_default(),
            rows: row.rows.unwrap_or_default(),
            bytes: row.bytes.unwrap_or_default(),
            source_table,
            refreshed_on: row.refreshed_on,
            compacted_on: row.compacted_on,
            owner: row.owner.unwrap_or_default(),
            invalid: row.invalid.as_deref().is_some_and(yes),
            invalid_reason: row.invalid_reason.unwrap_or_default(),
            behind_by: row.behind_by.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            text: row.text.unwrap_or_default(),
            is_secure: row.is_secure.as_deref().is_some_and(yes),
            automatic_clustering: row.automatic_clustering.as_deref().is_some_and(yes),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl MaterializedView {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

gateway!(MaterializedViews);

impl MaterializedViews<'_> {
    pub async fn create(&self, request: &CreateMaterializedViewRequest) -> Result<()> {
        self.client
            .exec("create materialized view", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterMaterializedViewRequest) -> Result<()> {
        self.client
            .exec("alter materialized view", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropMaterializedViewRequest) -> Result<()> {
        self.client
            .exec("drop materialized view", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowMaterializedViewRequest) -> Result<Vec<MaterializedView>> {
        self.client
            .query::<_, MaterializedViewRow, _>("show materialized views", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<MaterializedView> {
        let request = ShowMaterializedViewRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(
            self.show(&request).await?,
            "materialized view",
            id,
            MaterializedView::id,
        )
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<TableColumnDetails>> {
        self.client
            .query::<_, TableColumnRow, _>(
                "describe materialized view",
                &DescribeMaterializedViewOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "MV")
    }

    #[test]
    fn test_projection_policy_rejected() {
        let opts = CreateMaterializedViewRequest::new(id(), "SELECT 1 AS A")
            .with_columns([ViewColumn::new("A")
                .with_projection_policy(SchemaObjectIdentifier::new("DB", "S", "PP"))])
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_exactly_one() {
        let opts = AlterMaterializedViewRequest::new(id())
            .with_suspend(true)
            .with_resume(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_row_source_table() {
        let row = Row::new([
            ("name", Some("MV")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("source_database_name", Some("DB")),
            ("source_schema_name", Some("S")),
            ("source_table_name", Some("T")),
            ("invalid", Some("false")),
        ]);
        let view = MaterializedView::from(MaterializedViewRow::from_row(&row).unwrap());
        assert_eq!(
            view.source_table,
            Some(SchemaObjectIdentifier::new("DB", "S", "T"))
        );
        assert!(!view.invalid);
    }
}
