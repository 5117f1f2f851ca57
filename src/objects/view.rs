//! Views and their column-level policies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, Like, LimitFrom, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::objects::table::{ColumnMaskingPolicy, RowAccessPolicyOn, TableColumnDetails, TableColumnRow};
use crate::validation::{Errors, Validate, flag};

/// Explicit column of a view or materialized view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewColumn {
    pub name: String,
    pub masking_policy: Option<ColumnMaskingPolicy>,
    pub projection_policy: Option<SchemaObjectIdentifier>,
    pub tag: Vec<TagAssociation>,
    pub comment: Option<String>,
}

impl ViewColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

setters!(ViewColumn {
    val masking_policy: ColumnMaskingPolicy,
    opt projection_policy: SchemaObjectIdentifier,
    vec tag: TagAssociation,
    opt comment: String,
});

impl Validate for ViewColumn {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ViewColumn");
        errors.required("Name", &self.name);
        if let Some(policy) = &self.masking_policy {
            errors.identifier("MaskingPolicy", &policy.policy);
        }
        errors.optional_identifier("ProjectionPolicy", self.projection_policy.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

/// `AGGREGATION POLICY <policy> [ENTITY KEY (<columns>)] [FORCE]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewAggregationPolicy {
    pub policy: SchemaObjectIdentifier,
    pub entity_key: Vec<String>,
    pub force: bool,
}

impl ViewAggregationPolicy {
    pub fn new(policy: SchemaObjectIdentifier) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateViewOptions {
    pub or_replace: bool,
    pub secure: bool,
    pub temporary: bool,
    pub recursive: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub columns: Vec<ViewColumn>,
    pub copy_grants: bool,
    pub comment: Option<String>,
    pub row_access_policy: Option<RowAccessPolicyOn>,
    pub aggregation_policy: Option<ViewAggregationPolicy>,
    pub tag: Vec<TagAssociation>,
    pub query: String,
}

impl Validate for CreateViewOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateViewOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Query", &self.query);
        errors.check(!self.copy_grants || self.or_replace, || {
            Error::invalid_value("CreateViewOptions", "CopyGrants", "requires OrReplace")
        });
        errors.nested_all(&self.columns);
        errors.nested(self.row_access_policy.as_ref());
        if let Some(policy) = &self.aggregation_policy {
            errors.identifier("AggregationPolicy", &policy.policy);
        }
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateViewRequest => CreateViewOptions {
        flag or_replace,
        flag secure,
        flag temporary,
        flag recursive,
        flag if_not_exists,
        vec columns: ViewColumn,
        flag copy_grants,
        opt comment: String,
        val row_access_policy: RowAccessPolicyOn,
        val aggregation_policy: ViewAggregationPolicy,
        vec tag: TagAssociation,
    }
}

impl CreateViewRequest {
    pub fn new(name: SchemaObjectIdentifier, query: impl Into<String>) -> Self {
        Self {
            options: CreateViewOptions {
                name,
                query: query.into(),
                ..Default::default()
            },
        }
    }
}

/// One change to a single view column.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewColumnChange {
    SetMaskingPolicy { policy: ColumnMaskingPolicy, force: bool },
    UnsetMaskingPolicy,
    SetProjectionPolicy { policy: SchemaObjectIdentifier, force: bool },
    UnsetProjectionPolicy,
    SetTag(Vec<TagAssociation>),
    UnsetTag(Vec<SchemaObjectIdentifier>),
}

/// `ALTER COLUMN <name> <change>`
#[derive(Debug, Clone, PartialEq)]
pub struct ViewColumnAction {
    pub name: String,
    pub change: ViewColumnChange,
}

impl ViewColumnAction {
    pub fn new(name: impl Into<String>, change: ViewColumnChange) -> Self {
        Self {
            name: name.into(),
            change,
        }
    }
}

impl Validate for ViewColumnAction {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ViewColumnAction");
        errors.required("Name", &self.name);
        match &self.change {
            ViewColumnChange::SetMaskingPolicy { policy, .. } => {
                errors.identifier("MaskingPolicy", &policy.policy)
            }
            ViewColumnChange::SetProjectionPolicy { policy, .. } => {
                errors.identifier("ProjectionPolicy", policy)
            }
            ViewColumnChange::SetTag(tags) => {
                errors.required("SetTag", tags);
                errors.tags(tags);
            }
            ViewColumnChange::UnsetTag(tags) => {
                errors.required("UnsetTag", tags);
                errors.identifiers("UnsetTag", tags);
            }
            ViewColumnChange::UnsetMaskingPolicy | ViewColumnChange::UnsetProjectionPolicy => {}
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterViewOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set_comment: Option<String>,
    pub unset_comment: bool,
    pub set_secure: bool,
    pub unset_secure: bool,
    pub set_change_tracking: Option<bool>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    pub add_row_access_policy: Option<RowAccessPolicyOn>,
    pub drop_row_access_policy: Option<SchemaObjectIdentifier>,
    pub drop_all_row_access_policies: bool,
    pub set_aggregation_policy: Option<ViewAggregationPolicy>,
    pub unset_aggregation_policy: bool,
    pub column: Option<ViewColumnAction>,
}

impl Validate for AlterViewOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterViewOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "RenameTo",
                "SetComment",
                "UnsetComment",
                "SetSecure",
                "UnsetSecure",
                "SetChangeTracking",
                "SetTag",
                "UnsetTag",
                "AddRowAccessPolicy",
                "DropRowAccessPolicy",
                "DropAllRowAccessPolicies",
                "SetAggregationPolicy",
                "UnsetAggregationPolicy",
                "Column",
            ],
            &[
                &self.rename_to,
                &self.set_comment,
                &flag(self.unset_comment),
                &flag(self.set_secure),
                &flag(self.unset_secure),
                &self.set_change_tracking,
                &self.set_tag,
                &self.unset_tag,
                &self.add_row_access_policy,
                &self.drop_row_access_policy,
                &flag(self.drop_all_row_access_policies),
                &self.set_aggregation_policy,
                &flag(self.unset_aggregation_policy),
                &self.column,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.nested(self.add_row_access_policy.as_ref());
        errors.optional_identifier("DropRowAccessPolicy", self.drop_row_access_policy.as_ref());
        if let Some(policy) = &self.set_aggregation_policy {
            errors.identifier("SetAggregationPolicy", &policy.policy);
        }
        errors.nested(self.column.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterViewRequest => AlterViewOptions {
        flag if_exists,
        opt rename_to: SchemaObjectIdentifier,
        opt set_comment: String,
        flag unset_comment,
        flag set_secure,
        flag unset_secure,
        val set_change_tracking: bool,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
        val add_row_access_policy: RowAccessPolicyOn,
        opt drop_row_access_policy: SchemaObjectIdentifier,
        flag drop_all_row_access_policies,
        val set_aggregation_policy: ViewAggregationPolicy,
        flag unset_aggregation_policy,
        val column: ViewColumnAction,
    }
}

impl AlterViewRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterViewOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropViewOptions, DropViewRequest, "VIEW", SchemaObjectIdentifier);

target_only!(DescribeViewOptions, "DESCRIBE VIEW", SchemaObjectIdentifier);

show_objects!(ShowViewOptions, ShowViewRequest, "VIEWS" {
    flag terse,
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: Option<String>,
    pub reserved: Option<String>,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub text: Option<String>,
    pub is_secure: Option<String>,
    pub is_materialized: Option<String>,
    pub owner_role_type: Option<String>,
    pub change_tracking: Option<String>,
}

impl FromRow for ViewRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            kind: row.opt("kind"),
            reserved: row.opt("reserved"),
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            text: row.opt("text"),
            is_secure: row.opt("is_secure"),
            is_materialized: row.opt("is_materialized"),
            owner_role_type: row.opt("owner_role_type"),
            change_tracking: row.opt("change_tracking"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: String,
    pub reserved: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: String,
    pub text: String,
    pub is_secure: bool,
    pub is_materialized: bool,
    pub owner_role_type: String,
    pub change_tracking: bool,
}

impl From<ViewRow> for View {
    fn from(row: ViewRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            kind: row.kind.unwrap_or_default(),
            reserved: row.reserved.unwrap_or_default(),
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            text: row.text.unwrap_or_default(),
            is_secure: row.is_secure.as_deref().is_some_and(yes),
            is_materialized: row.is_materialized.as_deref().is_some_and(yes),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            change_tracking: row.change_tracking.as_deref().is_some_and(yes),
        }
    }
}

impl View {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn is_temporary(&self) -> bool {
        self.kind.eq_ignore_ascii_case("TEMPORARY")
    }
}

gateway!(Views);

impl Views<'_> {
    pub async fn create(&self, request: &CreateViewRequest) -> Result<()> {
        self.client.exec("create view", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterViewRequest) -> Result<()> {
        self.client.exec("alter view", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropViewRequest) -> Result<()> {
        self.client.exec("drop view", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowViewRequest) -> Result<Vec<View>> {
        self.client
            .query::<_, ViewRow, _>("show views", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<View> {
        let request = ShowViewRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "view", id, View::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<TableColumnDetails>> {
        self.client
            .query::<_, TableColumnRow, _>(
                "describe view",
                &DescribeViewOptions::new(id.clone()),
            )
            .await
    }
}
