//! Tables: column definitions, constraints, clustering and the table-level
//! ALTER actions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{CloneSource, In, LimitFrom, Like, TagAssociation};
use crate::datatypes::DataType;
use crate::decode::{DecodeError, FromRow, Row, parse_list, yes};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum TableKind {
    #[strum(serialize = "TEMPORARY")]
    Temporary,
    #[strum(serialize = "VOLATILE")]
    Volatile,
    #[strum(serialize = "TRANSIENT")]
    Transient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum ConstraintType {
    #[strum(serialize = "UNIQUE")]
    Unique,
    #[strum(serialize = "PRIMARY KEY")]
    PrimaryKey,
    #[strum(serialize = "FOREIGN KEY")]
    ForeignKey,
}

/// `REFERENCES <table> [(<columns>)]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForeignKeyReference {
    pub table: SchemaObjectIdentifier,
    pub columns: Vec<String>,
}

/// Constraint declared on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineConstraint {
    pub name: Option<String>,
    pub kind: ConstraintType,
    pub references: Option<ForeignKeyReference>,
    pub enforced: Option<bool>,
}

impl InlineConstraint {
    pub fn new(kind: ConstraintType) -> Self {
        Self {
            name: None,
            kind,
            references: None,
            enforced: None,
        }
    }
}

impl Validate for InlineConstraint {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("InlineConstraint");
        match (self.kind, &self.references) {
            (ConstraintType::ForeignKey, None) => {
                errors.push(Error::missing_required("InlineConstraint", "References"))
            }
            (ConstraintType::ForeignKey, Some(references)) => {
                errors.identifier("References.Table", &references.table)
            }
            (_, Some(_)) => errors.push(Error::invalid_value(
                "InlineConstraint",
                "References",
                "only valid for FOREIGN KEY constraints",
            )),
            (_, None) => {}
        }
        errors.finish()
    }
}

/// Constraint declared at table level over one or more columns.
#[derive(Debug, Clone, PartialEq)]
pub struct OutOfLineConstraint {
    pub name: Option<String>,
    pub kind: ConstraintType,
    pub columns: Vec<String>,
    pub references: Option<ForeignKeyReference>,
    pub enforced: Option<bool>,
}

impl OutOfLineConstraint {
    pub fn new(kind: ConstraintType, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: None,
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            references: None,
            enforced: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn references(mut self, references: ForeignKeyReference) -> Self {
        self.references = Some(references);
        self
    }
}

impl Validate for OutOfLineConstraint {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("OutOfLineConstraint");
        errors.required("Columns", &self.columns);
        match (self.kind, &self.references) {
            (ConstraintType::ForeignKey, None) => {
                errors.push(Error::missing_required("OutOfLineConstraint", "References"))
            }
            (ConstraintType::ForeignKey, Some(references)) => {
                errors.identifier("References.Table", &references.table)
            }
            (_, Some(_)) => errors.push(Error::invalid_value(
                "OutOfLineConstraint",
                "References",
                "only valid for FOREIGN KEY constraints",
            )),
            (_, None) => {}
        }
        errors.finish()
    }
}

/// `WITH MASKING POLICY <policy> [USING (<columns>)]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMaskingPolicy {
    pub policy: SchemaObjectIdentifier,
    pub using: Vec<String>,
}

/// `ROW ACCESS POLICY <policy> ON (<columns>)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowAccessPolicyOn {
    pub policy: SchemaObjectIdentifier,
    pub on: Vec<String>,
}

impl Validate for RowAccessPolicyOn {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("RowAccessPolicyOn");
        errors.identifier("Policy", &self.policy);
        errors.required("On", &self.on);
        errors.finish()
    }
}

/// Column default: an expression or an identity clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    Expression(String),
    Autoincrement { start: i64, increment: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub name: String,
    pub data_type: DataType,
    pub collate: Option<String>,
    pub comment: Option<String>,
    pub default: Option<ColumnDefault>,
    pub not_null: bool,
    pub constraint: Option<InlineConstraint>,
    pub masking_policy: Option<ColumnMaskingPolicy>,
    pub tag: Vec<TagAssociation>,
}

impl TableColumn {
    pub fn new(name: impl Into<String>, data_type: impl Into<DataType>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            collate: None,
            comment: None,
            default: None,
            not_null: false,
            constraint: None,
            masking_policy: None,
            tag: Vec::new(),
        }
    }
}

setters!(TableColumn {
    opt collate: String,
    opt comment: String,
    val default: ColumnDefault,
    flag not_null,
    val constraint: InlineConstraint,
    val masking_policy: ColumnMaskingPolicy,
    vec tag: TagAssociation,
});

impl Validate for TableColumn {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("TableColumn");
        errors.check(!self.name.is_empty(), || {
            Error::missing_required("TableColumn", "Name")
        });
        errors.nested(self.constraint.as_ref());
        if let Some(policy) = &self.masking_policy {
            errors.identifier("MaskingPolicy", &policy.policy);
        }
        errors.tags(&self.tag);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTableOptions {
    pub or_replace: bool,
    pub kind: Option<TableKind>,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub columns: Vec<TableColumn>,
    pub constraints: Vec<OutOfLineConstraint>,
    pub cluster_by: Vec<String>,
    pub enable_schema_evolution: Option<bool>,
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub change_tracking: Option<bool>,
    pub default_ddl_collation: Option<String>,
    pub copy_grants: bool,
    pub row_access_policy: Option<RowAccessPolicyOn>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateTableOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Columns", &self.columns);
        errors.nested_all(&self.columns);
        errors.nested_all(&self.constraints);
        errors.range(
            "DataRetentionTimeInDays",
            self.data_retention_time_in_days,
            0,
            90,
        );
        errors.nested(self.row_access_policy.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateTableRequest => CreateTableOptions {
        flag or_replace,
        val kind: TableKind,
        flag if_not_exists,
        vec constraints: OutOfLineConstraint,
        vec cluster_by: String,
        val enable_schema_evolution: bool,
        val data_retention_time_in_days: i64,
        val max_data_extension_time_in_days: i64,
        val change_tracking: bool,
        opt default_ddl_collation: String,
        flag copy_grants,
        val row_access_policy: RowAccessPolicyOn,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateTableRequest {
    pub fn new(name: SchemaObjectIdentifier, columns: Vec<TableColumn>) -> Self {
        Self {
            options: CreateTableOptions {
                name,
                columns,
                ..Default::default()
            },
        }
    }
}

/// `CREATE TABLE <name> [(<columns>)] AS <query>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTableAsSelectOptions {
    pub or_replace: bool,
    pub name: SchemaObjectIdentifier,
    pub columns: Vec<TableColumn>,
    pub cluster_by: Vec<String>,
    pub copy_grants: bool,
    pub query: String,
}

impl Validate for CreateTableAsSelectOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateTableAsSelectOptions");
        errors.identifier("name", &self.name);
        errors.required("Query", &self.query);
        errors.nested_all(&self.columns);
        errors.finish()
    }
}

request! {
    CreateTableAsSelectRequest => CreateTableAsSelectOptions {
        flag or_replace,
        vec columns: TableColumn,
        vec cluster_by: String,
        flag copy_grants,
    }
}

impl CreateTableAsSelectRequest {
    pub fn new(name: SchemaObjectIdentifier, query: impl Into<String>) -> Self {
        Self {
            options: CreateTableAsSelectOptions {
                name,
                query: query.into(),
                ..Default::default()
            },
        }
    }
}

/// `CREATE TABLE <name> LIKE <source>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTableLikeOptions {
    pub or_replace: bool,
    pub name: SchemaObjectIdentifier,
    pub like: SchemaObjectIdentifier,
    pub cluster_by: Vec<String>,
    pub copy_grants: bool,
}

impl Validate for CreateTableLikeOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateTableLikeOptions");
        errors.identifier("name", &self.name);
        errors.identifier("Like", &self.like);
        errors.finish()
    }
}

request! {
    CreateTableLikeRequest => CreateTableLikeOptions {
        flag or_replace,
        vec cluster_by: String,
        flag copy_grants,
    }
}

impl CreateTableLikeRequest {
    pub fn new(name: SchemaObjectIdentifier, like: SchemaObjectIdentifier) -> Self {
        Self {
            options: CreateTableLikeOptions {
                name,
                like,
                ..Default::default()
            },
        }
    }
}

/// `CREATE TABLE <name> CLONE <source> [AT | BEFORE (...)]`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableCloneOptions {
    pub or_replace: bool,
    pub name: SchemaObjectIdentifier,
    pub clone: CloneSource<SchemaObjectIdentifier>,
    pub copy_grants: bool,
}

impl Validate for CreateTableCloneOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateTableCloneOptions");
        errors.identifier("name", &self.name);
        errors.merge(self.clone.validate());
        errors.finish()
    }
}

request! {
    CreateTableCloneRequest => CreateTableCloneOptions {
        flag or_replace,
        flag copy_grants,
    }
}

impl CreateTableCloneRequest {
    pub fn new(name: SchemaObjectIdentifier, clone: CloneSource<SchemaObjectIdentifier>) -> Self {
        Self {
            options: CreateTableCloneOptions {
                or_replace: false,
                name,
                clone,
                copy_grants: false,
            },
        }
    }
}

/// Clustering actions: exactly one per statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusteringAction {
    pub cluster_by: Vec<String>,
    pub suspend_recluster: bool,
    pub resume_recluster: bool,
    pub drop_clustering_key: bool,
}

impl Validate for ClusteringAction {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ClusteringAction");
        errors.exactly_one_of(
            &[
                "ClusterBy",
                "SuspendRecluster",
                "ResumeRecluster",
                "DropClusteringKey",
            ],
            &[
                &self.cluster_by,
                &flag(self.suspend_recluster),
                &flag(self.resume_recluster),
                &flag(self.drop_clustering_key),
            ],
        );
        errors.finish()
    }
}

/// One `COLUMN <name> ...` clause inside `ALTER COLUMN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnAlter {
    pub name: String,
    pub drop_default: bool,
    pub set_default: Option<String>,
    pub not_null: Option<bool>,
    pub data_type: Option<DataType>,
    pub comment: Option<String>,
    pub unset_comment: bool,
}

impl ColumnAlter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

setters!(ColumnAlter {
    flag drop_default,
    opt set_default: String,
    val not_null: bool,
    opt data_type: DataType,
    opt comment: String,
    flag unset_comment,
});

impl Validate for ColumnAlter {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ColumnAlter");
        errors.exactly_one_of(
            &[
                "DropDefault",
                "SetDefault",
                "NotNull",
                "DataType",
                "Comment",
                "UnsetComment",
            ],
            &[
                &flag(self.drop_default),
                &self.set_default,
                &self.not_null,
                &self.data_type,
                &self.comment,
                &flag(self.unset_comment),
            ],
        );
        errors.finish()
    }
}

/// `ADD COLUMN [IF NOT EXISTS] <definition>`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAdd {
    pub if_not_exists: bool,
    pub column: TableColumn,
}

/// `RENAME COLUMN <old> TO <new>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRename {
    pub old_name: String,
    pub new_name: String,
}

/// `ALTER COLUMN <name> SET MASKING POLICY <policy> [USING (...)] [FORCE]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSetMaskingPolicy {
    pub column: String,
    pub masking_policy: ColumnMaskingPolicy,
    pub force: bool,
}

/// Column actions: exactly one per statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnAction {
    pub add: Option<ColumnAdd>,
    pub rename: Option<ColumnRename>,
    pub alter: Vec<ColumnAlter>,
    pub set_masking_policy: Option<ColumnSetMaskingPolicy>,
    pub unset_masking_policy: Option<String>,
    pub drop_columns: Vec<String>,
}

impl ColumnAction {
    pub fn add(column: TableColumn) -> Self {
        Self {
            add: Some(ColumnAdd {
                if_not_exists: false,
                column,
            }),
            ..Default::default()
        }
    }

    pub fn rename(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            rename: Some(ColumnRename {
                old_name: old_name.into(),
                new_name: new_name.into(),
            }),
            ..Default::default()
        }
    }

    pub fn alter(alters: impl IntoIterator<Item = ColumnAlter>) -> Self {
        Self {
            alter: alters.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn drop(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            drop_columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl Validate for ColumnAction {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ColumnAction");
        errors.exactly_one_of(
            &[
                "Add",
                "Rename",
                "Alter",
                "SetMaskingPolicy",
                "UnsetMaskingPolicy",
                "DropColumns",
            ],
            &[
                &self.add,
                &self.rename,
                &self.alter,
                &self.set_masking_policy,
                &self.unset_masking_policy,
                &self.drop_columns,
            ],
        );
        if let Some(add) = &self.add {
            errors.merge(add.column.validate());
        }
        if let Some(rename) = &self.rename {
            errors.check(!rename.old_name.is_empty() && !rename.new_name.is_empty(), || {
                Error::missing_required("ColumnAction", "Rename")
            });
        }
        errors.nested_all(&self.alter);
        if let Some(set) = &self.set_masking_policy {
            errors.identifier("SetMaskingPolicy", &set.masking_policy.policy);
        }
        errors.finish()
    }
}

/// Constraint actions: exactly one per statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintAction {
    pub add: Option<OutOfLineConstraint>,
    pub rename: Option<(String, String)>,
    pub drop: Option<String>,
}

impl Validate for ConstraintAction {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ConstraintAction");
        errors.exactly_one_of(
            &["Add", "Rename", "Drop"],
            &[&self.add, &self.rename, &self.drop],
        );
        errors.nested(self.add.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    pub enable_schema_evolution: Option<bool>,
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub change_tracking: Option<bool>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
}

setters!(TableSet {
    val enable_schema_evolution: bool,
    val data_retention_time_in_days: i64,
    val max_data_extension_time_in_days: i64,
    val change_tracking: bool,
    opt default_ddl_collation: String,
    opt comment: String,
});

impl Validate for TableSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("TableSet");
        errors.at_least_one_of(
            &[
                "EnableSchemaEvolution",
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "ChangeTracking",
                "DefaultDDLCollation",
                "Comment",
            ],
            &[
                &self.enable_schema_evolution,
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.change_tracking,
                &self.default_ddl_collation,
                &self.comment,
            ],
        );
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
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableUnset {
    pub enable_schema_evolution: bool,
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub change_tracking: bool,
    pub default_ddl_collation: bool,
    pub comment: bool,
}

setters!(TableUnset {
    flag enable_schema_evolution,
    flag data_retention_time_in_days,
    flag max_data_extension_time_in_days,
    flag change_tracking,
    flag default_ddl_collation,
    flag comment,
});

impl Validate for TableUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("TableUnset");
        errors.at_least_one_of(
            &[
                "EnableSchemaEvolution",
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "ChangeTracking",
                "DefaultDDLCollation",
                "Comment",
            ],
            &[
                &flag(self.enable_schema_evolution),
                &flag(self.data_retention_time_in_days),
                &flag(self.max_data_extension_time_in_days),
                &flag(self.change_tracking),
                &flag(self.default_ddl_collation),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterTableOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub new_name: Option<SchemaObjectIdentifier>,
    pub swap_with: Option<SchemaObjectIdentifier>,
    pub clustering_action: Option<ClusteringAction>,
    pub column_action: Option<ColumnAction>,
    pub constraint_action: Option<ConstraintAction>,
    pub set: Option<TableSet>,
    pub unset: Option<TableUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    pub add_row_access_policy: Option<RowAccessPolicyOn>,
    pub drop_row_access_policy: Option<SchemaObjectIdentifier>,
    pub drop_all_row_access_policies: bool,
}

impl Validate for AlterTableOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterTableOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "NewName",
                "SwapWith",
                "ClusteringAction",
                "ColumnAction",
                "ConstraintAction",
                "Set",
                "Unset",
                "SetTag",
                "UnsetTag",
                "AddRowAccessPolicy",
                "DropRowAccessPolicy",
                "DropAllRowAccessPolicies",
            ],
            &[
                &self.new_name,
                &self.swap_with,
                &self.clustering_action,
                &self.column_action,
                &self.constraint_action,
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
                &self.add_row_access_policy,
                &self.drop_row_access_policy,
                &flag(self.drop_all_row_access_policies),
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("NewName", self.new_name.as_ref());
        errors.optional_identifier("SwapWith", self.swap_with.as_ref());
        errors.nested(self.clustering_action.as_ref());
        errors.nested(self.column_action.as_ref());
        errors.nested(self.constraint_action.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.nested(self.add_row_access_policy.as_ref());
        errors.optional_identifier("DropRowAccessPolicy", self.drop_row_access_policy.as_ref());
        errors.finish()
    }
}

request! {
    AlterTableRequest => AlterTableOptions {
        flag if_exists,
        opt new_name: SchemaObjectIdentifier,
        opt swap_with: SchemaObjectIdentifier,
        val clustering_action: ClusteringAction,
        val column_action: ColumnAction,
        val constraint_action: ConstraintAction,
        val set: TableSet,
        val unset: TableUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
        val add_row_access_policy: RowAccessPolicyOn,
        opt drop_row_access_policy: SchemaObjectIdentifier,
        flag drop_all_row_access_policies,
    }
}

impl AlterTableRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterTableOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropTableOptions, DropTableRequest, "TABLE", SchemaObjectIdentifier);

target_only!(UndropTableOptions, "UNDROP TABLE", SchemaObjectIdentifier);
target_only!(DescribeTableColumnsOptions, "DESCRIBE TABLE", SchemaObjectIdentifier);

show_objects!(ShowTableOptions, ShowTableRequest, "TABLES" {
    flag terse,
    flag history,
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: LimitFrom,
});

/// One `SHOW TABLES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: Option<String>,
    pub comment: Option<String>,
    pub cluster_by: Option<String>,
    pub rows: Option<i64>,
    pub bytes: Option<i64>,
    pub owner: Option<String>,
    pub retention_time: Option<i64>,
    pub dropped_on: Option<DateTime<Utc>>,
    pub automatic_clustering: Option<String>,
    pub change_tracking: Option<String>,
    pub search_optimization: Option<String>,
    pub is_external: Option<String>,
    pub enable_schema_evolution: Option<String>,
    pub owner_role_type: Option<String>,
    pub is_event: Option<String>,
}

impl FromRow for TableRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            kind: row.opt("kind"),
            comment: row.opt("comment"),
            cluster_by: row.opt("cluster_by"),
            rows: row.opt_i64("rows")?,
            bytes: row.opt_i64("bytes")?,
            owner: row.opt("owner"),
            retention_time: row.opt_i64("retention_time")?,
            dropped_on: row.opt_timestamp("dropped_on")?,
            automatic_clustering: row.opt("automatic_clustering"),
            change_tracking: row.opt("change_tracking"),
            search_optimization: row.opt("search_optimization"),
            is_external: row.opt("is_external"),
            enable_schema_evolution: row.opt("enable_schema_evolution"),
            owner_role_type: row.opt("owner_role_type"),
            is_event: row.opt("is_event"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: String,
    pub comment: String,
    pub cluster_by: String,
    pub rows: i64,
    pub bytes: i64,
    pub owner: String,
    pub retention_time: i64,
    pub dropped_on: Option<DateTime<Utc>>,
    pub automatic_clustering: bool,
    pub change_tracking: bool,
    pub search_optimization: bool,
    pub is_external: bool,
    pub enable_schema_evolution: bool,
    pub owner_role_type: String,
    pub is_event: bool,
}

impl From<TableRow> for Table {
    fn from(row: TableRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            kind: row.kind.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            cluster_by: row.cluster_by.unwrap_or_default(),
            rows: row.rows.unwrap_or_default(),
            bytes: row.bytes.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            retention_time: row.retention_time.unwrap_or_default(),
            dropped_on: row.dropped_on,
            automatic_clustering: row.automatic_clustering.as_deref().is_some_and(yes),
            change_tracking: row.change_tracking.as_deref().is_some_and(yes),
            search_optimization: row.search_optimization.as_deref().is_some_and(yes),
            is_external: row.is_external.as_deref().is_some_and(yes),
            enable_schema_evolution: row.enable_schema_evolution.as_deref().is_some_and(yes),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            is_event: row.is_event.as_deref().is_some_and(yes),
        }
    }
}

impl Table {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    /// Clustering keys, e.g. `LINEAR(A, B)` → `["A", "B"]`.
    pub fn clustering_keys(&self) -> Vec<String> {
        let keys = self.cluster_by.trim();
        let inner = keys
            .strip_prefix("LINEAR(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(keys);
        parse_list(inner)
    }
}

/// One `DESCRIBE TABLE` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableColumnRow {
    pub name: String,
    pub data_type: String,
    pub kind: Option<String>,
    pub null: Option<String>,
    pub default: Option<String>,
    pub primary_key: Option<String>,
    pub unique_key: Option<String>,
    pub check: Option<String>,
    pub expression: Option<String>,
    pub comment: Option<String>,
    pub policy_name: Option<String>,
}

impl FromRow for TableColumnRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            data_type: row.get("type")?,
            kind: row.opt("kind"),
            null: row.opt("null?"),
            default: row.opt("default"),
            primary_key: row.opt("primary key"),
            unique_key: row.opt("unique key"),
            check: row.opt("check"),
            expression: row.opt("expression"),
            comment: row.opt("comment"),
            policy_name: row.opt("policy name"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumnDetails {
    pub name: String,
    pub data_type: DataType,
    pub kind: String,
    pub is_nullable: bool,
    pub default: Option<String>,
    pub is_primary: bool,
    pub is_unique: bool,
    pub check: Option<bool>,
    pub expression: Option<String>,
    pub comment: Option<String>,
    pub policy_name: Option<String>,
}

impl From<TableColumnRow> for TableColumnDetails {
    fn from(row: TableColumnRow) -> Self {
        Self {
            name: row.name,
            data_type: DataType::from(row.data_type.as_str()),
            kind: row.kind.unwrap_or_default(),
            is_nullable: row.null.as_deref().is_some_and(yes),
            default: row.default,
            is_primary: row.primary_key.as_deref().is_some_and(yes),
            is_unique: row.unique_key.as_deref().is_some_and(yes),
            check: row.check.as_deref().and_then(crate::decode::parse_bool),
            expression: row.expression,
            comment: row.comment,
            policy_name: row.policy_name,
        }
    }
}

gateway!(Tables);

impl Tables<'_> {
    pub async fn create(&self, request: &CreateTableRequest) -> Result<()> {
        self.client.exec("create table", &request.to_options()).await
    }

    pub async fn create_as_select(&self, request: &CreateTableAsSelectRequest) -> Result<()> {
        self.client
            .exec("create table as select", &request.to_options())
            .await
    }

    pub async fn create_like(&self, request: &CreateTableLikeRequest) -> Result<()> {
        self.client
            .exec("create table like", &request.to_options())
            .await
    }

    pub async fn create_clone(&self, request: &CreateTableCloneRequest) -> Result<()> {
        self.client
            .exec("create table clone", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterTableRequest) -> Result<()> {
        self.client.exec("alter table", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropTableRequest) -> Result<()> {
        self.client.exec("drop table", &request.to_options()).await
    }

    pub async fn undrop(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        self.client
            .exec("undrop table", &UndropTableOptions::new(id.clone()))
            .await
    }

    pub async fn show(&self, request: &ShowTableRequest) -> Result<Vec<Table>> {
        self.client
            .query::<_, TableRow, _>("show tables", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Table> {
        let request = ShowTableRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "table", id, Table::id)
    }

    pub async fn describe_columns(
        &self,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<TableColumnDetails>> {
        self.client
            .query::<_, TableColumnRow, _>(
                "describe table",
                &DescribeTableColumnsOptions::new(id.clone()),
            )
            .await
    }
}
