//! Tags, their allowed values and masking-policy attachments, plus
//! setting and unsetting tags on arbitrary objects.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, Like, ObjectType, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTagOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub allowed_values: Vec<String>,
    pub comment: Option<String>,
}

impl Validate for CreateTagOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateTagOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.check(self.allowed_values.len() <= 300, || {
            Error::invalid_value(
                "CreateTagOptions",
                "AllowedValues",
                "at most 300 values are allowed",
            )
        });
        errors.finish()
    }
}

request! {
    CreateTagRequest => CreateTagOptions {
        flag or_replace,
        flag if_not_exists,
        vec allowed_values: String,
        opt comment: String,
    }
}

impl CreateTagRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: CreateTagOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterTagOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub add_allowed_values: Vec<String>,
    pub drop_allowed_values: Vec<String>,
    pub unset_allowed_values: bool,
    pub set_masking_policies: Vec<SchemaObjectIdentifier>,
    pub force: bool,
    pub unset_masking_policies: Vec<SchemaObjectIdentifier>,
    pub set_comment: Option<String>,
    pub unset_comment: bool,
}

impl Validate for AlterTagOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterTagOptions");
        errors.identifier("name", &self.name);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.exactly_one_of(
            &[
                "RenameTo",
                "AddAllowedValues",
                "DropAllowedValues",
                "UnsetAllowedValues",
                "SetMaskingPolicies",
                "UnsetMaskingPolicies",
                "SetComment",
                "UnsetComment",
            ],
            &[
                &self.rename_to,
                &self.add_allowed_values,
                &self.drop_allowed_values,
                &flag(self.unset_allowed_values),
                &self.set_masking_policies,
                &self.unset_masking_policies,
                &self.set_comment,
                &flag(self.unset_comment),
            ],
        );
        errors.check(!self.force || !self.set_masking_policies.is_empty(), || {
            Error::invalid_value(
                "AlterTagOptions",
                "Force",
                "only applies when setting masking policies",
            )
        });
        errors.identifiers("SetMaskingPolicies", &self.set_masking_policies);
        errors.identifiers("UnsetMaskingPolicies", &self.unset_masking_policies);
        errors.finish()
    }
}

request! {
    AlterTagRequest => AlterTagOptions {
        flag if_exists,
        val rename_to: SchemaObjectIdentifier,
        vec add_allowed_values: String,
        vec drop_allowed_values: String,
        flag unset_allowed_values,
        vec set_masking_policies: SchemaObjectIdentifier,
        flag force,
        vec unset_masking_policies: SchemaObjectIdentifier,
        opt set_comment: String,
        flag unset_comment,
    }
}

impl AlterTagRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterTagOptions {
                name,
                ..Default::default()
            },
        }
    }
}

/// `ALTER <object type> <id> [MODIFY COLUMN <c>] SET TAG ...`
#[derive(Debug, Clone, PartialEq)]
pub struct SetTagOptions {
    pub object_type: ObjectType,
    pub if_exists: bool,
    pub object_name: ObjectIdentifier,
    pub column: Option<String>,
    pub set_tags: Vec<TagAssociation>,
}

impl Validate for SetTagOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SetTagOptions");
        errors.identifier("ObjectName", &self.object_name);
        errors.required("SetTags", &self.set_tags);
        errors.check(
            self.column.is_none() || self.object_type == ObjectType::Table,
            || {
                Error::invalid_value(
                    "SetTagOptions",
                    "Column",
                    "columns can only be tagged on tables",
                )
            },
        );
        errors.tags(&self.set_tags);
        errors.finish()
    }
}

request! {
    SetTagRequest => SetTagOptions {
        flag if_exists,
        opt column: String,
    }
}

impl SetTagRequest {
    pub fn new(
        object_type: ObjectType,
        object_name: impl Into<ObjectIdentifier>,
        set_tags: impl IntoIterator<Item = TagAssociation>,
    ) -> Self {
        Self {
            options: SetTagOptions {
                object_type,
                if_exists: false,
                object_name: object_name.into(),
                column: None,
                set_tags: set_tags.into_iter().collect(),
            },
        }
    }
}

/// `ALTER <object type> <id> [MODIFY COLUMN <c>] UNSET TAG ...`
#[derive(Debug, Clone, PartialEq)]
pub struct UnsetTagOptions {
    pub object_type: ObjectType,
    pub if_exists: bool,
    pub object_name: ObjectIdentifier,
    pub column: Option<String>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl Validate for UnsetTagOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("UnsetTagOptions");
        errors.identifier("ObjectName", &self.object_name);
        errors.required("UnsetTags", &self.unset_tags);
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tags);
        errors.identifiers("UnsetTags", &self.unset_tags);
        errors.finish()
    }
}

request! {
    UnsetTagRequest => UnsetTagOptions {
        flag if_exists,
        opt column: String,
    }
}

impl UnsetTagRequest {
    pub fn new(
        object_type: ObjectType,
        object_name: impl Into<ObjectIdentifier>,
        unset_tags: impl IntoIterator<Item = SchemaObjectIdentifier>,
    ) -> Self {
        Self {
            options: UnsetTagOptions {
                object_type,
                if_exists: false,
                object_name: object_name.into(),
                column: None,
                unset_tags: unset_tags.into_iter().collect(),
            },
        }
    }
}

drop_object!(DropTagOptions, DropTagRequest, "TAG", SchemaObjectIdentifier);

target_only!(UndropTagOptions, "UNDROP TAG", SchemaObjectIdentifier);

show_objects!(ShowTagOptions, ShowTagRequest, "TAGS" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub allowed_values: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for TagRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            allowed_values: row.opt("allowed_values"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: String,
    /// `None` when any value is allowed.
    pub allowed_values: Option<Vec<String>>,
    pub owner_role_type: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        let allowed_values = row.allowed_values.as_deref().and_then(|raw| {
            match serde_json::from_str::<Vec<String>>(raw) {
                Ok(values) => Some(values),
                Err(error) => {
                    tracing::warn!(tag = %row.name, %error, "unparseable allowed_values");
                    None
                }
            }
        });
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            allowed_values,
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl Tag {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

gateway!(Tags);

impl Tags<'_> {
    pub async fn create(&self, request: &CreateTagRequest) -> Result<()> {
        self.client.exec("create tag", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterTagRequest) -> Result<()> {
        self.client.exec("alter tag", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropTagRequest) -> Result<()> {
        self.client.exec("drop tag", &request.to_options()).await
    }

    pub async fn undrop(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        self.client
            .exec("undrop tag", &UndropTagOptions::new(id.clone()))
            .await
    }

    pub async fn show(&self, request: &ShowTagRequest) -> Result<Vec<Tag>> {
        self.client
            .query::<_, TagRow, _>("show tags", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Tag> {
        let request = ShowTagRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "tag", id, Tag::id)
    }

    pub async fn set(&self, request: &SetTagRequest) -> Result<()> {
        self.client.exec("set tag", &request.to_options()).await
    }

    pub async fn unset(&self, request: &UnsetTagRequest) -> Result<()> {
        self.client.exec("unset tag", &request.to_options()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::identifiers::AccountObjectIdentifier;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "TAG")
    }

    #[test]
    fn test_force_needs_masking_policies() {
        let opts = AlterTagRequest::new(id())
            .with_set_comment("c")
            .with_force(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_unset_tag_if_exists_rejected() {
        let opts = UnsetTagRequest::new(
            ObjectType::Warehouse,
            AccountObjectIdentifier::new("WH"),
            [id()],
        )
        .with_if_exists(true)
        .to_options();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_column_tag_only_on_tables() {
        let opts = SetTagRequest::new(
            ObjectType::Warehouse,
            AccountObjectIdentifier::new("WH"),
            [TagAssociation::new(id(), "v")],
        )
        .with_column("C")
        .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_allowed_values_decoded() {
        let row = Row::new([
            ("name", Some("TAG")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("allowed_values", Some("[\"a\",\"b\"]")),
        ]);
        let tag = Tag::from(TagRow::from_row(&row).unwrap());
        assert_eq!(tag.allowed_values, Some(vec!["a".to_string(), "b".to_string()]));
        let open = Tag::from(
            TagRow::from_row(&Row::new([
                ("name", Some("TAG")),
                ("database_name", Some("DB")),
                ("schema_name", Some("S")),
                ("allowed_values", None),
            ]))
            .unwrap(),
        );
        assert_eq!(open.allowed_values, None);
    }
}
