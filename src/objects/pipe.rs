//! Continuous-ingestion pipes wrapping a `COPY INTO` statement.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePipeOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub auto_ingest: Option<bool>,
    pub error_integration: Option<AccountObjectIdentifier>,
    pub aws_sns_topic: Option<String>,
    pub integration: Option<String>,
    pub comment: Option<String>,
    pub copy_statement: String,
}

impl Validate for CreatePipeOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreatePipeOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("CopyStatement", &self.copy_statement);
        errors.optional_identifier("ErrorIntegration", self.error_integration.as_ref());
        errors.finish()
    }
}

request! {
    CreatePipeRequest => CreatePipeOptions {
        flag or_replace,
        flag if_not_exists,
        val auto_ingest: bool,
        opt error_integration: AccountObjectIdentifier,
        opt aws_sns_topic: String,
        opt integration: String,
        opt comment: String,
    }
}

impl CreatePipeRequest {
    pub fn new(name: SchemaObjectIdentifier, copy_statement: impl Into<String>) -> Self {
        Self {
            options: CreatePipeOptions {
                name,
                copy_statement: copy_statement.into(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeSet {
    pub error_integration: Option<AccountObjectIdentifier>,
    pub pipe_execution_paused: Option<bool>,
    pub comment: Option<String>,
}

setters!(PipeSet {
    opt error_integration: AccountObjectIdentifier,
    val pipe_execution_paused: bool,
    opt comment: String,
});

impl Validate for PipeSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("PipeSet");
        errors.at_least_one_of(
            &["ErrorIntegration", "PipeExecutionPaused", "Comment"],
            &[
                &self.error_integration,
                &self.pipe_execution_paused,
                &self.comment,
            ],
        );
        errors.optional_identifier("ErrorIntegration", self.error_integration.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeUnset {
    pub pipe_execution_paused: bool,
    pub comment: bool,
}

setters!(PipeUnset {
    flag pipe_execution_paused,
    flag comment,
});

impl Validate for PipeUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("PipeUnset");
        errors.at_least_one_of(
            &["PipeExecutionPaused", "Comment"],
            &[&flag(self.pipe_execution_paused), &flag(self.comment)],
        );
        errors.finish()
    }
}

/// `REFRESH [PREFIX = '<path>'] [MODIFIED_AFTER = '<ts>']`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeRefresh {
    pub prefix: Option<String>,
    pub modified_after: Option<String>,
}

setters!(PipeRefresh {
    opt prefix: String,
    opt modified_after: String,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterPipeOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub set: Option<PipeSet>,
    pub unset: Option<PipeUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    pub refresh: Option<PipeRefresh>,
}

impl Validate for AlterPipeOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterPipeOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Set", "Unset", "SetTag", "UnsetTag", "Refresh"],
            &[
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
                &self.refresh,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.finish()
    }
}

request! {
    AlterPipeRequest => AlterPipeOptions {
        flag if_exists,
        val set: PipeSet,
        val unset: PipeUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
        val refresh: PipeRefresh,
    }
}

impl AlterPipeRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterPipeOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropPipeOptions, DropPipeRequest, "PIPE", SchemaObjectIdentifier);

target_only!(DescribePipeOptions, "DESCRIBE PIPE", SchemaObjectIdentifier);

show_objects!(ShowPipeOptions, ShowPipeRequest, "PIPES" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub definition: Option<String>,
    pub owner: Option<String>,
    pub notification_channel: Option<String>,
    pub comment: Option<String>,
    pub integration: Option<String>,
    pub pattern: Option<String>,
    pub error_integration: Option<String>,
    pub owner_role_type: Option<String>,
    pub invalid_reason: Option<String>,
    pub budget: Option<String>,
}

impl FromRow for PipeRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            definition: row.opt("definition"),
            owner: row.opt("owner"),
            notification_channel: row.opt("notification_channel"),
            comment: row.opt("comment"),
            integration: row.opt("integration"),
            pattern: row.opt("pattern"),
            error_integration: row.opt("error_integration"),
            owner_role_type: row.opt("owner_role_type"),
            invalid_reason: row.opt("invalid_reason"),
            budget: row.opt("budget"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipe {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub definition: String,
    pub owner: String,
    pub notification_channel: String,
    pub comment: String,
    pub integration: String,
    pub pattern: String,
    pub error_integration: String,
    pub owner_role_type: String,
    pub invalid_reason: String,
    pub budget: String,
}

impl From<PipeRow> for Pipe {
    fn from(row: PipeRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            definition: row.definition.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            notification_channel: row.notification_channel.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            integration: row.integration.unwrap_or_default(),
            pattern: row.pattern.unwrap_or_default(),
            error_integration: row.error_integration.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            invalid_reason: row.invalid_reason.unwrap_or_default(),
            budget: row.budget.unwrap_or_default(),
        }
    }
}

impl Pipe {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    /// Auto-ingest pipes expose the queue they listen on.
    pub fn is_auto_ingest(&self) -> bool {
        !self.notification_channel.is_empty()
    }
}

gateway!(Pipes);

impl Pipes<'_> {
    pub async fn create(&self, request: &CreatePipeRequest) -> Result<()> {
        self.client.exec("create pipe", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterPipeRequest) -> Result<()> {
        self.client.exec("alter pipe", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropPipeRequest) -> Result<()> {
        self.client.exec("drop pipe", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowPipeRequest) -> Result<Vec<Pipe>> {
        self.client
            .query::<_, PipeRow, _>("show pipes", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Pipe> {
        let request = ShowPipeRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "pipe", id, Pipe::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Pipe> {
        let rows = self
            .client
            .query::<_, PipeRow, Pipe>("describe pipe", &DescribePipeOptions::new(id.clone()))
            .await?;
        find_by_id(rows, "pipe", id, Pipe::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "P")
    }

    #[test]
    fn test_create_requires_copy_statement() {
        let opts = CreatePipeRequest::new(id(), "").to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_alter_exactly_one() {
        let opts = AlterPipeRequest::new(id())
            .with_set(PipeSet::default().with_comment("c"))
            .with_refresh(PipeRefresh::default())
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_empty_unset_rejected() {
        let opts = AlterPipeRequest::new(id())
            .with_unset(PipeUnset::default())
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::AtLeastOneOf));
    }

    #[test]
    fn test_row_conversion() {
        let row = Row::new([
            ("name", Some("P")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("notification_channel", Some("arn:aws:sqs:us-west-2:1:sf-snowpipe")),
            ("comment", None),
        ]);
        let pipe = Pipe::from(PipeRow::from_row(&row).unwrap());
        assert_eq!(pipe.id(), id());
        assert!(pipe.is_auto_ingest());
        assert_eq!(pipe.comment, "");
    }
}
