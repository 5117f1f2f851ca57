//! `COMMENT ON` for any object kind, plus table and view columns.

use crate::common::ObjectType;
use crate::error::{Error, Result};
use crate::identifiers::{ObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate};

/// `COMMENT [IF EXISTS] ON <object type> <id> IS '<comment>'`
///
/// An empty comment clears the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentOptions {
    pub if_exists: bool,
    pub object_type: ObjectType,
    pub id: ObjectIdentifier,
    pub value: String,
}

impl Validate for CommentOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CommentOptions");
        errors.identifier("id", &self.id);
        errors.check(self.object_type != ObjectType::Account, || {
            Error::invalid_value(
                "CommentOptions",
                "ObjectType",
                "the account comment is set with ALTER ACCOUNT",
            )
        });
        errors.finish()
    }
}

request! {
    CommentRequest => CommentOptions {
        flag if_exists,
    }
}

impl CommentRequest {
    pub fn new(
        object_type: ObjectType,
        id: impl Into<ObjectIdentifier>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            options: CommentOptions {
                if_exists: false,
                object_type,
                id: id.into(),
                value: value.into(),
            },
        }
    }
}

/// `COMMENT [IF EXISTS] ON COLUMN <table>.<column> IS '<comment>'`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnCommentOptions {
    pub if_exists: bool,
    pub table: SchemaObjectIdentifier,
    pub column: String,
    pub value: String,
}

impl Validate for ColumnCommentOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ColumnCommentOptions");
        errors.identifier("table", &self.table);
        errors.required("Column", &self.column);
        errors.finish()
    }
}

request! {
    ColumnCommentRequest => ColumnCommentOptions {
        flag if_exists,
    }
}

impl ColumnCommentRequest {
    pub fn new(
        table: SchemaObjectIdentifier,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            options: ColumnCommentOptions {
                if_exists: false,
                table,
                column: column.into(),
                value: value.into(),
            },
        }
    }
}

gateway!(Comments);

impl Comments<'_> {
    pub async fn set(&self, request: &CommentRequest) -> Result<()> {
        self.client.exec("comment", &request.to_options()).await
    }

    pub async fn set_column(&self, request: &ColumnCommentRequest) -> Result<()> {
        self.client
            .exec("comment on column", &request.to_options())
            .await
    }
}
