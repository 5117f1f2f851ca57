//! Sequences.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{In, Like};
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::Result;
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum ValuesBehavior {
    #[strum(to_string = "ORDER", serialize = "Y")]
    Order,
    #[strum(to_string = "NOORDER", serialize = "N")]
    NoOrder,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSequenceOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub with: bool,
    pub start: Option<i64>,
    pub increment: Option<i64>,
    pub values_behavior: Option<ValuesBehavior>,
    pub comment: Option<String>,
}

impl Validate for CreateSequenceOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSequenceOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.check(self.increment != Some(0), || {
            crate::error::Error::invalid_value(
                "CreateSequenceOptions",
                "Increment",
                "must not be zero",
            )
        });
        errors.finish()
    }
}

request! {
    CreateSequenceRequest => CreateSequenceOptions {
        flag or_replace,
        flag if_not_exists,
        flag with,
        val start: i64,
        val increment: i64,
        val values_behavior: ValuesBehavior,
        opt comment: String,
    }
}

impl CreateSequenceRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: CreateSequenceOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceSet {
    pub values_behavior: Option<ValuesBehavior>,
    pub comment: Option<String>,
}

setters!(SequenceSet {
    val values_behavior: ValuesBehavior,
    opt comment: String,
});

impl Validate for SequenceSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SequenceSet");
        errors.at_least_one_of(
            &["ValuesBehavior", "Comment"],
            &[&self.values_behavior, &self.comment],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterSequenceOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set_increment: Option<i64>,
    pub set: Option<SequenceSet>,
    pub unset_comment: bool,
}

impl Validate for AlterSequenceOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterSequenceOptions");
        errors.identifier("name", &self.name);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.exactly_one_of(
            &["RenameTo", "SetIncrement", "Set", "UnsetComment"],
            &[
                &self.rename_to,
                &self.set_increment,
                &self.set,
                &flag(self.unset_comment),
            ],
        );
        errors.nested(self.set.as_ref());
        errors.finish()
    }
}

request! {
    AlterSequenceRequest => AlterSequenceOptions {
        flag if_exists,
        val rename_to: SchemaObjectIdentifier,
        val set_increment: i64,
        val set: SequenceSet,
        flag unset_comment,
    }
}

impl AlterSequenceRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterSequenceOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropSequenceOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub cascade: bool,
    pub restrict: bool,
}

impl Validate for DropSequenceOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DropSequenceOptions");
        errors.identifier("name", &self.name);
        errors.at_most_one_of(
            &["Cascade", "Restrict"],
            &[&flag(self.cascade), &flag(self.restrict)],
        );
        errors.finish()
    }
}

request! {
    DropSequenceRequest => DropSequenceOptions {
        flag if_exists,
        flag cascade,
        flag restrict,
    }
}

impl DropSequenceRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: DropSequenceOptions {
                name,
                ..Default::default()
            },
        }
    }
}

target_only!(DescribeSequenceOptions, "DESCRIBE SEQUENCE", SchemaObjectIdentifier);

show_objects!(ShowSequenceOptions, ShowSequenceRequest, "SEQUENCES" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: String,
    pub database_name: String,
    pub next_value: Option<i64>,
    pub interval: Option<i64>,
    pub owner: Option<String>,
    pub owner_role_type: Option<String>,
    pub comment: Option<String>,
    pub ordered: Option<String>,
}

impl FromRow for SequenceRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            schema_name: row.get("schema_name")?,
            database_name: row.get("database_name")?,
            next_value: row.opt_i64("next_value")?,
            interval: row.opt_i64("interval")?,
            owner: row.opt("owner"),
            owner_role_type: row.opt("owner_role_type"),
            comment: row.opt("comment"),
            ordered: row.opt("ordered"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: String,
    pub database_name: String,
    pub next_value: i64,
    pub interval: i64,
    pub owner: String,
    pub owner_role_type: String,
    pub comment: String,
    pub ordered: bool,
}

impl From<SequenceRow> for Sequence {
    fn from(row: SequenceRow) -> Self {
        let ordered = row
            .ordered
            .as_deref()
            .and_then(parse_token::<ValuesBehavior>)
            .map(|behavior| behavior == ValuesBehavior::Order)
            .unwrap_or_else(|| row.ordered.as_deref().is_some_and(yes));
        Self {
            created_on: row.created_on,
            name: row.name,
            schema_name: row.schema_name,
            database_name: row.database_name,
            next_value: row.next_value.unwrap_or_default(),
            interval: row.interval.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            ordered,
        }
    }
}

impl Sequence {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

gateway!(Sequences);

impl Sequences<'_> {
    pub async fn create(&self, request: &CreateSequenceRequest) -> Result<()> {
        self.client
            .exec("create sequence", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterSequenceRequest) -> Result<()> {
        self.client
            .exec("alter sequence", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropSequenceRequest) -> Result<()> {
        self.client
            .exec("drop sequence", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowSequenceRequest) -> Result<Vec<Sequence>> {
        self.client
            .query::<_, SequenceRow, _>("show sequences", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Sequence> {
        let request = ShowSequenceRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "sequence", id, Sequence::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Sequence> {
        let rows = self
            .client
            .query::<_, SequenceRow, Sequence>(
                "describe sequence",
                &DescribeSequenceOptions::new(id.clone()),
            )
            .await?;
        find_by_id(rows, "sequence", id, Sequence::id)
    }
}
