//! Change-data-capture streams on tables, external tables, stages and views.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{In, LimitFrom, Like, TagAssociation, TimeTravel};
use crate::decode::{DecodeError, FromRow, Row, parse_list, parse_token, yes};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

/// What a stream tracks. `Stage` tracks the stage's directory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOn {
    Table(SchemaObjectIdentifier),
    ExternalTable(SchemaObjectIdentifier),
    Stage(SchemaObjectIdentifier),
    View(SchemaObjectIdentifier),
}

impl StreamOn {
    pub fn keyword(&self) -> &'static str {
        match self {
            StreamOn::Table(_) => "ON TABLE",
            StreamOn::ExternalTable(_) => "ON EXTERNAL TABLE",
            StreamOn::Stage(_) => "ON STAGE",
            StreamOn::View(_) => "ON VIEW",
        }
    }

    pub fn source(&self) -> &SchemaObjectIdentifier {
        match self {
            StreamOn::Table(id)
            | StreamOn::ExternalTable(id)
            | StreamOn::Stage(id)
            | StreamOn::View(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStreamOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub copy_grants: bool,
    pub on: StreamOn,
    pub time_travel: Option<TimeTravel>,
    pub append_only: Option<bool>,
    pub insert_only: Option<bool>,
    pub show_initial_rows: Option<bool>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateStreamOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateStreamOptions");
        errors.identifier("name", &self.name);
        errors.identifier("On", self.on.source());
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        let tracks_rows = matches!(self.on, StreamOn::Table(_) | StreamOn::View(_));
        errors.check(self.append_only.is_none() || tracks_rows, || {
            Error::invalid_value(
                "CreateStreamOptions",
                "AppendOnly",
                "only valid on tables and views",
            )
        });
        errors.check(
            self.insert_only.is_none() || matches!(self.on, StreamOn::ExternalTable(_)),
            || {
                Error::invalid_value(
                    "CreateStreamOptions",
                    "InsertOnly",
                    "only valid on external tables",
                )
            },
        );
        errors.check(
            self.time_travel.is_none() || !matches!(self.on, StreamOn::Stage(_)),
            || {
                Error::invalid_value(
                    "CreateStreamOptions",
                    "TimeTravel",
                    "not supported on stages",
                )
            },
        );
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateStreamRequest => CreateStreamOptions {
        flag or_replace,
        flag if_not_exists,
        flag copy_grants,
        val time_travel: TimeTravel,
        val append_only: bool,
        val insert_only: bool,
        val show_initial_rows: bool,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateStreamRequest {
    pub fn new(name: SchemaObjectIdentifier, on: StreamOn) -> Self {
        Self {
            options: CreateStreamOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                copy_grants: false,
                on,
                time_travel: None,
                append_only: None,
                insert_only: None,
                show_initial_rows: None,
                comment: None,
                tag: Vec::new(),
            },
        }
    }

    pub fn on_table(name: SchemaObjectIdentifier, table: SchemaObjectIdentifier) -> Self {
        Self::new(name, StreamOn::Table(table))
    }

    pub fn on_external_table(name: SchemaObjectIdentifier, table: SchemaObjectIdentifier) -> Self {
        Self::new(name, StreamOn::ExternalTable(table))
    }

    pub fn on_directory_table(name: SchemaObjectIdentifier, stage: SchemaObjectIdentifier) -> Self {
        Self::new(name, StreamOn::Stage(stage))
    }

    pub fn on_view(name: SchemaObjectIdentifier, view: SchemaObjectIdentifier) -> Self {
        Self::new(name, StreamOn::View(view))
    }
}

/// `CREATE STREAM <name> CLONE <source>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloneStreamOptions {
    pub or_replace: bool,
    pub name: SchemaObjectIdentifier,
    pub source: SchemaObjectIdentifier,
    pub copy_grants: bool,
}

impl Validate for CloneStreamOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CloneStreamOptions");
        errors.identifier("name", &self.name);
        errors.identifier("Source", &self.source);
        errors.finish()
    }
}

request! {
    CloneStreamRequest => CloneStreamOptions {
        flag or_replace,
        flag copy_grants,
    }
}

impl CloneStreamRequest {
    pub fn new(name: SchemaObjectIdentifier, source: SchemaObjectIdentifier) -> Self {
        Self {
            options: CloneStreamOptions {
                name,
                source,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterStreamOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub set_comment: Option<String>,
    pub unset_comment: bool,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterStreamOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterStreamOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["SetComment", "UnsetComment", "SetTag", "UnsetTag"],
            &[
                &self.set_comment,
                &flag(self.unset_comment),
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterStreamRequest => AlterStreamOptions {
        flag if_exists,
        opt set_comment: String,
        flag unset_comment,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterStreamRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterStreamOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropStreamOptions, DropStreamRequest, "STREAM", SchemaObjectIdentifier);

target_only!(DescribeStreamOptions, "DESCRIBE STREAM", SchemaObjectIdentifier);

show_objects!(ShowStreamOptions, ShowStreamRequest, "STREAMS" {
    flag terse,
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum StreamSourceType {
    #[strum(serialize = "Table")]
    Table,
    #[strum(serialize = "External Table")]
    ExternalTable,
    #[strum(serialize = "View")]
    View,
    #[strum(serialize = "Stage")]
    Stage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum StreamMode {
    #[strum(serialize = "DEFAULT")]
    Default,
    #[strum(serialize = "APPEND_ONLY")]
    AppendOnly,
    #[strum(serialize = "INSERT_ONLY")]
    InsertOnly,
}

/// One `SHOW STREAMS` / `DESCRIBE STREAM` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub table_name: Option<String>,
    pub source_type: Option<String>,
    pub base_tables: Option<String>,
    pub stream_type: Option<String>,
    pub stale: Option<String>,
    pub mode: Option<String>,
    pub stale_after: Option<DateTime<Utc>>,
    pub invalid_reason: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for StreamRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            table_name: row.opt("table_name"),
            source_type: row.opt("source_type"),
            base_tables: row.opt("base_tables"),
            stream_type: row.opt("type"),
            stale: row.opt("stale"),
            mode: row.opt("mode"),
            stale_after: row.opt_timestamp("stale_after")?,
            invalid_reason: row.opt("invalid_reason"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stream {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: String,
    pub table_name: Option<String>,
    pub source_type: Option<StreamSourceType>,
    pub base_tables: Vec<String>,
    pub stream_type: Option<String>,
    pub stale: bool,
    pub mode: Option<StreamMode>,
    pub stale_after: Option<DateTime<Utc>>,
    pub invalid_reason: Option<String>,
    pub owner_role_type: String,
}

impl From<StreamRow> for Stream {
    fn from(row: StreamRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            table_name: row.table_name,
            source_type: row.source_type.as_deref().and_then(parse_token),
            base_tables: row.base_tables.as_deref().map(parse_list).unwrap_or_default(),
            stream_type: row.stream_type,
            stale: row.stale.as_deref().is_some_and(yes),
            mode: row.mode.as_deref().and_then(parse_token),
            stale_after: row.stale_after,
            invalid_reason: row.invalid_reason.filter(|reason| reason != "N/A"),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl Stream {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn is_append_only(&self) -> bool {
        self.mode == Some(StreamMode::AppendOnly)
    }
}

gateway!(Streams);

impl Streams<'_> {
    pub async fn create(&self, request: &CreateStreamRequest) -> Result<()> {
        self.client.exec("create stream", &request.to_options()).await
    }

    pub async fn clone_stream(&self, request: &CloneStreamRequest) -> Result<()> {
        self.client.exec("clone stream", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterStreamRequest) -> Result<()> {
        self.client.exec("alter stream", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropStreamRequest) -> Result<()> {
        self.client.exec("drop stream", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowStreamRequest) -> Result<Vec<Stream>> {
        self.client
            .query::<_, StreamRow, _>("show streams", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Stream> {
        let request = ShowStreamRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "stream", id, Stream::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Stream> {
        self.client
            .query_one::<_, StreamRow, _>(
                "describe stream",
                "stream",
                id,
                &DescribeStreamOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TimeTravelPoint;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "ST1")
    }

    fn table() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "T1")
    }

    #[test]
    fn test_append_only_rejected_on_stage() {
        let opts = CreateStreamRequest::on_directory_table(id(), table())
            .with_append_only(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_insert_only_requires_external_table() {
        let opts = CreateStreamRequest::on_table(id(), table())
            .with_insert_only(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));

        let opts = CreateStreamRequest::on_external_table(id(), table())
            .with_insert_only(true)
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_time_travel_on_view() {
        let opts = CreateStreamRequest::on_view(id(), table())
            .with_time_travel(TimeTravel::before(TimeTravelPoint::Statement("q1".into())))
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_alter_needs_one_action() {
        let opts = AlterStreamRequest::new(id()).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("created_on", Some("2024-01-02 03:04:05.000 +0000")),
            ("name", Some("ST1")),
            ("database_name", Some("DB1")),
            ("schema_name", Some("S1")),
            ("source_type", Some("External Table")),
            ("base_tables", Some("DB1.S1.T1, DB1.S1.T2")),
            ("stale", Some("false")),
            ("mode", Some("APPEND_ONLY")),
            ("invalid_reason", Some("N/A")),
        ]);
        let stream = Stream::from(StreamRow::from_row(&row).unwrap());
        assert_eq!(stream.id(), id());
        assert_eq!(stream.source_type, Some(StreamSourceType::ExternalTable));
        assert_eq!(stream.base_tables, vec!["DB1.S1.T1", "DB1.S1.T2"]);
        assert!(!stream.stale);
        assert!(stream.is_append_only());
        assert_eq!(stream.invalid_reason, None);
        assert!(stream.created_on.is_some());
    }
}
