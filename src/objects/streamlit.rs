//! Streamlit apps served from a stage.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, LimitFrom, Like};
use crate::decode::{DecodeError, FromRow, Row, parse_list};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateStreamlitOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub root_location: String,
    pub main_file: String,
    pub query_warehouse: Option<AccountObjectIdentifier>,
    pub external_access_integrations: Vec<AccountObjectIdentifier>,
    pub title: Option<String>,
    pub comment: Option<String>,
}

impl Validate for CreateStreamlitOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateStreamlitOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("RootLocation", &self.root_location);
        errors.required("MainFile", &self.main_file);
        errors.optional_identifier("QueryWarehouse", self.query_warehouse.as_ref());
        errors.identifiers(
            "ExternalAccessIntegrations",
            &self.external_access_integrations,
        );
        errors.finish()
    }
}

request! {
    CreateStreamlitRequest => CreateStreamlitOptions {
        flag or_replace,
        flag if_not_exists,
        opt query_warehouse: AccountObjectIdentifier,
        vec external_access_integrations: AccountObjectIdentifier,
        opt title: String,
        opt comment: String,
    }
}

impl CreateStreamlitRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        root_location: impl Into<String>,
        main_file: impl Into<String>,
    ) -> Self {
        Self {
            options: CreateStreamlitOptions {
                name,
                root_location: root_location.into(),
                main_file: main_file.into(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamlitSet {
    pub root_location: Option<String>,
    pub main_file: Option<String>,
    pub query_warehouse: Option<AccountObjectIdentifier>,
    pub external_access_integrations: Option<Vec<AccountObjectIdentifier>>,
    pub comment: Option<String>,
    pub title: Option<String>,
}

setters!(StreamlitSet {
    opt root_location: String,
    opt main_file: String,
    opt query_warehouse: AccountObjectIdentifier,
    val external_access_integrations: Vec<AccountObjectIdentifier>,
    opt comment: String,
    opt title: String,
});

impl Validate for StreamlitSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StreamlitSet");
        errors.at_least_one_of(
            &[
                "RootLocation",
                "MainFile",
                "QueryWarehouse",
                "ExternalAccessIntegrations",
                "Comment",
                "Title",
            ],
            &[
                &self.root_location,
                &self.main_file,
                &self.query_warehouse,
                &self.external_access_integrations,
                &self.comment,
                &self.title,
            ],
        );
        errors.optional_identifier("QueryWarehouse", self.query_warehouse.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamlitUnset {
    pub query_warehouse: bool,
    pub comment: bool,
    pub title: bool,
}

setters!(StreamlitUnset {
    flag query_warehouse,
    flag comment,
    flag title,
});

impl Validate for StreamlitUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StreamlitUnset");
        errors.at_least_one_of(
            &["QueryWarehouse", "Comment", "Title"],
            &[
                &flag(self.query_warehouse),
                &flag(self.comment),
                &flag(self.title),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterStreamlitOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub set: Option<StreamlitSet>,
    pub unset: Option<StreamlitUnset>,
    pub rename_to: Option<SchemaObjectIdentifier>,
}

impl Validate for AlterStreamlitOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterStreamlitOptions");
        errors.identifier("name", &self.name);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.exactly_one_of(
            &["Set", "Unset", "RenameTo"],
            &[&self.set, &self.unset, &self.rename_to],
        );
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.finish()
    }
}

request! {
    AlterStreamlitRequest => AlterStreamlitOptions {
        flag if_exists,
        val set: StreamlitSet,
        val unset: StreamlitUnset,
        val rename_to: SchemaObjectIdentifier,
    }
}

impl AlterStreamlitRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterStreamlitOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropStreamlitOptions, DropStreamlitRequest, "STREAMLIT", SchemaObjectIdentifier);

target_only!(DescribeStreamlitOptions, "DESCRIBE STREAMLIT", SchemaObjectIdentifier);

show_objects!(ShowStreamlitOptions, ShowStreamlitRequest, "STREAMLITS" {
    flag terse,
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamlitRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub title: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub query_warehouse: Option<String>,
    pub url_id: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for StreamlitRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            title: row.opt("title"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            query_warehouse: row.opt("query_warehouse"),
            url_id: row.opt("url_id"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Streamlit {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub title: String,
    pub owner: String,
    pub comment: String,
    pub query_warehouse: String,
    pub url_id: String,
    pub owner_role_type: String,
}

impl From<StreamlitRow> for Streamlit {
    fn from(row: StreamlitRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            title: row.title.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            query_warehouse: row.query_warehouse.unwrap_or_default(),
            url_id: row.url_id.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl Streamlit {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamlitDetailsRow {
    pub name: String,
    pub title: Option<String>,
    pub root_location: Option<String>,
    pub main_file: Option<String>,
    pub query_warehouse: Option<String>,
    pub url_id: Option<String>,
    pub default_packages: Option<String>,
    pub user_packages: Option<String>,
    pub import_urls: Option<String>,
    pub external_access_integrations: Option<String>,
    pub external_access_secrets: Option<String>,
}

impl FromRow for StreamlitDetailsRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            title: row.opt("title"),
            root_location: row.opt("root_location"),
            main_file: row.opt("main_file"),
            query_warehouse: row.opt("query_warehouse"),
            url_id: row.opt("url_id"),
            default_packages: row.opt("default_packages"),
            user_packages: row.opt("user_packages"),
            import_urls: row.opt("import_urls"),
            external_access_integrations: row.opt("external_access_integrations"),
            external_access_secrets: row.opt("external_access_secrets"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamlitDetails {
    pub name: String,
    pub title: String,
    pub root_location: String,
    pub main_file: String,
    pub query_warehouse: String,
    pub url_id: String,
    pub default_packages: String,
    pub user_packages: Vec<String>,
    pub import_urls: Vec<String>,
    pub external_access_integrations: Vec<String>,
    pub external_access_secrets: String,
}

impl From<StreamlitDetailsRow> for StreamlitDetails {
    fn from(row: StreamlitDetailsRow) -> Self {
        let list = |value: Option<String>| value.as_deref().map(parse_list).unwrap_or_default();
        Self {
            name: row.name,
            title: row.title.unwrap_or_default(),
            root_location: row.root_location.unwrap_or_default(),
            main_file: row.main_file.unwrap_or_default(),
            query_warehouse: row.query_warehouse.unwrap_or_default(),
            url_id: row.url_id.unwrap_or_default(),
            default_packages: row.default_packages.unwrap_or_default(),
            user_packages: list(row.user_packages),
            import_urls: list(row.import_urls),
            external_access_integrations: list(row.external_access_integrations),
            external_access_secrets: row.external_access_secrets.unwrap_or_default(),
        }
    }
}

gateway!(Streamlits);

impl Streamlits<'_> {
    pub async fn create(&self, request: &CreateStreamlitRequest) -> Result<()> {
        self.client
            .exec("create streamlit", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterStreamlitRequest) -> Result<()> {
        self.client
            .exec("alter streamlit", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropStreamlitRequest) -> Result<()> {
        self.client
            .exec("drop streamlit", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowStreamlitRequest) -> Result<Vec<Streamlit>> {
        self.client
            .query::<_, StreamlitRow, _>("show streamlits", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Streamlit> {
        let request = ShowStreamlitRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "streamlit", id, Streamlit::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<StreamlitDetails> {
        let mut details = self
            .client
            .query::<_, StreamlitDetailsRow, StreamlitDetails>(
                "describe streamlit",
                &DescribeStreamlitOptions::new(id.clone()),
            )
            .await?;
        if details.is_empty() {
            return Err(Error::not_found("streamlit", id));
        }
        Ok(details.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "APP")
    }

    #[test]
    fn test_create_requires_main_file() {
        let opts = CreateStreamlitRequest::new(id(), "@DB.S.STG/app", "").to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_alter_exactly_one() {
        let opts = AlterStreamlitRequest::new(id())
            .with_rename_to(SchemaObjectIdentifier::new("DB", "S", "APP2"))
            .with_unset(StreamlitUnset::default().with_title(true))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_details_lists() {
        let row = Row::new([
            ("name", Some("APP")),
            ("main_file", Some("app.py")),
            ("external_access_integrations", Some("[\"EAI1\",\"EAI2\"]")),
            ("import_urls", Some("[]")),
        ]);
        let details = StreamlitDetails::from(StreamlitDetailsRow::from_row(&row).unwrap());
        assert_eq!(details.external_access_integrations, vec!["EAI1", "EAI2"]);
        assert!(details.import_urls.is_empty());
    }
}
