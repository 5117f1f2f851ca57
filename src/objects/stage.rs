//! Internal and external (S3, GCS, Azure) stages with directory tables.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::objects::file_format::StageFileFormat;
use crate::validation::{Errors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalStageEncryption {
    SnowflakeFull,
    SnowflakeSse,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternalStage {
    pub encryption: Option<InternalStageEncryption>,
}

setters!(InternalStage {
    val encryption: InternalStageEncryption,
});

#[derive(Debug, Clone, PartialEq)]
pub enum S3Credentials {
    Keys {
        aws_key_id: String,
        aws_secret_key: String,
        aws_token: Option<String>,
    },
    Role(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum S3Encryption {
    AwsCse { master_key: String },
    AwsSseS3,
    AwsSseKms { kms_key_id: Option<String> },
    None,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalS3Stage {
    pub url: String,
    pub storage_integration: Option<AccountObjectIdentifier>,
    pub credentials: Option<S3Credentials>,
    pub encryption: Option<S3Encryption>,
}

impl ExternalS3Stage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

setters!(ExternalS3Stage {
    opt storage_integration: AccountObjectIdentifier,
    val credentials: S3Credentials,
    val encryption: S3Encryption,
});

#[derive(Debug, Clone, PartialEq)]
pub enum GcsEncryption {
    GcsSseKms { kms_key_id: Option<String> },
    None,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalGcsStage {
    pub url: String,
    pub storage_integration: Option<AccountObjectIdentifier>,
    pub encryption: Option<GcsEncryption>,
}

impl ExternalGcsStage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

setters!(ExternalGcsStage {
    opt storage_integration: AccountObjectIdentifier,
    val encryption: GcsEncryption,
});

#[derive(Debug, Clone, PartialEq)]
pub enum AzureEncryption {
    AzureCse { master_key: String },
    None,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalAzureStage {
    pub url: String,
    pub storage_integration: Option<AccountObjectIdentifier>,
    pub sas_token: Option<String>,
    pub encryption: Option<AzureEncryption>,
}

impl ExternalAzureStage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

setters!(ExternalAzureStage {
    opt storage_integration: AccountObjectIdentifier,
    opt sas_token: String,
    val encryption: AzureEncryption,
});

/// Where the stage's files live.
#[derive(Debug, Clone, PartialEq)]
pub enum StageLocation {
    Internal(InternalStage),
    S3(ExternalS3Stage),
    Gcs(ExternalGcsStage),
    Azure(ExternalAzureStage),
}

impl Default for StageLocation {
    fn default() -> Self {
        StageLocation::Internal(InternalStage::default())
    }
}

impl StageLocation {
    pub fn is_external(&self) -> bool {
        !matches!(self, StageLocation::Internal(_))
    }
}

impl Validate for StageLocation {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StageLocation");
        match self {
            StageLocation::Internal(_) => {}
            StageLocation::S3(stage) => {
                errors.required("Url", &stage.url);
                errors.optional_identifier("StorageIntegration", stage.storage_integration.as_ref());
                errors.at_most_one_of(
                    &["StorageIntegration", "Credentials"],
                    &[&stage.storage_integration, &stage.credentials],
                );
            }
            StageLocation::Gcs(stage) => {
                errors.required("Url", &stage.url);
                errors.optional_identifier("StorageIntegration", stage.storage_integration.as_ref());
            }
            StageLocation::Azure(stage) => {
                errors.required("Url", &stage.url);
                errors.optional_identifier("StorageIntegration", stage.storage_integration.as_ref());
                errors.at_most_one_of(
                    &["StorageIntegration", "SasToken"],
                    &[&stage.storage_integration, &stage.sas_token],
                );
            }
        }
        errors.finish()
    }
}

/// `DIRECTORY = (...)`; auto-refresh only applies to external stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageDirectory {
    pub enable: bool,
    pub refresh_on_create: Option<bool>,
    pub auto_refresh: Option<bool>,
    pub notification_integration: Option<String>,
}

impl StageDirectory {
    pub fn enabled() -> Self {
        Self {
            enable: true,
            ..Default::default()
        }
    }
}

setters!(StageDirectory {
    val refresh_on_create: bool,
    val auto_refresh: bool,
    opt notification_integration: String,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateStageOptions {
    pub or_replace: bool,
    pub temporary: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub location: StageLocation,
    pub directory: Option<StageDirectory>,
    pub file_format: Option<StageFileFormat>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateStageOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateStageOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.nested(Some(&self.location));
        if let Some(directory) = &self.directory {
            errors.check(
                self.location.is_external()
                    || (directory.auto_refresh.is_none()
                        && directory.notification_integration.is_none()),
                || {
                    Error::invalid_value(
                        "CreateStageOptions",
                        "Directory",
                        "auto refresh is only supported on external stages",
                    )
                },
            );
        }
        errors.nested(self.file_format.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateStageRequest => CreateStageOptions {
        flag or_replace,
        flag temporary,
        flag if_not_exists,
        val directory: StageDirectory,
        val file_format: StageFileFormat,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateStageRequest {
    pub fn new(name: SchemaObjectIdentifier, location: StageLocation) -> Self {
        Self {
            options: CreateStageOptions {
                name,
                location,
                ..Default::default()
            },
        }
    }

    pub fn internal(name: SchemaObjectIdentifier) -> Self {
        Self::new(name, StageLocation::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageSet {
    pub location: Option<StageLocation>,
    pub file_format: Option<StageFileFormat>,
    pub comment: Option<String>,
}

setters!(StageSet {
    val location: StageLocation,
    val file_format: StageFileFormat,
    opt comment: String,
});

impl Validate for StageSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StageSet");
        errors.at_least_one_of(
            &["Location", "FileFormat", "Comment"],
            &[&self.location, &self.file_format, &self.comment],
        );
        if let Some(location) = &self.location {
            errors.check(location.is_external(), || {
                Error::invalid_value("StageSet", "Location", "only external locations can be altered")
            });
            errors.nested(Some(location));
        }
        errors.nested(self.file_format.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryRefresh {
    pub subpath: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterStageOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<StageSet>,
    pub set_directory_enable: Option<bool>,
    pub refresh_directory: Option<DirectoryRefresh>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterStageOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterStageOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "RenameTo",
                "Set",
                "SetDirectoryEnable",
                "RefreshDirectory",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &self.rename_to,
                &self.set,
                &self.set_directory_enable,
                &self.refresh_directory,
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.nested(self.set.as_ref());
        errors.tags(&self.set_tag);
        errors.finish()
    }
}

request! {
    AlterStageRequest => AlterStageOptions {
        flag if_exists,
        opt rename_to: SchemaObjectIdentifier,
        val set: StageSet,
        val set_directory_enable: bool,
        val refresh_directory: DirectoryRefresh,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterStageRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterStageOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropStageOptions, DropStageRequest, "STAGE", SchemaObjectIdentifier);

target_only!(DescribeStageOptions, "DESCRIBE STAGE", SchemaObjectIdentifier);

show_objects!(ShowStageOptions, ShowStageRequest, "STAGES" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub url: Option<String>,
    pub has_credentials: Option<String>,
    pub has_encryption_key: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub region: Option<String>,
    pub stage_type: Option<String>,
    pub cloud: Option<String>,
    pub storage_integration: Option<String>,
    pub endpoint: Option<String>,
    pub owner_role_type: Option<String>,
    pub directory_enabled: Option<String>,
}

impl FromRow for StageRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            url: row.opt("url"),
            has_credentials: row.opt("has_credentials"),
            has_encryption_key: row.opt("has_encryption_key"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            region: row.opt("region"),
            stage_type: row.opt("type"),
            cloud: row.opt("cloud"),
            storage_integration: row.opt("storage_integration"),
            endpoint: row.opt("endpoint"),
            owner_role_type: row.opt("owner_role_type"),
            directory_enabled: row.opt("directory_enabled"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub url: String,
    pub has_credentials: bool,
    pub has_encryption_key: bool,
    pub owner: String,
    pub comment: String,
    pub region: Option<String>,
    pub stage_type: String,
    pub cloud: Option<String>,
    pub storage_integration: Option<AccountObjectIdentifier>,
    pub endpoint: Option<String>,
    pub owner_role_type: String,
    pub directory_enabled: bool,
}

impl From<StageRow> for Stage {
    fn from(row: StageRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            url: row.url.unwrap_or_default(),
            has_credentials: row.has_credentials.as_deref().is_some_and(yes),
            has_encryption_key: row.has_encryption_key.as_deref().is_some_and(yes),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            region: row.region.filter(|region| !region.is_empty()),
            stage_type: row.stage_type.unwrap_or_default(),
            cloud: row.cloud.filter(|cloud| !cloud.is_empty()),
            storage_integration: row
                .storage_integration
                .filter(|name| !name.is_empty())
                .map(AccountObjectIdentifier::new),
            endpoint: row.endpoint.filter(|endpoint| !endpoint.is_empty()),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            directory_enabled: row.directory_enabled.as_deref().is_some_and(yes),
        }
    }
}

impl Stage {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn is_external(&self) -> bool {
        self.stage_type.to_ascii_uppercase().contains("EXTERNAL")
    }
}

/// One `DESCRIBE STAGE` row; properties are grouped by parent
/// (`STAGE_LOCATION`, `DIRECTORY`, `STAGE_FILE_FORMAT`...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagePropertyRow {
    pub parent_property: String,
    pub property: String,
    pub property_type: Option<String>,
    pub property_value: Option<String>,
    pub property_default: Option<String>,
}

impl FromRow for StagePropertyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            parent_property: row.get("parent_property")?,
            property: row.get("property")?,
            property_type: row.opt("property_type"),
            property_value: row.opt("property_value"),
            property_default: row.opt("property_default"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageProperty {
    pub parent: String,
    pub name: String,
    pub property_type: String,
    pub value: String,
    pub default: String,
}

impl From<StagePropertyRow> for StageProperty {
    fn from(row: StagePropertyRow) -> Self {
        Self {
            parent: row.parent_property,
            name: row.property,
            property_type: row.property_type.unwrap_or_default(),
            value: row.property_value.unwrap_or_default(),
            default: row.property_default.unwrap_or_default(),
        }
    }
}

gateway!(Stages);

impl Stages<'_> {
    pub async fn create(&self, request: &CreateStageRequest) -> Result<()> {
        self.client.exec("create stage", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterStageRequest) -> Result<()> {
        self.client.exec("alter stage", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropStageRequest) -> Result<()> {
        self.client.exec("drop stage", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowStageRequest) -> Result<Vec<Stage>> {
        self.client
            .query::<_, StageRow, _>("show stages", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Stage> {
        let request = ShowStageRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "stage", id, Stage::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<StageProperty>> {
        self.client
            .query::<_, StagePropertyRow, _>(
                "describe stage",
                &DescribeStageOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "STG")
    }

    #[test]
    fn test_internal_stage_rejects_auto_refresh() {
        let opts = CreateStageRequest::internal(id())
            .with_directory(StageDirectory::enabled().with_auto_refresh(true))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_s3_integration_and_credentials_conflict() {
        let location = StageLocation::S3(
            ExternalS3Stage::new("s3://bucket/path/")
                .with_storage_integration(AccountObjectIdentifier::new("INT"))
                .with_credentials(S3Credentials::Role("arn:aws:iam::1:role/r".into())),
        );
        let opts = CreateStageRequest::new(id(), location).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_external_url_required() {
        let location = StageLocation::Gcs(ExternalGcsStage::new(""));
        let opts = CreateStageRequest::new(id(), location).to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_set_internal_location_rejected() {
        let opts = AlterStageRequest::new(id())
            .with_set(StageSet::default().with_location(StageLocation::default()))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_row_conversion() {
        let row = Row::new([
            ("name", Some("STG")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("url", Some("s3://bucket/")),
            ("type", Some("EXTERNAL")),
            ("storage_integration", Some("INT")),
            ("region", Some("")),
            ("directory_enabled", Some("Y")),
        ]);
        let stage = Stage::from(StageRow::from_row(&row).unwrap());
        assert!(stage.is_external());
        assert!(stage.directory_enabled);
        assert_eq!(stage.region, None);
        assert_eq!(stage.storage_integration, Some(AccountObjectIdentifier::new("INT")));
    }
}
