//! External volumes: cloud storage locations for Iceberg tables.

use serde::Serialize;

use crate::client::find_by_id;
use crate::common::Like;
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier};
use crate::validation::{Errors, Validate};

/// `ENCRYPTION = (TYPE = '<type>' [KMS_KEY_ID = '<id>'])`
#[derive(Debug, Clone, PartialEq)]
pub struct StorageEncryption {
    pub encryption_type: String,
    pub kms_key_id: Option<String>,
}

impl StorageEncryption {
    pub fn new(encryption_type: impl Into<String>) -> Self {
        Self {
            encryption_type: encryption_type.into(),
            kms_key_id: None,
        }
    }

    pub fn with_kms_key_id(mut self, id: impl Into<String>) -> Self {
        self.kms_key_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageLocationProvider {
    S3 {
        /// `S3` or `S3GOV`.
        protocol: String,
        aws_role_arn: String,
        aws_external_id: Option<String>,
        encryption: Option<StorageEncryption>,
    },
    Gcs {
        encryption: Option<StorageEncryption>,
    },
    Azure {
        tenant_id: String,
    },
}

/// One entry of `STORAGE_LOCATIONS`.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageLocation {
    pub name: String,
    pub base_url: String,
    pub provider: StorageLocationProvider,
}

impl StorageLocation {
    pub fn s3(
        name: impl Into<String>,
        base_url: impl Into<String>,
        aws_role_arn: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            provider: StorageLocationProvider::S3 {
                protocol: "S3".to_string(),
                aws_role_arn: aws_role_arn.into(),
                aws_external_id: None,
                encryption: None,
            },
        }
    }

    pub fn gcs(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            provider: StorageLocationProvider::Gcs { encryption: None },
        }
    }

    pub fn azure(
        name: impl Into<String>,
        base_url: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            provider: StorageLocationProvider::Azure {
                tenant_id: tenant_id.into(),
            },
        }
    }
}

impl Validate for StorageLocation {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StorageLocation");
        errors.required("Name", &self.name);
        errors.required("StorageBaseUrl", &self.base_url);
        match &self.provider {
            StorageLocationProvider::S3 {
                protocol,
                aws_role_arn,
                ..
            } => {
                errors.required("StorageAwsRoleArn", aws_role_arn);
                errors.check(matches!(protocol.as_str(), "S3" | "S3GOV"), || {
                    Error::invalid_value(
                        "StorageLocation",
                        "StorageProvider",
                        format!("unknown S3 protocol {protocol}"),
                    )
                });
            }
            StorageLocationProvider::Gcs { .. } => {}
            StorageLocationProvider::Azure { tenant_id } => {
                errors.required("AzureTenantId", tenant_id)
            }
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateExternalVolumeOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub storage_locations: Vec<StorageLocation>,
    pub allow_writes: Option<bool>,
    pub comment: Option<String>,
}

impl Validate for CreateExternalVolumeOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateExternalVolumeOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("StorageLocations", &self.storage_locations);
        errors.nested_all(&self.storage_locations);
        errors.finish()
    }
}

request! {
    CreateExternalVolumeRequest => CreateExternalVolumeOptions {
        flag or_replace,
        flag if_not_exists,
        val allow_writes: bool,
        opt comment: String,
    }
}

impl CreateExternalVolumeRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        storage_locations: impl IntoIterator<Item = StorageLocation>,
    ) -> Self {
        Self {
            options: CreateExternalVolumeOptions {
                name,
                storage_locations: storage_locations.into_iter().collect(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalVolumeSet {
    pub allow_writes: Option<bool>,
    pub comment: Option<String>,
}

setters!(ExternalVolumeSet {
    val allow_writes: bool,
    opt comment: String,
});

impl Validate for ExternalVolumeSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ExternalVolumeSet");
        errors.at_least_one_of(
            &["AllowWrites", "Comment"],
            &[&self.allow_writes, &self.comment],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterExternalVolumeOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub remove_storage_location: Option<String>,
    pub set: Option<ExternalVolumeSet>,
    pub add_storage_location: Option<StorageLocation>,
}

impl Validate for AlterExternalVolumeOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterExternalVolumeOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["RemoveStorageLocation", "Set", "AddStorageLocation"],
            &[
                &self.remove_storage_location,
                &self.set,
                &self.add_storage_location,
            ],
        );
        errors.nested(self.set.as_ref());
        errors.nested(self.add_storage_location.as_ref());
        errors.finish()
    }
}

request! {
    AlterExternalVolumeRequest => AlterExternalVolumeOptions {
        flag if_exists,
        opt remove_storage_location: String,
        val set: ExternalVolumeSet,
        val add_storage_location: StorageLocation,
    }
}

impl AlterExternalVolumeRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterExternalVolumeOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropExternalVolumeOptions,
    DropExternalVolumeRequest,
    "EXTERNAL VOLUME",
    AccountObjectIdentifier
);

target_only!(
    DescribeExternalVolumeOptions,
    "DESCRIBE EXTERNAL VOLUME",
    AccountObjectIdentifier
);

show_objects!(ShowExternalVolumeOptions, ShowExternalVolumeRequest, "EXTERNAL VOLUMES" {
    val like: Like,
});

/// One `SHOW EXTERNAL VOLUMES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalVolumeRow {
    pub name: String,
    pub allow_writes: Option<String>,
    pub comment: Option<String>,
}

impl FromRow for ExternalVolumeRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            allow_writes: row.opt("allow_writes"),
            comment: row.opt("comment"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalVolume {
    pub name: String,
    pub allow_writes: bool,
    pub comment: String,
}

impl From<ExternalVolumeRow> for ExternalVolume {
    fn from(row: ExternalVolumeRow) -> Self {
        Self {
            name: row.name,
            allow_writes: row.allow_writes.as_deref().is_some_and(yes),
            comment: row.comment.unwrap_or_default(),
        }
    }
}

impl ExternalVolume {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

/// One `DESCRIBE EXTERNAL VOLUME` row. Storage locations come back as
/// `STORAGE_LOCATION_<n>` properties holding a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalVolumePropertyRow {
    pub parent_property: Option<String>,
    pub property: String,
    pub property_type: Option<String>,
    pub property_value: Option<String>,
    pub property_default: Option<String>,
}

impl FromRow for ExternalVolumePropertyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            parent_property: row.opt("parent_property"),
            property: row.get("property")?,
            property_type: row.opt("property_type"),
            property_value: row.opt("property_value"),
            property_default: row.opt("property_default"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalVolumeProperty {
    pub parent: String,
    pub name: String,
    pub property_type: String,
    pub value: String,
    pub default: String,
}

impl From<ExternalVolumePropertyRow> for ExternalVolumeProperty {
    fn from(row: ExternalVolumePropertyRow) -> Self {
        Self {
            parent: row.parent_property.unwrap_or_default(),
            name: row.property,
            property_type: row.property_type.unwrap_or_default(),
            value: row.property_value.unwrap_or_default(),
            default: row.property_default.unwrap_or_default(),
        }
    }
}

impl ExternalVolumeProperty {
    /// Parses the JSON payload of a `STORAGE_LOCATION_<n>` property.
    pub fn storage_location(&self) -> Option<serde_json::Value> {
        if !self.name.starts_with("STORAGE_LOCATION_") {
            return None;
        }
        serde_json::from_str(&self.value).ok()
    }
}

gateway!(ExternalVolumes);

impl ExternalVolumes<'_> {
    pub async fn create(&self, request: &CreateExternalVolumeRequest) -> Result<()> {
        self.client
            .exec("create external volume", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterExternalVolumeRequest) -> Result<()> {
        self.client
            .exec("alter external volume", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropExternalVolumeRequest) -> Result<()> {
        self.client
            .exec("drop external volume", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowExternalVolumeRequest) -> Result<Vec<ExternalVolume>> {
        self.client
            .query::<_, ExternalVolumeRow, _>("show external volumes", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<ExternalVolume> {
        let request = ShowExternalVolumeRequest::new().with_like(Like::new(id.name()));
        find_by_id(
            self.show(&request).await?,
            "external volume",
            id,
            ExternalVolume::id,
        )
    }

    pub async fn describe(
        &self,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<ExternalVolumeProperty>> {
        self.client
            .query::<_, ExternalVolumePropertyRow, _>(
                "describe external volume",
                &DescribeExternalVolumeOptions::new(id.clone()),
            )
            .await
    }
}
