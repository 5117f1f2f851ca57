//! Native applications installed from an application package.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{Like, LimitFrom, PropertyDetail, PropertyRow, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

/// `USING VERSION <v> [PATCH <n>]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionAndPatch {
    pub version: String,
    pub patch: Option<u32>,
}

impl VersionAndPatch {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            patch: None,
        }
    }

    pub fn with_patch(mut self, patch: u32) -> Self {
        self.patch = Some(patch);
        self
    }
}

impl Validate for VersionAndPatch {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("VersionAndPatch");
        errors.required("Version", &self.version);
        errors.finish()
    }
}

/// Which package code a new application is installed from.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationVersion {
    Version(VersionAndPatch),
    ReleaseDirective(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateApplicationOptions {
    pub name: AccountObjectIdentifier,
    pub package_name: AccountObjectIdentifier,
    pub version: Option<ApplicationVersion>,
    pub debug_mode: Option<bool>,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateApplicationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateApplicationOptions");
        errors.identifier("name", &self.name);
        errors.identifier("PackageName", &self.package_name);
        match &self.version {
            Some(ApplicationVersion::Version(version)) => errors.nested(Some(version)),
            Some(ApplicationVersion::ReleaseDirective(directive)) => {
                errors.required("ReleaseDirective", directive)
            }
            None => {}
        }
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateApplicationRequest => CreateApplicationOptions {
        val version: ApplicationVersion,
        val debug_mode: bool,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateApplicationRequest {
    pub fn new(name: AccountObjectIdentifier, package_name: AccountObjectIdentifier) -> Self {
        Self {
            options: CreateApplicationOptions {
                name,
                package_name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationSet {
    pub comment: Option<String>,
    pub share_events_with_provider: Option<bool>,
    pub debug_mode: Option<bool>,
}

setters!(ApplicationSet {
    opt comment: String,
    val share_events_with_provider: bool,
    val debug_mode: bool,
});

impl Validate for ApplicationSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ApplicationSet");
        errors.at_least_one_of(
            &["Comment", "ShareEventsWithProvider", "DebugMode"],
            &[&self.comment, &self.share_events_with_provider, &self.debug_mode],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationUnset {
    pub comment: bool,
    pub share_events_with_provider: bool,
    pub debug_mode: bool,
}

setters!(ApplicationUnset {
    flag comment,
    flag share_events_with_provider,
    flag debug_mode,
});

impl Validate for ApplicationUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ApplicationUnset");
        errors.at_least_one_of(
            &["Comment", "ShareEventsWithProvider", "DebugMode"],
            &[
                &flag(self.comment),
                &flag(self.share_events_with_provider),
                &flag(self.debug_mode),
            ],
        );
        errors.finish()
    }
}

/// `UPGRADE [USING VERSION <v> [PATCH <n>]]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationUpgrade {
    pub using: Option<VersionAndPatch>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterApplicationOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub set: Option<ApplicationSet>,
    pub unset: Option<ApplicationUnset>,
    pub upgrade: Option<ApplicationUpgrade>,
    pub unset_references: bool,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterApplicationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterApplicationOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Set", "Unset", "Upgrade", "UnsetReferences", "SetTag", "UnsetTag"],
            &[
                &self.set,
                &self.unset,
                &self.upgrade,
                &flag(self.unset_references),
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.nested(self.upgrade.as_ref().and_then(|upgrade| upgrade.using.as_ref()));
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterApplicationRequest => AlterApplicationOptions {
        flag if_exists,
        val set: ApplicationSet,
        val unset: ApplicationUnset,
        val upgrade: ApplicationUpgrade,
        flag unset_references,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterApplicationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterApplicationOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropApplicationOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub cascade: bool,
}

impl Validate for DropApplicationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DropApplicationOptions");
        errors.identifier("name", &self.name);
        errors.finish()
    }
}

request! {
    DropApplicationRequest => DropApplicationOptions {
        flag if_exists,
        flag cascade,
    }
}

impl DropApplicationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: DropApplicationOptions {
                name,
                ..Default::default()
            },
        }
    }
}

target_only!(
    DescribeApplicationOptions,
    "DESCRIBE APPLICATION",
    AccountObjectIdentifier
);

show_objects!(ShowApplicationOptions, ShowApplicationRequest, "APPLICATIONS" {
    val like: Like,
    opt starts_with: String,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: Option<String>,
    pub is_current: Option<String>,
    pub source_type: Option<String>,
    pub source: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub version: Option<String>,
    pub label: Option<String>,
    pub patch: Option<i64>,
    pub options: Option<String>,
    pub retention_time: Option<i64>,
}

impl FromRow for ApplicationRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            is_default: row.opt("is_default"),
            is_current: row.opt("is_current"),
            source_type: row.opt("source_type"),
            source: row.opt("source"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            version: row.opt("version"),
            label: row.opt("label"),
            patch: row.opt_i64("patch")?,
            options: row.opt("options"),
            retention_time: row.opt_i64("retention_time")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub source_type: String,
    pub source: String,
    pub owner: String,
    pub comment: String,
    pub version: String,
    pub label: String,
    pub patch: Option<i64>,
    pub options: String,
    pub retention_time: Option<i64>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.as_deref().is_some_and(yes),
            is_current: row.is_current.as_deref().is_some_and(yes),
            source_type: row.source_type.unwrap_or_default(),
            source: row.source.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            version: row.version.unwrap_or_default(),
            label: row.label.unwrap_or_default(),
            patch: row.patch,
            options: row.options.unwrap_or_default(),
            retention_time: row.retention_time,
        }
    }
}

impl Application {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

gateway!(Applications);

impl Applications<'_> {
    pub async fn create(&self, request: &CreateApplicationRequest) -> Result<()> {
        self.client
            .exec("create application", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterApplicationRequest) -> Result<()> {
        self.client
            .exec("alter application", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropApplicationRequest) -> Result<()> {
        self.client
            .exec("drop application", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowApplicationRequest) -> Result<Vec<Application>> {
        self.client
            .query::<_, ApplicationRow, _>("show applications", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Application> {
        let request = ShowApplicationRequest::new().with_like(Like::new(id.name()));
        find_by_id(
            self.show(&request).await?,
            "application",
            id,
            Application::id,
        )
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe application",
                &DescribeApplicationOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("APP")
    }

    #[test]
    fn test_create_version_required() {
        let opts = CreateApplicationRequest::new(id(), AccountObjectIdentifier::new("PKG"))
            .with_version(ApplicationVersion::Version(VersionAndPatch::new("")))
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_alter_validation() {
        let empty_set = AlterApplicationRequest::new(id())
            .with_set(ApplicationSet::default())
            .to_options();
        assert_eq!(
            empty_set.validate().unwrap_err().kind(),
            Some(ErrorKind::AtLeastOneOf)
        );
        let upgrade = AlterApplicationRequest::new(id())
            .with_upgrade(ApplicationUpgrade::default())
            .to_options();
        assert!(upgrade.validate().is_ok());
    }

    #[test]
    fn test_row() {
        let row = Row::new([
            ("name", Some("APP")),
            ("source_type", Some("APPLICATION PACKAGE")),
            ("source", Some("PKG")),
            ("version", Some("V1")),
            ("patch", Some("2")),
            ("is_default", Some("N")),
        ]);
        let app = Application::from(ApplicationRow::from_row(&row).unwrap());
        assert_eq!(app.patch, Some(2));
        assert_eq!(app.source, "PKG");
        assert!(!app.is_default);
    }
}
