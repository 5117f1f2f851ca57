//! Application packages: versions, patches and release directives.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{Like, LimitFrom, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::Result;
use crate::identifiers::{AccountIdentifier, AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Distribution {
    Internal,
    External,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateApplicationPackageOptions {
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
    pub distribution: Option<Distribution>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateApplicationPackageOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateApplicationPackageOptions");
        errors.identifier("name", &self.name);
        errors.range("DataRetentionTimeInDays", self.data_retention_time_in_days, 0, 90);
        errors.range(
            "MaxDataExtensionTimeInDays",
            self.max_data_extension_time_in_days,
            0,
            90,
        );
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateApplicationPackageRequest => CreateApplicationPackageOptions {
        flag if_not_exists,
        val data_retention_time_in_days: i64,
        val max_data_extension_time_in_days: i64,
        opt default_ddl_collation: String,
        opt comment: String,
        val distribution: Distribution,
        vec tag: TagAssociation,
    }
}

impl CreateApplicationPackageRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: CreateApplicationPackageOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationPackageSet {
    pub data_retention_time_in_days: Option<i64>,
    pub max_data_extension_time_in_days: Option<i64>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
    pub distribution: Option<Distribution>,
}

setters!(ApplicationPackageSet {
    val data_retention_time_in_days: i64,
    val max_data_extension_time_in_days: i64,
    opt default_ddl_collation: String,
    opt comment: String,
    val distribution: Distribution,
});

impl Validate for ApplicationPackageSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ApplicationPackageSet");
        errors.at_least_one_of(
            &[
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "DefaultDdlCollation",
                "Comment",
                "Distribution",
            ],
            &[
                &self.data_retention_time_in_days,
                &self.max_data_extension_time_in_days,
                &self.default_ddl_collation,
                &self.comment,
                &self.distribution,
            ],
        );
        errors.range("DataRetentionTimeInDays", self.data_retention_time_in_days, 0, 90);
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
pub struct ApplicationPackageUnset {
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub default_ddl_collation: bool,
    pub comment: bool,
    pub distribution: bool,
}

setters!(ApplicationPackageUnset {
    flag data_retention_time_in_days,
    flag max_data_extension_time_in_days,
    flag default_ddl_collation,
    flag comment,
    flag distribution,
});

impl ApplicationPackageUnset {
    pub(crate) fn properties(&self) -> [(bool, &'static str); 5] {
        [
            (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
            (
                self.max_data_extension_time_in_days,
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
            ),
            (self.default_ddl_collation, "DEFAULT_DDL_COLLATION"),
            (self.comment, "COMMENT"),
            (self.distribution, "DISTRIBUTION"),
        ]
    }
}

impl Validate for ApplicationPackageUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ApplicationPackageUnset");
        let set = self.properties().iter().any(|(on, _)| *on);
        errors.at_least_one_of(
            &[
                "DataRetentionTimeInDays",
                "MaxDataExtensionTimeInDays",
                "DefaultDdlCollation",
                "Comment",
                "Distribution",
            ],
            &[&flag(set)],
        );
        errors.finish()
    }
}

/// `VERSION = <v> PATCH = <n>` as used by release directives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseTarget {
    pub version: String,
    pub patch: u32,
}

impl ReleaseTarget {
    pub fn new(version: impl Into<String>, patch: u32) -> Self {
        Self {
            version: version.into(),
            patch,
        }
    }
}

impl Validate for ReleaseTarget {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ReleaseTarget");
        errors.required("Version", &self.version);
        errors.finish()
    }
}

/// `SET RELEASE DIRECTIVE <name> ACCOUNTS = (...) VERSION = <v> PATCH = <n>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetReleaseDirective {
    pub name: String,
    pub accounts: Vec<AccountIdentifier>,
    pub target: ReleaseTarget,
}

impl Validate for SetReleaseDirective {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SetReleaseDirective");
        errors.required("Name", &self.name);
        errors.required("Accounts", &self.accounts);
        errors.identifiers("Accounts", &self.accounts);
        errors.nested(Some(&self.target));
        errors.finish()
    }
}

/// `MODIFY RELEASE DIRECTIVE <name> VERSION = <v> PATCH = <n>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifyReleaseDirective {
    pub name: String,
    pub target: ReleaseTarget,
}

impl Validate for ModifyReleaseDirective {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ModifyReleaseDirective");
        errors.required("Name", &self.name);
        errors.nested(Some(&self.target));
        errors.finish()
    }
}

/// `ADD VERSION [<v>] USING '<path>' [LABEL = '<label>']`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddVersion {
    pub version: Option<String>,
    pub using: String,
    pub label: Option<String>,
}

impl AddVersion {
    pub fn new(using: impl Into<String>) -> Self {
        Self {
            using: using.into(),
            ..Default::default()
        }
    }
}

setters!(AddVersion {
    opt version: String,
    opt label: String,
});

impl Validate for AddVersion {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AddVersion");
        errors.required("Using", &self.using);
        errors.finish()
    }
}

/// `ADD PATCH [<n>] FOR VERSION <v> USING '<path>' [LABEL = '<label>']`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddPatchForVersion {
    pub patch: Option<u32>,
    pub version: String,
    pub using: String,
    pub label: Option<String>,
}

impl AddPatchForVersion {
    pub fn new(version: impl Into<String>, using: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            using: using.into(),
            ..Default::default()
        }
    }
}

setters!(AddPatchForVersion {
    val patch: u32,
    opt label: String,
});

impl Validate for AddPatchForVersion {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AddPatchForVersion");
        errors.required("Version", &self.version);
        errors.required("Using", &self.using);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterApplicationPackageOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub set: Option<ApplicationPackageSet>,
    pub unset: Option<ApplicationPackageUnset>,
    pub modify_release_directive: Option<ModifyReleaseDirective>,
    pub set_default_release_directive: Option<ReleaseTarget>,
    pub set_release_directive: Option<SetReleaseDirective>,
    pub unset_release_directive: Option<String>,
    pub add_version: Option<AddVersion>,
    pub drop_version: Option<String>,
    pub add_patch_for_version: Option<AddPatchForVersion>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterApplicationPackageOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterApplicationPackageOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "Set",
                "Unset",
                "ModifyReleaseDirective",
                "SetDefaultReleaseDirective",
                "SetReleaseDirective",
                "UnsetReleaseDirective",
                "AddVersion",
                "DropVersion",
                "AddPatchForVersion",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &self.set,
                &self.unset,
                &self.modify_release_directive,
                &self.set_default_release_directive,
                &self.set_release_directive,
                &self.unset_release_directive,
                &self.add_version,
                &self.drop_version,
                &self.add_patch_for_version,
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.nested(self.modify_release_directive.as_ref());
        errors.nested(self.set_default_release_directive.as_ref());
        errors.nested(self.set_release_directive.as_ref());
        errors.nested(self.add_version.as_ref());
        errors.nested(self.add_patch_for_version.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterApplicationPackageRequest => AlterApplicationPackageOptions {
        flag if_exists,
        val set: ApplicationPackageSet,
        val unset: ApplicationPackageUnset,
        val modify_release_directive: ModifyReleaseDirective,
        val set_default_release_directive: ReleaseTarget,
        val set_release_directive: SetReleaseDirective,
        opt unset_release_directive: String,
        val add_version: AddVersion,
        opt drop_version: String,
        val add_patch_for_version: AddPatchForVersion,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterApplicationPackageRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterApplicationPackageOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropApplicationPackageOptions,
    DropApplicationPackageRequest,
    "APPLICATION PACKAGE",
    AccountObjectIdentifier
);

show_objects!(ShowApplicationPackageOptions, ShowApplicationPackageRequest, "APPLICATION PACKAGES" {
    val like: Like,
    opt starts_with: String,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationPackageRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: Option<String>,
    pub is_current: Option<String>,
    pub distribution: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub retention_time: Option<i64>,
    pub options: Option<String>,
    pub dropped_on: Option<DateTime<Utc>>,
    pub application_class: Option<String>,
}

impl FromRow for ApplicationPackageRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            is_default: row.opt("is_default"),
            is_current: row.opt("is_current"),
            distribution: row.opt("distribution"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            retention_time: row.opt_i64("retention_time")?,
            options: row.opt("options"),
            dropped_on: row.opt_timestamp("dropped_on")?,
            application_class: row.opt("application_class"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationPackage {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub distribution: Option<Distribution>,
    pub owner: String,
    pub comment: String,
    pub retention_time: Option<i64>,
    pub options: String,
    pub dropped_on: Option<DateTime<Utc>>,
    pub application_class: String,
}

impl From<ApplicationPackageRow> for ApplicationPackage {
    fn from(row: ApplicationPackageRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.as_deref().is_some_and(yes),
            is_current: row.is_current.as_deref().is_some_and(yes),
            distribution: row.distribution.as_deref().and_then(parse_token),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            retention_time: row.retention_time,
            options: row.options.unwrap_or_default(),
            dropped_on: row.dropped_on,
            application_class: row.application_class.unwrap_or_default(),
        }
    }
}

impl ApplicationPackage {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

gateway!(ApplicationPackages);

impl ApplicationPackages<'_> {
    pub async fn create(&self, request: &CreateApplicationPackageRequest) -> Result<()> {
        self.client
            .exec("create application package", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterApplicationPackageRequest) -> Result<()> {
        self.client
            .exec("alter application package", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropApplicationPackageRequest) -> Result<()> {
        self.client
            .exec("drop application package", &request.to_options())
            .await
    }

    pub async fn show(
        &self,
        request: &ShowApplicationPackageRequest,
    ) -> Result<Vec<ApplicationPackage>> {
        self.client
            .query::<_, ApplicationPackageRow, _>(
                "show application packages",
                &request.to_options(),
            )
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<ApplicationPackage> {
        let request = ShowApplicationPackageRequest::new().with_like(Like::new(id.name()));
        find_by_id(
            self.show(&request).await?,
            "application package",
            id,
            ApplicationPackage::id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("PKG")
    }

    #[test]
    fn test_retention_range() {
        let opts = CreateApplicationPackageRequest::new(id())
            .with_data_retention_time_in_days(91)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_exactly_one() {
        let opts = AlterApplicationPackageRequest::new(id())
            .with_drop_version("V1")
            .with_unset_release_directive("EARLY")
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        let empty_unset = AlterApplicationPackageRequest::new(id())
            .with_unset(ApplicationPackageUnset::default())
            .to_options();
        assert_eq!(
            empty_unset.validate().unwrap_err().kind(),
            Some(ErrorKind::AtLeastOneOf)
        );
    }

    #[test]
    fn test_release_directive_needs_accounts() {
        let opts = AlterApplicationPackageRequest::new(id())
            .with_set_release_directive(SetReleaseDirective {
                name: "EARLY".into(),
                accounts: vec![],
                target: ReleaseTarget::new("V1", 0),
            })
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_row() {
        let row = Row::new([
            ("name", Some("PKG")),
            ("distribution", Some("INTERNAL")),
            ("retention_time", Some("1")),
        ]);
        let package = ApplicationPackage::from(ApplicationPackageRow::from_row(&row).unwrap());
        assert_eq!(package.distribution, Some(Distribution::Internal));
        assert_eq!(package.retention_time, Some(1));
    }
}
