//! API, storage and notification integrations.
//!
//! All three share the `SHOW ... INTEGRATIONS` row shape and describe into
//! generic property rows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{Like, PropertyDetail, PropertyRow, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

/// One `SHOW <KIND> INTEGRATIONS` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationRow {
    pub name: String,
    pub integration_type: Option<String>,
    pub category: Option<String>,
    pub enabled: Option<String>,
    pub comment: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
}

impl FromRow for IntegrationRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            integration_type: row.opt("type"),
            category: row.opt("category"),
            enabled: row.opt("enabled"),
            comment: row.opt("comment"),
            created_on: row.opt_timestamp("created_on")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Integration {
    pub name: String,
    pub integration_type: String,
    pub category: String,
    pub enabled: bool,
    pub comment: String,
    pub created_on: Option<DateTime<Utc>>,
}

impl From<IntegrationRow> for Integration {
    fn from(row: IntegrationRow) -> Self {
        Self {
            name: row.name,
            integration_type: row.integration_type.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            enabled: row.enabled.as_deref().is_some_and(yes),
            comment: row.comment.unwrap_or_default(),
            created_on: row.created_on,
        }
    }
}

impl Integration {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

// API integrations.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
pub enum AwsApiProvider {
    AwsApiGateway,
    AwsPrivateApiGateway,
    AwsGovApiGateway,
    AwsGovPrivateApiGateway,
}

/// Provider-specific part of `CREATE API INTEGRATION`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiProvider {
    Aws {
        provider: AwsApiProvider,
        role_arn: String,
        api_key: Option<String>,
    },
    Azure {
        tenant_id: String,
        ad_application_id: String,
        api_key: Option<String>,
    },
    Google {
        audience: String,
    },
    Git {
        allowed_authentication_secrets: Vec<SchemaObjectIdentifier>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateApiIntegrationOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub provider: ApiProvider,
    pub api_allowed_prefixes: Vec<String>,
    pub api_blocked_prefixes: Vec<String>,
    pub enabled: bool,
    pub comment: Option<String>,
}

impl Validate for CreateApiIntegrationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateApiIntegrationOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("ApiAllowedPrefixes", &self.api_allowed_prefixes);
        match &self.provider {
            ApiProvider::Aws { role_arn, .. } => errors.required("ApiAwsRoleArn", role_arn),
            ApiProvider::Azure {
                tenant_id,
                ad_application_id,
                ..
            } => {
                errors.required("AzureTenantId", tenant_id);
                errors.required("AzureAdApplicationId", ad_application_id);
            }
            ApiProvider::Google { audience } => errors.required("GoogleAudience", audience),
            ApiProvider::Git {
                allowed_authentication_secrets,
            } => errors.identifiers("AllowedAuthenticationSecrets", allowed_authentication_secrets),
        }
        errors.finish()
    }
}

request! {
    CreateApiIntegrationRequest => CreateApiIntegrationOptions {
        flag or_replace,
        flag if_not_exists,
        vec api_blocked_prefixes: String,
        opt comment: String,
    }
}

impl CreateApiIntegrationRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        provider: ApiProvider,
        api_allowed_prefixes: impl IntoIterator<Item = String>,
        enabled: bool,
    ) -> Self {
        Self {
            options: CreateApiIntegrationOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                provider,
                api_allowed_prefixes: api_allowed_prefixes.into_iter().collect(),
                api_blocked_prefixes: Vec::new(),
                enabled,
                comment: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiIntegrationSet {
    pub aws_role_arn: Option<String>,
    pub azure_ad_application_id: Option<String>,
    pub api_key: Option<String>,
    pub enabled: Option<bool>,
    pub api_allowed_prefixes: Vec<String>,
    pub api_blocked_prefixes: Vec<String>,
    pub comment: Option<String>,
}

setters!(ApiIntegrationSet {
    opt aws_role_arn: String,
    opt azure_ad_application_id: String,
    opt api_key: String,
    val enabled: bool,
    vec api_allowed_prefixes: String,
    vec api_blocked_prefixes: String,
    opt comment: String,
});

impl Validate for ApiIntegrationSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ApiIntegrationSet");
        errors.at_least_one_of(
            &[
                "AwsRoleArn",
                "AzureAdApplicationId",
                "ApiKey",
                "Enabled",
                "ApiAllowedPrefixes",
                "ApiBlockedPrefixes",
                "Comment",
            ],
            &[
                &self.aws_role_arn,
                &self.azure_ad_application_id,
                &self.api_key,
                &self.enabled,
                &self.api_allowed_prefixes,
                &self.api_blocked_prefixes,
                &self.comment,
            ],
        );
        errors.at_most_one_of(
            &["AwsRoleArn", "AzureAdApplicationId"],
            &[&self.aws_role_arn, &self.azure_ad_application_id],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiIntegrationUnset {
    pub api_key: bool,
    pub enabled: bool,
    pub api_blocked_prefixes: bool,
    pub comment: bool,
}

setters!(ApiIntegrationUnset {
    flag api_key,
    flag enabled,
    flag api_blocked_prefixes,
    flag comment,
});

impl Validate for ApiIntegrationUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ApiIntegrationUnset");
        errors.at_least_one_of(
            &["ApiKey", "Enabled", "ApiBlockedPrefixes", "Comment"],
            &[
                &flag(self.api_key),
                &flag(self.enabled),
                &flag(self.api_blocked_prefixes),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

/// Shared shape of `ALTER <KIND> INTEGRATION`: one of set, unset or tag changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterIntegrationOptions<S, U> {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub set: Option<S>,
    pub unset: Option<U>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl<S: Validate, U: Validate> AlterIntegrationOptions<S, U> {
    fn check(&self, structure: &'static str) -> Result<()> {
        let mut errors = Errors::new(structure);
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Set", "Unset", "SetTag", "UnsetTag"],
            &[
                &flag(self.set.is_some()),
                &flag(self.unset.is_some()),
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

pub type AlterApiIntegrationOptions = AlterIntegrationOptions<ApiIntegrationSet, ApiIntegrationUnset>;

impl Validate for AlterApiIntegrationOptions {
    fn validate(&self) -> Result<()> {
        self.check("AlterApiIntegrationOptions")
    }
}

request! {
    AlterApiIntegrationRequest => AlterApiIntegrationOptions {
        flag if_exists,
        val set: ApiIntegrationSet,
        val unset: ApiIntegrationUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterApiIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterIntegrationOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropApiIntegrationOptions,
    DropApiIntegrationRequest,
    "API INTEGRATION",
    AccountObjectIdentifier
);

target_only!(
    DescribeApiIntegrationOptions,
    "DESCRIBE API INTEGRATION",
    AccountObjectIdentifier
);

show_objects!(ShowApiIntegrationOptions, ShowApiIntegrationRequest, "API INTEGRATIONS" {
    val like: Like,
});

// Storage integrations.

#[derive(Debug, Clone, PartialEq)]
pub enum StorageProvider {
    S3 {
        /// `S3`, `S3GOV` or `S3CHINA`.
        protocol: String,
        role_arn: String,
        object_acl: Option<String>,
    },
    Gcs,
    Azure {
        tenant_id: String,
    },
}

impl StorageProvider {
    pub fn s3(role_arn: impl Into<String>) -> Self {
        StorageProvider::S3 {
            protocol: "S3".to_string(),
            role_arn: role_arn.into(),
            object_acl: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStorageIntegrationOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub provider: StorageProvider,
    pub enabled: bool,
    pub storage_allowed_locations: Vec<String>,
    pub storage_blocked_locations: Vec<String>,
    pub comment: Option<String>,
}

impl Validate for CreateStorageIntegrationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateStorageIntegrationOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("StorageAllowedLocations", &self.storage_allowed_locations);
        match &self.provider {
            StorageProvider::S3 {
                protocol, role_arn, ..
            } => {
                errors.required("StorageAwsRoleArn", role_arn);
                errors.check(
                    matches!(protocol.as_str(), "S3" | "S3GOV" | "S3CHINA"),
                    || {
                        Error::invalid_value(
                            "CreateStorageIntegrationOptions",
                            "StorageProvider",
                            format!("unknown S3 protocol {protocol}"),
                        )
                    },
                );
            }
            StorageProvider::Gcs => {}
            StorageProvider::Azure { tenant_id } => errors.required("AzureTenantId", tenant_id),
        }
        errors.finish()
    }
}

request! {
    CreateStorageIntegrationRequest => CreateStorageIntegrationOptions {
        flag or_replace,
        flag if_not_exists,
        vec storage_blocked_locations: String,
        opt comment: String,
    }
}

impl CreateStorageIntegrationRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        provider: StorageProvider,
        enabled: bool,
        storage_allowed_locations: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            options: CreateStorageIntegrationOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                provider,
                enabled,
                storage_allowed_locations: storage_allowed_locations.into_iter().collect(),
                storage_blocked_locations: Vec::new(),
                comment: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageIntegrationSet {
    pub s3_role_arn: Option<String>,
    pub s3_object_acl: Option<String>,
    pub azure_tenant_id: Option<String>,
    pub enabled: Option<bool>,
    pub storage_allowed_locations: Vec<String>,
    pub storage_blocked_locations: Vec<String>,
    pub comment: Option<String>,
}

setters!(StorageIntegrationSet {
    opt s3_role_arn: String,
    opt s3_object_acl: String,
    opt azure_tenant_id: String,
    val enabled: bool,
    vec storage_allowed_locations: String,
    vec storage_blocked_locations: String,
    opt comment: String,
});

impl Validate for StorageIntegrationSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StorageIntegrationSet");
        errors.at_least_one_of(
            &[
                "S3RoleArn",
                "S3ObjectAcl",
                "AzureTenantId",
                "Enabled",
                "StorageAllowedLocations",
                "StorageBlockedLocations",
                "Comment",
            ],
            &[
                &self.s3_role_arn,
                &self.s3_object_acl,
                &self.azure_tenant_id,
                &self.enabled,
                &self.storage_allowed_locations,
                &self.storage_blocked_locations,
                &self.comment,
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageIntegrationUnset {
    pub storage_aws_object_acl: bool,
    pub enabled: bool,
    pub storage_blocked_locations: bool,
    pub comment: bool,
}

setters!(StorageIntegrationUnset {
    flag storage_aws_object_acl,
    flag enabled,
    flag storage_blocked_locations,
    flag comment,
});

impl Validate for StorageIntegrationUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("StorageIntegrationUnset");
        errors.at_least_one_of(
            &["StorageAwsObjectAcl", "Enabled", "StorageBlockedLocations", "Comment"],
            &[
                &flag(self.storage_aws_object_acl),
                &flag(self.enabled),
                &flag(self.storage_blocked_locations),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

pub type AlterStorageIntegrationOptions =
    AlterIntegrationOptions<StorageIntegrationSet, StorageIntegrationUnset>;

impl Validate for AlterStorageIntegrationOptions {
    fn validate(&self) -> Result<()> {
        self.check("AlterStorageIntegrationOptions")
    }
}

request! {
    AlterStorageIntegrationRequest => AlterStorageIntegrationOptions {
        flag if_exists,
        val set: StorageIntegrationSet,
        val unset: StorageIntegrationUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterStorageIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterIntegrationOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropStorageIntegrationOptions,
    DropStorageIntegrationRequest,
    "STORAGE INTEGRATION",
    AccountObjectIdentifier
);

target_only!(
    DescribeStorageIntegrationOptions,
    "DESCRIBE STORAGE INTEGRATION",
    AccountObjectIdentifier
);

show_objects!(ShowStorageIntegrationOptions, ShowStorageIntegrationRequest, "STORAGE INTEGRATIONS" {
    val like: Like,
});

// Notification integrations.

/// The three notification flavours.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationTarget {
    /// Inbound cloud queue messages for auto-ingest and auto-refresh.
    AutoGcpPubsub { subscription_name: String },
    AutoAzureStorageQueue {
        primary_uri: String,
        tenant_id: String,
    },
    /// Outbound push notifications.
    PushAwsSns { topic_arn: String, role_arn: String },
    PushGcpPubsub { topic_name: String },
    PushAzureEventGrid {
        topic_endpoint: String,
        tenant_id: String,
    },
    Email { allowed_recipients: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateNotificationIntegrationOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub enabled: bool,
    pub target: NotificationTarget,
    pub comment: Option<String>,
}

impl Validate for CreateNotificationIntegrationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateNotificationIntegrationOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        match &self.target {
            NotificationTarget::AutoGcpPubsub { subscription_name } => {
                errors.required("GcpPubsubSubscriptionName", subscription_name)
            }
            NotificationTarget::AutoAzureStorageQueue {
                primary_uri,
                tenant_id,
            } => {
                errors.required("AzureStorageQueuePrimaryUri", primary_uri);
                errors.required("AzureTenantId", tenant_id);
            }
            NotificationTarget::PushAwsSns {
                topic_arn,
                role_arn,
            } => {
                errors.required("AwsSnsTopicArn", topic_arn);
                errors.required("AwsSnsRoleArn", role_arn);
            }
            NotificationTarget::PushGcpPubsub { topic_name } => {
                errors.required("GcpPubsubTopicName", topic_name)
            }
            NotificationTarget::PushAzureEventGrid {
                topic_endpoint,
                tenant_id,
            } => {
                errors.required("AzureEventGridTopicEndpoint", topic_endpoint);
                errors.required("AzureTenantId", tenant_id);
            }
            NotificationTarget::Email { .. } => {}
        }
        errors.finish()
    }
}

request! {
    CreateNotificationIntegrationRequest => CreateNotificationIntegrationOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreateNotificationIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier, enabled: bool, target: NotificationTarget) -> Self {
        Self {
            options: CreateNotificationIntegrationOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                enabled,
                target,
                comment: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationIntegrationSet {
    pub enabled: Option<bool>,
    pub allowed_recipients: Vec<String>,
    pub comment: Option<String>,
}

setters!(NotificationIntegrationSet {
    val enabled: bool,
    vec allowed_recipients: String,
    opt comment: String,
});

impl Validate for NotificationIntegrationSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("NotificationIntegrationSet");
        errors.at_least_one_of(
            &["Enabled", "AllowedRecipients", "Comment"],
            &[&self.enabled, &self.allowed_recipients, &self.comment],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationIntegrationUnset {
    pub enabled: bool,
    pub allowed_recipients: bool,
    pub comment: bool,
}

setters!(NotificationIntegrationUnset {
    flag enabled,
    flag allowed_recipients,
    flag comment,
});

impl Validate for NotificationIntegrationUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("NotificationIntegrationUnset");
        errors.at_least_one_of(
            &["Enabled", "AllowedRecipients", "Comment"],
            &[
                &flag(self.enabled),
                &flag(self.allowed_recipients),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

pub type AlterNotificationIntegrationOptions =
    AlterIntegrationOptions<NotificationIntegrationSet, NotificationIntegrationUnset>;

impl Validate for AlterNotificationIntegrationOptions {
    fn validate(&self) -> Result<()> {
        self.check("AlterNotificationIntegrationOptions")
    }
}

request! {
    AlterNotificationIntegrationRequest => AlterNotificationIntegrationOptions {
        flag if_exists,
        val set: NotificationIntegrationSet,
        val unset: NotificationIntegrationUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterNotificationIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterIntegrationOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropNotificationIntegrationOptions,
    DropNotificationIntegrationRequest,
    "NOTIFICATION INTEGRATION",
    AccountObjectIdentifier
);

target_only!(
    DescribeNotificationIntegrationOptions,
    "DESCRIBE NOTIFICATION INTEGRATION",
    AccountObjectIdentifier
);

show_objects!(
    ShowNotificationIntegrationOptions,
    ShowNotificationIntegrationRequest,
    "NOTIFICATION INTEGRATIONS" {
        val like: Like,
    }
);

// Gateways.

macro_rules! integration_gateway {
    (
        $gateway:ident, $label:literal,
        $create:ident, $alter:ident, $drop:ident, $show:ident, $describe:ident
    ) => {
        gateway!($gateway);

        impl $gateway<'_> {
            pub async fn create(&self, request: &$create) -> Result<()> {
                self.client
                    .exec(concat!("create ", $label), &request.to_options())
                    .await
            }

            pub async fn alter(&self, request: &$alter) -> Result<()> {
                self.client
                    .exec(concat!("alter ", $label), &request.to_options())
                    .await
            }

            pub async fn drop(&self, request: &$drop) -> Result<()> {
                self.client
                    .exec(concat!("drop ", $label), &request.to_options())
                    .await
            }

            pub async fn show(&self, request: &$show) -> Result<Vec<Integration>> {
                self.client
                    .query::<_, IntegrationRow, _>(
                        concat!("show ", $label, "s"),
                        &request.to_options(),
                    )
                    .await
            }

            pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Integration> {
                let request = $show::new().with_like(Like::new(id.name()));
                find_by_id(self.show(&request).await?, $label, id, Integration::id)
            }

            pub async fn describe(
                &self,
                id: &AccountObjectIdentifier,
            ) -> Result<Vec<PropertyDetail>> {
                self.client
                    .query::<_, PropertyRow, _>(
                        concat!("describe ", $label),
                        &$describe::new(id.clone()),
                    )
                    .await
            }
        }
    };
}

integration_gateway!(
    ApiIntegrations,
    "api integration",
    CreateApiIntegrationRequest,
    AlterApiIntegrationRequest,
    DropApiIntegrationRequest,
    ShowApiIntegrationRequest,
    DescribeApiIntegrationOptions
);

integration_gateway!(
    StorageIntegrations,
    "storage integration",
    CreateStorageIntegrationRequest,
    AlterStorageIntegrationRequest,
    DropStorageIntegrationRequest,
    ShowStorageIntegrationRequest,
    DescribeStorageIntegrationOptions
);

integration_gateway!(
    NotificationIntegrations,
    "notification integration",
    CreateNotificationIntegrationRequest,
    AlterNotificationIntegrationRequest,
    DropNotificationIntegrationRequest,
    ShowNotificationIntegrationRequest,
    DescribeNotificationIntegrationOptions
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("I1")
    }

    #[test]
    fn test_api_requires_prefixes() {
        let opts = CreateApiIntegrationRequest::new(
            id(),
            ApiProvider::Google {
                audience: "aud".into(),
            },
            Vec::new(),
            true,
        )
        .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_storage_s3_protocol() {
        let provider = StorageProvider::S3 {
            protocol: "S4".into(),
            role_arn: "arn".into(),
            object_acl: None,
        };
        let opts =
            CreateStorageIntegrationRequest::new(id(), provider, true, ["s3://b/".to_string()])
                .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_exactly_one() {
        let opts = AlterNotificationIntegrationRequest::new(id())
            .with_set(NotificationIntegrationSet::default().with_enabled(false))
            .with_unset(NotificationIntegrationUnset::default().with_comment(true))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("name", Some("I1")),
            ("type", Some("EXTERNAL_API")),
            ("category", Some("API")),
            ("enabled", Some("true")),
        ]);
        let integration = Integration::from(IntegrationRow::from_row(&row).unwrap());
        assert!(integration.enabled);
        assert_eq!(integration.category, "API");
        assert_eq!(integration.id(), id());
    }
}
