//! Security integrations: OAuth, SAML2, SCIM and outbound API authentication.

use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{Like, PropertyDetail, PropertyRow, TagAssociation};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::objects::integration::{Integration, IntegrationRow};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalOauthType {
    Okta,
    Azure,
    PingFederate,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserMappingAttribute {
    LoginName,
    EmailAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OauthPartnerClient {
    TableauDesktop,
    TableauServer,
    Looker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OauthClientType {
    Public,
    Confidential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ScimClient {
    Okta,
    Azure,
    Generic,
}

/// `TYPE = API_AUTHENTICATION AUTH_TYPE = OAUTH2` with the client-credentials grant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiAuthenticationClientCredentials {
    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_token_endpoint: Option<String>,
    pub oauth_client_auth_method: Option<String>,
    pub oauth_access_token_validity: Option<i64>,
    pub oauth_refresh_token_validity: Option<i64>,
    pub oauth_allowed_scopes: Vec<String>,
}

setters!(ApiAuthenticationClientCredentials {
    opt oauth_token_endpoint: String,
    opt oauth_client_auth_method: String,
    val oauth_access_token_validity: i64,
    val oauth_refresh_token_validity: i64,
    vec oauth_allowed_scopes: String,
});

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalOauth {
    pub oauth_type: ExternalOauthType,
    pub issuer: String,
    pub token_user_mapping_claim: Vec<String>,
    pub snowflake_user_mapping_attribute: UserMappingAttribute,
    pub jws_keys_url: Vec<String>,
    pub rsa_public_key: Option<String>,
    pub blocked_roles_list: Vec<AccountObjectIdentifier>,
    pub allowed_roles_list: Vec<AccountObjectIdentifier>,
    pub audience_list: Vec<String>,
    pub any_role_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OauthPartner {
    pub client: OauthPartnerClient,
    pub redirect_uri: Option<String>,
    pub issue_refresh_tokens: Option<bool>,
    pub refresh_token_validity: Option<i64>,
    pub blocked_roles_list: Vec<AccountObjectIdentifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OauthCustom {
    pub client_type: OauthClientType,
    pub redirect_uri: String,
    pub allow_non_tls_redirect_uri: Option<bool>,
    pub enforce_pkce: Option<bool>,
    pub use_secondary_roles: Option<String>,
    pub pre_authorized_roles_list: Vec<AccountObjectIdentifier>,
    pub blocked_roles_list: Vec<AccountObjectIdentifier>,
    pub issue_refresh_tokens: Option<bool>,
    pub refresh_token_validity: Option<i64>,
    pub network_policy: Option<AccountObjectIdentifier>,
    pub client_rsa_public_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Saml2 {
    pub issuer: String,
    pub sso_url: String,
    pub provider: String,
    pub x509_cert: String,
    pub allowed_user_domains: Vec<String>,
    pub allowed_email_patterns: Vec<String>,
    pub sp_initiated_login_page_label: Option<String>,
    pub enable_sp_initiated: Option<bool>,
    pub snowflake_issuer_url: Option<String>,
    pub snowflake_acs_url: Option<String>,
    pub requested_nameid_format: Option<String>,
    pub post_logout_redirect_url: Option<String>,
    pub force_authn: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scim {
    pub client: ScimClient,
    pub run_as_role: String,
    pub network_policy: Option<AccountObjectIdentifier>,
    pub sync_password: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SecurityIntegrationKind {
    ApiAuthentication(ApiAuthenticationClientCredentials),
    ExternalOauth(ExternalOauth),
    OauthPartner(OauthPartner),
    OauthCustom(OauthCustom),
    Saml2(Saml2),
    Scim(Scim),
}

impl SecurityIntegrationKind {
    fn check(&self, errors: &mut Errors) {
        let structure = errors.structure();
        match self {
            SecurityIntegrationKind::ApiAuthentication(api) => {
                errors.required("OauthClientId", &api.oauth_client_id);
                errors.required("OauthClientSecret", &api.oauth_client_secret);
            }
            SecurityIntegrationKind::ExternalOauth(oauth) => {
                errors.required("ExternalOauthIssuer", &oauth.issuer);
                errors.required("ExternalOauthTokenUserMappingClaim", &oauth.token_user_mapping_claim);
                errors.exactly_one_of(
                    &["ExternalOauthJwsKeysUrl", "ExternalOauthRsaPublicKey"],
                    &[&oauth.jws_keys_url, &oauth.rsa_public_key],
                );
                errors.at_most_one_of(
                    &["ExternalOauthBlockedRolesList", "ExternalOauthAllowedRolesList"],
                    &[&oauth.blocked_roles_list, &oauth.allowed_roles_list],
                );
                errors.identifiers("ExternalOauthBlockedRolesList", &oauth.blocked_roles_list);
                errors.identifiers("ExternalOauthAllowedRolesList", &oauth.allowed_roles_list);
            }
            SecurityIntegrationKind::OauthPartner(partner) => {
                errors.check(
                    partner.client != OauthPartnerClient::Looker || partner.redirect_uri.is_some(),
                    || Error::missing_required(structure, "OauthRedirectUri"),
                );
                errors.identifiers("BlockedRolesList", &partner.blocked_roles_list);
            }
            SecurityIntegrationKind::OauthCustom(custom) => {
                errors.required("OauthRedirectUri", &custom.redirect_uri);
                errors.identifiers("PreAuthorizedRolesList", &custom.pre_authorized_roles_list);
                errors.identifiers("BlockedRolesList", &custom.blocked_roles_list);
                errors.optional_identifier("NetworkPolicy", custom.network_policy.as_ref());
            }
            SecurityIntegrationKind::Saml2(saml) => {
                errors.required("Saml2Issuer", &saml.issuer);
                errors.required("Saml2SsoUrl", &saml.sso_url);
                errors.required("Saml2Provider", &saml.provider);
                errors.required("Saml2X509Cert", &saml.x509_cert);
            }
            SecurityIntegrationKind::Scim(scim) => {
                errors.required("RunAsRole", &scim.run_as_role);
                errors.optional_identifier("NetworkPolicy", scim.network_policy.as_ref());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecurityIntegrationOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub kind: SecurityIntegrationKind,
    pub enabled: Option<bool>,
    pub comment: Option<String>,
}

impl Validate for CreateSecurityIntegrationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSecurityIntegrationOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        self.kind.check(&mut errors);
        errors.finish()
    }
}

request! {
    CreateSecurityIntegrationRequest => CreateSecurityIntegrationOptions {
        flag or_replace,
        flag if_not_exists,
        val enabled: bool,
        opt comment: String,
    }
}

impl CreateSecurityIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier, kind: SecurityIntegrationKind) -> Self {
        Self {
            options: CreateSecurityIntegrationOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                kind,
                enabled: None,
                comment: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityIntegrationSet {
    pub enabled: Option<bool>,
    pub network_policy: Option<AccountObjectIdentifier>,
    pub sync_password: Option<bool>,
    pub oauth_redirect_uri: Option<String>,
    pub oauth_issue_refresh_tokens: Option<bool>,
    pub oauth_refresh_token_validity: Option<i64>,
    pub blocked_roles_list: Option<Vec<AccountObjectIdentifier>>,
    pub saml2_enable_sp_initiated: Option<bool>,
    pub saml2_force_authn: Option<bool>,
    pub comment: Option<String>,
}

setters!(SecurityIntegrationSet {
    val enabled: bool,
    opt network_policy: AccountObjectIdentifier,
    val sync_password: bool,
    opt oauth_redirect_uri: String,
    val oauth_issue_refresh_tokens: bool,
    val oauth_refresh_token_validity: i64,
    val blocked_roles_list: Vec<AccountObjectIdentifier>,
    val saml2_enable_sp_initiated: bool,
    val saml2_force_authn: bool,
    opt comment: String,
});

impl Validate for SecurityIntegrationSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SecurityIntegrationSet");
        errors.at_least_one_of(
            &[
                "Enabled",
                "NetworkPolicy",
                "SyncPassword",
                "OauthRedirectUri",
                "OauthIssueRefreshTokens",
                "OauthRefreshTokenValidity",
                "BlockedRolesList",
                "Saml2EnableSpInitiated",
                "Saml2ForceAuthn",
                "Comment",
            ],
            &[
                &self.enabled,
                &self.network_policy,
                &self.sync_password,
                &self.oauth_redirect_uri,
                &self.oauth_issue_refresh_tokens,
                &self.oauth_refresh_token_validity,
                &self.blocked_roles_list,
                &self.saml2_enable_sp_initiated,
                &self.saml2_force_authn,
                &self.comment,
            ],
        );
        errors.optional_identifier("NetworkPolicy", self.network_policy.as_ref());
        if let Some(roles) = &self.blocked_roles_list {
            errors.identifiers("BlockedRolesList", roles);
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityIntegrationUnset {
    pub enabled: bool,
    pub network_policy: bool,
    pub sync_password: bool,
    pub saml2_force_authn: bool,
    pub comment: bool,
}

setters!(SecurityIntegrationUnset {
    flag enabled,
    flag network_policy,
    flag sync_password,
    flag saml2_force_authn,
    flag comment,
});

impl Validate for SecurityIntegrationUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SecurityIntegrationUnset");
        errors.at_least_one_of(
            &["Enabled", "NetworkPolicy", "SyncPassword", "Saml2ForceAuthn", "Comment"],
            &[
                &flag(self.enabled),
                &flag(self.network_policy),
                &flag(self.sync_password),
                &flag(self.saml2_force_authn),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterSecurityIntegrationOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub set: Option<SecurityIntegrationSet>,
    pub unset: Option<SecurityIntegrationUnset>,
    pub refresh_saml2_private_key: bool,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterSecurityIntegrationOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterSecurityIntegrationOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Set", "Unset", "RefreshSaml2SnowflakePrivateKey", "SetTag", "UnsetTag"],
            &[
                &self.set,
                &self.unset,
                &flag(self.refresh_saml2_private_key),
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

request! {
    AlterSecurityIntegrationRequest => AlterSecurityIntegrationOptions {
        flag if_exists,
        val set: SecurityIntegrationSet,
        val unset: SecurityIntegrationUnset,
        flag refresh_saml2_private_key,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterSecurityIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterSecurityIntegrationOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropSecurityIntegrationOptions,
    DropSecurityIntegrationRequest,
    "SECURITY INTEGRATION",
    AccountObjectIdentifier
);

target_only!(
    DescribeSecurityIntegrationOptions,
    "DESCRIBE SECURITY INTEGRATION",
    AccountObjectIdentifier
);

show_objects!(
    ShowSecurityIntegrationOptions,
    ShowSecurityIntegrationRequest,
    "SECURITY INTEGRATIONS" {
        val like: Like,
    }
);

gateway!(SecurityIntegrations);

impl SecurityIntegrations<'_> {
    pub async fn create(&self, request: &CreateSecurityIntegrationRequest) -> Result<()> {
        self.client
            .exec("create security integration", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterSecurityIntegrationRequest) -> Result<()> {
        self.client
            .exec("alter security integration", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropSecurityIntegrationRequest) -> Result<()> {
        self.client
            .exec("drop security integration", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowSecurityIntegrationRequest) -> Result<Vec<Integration>> {
        self.client
            .query::<_, IntegrationRow, _>("show security integrations", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Integration> {
        let request = ShowSecurityIntegrationRequest::new().with_like(Like::new(id.name()));
        find_by_id(
            self.show(&request).await?,
            "security integration",
            id,
            Integration::id,
        )
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe security integration",
                &DescribeSecurityIntegrationOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("SI")
    }

    #[test]
    fn test_external_oauth_key_source() {
        let kind = SecurityIntegrationKind::ExternalOauth(ExternalOauth {
            oauth_type: ExternalOauthType::Okta,
            issuer: "https://okta".into(),
            token_user_mapping_claim: vec!["sub".into()],
            snowflake_user_mapping_attribute: UserMappingAttribute::LoginName,
            jws_keys_url: Vec::new(),
            rsa_public_key: None,
            blocked_roles_list: Vec::new(),
            allowed_roles_list: Vec::new(),
            audience_list: Vec::new(),
            any_role_mode: None,
        });
        let opts = CreateSecurityIntegrationRequest::new(id(), kind).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_saml2_required_fields() {
        let kind = SecurityIntegrationKind::Saml2(Saml2 {
            issuer: "iss".into(),
            ..Default::default()
        });
        let err = CreateSecurityIntegrationRequest::new(id(), kind)
            .to_options()
            .validate()
            .unwrap_err();
        assert_eq!(err.kinds().len(), 3);
    }

    #[test]
    fn test_looker_needs_redirect() {
        let kind = SecurityIntegrationKind::OauthPartner(OauthPartner {
            client: OauthPartnerClient::Looker,
            redirect_uri: None,
            issue_refresh_tokens: None,
            refresh_token_validity: None,
            blocked_roles_list: Vec::new(),
        });
        let err = CreateSecurityIntegrationRequest::new(id(), kind)
            .to_options()
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::MissingRequiredField));
    }
}
