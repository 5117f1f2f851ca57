//! Authentication policies: which login methods, clients and integrations a
//! user may authenticate with.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::common::{In, Like, LimitFrom, PropertyDetail, PropertyRow};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum AuthenticationMethod {
    All,
    Saml,
    Password,
    Oauth,
    Keypair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum MfaAuthenticationMethod {
    All,
    Saml,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum MfaEnrollment {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
    All,
    SnowflakeUi,
    Drivers,
    #[strum(serialize = "SNOWSQL")]
    SnowSql,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAuthenticationPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub authentication_methods: Vec<AuthenticationMethod>,
    pub mfa_authentication_methods: Vec<MfaAuthenticationMethod>,
    pub mfa_enrollment: Option<MfaEnrollment>,
    pub client_types: Vec<ClientType>,
    pub security_integrations: Vec<AccountObjectIdentifier>,
    pub comment: Option<String>,
}

impl Validate for CreateAuthenticationPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateAuthenticationPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.identifiers("SecurityIntegrations", &self.security_integrations);
        errors.finish()
    }
}

request! {
    CreateAuthenticationPolicyRequest => CreateAuthenticationPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        vec authentication_methods: AuthenticationMethod,
        vec mfa_authentication_methods: MfaAuthenticationMethod,
        val mfa_enrollment: MfaEnrollment,
        vec client_types: ClientType,
        vec security_integrations: AccountObjectIdentifier,
        opt comment: String,
    }
}

impl CreateAuthenticationPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: CreateAuthenticationPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthenticationPolicySet {
    pub authentication_methods: Option<Vec<AuthenticationMethod>>,
    pub mfa_authentication_methods: Option<Vec<MfaAuthenticationMethod>>,
    pub mfa_enrollment: Option<MfaEnrollment>,
    pub client_types: Option<Vec<ClientType>>,
    pub security_integrations: Option<Vec<AccountObjectIdentifier>>,
    pub comment: Option<String>,
}

setters!(AuthenticationPolicySet {
    val authentication_methods: Vec<AuthenticationMethod>,
    val mfa_authentication_methods: Vec<MfaAuthenticationMethod>,
    val mfa_enrollment: MfaEnrollment,
    val client_types: Vec<ClientType>,
    val security_integrations: Vec<AccountObjectIdentifier>,
    opt comment: String,
});

impl Validate for AuthenticationPolicySet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AuthenticationPolicySet");
        errors.at_least_one_of(
            &[
                "AuthenticationMethods",
                "MfaAuthenticationMethods",
                "MfaEnrollment",
                "ClientTypes",
                "SecurityIntegrations",
                "Comment",
            ],
            &[
                &self.authentication_methods,
                &self.mfa_authentication_methods,
                &self.mfa_enrollment,
                &self.client_types,
                &self.security_integrations,
                &self.comment,
            ],
        );
        if let Some(integrations) = &self.security_integrations {
            errors.identifiers("SecurityIntegrations", integrations);
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthenticationPolicyUnset {
    pub authentication_methods: bool,
    pub mfa_authentication_methods: bool,
    pub mfa_enrollment: bool,
    pub client_types: bool,
    pub security_integrations: bool,
    pub comment: bool,
}

setters!(AuthenticationPolicyUnset {
    flag authentication_methods,
    flag mfa_authentication_methods,
    flag mfa_enrollment,
    flag client_types,
    flag security_integrations,
    flag comment,
});

impl Validate for AuthenticationPolicyUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AuthenticationPolicyUnset");
        errors.at_least_one_of(
            &[
                "AuthenticationMethods",
                "MfaAuthenticationMethods",
                "MfaEnrollment",
                "ClientTypes",
                "SecurityIntegrations",
                "Comment",
            ],
            &[
                &flag(self.authentication_methods),
                &flag(self.mfa_authentication_methods),
                &flag(self.mfa_enrollment),
                &flag(self.client_types),
                &flag(self.security_integrations),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterAuthenticationPolicyOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub set: Option<AuthenticationPolicySet>,
    pub unset: Option<AuthenticationPolicyUnset>,
    pub rename_to: Option<SchemaObjectIdentifier>,
}

impl Validate for AlterAuthenticationPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterAuthenticationPolicyOptions");
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
    AlterAuthenticationPolicyRequest => AlterAuthenticationPolicyOptions {
        flag if_exists,
        val set: AuthenticationPolicySet,
        val unset: AuthenticationPolicyUnset,
        val rename_to: SchemaObjectIdentifier,
    }
}

impl AlterAuthenticationPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterAuthenticationPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropAuthenticationPolicyOptions,
    DropAuthenticationPolicyRequest,
    "AUTHENTICATION POLICY",
    SchemaObjectIdentifier
);

target_only!(
    DescribeAuthenticationPolicyOptions,
    "DESCRIBE AUTHENTICATION POLICY",
    SchemaObjectIdentifier
);

show_objects!(ShowAuthenticationPolicyOptions, ShowAuthenticationPolicyRequest, "AUTHENTICATION POLICIES" {
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

policy_gateway!(
    AuthenticationPolicies,
    "authentication policy",
    "authentication policies",
    CreateAuthenticationPolicyRequest,
    AlterAuthenticationPolicyRequest,
    DropAuthenticationPolicyRequest,
    ShowAuthenticationPolicyRequest
);

impl AuthenticationPolicies<'_> {
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe authentication policy",
                &DescribeAuthenticationPolicyOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "AUTH")
    }

    #[test]
    fn test_client_type_tokens() {
        assert_eq!(ClientType::SnowflakeUi.to_string(), "SNOWFLAKE_UI");
        assert_eq!(ClientType::SnowSql.to_string(), "SNOWSQL");
        assert_eq!("keypair".parse::<AuthenticationMethod>().unwrap(), AuthenticationMethod::Keypair);
    }

    #[test]
    fn test_set_needs_a_property() {
        let opts = AlterAuthenticationPolicyRequest::new(id())
            .with_set(AuthenticationPolicySet::default())
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::AtLeastOneOf)
        );
    }

    #[test]
    fn test_empty_list_counts_as_set() {
        let opts = AlterAuthenticationPolicyRequest::new(id())
            .with_set(AuthenticationPolicySet::default().with_client_types(Vec::new()))
            .to_options();
        assert!(opts.validate().is_ok());
    }
}
