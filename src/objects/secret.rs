//! Secrets: OAuth client-credentials, OAuth authorization-code, basic
//! authentication and generic strings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{In, Like};
use crate::decode::{DecodeError, FromRow, Row, parse_list, parse_token};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum SecretType {
    #[strum(serialize = "OAUTH2")]
    OAuth2,
    #[strum(serialize = "PASSWORD")]
    Password,
    #[strum(serialize = "GENERIC_STRING")]
    GenericString,
}

/// What the secret holds. Values are never logged.
#[derive(Clone, PartialEq)]
pub enum SecretKind {
    OAuthClientCredentials {
        api_authentication: AccountObjectIdentifier,
        oauth_scopes: Vec<String>,
    },
    OAuthAuthorizationCode {
        api_authentication: AccountObjectIdentifier,
        oauth_refresh_token: String,
        oauth_refresh_token_expiry_time: String,
    },
    BasicAuthentication {
        username: String,
        password: String,
    },
    GenericString {
        secret_string: String,
    },
}

impl SecretKind {
    pub fn secret_type(&self) -> SecretType {
        match self {
            SecretKind::OAuthClientCredentials { .. }
            | SecretKind::OAuthAuthorizationCode { .. } => SecretType::OAuth2,
            SecretKind::BasicAuthentication { .. } => SecretType::Password,
            SecretKind::GenericString { .. } => SecretType::GenericString,
        }
    }
}

impl Default for SecretKind {
    fn default() -> Self {
        SecretKind::GenericString {
            secret_string: String::new(),
        }
    }
}

impl std::fmt::Debug for SecretKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretKind::OAuthClientCredentials {
                api_authentication,
                oauth_scopes,
            } => f
                .debug_struct("OAuthClientCredentials")
                .field("api_authentication", api_authentication)
                .field("oauth_scopes", oauth_scopes)
                .finish(),
            SecretKind::OAuthAuthorizationCode {
                api_authentication, ..
            } => f
                .debug_struct("OAuthAuthorizationCode")
                .field("api_authentication", api_authentication)
                .field("oauth_refresh_token", &"****")
                .finish_non_exhaustive(),
            SecretKind::BasicAuthentication { username, .. } => f
                .debug_struct("BasicAuthentication")
                .field("username", username)
                .field("password", &"****")
                .finish(),
            SecretKind::GenericString { .. } => f
                .debug_struct("GenericString")
                .field("secret_string", &"****")
                .finish(),
        }
    }
}

impl Validate for SecretKind {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SecretKind");
        match self {
            SecretKind::OAuthClientCredentials {
                api_authentication, ..
            } => errors.identifier("ApiAuthentication", api_authentication),
            SecretKind::OAuthAuthorizationCode {
                api_authentication,
                oauth_refresh_token,
                oauth_refresh_token_expiry_time,
            } => {
                errors.identifier("ApiAuthentication", api_authentication);
                errors.required("OauthRefreshToken", oauth_refresh_token);
                errors.required(
                    "OauthRefreshTokenExpiryTime",
                    oauth_refresh_token_expiry_time,
                );
            }
            SecretKind::BasicAuthentication { username, .. } => {
                errors.required("Username", username);
            }
            SecretKind::GenericString { .. } => {}
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSecretOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub kind: SecretKind,
    pub comment: Option<String>,
}

impl Validate for CreateSecretOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSecretOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.nested(Some(&self.kind));
        errors.finish()
    }
}

request! {
    CreateSecretRequest => CreateSecretOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreateSecretRequest {
    pub fn new(name: SchemaObjectIdentifier, kind: SecretKind) -> Self {
        Self {
            options: CreateSecretOptions {
                name,
                kind,
                ..Default::default()
            },
        }
    }

    pub fn with_oauth_client_credentials(
        name: SchemaObjectIdentifier,
        api_authentication: AccountObjectIdentifier,
        oauth_scopes: impl IntoIterator<Item = String>,
    ) -> Self {
        Self::new(
            name,
            SecretKind::OAuthClientCredentials {
                api_authentication,
                oauth_scopes: oauth_scopes.into_iter().collect(),
            },
        )
    }

    pub fn with_oauth_authorization_code(
        name: SchemaObjectIdentifier,
        api_authentication: AccountObjectIdentifier,
        oauth_refresh_token: impl Into<String>,
        oauth_refresh_token_expiry_time: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            SecretKind::OAuthAuthorizationCode {
                api_authentication,
                oauth_refresh_token: oauth_refresh_token.into(),
                oauth_refresh_token_expiry_time: oauth_refresh_token_expiry_time.into(),
            },
        )
    }

    pub fn with_basic_authentication(
        name: SchemaObjectIdentifier,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            SecretKind::BasicAuthentication {
                username: username.into(),
                password: password.into(),
            },
        )
    }

    pub fn with_generic_string(
        name: SchemaObjectIdentifier,
        secret_string: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            SecretKind::GenericString {
                secret_string: secret_string.into(),
            },
        )
    }
}

/// Per-variant properties accepted by `ALTER SECRET ... SET`.
#[derive(Clone, PartialEq)]
pub enum SecretSetKind {
    OAuthScopes(Vec<String>),
    OAuthRefreshToken {
        token: String,
        expiry_time: Option<String>,
    },
    BasicAuthentication {
        username: Option<String>,
        password: Option<String>,
    },
    GenericString(String),
}

impl std::fmt::Debug for SecretSetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSetKind::OAuthScopes(scopes) => f.debug_tuple("OAuthScopes").field(scopes).finish(),
            SecretSetKind::OAuthRefreshToken { expiry_time, .. } => f
                .debug_struct("OAuthRefreshToken")
                .field("token", &"****")
                .field("expiry_time", expiry_time)
                .finish(),
            SecretSetKind::BasicAuthentication { username, .. } => f
                .debug_struct("BasicAuthentication")
                .field("username", username)
                .field("password", &"****")
                .finish(),
            SecretSetKind::GenericString(_) => f.write_str("GenericString(****)"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecretSet {
    pub comment: Option<String>,
    pub kind: Option<SecretSetKind>,
}

setters!(SecretSet {
    opt comment: String,
    val kind: SecretSetKind,
});

impl Validate for SecretSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SecretSet");
        errors.at_least_one_of(&["Comment", "Kind"], &[&self.comment, &self.kind]);
        if let Some(SecretSetKind::BasicAuthentication { username, password }) = &self.kind {
            errors.check(username.is_some() || password.is_some(), || {
                Error::at_least_one_of("SecretSet", &["Username", "Password"])
            });
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterSecretOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub set: Option<SecretSet>,
    pub unset_comment: bool,
}

impl Validate for AlterSecretOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterSecretOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Set", "UnsetComment"],
            &[&self.set, &crate::validation::flag(self.unset_comment)],
        );
        errors.nested(self.set.as_ref());
        errors.finish()
    }
}

request! {
    AlterSecretRequest => AlterSecretOptions {
        flag if_exists,
        val set: SecretSet,
        flag unset_comment,
    }
}

impl AlterSecretRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterSecretOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropSecretOptions, DropSecretRequest, "SECRET", SchemaObjectIdentifier);

target_only!(DescribeSecretOptions, "DESCRIBE SECRET", SchemaObjectIdentifier);

show_objects!(ShowSecretOptions, ShowSecretRequest, "SECRETS" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecretRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: String,
    pub database_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub secret_type: Option<String>,
    pub oauth_scopes: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for SecretRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            schema_name: row.get("schema_name")?,
            database_name: row.get("database_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            secret_type: row.opt("secret_type"),
            oauth_scopes: row.opt("oauth_scopes"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Secret {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: String,
    pub database_name: String,
    pub owner: String,
    pub comment: String,
    pub secret_type: Option<SecretType>,
    pub oauth_scopes: Vec<String>,
    pub owner_role_type: String,
}

impl From<SecretRow> for Secret {
    fn from(row: SecretRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            schema_name: row.schema_name,
            database_name: row.database_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            secret_type: row.secret_type.as_deref().and_then(parse_token),
            oauth_scopes: row
                .oauth_scopes
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl Secret {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecretDetailsRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: String,
    pub database_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub secret_type: Option<String>,
    pub username: Option<String>,
    pub oauth_access_token_expiry_time: Option<DateTime<Utc>>,
    pub oauth_refresh_token_expiry_time: Option<DateTime<Utc>>,
    pub oauth_scopes: Option<String>,
    pub integration_name: Option<String>,
}

impl FromRow for SecretDetailsRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            schema_name: row.get("schema_name")?,
            database_name: row.get("database_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            secret_type: row.opt("secret_type"),
            username: row.opt("username"),
            oauth_access_token_expiry_time: row.opt_timestamp("oauth_access_token_expiry_time")?,
            oauth_refresh_token_expiry_time: row
                .opt_timestamp("oauth_refresh_token_expiry_time")?,
            oauth_scopes: row.opt("oauth_scopes"),
            integration_name: row.opt("integration_name"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretDetails {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub schema_name: String,
    pub database_name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub secret_type: Option<SecretType>,
    pub username: Option<String>,
    pub oauth_access_token_expiry_time: Option<DateTime<Utc>>,
    pub oauth_refresh_token_expiry_time: Option<DateTime<Utc>>,
    pub oauth_scopes: Vec<String>,
    pub integration_name: Option<String>,
}

impl From<SecretDetailsRow> for SecretDetails {
    fn from(row: SecretDetailsRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            schema_name: row.schema_name,
            database_name: row.database_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment,
            secret_type: row.secret_type.as_deref().and_then(parse_token),
            username: row.username,
            oauth_access_token_expiry_time: row.oauth_access_token_expiry_time,
            oauth_refresh_token_expiry_time: row.oauth_refresh_token_expiry_time,
            oauth_scopes: row
                .oauth_scopes
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            integration_name: row.integration_name,
        }
    }
}

gateway!(Secrets);

impl Secrets<'_> {
    pub async fn create(&self, request: &CreateSecretRequest) -> Result<()> {
        self.client.exec("create secret", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterSecretRequest) -> Result<()> {
        self.client.exec("alter secret", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropSecretRequest) -> Result<()> {
        self.client.exec("drop secret", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowSecretRequest) -> Result<Vec<Secret>> {
        self.client
            .query::<_, SecretRow, _>("show secrets", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Secret> {
        let request = ShowSecretRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "secret", id, Secret::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<SecretDetails> {
        let mut details = self
            .client
            .query::<_, SecretDetailsRow, SecretDetails>(
                "describe secret",
                &DescribeSecretOptions::new(id.clone()),
            )
            .await?;
        if details.is_empty() {
            return Err(Error::not_found("secret", id));
        }
        Ok(details.swap_remove(0))
    }
}
