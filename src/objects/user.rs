//! Users and their login properties.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{LimitFrom, Like, PropertyDetail, PropertyRow, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum UserType {
    #[strum(serialize = "PERSON")]
    Person,
    #[strum(serialize = "SERVICE")]
    Service,
    #[strum(serialize = "LEGACY_SERVICE")]
    LegacyService,
}

/// `DEFAULT_SECONDARY_ROLES = ('ALL')` or `= ()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryRoles {
    All,
    None,
}

/// Properties accepted by both `CREATE USER` and `ALTER USER ... SET`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProperties {
    pub password: Option<String>,
    pub login_name: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub must_change_password: Option<bool>,
    pub disabled: Option<bool>,
    pub days_to_expiry: Option<i64>,
    pub mins_to_unlock: Option<i64>,
    pub default_warehouse: Option<AccountObjectIdentifier>,
    pub default_namespace: Option<String>,
    pub default_role: Option<AccountObjectIdentifier>,
    pub default_secondary_roles: Option<SecondaryRoles>,
    pub mins_to_bypass_mfa: Option<i64>,
    pub rsa_public_key: Option<String>,
    pub rsa_public_key_2: Option<String>,
    pub user_type: Option<UserType>,
    pub comment: Option<String>,
}

setters!(UserProperties {
    opt password: String,
    opt login_name: String,
    opt display_name: String,
    opt first_name: String,
    opt middle_name: String,
    opt last_name: String,
    opt email: String,
    val must_change_password: bool,
    val disabled: bool,
    val days_to_expiry: i64,
    val mins_to_unlock: i64,
    opt default_warehouse: AccountObjectIdentifier,
    opt default_namespace: String,
    opt default_role: AccountObjectIdentifier,
    val default_secondary_roles: SecondaryRoles,
    val mins_to_bypass_mfa: i64,
    opt rsa_public_key: String,
    opt rsa_public_key_2: String,
    val user_type: UserType,
    opt comment: String,
});

impl UserProperties {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn check(&self, errors: &mut Errors) {
        errors.range("DaysToExpiry", self.days_to_expiry, 0, i64::MAX);
        errors.range("MinsToUnlock", self.mins_to_unlock, 0, i64::MAX);
        errors.range("MinsToBypassMfa", self.mins_to_bypass_mfa, 0, i64::MAX);
        errors.optional_identifier("DefaultWarehouse", self.default_warehouse.as_ref());
        errors.optional_identifier("DefaultRole", self.default_role.as_ref());
        // Service users authenticate with keys only.
        if self.user_type == Some(UserType::Service) {
            let structure = errors.structure();
            for (field, set) in [
                ("Password", self.password.is_some()),
                ("FirstName", self.first_name.is_some()),
                ("MiddleName", self.middle_name.is_some()),
                ("LastName", self.last_name.is_some()),
                ("MustChangePassword", self.must_change_password.is_some()),
                ("MinsToBypassMfa", self.mins_to_bypass_mfa.is_some()),
            ] {
                errors.check(!set, || {
                    Error::invalid_value(structure, field, "not supported for SERVICE users")
                });
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub properties: UserProperties,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateUserOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateUserOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        self.properties.check(&mut errors);
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateUserRequest => CreateUserOptions {
        flag or_replace,
        flag if_not_exists,
        vec tag: TagAssociation,
    }
}

impl CreateUserRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: CreateUserOptions {
                name,
                ..Default::default()
            },
        }
    }

    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.options.properties = properties;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUnset {
    pub password: bool,
    pub login_name: bool,
    pub display_name: bool,
    pub first_name: bool,
    pub middle_name: bool,
    pub last_name: bool,
    pub email: bool,
    pub must_change_password: bool,
    pub disabled: bool,
    pub days_to_expiry: bool,
    pub mins_to_unlock: bool,
    pub default_warehouse: bool,
    pub default_namespace: bool,
    pub default_role: bool,
    pub default_secondary_roles: bool,
    pub mins_to_bypass_mfa: bool,
    pub rsa_public_key: bool,
    pub rsa_public_key_2: bool,
    pub comment: bool,
}

setters!(UserUnset {
    flag password,
    flag login_name,
    flag display_name,
    flag first_name,
    flag middle_name,
    flag last_name,
    flag email,
    flag must_change_password,
    flag disabled,
    flag days_to_expiry,
    flag mins_to_unlock,
    flag default_warehouse,
    flag default_namespace,
    flag default_role,
    flag default_secondary_roles,
    flag mins_to_bypass_mfa,
    flag rsa_public_key,
    flag rsa_public_key_2,
    flag comment,
});

impl UserUnset {
    /// `(flag, property)` pairs in rendering order.
    pub(crate) fn properties(&self) -> [(bool, &'static str); 19] {
        [
            (self.password, "PASSWORD"),
            (self.login_name, "LOGIN_NAME"),
            (self.display_name, "DISPLAY_NAME"),
            (self.first_name, "FIRST_NAME"),
            (self.middle_name, "MIDDLE_NAME"),
            (self.last_name, "LAST_NAME"),
            (self.email, "EMAIL"),
            (self.must_change_password, "MUST_CHANGE_PASSWORD"),
            (self.disabled, "DISABLED"),
            (self.days_to_expiry, "DAYS_TO_EXPIRY"),
            (self.mins_to_unlock, "MINS_TO_UNLOCK"),
            (self.default_warehouse, "DEFAULT_WAREHOUSE"),
            (self.default_namespace, "DEFAULT_NAMESPACE"),
            (self.default_role, "DEFAULT_ROLE"),
            (self.default_secondary_roles, "DEFAULT_SECONDARY_ROLES"),
            (self.mins_to_bypass_mfa, "MINS_TO_BYPASS_MFA"),
            (self.rsa_public_key, "RSA_PUBLIC_KEY"),
            (self.rsa_public_key_2, "RSA_PUBLIC_KEY_2"),
            (self.comment, "COMMENT"),
        ]
    }
}

impl Validate for UserUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("UserUnset");
        let properties = self.properties();
        errors.check(properties.iter().any(|(on, _)| *on), || {
            let names: Vec<_> = properties.iter().map(|(_, name)| *name).collect();
            Error::at_least_one_of("UserUnset", &names)
        });
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterUserOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub reset_password: bool,
    pub abort_all_queries: bool,
    pub set: Option<UserProperties>,
    pub unset: Option<UserUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterUserOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterUserOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "RenameTo",
                "ResetPassword",
                "AbortAllQueries",
                "Set",
                "Unset",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &self.rename_to,
                &flag(self.reset_password),
                &flag(self.abort_all_queries),
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        if let Some(set) = &self.set {
            errors.check(!set.is_empty(), || {
                Error::at_least_one_of("UserSet", &["Password", "LoginName", "DisplayName", "Comment"])
            });
            set.check(&mut errors);
        }
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterUserRequest => AlterUserOptions {
        flag if_exists,
        opt rename_to: AccountObjectIdentifier,
        flag reset_password,
        flag abort_all_queries,
        val set: UserProperties,
        val unset: UserUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterUserRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterUserOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropUserOptions, DropUserRequest, "USER", AccountObjectIdentifier);

target_only!(DescribeUserOptions, "DESCRIBE USER", AccountObjectIdentifier);

show_objects!(ShowUserOptions, ShowUserRequest, "USERS" {
    flag terse,
    val like: Like,
    opt starts_with: String,
    val limit: LimitFrom,
});

/// One `SHOW USERS` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRow {
    pub name: String,
    pub created_on: Option<DateTime<Utc>>,
    pub login_name: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mins_to_unlock: Option<String>,
    pub days_to_expiry: Option<String>,
    pub comment: Option<String>,
    pub disabled: Option<String>,
    pub must_change_password: Option<String>,
    pub snowflake_lock: Option<String>,
    pub default_warehouse: Option<String>,
    pub default_namespace: Option<String>,
    pub default_role: Option<String>,
    pub default_secondary_roles: Option<String>,
    pub mins_to_bypass_mfa: Option<String>,
    pub owner: Option<String>,
    pub last_success_login: Option<DateTime<Utc>>,
    pub expires_at_time: Option<DateTime<Utc>>,
    pub locked_until_time: Option<DateTime<Utc>>,
    pub has_password: Option<String>,
    pub has_rsa_public_key: Option<String>,
    pub user_type: Option<String>,
    pub has_mfa: Option<String>,
}

impl FromRow for UserRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            created_on: row.opt_timestamp("created_on")?,
            login_name: row.opt("login_name"),
            display_name: row.opt("display_name"),
            first_name: row.opt("first_name"),
            last_name: row.opt("last_name"),
            email: row.opt("email"),
            mins_to_unlock: row.opt("mins_to_unlock"),
            days_to_expiry: row.opt("days_to_expiry"),
            comment: row.opt("comment"),
            disabled: row.opt("disabled"),
            must_change_password: row.opt("must_change_password"),
            snowflake_lock: row.opt("snowflake_lock"),
            default_warehouse: row.opt("default_warehouse"),
            default_namespace: row.opt("default_namespace"),
            default_role: row.opt("default_role"),
            default_secondary_roles: row.opt("default_secondary_roles"),
            mins_to_bypass_mfa: row.opt("mins_to_bypass_mfa"),
            owner: row.opt("owner"),
            last_success_login: row.opt_timestamp("last_success_login")?,
            expires_at_time: row.opt_timestamp("expires_at_time")?,
            locked_until_time: row.opt_timestamp("locked_until_time")?,
            has_password: row.opt("has_password"),
            has_rsa_public_key: row.opt("has_rsa_public_key"),
            user_type: row.opt("type"),
            has_mfa: row.opt("has_mfa"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub name: String,
    pub created_on: Option<DateTime<Utc>>,
    pub login_name: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mins_to_unlock: Option<String>,
    pub days_to_expiry: Option<String>,
    pub comment: String,
    pub disabled: bool,
    pub must_change_password: bool,
    pub snowflake_lock: bool,
    pub default_warehouse: String,
    pub default_namespace: String,
    pub default_role: String,
    pub default_secondary_roles: String,
    pub mins_to_bypass_mfa: Option<String>,
    pub owner: String,
    pub last_success_login: Option<DateTime<Utc>>,
    pub expires_at_time: Option<DateTime<Utc>>,
    pub locked_until_time: Option<DateTime<Utc>>,
    pub has_password: bool,
    pub has_rsa_public_key: bool,
    pub user_type: Option<UserType>,
    pub has_mfa: bool,
}

fn truthy(value: Option<String>) -> bool {
    value.as_deref().is_some_and(yes)
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            name: row.name,
            created_on: row.created_on,
            login_name: row.login_name.unwrap_or_default(),
            display_name: row.display_name.unwrap_or_default(),
            first_name: row.first_name.unwrap_or_default(),
            last_name: row.last_name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            mins_to_unlock: row.mins_to_unlock,
            days_to_expiry: row.days_to_expiry,
            comment: row.comment.unwrap_or_default(),
            disabled: truthy(row.disabled),
            must_change_password: truthy(row.must_change_password),
            snowflake_lock: truthy(row.snowflake_lock),
            default_warehouse: row.default_warehouse.unwrap_or_default(),
            default_namespace: row.default_namespace.unwrap_or_default(),
            default_role: row.default_role.unwrap_or_default(),
            default_secondary_roles: row.default_secondary_roles.unwrap_or_default(),
            mins_to_bypass_mfa: row.mins_to_bypass_mfa,
            owner: row.owner.unwrap_or_default(),
            last_success_login: row.last_success_login,
            expires_at_time: row.expires_at_time,
            locked_until_time: row.locked_until_time,
            has_password: truthy(row.has_password),
            has_rsa_public_key: truthy(row.has_rsa_public_key),
            user_type: row.user_type.as_deref().and_then(parse_token),
            has_mfa: truthy(row.has_mfa),
        }
    }
}

impl User {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

gateway!(Users);

impl Users<'_> {
    pub async fn create(&self, request: &CreateUserRequest) -> Result<()> {
        self.client.exec("create user", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterUserRequest) -> Result<()> {
        self.client.exec("alter user", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropUserRequest) -> Result<()> {
        self.client.exec("drop user", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowUserRequest) -> Result<Vec<User>> {
        self.client
            .query::<_, UserRow, _>("show users", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<User> {
        let request = ShowUserRequest::new().with_like(Like::new(id.name()));
        find_by_id(self.show(&request).await?, "user", id, User::id)
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>("describe user", &DescribeUserOptions::new(id.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("U1")
    }

    #[test]
    fn test_service_user_rejects_password() {
        let opts = CreateUserRequest::new(id())
            .with_properties(
                UserProperties::default()
                    .with_user_type(UserType::Service)
                    .with_password("secret"),
            )
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_requires_one_action() {
        let err = AlterUserRequest::new(id()).to_options().validate().unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ExactlyOneOf));

        let err = AlterUserRequest::new(id())
            .with_unset(UserUnset::default())
            .to_options()
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::AtLeastOneOf));

        assert!(
            AlterUserRequest::new(id())
                .with_reset_password(true)
                .to_options()
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("name", Some("U1")),
            ("login_name", Some("U1")),
            ("disabled", Some("false")),
            ("has_password", Some("true")),
            ("type", Some("PERSON")),
            ("default_role", Some("PUBLIC")),
            ("comment", None),
        ]);
        let user = User::from(UserRow::from_row(&row).unwrap());
        assert!(!user.disabled);
        assert!(user.has_password);
        assert_eq!(user.user_type, Some(UserType::Person));
        assert_eq!(user.default_role, "PUBLIC");
        assert_eq!(user.comment, "");
        assert_eq!(user.id(), id());
    }
}
