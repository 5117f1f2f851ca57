//! Account roles and role hierarchy grants.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRoleOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub comment: Option<String>,
    pub tag: Vec<TagAssociation>,
}

impl Validate for CreateRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateRoleOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateRoleRequest => CreateRoleOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
        vec tag: TagAssociation,
    }
}

impl CreateRoleRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: CreateRoleOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterRoleOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub set_comment: Option<String>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_comment: bool,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterRoleOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["RenameTo", "SetComment", "SetTag", "UnsetComment", "UnsetTag"],
            &[
                &self.rename_to,
                &self.set_comment,
                &self.set_tag,
                &flag(self.unset_comment),
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterRoleRequest => AlterRoleOptions {
        flag if_exists,
        opt rename_to: AccountObjectIdentifier,
        opt set_comment: String,
        vec set_tag: TagAssociation,
        flag unset_comment,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterRoleRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterRoleOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropRoleOptions, DropRoleRequest, "ROLE", AccountObjectIdentifier);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowRoleOptions {
    pub like: Option<Like>,
    pub in_class: Option<SchemaObjectIdentifier>,
}

impl Validate for ShowRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowRoleOptions");
        errors.like(self.like.as_ref());
        errors.optional_identifier("InClass", self.in_class.as_ref());
        errors.finish()
    }
}

request! {
    ShowRoleRequest => ShowRoleOptions {
        val like: Like,
        opt in_class: SchemaObjectIdentifier,
    }
}

impl ShowRoleRequest {
    pub fn new() -> Self {
        Self {
            options: ShowRoleOptions::default(),
        }
    }
}

impl Default for ShowRoleRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Grantee of a role: another role or a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleGrantee {
    pub role: Option<AccountObjectIdentifier>,
    pub user: Option<AccountObjectIdentifier>,
}

impl RoleGrantee {
    pub fn role(id: AccountObjectIdentifier) -> Self {
        Self {
            role: Some(id),
            user: None,
        }
    }

    pub fn user(id: AccountObjectIdentifier) -> Self {
        Self {
            role: None,
            user: Some(id),
        }
    }
}

impl Validate for RoleGrantee {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("RoleGrantee");
        errors.exactly_one_of(&["Role", "User"], &[&self.role, &self.user]);
        errors.optional_identifier("Role", self.role.as_ref());
        errors.optional_identifier("User", self.user.as_ref());
        errors.finish()
    }
}

/// `GRANT ROLE <name> TO ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrantRoleOptions {
    pub name: AccountObjectIdentifier,
    pub grant: RoleGrantee,
}

/// `REVOKE ROLE <name> FROM ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevokeRoleOptions {
    pub name: AccountObjectIdentifier,
    pub revoke: RoleGrantee,
}

impl Validate for GrantRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("GrantRoleOptions");
        errors.identifier("name", &self.name);
        errors.merge(self.grant.validate());
        errors.finish()
    }
}

impl Validate for RevokeRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("RevokeRoleOptions");
        errors.identifier("name", &self.name);
        errors.merge(self.revoke.validate());
        errors.finish()
    }
}

request! {
    GrantRoleRequest => GrantRoleOptions {}
}

impl GrantRoleRequest {
    pub fn new(name: AccountObjectIdentifier, grant: RoleGrantee) -> Self {
        Self {
            options: GrantRoleOptions { name, grant },
        }
    }
}

request! {
    RevokeRoleRequest => RevokeRoleOptions {}
}

impl RevokeRoleRequest {
    pub fn new(name: AccountObjectIdentifier, revoke: RoleGrantee) -> Self {
        Self {
            options: RevokeRoleOptions { name, revoke },
        }
    }
}

target_only!(UseRoleOptions, "USE ROLE", AccountObjectIdentifier);

/// One `SHOW ROLES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: Option<String>,
    pub is_current: Option<String>,
    pub is_inherited: Option<String>,
    pub assigned_to_users: Option<i64>,
    pub granted_to_roles: Option<i64>,
    pub granted_roles: Option<i64>,
    pub owner: Option<String>,
    pub comment: Option<String>,
}

impl FromRow for RoleRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            is_default: row.opt("is_default"),
            is_current: row.opt("is_current"),
            is_inherited: row.opt("is_inherited"),
            assigned_to_users: row.opt_i64("assigned_to_users")?,
            granted_to_roles: row.opt_i64("granted_to_roles")?,
            granted_roles: row.opt_i64("granted_roles")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub is_inherited: bool,
    pub assigned_to_users: i64,
    pub granted_to_roles: i64,
    pub granted_roles: i64,
    pub owner: String,
    pub comment: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            is_default: row.is_default.as_deref().is_some_and(yes),
            is_current: row.is_current.as_deref().is_some_and(yes),
            is_inherited: row.is_inherited.as_deref().is_some_and(yes),
            assigned_to_users: row.assigned_to_users.unwrap_or_default(),
            granted_to_roles: row.granted_to_roles.unwrap_or_default(),
            granted_roles: row.granted_roles.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
        }
    }
}

impl Role {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

gateway!(Roles);

impl Roles<'_> {
    pub async fn create(&self, request: &CreateRoleRequest) -> Result<()> {
        self.client.exec("create role", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterRoleRequest) -> Result<()> {
        self.client.exec("alter role", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropRoleRequest) -> Result<()> {
        self.client.exec("drop role", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowRoleRequest) -> Result<Vec<Role>> {
        self.client
            .query::<_, RoleRow, _>("show roles", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Role> {
        let request = ShowRoleRequest::new().with_like(Like::new(id.name()));
        find_by_id(self.show(&request).await?, "role", id, Role::id)
    }

    pub async fn grant(&self, request: &GrantRoleRequest) -> Result<()> {
        self.client.exec("grant role", &request.to_options()).await
    }

    pub async fn revoke(&self, request: &RevokeRoleRequest) -> Result<()> {
        self.client.exec("revoke role", &request.to_options()).await
    }

    pub async fn use_role(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .exec("use role", &UseRoleOptions::new(id.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("R1")
    }

    #[test]
    fn test_or_replace_excludes_if_not_exists() {
        let opts = CreateRoleRequest::new(id())
            .with_or_replace(true)
            .with_if_not_exists(true)
            .to_options();
        let err = opts.validate().unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ExactlyOneOf));
        match err {
            Error::ExactlyOneOf { fields, .. } => {
                assert_eq!(fields, vec!["OrReplace", "IfNotExists"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_name() {
        let opts = CreateRoleRequest::new(AccountObjectIdentifier::new("")).to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::InvalidObjectIdentifier)
        );
    }

    #[test]
    fn test_alter_exactly_one() {
        assert!(AlterRoleRequest::new(id()).to_options().validate().is_err());
        let opts = AlterRoleRequest::new(id())
            .with_set_comment("c")
            .with_unset_comment(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        assert!(
            AlterRoleRequest::new(id())
                .with_unset_comment(true)
                .to_options()
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_grantee_exactly_one() {
        let opts = GrantRoleRequest::new(id(), RoleGrantee::default()).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        let opts = GrantRoleRequest::new(id(), RoleGrantee::user(AccountObjectIdentifier::new("U")))
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("name", Some("R1")),
            ("is_default", Some("Y")),
            ("is_current", Some("N")),
            ("assigned_to_users", Some("2")),
            ("owner", Some("SECURITYADMIN")),
            ("comment", None),
        ]);
        let role = Role::from(RoleRow::from_row(&row).unwrap());
        assert!(role.is_default);
        assert!(!role.is_current);
        assert_eq!(role.assigned_to_users, 2);
        assert_eq!(role.granted_roles, 0);
        assert_eq!(role.owner, "SECURITYADMIN");
        assert_eq!(role.id(), id());
    }
}
