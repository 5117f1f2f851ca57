//! Roles scoped to a single database.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{LimitFrom, Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::Result;
use crate::identifiers::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, Identifier, SchemaObjectIdentifier,
};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateDatabaseRoleOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: DatabaseObjectIdentifier,
    pub comment: Option<String>,
}

impl Validate for CreateDatabaseRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateDatabaseRoleOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.finish()
    }
}

request! {
    CreateDatabaseRoleRequest => CreateDatabaseRoleOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreateDatabaseRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            options: CreateDatabaseRoleOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterDatabaseRoleOptions {
    pub if_exists: bool,
    pub name: DatabaseObjectIdentifier,
    pub rename_to: Option<DatabaseObjectIdentifier>,
    pub set_comment: Option<String>,
    pub unset_comment: bool,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterDatabaseRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterDatabaseRoleOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Rename", "SetComment", "UnsetComment", "SetTag", "UnsetTag"],
            &[
                &self.rename_to,
                &self.set_comment,
                &flag(self.unset_comment),
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        if let Some(new_name) = &self.rename_to {
            errors.identifier("Rename", new_name);
            if new_name.database_name() != self.name.database_name() {
                errors.push(crate::error::Error::invalid_value(
                    "AlterDatabaseRoleOptions",
                    "Rename",
                    "database role can only be renamed within the same database",
                ));
            }
        }
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterDatabaseRoleRequest => AlterDatabaseRoleOptions {
        flag if_exists,
        opt rename_to: DatabaseObjectIdentifier,
        opt set_comment: String,
        flag unset_comment,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterDatabaseRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            options: AlterDatabaseRoleOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropDatabaseRoleOptions,
    DropDatabaseRoleRequest,
    "DATABASE ROLE",
    DatabaseObjectIdentifier
);

/// `SHOW DATABASE ROLES [LIKE] IN DATABASE <db> [LIMIT]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowDatabaseRoleOptions {
    pub like: Option<Like>,
    pub database: AccountObjectIdentifier,
    pub limit: Option<LimitFrom>,
}

impl Validate for ShowDatabaseRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowDatabaseRoleOptions");
        errors.like(self.like.as_ref());
        errors.identifier("Database", &self.database);
        errors.finish()
    }
}

request! {
    ShowDatabaseRoleRequest => ShowDatabaseRoleOptions {
        val like: Like,
        val limit: LimitFrom,
    }
}

impl ShowDatabaseRoleRequest {
    pub fn new(database: AccountObjectIdentifier) -> Self {
        Self {
            options: ShowDatabaseRoleOptions {
                database,
                ..Default::default()
            },
        }
    }
}

/// Target of a database-role grant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseRoleGrantee {
    pub database_role: Option<DatabaseObjectIdentifier>,
    pub account_role: Option<AccountObjectIdentifier>,
}

impl Validate for DatabaseRoleGrantee {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DatabaseRoleGrantee");
        errors.exactly_one_of(
            &["DatabaseRole", "AccountRole"],
            &[&self.database_role, &self.account_role],
        );
        errors.optional_identifier("DatabaseRole", self.database_role.as_ref());
        errors.optional_identifier("AccountRole", self.account_role.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrantDatabaseRoleOptions {
    pub name: DatabaseObjectIdentifier,
    pub grantee: DatabaseRoleGrantee,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevokeDatabaseRoleOptions {
    pub name: DatabaseObjectIdentifier,
    pub grantee: DatabaseRoleGrantee,
}

impl Validate for GrantDatabaseRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("GrantDatabaseRoleOptions");
        errors.identifier("name", &self.name);
        errors.merge(self.grantee.validate());
        errors.finish()
    }
}

impl Validate for RevokeDatabaseRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("RevokeDatabaseRoleOptions");
        errors.identifier("name", &self.name);
        errors.merge(self.grantee.validate());
        errors.finish()
    }
}

request! {
    GrantDatabaseRoleRequest => GrantDatabaseRoleOptions {}
}

impl GrantDatabaseRoleRequest {
    pub fn to_database_role(name: DatabaseObjectIdentifier, role: DatabaseObjectIdentifier) -> Self {
        Self {
            options: GrantDatabaseRoleOptions {
                name,
                grantee: DatabaseRoleGrantee {
                    database_role: Some(role),
                    account_role: None,
                },
            },
        }
    }

    pub fn to_account_role(name: DatabaseObjectIdentifier, role: AccountObjectIdentifier) -> Self {
        Self {
            options: GrantDatabaseRoleOptions {
                name,
                grantee: DatabaseRoleGrantee {
                    database_role: None,
                    account_role: Some(role),
                },
            },
        }
    }
}

request! {
    RevokeDatabaseRoleRequest => RevokeDatabaseRoleOptions {}
}

impl RevokeDatabaseRoleRequest {
    pub fn from_database_role(
        name: DatabaseObjectIdentifier,
        role: DatabaseObjectIdentifier,
    ) -> Self {
        Self {
            options: RevokeDatabaseRoleOptions {
                name,
                grantee: DatabaseRoleGrantee {
                    database_role: Some(role),
                    account_role: None,
                },
            },
        }
    }

    pub fn from_account_role(name: DatabaseObjectIdentifier, role: AccountObjectIdentifier) -> Self {
        Self {
            options: RevokeDatabaseRoleOptions {
                name,
                grantee: DatabaseRoleGrantee {
                    database_role: None,
                    account_role: Some(role),
                },
            },
        }
    }
}

/// One `SHOW DATABASE ROLES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseRoleRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub is_default: Option<String>,
    pub is_current: Option<String>,
    pub is_inherited: Option<String>,
    pub granted_to_roles: Option<i64>,
    pub granted_to_database_roles: Option<i64>,
    pub granted_database_roles: Option<i64>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for DatabaseRoleRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            is_default: row.opt("is_default"),
            is_current: row.opt("is_current"),
            is_inherited: row.opt("is_inherited"),
            granted_to_roles: row.opt_i64("granted_to_roles")?,
            granted_to_database_roles: row.opt_i64("granted_to_database_roles")?,
            granted_database_roles: row.opt_i64("granted_database_roles")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseRole {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub is_inherited: bool,
    pub granted_to_roles: i64,
    pub granted_to_database_roles: i64,
    pub granted_database_roles: i64,
    pub owner: String,
    pub comment: String,
    pub owner_role_type: String,
}

impl DatabaseRole {
    /// SHOW output does not name the database, so the caller supplies it.
    pub fn from_row(row: DatabaseRoleRow, database_name: &str) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: database_name.to_string(),
            is_default: row.is_default.as_deref().is_some_and(yes),
            is_current: row.is_current.as_deref().is_some_and(yes),
            is_inherited: row.is_inherited.as_deref().is_some_and(yes),
            granted_to_roles: row.granted_to_roles.unwrap_or_default(),
            granted_to_database_roles: row.granted_to_database_roles.unwrap_or_default(),
            granted_database_roles: row.granted_database_roles.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }

    pub fn id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database_name, &self.name)
    }
}

gateway!(DatabaseRoles);

impl DatabaseRoles<'_> {
    pub async fn create(&self, request: &CreateDatabaseRoleRequest) -> Result<()> {
        self.client
            .exec("create database role", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterDatabaseRoleRequest) -> Result<()> {
        self.client
            .exec("alter database role", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropDatabaseRoleRequest) -> Result<()> {
        self.client
            .exec("drop database role", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowDatabaseRoleRequest) -> Result<Vec<DatabaseRole>> {
        let options = request.to_options();
        let database_name = options.database.name().to_string();
        let rows = self
            .client
            .query::<_, DatabaseRoleRow, DatabaseRoleRow>("show database roles", &options)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| DatabaseRole::from_row(row, &database_name))
            .collect())
    }

    pub async fn show_by_id(&self, id: &DatabaseObjectIdentifier) -> Result<DatabaseRole> {
        let request =
            ShowDatabaseRoleRequest::new(id.database_id()).with_like(Like::new(id.name()));
        find_by_id(self.show(&request).await?, "database role", id, DatabaseRole::id)
    }

    pub async fn grant(&self, request: &GrantDatabaseRoleRequest) -> Result<()> {
        self.client
            .exec("grant database role", &request.to_options())
            .await
    }

    pub async fn revoke(&self, request: &RevokeDatabaseRoleRequest) -> Result<()> {
        self.client
            .exec("revoke database role", &request.to_options())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new("DB1", "DR1")
    }

    #[test]
    fn test_rename_stays_in_database() {
        let opts = AlterDatabaseRoleRequest::new(id())
            .with_rename_to(DatabaseObjectIdentifier::new("DB2", "DR2"))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
        let opts = AlterDatabaseRoleRequest::new(id())
            .with_rename_to(DatabaseObjectIdentifier::new("DB1", "DR2"))
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_grantee_exactly_one() {
        let opts = GrantDatabaseRoleOptions {
            name: id(),
            grantee: DatabaseRoleGrantee::default(),
        };
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_convert_row_fills_database() {
        let row = Row::new([("name", Some("DR1")), ("granted_to_roles", Some("3"))]);
        let role = DatabaseRole::from_row(DatabaseRoleRow::from_row(&row).unwrap(), "DB1");
        assert_eq!(role.id(), id());
        assert_eq!(role.granted_to_roles, 3);
        assert!(!role.is_default);
    }
}
