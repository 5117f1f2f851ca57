//! Privilege, ownership and application-role grants, and `SHOW GRANTS`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::common::ObjectType;
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier, ObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum Privilege {
    // global
    #[strum(serialize = "CREATE ACCOUNT")]
    CreateAccount,
    #[strum(serialize = "CREATE DATABASE")]
    CreateDatabase,
    #[strum(serialize = "CREATE INTEGRATION")]
    CreateIntegration,
    #[strum(serialize = "CREATE ROLE")]
    CreateRole,
    #[strum(serialize = "CREATE USER")]
    CreateUser,
    #[strum(serialize = "CREATE WAREHOUSE")]
    CreateWarehouse,
    #[strum(serialize = "EXECUTE TASK")]
    ExecuteTask,
    #[strum(serialize = "IMPORT SHARE")]
    ImportShare,
    #[strum(serialize = "MANAGE GRANTS")]
    ManageGrants,
    #[strum(serialize = "MONITOR EXECUTION")]
    MonitorExecution,
    #[strum(serialize = "APPLY MASKING POLICY")]
    ApplyMaskingPolicy,
    #[strum(serialize = "APPLY ROW ACCESS POLICY")]
    ApplyRowAccessPolicy,
    #[strum(serialize = "APPLY TAG")]
    ApplyTag,

    // account objects
    #[strum(serialize = "USAGE")]
    Usage,
    #[strum(serialize = "MONITOR")]
    Monitor,
    #[strum(serialize = "OPERATE")]
    Operate,
    #[strum(serialize = "MODIFY")]
    Modify,
    #[strum(serialize = "APPLYBUDGET")]
    ApplyBudget,
    #[strum(serialize = "CREATE SCHEMA")]
    CreateSchema,
    #[strum(serialize = "CREATE DATABASE ROLE")]
    CreateDatabaseRole,
    #[strum(serialize = "IMPORTED PRIVILEGES")]
    ImportedPrivileges,

    // schemas
    #[strum(serialize = "ADD SEARCH OPTIMIZATION")]
    AddSearchOptimization,
    #[strum(serialize = "CREATE TABLE")]
    CreateTable,
    #[strum(serialize = "CREATE DYNAMIC TABLE")]
    CreateDynamicTable,
    #[strum(serialize = "CREATE EVENT TABLE")]
    CreateEventTable,
    #[strum(serialize = "CREATE EXTERNAL TABLE")]
    CreateExternalTable,
    #[strum(serialize = "CREATE VIEW")]
    CreateView,
    #[strum(serialize = "CREATE MATERIALIZED VIEW")]
    CreateMaterializedView,
    #[strum(serialize = "CREATE STAGE")]
    CreateStage,
    #[strum(serialize = "CREATE FILE FORMAT")]
    CreateFileFormat,
    #[strum(serialize = "CREATE SEQUENCE")]
    CreateSequence,
    #[strum(serialize = "CREATE FUNCTION")]
    CreateFunction,
    #[strum(serialize = "CREATE PROCEDURE")]
    CreateProcedure,
    #[strum(serialize = "CREATE STREAM")]
    CreateStream,
    #[strum(serialize = "CREATE TASK")]
    CreateTask,
    #[strum(serialize = "CREATE PIPE")]
    CreatePipe,
    #[strum(serialize = "CREATE TAG")]
    CreateTag,
    #[strum(serialize = "CREATE SECRET")]
    CreateSecret,
    #[strum(serialize = "CREATE STREAMLIT")]
    CreateStreamlit,
    #[strum(serialize = "CREATE MASKING POLICY")]
    CreateMaskingPolicy,
    #[strum(serialize = "CREATE ROW ACCESS POLICY")]
    CreateRowAccessPolicy,
    #[strum(serialize = "CREATE NETWORK RULE")]
    CreateNetworkRule,

    // schema objects
    #[strum(serialize = "SELECT")]
    Select,
    #[strum(serialize = "INSERT")]
    Insert,
    #[strum(serialize = "UPDATE")]
    Update,
    #[strum(serialize = "DELETE")]
    Delete,
    #[strum(serialize = "TRUNCATE")]
    Truncate,
    #[strum(serialize = "REFERENCES")]
    References,
    #[strum(serialize = "REBUILD")]
    Rebuild,
    #[strum(serialize = "READ")]
    Read,
    #[strum(serialize = "WRITE")]
    Write,
    #[strum(serialize = "APPLY")]
    Apply,
    #[strum(serialize = "EVOLVE SCHEMA")]
    EvolveSchema,
}

/// Either `ALL PRIVILEGES` or an explicit list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrantPrivileges {
    pub all_privileges: bool,
    pub privileges: Vec<Privilege>,
}

impl GrantPrivileges {
    pub fn all() -> Self {
        Self {
            all_privileges: true,
            privileges: Vec::new(),
        }
    }

    pub fn of(privileges: impl IntoIterator<Item = Privilege>) -> Self {
        Self {
            all_privileges: false,
            privileges: privileges.into_iter().collect(),
        }
    }
}

impl Validate for GrantPrivileges {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("GrantPrivileges");
        errors.exactly_one_of(
            &["AllPrivileges", "Privileges"],
            &[&flag(self.all_privileges), &self.privileges],
        );
        errors.finish()
    }
}

/// Container for `ALL` / `FUTURE` grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkScope {
    Database(AccountObjectIdentifier),
    Schema(DatabaseObjectIdentifier),
}

impl BulkScope {
    fn validate_into(&self, errors: &mut Errors) {
        match self {
            BulkScope::Database(id) => errors.identifier("InDatabase", id),
            BulkScope::Schema(id) => errors.identifier("InSchema", id),
        }
    }
}

/// Target of a privilege or ownership grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOn {
    Account,
    AccountObject(ObjectType, AccountObjectIdentifier),
    Schema(DatabaseObjectIdentifier),
    AllSchemas(AccountObjectIdentifier),
    FutureSchemas(AccountObjectIdentifier),
    SchemaObject(ObjectType, ObjectIdentifier),
    All(ObjectType, BulkScope),
    Future(ObjectType, BulkScope),
}

impl GrantOn {
    pub fn database(id: AccountObjectIdentifier) -> Self {
        GrantOn::AccountObject(ObjectType::Database, id)
    }

    pub fn warehouse(id: AccountObjectIdentifier) -> Self {
        GrantOn::AccountObject(ObjectType::Warehouse, id)
    }

    pub fn schema_object(object_type: ObjectType, id: impl Into<ObjectIdentifier>) -> Self {
        GrantOn::SchemaObject(object_type, id.into())
    }

    fn is_account_tier(&self) -> bool {
        match self {
            GrantOn::Account => true,
            GrantOn::AccountObject(object_type, _) => *object_type != ObjectType::Database,
            _ => false,
        }
    }

    fn validate_into(&self, errors: &mut Errors) {
        match self {
            GrantOn::Account => {}
            GrantOn::AccountObject(_, id) | GrantOn::AllSchemas(id) | GrantOn::FutureSchemas(id) => {
                errors.identifier("On", id)
            }
            GrantOn::Schema(id) => errors.identifier("On", id),
            GrantOn::SchemaObject(_, id) => errors.identifier("On", id),
            GrantOn::All(_, scope) | GrantOn::Future(_, scope) => scope.validate_into(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantPrivilegesToAccountRoleOptions {
    pub privileges: GrantPrivileges,
    pub on: GrantOn,
    pub account_role: AccountObjectIdentifier,
    pub with_grant_option: bool,
}

impl Validate for GrantPrivilegesToAccountRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("GrantPrivilegesToAccountRoleOptions");
        errors.merge(self.privileges.validate());
        self.on.validate_into(&mut errors);
        errors.identifier("AccountRole", &self.account_role);
        errors.finish()
    }
}

request! {
    GrantPrivilegesToAccountRoleRequest => GrantPrivilegesToAccountRoleOptions {
        flag with_grant_option,
    }
}

impl GrantPrivilegesToAccountRoleRequest {
    pub fn new(
        privileges: GrantPrivileges,
        on: GrantOn,
        account_role: AccountObjectIdentifier,
    ) -> Self {
        Self {
            options: GrantPrivilegesToAccountRoleOptions {
                privileges,
                on,
                account_role,
                with_grant_option: false,
            },
        }
    }
}

/// `RESTRICT | CASCADE` on revoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RevokeBehavior {
    #[strum(serialize = "RESTRICT")]
    Restrict,
    #[strum(serialize = "CASCADE")]
    Cascade,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevokePrivilegesFromAccountRoleOptions {
    pub grant_option_for: bool,
    pub privileges: GrantPrivileges,
    pub on: GrantOn,
    pub account_role: AccountObjectIdentifier,
    pub behavior: Option<RevokeBehavior>,
}

impl Validate for RevokePrivilegesFromAccountRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("RevokePrivilegesFromAccountRoleOptions");
        errors.merge(self.privileges.validate());
        self.on.validate_into(&mut errors);
        errors.identifier("AccountRole", &self.account_role);
        errors.finish()
    }
}

request! {
    RevokePrivilegesFromAccountRoleRequest => RevokePrivilegesFromAccountRoleOptions {
        flag grant_option_for,
        val behavior: RevokeBehavior,
    }
}

impl RevokePrivilegesFromAccountRoleRequest {
    pub fn new(
        privileges: GrantPrivileges,
        on: GrantOn,
        account_role: AccountObjectIdentifier,
    ) -> Self {
        Self {
            options: RevokePrivilegesFromAccountRoleOptions {
                grant_option_for: false,
                privileges,
                on,
                account_role,
                behavior: None,
            },
        }
    }
}

fn database_role_target(errors: &mut Errors, structure: &'static str, on: &GrantOn) {
    on.validate_into(errors);
    errors.check(!on.is_account_tier(), || {
        Error::invalid_value(
            structure,
            "On",
            "database roles only take privileges on a database or its contents",
        )
    });
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantPrivilegesToDatabaseRoleOptions {
    pub privileges: GrantPrivileges,
    pub on: GrantOn,
    pub database_role: DatabaseObjectIdentifier,
    pub with_grant_option: bool,
}

impl Validate for GrantPrivilegesToDatabaseRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("GrantPrivilegesToDatabaseRoleOptions");
        errors.merge(self.privileges.validate());
        database_role_target(&mut errors, "GrantPrivilegesToDatabaseRoleOptions", &self.on);
        errors.identifier("DatabaseRole", &self.database_role);
        errors.finish()
    }
}

request! {
    GrantPrivilegesToDatabaseRoleRequest => GrantPrivilegesToDatabaseRoleOptions {
        flag with_grant_option,
    }
}

impl GrantPrivilegesToDatabaseRoleRequest {
    pub fn new(
        privileges: GrantPrivileges,
        on: GrantOn,
        database_role: DatabaseObjectIdentifier,
    ) -> Self {
        Self {
            options: GrantPrivilegesToDatabaseRoleOptions {
                privileges,
                on,
                database_role,
                with_grant_option: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevokePrivilegesFromDatabaseRoleOptions {
    pub grant_option_for: bool,
    pub privileges: GrantPrivileges,
    pub on: GrantOn,
    pub database_role: DatabaseObjectIdentifier,
    pub behavior: Option<RevokeBehavior>,
}

impl Validate for RevokePrivilegesFromDatabaseRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("RevokePrivilegesFromDatabaseRoleOptions");
        errors.merge(self.privileges.validate());
        database_role_target(&mut errors, "RevokePrivilegesFromDatabaseRoleOptions", &self.on);
        errors.identifier("DatabaseRole", &self.database_role);
        errors.finish()
    }
}

request! {
    RevokePrivilegesFromDatabaseRoleRequest => RevokePrivilegesFromDatabaseRoleOptions {
        flag grant_option_for,
        val behavior: RevokeBehavior,
    }
}

impl RevokePrivilegesFromDatabaseRoleRequest {
    pub fn new(
        privileges: GrantPrivileges,
        on: GrantOn,
        database_role: DatabaseObjectIdentifier,
    ) -> Self {
        Self {
            options: RevokePrivilegesFromDatabaseRoleOptions {
                grant_option_for: false,
                privileges,
                on,
                database_role,
                behavior: None,
            },
        }
    }
}

/// New owner in `GRANT OWNERSHIP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipGrantee {
    AccountRole(AccountObjectIdentifier),
    DatabaseRole(DatabaseObjectIdentifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CurrentGrants {
    #[strum(serialize = "COPY CURRENT GRANTS")]
    Copy,
    #[strum(serialize = "REVOKE CURRENT GRANTS")]
    Revoke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantOwnershipOptions {
    pub on: GrantOn,
    pub to: OwnershipGrantee,
    pub current_grants: Option<CurrentGrants>,
}

impl Validate for GrantOwnershipOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("GrantOwnershipOptions");
        self.on.validate_into(&mut errors);
        errors.check(self.on != GrantOn::Account, || {
            Error::invalid_value("GrantOwnershipOptions", "On", "the account has no owner")
        });
        match &self.to {
            OwnershipGrantee::AccountRole(id) => errors.identifier("To", id),
            OwnershipGrantee::DatabaseRole(id) => errors.identifier("To", id),
        }
        errors.finish()
    }
}

request! {
    GrantOwnershipRequest => GrantOwnershipOptions {
        val current_grants: CurrentGrants,
    }
}

impl GrantOwnershipRequest {
    pub fn new(on: GrantOn, to: OwnershipGrantee) -> Self {
        Self {
            options: GrantOwnershipOptions {
                on,
                to,
                current_grants: None,
            },
        }
    }
}

/// Receiver of an application role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationRoleGrantee {
    AccountRole(AccountObjectIdentifier),
    Application(AccountObjectIdentifier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantApplicationRoleOptions {
    pub name: DatabaseObjectIdentifier,
    pub to: ApplicationRoleGrantee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevokeApplicationRoleOptions {
    pub name: DatabaseObjectIdentifier,
    pub from: ApplicationRoleGrantee,
}

fn application_role_check(
    errors: &mut Errors,
    name: &DatabaseObjectIdentifier,
    grantee: &ApplicationRoleGrantee,
) {
    errors.identifier("name", name);
    match grantee {
        ApplicationRoleGrantee::AccountRole(id) | ApplicationRoleGrantee::Application(id) => {
            errors.identifier("Grantee", id)
        }
    }
}

impl Validate for GrantApplicationRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("GrantApplicationRoleOptions");
        application_role_check(&mut errors, &self.name, &self.to);
        errors.finish()
    }
}

impl Validate for RevokeApplicationRoleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("RevokeApplicationRoleOptions");
        application_role_check(&mut errors, &self.name, &self.from);
        errors.finish()
    }
}

request! {
    GrantApplicationRoleRequest => GrantApplicationRoleOptions {}
}

impl GrantApplicationRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier, to: ApplicationRoleGrantee) -> Self {
        Self {
            options: GrantApplicationRoleOptions { name, to },
        }
    }
}

request! {
    RevokeApplicationRoleRequest => RevokeApplicationRoleOptions {}
}

impl RevokeApplicationRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier, from: ApplicationRoleGrantee) -> Self {
        Self {
            options: RevokeApplicationRoleOptions { name, from },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowGrantsOn {
    Account,
    Object(ObjectType, ObjectIdentifier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowGrantsTo {
    Role(AccountObjectIdentifier),
    User(AccountObjectIdentifier),
    DatabaseRole(DatabaseObjectIdentifier),
    Share(AccountObjectIdentifier),
    Application(AccountObjectIdentifier),
    ApplicationRole(DatabaseObjectIdentifier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowGrantsOf {
    Role(AccountObjectIdentifier),
    DatabaseRole(DatabaseObjectIdentifier),
    Share(AccountObjectIdentifier),
    ApplicationRole(DatabaseObjectIdentifier),
}

/// `SHOW [FUTURE] GRANTS [ON ... | TO ... | OF ... | IN ...]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowGrantOptions {
    pub future: bool,
    pub on: Option<ShowGrantsOn>,
    pub to: Option<ShowGrantsTo>,
    pub of: Option<ShowGrantsOf>,
    pub in_scope: Option<BulkScope>,
}

impl Validate for ShowGrantOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowGrantOptions");
        errors.at_most_one_of(
            &["On", "To", "Of", "In"],
            &[&self.on, &self.to, &self.of, &self.in_scope],
        );
        errors.check(self.future == self.in_scope.is_some(), || {
            Error::invalid_value(
                "ShowGrantOptions",
                "Future",
                "FUTURE grants are listed per database or schema with IN",
            )
        });
        if let Some(scope) = &self.in_scope {
            scope.validate_into(&mut errors);
        }
        errors.finish()
    }
}

request! {
    ShowGrantRequest => ShowGrantOptions {
        val on: ShowGrantsOn,
        val to: ShowGrantsTo,
        val of: ShowGrantsOf,
    }
}

impl ShowGrantRequest {
    pub fn new() -> Self {
        Self {
            options: ShowGrantOptions::default(),
        }
    }

    /// `SHOW FUTURE GRANTS IN <scope>`
    pub fn future_in(scope: BulkScope) -> Self {
        Self {
            options: ShowGrantOptions {
                future: true,
                in_scope: Some(scope),
                ..Default::default()
            },
        }
    }
}

impl Default for ShowGrantRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// One `SHOW GRANTS` row. Future grants report `grant_on` / `grant_to`
/// instead of the past-tense columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrantRow {
    pub created_on: Option<DateTime<Utc>>,
    pub privilege: Option<String>,
    pub granted_on: Option<String>,
    pub name: Option<String>,
    pub granted_to: Option<String>,
    pub grantee_name: Option<String>,
    pub grant_option: Option<String>,
    pub granted_by: Option<String>,
}

impl FromRow for GrantRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            privilege: row.opt("privilege").or_else(|| row.opt("role")),
            granted_on: row.opt("granted_on").or_else(|| row.opt("grant_on")),
            name: row.opt("name"),
            granted_to: row.opt("granted_to").or_else(|| row.opt("grant_to")),
            grantee_name: row.opt("grantee_name"),
            grant_option: row.opt("grant_option"),
            granted_by: row.opt("granted_by"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grant {
    pub created_on: Option<DateTime<Utc>>,
    pub privilege: String,
    pub granted_on: Option<ObjectType>,
    pub name: String,
    pub granted_to: Option<ObjectType>,
    pub grantee_name: String,
    pub grant_option: bool,
    pub granted_by: String,
}

/// `DATABASE_ROLE` → `DATABASE ROLE`
fn object_type(token: &str) -> Option<ObjectType> {
    parse_token(&token.replace('_', " "))
}

impl From<GrantRow> for Grant {
    fn from(row: GrantRow) -> Self {
        Self {
            created_on: row.created_on,
            privilege: row.privilege.unwrap_or_default(),
            granted_on: row.granted_on.as_deref().and_then(object_type),
            name: row.name.unwrap_or_default(),
            granted_to: row.granted_to.as_deref().and_then(object_type),
            grantee_name: row.grantee_name.unwrap_or_default(),
            grant_option: row.grant_option.as_deref().is_some_and(yes),
            granted_by: row.granted_by.unwrap_or_default(),
        }
    }
}

gateway!(Grants);

impl Grants<'_> {
    pub async fn grant_privileges_to_account_role(
        &self,
        request: &GrantPrivilegesToAccountRoleRequest,
    ) -> Result<()> {
        self.client
            .exec("grant privileges to account role", &request.to_options())
            .await
    }

    pub async fn revoke_privileges_from_account_role(
        &self,
        request: &RevokePrivilegesFromAccountRoleRequest,
    ) -> Result<()> {
        self.client
            .exec("revoke privileges from account role", &request.to_options())
            .await
    }

    pub async fn grant_privileges_to_database_role(
        &self,
        request: &GrantPrivilegesToDatabaseRoleRequest,
    ) -> Result<()> {
        self.client
            .exec("grant privileges to database role", &request.to_options())
            .await
    }

    pub async fn revoke_privileges_from_database_role(
        &self,
        request: &RevokePrivilegesFromDatabaseRoleRequest,
    ) -> Result<()> {
        self.client
            .exec("revoke privileges from database role", &request.to_options())
            .await
    }

    pub async fn grant_ownership(&self, request: &GrantOwnershipRequest) -> Result<()> {
        self.client
            .exec("grant ownership", &request.to_options())
            .await
    }

    pub async fn grant_application_role(&self, request: &GrantApplicationRoleRequest) -> Result<()> {
        self.client
            .exec("grant application role", &request.to_options())
            .await
    }

    pub async fn revoke_application_role(
        &self,
        request: &RevokeApplicationRoleRequest,
    ) -> Result<()> {
        self.client
            .exec("revoke application role", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowGrantRequest) -> Result<Vec<Grant>> {
        self.client
            .query::<_, GrantRow, _>("show grants", &request.to_options())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::identifiers::SchemaObjectIdentifier;

    fn role() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("R1")
    }

    #[test]
    fn test_privileges_exactly_one() {
        let opts = GrantPrivilegesToAccountRoleRequest::new(
            GrantPrivileges::default(),
            GrantOn::database(AccountObjectIdentifier::new("DB1")),
            role(),
        )
        .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_database_role_rejects_account_targets() {
        let opts = GrantPrivilegesToDatabaseRoleRequest::new(
            GrantPrivileges::of([Privilege::Usage]),
            GrantOn::warehouse(AccountObjectIdentifier::new("WH1")),
            DatabaseObjectIdentifier::new("DB1", "DR1"),
        )
        .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));

        let opts = GrantPrivilegesToDatabaseRoleRequest::new(
            GrantPrivileges::of([Privilege::Select]),
            GrantOn::All(
                ObjectType::Table,
                BulkScope::Schema(DatabaseObjectIdentifier::new("DB1", "S1")),
            ),
            DatabaseObjectIdentifier::new("DB1", "DR1"),
        )
        .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_invalid_target_identifier() {
        let opts = GrantPrivilegesToAccountRoleRequest::new(
            GrantPrivileges::of([Privilege::Select]),
            GrantOn::schema_object(ObjectType::Table, SchemaObjectIdentifier::new("DB1", "", "T")),
            role(),
        )
        .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::InvalidObjectIdentifier)
        );
    }

    #[test]
    fn test_show_future_requires_scope() {
        let opts = ShowGrantOptions {
            future: true,
            ..Default::default()
        };
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
        let opts = ShowGrantRequest::new()
            .with_on(ShowGrantsOn::Account)
            .with_to(ShowGrantsTo::Role(role()))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_convert_rows() {
        let past = Row::new([
            ("created_on", Some("2024-01-02 03:04:05.000 +0000")),
            ("privilege", Some("USAGE")),
            ("granted_on", Some("DATABASE")),
            ("name", Some("DB1")),
            ("granted_to", Some("ROLE")),
            ("grantee_name", Some("R1")),
            ("grant_option", Some("false")),
            ("granted_by", Some("ACCOUNTADMIN")),
        ]);
        let grant = Grant::from(GrantRow::from_row(&past).unwrap());
        assert_eq!(grant.granted_on, Some(ObjectType::Database));
        assert_eq!(grant.granted_to, Some(ObjectType::Role));
        assert!(!grant.grant_option);

        let future = Row::new([
            ("privilege", Some("SELECT")),
            ("grant_on", Some("TABLE")),
            ("name", Some("DB1.S1.<TABLE>")),
            ("grant_to", Some("DATABASE_ROLE")),
            ("grantee_name", Some("DR1")),
            ("grant_option", Some("true")),
        ]);
        let grant = Grant::from(GrantRow::from_row(&future).unwrap());
        assert_eq!(grant.granted_on, Some(ObjectType::Table));
        assert_eq!(grant.granted_to, Some(ObjectType::DatabaseRole));
        assert!(grant.grant_option);
    }
}
