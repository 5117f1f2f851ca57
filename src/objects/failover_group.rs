//! Failover groups, plus the account-level replication listings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::Like;
use crate::decode::{DecodeError, FromRow, Row, parse_list, yes};
use crate::error::{Error, Result};
use crate::identifiers::{AccountIdentifier, AccountObjectIdentifier, ExternalObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

/// Object kinds a failover group replicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum PluralObjectType {
    #[strum(serialize = "ACCOUNT PARAMETERS")]
    AccountParameters,
    #[strum(serialize = "DATABASES")]
    Databases,
    #[strum(serialize = "INTEGRATIONS")]
    Integrations,
    #[strum(serialize = "NETWORK POLICIES")]
    NetworkPolicies,
    #[strum(serialize = "RESOURCE MONITORS")]
    ResourceMonitors,
    #[strum(serialize = "ROLES")]
    Roles,
    #[strum(serialize = "SHARES")]
    Shares,
    #[strum(serialize = "USERS")]
    Users,
    #[strum(serialize = "WAREHOUSES")]
    Warehouses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum IntegrationType {
    #[strum(serialize = "SECURITY INTEGRATIONS")]
    SecurityIntegrations,
    #[strum(serialize = "API INTEGRATIONS")]
    ApiIntegrations,
    #[strum(serialize = "STORAGE INTEGRATIONS")]
    StorageIntegrations,
    #[strum(serialize = "EXTERNAL ACCESS INTEGRATIONS")]
    ExternalAccessIntegrations,
    #[strum(serialize = "NOTIFICATION INTEGRATIONS")]
    NotificationIntegrations,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateFailoverGroupOptions {
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub object_types: Vec<PluralObjectType>,
    pub allowed_databases: Vec<AccountObjectIdentifier>,
    pub allowed_shares: Vec<AccountObjectIdentifier>,
    pub allowed_integration_types: Vec<IntegrationType>,
    pub allowed_accounts: Vec<AccountIdentifier>,
    pub ignore_edition_check: bool,
    pub replication_schedule: Option<String>,
}

impl Validate for CreateFailoverGroupOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateFailoverGroupOptions");
        errors.identifier("name", &self.name);
        errors.required("ObjectTypes", &self.object_types);
        errors.required("AllowedAccounts", &self.allowed_accounts);
        errors.identifiers("AllowedDatabases", &self.allowed_databases);
        errors.identifiers("AllowedShares", &self.allowed_shares);
        errors.identifiers("AllowedAccounts", &self.allowed_accounts);
        errors.check(
            self.allowed_databases.is_empty()
                || self.object_types.contains(&PluralObjectType::Databases),
            || {
                Error::invalid_value(
                    "CreateFailoverGroupOptions",
                    "AllowedDatabases",
                    "requires DATABASES in ObjectTypes",
                )
            },
        );
        errors.check(
            self.allowed_shares.is_empty() || self.object_types.contains(&PluralObjectType::Shares),
            || {
                Error::invalid_value(
                    "CreateFailoverGroupOptions",
                    "AllowedShares",
                    "requires SHARES in ObjectTypes",
                )
            },
        );
        errors.finish()
    }
}

request! {
    CreateFailoverGroupRequest => CreateFailoverGroupOptions {
        flag if_not_exists,
        vec allowed_databases: AccountObjectIdentifier,
        vec allowed_shares: AccountObjectIdentifier,
        vec allowed_integration_types: IntegrationType,
        flag ignore_edition_check,
        opt replication_schedule: String,
    }
}

impl CreateFailoverGroupRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        object_types: impl IntoIterator<Item = PluralObjectType>,
        allowed_accounts: impl IntoIterator<Item = AccountIdentifier>,
    ) -> Self {
        Self {
            options: CreateFailoverGroupOptions {
                name,
                object_types: object_types.into_iter().collect(),
                allowed_accounts: allowed_accounts.into_iter().collect(),
                ..Default::default()
            },
        }
    }
}

/// `CREATE FAILOVER GROUP <name> AS REPLICA OF <org>.<account>.<group>`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecondaryFailoverGroupOptions {
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub primary: ExternalObjectIdentifier,
}

impl Validate for CreateSecondaryFailoverGroupOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSecondaryFailoverGroupOptions");
        errors.identifier("name", &self.name);
        errors.identifier("primary", &self.primary);
        errors.finish()
    }
}

request! {
    CreateSecondaryFailoverGroupRequest => CreateSecondaryFailoverGroupOptions {
        flag if_not_exists,
    }
}

impl CreateSecondaryFailoverGroupRequest {
    pub fn new(name: AccountObjectIdentifier, primary: ExternalObjectIdentifier) -> Self {
        Self {
            options: CreateSecondaryFailoverGroupOptions {
                if_not_exists: false,
                name,
                primary,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailoverGroupSet {
    pub object_types: Vec<PluralObjectType>,
    pub allowed_integration_types: Vec<IntegrationType>,
    pub replication_schedule: Option<String>,
}

setters!(FailoverGroupSet {
    vec object_types: PluralObjectType,
    vec allowed_integration_types: IntegrationType,
    opt replication_schedule: String,
});

impl Validate for FailoverGroupSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("FailoverGroupSet");
        errors.at_least_one_of(
            &["ObjectTypes", "AllowedIntegrationTypes", "ReplicationSchedule"],
            &[
                &self.object_types,
                &self.allowed_integration_types,
                &self.replication_schedule,
            ],
        );
        errors.finish()
    }
}

/// `MOVE DATABASES|SHARES <names> TO FAILOVER GROUP <group>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailoverGroupMove {
    pub names: Vec<AccountObjectIdentifier>,
    pub to: AccountObjectIdentifier,
}

impl FailoverGroupMove {
    pub fn new(
        names: impl IntoIterator<Item = AccountObjectIdentifier>,
        to: AccountObjectIdentifier,
    ) -> Self {
        Self {
            names: names.into_iter().collect(),
            to,
        }
    }
}

impl Validate for FailoverGroupMove {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("FailoverGroupMove");
        errors.required("Names", &self.names);
        errors.identifiers("Names", &self.names);
        errors.identifier("to", &self.to);
        errors.finish()
    }
}

/// Changes issued against the primary group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterSourceFailoverGroupOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub set: Option<FailoverGroupSet>,
    pub add_databases: Vec<AccountObjectIdentifier>,
    pub move_databases: Option<FailoverGroupMove>,
    pub remove_databases: Vec<AccountObjectIdentifier>,
    pub add_shares: Vec<AccountObjectIdentifier>,
    pub move_shares: Option<FailoverGroupMove>,
    pub remove_shares: Vec<AccountObjectIdentifier>,
    pub add_accounts: Vec<AccountIdentifier>,
    pub ignore_edition_check: bool,
    pub remove_accounts: Vec<AccountIdentifier>,
}

impl Validate for AlterSourceFailoverGroupOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterSourceFailoverGroupOptions");
        errors.identifier("name", &self.name);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.exactly_one_of(
            &[
                "RenameTo",
                "Set",
                "AddDatabases",
                "MoveDatabases",
                "RemoveDatabases",
                "AddShares",
                "MoveShares",
                "RemoveShares",
                "AddAccounts",
                "RemoveAccounts",
            ],
            &[
                &self.rename_to,
                &self.set,
                &self.add_databases,
                &self.move_databases,
                &self.remove_databases,
                &self.add_shares,
                &self.move_shares,
                &self.remove_shares,
                &self.add_accounts,
                &self.remove_accounts,
            ],
        );
        errors.check(
            !self.ignore_edition_check || !self.add_accounts.is_empty(),
            || {
                Error::invalid_value(
                    "AlterSourceFailoverGroupOptions",
                    "IgnoreEditionCheck",
                    "only valid with AddAccounts",
                )
            },
        );
        errors.nested(self.set.as_ref());
        errors.nested(self.move_databases.as_ref());
        errors.nested(self.move_shares.as_ref());
        errors.finish()
    }
}

request! {
    AlterSourceFailoverGroupRequest => AlterSourceFailoverGroupOptions {
        flag if_exists,
        val rename_to: AccountObjectIdentifier,
        val set: FailoverGroupSet,
        vec add_databases: AccountObjectIdentifier,
        val move_databases: FailoverGroupMove,
        vec remove_databases: AccountObjectIdentifier,
        vec add_shares: AccountObjectIdentifier,
        val move_shares: FailoverGroupMove,
        vec remove_shares: AccountObjectIdentifier,
        vec add_accounts: AccountIdentifier,
        flag ignore_edition_check,
        vec remove_accounts: AccountIdentifier,
    }
}

impl AlterSourceFailoverGroupRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterSourceFailoverGroupOptions {
                name,
                ..Default::default()
            },
        }
    }
}

/// Changes issued against a secondary group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterTargetFailoverGroupOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub refresh: bool,
    pub primary: bool,
    pub suspend: bool,
    pub resume: bool,
}

impl Validate for AlterTargetFailoverGroupOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterTargetFailoverGroupOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Refresh", "Primary", "Suspend", "Resume"],
            &[
                &flag(self.refresh),
                &flag(self.primary),
                &flag(self.suspend),
                &flag(self.resume),
            ],
        );
        errors.finish()
    }
}

request! {
    AlterTargetFailoverGroupRequest => AlterTargetFailoverGroupOptions {
        flag if_exists,
        flag refresh,
        flag primary,
        flag suspend,
        flag resume,
    }
}

impl AlterTargetFailoverGroupRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterTargetFailoverGroupOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropFailoverGroupOptions,
    DropFailoverGroupRequest,
    "FAILOVER GROUP",
    AccountObjectIdentifier
);

/// `SHOW FAILOVER GROUPS [IN ACCOUNT <account>]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowFailoverGroupOptions {
    pub in_account: Option<AccountIdentifier>,
}

impl Validate for ShowFailoverGroupOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowFailoverGroupOptions");
        errors.optional_identifier("InAccount", self.in_account.as_ref());
        errors.finish()
    }
}

request! {
    ShowFailoverGroupRequest => ShowFailoverGroupOptions {
        val in_account: AccountIdentifier,
    }
}

impl ShowFailoverGroupRequest {
    pub fn new() -> Self {
        Self {
            options: ShowFailoverGroupOptions::default(),
        }
    }
}

impl Default for ShowFailoverGroupRequest {
    fn default() -> Self {
        Self::new()
    }
}

target_only!(
    ShowFailoverGroupDatabasesOptions,
    "SHOW DATABASES IN FAILOVER GROUP",
    AccountObjectIdentifier
);

target_only!(
    ShowFailoverGroupSharesOptions,
    "SHOW SHARES IN FAILOVER GROUP",
    AccountObjectIdentifier
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailoverGroupRow {
    pub region_group: Option<String>,
    pub snowflake_region: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub account_name: Option<String>,
    pub name: String,
    pub group_type: Option<String>,
    pub comment: Option<String>,
    pub is_primary: Option<String>,
    pub primary: Option<String>,
    pub object_types: Option<String>,
    pub allowed_integration_types: Option<String>,
    pub allowed_accounts: Option<String>,
    pub organization_name: Option<String>,
    pub account_locator: Option<String>,
    pub replication_schedule: Option<String>,
    pub secondary_state: Option<String>,
    pub next_scheduled_refresh: Option<String>,
    pub owner: Option<String>,
}

impl FromRow for FailoverGroupRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            region_group: row.opt("region_group"),
            snowflake_region: row.opt("snowflake_region"),
            created_on: row.opt_timestamp("created_on")?,
            account_name: row.opt("account_name"),
            name: row.get("name")?,
            group_type: row.opt("type"),
            comment: row.opt("comment"),
            is_primary: row.opt("is_primary"),
            primary: row.opt("primary"),
            object_types: row.opt("object_types"),
            allowed_integration_types: row.opt("allowed_integration_types"),
            allowed_accounts: row.opt("allowed_accounts"),
            organization_name: row.opt("organization_name"),
            account_locator: row.opt("account_locator"),
            replication_schedule: row.opt("replication_schedule"),
            secondary_state: row.opt("secondary_state"),
            next_scheduled_refresh: row.opt("next_scheduled_refresh"),
            owner: row.opt("owner"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailoverGroup {
    pub region_group: String,
    pub snowflake_region: String,
    pub created_on: Option<DateTime<Utc>>,
    pub account_name: String,
    pub name: String,
    pub group_type: String,
    pub comment: String,
    pub is_primary: bool,
    pub primary: String,
    pub object_types: Vec<PluralObjectType>,
    pub allowed_integration_types: Vec<IntegrationType>,
    pub allowed_accounts: Vec<String>,
    pub organization_name: String,
    pub account_locator: String,
    pub replication_schedule: String,
    pub secondary_state: String,
    pub next_scheduled_refresh: String,
    pub owner: String,
}

fn parse_tokens<T: std::str::FromStr>(value: Option<&str>) -> Vec<T> {
    value
        .map(parse_list)
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item.parse().ok())
        .collect()
}

impl From<FailoverGroupRow> for FailoverGroup {
    fn from(row: FailoverGroupRow) -> Self {
        Self {
            object_types: parse_tokens(row.object_types.as_deref()),
            allowed_integration_types: parse_tokens(row.allowed_integration_types.as_deref()),
            allowed_accounts: row
                .allowed_accounts
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            region_group: row.region_group.unwrap_or_default(),
            snowflake_region: row.snowflake_region.unwrap_or_default(),
            created_on: row.created_on,
            account_name: row.account_name.unwrap_or_default(),
            name: row.name,
            group_type: row.group_type.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            is_primary: row.is_primary.as_deref().is_some_and(yes),
            primary: row.primary.unwrap_or_default(),
            organization_name: row.organization_name.unwrap_or_default(),
            account_locator: row.account_locator.unwrap_or_default(),
            replication_schedule: row.replication_schedule.unwrap_or_default(),
            secondary_state: row.secondary_state.unwrap_or_default(),
            next_scheduled_refresh: row.next_scheduled_refresh.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
        }
    }
}

impl FailoverGroup {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

/// A database or share listed inside a group; only the name is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailoverGroupMemberRow {
    pub name: String,
}

impl FromRow for FailoverGroupMemberRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
        })
    }
}

impl From<FailoverGroupMemberRow> for AccountObjectIdentifier {
    fn from(row: FailoverGroupMemberRow) -> Self {
        AccountObjectIdentifier::new(row.name)
    }
}

gateway!(FailoverGroups);

impl FailoverGroups<'_> {
    pub async fn create(&self, request: &CreateFailoverGroupRequest) -> Result<()> {
        self.client
            .exec("create failover group", &request.to_options())
            .await
    }

    pub async fn create_secondary(&self, request: &CreateSecondaryFailoverGroupRequest) -> Result<()> {
        self.client
            .exec("create secondary failover group", &request.to_options())
            .await
    }

    pub async fn alter_source(&self, request: &AlterSourceFailoverGroupRequest) -> Result<()> {
        self.client
            .exec("alter failover group", &request.to_options())
            .await
    }

    pub async fn alter_target(&self, request: &AlterTargetFailoverGroupRequest) -> Result<()> {
        self.client
            .exec("alter failover group", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropFailoverGroupRequest) -> Result<()> {
        self.client
            .exec("drop failover group", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowFailoverGroupRequest) -> Result<Vec<FailoverGroup>> {
        self.client
            .query::<_, FailoverGroupRow, _>("show failover groups", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<FailoverGroup> {
        find_by_id(
            self.show(&ShowFailoverGroupRequest::new()).await?,
            "failover group",
            id,
            FailoverGroup::id,
        )
    }

    pub async fn show_databases(
        &self,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<AccountObjectIdentifier>> {
        self.client
            .query::<_, FailoverGroupMemberRow, _>(
                "show databases in failover group",
                &ShowFailoverGroupDatabasesOptions::new(id.clone()),
            )
            .await
    }

    pub async fn show_shares(
        &self,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<AccountObjectIdentifier>> {
        self.client
            .query::<_, FailoverGroupMemberRow, _>(
                "show shares in failover group",
                &ShowFailoverGroupSharesOptions::new(id.clone()),
            )
            .await
    }
}

show_objects!(ShowReplicationAccountOptions, ShowReplicationAccountRequest, "REPLICATION ACCOUNTS" {
    val like: Like,
});

/// `SHOW REPLICATION DATABASES [LIKE] [WITH PRIMARY <account>.<database>]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowReplicationDatabaseOptions {
    pub like: Option<Like>,
    pub with_primary: Option<ExternalObjectIdentifier>,
}

impl Validate for ShowReplicationDatabaseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowReplicationDatabaseOptions");
        errors.like(self.like.as_ref());
        errors.optional_identifier("WithPrimary", self.with_primary.as_ref());
        errors.finish()
    }
}

request! {
    ShowReplicationDatabaseRequest => ShowReplicationDatabaseOptions {
        val like: Like,
        val with_primary: ExternalObjectIdentifier,
    }
}

impl ShowReplicationDatabaseRequest {
    pub fn new() -> Self {
        Self {
            options: ShowReplicationDatabaseOptions::default(),
        }
    }
}

impl Default for ShowReplicationDatabaseRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplicationAccountRow {
    pub snowflake_region: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub account_name: String,
    pub account_locator: Option<String>,
    pub comment: Option<String>,
    pub organization_name: Option<String>,
    pub is_org_admin: Option<String>,
}

impl FromRow for ReplicationAccountRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            snowflake_region: row.opt("snowflake_region"),
            created_on: row.opt_timestamp("created_on")?,
            account_name: row.get("account_name")?,
            account_locator: row.opt("account_locator"),
            comment: row.opt("comment"),
            organization_name: row.opt("organization_name"),
            is_org_admin: row.opt("is_org_admin"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicationAccount {
    pub snowflake_region: String,
    pub created_on: Option<DateTime<Utc>>,
    pub account_name: String,
    pub account_locator: String,
    pub comment: String,
    pub organization_name: String,
    pub is_org_admin: bool,
}

impl From<ReplicationAccountRow> for ReplicationAccount {
    fn from(row: ReplicationAccountRow) -> Self {
        Self {
            snowflake_region: row.snowflake_region.unwrap_or_default(),
            created_on: row.created_on,
            account_name: row.account_name,
            account_locator: row.account_locator.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            organization_name: row.organization_name.unwrap_or_default(),
            is_org_admin: row.is_org_admin.as_deref().is_some_and(yes),
        }
    }
}

impl ReplicationAccount {
    pub fn id(&self) -> AccountIdentifier {
        AccountIdentifier::new(&self.organization_name, &self.account_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplicationDatabaseRow {
    pub region_group: Option<String>,
    pub snowflake_region: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub account_name: Option<String>,
    pub name: String,
    pub comment: Option<String>,
    pub is_primary: Option<String>,
    pub primary: Option<String>,
    pub replication_allowed_to_accounts: Option<String>,
    pub failover_allowed_to_accounts: Option<String>,
    pub organization_name: Option<String>,
    pub account_locator: Option<String>,
}

impl FromRow for ReplicationDatabaseRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            region_group: row.opt("region_group"),
            snowflake_region: row.opt("snowflake_region"),
            created_on: row.opt_timestamp("created_on")?,
            account_name: row.opt("account_name"),
            name: row.get("name")?,
            comment: row.opt("comment"),
            is_primary: row.opt("is_primary"),
            primary: row.opt("primary"),
            replication_allowed_to_accounts: row.opt("replication_allowed_to_accounts"),
            failover_allowed_to_accounts: row.opt("failover_allowed_to_accounts"),
            organization_name: row.opt("organization_name"),
            account_locator: row.opt("account_locator"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicationDatabase {
    pub region_group: String,
    pub snowflake_region: String,
    pub created_on: Option<DateTime<Utc>>,
    pub account_name: String,
    pub name: String,
    pub comment: String,
    pub is_primary: bool,
    pub primary: String,
    pub replication_allowed_to_accounts: Vec<String>,
    pub failover_allowed_to_accounts: Vec<String>,
    pub organization_name: String,
    pub account_locator: String,
}

impl From<ReplicationDatabaseRow> for ReplicationDatabase {
    fn from(row: ReplicationDatabaseRow) -> Self {
        Self {
            region_group: row.region_group.unwrap_or_default(),
            snowflake_region: row.snowflake_region.unwrap_or_default(),
            created_on: row.created_on,
            account_name: row.account_name.unwrap_or_default(),
            name: row.name,
            comment: row.comment.unwrap_or_default(),
            is_primary: row.is_primary.as_deref().is_some_and(yes),
            primary: row.primary.unwrap_or_default(),
            replication_allowed_to_accounts: row
                .replication_allowed_to_accounts
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            failover_allowed_to_accounts: row
                .failover_allowed_to_accounts
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            organization_name: row.organization_name.unwrap_or_default(),
            account_locator: row.account_locator.unwrap_or_default(),
        }
    }
}

gateway!(Replication);

impl Replication<'_> {
    pub async fn show_replication_accounts(
        &self,
        request: &ShowReplicationAccountRequest,
    ) -> Result<Vec<ReplicationAccount>> {
        self.client
            .query::<_, ReplicationAccountRow, _>(
                "show replication accounts",
                &request.to_options(),
            )
            .await
    }

    pub async fn show_replication_databases(
        &self,
        request: &ShowReplicationDatabaseRequest,
    ) -> Result<Vec<ReplicationDatabase>> {
        self.client
            .query::<_, ReplicationDatabaseRow, _>(
                "show replication databases",
                &request.to_options(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("FG")
    }

    #[test]
    fn test_create_requires_types_and_accounts() {
        let opts = CreateFailoverGroupRequest::new(id(), [], []).to_options();
        let err = opts.validate().unwrap_err();
        assert_eq!(
            err.kinds(),
            vec![ErrorKind::MissingRequiredField, ErrorKind::MissingRequiredField]
        );
    }

    #[test]
    fn test_allowed_databases_need_object_type() {
        let opts = CreateFailoverGroupRequest::new(
            id(),
            [PluralObjectType::Roles],
            [AccountIdentifier::new("ORG", "ACC")],
        )
        .with_allowed_databases([AccountObjectIdentifier::new("DB1")])
        .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_actions() {
        let none = AlterSourceFailoverGroupRequest::new(id()).to_options();
        assert_eq!(none.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        let stray = AlterSourceFailoverGroupRequest::new(id())
            .with_remove_databases([AccountObjectIdentifier::new("DB1")])
            .with_ignore_edition_check(true)
            .to_options();
        assert_eq!(stray.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
        let target = AlterTargetFailoverGroupRequest::new(id())
            .with_refresh(true)
            .with_suspend(true)
            .to_options();
        assert_eq!(target.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_row() {
        let row = Row::new([
            ("name", Some("FG")),
            ("is_primary", Some("true")),
            ("object_types", Some("DATABASES, ROLES")),
            ("allowed_integration_types", Some("")),
            ("allowed_accounts", Some("ORG.A1, ORG.A2")),
            ("comment", None),
        ]);
        let group = FailoverGroup::from(FailoverGroupRow::from_row(&row).unwrap());
        assert!(group.is_primary);
        assert_eq!(
            group.object_types,
            vec![PluralObjectType::Databases, PluralObjectType::Roles]
        );
        assert!(group.allowed_integration_types.is_empty());
        assert_eq!(group.allowed_accounts, vec!["ORG.A1", "ORG.A2"]);
    }
}
