//! Network policies: allow and block lists applied at login.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::Like;
use crate::decode::{DecodeError, FromRow, Row};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateNetworkPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub allowed_ip_list: Vec<String>,
    pub blocked_ip_list: Vec<String>,
    pub comment: Option<String>,
}

impl Validate for CreateNetworkPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateNetworkPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.identifiers("AllowedNetworkRuleList", &self.allowed_network_rule_list);
        errors.identifiers("BlockedNetworkRuleList", &self.blocked_network_rule_list);
        errors.finish()
    }
}

request! {
    CreateNetworkPolicyRequest => CreateNetworkPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        vec allowed_network_rule_list: SchemaObjectIdentifier,
        vec blocked_network_rule_list: SchemaObjectIdentifier,
        vec allowed_ip_list: String,
        vec blocked_ip_list: String,
        opt comment: String,
    }
}

impl CreateNetworkPolicyRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: CreateNetworkPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }
}

/// `SET` clause; `Some(vec![])` clears a list with `= ()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkPolicySet {
    pub allowed_network_rule_list: Option<Vec<SchemaObjectIdentifier>>,
    pub blocked_network_rule_list: Option<Vec<SchemaObjectIdentifier>>,
    pub allowed_ip_list: Option<Vec<String>>,
    pub blocked_ip_list: Option<Vec<String>>,
    pub comment: Option<String>,
}

setters!(NetworkPolicySet {
    val allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    val blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
    val allowed_ip_list: Vec<String>,
    val blocked_ip_list: Vec<String>,
    opt comment: String,
});

impl Validate for NetworkPolicySet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("NetworkPolicySet");
        errors.at_least_one_of(
            &[
                "AllowedNetworkRuleList",
                "BlockedNetworkRuleList",
                "AllowedIpList",
                "BlockedIpList",
                "Comment",
            ],
            &[
                &self.allowed_network_rule_list,
                &self.blocked_network_rule_list,
                &self.allowed_ip_list,
                &self.blocked_ip_list,
                &self.comment,
            ],
        );
        for list in [&self.allowed_network_rule_list, &self.blocked_network_rule_list]
            .into_iter()
            .flatten()
        {
            errors.identifiers("NetworkRuleList", list);
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkPolicyUnset {
    pub allowed_network_rule_list: bool,
    pub blocked_network_rule_list: bool,
    pub allowed_ip_list: bool,
    pub blocked_ip_list: bool,
    pub comment: bool,
}

setters!(NetworkPolicyUnset {
    flag allowed_network_rule_list,
    flag blocked_network_rule_list,
    flag allowed_ip_list,
    flag blocked_ip_list,
    flag comment,
});

impl Validate for NetworkPolicyUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("NetworkPolicyUnset");
        errors.at_least_one_of(
            &[
                "AllowedNetworkRuleList",
                "BlockedNetworkRuleList",
                "AllowedIpList",
                "BlockedIpList",
                "Comment",
            ],
            &[
                &flag(self.allowed_network_rule_list),
                &flag(self.blocked_network_rule_list),
                &flag(self.allowed_ip_list),
                &flag(self.blocked_ip_list),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

/// `ADD | REMOVE ALLOWED_NETWORK_RULE_LIST = ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRuleChange {
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
}

impl NetworkRuleChange {
    pub fn allowed(rules: impl IntoIterator<Item = SchemaObjectIdentifier>) -> Self {
        Self {
            allowed_network_rule_list: rules.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn blocked(rules: impl IntoIterator<Item = SchemaObjectIdentifier>) -> Self {
        Self {
            blocked_network_rule_list: rules.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Validate for NetworkRuleChange {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("NetworkRuleChange");
        errors.exactly_one_of(
            &["AllowedNetworkRuleList", "BlockedNetworkRuleList"],
            &[
                &self.allowed_network_rule_list,
                &self.blocked_network_rule_list,
            ],
        );
        errors.identifiers("AllowedNetworkRuleList", &self.allowed_network_rule_list);
        errors.identifiers("BlockedNetworkRuleList", &self.blocked_network_rule_list);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterNetworkPolicyOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub set: Option<NetworkPolicySet>,
    pub unset: Option<NetworkPolicyUnset>,
    pub add: Option<NetworkRuleChange>,
    pub remove: Option<NetworkRuleChange>,
    pub rename_to: Option<AccountObjectIdentifier>,
}

impl Validate for AlterNetworkPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterNetworkPolicyOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &["Set", "Unset", "Add", "Remove", "RenameTo"],
            &[&self.set, &self.unset, &self.add, &self.remove, &self.rename_to],
        );
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.nested(self.add.as_ref());
        errors.nested(self.remove.as_ref());
        errors.finish()
    }
}

request! {
    AlterNetworkPolicyRequest => AlterNetworkPolicyOptions {
        flag if_exists,
        val set: NetworkPolicySet,
        val unset: NetworkPolicyUnset,
        val add: NetworkRuleChange,
        val remove: NetworkRuleChange,
        opt rename_to: AccountObjectIdentifier,
    }
}

impl AlterNetworkPolicyRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterNetworkPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropNetworkPolicyOptions,
    DropNetworkPolicyRequest,
    "NETWORK POLICY",
    AccountObjectIdentifier
);

target_only!(
    DescribeNetworkPolicyOptions,
    "DESCRIBE NETWORK POLICY",
    AccountObjectIdentifier
);

show_objects!(ShowNetworkPolicyOptions, ShowNetworkPolicyRequest, "NETWORK POLICIES" {
    val like: Like,
});

/// One `SHOW NETWORK POLICIES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkPolicyRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub comment: Option<String>,
    pub entries_in_allowed_ip_list: Option<i64>,
    pub entries_in_blocked_ip_list: Option<i64>,
    pub entries_in_allowed_network_rules: Option<i64>,
    pub entries_in_blocked_network_rules: Option<i64>,
}

impl FromRow for NetworkPolicyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            comment: row.opt("comment"),
            entries_in_allowed_ip_list: row.opt_i64("entries_in_allowed_ip_list")?,
            entries_in_blocked_ip_list: row.opt_i64("entries_in_blocked_ip_list")?,
            entries_in_allowed_network_rules: row.opt_i64("entries_in_allowed_network_rules")?,
            entries_in_blocked_network_rules: row.opt_i64("entries_in_blocked_network_rules")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkPolicy {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub comment: String,
    pub entries_in_allowed_ip_list: i64,
    pub entries_in_blocked_ip_list: i64,
    pub entries_in_allowed_network_rules: i64,
    pub entries_in_blocked_network_rules: i64,
}

impl From<NetworkPolicyRow> for NetworkPolicy {
    fn from(row: NetworkPolicyRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            comment: row.comment.unwrap_or_default(),
            entries_in_allowed_ip_list: row.entries_in_allowed_ip_list.unwrap_or_default(),
            entries_in_blocked_ip_list: row.entries_in_blocked_ip_list.unwrap_or_default(),
            entries_in_allowed_network_rules: row
                .entries_in_allowed_network_rules
                .unwrap_or_default(),
            entries_in_blocked_network_rules: row
                .entries_in_blocked_network_rules
                .unwrap_or_default(),
        }
    }
}

impl NetworkPolicy {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

/// One `DESCRIBE NETWORK POLICY` row: a list name and its contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkPolicyPropertyRow {
    pub name: String,
    pub value: Option<String>,
}

impl FromRow for NetworkPolicyPropertyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            value: row.opt("value"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkPolicyProperty {
    pub name: String,
    pub value: String,
}

impl From<NetworkPolicyPropertyRow> for NetworkPolicyProperty {
    fn from(row: NetworkPolicyPropertyRow) -> Self {
        Self {
            name: row.name,
            value: row.value.unwrap_or_default(),
        }
    }
}

gateway!(NetworkPolicies);

impl NetworkPolicies<'_> {
    pub async fn create(&self, request: &CreateNetworkPolicyRequest) -> Result<()> {
        self.client
            .exec("create network policy", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterNetworkPolicyRequest) -> Result<()> {
        self.client
            .exec("alter network policy", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropNetworkPolicyRequest) -> Result<()> {
        self.client
            .exec("drop network policy", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowNetworkPolicyRequest) -> Result<Vec<NetworkPolicy>> {
        self.client
            .query::<_, NetworkPolicyRow, _>("show network policies", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<NetworkPolicy> {
        let request = ShowNetworkPolicyRequest::new().with_like(Like::new(id.name()));
        find_by_id(
            self.show(&request).await?,
            "network policy",
            id,
            NetworkPolicy::id,
        )
    }

    pub async fn describe(
        &self,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<NetworkPolicyProperty>> {
        self.client
            .query::<_, NetworkPolicyPropertyRow, _>(
                "describe network policy",
                &DescribeNetworkPolicyOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("NP")
    }

    #[test]
    fn test_set_accepts_empty_list() {
        let opts = AlterNetworkPolicyRequest::new(id())
            .with_set(NetworkPolicySet::default().with_blocked_ip_list(vec![]))
            .to_options();
        assert!(opts.validate().is_ok());
        let opts = AlterNetworkPolicyRequest::new(id())
            .with_set(NetworkPolicySet::default())
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::AtLeastOneOf));
    }

    #[test]
    fn test_rule_change_exactly_one() {
        let change = NetworkRuleChange {
            allowed_network_rule_list: vec![SchemaObjectIdentifier::new("D", "S", "A")],
            blocked_network_rule_list: vec![SchemaObjectIdentifier::new("D", "S", "B")],
        };
        assert_eq!(change.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("name", Some("NP")),
            ("entries_in_allowed_ip_list", Some("2")),
            ("entries_in_blocked_ip_list", Some("0")),
        ]);
        let policy = NetworkPolicy::from(NetworkPolicyRow::from_row(&row).unwrap());
        assert_eq!(policy.entries_in_allowed_ip_list, 2);
        assert_eq!(policy.entries_in_allowed_network_rules, 0);
        assert_eq!(policy.id(), id());
    }
}
