//! Network rules grouping host/port, IP or private-endpoint identifiers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{In, Like};
use crate::decode::{DecodeError, FromRow, Row, parse_list, parse_token};
use crate::error::{Error, Result};
use crate::identifiers::{Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkRuleType {
    #[strum(serialize = "IPV4")]
    #[default]
    Ipv4,
    #[strum(serialize = "AWSVPCEID")]
    AwsVpcEndpointId,
    #[strum(serialize = "AZURELINKID")]
    AzureLinkId,
    HostPort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkRuleMode {
    #[default]
    Ingress,
    InternalStage,
    Egress,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateNetworkRuleOptions {
    pub or_replace: bool,
    pub name: SchemaObjectIdentifier,
    pub rule_type: NetworkRuleType,
    pub value_list: Vec<String>,
    pub mode: NetworkRuleMode,
    pub comment: Option<String>,
}

impl Validate for CreateNetworkRuleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateNetworkRuleOptions");
        errors.identifier("name", &self.name);
        let compatible = match self.mode {
            NetworkRuleMode::Egress => self.rule_type == NetworkRuleType::HostPort,
            NetworkRuleMode::InternalStage => self.rule_type == NetworkRuleType::AwsVpcEndpointId,
            NetworkRuleMode::Ingress => self.rule_type != NetworkRuleType::HostPort,
        };
        errors.check(compatible, || {
            Error::invalid_value(
                "CreateNetworkRuleOptions",
                "Mode",
                format!("{} rules cannot use {} mode", self.rule_type, self.mode),
            )
        });
        errors.finish()
    }
}

request! {
    CreateNetworkRuleRequest => CreateNetworkRuleOptions {
        flag or_replace,
        opt comment: String,
    }
}

impl CreateNetworkRuleRequest {
    /// An empty `value_list` is legal and renders as `VALUE_LIST = ()`.
    pub fn new(
        name: SchemaObjectIdentifier,
        rule_type: NetworkRuleType,
        value_list: impl IntoIterator<Item = String>,
        mode: NetworkRuleMode,
    ) -> Self {
        Self {
            options: CreateNetworkRuleOptions {
                name,
                rule_type,
                value_list: value_list.into_iter().collect(),
                mode,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRuleSet {
    pub value_list: Option<Vec<String>>,
    pub comment: Option<String>,
}

setters!(NetworkRuleSet {
    val value_list: Vec<String>,
    opt comment: String,
});

impl Validate for NetworkRuleSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("NetworkRuleSet");
        errors.at_least_one_of(&["ValueList", "Comment"], &[&self.value_list, &self.comment]);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRuleUnset {
    pub value_list: bool,
    pub comment: bool,
}

setters!(NetworkRuleUnset {
    flag value_list,
    flag comment,
});

impl Validate for NetworkRuleUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("NetworkRuleUnset");
        errors.at_least_one_of(
            &["ValueList", "Comment"],
            &[&flag(self.value_list), &flag(self.comment)],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterNetworkRuleOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub set: Option<NetworkRuleSet>,
    pub unset: Option<NetworkRuleUnset>,
}

impl Validate for AlterNetworkRuleOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterNetworkRuleOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(&["Set", "Unset"], &[&self.set, &self.unset]);
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.finish()
    }
}

request! {
    AlterNetworkRuleRequest => AlterNetworkRuleOptions {
        flag if_exists,
        val set: NetworkRuleSet,
        val unset: NetworkRuleUnset,
    }
}

impl AlterNetworkRuleRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterNetworkRuleOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropNetworkRuleOptions, DropNetworkRuleRequest, "NETWORK RULE", SchemaObjectIdentifier);

target_only!(DescribeNetworkRuleOptions, "DESCRIBE NETWORK RULE", SchemaObjectIdentifier);

show_objects!(ShowNetworkRuleOptions, ShowNetworkRuleRequest, "NETWORK RULES" {
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    val limit: crate::common::LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRuleRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub rule_type: Option<String>,
    pub mode: Option<String>,
    pub entries_in_value_list: Option<i64>,
    pub owner_role_type: Option<String>,
}

impl FromRow for NetworkRuleRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            rule_type: row.opt("type"),
            mode: row.opt("mode"),
            entries_in_value_list: row.opt_i64("entries_in_valuelist")?,
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRule {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: String,
    pub rule_type: Option<NetworkRuleType>,
    pub mode: Option<NetworkRuleMode>,
    pub entries_in_value_list: i64,
    pub owner_role_type: String,
}

impl From<NetworkRuleRow> for NetworkRule {
    fn from(row: NetworkRuleRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            rule_type: row.rule_type.as_deref().and_then(parse_token),
            mode: row.mode.as_deref().and_then(parse_token),
            entries_in_value_list: row.entries_in_value_list.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl NetworkRule {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRuleDetailsRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub rule_type: Option<String>,
    pub mode: Option<String>,
    pub value_list: Option<String>,
}

impl FromRow for NetworkRuleDetailsRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            rule_type: row.opt("type"),
            mode: row.opt("mode"),
            value_list: row.opt("value_list"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRuleDetails {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: String,
    pub rule_type: Option<NetworkRuleType>,
    pub mode: Option<NetworkRuleMode>,
    pub value_list: Vec<String>,
}

impl From<NetworkRuleDetailsRow> for NetworkRuleDetails {
    fn from(row: NetworkRuleDetailsRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            rule_type: row.rule_type.as_deref().and_then(parse_token),
            mode: row.mode.as_deref().and_then(parse_token),
            value_list: row
                .value_list
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
        }
    }
}

gateway!(NetworkRules);

impl NetworkRules<'_> {
    pub async fn create(&self, request: &CreateNetworkRuleRequest) -> Result<()> {
        self.client
            .exec("create network rule", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterNetworkRuleRequest) -> Result<()> {
        self.client
            .exec("alter network rule", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropNetworkRuleRequest) -> Result<()> {
        self.client
            .exec("drop network rule", &request.to_options())
            .await
    }

    pub async fn show(&self, request: &ShowNetworkRuleRequest) -> Result<Vec<NetworkRule>> {
        self.client
            .query::<_, NetworkRuleRow, _>("show network rules", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<NetworkRule> {
        let request = ShowNetworkRuleRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "network rule", id, NetworkRule::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<NetworkRuleDetails> {
        let mut details = self
            .client
            .query::<_, NetworkRuleDetailsRow, NetworkRuleDetails>(
                "describe network rule",
                &DescribeNetworkRuleOptions::new(id.clone()),
            )
            .await?;
        if details.is_empty() {
            return Err(Error::not_found("network rule", id));
        }
        Ok(details.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "NR")
    }

    #[rstest]
    #[case(NetworkRuleType::HostPort, NetworkRuleMode::Egress, true)]
    #[case(NetworkRuleType::Ipv4, NetworkRuleMode::Ingress, true)]
    #[case(NetworkRuleType::AwsVpcEndpointId, NetworkRuleMode::InternalStage, true)]
    #[case(NetworkRuleType::HostPort, NetworkRuleMode::Ingress, false)]
    #[case(NetworkRuleType::Ipv4, NetworkRuleMode::Egress, false)]
    fn test_mode_compatibility(
        #[case] rule_type: NetworkRuleType,
        #[case] mode: NetworkRuleMode,
        #[case] valid: bool,
    ) {
        let opts = CreateNetworkRuleRequest::new(id(), rule_type, Vec::new(), mode).to_options();
        assert_eq!(opts.validate().is_ok(), valid);
    }

    #[test]
    fn test_token_parsing() {
        assert_eq!(
            "HOST_PORT".parse::<NetworkRuleType>().ok(),
            Some(NetworkRuleType::HostPort)
        );
        assert_eq!(
            "internal_stage".parse::<NetworkRuleMode>().ok(),
            Some(NetworkRuleMode::InternalStage)
        );
    }

    #[test]
    fn test_details_value_list() {
        let row = Row::new([
            ("name", Some("NR")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("type", Some("IPV4")),
            ("mode", Some("INGRESS")),
            ("value_list", Some("0.0.0.0/0,10.0.0.1")),
        ]);
        let details = NetworkRuleDetails::from(NetworkRuleDetailsRow::from_row(&row).unwrap());
        assert_eq!(details.rule_type, Some(NetworkRuleType::Ipv4));
        assert_eq!(details.value_list, vec!["0.0.0.0/0", "10.0.0.1"]);
    }
}
