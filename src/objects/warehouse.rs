//! Warehouses: the compute clusters queries run on.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, parse_token, yes};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum WarehouseType {
    #[strum(serialize = "STANDARD")]
    Standard,
    #[strum(serialize = "SNOWPARK-OPTIMIZED")]
    SnowparkOptimized,
}

/// Size tokens. SHOW output spells them `X-Small`, `2X-Large`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum WarehouseSize {
    #[strum(to_string = "XSMALL", serialize = "X-SMALL")]
    XSmall,
    #[strum(serialize = "SMALL")]
    Small,
    #[strum(serialize = "MEDIUM")]
    Medium,
    #[strum(serialize = "LARGE")]
    Large,
    #[strum(to_string = "XLARGE", serialize = "X-LARGE")]
    XLarge,
    #[strum(to_string = "XXLARGE", serialize = "X2LARGE", serialize = "2X-LARGE")]
    XXLarge,
    #[strum(to_string = "XXXLARGE", serialize = "X3LARGE", serialize = "3X-LARGE")]
    XXXLarge,
    #[strum(to_string = "X4LARGE", serialize = "4X-LARGE")]
    X4Large,
    #[strum(to_string = "X5LARGE", serialize = "5X-LARGE")]
    X5Large,
    #[strum(to_string = "X6LARGE", serialize = "6X-LARGE")]
    X6Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum ScalingPolicy {
    Standard,
    Economy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum WarehouseState {
    Started,
    Suspended,
    Resizing,
    Suspending,
    Resuming,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateWarehouseOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: AccountObjectIdentifier,
    pub warehouse_type: Option<WarehouseType>,
    pub warehouse_size: Option<WarehouseSize>,
    pub max_cluster_count: Option<i64>,
    pub min_cluster_count: Option<i64>,
    pub scaling_policy: Option<ScalingPolicy>,
    pub auto_suspend: Option<i64>,
    pub auto_resume: Option<bool>,
    pub initially_suspended: Option<bool>,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub enable_query_acceleration: Option<bool>,
    pub query_acceleration_max_scale_factor: Option<i64>,
    pub max_concurrency_level: Option<i64>,
    pub statement_queued_timeout_in_seconds: Option<i64>,
    pub statement_timeout_in_seconds: Option<i64>,
    pub tag: Vec<TagAssociation>,
}

fn validate_cluster_counts(errors: &mut Errors, min: Option<i64>, max: Option<i64>) {
    errors.range("MinClusterCount", min, 1, 10);
    errors.range("MaxClusterCount", max, 1, 10);
    if let (Some(min), Some(max)) = (min, max)
        && max < min
    {
        errors.push(crate::error::Error::invalid_value(
            errors.structure(),
            "MaxClusterCount",
            "must be greater than or equal to MinClusterCount",
        ));
    }
}

impl Validate for CreateWarehouseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateWarehouseOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        validate_cluster_counts(&mut errors, self.min_cluster_count, self.max_cluster_count);
        errors.range("AutoSuspend", self.auto_suspend, 0, i64::MAX);
        errors.range(
            "QueryAccelerationMaxScaleFactor",
            self.query_acceleration_max_scale_factor,
            0,
            100,
        );
        errors.optional_identifier("ResourceMonitor", self.resource_monitor.as_ref());
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateWarehouseRequest => CreateWarehouseOptions {
        flag or_replace,
        flag if_not_exists,
        val warehouse_type: WarehouseType,
        val warehouse_size: WarehouseSize,
        val max_cluster_count: i64,
        val min_cluster_count: i64,
        val scaling_policy: ScalingPolicy,
        val auto_suspend: i64,
        val auto_resume: bool,
        val initially_suspended: bool,
        opt resource_monitor: AccountObjectIdentifier,
        opt comment: String,
        val enable_query_acceleration: bool,
        val query_acceleration_max_scale_factor: i64,
        val max_concurrency_level: i64,
        val statement_queued_timeout_in_seconds: i64,
        val statement_timeout_in_seconds: i64,
        vec tag: TagAssociation,
    }
}

impl CreateWarehouseRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: CreateWarehouseOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseSet {
    pub warehouse_type: Option<WarehouseType>,
    pub warehouse_size: Option<WarehouseSize>,
    pub wait_for_completion: Option<bool>,
    pub max_cluster_count: Option<i64>,
    pub min_cluster_count: Option<i64>,
    pub scaling_policy: Option<ScalingPolicy>,
    pub auto_suspend: Option<i64>,
    pub auto_resume: Option<bool>,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub enable_query_acceleration: Option<bool>,
    pub query_acceleration_max_scale_factor: Option<i64>,
    pub max_concurrency_level: Option<i64>,
    pub statement_queued_timeout_in_seconds: Option<i64>,
    pub statement_timeout_in_seconds: Option<i64>,
}

setters!(WarehouseSet {
    val warehouse_type: WarehouseType,
    val warehouse_size: WarehouseSize,
    val wait_for_completion: bool,
    val max_cluster_count: i64,
    val min_cluster_count: i64,
    val scaling_policy: ScalingPolicy,
    val auto_suspend: i64,
    val auto_resume: bool,
    opt resource_monitor: AccountObjectIdentifier,
    opt comment: String,
    val enable_query_acceleration: bool,
    val query_acceleration_max_scale_factor: i64,
    val max_concurrency_level: i64,
    val statement_queued_timeout_in_seconds: i64,
    val statement_timeout_in_seconds: i64,
});

impl Validate for WarehouseSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("WarehouseSet");
        errors.at_least_one_of(
            &[
                "WarehouseType",
                "WarehouseSize",
                "WaitForCompletion",
                "MaxClusterCount",
                "MinClusterCount",
                "ScalingPolicy",
                "AutoSuspend",
                "AutoResume",
                "ResourceMonitor",
                "Comment",
                "EnableQueryAcceleration",
                "QueryAccelerationMaxScaleFactor",
                "MaxConcurrencyLevel",
                "StatementQueuedTimeoutInSeconds",
                "StatementTimeoutInSeconds",
            ],
            &[
                &self.warehouse_type,
                &self.warehouse_size,
                &self.wait_for_completion,
                &self.max_cluster_count,
                &self.min_cluster_count,
                &self.scaling_policy,
                &self.auto_suspend,
                &self.auto_resume,
                &self.resource_monitor,
                &self.comment,
                &self.enable_query_acceleration,
                &self.query_acceleration_max_scale_factor,
                &self.max_concurrency_level,
                &self.statement_queued_timeout_in_seconds,
                &self.statement_timeout_in_seconds,
            ],
        );
        if self.wait_for_completion.is_some() && self.warehouse_size.is_none() {
            errors.push(crate::error::Error::invalid_value(
                "WarehouseSet",
                "WaitForCompletion",
                "can only be set together with WarehouseSize",
            ));
        }
        validate_cluster_counts(&mut errors, self.min_cluster_count, self.max_cluster_count);
        errors.range(
            "QueryAccelerationMaxScaleFactor",
            self.query_acceleration_max_scale_factor,
            0,
            100,
        );
        errors.optional_identifier("ResourceMonitor", self.resource_monitor.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseUnset {
    pub warehouse_type: bool,
    pub wait_for_completion: bool,
    pub max_cluster_count: bool,
    pub min_cluster_count: bool,
    pub scaling_policy: bool,
    pub auto_suspend: bool,
    pub auto_resume: bool,
    pub resource_monitor: bool,
    pub comment: bool,
    pub enable_query_acceleration: bool,
    pub query_acceleration_max_scale_factor: bool,
    pub max_concurrency_level: bool,
    pub statement_queued_timeout_in_seconds: bool,
    pub statement_timeout_in_seconds: bool,
}

setters!(WarehouseUnset {
    flag warehouse_type,
    flag wait_for_completion,
    flag max_cluster_count,
    flag min_cluster_count,
    flag scaling_policy,
    flag auto_suspend,
    flag auto_resume,
    flag resource_monitor,
    flag comment,
    flag enable_query_acceleration,
    flag query_acceleration_max_scale_factor,
    flag max_concurrency_level,
    flag statement_queued_timeout_in_seconds,
    flag statement_timeout_in_seconds,
});

impl Validate for WarehouseUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("WarehouseUnset");
        errors.at_least_one_of(
            &[
                "WarehouseType",
                "WaitForCompletion",
                "MaxClusterCount",
                "MinClusterCount",
                "ScalingPolicy",
                "AutoSuspend",
                "AutoResume",
                "ResourceMonitor",
                "Comment",
                "EnableQueryAcceleration",
                "QueryAccelerationMaxScaleFactor",
                "MaxConcurrencyLevel",
                "StatementQueuedTimeoutInSeconds",
                "StatementTimeoutInSeconds",
            ],
            &[
                &flag(self.warehouse_type),
                &flag(self.wait_for_completion),
                &flag(self.max_cluster_count),
                &flag(self.min_cluster_count),
                &flag(self.scaling_policy),
                &flag(self.auto_suspend),
                &flag(self.auto_resume),
                &flag(self.resource_monitor),
                &flag(self.comment),
                &flag(self.enable_query_acceleration),
                &flag(self.query_acceleration_max_scale_factor),
                &flag(self.max_concurrency_level),
                &flag(self.statement_queued_timeout_in_seconds),
                &flag(self.statement_timeout_in_seconds),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterWarehouseOptions {
    pub if_exists: bool,
    pub name: AccountObjectIdentifier,
    pub suspend: bool,
    pub resume: bool,
    pub if_suspended: bool,
    pub abort_all_queries: bool,
    pub new_name: Option<AccountObjectIdentifier>,
    pub set: Option<WarehouseSet>,
    pub unset: Option<WarehouseUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterWarehouseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterWarehouseOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "Suspend",
                "Resume",
                "AbortAllQueries",
                "NewName",
                "Set",
                "Unset",
                "SetTag",
                "UnsetTag",
            ],
            &[
                &flag(self.suspend),
                &flag(self.resume),
                &flag(self.abort_all_queries),
                &self.new_name,
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        if self.if_suspended && !self.resume {
            errors.push(crate::error::Error::invalid_value(
                "AlterWarehouseOptions",
                "IfSuspended",
                "can only be set together with Resume",
            ));
        }
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.optional_identifier("NewName", self.new_name.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterWarehouseRequest => AlterWarehouseOptions {
        flag if_exists,
        flag suspend,
        flag resume,
        flag if_suspended,
        flag abort_all_queries,
        opt new_name: AccountObjectIdentifier,
        val set: WarehouseSet,
        val unset: WarehouseUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterWarehouseRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            options: AlterWarehouseOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropWarehouseOptions, DropWarehouseRequest, "WAREHOUSE", AccountObjectIdentifier);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowWarehouseOptions {
    pub like: Option<Like>,
}

impl Validate for ShowWarehouseOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowWarehouseOptions");
        errors.like(self.like.as_ref());
        errors.finish()
    }
}

request! {
    ShowWarehouseRequest => ShowWarehouseOptions {
        val like: Like,
    }
}

impl ShowWarehouseRequest {
    pub fn new() -> Self {
        Self {
            options: ShowWarehouseOptions::default(),
        }
    }
}

impl Default for ShowWarehouseRequest {
    fn default() -> Self {
        Self::new()
    }
}

target_only!(DescribeWarehouseOptions, "DESCRIBE WAREHOUSE", AccountObjectIdentifier);

/// One `SHOW WAREHOUSES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseRow {
    pub name: String,
    pub state: String,
    pub warehouse_type: Option<String>,
    pub size: Option<String>,
    pub min_cluster_count: Option<i64>,
    pub max_cluster_count: Option<i64>,
    pub started_clusters: Option<i64>,
    pub running: Option<i64>,
    pub queued: Option<i64>,
    pub is_default: Option<String>,
    pub is_current: Option<String>,
    pub auto_suspend: Option<i64>,
    pub auto_resume: Option<String>,
    pub available: Option<f64>,
    pub provisioning: Option<f64>,
    pub quiescing: Option<f64>,
    pub other: Option<f64>,
    pub created_on: Option<DateTime<Utc>>,
    pub resumed_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub enable_query_acceleration: Option<String>,
    pub query_acceleration_max_scale_factor: Option<i64>,
    pub resource_monitor: Option<String>,
    pub scaling_policy: Option<String>,
    pub owner_role_type: Option<String>,
}

impl FromRow for WarehouseRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            state: row.get("state")?,
            warehouse_type: row.opt("type"),
            size: row.opt("size"),
            min_cluster_count: row.opt_i64("min_cluster_count")?,
            max_cluster_count: row.opt_i64("max_cluster_count")?,
            started_clusters: row.opt_i64("started_clusters")?,
            running: row.opt_i64("running")?,
            queued: row.opt_i64("queued")?,
            is_default: row.opt("is_default"),
            is_current: row.opt("is_current"),
            auto_suspend: row.opt_i64("auto_suspend")?,
            auto_resume: row.opt("auto_resume"),
            available: row.opt_f64("available")?,
            provisioning: row.opt_f64("provisioning")?,
            quiescing: row.opt_f64("quiescing")?,
            other: row.opt_f64("other")?,
            created_on: row.opt_timestamp("created_on")?,
            resumed_on: row.opt_timestamp("resumed_on")?,
            updated_on: row.opt_timestamp("updated_on")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            enable_query_acceleration: row.opt("enable_query_acceleration"),
            query_acceleration_max_scale_factor: row
                .opt_i64("query_acceleration_max_scale_factor")?,
            resource_monitor: row.opt("resource_monitor"),
            scaling_policy: row.opt("scaling_policy"),
            owner_role_type: row.opt("owner_role_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warehouse {
    pub name: String,
    pub state: Option<WarehouseState>,
    pub warehouse_type: Option<WarehouseType>,
    pub size: Option<WarehouseSize>,
    pub min_cluster_count: i64,
    pub max_cluster_count: i64,
    pub started_clusters: i64,
    pub running: i64,
    pub queued: i64,
    pub is_default: bool,
    pub is_current: bool,
    pub auto_suspend: i64,
    pub auto_resume: bool,
    pub available: f64,
    pub provisioning: f64,
    pub quiescing: f64,
    pub other: f64,
    pub created_on: Option<DateTime<Utc>>,
    pub resumed_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub owner: String,
    pub comment: String,
    pub enable_query_acceleration: bool,
    pub query_acceleration_max_scale_factor: i64,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub scaling_policy: Option<ScalingPolicy>,
    pub owner_role_type: String,
}

impl From<WarehouseRow> for Warehouse {
    fn from(row: WarehouseRow) -> Self {
        Self {
            name: row.name,
            state: parse_token(&row.state),
            warehouse_type: row.warehouse_type.as_deref().and_then(parse_token),
            size: row.size.as_deref().and_then(parse_token),
            min_cluster_count: row.min_cluster_count.unwrap_or_default(),
            max_cluster_count: row.max_cluster_count.unwrap_or_default(),
            started_clusters: row.started_clusters.unwrap_or_default(),
            running: row.running.unwrap_or_default(),
            queued: row.queued.unwrap_or_default(),
            is_default: row.is_default.as_deref().is_some_and(yes),
            is_current: row.is_current.as_deref().is_some_and(yes),
            auto_suspend: row.auto_suspend.unwrap_or_default(),
            auto_resume: row.auto_resume.as_deref().is_some_and(yes),
            available: row.available.unwrap_or_default(),
            provisioning: row.provisioning.unwrap_or_default(),
            quiescing: row.quiescing.unwrap_or_default(),
            other: row.other.unwrap_or_default(),
            created_on: row.created_on,
            resumed_on: row.resumed_on,
            updated_on: row.updated_on,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            enable_query_acceleration: row.enable_query_acceleration.as_deref().is_some_and(yes),
            query_acceleration_max_scale_factor: row
                .query_acceleration_max_scale_factor
                .unwrap_or_default(),
            resource_monitor: row
                .resource_monitor
                .filter(|monitor| !monitor.is_empty() && monitor != "null")
                .map(AccountObjectIdentifier::new),
            scaling_policy: row.scaling_policy.as_deref().and_then(parse_token),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
        }
    }
}

impl Warehouse {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

/// One `DESCRIBE WAREHOUSE` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseDetailsRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: String,
}

impl FromRow for WarehouseDetailsRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            kind: row.get("kind")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseDetails {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub kind: String,
}

impl From<WarehouseDetailsRow> for WarehouseDetails {
    fn from(row: WarehouseDetailsRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            kind: row.kind,
        }
    }
}

gateway!(Warehouses);

impl Warehouses<'_> {
    pub async fn create(&self, request: &CreateWarehouseRequest) -> Result<()> {
        self.client
            .exec("create warehouse", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterWarehouseRequest) -> Result<()> {
        self.client
            .exec("alter warehouse", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropWarehouseRequest) -> Result<()> {
        self.client.exec("drop warehouse", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowWarehouseRequest) -> Result<Vec<Warehouse>> {
        self.client
            .query::<_, WarehouseRow, _>("show warehouses", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Warehouse> {
        let request = ShowWarehouseRequest::new().with_like(Like::new(id.name()));
        find_by_id(self.show(&request).await?, "warehouse", id, Warehouse::id)
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<WarehouseDetails> {
        self.client
            .query_one::<_, WarehouseDetailsRow, _>(
                "describe warehouse",
                "warehouse",
                id,
                &DescribeWarehouseOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("WH1")
    }

    #[test]
    fn test_size_tokens() {
        assert_eq!(WarehouseSize::XSmall.to_string(), "XSMALL");
        assert_eq!("X-Small".parse::<WarehouseSize>().unwrap(), WarehouseSize::XSmall);
        assert_eq!("2X-Large".parse::<WarehouseSize>().unwrap(), WarehouseSize::XXLarge);
        assert_eq!(
            "snowpark-optimized".parse::<WarehouseType>().unwrap(),
            WarehouseType::SnowparkOptimized
        );
    }

    #[test]
    fn test_create_validation() {
        let opts = CreateWarehouseRequest::new(id())
            .with_min_cluster_count(3)
            .with_max_cluster_count(2)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));

        let opts = CreateWarehouseRequest::new(id())
            .with_query_acceleration_max_scale_factor(101)
            .to_options();
        assert!(opts.validate().is_err());

        assert!(CreateWarehouseRequest::new(id()).to_options().validate().is_ok());
    }

    #[test]
    fn test_alter_requires_exactly_one_action() {
        let opts = AlterWarehouseRequest::new(id()).to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));

        let opts = AlterWarehouseRequest::new(id())
            .with_suspend(true)
            .with_resume(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));

        let opts = AlterWarehouseRequest::new(id()).with_suspend(true).to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_alter_set_and_unset_must_touch_something() {
        let opts = AlterWarehouseRequest::new(id())
            .with_set(WarehouseSet::default())
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::AtLeastOneOf));

        let opts = AlterWarehouseRequest::new(id())
            .with_unset(WarehouseUnset::default())
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::AtLeastOneOf));

        let opts = AlterWarehouseRequest::new(id())
            .with_set(WarehouseSet::default().with_wait_for_completion(true))
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_if_suspended_requires_resume() {
        let opts = AlterWarehouseRequest::new(id())
            .with_suspend(true)
            .with_if_suspended(true)
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_if_exists_with_unset_tag() {
        let opts = AlterWarehouseRequest::new(id())
            .with_if_exists(true)
            .with_unset_tag([SchemaObjectIdentifier::new("DB", "S", "TAG")])
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_show_like_needs_pattern() {
        let opts = ShowWarehouseRequest::new().with_like(Like::default()).to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::PatternRequiredForLike)
        );
    }

    #[test]
    fn test_convert_row() {
        let row = Row::new([
            ("name", Some("WH1")),
            ("state", Some("SUSPENDED")),
            ("type", Some("STANDARD")),
            ("size", Some("X-Small")),
            ("min_cluster_count", Some("1")),
            ("max_cluster_count", Some("1")),
            ("auto_suspend", Some("60")),
            ("auto_resume", Some("true")),
            ("is_default", Some("N")),
            ("available", Some("")),
            ("resource_monitor", Some("null")),
            ("comment", None),
            ("scaling_policy", Some("STANDARD")),
        ]);
        let warehouse = Warehouse::from(WarehouseRow::from_row(&row).unwrap());
        assert_eq!(warehouse.state, Some(WarehouseState::Suspended));
        assert_eq!(warehouse.size, Some(WarehouseSize::XSmall));
        assert_eq!(warehouse.auto_suspend, 60);
        assert!(warehouse.auto_resume);
        assert!(!warehouse.is_default);
        assert_eq!(warehouse.available, 0.0);
        assert_eq!(warehouse.resource_monitor, None);
        assert_eq!(warehouse.comment, "");
        assert_eq!(warehouse.id(), id());
    }

    #[test]
    fn test_decode_requires_name() {
        let row = Row::from_pairs([("state", "STARTED")]);
        assert_eq!(
            WarehouseRow::from_row(&row),
            Err(DecodeError::MissingColumn("name".into()))
        );
    }
}
