//! Scheduled and graph-triggered tasks.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::find_by_id;
use crate::common::{In, LimitFrom, Like, TagAssociation};
use crate::decode::{DecodeError, FromRow, Row, parse_list, parse_token};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::objects::warehouse::WarehouseSize;
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TaskState {
    Started,
    Suspended,
}

/// Compute for a task: a named warehouse or serverless with an initial size.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskWarehouse {
    Warehouse(AccountObjectIdentifier),
    Serverless(WarehouseSize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTaskOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub warehouse: Option<TaskWarehouse>,
    pub schedule: Option<String>,
    pub config: Option<String>,
    pub allow_overlapping_execution: Option<bool>,
    pub user_task_timeout_ms: Option<i64>,
    pub suspend_task_after_num_failures: Option<i64>,
    pub error_integration: Option<AccountObjectIdentifier>,
    pub copy_grants: bool,
    pub comment: Option<String>,
    pub finalize: Option<SchemaObjectIdentifier>,
    pub task_auto_retry_attempts: Option<i64>,
    pub tag: Vec<TagAssociation>,
    pub user_task_minimum_trigger_interval_in_seconds: Option<i64>,
    pub after: Vec<SchemaObjectIdentifier>,
    pub when: Option<String>,
    pub sql: String,
}

impl Validate for CreateTaskOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateTaskOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Sql", &self.sql);
        if let Some(TaskWarehouse::Warehouse(id)) = &self.warehouse {
            errors.identifier("Warehouse", id);
        }
        errors.optional_identifier("ErrorIntegration", self.error_integration.as_ref());
        errors.optional_identifier("Finalize", self.finalize.as_ref());
        errors.identifiers("After", &self.after);
        errors.check(self.finalize.is_none() || self.after.is_empty(), || {
            Error::invalid_value(
                "CreateTaskOptions",
                "Finalize",
                "a finalizer cannot also run after predecessors",
            )
        });
        errors.check(self.schedule.is_none() || self.after.is_empty(), || {
            Error::invalid_value(
                "CreateTaskOptions",
                "Schedule",
                "child tasks are triggered by their predecessors",
            )
        });
        errors.range("TaskAutoRetryAttempts", self.task_auto_retry_attempts, 0, 30);
        errors.tags(&self.tag);
        errors.finish()
    }
}

request! {
    CreateTaskRequest => CreateTaskOptions {
        flag or_replace,
        flag if_not_exists,
        val warehouse: TaskWarehouse,
        opt schedule: String,
        opt config: String,
        val allow_overlapping_execution: bool,
        val user_task_timeout_ms: i64,
        val suspend_task_after_num_failures: i64,
        opt error_integration: AccountObjectIdentifier,
        flag copy_grants,
        opt comment: String,
        val finalize: SchemaObjectIdentifier,
        val task_auto_retry_attempts: i64,
        vec tag: TagAssociation,
        val user_task_minimum_trigger_interval_in_seconds: i64,
        vec after: SchemaObjectIdentifier,
        opt when: String,
    }
}

impl CreateTaskRequest {
    pub fn new(name: SchemaObjectIdentifier, sql: impl Into<String>) -> Self {
        Self {
            options: CreateTaskOptions {
                name,
                sql: sql.into(),
                ..Default::default()
            },
        }
    }
}

/// `CREATE TASK <name> CLONE <source>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloneTaskOptions {
    pub or_replace: bool,
    pub name: SchemaObjectIdentifier,
    pub source: SchemaObjectIdentifier,
    pub copy_grants: bool,
}

impl Validate for CloneTaskOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CloneTaskOptions");
        errors.identifier("name", &self.name);
        errors.identifier("Source", &self.source);
        errors.finish()
    }
}

request! {
    CloneTaskRequest => CloneTaskOptions {
        flag or_replace,
        flag copy_grants,
    }
}

impl CloneTaskRequest {
    pub fn new(name: SchemaObjectIdentifier, source: SchemaObjectIdentifier) -> Self {
        Self {
            options: CloneTaskOptions {
                name,
                source,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSet {
    pub warehouse: Option<AccountObjectIdentifier>,
    pub user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    pub schedule: Option<String>,
    pub config: Option<String>,
    pub allow_overlapping_execution: Option<bool>,
    pub user_task_timeout_ms: Option<i64>,
    pub suspend_task_after_num_failures: Option<i64>,
    pub error_integration: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub task_auto_retry_attempts: Option<i64>,
    pub user_task_minimum_trigger_interval_in_seconds: Option<i64>,
}

setters!(TaskSet {
    opt warehouse: AccountObjectIdentifier,
    val user_task_managed_initial_warehouse_size: WarehouseSize,
    opt schedule: String,
    opt config: String,
    val allow_overlapping_execution: bool,
    val user_task_timeout_ms: i64,
    val suspend_task_after_num_failures: i64,
    opt error_integration: AccountObjectIdentifier,
    opt comment: String,
    val task_auto_retry_attempts: i64,
    val user_task_minimum_trigger_interval_in_seconds: i64,
});

impl Validate for TaskSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("TaskSet");
        errors.at_least_one_of(
            &[
                "Warehouse",
                "UserTaskManagedInitialWarehouseSize",
                "Schedule",
                "Config",
                "AllowOverlappingExecution",
                "UserTaskTimeoutMs",
                "SuspendTaskAfterNumFailures",
                "ErrorIntegration",
                "Comment",
                "TaskAutoRetryAttempts",
                "UserTaskMinimumTriggerIntervalInSeconds",
            ],
            &[
                &self.warehouse,
                &self.user_task_managed_initial_warehouse_size,
                &self.schedule,
                &self.config,
                &self.allow_overlapping_execution,
                &self.user_task_timeout_ms,
                &self.suspend_task_after_num_failures,
                &self.error_integration,
                &self.comment,
                &self.task_auto_retry_attempts,
                &self.user_task_minimum_trigger_interval_in_seconds,
            ],
        );
        errors.at_most_one_of(
            &["Warehouse", "UserTaskManagedInitialWarehouseSize"],
            &[
                &self.warehouse,
                &self.user_task_managed_initial_warehouse_size,
            ],
        );
        errors.optional_identifier("Warehouse", self.warehouse.as_ref());
        errors.optional_identifier("ErrorIntegration", self.error_integration.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUnset {
    pub warehouse: bool,
    pub schedule: bool,
    pub config: bool,
    pub allow_overlapping_execution: bool,
    pub user_task_timeout_ms: bool,
    pub suspend_task_after_num_failures: bool,
    pub error_integration: bool,
    pub comment: bool,
    pub task_auto_retry_attempts: bool,
    pub user_task_minimum_trigger_interval_in_seconds: bool,
}

setters!(TaskUnset {
    flag warehouse,
    flag schedule,
    flag config,
    flag allow_overlapping_execution,
    flag user_task_timeout_ms,
    flag suspend_task_after_num_failures,
    flag error_integration,
    flag comment,
    flag task_auto_retry_attempts,
    flag user_task_minimum_trigger_interval_in_seconds,
});

impl TaskUnset {
    pub(crate) fn properties(&self) -> [(bool, &'static str); 10] {
        [
            (self.warehouse, "WAREHOUSE"),
            (self.schedule, "SCHEDULE"),
            (self.config, "CONFIG"),
            (self.allow_overlapping_execution, "ALLOW_OVERLAPPING_EXECUTION"),
            (self.user_task_timeout_ms, "USER_TASK_TIMEOUT_MS"),
            (
                self.suspend_task_after_num_failures,
                "SUSPEND_TASK_AFTER_NUM_FAILURES",
            ),
            (self.error_integration, "ERROR_INTEGRATION"),
            (self.comment, "COMMENT"),
            (self.task_auto_retry_attempts, "TASK_AUTO_RETRY_ATTEMPTS"),
            (
                self.user_task_minimum_trigger_interval_in_seconds,
                "USER_TASK_MINIMUM_TRIGGER_INTERVAL_IN_SECONDS",
            ),
        ]
    }
}

impl Validate for TaskUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("TaskUnset");
        errors.check(self.properties().iter().any(|(on, _)| *on), || {
            Error::at_least_one_of(
                "TaskUnset",
                &self.properties().map(|(_, name)| name),
            )
        });
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterTaskOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub resume: bool,
    pub suspend: bool,
    pub remove_after: Vec<SchemaObjectIdentifier>,
    pub add_after: Vec<SchemaObjectIdentifier>,
    pub set: Option<TaskSet>,
    pub unset: Option<TaskUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    pub set_finalize: Option<SchemaObjectIdentifier>,
    pub unset_finalize: bool,
    pub modify_as: Option<String>,
    pub modify_when: Option<String>,
    pub remove_when: bool,
}

impl Validate for AlterTaskOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterTaskOptions");
        errors.identifier("name", &self.name);
        errors.exactly_one_of(
            &[
                "Resume",
                "Suspend",
                "RemoveAfter",
                "AddAfter",
                "Set",
                "Unset",
                "SetTag",
                "UnsetTag",
                "SetFinalize",
                "UnsetFinalize",
                "ModifyAs",
                "ModifyWhen",
                "RemoveWhen",
            ],
            &[
                &flag(self.resume),
                &flag(self.suspend),
                &self.remove_after,
                &self.add_after,
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
                &self.set_finalize,
                &flag(self.unset_finalize),
                &self.modify_as,
                &self.modify_when,
                &flag(self.remove_when),
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.identifiers("RemoveAfter", &self.remove_after);
        errors.identifiers("AddAfter", &self.add_after);
        errors.optional_identifier("SetFinalize", self.set_finalize.as_ref());
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.finish()
    }
}

request! {
    AlterTaskRequest => AlterTaskOptions {
        flag if_exists,
        flag resume,
        flag suspend,
        vec remove_after: SchemaObjectIdentifier,
        vec add_after: SchemaObjectIdentifier,
        val set: TaskSet,
        val unset: TaskUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
        val set_finalize: SchemaObjectIdentifier,
        flag unset_finalize,
        opt modify_as: String,
        opt modify_when: String,
        flag remove_when,
    }
}

impl AlterTaskRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterTaskOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(DropTaskOptions, DropTaskRequest, "TASK", SchemaObjectIdentifier);

target_only!(DescribeTaskOptions, "DESCRIBE TASK", SchemaObjectIdentifier);

/// `EXECUTE TASK <name> [RETRY LAST]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecuteTaskOptions {
    pub name: SchemaObjectIdentifier,
    pub retry_last: bool,
}

impl Validate for ExecuteTaskOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ExecuteTaskOptions");
        errors.identifier("name", &self.name);
        errors.finish()
    }
}

request! {
    ExecuteTaskRequest => ExecuteTaskOptions {
        flag retry_last,
    }
}

impl ExecuteTaskRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: ExecuteTaskOptions {
                name,
                ..Default::default()
            },
        }
    }
}

show_objects!(ShowTaskOptions, ShowTaskRequest, "TASKS" {
    flag terse,
    val like: Like,
    val in_scope: In,
    opt starts_with: String,
    flag root_only,
    val limit: LimitFrom,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub id: Option<String>,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub warehouse: Option<String>,
    pub schedule: Option<String>,
    pub predecessors: Option<String>,
    pub state: Option<String>,
    pub definition: Option<String>,
    pub condition: Option<String>,
    pub allow_overlapping_execution: Option<String>,
    pub error_integration: Option<String>,
    pub last_committed_on: Option<DateTime<Utc>>,
    pub last_suspended_on: Option<DateTime<Utc>>,
    pub owner_role_type: Option<String>,
    pub config: Option<String>,
    pub budget: Option<String>,
    pub task_relations: Option<String>,
}

impl FromRow for TaskRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            id: row.opt("id"),
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            warehouse: row.opt("warehouse"),
            schedule: row.opt("schedule"),
            predecessors: row.opt("predecessors"),
            state: row.opt("state"),
            definition: row.opt("definition"),
            condition: row.opt("condition"),
            allow_overlapping_execution: row.opt("allow_overlapping_execution"),
            error_integration: row.opt("error_integration"),
            last_committed_on: row.opt_timestamp("last_committed_on")?,
            last_suspended_on: row.opt_timestamp("last_suspended_on")?,
            owner_role_type: row.opt("owner_role_type"),
            config: row.opt("config"),
            budget: row.opt("budget"),
            task_relations: row.opt("task_relations"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub id: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: String,
    pub warehouse: Option<AccountObjectIdentifier>,
    pub schedule: String,
    pub predecessors: Vec<SchemaObjectIdentifier>,
    pub state: Option<TaskState>,
    pub definition: String,
    pub condition: String,
    pub allow_overlapping_execution: bool,
    pub error_integration: Option<AccountObjectIdentifier>,
    pub last_committed_on: Option<DateTime<Utc>>,
    pub last_suspended_on: Option<DateTime<Utc>>,
    pub owner_role_type: String,
    pub config: String,
    pub budget: String,
    pub task_relations: String,
}

/// Predecessors arrive as a JSON array of dotted, possibly quoted names.
fn parse_predecessors(value: &str) -> Vec<SchemaObjectIdentifier> {
    let names: Vec<String> = match serde_json::from_str(value) {
        Ok(names) => names,
        Err(_) => parse_list(value),
    };
    names
        .iter()
        .filter_map(|name| name.parse::<SchemaObjectIdentifier>().ok())
        .collect()
}

fn non_null(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "null")
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            id: row.id.unwrap_or_default(),
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            warehouse: non_null(row.warehouse).map(AccountObjectIdentifier::new),
            schedule: row.schedule.unwrap_or_default(),
            predecessors: row
                .predecessors
                .as_deref()
                .map(parse_predecessors)
                .unwrap_or_default(),
            state: row.state.as_deref().and_then(parse_token),
            definition: row.definition.unwrap_or_default(),
            condition: row.condition.unwrap_or_default(),
            allow_overlapping_execution: row.allow_overlapping_execution.as_deref()
                == Some("true"),
            error_integration: non_null(row.error_integration).map(AccountObjectIdentifier::new),
            last_committed_on: row.last_committed_on,
            last_suspended_on: row.last_suspended_on,
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            config: row.config.unwrap_or_default(),
            budget: row.budget.unwrap_or_default(),
            task_relations: row.task_relations.unwrap_or_default(),
        }
    }
}

impl Task {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn is_started(&self) -> bool {
        self.state == Some(TaskState::Started)
    }
}

gateway!(Tasks);

impl Tasks<'_> {
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<()> {
        self.client.exec("create task", &request.to_options()).await
    }

    pub async fn clone_task(&self, request: &CloneTaskRequest) -> Result<()> {
        self.client.exec("clone task", &request.to_options()).await
    }

    pub async fn alter(&self, request: &AlterTaskRequest) -> Result<()> {
        self.client.exec("alter task", &request.to_options()).await
    }

    pub async fn resume(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        self.alter(&AlterTaskRequest::new(id.clone()).with_resume(true))
            .await
    }

    pub async fn suspend(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        self.alter(&AlterTaskRequest::new(id.clone()).with_suspend(true))
            .await
    }

    pub async fn execute(&self, request: &ExecuteTaskRequest) -> Result<()> {
        self.client.exec("execute task", &request.to_options()).await
    }

    pub async fn drop(&self, request: &DropTaskRequest) -> Result<()> {
        self.client.exec("drop task", &request.to_options()).await
    }

    pub async fn show(&self, request: &ShowTaskRequest) -> Result<Vec<Task>> {
        self.client
            .query::<_, TaskRow, _>("show tasks", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Task> {
        let request = ShowTaskRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(self.show(&request).await?, "task", id, Task::id)
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Task> {
        let rows = self
            .client
            .query::<_, TaskRow, Task>("describe task", &DescribeTaskOptions::new(id.clone()))
            .await?;
        find_by_id(rows, "task", id, Task::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "T")
    }

    #[test]
    fn test_create_requires_sql() {
        let opts = CreateTaskRequest::new(id(), "").to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_child_task_cannot_schedule() {
        let opts = CreateTaskRequest::new(id(), "SELECT 1")
            .with_schedule("5 MINUTE")
            .with_after([SchemaObjectIdentifier::new("DB", "S", "ROOT")])
            .to_options();
        assert_eq!(opts.validate().unwrap_err().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_alter_exactly_one_action() {
        let none = AlterTaskRequest::new(id()).to_options();
        assert_eq!(none.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
        let two = AlterTaskRequest::new(id())
            .with_resume(true)
            .with_suspend(true)
            .to_options();
        assert_eq!(two.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }

    #[test]
    fn test_set_warehouse_or_serverless() {
        let set = TaskSet::default()
            .with_warehouse(AccountObjectIdentifier::new("WH"))
            .with_user_task_managed_initial_warehouse_size(WarehouseSize::XSmall);
        assert_eq!(set.validate().unwrap_err().kind(), Some(ErrorKind::MoreThanOneOf));
    }

    #[test]
    fn test_row_conversion() {
        let row = Row::new([
            ("name", Some("T")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("state", Some("started")),
            ("warehouse", Some("WH")),
            ("predecessors", Some("[\"\\\"DB\\\".\\\"S\\\".\\\"ROOT\\\"\"]")),
            ("allow_overlapping_execution", Some("null")),
        ]);
        let task = Task::from(TaskRow::from_row(&row).unwrap());
        assert!(task.is_started());
        assert_eq!(task.warehouse, Some(AccountObjectIdentifier::new("WH")));
        assert_eq!(
            task.predecessors,
            vec![SchemaObjectIdentifier::new("DB", "S", "ROOT")]
        );
        assert!(!task.allow_overlapping_execution);
    }
}
