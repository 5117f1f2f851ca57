use crate::objects::task::{
    AlterTaskOptions, CloneTaskOptions, CreateTaskOptions, ExecuteTaskOptions, TaskSet,
    TaskUnset, TaskWarehouse,
};
use crate::render::{RenderSql, SqlBuilder, dollar_quoted};

impl RenderSql for TaskWarehouse {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            TaskWarehouse::Warehouse(id) => {
                sql.parameter("WAREHOUSE", Some(id));
            }
            TaskWarehouse::Serverless(size) => {
                sql.parameter_quoted("USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE", Some(size));
            }
        }
    }
}

impl RenderSql for CreateTaskOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("TASK")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(self.warehouse.as_ref())
            .parameter_quoted("SCHEDULE", self.schedule.as_ref())
            .parameter_with(
                "CONFIG",
                self.config.as_deref().map(dollar_quoted),
                crate::render::Quote::None,
            )
            .parameter("ALLOW_OVERLAPPING_EXECUTION", self.allow_overlapping_execution)
            .parameter("USER_TASK_TIMEOUT_MS", self.user_task_timeout_ms)
            .parameter(
                "SUSPEND_TASK_AFTER_NUM_FAILURES",
                self.suspend_task_after_num_failures,
            )
            .parameter("ERROR_INTEGRATION", self.error_integration.as_ref())
            .flag(self.copy_grants, "COPY GRANTS")
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("FINALIZE", self.finalize.as_ref())
            .parameter("TASK_AUTO_RETRY_ATTEMPTS", self.task_auto_retry_attempts)
            .list_paren("TAG", &self.tag)
            .parameter(
                "USER_TASK_MINIMUM_TRIGGER_INTERVAL_IN_SECONDS",
                self.user_task_minimum_trigger_interval_in_seconds,
            )
            .list_comma("AFTER", &self.after)
            .keyword_value("WHEN", self.when.as_ref(), crate::render::Quote::None)
            .keyword_value("AS", Some(&self.sql), crate::render::Quote::None);
    }
}

impl RenderSql for CloneTaskOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("TASK")
            .identifier(&self.name)
            .keyword_identifier("CLONE", Some(&self.source))
            .flag(self.copy_grants, "COPY GRANTS");
    }
}

impl RenderSql for TaskSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("WAREHOUSE", self.warehouse.as_ref())
            .parameter_quoted(
                "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE",
                self.user_task_managed_initial_warehouse_size,
            )
            .parameter_quoted("SCHEDULE", self.schedule.as_ref())
            .parameter_with(
                "CONFIG",
                self.config.as_deref().map(dollar_quoted),
                crate::render::Quote::None,
            )
            .parameter("ALLOW_OVERLAPPING_EXECUTION", self.allow_overlapping_execution)
            .parameter("USER_TASK_TIMEOUT_MS", self.user_task_timeout_ms)
            .parameter(
                "SUSPEND_TASK_AFTER_NUM_FAILURES",
                self.suspend_task_after_num_failures,
            )
            .parameter("ERROR_INTEGRATION", self.error_integration.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("TASK_AUTO_RETRY_ATTEMPTS", self.task_auto_retry_attempts)
            .parameter(
                "USER_TASK_MINIMUM_TRIGGER_INTERVAL_IN_SECONDS",
                self.user_task_minimum_trigger_interval_in_seconds,
            );
    }
}

impl RenderSql for TaskUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list("UNSET", &self.properties());
    }
}

impl RenderSql for AlterTaskOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER TASK")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .flag(self.resume, "RESUME")
            .flag(self.suspend, "SUSPEND")
            .list_comma("REMOVE AFTER", &self.remove_after)
            .list_comma("ADD AFTER", &self.add_after)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag)
            .parameter("SET FINALIZE", self.set_finalize.as_ref())
            .flag(self.unset_finalize, "UNSET FINALIZE")
            .keyword_value("MODIFY AS", self.modify_as.as_ref(), crate::render::Quote::None)
            .keyword_value(
                "MODIFY WHEN",
                self.modify_when.as_ref(),
                crate::render::Quote::None,
            )
            .flag(self.remove_when, "REMOVE WHEN");
    }
}

impl RenderSql for ExecuteTaskOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("EXECUTE TASK")
            .identifier(&self.name)
            .flag(self.retry_last, "RETRY LAST");
    }
}
