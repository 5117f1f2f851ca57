use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use snowflake_sdk::Client;
use snowflake_sdk::common::{In, Like};
use snowflake_sdk::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier};
use snowflake_sdk::objects::{
    database, dynamic_table, function, pipe, procedure, role, schema, secret, sequence, stage,
    stream, table, tag, task, user, view, warehouse,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShowKind {
    Warehouses,
    Databases,
    Roles,
    Users,
    Schemas,
    Tables,
    DynamicTables,
    Views,
    Streams,
    Tasks,
    Pipes,
    Stages,
    Sequences,
    Tags,
    Secrets,
    Functions,
    Procedures,
}

impl ShowKind {
    fn is_account_level(self) -> bool {
        matches!(
            self,
            ShowKind::Warehouses | ShowKind::Databases | ShowKind::Roles | ShowKind::Users
        )
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Object kind to list
    #[arg(value_enum)]
    pub kind: ShowKind,

    /// SQL LIKE pattern on the object name
    #[arg(long)]
    pub like: Option<String>,

    /// Restrict to one database
    #[arg(long, conflicts_with = "in_schema")]
    pub in_database: Option<String>,

    /// Restrict to one schema, as DATABASE.SCHEMA
    #[arg(long)]
    pub in_schema: Option<String>,
}

impl ShowArgs {
    fn like(&self) -> Option<Like> {
        self.like.as_deref().map(Like::new)
    }

    fn scope(&self) -> Result<Option<In>> {
        if self.kind.is_account_level() && (self.in_database.is_some() || self.in_schema.is_some())
        {
            return Err(anyhow!(
                "--in-database and --in-schema do not apply to account-level objects"
            ));
        }
        if self.kind == ShowKind::Schemas && self.in_schema.is_some() {
            return Err(anyhow!("--in-schema does not apply to schemas, use --in-database"));
        }
        if let Some(schema) = &self.in_schema {
            let id = schema
                .parse::<DatabaseObjectIdentifier>()
                .map_err(|e| anyhow!("Invalid --in-schema {schema:?}: {e}"))?;
            return Ok(Some(In::schema(id)));
        }
        Ok(self
            .in_database
            .as_deref()
            .map(|database| In::database(AccountObjectIdentifier::new(database))))
    }
}

macro_rules! scoped {
    ($request:expr, $like:expr, $scope:expr) => {{
        let mut request = $request;
        if let Some(like) = $like {
            request = request.with_like(like);
        }
        if let Some(scope) = $scope {
            request = request.with_in_scope(scope);
        }
        request
    }};
}

macro_rules! unscoped {
    ($request:expr, $like:expr) => {{
        let mut request = $request;
        if let Some(like) = $like {
            request = request.with_like(like);
        }
        request
    }};
}

pub async fn cmd_show(client: &Client, args: &ShowArgs) -> Result<()> {
    let like = args.like();
    let scope = args.scope()?;
    debug!(kind = ?args.kind, "listing objects");

    let output = match args.kind {
        ShowKind::Warehouses => to_json(
            client
                .warehouses()
                .show(&unscoped!(warehouse::ShowWarehouseRequest::new(), like))
                .await,
        ),
        ShowKind::Databases => to_json(
            client
                .databases()
                .show(&unscoped!(database::ShowDatabaseRequest::new(), like))
                .await,
        ),
        ShowKind::Roles => to_json(
            client
                .roles()
                .show(&unscoped!(role::ShowRoleRequest::new(), like))
                .await,
        ),
        ShowKind::Users => to_json(
            client
                .users()
                .show(&unscoped!(user::ShowUserRequest::new(), like))
                .await,
        ),
        ShowKind::Schemas => to_json(
            client
                .schemas()
                .show(&scoped!(schema::ShowSchemaRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Tables => to_json(
            client
                .tables()
                .show(&scoped!(table::ShowTableRequest::new(), like, scope))
                .await,
        ),
        ShowKind::DynamicTables => to_json(
            client
                .dynamic_tables()
                .show(&scoped!(
                    dynamic_table::ShowDynamicTableRequest::new(),
                    like,
                    scope
                ))
                .await,
        ),
        ShowKind::Views => to_json(
            client
                .views()
                .show(&scoped!(view::ShowViewRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Streams => to_json(
            client
                .streams()
                .show(&scoped!(stream::ShowStreamRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Tasks => to_json(
            client
                .tasks()
                .show(&scoped!(task::ShowTaskRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Pipes => to_json(
            client
                .pipes()
                .show(&scoped!(pipe::ShowPipeRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Stages => to_json(
            client
                .stages()
                .show(&scoped!(stage::ShowStageRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Sequences => to_json(
            client
                .sequences()
                .show(&scoped!(sequence::ShowSequenceRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Tags => to_json(
            client
                .tags()
                .show(&scoped!(tag::ShowTagRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Secrets => to_json(
            client
                .secrets()
                .show(&scoped!(secret::ShowSecretRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Functions => to_json(
            client
                .functions()
                .show(&scoped!(function::ShowFunctionRequest::new(), like, scope))
                .await,
        ),
        ShowKind::Procedures => to_json(
            client
                .procedures()
                .show(&scoped!(procedure::ShowProcedureRequest::new(), like, scope))
                .await,
        ),
    }?;

    println!("{output}");
    Ok(())
}

fn to_json<T: Serialize>(items: snowflake_sdk::Result<Vec<T>>) -> Result<String> {
    let items = items.context("Failed to list objects")?;
    serde_json::to_string_pretty(&items).context("Failed to serialize objects")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: ShowKind) -> ShowArgs {
        ShowArgs {
            kind,
            like: None,
            in_database: None,
            in_schema: None,
        }
    }

    #[test]
    fn test_scope_from_schema() {
        let mut show = args(ShowKind::Tables);
        show.in_schema = Some("DB.PUBLIC".to_string());
        assert_eq!(
            show.scope().unwrap(),
            Some(In::schema(DatabaseObjectIdentifier::new("DB", "PUBLIC")))
        );
    }

    #[test]
    fn test_scope_rejected_for_account_objects() {
        let mut show = args(ShowKind::Warehouses);
        show.in_database = Some("DB".to_string());
        assert!(show.scope().is_err());
    }

    #[test]
    fn test_schemas_only_scoped_by_database() {
        let mut show = args(ShowKind::Schemas);
        show.in_schema = Some("DB.PUBLIC".to_string());
        assert!(show.scope().is_err());

        let mut show = args(ShowKind::Schemas);
        show.in_database = Some("DB".to_string());
        assert_eq!(
            show.scope().unwrap(),
            Some(In::database(AccountObjectIdentifier::new("DB")))
        );
    }
}
