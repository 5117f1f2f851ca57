//! The client façade: one shared driver handle, a dry-run switch and one
//! gateway per object kind.
//!
//! Every write runs validate → render → (dry-run check) → driver exec.
//! Reads run validate → render → driver query → decode → convert, and still
//! reach the driver when dry-run is on.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::decode::{FromRow, Row};
use crate::driver::{Driver, SqlxDriver};
use crate::error::{DriverError, Error, Result};
use crate::identifiers::Identifier;
use crate::render::{RenderSql, redact};
use crate::validation::Validate;

struct Inner {
    driver: Arc<dyn Driver>,
    config: Option<Config>,
    dry_run: AtomicBool,
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
    cancel: Option<CancellationToken>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("dry_run", &self.dry_run())
            .field("has_config", &self.inner.config.is_some())
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

impl Client {
    pub fn new(driver: impl Driver + 'static) -> Self {
        Self::from_driver(Arc::new(driver), None)
    }

    pub fn with_config(driver: impl Driver + 'static, config: Config) -> Self {
        Self::from_driver(Arc::new(driver), Some(config))
    }

    pub fn from_driver(driver: Arc<dyn Driver>, config: Option<Config>) -> Self {
        Self {
            inner: Arc::new(Inner {
                driver,
                config,
                dry_run: AtomicBool::new(false),
            }),
            cancel: None,
        }
    }

    /// Connects a [`SqlxDriver`] to the profile's `driver_url`.
    pub async fn connect(config: Config) -> Result<Self> {
        let url = config
            .driver_url
            .as_ref()
            .map(|url| url.expose().to_string())
            .ok_or(ConfigError::MissingDriverUrl)?;
        let driver = SqlxDriver::connect(&url)
            .await
            .map_err(|source| Error::wire("connect", source))?;
        info!(profile = %config.profile, "client ready");
        Ok(Self::with_config(driver, config))
    }

    pub fn config(&self) -> Option<&Config> {
        self.inner.config.as_ref()
    }

    /// Takes effect on the next call, for every clone of this client.
    pub fn set_dry_run(&self, enabled: bool) {
        self.inner.dry_run.store(enabled, Ordering::SeqCst);
    }

    pub fn dry_run(&self) -> bool {
        self.inner.dry_run.load(Ordering::SeqCst)
    }

    /// A handle whose driver calls abort once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    async fn run<T>(
        &self,
        operation: &str,
        call: impl Future<Output = std::result::Result<T, DriverError>>,
    ) -> Result<T> {
        let outcome = match &self.cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => Err(DriverError::from("operation cancelled")),
                    outcome = call => outcome,
                }
            }
            None => call.await,
        };
        outcome.map_err(|source| Error::wire(operation, source))
    }

    /// Write path.
    pub(crate) async fn exec<O>(&self, operation: &str, options: &O) -> Result<()>
    where
        O: Validate + RenderSql,
    {
        options.validate()?;
        let sql = options.to_sql();
        if self.dry_run() {
            info!(operation, sql = %redact(&sql), "dry run, statement not sent");
            return Ok(());
        }
        debug!(operation, sql = %redact(&sql), "exec");
        self.run(operation, self.inner.driver.exec(&sql)).await
    }

    /// Read path returning raw rows.
    pub(crate) async fn query_rows<O>(&self, operation: &str, options: &O) -> Result<Vec<Row>>
    where
        O: Validate + RenderSql,
    {
        options.validate()?;
        let sql = options.to_sql();
        debug!(operation, sql = %redact(&sql), "query");
        self.run(operation, self.inner.driver.query(&sql)).await
    }

    /// Read path: decode every row into `R`, then convert into `T`.
    pub(crate) async fn query<O, R, T>(&self, operation: &str, options: &O) -> Result<Vec<T>>
    where
        O: Validate + RenderSql,
        R: FromRow,
        T: From<R>,
    {
        let rows = self.query_rows(operation, options).await?;
        rows.iter()
            .map(|row| {
                R::from_row(row)
                    .map(T::from)
                    .map_err(|source| Error::wire(operation, source))
            })
            .collect()
    }

    /// Read path for single-row results such as `DESCRIBE`.
    pub(crate) async fn query_one<O, R, T>(
        &self,
        operation: &str,
        kind: &'static str,
        id: &impl Identifier,
        options: &O,
    ) -> Result<T>
    where
        O: Validate + RenderSql,
        R: FromRow,
        T: From<R>,
    {
        self.query::<O, R, T>(operation, options)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(kind, id.fully_qualified_name()))
    }
}

/// First element whose identifier equals `id`.
pub(crate) fn find_by_id<T, I>(
    items: Vec<T>,
    kind: &'static str,
    id: &I,
    key: impl Fn(&T) -> I,
) -> Result<T>
where
    I: Identifier + PartialEq,
{
    items
        .into_iter()
        .find(|item| key(item) == *id)
        .ok_or_else(|| Error::not_found(kind, id.fully_qualified_name()))
}

macro_rules! gateways {
    ($($method:ident => $gateway:ident),* $(,)?) => {
        impl Client {
            $(
                pub fn $method(&self) -> crate::objects::$gateway<'_> {
                    crate::objects::$gateway::new(self)
                }
            )*
        }
    };
}

gateways! {
    accounts => Accounts,
    aggregation_policies => AggregationPolicies,
    api_integrations => ApiIntegrations,
    application_packages => ApplicationPackages,
    applications => Applications,
    authentication_policies => AuthenticationPolicies,
    comments => Comments,
    cortex_search_services => CortexSearchServices,
    database_roles => DatabaseRoles,
    databases => Databases,
    dynamic_tables => DynamicTables,
    event_tables => EventTables,
    external_tables => ExternalTables,
    external_volumes => ExternalVolumes,
    failover_groups => FailoverGroups,
    file_formats => FileFormats,
    functions => Functions,
    grants => Grants,
    managed_accounts => ManagedAccounts,
    masking_policies => MaskingPolicies,
    materialized_views => MaterializedViews,
    network_policies => NetworkPolicies,
    network_rules => NetworkRules,
    notification_integrations => NotificationIntegrations,
    password_policies => PasswordPolicies,
    pipes => Pipes,
    procedures => Procedures,
    projection_policies => ProjectionPolicies,
    replication => Replication,
    roles => Roles,
    row_access_policies => RowAccessPolicies,
    schemas => Schemas,
    secrets => Secrets,
    security_integrations => SecurityIntegrations,
    sequences => Sequences,
    session_policies => SessionPolicies,
    sessions => Sessions,
    stages => Stages,
    storage_integrations => StorageIntegrations,
    streamlits => Streamlits,
    streams => Streams,
    tables => Tables,
    tags => Tags,
    tasks => Tasks,
    users => Users,
    views => Views,
    warehouses => Warehouses,
}
