use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use snowflake_sdk::error::DriverError;
use snowflake_sdk::{Client, Driver, Row};

/// In-memory driver: records every statement it receives and answers
/// queries from a queue of canned results.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    statements: Arc<Mutex<Vec<String>>>,
    results: Arc<Mutex<VecDeque<Vec<Row>>>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Every call waits `delay` before answering.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Queue the rows returned by the next query.
    pub fn push_rows(&self, rows: Vec<Row>) -> &Self {
        self.results.lock().unwrap().push_back(rows);
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn client(&self) -> Client {
        Client::new(self.clone())
    }

    async fn record(&self, sql: &str) -> Result<(), DriverError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.statements.lock().unwrap().push(sql.to_string());
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    async fn exec(&self, sql: &str) -> Result<(), DriverError> {
        self.record(sql).await
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>, DriverError> {
        self.record(sql).await?;
        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }
}
