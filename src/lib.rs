//! Typed DDL requests for a cloud data warehouse.
//!
//! Callers build a request, the [`Client`] validates it, renders it to SQL,
//! hands the statement to a [`Driver`] and decodes any result rows into
//! typed values.
//!
//! ```no_run
//! # async fn example(client: snowflake_sdk::Client) -> snowflake_sdk::Result<()> {
//! use snowflake_sdk::identifiers::AccountObjectIdentifier;
//! use snowflake_sdk::objects::warehouse::{CreateWarehouseRequest, WarehouseSize};
//!
//! let request = CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1"))
//!     .with_warehouse_size(WarehouseSize::XSmall)
//!     .with_auto_suspend(60);
//! client.warehouses().create(&request).await?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod client;
pub mod common;
pub mod config;
pub mod datatypes;
pub mod decode;
pub mod driver;
pub mod error;
pub mod identifiers;
pub mod objects;
pub mod render;
pub mod validation;

pub use client::Client;
pub use config::{Config, ConfigError};
pub use decode::{DecodeError, FromRow, Row};
pub use driver::{Driver, SqlxDriver};
pub use error::{Error, ErrorKind, Result};
pub use render::RenderSql;
pub use validation::Validate;
