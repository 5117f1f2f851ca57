// Integration tests for snowflake-sdk

pub mod cli;
pub mod client;
pub mod helpers;
pub mod unit;
