//! Client round trips against an in-memory recording driver.

pub mod dry_run;
pub mod pipeline;
pub mod routines;
