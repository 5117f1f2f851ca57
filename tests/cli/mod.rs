//! End-to-end tests that run the compiled binary with assert_cmd.

pub mod config;
pub mod show;
