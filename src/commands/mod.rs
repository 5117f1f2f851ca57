pub mod config;
pub mod show;

pub use config::{ConfigCommands, cmd_config};
pub use show::{ShowArgs, cmd_show};
