use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde_json::Value;
use snowflake_sdk::Config;

/// Config subcommands
#[derive(Debug, Clone, clap::Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved profile; secrets print as ***
    Show {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the profile file that was read
    Path,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn cmd_config(config: &Config, path: &Path, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { format } => {
            let value = serde_json::to_value(config).context("Failed to serialize profile")?;
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&value)
                            .context("Failed to serialize profile")?
                    );
                }
                OutputFormat::Text => {
                    let mut entries = Vec::new();
                    flatten("", &value, &mut entries);
                    for (key, value) in entries {
                        println!("{} = {}", style(key).bold(), value);
                    }
                }
            }
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Dotted `key = value` pairs, skipping unset entries.
fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, inner) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, inner, out);
            }
        }
        Value::String(text) => out.push((prefix.to_string(), text.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}
