use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use assert_cmd::Command;
use tempfile::TempDir;

const ENV_OVERRIDES: &[&str] = &[
    "SNOWFLAKE_CONFIG_PATH",
    "SNOWFLAKE_PROFILE",
    "SNOWFLAKE_USE_LEGACY_TOML_FILE",
    "SNOWFLAKE_ACCOUNT",
    "SNOWFLAKE_ORGANIZATION_NAME",
    "SNOWFLAKE_USER",
    "SNOWFLAKE_PASSWORD",
    "SNOWFLAKE_ROLE",
    "SNOWFLAKE_WAREHOUSE",
    "SNOWFLAKE_HOST",
    "SNOWFLAKE_DRIVER_URL",
];

/// A temporary directory holding one profile file, and a command builder
/// pointed at it with the process environment scrubbed of overrides.
pub struct CliTestHelper {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl CliTestHelper {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config");
        Ok(Self {
            temp_dir,
            config_path,
        })
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        fs::write(&self.config_path, contents)?;
        Ok(())
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("snowflake-sdk").expect("binary should build");
        for name in ENV_OVERRIDES {
            cmd.env_remove(name);
        }
        cmd.current_dir(self.temp_dir.path())
            .arg("--config-file")
            .arg(&self.config_path);
        cmd
    }
}
