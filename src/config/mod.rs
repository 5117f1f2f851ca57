pub mod builder;
pub mod error;
pub mod merge;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::ConfigBuilder;
pub use error::ConfigError;
pub use types::*;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub const CONFIG_PATH_ENV: &str = "SNOWFLAKE_CONFIG_PATH";
pub const PROFILE_ENV: &str = "SNOWFLAKE_PROFILE";
pub const LEGACY_TOML_ENV: &str = "SNOWFLAKE_USE_LEGACY_TOML_FILE";
pub const DEFAULT_PROFILE: &str = "default";

/// `SNOWFLAKE_CONFIG_PATH`, else `~/.snowflake/config`.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".snowflake").join("config")
}

/// Explicit name, else `SNOWFLAKE_PROFILE`, else `default`.
pub fn profile_name(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(PROFILE_ENV).ok().filter(|p| !p.is_empty()))
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

impl Dialect {
    pub fn from_env() -> Self {
        match std::env::var(LEGACY_TOML_ENV) {
            Ok(value) if value.eq_ignore_ascii_case("true") => Dialect::Legacy,
            _ => Dialect::Current,
        }
    }
}

/// Reads one profile from a TOML file. A missing file yields an empty
/// input; a present file without the profile is an error.
pub fn load_profile(path: &Path, profile: &str, dialect: Dialect) -> Result<ConfigInput, ConfigError> {
    if !path.exists() {
        debug!("config file {} not found, using environment only", path.display());
        return Ok(ConfigInput::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profile(&contents, path, profile, dialect)
}

/// Parses one profile out of TOML text. Values are type-checked key by key
/// before deserialization so that errors name the key but never the value.
pub fn parse_profile(
    contents: &str,
    path: &Path,
    profile: &str,
    dialect: Dialect,
) -> Result<ConfigInput, ConfigError> {
    let document: toml::Table = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        line: e.span().map(|span| line_of(contents, span.start)),
    })?;

    let Some(entry) = document.get(profile) else {
        return Err(ConfigError::ProfileNotFound {
            profile: profile.to_string(),
            path: path.to_path_buf(),
        });
    };
    let Some(table) = entry.as_table() else {
        return Err(ConfigError::InvalidType {
            profile: profile.to_string(),
            key: profile.to_string(),
            expected: "a table",
        });
    };

    let mut known = toml::Table::new();
    for (key, value) in table {
        match dialect.key_type(key) {
            None => warn!("profile {profile}: ignoring unknown key {key}"),
            Some(key_type) if !key_type.matches(value) => {
                return Err(ConfigError::InvalidType {
                    profile: profile.to_string(),
                    key: key.clone(),
                    expected: key_type.describe(),
                });
            }
            Some(_) => {
                known.insert(key.clone(), value.clone());
            }
        }
    }

    toml::Value::Table(known)
        .try_into()
        .map_err(|_| ConfigError::Parse {
            path: path.to_path_buf(),
            line: None,
        })
}

fn line_of(contents: &str, offset: usize) -> usize {
    contents[..offset.min(contents.len())]
        .bytes()
        .filter(|b| *b == b'\n')
        .count()
        + 1
}

/// Full load: file profile, then environment overrides.
pub fn load_config(path: Option<&Path>, profile: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let profile = profile_name(profile);
    let file_input = load_profile(&path, &profile, Dialect::from_env())?;

    ConfigBuilder::new(profile)
        .with_file(file_input)
        .with_env(|name| std::env::var(name).ok())
        .resolve()
}
