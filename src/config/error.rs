use std::path::PathBuf;

use thiserror::Error;

/// Profile loading failures. No variant ever carries a configured value, so
/// these are safe to log even when the offending key holds a secret.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse config file {}{}",
        .path.display(),
        .line.map(|l| format!(" near line {l}")).unwrap_or_default()
    )]
    Parse { path: PathBuf, line: Option<usize> },

    #[error("profile {profile} not found in {}", .path.display())]
    ProfileNotFound { profile: String, path: PathBuf },

    #[error("profile {profile}: key {key} must be {expected}")]
    InvalidType {
        profile: String,
        key: String,
        expected: &'static str,
    },

    #[error("profile {profile}: key {key} {reason}")]
    InvalidValue {
        profile: String,
        key: &'static str,
        reason: &'static str,
    },

    #[error("private key is encrypted but no passphrase was configured")]
    MissingPassphrase,

    #[error("no driver_url configured")]
    MissingDriverUrl,
}
