use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

use crate::config::ConfigError;

/// Raw profile input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ConfigInput {
    pub account_name: Option<String>,
    pub organization_name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub warehouse: Option<String>,
    pub host: Option<String>,
    pub region: Option<String>,
    pub port: Option<i64>,
    pub protocol: Option<String>,
    pub authenticator: Option<String>,
    pub private_key: Option<String>,
    pub private_key_passphrase: Option<String>,
    pub okta_url: Option<String>,
    pub passcode: Option<String>,
    pub passcode_in_password: Option<bool>,
    pub client_ip: Option<String>,

    // Timeouts, in seconds
    pub login_timeout: Option<i64>,
    pub request_timeout: Option<i64>,
    pub jwt_expire_timeout: Option<i64>,
    pub client_timeout: Option<i64>,
    pub jwt_client_timeout: Option<i64>,
    pub external_browser_timeout: Option<i64>,

    pub validate_default_parameters: Option<bool>,
    pub ocsp_fail_open: Option<bool>,
    pub keep_session_alive: Option<bool>,
    pub insecure_mode: Option<bool>,
    pub disable_telemetry: Option<bool>,
    pub params: Option<BTreeMap<String, String>>,
    pub driver_url: Option<String>,

    // Legacy-only knobs
    pub token: Option<String>,
    pub max_retry_count: Option<i64>,
    pub client_store_temporary_credential: Option<bool>,
    pub disable_query_context_cache: Option<bool>,
    pub include_retry_reason: Option<bool>,
    pub tmp_directory_path: Option<String>,
    pub disable_console_login: Option<bool>,
    pub driver_tracing: Option<String>,
    pub client_request_mfa_token: Option<bool>,
}

/// TOML type a profile key must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    String,
    Integer,
    Boolean,
    StringMap,
}

impl KeyType {
    pub fn describe(self) -> &'static str {
        match self {
            KeyType::String => "a string",
            KeyType::Integer => "an integer",
            KeyType::Boolean => "a boolean",
            KeyType::StringMap => "a table of strings",
        }
    }

    pub fn matches(self, value: &toml::Value) -> bool {
        match (self, value) {
            (KeyType::String, toml::Value::String(_)) => true,
            (KeyType::Integer, toml::Value::Integer(_)) => true,
            (KeyType::Boolean, toml::Value::Boolean(_)) => true,
            (KeyType::StringMap, toml::Value::Table(table)) => {
                table.values().all(|value| value.is_str())
            }
            _ => false,
        }
    }
}

pub const CURRENT_KEYS: &[(&str, KeyType)] = &[
    ("account_name", KeyType::String),
    ("organization_name", KeyType::String),
    ("user", KeyType::String),
    ("password", KeyType::String),
    ("role", KeyType::String),
    ("warehouse", KeyType::String),
    ("host", KeyType::String),
    ("region", KeyType::String),
    ("port", KeyType::Integer),
    ("protocol", KeyType::String),
    ("authenticator", KeyType::String),
    ("private_key", KeyType::String),
    ("private_key_passphrase", KeyType::String),
    ("okta_url", KeyType::String),
    ("passcode", KeyType::String),
    ("passcode_in_password", KeyType::Boolean),
    ("client_ip", KeyType::String),
    ("login_timeout", KeyType::Integer),
    ("request_timeout", KeyType::Integer),
    ("jwt_expire_timeout", KeyType::Integer),
    ("client_timeout", KeyType::Integer),
    ("jwt_client_timeout", KeyType::Integer),
    ("external_browser_timeout", KeyType::Integer),
    ("validate_default_parameters", KeyType::Boolean),
    ("ocsp_fail_open", KeyType::Boolean),
    ("keep_session_alive", KeyType::Boolean),
    ("insecure_mode", KeyType::Boolean),
    ("disable_telemetry", KeyType::Boolean),
    ("params", KeyType::StringMap),
    ("driver_url", KeyType::String),
];

pub const LEGACY_ONLY_KEYS: &[(&str, KeyType)] = &[
    ("token", KeyType::String),
    ("max_retry_count", KeyType::Integer),
    ("client_store_temporary_credential", KeyType::Boolean),
    ("disable_query_context_cache", KeyType::Boolean),
    ("include_retry_reason", KeyType::Boolean),
    ("tmp_directory_path", KeyType::String),
    ("disable_console_login", KeyType::Boolean),
    ("driver_tracing", KeyType::String),
    ("client_request_mfa_token", KeyType::Boolean),
];

/// Which profile keys a file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Current,
    Legacy,
}

impl Dialect {
    pub fn key_type(self, key: &str) -> Option<KeyType> {
        let lookup = |keys: &[(&str, KeyType)]| {
            keys.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, key_type)| *key_type)
        };
        match self {
            Dialect::Current => lookup(CURRENT_KEYS),
            Dialect::Legacy => lookup(CURRENT_KEYS).or_else(|| lookup(LEGACY_ONLY_KEYS)),
        }
    }
}

/// A configured secret. Displays, debugs and serializes as `***`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive)]
pub enum Authenticator {
    #[strum(serialize = "snowflake")]
    Snowflake,
    #[strum(serialize = "oauth")]
    OAuth,
    #[strum(serialize = "externalbrowser")]
    ExternalBrowser,
    #[strum(serialize = "okta")]
    Okta,
    #[strum(to_string = "snowflake_jwt", serialize = "jwt")]
    Jwt,
    #[strum(serialize = "tokenaccessor")]
    TokenAccessor,
    #[strum(serialize = "username_password_mfa")]
    UsernamePasswordMfa,
    #[strum(serialize = "programmatic_access_token")]
    ProgrammaticAccessToken,
}

/// PEM private key plus optional passphrase, handed to the driver as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivateKey {
    pub pem: Secret,
    pub passphrase: Option<Secret>,
    pub encrypted: bool,
}

impl PrivateKey {
    pub fn from_pem(pem: &str, passphrase: Option<&str>) -> Result<Self, PrivateKeyError> {
        let pem = pem.trim();
        let begin = pem
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("-----BEGIN "))
            .and_then(|line| line.strip_suffix("-----"))
            .ok_or(PrivateKeyError::NotPem)?;
        if !begin.ends_with("PRIVATE KEY") {
            return Err(PrivateKeyError::NotPem);
        }
        let end = format!("-----END {begin}-----");
        if !pem.ends_with(&end) {
            return Err(PrivateKeyError::NotPem);
        }

        let encrypted = begin == "ENCRYPTED PRIVATE KEY"
            || pem.lines().any(|line| line.starts_with("Proc-Type: 4,ENCRYPTED"));
        let passphrase = passphrase.filter(|p| !p.is_empty());
        if encrypted && passphrase.is_none() {
            return Err(PrivateKeyError::MissingPassphrase);
        }

        Ok(Self {
            pem: Secret::new(pem),
            passphrase: passphrase.map(Secret::new),
            encrypted,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateKeyError {
    NotPem,
    MissingPassphrase,
}

impl PrivateKeyError {
    pub(crate) fn into_config_error(self, profile: &str) -> ConfigError {
        match self {
            PrivateKeyError::NotPem => ConfigError::InvalidValue {
                profile: profile.to_string(),
                key: "private_key",
                reason: "is not a PEM-encoded private key",
            },
            PrivateKeyError::MissingPassphrase => ConfigError::MissingPassphrase,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeouts {
    pub login: Option<Duration>,
    pub request: Option<Duration>,
    pub jwt_expire: Option<Duration>,
    pub client: Option<Duration>,
    pub jwt_client: Option<Duration>,
    pub external_browser: Option<Duration>,
}

/// Driver knobs only the legacy dialect accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegacyOptions {
    pub token: Option<Secret>,
    pub max_retry_count: Option<i64>,
    pub client_store_temporary_credential: Option<bool>,
    pub disable_query_context_cache: Option<bool>,
    pub include_retry_reason: Option<bool>,
    pub tmp_directory_path: Option<String>,
    pub disable_console_login: Option<bool>,
    pub driver_tracing: Option<String>,
    pub client_request_mfa_token: Option<bool>,
}

/// Resolved profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub profile: String,
    pub organization_name: Option<String>,
    pub account_name: Option<String>,
    pub user: Option<String>,
    pub password: Option<Secret>,
    pub role: Option<String>,
    pub warehouse: Option<String>,
    pub host: Option<String>,
    pub region: Option<String>,
    pub port: Option<u16>,
    pub protocol: Option<String>,
    pub authenticator: Option<Authenticator>,
    pub private_key: Option<PrivateKey>,
    pub okta_url: Option<String>,
    pub passcode: Option<Secret>,
    pub passcode_in_password: Option<bool>,
    pub client_ip: Option<String>,
    pub timeouts: Timeouts,
    pub validate_default_parameters: Option<bool>,
    pub ocsp_fail_open: Option<bool>,
    pub keep_session_alive: Option<bool>,
    pub insecure_mode: Option<bool>,
    pub disable_telemetry: Option<bool>,
    pub params: BTreeMap<String, String>,
    pub driver_url: Option<Secret>,
    pub legacy: LegacyOptions,
}

impl Config {
    /// `<organization>-<account>` when both are known.
    pub fn account_identifier(&self) -> Option<String> {
        match (&self.organization_name, &self.account_name) {
            (Some(org), Some(account)) => Some(format!("{org}-{account}")),
            (None, Some(account)) => Some(account.clone()),
            _ => None,
        }
    }
}
