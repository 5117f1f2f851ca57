use std::time::Duration;

use tracing::debug;

use crate::config::{ConfigError, merge::Merge, types::*};

/// Region the driver already defaults to; configuring it is a no-op.
const DEFAULT_REGION: &str = "us-west-2";

/// Environment variables that override profile values.
pub const ENV_OVERRIDES: &[&str] = &[
    "SNOWFLAKE_ACCOUNT",
    "SNOWFLAKE_ORGANIZATION_NAME",
    "SNOWFLAKE_USER",
    "SNOWFLAKE_PASSWORD",
    "SNOWFLAKE_ROLE",
    "SNOWFLAKE_WAREHOUSE",
    "SNOWFLAKE_HOST",
    "SNOWFLAKE_DRIVER_URL",
];

pub struct ConfigBuilder {
    profile: String,
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    /// Environment overrides, read through `lookup` so callers can supply
    /// something other than the process environment.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_input = env_input(lookup);
        self.config_input = self.config_input.merge(env_input);
        self
    }

    pub fn with_overrides(mut self, input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(input);
        self
    }

    pub fn resolve(self) -> Result<Config, ConfigError> {
        let profile = self.profile;
        let input = self.config_input;

        let region = input.region.filter(|region| region != DEFAULT_REGION);
        if region.is_none() {
            debug!("region not set, driver default applies");
        }

        let port = input
            .port
            .map(|port| {
                u16::try_from(port).map_err(|_| ConfigError::InvalidValue {
                    profile: profile.clone(),
                    key: "port",
                    reason: "must be between 0 and 65535",
                })
            })
            .transpose()?;

        let authenticator = input
            .authenticator
            .as_deref()
            .map(|token| {
                token
                    .parse::<Authenticator>()
                    .map_err(|_| ConfigError::InvalidValue {
                        profile: profile.clone(),
                        key: "authenticator",
                        reason: "is not a supported authenticator",
                    })
            })
            .transpose()?;

        let private_key = input
            .private_key
            .as_deref()
            .map(|pem| {
                PrivateKey::from_pem(pem, input.private_key_passphrase.as_deref())
                    .map_err(|e| e.into_config_error(&profile))
            })
            .transpose()?;

        let timeouts = Timeouts {
            login: seconds(&profile, "login_timeout", input.login_timeout)?,
            request: seconds(&profile, "request_timeout", input.request_timeout)?,
            jwt_expire: seconds(&profile, "jwt_expire_timeout", input.jwt_expire_timeout)?,
            client: seconds(&profile, "client_timeout", input.client_timeout)?,
            jwt_client: seconds(&profile, "jwt_client_timeout", input.jwt_client_timeout)?,
            external_browser: seconds(
                &profile,
                "external_browser_timeout",
                input.external_browser_timeout,
            )?,
        };

        Ok(Config {
            profile,
            organization_name: input.organization_name,
            account_name: input.account_name,
            user: input.user,
            password: input.password.map(Secret::new),
            role: input.role,
            warehouse: input.warehouse,
            host: input.host,
            region,
            port,
            protocol: input.protocol,
            authenticator,
            private_key,
            okta_url: input.okta_url,
            passcode: input.passcode.map(Secret::new),
            passcode_in_password: input.passcode_in_password,
            client_ip: input.client_ip,
            timeouts,
            validate_default_parameters: input.validate_default_parameters,
            ocsp_fail_open: input.ocsp_fail_open,
            keep_session_alive: input.keep_session_alive,
            insecure_mode: input.insecure_mode,
            disable_telemetry: input.disable_telemetry,
            params: input.params.unwrap_or_default(),
            driver_url: input.driver_url.map(Secret::new),
            legacy: LegacyOptions {
                token: input.token.map(Secret::new),
                max_retry_count: input.max_retry_count,
                client_store_temporary_credential: input.client_store_temporary_credential,
                disable_query_context_cache: input.disable_query_context_cache,
                include_retry_reason: input.include_retry_reason,
                tmp_directory_path: input.tmp_directory_path,
                disable_console_login: input.disable_console_login,
                driver_tracing: input.driver_tracing,
                client_request_mfa_token: input.client_request_mfa_token,
            },
        })
    }
}

fn seconds(
    profile: &str,
    key: &'static str,
    value: Option<i64>,
) -> Result<Option<Duration>, ConfigError> {
    value
        .map(|secs| {
            u64::try_from(secs)
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    profile: profile.to_string(),
                    key,
                    reason: "must not be negative",
                })
        })
        .transpose()
}

fn env_input(lookup: impl Fn(&str) -> Option<String>) -> ConfigInput {
    let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
    ConfigInput {
        account_name: get("SNOWFLAKE_ACCOUNT"),
        organization_name: get("SNOWFLAKE_ORGANIZATION_NAME"),
        user: get("SNOWFLAKE_USER"),
        password: get("SNOWFLAKE_PASSWORD"),
        role: get("SNOWFLAKE_ROLE"),
        warehouse: get("SNOWFLAKE_WAREHOUSE"),
        host: get("SNOWFLAKE_HOST"),
        driver_url: get("SNOWFLAKE_DRIVER_URL"),
        ..Default::default()
    }
}
