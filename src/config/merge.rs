use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            account_name: self.account_name.merge(other.account_name),
            organization_name: self.organization_name.merge(other.organization_name),
            user: self.user.merge(other.user),
            password: self.password.merge(other.password),
            role: self.role.merge(other.role),
            warehouse: self.warehouse.merge(other.warehouse),
            host: self.host.merge(other.host),
            region: self.region.merge(other.region),
            port: self.port.merge(other.port),
            protocol: self.protocol.merge(other.protocol),
            authenticator: self.authenticator.merge(other.authenticator),
            private_key: self.private_key.merge(other.private_key),
            private_key_passphrase: self
                .private_key_passphrase
                .merge(other.private_key_passphrase),
            okta_url: self.okta_url.merge(other.okta_url),
            passcode: self.passcode.merge(other.passcode),
            passcode_in_password: self.passcode_in_password.merge(other.passcode_in_password),
            client_ip: self.client_ip.merge(other.client_ip),
            login_timeout: self.login_timeout.merge(other.login_timeout),
            request_timeout: self.request_timeout.merge(other.request_timeout),
            jwt_expire_timeout: self.jwt_expire_timeout.merge(other.jwt_expire_timeout),
            client_timeout: self.client_timeout.merge(other.client_timeout),
            jwt_client_timeout: self.jwt_client_timeout.merge(other.jwt_client_timeout),
            external_browser_timeout: self
                .external_browser_timeout
                .merge(other.external_browser_timeout),
            validate_default_parameters: self
                .validate_default_parameters
                .merge(other.validate_default_parameters),
            ocsp_fail_open: self.ocsp_fail_open.merge(other.ocsp_fail_open),
            keep_session_alive: self.keep_session_alive.merge(other.keep_session_alive),
            insecure_mode: self.insecure_mode.merge(other.insecure_mode),
            disable_telemetry: self.disable_telemetry.merge(other.disable_telemetry),
            // Session parameters merge key by key.
            params: match (self.params, other.params) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(mut a), Some(b)) => {
                    a.extend(b);
                    Some(a)
                }
            },
            driver_url: self.driver_url.merge(other.driver_url),
            token: self.token.merge(other.token),
            max_retry_count: self.max_retry_count.merge(other.max_retry_count),
            client_store_temporary_credential: self
                .client_store_temporary_credential
                .merge(other.client_store_temporary_credential),
            disable_query_context_cache: self
                .disable_query_context_cache
                .merge(other.disable_query_context_cache),
            include_retry_reason: self.include_retry_reason.merge(other.include_retry_reason),
            tmp_directory_path: self.tmp_directory_path.merge(other.tmp_directory_path),
            disable_console_login: self
                .disable_console_login
                .merge(other.disable_console_login),
            driver_tracing: self.driver_tracing.merge(other.driver_tracing),
            client_request_mfa_token: self
                .client_request_mfa_token
                .merge(other.client_request_mfa_token),
        }
    }
}
