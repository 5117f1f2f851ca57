use crate::objects::security_integration::{
    AlterSecurityIntegrationOptions, ApiAuthenticationClientCredentials,
    CreateSecurityIntegrationOptions, ExternalOauth, OauthCustom, OauthPartner, Saml2, Scim,
    SecurityIntegrationKind, SecurityIntegrationSet, SecurityIntegrationUnset,
};
use crate::render::{RenderSql, SqlBuilder, quoted};

impl RenderSql for ApiAuthenticationClientCredentials {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("TYPE = API_AUTHENTICATION AUTH_TYPE = OAUTH2")
            .parameter_quoted("OAUTH_CLIENT_ID", Some(&self.oauth_client_id))
            .parameter_quoted("OAUTH_CLIENT_SECRET", Some(&self.oauth_client_secret))
            .parameter_quoted("OAUTH_TOKEN_ENDPOINT", self.oauth_token_endpoint.as_ref())
            .parameter("OAUTH_CLIENT_AUTH_METHOD", self.oauth_client_auth_method.as_ref())
            .keyword("OAUTH_GRANT = CLIENT_CREDENTIALS")
            .parameter(
                "OAUTH_ACCESS_TOKEN_VALIDITY",
                self.oauth_access_token_validity,
            )
            .parameter(
                "OAUTH_REFRESH_TOKEN_VALIDITY",
                self.oauth_refresh_token_validity,
            )
            .list_paren_eq("OAUTH_ALLOWED_SCOPES", quoted(&self.oauth_allowed_scopes));
    }
}

impl RenderSql for ExternalOauth {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("TYPE = EXTERNAL_OAUTH")
            .parameter("EXTERNAL_OAUTH_TYPE", Some(self.oauth_type))
            .parameter_quoted("EXTERNAL_OAUTH_ISSUER", Some(&self.issuer))
            .list_paren_eq(
                "EXTERNAL_OAUTH_TOKEN_USER_MAPPING_CLAIM",
                quoted(&self.token_user_mapping_claim),
            )
            .parameter_quoted(
                "EXTERNAL_OAUTH_SNOWFLAKE_USER_MAPPING_ATTRIBUTE",
                Some(self.snowflake_user_mapping_attribute),
            )
            .list_paren_eq("EXTERNAL_OAUTH_JWS_KEYS_URL", quoted(&self.jws_keys_url))
            .parameter_quoted("EXTERNAL_OAUTH_RSA_PUBLIC_KEY", self.rsa_public_key.as_ref())
            .list_paren_eq("EXTERNAL_OAUTH_BLOCKED_ROLES_LIST", &self.blocked_roles_list)
            .list_paren_eq("EXTERNAL_OAUTH_ALLOWED_ROLES_LIST", &self.allowed_roles_list)
            .list_paren_eq("EXTERNAL_OAUTH_AUDIENCE_LIST", quoted(&self.audience_list))
            .parameter("EXTERNAL_OAUTH_ANY_ROLE_MODE", self.any_role_mode.as_ref());
    }
}

impl RenderSql for OauthPartner {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("TYPE = OAUTH")
            .parameter("OAUTH_CLIENT", Some(self.client))
            .parameter_quoted("OAUTH_REDIRECT_URI", self.redirect_uri.as_ref())
            .parameter("OAUTH_ISSUE_REFRESH_TOKENS", self.issue_refresh_tokens)
            .parameter("OAUTH_REFRESH_TOKEN_VALIDITY", self.refresh_token_validity)
            .list_paren_eq("BLOCKED_ROLES_LIST", &self.blocked_roles_list);
    }
}

impl RenderSql for OauthCustom {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("TYPE = OAUTH OAUTH_CLIENT = CUSTOM")
            .parameter_quoted("OAUTH_CLIENT_TYPE", Some(self.client_type))
            .parameter_quoted("OAUTH_REDIRECT_URI", Some(&self.redirect_uri))
            .parameter(
                "OAUTH_ALLOW_NON_TLS_REDIRECT_URI",
                self.allow_non_tls_redirect_uri,
            )
            .parameter("OAUTH_ENFORCE_PKCE", self.enforce_pkce)
            .parameter("OAUTH_USE_SECONDARY_ROLES", self.use_secondary_roles.as_ref())
            .list_paren_eq("PRE_AUTHORIZED_ROLES_LIST", &self.pre_authorized_roles_list)
            .list_paren_eq("BLOCKED_ROLES_LIST", &self.blocked_roles_list)
            .parameter("OAUTH_ISSUE_REFRESH_TOKENS", self.issue_refresh_tokens)
            .parameter("OAUTH_REFRESH_TOKEN_VALIDITY", self.refresh_token_validity)
            .parameter("NETWORK_POLICY", self.network_policy.as_ref())
            .parameter_quoted(
                "OAUTH_CLIENT_RSA_PUBLIC_KEY",
                self.client_rsa_public_key.as_ref(),
            );
    }
}

impl RenderSql for Saml2 {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("TYPE = SAML2")
            .parameter_quoted("SAML2_ISSUER", Some(&self.issuer))
            .parameter_quoted("SAML2_SSO_URL", Some(&self.sso_url))
            .parameter_quoted("SAML2_PROVIDER", Some(&self.provider))
            .parameter_quoted("SAML2_X509_CERT", Some(&self.x509_cert))
            .list_paren_eq("ALLOWED_USER_DOMAINS", quoted(&self.allowed_user_domains))
            .list_paren_eq("ALLOWED_EMAIL_PATTERNS", quoted(&self.allowed_email_patterns))
            .parameter_quoted(
                "SAML2_SP_INITIATED_LOGIN_PAGE_LABEL",
                self.sp_initiated_login_page_label.as_ref(),
            )
            .parameter("SAML2_ENABLE_SP_INITIATED", self.enable_sp_initiated)
            .parameter_quoted("SAML2_SNOWFLAKE_ISSUER_URL", self.snowflake_issuer_url.as_ref())
            .parameter_quoted("SAML2_SNOWFLAKE_ACS_URL", self.snowflake_acs_url.as_ref())
            .parameter_quoted(
                "SAML2_REQUESTED_NAMEID_FORMAT",
                self.requested_nameid_format.as_ref(),
            )
            .parameter_quoted(
                "SAML2_POST_LOGOUT_REDIRECT_URL",
                self.post_logout_redirect_url.as_ref(),
            )
            .parameter("SAML2_FORCE_AUTHN", self.force_authn);
    }
}

impl RenderSql for Scim {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("TYPE = SCIM")
            .parameter_quoted("SCIM_CLIENT", Some(self.client))
            .parameter_quoted("RUN_AS_ROLE", Some(&self.run_as_role))
            .parameter("NETWORK_POLICY", self.network_policy.as_ref())
            .parameter("SYNC_PASSWORD", self.sync_password);
    }
}

impl RenderSql for SecurityIntegrationKind {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            SecurityIntegrationKind::ApiAuthentication(kind) => kind.render(sql),
            SecurityIntegrationKind::ExternalOauth(kind) => kind.render(sql),
            SecurityIntegrationKind::OauthPartner(kind) => kind.render(sql),
            SecurityIntegrationKind::OauthCustom(kind) => kind.render(sql),
            SecurityIntegrationKind::Saml2(kind) => kind.render(sql),
            SecurityIntegrationKind::Scim(kind) => kind.render(sql),
        }
    }
}

impl RenderSql for CreateSecurityIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("SECURITY INTEGRATION")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(Some(&self.kind))
            .parameter("ENABLED", self.enabled)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for SecurityIntegrationSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("ENABLED", self.enabled)
            .parameter("NETWORK_POLICY", self.network_policy.as_ref())
            .parameter("SYNC_PASSWORD", self.sync_password)
            .parameter_quoted("OAUTH_REDIRECT_URI", self.oauth_redirect_uri.as_ref())
            .parameter("OAUTH_ISSUE_REFRESH_TOKENS", self.oauth_issue_refresh_tokens)
            .parameter(
                "OAUTH_REFRESH_TOKEN_VALIDITY",
                self.oauth_refresh_token_validity,
            )
            .list_paren_eq_allow_empty("BLOCKED_ROLES_LIST", self.blocked_roles_list.as_ref())
            .parameter("SAML2_ENABLE_SP_INITIATED", self.saml2_enable_sp_initiated)
            .parameter("SAML2_FORCE_AUTHN", self.saml2_force_authn)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for SecurityIntegrationUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.enabled, "ENABLED"),
                (self.network_policy, "NETWORK_POLICY"),
                (self.sync_password, "SYNC_PASSWORD"),
                (self.saml2_force_authn, "SAML2_FORCE_AUTHN"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterSecurityIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER SECURITY INTEGRATION")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .flag(
                self.refresh_saml2_private_key,
                "REFRESH SAML2_SNOWFLAKE_PRIVATE_KEY",
            )
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::AccountObjectIdentifier;
    use crate::objects::security_integration::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("SI")
    }

    #[test]
    fn test_create_scim() {
        let kind = SecurityIntegrationKind::Scim(Scim {
            client: ScimClient::Okta,
            run_as_role: "OKTA_PROVISIONER".into(),
            network_policy: None,
            sync_password: Some(true),
        });
        let opts = CreateSecurityIntegrationRequest::new(id(), kind)
            .with_enabled(true)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE SECURITY INTEGRATION \"SI\" TYPE = SCIM SCIM_CLIENT = 'OKTA' \
             RUN_AS_ROLE = 'OKTA_PROVISIONER' SYNC_PASSWORD = true ENABLED = true"
        );
    }

    #[test]
    fn test_create_api_authentication() {
        let kind = SecurityIntegrationKind::ApiAuthentication(
            ApiAuthenticationClientCredentials {
                oauth_client_id: "cid".into(),
                oauth_client_secret: "sec".into(),
                ..Default::default()
            }
            .with_oauth_allowed_scopes(["read".to_string()]),
        );
        let opts = CreateSecurityIntegrationRequest::new(id(), kind)
            .with_or_replace(true)
            .with_enabled(true)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE SECURITY INTEGRATION \"SI\" TYPE = API_AUTHENTICATION \
             AUTH_TYPE = OAUTH2 OAUTH_CLIENT_ID = 'cid' OAUTH_CLIENT_SECRET = 'sec' \
             OAUTH_GRANT = CLIENT_CREDENTIALS OAUTH_ALLOWED_SCOPES = ('read') ENABLED = true"
        );
    }

    #[test]
    fn test_create_oauth_partner() {
        let kind = SecurityIntegrationKind::OauthPartner(OauthPartner {
            client: OauthPartnerClient::TableauDesktop,
            redirect_uri: None,
            issue_refresh_tokens: Some(false),
            refresh_token_validity: None,
            blocked_roles_list: vec![AccountObjectIdentifier::new("ACCOUNTADMIN")],
        });
        let opts = CreateSecurityIntegrationRequest::new(id(), kind).to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE SECURITY INTEGRATION \"SI\" TYPE = OAUTH OAUTH_CLIENT = TABLEAU_DESKTOP \
             OAUTH_ISSUE_REFRESH_TOKENS = false BLOCKED_ROLES_LIST = (\"ACCOUNTADMIN\")"
        );
    }

    #[test]
    fn test_alter() {
        let refresh = AlterSecurityIntegrationRequest::new(id())
            .with_refresh_saml2_private_key(true)
            .to_options();
        assert_eq!(
            refresh.to_sql(),
            "ALTER SECURITY INTEGRATION \"SI\" REFRESH SAML2_SNOWFLAKE_PRIVATE_KEY"
        );
        let set = AlterSecurityIntegrationRequest::new(id())
            .with_set(
                SecurityIntegrationSet::default()
                    .with_enabled(false)
                    .with_blocked_roles_list(vec![]),
            )
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER SECURITY INTEGRATION \"SI\" SET ENABLED = false BLOCKED_ROLES_LIST = ()"
        );
        assert_eq!(
            ShowSecurityIntegrationRequest::new().to_options().to_sql(),
            "SHOW SECURITY INTEGRATIONS"
        );
    }
}
