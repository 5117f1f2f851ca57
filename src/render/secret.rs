use crate::objects::secret::{
    AlterSecretOptions, CreateSecretOptions, SecretKind, SecretSet, SecretSetKind,
};
use crate::render::{RenderSql, SqlBuilder, quoted};

impl RenderSql for SecretKind {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("TYPE", Some(self.secret_type()));
        match self {
            SecretKind::OAuthClientCredentials {
                api_authentication,
                oauth_scopes,
            } => {
                sql.parameter("API_AUTHENTICATION", Some(api_authentication))
                    .list_paren_eq("OAUTH_SCOPES", quoted(oauth_scopes));
            }
            SecretKind::OAuthAuthorizationCode {
                api_authentication,
                oauth_refresh_token,
                oauth_refresh_token_expiry_time,
            } => {
                sql.parameter_quoted("OAUTH_REFRESH_TOKEN", Some(oauth_refresh_token))
                    .parameter_quoted(
                        "OAUTH_REFRESH_TOKEN_EXPIRY_TIME",
                        Some(oauth_refresh_token_expiry_time),
                    )
                    .parameter("API_AUTHENTICATION", Some(api_authentication));
            }
            SecretKind::BasicAuthentication { username, password } => {
                sql.parameter_quoted("USERNAME", Some(username))
                    .parameter_quoted("PASSWORD", Some(password));
            }
            SecretKind::GenericString { secret_string } => {
                sql.parameter_quoted("SECRET_STRING", Some(secret_string));
            }
        }
    }
}

impl RenderSql for CreateSecretOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("SECRET")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(Some(&self.kind))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for SecretSetKind {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            SecretSetKind::OAuthScopes(scopes) => {
                sql.list_paren_eq("OAUTH_SCOPES", quoted(scopes));
            }
            SecretSetKind::OAuthRefreshToken { token, expiry_time } => {
                sql.parameter_quoted("OAUTH_REFRESH_TOKEN", Some(token))
                    .parameter_quoted("OAUTH_REFRESH_TOKEN_EXPIRY_TIME", expiry_time.as_ref());
            }
            SecretSetKind::BasicAuthentication { username, password } => {
                sql.parameter_quoted("USERNAME", username.as_ref())
                    .parameter_quoted("PASSWORD", password.as_ref());
            }
            SecretSetKind::GenericString(value) => {
                sql.parameter_quoted("SECRET_STRING", Some(value));
            }
        }
    }
}

impl RenderSql for SecretSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .nested(self.kind.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AlterSecretOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER SECRET")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT");
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::secret::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "SEC")
    }

    #[rstest]
    #[case::client_credentials(
        CreateSecretRequest::with_oauth_client_credentials(
            id(),
            AccountObjectIdentifier::new("API"),
            ["scope1".to_string(), "scope2".to_string()],
        ),
        "CREATE SECRET \"DB\".\"S\".\"SEC\" TYPE = OAUTH2 API_AUTHENTICATION = \"API\" \
         OAUTH_SCOPES = ('scope1', 'scope2')"
    )]
    #[case::authorization_code(
        CreateSecretRequest::with_oauth_authorization_code(
            id(),
            AccountObjectIdentifier::new("API"),
            "tok",
            "2030-01-01 00:00:00",
        ),
        "CREATE SECRET \"DB\".\"S\".\"SEC\" TYPE = OAUTH2 OAUTH_REFRESH_TOKEN = 'tok' \
         OAUTH_REFRESH_TOKEN_EXPIRY_TIME = '2030-01-01 00:00:00' API_AUTHENTICATION = \"API\""
    )]
    #[case::basic(
        CreateSecretRequest::with_basic_authentication(id(), "svc", "p'w"),
        "CREATE SECRET \"DB\".\"S\".\"SEC\" TYPE = PASSWORD USERNAME = 'svc' PASSWORD = 'p''w'"
    )]
    #[case::generic(
        CreateSecretRequest::with_generic_string(id(), "s3cr3t"),
        "CREATE SECRET \"DB\".\"S\".\"SEC\" TYPE = GENERIC_STRING SECRET_STRING = 's3cr3t'"
    )]
    fn test_create_variants(#[case] request: CreateSecretRequest, #[case] expected: &str) {
        assert_eq!(request.to_options().to_sql(), expected);
    }

    #[test]
    fn test_alter() {
        let set = AlterSecretRequest::new(id())
            .with_set(
                SecretSet::default()
                    .with_kind(SecretSetKind::GenericString("new".into()))
                    .with_comment("rotated"),
            )
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER SECRET \"DB\".\"S\".\"SEC\" SET SECRET_STRING = 'new' COMMENT = 'rotated'"
        );
        let unset = AlterSecretRequest::new(id()).with_unset_comment(true).to_options();
        assert_eq!(unset.to_sql(), "ALTER SECRET \"DB\".\"S\".\"SEC\" UNSET COMMENT");
    }
}
