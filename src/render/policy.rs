//! Rendering for the seven policy kinds.

use std::fmt;

use crate::objects::policy::aggregation::CreateAggregationPolicyOptions;
use crate::objects::policy::authentication::{
    AlterAuthenticationPolicyOptions, AuthenticationPolicySet, AuthenticationPolicyUnset,
    CreateAuthenticationPolicyOptions,
};
use crate::objects::policy::masking::CreateMaskingPolicyOptions;
use crate::objects::policy::password::{
    AlterPasswordPolicyOptions, CreatePasswordPolicyOptions, PasswordPolicyLimits,
    PasswordPolicySet, PasswordPolicyUnset,
};
use crate::objects::policy::projection::CreateProjectionPolicyOptions;
use crate::objects::policy::row_access::CreateRowAccessPolicyOptions;
use crate::objects::policy::session::{
    AlterSessionPolicyOptions, CreateSessionPolicyOptions, SessionPolicySet, SessionPolicyUnset,
};
use crate::objects::policy::{AlterBodyPolicyOptions, BodyPolicyKind, PolicyArgument};
use crate::render::{RenderSql, SqlBuilder, quote_ident, quoted};

impl fmt::Display for PolicyArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", quote_ident(&self.name), self.data_type)
    }
}

/// `AS (<args>) RETURNS <type> -> <body>`
fn signature_and_body(
    sql: &mut SqlBuilder,
    arguments: &[PolicyArgument],
    returns: impl fmt::Display,
    body: &str,
) {
    let joined = arguments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    sql.raw(format!("AS ({joined}) RETURNS {returns} -> {body}"));
}

fn tokens<T: ToString>(values: &[T]) -> Vec<String> {
    quoted(values.iter().map(ToString::to_string))
}

impl RenderSql for CreateMaskingPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("MASKING POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name);
        signature_and_body(sql, &self.signature, &self.returns, &self.body);
        sql.parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("EXEMPT_OTHER_POLICIES", self.exempt_other_policies);
    }
}

impl RenderSql for CreateRowAccessPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("ROW ACCESS POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name);
        signature_and_body(sql, &self.args, "BOOLEAN", &self.body);
        sql.parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for CreateProjectionPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("PROJECTION POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name);
        signature_and_body(sql, &[], "PROJECTION_CONSTRAINT", &self.body);
        sql.parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for CreateAggregationPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("AGGREGATION POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name);
        signature_and_body(sql, &[], "AGGREGATION_CONSTRAINT", &self.body);
        sql.parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl<K: BodyPolicyKind> RenderSql for AlterBodyPolicyOptions<K> {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER")
            .keyword(K::KEYWORD)
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref());
        if let Some(body) = &self.set_body {
            sql.raw(format!("SET BODY -> {body}"));
        }
        sql.parameter_quoted("SET COMMENT", self.set_comment.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT")
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for PasswordPolicyLimits {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("PASSWORD_MIN_LENGTH", self.password_min_length)
            .parameter("PASSWORD_MAX_LENGTH", self.password_max_length)
            .parameter(
                "PASSWORD_MIN_UPPER_CASE_CHARS",
                self.password_min_upper_case_chars,
            )
            .parameter(
                "PASSWORD_MIN_LOWER_CASE_CHARS",
                self.password_min_lower_case_chars,
            )
            .parameter("PASSWORD_MIN_NUMERIC_CHARS", self.password_min_numeric_chars)
            .parameter("PASSWORD_MIN_SPECIAL_CHARS", self.password_min_special_chars)
            .parameter("PASSWORD_MIN_AGE_DAYS", self.password_min_age_days)
            .parameter("PASSWORD_MAX_AGE_DAYS", self.password_max_age_days)
            .parameter("PASSWORD_MAX_RETRIES", self.password_max_retries)
            .parameter("PASSWORD_LOCKOUT_TIME_MINS", self.password_lockout_time_mins)
            .parameter("PASSWORD_HISTORY", self.password_history);
    }
}

impl RenderSql for CreatePasswordPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("PASSWORD POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(Some(&self.limits))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for PasswordPolicySet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .nested(Some(&self.limits))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for PasswordPolicyUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list("UNSET", &self.properties());
    }
}

impl RenderSql for AlterPasswordPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER PASSWORD POLICY")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for CreateSessionPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("SESSION POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("SESSION_IDLE_TIMEOUT_MINS", self.session_idle_timeout_mins)
            .parameter(
                "SESSION_UI_IDLE_TIMEOUT_MINS",
                self.session_ui_idle_timeout_mins,
            )
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for SessionPolicySet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("SESSION_IDLE_TIMEOUT_MINS", self.session_idle_timeout_mins)
            .parameter(
                "SESSION_UI_IDLE_TIMEOUT_MINS",
                self.session_ui_idle_timeout_mins,
            )
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for SessionPolicyUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.session_idle_timeout_mins, "SESSION_IDLE_TIMEOUT_MINS"),
                (
                    self.session_ui_idle_timeout_mins,
                    "SESSION_UI_IDLE_TIMEOUT_MINS",
                ),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterSessionPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER SESSION POLICY")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for CreateAuthenticationPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("AUTHENTICATION POLICY")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .list_paren_eq(
                "AUTHENTICATION_METHODS",
                tokens(&self.authentication_methods),
            )
            .list_paren_eq(
                "MFA_AUTHENTICATION_METHODS",
                tokens(&self.mfa_authentication_methods),
            )
            .parameter("MFA_ENROLLMENT", self.mfa_enrollment)
            .list_paren_eq("CLIENT_TYPES", tokens(&self.client_types))
            .list_paren_eq("SECURITY_INTEGRATIONS", &self.security_integrations)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AuthenticationPolicySet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .list_paren_eq_allow_empty(
                "AUTHENTICATION_METHODS",
                self.authentication_methods.as_deref().map(tokens),
            )
            .list_paren_eq_allow_empty(
                "MFA_AUTHENTICATION_METHODS",
                self.mfa_authentication_methods.as_deref().map(tokens),
            )
            .parameter("MFA_ENROLLMENT", self.mfa_enrollment)
            .list_paren_eq_allow_empty("CLIENT_TYPES", self.client_types.as_deref().map(tokens))
            .list_paren_eq_allow_empty(
                "SECURITY_INTEGRATIONS",
                self.security_integrations.as_ref(),
            )
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AuthenticationPolicyUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.authentication_methods, "AUTHENTICATION_METHODS"),
                (self.mfa_authentication_methods, "MFA_AUTHENTICATION_METHODS"),
                (self.mfa_enrollment, "MFA_ENROLLMENT"),
                (self.client_types, "CLIENT_TYPES"),
                (self.security_integrations, "SECURITY_INTEGRATIONS"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterAuthenticationPolicyOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER AUTHENTICATION POLICY")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .keyword_identifier("RENAME TO", self.rename_to.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::common::{In, TagAssociation};
    use crate::datatypes::DataType;
    use crate::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::policy::PolicyArgument;
    use crate::objects::policy::aggregation::CreateAggregationPolicyRequest;
    use crate::objects::policy::authentication::*;
    use crate::objects::policy::masking::*;
    use crate::objects::policy::password::*;
    use crate::objects::policy::projection::CreateProjectionPolicyRequest;
    use crate::objects::policy::row_access::*;
    use crate::objects::policy::session::*;
    use crate::render::RenderSql;

    fn id(name: &str) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", name)
    }

    #[test]
    fn test_create_masking_policy() {
        let opts = CreateMaskingPolicyRequest::new(
            id("MP"),
            [PolicyArgument::new("VAL", DataType::Varchar)],
            DataType::Varchar,
            "CASE WHEN CURRENT_ROLE() = 'ADMIN' THEN VAL ELSE '***' END",
        )
        .with_or_replace(true)
        .with_comment("pii")
        .with_exempt_other_policies(true)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE MASKING POLICY \"DB\".\"S\".\"MP\" AS (\"VAL\" VARCHAR) \
             RETURNS VARCHAR -> CASE WHEN CURRENT_ROLE() = 'ADMIN' THEN VAL ELSE '***' END \
             COMMENT = 'pii' EXEMPT_OTHER_POLICIES = true"
        );
    }

    #[test]
    fn test_create_row_access_policy() {
        let opts = CreateRowAccessPolicyRequest::new(
            id("RAP"),
            [PolicyArgument::new("REGION", "VARCHAR")],
            "REGION = 'EU'",
        )
        .with_if_not_exists(true)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE ROW ACCESS POLICY IF NOT EXISTS \"DB\".\"S\".\"RAP\" \
             AS (\"REGION\" VARCHAR) RETURNS BOOLEAN -> REGION = 'EU'"
        );
    }

    #[test]
    fn test_create_constraint_policies() {
        let projection =
            CreateProjectionPolicyRequest::new(id("PP"), "PROJECTION_CONSTRAINT(ALLOW => false)")
                .to_options();
        assert_eq!(
            projection.to_sql(),
            "CREATE PROJECTION POLICY \"DB\".\"S\".\"PP\" AS () RETURNS PROJECTION_CONSTRAINT \
             -> PROJECTION_CONSTRAINT(ALLOW => false)"
        );
        let aggregation = CreateAggregationPolicyRequest::new(
            id("AP"),
            "AGGREGATION_CONSTRAINT(MIN_GROUP_SIZE => 5)",
        )
        .to_options();
        assert_eq!(
            aggregation.to_sql(),
            "CREATE AGGREGATION POLICY \"DB\".\"S\".\"AP\" AS () RETURNS AGGREGATION_CONSTRAINT \
             -> AGGREGATION_CONSTRAINT(MIN_GROUP_SIZE => 5)"
        );
    }

    #[rstest]
    #[case::set_body(
        AlterMaskingPolicyRequest::new(id("MP")).with_set_body("'***'"),
        "ALTER MASKING POLICY \"DB\".\"S\".\"MP\" SET BODY -> '***'"
    )]
    #[case::rename(
        AlterMaskingPolicyRequest::new(id("MP")).with_rename_to(id("MP2")),
        "ALTER MASKING POLICY \"DB\".\"S\".\"MP\" RENAME TO \"DB\".\"S\".\"MP2\""
    )]
    #[case::set_tag(
        AlterMaskingPolicyRequest::new(id("MP")).with_set_tag([TagAssociation::new(id("T"), "v")]),
        "ALTER MASKING POLICY \"DB\".\"S\".\"MP\" SET TAG \"DB\".\"S\".\"T\" = 'v'"
    )]
    #[case::unset_comment(
        AlterMaskingPolicyRequest::new(id("MP")).with_if_exists(true).with_unset_comment(true),
        "ALTER MASKING POLICY IF EXISTS \"DB\".\"S\".\"MP\" UNSET COMMENT"
    )]
    fn test_alter_masking_policy(#[case] request: AlterMaskingPolicyRequest, #[case] expected: &str) {
        assert_eq!(request.to_options().to_sql(), expected);
    }

    #[test]
    fn test_alter_row_access_policy_keyword() {
        let opts = AlterRowAccessPolicyRequest::new(id("RAP"))
            .with_set_comment("eu only")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "ALTER ROW ACCESS POLICY \"DB\".\"S\".\"RAP\" SET COMMENT = 'eu only'"
        );
    }

    #[test]
    fn test_password_policy() {
        let create = CreatePasswordPolicyRequest::new(id("PWD"))
            .with_limits(
                PasswordPolicyLimits::default()
                    .with_password_min_length(12)
                    .with_password_max_retries(5),
            )
            .to_options();
        assert_eq!(
            create.to_sql(),
            "CREATE PASSWORD POLICY \"DB\".\"S\".\"PWD\" PASSWORD_MIN_LENGTH = 12 \
             PASSWORD_MAX_RETRIES = 5"
        );
        let set = AlterPasswordPolicyRequest::new(id("PWD"))
            .with_set(
                PasswordPolicySet::new(PasswordPolicyLimits::default().with_password_history(5))
                    .with_comment("c"),
            )
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER PASSWORD POLICY \"DB\".\"S\".\"PWD\" SET PASSWORD_HISTORY = 5 COMMENT = 'c'"
        );
        let unset = AlterPasswordPolicyRequest::new(id("PWD"))
            .with_unset(
                PasswordPolicyUnset::default()
                    .with_password_min_length(true)
                    .with_comment(true),
            )
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER PASSWORD POLICY \"DB\".\"S\".\"PWD\" UNSET PASSWORD_MIN_LENGTH, COMMENT"
        );
    }

    #[test]
    fn test_session_policy() {
        let create = CreateSessionPolicyRequest::new(id("SP"))
            .with_session_idle_timeout_mins(30)
            .to_options();
        assert_eq!(
            create.to_sql(),
            "CREATE SESSION POLICY \"DB\".\"S\".\"SP\" SESSION_IDLE_TIMEOUT_MINS = 30"
        );
        let unset = AlterSessionPolicyRequest::new(id("SP"))
            .with_unset(SessionPolicyUnset::default().with_session_ui_idle_timeout_mins(true))
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER SESSION POLICY \"DB\".\"S\".\"SP\" UNSET SESSION_UI_IDLE_TIMEOUT_MINS"
        );
    }

    #[test]
    fn test_authentication_policy() {
        let create = CreateAuthenticationPolicyRequest::new(id("AUTH"))
            .with_authentication_methods([AuthenticationMethod::Password, AuthenticationMethod::Saml])
            .with_mfa_enrollment(MfaEnrollment::Required)
            .with_client_types([ClientType::SnowflakeUi])
            .with_security_integrations([AccountObjectIdentifier::new("SSO")])
            .to_options();
        assert_eq!(
            create.to_sql(),
            "CREATE AUTHENTICATION POLICY \"DB\".\"S\".\"AUTH\" \
             AUTHENTICATION_METHODS = ('PASSWORD', 'SAML') MFA_ENROLLMENT = REQUIRED \
             CLIENT_TYPES = ('SNOWFLAKE_UI') SECURITY_INTEGRATIONS = (\"SSO\")"
        );
        let set = AlterAuthenticationPolicyRequest::new(id("AUTH"))
            .with_set(AuthenticationPolicySet::default().with_client_types(Vec::new()))
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER AUTHENTICATION POLICY \"DB\".\"S\".\"AUTH\" SET CLIENT_TYPES = ()"
        );
    }

    #[test]
    fn test_show_policies() {
        let show = ShowMaskingPolicyRequest::new()
            .with_in_scope(In::schema(DatabaseObjectIdentifier::new("DB", "S")))
            .to_options();
        assert_eq!(show.to_sql(), "SHOW MASKING POLICIES IN SCHEMA \"DB\".\"S\"");
        let drop = DropRowAccessPolicyRequest::new(id("RAP"))
            .with_if_exists(true)
            .to_options();
        assert_eq!(drop.to_sql(), "DROP ROW ACCESS POLICY IF EXISTS \"DB\".\"S\".\"RAP\"");
    }
}
