//! Password policies: complexity, rotation and lockout rules.

use crate::common::{In, Like, LimitFrom, PropertyDetail, PropertyRow, TagAssociation};
use crate::error::{Error, Result};
use crate::identifiers::SchemaObjectIdentifier;
use crate::validation::{Errors, Validate};

/// The numeric `PASSWORD_*` properties, shared by `CREATE` and `SET`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordPolicyLimits {
    pub password_min_length: Option<i64>,
    pub password_max_length: Option<i64>,
    pub password_min_upper_case_chars: Option<i64>,
    pub password_min_lower_case_chars: Option<i64>,
    pub password_min_numeric_chars: Option<i64>,
    pub password_min_special_chars: Option<i64>,
    pub password_min_age_days: Option<i64>,
    pub password_max_age_days: Option<i64>,
    pub password_max_retries: Option<i64>,
    pub password_lockout_time_mins: Option<i64>,
    pub password_history: Option<i64>,
}

setters!(PasswordPolicyLimits {
    opt password_min_length: i64,
    opt password_max_length: i64,
    opt password_min_upper_case_chars: i64,
    opt password_min_lower_case_chars: i64,
    opt password_min_numeric_chars: i64,
    opt password_min_special_chars: i64,
    opt password_min_age_days: i64,
    opt password_max_age_days: i64,
    opt password_max_retries: i64,
    opt password_lockout_time_mins: i64,
    opt password_history: i64,
});

impl PasswordPolicyLimits {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Validate for PasswordPolicyLimits {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("PasswordPolicyLimits");
        errors.range("PasswordMinLength", self.password_min_length, 8, 256);
        errors.range("PasswordMaxLength", self.password_max_length, 8, 256);
        errors.range(
            "PasswordMinUpperCaseChars",
            self.password_min_upper_case_chars,
            0,
            256,
        );
        errors.range(
            "PasswordMinLowerCaseChars",
            self.password_min_lower_case_chars,
            0,
            256,
        );
        errors.range("PasswordMinNumericChars", self.password_min_numeric_chars, 0, 256);
        errors.range("PasswordMinSpecialChars", self.password_min_special_chars, 0, 256);
        errors.range("PasswordMinAgeDays", self.password_min_age_days, 0, 999);
        errors.range("PasswordMaxAgeDays", self.password_max_age_days, 0, 999);
        errors.range("PasswordMaxRetries", self.password_max_retries, 1, 10);
        errors.range("PasswordLockoutTimeMins", self.password_lockout_time_mins, 1, 999);
        errors.range("PasswordHistory", self.password_history, 0, 24);
        if let (Some(min), Some(max)) = (self.password_min_length, self.password_max_length) {
            errors.check(min <= max, || {
                Error::invalid_value(
                    "PasswordPolicyLimits",
                    "PasswordMinLength",
                    "must not exceed PASSWORD_MAX_LENGTH",
                )
            });
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePasswordPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub limits: PasswordPolicyLimits,
    pub comment: Option<String>,
}

impl Validate for CreatePasswordPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreatePasswordPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.nested(Some(&self.limits));
        errors.finish()
    }
}

request! {
    CreatePasswordPolicyRequest => CreatePasswordPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreatePasswordPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: CreatePasswordPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }

    pub fn with_limits(mut self, limits: PasswordPolicyLimits) -> Self {
        self.options.limits = limits;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordPolicySet {
    pub limits: PasswordPolicyLimits,
    pub comment: Option<String>,
}

impl PasswordPolicySet {
    pub fn new(limits: PasswordPolicyLimits) -> Self {
        Self {
            limits,
            comment: None,
        }
    }
}

setters!(PasswordPolicySet {
    opt comment: String,
});

impl Validate for PasswordPolicySet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("PasswordPolicySet");
        errors.check(!self.limits.is_empty() || self.comment.is_some(), || {
            Error::at_least_one_of(
                "PasswordPolicySet",
                &[
                    "PasswordMinLength",
                    "PasswordMaxLength",
                    "PasswordMinUpperCaseChars",
                    "PasswordMinLowerCaseChars",
                    "PasswordMinNumericChars",
                    "PasswordMinSpecialChars",
                    "PasswordMinAgeDays",
                    "PasswordMaxAgeDays",
                    "PasswordMaxRetries",
                    "PasswordLockoutTimeMins",
                    "PasswordHistory",
                    "Comment",
                ],
            )
        });
        errors.nested(Some(&self.limits));
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordPolicyUnset {
    pub password_min_length: bool,
    pub password_max_length: bool,
    pub password_min_upper_case_chars: bool,
    pub password_min_lower_case_chars: bool,
    pub password_min_numeric_chars: bool,
    pub password_min_special_chars: bool,
    pub password_min_age_days: bool,
    pub password_max_age_days: bool,
    pub password_max_retries: bool,
    pub password_lockout_time_mins: bool,
    pub password_history: bool,
    pub comment: bool,
}

setters!(PasswordPolicyUnset {
    flag password_min_length,
    flag password_max_length,
    flag password_min_upper_case_chars,
    flag password_min_lower_case_chars,
    flag password_min_numeric_chars,
    flag password_min_special_chars,
    flag password_min_age_days,
    flag password_max_age_days,
    flag password_max_retries,
    flag password_lockout_time_mins,
    flag password_history,
    flag comment,
});

impl PasswordPolicyUnset {
    pub(crate) fn properties(&self) -> [(bool, &'static str); 12] {
        [
            (self.password_min_length, "PASSWORD_MIN_LENGTH"),
            (self.password_max_length, "PASSWORD_MAX_LENGTH"),
            (
                self.password_min_upper_case_chars,
                "PASSWORD_MIN_UPPER_CASE_CHARS",
            ),
            (
                self.password_min_lower_case_chars,
                "PASSWORD_MIN_LOWER_CASE_CHARS",
            ),
            (self.password_min_numeric_chars, "PASSWORD_MIN_NUMERIC_CHARS"),
            (self.password_min_special_chars, "PASSWORD_MIN_SPECIAL_CHARS"),
            (self.password_min_age_days, "PASSWORD_MIN_AGE_DAYS"),
            (self.password_max_age_days, "PASSWORD_MAX_AGE_DAYS"),
            (self.password_max_retries, "PASSWORD_MAX_RETRIES"),
            (self.password_lockout_time_mins, "PASSWORD_LOCKOUT_TIME_MINS"),
            (self.password_history, "PASSWORD_HISTORY"),
            (self.comment, "COMMENT"),
        ]
    }
}

impl Validate for PasswordPolicyUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("PasswordPolicyUnset");
        let properties = self.properties();
        errors.check(properties.iter().any(|(on, _)| *on), || {
            Error::at_least_one_of(
                "PasswordPolicyUnset",
                &properties.map(|(_, name)| name),
            )
        });
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterPasswordPolicyOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<PasswordPolicySet>,
    pub unset: Option<PasswordPolicyUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterPasswordPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterPasswordPolicyOptions");
        errors.identifier("name", &self.name);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.exactly_one_of(
            &["RenameTo", "Set", "Unset", "SetTag", "UnsetTag"],
            &[
                &self.rename_to,
                &self.set,
                &self.unset,
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.finish()
    }
}

request! {
    AlterPasswordPolicyRequest => AlterPasswordPolicyOptions {
        flag if_exists,
        val rename_to: SchemaObjectIdentifier,
        val set: PasswordPolicySet,
        val unset: PasswordPolicyUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterPasswordPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterPasswordPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropPasswordPolicyOptions,
    DropPasswordPolicyRequest,
    "PASSWORD POLICY",
    SchemaObjectIdentifier
);

target_only!(
    DescribePasswordPolicyOptions,
    "DESCRIBE PASSWORD POLICY",
    SchemaObjectIdentifier
);

show_objects!(ShowPasswordPolicyOptions, ShowPasswordPolicyRequest, "PASSWORD POLICIES" {
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

policy_gateway!(
    PasswordPolicies,
    "password policy",
    "password policies",
    CreatePasswordPolicyRequest,
    AlterPasswordPolicyRequest,
    DropPasswordPolicyRequest,
    ShowPasswordPolicyRequest
);

impl PasswordPolicies<'_> {
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe password policy",
                &DescribePasswordPolicyOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "PP")
    }

    #[rstest]
    #[case::too_short(PasswordPolicyLimits::default().with_password_min_length(4))]
    #[case::too_many_retries(PasswordPolicyLimits::default().with_password_max_retries(11))]
    #[case::history(PasswordPolicyLimits::default().with_password_history(25))]
    #[case::min_over_max(
        PasswordPolicyLimits::default()
            .with_password_min_length(20)
            .with_password_max_length(12)
    )]
    fn test_limits_out_of_range(#[case] limits: PasswordPolicyLimits) {
        let opts = CreatePasswordPolicyRequest::new(id())
            .with_limits(limits)
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::InvalidValue)
        );
    }

    #[test]
    fn test_set_needs_a_property() {
        let opts = AlterPasswordPolicyRequest::new(id())
            .with_set(PasswordPolicySet::default())
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::AtLeastOneOf)
        );
    }

    #[test]
    fn test_unset_needs_a_property() {
        let opts = AlterPasswordPolicyRequest::new(id())
            .with_unset(PasswordPolicyUnset::default())
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::AtLeastOneOf)
        );
        let opts = AlterPasswordPolicyRequest::new(id())
            .with_unset(PasswordPolicyUnset::default().with_password_history(true))
            .to_options();
        assert!(opts.validate().is_ok());
    }
}
