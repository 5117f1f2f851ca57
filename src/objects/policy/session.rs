//! Session policies: idle timeouts for programmatic and UI sessions.

use crate::common::{In, Like, LimitFrom, PropertyDetail, PropertyRow, TagAssociation};
use crate::error::Result;
use crate::identifiers::SchemaObjectIdentifier;
use crate::validation::{Errors, Validate, flag};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSessionPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub session_idle_timeout_mins: Option<i64>,
    pub session_ui_idle_timeout_mins: Option<i64>,
    pub comment: Option<String>,
}

impl Validate for CreateSessionPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateSessionPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.range("SessionIdleTimeoutMins", self.session_idle_timeout_mins, 5, 240);
        errors.range(
            "SessionUiIdleTimeoutMins",
            self.session_ui_idle_timeout_mins,
            5,
            240,
        );
        errors.finish()
    }
}

request! {
    CreateSessionPolicyRequest => CreateSessionPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        opt session_idle_timeout_mins: i64,
        opt session_ui_idle_timeout_mins: i64,
        opt comment: String,
    }
}

impl CreateSessionPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: CreateSessionPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPolicySet {
    pub session_idle_timeout_mins: Option<i64>,
    pub session_ui_idle_timeout_mins: Option<i64>,
    pub comment: Option<String>,
}

setters!(SessionPolicySet {
    opt session_idle_timeout_mins: i64,
    opt session_ui_idle_timeout_mins: i64,
    opt comment: String,
});

impl Validate for SessionPolicySet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SessionPolicySet");
        errors.at_least_one_of(
            &["SessionIdleTimeoutMins", "SessionUiIdleTimeoutMins", "Comment"],
            &[
                &self.session_idle_timeout_mins,
                &self.session_ui_idle_timeout_mins,
                &self.comment,
            ],
        );
        errors.range("SessionIdleTimeoutMins", self.session_idle_timeout_mins, 5, 240);
        errors.range(
            "SessionUiIdleTimeoutMins",
            self.session_ui_idle_timeout_mins,
            5,
            240,
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPolicyUnset {
    pub session_idle_timeout_mins: bool,
    pub session_ui_idle_timeout_mins: bool,
    pub comment: bool,
}

setters!(SessionPolicyUnset {
    flag session_idle_timeout_mins,
    flag session_ui_idle_timeout_mins,
    flag comment,
});

impl Validate for SessionPolicyUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("SessionPolicyUnset");
        errors.at_least_one_of(
            &["SessionIdleTimeoutMins", "SessionUiIdleTimeoutMins", "Comment"],
            &[
                &flag(self.session_idle_timeout_mins),
                &flag(self.session_ui_idle_timeout_mins),
                &flag(self.comment),
            ],
        );
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterSessionPolicyOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<SessionPolicySet>,
    pub unset: Option<SessionPolicyUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterSessionPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterSessionPolicyOptions");
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
    AlterSessionPolicyRequest => AlterSessionPolicyOptions {
        flag if_exists,
        val rename_to: SchemaObjectIdentifier,
        val set: SessionPolicySet,
        val unset: SessionPolicyUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterSessionPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterSessionPolicyOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropSessionPolicyOptions,
    DropSessionPolicyRequest,
    "SESSION POLICY",
    SchemaObjectIdentifier
);

target_only!(
    DescribeSessionPolicyOptions,
    "DESCRIBE SESSION POLICY",
    SchemaObjectIdentifier
);

show_objects!(ShowSessionPolicyOptions, ShowSessionPolicyRequest, "SESSION POLICIES" {
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

policy_gateway!(
    SessionPolicies,
    "session policy",
    "session policies",
    CreateSessionPolicyRequest,
    AlterSessionPolicyRequest,
    DropSessionPolicyRequest,
    ShowSessionPolicyRequest
);

impl SessionPolicies<'_> {
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Vec<PropertyDetail>> {
        self.client
            .query::<_, PropertyRow, _>(
                "describe session policy",
                &DescribeSessionPolicyOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "SP")
    }

    #[test]
    fn test_timeout_bounds() {
        let opts = CreateSessionPolicyRequest::new(id())
            .with_session_idle_timeout_mins(4)
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::InvalidValue)
        );
        let opts = CreateSessionPolicyRequest::new(id())
            .with_session_idle_timeout_mins(240)
            .with_session_ui_idle_timeout_mins(5)
            .to_options();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_alter_exactly_one_action() {
        let opts = AlterSessionPolicyRequest::new(id())
            .with_set(SessionPolicySet::default().with_comment("c"))
            .with_unset(SessionPolicyUnset::default().with_comment(true))
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::ExactlyOneOf)
        );
    }
}
