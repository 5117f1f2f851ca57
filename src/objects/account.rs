//! Account-level parameters and policies of the current account.

use crate::common::{Like, Parameter, ParameterRow, TagAssociation};
use crate::error::{Error, Result};
use crate::identifiers::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier,
};
use crate::validation::{Errors, Validate, flag};

/// A literal parameter value. `Text` renders single-quoted, `Keyword` bare.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    Number(i64),
    Text(String),
    Keyword(String),
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

/// `<NAME> = <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterAssignment {
    pub name: String,
    pub value: ParameterValue,
}

impl ParameterAssignment {
    pub fn new(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn keyword(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Keyword(value.into()),
        }
    }
}

fn is_parameter_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn check_parameter_names<'a>(
    errors: &mut Errors,
    field: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) {
    let structure = errors.structure();
    for name in names {
        errors.check(is_parameter_name(name), || {
            Error::invalid_value(structure, field, format!("invalid parameter name {name:?}"))
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountSet {
    pub parameters: Vec<ParameterAssignment>,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub password_policy: Option<SchemaObjectIdentifier>,
    pub session_policy: Option<SchemaObjectIdentifier>,
    pub authentication_policy: Option<SchemaObjectIdentifier>,
}

setters!(AccountSet {
    vec parameters: ParameterAssignment,
    opt resource_monitor: AccountObjectIdentifier,
    opt password_policy: SchemaObjectIdentifier,
    opt session_policy: SchemaObjectIdentifier,
    opt authentication_policy: SchemaObjectIdentifier,
});

impl Validate for AccountSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AccountSet");
        errors.exactly_one_of(
            &[
                "Parameters",
                "ResourceMonitor",
                "PasswordPolicy",
                "SessionPolicy",
                "AuthenticationPolicy",
            ],
            &[
                &self.parameters,
                &self.resource_monitor,
                &self.password_policy,
                &self.session_policy,
                &self.authentication_policy,
            ],
        );
        check_parameter_names(
            &mut errors,
            "Parameters",
            self.parameters.iter().map(|p| p.name.as_str()),
        );
        errors.optional_identifier("ResourceMonitor", self.resource_monitor.as_ref());
        errors.optional_identifier("PasswordPolicy", self.password_policy.as_ref());
        errors.optional_identifier("SessionPolicy", self.session_policy.as_ref());
        errors.optional_identifier("AuthenticationPolicy", self.authentication_policy.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountUnset {
    pub parameters: Vec<String>,
    pub password_policy: bool,
    pub session_policy: bool,
    pub authentication_policy: bool,
}

setters!(AccountUnset {
    vec parameters: String,
    flag password_policy,
    flag session_policy,
    flag authentication_policy,
});

impl Validate for AccountUnset {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AccountUnset");
        errors.exactly_one_of(
            &[
                "Parameters",
                "PasswordPolicy",
                "SessionPolicy",
                "AuthenticationPolicy",
            ],
            &[
                &self.parameters,
                &flag(self.password_policy),
                &flag(self.session_policy),
                &flag(self.authentication_policy),
            ],
        );
        check_parameter_names(
            &mut errors,
            "Parameters",
            self.parameters.iter().map(String::as_str),
        );
        errors.finish()
    }
}

/// `ALTER ACCOUNT [<name>] SET | UNSET | SET TAG | UNSET TAG ...`
///
/// `name` targets another account of the organization; leave it unset for
/// the current account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterAccountOptions {
    pub name: Option<AccountObjectIdentifier>,
    pub set: Option<AccountSet>,
    pub unset: Option<AccountUnset>,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl Validate for AlterAccountOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterAccountOptions");
        errors.optional_identifier("name", self.name.as_ref());
        errors.exactly_one_of(
            &["Set", "Unset", "SetTag", "UnsetTag"],
            &[&self.set, &self.unset, &self.set_tag, &self.unset_tag],
        );
        errors.nested(self.set.as_ref());
        errors.nested(self.unset.as_ref());
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

request! {
    AlterAccountRequest => AlterAccountOptions {
        opt name: AccountObjectIdentifier,
        val set: AccountSet,
        val unset: AccountUnset,
        vec set_tag: TagAssociation,
        vec unset_tag: SchemaObjectIdentifier,
    }
}

impl AlterAccountRequest {
    pub fn new() -> Self {
        Self {
            options: AlterAccountOptions::default(),
        }
    }
}

impl Default for AlterAccountRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Where `SHOW PARAMETERS` looks.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterScope {
    Account,
    Session,
    User(AccountObjectIdentifier),
    Warehouse(AccountObjectIdentifier),
    Database(AccountObjectIdentifier),
    Schema(DatabaseObjectIdentifier),
    Task(SchemaObjectIdentifier),
    Table(SchemaObjectIdentifier),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowParametersOptions {
    pub like: Option<Like>,
    pub scope: Option<ParameterScope>,
}

impl Validate for ShowParametersOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("ShowParametersOptions");
        errors.like(self.like.as_ref());
        match &self.scope {
            Some(ParameterScope::User(id))
            | Some(ParameterScope::Warehouse(id))
            | Some(ParameterScope::Database(id)) => errors.identifier("In", id),
            Some(ParameterScope::Schema(id)) => errors.identifier("In", id),
            Some(ParameterScope::Task(id)) | Some(ParameterScope::Table(id)) => {
                errors.identifier("In", id)
            }
            Some(ParameterScope::Account) | Some(ParameterScope::Session) | None => {}
        }
        errors.finish()
    }
}

request! {
    ShowParametersRequest => ShowParametersOptions {
        val like: Like,
        val scope: ParameterScope,
    }
}

impl ShowParametersRequest {
    pub fn new() -> Self {
        Self {
            options: ShowParametersOptions::default(),
        }
    }
}

impl Default for ShowParametersRequest {
    fn default() -> Self {
        Self::new()
    }
}

gateway!(Accounts);

impl Accounts<'_> {
    pub async fn alter(&self, request: &AlterAccountRequest) -> Result<()> {
        self.client.exec("alter account", &request.to_options()).await
    }

    /// `SHOW PARAMETERS ... IN ACCOUNT`
    pub async fn show_parameters(&self, like: Option<Like>) -> Result<Vec<Parameter>> {
        let options = ShowParametersOptions {
            like,
            scope: Some(ParameterScope::Account),
        };
        self.client
            .query::<_, ParameterRow, _>("show account parameters", &options)
            .await
    }

    /// `SHOW PARAMETERS` with any scope.
    pub async fn show_parameters_in(&self, request: &ShowParametersRequest) -> Result<Vec<Parameter>> {
        self.client
            .query::<_, ParameterRow, _>("show parameters", &request.to_options())
            .await
    }
}
