//! Current-session context: `USE ...` and `ALTER SESSION`.

use crate::common::{Like, Parameter, ParameterRow};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier};
use crate::objects::account::{
    ParameterAssignment, ParameterScope, ShowParametersOptions, check_parameter_names,
};
use crate::objects::database::UseDatabaseOptions;
use crate::objects::role::UseRoleOptions;
use crate::objects::schema::UseSchemaOptions;
use crate::validation::{Errors, Validate};

target_only!(UseWarehouseOptions, "USE WAREHOUSE", AccountObjectIdentifier);

/// `USE SECONDARY ROLES ALL | NONE | <role>, ...`
#[derive(Debug, Clone, PartialEq)]
pub enum UseSecondaryRolesOptions {
    All,
    None,
    Roles(Vec<AccountObjectIdentifier>),
}

impl Validate for UseSecondaryRolesOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("UseSecondaryRolesOptions");
        if let UseSecondaryRolesOptions::Roles(roles) = self {
            errors.required("Roles", roles);
            errors.identifiers("Roles", roles);
        }
        errors.finish()
    }
}

/// `ALTER SESSION SET ... | UNSET ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterSessionOptions {
    pub set: Vec<ParameterAssignment>,
    pub unset: Vec<String>,
}

impl Validate for AlterSessionOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterSessionOptions");
        errors.exactly_one_of(&["Set", "Unset"], &[&self.set, &self.unset]);
        check_parameter_names(&mut errors, "Set", self.set.iter().map(|p| p.name.as_str()));
        check_parameter_names(&mut errors, "Unset", self.unset.iter().map(String::as_str));
        errors.finish()
    }
}

request! {
    AlterSessionRequest => AlterSessionOptions {
        vec set: ParameterAssignment,
        vec unset: String,
    }
}

impl AlterSessionRequest {
    pub fn new() -> Self {
        Self {
            options: AlterSessionOptions::default(),
        }
    }
}

impl Default for AlterSessionRequest {
    fn default() -> Self {
        Self::new()
    }
}

gateway!(Sessions);

impl Sessions<'_> {
    pub async fn use_warehouse(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .exec("use warehouse", &UseWarehouseOptions::new(id.clone()))
            .await
    }

    pub async fn use_database(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .exec("use database", &UseDatabaseOptions::new(id.clone()))
            .await
    }

    pub async fn use_schema(&self, id: &DatabaseObjectIdentifier) -> Result<()> {
        self.client
            .exec("use schema", &UseSchemaOptions::new(id.clone()))
            .await
    }

    pub async fn use_role(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .exec("use role", &UseRoleOptions::new(id.clone()))
            .await
    }

    pub async fn use_secondary_roles(&self, roles: &UseSecondaryRolesOptions) -> Result<()> {
        self.client.exec("use secondary roles", roles).await
    }

    pub async fn alter(&self, request: &AlterSessionRequest) -> Result<()> {
        self.client.exec("alter session", &request.to_options()).await
    }

    pub async fn show_parameters(&self, like: Option<Like>) -> Result<Vec<Parameter>> {
        let options = ShowParametersOptions {
            like,
            scope: Some(ParameterScope::Session),
        };
        self.client
            .query::<_, ParameterRow, _>("show session parameters", &options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_secondary_roles_need_names() {
        let opts = UseSecondaryRolesOptions::Roles(vec![]);
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
        assert!(UseSecondaryRolesOptions::All.validate().is_ok());
    }

    #[test]
    fn test_alter_session_set_or_unset() {
        let both = AlterSessionRequest::new()
            .with_set([ParameterAssignment::new("QUERY_TAG", "etl")])
            .with_unset(["TIMEZONE".to_string()])
            .to_options();
        assert_eq!(both.validate().unwrap_err().kind(), Some(ErrorKind::ExactlyOneOf));
    }
}
