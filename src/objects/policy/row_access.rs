//! Row access policies: boolean expressions deciding which rows a role sees.

use crate::common::{In, Like, LimitFrom};
use crate::error::Result;
use crate::identifiers::SchemaObjectIdentifier;
use crate::objects::policy::{PolicyArgument, PolicyBody, PolicyBodyRow};
use crate::validation::{Errors, Validate};

/// `CREATE ROW ACCESS POLICY ... AS (<args>) RETURNS BOOLEAN -> <body>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRowAccessPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub args: Vec<PolicyArgument>,
    pub body: String,
    pub comment: Option<String>,
}

impl Validate for CreateRowAccessPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateRowAccessPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Args", &self.args);
        errors.required("Body", &self.body);
        errors.finish()
    }
}

request! {
    CreateRowAccessPolicyRequest => CreateRowAccessPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreateRowAccessPolicyRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        args: impl IntoIterator<Item = PolicyArgument>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            options: CreateRowAccessPolicyOptions {
                name,
                args: args.into_iter().collect(),
                body: body.into(),
                ..Default::default()
            },
        }
    }
}

alter_body_policy!(
    RowAccess,
    AlterRowAccessPolicyOptions,
    AlterRowAccessPolicyRequest,
    "ROW ACCESS POLICY"
);

drop_object!(
    DropRowAccessPolicyOptions,
    DropRowAccessPolicyRequest,
    "ROW ACCESS POLICY",
    SchemaObjectIdentifier
);

target_only!(
    DescribeRowAccessPolicyOptions,
    "DESCRIBE ROW ACCESS POLICY",
    SchemaObjectIdentifier
);

show_objects!(ShowRowAccessPolicyOptions, ShowRowAccessPolicyRequest, "ROW ACCESS POLICIES" {
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

policy_gateway!(
    RowAccessPolicies,
    "row access policy",
    "row access policies",
    CreateRowAccessPolicyRequest,
    AlterRowAccessPolicyRequest,
    DropRowAccessPolicyRequest,
    ShowRowAccessPolicyRequest
);

impl RowAccessPolicies<'_> {
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<PolicyBody> {
        self.client
            .query_one::<_, PolicyBodyRow, _>(
                "describe row access policy",
                "row access policy",
                id,
                &DescribeRowAccessPolicyOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::DataType;
    use crate::decode::{FromRow, Row};
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "RAP")
    }

    #[test]
    fn test_create_requires_args() {
        let opts = CreateRowAccessPolicyRequest::new(id(), Vec::new(), "TRUE").to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_alter_rename_validates_target() {
        let opts = AlterRowAccessPolicyRequest::new(id())
            .with_rename_to(SchemaObjectIdentifier::new("DB", "S", ""))
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::InvalidObjectIdentifier)
        );
    }

    #[test]
    fn test_describe_row() {
        let row = Row::new([
            ("name", Some("RAP")),
            ("signature", Some("(REGION VARCHAR)")),
            ("return_type", Some("BOOLEAN")),
            ("body", Some("REGION = 'EU'")),
        ]);
        let body = PolicyBody::from(PolicyBodyRow::from_row(&row).unwrap());
        assert_eq!(body.signature, vec![PolicyArgument::new("REGION", "VARCHAR")]);
        assert_eq!(body.return_type, DataType::Boolean);
        assert_eq!(body.body, "REGION = 'EU'");
    }
}
