//! Masking policies: column-level expressions that rewrite values per role.

use crate::common::{In, Like, LimitFrom};
use crate::datatypes::DataType;
use crate::error::Result;
use crate::identifiers::SchemaObjectIdentifier;
use crate::objects::policy::{PolicyArgument, PolicyBody, PolicyBodyRow};
use crate::validation::{Errors, Validate};

/// `CREATE MASKING POLICY ... AS (<signature>) RETURNS <type> -> <body>`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMaskingPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub signature: Vec<PolicyArgument>,
    pub returns: DataType,
    pub body: String,
    pub comment: Option<String>,
    pub exempt_other_policies: Option<bool>,
}

impl Validate for CreateMaskingPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateMaskingPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Signature", &self.signature);
        errors.required("Body", &self.body);
        errors.finish()
    }
}

request! {
    CreateMaskingPolicyRequest => CreateMaskingPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
        val exempt_other_policies: bool,
    }
}

impl CreateMaskingPolicyRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        signature: impl IntoIterator<Item = PolicyArgument>,
        returns: impl Into<DataType>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            options: CreateMaskingPolicyOptions {
                or_replace: false,
                if_not_exists: false,
                name,
                signature: signature.into_iter().collect(),
                returns: returns.into(),
                body: body.into(),
                comment: None,
                exempt_other_policies: None,
            },
        }
    }
}

alter_body_policy!(
    Masking,
    AlterMaskingPolicyOptions,
    AlterMaskingPolicyRequest,
    "MASKING POLICY"
);

drop_object!(
    DropMaskingPolicyOptions,
    DropMaskingPolicyRequest,
    "MASKING POLICY",
    SchemaObjectIdentifier
);

target_only!(
    DescribeMaskingPolicyOptions,
    "DESCRIBE MASKING POLICY",
    SchemaObjectIdentifier
);

show_objects!(ShowMaskingPolicyOptions, ShowMaskingPolicyRequest, "MASKING POLICIES" {
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

policy_gateway!(
    MaskingPolicies,
    "masking policy",
    "masking policies",
    CreateMaskingPolicyRequest,
    AlterMaskingPolicyRequest,
    DropMaskingPolicyRequest,
    ShowMaskingPolicyRequest
);

impl MaskingPolicies<'_> {
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<PolicyBody> {
        self.client
            .query_one::<_, PolicyBodyRow, _>(
                "describe masking policy",
                "masking policy",
                id,
                &DescribeMaskingPolicyOptions::new(id.clone()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TagAssociation;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "MP")
    }

    #[test]
    fn test_create_requires_signature_and_body() {
        let opts = CreateMaskingPolicyRequest::new(id(), Vec::new(), DataType::Varchar, "").to_options();
        assert_eq!(
            opts.validate().unwrap_err().kinds(),
            vec![ErrorKind::MissingRequiredField, ErrorKind::MissingRequiredField]
        );
    }

    #[test]
    fn test_alter_single_action() {
        let opts = AlterMaskingPolicyRequest::new(id())
            .with_set_body("'***'")
            .with_unset_comment(true)
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::ExactlyOneOf)
        );
        assert!(
            AlterMaskingPolicyRequest::new(id())
                .with_set_body("'***'")
                .to_options()
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_alter_if_exists_with_unset_tag() {
        let opts = AlterMaskingPolicyRequest::new(id())
            .with_if_exists(true)
            .with_unset_tag([SchemaObjectIdentifier::new("DB", "S", "T")])
            .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MoreThanOneOf)
        );
        let set = AlterMaskingPolicyRequest::new(id())
            .with_if_exists(true)
            .with_set_tag([TagAssociation::new(
                SchemaObjectIdentifier::new("DB", "S", "T"),
                "v",
            )])
            .to_options();
        assert!(set.validate().is_ok());
    }
}
