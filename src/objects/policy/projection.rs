//! Projection policies: whether a column may appear in a query's projection.

use crate::common::{In, Like, LimitFrom};
use crate::error::Result;
use crate::identifiers::SchemaObjectIdentifier;
use crate::objects::policy::{PolicyBody, PolicyBodyRow};
use crate::validation::{Errors, Validate};

/// `CREATE PROJECTION POLICY ... AS () RETURNS PROJECTION_CONSTRAINT -> <body>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateProjectionPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub body: String,
    pub comment: Option<String>,
}

impl Validate for CreateProjectionPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateProjectionPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Body", &self.body);
        errors.finish()
    }
}

request! {
    CreateProjectionPolicyRequest => CreateProjectionPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreateProjectionPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier, body: impl Into<String>) -> Self {
        Self {
            options: CreateProjectionPolicyOptions {
                name,
                body: body.into(),
                ..Default::default()
            },
        }
    }
}

alter_body_policy!(
    Projection,
    AlterProjectionPolicyOptions,
    AlterProjectionPolicyRequest,
    "PROJECTION POLICY"
);

drop_object!(
    DropProjectionPolicyOptions,
    DropProjectionPolicyRequest,
    "PROJECTION POLICY",
    SchemaObjectIdentifier
);

target_only!(
    DescribeProjectionPolicyOptions,
    "DESCRIBE PROJECTION POLICY",
    SchemaObjectIdentifier
);

show_objects!(ShowProjectionPolicyOptions, ShowProjectionPolicyRequest, "PROJECTION POLICIES" {
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

policy_gateway!(
    ProjectionPolicies,
    "projection policy",
    "projection policies",
    CreateProjectionPolicyRequest,
    AlterProjectionPolicyRequest,
    DropProjectionPolicyRequest,
    ShowProjectionPolicyRequest
);

impl ProjectionPolicies<'_> {
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<PolicyBody> {
        self.client
            .query_one::<_, PolicyBodyRow, _>(
                "describe projection policy",
                "projection policy",
                id,
                &DescribeProjectionPolicyOptions::new(id.clone()),
            )
            .await
    }
}
