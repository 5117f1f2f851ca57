//! Aggregation policies: minimum group sizes enforced on aggregate queries.

use crate::common::{In, Like, LimitFrom};
use crate::error::Result;
use crate::identifiers::SchemaObjectIdentifier;
use crate::objects::policy::{PolicyBody, PolicyBodyRow};
use crate::validation::{Errors, Validate};

/// `CREATE AGGREGATION POLICY ... AS () RETURNS AGGREGATION_CONSTRAINT -> <body>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAggregationPolicyOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub body: String,
    pub comment: Option<String>,
}

impl Validate for CreateAggregationPolicyOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateAggregationPolicyOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("Body", &self.body);
        errors.finish()
    }
}

request! {
    CreateAggregationPolicyRequest => CreateAggregationPolicyOptions {
        flag or_replace,
        flag if_not_exists,
        opt comment: String,
    }
}

impl CreateAggregationPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier, body: impl Into<String>) -> Self {
        Self {
            options: CreateAggregationPolicyOptions {
                name,
                body: body.into(),
                ..Default::default()
            },
        }
    }
}

alter_body_policy!(
    Aggregation,
    AlterAggregationPolicyOptions,
    AlterAggregationPolicyRequest,
    "AGGREGATION POLICY"
);

drop_object!(
    DropAggregationPolicyOptions,
    DropAggregationPolicyRequest,
    "AGGREGATION POLICY",
    SchemaObjectIdentifier
);

target_only!(
    DescribeAggregationPolicyOptions,
    "DESCRIBE AGGREGATION POLICY",
    SchemaObjectIdentifier
);

show_objects!(ShowAggregationPolicyOptions, ShowAggregationPolicyRequest, "AGGREGATION POLICIES" {
    val like: Like,
    val in_scope: In,
    val limit: LimitFrom,
});

policy_gateway!(
    AggregationPolicies,
    "aggregation policy",
    "aggregation policies",
    CreateAggregationPolicyRequest,
    AlterAggregationPolicyRequest,
    DropAggregationPolicyRequest,
    ShowAggregationPolicyRequest
);

impl AggregationPolicies<'_> {
    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<PolicyBody> {
        self.client
            .query_one::<_, PolicyBodyRow, _>(
                "describe aggregation policy",
                "aggregation policy",
                id,
                &DescribeAggregationPolicyOptions::new(id.clone()),
            )
            .await
    }
}
