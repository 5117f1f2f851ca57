//! Schema-level policies.
//!
//! Masking, row access, projection and aggregation policies carry an
//! expression body and share their `ALTER` surface. Password, session and
//! authentication policies are property bags. All seven list through the same
//! `SHOW ... POLICIES` row shape.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::TagAssociation;
use crate::datatypes::{DataType, split_top_level};
use crate::decode::{DecodeError, FromRow, Row};
use crate::error::Result;
use crate::identifiers::SchemaObjectIdentifier;
use crate::validation::{Errors, Validate, flag};

/// Gateway methods every policy kind shares; `describe` is added per kind.
macro_rules! policy_gateway {
    (
        $gateway:ident,
        $kind:literal,
        $plural:literal,
        $create:ty,
        $alter:ty,
        $drop:ty,
        $show:ident
    ) => {
        gateway!($gateway);

        impl $gateway<'_> {
            pub async fn create(&self, request: &$create) -> $crate::error::Result<()> {
                self.client
                    .exec(concat!("create ", $kind), &request.to_options())
                    .await
            }

            pub async fn alter(&self, request: &$alter) -> $crate::error::Result<()> {
                self.client
                    .exec(concat!("alter ", $kind), &request.to_options())
                    .await
            }

            pub async fn drop(&self, request: &$drop) -> $crate::error::Result<()> {
                self.client
                    .exec(concat!("drop ", $kind), &request.to_options())
                    .await
            }

            pub async fn show(
                &self,
                request: &$show,
            ) -> $crate::error::Result<Vec<$crate::objects::policy::Policy>> {
                self.client
                    .query::<_, $crate::objects::policy::PolicyRow, _>(
                        concat!("show ", $plural),
                        &request.to_options(),
                    )
                    .await
            }

            pub async fn show_by_id(
                &self,
                id: &$crate::identifiers::SchemaObjectIdentifier,
            ) -> $crate::error::Result<$crate::objects::policy::Policy> {
                use $crate::identifiers::Identifier;
                let request = $show::new()
                    .with_like($crate::common::Like::new(id.name()))
                    .with_in_scope($crate::common::In::schema(id.schema_id()));
                $crate::client::find_by_id(
                    self.show(&request).await?,
                    $kind,
                    id,
                    $crate::objects::policy::Policy::id,
                )
            }
        }
    };
}

/// `<name> <type>` in a masking or row access policy signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyArgument {
    pub name: String,
    pub data_type: DataType,
}

impl PolicyArgument {
    pub fn new(name: impl Into<String>, data_type: impl Into<DataType>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Parses a described signature such as `(VAL VARCHAR, REGION VARCHAR)`.
pub fn parse_policy_signature(raw: &str) -> Vec<PolicyArgument> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    split_top_level(inner, ',')
        .into_iter()
        .map(str::trim)
        .filter_map(|argument| argument.split_once(' '))
        .map(|(name, data_type)| PolicyArgument::new(name.trim_matches('"'), data_type))
        .collect()
}

/// The statement keyword of a policy kind with an expression body.
pub trait BodyPolicyKind {
    const KEYWORD: &'static str;
    const ALTER_STRUCTURE: &'static str;
}

/// `ALTER <kind> POLICY` for the expression-bodied kinds; exactly one action.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterBodyPolicyOptions<K> {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set_body: Option<String>,
    pub set_comment: Option<String>,
    pub unset_comment: bool,
    pub set_tag: Vec<TagAssociation>,
    pub unset_tag: Vec<SchemaObjectIdentifier>,
    pub(crate) kind: PhantomData<K>,
}

impl<K> Default for AlterBodyPolicyOptions<K> {
    fn default() -> Self {
        Self {
            if_exists: false,
            name: SchemaObjectIdentifier::default(),
            rename_to: None,
            set_body: None,
            set_comment: None,
            unset_comment: false,
            set_tag: Vec::new(),
            unset_tag: Vec::new(),
            kind: PhantomData,
        }
    }
}

impl<K: BodyPolicyKind> Validate for AlterBodyPolicyOptions<K> {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new(K::ALTER_STRUCTURE);
        errors.identifier("name", &self.name);
        errors.optional_identifier("RenameTo", self.rename_to.as_ref());
        errors.exactly_one_of(
            &["RenameTo", "SetBody", "SetComment", "UnsetComment", "SetTag", "UnsetTag"],
            &[
                &self.rename_to,
                &self.set_body,
                &self.set_comment,
                &flag(self.unset_comment),
                &self.set_tag,
                &self.unset_tag,
            ],
        );
        errors.if_exists_unset_tags(self.if_exists, &self.unset_tag);
        errors.tags(&self.set_tag);
        errors.identifiers("UnsetTag", &self.unset_tag);
        errors.finish()
    }
}

/// Declares the request type for one [`AlterBodyPolicyOptions`] kind.
macro_rules! alter_body_policy {
    ($kind:ident, $options:ident, $request:ident, $keyword:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $kind;

        impl $crate::objects::policy::BodyPolicyKind for $kind {
            const KEYWORD: &'static str = $keyword;
            const ALTER_STRUCTURE: &'static str = stringify!($options);
        }

        pub type $options = $crate::objects::policy::AlterBodyPolicyOptions<$kind>;

        request! {
            $request => $options {
                flag if_exists,
                val rename_to: $crate::identifiers::SchemaObjectIdentifier,
                opt set_body: String,
                opt set_comment: String,
                flag unset_comment,
                vec set_tag: $crate::common::TagAssociation,
                vec unset_tag: $crate::identifiers::SchemaObjectIdentifier,
            }
        }

        impl $request {
            pub fn new(name: $crate::identifiers::SchemaObjectIdentifier) -> Self {
                Self {
                    options: $options {
                        name,
                        ..Default::default()
                    },
                }
            }
        }
    };
}

pub mod aggregation;
pub mod authentication;
pub mod masking;
pub mod password;
pub mod projection;
pub mod row_access;
pub mod session;

/// One `SHOW ... POLICIES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub owner_role_type: Option<String>,
    pub options: Option<String>,
}

impl FromRow for PolicyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            kind: row.opt("kind"),
            owner: row.opt("owner"),
            comment: row.opt("comment"),
            owner_role_type: row.opt("owner_role_type"),
            options: row.opt("options"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: String,
    pub owner: String,
    pub comment: String,
    pub owner_role_type: String,
    pub exempt_other_policies: bool,
}

impl From<PolicyRow> for Policy {
    fn from(row: PolicyRow) -> Self {
        // `options` is a JSON object; only masking policies populate it.
        let exempt_other_policies = row
            .options
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
            .and_then(|value| value.get("EXEMPT_OTHER_POLICIES")?.as_bool())
            .unwrap_or(false);
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            kind: row.kind.unwrap_or_default(),
            owner: row.owner.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            owner_role_type: row.owner_role_type.unwrap_or_default(),
            exempt_other_policies,
        }
    }
}

impl Policy {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

/// One `DESCRIBE` row of an expression-bodied policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyBodyRow {
    pub name: String,
    pub signature: Option<String>,
    pub return_type: Option<String>,
    pub body: Option<String>,
}

impl FromRow for PolicyBodyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            signature: row.opt("signature"),
            return_type: row.opt("return_type"),
            body: row.opt("body"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyBody {
    pub name: String,
    pub signature: Vec<PolicyArgument>,
    pub return_type: DataType,
    pub body: String,
}

impl From<PolicyBodyRow> for PolicyBody {
    fn from(row: PolicyBodyRow) -> Self {
        Self {
            name: row.name,
            signature: row
                .signature
                .as_deref()
                .map(parse_policy_signature)
                .unwrap_or_default(),
            return_type: DataType::from(row.return_type.as_deref().unwrap_or_default()),
            body: row.body.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_signature() {
        assert_eq!(
            parse_policy_signature("(VAL VARCHAR, AMOUNT NUMBER(38, 0))"),
            vec![
                PolicyArgument::new("VAL", DataType::Varchar),
                PolicyArgument::new("AMOUNT", "NUMBER(38, 0)"),
            ]
        );
        assert!(parse_policy_signature("()").is_empty());
    }

    #[test]
    fn test_policy_row_reads_exemption() {
        let row = Row::new([
            ("name", Some("MP")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("kind", Some("MASKING_POLICY")),
            ("options", Some(r#"{"EXEMPT_OTHER_POLICIES": true}"#)),
        ]);
        let policy = Policy::from(PolicyRow::from_row(&row).unwrap());
        assert!(policy.exempt_other_policies);
        assert_eq!(policy.id(), SchemaObjectIdentifier::new("DB", "S", "MP"));

        let row = Row::new([
            ("name", Some("RAP")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("options", Some("")),
        ]);
        assert!(!Policy::from(PolicyRow::from_row(&row).unwrap()).exempt_other_policies);
    }
}
