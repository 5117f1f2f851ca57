//! Error taxonomy for the request pipeline.
//!
//! Every failure the SDK reports is exactly one [`ErrorKind`]. Validators
//! collect several errors and return them together as [`Error::Multiple`],
//! in the order they were found.

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by a [`Driver`](crate::driver::Driver).
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NilOptions,
    InvalidObjectIdentifier,
    MissingRequiredField,
    ExactlyOneOf,
    AtLeastOneOf,
    MoreThanOneOf,
    InvalidValue,
    PatternRequiredForLike,
    ScopeRequiredForIn,
    Wire,
    NotFound,
    Config,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{structure}: options must be provided")]
    NilOptions { structure: &'static str },

    #[error("{structure}.{field}: invalid object identifier")]
    InvalidObjectIdentifier {
        structure: &'static str,
        field: &'static str,
    },

    #[error("{structure}.{field} is required")]
    MissingRequiredField {
        structure: &'static str,
        field: &'static str,
    },

    #[error("{structure}: exactly one of {} must be set", FieldList(.fields))]
    ExactlyOneOf {
        structure: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{structure}: at least one of {} must be set", FieldList(.fields))]
    AtLeastOneOf {
        structure: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{structure}: fields {} are incompatible and cannot be set at the same time", FieldList(.fields))]
    MoreThanOneOf {
        structure: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{structure}.{field}: {reason}")]
    InvalidValue {
        structure: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("{structure}: pattern must be specified for LIKE")]
    PatternRequiredForLike { structure: &'static str },

    #[error("{structure}: exactly one scope of ACCOUNT, DATABASE or SCHEMA must be set for IN")]
    ScopeRequiredForIn { structure: &'static str },

    #[error("{operation}: {source}")]
    Wire {
        operation: String,
        #[source]
        source: DriverError,
    },

    #[error("{kind} {identifier} not found")]
    NotFound {
        kind: &'static str,
        identifier: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}", .0.iter().join("\n"))]
    Multiple(Vec<Error>),
}

struct FieldList<'a>(&'a [&'static str]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}

impl Error {
    pub fn nil_options(structure: &'static str) -> Self {
        Self::NilOptions { structure }
    }

    pub fn invalid_identifier(structure: &'static str, field: &'static str) -> Self {
        Self::InvalidObjectIdentifier { structure, field }
    }

    pub fn missing_required(structure: &'static str, field: &'static str) -> Self {
        Self::MissingRequiredField { structure, field }
    }

    pub fn exactly_one_of(structure: &'static str, fields: &[&'static str]) -> Self {
        Self::ExactlyOneOf {
            structure,
            fields: fields.to_vec(),
        }
    }

    pub fn at_least_one_of(structure: &'static str, fields: &[&'static str]) -> Self {
        Self::AtLeastOneOf {
            structure,
            fields: fields.to_vec(),
        }
    }

    pub fn more_than_one_of(structure: &'static str, fields: &[&'static str]) -> Self {
        Self::MoreThanOneOf {
            structure,
            fields: fields.to_vec(),
        }
    }

    pub fn invalid_value(
        structure: &'static str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            structure,
            field,
            reason: reason.into(),
        }
    }

    pub fn wire(operation: impl Into<String>, source: impl Into<DriverError>) -> Self {
        Self::Wire {
            operation: operation.into(),
            source: source.into(),
        }
    }

    pub fn not_found(kind: &'static str, identifier: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            identifier: identifier.to_string(),
        }
    }

    /// The taxonomy kind of a single error. Joined errors have no single kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        let kind = match self {
            Self::NilOptions { .. } => ErrorKind::NilOptions,
            Self::InvalidObjectIdentifier { .. } => ErrorKind::InvalidObjectIdentifier,
            Self::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Self::ExactlyOneOf { .. } => ErrorKind::ExactlyOneOf,
            Self::AtLeastOneOf { .. } => ErrorKind::AtLeastOneOf,
            Self::MoreThanOneOf { .. } => ErrorKind::MoreThanOneOf,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::PatternRequiredForLike { .. } => ErrorKind::PatternRequiredForLike,
            Self::ScopeRequiredForIn { .. } => ErrorKind::ScopeRequiredForIn,
            Self::Wire { .. } => ErrorKind::Wire,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Config,
            Self::Multiple(_) => return None,
        };
        Some(kind)
    }

    /// Kinds of every leaf error, flattened in order.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.leaves().into_iter().filter_map(Error::kind).collect()
    }

    /// Every non-joined error, flattened in order.
    pub fn leaves(&self) -> Vec<&Error> {
        match self {
            Self::Multiple(errors) => errors.iter().flat_map(Error::leaves).collect(),
            other => vec![other],
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Joins errors in order; a single error is returned as is.
    pub fn join(mut errors: Vec<Error>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_flattens_kinds_in_order() {
        let error = Error::join(vec![
            Error::invalid_identifier("CreateRoleOptions", "name"),
            Error::Multiple(vec![
                Error::exactly_one_of("CreateRoleOptions", &["OrReplace", "IfNotExists"]),
                Error::at_least_one_of("RoleSet", &["Comment"]),
            ]),
        ])
        .unwrap();

        assert_eq!(error.kind(), None);
        assert_eq!(
            error.kinds(),
            vec![
                ErrorKind::InvalidObjectIdentifier,
                ErrorKind::ExactlyOneOf,
                ErrorKind::AtLeastOneOf
            ]
        );
    }

    #[test]
    fn test_join_single_and_empty() {
        assert!(Error::join(vec![]).is_none());
        let single = Error::join(vec![Error::missing_required("X", "y")]).unwrap();
        assert_eq!(single.kind(), Some(ErrorKind::MissingRequiredField));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::exactly_one_of("CreateRoleOptions", &["OrReplace", "IfNotExists"]).to_string(),
            "CreateRoleOptions: exactly one of [OrReplace IfNotExists] must be set"
        );
        assert_eq!(
            Error::wire("create warehouse", "connection reset").to_string(),
            "create warehouse: connection reset"
        );
        assert_eq!(
            Error::not_found("warehouse", "\"WH\"").to_string(),
            "warehouse \"WH\" not found"
        );
    }
}
