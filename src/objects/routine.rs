//! Pieces shared by user-defined functions and stored procedures.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::datatypes::{DataType, parse_data_types};
use crate::error::Error;
use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{Errors, IsSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum RoutineLanguage {
    Java,
    Javascript,
    Python,
    Scala,
    #[default]
    Sql,
}

/// `<name> <type> [DEFAULT <expr>]`
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineArgument {
    pub name: String,
    pub data_type: DataType,
    pub default: Option<String>,
}

impl RoutineArgument {
    pub fn new(name: impl Into<String>, data_type: impl Into<DataType>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, expression: impl Into<String>) -> Self {
        self.default = Some(expression.into());
        self
    }
}

/// One output column of a table routine.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnColumn {
    pub name: String,
    pub data_type: DataType,
}

impl ReturnColumn {
    pub fn new(name: impl Into<String>, data_type: impl Into<DataType>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// `RETURNS <type> [NOT NULL]` or `RETURNS TABLE (...)`.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutineReturns {
    Value { data_type: DataType, not_null: bool },
    Table(Vec<ReturnColumn>),
}

impl RoutineReturns {
    pub fn value(data_type: impl Into<DataType>) -> Self {
        RoutineReturns::Value {
            data_type: data_type.into(),
            not_null: false,
        }
    }

    pub fn table(columns: impl IntoIterator<Item = ReturnColumn>) -> Self {
        RoutineReturns::Table(columns.into_iter().collect())
    }
}

/// `'<variable>' = <secret>` inside `SECRETS = (...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretReference {
    pub variable: String,
    pub secret: SchemaObjectIdentifier,
}

/// Language-dependent body and runtime settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutineImplementation {
    pub runtime_version: Option<String>,
    pub imports: Vec<String>,
    pub packages: Vec<String>,
    pub handler: Option<String>,
    pub external_access_integrations: Vec<AccountObjectIdentifier>,
    pub secrets: Vec<SecretReference>,
    pub target_path: Option<String>,
    pub definition: Option<String>,
}

setters!(RoutineImplementation {
    opt runtime_version: String,
    vec imports: String,
    vec packages: String,
    opt handler: String,
    vec external_access_integrations: AccountObjectIdentifier,
    vec secrets: SecretReference,
    opt target_path: String,
    opt definition: String,
});

impl RoutineImplementation {
    /// Language-specific requirements; errors are attributed to `structure`.
    pub(crate) fn check(
        &self,
        errors: &mut Errors,
        structure: &'static str,
        language: RoutineLanguage,
    ) {
        let needs_handler = matches!(
            language,
            RoutineLanguage::Java | RoutineLanguage::Python | RoutineLanguage::Scala
        );
        if needs_handler {
            errors.check(self.handler.is_set(), || {
                Error::missing_required(structure, "Handler")
            });
        } else {
            errors.check(self.definition.is_set(), || {
                Error::missing_required(structure, "FunctionDefinition")
            });
            let foreign = [
                ("Handler", self.handler.is_set()),
                ("RuntimeVersion", self.runtime_version.is_set()),
                ("Imports", self.imports.is_set()),
                ("Packages", self.packages.is_set()),
                ("TargetPath", self.target_path.is_set()),
            ];
            for (field, set) in foreign {
                errors.check(!set, || {
                    Error::invalid_value(structure, field, format!("not supported for {language}"))
                });
            }
        }
        if matches!(language, RoutineLanguage::Python | RoutineLanguage::Scala) {
            errors.check(self.runtime_version.is_set(), || {
                Error::missing_required(structure, "RuntimeVersion")
            });
        }
        errors.check(
            self.target_path.is_none() || self.definition.is_some(),
            || Error::invalid_value(structure, "TargetPath", "requires an inline definition"),
        );
        errors.identifiers("ExternalAccessIntegrations", &self.external_access_integrations);
        for secret in &self.secrets {
            errors.identifier("Secrets", &secret.secret);
        }
    }
}

/// Splits the `arguments` column of `SHOW FUNCTIONS` / `SHOW PROCEDURES`,
/// e.g. `F(VARCHAR, NUMBER) RETURN NUMBER`, into argument types and return type.
pub fn parse_signature(raw: &str) -> (Vec<DataType>, Option<String>) {
    let raw = raw.trim();
    let (signature, returns) = match raw.find(" RETURN ") {
        Some(at) => (&raw[..at], Some(raw[at + " RETURN ".len()..].trim().to_string())),
        None => (raw, None),
    };
    let arguments = match (signature.find('('), signature.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            let inner = &signature[open + 1..close];
            // Newer servers prefix optional arguments with DEFAULT.
            parse_data_types(inner)
                .into_iter()
                .map(|data_type| match data_type {
                    DataType::Custom(token) => match token.strip_prefix("DEFAULT ") {
                        Some(rest) => DataType::from(rest),
                        None => DataType::Custom(token),
                    },
                    other => other,
                })
                .collect()
        }
        _ => Vec::new(),
    };
    (arguments, returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_signature() {
        let (args, returns) = parse_signature("F(VARCHAR, NUMBER) RETURN NUMBER");
        assert_eq!(args, vec![DataType::Varchar, DataType::Number]);
        assert_eq!(returns.as_deref(), Some("NUMBER"));

        let (args, returns) = parse_signature("P() RETURN TABLE (A NUMBER)");
        assert!(args.is_empty());
        assert_eq!(returns.as_deref(), Some("TABLE (A NUMBER)"));

        let (args, _) = parse_signature("F(VARCHAR, DEFAULT NUMBER) RETURN VARCHAR");
        assert_eq!(args, vec![DataType::Varchar, DataType::Number]);
    }

    #[test]
    fn test_python_needs_runtime_and_handler() {
        let mut errors = Errors::new("CreateFunctionOptions");
        RoutineImplementation::default().check(
            &mut errors,
            "CreateFunctionOptions",
            RoutineLanguage::Python,
        );
        let err = errors.finish().unwrap_err();
        assert_eq!(
            err.kinds(),
            vec![ErrorKind::MissingRequiredField, ErrorKind::MissingRequiredField]
        );
    }

    #[test]
    fn test_sql_rejects_handler() {
        let mut errors = Errors::new("CreateFunctionOptions");
        RoutineImplementation::default()
            .with_definition("1")
            .with_handler("h")
            .check(&mut errors, "CreateFunctionOptions", RoutineLanguage::Sql);
        assert_eq!(
            errors.finish().unwrap_err().kind(),
            Some(ErrorKind::InvalidValue)
        );
    }
}
