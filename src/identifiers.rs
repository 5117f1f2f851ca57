//! Fully-qualified names for every object tier.
//!
//! Identifiers keep their parts unquoted and case-sensitive. Rendering wraps
//! each part in double quotes (embedded quotes doubled) and joins the parts
//! with a dot. Nothing here folds case.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::datatypes::{DataType, parse_data_types};
use crate::error::{Error, Result};
use crate::render::quote_ident;

/// Maximum length of a fully-qualified name accepted by the server.
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

pub trait Identifier: fmt::Display {
    /// The innermost (object) part of the identifier.
    fn name(&self) -> &str;

    /// The canonical, quoted, dot-joined form.
    fn fully_qualified_name(&self) -> String;

    /// Every unquoted name part, outermost first. Argument types are not parts.
    fn parts(&self) -> Vec<&str>;
}

/// An identifier is valid when every name part is non-empty and its quoted
/// form is at most [`MAX_IDENTIFIER_LENGTH`] characters.
pub fn is_valid_identifier<I: Identifier + ?Sized>(id: &I) -> bool {
    if id.name().is_empty() || id.parts().iter().any(|part| part.is_empty()) {
        return false;
    }
    let length = id.fully_qualified_name().chars().count();
    (1..=MAX_IDENTIFIER_LENGTH).contains(&length)
}

macro_rules! display_as_fully_qualified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.fully_qualified_name())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

/// One part: warehouses, databases, roles, users, integrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Database-tier identifier for an object inside this database.
    pub fn database_object(&self, name: impl Into<String>) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(self.name.clone(), name)
    }
}

impl Identifier for AccountObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        quote_ident(&self.name)
    }

    fn parts(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

/// Two parts: schemas, database roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseObjectIdentifier {
    database_name: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(database_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            name: name.into(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.database_name.clone())
    }

    /// Schema-tier identifier for an object inside this schema.
    pub fn schema_object(&self, name: impl Into<String>) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(self.database_name.clone(), self.name.clone(), name)
    }
}

impl Identifier for DatabaseObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        format!(
            "{}.{}",
            quote_ident(&self.database_name),
            quote_ident(&self.name)
        )
    }

    fn parts(&self) -> Vec<&str> {
        vec![self.database_name.as_str(), self.name.as_str()]
    }
}

/// Three parts: tables, views, stages and every other schema object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaObjectIdentifier {
    database_name: String,
    schema_name: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            schema_name: schema_name.into(),
            name: name.into(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.database_name.clone())
    }

    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(self.database_name.clone(), self.schema_name.clone())
    }

    pub fn with_arguments(
        &self,
        arguments: impl IntoIterator<Item = DataType>,
    ) -> SchemaObjectIdentifierWithArguments {
        SchemaObjectIdentifierWithArguments {
            database_name: self.database_name.clone(),
            schema_name: self.schema_name.clone(),
            name: self.name.clone(),
            arguments: argument_families(arguments),
        }
    }
}

impl Identifier for SchemaObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        format!(
            "{}.{}.{}",
            quote_ident(&self.database_name),
            quote_ident(&self.schema_name),
            quote_ident(&self.name)
        )
    }

    fn parts(&self) -> Vec<&str> {
        vec![
            self.database_name.as_str(),
            self.schema_name.as_str(),
            self.name.as_str(),
        ]
    }
}

/// Argument types are stored as bare families so that equality follows the
/// rendered signature.
fn argument_families(arguments: impl IntoIterator<Item = DataType>) -> Vec<DataType> {
    arguments.into_iter().map(|argument| argument.family()).collect()
}

/// Three parts plus the ordered argument types of an overloaded routine.
///
/// An empty argument list renders as `()` and is distinct from the plain
/// [`SchemaObjectIdentifier`] with the same parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaObjectIdentifierWithArguments {
    database_name: String,
    schema_name: String,
    name: String,
    arguments: Vec<DataType>,
}

impl SchemaObjectIdentifierWithArguments {
    pub fn new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        name: impl Into<String>,
        arguments: impl IntoIterator<Item = DataType>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            schema_name: schema_name.into(),
            name: name.into(),
            arguments: argument_families(arguments),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn arguments(&self) -> &[DataType] {
        &self.arguments
    }

    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(self.database_name.clone(), self.schema_name.clone())
    }

    /// The identifier without its argument list.
    pub fn schema_object_id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(
            self.database_name.clone(),
            self.schema_name.clone(),
            self.name.clone(),
        )
    }

    /// Argument list as the server prints it: `(VARCHAR, NUMBER)`.
    pub fn arguments_signature(&self) -> String {
        format!("({})", self.arguments.iter().join(", "))
    }
}

impl Identifier for SchemaObjectIdentifierWithArguments {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        format!(
            "{}.{}.{}{}",
            quote_ident(&self.database_name),
            quote_ident(&self.schema_name),
            quote_ident(&self.name),
            self.arguments_signature()
        )
    }

    fn parts(&self) -> Vec<&str> {
        vec![
            self.database_name.as_str(),
            self.schema_name.as_str(),
            self.name.as_str(),
        ]
    }
}

/// An account, either `organization.account` or a bare account locator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountIdentifier {
    organization_name: Option<String>,
    account_name: String,
}

impl AccountIdentifier {
    pub fn new(organization_name: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            organization_name: Some(organization_name.into()),
            account_name: account_name.into(),
        }
    }

    pub fn from_locator(locator: impl Into<String>) -> Self {
        Self {
            organization_name: None,
            account_name: locator.into(),
        }
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.organization_name.as_deref()
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn is_locator(&self) -> bool {
        self.organization_name.is_none()
    }
}

impl Identifier for AccountIdentifier {
    fn name(&self) -> &str {
        &self.account_name
    }

    fn fully_qualified_name(&self) -> String {
        if self.account_name.is_empty() {
            return String::new();
        }
        match &self.organization_name {
            Some(organization) => format!(
                "{}.{}",
                quote_ident(organization),
                quote_ident(&self.account_name)
            ),
            None => quote_ident(&self.account_name),
        }
    }

    fn parts(&self) -> Vec<&str> {
        self.organization_name
            .as_deref()
            .into_iter()
            .chain([self.account_name.as_str()])
            .collect()
    }
}

/// An object that lives in another account, e.g. a share or a primary
/// database for replication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalObjectIdentifier {
    account: AccountIdentifier,
    object: Box<ObjectIdentifier>,
}

impl ExternalObjectIdentifier {
    pub fn new(account: AccountIdentifier, object: impl Into<ObjectIdentifier>) -> Self {
        Self {
            account,
            object: Box::new(object.into()),
        }
    }

    pub fn account(&self) -> &AccountIdentifier {
        &self.account
    }

    pub fn object(&self) -> &ObjectIdentifier {
        &self.object
    }
}

impl Identifier for ExternalObjectIdentifier {
    fn name(&self) -> &str {
        self.object.name()
    }

    fn fully_qualified_name(&self) -> String {
        if self.object.name().is_empty() {
            return String::new();
        }
        format!(
            "{}.{}",
            self.account.fully_qualified_name(),
            self.object.fully_qualified_name()
        )
    }

    fn parts(&self) -> Vec<&str> {
        let mut parts = self.account.parts();
        parts.extend(self.object.parts());
        parts
    }
}

/// Closed sum over every identifier tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectIdentifier {
    Account(AccountObjectIdentifier),
    Database(DatabaseObjectIdentifier),
    Schema(SchemaObjectIdentifier),
    SchemaWithArguments(SchemaObjectIdentifierWithArguments),
    AccountId(AccountIdentifier),
    External(ExternalObjectIdentifier),
}

impl Identifier for ObjectIdentifier {
    fn name(&self) -> &str {
        match self {
            ObjectIdentifier::Account(id) => id.name(),
            ObjectIdentifier::Database(id) => id.name(),
            ObjectIdentifier::Schema(id) => id.name(),
            ObjectIdentifier::SchemaWithArguments(id) => id.name(),
            ObjectIdentifier::AccountId(id) => id.name(),
            ObjectIdentifier::External(id) => id.name(),
        }
    }

    fn fully_qualified_name(&self) -> String {
        match self {
            ObjectIdentifier::Account(id) => id.fully_qualified_name(),
            ObjectIdentifier::Database(id) => id.fully_qualified_name(),
            ObjectIdentifier::Schema(id) => id.fully_qualified_name(),
            ObjectIdentifier::SchemaWithArguments(id) => id.fully_qualified_name(),
            ObjectIdentifier::AccountId(id) => id.fully_qualified_name(),
            ObjectIdentifier::External(id) => id.fully_qualified_name(),
        }
    }

    fn parts(&self) -> Vec<&str> {
        match self {
            ObjectIdentifier::Account(id) => id.parts(),
            ObjectIdentifier::Database(id) => id.parts(),
            ObjectIdentifier::Schema(id) => id.parts(),
            ObjectIdentifier::SchemaWithArguments(id) => id.parts(),
            ObjectIdentifier::AccountId(id) => id.parts(),
            ObjectIdentifier::External(id) => id.parts(),
        }
    }
}

impl From<AccountObjectIdentifier> for ObjectIdentifier {
    fn from(id: AccountObjectIdentifier) -> Self {
        ObjectIdentifier::Account(id)
    }
}

impl From<DatabaseObjectIdentifier> for ObjectIdentifier {
    fn from(id: DatabaseObjectIdentifier) -> Self {
        ObjectIdentifier::Database(id)
    }
}

impl From<SchemaObjectIdentifier> for ObjectIdentifier {
    fn from(id: SchemaObjectIdentifier) -> Self {
        ObjectIdentifier::Schema(id)
    }
}

impl From<SchemaObjectIdentifierWithArguments> for ObjectIdentifier {
    fn from(id: SchemaObjectIdentifierWithArguments) -> Self {
        ObjectIdentifier::SchemaWithArguments(id)
    }
}

impl From<AccountIdentifier> for ObjectIdentifier {
    fn from(id: AccountIdentifier) -> Self {
        ObjectIdentifier::AccountId(id)
    }
}

impl From<ExternalObjectIdentifier> for ObjectIdentifier {
    fn from(id: ExternalObjectIdentifier) -> Self {
        ObjectIdentifier::External(id)
    }
}

display_as_fully_qualified!(
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments,
    AccountIdentifier,
    ExternalObjectIdentifier,
    ObjectIdentifier,
);

/// Splits a dotted identifier into unquoted parts.
///
/// Quoted parts may contain dots and doubled quotes; unquoted parts are taken
/// verbatim.
pub fn parse_identifier_parts(input: &str) -> Result<Vec<String>> {
    let invalid = || Error::invalid_identifier("ObjectIdentifier", "input");
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut parts = Vec::new();
    let mut chars = trimmed.chars().peekable();

    loop {
        let mut part = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        part.push('"');
                    } else {
                        closed = true;
                        break;
                    }
                } else {
                    part.push(c);
                }
            }
            if !closed {
                return Err(invalid());
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                if c == '"' {
                    return Err(invalid());
                }
                part.push(c);
                chars.next();
            }
        }
        parts.push(part);

        match chars.next() {
            None => break,
            Some('.') => continue,
            Some(_) => return Err(invalid()),
        }
    }

    Ok(parts)
}

fn parse_exact(input: &str, expected: usize, structure: &'static str) -> Result<Vec<String>> {
    let parts =
        parse_identifier_parts(input).map_err(|_| Error::invalid_identifier(structure, "input"))?;
    if parts.len() != expected {
        return Err(Error::invalid_identifier(structure, "input"));
    }
    Ok(parts)
}

impl FromStr for AccountObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = parse_exact(s, 1, "AccountObjectIdentifier")?;
        Ok(Self::new(parts.remove(0)))
    }
}

impl FromStr for DatabaseObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_exact(s, 2, "DatabaseObjectIdentifier")?;
        Ok(Self::new(parts[0].clone(), parts[1].clone()))
    }
}

impl FromStr for SchemaObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_exact(s, 3, "SchemaObjectIdentifier")?;
        Ok(Self::new(
            parts[0].clone(),
            parts[1].clone(),
            parts[2].clone(),
        ))
    }
}

impl FromStr for SchemaObjectIdentifierWithArguments {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let structure = "SchemaObjectIdentifierWithArguments";
        let trimmed = s.trim();
        let open = find_unquoted(trimmed, '(')
            .ok_or_else(|| Error::invalid_identifier(structure, "input"))?;
        if !trimmed.ends_with(')') {
            return Err(Error::invalid_identifier(structure, "input"));
        }
        let id: SchemaObjectIdentifier = trimmed[..open]
            .parse()
            .map_err(|_| Error::invalid_identifier(structure, "input"))?;
        let arguments = parse_data_types(&trimmed[open + 1..trimmed.len() - 1]);
        Ok(id.with_arguments(arguments))
    }
}

impl FromStr for AccountIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = parse_identifier_parts(s)
            .map_err(|_| Error::invalid_identifier("AccountIdentifier", "input"))?;
        match parts.len() {
            1 => Ok(Self::from_locator(parts.remove(0))),
            2 => Ok(Self::new(parts[0].clone(), parts[1].clone())),
            _ => Err(Error::invalid_identifier("AccountIdentifier", "input")),
        }
    }
}

fn find_unquoted(input: &str, needle: char) -> Option<usize> {
    let mut in_quotes = false;
    for (idx, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == needle && !in_quotes => return Some(idx),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_qualified_names() {
        assert_eq!(
            AccountObjectIdentifier::new("WH1").fully_qualified_name(),
            "\"WH1\""
        );
        assert_eq!(
            DatabaseObjectIdentifier::new("DB1", "S1").to_string(),
            "\"DB1\".\"S1\""
        );
        assert_eq!(
            SchemaObjectIdentifier::new("DB1", "S1", "T1").to_string(),
            "\"DB1\".\"S1\".\"T1\""
        );
        assert_eq!(
            SchemaObjectIdentifierWithArguments::new(
                "DB1",
                "S1",
                "F",
                [DataType::Varchar, DataType::Number]
            )
            .to_string(),
            "\"DB1\".\"S1\".\"F\"(VARCHAR, NUMBER)"
        );
        assert_eq!(
            AccountIdentifier::new("ORG", "ACC").to_string(),
            "\"ORG\".\"ACC\""
        );
        assert_eq!(AccountIdentifier::from_locator("AB12345").to_string(), "\"AB12345\"");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        assert_eq!(
            AccountObjectIdentifier::new("my \"odd\" name").to_string(),
            "\"my \"\"odd\"\" name\""
        );
    }

    #[test]
    fn test_external_identifier() {
        let id = ExternalObjectIdentifier::new(
            AccountIdentifier::new("ORG", "ACC"),
            AccountObjectIdentifier::new("SHARE1"),
        );
        assert_eq!(id.to_string(), "\"ORG\".\"ACC\".\"SHARE1\"");
        assert_eq!(id.name(), "SHARE1");
    }

    #[test]
    fn test_validity() {
        assert!(is_valid_identifier(&AccountObjectIdentifier::new("A")));
        assert!(!is_valid_identifier(&AccountObjectIdentifier::new("")));
        assert!(!is_valid_identifier(&SchemaObjectIdentifier::new("DB", "S", "")));
    }

    #[test]
    fn test_every_part_must_be_named() {
        assert!(!is_valid_identifier(&DatabaseObjectIdentifier::new("", "S")));
        assert!(!is_valid_identifier(&SchemaObjectIdentifier::new("DB", "", "T")));
        assert!(!is_valid_identifier(&SchemaObjectIdentifier::new("", "S", "T")));
        assert!(!is_valid_identifier(
            &SchemaObjectIdentifier::new("DB", "", "F").with_arguments([DataType::Number])
        ));
        assert!(!is_valid_identifier(&AccountIdentifier::new("", "ACC")));
        assert!(is_valid_identifier(&AccountIdentifier::from_locator("XY12345")));
        assert!(!is_valid_identifier(&ExternalObjectIdentifier::new(
            AccountIdentifier::new("ORG", "ACC"),
            DatabaseObjectIdentifier::new("", "S"),
        )));
        assert!(is_valid_identifier(&ObjectIdentifier::from(
            SchemaObjectIdentifier::new("DB", "S", "T")
        )));
        assert_eq!(
            SchemaObjectIdentifier::new("DB", "S", "T").parts(),
            vec!["DB", "S", "T"]
        );

        // 253 characters quoted to 255
        let longest = "a".repeat(253);
        assert!(is_valid_identifier(&AccountObjectIdentifier::new(longest)));
        let too_long = "a".repeat(254);
        assert!(!is_valid_identifier(&AccountObjectIdentifier::new(too_long)));
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(
            AccountObjectIdentifier::new("abc"),
            AccountObjectIdentifier::new("ABC")
        );
        assert_eq!(
            SchemaObjectIdentifier::new("DB", "S", "T"),
            SchemaObjectIdentifier::new("DB", "S", "T")
        );
    }

    #[test]
    fn test_empty_arguments_distinct_from_absent() {
        let plain = SchemaObjectIdentifier::new("DB", "S", "F");
        let empty = plain.with_arguments([]);
        assert_eq!(empty.to_string(), "\"DB\".\"S\".\"F\"()");
        assert_ne!(
            ObjectIdentifier::from(plain.clone()),
            ObjectIdentifier::from(empty.clone())
        );
        assert_ne!(empty, plain.with_arguments([DataType::Varchar]));
        assert_ne!(
            plain.with_arguments([DataType::Varchar, DataType::Number]),
            plain.with_arguments([DataType::Number, DataType::Varchar])
        );
    }

    #[test]
    fn test_parse_parts() {
        assert_eq!(
            parse_identifier_parts("\"a.b\".\"c\"\"d\".e").unwrap(),
            vec!["a.b", "c\"d", "e"]
        );
        assert!(parse_identifier_parts("").is_err());
        assert!(parse_identifier_parts("\"unterminated").is_err());
        assert!(parse_identifier_parts("\"a\"b").is_err());
    }

    #[test]
    fn test_round_trip() {
        let account = AccountObjectIdentifier::new("wh \"x\".y");
        assert_eq!(account.to_string().parse::<AccountObjectIdentifier>().unwrap(), account);

        let database = DatabaseObjectIdentifier::new("DB.1", "s");
        assert_eq!(database.to_string().parse::<DatabaseObjectIdentifier>().unwrap(), database);

        let schema = SchemaObjectIdentifier::new("DB", "S", "T(1)");
        assert_eq!(schema.to_string().parse::<SchemaObjectIdentifier>().unwrap(), schema);

        let routine = SchemaObjectIdentifierWithArguments::new(
            "DB",
            "S",
            "F",
            [DataType::Varchar, DataType::Custom("NUMBER(38, 0)".into())],
        );
        assert_eq!(
            routine
                .to_string()
                .parse::<SchemaObjectIdentifierWithArguments>()
                .unwrap(),
            routine
        );

        let no_args = SchemaObjectIdentifierWithArguments::new("DB", "S", "F", []);
        assert_eq!(
            no_args
                .to_string()
                .parse::<SchemaObjectIdentifierWithArguments>()
                .unwrap(),
            no_args
        );

        let account_id = AccountIdentifier::new("ORG", "ACC");
        assert_eq!(account_id.to_string().parse::<AccountIdentifier>().unwrap(), account_id);
    }

    #[test]
    fn test_arguments_compare_by_family() {
        let custom = SchemaObjectIdentifierWithArguments::new(
            "DB",
            "S",
            "F",
            [DataType::Custom("varchar".into())],
        );
        let plain = SchemaObjectIdentifierWithArguments::new("DB", "S", "F", [DataType::Varchar]);
        assert_eq!(custom, plain);
        assert_eq!(custom.to_string(), plain.to_string());

        let sized = SchemaObjectIdentifier::new("DB", "S", "F")
            .with_arguments([DataType::from("NUMBER(38, 0)"), DataType::from("VARCHAR(100)")]);
        assert_eq!(sized.to_string(), "\"DB\".\"S\".\"F\"(NUMBER, VARCHAR)");
        assert_eq!(
            sized,
            SchemaObjectIdentifier::new("DB", "S", "F")
                .with_arguments([DataType::Number, DataType::Varchar])
        );

        let parsed: SchemaObjectIdentifierWithArguments =
            "DB.S.F(NUMBER(38, 0), string)".parse().unwrap();
        assert_eq!(parsed, sized);
        assert_eq!(parsed.to_string().parse::<SchemaObjectIdentifierWithArguments>().unwrap(), parsed);
    }

    #[test]
    fn test_parse_wrong_arity() {
        assert!("\"a\".\"b\"".parse::<SchemaObjectIdentifier>().is_err());
        assert!("a.b.c".parse::<AccountObjectIdentifier>().is_err());
        assert!("a.b.c".parse::<SchemaObjectIdentifierWithArguments>().is_err());
    }

    #[test]
    fn test_unquoted_parts_are_not_folded() {
        let id: SchemaObjectIdentifier = "db.Schema.TABLE".parse().unwrap();
        assert_eq!(id, SchemaObjectIdentifier::new("db", "Schema", "TABLE"));
    }
}
