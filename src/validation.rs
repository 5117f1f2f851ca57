//! Cross-field validation shared by every options value.
//!
//! Validators are pure: they read the options, collect every violation in
//! order, and return them joined. They never short-circuit and never mutate.

use crate::error::{Error, Result};
use crate::identifiers::{
    AccountIdentifier, AccountObjectIdentifier, DatabaseObjectIdentifier,
    ExternalObjectIdentifier, Identifier, ObjectIdentifier, SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments, is_valid_identifier,
};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// An absent options value is a [`Error::NilOptions`] naming the expected type.
impl<V: Validate> Validate for Option<V> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(options) => options.validate(),
            None => {
                let name = std::any::type_name::<V>();
                Err(Error::nil_options(name.rsplit("::").next().unwrap_or(name)))
            }
        }
    }
}

/// Whether a value counts as "set" for the group predicates.
///
/// - `Option`: `Some`
/// - `Vec`: non-empty
/// - `String`: non-empty
/// - identifiers: [`is_valid_identifier`]
/// - `bool`: always set (a plain `false` is an explicit value)
pub trait IsSet {
    fn is_set(&self) -> bool;
}

impl<T> IsSet for Option<T> {
    fn is_set(&self) -> bool {
        self.is_some()
    }
}

impl<T> IsSet for Vec<T> {
    fn is_set(&self) -> bool {
        !self.is_empty()
    }
}

impl IsSet for String {
    fn is_set(&self) -> bool {
        !self.is_empty()
    }
}

impl IsSet for bool {
    fn is_set(&self) -> bool {
        true
    }
}

impl<T: IsSet + ?Sized> IsSet for &T {
    fn is_set(&self) -> bool {
        (**self).is_set()
    }
}

macro_rules! identifier_is_set {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IsSet for $ty {
                fn is_set(&self) -> bool {
                    is_valid_identifier(self)
                }
            }
        )*
    };
}

identifier_is_set!(
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments,
    AccountIdentifier,
    ExternalObjectIdentifier,
    ObjectIdentifier,
);

/// A keyword flag as a group member: set only when `true`.
pub fn flag(value: bool) -> Option<()> {
    value.then_some(())
}

pub fn any_value_set(values: &[&dyn IsSet]) -> bool {
    values.iter().any(|value| value.is_set())
}

pub fn exactly_one_value_set(values: &[&dyn IsSet]) -> bool {
    values.iter().filter(|value| value.is_set()).count() == 1
}

pub fn every_value_set(values: &[&dyn IsSet]) -> bool {
    values.iter().all(|value| value.is_set())
}

fn more_than_one_value_set(values: &[&dyn IsSet]) -> bool {
    values.iter().filter(|value| value.is_set()).count() > 1
}

/// Ordered error accumulator used by every validator.
#[derive(Debug, Default)]
pub struct Errors {
    structure: &'static str,
    errors: Vec<Error>,
}

impl Errors {
    pub fn new(structure: &'static str) -> Self {
        Self {
            structure,
            errors: Vec::new(),
        }
    }

    pub fn structure(&self) -> &'static str {
        self.structure
    }

    pub fn push(&mut self, error: Error) {
        match error {
            Error::Multiple(errors) => self.errors.extend(errors),
            error => self.errors.push(error),
        }
    }

    /// Folds in the result of a nested validator.
    pub fn merge(&mut self, result: Result<()>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    /// Validates an optional sub-structure.
    pub fn nested<V: Validate>(&mut self, value: Option<&V>) {
        if let Some(value) = value {
            self.merge(value.validate());
        }
    }

    pub fn nested_all<'a, V: Validate + 'a>(&mut self, values: impl IntoIterator<Item = &'a V>) {
        for value in values {
            self.merge(value.validate());
        }
    }

    pub fn check(&mut self, condition: bool, error: impl FnOnce() -> Error) {
        if !condition {
            self.push(error());
        }
    }

    /// The identifier must be valid.
    pub fn identifier<I: Identifier + ?Sized>(&mut self, field: &'static str, id: &I) {
        if !is_valid_identifier(id) {
            self.push(Error::invalid_identifier(self.structure, field));
        }
    }

    /// If present, the identifier must be valid.
    pub fn optional_identifier<I: Identifier>(&mut self, field: &'static str, id: Option<&I>) {
        if let Some(id) = id {
            self.identifier(field, id);
        }
    }

    pub fn identifiers<'a, I: Identifier + 'a>(
        &mut self,
        field: &'static str,
        ids: impl IntoIterator<Item = &'a I>,
    ) {
        for id in ids {
            self.identifier(field, id);
        }
    }

    pub fn required(&mut self, field: &'static str, value: &dyn IsSet) {
        if !value.is_set() {
            self.push(Error::missing_required(self.structure, field));
        }
    }

    pub fn exactly_one_of(&mut self, fields: &[&'static str], values: &[&dyn IsSet]) {
        if !exactly_one_value_set(values) {
            self.push(Error::exactly_one_of(self.structure, fields));
        }
    }

    pub fn at_least_one_of(&mut self, fields: &[&'static str], values: &[&dyn IsSet]) {
        if !any_value_set(values) {
            self.push(Error::at_least_one_of(self.structure, fields));
        }
    }

    /// Optional values that may not be combined.
    pub fn at_most_one_of(&mut self, fields: &[&'static str], values: &[&dyn IsSet]) {
        if more_than_one_value_set(values) {
            self.push(Error::more_than_one_of(self.structure, fields));
        }
    }

    /// `OR REPLACE` and `IF NOT EXISTS` cannot be combined.
    pub fn or_replace_if_not_exists(&mut self, or_replace: bool, if_not_exists: bool) {
        if or_replace && if_not_exists {
            self.push(Error::exactly_one_of(
                self.structure,
                &["OrReplace", "IfNotExists"],
            ));
        }
    }

    /// The server rejects `IF EXISTS` together with `UNSET TAG`.
    pub fn if_exists_unset_tags(&mut self, if_exists: bool, unset_tags: &[impl Sized]) {
        if if_exists && !unset_tags.is_empty() {
            self.push(Error::more_than_one_of(
                self.structure,
                &["IfExists", "UnsetTags"],
            ));
        }
    }

    /// Integer bounds, inclusive.
    pub fn range(&mut self, field: &'static str, value: Option<i64>, min: i64, max: i64) {
        if let Some(value) = value
            && !(min..=max).contains(&value)
        {
            self.push(Error::invalid_value(
                self.structure,
                field,
                format!("must be between {min} and {max}"),
            ));
        }
    }

    pub fn finish(self) -> Result<()> {
        match Error::join(self.errors) {
            None => Ok(()),
            Some(error) => Err(error),
        }
    }
}
