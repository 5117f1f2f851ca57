//! Deterministic translation of options values into SQL statements.
//!
//! Every options type implements [`RenderSql`] by walking its fields in
//! declaration order and pushing fragments onto a [`SqlBuilder`]. Unset
//! fields push nothing. Fragments are joined with single spaces, so two equal
//! options values always render to byte-identical statements.

use std::fmt::Display;

use crate::identifiers::Identifier;

pub mod account;
pub mod application;
pub mod application_package;
pub mod comment;
pub mod common;
pub mod cortex_search_service;
pub mod database;
pub mod database_role;
pub mod dynamic_table;
pub mod event_table;
pub mod external_table;
pub mod external_volume;
pub mod failover_group;
pub mod file_format;
pub mod function;
pub mod grant;
pub mod integration;
pub mod managed_account;
pub mod materialized_view;
pub mod network_policy;
pub mod network_rule;
pub mod pipe;
pub mod policy;
pub mod procedure;
pub mod role;
pub mod routine;
pub mod schema;
pub mod secret;
pub mod security_integration;
pub mod sequence;
pub mod session;
pub mod stage;
pub mod stream;
pub mod streamlit;
pub mod table;
pub mod tag;
pub mod task;
pub mod user;
pub mod view;
pub mod warehouse;

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// How a parameter value is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    None,
    Single,
    Double,
}

impl Quote {
    pub fn apply(self, value: &str) -> String {
        match self {
            Quote::None => value.to_string(),
            Quote::Single => escape_string(value),
            Quote::Double => quote_ident(value),
        }
    }
}

/// Renders an options value into the builder, field by field.
pub trait RenderSql {
    fn render(&self, sql: &mut SqlBuilder);

    fn to_sql(&self) -> String {
        let mut sql = SqlBuilder::new();
        self.render(&mut sql);
        sql.finish()
    }
}

impl<T: RenderSql + ?Sized> RenderSql for &T {
    fn render(&self, sql: &mut SqlBuilder) {
        (**self).render(sql)
    }
}

/// Renders `options` to a single statement.
pub fn to_sql<T: RenderSql + ?Sized>(options: &T) -> String {
    options.to_sql()
}

/// Space-joined statement fragments.
#[derive(Debug, Default, Clone)]
pub struct SqlBuilder {
    parts: Vec<String>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, fragment: String) -> &mut Self {
        if !fragment.is_empty() {
            self.parts.push(fragment);
        }
        self
    }

    fn keyed(keyword: &str, value: String) -> String {
        if keyword.is_empty() {
            value
        } else {
            format!("{keyword} {value}")
        }
    }

    /// Static keyword, always emitted.
    pub fn keyword(&mut self, keyword: &str) -> &mut Self {
        self.push(keyword.to_string())
    }

    /// Keyword emitted only when `on` is true.
    pub fn flag(&mut self, on: bool, keyword: &str) -> &mut Self {
        if on {
            self.push(keyword.to_string());
        }
        self
    }

    /// Raw text, emitted verbatim.
    pub fn raw(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(text.into())
    }

    pub fn identifier<I: Identifier + ?Sized>(&mut self, id: &I) -> &mut Self {
        self.push(id.fully_qualified_name())
    }

    /// `KEYWORD <identifier>` when present.
    pub fn keyword_identifier<I: Identifier>(&mut self, keyword: &str, id: Option<&I>) -> &mut Self {
        if let Some(id) = id {
            self.push(Self::keyed(keyword, id.fully_qualified_name()));
        }
        self
    }

    /// `KEYWORD = value` when present.
    pub fn parameter<V: Display>(&mut self, keyword: &str, value: Option<V>) -> &mut Self {
        self.parameter_with(keyword, value, Quote::None)
    }

    /// `KEYWORD = 'value'` when present.
    pub fn parameter_quoted<V: Display>(&mut self, keyword: &str, value: Option<V>) -> &mut Self {
        self.parameter_with(keyword, value, Quote::Single)
    }

    pub fn parameter_with<V: Display>(
        &mut self,
        keyword: &str,
        value: Option<V>,
        quote: Quote,
    ) -> &mut Self {
        if let Some(value) = value {
            let rendered = quote.apply(&value.to_string());
            self.push(format!("{keyword} = {rendered}"));
        }
        self
    }

    /// `KEYWORD value` (no equals sign) when present.
    pub fn keyword_value<V: Display>(
        &mut self,
        keyword: &str,
        value: Option<V>,
        quote: Quote,
    ) -> &mut Self {
        if let Some(value) = value {
            let rendered = quote.apply(&value.to_string());
            self.push(Self::keyed(keyword, rendered));
        }
        self
    }

    /// `KEYWORD (a, b)` when non-empty.
    pub fn list_paren<I>(&mut self, keyword: &str, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let joined = join(items, ", ");
        if !joined.is_empty() {
            self.push(Self::keyed(keyword, format!("({joined})")));
        }
        self
    }

    /// `KEYWORD = (a, b)` when non-empty.
    pub fn list_paren_eq<I>(&mut self, keyword: &str, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let joined = join(items, ", ");
        if !joined.is_empty() {
            self.push(format!("{keyword} = ({joined})"));
        }
        self
    }

    /// `KEYWORD = ()` is legal for lists the caller explicitly empties.
    pub fn list_paren_eq_allow_empty<I>(&mut self, keyword: &str, items: Option<I>) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        if let Some(items) = items {
            let joined = join(items, ", ");
            self.push(format!("{keyword} = ({joined})"));
        }
        self
    }

    /// `KEYWORD a, b` when non-empty.
    pub fn list_comma<I>(&mut self, keyword: &str, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let joined = join(items, ", ");
        if !joined.is_empty() {
            self.push(Self::keyed(keyword, joined));
        }
        self
    }

    /// `KEYWORD A, B` naming every property whose flag is set.
    pub fn flag_list(&mut self, keyword: &str, flags: &[(bool, &str)]) -> &mut Self {
        let names = flags.iter().filter(|(on, _)| *on).map(|(_, name)| *name);
        self.list_comma(keyword, names)
    }

    /// Renders a sub-structure inline when present.
    pub fn nested<R: RenderSql>(&mut self, value: Option<&R>) -> &mut Self {
        if let Some(value) = value {
            value.render(self);
        }
        self
    }

    /// `KEYWORD (<sub-structure>)` when present.
    pub fn nested_paren<R: RenderSql>(&mut self, keyword: &str, value: Option<&R>) -> &mut Self {
        if let Some(value) = value {
            let inner = value.to_sql();
            self.push(Self::keyed(keyword, format!("({inner})")));
        }
        self
    }

    /// `KEYWORD = (<sub-structure>)` when present.
    pub fn nested_paren_eq<R: RenderSql>(&mut self, keyword: &str, value: Option<&R>) -> &mut Self {
        if let Some(value) = value {
            let inner = value.to_sql();
            self.push(format!("{keyword} = ({inner})"));
        }
        self
    }

    /// Each element rendered and joined with `separator`, optionally
    /// parenthesised, after `keyword`.
    pub fn nested_list<R: RenderSql>(
        &mut self,
        keyword: &str,
        items: &[R],
        separator: &str,
        parenthesised: bool,
    ) -> &mut Self {
        if items.is_empty() {
            return self;
        }
        let joined = items
            .iter()
            .map(RenderSql::to_sql)
            .collect::<Vec<_>>()
            .join(separator);
        let body = if parenthesised {
            format!("({joined})")
        } else {
            joined
        };
        self.push(Self::keyed(keyword, body))
    }

    pub fn finish(self) -> String {
        self.parts.join(" ")
    }
}

fn join<I>(items: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Renders each value single-quoted.
pub fn quoted<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| escape_string(value.as_ref()))
        .collect()
}

/// Renders each name as a quoted identifier.
pub fn idents(names: &[String]) -> Vec<String> {
    names.iter().map(|name| quote_ident(name)).collect()
}

/// Renders a routine body between `$$` delimiters.
pub fn dollar_quoted(body: &str) -> String {
    format!("$${body}$$")
}

/// Masks string literals assigned to credential keys (`PASSWORD`, `API_KEY`,
/// `SECRET_STRING`, `OAUTH_REFRESH_TOKEN`, ...) so a statement can be logged.
pub fn redact(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut rest = sql;
    while let Some(start) = rest.find('\'') {
        let (head, literal) = rest.split_at(start);
        out.push_str(head);
        let end = literal_end(literal);
        if is_credential_key(&out) {
            out.push_str("'***'");
        } else {
            out.push_str(&literal[..end]);
        }
        rest = &literal[end..];
    }
    out.push_str(rest);
    out
}

/// Byte offset just past the closing quote of a literal starting at 0.
fn literal_end(literal: &str) -> usize {
    let bytes = literal.as_bytes();
    let mut at = 1;
    while at < bytes.len() {
        if bytes[at] == b'\'' {
            if bytes.get(at + 1) == Some(&b'\'') {
                at += 2;
                continue;
            }
            return at + 1;
        }
        at += 1;
    }
    bytes.len()
}

fn is_credential_key(preceding: &str) -> bool {
    let Some(head) = preceding.trim_end().strip_suffix('=') else {
        return false;
    };
    let key = head
        .trim_end()
        .rsplit(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();
    ["PASSWORD", "SECRET", "TOKEN"]
        .iter()
        .any(|marker| key.contains(marker))
        || key.ends_with("KEY")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::AccountObjectIdentifier;

    struct Inner {
        a: Option<i32>,
    }

    impl RenderSql for Inner {
        fn render(&self, sql: &mut SqlBuilder) {
            sql.parameter("A", self.a);
        }
    }

    #[test]
    fn test_quote_helpers() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
        assert_eq!(escape_string("it's"), "'it''s'");
        assert_eq!(Quote::None.apply("x"), "x");
    }

    #[test]
    fn test_absent_fields_render_nothing() {
        let mut sql = SqlBuilder::new();
        sql.keyword("DROP")
            .flag(false, "IF EXISTS")
            .parameter::<i32>("X", None)
            .parameter_quoted::<&str>("COMMENT", None)
            .list_paren("TAG", Vec::<String>::new())
            .nested::<Inner>(None)
            .keyword_identifier::<AccountObjectIdentifier>("RENAME TO", None);
        assert_eq!(sql.finish(), "DROP");
    }

    #[test]
    fn test_fragments() {
        let mut sql = SqlBuilder::new();
        sql.keyword("CREATE")
            .flag(true, "OR REPLACE")
            .identifier(&AccountObjectIdentifier::new("X"))
            .parameter("SIZE", Some(5))
            .parameter_quoted("COMMENT", Some("it's"))
            .keyword_value("LIMIT", Some(10), Quote::None)
            .list_paren("COLUMNS", ["A", "B"])
            .list_paren_eq("ALLOWED", quoted(["x", "y"]))
            .list_comma("UNSET", ["P", "Q"])
            .nested_paren("WITH", Some(&Inner { a: Some(1) }))
            .nested(Some(&Inner { a: Some(2) }));
        assert_eq!(
            sql.finish(),
            "CREATE OR REPLACE \"X\" SIZE = 5 COMMENT = 'it''s' LIMIT 10 COLUMNS (A, B) \
             ALLOWED = ('x', 'y') UNSET P, Q WITH (A = 1) A = 2"
        );
    }

    #[test]
    fn test_nested_list() {
        let items = vec![Inner { a: Some(1) }, Inner { a: Some(2) }];
        let mut sql = SqlBuilder::new();
        sql.nested_list("", &items, ", ", true);
        assert_eq!(sql.finish(), "(A = 1, A = 2)");
    }

    #[test]
    fn test_redact_masks_credentials_only() {
        assert_eq!(
            redact(
                "CREATE SECRET \"DB\".\"S\".\"X\" TYPE = PASSWORD USERNAME = 'admin' \
                 PASSWORD = 'it''s hidden' COMMENT = 'plain'"
            ),
            "CREATE SECRET \"DB\".\"S\".\"X\" TYPE = PASSWORD USERNAME = 'admin' \
             PASSWORD = '***' COMMENT = 'plain'"
        );
        assert_eq!(
            redact("ALTER API INTEGRATION \"I\" SET API_KEY = 'k1' ENABLED = true"),
            "ALTER API INTEGRATION \"I\" SET API_KEY = '***' ENABLED = true"
        );
        assert_eq!(
            redact("CREATE SECRET \"X\" SECRET_STRING='s' OAUTH_SCOPES = ('a', 'b')"),
            "CREATE SECRET \"X\" SECRET_STRING='***' OAUTH_SCOPES = ('a', 'b')"
        );
        assert_eq!(redact("SHOW USERS LIKE 'PASSWORD%'"), "SHOW USERS LIKE 'PASSWORD%'");
    }
}
