//! Rendering for the shared list filters.

use crate::common::{CloneSource, ExtendedIn, In, LimitFrom, Like, TimeTravel, TimeTravelPoint};
use crate::identifiers::Identifier;
use crate::render::{Quote, RenderSql, SqlBuilder, escape_string};

impl RenderSql for Like {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword_value("LIKE", self.pattern.as_ref(), Quote::Single);
    }
}

impl RenderSql for In {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag(self.account, "IN ACCOUNT")
            .keyword_identifier("IN DATABASE", self.database.as_ref())
            .keyword_identifier("IN SCHEMA", self.schema.as_ref());
    }
}

impl RenderSql for ExtendedIn {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag(self.account, "IN ACCOUNT")
            .keyword_identifier("IN DATABASE", self.database.as_ref())
            .keyword_identifier("IN SCHEMA", self.schema.as_ref())
            .keyword_identifier("IN APPLICATION", self.application.as_ref())
            .keyword_identifier(
                "IN APPLICATION PACKAGE",
                self.application_package.as_ref(),
            );
    }
}

impl RenderSql for LimitFrom {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword_value("LIMIT", Some(self.rows), Quote::None)
            .keyword_value("FROM", self.from.as_ref(), Quote::Single);
    }
}

impl RenderSql for TimeTravel {
    fn render(&self, sql: &mut SqlBuilder) {
        let point = match &self.point {
            TimeTravelPoint::Timestamp(ts) => format!("TIMESTAMP => {}", escape_string(ts)),
            TimeTravelPoint::Offset(offset) => format!("OFFSET => {offset}"),
            TimeTravelPoint::Statement(id) => format!("STATEMENT => {}", escape_string(id)),
        };
        let keyword = if self.before { "BEFORE" } else { "AT" };
        sql.raw(format!("{keyword} ({point})"));
    }
}

impl<I: Identifier> RenderSql for CloneSource<I> {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CLONE")
            .identifier(&self.source)
            .nested(self.time_travel.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier};

    #[test]
    fn test_clone_source() {
        let clone = CloneSource::new(AccountObjectIdentifier::new("SRC"));
        assert_eq!(clone.to_sql(), "CLONE \"SRC\"");
        let clone = clone.with_time_travel(TimeTravel::before(TimeTravelPoint::Offset(-60)));
        assert_eq!(clone.to_sql(), "CLONE \"SRC\" BEFORE (OFFSET => -60)");
        let at = TimeTravel::at(TimeTravelPoint::Statement("01a".into()));
        assert_eq!(at.to_sql(), "AT (STATEMENT => '01a')");
    }

    #[test]
    fn test_like() {
        assert_eq!(Like::new("S%").to_sql(), "LIKE 'S%'");
        assert_eq!(Like::default().to_sql(), "");
    }

    #[test]
    fn test_in_scopes() {
        assert_eq!(In::account().to_sql(), "IN ACCOUNT");
        assert_eq!(
            In::database(AccountObjectIdentifier::new("DB")).to_sql(),
            "IN DATABASE \"DB\""
        );
        assert_eq!(
            In::schema(DatabaseObjectIdentifier::new("DB", "S")).to_sql(),
            "IN SCHEMA \"DB\".\"S\""
        );
        assert_eq!(
            ExtendedIn::application(AccountObjectIdentifier::new("APP")).to_sql(),
            "IN APPLICATION \"APP\""
        );
    }

    #[test]
    fn test_limit_from() {
        assert_eq!(LimitFrom::new(10).to_sql(), "LIMIT 10");
        assert_eq!(LimitFrom::new(5).from("x").to_sql(), "LIMIT 5 FROM 'x'");
    }
}
