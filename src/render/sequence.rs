use crate::objects::sequence::{
    AlterSequenceOptions, CreateSequenceOptions, DropSequenceOptions, SequenceSet,
};
use crate::render::{Quote, RenderSql, SqlBuilder};

impl RenderSql for CreateSequenceOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("SEQUENCE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .flag(self.with, "WITH")
            .parameter("START", self.start)
            .parameter("INCREMENT", self.increment)
            .keyword_value("", self.values_behavior, Quote::None)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for SequenceSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .keyword_value("", self.values_behavior, Quote::None)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AlterSequenceOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER SEQUENCE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .parameter("SET INCREMENT", self.set_increment)
            .nested(self.set.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT");
    }
}

impl RenderSql for DropSequenceOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("DROP SEQUENCE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .flag(self.cascade, "CASCADE")
            .flag(self.restrict, "RESTRICT");
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::SchemaObjectIdentifier;
    use crate::objects::sequence::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "SEQ")
    }

    #[test]
    fn test_create() {
        let opts = CreateSequenceRequest::new(id())
            .with_or_replace(true)
            .with_start(100)
            .with_increment(5)
            .with_values_behavior(ValuesBehavior::NoOrder)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE SEQUENCE \"DB\".\"S\".\"SEQ\" START = 100 INCREMENT = 5 NOORDER"
        );
    }

    #[test]
    fn test_alter() {
        let increment = AlterSequenceRequest::new(id()).with_set_increment(2).to_options();
        assert_eq!(
            increment.to_sql(),
            "ALTER SEQUENCE \"DB\".\"S\".\"SEQ\" SET INCREMENT = 2"
        );
        let set = AlterSequenceRequest::new(id())
            .with_set(SequenceSet::default().with_values_behavior(ValuesBehavior::Order))
            .to_options();
        assert_eq!(set.to_sql(), "ALTER SEQUENCE \"DB\".\"S\".\"SEQ\" SET ORDER");
    }
}
