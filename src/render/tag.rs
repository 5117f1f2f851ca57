use crate::common::ObjectType;
use crate::objects::tag::{AlterTagOptions, CreateTagOptions, SetTagOptions, UnsetTagOptions};
use crate::render::{Quote, RenderSql, SqlBuilder, quote_ident, quoted};

impl RenderSql for CreateTagOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("TAG")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .list_comma("ALLOWED_VALUES", quoted(&self.allowed_values))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AlterTagOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER TAG")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .list_comma("ADD ALLOWED_VALUES", quoted(&self.add_allowed_values))
            .list_comma("DROP ALLOWED_VALUES", quoted(&self.drop_allowed_values))
            .flag(self.unset_allowed_values, "UNSET ALLOWED_VALUES")
            .list_comma("SET MASKING POLICY", &self.set_masking_policies)
            .flag(self.force, "FORCE")
            .list_comma("UNSET MASKING POLICY", &self.unset_masking_policies)
            .parameter_quoted("SET COMMENT", self.set_comment.as_ref())
            .flag(self.unset_comment, "UNSET COMMENT");
    }
}

fn alter_target(sql: &mut SqlBuilder, object_type: ObjectType, if_exists: bool) {
    sql.keyword("ALTER")
        .raw(object_type.to_string())
        .flag(if_exists, "IF EXISTS");
}

impl RenderSql for SetTagOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        alter_target(sql, self.object_type, self.if_exists);
        sql.identifier(&self.object_name)
            .keyword_value(
                "MODIFY COLUMN",
                self.column.as_deref().map(quote_ident),
                Quote::None,
            )
            .list_comma("SET TAG", &self.set_tags);
    }
}

impl RenderSql for UnsetTagOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        alter_target(sql, self.object_type, self.if_exists);
        sql.identifier(&self.object_name)
            .keyword_value(
                "MODIFY COLUMN",
                self.column.as_deref().map(quote_ident),
                Quote::None,
            )
            .list_comma("UNSET TAG", &self.unset_tags);
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{ObjectType, TagAssociation};
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::tag::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "TAG")
    }

    #[test]
    fn test_create() {
        let opts = CreateTagRequest::new(id())
            .with_allowed_values(["a".to_string(), "b".to_string()])
            .with_comment("env")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE TAG \"DB\".\"S\".\"TAG\" ALLOWED_VALUES 'a', 'b' COMMENT = 'env'"
        );
    }

    #[test]
    fn test_alter_masking_policies() {
        let opts = AlterTagRequest::new(id())
            .with_set_masking_policies([SchemaObjectIdentifier::new("DB", "S", "MP")])
            .with_force(true)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "ALTER TAG \"DB\".\"S\".\"TAG\" SET MASKING POLICY \"DB\".\"S\".\"MP\" FORCE"
        );
    }

    #[test]
    fn test_set_and_unset_on_object() {
        let set = SetTagRequest::new(
            ObjectType::Warehouse,
            AccountObjectIdentifier::new("WH"),
            [TagAssociation::new(id(), "prod")],
        )
        .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER WAREHOUSE \"WH\" SET TAG \"DB\".\"S\".\"TAG\" = 'prod'"
        );
        let unset = UnsetTagRequest::new(
            ObjectType::Table,
            SchemaObjectIdentifier::new("DB", "S", "T"),
            [id()],
        )
        .with_column("C1")
        .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER TABLE \"DB\".\"S\".\"T\" MODIFY COLUMN \"C1\" UNSET TAG \"DB\".\"S\".\"TAG\""
        );
    }
}
