use crate::identifiers::Identifier;
use crate::objects::comment::{ColumnCommentOptions, CommentOptions};
use crate::render::{RenderSql, SqlBuilder, escape_string, quote_ident};

impl RenderSql for CommentOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("COMMENT")
            .flag(self.if_exists, "IF EXISTS")
            .keyword("ON")
            .raw(self.object_type.to_string())
            .identifier(&self.id)
            .keyword("IS")
            .raw(escape_string(&self.value));
    }
}

impl RenderSql for ColumnCommentOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("COMMENT")
            .flag(self.if_exists, "IF EXISTS")
            .keyword("ON COLUMN")
            .raw(format!(
                "{}.{}",
                self.table.fully_qualified_name(),
                quote_ident(&self.column)
            ))
            .keyword("IS")
            .raw(escape_string(&self.value));
    }
}
