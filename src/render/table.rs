use crate::objects::table::{
    AlterTableOptions, ClusteringAction, ColumnAction, ColumnAlter, ColumnDefault,
    ColumnMaskingPolicy, ConstraintAction, CreateTableAsSelectOptions, CreateTableCloneOptions,
    CreateTableLikeOptions, CreateTableOptions, ForeignKeyReference, InlineConstraint,
    OutOfLineConstraint, RowAccessPolicyOn, TableColumn, TableSet, TableUnset,
};
use crate::render::{Quote, RenderSql, SqlBuilder, idents, quote_ident};

impl RenderSql for ForeignKeyReference {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REFERENCES")
            .identifier(&self.table)
            .list_paren("", idents(&self.columns));
    }
}

fn enforced(sql: &mut SqlBuilder, enforced: Option<bool>) {
    if let Some(enforced) = enforced {
        sql.keyword(if enforced { "ENFORCED" } else { "NOT ENFORCED" });
    }
}

impl RenderSql for InlineConstraint {
    fn render(&self, sql: &mut SqlBuilder) {
        if let Some(name) = &self.name {
            sql.keyword("CONSTRAINT").raw(quote_ident(name));
        }
        sql.keyword(&self.kind.to_string())
            .nested(self.references.as_ref());
        enforced(sql, self.enforced);
    }
}

impl RenderSql for OutOfLineConstraint {
    fn render(&self, sql: &mut SqlBuilder) {
        if let Some(name) = &self.name {
            sql.keyword("CONSTRAINT").raw(quote_ident(name));
        }
        sql.keyword(&self.kind.to_string())
            .list_paren("", idents(&self.columns))
            .nested(self.references.as_ref());
        enforced(sql, self.enforced);
    }
}

impl RenderSql for ColumnMaskingPolicy {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("WITH MASKING POLICY")
            .identifier(&self.policy)
            .list_paren("USING", idents(&self.using));
    }
}

impl RenderSql for RowAccessPolicyOn {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ROW ACCESS POLICY")
            .identifier(&self.policy)
            .list_paren("ON", idents(&self.on));
    }
}

impl RenderSql for ColumnDefault {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            ColumnDefault::Expression(expression) => {
                sql.keyword("DEFAULT").raw(expression.as_str());
            }
            ColumnDefault::Autoincrement { start, increment } => {
                sql.raw(format!("AUTOINCREMENT START {start} INCREMENT {increment}"));
            }
        }
    }
}

impl RenderSql for TableColumn {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.raw(quote_ident(&self.name))
            .raw(self.data_type.to_string())
            .keyword_value("COLLATE", self.collate.as_ref(), Quote::Single)
            .keyword_value("COMMENT", self.comment.as_ref(), Quote::Single)
            .nested(self.default.as_ref())
            .flag(self.not_null, "NOT NULL")
            .nested(self.constraint.as_ref())
            .nested(self.masking_policy.as_ref())
            .list_paren("WITH TAG", &self.tag);
    }
}

/// `(<columns>, <constraints>)` as one parenthesised group.
fn column_list(sql: &mut SqlBuilder, columns: &[TableColumn], constraints: &[OutOfLineConstraint]) {
    let parts: Vec<String> = columns
        .iter()
        .map(RenderSql::to_sql)
        .chain(constraints.iter().map(RenderSql::to_sql))
        .collect();
    if !parts.is_empty() {
        sql.raw(format!("({})", parts.join(", ")));
    }
}

impl RenderSql for CreateTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE").flag(self.or_replace, "OR REPLACE");
        if let Some(kind) = self.kind {
            sql.keyword(&kind.to_string());
        }
        sql.keyword("TABLE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name);
        column_list(sql, &self.columns, &self.constraints);
        sql.list_paren("CLUSTER BY", &self.cluster_by)
            .parameter("ENABLE_SCHEMA_EVOLUTION", self.enable_schema_evolution)
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter("CHANGE_TRACKING", self.change_tracking)
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .flag(self.copy_grants, "COPY GRANTS")
            .nested(self.row_access_policy.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for CreateTableAsSelectOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("TABLE")
            .identifier(&self.name);
        column_list(sql, &self.columns, &[]);
        sql.list_paren("CLUSTER BY", &self.cluster_by)
            .flag(self.copy_grants, "COPY GRANTS")
            .keyword("AS")
            .raw(self.query.as_str());
    }
}

impl RenderSql for CreateTableLikeOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("TABLE")
            .identifier(&self.name)
            .keyword_identifier("LIKE", Some(&self.like))
            .list_paren("CLUSTER BY", &self.cluster_by)
            .flag(self.copy_grants, "COPY GRANTS");
    }
}

impl RenderSql for CreateTableCloneOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("TABLE")
            .identifier(&self.name)
            .nested(Some(&self.clone))
            .flag(self.copy_grants, "COPY GRANTS");
    }
}

impl RenderSql for ClusteringAction {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.list_paren("CLUSTER BY", &self.cluster_by)
            .flag(self.suspend_recluster, "SUSPEND RECLUSTER")
            .flag(self.resume_recluster, "RESUME RECLUSTER")
            .flag(self.drop_clustering_key, "DROP CLUSTERING KEY");
    }
}

impl RenderSql for ColumnAlter {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("COLUMN")
            .raw(quote_ident(&self.name))
            .flag(self.drop_default, "DROP DEFAULT")
            .keyword_value("SET DEFAULT", self.set_default.as_ref(), Quote::None);
        if let Some(not_null) = self.not_null {
            sql.keyword(if not_null { "SET NOT NULL" } else { "DROP NOT NULL" });
        }
        sql.keyword_value(
            "SET DATA TYPE",
            self.data_type.as_ref(),
            Quote::None,
        )
        .keyword_value("COMMENT", self.comment.as_ref(), Quote::Single)
        .flag(self.unset_comment, "UNSET COMMENT");
    }
}

impl RenderSql for ColumnAction {
    fn render(&self, sql: &mut SqlBuilder) {
        if let Some(add) = &self.add {
            sql.keyword("ADD COLUMN")
                .flag(add.if_not_exists, "IF NOT EXISTS")
                .nested(Some(&add.column));
        }
        if let Some(rename) = &self.rename {
            sql.keyword("RENAME COLUMN")
                .raw(quote_ident(&rename.old_name))
                .keyword("TO")
                .raw(quote_ident(&rename.new_name));
        }
        sql.nested_list("ALTER", &self.alter, ", ", false);
        if let Some(set) = &self.set_masking_policy {
            sql.keyword("ALTER COLUMN")
                .raw(quote_ident(&set.column))
                .keyword("SET MASKING POLICY")
                .identifier(&set.masking_policy.policy)
                .list_paren("USING", idents(&set.masking_policy.using))
                .flag(set.force, "FORCE");
        }
        if let Some(column) = &self.unset_masking_policy {
            sql.keyword("ALTER COLUMN")
                .raw(quote_ident(column))
                .keyword("UNSET MASKING POLICY");
        }
        sql.list_comma("DROP COLUMN", idents(&self.drop_columns));
    }
}

impl RenderSql for ConstraintAction {
    fn render(&self, sql: &mut SqlBuilder) {
        if let Some(add) = &self.add {
            sql.keyword("ADD").nested(Some(add));
        }
        if let Some((old_name, new_name)) = &self.rename {
            sql.keyword("RENAME CONSTRAINT")
                .raw(quote_ident(old_name))
                .keyword("TO")
                .raw(quote_ident(new_name));
        }
        if let Some(name) = &self.drop {
            sql.keyword("DROP CONSTRAINT").raw(quote_ident(name));
        }
    }
}

impl RenderSql for TableSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("ENABLE_SCHEMA_EVOLUTION", self.enable_schema_evolution)
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter("CHANGE_TRACKING", self.change_tracking)
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for TableUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.enable_schema_evolution, "ENABLE_SCHEMA_EVOLUTION"),
                (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
                (
                    self.max_data_extension_time_in_days,
                    "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                ),
                (self.change_tracking, "CHANGE_TRACKING"),
                (self.default_ddl_collation, "DEFAULT_DDL_COLLATION"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterTableOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER TABLE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.new_name.as_ref())
            .keyword_identifier("SWAP WITH", self.swap_with.as_ref())
            .nested(self.clustering_action.as_ref())
            .nested(self.column_action.as_ref())
            .nested(self.constraint_action.as_ref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
        if let Some(policy) = &self.add_row_access_policy {
            sql.keyword("ADD").nested(Some(policy));
        }
        sql.keyword_identifier("DROP ROW ACCESS POLICY", self.drop_row_access_policy.as_ref())
            .flag(self.drop_all_row_access_policies, "DROP ALL ROW ACCESS POLICIES");
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{CloneSource, In, Like, TimeTravel, TimeTravelPoint};
    use crate::datatypes::DataType;
    use crate::identifiers::{DatabaseObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::table::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB1", "S1", "T1")
    }

    #[test]
    fn test_create_with_columns_and_constraints() {
        let columns = vec![
            TableColumn::new("ID", DataType::Number).with_not_null(true),
            TableColumn::new("NAME", "varchar(100)")
                .with_comment("display name")
                .with_default(ColumnDefault::Expression("'x'".into())),
        ];
        let opts = CreateTableRequest::new(id(), columns)
            .with_or_replace(true)
            .with_kind(TableKind::Transient)
            .with_constraints([OutOfLineConstraint::new(ConstraintType::PrimaryKey, ["ID"])
                .named("PK")])
            .with_cluster_by(["ID".to_string()])
            .with_comment("c")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE TRANSIENT TABLE \"DB1\".\"S1\".\"T1\" \
             (\"ID\" NUMBER NOT NULL, \"NAME\" VARCHAR(100) COMMENT 'display name' DEFAULT 'x', \
             CONSTRAINT \"PK\" PRIMARY KEY (\"ID\")) CLUSTER BY (ID) COMMENT = 'c'"
        );
    }

    #[test]
    fn test_foreign_key_column() {
        let column = TableColumn::new("P", DataType::Number).with_constraint(InlineConstraint {
            references: Some(ForeignKeyReference {
                table: SchemaObjectIdentifier::new("DB1", "S1", "P"),
                columns: vec!["ID".into()],
            }),
            ..InlineConstraint::new(ConstraintType::ForeignKey)
        });
        assert_eq!(
            column.to_sql(),
            "\"P\" NUMBER FOREIGN KEY REFERENCES \"DB1\".\"S1\".\"P\" (\"ID\")"
        );
    }

    #[test]
    fn test_create_variants() {
        let ctas = CreateTableAsSelectRequest::new(id(), "SELECT 1 AS A").with_or_replace(true);
        assert_eq!(
            ctas.to_options().to_sql(),
            "CREATE OR REPLACE TABLE \"DB1\".\"S1\".\"T1\" AS SELECT 1 AS A"
        );
        let like = CreateTableLikeRequest::new(id(), SchemaObjectIdentifier::new("DB1", "S1", "SRC"))
            .with_copy_grants(true);
        assert_eq!(
            like.to_options().to_sql(),
            "CREATE TABLE \"DB1\".\"S1\".\"T1\" LIKE \"DB1\".\"S1\".\"SRC\" COPY GRANTS"
        );
        let clone = CreateTableCloneRequest::new(
            id(),
            CloneSource::new(SchemaObjectIdentifier::new("DB1", "S1", "SRC"))
                .with_time_travel(TimeTravel::at(TimeTravelPoint::Offset(-60))),
        );
        assert_eq!(
            clone.to_options().to_sql(),
            "CREATE TABLE \"DB1\".\"S1\".\"T1\" CLONE \"DB1\".\"S1\".\"SRC\" AT (OFFSET => -60)"
        );
    }

    #[test]
    fn test_alter_set_retention() {
        let opts = AlterTableRequest::new(id())
            .with_set(TableSet::default().with_data_retention_time_in_days(7))
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "ALTER TABLE \"DB1\".\"S1\".\"T1\" SET DATA_RETENTION_TIME_IN_DAYS = 7"
        );
    }

    #[test]
    fn test_alter_columns() {
        let rename = AlterTableRequest::new(id())
            .with_column_action(ColumnAction::rename("A", "B"))
            .to_options();
        assert_eq!(
            rename.to_sql(),
            "ALTER TABLE \"DB1\".\"S1\".\"T1\" RENAME COLUMN \"A\" TO \"B\""
        );
        let alter = AlterTableRequest::new(id())
            .with_column_action(ColumnAction::alter([
                ColumnAlter::new("A").with_not_null(false),
                ColumnAlter::new("B").with_comment("b"),
            ]))
            .to_options();
        assert_eq!(
            alter.to_sql(),
            "ALTER TABLE \"DB1\".\"S1\".\"T1\" ALTER COLUMN \"A\" DROP NOT NULL, COLUMN \"B\" COMMENT 'b'"
        );
        let drop = AlterTableRequest::new(id())
            .with_column_action(ColumnAction::drop(["A", "B"]))
            .to_options();
        assert_eq!(
            drop.to_sql(),
            "ALTER TABLE \"DB1\".\"S1\".\"T1\" DROP COLUMN \"A\", \"B\""
        );
        let add = AlterTableRequest::new(id())
            .with_column_action(ColumnAction::add(TableColumn::new("C", DataType::Boolean)))
            .to_options();
        assert_eq!(
            add.to_sql(),
            "ALTER TABLE \"DB1\".\"S1\".\"T1\" ADD COLUMN \"C\" BOOLEAN"
        );
    }

    #[test]
    fn test_alter_clustering_and_unset() {
        let suspend = AlterTableRequest::new(id())
            .with_clustering_action(ClusteringAction {
                suspend_recluster: true,
                ..Default::default()
            })
            .to_options();
        assert_eq!(
            suspend.to_sql(),
            "ALTER TABLE \"DB1\".\"S1\".\"T1\" SUSPEND RECLUSTER"
        );
        let unset = AlterTableRequest::new(id())
            .with_unset(TableUnset::default().with_change_tracking(true).with_comment(true))
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER TABLE \"DB1\".\"S1\".\"T1\" UNSET CHANGE_TRACKING, COMMENT"
        );
    }

    #[test]
    fn test_show_and_describe() {
        let show = ShowTableRequest::new()
            .with_terse(true)
            .with_like(Like::new("T%"))
            .with_in_scope(In::schema(DatabaseObjectIdentifier::new("DB1", "S1")))
            .to_options();
        assert_eq!(
            show.to_sql(),
            "SHOW TERSE TABLES LIKE 'T%' IN SCHEMA \"DB1\".\"S1\""
        );
        assert_eq!(
            DescribeTableColumnsOptions::new(id()).to_sql(),
            "DESCRIBE TABLE \"DB1\".\"S1\".\"T1\""
        );
        assert_eq!(
            UndropTableOptions::new(id()).to_sql(),
            "UNDROP TABLE \"DB1\".\"S1\".\"T1\""
        );
    }
}
