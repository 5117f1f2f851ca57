use crate::objects::application_package::{
    AddPatchForVersion, AddVersion, AlterApplicationPackageOptions, ApplicationPackageSet,
    ApplicationPackageUnset, CreateApplicationPackageOptions, ModifyReleaseDirective,
    ReleaseTarget, SetReleaseDirective,
};
use crate::render::{Quote, RenderSql, SqlBuilder};

impl RenderSql for CreateApplicationPackageOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE APPLICATION PACKAGE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("DISTRIBUTION", self.distribution)
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for ApplicationPackageSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("DATA_RETENTION_TIME_IN_DAYS", self.data_retention_time_in_days)
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days,
            )
            .parameter_quoted("DEFAULT_DDL_COLLATION", self.default_ddl_collation.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("DISTRIBUTION", self.distribution);
    }
}

impl RenderSql for ApplicationPackageUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list("UNSET", &self.properties());
    }
}

impl RenderSql for ReleaseTarget {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("VERSION", Some(&self.version))
            .parameter("PATCH", Some(self.patch));
    }
}

impl RenderSql for ModifyReleaseDirective {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword_value("MODIFY RELEASE DIRECTIVE", Some(&self.name), Quote::None)
            .nested(Some(&self.target));
    }
}

impl RenderSql for SetReleaseDirective {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword_value("SET RELEASE DIRECTIVE", Some(&self.name), Quote::None)
            .list_paren_eq("ACCOUNTS", &self.accounts)
            .nested(Some(&self.target));
    }
}

impl RenderSql for AddVersion {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ADD VERSION")
            .keyword_value("", self.version.as_ref(), Quote::None)
            .keyword_value("USING", Some(&self.using), Quote::Single)
            .parameter_quoted("LABEL", self.label.as_ref());
    }
}

impl RenderSql for AddPatchForVersion {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ADD PATCH")
            .keyword_value("", self.patch, Quote::None)
            .keyword_value("FOR VERSION", Some(&self.version), Quote::None)
            .keyword_value("USING", Some(&self.using), Quote::Single)
            .parameter_quoted("LABEL", self.label.as_ref());
    }
}

impl RenderSql for AlterApplicationPackageOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER APPLICATION PACKAGE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .nested(self.modify_release_directive.as_ref());
        if let Some(target) = &self.set_default_release_directive {
            sql.keyword("SET DEFAULT RELEASE DIRECTIVE").nested(Some(target));
        }
        sql.nested(self.set_release_directive.as_ref())
            .keyword_value(
                "UNSET RELEASE DIRECTIVE",
                self.unset_release_directive.as_ref(),
                Quote::None,
            )
            .nested(self.add_version.as_ref())
            .keyword_value("DROP VERSION", self.drop_version.as_ref(), Quote::None)
            .nested(self.add_patch_for_version.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::{AccountIdentifier, AccountObjectIdentifier};
    use crate::objects::application_package::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("PKG")
    }

    #[test]
    fn test_create() {
        let opts = CreateApplicationPackageRequest::new(id())
            .with_if_not_exists(true)
            .with_distribution(Distribution::External)
            .with_comment("pkg")
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE APPLICATION PACKAGE IF NOT EXISTS \"PKG\" COMMENT = 'pkg' DISTRIBUTION = EXTERNAL"
        );
    }

    #[test]
    fn test_release_directives() {
        let default = AlterApplicationPackageRequest::new(id())
            .with_set_default_release_directive(ReleaseTarget::new("V1", 2))
            .to_options();
        assert_eq!(
            default.to_sql(),
            "ALTER APPLICATION PACKAGE \"PKG\" SET DEFAULT RELEASE DIRECTIVE VERSION = V1 PATCH = 2"
        );
        let set = AlterApplicationPackageRequest::new(id())
            .with_set_release_directive(SetReleaseDirective {
                name: "EARLY".into(),
                accounts: vec![AccountIdentifier::new("ORG", "A1")],
                target: ReleaseTarget::new("V2", 0),
            })
            .to_options();
        assert_eq!(
            set.to_sql(),
            "ALTER APPLICATION PACKAGE \"PKG\" SET RELEASE DIRECTIVE EARLY \
             ACCOUNTS = (\"ORG\".\"A1\") VERSION = V2 PATCH = 0"
        );
        let modify = AlterApplicationPackageRequest::new(id())
            .with_modify_release_directive(ModifyReleaseDirective {
                name: "EARLY".into(),
                target: ReleaseTarget::new("V2", 1),
            })
            .to_options();
        assert_eq!(
            modify.to_sql(),
            "ALTER APPLICATION PACKAGE \"PKG\" MODIFY RELEASE DIRECTIVE EARLY VERSION = V2 PATCH = 1"
        );
    }

    #[test]
    fn test_versions() {
        let add = AlterApplicationPackageRequest::new(id())
            .with_add_version(AddVersion::new("@db.s.stage/v1").with_version("V1").with_label("first"))
            .to_options();
        assert_eq!(
            add.to_sql(),
            "ALTER APPLICATION PACKAGE \"PKG\" ADD VERSION V1 USING '@db.s.stage/v1' LABEL = 'first'"
        );
        let patch = AlterApplicationPackageRequest::new(id())
            .with_add_patch_for_version(AddPatchForVersion::new("V1", "@db.s.stage/p"))
            .to_options();
        assert_eq!(
            patch.to_sql(),
            "ALTER APPLICATION PACKAGE \"PKG\" ADD PATCH FOR VERSION V1 USING '@db.s.stage/p'"
        );
        let unset = AlterApplicationPackageRequest::new(id())
            .with_unset(ApplicationPackageUnset::default().with_distribution(true))
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER APPLICATION PACKAGE \"PKG\" UNSET DISTRIBUTION"
        );
    }
}
