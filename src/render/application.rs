use crate::objects::application::{
    AlterApplicationOptions, ApplicationSet, ApplicationUnset, ApplicationUpgrade,
    ApplicationVersion, CreateApplicationOptions, DropApplicationOptions, VersionAndPatch,
};
use crate::render::{Quote, RenderSql, SqlBuilder};

impl RenderSql for VersionAndPatch {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword_value("VERSION", Some(&self.version), Quote::None)
            .keyword_value("PATCH", self.patch, Quote::None);
    }
}

impl RenderSql for ApplicationVersion {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            ApplicationVersion::Version(version) => {
                sql.keyword("USING").nested(Some(version));
            }
            ApplicationVersion::ReleaseDirective(directive) => {
                sql.keyword_value("USING RELEASE DIRECTIVE", Some(directive), Quote::None);
            }
        }
    }
}

impl RenderSql for CreateApplicationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE APPLICATION")
            .identifier(&self.name)
            .keyword_identifier("FROM APPLICATION PACKAGE", Some(&self.package_name))
            .nested(self.version.as_ref())
            .parameter("DEBUG_MODE", self.debug_mode)
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for ApplicationSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .parameter("SHARE_EVENTS_WITH_PROVIDER", self.share_events_with_provider)
            .parameter("DEBUG_MODE", self.debug_mode);
    }
}

impl RenderSql for ApplicationUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.comment, "COMMENT"),
                (self.share_events_with_provider, "SHARE_EVENTS_WITH_PROVIDER"),
                (self.debug_mode, "DEBUG_MODE"),
            ],
        );
    }
}

impl RenderSql for ApplicationUpgrade {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("UPGRADE");
        if let Some(using) = &self.using {
            sql.keyword("USING").nested(Some(using));
        }
    }
}

impl RenderSql for AlterApplicationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER APPLICATION")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .nested(self.upgrade.as_ref())
            .flag(self.unset_references, "UNSET REFERENCES")
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

impl RenderSql for DropApplicationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("DROP APPLICATION")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .flag(self.cascade, "CASCADE");
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::AccountObjectIdentifier;
    use crate::objects::application::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("APP")
    }

    #[test]
    fn test_create() {
        let opts = CreateApplicationRequest::new(id(), AccountObjectIdentifier::new("PKG"))
            .with_version(ApplicationVersion::Version(
                VersionAndPatch::new("V1").with_patch(0),
            ))
            .with_debug_mode(true)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE APPLICATION \"APP\" FROM APPLICATION PACKAGE \"PKG\" \
             USING VERSION V1 PATCH 0 DEBUG_MODE = true"
        );
        let directive = CreateApplicationRequest::new(id(), AccountObjectIdentifier::new("PKG"))
            .with_version(ApplicationVersion::ReleaseDirective("EARLY".into()))
            .to_options();
        assert_eq!(
            directive.to_sql(),
            "CREATE APPLICATION \"APP\" FROM APPLICATION PACKAGE \"PKG\" \
             USING RELEASE DIRECTIVE EARLY"
        );
    }

    #[test]
    fn test_alter() {
        let upgrade = AlterApplicationRequest::new(id())
            .with_upgrade(ApplicationUpgrade {
                using: Some(VersionAndPatch::new("V2")),
            })
            .to_options();
        assert_eq!(
            upgrade.to_sql(),
            "ALTER APPLICATION \"APP\" UPGRADE USING VERSION V2"
        );
        let unset = AlterApplicationRequest::new(id())
            .with_if_exists(true)
            .with_unset(ApplicationUnset::default().with_comment(true).with_debug_mode(true))
            .to_options();
        assert_eq!(
            unset.to_sql(),
            "ALTER APPLICATION IF EXISTS \"APP\" UNSET COMMENT, DEBUG_MODE"
        );
    }

    #[test]
    fn test_drop_show() {
        assert_eq!(
            DropApplicationRequest::new(id())
                .with_cascade(true)
                .to_options()
                .to_sql(),
            "DROP APPLICATION \"APP\" CASCADE"
        );
        assert_eq!(
            ShowApplicationRequest::new()
                .with_starts_with("A")
                .to_options()
                .to_sql(),
            "SHOW APPLICATIONS STARTS WITH 'A'"
        );
        assert_eq!(
            DescribeApplicationOptions::new(id()).to_sql(),
            "DESCRIBE APPLICATION \"APP\""
        );
    }
}
