use crate::objects::external_volume::{
    AlterExternalVolumeOptions, CreateExternalVolumeOptions, ExternalVolumeSet,
    StorageEncryption, StorageLocation, StorageLocationProvider,
};
use crate::render::{Quote, RenderSql, SqlBuilder};

impl RenderSql for StorageEncryption {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter_quoted("TYPE", Some(&self.encryption_type))
            .parameter_quoted("KMS_KEY_ID", self.kms_key_id.as_ref());
    }
}

impl RenderSql for StorageLocation {
    fn render(&self, sql: &mut SqlBuilder) {
        let mut inner = SqlBuilder::new();
        inner.parameter_quoted("NAME", Some(&self.name));
        match &self.provider {
            StorageLocationProvider::S3 {
                protocol,
                aws_role_arn,
                aws_external_id,
                encryption,
            } => {
                inner
                    .parameter_quoted("STORAGE_PROVIDER", Some(protocol))
                    .parameter_quoted("STORAGE_BASE_URL", Some(&self.base_url))
                    .parameter_quoted("STORAGE_AWS_ROLE_ARN", Some(aws_role_arn))
                    .parameter_quoted("STORAGE_AWS_EXTERNAL_ID", aws_external_id.as_ref())
                    .nested_paren_eq("ENCRYPTION", encryption.as_ref());
            }
            StorageLocationProvider::Gcs { encryption } => {
                inner
                    .parameter_quoted("STORAGE_PROVIDER", Some("GCS"))
                    .parameter_quoted("STORAGE_BASE_URL", Some(&self.base_url))
                    .nested_paren_eq("ENCRYPTION", encryption.as_ref());
            }
            StorageLocationProvider::Azure { tenant_id } => {
                inner
                    .parameter_quoted("STORAGE_PROVIDER", Some("AZURE"))
                    .parameter_quoted("AZURE_TENANT_ID", Some(tenant_id))
                    .parameter_quoted("STORAGE_BASE_URL", Some(&self.base_url));
            }
        }
        sql.raw(format!("({})", inner.finish()));
    }
}

impl RenderSql for CreateExternalVolumeOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("EXTERNAL VOLUME")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested_list("STORAGE_LOCATIONS =", &self.storage_locations, ", ", true)
            .parameter("ALLOW_WRITES", self.allow_writes)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for ExternalVolumeSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("ALLOW_WRITES", self.allow_writes)
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for AlterExternalVolumeOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER EXTERNAL VOLUME")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_value(
                "REMOVE STORAGE_LOCATION",
                self.remove_storage_location.as_ref(),
                Quote::Single,
            )
            .nested(self.set.as_ref());
        if let Some(location) = &self.add_storage_location {
            sql.keyword("ADD STORAGE_LOCATION =").nested(Some(location));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::AccountObjectIdentifier;
    use crate::objects::external_volume::*;
    use crate::render::RenderSql;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("EV")
    }

    #[test]
    fn test_create() {
        let gcs = StorageLocation {
            provider: StorageLocationProvider::Gcs {
                encryption: Some(StorageEncryption::new("GCS_SSE_KMS").with_kms_key_id("k1")),
            },
            ..StorageLocation::gcs("g", "gcs://bucket/")
        };
        let opts = CreateExternalVolumeRequest::new(
            id(),
            [
                StorageLocation::s3("s", "s3://bucket/", "arn:aws:iam::1:role/r"),
                gcs,
            ],
        )
        .with_allow_writes(true)
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE EXTERNAL VOLUME \"EV\" STORAGE_LOCATIONS = (\
             (NAME = 's' STORAGE_PROVIDER = 'S3' STORAGE_BASE_URL = 's3://bucket/' \
             STORAGE_AWS_ROLE_ARN = 'arn:aws:iam::1:role/r'), \
             (NAME = 'g' STORAGE_PROVIDER = 'GCS' STORAGE_BASE_URL = 'gcs://bucket/' \
             ENCRYPTION = (TYPE = 'GCS_SSE_KMS' KMS_KEY_ID = 'k1'))) ALLOW_WRITES = true"
        );
    }

    #[test]
    fn test_alter() {
        let remove = AlterExternalVolumeRequest::new(id())
            .with_if_exists(true)
            .with_remove_storage_location("s")
            .to_options();
        assert_eq!(
            remove.to_sql(),
            "ALTER EXTERNAL VOLUME IF EXISTS \"EV\" REMOVE STORAGE_LOCATION 's'"
        );
        let add = AlterExternalVolumeRequest::new(id())
            .with_add_storage_location(StorageLocation::azure("a", "azure://acc/c", "t1"))
            .to_options();
        assert_eq!(
            add.to_sql(),
            "ALTER EXTERNAL VOLUME \"EV\" ADD STORAGE_LOCATION = \
             (NAME = 'a' STORAGE_PROVIDER = 'AZURE' AZURE_TENANT_ID = 't1' \
             STORAGE_BASE_URL = 'azure://acc/c')"
        );
    }

    #[test]
    fn test_show_drop() {
        assert_eq!(
            ShowExternalVolumeRequest::new()
                .with_like(crate::common::Like::new("E%"))
                .to_options()
                .to_sql(),
            "SHOW EXTERNAL VOLUMES LIKE 'E%'"
        );
        assert_eq!(
            DropExternalVolumeRequest::new(id()).to_options().to_sql(),
            "DROP EXTERNAL VOLUME \"EV\""
        );
    }
}
