use crate::objects::stage::{
    AlterStageOptions, AzureEncryption, CreateStageOptions, DirectoryRefresh, ExternalAzureStage,
    ExternalGcsStage, ExternalS3Stage, GcsEncryption, InternalStage, InternalStageEncryption,
    S3Credentials, S3Encryption, StageDirectory, StageLocation, StageSet,
};
use crate::render::{RenderSql, SqlBuilder, escape_string};

impl RenderSql for InternalStageEncryption {
    fn render(&self, sql: &mut SqlBuilder) {
        let kind = match self {
            InternalStageEncryption::SnowflakeFull => "SNOWFLAKE_FULL",
            InternalStageEncryption::SnowflakeSse => "SNOWFLAKE_SSE",
        };
        sql.parameter_quoted("TYPE", Some(kind));
    }
}

impl RenderSql for S3Credentials {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            S3Credentials::Keys {
                aws_key_id,
                aws_secret_key,
                aws_token,
            } => {
                sql.parameter_quoted("AWS_KEY_ID", Some(aws_key_id))
                    .parameter_quoted("AWS_SECRET_KEY", Some(aws_secret_key))
                    .parameter_quoted("AWS_TOKEN", aws_token.as_ref());
            }
            S3Credentials::Role(role) => {
                sql.parameter_quoted("AWS_ROLE", Some(role));
            }
        }
    }
}

impl RenderSql for S3Encryption {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            S3Encryption::AwsCse { master_key } => {
                sql.parameter_quoted("TYPE", Some("AWS_CSE"))
                    .parameter_quoted("MASTER_KEY", Some(master_key));
            }
            S3Encryption::AwsSseS3 => {
                sql.parameter_quoted("TYPE", Some("AWS_SSE_S3"));
            }
            S3Encryption::AwsSseKms { kms_key_id } => {
                sql.parameter_quoted("TYPE", Some("AWS_SSE_KMS"))
                    .parameter_quoted("KMS_KEY_ID", kms_key_id.as_ref());
            }
            S3Encryption::None => {
                sql.parameter("TYPE", Some("NONE"));
            }
        }
    }
}

impl RenderSql for GcsEncryption {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            GcsEncryption::GcsSseKms { kms_key_id } => {
                sql.parameter_quoted("TYPE", Some("GCS_SSE_KMS"))
                    .parameter_quoted("KMS_KEY_ID", kms_key_id.as_ref());
            }
            GcsEncryption::None => {
                sql.parameter("TYPE", Some("NONE"));
            }
        }
    }
}

impl RenderSql for AzureEncryption {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            AzureEncryption::AzureCse { master_key } => {
                sql.parameter_quoted("TYPE", Some("AZURE_CSE"))
                    .parameter_quoted("MASTER_KEY", Some(master_key));
            }
            AzureEncryption::None => {
                sql.parameter("TYPE", Some("NONE"));
            }
        }
    }
}

impl RenderSql for InternalStage {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.nested_paren_eq("ENCRYPTION", self.encryption.as_ref());
    }
}

impl RenderSql for ExternalS3Stage {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter_quoted("URL", Some(&self.url))
            .parameter("STORAGE_INTEGRATION", self.storage_integration.as_ref())
            .nested_paren_eq("CREDENTIALS", self.credentials.as_ref())
            .nested_paren_eq("ENCRYPTION", self.encryption.as_ref());
    }
}

impl RenderSql for ExternalGcsStage {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter_quoted("URL", Some(&self.url))
            .parameter("STORAGE_INTEGRATION", self.storage_integration.as_ref())
            .nested_paren_eq("ENCRYPTION", self.encryption.as_ref());
    }
}

impl RenderSql for ExternalAzureStage {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter_quoted("URL", Some(&self.url))
            .parameter("STORAGE_INTEGRATION", self.storage_integration.as_ref());
        if let Some(token) = &self.sas_token {
            sql.raw(format!(
                "CREDENTIALS = (AZURE_SAS_TOKEN = {})",
                escape_string(token)
            ));
        }
        sql.nested_paren_eq("ENCRYPTION", self.encryption.as_ref());
    }
}

impl RenderSql for StageLocation {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            StageLocation::Internal(stage) => stage.render(sql),
            StageLocation::S3(stage) => stage.render(sql),
            StageLocation::Gcs(stage) => stage.render(sql),
            StageLocation::Azure(stage) => stage.render(sql),
        }
    }
}

impl RenderSql for StageDirectory {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.parameter("ENABLE", Some(self.enable))
            .parameter("REFRESH_ON_CREATE", self.refresh_on_create)
            .parameter("AUTO_REFRESH", self.auto_refresh)
            .parameter_quoted("NOTIFICATION_INTEGRATION", self.notification_integration.as_ref());
    }
}

impl RenderSql for CreateStageOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .flag(self.temporary, "TEMPORARY")
            .keyword("STAGE")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(Some(&self.location))
            .nested_paren_eq("DIRECTORY", self.directory.as_ref())
            .nested_paren_eq("FILE_FORMAT", self.file_format.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref())
            .list_paren("TAG", &self.tag);
    }
}

impl RenderSql for StageSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .nested(self.location.as_ref())
            .nested_paren_eq("FILE_FORMAT", self.file_format.as_ref())
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for DirectoryRefresh {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("REFRESH")
            .parameter_quoted("SUBPATH", self.subpath.as_ref());
    }
}

impl RenderSql for AlterStageOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("ALTER STAGE")
            .flag(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(self.set.as_ref());
        if let Some(enable) = self.set_directory_enable {
            sql.raw(format!("SET DIRECTORY = (ENABLE = {enable})"));
        }
        sql.nested(self.refresh_directory.as_ref())
            .list_comma("SET TAG", &self.set_tag)
            .list_comma("UNSET TAG", &self.unset_tag);
    }
}

#[cfg(test)]
mod tests {
    use crate::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use crate::objects::file_format::{CsvOptions, FileFormatOptions, StageFileFormat};
    use crate::objects::stage::*;
    use crate::render::RenderSql;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "STG")
    }

    #[test]
    fn test_create_internal() {
        let opts = CreateStageRequest::new(
            id(),
            StageLocation::Internal(
                InternalStage::default().with_encryption(InternalStageEncryption::SnowflakeSse),
            ),
        )
        .with_directory(StageDirectory::enabled())
        .with_file_format(StageFileFormat::Inline(FileFormatOptions::Csv(
            CsvOptions::default().with_skip_header(1),
        )))
        .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE STAGE \"DB\".\"S\".\"STG\" ENCRYPTION = (TYPE = 'SNOWFLAKE_SSE') \
             DIRECTORY = (ENABLE = true) FILE_FORMAT = (TYPE = CSV SKIP_HEADER = 1)"
        );
    }

    #[test]
    fn test_create_s3() {
        let location = StageLocation::S3(
            ExternalS3Stage::new("s3://bucket/path/")
                .with_credentials(S3Credentials::Keys {
                    aws_key_id: "id".into(),
                    aws_secret_key: "secret".into(),
                    aws_token: None,
                })
                .with_encryption(S3Encryption::AwsSseKms {
                    kms_key_id: Some("k1".into()),
                }),
        );
        let opts = CreateStageRequest::new(id(), location)
            .with_or_replace(true)
            .to_options();
        assert_eq!(
            opts.to_sql(),
            "CREATE OR REPLACE STAGE \"DB\".\"S\".\"STG\" URL = 's3://bucket/path/' \
             CREDENTIALS = (AWS_KEY_ID = 'id' AWS_SECRET_KEY = 'secret') \
             ENCRYPTION = (TYPE = 'AWS_SSE_KMS' KMS_KEY_ID = 'k1')"
        );
    }

    #[test]
    fn test_create_gcs_and_azure() {
        let gcs = CreateStageRequest::new(
            id(),
            StageLocation::Gcs(
                ExternalGcsStage::new("gcs://bucket/")
                    .with_storage_integration(AccountObjectIdentifier::new("GCS_INT")),
            ),
        )
        .with_directory(StageDirectory::enabled().with_auto_refresh(false))
        .to_options();
        assert_eq!(
            gcs.to_sql(),
            "CREATE STAGE \"DB\".\"S\".\"STG\" URL = 'gcs://bucket/' \
             STORAGE_INTEGRATION = \"GCS_INT\" DIRECTORY = (ENABLE = true AUTO_REFRESH = false)"
        );
        let azure = CreateStageRequest::new(
            id(),
            StageLocation::Azure(
                ExternalAzureStage::new("azure://acct.blob.core.windows.net/c/")
                    .with_sas_token("tok")
                    .with_encryption(AzureEncryption::None),
            ),
        )
        .to_options();
        assert_eq!(
            azure.to_sql(),
            "CREATE STAGE \"DB\".\"S\".\"STG\" URL = 'azure://acct.blob.core.windows.net/c/' \
             CREDENTIALS = (AZURE_SAS_TOKEN = 'tok') ENCRYPTION = (TYPE = NONE)"
        );
    }

    #[test]
    fn test_alter() {
        let refresh = AlterStageRequest::new(id())
            .with_refresh_directory(DirectoryRefresh {
                subpath: Some("2024/".into()),
            })
            .to_options();
        assert_eq!(
            refresh.to_sql(),
            "ALTER STAGE \"DB\".\"S\".\"STG\" REFRESH SUBPATH = '2024/'"
        );
        let directory = AlterStageRequest::new(id())
            .with_set_directory_enable(false)
            .to_options();
        assert_eq!(
            directory.to_sql(),
            "ALTER STAGE \"DB\".\"S\".\"STG\" SET DIRECTORY = (ENABLE = false)"
        );
        let named = AlterStageRequest::new(id())
            .with_set(StageSet::default().with_file_format(StageFileFormat::Named(
                SchemaObjectIdentifier::new("DB", "S", "FF"),
            )))
            .to_options();
        assert_eq!(
            named.to_sql(),
            "ALTER STAGE \"DB\".\"S\".\"STG\" SET FILE_FORMAT = (FORMAT_NAME = '\"DB\".\"S\".\"FF\"')"
        );
    }
}
