use crate::objects::integration::{
    AlterApiIntegrationOptions, AlterIntegrationOptions, AlterNotificationIntegrationOptions,
    AlterStorageIntegrationOptions, ApiIntegrationSet, ApiIntegrationUnset, ApiProvider,
    CreateApiIntegrationOptions, CreateNotificationIntegrationOptions,
    CreateStorageIntegrationOptions, NotificationIntegrationSet, NotificationIntegrationUnset,
    NotificationTarget, StorageIntegrationSet, StorageIntegrationUnset, StorageProvider,
};
use crate::render::{RenderSql, SqlBuilder, quoted};

fn render_alter<S: RenderSql, U: RenderSql>(
    sql: &mut SqlBuilder,
    keyword: &str,
    options: &AlterIntegrationOptions<S, U>,
) {
    sql.keyword(keyword)
        .flag(options.if_exists, "IF EXISTS")
        .identifier(&options.name)
        .nested(options.set.as_ref())
        .nested(options.unset.as_ref())
        .list_comma("SET TAG", &options.set_tag)
        .list_comma("UNSET TAG", &options.unset_tag);
}

impl RenderSql for ApiProvider {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            ApiProvider::Aws {
                provider,
                role_arn,
                api_key,
            } => {
                sql.parameter("API_PROVIDER", Some(provider))
                    .parameter_quoted("API_AWS_ROLE_ARN", Some(role_arn))
                    .parameter_quoted("API_KEY", api_key.as_ref());
            }
            ApiProvider::Azure {
                tenant_id,
                ad_application_id,
                api_key,
            } => {
                sql.parameter("API_PROVIDER", Some("azure_api_management"))
                    .parameter_quoted("AZURE_TENANT_ID", Some(tenant_id))
                    .parameter_quoted("AZURE_AD_APPLICATION_ID", Some(ad_application_id))
                    .parameter_quoted("API_KEY", api_key.as_ref());
            }
            ApiProvider::Google { audience } => {
                sql.parameter("API_PROVIDER", Some("google_api_gateway"))
                    .parameter_quoted("GOOGLE_AUDIENCE", Some(audience));
            }
            ApiProvider::Git {
                allowed_authentication_secrets,
            } => {
                sql.parameter("API_PROVIDER", Some("git_https_api"))
                    .list_paren_eq(
                        "ALLOWED_AUTHENTICATION_SECRETS",
                        allowed_authentication_secrets,
                    );
            }
        }
    }
}

impl RenderSql for CreateApiIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("API INTEGRATION")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(Some(&self.provider))
            .list_paren_eq("API_ALLOWED_PREFIXES", quoted(&self.api_allowed_prefixes))
            .list_paren_eq("API_BLOCKED_PREFIXES", quoted(&self.api_blocked_prefixes))
            .parameter("ENABLED", Some(self.enabled))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for ApiIntegrationSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter_quoted("API_AWS_ROLE_ARN", self.aws_role_arn.as_ref())
            .parameter_quoted("AZURE_AD_APPLICATION_ID", self.azure_ad_application_id.as_ref())
            .parameter_quoted("API_KEY", self.api_key.as_ref())
            .parameter("ENABLED", self.enabled)
            .list_paren_eq("API_ALLOWED_PREFIXES", quoted(&self.api_allowed_prefixes))
            .list_paren_eq("API_BLOCKED_PREFIXES", quoted(&self.api_blocked_prefixes))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for ApiIntegrationUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.api_key, "API_KEY"),
                (self.enabled, "ENABLED"),
                (self.api_blocked_prefixes, "API_BLOCKED_PREFIXES"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterApiIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        render_alter(sql, "ALTER API INTEGRATION", self);
    }
}

impl RenderSql for StorageProvider {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            StorageProvider::S3 {
                protocol,
                role_arn,
                object_acl,
            } => {
                sql.parameter_quoted("STORAGE_PROVIDER", Some(protocol))
                    .parameter_quoted("STORAGE_AWS_ROLE_ARN", Some(role_arn))
                    .parameter_quoted("STORAGE_AWS_OBJECT_ACL", object_acl.as_ref());
            }
            StorageProvider::Gcs => {
                sql.parameter_quoted("STORAGE_PROVIDER", Some("GCS"));
            }
            StorageProvider::Azure { tenant_id } => {
                sql.parameter_quoted("STORAGE_PROVIDER", Some("AZURE"))
                    .parameter_quoted("AZURE_TENANT_ID", Some(tenant_id));
            }
        }
    }
}

impl RenderSql for CreateStorageIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("STORAGE INTEGRATION")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .keyword("TYPE = EXTERNAL_STAGE")
            .nested(Some(&self.provider))
            .parameter("ENABLED", Some(self.enabled))
            .list_paren_eq(
                "STORAGE_ALLOWED_LOCATIONS",
                quoted(&self.storage_allowed_locations),
            )
            .list_paren_eq(
                "STORAGE_BLOCKED_LOCATIONS",
                quoted(&self.storage_blocked_locations),
            )
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for StorageIntegrationSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter_quoted("STORAGE_AWS_ROLE_ARN", self.s3_role_arn.as_ref())
            .parameter_quoted("STORAGE_AWS_OBJECT_ACL", self.s3_object_acl.as_ref())
            .parameter_quoted("AZURE_TENANT_ID", self.azure_tenant_id.as_ref())
            .parameter("ENABLED", self.enabled)
            .list_paren_eq(
                "STORAGE_ALLOWED_LOCATIONS",
                quoted(&self.storage_allowed_locations),
            )
            .list_paren_eq(
                "STORAGE_BLOCKED_LOCATIONS",
                quoted(&self.storage_blocked_locations),
            )
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for StorageIntegrationUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.storage_aws_object_acl, "STORAGE_AWS_OBJECT_ACL"),
                (self.enabled, "ENABLED"),
                (self.storage_blocked_locations, "STORAGE_BLOCKED_LOCATIONS"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterStorageIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        render_alter(sql, "ALTER STORAGE INTEGRATION", self);
    }
}

impl RenderSql for NotificationTarget {
    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            NotificationTarget::AutoGcpPubsub { subscription_name } => {
                sql.keyword("TYPE = QUEUE NOTIFICATION_PROVIDER = GCP_PUBSUB")
                    .parameter_quoted("GCP_PUBSUB_SUBSCRIPTION_NAME", Some(subscription_name));
            }
            NotificationTarget::AutoAzureStorageQueue {
                primary_uri,
                tenant_id,
            } => {
                sql.keyword("TYPE = QUEUE NOTIFICATION_PROVIDER = AZURE_STORAGE_QUEUE")
                    .parameter_quoted("AZURE_STORAGE_QUEUE_PRIMARY_URI", Some(primary_uri))
                    .parameter_quoted("AZURE_TENANT_ID", Some(tenant_id));
            }
            NotificationTarget::PushAwsSns {
                topic_arn,
                role_arn,
            } => {
                sql.keyword("TYPE = QUEUE DIRECTION = OUTBOUND NOTIFICATION_PROVIDER = AWS_SNS")
                    .parameter_quoted("AWS_SNS_TOPIC_ARN", Some(topic_arn))
                    .parameter_quoted("AWS_SNS_ROLE_ARN", Some(role_arn));
            }
            NotificationTarget::PushGcpPubsub { topic_name } => {
                sql.keyword("TYPE = QUEUE DIRECTION = OUTBOUND NOTIFICATION_PROVIDER = GCP_PUBSUB")
                    .parameter_quoted("GCP_PUBSUB_TOPIC_NAME", Some(topic_name));
            }
            NotificationTarget::PushAzureEventGrid {
                topic_endpoint,
                tenant_id,
            } => {
                sql.keyword(
                    "TYPE = QUEUE DIRECTION = OUTBOUND NOTIFICATION_PROVIDER = AZURE_EVENT_GRID",
                )
                .parameter_quoted("AZURE_EVENT_GRID_TOPIC_ENDPOINT", Some(topic_endpoint))
                .parameter_quoted("AZURE_TENANT_ID", Some(tenant_id));
            }
            NotificationTarget::Email { allowed_recipients } => {
                sql.keyword("TYPE = EMAIL")
                    .list_paren_eq("ALLOWED_RECIPIENTS", quoted(allowed_recipients));
            }
        }
    }
}

impl RenderSql for CreateNotificationIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("CREATE")
            .flag(self.or_replace, "OR REPLACE")
            .keyword("NOTIFICATION INTEGRATION")
            .flag(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("ENABLED", Some(self.enabled))
            .nested(Some(&self.target))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for NotificationIntegrationSet {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.keyword("SET")
            .parameter("ENABLED", self.enabled)
            .list_paren_eq("ALLOWED_RECIPIENTS", quoted(&self.allowed_recipients))
            .parameter_quoted("COMMENT", self.comment.as_ref());
    }
}

impl RenderSql for NotificationIntegrationUnset {
    fn render(&self, sql: &mut SqlBuilder) {
        sql.flag_list(
            "UNSET",
            &[
                (self.enabled, "ENABLED"),
                (self.allowed_recipients, "ALLOWED_RECIPIENTS"),
                (self.comment, "COMMENT"),
            ],
        );
    }
}

impl RenderSql for AlterNotificationIntegrationOptions {
    fn render(&self, sql: &mut SqlBuilder) {
        render_alter(sql, "ALTER NOTIFICATION INTEGRATION", self);
    }
}
