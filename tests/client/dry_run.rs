use anyhow::Result;
use snowflake_sdk::identifiers::{AccountObjectIdentifier, SchemaObjectIdentifier};
use snowflake_sdk::objects::secret::{CreateSecretRequest, SecretKind};
use snowflake_sdk::objects::table::{AlterTableRequest, TableSet};
use snowflake_sdk::objects::warehouse::{CreateWarehouseRequest, ShowWarehouseRequest};
use snowflake_sdk::{ErrorKind, Row};

use crate::helpers::driver::RecordingDriver;
use crate::helpers::logs::CapturedLogs;

#[tokio::test]
async fn test_dry_run_skips_writes() -> Result<()> {
    let driver = RecordingDriver::new();
    let client = driver.client();
    client.set_dry_run(true);

    client
        .warehouses()
        .create(&CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1")))
        .await?;
    client
        .tables()
        .alter(
            &AlterTableRequest::new(SchemaObjectIdentifier::new("DB1", "S1", "T1"))
                .with_set(TableSet::default().with_data_retention_time_in_days(7)),
        )
        .await?;

    assert!(driver.statements().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dry_run_still_validates() {
    let driver = RecordingDriver::new();
    let client = driver.client();
    client.set_dry_run(true);

    let err = client
        .warehouses()
        .create(&CreateWarehouseRequest::new(AccountObjectIdentifier::new("")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::InvalidObjectIdentifier));
}

#[tokio::test]
async fn test_dry_run_still_reads() -> Result<()> {
    let driver = RecordingDriver::new();
    driver.push_rows(vec![Row::from_pairs([("name", "WH1"), ("state", "SUSPENDED")])]);
    let client = driver.client();
    client.set_dry_run(true);

    let warehouses = client.warehouses().show(&ShowWarehouseRequest::new()).await?;

    assert_eq!(warehouses.len(), 1);
    assert_eq!(driver.statements(), vec!["SHOW WAREHOUSES"]);
    Ok(())
}

#[tokio::test]
async fn test_dry_run_is_shared_between_clones() -> Result<()> {
    let driver = RecordingDriver::new();
    let client = driver.client();
    let clone = client.clone();

    clone.set_dry_run(true);
    assert!(client.dry_run());
    client
        .warehouses()
        .create(&CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1")))
        .await?;
    assert!(driver.statements().is_empty());

    clone.set_dry_run(false);
    client
        .warehouses()
        .create(&CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1")))
        .await?;
    assert_eq!(driver.statements(), vec![r#"CREATE WAREHOUSE "WH1""#]);
    Ok(())
}

#[tokio::test]
async fn test_logged_statements_hide_credentials() -> Result<()> {
    let (logs, _guard) = CapturedLogs::install();
    let driver = RecordingDriver::new();
    let client = driver.client();
    let secret = CreateSecretRequest::new(
        SchemaObjectIdentifier::new("DB1", "S1", "BASIC"),
        SecretKind::BasicAuthentication {
            username: "svc".into(),
            password: "hunter2-s3cret".into(),
        },
    );

    client.set_dry_run(true);
    client.secrets().create(&secret).await?;
    client.set_dry_run(false);
    client.secrets().create(&secret).await?;

    let output = logs.contents();
    assert!(output.contains("dry run, statement not sent"), "{output}");
    assert!(output.contains("PASSWORD = '***'"), "{output}");
    assert!(!output.contains("hunter2-s3cret"), "{output}");
    assert_eq!(driver.statements().len(), 1);
    assert!(driver.statements()[0].contains("PASSWORD = 'hunter2-s3cret'"));
    Ok(())
}
