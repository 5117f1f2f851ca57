use std::time::Duration;

use anyhow::Result;
use snowflake_sdk::common::{In, Like};
use snowflake_sdk::identifiers::{AccountObjectIdentifier, DatabaseObjectIdentifier};
use snowflake_sdk::objects::role::CreateRoleRequest;
use snowflake_sdk::objects::stream::ShowStreamRequest;
use snowflake_sdk::objects::warehouse::{
    CreateWarehouseRequest, DropWarehouseRequest, ShowWarehouseRequest, WarehouseSize,
    WarehouseState,
};
use snowflake_sdk::{ErrorKind, Row};
use tokio_util::sync::CancellationToken;

use crate::helpers::driver::RecordingDriver;

fn warehouse_row(name: &str) -> Row {
    Row::new([
        ("name", Some(name)),
        ("state", Some("STARTED")),
        ("size", Some("X-Small")),
        ("auto_suspend", Some("60")),
        ("auto_resume", Some("true")),
        ("comment", None),
    ])
}

#[tokio::test]
async fn test_write_sends_rendered_statement() -> Result<()> {
    let driver = RecordingDriver::new();
    let client = driver.client();

    client
        .warehouses()
        .create(
            &CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1"))
                .with_warehouse_size(WarehouseSize::XSmall)
                .with_auto_suspend(60),
        )
        .await?;
    client
        .warehouses()
        .drop(&DropWarehouseRequest::new(AccountObjectIdentifier::new("WH1")).with_if_exists(true))
        .await?;

    assert_eq!(
        driver.statements(),
        vec![
            r#"CREATE WAREHOUSE "WH1" WAREHOUSE_SIZE = XSMALL AUTO_SUSPEND = 60"#,
            r#"DROP WAREHOUSE IF EXISTS "WH1""#,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_request_never_reaches_driver() {
    let driver = RecordingDriver::new();
    let client = driver.client();

    let err = client
        .roles()
        .create(
            &CreateRoleRequest::new(AccountObjectIdentifier::new("R1"))
                .with_or_replace(true)
                .with_if_not_exists(true),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::ExactlyOneOf));
    assert!(driver.statements().is_empty());
}

#[tokio::test]
async fn test_show_decodes_rows() -> Result<()> {
    let driver = RecordingDriver::new();
    driver.push_rows(vec![warehouse_row("WH1"), warehouse_row("WH2")]);
    let client = driver.client();

    let warehouses = client
        .warehouses()
        .show(&ShowWarehouseRequest::new().with_like(Like::new("WH%")))
        .await?;

    assert_eq!(driver.statements(), vec!["SHOW WAREHOUSES LIKE 'WH%'"]);
    assert_eq!(warehouses.len(), 2);
    assert_eq!(warehouses[0].name, "WH1");
    assert_eq!(warehouses[0].state, Some(WarehouseState::Started));
    assert_eq!(warehouses[0].size, Some(WarehouseSize::XSmall));
    assert_eq!(warehouses[0].auto_suspend, 60);
    assert!(warehouses[0].auto_resume);
    assert_eq!(warehouses[0].comment, "");
    Ok(())
}

#[tokio::test]
async fn test_show_by_id_matches_exact_name() -> Result<()> {
    let driver = RecordingDriver::new();
    // LIKE matches case-insensitively, so the server may return near misses.
    driver.push_rows(vec![warehouse_row("wh1"), warehouse_row("WH1")]);
    let client = driver.client();

    let warehouse = client
        .warehouses()
        .show_by_id(&AccountObjectIdentifier::new("WH1"))
        .await?;

    assert_eq!(warehouse.name, "WH1");
    assert_eq!(driver.statements(), vec!["SHOW WAREHOUSES LIKE 'WH1'"]);
    Ok(())
}

#[tokio::test]
async fn test_show_by_id_not_found() {
    let driver = RecordingDriver::new();
    driver.push_rows(vec![warehouse_row("OTHER")]);
    let client = driver.client();

    let err = client
        .warehouses()
        .show_by_id(&AccountObjectIdentifier::new("WH1"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_describe_empty_result_is_not_found() {
    let driver = RecordingDriver::new();
    let client = driver.client();

    let err = client
        .warehouses()
        .describe(&AccountObjectIdentifier::new("WH1"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(driver.statements(), vec![r#"DESCRIBE WAREHOUSE "WH1""#]);
}

#[tokio::test]
async fn test_driver_errors_name_the_operation() {
    let driver = RecordingDriver::failing("connection reset");
    let client = driver.client();

    let err = client
        .warehouses()
        .create(&CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Wire));
    assert_eq!(err.to_string(), "create warehouse: connection reset");
}

#[tokio::test]
async fn test_decode_errors_are_wire_errors() {
    let driver = RecordingDriver::new();
    // `name` is required
    driver.push_rows(vec![Row::from_pairs([("state", "STARTED")])]);
    let client = driver.client();

    let err = client
        .warehouses()
        .show(&ShowWarehouseRequest::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Wire));
    assert!(err.to_string().starts_with("show warehouses: "), "{err}");
}

#[tokio::test]
async fn test_cancelled_token_aborts_call() {
    let driver = RecordingDriver::slow(Duration::from_secs(30));
    let token = CancellationToken::new();
    let client = driver.client().with_cancellation(token.clone());
    token.cancel();

    let err = client
        .streams()
        .show(
            &ShowStreamRequest::new()
                .with_in_scope(In::schema(DatabaseObjectIdentifier::new("DB1", "S1"))),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Wire));
    assert!(err.to_string().contains("cancelled"), "{err}");
    assert!(driver.statements().is_empty());
}
