//! Statement rendering for the reference scenarios, through the public API only.

use rstest::rstest;
use snowflake_sdk::common::{In, Like};
use snowflake_sdk::datatypes::DataType;
use snowflake_sdk::identifiers::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments,
};
use snowflake_sdk::objects::function::DescribeFunctionOptions;
use snowflake_sdk::objects::grant::{
    GrantOn, GrantPrivileges, GrantPrivilegesToAccountRoleRequest, Privilege,
};
use snowflake_sdk::objects::role::CreateRoleRequest;
use snowflake_sdk::objects::stream::ShowStreamRequest;
use snowflake_sdk::objects::table::{AlterTableRequest, TableSet};
use snowflake_sdk::objects::warehouse::{CreateWarehouseRequest, WarehouseSize};
use snowflake_sdk::{Error, ErrorKind, RenderSql, Validate};

fn create_warehouse() -> String {
    let opts = CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1"))
        .with_warehouse_size(WarehouseSize::XSmall)
        .with_auto_suspend(60)
        .to_options();
    opts.validate().unwrap();
    opts.to_sql()
}

fn alter_table() -> String {
    let opts = AlterTableRequest::new(SchemaObjectIdentifier::new("DB1", "S1", "T1"))
        .with_set(TableSet::default().with_data_retention_time_in_days(7))
        .to_options();
    opts.validate().unwrap();
    opts.to_sql()
}

fn show_streams() -> String {
    let opts = ShowStreamRequest::new()
        .with_like(Like::new("S%"))
        .with_in_scope(In::schema(DatabaseObjectIdentifier::new("DB1", "S1")))
        .to_options();
    opts.validate().unwrap();
    opts.to_sql()
}

fn grant_usage() -> String {
    let opts = GrantPrivilegesToAccountRoleRequest::new(
        GrantPrivileges::of([Privilege::Usage]),
        GrantOn::database(AccountObjectIdentifier::new("DB1")),
        AccountObjectIdentifier::new("R1"),
    )
    .to_options();
    opts.validate().unwrap();
    opts.to_sql()
}

fn describe_function() -> String {
    let opts = DescribeFunctionOptions::new(SchemaObjectIdentifierWithArguments::new(
        "DB1",
        "S1",
        "F",
        [DataType::Varchar, DataType::Number],
    ));
    opts.validate().unwrap();
    opts.to_sql()
}

#[rstest]
#[case::create_warehouse(
    create_warehouse(),
    r#"CREATE WAREHOUSE "WH1" WAREHOUSE_SIZE = XSMALL AUTO_SUSPEND = 60"#
)]
#[case::alter_table(
    alter_table(),
    r#"ALTER TABLE "DB1"."S1"."T1" SET DATA_RETENTION_TIME_IN_DAYS = 7"#
)]
#[case::show_streams(show_streams(), r#"SHOW STREAMS LIKE 'S%' IN SCHEMA "DB1"."S1""#)]
#[case::grant_usage(grant_usage(), r#"GRANT USAGE ON DATABASE "DB1" TO ROLE "R1""#)]
#[case::describe_overload(
    describe_function(),
    r#"DESCRIBE FUNCTION "DB1"."S1"."F"(VARCHAR, NUMBER)"#
)]
fn test_reference_statements(#[case] actual: String, #[case] expected: &str) {
    assert_eq!(actual, expected);
}

#[test]
fn test_create_role_rejects_both_modifiers() {
    let opts = CreateRoleRequest::new(AccountObjectIdentifier::new("R1"))
        .with_or_replace(true)
        .with_if_not_exists(true)
        .to_options();

    let err = opts.validate().unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::ExactlyOneOf));
    match err {
        Error::ExactlyOneOf { fields, .. } => {
            assert_eq!(fields, vec!["OrReplace", "IfNotExists"]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
#[case(WarehouseSize::XSmall, "XSMALL")]
#[case(WarehouseSize::Medium, "MEDIUM")]
#[case(WarehouseSize::X4Large, "X4LARGE")]
fn test_warehouse_size_tokens(#[case] size: WarehouseSize, #[case] token: &str) {
    let opts = CreateWarehouseRequest::new(AccountObjectIdentifier::new("WH1"))
        .with_warehouse_size(size)
        .to_options();
    assert_eq!(
        opts.to_sql(),
        format!("CREATE WAREHOUSE \"WH1\" WAREHOUSE_SIZE = {token}")
    );
}
