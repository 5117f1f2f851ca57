use anyhow::Result;
use snowflake_sdk::Row;
use snowflake_sdk::datatypes::DataType;
use snowflake_sdk::identifiers::SchemaObjectIdentifierWithArguments;

use crate::helpers::driver::RecordingDriver;

fn function_row(name: &str, arguments: &str) -> Row {
    Row::from_pairs([
        ("name", name),
        ("schema_name", "S"),
        ("catalog_name", "DB"),
        ("arguments", arguments),
    ])
}

#[tokio::test]
async fn test_function_show_by_id_ignores_type_parameters() -> Result<()> {
    let driver = RecordingDriver::new();
    driver.push_rows(vec![
        function_row("F", "F(VARCHAR) RETURN NUMBER"),
        function_row("F", "F(NUMBER) RETURN NUMBER"),
    ]);
    let client = driver.client();

    let id = SchemaObjectIdentifierWithArguments::new(
        "DB",
        "S",
        "F",
        [DataType::from("NUMBER(38, 0)")],
    );
    let function = client.functions().show_by_id(&id).await?;

    assert_eq!(function.argument_types, vec![DataType::Number]);
    assert_eq!(function.id(), id);
    Ok(())
}

#[tokio::test]
async fn test_function_show_by_id_accepts_lowercase_synonyms() -> Result<()> {
    let driver = RecordingDriver::new();
    driver.push_rows(vec![function_row("F", "F(VARCHAR) RETURN VARCHAR")]);
    let client = driver.client();

    let id = SchemaObjectIdentifierWithArguments::new("DB", "S", "F", [DataType::custom("string")]);
    let function = client.functions().show_by_id(&id).await?;

    assert_eq!(function.name, "F");
    Ok(())
}
