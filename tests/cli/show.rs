use anyhow::Result;
use predicates::prelude::*;

use crate::helpers::cli::CliTestHelper;

const SQLITE_PROFILE: &str = "[default]\ndriver_url = \"sqlite::memory:\"\n";

#[test]
fn test_show_requires_driver_url() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.write_config("[default]\naccount_name = \"acc\"\n")?;

    helper
        .command()
        .args(["show", "warehouses"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no driver_url configured"));
    Ok(())
}

#[test]
fn test_show_rejects_scope_for_account_objects() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.write_config(SQLITE_PROFILE)?;

    helper
        .command()
        .args(["show", "warehouses", "--in-database", "DB1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not apply to account-level objects"));
    Ok(())
}

#[test]
fn test_show_scope_flags_conflict() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.write_config(SQLITE_PROFILE)?;

    helper
        .command()
        .args(["show", "tables", "--in-database", "DB1", "--in-schema", "DB1.S1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}

#[test]
fn test_show_reports_driver_failure() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.write_config(SQLITE_PROFILE)?;

    // SQLite has no SHOW statement, so the driver rejects it.
    helper
        .command()
        .args(["show", "streams", "--like", "S%", "--in-schema", "DB1.S1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("show streams"));
    Ok(())
}
