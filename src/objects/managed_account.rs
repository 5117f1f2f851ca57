//! Reader accounts managed by the current account.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::Like;
use crate::decode::{DecodeError, FromRow, Row, yes};
use crate::error::Result;
use crate::identifiers::{AccountObjectIdentifier, Identifier};
use crate::validation::{Errors, Validate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateManagedAccountOptions {
    pub name: AccountObjectIdentifier,
    pub admin_name: String,
    pub admin_password: String,
    pub comment: Option<String>,
}

impl Validate for CreateManagedAccountOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateManagedAccountOptions");
        errors.identifier("name", &self.name);
        errors.required("AdminName", &self.admin_name);
        errors.required("AdminPassword", &self.admin_password);
        errors.finish()
    }
}

request! {
    CreateManagedAccountRequest => CreateManagedAccountOptions {
        opt comment: String,
    }
}

impl CreateManagedAccountRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        admin_name: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            options: CreateManagedAccountOptions {
                name,
                admin_name: admin_name.into(),
                admin_password: admin_password.into(),
                comment: None,
            },
        }
    }
}

/// `DROP MANAGED ACCOUNT` has no `IF EXISTS` form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropManagedAccountOptions {
    pub name: AccountObjectIdentifier,
}

impl DropManagedAccountOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self { name }
    }
}

impl Validate for DropManagedAccountOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("DropManagedAccountOptions");
        errors.identifier("name", &self.name);
        errors.finish()
    }
}

show_objects!(ShowManagedAccountOptions, ShowManagedAccountRequest, "MANAGED ACCOUNTS" {
    val like: Like,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagedAccountRow {
    pub name: String,
    pub cloud: Option<String>,
    pub region: Option<String>,
    pub locator: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub account_locator_url: Option<String>,
    pub comment: Option<String>,
    pub is_reader: Option<String>,
}

impl FromRow for ManagedAccountRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: row.get("name")?,
            cloud: row.opt("cloud"),
            region: row.opt("region"),
            locator: row.opt("locator"),
            created_on: row.opt_timestamp("created_on")?,
            url: row.opt("url"),
            account_locator_url: row.opt("account_locator_url"),
            comment: row.opt("comment"),
            is_reader: row.opt("is_reader"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagedAccount {
    pub name: String,
    pub cloud: String,
    pub region: String,
    pub locator: String,
    pub created_on: Option<DateTime<Utc>>,
    pub url: String,
    pub account_locator_url: String,
    pub comment: String,
    pub is_reader: bool,
}

impl From<ManagedAccountRow> for ManagedAccount {
    fn from(row: ManagedAccountRow) -> Self {
        Self {
            name: row.name,
            cloud: row.cloud.unwrap_or_default(),
            region: row.region.unwrap_or_default(),
            locator: row.locator.unwrap_or_default(),
            created_on: row.created_on,
            url: row.url.unwrap_or_default(),
            account_locator_url: row.account_locator_url.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            is_reader: row.is_reader.as_deref().is_some_and(yes),
        }
    }
}

impl ManagedAccount {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

gateway!(ManagedAccounts);

impl ManagedAccounts<'_> {
    pub async fn create(&self, request: &CreateManagedAccountRequest) -> Result<()> {
        self.client
            .exec("create managed account", &request.to_options())
            .await
    }

    pub async fn drop(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client
            .exec(
                "drop managed account",
                &DropManagedAccountOptions::new(id.clone()),
            )
            .await
    }

    pub async fn show(&self, request: &ShowManagedAccountRequest) -> Result<Vec<ManagedAccount>> {
        self.client
            .query::<_, ManagedAccountRow, _>("show managed accounts", &request.to_options())
            .await
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<ManagedAccount> {
        let request = ShowManagedAccountRequest::new().with_like(Like::new(id.name()));
        find_by_id(
            self.show(&request).await?,
            "managed account",
            id,
            ManagedAccount::id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_admin_required() {
        let opts =
            CreateManagedAccountRequest::new(AccountObjectIdentifier::new("R1"), "admin", "")
                .to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_row() {
        let row = Row::new([
            ("name", Some("READER1")),
            ("locator", Some("RE12345")),
            ("is_reader", Some("true")),
            ("comment", None),
        ]);
        let account = ManagedAccount::from(ManagedAccountRow::from_row(&row).unwrap());
        assert!(account.is_reader);
        assert_eq!(account.locator, "RE12345");
        assert_eq!(account.id(), AccountObjectIdentifier::new("READER1"));
    }
}
