//! Cortex search services indexing a text column of a query.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::find_by_id;
use crate::common::{In, Like};
use crate::decode::{DecodeError, FromRow, Row, parse_list};
use crate::error::{Error, Result};
use crate::identifiers::{AccountObjectIdentifier, Identifier, SchemaObjectIdentifier};
use crate::validation::{Errors, Validate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateCortexSearchServiceOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub on: String,
    pub attributes: Vec<String>,
    pub warehouse: AccountObjectIdentifier,
    pub target_lag: String,
    pub comment: Option<String>,
    pub query: String,
}

impl Validate for CreateCortexSearchServiceOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CreateCortexSearchServiceOptions");
        errors.identifier("name", &self.name);
        errors.or_replace_if_not_exists(self.or_replace, self.if_not_exists);
        errors.required("On", &self.on);
        errors.identifier("Warehouse", &self.warehouse);
        errors.required("TargetLag", &self.target_lag);
        errors.required("Query", &self.query);
        errors.finish()
    }
}

request! {
    CreateCortexSearchServiceRequest => CreateCortexSearchServiceOptions {
        flag or_replace,
        flag if_not_exists,
        vec attributes: String,
        opt comment: String,
    }
}

impl CreateCortexSearchServiceRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        on: impl Into<String>,
        warehouse: AccountObjectIdentifier,
        target_lag: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            options: CreateCortexSearchServiceOptions {
                name,
                on: on.into(),
                warehouse,
                target_lag: target_lag.into(),
                query: query.into(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CortexSearchServiceSet {
    pub target_lag: Option<String>,
    pub warehouse: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
}

setters!(CortexSearchServiceSet {
    opt target_lag: String,
    opt warehouse: AccountObjectIdentifier,
    opt comment: String,
});

impl Validate for CortexSearchServiceSet {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("CortexSearchServiceSet");
        errors.at_least_one_of(
            &["TargetLag", "Warehouse", "Comment"],
            &[&self.target_lag, &self.warehouse, &self.comment],
        );
        errors.optional_identifier("Warehouse", self.warehouse.as_ref());
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterCortexSearchServiceOptions {
    pub if_exists: bool,
    pub name: SchemaObjectIdentifier,
    pub set: Option<CortexSearchServiceSet>,
}

impl Validate for AlterCortexSearchServiceOptions {
    fn validate(&self) -> Result<()> {
        let mut errors = Errors::new("AlterCortexSearchServiceOptions");
        errors.identifier("name", &self.name);
        errors.required("Set", &self.set);
        errors.nested(self.set.as_ref());
        errors.finish()
    }
}

request! {
    AlterCortexSearchServiceRequest => AlterCortexSearchServiceOptions {
        flag if_exists,
        val set: CortexSearchServiceSet,
    }
}

impl AlterCortexSearchServiceRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            options: AlterCortexSearchServiceOptions {
                name,
                ..Default::default()
            },
        }
    }
}

drop_object!(
    DropCortexSearchServiceOptions,
    DropCortexSearchServiceRequest,
    "CORTEX SEARCH SERVICE",
    SchemaObjectIdentifier
);

target_only!(
    DescribeCortexSearchServiceOptions,
    "DESCRIBE CORTEX SEARCH SERVICE",
    SchemaObjectIdentifier
);

show_objects!(ShowCortexSearchServiceOptions, ShowCortexSearchServiceRequest, "CORTEX SEARCH SERVICES" {
    val like: Like,
    val in_scope: In,
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CortexSearchServiceRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub comment: Option<String>,
}

impl FromRow for CortexSearchServiceRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            comment: row.opt("comment"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CortexSearchService {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub comment: String,
}

impl From<CortexSearchServiceRow> for CortexSearchService {
    fn from(row: CortexSearchServiceRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            comment: row.comment.unwrap_or_default(),
        }
    }
}

impl CortexSearchService {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CortexSearchServiceDetailsRow {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub target_lag: Option<String>,
    pub warehouse: Option<String>,
    pub search_column: Option<String>,
    pub attribute_columns: Option<String>,
    pub columns: Option<String>,
    pub definition: Option<String>,
    pub comment: Option<String>,
    pub service_query_url: Option<String>,
    pub data_timestamp: Option<DateTime<Utc>>,
    pub source_data_num_rows: Option<i64>,
    pub indexing_state: Option<String>,
    pub indexing_error: Option<String>,
}

impl FromRow for CortexSearchServiceDetailsRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            created_on: row.opt_timestamp("created_on")?,
            name: row.get("name")?,
            database_name: row.get("database_name")?,
            schema_name: row.get("schema_name")?,
            target_lag: row.opt("target_lag"),
            warehouse: row.opt("warehouse"),
            search_column: row.opt("search_column"),
            attribute_columns: row.opt("attribute_columns"),
            columns: row.opt("columns"),
            definition: row.opt("definition"),
            comment: row.opt("comment"),
            service_query_url: row.opt("service_query_url"),
            data_timestamp: row.opt_timestamp("data_timestamp")?,
            source_data_num_rows: row.opt_i64("source_data_num_rows")?,
            indexing_state: row.opt("indexing_state"),
            indexing_error: row.opt("indexing_error"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CortexSearchServiceDetails {
    pub created_on: Option<DateTime<Utc>>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub target_lag: String,
    pub warehouse: String,
    pub search_column: Option<String>,
    pub attribute_columns: Vec<String>,
    pub columns: Vec<String>,
    pub definition: Option<String>,
    pub comment: Option<String>,
    pub service_query_url: String,
    pub data_timestamp: Option<DateTime<Utc>>,
    pub source_data_num_rows: i64,
    pub indexing_state: String,
    pub indexing_error: Option<String>,
}

impl From<CortexSearchServiceDetailsRow> for CortexSearchServiceDetails {
    fn from(row: CortexSearchServiceDetailsRow) -> Self {
        Self {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            target_lag: row.target_lag.unwrap_or_default(),
            warehouse: row.warehouse.unwrap_or_default(),
            search_column: row.search_column,
            attribute_columns: row
                .attribute_columns
                .as_deref()
                .map(parse_list)
                .unwrap_or_default(),
            columns: row.columns.as_deref().map(parse_list).unwrap_or_default(),
            definition: row.definition,
            comment: row.comment,
            service_query_url: row.service_query_url.unwrap_or_default(),
            data_timestamp: row.data_timestamp,
            source_data_num_rows: row.source_data_num_rows.unwrap_or_default(),
            indexing_state: row.indexing_state.unwrap_or_default(),
            indexing_error: row.indexing_error,
        }
    }
}

gateway!(CortexSearchServices);

impl CortexSearchServices<'_> {
    pub async fn create(&self, request: &CreateCortexSearchServiceRequest) -> Result<()> {
        self.client
            .exec("create cortex search service", &request.to_options())
            .await
    }

    pub async fn alter(&self, request: &AlterCortexSearchServiceRequest) -> Result<()> {
        self.client
            .exec("alter cortex search service", &request.to_options())
            .await
    }

    pub async fn drop(&self, request: &DropCortexSearchServiceRequest) -> Result<()> {
        self.client
            .exec("drop cortex search service", &request.to_options())
            .await
    }

    pub async fn show(
        &self,
        request: &ShowCortexSearchServiceRequest,
    ) -> Result<Vec<CortexSearchService>> {
        self.client
            .query::<_, CortexSearchServiceRow, _>(
                "show cortex search services",
                &request.to_options(),
            )
            .await
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<CortexSearchService> {
        let request = ShowCortexSearchServiceRequest::new()
            .with_like(Like::new(id.name()))
            .with_in_scope(In::schema(id.schema_id()));
        find_by_id(
            self.show(&request).await?,
            "cortex search service",
            id,
            CortexSearchService::id,
        )
    }

    pub async fn describe(
        &self,
        id: &SchemaObjectIdentifier,
    ) -> Result<CortexSearchServiceDetails> {
        let mut details = self
            .client
            .query::<_, CortexSearchServiceDetailsRow, CortexSearchServiceDetails>(
                "describe cortex search service",
                &DescribeCortexSearchServiceOptions::new(id.clone()),
            )
            .await?;
        if details.is_empty() {
            return Err(Error::not_found("cortex search service", id));
        }
        Ok(details.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", "CSS")
    }

    #[test]
    fn test_create_requires_lag_and_query() {
        let opts = CreateCortexSearchServiceRequest::new(
            id(),
            "TEXT",
            AccountObjectIdentifier::new("WH"),
            "",
            "",
        )
        .to_options();
        let err = opts.validate().unwrap_err();
        assert_eq!(
            err.kinds(),
            vec![ErrorKind::MissingRequiredField, ErrorKind::MissingRequiredField]
        );
    }

    #[test]
    fn test_alter_requires_set() {
        let opts = AlterCortexSearchServiceRequest::new(id()).to_options();
        assert_eq!(
            opts.validate().unwrap_err().kind(),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_details_conversion() {
        let row = Row::new([
            ("name", Some("CSS")),
            ("database_name", Some("DB")),
            ("schema_name", Some("S")),
            ("search_column", Some("TEXT")),
            ("attribute_columns", Some("REGION,KIND")),
            ("source_data_num_rows", Some("42")),
        ]);
        let details =
            CortexSearchServiceDetails::from(CortexSearchServiceDetailsRow::from_row(&row).unwrap());
        assert_eq!(details.attribute_columns, vec!["REGION", "KIND"]);
        assert_eq!(details.source_data_num_rows, 42);
    }
}
