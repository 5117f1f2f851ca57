//! Per-kind request types, result records and client gateways.
//!
//! Each module owns one object kind: its `*Options` values (what gets
//! validated and rendered), the `*Request` builders callers fill in, the raw
//! `*Row` decoded from the driver and the domain record returned to callers.

pub mod account;
pub mod application;
pub mod application_package;
pub mod comment;
pub mod cortex_search_service;
pub mod database;
pub mod database_role;
pub mod dynamic_table;
pub mod event_table;
pub mod external_table;
pub mod external_volume;
pub mod failover_group;
pub mod file_format;
pub mod function;
pub mod grant;
pub mod integration;
pub mod managed_account;
pub mod materialized_view;
pub mod network_policy;
pub mod network_rule;
pub mod pipe;
pub mod policy;
pub mod procedure;
pub mod role;
pub mod routine;
pub mod schema;
pub mod secret;
pub mod security_integration;
pub mod sequence;
pub mod session;
pub mod stage;
pub mod stream;
pub mod streamlit;
pub mod table;
pub mod tag;
pub mod task;
pub mod user;
pub mod view;
pub mod warehouse;

pub use account::Accounts;
pub use application::Applications;
pub use application_package::ApplicationPackages;
pub use comment::Comments;
pub use cortex_search_service::CortexSearchServices;
pub use database::Databases;
pub use database_role::DatabaseRoles;
pub use dynamic_table::DynamicTables;
pub use event_table::EventTables;
pub use external_table::ExternalTables;
pub use external_volume::ExternalVolumes;
pub use failover_group::{FailoverGroups, Replication};
pub use file_format::FileFormats;
pub use function::Functions;
pub use grant::Grants;
pub use integration::{ApiIntegrations, NotificationIntegrations, StorageIntegrations};
pub use managed_account::ManagedAccounts;
pub use materialized_view::MaterializedViews;
pub use network_policy::NetworkPolicies;
pub use network_rule::NetworkRules;
pub use pipe::Pipes;
pub use policy::aggregation::AggregationPolicies;
pub use policy::authentication::AuthenticationPolicies;
pub use policy::masking::MaskingPolicies;
pub use policy::password::PasswordPolicies;
pub use policy::projection::ProjectionPolicies;
pub use policy::row_access::RowAccessPolicies;
pub use policy::session::SessionPolicies;
pub use procedure::Procedures;
pub use role::Roles;
pub use schema::Schemas;
pub use secret::Secrets;
pub use security_integration::SecurityIntegrations;
pub use sequence::Sequences;
pub use session::Sessions;
pub use stage::Stages;
pub use stream::Streams;
pub use streamlit::Streamlits;
pub use table::Tables;
pub use tag::Tags;
pub use task::Tasks;
pub use user::Users;
pub use view::Views;
pub use warehouse::Warehouses;
