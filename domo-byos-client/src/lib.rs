//! # domo-byos-client
//!
//! Typed client for the Domo endpoints used to attach a customer-owned
//! Snowflake warehouse to a Domo instance (BYOS, Bring-Your-Own-Storage).
//!
//! ## Endpoints
//!
//! | Operation | Method | Path | Success |
//! |-----------|--------|------|---------|
//! | [`ByosApi::create_account`] | `POST` | `/api/data/v1/accounts` | 200, 201 |
//! | [`ByosApi::create_integration`] | `POST` | `/api/query/v1/byos/accounts` | 200, 201 |
//! | [`ByosApi::list_warehouses`] | `GET` | `/api/query/v1/byos/warehouses/{id}` | 200 |
//! | [`ByosApi::assign_warehouses`] | `PUT` | `/api/query/v1/byos/warehouses/{id}` | 200, 201 |
//!
//! Every request carries the developer token in `X-Domo-Developer-Token`.
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `rustls` | Use rustls as TLS backend | Yes |
//! | `native-tls` | Use the platform TLS library | No |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use domo_byos_client::{ByosApi, DeveloperToken, DomoClient, IntegrationRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DomoClient::new("acme.domo.com", Some(DeveloperToken::new("token")))?;
//!     let reply = client.list_warehouses(&IntegrationRef::new("8f0c1e2a")).await?;
//!     for warehouse in &reply.value {
//!         println!("{:?} ({})", warehouse.name(), warehouse.size_label());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError). A status the
//! operation does not accept is [`ClientError::HttpStatus`] with the raw body;
//! a success without an `id` is [`ClientError::ResponseShape`]. Nothing is
//! retried.

mod client;
mod endpoints;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use client::{DeveloperToken, DomoClient};
pub use endpoints::{
    ACCOUNTS_PATH, BYOS_ACCOUNTS_PATH, DEVELOPER_TOKEN_HEADER, base_url, warehouses_path,
};
pub use error::{ClientError, Result};
pub use http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, HttpUtils};
pub use traits::ByosApi;
pub use types::{
    Activity, AccountRef, AccountSpec, ApiReply, CONFIG_TYPE, ConfigProperty, IntegrationProperties,
    IntegrationRef, IntegrationSpec, KEY_PAIR_AUTH_METHOD, Operation, SNOWFLAKE_ENGINE,
    SNOWFLAKE_KEY_PAIR_PROVIDER, SnowflakeConnection, UnknownActivity, WarehouseAssignment,
    WarehouseDescriptor,
};

pub use utils::log_sanitizer;
