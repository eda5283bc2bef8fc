//! Domo BYOS Provisioning Core Library
//!
//! Attaches a customer-owned Snowflake warehouse to a Domo instance:
//! - Account creation from a key-pair connection (`AccountService`)
//! - BYOS integration creation (`IntegrationService`)
//! - Warehouse discovery and assignment (`WarehouseService`)
//! - The end-to-end run and its state machine (`ProvisioningService`, `workflow`)
//!
//! HTTP goes through the `ByosApi` trait from `domo-byos-client`, and output
//! through a `Reporter`, so both can be swapped in tests.

pub mod config;
pub mod error;
pub mod key_loader;
pub mod reporter;
pub mod services;
pub mod workflow;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{DOTENV_FILE, ProvisionConfig, developer_token, read_dotenv, with_dotenv};
pub use error::{CoreError, CoreResult, ErrorKind, FileAccessReason};
pub use reporter::{ConsoleReporter, ProvisionEvent, Reporter};
pub use services::{
    AccountService, IntegrationService, ProvisionFailure, ProvisionReport, ProvisioningService,
    ServiceContext, WarehouseService, select_warehouse,
};
pub use workflow::{AccountSource, ProvisionState, StateKind, Transition, Workflow};
