use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AccountRef, AccountSpec, ApiReply, IntegrationRef, IntegrationSpec, WarehouseAssignment,
    WarehouseDescriptor,
};

/// Domo account and BYOS warehouse operations.
///
/// Each method performs exactly one HTTP call. Statuses the operation does
/// not accept come back as [`ClientError::HttpStatus`](crate::ClientError::HttpStatus)
/// with the raw body; nothing is retried.
#[async_trait]
pub trait ByosApi: Send + Sync {
    /// Base URL every path is appended to, e.g. `https://acme.domo.com`.
    fn base_url(&self) -> &str;

    /// `POST /api/data/v1/accounts`
    async fn create_account(&self, spec: &AccountSpec) -> Result<ApiReply<AccountRef>>;

    /// `POST /api/query/v1/byos/accounts`
    async fn create_integration(&self, spec: &IntegrationSpec)
    -> Result<ApiReply<IntegrationRef>>;

    /// `GET /api/query/v1/byos/warehouses/{id}`, in service order.
    async fn list_warehouses(
        &self,
        integration: &IntegrationRef,
    ) -> Result<ApiReply<Vec<WarehouseDescriptor>>>;

    /// `PUT /api/query/v1/byos/warehouses/{id}`
    async fn assign_warehouses(
        &self,
        integration: &IntegrationRef,
        assignments: &[WarehouseAssignment],
    ) -> Result<ApiReply<()>>;
}
