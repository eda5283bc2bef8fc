//! reqwest implementation of [`ByosApi`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use veil::Redact;

use crate::endpoints::{
    ACCOUNTS_PATH, BYOS_ACCOUNTS_PATH, DEVELOPER_TOKEN_HEADER, base_url, warehouses_path,
};
use crate::error::Result;
use crate::http_client::{DEFAULT_REQUEST_TIMEOUT_SECS, HttpUtils, create_http_client};
use crate::traits::ByosApi;
use crate::types::{
    AccountRef, AccountSpec, ApiReply, IntegrationRef, IntegrationSpec, Operation,
    WarehouseAssignment, WarehouseDescriptor,
};

/// Developer token sent as `X-Domo-Developer-Token`.
#[derive(Clone, PartialEq, Eq, Redact)]
pub struct DeveloperToken(#[redact] String);

impl DeveloperToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Client for one Domo instance.
pub struct DomoClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) token: Option<DeveloperToken>,
}

impl DomoClient {
    /// Client for `instance` with the default request timeout.
    ///
    /// A missing token is not rejected here; the service answers with an
    /// auth error instead.
    pub fn new(instance: &str, token: Option<DeveloperToken>) -> Result<Self> {
        Self::with_timeout(
            instance,
            token,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        instance: &str,
        token: Option<DeveloperToken>,
        request_timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: create_http_client(request_timeout)?,
            base_url: base_url(instance),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(CONTENT_TYPE, "application/json");
        match &self.token {
            Some(token) => builder.header(DEVELOPER_TOKEN_HEADER, token.expose()),
            None => builder,
        }
    }
}

#[async_trait]
impl ByosApi for DomoClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create_account(&self, spec: &AccountSpec) -> Result<ApiReply<AccountRef>> {
        let operation = Operation::CreateAccount;
        let url = self.url(ACCOUNTS_PATH);
        let request = self.authorized(self.client.post(&url)).json(spec);

        let (status, body) = HttpUtils::execute_request(request, operation, "POST", &url).await?;
        let body = HttpUtils::ensure_success(operation, status, body)?;
        let id = HttpUtils::extract_id(&body, status, operation)?;

        Ok(ApiReply {
            status,
            body,
            value: AccountRef::new(id),
        })
    }

    async fn create_integration(
        &self,
        spec: &IntegrationSpec,
    ) -> Result<ApiReply<IntegrationRef>> {
        let operation = Operation::CreateIntegration;
        let url = self.url(BYOS_ACCOUNTS_PATH);
        let request = self.authorized(self.client.post(&url)).json(spec);

        let (status, body) = HttpUtils::execute_request(request, operation, "POST", &url).await?;
        let body = HttpUtils::ensure_success(operation, status, body)?;
        let id = HttpUtils::extract_id(&body, status, operation)?;

        Ok(ApiReply {
            status,
            body,
            value: IntegrationRef::new(id),
        })
    }

    async fn list_warehouses(
        &self,
        integration: &IntegrationRef,
    ) -> Result<ApiReply<Vec<WarehouseDescriptor>>> {
        let operation = Operation::ListWarehouses;
        let url = self.url(&warehouses_path(&integration.id));
        let request = self.authorized(self.client.get(&url));

        let (status, body) = HttpUtils::execute_request(request, operation, "GET", &url).await?;
        let body = HttpUtils::ensure_success(operation, status, body)?;
        let warehouses: Vec<WarehouseDescriptor> = HttpUtils::parse_json(&body, operation)?;

        Ok(ApiReply {
            status,
            body,
            value: warehouses,
        })
    }

    async fn assign_warehouses(
        &self,
        integration: &IntegrationRef,
        assignments: &[WarehouseAssignment],
    ) -> Result<ApiReply<()>> {
        let operation = Operation::AssignWarehouse;
        let url = self.url(&warehouses_path(&integration.id));
        let request = self.authorized(self.client.put(&url)).json(assignments);

        let (status, body) = HttpUtils::execute_request(request, operation, "PUT", &url).await?;
        let body = HttpUtils::ensure_success(operation, status, body)?;

        Ok(ApiReply {
            status,
            body,
            value: (),
        })
    }
}
