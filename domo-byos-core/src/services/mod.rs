//! 业务逻辑服务层

mod account_service;
mod integration_service;
mod provisioning_service;
mod warehouse_service;

pub use account_service::AccountService;
pub use integration_service::IntegrationService;
pub use provisioning_service::{ProvisionFailure, ProvisionReport, ProvisioningService};
pub use warehouse_service::{WarehouseService, select_warehouse};

use std::sync::Arc;

use domo_byos_client::log_sanitizer::redact_pem_blocks;
use domo_byos_client::{ByosApi, ClientError};

use crate::config::ProvisionConfig;
use crate::reporter::{ProvisionEvent, Reporter};

/// 服务上下文 - 持有所有依赖
///
/// The binary builds this with a `DomoClient` and a `ConsoleReporter`; tests
/// inject mocks.
pub struct ServiceContext {
    pub api: Arc<dyn ByosApi>,
    pub reporter: Arc<dyn Reporter>,
    pub config: Arc<ProvisionConfig>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        api: Arc<dyn ByosApi>,
        reporter: Arc<dyn Reporter>,
        config: Arc<ProvisionConfig>,
    ) -> Self {
        Self {
            api,
            reporter,
            config,
        }
    }

    pub(crate) fn report(&self, event: ProvisionEvent) {
        self.reporter.report(event);
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api.base_url())
    }

    /// Response body as printed; key material the service echoes back is hidden.
    fn report_body(&self, body: &str) {
        self.report(ProvisionEvent::Body(redact_pem_blocks(body)));
    }

    /// Reports a successful call: status, success line, response body.
    pub(crate) fn report_success(&self, status: u16, message: &str, body: &str) {
        self.report(ProvisionEvent::Status(status));
        self.report(ProvisionEvent::Success(message.to_string()));
        self.report_body(body);
    }

    /// Reports a failed call with whatever the service sent back.
    pub(crate) fn report_client_error(&self, heading: &str, error: &ClientError) {
        if error.is_expected() {
            log::warn!("{heading}: {error}");
        } else {
            log::error!("{heading}: {error}");
        }

        if let Some(status) = error.status() {
            self.report(ProvisionEvent::Status(status));
        }
        match error {
            ClientError::ResponseShape { field, body, .. } => {
                self.report_body(body);
                self.report(ProvisionEvent::Failure(format!(
                    "{heading}: response has no usable '{field}'"
                )));
            }
            ClientError::HttpStatus { body, .. } => {
                self.report(ProvisionEvent::Failure(heading.to_string()));
                self.report_body(body);
            }
            other => {
                self.report(ProvisionEvent::Failure(format!("{heading}: {other}")));
            }
        }
    }
}
