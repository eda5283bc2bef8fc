//! End-to-end provisioning run

use std::sync::Arc;

use domo_byos_client::AccountRef;
use thiserror::Error;

use crate::error::CoreError;
use crate::reporter::ProvisionEvent;
use crate::workflow::{ProvisionState, StateKind, Transition, Workflow};

use super::{AccountService, IntegrationService, ServiceContext, WarehouseService};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// `IntegrationReady` when no warehouse was configured, else `WarehouseAssigned`
    pub state: ProvisionState,
    pub visited: Vec<StateKind>,
}

/// A run that stopped early.
///
/// `state` is the last state reached, i.e. which remote resources exist now.
/// Nothing created before the failure is removed.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ProvisionFailure {
    #[source]
    pub error: CoreError,
    pub state: ProvisionState,
    pub visited: Vec<StateKind>,
}

/// Drives account → integration → warehouse in order, stopping at the first
/// failure.
pub struct ProvisioningService {
    ctx: Arc<ServiceContext>,
    accounts: AccountService,
    integrations: IntegrationService,
    warehouses: WarehouseService,
}

impl ProvisioningService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            accounts: AccountService::new(Arc::clone(&ctx)),
            integrations: IntegrationService::new(Arc::clone(&ctx)),
            warehouses: WarehouseService::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    pub async fn run(&self) -> Result<ProvisionReport, ProvisionFailure> {
        let mut workflow = Workflow::new();
        match self.drive(&mut workflow).await {
            Ok(()) => {
                let (state, visited) = workflow.into_parts();
                log::info!("Provisioning finished in state {}", state.kind());
                Ok(ProvisionReport { state, visited })
            }
            Err(error) => {
                let (state, visited) = workflow.into_parts();
                log::info!("Provisioning stopped in state {}", state.kind());
                Err(ProvisionFailure {
                    error,
                    state,
                    visited,
                })
            }
        }
    }

    async fn drive(&self, workflow: &mut Workflow) -> Result<(), CoreError> {
        let config = &self.ctx.config;
        if let Err(e) = config.validate() {
            self.ctx.report(ProvisionEvent::Failure(e.to_string()));
            return Err(e);
        }

        // 1. 账户
        let account = if let Some(id) = config.existing_account_id() {
            self.ctx
                .report(ProvisionEvent::Section("USING EXISTING ACCOUNT".to_string()));
            self.ctx
                .report(ProvisionEvent::Info(format!("Using existing account ID: {id}")));
            let account = AccountRef::new(id);
            workflow.apply(Transition::ExistingAccount(account.clone()))?;
            account
        } else {
            match self.accounts.create_account().await {
                Ok(account) => {
                    workflow.apply(Transition::AccountCreated(account.clone()))?;
                    account
                }
                Err(e) => {
                    self.ctx.report(ProvisionEvent::Skipped(
                        "Skipping BYOS integration creation due to account creation failure."
                            .to_string(),
                    ));
                    return Err(e);
                }
            }
        };

        // 2. BYOS 集成
        self.ctx
            .report(ProvisionEvent::Section("CREATING BYOS INTEGRATION".to_string()));
        let integration = self
            .integrations
            .create_integration(&account, None, None)
            .await?;
        workflow.apply(Transition::IntegrationCreated(integration.clone()))?;

        // 3. 仓库分配（可选）
        let Some(warehouse_name) = config.warehouse_name() else {
            self.ctx.report(ProvisionEvent::Skipped(
                "No WAREHOUSE_NAME configured - skipping warehouse assignment.".to_string(),
            ));
            return Ok(());
        };

        self.ctx.report(ProvisionEvent::Section(
            "ASSIGNING WAREHOUSE TO INTEGRATION".to_string(),
        ));
        let assignment = self
            .warehouses
            .assign_warehouse(&integration, warehouse_name, None)
            .await?;
        workflow.apply(Transition::WarehouseAssigned(assignment))?;
        Ok(())
    }
}
