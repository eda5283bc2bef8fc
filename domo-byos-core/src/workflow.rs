//! Provisioning state machine
//!
//! ```text
//! Start ──AccountCreated / ExistingAccount──▶ AccountReady
//! AccountReady ──IntegrationCreated──▶ IntegrationReady
//! IntegrationReady ──WarehouseAssigned──▶ WarehouseAssigned
//! ```
//!
//! `IntegrationReady` is a valid end state when no warehouse is configured.
//! Failures do not roll anything back; the last state reached tells which
//! remote resources exist.

use std::fmt;

use domo_byos_client::{AccountRef, IntegrationRef, WarehouseAssignment};

use crate::error::{CoreError, CoreResult};

/// State without payload, for history and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Start,
    AccountReady,
    IntegrationReady,
    WarehouseAssigned,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "Start",
            Self::AccountReady => "AccountReady",
            Self::IntegrationReady => "IntegrationReady",
            Self::WarehouseAssigned => "WarehouseAssigned",
        })
    }
}

/// How the account was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSource {
    Created,
    /// Supplied by configuration, trusted as-is
    Existing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionState {
    Start,
    AccountReady {
        account: AccountRef,
        source: AccountSource,
    },
    IntegrationReady {
        account: AccountRef,
        integration: IntegrationRef,
    },
    WarehouseAssigned {
        account: AccountRef,
        integration: IntegrationRef,
        assignment: WarehouseAssignment,
    },
}

/// Events that move the workflow forward.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    AccountCreated(AccountRef),
    ExistingAccount(AccountRef),
    IntegrationCreated(IntegrationRef),
    WarehouseAssigned(WarehouseAssignment),
}

impl Transition {
    fn target(&self) -> StateKind {
        match self {
            Self::AccountCreated(_) | Self::ExistingAccount(_) => StateKind::AccountReady,
            Self::IntegrationCreated(_) => StateKind::IntegrationReady,
            Self::WarehouseAssigned(_) => StateKind::WarehouseAssigned,
        }
    }
}

impl ProvisionState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Start => StateKind::Start,
            Self::AccountReady { .. } => StateKind::AccountReady,
            Self::IntegrationReady { .. } => StateKind::IntegrationReady,
            Self::WarehouseAssigned { .. } => StateKind::WarehouseAssigned,
        }
    }

    pub fn account(&self) -> Option<&AccountRef> {
        match self {
            Self::Start => None,
            Self::AccountReady { account, .. }
            | Self::IntegrationReady { account, .. }
            | Self::WarehouseAssigned { account, .. } => Some(account),
        }
    }

    pub fn integration(&self) -> Option<&IntegrationRef> {
        match self {
            Self::IntegrationReady { integration, .. }
            | Self::WarehouseAssigned { integration, .. } => Some(integration),
            _ => None,
        }
    }

    /// The state after `transition`, or `IllegalTransition`.
    pub fn next(&self, transition: Transition) -> CoreResult<Self> {
        let target = transition.target();
        match (self, transition) {
            (Self::Start, Transition::AccountCreated(account)) => Ok(Self::AccountReady {
                account,
                source: AccountSource::Created,
            }),
            (Self::Start, Transition::ExistingAccount(account)) => Ok(Self::AccountReady {
                account,
                source: AccountSource::Existing,
            }),
            (Self::AccountReady { account, .. }, Transition::IntegrationCreated(integration)) => {
                Ok(Self::IntegrationReady {
                    account: account.clone(),
                    integration,
                })
            }
            (
                Self::IntegrationReady {
                    account,
                    integration,
                },
                Transition::WarehouseAssigned(assignment),
            ) => Ok(Self::WarehouseAssigned {
                account: account.clone(),
                integration: integration.clone(),
                assignment,
            }),
            _ => Err(CoreError::IllegalTransition {
                from: self.kind(),
                to: target,
            }),
        }
    }
}

/// Current state plus every state visited, starting with `Start`.
#[derive(Debug, Clone)]
pub struct Workflow {
    state: ProvisionState,
    visited: Vec<StateKind>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            state: ProvisionState::Start,
            visited: vec![StateKind::Start],
        }
    }

    pub fn state(&self) -> &ProvisionState {
        &self.state
    }

    pub fn visited(&self) -> &[StateKind] {
        &self.visited
    }

    /// Applies `transition`; on error the state is unchanged.
    pub fn apply(&mut self, transition: Transition) -> CoreResult<&ProvisionState> {
        let next = self.state.next(transition)?;
        log::debug!("Workflow: {} -> {}", self.state.kind(), next.kind());
        self.visited.push(next.kind());
        self.state = next;
        Ok(&self.state)
    }

    pub fn into_parts(self) -> (ProvisionState, Vec<StateKind>) {
        (self.state, self.visited)
    }
}
