//! `domo-byos` entry point
//!
//! Reads the provisioning config (`$DOMO_BYOS_CONFIG`, default
//! `./domo-byos.json`) and the developer token (`access_token`, or
//! `DOMO_DEVELOPER_TOKEN`), then creates the account, the BYOS integration
//! and optionally assigns a warehouse. Variables missing from the process
//! environment are also looked up in `./.env`.
//!
//! The status report goes to stdout; diagnostics go to stderr and follow
//! `RUST_LOG`. Exit status is 0 when every configured step succeeded.

use std::collections::HashMap;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use domo_byos_client::DomoClient;
use domo_byos_core::{
    ConsoleReporter, ProvisionConfig, ProvisionEvent, ProvisioningService, Reporter,
    ServiceContext, DOTENV_FILE, developer_token, read_dotenv, with_dotenv,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout 留给状态报告，日志写到 stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dotenv = read_dotenv(Path::new(DOTENV_FILE)).unwrap_or_else(|e| {
        tracing::warn!("Ignoring {}: {}", DOTENV_FILE, e);
        HashMap::new()
    });
    let env = with_dotenv(|key: &str| std::env::var(key).ok(), &dotenv);
    let reporter = Arc::new(ConsoleReporter);

    let config_path = ProvisionConfig::resolve_path(&env);
    let config = match ProvisionConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            reporter.report(ProvisionEvent::Failure(e.to_string()));
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Using configuration {}", config_path.display());

    let token = developer_token(&env);
    if token.is_none() {
        tracing::warn!(
            "No developer token in `access_token` or `DOMO_DEVELOPER_TOKEN`; Domo will reject the requests"
        );
    }

    let client = match DomoClient::with_timeout(
        config.instance().unwrap_or_default(),
        token,
        config.request_timeout(),
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            reporter.report(ProvisionEvent::Failure(e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let ctx = Arc::new(ServiceContext::new(
        Arc::new(client),
        reporter,
        Arc::new(config),
    ));

    match ProvisioningService::new(ctx).run().await {
        Ok(report) => {
            tracing::info!("Provisioning complete ({})", report.state.kind());
            ExitCode::SUCCESS
        }
        Err(failure) => {
            if failure.error.is_expected() {
                tracing::warn!(
                    "Provisioning stopped after {}: {}",
                    failure.state.kind(),
                    failure
                );
            } else {
                tracing::error!(
                    "Provisioning stopped after {}: {}",
                    failure.state.kind(),
                    failure
                );
            }
            if let Some(account) = failure.state.account() {
                tracing::info!("Account {} already exists and was left in place", account);
            }
            if let Some(integration) = failure.state.integration() {
                tracing::info!(
                    "BYOS integration {} already exists and was left in place",
                    integration
                );
            }
            ExitCode::FAILURE
        }
    }
}
