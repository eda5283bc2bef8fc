//! Snowflake account creation

use std::sync::Arc;

use domo_byos_client::{ACCOUNTS_PATH, AccountRef, AccountSpec, SnowflakeConnection};

use crate::error::{CoreError, CoreResult};
use crate::key_loader::{PrivateKey, load_private_key};
use crate::reporter::ProvisionEvent;

use super::ServiceContext;

/// Creates the key-pair account that the BYOS integration authenticates with.
pub struct AccountService {
    ctx: Arc<ServiceContext>,
}

impl AccountService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Builds the account payload from configuration and the loaded key.
    pub fn account_spec(&self, private_key: PrivateKey) -> AccountSpec {
        let config = &self.ctx.config;
        AccountSpec::snowflake_key_pair(
            config.account_name.clone(),
            config.display_name.clone(),
            SnowflakeConnection {
                account: config.snowflake_account.clone(),
                username: config.snowflake_username.clone(),
                private_key: private_key.into_contents(),
                pass_phrase: config.passphrase.clone(),
                role: config.snowflake_role.clone(),
            },
        )
    }

    /// Loads the key, posts the account and returns its id.
    ///
    /// Instance and key path are checked before anything touches the disk or
    /// the network.
    pub async fn create_account(&self) -> CoreResult<AccountRef> {
        let (instance, spec) = match self.prepare() {
            Ok(prepared) => prepared,
            Err(e) => {
                log::warn!("Account creation aborted: {e}");
                self.ctx.report(ProvisionEvent::Failure(e.to_string()));
                return Err(e);
            }
        };

        self.ctx.report(ProvisionEvent::Info(format!(
            "Creating Snowflake account '{}' on {instance}...",
            spec.display_name
        )));
        self.ctx.report(ProvisionEvent::Request {
            method: "POST",
            url: self.ctx.url(ACCOUNTS_PATH),
            payload: Some(spec.redacted_json()),
        });

        match self.ctx.api.create_account(&spec).await {
            Ok(reply) => {
                self.ctx
                    .report_success(reply.status, "Success! Account created.", &reply.body);
                log::info!("Created account {}", reply.value);
                Ok(reply.value)
            }
            Err(e) => {
                self.ctx.report_client_error("Failed to create account", &e);
                Err(e.into())
            }
        }
    }

    fn prepare(&self) -> CoreResult<(&str, AccountSpec)> {
        let config = &self.ctx.config;
        let instance = config.instance().ok_or_else(|| {
            CoreError::Configuration(
                "INSTANCE is required. Set `instance` in the configuration file.".to_string(),
            )
        })?;
        let key_path = config.private_key_path().ok_or_else(|| {
            CoreError::Configuration(
                "PRIVATE_KEY_FILE is required. Set `private_key_file` in the configuration file."
                    .to_string(),
            )
        })?;
        Ok((instance, self.account_spec(load_private_key(key_path)?)))
    }
}
