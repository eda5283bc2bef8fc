//! Provisioning configuration
//!
//! Everything the workflow needs except the developer token, which never
//! lives in the config file and is read from the environment (or a `.env`
//! file) instead.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use domo_byos_client::{Activity, DEFAULT_REQUEST_TIMEOUT_SECS, DeveloperToken};
use serde::Deserialize;
use veil::Redact;

use crate::error::{CoreError, CoreResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "DOMO_BYOS_CONFIG";
/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "domo-byos.json";
/// Environment variable holding the developer token.
pub const TOKEN_ENV: &str = "access_token";
/// Checked when [`TOKEN_ENV`] is unset.
pub const TOKEN_ENV_FALLBACK: &str = "DOMO_DEVELOPER_TOKEN";
/// Dotenv file read from the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Static settings for one provisioning run.
///
/// Empty strings mean "not set", the same as an absent key.
#[derive(Clone, PartialEq, Eq, Deserialize, Redact)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// Domo instance hostname, e.g. `acme.domo.com`
    pub instance: String,
    /// Internal name of the account
    pub account_name: String,
    /// Name shown in Domo; also the integration name fallback
    pub display_name: String,
    pub snowflake_account: String,
    pub snowflake_username: String,
    pub snowflake_role: String,
    /// Path to the PEM private key, e.g. `/path/to/rsa_key.p8`
    pub private_key_file: String,
    /// Leave empty when the key is not encrypted
    #[redact]
    pub passphrase: String,
    pub integration_friendly_name: String,
    pub integration_description: String,
    /// Warehouse to assign; empty skips the assignment step
    pub warehouse_name: String,
    pub warehouse_activities: BTreeSet<Activity>,
    /// Skip account creation and use this account
    pub existing_account_id: String,
    pub request_timeout_secs: u64,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            instance: String::new(),
            account_name: String::new(),
            display_name: String::new(),
            snowflake_account: String::new(),
            snowflake_username: String::new(),
            snowflake_role: String::new(),
            private_key_file: String::new(),
            passphrase: String::new(),
            integration_friendly_name: String::new(),
            integration_description: String::new(),
            warehouse_name: String::new(),
            warehouse_activities: Activity::all(),
            existing_account_id: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl ProvisionConfig {
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Configuration(format!("invalid configuration: {e}")))
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Configuration(format!(
                "cannot read configuration file '{}': {e}",
                path.display()
            ))
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Config file location: `$DOMO_BYOS_CONFIG`, else `./domo-byos.json`.
    pub fn resolve_path(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        lookup(CONFIG_PATH_ENV)
            .as_deref()
            .and_then(non_empty)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// Pre-flight presence checks.
    ///
    /// The instance is always required. The private key path is only
    /// required when a new account is going to be created.
    pub fn validate(&self) -> CoreResult<()> {
        if self.instance().is_none() {
            return Err(CoreError::Configuration(
                "INSTANCE is required. Set `instance` in the configuration file.".to_string(),
            ));
        }
        if self.existing_account_id().is_none() && self.private_key_path().is_none() {
            return Err(CoreError::Configuration(
                "PRIVATE_KEY_FILE is required. Set `private_key_file` in the configuration file."
                    .to_string(),
            ));
        }
        if self.warehouse_name().is_some() && self.warehouse_activities.is_empty() {
            return Err(CoreError::Configuration(
                "`warehouse_activities` must name at least one activity when a warehouse is configured"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn instance(&self) -> Option<&str> {
        non_empty(&self.instance)
    }

    pub fn private_key_path(&self) -> Option<&Path> {
        non_empty(&self.private_key_file).map(Path::new)
    }

    pub fn existing_account_id(&self) -> Option<&str> {
        non_empty(&self.existing_account_id)
    }

    pub fn warehouse_name(&self) -> Option<&str> {
        non_empty(&self.warehouse_name)
    }

    /// Integration name, falling back to the account display name.
    pub fn friendly_name(&self) -> &str {
        non_empty(&self.integration_friendly_name).unwrap_or(&self.display_name)
    }

    pub fn description(&self) -> &str {
        &self.integration_description
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Developer token from `access_token`, else `DOMO_DEVELOPER_TOKEN`.
///
/// Absence is not an error here; the service rejects unauthenticated calls.
pub fn developer_token(lookup: impl Fn(&str) -> Option<String>) -> Option<DeveloperToken> {
    [TOKEN_ENV, TOKEN_ENV_FALLBACK]
        .into_iter()
        .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
        .map(|token| DeveloperToken::new(token.trim()))
}

/// `KEY=value` pairs from a dotenv file, without touching the process
/// environment. A missing file yields no variables.
pub fn read_dotenv(path: &Path) -> CoreResult<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            log::debug!("No dotenv file at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => {
            return Err(CoreError::Configuration(format!(
                "cannot read dotenv file '{}': {e}",
                path.display()
            )));
        }
    };
    let vars = iter.collect::<Result<HashMap<_, _>, _>>().map_err(|e| {
        CoreError::Configuration(format!("invalid dotenv file '{}': {e}", path.display()))
    })?;
    log::debug!("Loaded {} variables from {}", vars.len(), path.display());
    Ok(vars)
}

/// Looks a variable up in `primary` first, then in `dotenv`.
///
/// Process variables win over the file, matching `dotenv` loaders that never
/// override what is already set.
pub fn with_dotenv<'a>(
    primary: impl Fn(&str) -> Option<String> + 'a,
    dotenv: &'a HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| primary(key).or_else(|| dotenv.get(key).cloned())
}
