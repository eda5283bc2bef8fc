use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use veil::Redact;

use crate::utils::log_sanitizer::{PRIVATE_KEY_PLACEHOLDER, mask_passphrase};

/// `dataProviderType` of a Snowflake account using key-pair authentication.
pub const SNOWFLAKE_KEY_PAIR_PROVIDER: &str = "snowflakekeypairauthentication";

/// Query engine of every BYOS integration created here.
pub const SNOWFLAKE_ENGINE: &str = "SNOWFLAKE";

/// Value of both `AUTH_METHOD` and `ADMIN_AUTH_METHOD`. Not configurable.
pub const KEY_PAIR_AUTH_METHOD: &str = "KEY_PAIR";

/// `configType` of every integration property.
pub const CONFIG_TYPE: &str = "CONFIG";

// ============ Operations ============

/// The four calls this client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateAccount,
    CreateIntegration,
    ListWarehouses,
    AssignWarehouse,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateAccount => "create_account",
            Self::CreateIntegration => "create_integration",
            Self::ListWarehouses => "list_warehouses",
            Self::AssignWarehouse => "assign_warehouse",
        }
    }

    /// HTTP statuses this operation treats as success.
    pub fn accepts(self, status: u16) -> bool {
        match self {
            Self::ListWarehouses => status == 200,
            _ => matches!(status, 200 | 201),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Account ============

/// Snowflake connection settings embedded in the account payload.
#[derive(Clone, PartialEq, Eq, Serialize, Redact)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakeConnection {
    /// Snowflake account identifier
    pub account: String,
    pub username: String,
    /// PEM contents of the private key file
    #[redact]
    pub private_key: String,
    /// Empty when the key is not encrypted
    #[redact]
    pub pass_phrase: String,
    pub role: String,
}

/// Body of `POST /api/data/v1/accounts`.
///
/// The serialized form carries the private key. Use [`AccountSpec::redacted_json`]
/// for anything that gets printed or logged.
#[derive(Clone, PartialEq, Eq, Serialize, Redact)]
#[serde(rename_all = "camelCase")]
pub struct AccountSpec {
    pub name: String,
    pub display_name: String,
    pub data_provider_type: String,
    #[redact]
    pub configurations: SnowflakeConnection,
}

impl AccountSpec {
    /// Builds a Snowflake key-pair account.
    pub fn snowflake_key_pair(
        name: impl Into<String>,
        display_name: impl Into<String>,
        connection: SnowflakeConnection,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            data_provider_type: SNOWFLAKE_KEY_PAIR_PROVIDER.to_string(),
            configurations: connection,
        }
    }

    /// The payload as it is sent, with the key contents and passphrase masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.configurations.private_key = PRIVATE_KEY_PLACEHOLDER.to_string();
        copy.configurations.pass_phrase =
            mask_passphrase(&self.configurations.pass_phrase).to_string();
        copy
    }

    /// Pretty-printed JSON of [`AccountSpec::redacted`].
    pub fn redacted_json(&self) -> String {
        to_pretty_json(&self.redacted())
    }
}

/// Identifier of an account created in (or already known to) Domo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountRef {
    pub id: String,
}

impl AccountRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

// ============ BYOS integration ============

/// One entry of the integration property bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProperty {
    pub key: String,
    pub config_type: String,
    pub value: String,
}

impl ConfigProperty {
    pub fn config(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            config_type: CONFIG_TYPE.to_string(),
            value: value.into(),
        }
    }
}

/// Property bag of a BYOS integration, keyed by property name on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationProperties {
    #[serde(rename = "friendlyName")]
    pub friendly_name: ConfigProperty,
    pub description: ConfigProperty,
    #[serde(rename = "serviceAccountId")]
    pub service_account_id: ConfigProperty,
    #[serde(rename = "AUTH_METHOD")]
    pub auth_method: ConfigProperty,
    #[serde(rename = "ADMIN_AUTH_METHOD")]
    pub admin_auth_method: ConfigProperty,
}

/// Body of `POST /api/query/v1/byos/accounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationSpec {
    pub engine: String,
    pub properties: IntegrationProperties,
}

impl IntegrationSpec {
    /// Snowflake integration backed by `account`, always using key-pair auth.
    pub fn snowflake_key_pair(
        account: &AccountRef,
        friendly_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            engine: SNOWFLAKE_ENGINE.to_string(),
            properties: IntegrationProperties {
                friendly_name: ConfigProperty::config("friendlyName", friendly_name),
                description: ConfigProperty::config("description", description),
                service_account_id: ConfigProperty::config("serviceAccountId", account.id.clone()),
                auth_method: ConfigProperty::config("AUTH_METHOD", KEY_PAIR_AUTH_METHOD),
                admin_auth_method: ConfigProperty::config("ADMIN_AUTH_METHOD", KEY_PAIR_AUTH_METHOD),
            },
        }
    }

    pub fn friendly_name(&self) -> &str {
        &self.properties.friendly_name.value
    }

    pub fn to_pretty_json(&self) -> String {
        to_pretty_json(self)
    }
}

/// Identifier of a BYOS integration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegrationRef {
    pub id: String,
}

impl IntegrationRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for IntegrationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

// ============ Warehouses ============

/// A warehouse as listed by `GET /api/query/v1/byos/warehouses/{id}`.
///
/// Fields are kept exactly as the service returned them. A field missing from
/// the listing stays `None` and is echoed back as `null`. `warehouse` is kept
/// as a raw value too, so one malformed entry cannot fail the whole listing;
/// only string names can be matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseDescriptor {
    pub device_name: Option<Value>,
    pub warehouse: Option<Value>,
    pub device: Option<Value>,
    pub instance_size: Option<Value>,
    pub warehouse_size_friendly_name: Option<Value>,
}

impl WarehouseDescriptor {
    /// The warehouse name, when the service sent a string.
    pub fn name(&self) -> Option<&str> {
        match &self.warehouse {
            Some(Value::String(name)) => Some(name),
            _ => None,
        }
    }

    pub fn device_label(&self) -> String {
        display_value(self.device.as_ref())
    }

    pub fn size_label(&self) -> String {
        display_value(self.warehouse_size_friendly_name.as_ref())
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "n/a".to_string(),
        Some(other) => other.to_string(),
    }
}

/// What a warehouse may be used for once assigned.
///
/// Serialized in lowercase. Deserialization goes through [`FromStr`], so
/// config files may use any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Query,
    Index,
    Dataflow,
}

impl Activity {
    pub const ALL: [Self; 3] = [Self::Query, Self::Index, Self::Dataflow];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Index => "index",
            Self::Dataflow => "dataflow",
        }
    }

    /// The default activity set: everything enabled.
    pub fn all() -> BTreeSet<Self> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an activity name is not one of `query`, `index`, `dataflow`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivity(pub String);

impl fmt::Display for UnknownActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown warehouse activity '{}' (expected one of: query, index, dataflow)",
            self.0
        )
    }
}

impl std::error::Error for UnknownActivity {}

impl FromStr for Activity {
    type Err = UnknownActivity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "index" => Ok(Self::Index),
            "dataflow" => Ok(Self::Dataflow),
            _ => Err(UnknownActivity(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// One element of the `PUT /api/query/v1/byos/warehouses/{id}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseAssignment {
    #[serde(flatten)]
    pub warehouse: WarehouseDescriptor,
    /// A set: duplicates collapse and the wire order is always
    /// `query`, `index`, `dataflow`, whatever order the config used.
    pub activities: BTreeSet<Activity>,
}

impl WarehouseAssignment {
    /// Copies every descriptor field verbatim from the listing entry.
    pub fn from_descriptor(descriptor: &WarehouseDescriptor, activities: &BTreeSet<Activity>) -> Self {
        Self {
            warehouse: descriptor.clone(),
            activities: activities.clone(),
        }
    }
}

// ============ Replies ============

/// A successful call: status, raw body and the decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply<T> {
    pub status: u16,
    pub body: String,
    pub value: T,
}

pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
