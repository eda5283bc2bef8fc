//! Domo API paths and base URL handling

/// Header carrying the developer token on every request.
pub const DEVELOPER_TOKEN_HEADER: &str = "X-Domo-Developer-Token";

/// Account creation (data API).
pub const ACCOUNTS_PATH: &str = "/api/data/v1/accounts";

/// BYOS integration creation (query API).
pub const BYOS_ACCOUNTS_PATH: &str = "/api/query/v1/byos/accounts";

/// Warehouse listing and assignment for one integration.
pub fn warehouses_path(integration_id: &str) -> String {
    format!(
        "/api/query/v1/byos/warehouses/{}",
        urlencoding::encode(integration_id)
    )
}

/// Base URL for an instance hostname such as `acme.domo.com`.
///
/// A value that already carries a scheme is kept as-is, minus trailing slashes.
pub fn base_url(instance: &str) -> String {
    let instance = instance.trim().trim_end_matches('/');
    if instance.starts_with("https://") || instance.starts_with("http://") {
        instance.to_string()
    } else {
        format!("https://{instance}")
    }
}
