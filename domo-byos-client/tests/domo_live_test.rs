//! Domo live smoke tests
//!
//! Read-only: only the warehouse listing is exercised, account and
//! integration creation are never called from here.
//!
//! ```bash
//! DOMO_INSTANCE=acme.domo.com access_token=xxx DOMO_TEST_INTEGRATION_ID=xxx \
//!     cargo test -p domo-byos-client --test domo_live_test -- --ignored --nocapture
//! ```

use std::env;

use domo_byos_client::{ByosApi, ClientError, DeveloperToken, DomoClient, IntegrationRef};

macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

fn live_client() -> Option<DomoClient> {
    let instance = env::var("DOMO_INSTANCE").ok()?;
    let token = env::var("access_token").ok().map(DeveloperToken::new);
    DomoClient::new(&instance, token).ok()
}

#[tokio::test]
#[ignore]
async fn test_list_warehouses() {
    skip_if_no_credentials!("DOMO_INSTANCE", "access_token", "DOMO_TEST_INTEGRATION_ID");

    let client = live_client().expect("failed to build client");
    let integration = IntegrationRef::new(env::var("DOMO_TEST_INTEGRATION_ID").unwrap());

    let result = client.list_warehouses(&integration).await;
    assert!(result.is_ok(), "list_warehouses failed: {result:?}");

    let reply = result.unwrap();
    assert_eq!(reply.status, 200);
    for warehouse in &reply.value {
        println!("  - {:?} ({})", warehouse.name(), warehouse.size_label());
    }
}

#[tokio::test]
#[ignore]
async fn test_missing_token_is_rejected_remotely() {
    skip_if_no_credentials!("DOMO_INSTANCE", "DOMO_TEST_INTEGRATION_ID");

    let instance = env::var("DOMO_INSTANCE").unwrap();
    let client = DomoClient::new(&instance, None).expect("failed to build client");
    let integration = IntegrationRef::new(env::var("DOMO_TEST_INTEGRATION_ID").unwrap());

    let result = client.list_warehouses(&integration).await;
    assert!(
        matches!(result, Err(ClientError::HttpStatus { status, .. }) if status >= 400),
        "expected an HTTP error, got {result:?}"
    );
}
