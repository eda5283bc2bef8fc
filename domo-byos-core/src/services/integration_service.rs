//! BYOS integration creation

use std::sync::Arc;

use domo_byos_client::{AccountRef, BYOS_ACCOUNTS_PATH, IntegrationRef, IntegrationSpec};

use crate::error::CoreResult;
use crate::reporter::ProvisionEvent;

use super::ServiceContext;

pub struct IntegrationService {
    ctx: Arc<ServiceContext>,
}

impl IntegrationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Registers a Snowflake BYOS integration backed by `account`.
    ///
    /// `friendly_name` and `description` override the configured values;
    /// the friendly name otherwise falls back to the account display name.
    pub async fn create_integration(
        &self,
        account: &AccountRef,
        friendly_name: Option<&str>,
        description: Option<&str>,
    ) -> CoreResult<IntegrationRef> {
        let config = &self.ctx.config;
        let spec = IntegrationSpec::snowflake_key_pair(
            account,
            friendly_name.unwrap_or_else(|| config.friendly_name()),
            description.unwrap_or_else(|| config.description()),
        );

        self.ctx.report(ProvisionEvent::Info(format!(
            "Creating BYOS integration '{}' on {}...",
            spec.friendly_name(),
            config.instance().unwrap_or_default()
        )));
        self.ctx.report(ProvisionEvent::Request {
            method: "POST",
            url: self.ctx.url(BYOS_ACCOUNTS_PATH),
            payload: Some(spec.to_pretty_json()),
        });

        match self.ctx.api.create_integration(&spec).await {
            Ok(reply) => {
                self.ctx.report_success(
                    reply.status,
                    "Success! BYOS integration created.",
                    &reply.body,
                );
                log::info!("Created BYOS integration {} for account {account}", reply.value);
                Ok(reply.value)
            }
            Err(e) => {
                self.ctx
                    .report_client_error("Failed to create BYOS integration", &e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::{MockByosApi, RecordedCall, base_config, test_context};
    use domo_byos_client::Operation;
    use std::path::Path;

    #[tokio::test]
    async fn numeric_id_is_stringified() {
        let api = Arc::new(
            MockByosApi::new().respond(Operation::CreateIntegration, 200, r#"{"id": 4021}"#),
        );
        let (ctx, _) = test_context(api.clone(), base_config(Path::new("/keys/rsa_key.p8")));

        let integration = IntegrationService::new(ctx)
            .create_integration(&AccountRef::new("118"), None, None)
            .await
            .unwrap();

        assert_eq!(integration, IntegrationRef::new("4021"));
    }

    #[tokio::test]
    async fn friendly_name_defaults_to_display_name() {
        let api = Arc::new(
            MockByosApi::new().respond(Operation::CreateIntegration, 201, r#"{"id":"byos-1"}"#),
        );
        let (ctx, reporter) =
            test_context(api.clone(), base_config(Path::new("/keys/rsa_key.p8")));

        IntegrationService::new(ctx)
            .create_integration(&AccountRef::new("118"), None, Some("nightly loads"))
            .await
            .unwrap();

        let calls = api.calls().await;
        let RecordedCall::CreateIntegration(spec) = &calls[0] else {
            panic!("unexpected call {:?}", calls[0]);
        };
        assert_eq!(spec.friendly_name(), "Acme Snowflake");
        assert_eq!(spec.properties.description.value, "nightly loads");
        assert_eq!(spec.properties.service_account_id.value, "118");
        assert!(
            reporter
                .text()
                .contains("Creating BYOS integration 'Acme Snowflake' on acme.example.com...")
        );
    }

    #[tokio::test]
    async fn explicit_friendly_name_wins() {
        let api = Arc::new(
            MockByosApi::new().respond(Operation::CreateIntegration, 201, r#"{"id":"byos-1"}"#),
        );
        let (ctx, _) = test_context(api.clone(), base_config(Path::new("/keys/rsa_key.p8")));

        IntegrationService::new(ctx)
            .create_integration(&AccountRef::new("118"), Some("Acme BYOS"), None)
            .await
            .unwrap();

        let calls = api.calls().await;
        let RecordedCall::CreateIntegration(spec) = &calls[0] else {
            panic!("unexpected call {:?}", calls[0]);
        };
        assert_eq!(spec.friendly_name(), "Acme BYOS");
    }

    #[tokio::test]
    async fn rejected_integration_is_http_error() {
        let api = Arc::new(MockByosApi::new().respond(
            Operation::CreateIntegration,
            409,
            r#"{"message":"integration exists"}"#,
        ));
        let (ctx, reporter) = test_context(api, base_config(Path::new("/keys/rsa_key.p8")));

        let err = IntegrationService::new(ctx)
            .create_integration(&AccountRef::new("118"), None, None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Http);
        let text = reporter.text();
        assert!(text.contains("Status Code: 409"));
        assert!(text.contains("Error: Failed to create BYOS integration"));
        assert!(text.contains("integration exists"));
    }

    #[tokio::test]
    async fn non_json_reply_is_response_shape() {
        let api = Arc::new(
            MockByosApi::new().respond(Operation::CreateIntegration, 200, "<html>oops</html>"),
        );
        let (ctx, _) = test_context(api, base_config(Path::new("/keys/rsa_key.p8")));

        let err = IntegrationService::new(ctx)
            .create_integration(&AccountRef::new("118"), None, None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ResponseShape);
    }
}
