//! Generic HTTP client tools
//!
//! Reusable request handling shared by every Domo call: sending, logging,
//! reading the body and decoding JSON. Each call builds its own
//! `RequestBuilder`; status interpretation stays with the caller.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::types::Operation;
use crate::utils::log_sanitizer::truncate_for_log;

/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default whole-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the shared reqwest client.
pub fn create_http_client(request_timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(request_timeout)
        .build()
        .map_err(|e| ClientError::SerializationError {
            operation: "build_client".to_string(),
            detail: e.to_string(),
        })
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// Only transport failures are errors here; any status code is returned
    /// to the caller. Request bodies are never logged because the account
    /// payload carries key material.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        operation: Operation,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{operation}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    operation: operation.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    operation: operation.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{operation}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError {
                operation: operation.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{operation}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Turns a status the operation does not accept into `HttpStatus`.
    pub fn ensure_success(operation: Operation, status: u16, body: String) -> Result<String> {
        if operation.accepts(status) {
            Ok(body)
        } else {
            log::warn!("[{operation}] Unexpected HTTP status {status}");
            Err(ClientError::HttpStatus {
                operation: operation.to_string(),
                status,
                body,
            })
        }
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, operation: Operation) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{operation}] JSON parse failed: {e}");
            log::error!(
                "[{operation}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ClientError::ParseError {
                operation: operation.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Extract the `id` of a created resource.
    ///
    /// Accepts a non-empty string or a number (rendered in decimal). Anything
    /// else, including an empty string, is a `ResponseShape` error.
    pub fn extract_id(response_text: &str, status: u16, operation: Operation) -> Result<String> {
        let value: Value = Self::parse_json(response_text, operation)?;
        match value.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => {
                log::warn!("[{operation}] Could not extract id from response");
                Err(ClientError::ResponseShape {
                    operation: operation.to_string(),
                    status,
                    field: "id".to_string(),
                    body: response_text.to_string(),
                })
            }
        }
    }
}
