use serde::{Deserialize, Serialize};

/// Unified error type for all Domo API operations.
///
/// Each variant carries the `operation` that produced it (for example
/// `create_account` or `list_warehouses`) so a failure can be attributed to a
/// workflow step from the error alone. All variants are serializable for
/// structured error reporting.
///
/// Nothing in this crate retries; every variant is returned to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred (DNS resolution failure, connection refused, TLS, etc.).
    NetworkError {
        /// Operation that produced the error.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Operation that produced the error.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// The service answered with a status the operation does not accept.
    HttpStatus {
        /// Operation that produced the error.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body, unmodified.
        body: String,
    },

    /// The service answered with a success status but a required field is missing.
    ResponseShape {
        /// Operation that produced the error.
        operation: String,
        /// HTTP status code (a success status).
        status: u16,
        /// Name of the missing or empty field.
        field: String,
        /// Raw response body, unmodified.
        body: String,
    },

    /// Failed to parse the service's response body.
    ParseError {
        /// Operation that produced the error.
        operation: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to build the HTTP client or serialize a request body.
    SerializationError {
        /// Operation that produced the error.
        operation: String,
        /// Details about the failure.
        detail: String,
    },
}

impl ClientError {
    /// Whether this is an answer from the service rather than a transport fault.
    ///
    /// Returns `true` when `warn` is the right log level, `false` for `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::ResponseShape { .. })
    }

    /// The operation that produced this error.
    #[must_use]
    pub fn operation(&self) -> &str {
        match self {
            Self::NetworkError { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::HttpStatus { operation, .. }
            | Self::ResponseShape { operation, .. }
            | Self::ParseError { operation, .. }
            | Self::SerializationError { operation, .. } => operation,
        }
    }

    /// The HTTP status, for variants that received a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } | Self::ResponseShape { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response body, for variants that received one.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } | Self::ResponseShape { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { operation, detail } => {
                write!(f, "[{operation}] Network error: {detail}")
            }
            Self::Timeout { operation, detail } => {
                write!(f, "[{operation}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                operation, status, ..
            } => {
                write!(f, "[{operation}] Unexpected HTTP status {status}")
            }
            Self::ResponseShape {
                operation, field, ..
            } => {
                write!(f, "[{operation}] Response is missing field '{field}'")
            }
            Self::ParseError { operation, detail } => {
                write!(f, "[{operation}] Parse error: {detail}")
            }
            Self::SerializationError { operation, detail } => {
                write!(f, "[{operation}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ClientError::NetworkError {
            operation: "create_account".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[create_account] Network error: connection refused"
        );
    }

    #[test]
    fn display_http_status_omits_body() {
        let e = ClientError::HttpStatus {
            operation: "list_warehouses".to_string(),
            status: 403,
            body: r#"{"message":"forbidden"}"#.to_string(),
        };
        assert_eq!(e.to_string(), "[list_warehouses] Unexpected HTTP status 403");
        assert_eq!(e.response_body(), Some(r#"{"message":"forbidden"}"#));
    }

    #[test]
    fn display_response_shape() {
        let e = ClientError::ResponseShape {
            operation: "create_account".to_string(),
            status: 201,
            field: "id".to_string(),
            body: "{}".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[create_account] Response is missing field 'id'"
        );
        assert_eq!(e.status(), Some(201));
    }

    #[test]
    fn display_timeout() {
        let e = ClientError::Timeout {
            operation: "assign_warehouse".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[assign_warehouse] Request timeout: 30s elapsed"
        );
    }

    #[test]
    fn operation_is_reported_for_every_variant() {
        let e = ClientError::ParseError {
            operation: "create_integration".into(),
            detail: "bad json".into(),
        };
        assert_eq!(e.operation(), "create_integration");
        assert!(e.response_body().is_none());
    }

    #[test]
    fn expected_errors_are_service_answers() {
        assert!(
            ClientError::HttpStatus {
                operation: "t".into(),
                status: 500,
                body: String::new(),
            }
            .is_expected()
        );
        assert!(
            !ClientError::NetworkError {
                operation: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn serialize_carries_code_tag() {
        let e = ClientError::HttpStatus {
            operation: "create_account".to_string(),
            status: 409,
            body: "conflict".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"HttpStatus\""));
        assert!(json.contains("\"status\":409"));
    }
}
