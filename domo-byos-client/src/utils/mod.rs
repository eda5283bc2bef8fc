//! Utility modules.

/// Redaction and truncation for logs and printed payloads.
pub mod log_sanitizer;
