//! User-facing status report
//!
//! The workflow describes each request and response as a [`ProvisionEvent`];
//! a [`Reporter`] decides where it goes. Payloads reach the reporter already
//! redacted, so nothing here ever sees key material.

use std::fmt;

const BANNER_WIDTH: usize = 60;

/// One entry of the status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionEvent {
    /// Banner announcing a workflow stage
    Section(String),
    Info(String),
    /// About to send a request; `payload` is printable (redacted) JSON
    Request {
        method: &'static str,
        url: String,
        payload: Option<String>,
    },
    /// HTTP status of the last response
    Status(u16),
    /// Raw response body
    Body(String),
    Success(String),
    Failure(String),
    /// A list under a heading, e.g. the available warehouse names
    Listing { heading: String, items: Vec<String> },
    Skipped(String),
}

impl fmt::Display for ProvisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section(title) => {
                let rule = "=".repeat(BANNER_WIDTH);
                write!(f, "\n{rule}\n{title}\n{rule}")
            }
            Self::Info(message) | Self::Success(message) | Self::Body(message) => {
                f.write_str(message)
            }
            Self::Request {
                method,
                url,
                payload,
            } => {
                write!(f, "{method} {url}")?;
                if let Some(payload) = payload {
                    write!(f, "\nPayload:\n{payload}")?;
                }
                Ok(())
            }
            Self::Status(status) => write!(f, "\nStatus Code: {status}"),
            Self::Failure(message) => write!(f, "Error: {message}"),
            Self::Listing { heading, items } => {
                write!(f, "{heading}")?;
                for item in items {
                    write!(f, "\n  - {item}")?;
                }
                Ok(())
            }
            Self::Skipped(reason) => write!(f, "\n{reason}"),
        }
    }
}

/// Receives the status report.
pub trait Reporter: Send + Sync {
    fn report(&self, event: ProvisionEvent);
}

/// Prints every event to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: ProvisionEvent) {
        println!("{event}");
    }
}
