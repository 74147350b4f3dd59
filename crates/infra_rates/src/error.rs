//! Rate service error types
//!
//! Errors raised while talking to the exchange rate service, and their
//! translation into the port-level `PortError` the domain understands.

use std::time::Duration;
use thiserror::Error;

use core_kernel::{MoneyError, PortError};

/// Service name reported in port errors
pub const SERVICE_NAME: &str = "exchangerate-api";

/// Errors that can occur while calling the exchange rate service
#[derive(Debug, Error)]
pub enum RatesError {
    /// The request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status and no error body
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The service answered with `"result": "error"`
    #[error("Service reported error: {error_type}")]
    Api { error_type: String },

    /// The body was not the JSON shape we expect
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body decoded but did not hold a usable quotation
    #[error("Invalid quotation: {0}")]
    Money(#[from] MoneyError),

    /// A required field was absent
    #[error("Missing field {0} in response")]
    MissingField(&'static str),
}

impl RatesError {
    /// Translates the error for the domain
    ///
    /// `operation` names the request in timeout reports; it must not
    /// contain the API key.
    pub fn into_port_error(self, operation: &str, timeout: Duration) -> PortError {
        match self {
            RatesError::Http(e) if e.is_timeout() => PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: timeout.as_millis() as u64,
            },
            RatesError::Http(e) if e.is_connect() => PortError::Connection {
                message: format!("{} unreachable", SERVICE_NAME),
                source: Some(Box::new(e.without_url())),
            },
            RatesError::Http(e) => match e.status() {
                Some(status) => status_error(status.as_u16()),
                None => PortError::Internal {
                    message: format!("{} failed", operation),
                    source: Some(Box::new(e.without_url())),
                },
            },
            RatesError::Status { status } => status_error(status),
            RatesError::Api { error_type } => api_error(&error_type),
            RatesError::Decode(e) => PortError::transformation(e.to_string()),
            RatesError::Money(e) => PortError::transformation(e.to_string()),
            RatesError::MissingField(field) => {
                PortError::transformation(format!("missing field {}", field))
            }
        }
    }
}

/// Maps an HTTP status to a port error
pub fn status_error(status: u16) -> PortError {
    match status {
        401 | 403 => PortError::Unauthorized {
            message: format!("{} rejected the API key (HTTP {})", SERVICE_NAME, status),
        },
        404 => PortError::not_found("Endpoint", status),
        429 => PortError::RateLimited {
            message: format!("{} answered HTTP 429", SERVICE_NAME),
        },
        500..=599 => PortError::ServiceUnavailable {
            service: SERVICE_NAME.to_string(),
        },
        _ => PortError::internal(format!("{} answered HTTP {}", SERVICE_NAME, status)),
    }
}

/// Maps the service's `error-type` field to a port error
pub fn api_error(error_type: &str) -> PortError {
    match error_type {
        "unsupported-code" => PortError::not_found("Currency", error_type),
        "invalid-key" | "inactive-account" => PortError::Unauthorized {
            message: error_type.to_string(),
        },
        "quota-reached" => PortError::RateLimited {
            message: error_type.to_string(),
        },
        "malformed-request" => PortError::validation(error_type),
        other => PortError::internal(format!("{} error: {}", SERVICE_NAME, other)),
    }
}
