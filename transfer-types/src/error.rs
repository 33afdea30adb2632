//! Error types for the transfer service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One field-level complaint from the provider, e.g. `{"error": "invalid"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub error: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Field-level validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub BTreeMap<String, Vec<ValidationIssue>>);

impl ValidationErrors {
    /// Records an issue against `field`.
    pub fn add(&mut self, field: impl Into<String>, error: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(ValidationIssue {
            error: error.into(),
            details: Map::new(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields that failed validation.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, issues) in &self.0 {
            for issue in issues {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{} {}", field, issue.error)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Errors returned by the provider port.
///
/// `Validation` is an expected rejection of the input; every other variant is
/// a transport or unexpected failure.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Provider error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Errors from verifying and decoding an inbound webhook.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Webhook signature could not be verified")]
    AuthFailure,

    #[error("Malformed webhook: {0}")]
    Malformed(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Unprocessable(ValidationErrors),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Validation(errors) => AppError::Unprocessable(errors),
            ProviderError::NotFound(msg) => AppError::NotFound(msg),
            e @ ProviderError::InvalidId(_) => AppError::BadRequest(e.to_string()),
            // Our own credentials were refused upstream; not the caller's fault.
            ProviderError::Unauthorized(msg) => AppError::BadGateway(msg),
            e @ (ProviderError::Api { .. }
            | ProviderError::Transport(_)
            | ProviderError::Decode(_)) => AppError::BadGateway(e.to_string()),
        }
    }
}

impl From<WebhookError> for AppError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::AuthFailure => AppError::Unauthorized(err.to_string()),
            WebhookError::Malformed(msg) => AppError::BadRequest(msg),
        }
    }
}
