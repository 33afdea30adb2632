//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::recipient::Recipient;
use super::sender::Sender;

/// Provider-assigned identifier for a Transaction.
///
/// Opaque to this service: it is never parsed, only forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wraps a provider identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a transaction as reported by the provider.
///
/// States the provider adds later are kept verbatim in `Other` so that a
/// decoded payload still serializes back to what was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionState {
    Initial,
    Approved,
    Pending,
    Received,
    Mispaid,
    Manual,
    Paid,
    Canceled,
    Refunded,
    Expired,
    Exception,
    Other(String),
}

impl TransactionState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initial => "initial",
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Mispaid => "mispaid",
            Self::Manual => "manual",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
            Self::Refunded => "refunded",
            Self::Expired => "expired",
            Self::Exception => "exception",
            Self::Other(state) => state,
        }
    }
}

impl From<String> for TransactionState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "initial" => Self::Initial,
            "approved" => Self::Approved,
            "pending" => Self::Pending,
            "received" => Self::Received,
            "mispaid" => Self::Mispaid,
            "manual" => Self::Manual,
            "paid" => Self::Paid,
            "canceled" => Self::Canceled,
            "refunded" => Self::Refunded,
            "expired" => Self::Expired,
            "exception" => Self::Exception,
            _ => Self::Other(state),
        }
    }
}

impl From<TransactionState> for String {
    fn from(state: TransactionState) -> Self {
        match state {
            TransactionState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction as stored by the provider.
///
/// `id` is `None` until the provider has accepted the transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    /// Provider-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "9170b966-ffff-ffff-ffff-7af5ad7e335f")]
    pub id: Option<TransactionId>,
    /// Caller-assigned correlation identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "EXTRAN-555999778899988")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "approved")]
    pub state: Option<TransactionState>,
    /// Currency the sender pays in
    #[schema(example = "USD")]
    pub input_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Sender>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    /// Pay-in instructions the provider attaches once the transaction is created
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub payin_methods: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Returns the provider id, if one has been assigned.
    pub fn id(&self) -> Option<&TransactionId> {
        self.id.as_ref()
    }
}
