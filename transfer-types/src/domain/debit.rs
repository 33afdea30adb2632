//! Funding instruction model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::Transaction;

/// Entity tag used when a debit funds a transaction.
pub const TO_TYPE_TRANSACTION: &str = "Transaction";

/// Moves money from the integration's provider account into a target entity.
///
/// A debit is one-shot: submitting the same instruction again is a new
/// funding attempt, not a retry of the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Debit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[schema(example = "USD")]
    pub currency: String,
    /// Identifier of the funded entity
    #[schema(example = "9170b966-ffff-ffff-ffff-7af5ad7e335f")]
    pub to_id: String,
    /// Kind of the funded entity
    #[schema(example = "Transaction")]
    pub to_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Debit {
    /// Builds the debit that funds `transaction` in its input currency.
    ///
    /// Returns `None` if the provider has not assigned the transaction an id.
    pub fn for_transaction(transaction: &Transaction) -> Option<Self> {
        let id = transaction.id()?;
        Some(Self {
            id: None,
            currency: transaction.input_currency.clone(),
            to_id: id.to_string(),
            to_type: TO_TYPE_TRANSACTION.to_string(),
            amount: None,
            state: None,
            created_at: None,
        })
    }
}
