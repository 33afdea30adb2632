//! Data Transfer Objects (DTOs) for requests and orchestration outcomes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Debit, Recipient, Sender, Transaction};
use crate::error::ValidationErrors;

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Specification of a transaction to create at the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransactionRequest {
    /// Currency the sender pays in
    #[schema(example = "USD")]
    pub input_currency: String,
    /// Sender reference: exactly one of `id` or `external_id`
    pub sender: Sender,
    /// One or more payout legs
    pub recipients: Vec<Recipient>,
    /// Caller-assigned correlation id, unique per integration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "EXTRAN-555999778899988")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
}

/// Provider confirmation of a funding debit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FundingConfirmation {
    /// True when the provider acknowledged at least one debit
    pub confirmed: bool,
    pub debits: Vec<Debit>,
}

impl FundingConfirmation {
    pub fn from_debits(debits: Vec<Debit>) -> Self {
        Self {
            confirmed: !debits.is_empty(),
            debits,
        }
    }
}

/// Result of creating a transaction and funding it.
///
/// The `Funding*` variants are partial failures: the transaction exists at the
/// provider but is unfunded, and its id is carried so funding can be retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FundingOutcome {
    /// Created and funded.
    ///
    /// A debit call that succeeds but echoes no debit records is still
    /// `Funded`, with `funding.confirmed` set to false.
    Funded {
        transaction: Transaction,
        funding: FundingConfirmation,
    },
    /// Created without an id, so no funding was attempted
    Created { transaction: Transaction },
    /// The provider rejected the transaction
    Rejected {
        #[schema(value_type = Object)]
        errors: ValidationErrors,
    },
    /// Creating the transaction failed for a non-validation reason
    Failed { error: String },
    /// Created, but the provider rejected the debit
    FundingRejected {
        transaction: Transaction,
        #[schema(value_type = Object)]
        errors: ValidationErrors,
    },
    /// Created, but the debit failed for a non-validation reason
    FundingFailed {
        transaction: Transaction,
        error: String,
    },
}

impl FundingOutcome {
    /// The transaction that exists at the provider after this outcome, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            Self::Funded { transaction, .. }
            | Self::Created { transaction }
            | Self::FundingRejected { transaction, .. }
            | Self::FundingFailed { transaction, .. } => Some(transaction),
            Self::Rejected { .. } | Self::Failed { .. } => None,
        }
    }

    /// True when a transaction was committed remotely but funding did not succeed.
    pub fn is_partial_failure(&self) -> bool {
        matches!(
            self,
            Self::FundingRejected { .. } | Self::FundingFailed { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Funded { .. } => "funded",
            Self::Created { .. } => "created",
            Self::Rejected { .. } => "rejected",
            Self::Failed { .. } => "failed",
            Self::FundingRejected { .. } => "funding_rejected",
            Self::FundingFailed { .. } => "funding_failed",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Account validation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to check that a payout account exists before sending to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccountValidationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "9040009999999")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "889999999")]
    pub bank_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_provider: Option<String>,
    #[schema(example = "GH")]
    pub country: String,
    #[schema(example = "GHS")]
    pub currency: String,
    /// `bank` or `mobile`
    #[schema(example = "bank")]
    pub method: String,
}
