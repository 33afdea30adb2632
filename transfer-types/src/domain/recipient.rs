//! Recipient and payout method models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::TransactionId;

/// A single payout leg of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Parent transaction, set by the provider once the transaction exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub transaction_id: Option<TransactionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "initial")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_state: Option<String>,
    #[schema(example = 15000)]
    pub requested_amount: f64,
    #[schema(example = "NGN")]
    pub requested_currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_usd_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_currency: Option<String>,
    pub payout_method: PayoutMethod,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// How a recipient gets paid, e.g. `NGN::Bank` with bank account details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayoutMethod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Rail tag in the form `<CURRENCY>::<Rail>`
    #[serde(rename = "type")]
    #[schema(example = "NGN::Bank")]
    pub method_type: String,
    #[serde(default)]
    pub details: PayoutDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    /// Field descriptions the provider attaches to payout methods it returns
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    #[schema(value_type = Object)]
    pub fields: serde_json::Value,
}

impl PayoutMethod {
    /// Parses the `type` tag into its currency and rail.
    ///
    /// Returns `None` when the tag does not follow `<CURRENCY>::<Rail>`.
    pub fn rail(&self) -> Option<PayoutRail> {
        let (currency, rail) = self.method_type.split_once("::")?;
        if currency.is_empty() || rail.is_empty() {
            return None;
        }

        let kind = match rail {
            "Bank" => RailKind::Bank,
            "Mobile" => RailKind::Mobile,
            "Cash" => RailKind::Cash,
            other => RailKind::Other(other.to_string()),
        };

        Some(PayoutRail {
            currency: currency.to_string(),
            kind,
        })
    }
}

/// A country/currency specific payment rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutRail {
    pub currency: String,
    pub kind: RailKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RailKind {
    Bank,
    Mobile,
    Cash,
    Other(String),
}

impl std::fmt::Display for PayoutRail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rail = match &self.kind {
            RailKind::Bank => "Bank",
            RailKind::Mobile => "Mobile",
            RailKind::Cash => "Cash",
            RailKind::Other(rail) => rail,
        };
        write!(f, "{}::{}", self.currency, rail)
    }
}

/// Union of the detail fields used across payout rails.
///
/// Which fields are required depends on the rail; the provider validates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayoutDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "082")]
    pub bank_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "123456789")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "20")]
    pub bank_account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}
