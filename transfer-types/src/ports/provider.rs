//! Provider API port.
//!
//! This is the primary outbound port in our hexagonal architecture.
//! The HTTP adapter and the test mocks implement this trait.

use crate::domain::{Debit, Recipient, Sender, Transaction};
use crate::dto::{AccountValidationRequest, TransactionRequest};
use crate::error::ProviderError;

/// Typed operations against the remote transfer provider.
///
/// Every call is a single request/response; implementations must not retry.
#[async_trait::async_trait]
pub trait ProviderApi: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a transaction. The returned record normally carries a provider id.
    async fn create_transaction(
        &self,
        req: &TransactionRequest,
    ) -> Result<Transaction, ProviderError>;

    /// Submits a funding debit and returns the debits the provider recorded.
    async fn create_debit(&self, debit: &Debit) -> Result<Vec<Debit>, ProviderError>;

    async fn get_transaction(&self, id: &str) -> Result<Transaction, ProviderError>;

    /// Lists transactions, optionally filtered by caller-assigned id.
    async fn list_transactions(
        &self,
        external_id: Option<&str>,
    ) -> Result<Vec<Transaction>, ProviderError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Senders & Recipients
    // ─────────────────────────────────────────────────────────────────────────────

    async fn create_sender(&self, sender: &Sender) -> Result<Sender, ProviderError>;

    async fn get_sender(&self, id: &str) -> Result<Sender, ProviderError>;

    /// Lists senders, optionally filtered by caller-assigned id.
    async fn list_senders(&self, external_id: Option<&str>) -> Result<Vec<Sender>, ProviderError>;

    /// Cancels a recipient; the provider returns the updated record.
    async fn delete_recipient(&self, id: &str) -> Result<Recipient, ProviderError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Reference data
    // ─────────────────────────────────────────────────────────────────────────────

    /// Looks up the account holder behind a payout account.
    async fn validate_account(
        &self,
        req: &AccountValidationRequest,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Currencies the integration can send and receive.
    async fn currencies(&self) -> Result<serde_json::Value, ProviderError>;
}
