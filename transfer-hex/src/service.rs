//! Transfer Application Service
//!
//! Fronts the orchestrator, the webhook dispatcher and the provider
//! passthroughs behind one type the HTTP adapter can hold.

use std::sync::Arc;

use serde_json::Value;
use transfer_types::{
    AccountValidationRequest, AppError, DecodedEvent, FundingOutcome, ProviderApi, Recipient,
    Sender, Transaction, TransactionRequest, WebhookError, WebhookHeaders, WebhookVerifier,
};

use crate::{dispatcher::WebhookDispatcher, orchestrator::TransactionOrchestrator};

/// A provider adapter that can both be called and verify its callbacks.
pub trait TransferProvider: ProviderApi + WebhookVerifier {}

impl<T: ProviderApi + WebhookVerifier> TransferProvider for T {}

/// Application service for transfer operations.
///
/// Generic over `P: TransferProvider` so tests can inject an in-memory provider.
pub struct TransferService<P: TransferProvider> {
    provider: Arc<P>,
    orchestrator: TransactionOrchestrator<P>,
    dispatcher: WebhookDispatcher<P>,
}

impl<P: TransferProvider> TransferService<P> {
    pub fn new(provider: P) -> Self {
        let provider = Arc::new(provider);
        Self {
            orchestrator: TransactionOrchestrator::new(Arc::clone(&provider)),
            dispatcher: WebhookDispatcher::new(Arc::clone(&provider)),
            provider,
        }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Orchestration
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn create_and_fund(&self, req: &TransactionRequest) -> FundingOutcome {
        self.orchestrator.create_and_fund(req).await
    }

    /// Retries funding for a transaction that already exists.
    pub async fn fund_transaction(&self, id: &str) -> Result<FundingOutcome, AppError> {
        Ok(self.orchestrator.fund_transaction(id).await?)
    }

    pub fn verify_and_dispatch(
        &self,
        url: &str,
        body: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<DecodedEvent, WebhookError> {
        self.dispatcher.verify_and_dispatch(url, body, headers)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Provider passthroughs
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn get_transaction(&self, id: &str) -> Result<Transaction, AppError> {
        Ok(self.provider.get_transaction(id).await?)
    }

    pub async fn list_transactions(
        &self,
        external_id: Option<&str>,
    ) -> Result<Vec<Transaction>, AppError> {
        Ok(self.provider.list_transactions(external_id).await?)
    }

    pub async fn create_sender(&self, sender: &Sender) -> Result<Sender, AppError> {
        if sender.id.is_some() {
            return Err(AppError::BadRequest(
                "A new sender cannot carry an id".into(),
            ));
        }
        Ok(self.provider.create_sender(sender).await?)
    }

    pub async fn get_sender(&self, id: &str) -> Result<Sender, AppError> {
        Ok(self.provider.get_sender(id).await?)
    }

    pub async fn list_senders(&self, external_id: Option<&str>) -> Result<Vec<Sender>, AppError> {
        Ok(self.provider.list_senders(external_id).await?)
    }

    /// Cancels a single payout leg.
    pub async fn cancel_recipient(&self, id: &str) -> Result<Recipient, AppError> {
        let recipient = self.provider.delete_recipient(id).await?;
        tracing::info!(recipient_id = id, "recipient cancelled");
        Ok(recipient)
    }

    pub async fn validate_account(&self, req: &AccountValidationRequest) -> Result<Value, AppError> {
        Ok(self.provider.validate_account(req).await?)
    }

    pub async fn currencies(&self) -> Result<Value, AppError> {
        Ok(self.provider.currencies().await?)
    }
}
