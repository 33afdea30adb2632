//! Transaction Orchestrator
//!
//! Creates a transaction at the provider and then funds it with a debit.
//! Every provider failure is turned into a `FundingOutcome` variant so the
//! caller can tell a clean rejection from a half-done operation.

use std::sync::Arc;

use transfer_types::{
    Debit, FundingConfirmation, FundingOutcome, ProviderApi, ProviderError, Transaction,
    TransactionRequest,
};

/// Drives the two-step "create, then fund" sequence.
///
/// Holds no state between calls. Issues exactly one create call and at most
/// one debit call per `create_and_fund`; never retries.
pub struct TransactionOrchestrator<P: ProviderApi> {
    provider: Arc<P>,
}

impl<P: ProviderApi> Clone for TransactionOrchestrator<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: ProviderApi> TransactionOrchestrator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Creates the transaction, then funds it if the provider assigned an id.
    #[tracing::instrument(
        skip(self, req),
        fields(external_id = ?req.external_id, input_currency = %req.input_currency)
    )]
    pub async fn create_and_fund(&self, req: &TransactionRequest) -> FundingOutcome {
        if req.sender.has_ambiguous_reference() {
            // Forwarded unchanged: the provider owns this rule.
            tracing::warn!("sender reference carries both id and external_id");
        }

        let transaction = match self.provider.create_transaction(req).await {
            Ok(transaction) => transaction,
            Err(ProviderError::Validation(errors)) => {
                tracing::info!(%errors, "transaction rejected by provider");
                return FundingOutcome::Rejected { errors };
            }
            Err(e) => {
                tracing::error!(error = %e, "transaction could not be created");
                return FundingOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        self.fund(transaction).await
    }

    /// Issues a new funding debit for an existing transaction.
    ///
    /// This is the compensating action after `FundingRejected` or
    /// `FundingFailed`. The transaction is re-read first so the debit uses the
    /// provider's current input currency.
    #[tracing::instrument(skip(self))]
    pub async fn fund_transaction(&self, id: &str) -> Result<FundingOutcome, ProviderError> {
        let transaction = self.provider.get_transaction(id).await?;
        Ok(self.fund(transaction).await)
    }

    async fn fund(&self, transaction: Transaction) -> FundingOutcome {
        let Some(debit) = Debit::for_transaction(&transaction) else {
            tracing::warn!("provider returned a transaction without id, funding skipped");
            return FundingOutcome::Created { transaction };
        };

        match self.provider.create_debit(&debit).await {
            Ok(debits) => {
                tracing::info!(transaction_id = %debit.to_id, "transaction funded successfully");
                FundingOutcome::Funded {
                    transaction,
                    funding: FundingConfirmation::from_debits(debits),
                }
            }
            Err(ProviderError::Validation(errors)) => {
                tracing::error!(transaction_id = %debit.to_id, %errors, "transaction could not be funded");
                FundingOutcome::FundingRejected {
                    transaction,
                    errors,
                }
            }
            Err(e) => {
                tracing::error!(transaction_id = %debit.to_id, error = %e, "funding request failed");
                FundingOutcome::FundingFailed {
                    transaction,
                    error: e.to_string(),
                }
            }
        }
    }
}
