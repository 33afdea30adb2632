//! TransferService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use transfer_types::{
        AccountValidationRequest, AppError, DecodedEvent, Debit, EventKind, FundingOutcome,
        PayoutDetails, PayoutMethod, ProviderApi, ProviderError, Recipient, Sender, Transaction,
        TransactionId, TransactionRequest, TransactionState, ValidationErrors, WebhookError,
        WebhookHeaders, WebhookVerifier,
    };

    use crate::TransferService;

    type CreateFn = fn(&TransactionRequest) -> Result<Transaction, ProviderError>;
    type DebitFn = fn(&Debit) -> Result<Vec<Debit>, ProviderError>;

    /// Scripted in-memory provider that records every call it receives.
    pub struct MockProvider {
        on_create: CreateFn,
        on_debit: DebitFn,
        verified: bool,
        creates: Mutex<Vec<TransactionRequest>>,
        debits: Mutex<Vec<Debit>>,
    }

    impl MockProvider {
        pub fn new(on_create: CreateFn, on_debit: DebitFn) -> Self {
            Self {
                on_create,
                on_debit,
                verified: true,
                creates: Mutex::new(Vec::new()),
                debits: Mutex::new(Vec::new()),
            }
        }

        pub fn rejecting_signatures(mut self) -> Self {
            self.verified = false;
            self
        }

        fn debit_calls(&self) -> Vec<Debit> {
            self.debits.lock().unwrap().clone()
        }

        fn create_calls(&self) -> usize {
            self.creates.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProviderApi for MockProvider {
        async fn create_transaction(
            &self,
            req: &TransactionRequest,
        ) -> Result<Transaction, ProviderError> {
            self.creates.lock().unwrap().push(req.clone());
            (self.on_create)(req)
        }

        async fn create_debit(&self, debit: &Debit) -> Result<Vec<Debit>, ProviderError> {
            self.debits.lock().unwrap().push(debit.clone());
            (self.on_debit)(debit)
        }

        async fn get_transaction(&self, id: &str) -> Result<Transaction, ProviderError> {
            match id {
                "T1" => Ok(stored_transaction("T1")),
                _ => Err(ProviderError::NotFound("Transaction not found".into())),
            }
        }

        async fn list_transactions(
            &self,
            external_id: Option<&str>,
        ) -> Result<Vec<Transaction>, ProviderError> {
            let mut transaction = stored_transaction("T1");
            transaction.external_id = external_id.map(String::from);
            Ok(vec![transaction])
        }

        async fn create_sender(&self, sender: &Sender) -> Result<Sender, ProviderError> {
            let mut created = sender.clone();
            created.id = Some("S1".into());
            Ok(created)
        }

        async fn get_sender(&self, id: &str) -> Result<Sender, ProviderError> {
            Ok(Sender::by_id(id))
        }

        async fn list_senders(
            &self,
            external_id: Option<&str>,
        ) -> Result<Vec<Sender>, ProviderError> {
            Ok(external_id.map(Sender::by_external_id).into_iter().collect())
        }

        async fn delete_recipient(&self, id: &str) -> Result<Recipient, ProviderError> {
            let mut recipient = recipient();
            recipient.id = Some(id.to_string());
            recipient.state = Some("cancelled".into());
            Ok(recipient)
        }

        async fn validate_account(
            &self,
            _req: &AccountValidationRequest,
        ) -> Result<Value, ProviderError> {
            Err(ProviderError::Api {
                status: 500,
                message: "upstream unavailable".into(),
            })
        }

        async fn currencies(&self) -> Result<Value, ProviderError> {
            Ok(json!({ "object": [{ "code": "NGN" }] }))
        }
    }

    impl WebhookVerifier for MockProvider {
        fn verify(&self, _url: &str, _body: &[u8], _headers: &WebhookHeaders) -> bool {
            self.verified
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Fixtures
    // ─────────────────────────────────────────────────────────────────────────────

    fn recipient() -> Recipient {
        Recipient {
            id: None,
            transaction_id: None,
            state: None,
            transaction_state: None,
            requested_amount: 15000.0,
            requested_currency: "NGN".into(),
            input_amount: None,
            input_currency: None,
            input_usd_amount: None,
            output_amount: None,
            output_currency: None,
            payout_method: PayoutMethod {
                id: None,
                method_type: "NGN::Bank".into(),
                details: PayoutDetails {
                    bank_account: Some("123456789".into()),
                    bank_account_type: Some("20".into()),
                    bank_code: Some("082".into()),
                    first_name: Some("First".into()),
                    last_name: Some("Last".into()),
                    ..PayoutDetails::default()
                },
                provider: None,
                metadata: Value::Null,
                fields: Value::Null,
            },
            metadata: Value::Null,
            created_at: None,
        }
    }

    fn request(sender: Sender) -> TransactionRequest {
        TransactionRequest {
            input_currency: "USD".into(),
            sender,
            recipients: vec![recipient()],
            external_id: Some("EXTRAN-1".into()),
            metadata: Value::Null,
        }
    }

    fn stored_transaction(id: &str) -> Transaction {
        Transaction {
            id: Some(TransactionId::from(id)),
            external_id: None,
            state: Some(TransactionState::Initial),
            input_currency: "USD".into(),
            input_amount: None,
            paid_amount: None,
            due_amount: None,
            sender: None,
            recipients: vec![recipient()],
            payin_methods: Vec::new(),
            metadata: Value::Null,
            created_at: None,
            expires_at: None,
        }
    }

    fn created_as_t1(req: &TransactionRequest) -> Result<Transaction, ProviderError> {
        if req.sender.has_ambiguous_reference() {
            let mut errors = ValidationErrors::default();
            errors.add("sender", "only one of id or external_id may be set");
            return Err(ProviderError::Validation(errors));
        }
        let mut transaction = stored_transaction("T1");
        transaction.input_currency = req.input_currency.clone();
        transaction.external_id = req.external_id.clone();
        Ok(transaction)
    }

    fn created_without_id(req: &TransactionRequest) -> Result<Transaction, ProviderError> {
        let mut transaction = created_as_t1(req)?;
        transaction.id = None;
        Ok(transaction)
    }

    fn create_times_out(_req: &TransactionRequest) -> Result<Transaction, ProviderError> {
        Err(ProviderError::Transport("operation timed out".into()))
    }

    fn debit_accepted(debit: &Debit) -> Result<Vec<Debit>, ProviderError> {
        let mut recorded = debit.clone();
        recorded.id = Some("D1".into());
        recorded.state = Some("approved".into());
        Ok(vec![recorded])
    }

    fn debit_without_records(_debit: &Debit) -> Result<Vec<Debit>, ProviderError> {
        Ok(Vec::new())
    }

    fn debit_rejected(_debit: &Debit) -> Result<Vec<Debit>, ProviderError> {
        let mut errors = ValidationErrors::default();
        errors.add("amount", "insufficient_funds");
        Err(ProviderError::Validation(errors))
    }

    fn debit_times_out(_debit: &Debit) -> Result<Vec<Debit>, ProviderError> {
        Err(ProviderError::Transport("operation timed out".into()))
    }

    fn service(on_create: CreateFn, on_debit: DebitFn) -> TransferService<MockProvider> {
        TransferService::new(MockProvider::new(on_create, on_debit))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // create_and_fund
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_and_fund_success() {
        let service = service(created_as_t1, debit_accepted);

        let outcome = service
            .create_and_fund(&request(Sender::by_id("S1")))
            .await;

        let FundingOutcome::Funded {
            transaction,
            funding,
        } = outcome
        else {
            panic!("expected funded outcome, got {:?}", outcome);
        };
        assert_eq!(transaction.id.unwrap().as_str(), "T1");
        assert!(funding.confirmed);

        let debits = service.provider().debit_calls();
        assert_eq!(debits.len(), 1);
        assert_eq!(debits[0].currency, "USD");
        assert_eq!(debits[0].to_id, "T1");
        assert_eq!(debits[0].to_type, "Transaction");
    }

    #[tokio::test]
    async fn test_empty_debit_list_is_funded_but_unconfirmed() {
        let service = service(created_as_t1, debit_without_records);

        let outcome = service
            .create_and_fund(&request(Sender::by_id("S1")))
            .await;

        let FundingOutcome::Funded {
            transaction,
            funding,
        } = outcome
        else {
            panic!("expected funded outcome, got {:?}", outcome);
        };
        assert_eq!(transaction.id.unwrap().as_str(), "T1");
        assert!(!funding.confirmed);
        assert!(funding.debits.is_empty());
        assert_eq!(service.provider().debit_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_debit_rejection_keeps_transaction() {
        let service = service(created_as_t1, debit_rejected);

        let outcome = service
            .create_and_fund(&request(Sender::by_id("S1")))
            .await;

        assert!(outcome.is_partial_failure());
        let FundingOutcome::FundingRejected {
            transaction,
            errors,
        } = outcome
        else {
            panic!("expected funding rejection, got {:?}", outcome);
        };
        assert_eq!(transaction.id.unwrap().as_str(), "T1");
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["amount"]);
        assert_eq!(service.provider().debit_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_debit_timeout_is_funding_failed() {
        let service = service(created_as_t1, debit_times_out);

        let outcome = service
            .create_and_fund(&request(Sender::by_id("S1")))
            .await;

        match outcome {
            FundingOutcome::FundingFailed { transaction, error } => {
                assert_eq!(transaction.id.unwrap().as_str(), "T1");
                assert!(error.contains("timed out"));
            }
            other => panic!("expected funding failure, got {:?}", other),
        }
        assert_eq!(service.provider().debit_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_ambiguous_sender_is_rejected_without_debit() {
        let service = service(created_as_t1, debit_accepted);
        let mut sender = Sender::by_id("S1");
        sender.external_id = Some("EXTSEN-1".into());

        let outcome = service.create_and_fund(&request(sender)).await;

        let FundingOutcome::Rejected { errors } = outcome else {
            panic!("expected rejection, got {:?}", outcome);
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["sender"]);
        assert_eq!(service.provider().create_calls(), 1);
        assert!(service.provider().debit_calls().is_empty());
    }

    #[tokio::test]
    async fn test_transaction_without_id_is_not_funded() {
        let service = service(created_without_id, debit_accepted);

        let outcome = service
            .create_and_fund(&request(Sender::by_external_id("EXTSEN-1")))
            .await;

        assert!(matches!(outcome, FundingOutcome::Created { .. }));
        assert!(service.provider().debit_calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_transport_failure() {
        let service = service(create_times_out, debit_accepted);

        let outcome = service
            .create_and_fund(&request(Sender::by_id("S1")))
            .await;

        assert!(matches!(outcome, FundingOutcome::Failed { .. }));
        assert!(outcome.transaction().is_none());
        assert!(service.provider().debit_calls().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // fund_transaction
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fund_existing_transaction() {
        let service = service(created_as_t1, debit_accepted);

        let outcome = service.fund_transaction("T1").await.unwrap();

        assert!(matches!(outcome, FundingOutcome::Funded { .. }));
        assert_eq!(service.provider().create_calls(), 0);
        assert_eq!(service.provider().debit_calls()[0].to_id, "T1");
    }

    #[tokio::test]
    async fn test_fund_unknown_transaction() {
        let service = service(created_as_t1, debit_accepted);

        let result = service.fund_transaction("nope").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(service.provider().debit_calls().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // verify_and_dispatch
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_dispatch_through_service() {
        let service = service(created_as_t1, debit_accepted);
        let body = include_bytes!("../tests/fixtures/transaction_created.json");

        let event = service
            .verify_and_dispatch("http://webhook.url", body, &WebhookHeaders::default())
            .unwrap();

        assert_eq!(event.kind(), Some(EventKind::Transaction));
        assert_eq!(event.event(), "transaction.created");
        let DecodedEvent::Transaction(webhook) = event else {
            unreachable!()
        };
        assert_eq!(webhook.object.state, Some(TransactionState::Approved));
    }

    #[test]
    fn test_unverified_webhook_is_refused() {
        let service = TransferService::new(
            MockProvider::new(created_as_t1, debit_accepted).rejecting_signatures(),
        );

        let result = service.verify_and_dispatch(
            "http://webhook.url",
            br#"{"webhook":"W1","event":"transaction.created","object":{}}"#,
            &WebhookHeaders::default(),
        );

        assert!(matches!(result, Err(WebhookError::AuthFailure)));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Passthroughs
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_sender_with_id_is_bad_request() {
        let service = service(created_as_t1, debit_accepted);

        let result = service.create_sender(&Sender::by_id("S9")).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_sender() {
        let service = service(created_as_t1, debit_accepted);
        let sender = Sender::by_external_id("EXTSEN-1");

        let created = service.create_sender(&sender).await.unwrap();

        assert_eq!(created.id.as_deref(), Some("S1"));
        assert_eq!(created.external_id.as_deref(), Some("EXTSEN-1"));
    }

    #[tokio::test]
    async fn test_list_transactions_by_external_id() {
        let service = service(created_as_t1, debit_accepted);

        let transactions = service.list_transactions(Some("EXTRAN-1")).await.unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].external_id.as_deref(), Some("EXTRAN-1"));
    }

    #[tokio::test]
    async fn test_cancel_recipient() {
        let service = service(created_as_t1, debit_accepted);

        let recipient = service.cancel_recipient("R1").await.unwrap();

        assert_eq!(recipient.id.as_deref(), Some("R1"));
        assert_eq!(recipient.state.as_deref(), Some("cancelled"));
    }

    #[tokio::test]
    async fn test_upstream_error_is_bad_gateway() {
        let service = service(created_as_t1, debit_accepted);
        let req = AccountValidationRequest {
            bank_account: Some("9040009999999".into()),
            bank_code: Some("190100".into()),
            phone_number: None,
            mobile_provider: None,
            country: "GH".into(),
            currency: "GHS".into(),
            method: "bank".into(),
        };

        let result = service.validate_account(&req).await;

        assert!(matches!(result, Err(AppError::BadGateway(_))));
    }
}
