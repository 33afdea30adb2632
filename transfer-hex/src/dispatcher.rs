//! Webhook Verifier & Dispatcher
//!
//! Authenticates provider callbacks and decodes them into typed events.
//! The body is only parsed after the signature has been checked.

use std::sync::Arc;

use transfer_types::{
    DecodedEvent, EventKind, Webhook, WebhookEnvelope, WebhookError, WebhookHeaders,
    WebhookVerifier,
};

/// Verifies and decodes inbound callbacks.
///
/// Decoding is pure: duplicates and out-of-order deliveries decode like any
/// other callback, and state transitions are not checked here.
pub struct WebhookDispatcher<V: WebhookVerifier> {
    verifier: Arc<V>,
}

impl<V: WebhookVerifier> Clone for WebhookDispatcher<V> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
        }
    }
}

impl<V: WebhookVerifier> WebhookDispatcher<V> {
    pub fn new(verifier: Arc<V>) -> Self {
        Self { verifier }
    }

    /// `url` must be the full callback URL the provider was configured with.
    #[tracing::instrument(skip(self, body, headers), fields(body_len = body.len()))]
    pub fn verify_and_dispatch(
        &self,
        url: &str,
        body: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<DecodedEvent, WebhookError> {
        if !self.verifier.verify(url, body, headers) {
            tracing::warn!("could not verify webhook signature");
            return Err(WebhookError::AuthFailure);
        }

        let envelope: WebhookEnvelope =
            serde_json::from_slice(body).map_err(|e| WebhookError::Malformed(e.to_string()))?;

        let event = decode(envelope)?;
        match event.kind() {
            Some(kind) => tracing::info!(%kind, event = event.event(), "webhook decoded"),
            None => tracing::warn!(event = event.event(), "webhook with unknown event type"),
        }
        Ok(event)
    }
}

/// Re-decodes the envelope's object according to its event prefix.
fn decode(envelope: WebhookEnvelope) -> Result<DecodedEvent, WebhookError> {
    let Some(kind) = envelope.kind() else {
        return Ok(DecodedEvent::Unknown(envelope));
    };

    let event = envelope.event.clone();
    let decoded = match kind {
        EventKind::Transaction => Webhook::from_envelope(envelope).map(DecodedEvent::Transaction),
        EventKind::Recipient => Webhook::from_envelope(envelope).map(DecodedEvent::Recipient),
        EventKind::PayoutMethod => {
            Webhook::from_envelope(envelope).map(DecodedEvent::PayoutMethod)
        }
        EventKind::Sender => Webhook::from_envelope(envelope).map(DecodedEvent::Sender),
        EventKind::Document => Webhook::from_envelope(envelope).map(DecodedEvent::Document),
    };

    decoded.map_err(|e| WebhookError::Malformed(format!("{} payload: {}", event, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use transfer_types::{RailKind, TransactionState};

    const TRANSACTION_CREATED: &str = include_str!("../tests/fixtures/transaction_created.json");

    /// Verifier with a fixed answer.
    struct FixedVerifier(bool);

    impl WebhookVerifier for FixedVerifier {
        fn verify(&self, _url: &str, _body: &[u8], _headers: &WebhookHeaders) -> bool {
            self.0
        }
    }

    fn dispatcher(verified: bool) -> WebhookDispatcher<FixedVerifier> {
        WebhookDispatcher::new(Arc::new(FixedVerifier(verified)))
    }

    fn dispatch(verified: bool, body: &str) -> Result<DecodedEvent, WebhookError> {
        dispatch_bytes(verified, body.as_bytes())
    }

    fn dispatch_bytes(verified: bool, body: &[u8]) -> Result<DecodedEvent, WebhookError> {
        dispatcher(verified).verify_and_dispatch(
            "http://webhook.url",
            body,
            &WebhookHeaders::default(),
        )
    }

    #[test]
    fn test_transaction_created() {
        let event = dispatch(true, TRANSACTION_CREATED).unwrap();

        let DecodedEvent::Transaction(webhook) = event else {
            panic!("expected a transaction event");
        };
        assert_eq!(webhook.event, "transaction.created");
        assert_eq!(webhook.webhook, "02b769ff-ffff-ffff-ffff-820d285d76c7");
        assert_eq!(webhook.object.state, Some(TransactionState::Approved));
        assert_eq!(
            webhook.object.id.as_ref().unwrap().as_str(),
            "9170b966-ffff-ffff-ffff-7af5ad7e335f"
        );
        assert_eq!(webhook.object.payin_methods.len(), 1);
        assert_eq!(
            webhook.object.payin_methods[0]["in_details"]["reference"],
            "ZAZA-1234"
        );

        let recipient = &webhook.object.recipients[0];
        assert_eq!(
            recipient.payout_method.rail().unwrap().kind,
            RailKind::Bank
        );
        assert_eq!(
            recipient.transaction_id.as_ref().unwrap().as_str(),
            "9170b966-ffff-ffff-ffff-7af5ad7e335f"
        );
    }

    #[test]
    fn test_auth_failure_regardless_of_body() {
        assert!(matches!(
            dispatch(false, TRANSACTION_CREATED),
            Err(WebhookError::AuthFailure)
        ));
        assert!(matches!(
            dispatch(false, "not json at all"),
            Err(WebhookError::AuthFailure)
        ));
        assert!(matches!(
            dispatch_bytes(false, &[0xff, 0xfe, b'{']),
            Err(WebhookError::AuthFailure)
        ));
    }

    #[test]
    fn test_invalid_utf8_after_verification_is_malformed() {
        assert!(matches!(
            dispatch_bytes(true, &[0xff, 0xfe, b'{']),
            Err(WebhookError::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_prefix_keeps_envelope() {
        let raw = json!({
            "webhook": "W1",
            "event": "unknown_type.foo",
            "object": { "anything": [1, 2, 3] }
        });

        let event = dispatch(true, &raw.to_string()).unwrap();

        let DecodedEvent::Unknown(envelope) = event else {
            panic!("expected an unknown event");
        };
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn test_unknown_prefix_without_object() {
        let raw = json!({ "webhook": "W1", "event": "unknown_type.foo" });

        let event = dispatch(true, &raw.to_string()).unwrap();

        let DecodedEvent::Unknown(envelope) = event else {
            panic!("expected an unknown event");
        };
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn test_each_known_prefix() {
        let recipient = json!({
            "webhook": "W2",
            "event": "recipient.paid",
            "object": {
                "id": "R1",
                "requested_amount": 100,
                "requested_currency": "GHS",
                "payout_method": { "type": "GHS::Mobile", "details": { "phone_number": "+233200000000" } }
            }
        });
        let payout_method = json!({
            "webhook": "W3",
            "event": "payout_method.updated",
            "object": { "id": "PM1", "type": "XOF::Cash", "details": {} }
        });
        let sender = json!({
            "webhook": "W4",
            "event": "sender.approved",
            "object": { "id": "S1", "state": "approved" }
        });
        let document = json!({
            "webhook": "W5",
            "event": "document.rejected",
            "object": { "id": "D1", "document_type": "passport" }
        });

        assert!(matches!(
            dispatch(true, &recipient.to_string()),
            Ok(DecodedEvent::Recipient(_))
        ));
        assert!(matches!(
            dispatch(true, &payout_method.to_string()),
            Ok(DecodedEvent::PayoutMethod(_))
        ));
        assert!(matches!(
            dispatch(true, &sender.to_string()),
            Ok(DecodedEvent::Sender(_))
        ));
        assert!(matches!(
            dispatch(true, &document.to_string()),
            Ok(DecodedEvent::Document(_))
        ));
    }

    #[test]
    fn test_decoding_is_idempotent() {
        let first = dispatch(true, TRANSACTION_CREATED).unwrap();
        let second = dispatch(true, TRANSACTION_CREATED).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_body_after_verification() {
        assert!(matches!(
            dispatch(true, "{\"event\":"),
            Err(WebhookError::Malformed(_))
        ));
    }

    #[test]
    fn test_payload_that_does_not_fit_its_prefix() {
        let body = json!({
            "webhook": "W6",
            "event": "transaction.created",
            "object": { "recipients": "not a list" }
        });

        match dispatch(true, &body.to_string()) {
            Err(WebhookError::Malformed(message)) => {
                assert!(message.starts_with("transaction.created payload"))
            }
            other => panic!("expected malformed payload, got {:?}", other),
        }
    }
}
