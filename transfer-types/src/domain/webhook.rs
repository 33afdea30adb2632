//! Webhook envelope and decoded event types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Document, PayoutMethod, Recipient, Sender, Transaction};

pub const NONCE_HEADER: &str = "Authorization-Nonce";
pub const KEY_HEADER: &str = "Authorization-Key";
pub const SIGNATURE_HEADER: &str = "Authorization-Signature";

/// Authentication headers that accompany a provider callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub nonce: Option<String>,
    pub key: Option<String>,
    pub signature: Option<String>,
}

impl WebhookHeaders {
    /// Picks the authentication headers out of arbitrary name/value pairs.
    ///
    /// Header names are matched case-insensitively; other headers are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = Self::default();
        for (name, value) in pairs {
            let name = name.as_ref();
            let value = Some(value.as_ref().to_string());
            if name.eq_ignore_ascii_case(NONCE_HEADER) {
                headers.nonce = value;
            } else if name.eq_ignore_ascii_case(KEY_HEADER) {
                headers.key = value;
            } else if name.eq_ignore_ascii_case(SIGNATURE_HEADER) {
                headers.signature = value;
            }
        }
        headers
    }
}

/// The outer `{webhook, event, object}` structure of every callback.
///
/// Fields beyond the three documented ones are kept in `extra` so the
/// envelope serializes back to what the provider sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    pub webhook: String,
    pub event: String,
    /// `None` only when the field is absent; an explicit `null` is kept.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub object: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl WebhookEnvelope {
    /// The payload family named by the event prefix, if it is a known one.
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_event(&self.event)
    }
}

/// Payload families, keyed by the event-type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Transaction,
    Recipient,
    PayoutMethod,
    Sender,
    Document,
}

impl EventKind {
    /// Classifies an event type such as `transaction.created`.
    ///
    /// Only the part before the first `.` is considered and it must match exactly.
    pub fn from_event(event: &str) -> Option<Self> {
        let prefix = event.split_once('.').map_or(event, |(prefix, _)| prefix);
        match prefix {
            "transaction" => Some(Self::Transaction),
            "recipient" => Some(Self::Recipient),
            "payout_method" => Some(Self::PayoutMethod),
            "sender" => Some(Self::Sender),
            "document" => Some(Self::Document),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Recipient => "recipient",
            Self::PayoutMethod => "payout_method",
            Self::Sender => "sender",
            Self::Document => "document",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A webhook whose `object` has been decoded into its typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook<T> {
    pub webhook: String,
    pub event: String,
    pub object: T,
}

impl<T: serde::de::DeserializeOwned> Webhook<T> {
    /// Re-decodes the envelope's `object` as `T`.
    pub fn from_envelope(envelope: WebhookEnvelope) -> Result<Self, serde_json::Error> {
        Ok(Self {
            object: serde_json::from_value(envelope.object.unwrap_or(Value::Null))?,
            webhook: envelope.webhook,
            event: envelope.event,
        })
    }
}

/// A verified callback, decoded according to its event prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "webhook", rename_all = "snake_case")]
pub enum DecodedEvent {
    Transaction(Webhook<Transaction>),
    Recipient(Webhook<Recipient>),
    PayoutMethod(Webhook<PayoutMethod>),
    Sender(Webhook<Sender>),
    Document(Webhook<Document>),
    /// Prefix outside the known set; the envelope is returned untouched.
    Unknown(WebhookEnvelope),
}

impl DecodedEvent {
    /// The event-type string of the underlying webhook.
    pub fn event(&self) -> &str {
        match self {
            Self::Transaction(w) => &w.event,
            Self::Recipient(w) => &w.event,
            Self::PayoutMethod(w) => &w.event,
            Self::Sender(w) => &w.event,
            Self::Document(w) => &w.event,
            Self::Unknown(envelope) => &envelope.event,
        }
    }

    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Transaction(_) => Some(EventKind::Transaction),
            Self::Recipient(_) => Some(EventKind::Recipient),
            Self::PayoutMethod(_) => Some(EventKind::PayoutMethod),
            Self::Sender(_) => Some(EventKind::Sender),
            Self::Document(_) => Some(EventKind::Document),
            Self::Unknown(_) => None,
        }
    }
}
