//! Domain models mirrored from the transfer provider.
//!
//! The provider owns every one of these records. This service only holds
//! transient copies for the duration of a request.

pub mod debit;
pub mod document;
pub mod recipient;
pub mod sender;
pub mod transaction;
pub mod webhook;

pub use debit::Debit;
pub use document::Document;
pub use recipient::{PayoutDetails, PayoutMethod, PayoutRail, RailKind, Recipient};
pub use sender::Sender;
pub use transaction::{Transaction, TransactionId, TransactionState};
pub use webhook::{DecodedEvent, EventKind, Webhook, WebhookEnvelope, WebhookHeaders};
