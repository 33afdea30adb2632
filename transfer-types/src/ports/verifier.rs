//! Webhook authenticity port.

use crate::domain::WebhookHeaders;

/// Checks that a callback was really sent by the provider.
///
/// The secret material lives with the implementation; callers only hand over
/// what arrived on the wire.
pub trait WebhookVerifier: Send + Sync + 'static {
    /// `url` is the full callback URL the provider posted to and `body` the
    /// raw request bytes, which need not be valid UTF-8.
    fn verify(&self, url: &str, body: &[u8], headers: &WebhookHeaders) -> bool;
}
