//! Port traits (interfaces for adapters).
//!
//! These are the contracts that provider adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod provider;
mod verifier;

pub use provider::ProviderApi;
pub use verifier::WebhookVerifier;
