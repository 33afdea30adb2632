//! # Transfer Types
//!
//! Domain types, outcomes and port traits for the transfer integration service.
//! This crate has ZERO external IO dependencies - only data structures,
//! outcome types, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Provider-owned records (Transaction, Recipient, Sender, Debit, Webhook)
//! - `ports/` - Trait definitions that provider adapters must implement
//! - `dto/` - Request bodies and orchestration outcomes
//! - `error/` - Provider, webhook and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DecodedEvent, Debit, Document, EventKind, PayoutDetails, PayoutMethod, PayoutRail, RailKind,
    Recipient, Sender, Transaction, TransactionId, TransactionState, Webhook, WebhookEnvelope,
    WebhookHeaders,
};
pub use dto::*;
pub use error::{AppError, ProviderError, ValidationErrors, ValidationIssue, WebhookError};
pub use ports::{ProviderApi, WebhookVerifier};
