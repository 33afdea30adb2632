//! # Transfer Hex
//!
//! Application service layer and HTTP adapter for the transfer service.
//!
//! ## Architecture
//!
//! - `orchestrator` - Create-then-fund sequence with typed outcomes
//! - `dispatcher` - Webhook signature check and typed decoding
//! - `service` - Facade over both plus the provider passthroughs
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Everything is generic over `P: TransferProvider`, so the signed HTTP
//! client and in-memory test providers plug in the same way.

pub mod dispatcher;
pub mod inbound;
mod openapi;
pub mod orchestrator;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use dispatcher::WebhookDispatcher;
pub use openapi::ApiDoc;
pub use orchestrator::TransactionOrchestrator;
pub use service::{TransferProvider, TransferService};
