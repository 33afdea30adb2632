//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use transfer_types::domain::{
    Debit, Document, PayoutDetails, PayoutMethod, Recipient, Sender, Transaction,
};
use transfer_types::dto::{
    AccountValidationRequest, FundingConfirmation, FundingOutcome, TransactionRequest,
};
use utoipa::OpenApi;

use crate::inbound::handlers::ExternalIdQuery;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Currencies the integration can send and receive
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "reference",
    responses(
        (status = 200, description = "Provider currency list", body = inline(serde_json::Value)),
        (status = 502, description = "Provider unavailable")
    )
)]
async fn currencies() {}

/// Create a sender
#[utoipa::path(
    post,
    path = "/api/senders",
    tag = "senders",
    request_body = Sender,
    responses(
        (status = 201, description = "Sender created", body = Sender),
        (status = 400, description = "Sender already carries an id"),
        (status = 422, description = "Rejected by the provider")
    )
)]
async fn create_sender() {}

/// Find senders
#[utoipa::path(
    get,
    path = "/api/senders",
    tag = "senders",
    params(ExternalIdQuery),
    responses(
        (status = 200, description = "Matching senders", body = Vec<Sender>)
    )
)]
async fn list_senders() {}

/// Get sender by ID
#[utoipa::path(
    get,
    path = "/api/senders/{id}",
    tag = "senders",
    params(
        ("id" = String, Path, description = "Provider sender ID")
    ),
    responses(
        (status = 200, description = "Sender details", body = Sender),
        (status = 404, description = "Sender not found")
    )
)]
async fn get_sender() {}

/// Create a transaction and fund it
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "transactions",
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Outcome `funded` or `created`", body = FundingOutcome),
        (status = 422, description = "Outcome `rejected` or `funding_rejected`", body = FundingOutcome),
        (status = 502, description = "Outcome `failed` or `funding_failed`", body = FundingOutcome)
    )
)]
async fn create_transaction() {}

/// Find transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "transactions",
    params(ExternalIdQuery),
    responses(
        (status = 200, description = "Matching transactions", body = Vec<Transaction>)
    )
)]
async fn list_transactions() {}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = String, Path, description = "Provider transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction details", body = Transaction),
        (status = 404, description = "Transaction not found")
    )
)]
async fn get_transaction() {}

/// Retry funding for an existing transaction
#[utoipa::path(
    post,
    path = "/api/transactions/{id}/fund",
    tag = "transactions",
    params(
        ("id" = String, Path, description = "Provider transaction ID")
    ),
    responses(
        (status = 201, description = "Outcome `funded` or `created`", body = FundingOutcome),
        (status = 422, description = "Outcome `funding_rejected`", body = FundingOutcome),
        (status = 502, description = "Outcome `funding_failed`", body = FundingOutcome),
        (status = 404, description = "Transaction not found")
    )
)]
async fn fund_transaction() {}

/// Cancel a recipient
#[utoipa::path(
    delete,
    path = "/api/recipients/{id}",
    tag = "recipients",
    params(
        ("id" = String, Path, description = "Provider recipient ID")
    ),
    responses(
        (status = 200, description = "Cancelled recipient", body = Recipient),
        (status = 404, description = "Recipient not found"),
        (status = 422, description = "Recipient can no longer be cancelled")
    )
)]
async fn cancel_recipient() {}

/// Look up the holder of a payout account
#[utoipa::path(
    post,
    path = "/api/account_validations",
    tag = "reference",
    request_body = AccountValidationRequest,
    responses(
        (status = 200, description = "Provider validation result", body = inline(serde_json::Value)),
        (status = 422, description = "Account could not be validated")
    )
)]
async fn validate_account() {}

/// Receive a provider callback
#[utoipa::path(
    post,
    path = "/webhooks",
    tag = "webhooks",
    request_body = inline(serde_json::Value),
    params(
        ("Authorization-Nonce" = String, Header, description = "Unique nonce"),
        ("Authorization-Key" = String, Header, description = "Integration API key"),
        ("Authorization-Signature" = String, Header, description = "HMAC-SHA512 request signature")
    ),
    responses(
        (status = 200, description = "Decoded event, tagged by `kind`", body = inline(serde_json::Value)),
        (status = 400, description = "Verified but malformed body"),
        (status = 401, description = "Signature could not be verified")
    )
)]
async fn receive_webhook() {}

/// OpenAPI documentation for the Transfer API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transfer Integration Service API",
        version = "1.0.0",
        description = "Creates and funds cross-border payouts at the transfer provider and receives its signed webhooks.\n\n`POST /api/transactions` always answers with a `FundingOutcome`. The `funding_rejected` and `funding_failed` outcomes mean the transaction exists but is unfunded; retry with `POST /api/transactions/{id}/fund`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        currencies,
        create_sender,
        list_senders,
        get_sender,
        create_transaction,
        list_transactions,
        get_transaction,
        fund_transaction,
        cancel_recipient,
        validate_account,
        receive_webhook,
    ),
    components(
        schemas(
            TransactionRequest,
            Transaction,
            Recipient,
            PayoutMethod,
            PayoutDetails,
            Sender,
            Document,
            Debit,
            FundingConfirmation,
            FundingOutcome,
            AccountValidationRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reference", description = "Currencies and account validation"),
        (name = "senders", description = "Sender management"),
        (name = "transactions", description = "Create, fund and look up transactions"),
        (name = "recipients", description = "Recipient cancellation"),
        (name = "webhooks", description = "Signed provider callbacks"),
    )
)]
pub struct ApiDoc;
