//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use transfer_types::{
    AccountValidationRequest, AppError, FundingOutcome, Sender, TransactionRequest,
    WebhookError, WebhookHeaders,
};

use crate::{TransferProvider, TransferService};

/// Application state shared across handlers.
pub struct AppState<P: TransferProvider> {
    pub service: TransferService<P>,
    /// Full URL the provider posts callbacks to; part of every webhook signature.
    pub callback_url: String,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });
        if let AppError::Unprocessable(errors) = &self.0 {
            body["errors"] = serde_json::json!(errors);
        }

        (status, Json(body)).into_response()
    }
}

/// Status code reported for each orchestration outcome.
pub fn outcome_status(outcome: &FundingOutcome) -> StatusCode {
    match outcome {
        FundingOutcome::Funded { .. } | FundingOutcome::Created { .. } => StatusCode::CREATED,
        FundingOutcome::Rejected { .. } | FundingOutcome::FundingRejected { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FundingOutcome::Failed { .. } | FundingOutcome::FundingFailed { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// Optional filter on the caller-assigned id.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExternalIdQuery {
    /// Caller-assigned correlation id
    pub external_id: Option<String>,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[tracing::instrument(skip(state))]
pub async fn currencies<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.currencies().await?;
    Ok(Json(currencies))
}

// ─────────────────────────────────────────────────────────────────────────────
// Senders
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, sender), fields(external_id = ?sender.external_id))]
pub async fn create_sender<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(sender): Json<Sender>,
) -> Result<impl IntoResponse, ApiError> {
    let sender = state.service.create_sender(&sender).await?;
    Ok((StatusCode::CREATED, Json(sender)))
}

#[tracing::instrument(skip(state))]
pub async fn list_senders<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ExternalIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let senders = state
        .service
        .list_senders(query.external_id.as_deref())
        .await?;
    Ok(Json(senders))
}

#[tracing::instrument(skip(state), fields(sender_id = %id))]
pub async fn get_sender<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sender = state.service.get_sender(&id).await?;
    Ok(Json(sender))
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Create a transaction and fund it.
///
/// Always answers with the tagged outcome, including partial failures.
#[tracing::instrument(skip(state, req), fields(external_id = ?req.external_id))]
pub async fn create_transaction<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<TransactionRequest>,
) -> impl IntoResponse {
    let outcome = state.service.create_and_fund(&req).await;
    tracing::info!(outcome = outcome.label(), "create_and_fund finished");
    (outcome_status(&outcome), Json(outcome))
}

/// Retry funding for an existing transaction.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn fund_transaction<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.service.fund_transaction(&id).await?;
    Ok((outcome_status(&outcome), Json(outcome)))
}

#[tracing::instrument(skip(state))]
pub async fn list_transactions<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ExternalIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state
        .service
        .list_transactions(query.external_id.as_deref())
        .await?;
    Ok(Json(transactions))
}

#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn get_transaction<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state.service.get_transaction(&id).await?;
    Ok(Json(transaction))
}

// ─────────────────────────────────────────────────────────────────────────────
// Recipients & account validation
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(recipient_id = %id))]
pub async fn cancel_recipient<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let recipient = state.service.cancel_recipient(&id).await?;
    Ok(Json(recipient))
}

#[tracing::instrument(skip(state, req), fields(country = %req.country, method = %req.method))]
pub async fn validate_account<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<AccountValidationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.validate_account(&req).await?;
    Ok(Json(result))
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhooks
// ─────────────────────────────────────────────────────────────────────────────

/// Receive a provider callback.
///
/// The body is taken as raw bytes: the signature covers them exactly, and a
/// body that is not UTF-8 is still answered 401 when the signature fails.
#[tracing::instrument(skip(state, headers, body))]
pub async fn receive_webhook<P: TransferProvider>(
    State(state): State<Arc<AppState<P>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let headers = WebhookHeaders::from_pairs(
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
    );

    let event = state
        .service
        .verify_and_dispatch(&state.callback_url, &body, &headers)?;
    Ok(Json(event))
}
