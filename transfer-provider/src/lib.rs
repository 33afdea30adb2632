//! # Transfer Provider Client
//!
//! A signed HTTP adapter implementing the `ProviderApi` and `WebhookVerifier`
//! ports against the transfer provider's REST API.

pub mod signing;

use std::time::Duration;

use reqwest::{
    Client, Method, Url,
    header::{HeaderName, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use transfer_types::{
    AccountValidationRequest, Debit, ProviderApi, ProviderError, Recipient, Sender, Transaction,
    TransactionRequest, ValidationErrors, WebhookHeaders, WebhookVerifier,
};

pub use signing::Credentials;

/// Sandbox endpoint of the provider.
pub const DEFAULT_BASE_URL: &str = "https://api-sandbox.transferzero.com/v1";

/// Single-object response wrapper used by the provider.
#[derive(Debug, Deserialize)]
struct ObjectResponse<T> {
    object: T,
}

/// Provider API client.
pub struct ProviderClient {
    base_url: String,
    credentials: Credentials,
    http: Client,
}

impl ProviderClient {
    /// Creates a new client with the given request timeout.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        self.send(Method::GET, path, query, None::<&()>).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, ProviderError> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ProviderError> {
        self.send(Method::DELETE, path, &[], None::<&()>).await
    }

    /// Appends `path` to the base URL, one percent-encoded segment per entry.
    fn url(&self, path: &[&str]) -> Result<Url, ProviderError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ProviderError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Transport(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Builds, signs and sends one request. Never retries.
    #[tracing::instrument(skip(self, method, query, body), fields(method = %method))]
    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ProviderError> {
        let payload = match body {
            Some(body) => {
                serde_json::to_vec(body).map_err(|e| ProviderError::Decode(e.to_string()))?
            }
            None => Vec::new(),
        };

        let mut builder = self.http.request(method.clone(), self.url(path)?);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if body.is_some() {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload.clone());
        }

        let mut request = builder.build().map_err(transport)?;

        // The signature covers the final URL, query string included.
        let nonce = uuid::Uuid::new_v4().to_string();
        let signature =
            self.credentials
                .sign(&nonce, method.as_str(), request.url().as_str(), &payload);

        let headers = request.headers_mut();
        headers.insert(
            HeaderName::from_static("authorization-nonce"),
            header_value(&nonce)?,
        );
        headers.insert(
            HeaderName::from_static("authorization-key"),
            header_value(self.credentials.api_key())?,
        );
        headers.insert(
            HeaderName::from_static("authorization-signature"),
            header_value(&signature)?,
        );

        let resp = self.http.execute(request).await.map_err(transport)?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()));
        }

        tracing::debug!(status = status.as_u16(), "provider returned an error");
        let parsed = serde_json::from_str::<Value>(&body).ok();
        match status.as_u16() {
            422 => Err(ProviderError::Validation(validation_errors(parsed.as_ref()))),
            404 => Err(ProviderError::NotFound(error_message(parsed.as_ref(), body))),
            401 => Err(ProviderError::Unauthorized(error_message(
                parsed.as_ref(),
                body,
            ))),
            code => Err(ProviderError::Api {
                status: code,
                message: error_message(parsed.as_ref(), body),
            }),
        }
    }
}

/// Checks a caller-supplied id before it becomes a path segment.
///
/// Encoding keeps `/`, `?` and `#` inside the segment, but a bare `.` or `..`
/// would still be resolved against the parent path.
fn id_segment(id: &str) -> Result<&str, ProviderError> {
    match id {
        "" | "." | ".." => Err(ProviderError::InvalidId(id.to_string())),
        id => Ok(id),
    }
}

fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport(err.to_string())
}

fn header_value(value: &str) -> Result<HeaderValue, ProviderError> {
    HeaderValue::from_str(value).map_err(|e| ProviderError::Transport(e.to_string()))
}

/// Pulls field errors out of a 422 body.
///
/// Single-object responses carry them in `object.errors`; list responses such
/// as debits carry them in `object[0].errors`.
fn validation_errors(body: Option<&Value>) -> ValidationErrors {
    let errors = body
        .and_then(|b| b.get("object"))
        .and_then(|object| match object {
            Value::Array(items) => items.first().and_then(|item| item.get("errors")),
            other => other.get("errors"),
        })
        .cloned()
        .and_then(|errors| serde_json::from_value::<ValidationErrors>(errors).ok());

    match errors {
        Some(errors) if !errors.is_empty() => errors,
        _ => {
            let mut fallback = ValidationErrors::default();
            fallback.add("base", "invalid");
            fallback
        }
    }
}

fn error_message(body: Option<&Value>, raw: String) -> String {
    body.and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(raw)
}

#[async_trait::async_trait]
impl ProviderApi for ProviderClient {
    async fn create_transaction(
        &self,
        req: &TransactionRequest,
    ) -> Result<Transaction, ProviderError> {
        let resp: ObjectResponse<Transaction> = self
            .post(&["transactions"], &json!({ "transaction": req }))
            .await?;
        Ok(resp.object)
    }

    async fn create_debit(&self, debit: &Debit) -> Result<Vec<Debit>, ProviderError> {
        let resp: ObjectResponse<Vec<Debit>> = self
            .post(&["accounts", "debits"], &json!({ "debit": debit }))
            .await?;
        Ok(resp.object)
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction, ProviderError> {
        let resp: ObjectResponse<Transaction> =
            self.get(&["transactions", id_segment(id)?], &[]).await?;
        Ok(resp.object)
    }

    async fn list_transactions(
        &self,
        external_id: Option<&str>,
    ) -> Result<Vec<Transaction>, ProviderError> {
        let query: Vec<(&str, &str)> = external_id.map(|id| ("external_id", id)).into_iter().collect();
        let resp: ObjectResponse<Vec<Transaction>> = self.get(&["transactions"], &query).await?;
        Ok(resp.object)
    }

    async fn create_sender(&self, sender: &Sender) -> Result<Sender, ProviderError> {
        let resp: ObjectResponse<Sender> =
            self.post(&["senders"], &json!({ "sender": sender })).await?;
        Ok(resp.object)
    }

    async fn get_sender(&self, id: &str) -> Result<Sender, ProviderError> {
        let resp: ObjectResponse<Sender> = self.get(&["senders", id_segment(id)?], &[]).await?;
        Ok(resp.object)
    }

    async fn list_senders(&self, external_id: Option<&str>) -> Result<Vec<Sender>, ProviderError> {
        let query: Vec<(&str, &str)> = external_id.map(|id| ("external_id", id)).into_iter().collect();
        let resp: ObjectResponse<Vec<Sender>> = self.get(&["senders"], &query).await?;
        Ok(resp.object)
    }

    async fn delete_recipient(&self, id: &str) -> Result<Recipient, ProviderError> {
        let resp: ObjectResponse<Recipient> =
            self.delete(&["recipients", id_segment(id)?]).await?;
        Ok(resp.object)
    }

    async fn validate_account(
        &self,
        req: &AccountValidationRequest,
    ) -> Result<Value, ProviderError> {
        self.post(&["account_validations"], req).await
    }

    async fn currencies(&self) -> Result<Value, ProviderError> {
        self.get(&["info", "currencies"], &[]).await
    }
}

impl WebhookVerifier for ProviderClient {
    fn verify(&self, url: &str, body: &[u8], headers: &WebhookHeaders) -> bool {
        self.credentials.verify(url, body, headers)
    }
}
