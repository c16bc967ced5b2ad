use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Form, Json, Router,
    body::{Body, Bytes, to_bytes},
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Duration;
use serde::Deserialize;
use serde_json::json;
use signing_interceptor::signing::{SIGNATURE_HEADER, body_digest};
use signing_interceptor::{SigningConfig, SystemTimeSource, TimeSource};
use tracing::info;

use crate::auth::{MAX_BODY_BYTES, header_str, require_signed_request};
use crate::error::VerifierError;
use crate::quotes::{Quote, QuoteBook, QuoteLookup};
use crate::replay::ReferenceRegistry;

pub const DEFAULT_TIMESTAMP_TOLERANCE_SECS: i64 = 10;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SigningConfig>,
    pub clock: Arc<dyn TimeSource>,
    pub references: Arc<ReferenceRegistry>,
    pub quotes: Arc<QuoteBook>,
    pub timestamp_tolerance: Duration,
}

impl AppState {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self {
            config,
            clock: Arc::new(SystemTimeSource),
            references: Arc::new(ReferenceRegistry::new()),
            quotes: Arc::new(QuoteBook::default()),
            timestamp_tolerance: Duration::seconds(DEFAULT_TIMESTAMP_TOLERANCE_SECS),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_quotes(mut self, quotes: QuoteBook) -> Self {
        self.quotes = Arc::new(quotes);
        self
    }

    pub fn with_timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.timestamp_tolerance = tolerance;
        self
    }
}

pub fn router(state: AppState) -> Router {
    let signed = Router::new()
        .route("/quote", post(quote_handler))
        .route("/echo", post(echo_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_signed_request,
        ));

    Router::new()
        .route("/ping", get(|| async move { Json(json!({ "message": "pong" })) }))
        .route("/quotes", get(list_quotes))
        .route("/digest", post(digest_handler))
        .merge(signed)
        .with_state(state)
}

pub async fn run(host: String, port: u16, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .context("serving verifier")?;

    Ok(())
}

/// Accepts a form body whose `Signature` header is its hex digest and
/// returns the form's `data` field.
async fn digest_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<impl IntoResponse, VerifierError> {
    let (parts, body) = request.into_parts();
    let signature = header_str(&parts.headers, SIGNATURE_HEADER)
        .ok_or(VerifierError::MissingHeaders)?
        .to_string();
    let algorithm = state
        .config
        .algorithm()
        .map_err(VerifierError::Configuration)?;

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| VerifierError::UnreadableBody)?;
    if signature.trim() != body_digest(algorithm, &bytes) {
        return Err(VerifierError::InvalidSignature);
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let Form(form) = Form::<DigestForm>::from_request(request, &state)
        .await
        .map_err(|_| VerifierError::MissingFormField)?;
    let data = form.data.ok_or(VerifierError::MissingFormField)?;
    Ok((StatusCode::OK, data))
}

#[derive(Debug, Deserialize)]
struct DigestForm {
    data: Option<String>,
}

async fn list_quotes(State(state): State<AppState>) -> Json<Vec<Quote>> {
    Json(state.quotes.list())
}

/// Looks up `{"id": ...}` in the quote table. Runs behind the token middleware.
async fn quote_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, VerifierError> {
    let lookup: QuoteLookup =
        serde_json::from_slice(&body).map_err(|_| VerifierError::InvalidRequest)?;

    Ok(Json(match lookup.id().and_then(|id| state.quotes.get(id)) {
        Some(quote) => json!({ "quote": quote }),
        None => json!({ "message": "No quote found" }),
    }))
}

async fn echo_handler(body: Bytes) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], body)
}

/// Converts an operator-supplied tolerance, rejecting values chrono cannot hold.
pub fn tolerance_from_secs(secs: u64) -> Result<Duration> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .with_context(|| format!("timestamp tolerance of {secs}s is out of range"))
}
