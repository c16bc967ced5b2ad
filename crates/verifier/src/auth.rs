use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum_core::response::Response;
use chrono::{DateTime, FixedOffset};
use signing_interceptor::signing::{
    REF_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER, decode_token_header, parse_timestamp,
    verify_token,
};
use tracing::{debug, warn};

use crate::compact::compact_json;
use crate::error::VerifierError;
use crate::server::AppState;

pub(crate) const MAX_BODY_BYTES: usize = 10 * 1024 * 1024; // 10 MB

/// Non-empty value of header `name`.
pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// Issue instant of `timestamp` if it lies within tolerance of the clock.
fn fresh_issue_time(state: &AppState, timestamp: &str) -> Option<DateTime<FixedOffset>> {
    let now = state.clock.now();
    match parse_timestamp(timestamp, *now.offset()) {
        Ok(issued) => {
            let skew = (now - issued).num_milliseconds().abs();
            (skew <= state.timestamp_tolerance.num_milliseconds()).then_some(issued)
        }
        Err(e) => {
            warn!("timestamp parsing error: {e}");
            None
        }
    }
}

/// Middleware guarding token-signed routes.
///
/// Checks, in order: all three headers present, timestamp within tolerance,
/// `Ref` not seen within the tolerance window, JSON body, token MAC and
/// payload, token `iat` equal to the `Timestamp` header. The reference is
/// consumed as soon as it passes the uniqueness check. Downstream handlers
/// receive the compacted body that was verified.
pub async fn require_signed_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, VerifierError> {
    let (parts, body) = request.into_parts();

    let (Some(timestamp), Some(reference), Some(signature)) = (
        header_str(&parts.headers, TIMESTAMP_HEADER),
        header_str(&parts.headers, REF_HEADER),
        header_str(&parts.headers, SIGNATURE_HEADER),
    ) else {
        return Err(VerifierError::MissingHeaders);
    };

    let issued_at =
        fresh_issue_time(&state, timestamp).ok_or(VerifierError::InvalidTimestamp)?;
    let recorded = state.references.record(
        reference,
        issued_at,
        state.clock.now(),
        state.timestamp_tolerance,
    );
    if !recorded {
        return Err(VerifierError::DuplicateReference);
    }

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| VerifierError::UnreadableBody)?;
    let compact = compact_json(&bytes).map_err(|_| VerifierError::InvalidJson)?;

    debug!(reference, "verifying token signature");
    if !verify_token(&state.config, signature, &compact)? {
        return Err(VerifierError::InvalidSignature);
    }
    if decode_token_header(signature)?.iat != timestamp {
        return Err(VerifierError::InvalidTimestamp);
    }

    Ok(next.run(Request::from_parts(parts, Body::from(compact))).await)
}
