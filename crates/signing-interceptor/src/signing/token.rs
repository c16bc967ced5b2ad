use std::sync::Arc;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use chrono::{DateTime, FixedOffset};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::reference::generate_reference;
use super::signer::RequestSigner;
use super::timestamp::format_timestamp;
use super::{REF_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::config::{Algorithm, SigningConfig};
use crate::error::SigningError;
use crate::request::Request;

type HmacSha256 = Hmac<Sha256>;

/// First token segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub uri: String,
    pub iat: String,
}

impl TokenHeader {
    pub fn new(uri: impl Into<String>, iat: impl Into<String>) -> Self {
        Self {
            alg: "HS256".to_string(),
            token_type: "JWT".to_string(),
            uri: uri.into(),
            iat: iat.into(),
        }
    }
}

fn signing_input(header: &TokenHeader, body: &[u8]) -> Result<String, SigningError> {
    let header_json = serde_json::to_vec(header)?;
    Ok(format!(
        "{}.{}",
        STANDARD_NO_PAD.encode(header_json),
        STANDARD_NO_PAD.encode(body)
    ))
}

fn keyed_mac(config: &SigningConfig, input: &[u8]) -> Result<HmacSha256, SigningError> {
    let algorithm = config.algorithm().map_err(SigningError::HmacComputation)?;
    if config.secret_key().is_empty() {
        return Err(SigningError::HmacComputation("empty key".to_string()));
    }

    match algorithm {
        Algorithm::Sha256 => {
            let mut mac = HmacSha256::new_from_slice(config.secret_key())
                .map_err(|e| SigningError::HmacComputation(e.to_string()))?;
            mac.update(input);
            Ok(mac)
        }
    }
}

/// Builds `header.payload.mac` for a request at `path` with `body`,
/// issued at `timestamp`.
pub fn sign_token(
    config: &SigningConfig,
    path: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<String, SigningError> {
    let input = signing_input(&TokenHeader::new(path, timestamp), body)?;
    let mac = keyed_mac(config, input.as_bytes())?.finalize().into_bytes();
    Ok(format!("{input}.{}", STANDARD_NO_PAD.encode(mac)))
}

/// Checks the MAC of `token` and that its payload segment carries exactly
/// `body`. A well-formed token that fails either check yields `Ok(false)`.
pub fn verify_token(config: &SigningConfig, token: &str, body: &[u8]) -> Result<bool, SigningError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(SigningError::MalformedToken(format!(
            "token needs 3 parts, got {}",
            segments.len()
        )));
    };

    let expected = STANDARD_NO_PAD
        .decode(signature)
        .map_err(|e| SigningError::MalformedToken(format!("invalid signature segment: {e}")))?;
    let input = format!("{header}.{payload}");
    if keyed_mac(config, input.as_bytes())?.verify_slice(&expected).is_err() {
        return Ok(false);
    }

    let signed_body = STANDARD_NO_PAD
        .decode(payload)
        .map_err(|e| SigningError::MalformedToken(format!("invalid payload segment: {e}")))?;
    Ok(signed_body == body)
}

pub fn decode_token_header(token: &str) -> Result<TokenHeader, SigningError> {
    let segment = token.split('.').next().unwrap_or_default();
    let bytes = STANDARD_NO_PAD
        .decode(segment)
        .map_err(|e| SigningError::MalformedToken(format!("invalid header segment: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| SigningError::MalformedToken(format!("invalid header JSON: {e}")))
}

/// Attaches `Timestamp`, a signed `Signature` token and a random `Ref`.
pub struct TokenSigner {
    config: Arc<SigningConfig>,
}

impl TokenSigner {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self { config }
    }
}

impl RequestSigner for TokenSigner {
    fn triggers(&self) -> &[&'static str] {
        &[SIGNATURE_HEADER, TIMESTAMP_HEADER]
    }

    fn sign(&self, request: &Request, now: DateTime<FixedOffset>) -> Result<Request> {
        let timestamp = format_timestamp(&now);
        let signature = sign_token(&self.config, request.path(), &timestamp, request.body())
            .context("generating token signature")?;
        let reference = generate_reference(&mut rand::thread_rng());

        Ok(request
            .with_updated_header(TIMESTAMP_HEADER, timestamp)
            .with_updated_header(SIGNATURE_HEADER, signature)
            .with_updated_header(REF_HEADER, reference))
    }

    fn name(&self) -> &str {
        "token"
    }
}
