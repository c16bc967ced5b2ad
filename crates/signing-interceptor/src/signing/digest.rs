use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use sha2::{Digest, Sha256};
use tracing::info;

use super::SIGNATURE_HEADER;
use super::signer::RequestSigner;
use crate::config::{Algorithm, SigningConfig};
use crate::error::SigningError;
use crate::request::Request;

/// Lowercase, zero-padded hex digest of `body`.
pub fn body_digest(algorithm: Algorithm, body: &[u8]) -> String {
    match algorithm {
        Algorithm::Sha256 => hex::encode(Sha256::digest(body)),
    }
}

/// Replaces the `Signature` header with the hex digest of the body.
pub struct DigestSigner {
    config: Arc<SigningConfig>,
}

impl DigestSigner {
    pub fn new(config: Arc<SigningConfig>) -> Self {
        Self { config }
    }
}

impl RequestSigner for DigestSigner {
    fn triggers(&self) -> &[&'static str] {
        &[SIGNATURE_HEADER]
    }

    fn sign(&self, request: &Request, _now: DateTime<FixedOffset>) -> Result<Request> {
        let algorithm = self
            .config
            .algorithm()
            .map_err(SigningError::DigestComputation)
            .context("resolving digest algorithm")?;

        let digest = body_digest(algorithm, request.body());
        info!("Calculated signature: {digest}");

        Ok(request.with_updated_header(SIGNATURE_HEADER, digest))
    }

    fn name(&self) -> &str {
        "digest"
    }
}
