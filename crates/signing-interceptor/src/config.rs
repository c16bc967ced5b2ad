use std::fmt;
use std::str::FromStr;

use crate::error::SigningError;

pub const SECRET_KEY_ENV: &str = "SIGNING_SECRET_KEY";
pub const ALGORITHM_ENV: &str = "SIGNING_ALGORITHM";
pub const DEFAULT_ALGORITHM: &str = "SHA-256";

/// Hash family used by both signing modes: plain digest in digest mode,
/// HMAC over the same hash in token mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Sha256,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHA-256" | "SHA256" | "HS256" | "HMACSHA256" => Ok(Algorithm::Sha256),
            other => Err(format!("unsupported algorithm '{other}'")),
        }
    }
}

/// Key material and algorithm identifier shared by every interception.
///
/// Built once at startup and shared behind an `Arc`. The algorithm is kept
/// as the identifier the operator supplied and resolved on each use, so a
/// misconfiguration surfaces as a per-request signing failure.
#[derive(Clone)]
pub struct SigningConfig {
    secret_key: Vec<u8>,
    algorithm: String,
}

impl SigningConfig {
    pub fn new(secret_key: impl Into<Vec<u8>>, algorithm: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            algorithm: algorithm.into(),
        }
    }

    pub fn with_default_algorithm(secret_key: impl Into<Vec<u8>>) -> Self {
        Self::new(secret_key, DEFAULT_ALGORITHM)
    }

    /// Reads `SIGNING_SECRET_KEY` (required) and `SIGNING_ALGORITHM`.
    pub fn from_env() -> Result<Self, SigningError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SigningError> {
        let secret_key = lookup(SECRET_KEY_ENV)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SigningError::Config(format!("{SECRET_KEY_ENV} is not set")))?;
        let algorithm = lookup(ALGORITHM_ENV).unwrap_or_else(|| DEFAULT_ALGORITHM.to_string());
        Ok(Self::new(secret_key, algorithm))
    }

    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    pub fn algorithm_id(&self) -> &str {
        &self.algorithm
    }

    pub fn algorithm(&self) -> Result<Algorithm, String> {
        self.algorithm.parse()
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret_key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
