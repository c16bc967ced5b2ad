#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("Digest computation failed: {0}")]
    DigestComputation(String),
    #[error("HMAC computation failed: {0}")]
    HmacComputation(String),
    #[error("Failed to encode token header: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Malformed token: {0}")]
    MalformedToken(String),
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("Invalid signing configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_error_converts_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: SigningError = json_error.into();
        assert!(matches!(error, SigningError::Encoding(_)));
        assert!(error.to_string().starts_with("Failed to encode token header"));
    }

    #[test]
    fn hmac_error_message_names_the_cause() {
        let error = SigningError::HmacComputation("empty key".into());
        assert_eq!(error.to_string(), "HMAC computation failed: empty key");
    }
}
