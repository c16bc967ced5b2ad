use axum::Json;
use axum::http::StatusCode;
use axum_core::response::{IntoResponse as AxumCoreIntoResponse, Response};
use serde_json::json;
use signing_interceptor::SigningError;

#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("Missing headers")]
    MissingHeaders,
    #[error("Invalid timestamp")]
    InvalidTimestamp,
    #[error("Ref not unique")]
    DuplicateReference,
    #[error("Could not read request body")]
    UnreadableBody,
    #[error("Invalid JSON body")]
    InvalidJson,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Missing form field 'data'")]
    MissingFormField,
    #[error("invalid request")]
    InvalidRequest,
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error("Invalid verifier configuration: {0}")]
    Configuration(String),
}

/// Trait implementation to convert this error into an axum http response
impl AxumCoreIntoResponse for VerifierError {
    fn into_response(self) -> Response {
        let status = match &self {
            VerifierError::InvalidSignature => StatusCode::UNAUTHORIZED,
            VerifierError::Signing(SigningError::MalformedToken(_)) => StatusCode::BAD_REQUEST,
            VerifierError::Signing(_) | VerifierError::Configuration(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Something wrong happened." })),
                )
                    .into_response();
            }
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
