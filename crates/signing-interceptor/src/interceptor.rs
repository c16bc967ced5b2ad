use std::sync::Arc;

use tracing::error;

use crate::clock::TimeSource;
use crate::config::SigningConfig;
use crate::request::{Request, Response, ResponseAction};
use crate::signing::{DigestSigner, RequestSigner, TokenSigner};

/// Outcome of intercepting one outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningDecision {
    /// The original request, passed through verbatim.
    Unchanged(Request),
    /// A signed copy of the request.
    Modified(Request),
}

impl SigningDecision {
    pub fn is_modified(&self) -> bool {
        matches!(self, SigningDecision::Modified(_))
    }

    pub fn request(&self) -> &Request {
        match self {
            SigningDecision::Unchanged(request) | SigningDecision::Modified(request) => request,
        }
    }

    pub fn into_request(self) -> Request {
        match self {
            SigningDecision::Unchanged(request) | SigningDecision::Modified(request) => request,
        }
    }
}

/// Request hook installed into a host interception pipeline.
///
/// Holds nothing but its signer, so one instance can serve concurrent
/// requests. Signing failures never reach the caller: they are logged and
/// the request continues unsigned.
#[derive(Clone)]
pub struct SigningInterceptor {
    signer: Arc<dyn RequestSigner>,
}

impl SigningInterceptor {
    pub fn new(signer: Arc<dyn RequestSigner>) -> Self {
        Self { signer }
    }

    pub fn digest(config: Arc<SigningConfig>) -> Self {
        Self::new(Arc::new(DigestSigner::new(config)))
    }

    pub fn token(config: Arc<SigningConfig>) -> Self {
        Self::new(Arc::new(TokenSigner::new(config)))
    }

    pub fn signer_name(&self) -> &str {
        self.signer.name()
    }

    pub fn process(&self, request: Request, clock: &dyn TimeSource) -> SigningDecision {
        let triggered = self
            .signer
            .triggers()
            .iter()
            .any(|name| request.has_header_named(name));
        if !triggered {
            return SigningDecision::Unchanged(request);
        }

        match self.signer.sign(&request, clock.now()) {
            Ok(signed) => SigningDecision::Modified(signed),
            Err(err) => {
                let signer = self.signer.name();
                for (depth, cause) in err.chain().enumerate() {
                    error!(signer, path = request.path(), depth, "{cause}");
                }
                SigningDecision::Unchanged(request)
            }
        }
    }

    pub fn process_response(&self, response: Response) -> ResponseAction {
        ResponseAction::Continue(response)
    }
}
