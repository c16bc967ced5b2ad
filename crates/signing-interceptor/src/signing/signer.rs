use chrono::{DateTime, FixedOffset};

use crate::request::Request;

/// One way of signing an intercepted request.
///
/// Implementations are sync and hold no per-call state; the same signer
/// is shared by every concurrent interception.
pub trait RequestSigner: Send + Sync {
    /// Header names whose presence (trimmed, case-sensitive) asks for signing.
    fn triggers(&self) -> &[&'static str];

    /// Produce the signed copy of `request`. `now` is sampled once per call.
    fn sign(&self, request: &Request, now: DateTime<FixedOffset>) -> anyhow::Result<Request>;

    /// Short identifier used in logs (e.g. "digest").
    fn name(&self) -> &str;
}
