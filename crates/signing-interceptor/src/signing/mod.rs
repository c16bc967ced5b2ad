mod digest;
mod reference;
mod signer;
mod timestamp;
mod token;

pub use digest::{DigestSigner, body_digest};
pub use reference::{REFERENCE_BITS, REFERENCE_PREFIX, generate_reference};
pub use signer::RequestSigner;
pub use timestamp::{TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};
pub use token::{TokenHeader, TokenSigner, decode_token_header, sign_token, verify_token};

pub const SIGNATURE_HEADER: &str = "Signature";
pub const TIMESTAMP_HEADER: &str = "Timestamp";
pub const REF_HEADER: &str = "Ref";
