pub mod clock;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod request;
pub mod signing;

pub use clock::{FakeTimeSource, SystemTimeSource, TimeSource};
pub use config::{Algorithm, SigningConfig};
pub use error::SigningError;
pub use interceptor::{SigningDecision, SigningInterceptor};
pub use request::{Header, Request, Response, ResponseAction};
pub use signing::{DigestSigner, RequestSigner, TokenSigner};
