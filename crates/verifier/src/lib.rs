pub mod auth;
pub mod compact;
pub mod error;
pub mod quotes;
pub mod replay;
pub mod server;

pub use compact::compact_json;
pub use error::VerifierError;
pub use quotes::{Quote, QuoteBook};
pub use replay::ReferenceRegistry;
pub use server::{AppState, router, run, tolerance_from_secs};
