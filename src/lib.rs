//! Token core library.
//!
//! Provides JWS token signing and verification (HMAC and RSA), time-bound
//! claim validation against an injectable clock, and a file-backed
//! credential store that is safe across threads and processes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod jwt;
pub mod storage;
pub mod telemetry;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use crypto::{SigningKey, VerificationKey};
pub use error::TokenError;
pub use jwt::{Header, Payload, SignedToken, TokenCodec, TokenVerifier};
pub use storage::{CredentialRecord, FileCredentialStore};
