//! Signing primitives.
//!
//! MAC and RSA signers over raw byte strings, the fixed JWS algorithm table,
//! and the key handles that select between them.

pub mod algorithm;
pub mod key;
pub mod mac;
pub mod rsa;

// Re-exports
pub use algorithm::{Algorithm, SignerKind};
pub use key::{SigningKey, VerificationKey};
pub use mac::{MacDigest, MacKey, MacSigner};
pub use rsa::{RsaDigest, RsaPrivateKey, RsaPublicKey, RsaSigner};
