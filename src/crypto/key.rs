//! Key handles selected by the JWS algorithm family.

use crate::crypto::algorithm::{Algorithm, SignerKind};
use crate::crypto::mac::{MacKey, MacSigner};
use crate::crypto::rsa::{RsaPrivateKey, RsaPublicKey, RsaSigner};
use crate::error::TokenError;

/// Key capable of producing signatures.
#[derive(Debug, Clone)]
pub enum SigningKey {
    /// Shared secret for `HS*` algorithms.
    Mac(MacKey),
    /// Private key for `RS*` algorithms.
    Rsa(RsaPrivateKey),
}

/// Key capable of checking signatures.
#[derive(Debug, Clone)]
pub enum VerificationKey {
    /// Shared secret for `HS*` algorithms.
    Mac(MacKey),
    /// Public key for `RS*` algorithms.
    Rsa(RsaPublicKey),
}

impl SigningKey {
    /// Sign `message` with the signer that `algorithm` selects.
    ///
    /// # Errors
    ///
    /// Returns `Signing` if the key belongs to the other algorithm family or
    /// the crypto backend refuses the key.
    pub fn sign(&self, algorithm: Algorithm, message: &[u8]) -> Result<Vec<u8>, TokenError> {
        match (algorithm.signer(), self) {
            (SignerKind::Mac(digest), Self::Mac(key)) => Ok(MacSigner::new(digest).sign(key, message)),
            (SignerKind::Rsa(digest), Self::Rsa(key)) => RsaSigner::new(digest).sign(key, message),
            _ => Err(TokenError::signing(format!(
                "{} key cannot sign {}",
                self.family(),
                algorithm
            ))),
        }
    }

    /// Matching verification key.
    #[must_use]
    pub fn verification_key(&self) -> VerificationKey {
        match self {
            Self::Mac(key) => VerificationKey::Mac(key.clone()),
            Self::Rsa(key) => VerificationKey::Rsa(key.public_key()),
        }
    }

    const fn family(&self) -> &'static str {
        match self {
            Self::Mac(_) => "MAC",
            Self::Rsa(_) => "RSA",
        }
    }
}

impl VerificationKey {
    /// Check `signature` over `message` under `algorithm`.
    ///
    /// A key from the wrong family never verifies; there is no fallback to
    /// the other family.
    #[must_use]
    pub fn verify(&self, algorithm: Algorithm, message: &[u8], signature: &[u8]) -> bool {
        match (algorithm.signer(), self) {
            (SignerKind::Mac(digest), Self::Mac(key)) => {
                MacSigner::new(digest).verify(key, message, signature)
            }
            (SignerKind::Rsa(digest), Self::Rsa(key)) => {
                RsaSigner::new(digest).verify(key, message, signature)
            }
            _ => false,
        }
    }
}

impl From<MacKey> for SigningKey {
    fn from(key: MacKey) -> Self {
        Self::Mac(key)
    }
}

impl From<RsaPrivateKey> for SigningKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::Rsa(key)
    }
}

impl From<MacKey> for VerificationKey {
    fn from(key: MacKey) -> Self {
        Self::Mac(key)
    }
}

impl From<RsaPublicKey> for VerificationKey {
    fn from(key: RsaPublicKey) -> Self {
        Self::Rsa(key)
    }
}
