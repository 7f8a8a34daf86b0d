//! RSA PKCS#1 v1.5 signing and verification.
//!
//! Key material is parsed by `ring`; this module only wraps the handles.

use crate::error::TokenError;
use ring::rand::SystemRandom;
use ring::signature::{self, KeyPair, RsaKeyPair, RsaPublicKeyComponents, UnparsedPublicKey};
use std::fmt;
use std::sync::Arc;

/// Digest used by the RSA signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaDigest {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl RsaDigest {
    fn signing_params(self) -> &'static dyn signature::RsaEncoding {
        match self {
            Self::Sha256 => &signature::RSA_PKCS1_SHA256,
            Self::Sha384 => &signature::RSA_PKCS1_SHA384,
            Self::Sha512 => &signature::RSA_PKCS1_SHA512,
        }
    }

    fn verification_params(self) -> &'static signature::RsaParameters {
        match self {
            Self::Sha256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            Self::Sha384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            Self::Sha512 => &signature::RSA_PKCS1_2048_8192_SHA512,
        }
    }
}

/// Opaque RSA private key handle.
#[derive(Clone)]
pub struct RsaPrivateKey {
    key_pair: Arc<RsaKeyPair>,
}

impl RsaPrivateKey {
    /// Load a PKCS#8 `PrivateKeyInfo` DER document.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, TokenError> {
        let key_pair = RsaKeyPair::from_pkcs8(der)
            .map_err(|e| TokenError::signing(format!("Invalid PKCS#8 RSA key: {}", e)))?;
        Ok(Self {
            key_pair: Arc::new(key_pair),
        })
    }

    /// Load a PKCS#1 `RSAPrivateKey` DER document.
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, TokenError> {
        let key_pair = RsaKeyPair::from_der(der)
            .map_err(|e| TokenError::signing(format!("Invalid PKCS#1 RSA key: {}", e)))?;
        Ok(Self {
            key_pair: Arc::new(key_pair),
        })
    }

    /// Public half of this key.
    #[must_use]
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::Der(self.key_pair.public_key().as_ref().to_vec())
    }

    /// Modulus length in bytes, which is also the signature length.
    #[must_use]
    pub fn modulus_len(&self) -> usize {
        self.key_pair.public().modulus_len()
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("modulus_bits", &(self.modulus_len() * 8))
            .finish_non_exhaustive()
    }
}

/// RSA public key, either DER or raw big-endian components (as in a JWK).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsaPublicKey {
    /// PKCS#1 `RSAPublicKey` DER.
    Der(Vec<u8>),
    /// Modulus and public exponent, unsigned big-endian.
    Components {
        /// Modulus
        n: Vec<u8>,
        /// Public exponent
        e: Vec<u8>,
    },
}

impl RsaPublicKey {
    /// Wrap a PKCS#1 `RSAPublicKey` DER document.
    ///
    /// The encoding is checked lazily: a malformed key simply never verifies.
    #[must_use]
    pub fn from_pkcs1_der(der: impl Into<Vec<u8>>) -> Self {
        Self::Der(der.into())
    }

    /// Build from modulus and exponent, e.g. the decoded `n`/`e` of a JWK.
    #[must_use]
    pub fn from_components(n: impl Into<Vec<u8>>, e: impl Into<Vec<u8>>) -> Self {
        Self::Components {
            n: n.into(),
            e: e.into(),
        }
    }
}

/// RSA signer for a fixed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaSigner {
    digest: RsaDigest,
}

impl RsaSigner {
    /// Create a signer for the given digest.
    #[must_use]
    pub const fn new(digest: RsaDigest) -> Self {
        Self { digest }
    }

    /// Digest in use.
    #[must_use]
    pub const fn digest(&self) -> RsaDigest {
        self.digest
    }

    /// Sign `message` with the private key.
    ///
    /// # Errors
    ///
    /// Returns `Signing` if the key cannot produce a signature.
    pub fn sign(&self, key: &RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>, TokenError> {
        let rng = SystemRandom::new();
        let mut signature = vec![0u8; key.modulus_len()];
        key.key_pair
            .sign(self.digest.signing_params(), &rng, message, &mut signature)
            .map_err(|_| TokenError::signing("RSA signing failed"))?;
        Ok(signature)
    }

    /// Verify `signature` over `message`.
    ///
    /// Any failure, including an unusable public key, is `false`.
    #[must_use]
    pub fn verify(&self, key: &RsaPublicKey, message: &[u8], signature: &[u8]) -> bool {
        let params = self.digest.verification_params();
        match key {
            RsaPublicKey::Der(der) => UnparsedPublicKey::new(params, der)
                .verify(message, signature)
                .is_ok(),
            RsaPublicKey::Components { n, e } => RsaPublicKeyComponents { n, e }
                .verify(params, message, signature)
                .is_ok(),
        }
    }
}
