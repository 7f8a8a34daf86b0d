//! HMAC signing over raw byte strings.

use crate::error::TokenError;
use ring::hmac;
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Digest used by the MAC signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacDigest {
    /// SHA-1, only for legacy protocols that mandate it.
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl MacDigest {
    /// Parse a digest name such as `"SHA-256"` or `"sha256"`.
    pub fn from_name(name: &str) -> Result<Self, TokenError> {
        match name.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA384" => Ok(Self::Sha384),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(TokenError::signing(format!("Unsupported MAC digest: {}", name))),
        }
    }

    /// Length of the produced tag in bytes.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    fn ring_algorithm(&self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha384 => hmac::HMAC_SHA384,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }
}

/// Shared secret for MAC signing. Zeroized on drop.
#[derive(Clone)]
pub struct MacKey {
    secret: Zeroizing<Vec<u8>>,
}

impl MacKey {
    /// Wrap a shared secret.
    ///
    /// # Errors
    ///
    /// Returns `Signing` for an empty secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(TokenError::signing("MAC secret must not be empty"));
        }
        Ok(Self { secret })
    }

    fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for MacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacKey")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Keyed-hash signer for a fixed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacSigner {
    digest: MacDigest,
}

impl MacSigner {
    /// Create a signer for the given digest.
    #[must_use]
    pub const fn new(digest: MacDigest) -> Self {
        Self { digest }
    }

    /// Digest in use.
    #[must_use]
    pub const fn digest(&self) -> MacDigest {
        self.digest
    }

    /// Compute the MAC tag of `message`.
    #[must_use]
    pub fn sign(&self, key: &MacKey, message: &[u8]) -> Vec<u8> {
        let key = hmac::Key::new(self.digest.ring_algorithm(), key.as_bytes());
        hmac::sign(&key, message).as_ref().to_vec()
    }

    /// Recompute the tag and compare in constant time.
    ///
    /// A mismatch is `false`, never an error.
    #[must_use]
    pub fn verify(&self, key: &MacKey, message: &[u8], signature: &[u8]) -> bool {
        let expected = self.sign(key, message);
        constant_time_eq(&expected, signature)
    }
}

/// HMAC-SHA256 check under a fixed throwaway key whose result is discarded.
///
/// Run on paths that reject a token before any real verification, so that
/// rejection costs about as much as a signature mismatch.
pub(crate) fn decoy_verify(message: &[u8], signature: &[u8]) {
    let key = hmac::Key::new(hmac::HMAC_SHA256, &[0u8; 32]);
    let tag = hmac::sign(&key, message);
    std::hint::black_box(constant_time_eq(tag.as_ref(), signature));
}

/// Constant-time comparison; only the length is allowed to leak.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
