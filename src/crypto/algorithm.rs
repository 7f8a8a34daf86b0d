//! JWS algorithm identifiers and their signer mapping.

use crate::crypto::mac::MacDigest;
use crate::crypto::rsa::RsaDigest;
use crate::error::TokenError;
use std::fmt;
use std::str::FromStr;

/// Supported JWS `alg` values.
///
/// The mapping to a signer family is fixed; an unknown identifier is an
/// error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,
}

/// Signer selected by an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKind {
    /// Symmetric MAC signer.
    Mac(MacDigest),
    /// RSA signer.
    Rsa(RsaDigest),
}

impl Algorithm {
    /// Algorithm name for the JWS header.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::RS512 => "RS512",
        }
    }

    /// Signer family and digest for this algorithm.
    #[must_use]
    pub const fn signer(&self) -> SignerKind {
        match self {
            Self::HS256 => SignerKind::Mac(MacDigest::Sha256),
            Self::HS384 => SignerKind::Mac(MacDigest::Sha384),
            Self::HS512 => SignerKind::Mac(MacDigest::Sha512),
            Self::RS256 => SignerKind::Rsa(RsaDigest::Sha256),
            Self::RS384 => SignerKind::Rsa(RsaDigest::Sha384),
            Self::RS512 => SignerKind::Rsa(RsaDigest::Sha512),
        }
    }
}

impl FromStr for Algorithm {
    type Err = TokenError;

    /// Exact, case-sensitive match against the JWS registry names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            "RS256" => Ok(Self::RS256),
            "RS384" => Ok(Self::RS384),
            "RS512" => Ok(Self::RS512),
            other => Err(TokenError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("HS256".parse::<Algorithm>().unwrap(), Algorithm::HS256);
        assert_eq!("RS512".parse::<Algorithm>().unwrap(), Algorithm::RS512);
        assert!(matches!(
            "none".parse::<Algorithm>(),
            Err(TokenError::UnsupportedAlgorithm(_))
        ));
        // JWS names are case-sensitive.
        assert!("hs256".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_signer_mapping() {
        assert_eq!(Algorithm::HS256.signer(), SignerKind::Mac(MacDigest::Sha256));
        assert_eq!(Algorithm::RS256.signer(), SignerKind::Rsa(RsaDigest::Sha256));
        assert_eq!(Algorithm::RS384.as_str(), "RS384");
    }
}
