//! Error types shared by the signing, verification and storage layers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by token and credential store operations.
///
/// None of these are retried internally. Messages never carry key material
/// or token values.
#[derive(Error, Debug, Clone)]
pub enum TokenError {
    #[error("Malformed base64url encoding: {0}")]
    MalformedEncoding(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Token is outside its validity window")]
    InvalidTime,

    #[error("Claim mismatch: {0}")]
    ClaimMismatch(String),

    #[error("Unsafe credential store location: {}", .0.display())]
    UnsafeStoreLocation(PathBuf),

    #[error("Credential store I/O error: {0}")]
    StoreIo(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TokenError {
    /// Create a malformed encoding error.
    #[must_use]
    pub fn malformed_encoding(msg: impl Into<String>) -> Self {
        Self::MalformedEncoding(msg.into())
    }

    /// Create a malformed token error.
    #[must_use]
    pub fn malformed_token(msg: impl Into<String>) -> Self {
        Self::MalformedToken(msg.into())
    }

    /// Create a signing error.
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    /// Create a claim mismatch error.
    #[must_use]
    pub fn claim_mismatch(msg: impl Into<String>) -> Self {
        Self::ClaimMismatch(msg.into())
    }

    /// Create a store I/O error.
    #[must_use]
    pub fn store_io(msg: impl Into<String>) -> Self {
        Self::StoreIo(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the token was rejected: callers should treat the request as
    /// unauthenticated.
    #[must_use]
    pub const fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            Self::MalformedEncoding(_)
                | Self::MalformedToken(_)
                | Self::UnsupportedAlgorithm(_)
                | Self::InvalidSignature
                | Self::InvalidTime
                | Self::ClaimMismatch(_)
        )
    }

    /// True when credential storage is unavailable, as opposed to a
    /// security rejection.
    #[must_use]
    pub const fn is_storage_fault(&self) -> bool {
        matches!(self, Self::StoreIo(_) | Self::UnsafeStoreLocation(_))
    }

    /// Stable error code for logs and API responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedEncoding(_) => TOKEN_MALFORMED_ENCODING,
            Self::MalformedToken(_) => TOKEN_MALFORMED,
            Self::UnsupportedAlgorithm(_) => TOKEN_UNSUPPORTED_ALGORITHM,
            Self::InvalidSignature => TOKEN_INVALID_SIGNATURE,
            Self::Signing(_) => TOKEN_SIGNING_ERROR,
            Self::InvalidTime => TOKEN_INVALID_TIME,
            Self::ClaimMismatch(_) => TOKEN_CLAIM_MISMATCH,
            Self::UnsafeStoreLocation(_) => STORE_UNSAFE_LOCATION,
            Self::StoreIo(_) => STORE_IO_ERROR,
            Self::Config(_) => CONFIG_ERROR,
        }
    }
}

// Error codes
pub const TOKEN_MALFORMED_ENCODING: &str = "TOKEN_MALFORMED_ENCODING";
pub const TOKEN_MALFORMED: &str = "TOKEN_MALFORMED";
pub const TOKEN_UNSUPPORTED_ALGORITHM: &str = "TOKEN_UNSUPPORTED_ALGORITHM";
pub const TOKEN_INVALID_SIGNATURE: &str = "TOKEN_INVALID_SIGNATURE";
pub const TOKEN_SIGNING_ERROR: &str = "TOKEN_SIGNING_ERROR";
pub const TOKEN_INVALID_TIME: &str = "TOKEN_INVALID_TIME";
pub const TOKEN_CLAIM_MISMATCH: &str = "TOKEN_CLAIM_MISMATCH";
pub const STORE_UNSAFE_LOCATION: &str = "STORE_UNSAFE_LOCATION";
pub const STORE_IO_ERROR: &str = "STORE_IO_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
