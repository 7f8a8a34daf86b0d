//! Canonical base64url (no padding) encoding.
//!
//! Signatures are computed over the encoded form, so encoding must be
//! deterministic and decoding strict.

use crate::error::TokenError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode bytes as unpadded base64url.
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url.
///
/// # Errors
///
/// Returns `MalformedEncoding` on characters outside the URL-safe alphabet,
/// padding, an impossible length, or non-canonical trailing bits.
pub fn decode(input: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| TokenError::malformed_encoding(e.to_string()))
}
