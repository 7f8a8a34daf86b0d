//! Compact JWS serialization: `header.payload.signature`.
//!
//! The signature always covers the ASCII bytes of the first two encoded
//! segments exactly as they appear on the wire. Decoded structures are never
//! re-encoded for verification.

use crate::codec;
use crate::crypto::mac::decoy_verify;
use crate::crypto::{SigningKey, VerificationKey};
use crate::error::TokenError;
use crate::jwt::claims::Payload;
use crate::jwt::header::Header;
use tracing::debug;

/// A parsed token whose signature has not necessarily been checked.
#[derive(Debug, Clone)]
pub struct SignedToken {
    header: Header,
    payload: Payload,
    signature: Vec<u8>,
    signed_content: String,
}

impl SignedToken {
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Decoded signature segment.
    #[must_use]
    pub fn signature_bytes(&self) -> &[u8] {
        &self.signature
    }

    /// `encoded-header.encoded-payload` as received.
    #[must_use]
    pub fn signed_content_bytes(&self) -> &[u8] {
        self.signed_content.as_bytes()
    }

    /// Recompute the signature over the original signed content.
    ///
    /// # Errors
    ///
    /// `UnsupportedAlgorithm` if the header names an algorithm outside the
    /// table, `InvalidSignature` on mismatch. Both paths run a MAC
    /// computation and constant-time comparison.
    pub fn verify_signature(&self, key: &VerificationKey) -> Result<(), TokenError> {
        let message = self.signed_content.as_bytes();
        let algorithm = match self.header.algorithm() {
            Ok(algorithm) => algorithm,
            Err(err) => {
                decoy_verify(message, &self.signature);
                return Err(err);
            }
        };

        if key.verify(algorithm, message, &self.signature) {
            Ok(())
        } else {
            Err(TokenError::InvalidSignature)
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (Header, Payload) {
        (self.header, self.payload)
    }
}

/// Signs and verifies compact tokens.
pub struct TokenCodec;

impl TokenCodec {
    /// Serialize, encode and sign `header` and `payload`.
    ///
    /// The signer is chosen by the header's algorithm; `key` must belong to
    /// that family.
    pub fn sign(key: &SigningKey, header: &Header, payload: &Payload) -> Result<String, TokenError> {
        let algorithm = header.algorithm()?;

        let header_json = serde_json::to_vec(header)
            .map_err(|e| TokenError::signing(format!("Header serialization failed: {}", e)))?;
        let payload_json = serde_json::to_vec(payload)
            .map_err(|e| TokenError::signing(format!("Payload serialization failed: {}", e)))?;

        let signing_input = format!("{}.{}", codec::encode(header_json), codec::encode(payload_json));
        let signature = key.sign(algorithm, signing_input.as_bytes())?;

        debug!(alg = %algorithm, kid = ?header.key_id(), "Signed token");
        Ok(format!("{}.{}", signing_input, codec::encode(signature)))
    }

    /// Split and decode a token without checking its signature.
    ///
    /// # Errors
    ///
    /// `MalformedToken` unless there are exactly three segments or if the
    /// header or payload is not valid JSON, `MalformedEncoding` if the header
    /// or payload segment is not base64url. An undecodable signature segment
    /// can never verify and is reported as `InvalidSignature`.
    pub fn parse(token: &str) -> Result<SignedToken, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header_segment, payload_segment, signature_segment] = segments[..] else {
            return Err(TokenError::malformed_token(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let header_json = codec::decode(header_segment)?;
        let payload_json = codec::decode(payload_segment)?;
        let signature = codec::decode(signature_segment).map_err(|_| TokenError::InvalidSignature)?;

        let header: Header = serde_json::from_slice(&header_json)
            .map_err(|e| TokenError::malformed_token(format!("Invalid header: {}", e)))?;
        let payload: Payload = serde_json::from_slice(&payload_json)
            .map_err(|e| TokenError::malformed_token(format!("Invalid payload: {}", e)))?;

        let signed_len = header_segment.len() + 1 + payload_segment.len();
        Ok(SignedToken {
            header,
            payload,
            signature,
            signed_content: token[..signed_len].to_string(),
        })
    }

    /// Parse `token` and check its signature with `key`.
    ///
    /// Time validity is not checked here; call
    /// [`Payload::is_valid_time`] or use a [`TokenVerifier`](crate::jwt::TokenVerifier).
    pub fn verify(key: &VerificationKey, token: &str) -> Result<(Header, Payload), TokenError> {
        let signed = Self::parse(token)?;
        signed.verify_signature(key)?;
        Ok(signed.into_parts())
    }
}
