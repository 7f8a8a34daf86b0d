//! Signature plus claim verification for incoming tokens.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::crypto::VerificationKey;
use crate::error::TokenError;
use crate::jwt::codec::{SignedToken, TokenCodec};
use std::sync::Arc;
use tracing::warn;

/// Default tolerance for clock drift between issuer and verifier.
pub const DEFAULT_CLOCK_SKEW_SECONDS: u64 = 300;

/// Verifies signature, time window and optionally issuer and audience.
///
/// Signature is checked first; claims are only looked at on a token whose
/// signature verified.
pub struct TokenVerifier {
    key: VerificationKey,
    clock: Arc<dyn Clock>,
    skew_seconds: u64,
    issuers: Vec<String>,
    audiences: Vec<String>,
}

impl TokenVerifier {
    /// Verifier on the system clock with the default skew and no issuer or
    /// audience restrictions.
    #[must_use]
    pub fn new(key: VerificationKey) -> Self {
        Self {
            key,
            clock: Arc::new(SystemClock),
            skew_seconds: DEFAULT_CLOCK_SKEW_SECONDS,
            issuers: Vec::new(),
            audiences: Vec::new(),
        }
    }

    /// Verifier using the skew from `config`.
    #[must_use]
    pub fn from_config(key: VerificationKey, config: &Config) -> Self {
        Self::new(key).with_skew_seconds(config.clock_skew.as_secs())
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_skew_seconds(mut self, skew_seconds: u64) -> Self {
        self.skew_seconds = skew_seconds;
        self
    }

    /// Accept only tokens whose `iss` equals one of `issuers`.
    #[must_use]
    pub fn with_issuers(mut self, issuers: Vec<String>) -> Self {
        self.issuers = issuers;
        self
    }

    /// Accept only tokens whose `aud` contains one of `audiences`.
    #[must_use]
    pub fn with_audiences(mut self, audiences: Vec<String>) -> Self {
        self.audiences = audiences;
        self
    }

    /// Verify `token` and return it parsed.
    pub fn verify(&self, token: &str) -> Result<SignedToken, TokenError> {
        self.check(token).map_err(|err| {
            warn!(code = err.code(), "Token rejected");
            err
        })
    }

    fn check(&self, token: &str) -> Result<SignedToken, TokenError> {
        let signed = TokenCodec::parse(token)?;
        signed.verify_signature(&self.key)?;

        let payload = signed.payload();
        if !payload.is_valid_time(self.clock.as_ref(), self.skew_seconds) {
            return Err(TokenError::InvalidTime);
        }

        if !self.issuers.is_empty() {
            let issuer_ok = payload
                .iss
                .as_deref()
                .is_some_and(|iss| self.issuers.iter().any(|allowed| allowed == iss));
            if !issuer_ok {
                return Err(TokenError::claim_mismatch("issuer not accepted"));
            }
        }

        if !self.audiences.is_empty() {
            let audience_ok = payload
                .audience_list()
                .iter()
                .any(|aud| self.audiences.iter().any(|allowed| allowed == aud));
            if !audience_ok {
                return Err(TokenError::claim_mismatch("audience not accepted"));
            }
        }

        Ok(signed)
    }
}
