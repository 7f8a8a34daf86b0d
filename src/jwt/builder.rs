use crate::clock::Clock;
use crate::jwt::claims::{Audience, Payload};
use std::collections::BTreeMap;

/// Issues payloads with `iat`/`exp` taken from an injected clock and a
/// random `jti`.
pub struct TokenBuilder {
    issuer: String,
    subject: Option<String>,
    audience: Vec<String>,
    ttl_seconds: i64,
    token_type: Option<String>,
    custom_claims: BTreeMap<String, serde_json::Value>,
}

impl TokenBuilder {
    pub fn new(issuer: impl Into<String>) -> Self {
        TokenBuilder {
            issuer: issuer.into(),
            subject: None,
            audience: Vec::new(),
            ttl_seconds: 3600, // 1 hour default
            token_type: None,
            custom_claims: BTreeMap::new(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn audience(mut self, audience: Vec<String>) -> Self {
        self.audience = audience;
        self
    }

    pub fn ttl_seconds(mut self, ttl: i64) -> Self {
        self.ttl_seconds = ttl;
        self
    }

    pub fn token_type(mut self, typ: impl Into<String>) -> Self {
        self.token_type = Some(typ.into());
        self
    }

    /// Registered claim names are ignored, as in [`Payload::with_custom_claim`].
    pub fn custom_claim(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let key = key.into();
        if !Payload::REGISTERED_CLAIMS.contains(&key.as_str()) {
            self.custom_claims.insert(key, value);
        }
        self
    }

    /// Build the payload as of `clock`'s current time.
    pub fn issue(self, clock: &dyn Clock) -> Payload {
        let now = clock.now_seconds();

        // A single audience is written as a bare string.
        let aud = match self.audience.len() {
            0 => None,
            1 => self.audience.into_iter().next().map(Audience::Single),
            _ => Some(Audience::Multiple(self.audience)),
        };

        Payload {
            iss: Some(self.issuer),
            aud,
            sub: self.subject,
            iat: Some(now),
            exp: Some(now.saturating_add(self.ttl_seconds)),
            nbf: None,
            jti: Some(uuid::Uuid::new_v4().to_string()),
            typ: self.token_type,
            custom: self.custom_claims,
        }
    }
}
