use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `aud` claim: a single string or a list of strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// All audience values.
    #[must_use]
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Audience::Single(aud) => vec![aud.as_str()],
            Audience::Multiple(auds) => auds.iter().map(String::as_str).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, audience: &str) -> bool {
        self.as_list().contains(&audience)
    }
}

impl From<&str> for Audience {
    fn from(aud: &str) -> Self {
        Audience::Single(aud.to_string())
    }
}

impl From<String> for Audience {
    fn from(aud: String) -> Self {
        Audience::Single(aud)
    }
}

impl From<Vec<String>> for Audience {
    fn from(auds: Vec<String>) -> Self {
        Audience::Multiple(auds)
    }
}

/// Token payload: registered claims plus open custom claims.
///
/// Times are seconds since the epoch. Custom claims must not reuse the
/// registered names below; set those through the typed fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    // Custom claims
    #[serde(flatten)]
    pub custom: BTreeMap<String, serde_json::Value>,
}

impl Payload {
    /// Names that `custom` must not contain.
    pub const REGISTERED_CLAIMS: [&'static str; 8] =
        ["iss", "aud", "sub", "iat", "exp", "nbf", "jti", "typ"];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<Audience>) -> Self {
        self.aud = Some(audience.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.sub = Some(subject.into());
        self
    }

    pub fn with_issued_at(mut self, seconds: i64) -> Self {
        self.iat = Some(seconds);
        self
    }

    pub fn with_expiration(mut self, seconds: i64) -> Self {
        self.exp = Some(seconds);
        self
    }

    pub fn with_not_before(mut self, seconds: i64) -> Self {
        self.nbf = Some(seconds);
        self
    }

    pub fn with_jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    pub fn with_type(mut self, typ: impl Into<String>) -> Self {
        self.typ = Some(typ.into());
        self
    }

    /// Add a custom claim. Registered claim names are ignored.
    pub fn with_custom_claim(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let key = key.into();
        if !Self::REGISTERED_CLAIMS.contains(&key.as_str()) {
            self.custom.insert(key, value);
        }
        self
    }

    #[must_use]
    pub fn custom_claim(&self, key: &str) -> Option<&serde_json::Value> {
        self.custom.get(key)
    }

    /// Audience values, empty when `aud` is absent.
    #[must_use]
    pub fn audience_list(&self) -> Vec<&str> {
        self.aud.as_ref().map(Audience::as_list).unwrap_or_default()
    }

    /// Checks `iat - skew <= now < exp + skew` against `clock`.
    ///
    /// A missing `iat` or `exp` leaves that bound unchecked, so a payload
    /// with neither claim is always time-valid.
    #[must_use]
    pub fn is_valid_time(&self, clock: &dyn Clock, skew_seconds: u64) -> bool {
        let now = clock.now_seconds();
        let skew = i64::try_from(skew_seconds).unwrap_or(i64::MAX);

        let issued = self
            .iat
            .map_or(true, |iat| now >= iat.saturating_sub(skew));
        let unexpired = self
            .exp
            .map_or(true, |exp| now < exp.saturating_add(skew));

        issued && unexpired
    }
}
