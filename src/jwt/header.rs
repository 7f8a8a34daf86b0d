use crate::crypto::Algorithm;
use crate::error::TokenError;
use serde::{Deserialize, Serialize};

/// JOSE header.
///
/// The `alg` value is kept verbatim so a token carrying an unknown algorithm
/// still parses and is rejected explicitly at verification time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cty: Option<String>,
}

impl Header {
    /// Header for `algorithm` with `typ` set to `JWT`.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Header {
            alg: algorithm.as_str().to_string(),
            typ: Some("JWT".to_string()),
            kid: None,
            cty: None,
        }
    }

    /// Header with an arbitrary `alg` string, e.g. to exercise rejection of
    /// algorithms outside the supported table.
    #[must_use]
    pub fn with_raw_algorithm(alg: impl Into<String>) -> Self {
        Header {
            alg: alg.into(),
            typ: Some("JWT".to_string()),
            kid: None,
            cty: None,
        }
    }

    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    pub fn with_type(mut self, typ: impl Into<String>) -> Self {
        self.typ = Some(typ.into());
        self
    }

    pub fn without_type(mut self) -> Self {
        self.typ = None;
        self
    }

    pub fn with_content_type(mut self, cty: impl Into<String>) -> Self {
        self.cty = Some(cty.into());
        self
    }

    /// Resolve `alg` against the supported algorithm table.
    pub fn algorithm(&self) -> Result<Algorithm, TokenError> {
        self.alg.parse()
    }

    /// Raw `alg` value.
    #[must_use]
    pub fn alg(&self) -> &str {
        &self.alg
    }

    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.typ.as_deref()
    }

    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.cty.as_deref()
    }
}
