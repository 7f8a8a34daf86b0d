use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Persisted access/refresh token pair for one user.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absolute expiry of the access token, milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time_milliseconds: Option<i64>,
}

impl CredentialRecord {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expiration_time_milliseconds: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_expiration_time_millis(mut self, millis: i64) -> Self {
        self.expiration_time_milliseconds = Some(millis);
        self
    }

    /// Set the expiry `expires_in_seconds` after `clock`'s current time, as
    /// returned by a token endpoint's `expires_in`.
    pub fn expiring_in(mut self, expires_in_seconds: i64, clock: &dyn Clock) -> Self {
        let millis = clock
            .now_millis()
            .saturating_add(expires_in_seconds.saturating_mul(1000));
        self.expiration_time_milliseconds = Some(millis);
        self
    }

    /// Seconds until the access token expires, negative once expired, `None`
    /// without a known expiry.
    #[must_use]
    pub fn expires_in_seconds(&self, clock: &dyn Clock) -> Option<i64> {
        self.expiration_time_milliseconds
            .map(|exp| exp.saturating_sub(clock.now_millis()).div_euclid(1000))
    }

    /// True if the access token expires within `window` (or already has).
    ///
    /// Records without an expiry never need a refresh.
    #[must_use]
    pub fn needs_refresh(&self, clock: &dyn Clock, window: Duration) -> bool {
        let window = i64::try_from(window.as_secs()).unwrap_or(i64::MAX);
        self.expires_in_seconds(clock)
            .is_some_and(|remaining| remaining <= window)
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "expiration_time_milliseconds",
                &self.expiration_time_milliseconds,
            )
            .finish()
    }
}
