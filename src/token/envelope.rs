use std::fmt;
use std::time::{Duration, Instant};

use super::ExpiryPolicy;
use super::source::TokenGrant;
use crate::errors::Error;

/// Read-only copy of the cached token and its effective expiry.
#[derive(Clone)]
pub struct TokenSnapshot {
    pub value: String,
    pub token_type: String,
    pub issued_at: Instant,
    pub expires_at: Instant,
}

impl TokenSnapshot {
    /// Returns how long until the token expires relative to the provided time.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at.checked_duration_since(now)
    }
}

impl fmt::Debug for TokenSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSnapshot")
            .field("value", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A bearer token paired with the instant it stops being served.
///
/// The pair is only ever replaced as a whole.
#[derive(Clone)]
pub(crate) struct TokenEnvelope {
    value: String,
    token_type: String,
    issued_at: Instant,
    expires_at: Instant,
}

impl TokenEnvelope {
    pub(crate) fn from_grant(
        grant: TokenGrant,
        issued_at: Instant,
        policy: &ExpiryPolicy,
    ) -> Result<Self, Error> {
        let expires_at = policy.expires_at(issued_at, grant.expires_in)?;
        Ok(Self {
            value: grant.access_token,
            token_type: grant.token_type,
            issued_at,
            expires_at,
        })
    }

    /// Returns the raw token value suitable for Authorization headers.
    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub(crate) fn to_snapshot(&self) -> TokenSnapshot {
        TokenSnapshot {
            value: self.value.clone(),
            token_type: self.token_type.clone(),
            issued_at: self.issued_at,
            expires_at: self.expires_at,
        }
    }
}
