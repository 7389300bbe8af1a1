use std::time::{Duration, Instant};

use crate::config::DEFAULT_TOKEN_MARGIN_SECS;
use crate::errors::Error;

/// Decides when a cached token stops being served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// Lead time subtracted from the server-declared lifetime.
    pub margin: Duration,
}

impl ExpiryPolicy {
    pub fn new(margin: Duration) -> Self {
        Self { margin }
    }

    /// Effective expiry of a token issued at `issued_at` with the given lifetime.
    ///
    /// Fails when the lifetime is too large to be represented as an `Instant`.
    pub fn expires_at(&self, issued_at: Instant, lifetime: Duration) -> Result<Instant, Error> {
        issued_at
            .checked_add(lifetime.saturating_sub(self.margin))
            .ok_or_else(|| {
                Error::InvalidTokenResponse(format!(
                    "expires_in of {}s is out of range",
                    lifetime.as_secs()
                ))
            })
    }

    /// Rejects lifetimes that would produce a token already inside its margin.
    pub fn check_lifetime(&self, lifetime: Duration) -> Result<(), Error> {
        if lifetime <= self.margin {
            return Err(Error::InvalidTokenResponse(format!(
                "expires_in of {}s does not exceed the {}s expiry margin",
                lifetime.as_secs(),
                self.margin.as_secs()
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self, expires_at: Instant, now: Instant) -> bool {
        now < expires_at
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TOKEN_MARGIN_SECS))
    }
}
