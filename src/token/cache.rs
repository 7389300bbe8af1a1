use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::errors::Error;
use crate::telemetry::refresh::RefreshTelemetry;

use super::envelope::TokenEnvelope;
use super::{Clock, ExpiryPolicy, SystemClock, TokenGrant, TokenSnapshot, TokenSource};

/// Serves a valid bearer token to any number of concurrent callers.
///
/// Validity checks take the shared read lock only. A refresh runs inside
/// `refresh_lock`, re-checks validity first, and publishes the new
/// token/expiry pair with a single write. A failed refresh leaves the
/// previous pair in place.
pub struct TokenCache {
    envelope: RwLock<Option<TokenEnvelope>>,
    refresh_lock: Mutex<()>,
    source: Arc<dyn TokenSource>,
    clock: Arc<dyn Clock>,
    policy: ExpiryPolicy,
}

impl TokenCache {
    pub fn new(source: Arc<dyn TokenSource>, policy: ExpiryPolicy) -> Self {
        Self::with_clock(source, policy, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn TokenSource>,
        policy: ExpiryPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            envelope: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            source,
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Returns the cached token, refreshing it first if it is absent or expired.
    pub async fn get(&self) -> Result<String, Error> {
        if let Some(token) = self.valid_token(self.clock.now()).await {
            return Ok(token);
        }

        // Only one refresh attempt should run at a time.
        let _refresh = self.refresh_lock.lock().await;
        if let Some(token) = self.valid_token(self.clock.now()).await {
            debug!("token refreshed by a concurrent caller");
            return Ok(token);
        }
        self.refresh_locked("token_cache.get").await
    }

    /// Contacts the authorization endpoint regardless of the cached state.
    pub async fn force_refresh(&self) -> Result<String, Error> {
        let _refresh = self.refresh_lock.lock().await;
        self.refresh_locked("token_cache.force_refresh").await
    }

    /// Current token and expiry, read as one value. Never triggers a refresh.
    pub async fn snapshot(&self) -> Option<TokenSnapshot> {
        self.envelope
            .read()
            .await
            .as_ref()
            .map(TokenEnvelope::to_snapshot)
    }

    async fn valid_token(&self, now: Instant) -> Option<String> {
        let envelope = self.envelope.read().await;
        envelope
            .as_ref()
            .filter(|env| self.policy.is_valid(env.expires_at(), now))
            .map(|env| env.value().to_owned())
    }

    /// Caller must hold `refresh_lock`.
    async fn refresh_locked(&self, context: &str) -> Result<String, Error> {
        let telemetry = RefreshTelemetry::new(context);
        let issued_at = self.clock.now();
        telemetry.emit_start();

        let (envelope, lifetime) = match self.issue(issued_at).await {
            Ok(issued) => issued,
            Err(err) => {
                telemetry.emit_failure(&err);
                return Err(err);
            }
        };
        let value = envelope.value().to_owned();
        *self.envelope.write().await = Some(envelope);
        telemetry.emit_success(lifetime);
        Ok(value)
    }

    async fn issue(&self, issued_at: Instant) -> Result<(TokenEnvelope, Duration), Error> {
        let grant = self.fetch_checked().await?;
        let lifetime = grant.expires_in;
        let envelope = TokenEnvelope::from_grant(grant, issued_at, &self.policy)?;
        Ok((envelope, lifetime))
    }

    async fn fetch_checked(&self) -> Result<TokenGrant, Error> {
        let grant = self.source.fetch().await?;
        if grant.access_token.is_empty() {
            return Err(Error::InvalidTokenResponse("empty access_token".into()));
        }
        if !grant.token_type.eq_ignore_ascii_case("bearer") {
            return Err(Error::UnsupportedTokenType(grant.token_type));
        }
        self.policy.check_lifetime(grant.expires_in)?;
        Ok(grant)
    }
}
