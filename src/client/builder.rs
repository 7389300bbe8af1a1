use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::OsuApi;
use crate::codec::{JsonCodec, SerdeJsonCodec};
use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_TOKEN_MARGIN_SECS};
use crate::endpoints::{ClientCredentialsSource, EndpointId, EndpointRegistry, RegisteredEndpoint};
use crate::errors::Error;
use crate::request_context::RequestContext;
use crate::token::{Clock, ExpiryPolicy, SystemClock, TokenCache, TokenSource};
use crate::transport::{ReqwestTransport, Transport};

/// Builder for [`OsuApi`]. Only the client id and secret are required.
pub struct OsuApiBuilder {
    client_id: u64,
    client_secret: String,
    base_url: String,
    request_timeout: Duration,
    expiry_margin: Duration,
    transport: Option<Arc<dyn Transport>>,
    codec: Option<Arc<dyn JsonCodec>>,
    clock: Option<Arc<dyn Clock>>,
    token_source: Option<Arc<dyn TokenSource>>,
    endpoints: Vec<EndpointId>,
}

impl fmt::Debug for OsuApiBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsuApiBuilder")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("expiry_margin", &self.expiry_margin)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl OsuApiBuilder {
    pub fn new(client_id: u64, client_secret: impl Into<String>) -> Self {
        Self {
            client_id,
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            expiry_margin: Duration::from_secs(DEFAULT_TOKEN_MARGIN_SECS),
            transport: None,
            codec: None,
            clock: None,
            token_source: None,
            endpoints: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.client_id, config.client_secret.clone())
            .base_url(config.base_url.clone())
            .request_timeout(config.request_timeout())
            .expiry_margin(config.token_margin())
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Lead time subtracted from each token's declared lifetime.
    pub fn expiry_margin(mut self, margin: Duration) -> Self {
        self.expiry_margin = margin;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replaces the client-credentials exchange used to refresh tokens.
    pub fn token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Registers `id` when the client is built.
    pub fn endpoint(mut self, id: EndpointId) -> Self {
        if !self.endpoints.contains(&id) {
            self.endpoints.push(id);
        }
        self
    }

    pub fn build(self) -> Result<OsuApi, Error> {
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request timeout must be > 0".into()));
        }
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let codec = self.codec.unwrap_or_else(|| Arc::new(SerdeJsonCodec));
        let ctx = RequestContext::build(&self.base_url, transport, codec, self.request_timeout)?;

        let source = match self.token_source {
            Some(source) => source,
            None => Arc::new(ClientCredentialsSource::new(
                ctx.clone(),
                self.client_id,
                self.client_secret,
            )),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let tokens = TokenCache::with_clock(source, ExpiryPolicy::new(self.expiry_margin), clock);

        let endpoints = self
            .endpoints
            .iter()
            .map(|id| {
                RegisteredEndpoint::build(*id, &ctx)
                    .map_err(|e| Error::EndpointRegistration(*id, e.to_string()))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        info!(
            "osu api client built: base_url='{}' endpoints={:?}",
            ctx.base_url(),
            self.endpoints
        );

        Ok(OsuApi {
            ctx,
            registry: Arc::new(EndpointRegistry::from_endpoints(endpoints)),
            tokens: Arc::new(tokens),
        })
    }
}
