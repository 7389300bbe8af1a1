use tracing::{debug, info};

use super::{API_VERSION, OsuApi, OsuApiBuilder};
use crate::config::Config;
use crate::endpoints::{Endpoint, EndpointId, RegisteredEndpoint};
use crate::errors::Error;
use crate::token::{TokenCache, TokenSnapshot};

impl OsuApi {
    /// Create a client from explicit configuration, typically loaded via
    /// `Config::from_file` or `Config::from_env`. No endpoints are registered.
    pub fn new(config: &Config) -> Result<Self, Error> {
        OsuApiBuilder::from_config(config).build()
    }

    pub fn builder(client_id: u64, client_secret: impl Into<String>) -> OsuApiBuilder {
        OsuApiBuilder::new(client_id, client_secret)
    }

    pub fn version(&self) -> u8 {
        API_VERSION
    }

    pub fn base_url(&self) -> &str {
        self.ctx.base_url()
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.tokens
    }

    /// Constructs the endpoint for `id` and makes it available to [`OsuApi::request`].
    pub async fn register_endpoint(&self, id: EndpointId) -> Result<(), Error> {
        let endpoint = RegisteredEndpoint::build(id, &self.ctx)
            .map_err(|e| Error::EndpointRegistration(id, e.to_string()))?;
        if self.registry.insert(endpoint).await.is_some() {
            debug!("endpoint re-registered: {}", id);
        } else {
            info!("endpoint registered: {}", id);
        }
        Ok(())
    }

    pub async fn register<E: Endpoint>(&self) -> Result<(), Error> {
        self.register_endpoint(E::ID).await
    }

    pub async fn registered_endpoints(&self) -> Vec<EndpointId> {
        self.registry.ids().await
    }

    /// Makes a request through a registered endpoint.
    ///
    /// Fails with [`Error::EndpointNotRegistered`] if `E` was never registered
    /// and with [`Error::InvalidRequest`] if the request cannot be sent; neither
    /// case touches the network. A 404 from the server usually means the
    /// requested entity does not exist (see [`Error::is_not_found`]).
    pub async fn request<E: Endpoint>(&self, request: E::Request) -> Result<E::Response, Error> {
        let endpoint = self
            .registry
            .get(E::ID)
            .await
            .as_ref()
            .and_then(E::from_registered)
            .ok_or(Error::EndpointNotRegistered(E::ID))?;
        endpoint.validate(&request)?;
        let token = self.tokens.get().await?;
        endpoint.request(request, Some(&token)).await
    }

    /// Returns a currently valid token, refreshing it lazily.
    pub async fn auth_token(&self) -> Result<String, Error> {
        self.tokens.get().await
    }

    /// Unconditionally obtains a new token. Usually unnecessary: the cache
    /// refreshes on its own when a token expires.
    pub async fn regenerate_auth_token(&self) -> Result<String, Error> {
        self.tokens.force_refresh().await
    }

    pub async fn token_snapshot(&self) -> Option<TokenSnapshot> {
        self.tokens.snapshot().await
    }
}
