use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Endpoint, EndpointId, RegisteredEndpoint};
use crate::codec::{from_json, to_json};
use crate::errors::Error;
use crate::request_context::RequestContext;
use crate::token::{TokenGrant, TokenSource};

const TOKEN_PATH: &str = "/oauth/token";

/// OAuth2 client-credentials grant: `POST <base_url>/oauth/token`.
pub struct ClientCredentialsEndpoint {
    ctx: RequestContext,
    url: String,
}

#[derive(Clone, Serialize)]
pub struct ClientCredentialsRequest {
    pub client_id: u64,
    pub client_secret: String,
    pub grant_type: &'static str,
    pub scope: &'static str,
}

impl ClientCredentialsRequest {
    pub fn new(client_id: u64, client_secret: impl Into<String>) -> Self {
        Self {
            client_id,
            client_secret: client_secret.into(),
            grant_type: "client_credentials",
            scope: "public",
        }
    }
}

impl fmt::Debug for ClientCredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct ClientCredentialsResponse {
    #[serde(default)]
    pub token_type: String,
    pub expires_in: u64,
    pub access_token: String,
}

impl fmt::Debug for ClientCredentialsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl From<ClientCredentialsResponse> for TokenGrant {
    fn from(resp: ClientCredentialsResponse) -> Self {
        TokenGrant {
            access_token: resp.access_token,
            token_type: resp.token_type,
            expires_in: Duration::from_secs(resp.expires_in),
        }
    }
}

#[async_trait]
impl Endpoint for ClientCredentialsEndpoint {
    type Request = ClientCredentialsRequest;
    type Response = ClientCredentialsResponse;

    const ID: EndpointId = EndpointId::ClientCredentialsToken;

    fn new(ctx: RequestContext) -> Result<Self, Error> {
        let url = ctx.url(TOKEN_PATH);
        Ok(Self { ctx, url })
    }

    fn into_registered(self: Arc<Self>) -> RegisteredEndpoint {
        RegisteredEndpoint::ClientCredentialsToken(self)
    }

    fn from_registered(registered: &RegisteredEndpoint) -> Option<Arc<Self>> {
        match registered {
            RegisteredEndpoint::ClientCredentialsToken(endpoint) => Some(Arc::clone(endpoint)),
            _ => None,
        }
    }

    // The grant authenticates with the request body, never a bearer token.
    async fn request(
        &self,
        request: Self::Request,
        _auth_token: Option<&str>,
    ) -> Result<Self::Response, Error> {
        let body = to_json(self.ctx.codec(), &request)?;
        let text = self
            .ctx
            .transport()
            .post(&self.url, &body, self.ctx.timeout(), None)
            .await?;
        let response: ClientCredentialsResponse = from_json(self.ctx.codec(), &text)?;
        info!(
            "client credentials token acquired: type='{}' expires_in={}",
            response.token_type, response.expires_in
        );
        Ok(response)
    }
}

/// [`TokenSource`] that exchanges the configured client id and secret.
pub struct ClientCredentialsSource {
    endpoint: ClientCredentialsEndpoint,
    client_id: u64,
    client_secret: String,
}

impl ClientCredentialsSource {
    pub fn new(ctx: RequestContext, client_id: u64, client_secret: impl Into<String>) -> Self {
        let url = ctx.url(TOKEN_PATH);
        Self {
            endpoint: ClientCredentialsEndpoint { ctx, url },
            client_id,
            client_secret: client_secret.into(),
        }
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsSource {
    async fn fetch(&self) -> Result<TokenGrant, Error> {
        let request = ClientCredentialsRequest::new(self.client_id, self.client_secret.clone());
        let response = self.endpoint.request(request, None).await?;
        Ok(response.into())
    }
}
