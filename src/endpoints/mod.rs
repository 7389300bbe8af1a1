//! Typed REST endpoints and the registry the dispatcher resolves them from.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Error;
use crate::request_context::RequestContext;

mod client_credentials;
mod get_user;
mod registry;

pub use client_credentials::{
    ClientCredentialsEndpoint, ClientCredentialsRequest, ClientCredentialsResponse,
    ClientCredentialsSource,
};
pub use get_user::{GameMode, GetUserEndpoint, GetUserRequest};
pub use registry::EndpointRegistry;

/// Every endpoint this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EndpointId {
    ClientCredentialsToken,
    GetUser,
}

impl EndpointId {
    pub const ALL: [EndpointId; 2] = [EndpointId::ClientCredentialsToken, EndpointId::GetUser];
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointId::ClientCredentialsToken => write!(f, "client_credentials_token"),
            EndpointId::GetUser => write!(f, "get_user"),
        }
    }
}

/// A constructed endpoint held by the registry.
#[derive(Clone)]
pub enum RegisteredEndpoint {
    ClientCredentialsToken(Arc<ClientCredentialsEndpoint>),
    GetUser(Arc<GetUserEndpoint>),
}

impl RegisteredEndpoint {
    /// Constructs the endpoint identified by `id`.
    pub fn build(id: EndpointId, ctx: &RequestContext) -> Result<Self, Error> {
        let registered = match id {
            EndpointId::ClientCredentialsToken => {
                Arc::new(ClientCredentialsEndpoint::new(ctx.clone())?).into_registered()
            }
            EndpointId::GetUser => Arc::new(GetUserEndpoint::new(ctx.clone())?).into_registered(),
        };
        Ok(registered)
    }

    pub fn id(&self) -> EndpointId {
        match self {
            RegisteredEndpoint::ClientCredentialsToken(_) => EndpointId::ClientCredentialsToken,
            RegisteredEndpoint::GetUser(_) => EndpointId::GetUser,
        }
    }
}

/// One REST resource: how to build it and how to call it.
#[async_trait]
pub trait Endpoint: Send + Sync + Sized + 'static {
    type Request: Send + 'static;
    type Response: Send + 'static;

    const ID: EndpointId;

    fn new(ctx: RequestContext) -> Result<Self, Error>;

    fn into_registered(self: Arc<Self>) -> RegisteredEndpoint;

    fn from_registered(registered: &RegisteredEndpoint) -> Option<Arc<Self>>;

    /// Rejects requests that cannot be sent, before any network call.
    fn validate(&self, _request: &Self::Request) -> Result<(), Error> {
        Ok(())
    }

    async fn request(
        &self,
        request: Self::Request,
        auth_token: Option<&str>,
    ) -> Result<Self::Response, Error>;
}
