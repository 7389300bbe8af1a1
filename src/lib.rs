//! Client for the osu! API v2.
//!
//! Requests go through typed endpoints registered on an [`OsuApi`]. Each
//! request carries a bearer token obtained with the OAuth2 client-credentials
//! grant and cached until shortly before it expires.

mod client;
pub mod codec;
pub mod config;
pub mod endpoints;
pub mod errors;
mod request_context;
pub mod telemetry;
pub mod token;
pub mod transport;
pub mod types;

pub use client::{API_VERSION, OsuApi, OsuApiBuilder};
pub use codec::{JsonCodec, SerdeJsonCodec};
pub use config::{Config, ConfigLocation, read_config};
pub use endpoints::{
    Endpoint, EndpointId, GameMode, GetUserEndpoint, GetUserRequest, RegisteredEndpoint,
};
pub use errors::Error;
pub use request_context::RequestContext;
pub use token::{TokenCache, TokenSnapshot};
pub use transport::{ReqwestTransport, Transport};
pub use types::UserProfile;

#[cfg(test)]
mod tests;
