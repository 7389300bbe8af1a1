use std::sync::Arc;

use crate::endpoints::EndpointRegistry;
use crate::request_context::RequestContext;
use crate::token::TokenCache;

mod builder;
mod impls;

pub use builder::OsuApiBuilder;

/// osu! API version spoken by this client.
pub const API_VERSION: u8 = 2;

/// Entry point for calling the API.
///
/// Endpoints must be registered (at build time or later through
/// `register_endpoint`) before they can be requested. Clones share the
/// registry and the token cache; separately built instances share nothing.
#[derive(Clone)]
pub struct OsuApi {
    ctx: RequestContext,
    registry: Arc<EndpointRegistry>,
    tokens: Arc<TokenCache>,
}
