use reqwest::StatusCode;
use thiserror::Error;

use crate::endpoints::EndpointId;

/// Errors surfaced by the API client.
///
/// Secret values (client secret, access tokens) are never part of the
/// rendered message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a status other than 200.
    #[error("HTTP response code: {0}: {1}")]
    Http(StatusCode, String),

    /// Failure reported by a caller-supplied [`Transport`](crate::Transport).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    #[error("endpoint not registered: {0}")]
    EndpointNotRegistered(EndpointId),

    #[error("endpoint registration failed for {0}: {1}")]
    EndpointRegistration(EndpointId, String),

    /// The request was rejected before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status for [`Error::Http`], if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(status, _) => Some(*status),
            Error::Reqwest(err) => err.status(),
            _ => None,
        }
    }

    /// `true` when the server answered 404, which for most endpoints means the
    /// requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
