use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Error;

/// A freshly issued access token as reported by the authorization server.
#[derive(Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Duration,
}

impl TokenGrant {
    pub fn bearer(access_token: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Performs the network exchange that issues a new token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch(&self) -> Result<TokenGrant, Error>;
}
