use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Endpoint, EndpointId, RegisteredEndpoint};
use crate::codec::from_json;
use crate::errors::Error;
use crate::request_context::RequestContext;
use crate::types::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Fruits,
    Mania,
    Osu,
    Taiko,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Fruits => "fruits",
            GameMode::Mania => "mania",
            GameMode::Osu => "osu",
            GameMode::Taiko => "taiko",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a user by numeric id or by name. The id wins when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserRequest {
    pub user_id: Option<u64>,
    pub username: Option<String>,
    pub mode: Option<GameMode>,
}

impl GetUserRequest {
    pub fn by_id(user_id: u64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);
        self
    }

    fn lookup(&self) -> Option<UserLookup<'_>> {
        if let Some(id) = self.user_id.filter(|id| *id >= 1) {
            return Some(UserLookup::Id(id));
        }
        self.username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(UserLookup::Username)
    }
}

enum UserLookup<'a> {
    Id(u64),
    Username(&'a str),
}

/// `GET /api/v2/users/{user}/{mode?}?key={id|username}`
pub struct GetUserEndpoint {
    ctx: RequestContext,
    users_url: String,
}

impl GetUserEndpoint {
    /// Builds the request URL, rejecting requests that identify no user.
    pub fn url_for(&self, request: &GetUserRequest) -> Result<String, Error> {
        let (segment, key) = match request.lookup() {
            Some(UserLookup::Id(id)) => (id.to_string(), "id"),
            Some(UserLookup::Username(name)) => (urlencoding::encode(name).into_owned(), "username"),
            None => {
                return Err(Error::InvalidRequest(
                    "get_user requires a user id >= 1 or a non-empty username".into(),
                ));
            }
        };
        let url = match request.mode {
            Some(mode) => format!("{}/{}/{}?key={}", self.users_url, segment, mode, key),
            None => format!("{}/{}?key={}", self.users_url, segment, key),
        };
        Ok(url)
    }
}

#[async_trait]
impl Endpoint for GetUserEndpoint {
    type Request = GetUserRequest;
    type Response = UserProfile;

    const ID: EndpointId = EndpointId::GetUser;

    fn new(ctx: RequestContext) -> Result<Self, Error> {
        let users_url = ctx.url("/api/v2/users");
        Ok(Self { ctx, users_url })
    }

    fn into_registered(self: Arc<Self>) -> RegisteredEndpoint {
        RegisteredEndpoint::GetUser(self)
    }

    fn from_registered(registered: &RegisteredEndpoint) -> Option<Arc<Self>> {
        match registered {
            RegisteredEndpoint::GetUser(endpoint) => Some(Arc::clone(endpoint)),
            _ => None,
        }
    }

    fn validate(&self, request: &Self::Request) -> Result<(), Error> {
        self.url_for(request).map(|_| ())
    }

    async fn request(
        &self,
        request: Self::Request,
        auth_token: Option<&str>,
    ) -> Result<Self::Response, Error> {
        let url = self.url_for(&request)?;
        debug!("get user: url='{}'", url);
        let text = self
            .ctx
            .transport()
            .get(&url, self.ctx.timeout(), auth_token)
            .await?;
        from_json(self.ctx.codec(), &text)
    }
}
