use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Error;

mod http;

pub use http::ReqwestTransport;

/// HTTP provider used by every endpoint.
///
/// Implementations must treat any status other than 200 as a failure and
/// return the raw response body on success.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET, attaching `Authorization: Bearer <token>` when a token is given.
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        bearer: Option<&str>,
    ) -> Result<String, Error>;

    /// Issues a POST with a JSON content type and the given literal body.
    async fn post(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
        bearer: Option<&str>,
    ) -> Result<String, Error>;
}
