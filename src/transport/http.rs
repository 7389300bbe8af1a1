use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Proxy, RequestBuilder, StatusCode};
use tracing::{debug, warn};

use super::Transport;
use crate::errors::Error;

const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default [`Transport`] backed by a shared `reqwest::Client`.
///
/// Gzip-encoded responses are decoded transparently.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().gzip(true).build()?;
        Ok(Self { client })
    }

    /// Routes every request through the given proxy URL.
    pub fn with_proxy(proxy_url: &str) -> Result<Self, Error> {
        let proxy = Proxy::all(proxy_url)
            .map_err(|e| Error::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e)))?;
        let client = Client::builder().gzip(true).proxy(proxy).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn execute(&self, builder: RequestBuilder, url: &str) -> Result<String, Error> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status == StatusCode::OK {
            debug!("http ok: url='{}' bytes={}", url, body.len());
            Ok(body)
        } else {
            warn!("http request failed: status={} url='{}'", status, url);
            Err(Error::Http(status, body))
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        bearer: Option<&str>,
    ) -> Result<String, Error> {
        let builder = with_bearer(
            self.client
                .get(url)
                .timeout(timeout)
                .header(ACCEPT, "application/json")
                .header(USER_AGENT, CLIENT_USER_AGENT),
            bearer,
        );
        self.execute(builder, url).await
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
        bearer: Option<&str>,
    ) -> Result<String, Error> {
        let builder = with_bearer(
            self.client
                .post(url)
                .timeout(timeout)
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json")
                .header(USER_AGENT, CLIENT_USER_AGENT)
                .body(body.to_owned()),
            bearer,
        );
        self.execute(builder, url).await
    }
}

fn with_bearer(builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
    match bearer {
        Some(token) if !token.is_empty() => {
            builder.header(AUTHORIZATION, format!("Bearer {}", token))
        }
        _ => builder,
    }
}
