//! read client configuration from a file, the environment or a secret store

use std::fmt;
use std::path::Path;
use std::time::Duration;

use aws_config::BehaviorVersion;
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_BASE_URL: &str = "https://osu.ppy.sh";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_TOKEN_MARGIN_SECS: u64 = 5;

pub enum ConfigLocation {
    File(String),
    Env,
    Secret,
}

/// Credentials and tuning knobs for an [`OsuApi`](crate::OsuApi) instance.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub client_id: u64,
    pub client_secret: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_token_margin_secs")]
    pub token_margin_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_token_margin_secs() -> u64 {
    DEFAULT_TOKEN_MARGIN_SECS
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("token_margin_secs", &self.token_margin_secs)
            .finish()
    }
}

impl Config {
    pub fn from_values(
        client_id: u64,
        client_secret: impl Into<String>,
        base_url: Option<String>,
        request_timeout_ms: Option<u64>,
        token_margin_secs: Option<u64>,
    ) -> Self {
        Self {
            client_id,
            client_secret: client_secret.into(),
            base_url: base_url.unwrap_or_else(default_base_url),
            request_timeout_ms: request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            token_margin_secs: token_margin_secs.unwrap_or(DEFAULT_TOKEN_MARGIN_SECS),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// # ENV Vars
    /// * `OSU_CLIENT_ID` - numeric OAuth client id
    /// * `OSU_CLIENT_SECRET` - OAuth client secret
    /// * `OSU_BASE_URL` - optional, defaults to the production origin
    /// * `OSU_REQUEST_TIMEOUT_MS` - optional, defaults to 5000
    /// * `OSU_TOKEN_MARGIN_SECS` - optional, defaults to 5
    pub fn from_env() -> Result<Self, Error> {
        let client_id = required_env("OSU_CLIENT_ID")?;
        let client_id = client_id
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::Config(format!("Invalid OSU_CLIENT_ID: {}", e)))?;
        let client_secret = required_env("OSU_CLIENT_SECRET")?;
        let config = Self::from_values(
            client_id,
            client_secret,
            std::env::var("OSU_BASE_URL").ok(),
            optional_env_u64("OSU_REQUEST_TIMEOUT_MS")?,
            optional_env_u64("OSU_TOKEN_MARGIN_SECS")?,
        );
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn token_margin(&self) -> Duration {
        Duration::from_secs(self.token_margin_secs)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.client_secret.is_empty() {
            return Err(Error::Config("client_secret must not be empty".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::Config("request_timeout_ms must be > 0".into()));
        }
        Ok(())
    }
}

pub async fn read_config(loc: ConfigLocation) -> Result<Config, Error> {
    let config = match loc {
        ConfigLocation::File(path) => Config::from_file(path)?,
        ConfigLocation::Env => Config::from_env()?,
        ConfigLocation::Secret => read_config_from_secret().await?,
    };
    Ok(config)
}

fn required_env(name: &str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::Config(format!("Missing {} env var", name)))
}

fn optional_env_u64(name: &str) -> Result<Option<u64>, Error> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

async fn read_config_from_secret() -> Result<Config, Error> {
    let secret_arn = required_env("OSU_CONFIG_SECRET_ARN")?;
    let client = aws_sdk_secretsmanager::Client::new(
        &aws_config::load_defaults(BehaviorVersion::latest()).await,
    );
    let resp = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Config(format!("Failed to get secret: {}", e)))?;
    let secret = match resp.secret_string() {
        Some(s) => Ok(s),
        None => Err(Error::Config(
            "Failed to get secret string, returned None".to_string(),
        )),
    }?;
    Config::from_json(secret)
}
