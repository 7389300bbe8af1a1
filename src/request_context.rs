use std::sync::Arc;
use std::time::Duration;

use crate::codec::JsonCodec;
use crate::errors::Error;
use crate::transport::Transport;

/// Shared collaborators handed to every endpoint at construction.
#[derive(Clone)]
pub struct RequestContext {
    base_url: String,
    transport: Arc<dyn Transport>,
    codec: Arc<dyn JsonCodec>,
    timeout: Duration,
}

impl RequestContext {
    /// Normalizes and validates `base_url` before any network call.
    pub fn build(
        base_url: &str,
        transport: Arc<dyn Transport>,
        codec: Arc<dyn JsonCodec>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            base_url,
            transport,
            codec,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` (which must start with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn codec(&self) -> &dyn JsonCodec {
        self.codec.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn normalize_base_url(raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim().trim_end_matches('/');
    let base = if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let parsed = reqwest::Url::parse(&base)
        .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", raw, e)))?;
    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Err(Error::Config(format!("Invalid base URL '{}': missing host", raw)));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(
            normalize_base_url("https://osu.ppy.sh/").unwrap(),
            "https://osu.ppy.sh"
        );
    }

    #[test]
    fn scheme_is_added_when_missing() {
        assert_eq!(
            normalize_base_url("osu.ppy.sh").unwrap(),
            "https://osu.ppy.sh"
        );
    }

    #[test]
    fn garbage_is_rejected() {
        let err = normalize_base_url("http://").unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("Invalid base URL")));
    }
}
