#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use osu_api::Error;
use osu_api::token::{TokenGrant, TokenSource};
use serde_json::json;

/// Token source that hands out `token-1`, `token-2`, ... and counts calls.
pub struct CountingSource {
    calls: AtomicUsize,
    lifetime: Duration,
    delay: Duration,
    failures: Mutex<VecDeque<Error>>,
}

impl CountingSource {
    pub fn new(lifetime: Duration) -> Arc<Self> {
        Self::with_delay(lifetime, Duration::ZERO)
    }

    pub fn with_delay(lifetime: Duration, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            lifetime,
            delay,
            failures: Mutex::new(VecDeque::new()),
        })
    }

    /// The next fetch fails with `err` instead of issuing a token.
    pub fn fail_next(&self, err: Error) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for CountingSource {
    async fn fetch(&self) -> Result<TokenGrant, Error> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(TokenGrant::bearer(format!("token-{}", n), self.lifetime))
    }
}

pub fn token_body(access_token: &str, expires_in: u64) -> String {
    json!({
        "token_type": "Bearer",
        "expires_in": expires_in,
        "access_token": access_token,
    })
    .to_string()
}

pub fn user_body(id: u64, username: &str) -> String {
    json!({
        "id": id,
        "username": username,
        "country_code": "AU",
        "is_online": false,
        "join_date": "2007-08-28T05:58:16+00:00",
        "statistics": {
            "level": {"current": 65, "progress": 20.0},
            "global_rank": null,
            "pp": 0.0,
            "grade_counts": {"ss": 1, "ssh": 0, "s": 2, "sh": 0, "a": 3},
            "rank": {"global": null, "country": null}
        },
        "unknown_future_field": {"nested": true}
    })
    .to_string()
}
