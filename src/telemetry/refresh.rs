use std::time::Duration;

use jiff::Timestamp;
use tracing::{Level, event};
use uuid::Uuid;

use crate::errors::Error;

/// Structured events for one token refresh attempt.
///
/// Token values are never recorded.
#[derive(Clone, Debug)]
pub struct RefreshTelemetry {
    attempt_id: Uuid,
    context: String,
}

impl RefreshTelemetry {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            context: context.into(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn emit_start(&self) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %Timestamp::now(),
            "refresh.start"
        );
    }

    pub fn emit_success(&self, lifetime: Duration) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %Timestamp::now(),
            expires_in_secs = lifetime.as_secs(),
            "refresh.success"
        );
    }

    pub fn emit_failure(&self, error: &Error) {
        event!(
            Level::ERROR,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %Timestamp::now(),
            error = %error,
            "refresh.failure"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_support::{capture_logs, drain_logs};

    #[test]
    fn events_share_the_attempt_id() {
        let telemetry = RefreshTelemetry::new("token_cache.get");
        let (lines, guard) = capture_logs();
        telemetry.emit_start();
        telemetry.emit_success(Duration::from_secs(86_400));
        drop(guard);

        let attempt = telemetry.attempt_id().to_string();
        let logs: Vec<String> = drain_logs(lines)
            .into_iter()
            .filter(|line| line.contains("refresh."))
            .collect();
        assert_eq!(logs.len(), 2, "{:?}", logs);
        for line in &logs {
            assert!(line.contains(&attempt), "missing attempt id: {}", line);
            assert!(line.contains(telemetry.context()), "missing context: {}", line);
        }
        assert!(logs[1].contains("expires_in_secs=86400"));
    }

    #[test]
    fn separate_attempts_get_distinct_ids() {
        let first = RefreshTelemetry::new("a");
        let second = RefreshTelemetry::new("a");
        assert_ne!(first.attempt_id(), second.attempt_id());
    }
}
