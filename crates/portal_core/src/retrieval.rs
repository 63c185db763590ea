//! Metric-retrieval collaborator and the timeout/retry policy wrapped around it.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use shared::{
    domain::{Region, VegetationMetric},
    error::{ApiError, DomainError, ErrorCode},
};
use thiserror::Error;
use tracing::warn;

pub const RETRIEVAL_FAILED_MESSAGE: &str = "Failed to fetch data, please try again";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(250);
const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetrievalError {
    #[error("metric transport failure: {0}")]
    Transport(String),
    #[error("metric retrieval timed out after {0:?}")]
    Timeout(Duration),
    #[error("retriever returned an invalid metric: {0}")]
    InvalidMetric(#[from] DomainError),
    #[error("metric retrieval aborted: {0}")]
    Internal(String),
}

impl RetrievalError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RetrievalError::Transport(_) | RetrievalError::Timeout(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RetrievalError::Transport(_) => ErrorCode::Transport,
            RetrievalError::Timeout(_) => ErrorCode::Timeout,
            RetrievalError::InvalidMetric(_) => ErrorCode::InvalidMetric,
            RetrievalError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// What the view shows; the underlying cause only goes to the log.
    pub fn user_message(&self) -> &'static str {
        RETRIEVAL_FAILED_MESSAGE
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.code(), self.user_message())
    }
}

#[async_trait]
pub trait MetricRetriever: Send + Sync {
    async fn fetch_metric(&self, region: &Region) -> Result<VegetationMetric, RetrievalError>;
}

/// Stand-in backend: waits a fixed delay, then draws a uniform value.
#[derive(Debug, Clone)]
pub struct SimulatedRetriever {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedRetriever {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure_rate: 0.0,
        }
    }

    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        self
    }
}

impl Default for SimulatedRetriever {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

#[async_trait]
impl MetricRetriever for SimulatedRetriever {
    async fn fetch_metric(&self, region: &Region) -> Result<VegetationMetric, RetrievalError> {
        tokio::time::sleep(self.delay).await;

        let (fail, value) = {
            let mut rng = rand::rng();
            (rng.random_bool(self.failure_rate), rng.random::<f64>())
        };
        if fail {
            return Err(RetrievalError::Transport(format!(
                "simulated outage for region of {} points",
                region.len()
            )));
        }
        Ok(VegetationMetric::new(value)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn no_retry(timeout: Duration) -> Self {
        Self {
            timeout,
            max_attempts: 1,
            retry_delay: Duration::ZERO,
        }
    }
}

/// Runs `fetch_metric` with a per-attempt timeout, retrying transport
/// failures and timeouts until `max_attempts` is used up.
pub async fn fetch_with_policy(
    retriever: &dyn MetricRetriever,
    region: &Region,
    policy: &RetryPolicy,
) -> Result<VegetationMetric, RetrievalError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let outcome = match tokio::time::timeout(policy.timeout, retriever.fetch_metric(region))
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(RetrievalError::Timeout(policy.timeout)),
        };

        match outcome {
            Ok(metric) => return Ok(metric),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                warn!(attempt, max_attempts, "metric retrieval failed, retrying: {err}");
                tokio::time::sleep(policy.retry_delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
#[path = "tests/retrieval_tests.rs"]
mod tests;
