//! Retry support for provider lookups
//!
//! Wraps fallible async operations with exponential backoff and jitter.
//! Only errors that report themselves as retryable are retried; terminal
//! failures such as an unknown location fail on the first attempt.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::retry::{RetryConfig, with_retry};
//!
//! let config = RetryConfig::default();
//! let result = with_retry(&config, "geocode", || async {
//!     maps_client.geocode(&query).await
//! }).await;
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for retry behavior with exponential backoff
///
/// The default makes a single attempt. Retries are opt-in because every
/// extra provider call eats into the pipeline deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts (default: 1, meaning no retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff before the first retry in milliseconds (default: 200ms)
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff between retries in milliseconds (default: 2000ms)
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,

    /// Whether to add jitter to backoff delays (default: true)
    #[serde(default = "default_true")]
    pub jitter_enabled: bool,
}

const fn default_max_attempts() -> u32 {
    1
}

const fn default_initial_backoff() -> u64 {
    200
}

const fn default_max_backoff() -> u64 {
    2_000
}

const fn default_true() -> bool {
    true
}

/// Jitter applied to each backoff delay, as a fraction of the delay
const JITTER_FACTOR: f64 = 0.1;

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            jitter_enabled: default_true(),
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration with custom parameters
    #[must_use]
    pub const fn new(max_attempts: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_attempts,
            initial_backoff_ms,
            max_backoff_ms,
            jitter_enabled: true,
        }
    }

    /// Disable jitter for deterministic delays
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_enabled = false;
        self
    }

    /// Calculate the backoff before a given retry (0-indexed)
    ///
    /// Doubles the initial backoff per retry, capped at `max_backoff_ms`,
    /// with optional jitter to avoid synchronized retry storms.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn backoff_for_retry(&self, retry: u32) -> Duration {
        let base = (self.initial_backoff_ms as f64) * 2f64.powi(retry as i32);
        let capped = base.min(self.max_backoff_ms as f64);

        let final_backoff = if self.jitter_enabled {
            let jitter_range = capped * JITTER_FACTOR;
            let jitter = rand::rng().random_range(-jitter_range..=jitter_range);
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_backoff as u64)
    }

    /// Check the configuration for invalid values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("retry max_attempts must be at least 1".to_string());
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(format!(
                "retry max_backoff_ms ({}) must be >= initial_backoff_ms ({})",
                self.max_backoff_ms, self.initial_backoff_ms
            ));
        }
        Ok(())
    }
}

/// Trait for errors that can be checked for retryability
pub trait Retryable {
    /// Returns true if retrying the same call could plausibly succeed
    fn is_retryable(&self) -> bool;
}

impl Retryable for application::PipelineError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

impl Retryable for integration_maps::MapsError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

impl Retryable for integration_transit::TransitError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

/// Retry result containing the final outcome plus attempt metadata
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The result of the final attempt
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries)
    pub attempts: u32,
    /// Total time spent including backoff delays
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    /// Check if the operation succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Convert to a standard Result, discarding metadata
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Execute an async operation, retrying retryable failures
///
/// Makes up to `config.max_attempts` calls, sleeping with exponential
/// backoff between them. Non-retryable errors are returned immediately.
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    op_name: &str,
    mut operation: F,
) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let start = std::time::Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let result = operation().await;

        match result {
            Ok(value) => {
                if attempts > 1 {
                    debug!(
                        operation = op_name,
                        attempts = attempts,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "operation succeeded after retries"
                    );
                }
                return RetryResult {
                    result: Ok(value),
                    attempts,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) => {
                if !err.is_retryable() {
                    debug!(
                        operation = op_name,
                        attempts = attempts,
                        error = %err,
                        "operation failed with non-retryable error"
                    );
                    return RetryResult {
                        result: Err(err),
                        attempts,
                        total_duration: start.elapsed(),
                    };
                }

                if attempts >= config.max_attempts {
                    if attempts > 1 {
                        warn!(
                            operation = op_name,
                            attempts = attempts,
                            error = %err,
                            "operation failed after exhausting retries"
                        );
                    }
                    return RetryResult {
                        result: Err(err),
                        attempts,
                        total_duration: start.elapsed(),
                    };
                }

                let backoff = config.backoff_for_retry(attempts - 1);
                warn!(
                    operation = op_name,
                    attempt = attempts,
                    max_attempts = config.max_attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "operation failed, retrying"
                );

                tokio::time::sleep(backoff).await;
            },
        }
    }
}
