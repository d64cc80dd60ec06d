//! Retry with exponential backoff for collaborator calls
//!
//! A [`RetryPolicy`] is a small value object shared by every call site that
//! talks to an external collaborator. It decides how many attempts are made,
//! how long to wait between them, and which failures deserve another try.
//! What happens once the policy gives up is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! let policy = RetryPolicy::default(); // 3 attempts, 500ms, 1s
//! let text = policy
//!     .run("extract_claim", |_attempt| port.extract_claim(&document))
//!     .await?;
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::error::CoreError;
use crate::ports::PortError;

/// Default number of attempts, including the first one
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the second attempt
pub const DEFAULT_BASE_DELAY_MS: u64 = 500;

/// Default growth factor between consecutive delays
pub const DEFAULT_MULTIPLIER: u32 = 2;

/// Upper bound on attempts per collaborator call, first one included
pub const MAX_ATTEMPTS_LIMIT: u32 = 3;

/// Decides whether a failed attempt may be retried
pub type RetryClassifier = fn(&PortError) -> bool;

/// Outcome of a retry loop that did not produce a value
#[derive(Debug, Error)]
pub enum RetryError {
    /// Every permitted attempt failed with a retryable error
    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: PortError,
    },

    /// An attempt failed with an error the policy does not retry
    #[error("Non-retryable failure on attempt {attempt}: {error}")]
    Rejected {
        attempt: u32,
        #[source]
        error: PortError,
    },
}

impl RetryError {
    /// Number of attempts made before the loop stopped
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::Rejected { attempt, .. } => *attempt,
        }
    }

    /// The error reported by the final attempt
    pub fn port_error(&self) -> &PortError {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Rejected { error, .. } => error,
        }
    }

    /// Consumes the retry error, returning the final attempt's error
    pub fn into_port_error(self) -> PortError {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Rejected { error, .. } => error,
        }
    }
}

/// Bounded retry with exponential backoff
///
/// Delays grow geometrically: with the defaults the second attempt starts
/// 500ms after the first failure and the third 1s after the second.
/// The multiplier is at least 2, so successive delays strictly increase.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    multiplier: u32,
    classifier: RetryClassifier,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("multiplier", &self.multiplier)
            .finish()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            multiplier: DEFAULT_MULTIPLIER,
            classifier: PortError::is_transient,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy, rejecting settings that break the backoff contract
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if `max_attempts` is zero or above
    /// [`MAX_ATTEMPTS_LIMIT`], the base delay is zero, or the multiplier is
    /// below 2.
    pub fn new(max_attempts: u32, base_delay: Duration, multiplier: u32) -> Result<Self, CoreError> {
        if max_attempts == 0 {
            return Err(CoreError::configuration("max_attempts must be at least 1"));
        }
        if max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(CoreError::configuration(format!(
                "max_attempts must be at most {}, got {}",
                MAX_ATTEMPTS_LIMIT, max_attempts
            )));
        }
        if base_delay.is_zero() {
            return Err(CoreError::configuration("retry base delay must be non-zero"));
        }
        if multiplier < 2 {
            return Err(CoreError::configuration(format!(
                "retry multiplier must be at least 2, got {}",
                multiplier
            )));
        }

        Ok(Self {
            max_attempts,
            base_delay,
            multiplier,
            classifier: PortError::is_transient,
        })
    }

    /// Replaces the predicate deciding which failures are retried
    pub fn with_classifier(mut self, classifier: RetryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Maximum number of attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the second attempt
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns true if the policy would retry after this error
    pub fn is_retryable(&self, error: &PortError) -> bool {
        (self.classifier)(error)
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// All inter-attempt delays this policy can produce, in order
    pub fn schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts).map(|attempt| self.delay_after(attempt)).collect()
    }

    /// Runs `operation` until it succeeds, fails non-retryably, or the
    /// attempt budget is spent
    ///
    /// The closure receives the 1-based attempt number. No delay follows
    /// the final attempt. Backoff waits use `tokio::time::sleep`, so they
    /// only park the calling task and are cancelled with it.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut f: F) -> Result<T, RetryError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, PortError>>,
    {
        let mut attempt = 1;
        loop {
            match f(attempt).await {
                Ok(value) => {
                    debug!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        outcome = "success",
                        "Collaborator call succeeded"
                    );
                    return Ok(value);
                }
                Err(error) if !self.is_retryable(&error) => {
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        outcome = "rejected",
                        error_kind = error.kind(),
                        "Collaborator call failed with a non-retryable error: {error}"
                    );
                    return Err(RetryError::Rejected { attempt, error });
                }
                Err(error) if attempt >= self.max_attempts => {
                    error!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        outcome = "give_up",
                        error_kind = error.kind(),
                        "Collaborator call failed, no attempts left: {error}"
                    );
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: error,
                    });
                }
                Err(error) => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        outcome = "transient_failure",
                        error_kind = error.kind(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Collaborator call failed, retrying in {delay:?}: {error}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.base_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_schedule_has_one_gap_per_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.schedule(),
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
    }

    #[test]
    fn test_single_attempt_has_empty_schedule() {
        let policy = RetryPolicy::new(1, Duration::from_millis(10), 2).unwrap();
        assert!(policy.schedule().is_empty());
    }

    #[test]
    fn test_rejects_invalid_settings() {
        assert!(RetryPolicy::new(0, Duration::from_millis(10), 2).is_err());
        assert!(RetryPolicy::new(4, Duration::from_millis(10), 2).is_err());
        assert!(RetryPolicy::new(3, Duration::ZERO, 2).is_err());
        assert!(RetryPolicy::new(3, Duration::from_millis(10), 1).is_err());
    }
}
