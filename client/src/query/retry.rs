//! [`Retry`] policy of failed fetches.

use std::{fmt, future::Future, time::Duration};

use smart_default::SmartDefault;
use tracing as log;

/// Policy of retrying failed fetches with an exponential backoff.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Retry {
    /// Number of retries after the initial attempt.
    #[default(3)]
    pub retries: u32,

    /// Delay before the first retry, doubled for each next one.
    #[default(Duration::from_secs(1))]
    pub base_delay: Duration,

    /// Upper bound of a delay.
    #[default(Duration::from_secs(30))]
    pub max_delay: Duration,
}

impl Retry {
    /// [`Retry`] policy failing on the first error.
    pub const NEVER: Self = Self {
        retries: 0,
        base_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    };

    /// Returns the delay before the provided 0-based `retry`.
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(retry))
            .min(self.max_delay)
    }

    /// Runs the provided `attempt` until it succeeds or the retries are
    /// exhausted, returning the last error in the latter case.
    ///
    /// # Errors
    ///
    /// Errors with the error of the last attempt.
    pub async fn run<F, Fut, T, E>(&self, mut attempt: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut retry = 0;
        loop {
            match attempt().await {
                Ok(ok) => return Ok(ok),
                Err(e) if retry < self.retries => {
                    let delay = self.delay(retry);
                    log::warn!(
                        "attempt {} failed, retrying in {delay:?}: {e}",
                        retry + 1,
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
