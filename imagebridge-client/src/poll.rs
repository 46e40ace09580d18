//! Result polling
//!
//! The server exposes no push channel for job completion, so the client polls
//! the history endpoint. Each tick sleeps, then fetches; per-tick failures are
//! swallowed and the loop keeps going until the handle resolves, the tick
//! budget runs out, or the caller cancels.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::ComfyClient;
use imagebridge_core::domain::send::{PollOutcome, PromptId};

/// Polling parameters
///
/// Defaults to a fixed one-second interval with a sixty-tick budget. A
/// backoff factor above 1.0 stretches the interval after every tick, capped
/// at `max_interval`.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before each history fetch
    pub interval: Duration,
    /// Maximum number of history fetches before giving up
    pub ticks: u32,
    /// Multiplier applied to the interval after each tick; 1.0 keeps it fixed
    pub backoff_factor: f64,
    /// Upper bound on the interval once backoff is applied
    pub max_interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            ticks: 60,
            backoff_factor: 1.0,
            max_interval: Duration::from_secs(30),
        }
    }
}

impl PollConfig {
    /// Creates a fixed-interval configuration
    pub fn new(interval: Duration, ticks: u32) -> Self {
        Self {
            interval,
            ticks,
            ..Self::default()
        }
    }

    /// Sets the per-tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the tick budget
    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    /// Enables exponential backoff between ticks, capped at `max_interval`
    pub fn with_backoff(mut self, factor: f64, max_interval: Duration) -> Self {
        self.backoff_factor = factor;
        self.max_interval = max_interval;
        self
    }
}

impl ComfyClient {
    /// Poll until the job resolves or the tick budget runs out
    ///
    /// Equivalent to [`poll_result_with_cancel`](Self::poll_result_with_cancel)
    /// with a token that never fires.
    pub async fn poll_result(&self, prompt_id: &PromptId, config: &PollConfig) -> PollOutcome {
        self.poll_result_with_cancel(prompt_id, config, CancellationToken::new())
            .await
    }

    /// Poll until the job resolves, the tick budget runs out, or `cancel` fires
    ///
    /// Each tick sleeps for the configured interval, then fetches the history
    /// for the handle. Transport and decode failures on a tick are swallowed;
    /// the loop simply tries again on the next tick. Once the handle appears
    /// in the response the outcome is terminal either way: the first output
    /// record carrying an image payload wins, and a resolved job without one
    /// is reported as [`PollOutcome::NoImage`] without further polling.
    ///
    /// Cancellation is observed while sleeping; a cancelled token never
    /// triggers another fetch.
    pub async fn poll_result_with_cancel(
        &self,
        prompt_id: &PromptId,
        config: &PollConfig,
        cancel: CancellationToken,
    ) -> PollOutcome {
        let mut delay = config.interval;

        for tick in 1..=config.ticks {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(%prompt_id, tick, "poll cancelled");
                    return PollOutcome::Cancelled;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            match self.get_history(prompt_id).await {
                Ok(history) => {
                    if let Some(entry) = history.entry(prompt_id) {
                        return match entry.first_image_payload() {
                            Some(payload) => PollOutcome::Found(payload.to_string()),
                            None => PollOutcome::NoImage,
                        };
                    }
                    debug!(%prompt_id, tick, "job not resolved yet");
                }
                Err(e) => {
                    debug!(%prompt_id, tick, error = %e, "history fetch failed; will retry");
                }
            }

            if config.backoff_factor > 1.0 {
                delay = delay.mul_f64(config.backoff_factor).min(config.max_interval);
            }
        }

        PollOutcome::TimedOut
    }
}
