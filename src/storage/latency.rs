//! Simulated network latency.
//!
//! Every service call waits before it resolves, so the page layer can show
//! its loading states. The wait is a per-call baseline (the delay the
//! dashboard has always used for that call) passed through a [`Latency`]
//! strategy. Tests inject [`NoLatency`]; demos keep [`NetworkLatency`].

use std::fmt::Debug;
use std::time::Duration;

/// Maps a call's baseline delay to the delay actually waited.
pub trait Latency: Send + Sync + Debug {
    fn delay_for(&self, baseline: Duration) -> Duration;
}

/// Upper bound on any scaled delay.
pub const MAX_SIMULATED_DELAY: Duration = Duration::from_secs(60 * 60);

/// Baseline delays scaled by a factor. `scale = 1.0` reproduces the baseline.
///
/// Scaled delays are capped at [`MAX_SIMULATED_DELAY`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkLatency {
    scale: f64,
}

impl NetworkLatency {
    /// Negative or non-finite factors are treated as zero.
    #[must_use]
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Self { scale }
    }
}

impl Default for NetworkLatency {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Latency for NetworkLatency {
    fn delay_for(&self, baseline: Duration) -> Duration {
        Duration::try_from_secs_f64(baseline.as_secs_f64() * self.scale)
            .map_or(MAX_SIMULATED_DELAY, |d| d.min(MAX_SIMULATED_DELAY))
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLatency;

impl Latency for NoLatency {
    fn delay_for(&self, _baseline: Duration) -> Duration {
        Duration::ZERO
    }
}

/// Same delay for every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLatency(pub Duration);

impl Latency for FixedLatency {
    fn delay_for(&self, _baseline: Duration) -> Duration {
        self.0
    }
}

/// Suspends the caller for the delay `latency` assigns to `baseline`.
pub async fn simulate(latency: &dyn Latency, baseline: Duration) {
    let delay = latency.delay_for(baseline);
    if delay.is_zero() {
        return;
    }
    tracing::trace!(delay_ms = delay.as_millis() as u64, "simulating network delay");
    tokio::time::sleep(delay).await;
}
