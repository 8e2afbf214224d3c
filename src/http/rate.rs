use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Minimum-interval pacing for one dispatcher instance.
///
/// Owned by a single [`super::World`]; there is no shared clock, so parallel
/// scenarios each pace their own traffic independently.
#[derive(Debug)]
pub(crate) struct RateGate {
    min_interval: Duration,
    last: Option<Instant>,
}

impl RateGate {
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Suspends the caller until at least `min_interval` has elapsed since
    /// the previous [`RateGate::mark`]. Returns immediately when nothing has
    /// been marked yet.
    pub(crate) async fn wait(&self) {
        let Some(last) = self.last else {
            return;
        };
        let elapsed = last.elapsed();
        if let Some(remaining) = self.min_interval.checked_sub(elapsed) {
            if !remaining.is_zero() {
                trace!("Rate gate sleeping {:?}", remaining);
                tokio::time::sleep(remaining).await;
            }
        }
    }

    /// Records the completion of an exchange as the new pacing reference.
    pub(crate) fn mark(&mut self) {
        self.last = Some(Instant::now());
    }
}
