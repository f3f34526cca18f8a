use super::{Strategy, StrategyContext};
use crate::pipeline::PipeStream;
use futures::StreamExt;
use std::time::Duration;

/// Rewrites every item's latency to a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linear {
    interval: Duration,
}

/// Create a [`Linear`] strategy.
pub const fn linear(interval: Duration) -> Linear {
    Linear { interval }
}

impl Linear {
    /// The configured interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Strategy for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn apply(&self, input: PipeStream, _context: StrategyContext) -> PipeStream {
        let interval = self.interval;
        input
            .map(move |item| item.map(|item| item.with_latency(interval)))
            .boxed()
    }
}
