//! Pipeline source: turns the queue's fragments into pipe items.

use super::{PipeItem, PipeStream};
use crate::queue::Queue;
use futures::StreamExt;

/// One [`PipeItem`] per fragment, offset 0, latency 0.
pub fn pipe_source(queue: &Queue) -> PipeStream {
    queue
        .fragments()
        .map(|fragment| fragment.map(PipeItem::from_fragment))
        .boxed()
}
