//! Delay scheduler: the terminal stage that turns latencies into time.
//!
//! Each item's latency is honored *before the next item* rather than after
//! itself, so the first piece is never delayed and the last piece's
//! latency is dropped.

use super::PipeStream;
use crate::error::Result;
use futures::stream::{BoxStream, StreamExt};
use std::time::Duration;
use tracing::trace;

/// Suspend for carried latencies and yield the text of each item.
pub fn schedule(input: PipeStream) -> BoxStream<'static, Result<String>> {
    async_stream::try_stream! {
        let mut carried = Duration::ZERO;
        for await item in input {
            let item = item?;
            if !carried.is_zero() {
                trace!(delay_ms = carried.as_millis(), "honoring latency");
                tokio::time::sleep(carried).await;
            }
            carried = item.latency;
            yield item.value;
        }
    }
    .boxed()
}
