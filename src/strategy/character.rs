use super::{Strategy, StrategyContext};
use crate::pipeline::PipeStream;
use futures::StreamExt;
use unicode_segmentation::UnicodeSegmentation;

/// Splits items into single characters (extended grapheme clusters),
/// keeping each item's latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToCharacter;

/// Create a [`ToCharacter`] strategy.
pub const fn to_character() -> ToCharacter {
    ToCharacter
}

impl Strategy for ToCharacter {
    fn name(&self) -> &'static str {
        "to_character"
    }

    fn apply(&self, input: PipeStream, _context: StrategyContext) -> PipeStream {
        async_stream::try_stream! {
            for await item in input {
                let item = item?;
                for (at, grapheme) in item.value.grapheme_indices(true) {
                    yield item.piece(grapheme, item.offset + at, item.latency);
                }
            }
        }
        .boxed()
    }
}
