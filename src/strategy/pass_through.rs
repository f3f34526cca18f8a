use super::{Strategy, StrategyContext};
use crate::pipeline::PipeStream;

/// Identity strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

/// Create a [`PassThrough`] strategy.
pub const fn pass_through() -> PassThrough {
    PassThrough
}

impl Strategy for PassThrough {
    fn name(&self) -> &'static str {
        "pass_through"
    }

    fn apply(&self, input: PipeStream, _context: StrategyContext) -> PipeStream {
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::{queue_with, run, values};

    #[tokio::test]
    async fn test_pass_through_is_identity() {
        let queue = queue_with(&["Hello ", "World"], true);
        let items = run(&pass_through(), &queue, usize::MAX).await;
        assert_eq!(values(&items), vec!["Hello ", "World"]);
    }
}
