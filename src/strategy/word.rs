//! Word splitting with a pluggable segmentation capability.

use super::{Strategy, StrategyContext};
use crate::error::{Result, TypewriterError};
use crate::pipeline::PipeStream;
use futures::StreamExt;
use std::fmt;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Splits a string into ordered pieces whose concatenation is the input.
pub trait Segment: Send + Sync {
    /// Segment `text`.
    fn segment(&self, text: &str) -> Vec<String>;
}

impl<F> Segment for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn segment(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Default segmenter using Unicode (UAX #29) word boundaries.
///
/// The locale is recorded for diagnostics only. Languages without spaces
/// between words (Chinese, Japanese, Thai) come out one ideograph at a
/// time; inject a dictionary-based [`Segment`] for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeWordSegmenter {
    locale: String,
}

impl UnicodeWordSegmenter {
    /// Create a segmenter for `locale`.
    ///
    /// The identifier must be non-empty and made of ASCII letters, digits,
    /// `-` or `_` (e.g. `en`, `zh-Hans`).
    pub fn new(locale: impl Into<String>) -> Result<Self> {
        let locale = locale.into();
        let well_formed = !locale.is_empty()
            && locale
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(TypewriterError::invalid_config(format!(
                "invalid locale identifier {locale:?}"
            )));
        }
        Ok(Self { locale })
    }

    /// The configured locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Segment for UnicodeWordSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_word_bounds().map(str::to_string).collect()
    }
}

/// How [`ToWord`] segments text.
#[derive(Clone)]
pub enum ToWordOptions {
    /// Built-in Unicode word boundaries for a locale.
    Locale(String),
    /// Caller-provided segmentation.
    Segment(Arc<dyn Segment>),
}

impl ToWordOptions {
    /// Wrap a segmentation function.
    pub fn segment<F>(segment: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self::Segment(Arc::new(segment))
    }
}

impl fmt::Debug for ToWordOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locale(locale) => f.debug_tuple("Locale").field(locale).finish(),
            Self::Segment(_) => f.write_str("Segment(..)"),
        }
    }
}

/// Splits items into word segments, keeping each item's latency.
#[derive(Clone)]
pub struct ToWord {
    segmenter: Arc<dyn Segment>,
    label: String,
}

/// Create a [`ToWord`] strategy.
///
/// Fails with [`TypewriterError::InvalidConfig`] on a malformed locale.
pub fn to_word(options: ToWordOptions) -> Result<ToWord> {
    let (segmenter, label): (Arc<dyn Segment>, String) = match options {
        ToWordOptions::Locale(locale) => {
            let segmenter = UnicodeWordSegmenter::new(locale)?;
            let label = segmenter.locale().to_string();
            (Arc::new(segmenter), label)
        }
        ToWordOptions::Segment(segmenter) => (segmenter, "custom".to_string()),
    };
    Ok(ToWord { segmenter, label })
}

impl fmt::Debug for ToWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToWord").field("segmenter", &self.label).finish()
    }
}

impl Strategy for ToWord {
    fn name(&self) -> &'static str {
        "to_word"
    }

    fn apply(&self, input: PipeStream, _context: StrategyContext) -> PipeStream {
        let segmenter = Arc::clone(&self.segmenter);
        async_stream::try_stream! {
            for await item in input {
                let item = item?;
                let mut cursor = 0;
                for word in segmenter.segment(&item.value) {
                    if word.is_empty() {
                        continue;
                    }
                    if !item.value[cursor..].starts_with(word.as_str()) {
                        Err::<(), _>(TypewriterError::Segmentation {
                            fragment: item.fragment_index(),
                            offset: item.offset + cursor,
                        })?;
                    }
                    let offset = item.offset + cursor;
                    cursor += word.len();
                    yield item.piece(word, offset, item.latency);
                }
                if cursor != item.value.len() {
                    Err::<(), _>(TypewriterError::Segmentation {
                        fragment: item.fragment_index(),
                        offset: item.offset + cursor,
                    })?;
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipe_source;
    use crate::strategy::test_support::{queue_with, run, values};

    #[tokio::test]
    async fn test_locale_word_split() {
        let queue = queue_with(&["Hello world, ", "again"], true);
        let strategy = to_word(ToWordOptions::Locale("en".into())).unwrap();
        let items = run(&strategy, &queue, usize::MAX).await;

        assert_eq!(values(&items), vec!["Hello", " ", "world", ",", " ", "again"]);
        assert_eq!(items[2].offset, 6);
        assert_eq!(items[5].fragment_index(), 1);
    }

    #[tokio::test]
    async fn test_custom_segmenter() {
        let queue = queue_with(&["ab|cd|e"], true);
        let options = ToWordOptions::segment(|text: &str| {
            text.split_inclusive('|').map(str::to_string).collect()
        });
        let items = run(&to_word(options).unwrap(), &queue, usize::MAX).await;

        assert_eq!(values(&items), vec!["ab|", "cd|", "e"]);
        assert_eq!(items[1].offset, 3);
    }

    #[tokio::test]
    async fn test_segmenter_that_drops_text_fails() {
        let queue = queue_with(&["abc"], true);
        let options = ToWordOptions::segment(|_: &str| vec!["ab".to_string()]);
        let strategy = to_word(options).unwrap();

        let output: Vec<_> = strategy
            .apply(pipe_source(&queue), StrategyContext::new(queue.clone()))
            .collect()
            .await;

        assert_eq!(output.len(), 2);
        assert!(output[0].is_ok());
        assert_eq!(
            output[1],
            Err(TypewriterError::Segmentation { fragment: 0, offset: 2 })
        );
    }

    #[test]
    fn test_invalid_locale_rejected_at_construction() {
        assert!(matches!(
            to_word(ToWordOptions::Locale(String::new())),
            Err(TypewriterError::InvalidConfig(_))
        ));
        assert!(to_word(ToWordOptions::Locale("zh Hans".into())).is_err());
        assert!(to_word(ToWordOptions::Locale("zh-Hans".into())).is_ok());
    }
}
