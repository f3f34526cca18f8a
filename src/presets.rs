//! Ready-made strategy chains.
//!
//! Each preset reproduces one of the classic single-purpose pacers as a
//! composition of the general strategies.

use crate::error::Result;
use crate::pipeline::Typewriter;
use crate::strategy::{eager, linear, to_character, to_word, EagerOptions, ToWordOptions};
use std::time::Duration;

/// Emit fragments as they arrive.
pub fn by_chunk() -> Typewriter {
    Typewriter::new()
}

/// One character at a time, `interval` apart.
pub fn by_character_linear(interval: Duration) -> Typewriter {
    Typewriter::new().with(to_character()).with(linear(interval))
}

/// One word at a time, `interval` apart.
pub fn by_word_linear(locale: &str, interval: Duration) -> Result<Typewriter> {
    Ok(Typewriter::new()
        .with(to_word(ToWordOptions::Locale(locale.to_string()))?)
        .with(linear(interval)))
}

/// One word at a time, speeding up as the backlog grows.
///
/// Words are `default_interval` apart while the output keeps up,
/// `eager_interval` apart with one fragment waiting, and the rest of the
/// fragment is flushed at once when two or more are waiting.
pub fn by_word_eager(
    locale: &str,
    default_interval: Duration,
    eager_interval: Duration,
) -> Result<Typewriter> {
    Ok(by_word_linear(locale, default_interval)?.with(eager(EagerOptions::new(eager_interval))))
}
