//! Typewriter Demo: paces a simulated LLM reply in the terminal.
//!
//! The fake agent streams bursty fragments (fast runs, then stalls). The
//! typewriter reveals them one character at a time, smoothing the newest
//! fragment and flushing when it falls behind.
//!
//! Run with `RUST_LOG=typewriter=debug` to watch the producer and queue.

use std::time::Duration;
use tracing_subscriber::EnvFilter;
use typewriter::strategy::{eager, slow_last_chunk, to_character, EagerOptions, SlowLastChunkOptions};
use typewriter::{TerminalWriter, Typewriter};

/// Sample text to stream (simulating an LLM response).
const SAMPLE_TEXT: &str = "I'd be happy to explain how the typewriter keeps up with the model!\n\n\
Fragments arrive in bursts. While the output is behind, whole fragments are flushed at once. \
Once it catches up, the newest fragment is spread out over the time the next one is expected to take, \
so the text keeps moving instead of freezing between bursts.\n";

/// Split `text` into fragments of 3-12 bytes with uneven gaps.
fn fragments(text: &'static str) -> Vec<(&'static str, Duration)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0usize;
    while start < text.len() {
        let mut end = (start + 3 + (i * 7) % 10).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        // Every fifth fragment stalls, as a model does between sentences.
        let gap = if i % 5 == 4 { 400 } else { 30 + (i as u64 * 13) % 50 };
        out.push((&text[start..end], Duration::from_millis(gap)));
        start = end;
        i += 1;
    }
    out
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> typewriter::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let source = async_stream::stream! {
        for (fragment, gap) in fragments(SAMPLE_TEXT) {
            tokio::time::sleep(gap).await;
            yield Ok::<_, std::convert::Infallible>(fragment);
        }
    };

    let typewriter = Typewriter::new()
        .with(to_character())
        .with(slow_last_chunk(SlowLastChunkOptions {
            default_latency_per_character: Duration::from_millis(20),
        }))
        .with(eager(EagerOptions::new(Duration::from_millis(8))));

    let mut writer = TerminalWriter::stdout();
    let pieces = writer.play(typewriter.pipe(source)).await?;
    println!("\n[{pieces} pieces]");
    Ok(())
}
