//! Smoke test: pace a short reply with the default presets.

use futures::stream::{self, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use typewriter::presets;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("Flywheel Typewriter Smoke Test");
    println!("==============================");
    println!();

    let fragments = ["Hello ", "World", "!"];

    let by_chunk: Vec<String> = presets::by_chunk()
        .pipe(stream::iter(fragments.map(Ok::<_, Infallible>)))
        .filter_map(|piece| async move { piece.ok() })
        .collect()
        .await;
    println!("by chunk:     {by_chunk:?}");

    let by_character: Vec<String> = presets::by_character_linear(Duration::from_millis(20))
        .pipe(stream::iter(fragments.map(Ok::<_, Infallible>)))
        .filter_map(|piece| async move { piece.ok() })
        .collect()
        .await;
    println!("by character: {by_character:?}");
    println!();

    assert_eq!(by_chunk.concat(), by_character.concat());
    println!("Output matches input: {}", by_character.concat());
}
