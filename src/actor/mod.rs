//! Actor bridge: pipeline output for thread-and-channel applications.
//!
//! ```text
//! ┌──────────────────┐   TypewriterEvent   ┌──────────────┐
//! │ Typewriter Thread│ ──────────────────▶ │  Main Loop   │
//! │ (tokio runtime)  │                     │  (render)    │
//! └──────────────────┘                     └──────────────┘
//! ```

mod messages;
mod typewriter;

pub use messages::TypewriterEvent;
pub use typewriter::TypewriterActor;
