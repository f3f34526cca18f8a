//! Terminal output for paced text.

mod writer;

pub use writer::TerminalWriter;
