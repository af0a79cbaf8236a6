//! Host-side lexing primitives for the Elm external scanner.
//!
//! The external scanner never owns the input. A host parser hands it a
//! [`Cursor`] positioned at the current decision point, and the scanner
//! reads one character of lookahead at a time, consuming input and marking
//! where the produced token ends.
//!
//! This crate defines that contract and ships [`SourceCursor`], an in-memory
//! implementation over a sentinel-terminated [`SourceBuffer`] that follows
//! tree-sitter's token-boundary rules. Hosts embedding the scanner in another
//! engine implement [`Cursor`] themselves.

mod cursor;
mod source_buffer;
mod span;

pub use cursor::Cursor;
pub use source_buffer::{SourceBuffer, SourceCursor};
pub use span::Span;
