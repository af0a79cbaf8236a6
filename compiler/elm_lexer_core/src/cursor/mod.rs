//! The host lexer contract consumed by the external scanner.
//!
//! A [`Cursor`] exposes exactly one character of lookahead. Everything the
//! scanner learns about the input it learns by consuming characters, so the
//! token boundary is tracked separately: [`Cursor::mark_end`] records where
//! the token being produced ends, and characters consumed after the last
//! mark stay available to the host for the next decision point.
//!
//! # Token Boundaries
//!
//! - [`skip`](Cursor::skip) consumes a character as trivia. The token start
//!   moves past it.
//! - [`advance`](Cursor::advance) consumes a character as part of the token.
//! - If the end was marked before the start moved (mark, then skip), the
//!   token collapses to a zero-width token at the marked end. Virtual layout
//!   tokens rely on this.

/// Single-character lookahead over raw input.
///
/// Mirrors the lexer interface a tree-sitter external scanner receives. The
/// scanner only ever calls these methods; it never sees byte offsets.
pub trait Cursor {
    /// The character at the current position.
    ///
    /// Returns `'\0'` at end of input. Bytes that do not decode as UTF-8
    /// are reported as the codepoint with the raw byte's value.
    fn lookahead(&self) -> char;

    /// Consume the current character as part of the token.
    fn advance(&mut self);

    /// Consume the current character as skippable trivia.
    fn skip(&mut self);

    /// Record the current position as the end of the token being produced.
    fn mark_end(&mut self);

    /// Number of characters (not bytes) between the start of the current
    /// line and the current position.
    fn column(&mut self) -> u32;

    /// Returns `true` once the input (or the last included range) is exhausted.
    fn is_eof(&self) -> bool;

    /// Returns `true` when the position sits at the start of an included range.
    ///
    /// Only meaningful for hosts that parse several disjoint ranges of one
    /// document (injected content). Single-range cursors may keep the default.
    fn is_at_included_range_start(&self) -> bool {
        false
    }

    /// Report which token kind the scan produced, by its stable symbol id.
    fn set_result_symbol(&mut self, symbol: u16);

    /// Consume characters up to (not including) the next `\n` or end of input.
    fn advance_to_line_end(&mut self) {
        while !self.is_eof() && self.lookahead() != '\n' {
            self.advance();
        }
    }

    /// Skip characters while `pred` holds, stopping at end of input.
    fn skip_while(&mut self, pred: impl Fn(char) -> bool)
    where
        Self: Sized,
    {
        while !self.is_eof() && pred(self.lookahead()) {
            self.skip();
        }
    }
}
