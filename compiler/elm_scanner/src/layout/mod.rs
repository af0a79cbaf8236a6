//! Off-side rule: closing layout sections from indentation.
//!
//! Runs once a newline has been consumed and the column of the next line's
//! first character is known. Compares that column against the indent stack:
//!
//! - column equal to the innermost section: the line starts a new
//!   declaration in that section (`EndDecl`), unless it is the `in` of the
//!   section's `let`, which closes the section (`EndSection`);
//! - column below it: the section is over (`EndSection`), and the comparison
//!   repeats against the enclosing section.
//!
//! All closes discovered on one line go through the runback queue; the
//! first one is returned right away and the rest are replayed on the
//! following calls.

use elm_lexer_core::Cursor;
use tracing::trace;

use crate::config::ScannerConfig;
use crate::content;
use crate::error::ScanError;
use crate::runback::RunbackTag;
use crate::state::ScannerState;
use crate::token_kind::{TokenKind, ValidSymbols};

/// What one layout evaluation produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayoutOutcome {
    /// First close to hand to the host, if any is acceptable now.
    pub(crate) token: Option<TokenKind>,
    /// Whether leading block comments were consumed while re-measuring.
    /// The token end must not be marked again after this, or the comments
    /// would be swallowed into the next token.
    pub(crate) skipped_comment: bool,
}

/// Evaluate the off-side rule for the line the cursor is on.
///
/// `found_in` reports that the line starts with the keyword `in` (already
/// consumed by the caller).
pub(crate) fn close_sections<C: Cursor>(
    state: &mut ScannerState,
    cursor: &mut C,
    valid: ValidSymbols,
    mut found_in: bool,
    config: &ScannerConfig,
) -> Result<LayoutOutcome, ScanError> {
    state.runback.clear();

    let mut skipped_comment = false;
    if cursor.lookahead() == '{'
        && !valid.accepts(TokenKind::BlockCommentContent)
        && state.indent_length < state.indents.top()
    {
        skipped_comment = skip_leading_comments(state, cursor, config.max_comment_depth)?;
    }

    while state.indent_length <= state.indents.top() {
        if state.indent_length == state.indents.top() {
            if found_in {
                trace!(column = state.indent_length, "`in` closes let section");
                state.indents.pop();
                state.runback.push(RunbackTag::EndSection);
                found_in = false;
                break;
            }
            if comment_follows(cursor) {
                trace!(column = state.indent_length, "comment line keeps declaration open");
                break;
            }
            trace!(column = state.indent_length, "end declaration");
            state.runback.push(RunbackTag::EndDecl);
            break;
        }

        // The sentinel is 0, so a column below the top means a real section.
        let closed = state.indents.pop();
        trace!(column = state.indent_length, ?closed, "dedent closes section");
        state.runback.push(RunbackTag::EndSection);
        if found_in && state.indent_length > state.indents.top() {
            found_in = false;
        }
    }

    // `let` and its declarations on one line, `in` further right on the next.
    // The sentinel stays, but the close is still owed.
    if found_in {
        let closed = state.indents.pop();
        trace!(?closed, "`in` closes single-line let section");
        state.runback.push(RunbackTag::EndSection);
    }

    state.runback.seal();
    let token = state.runback.take_acceptable(valid).or_else(|| {
        (cursor.is_eof() && valid.accepts(TokenKind::EndSection)).then_some(TokenKind::EndSection)
    });
    Ok(LayoutOutcome {
        token,
        skipped_comment,
    })
}

/// Skip block comments at the start of a line and re-measure indentation.
///
/// A comment's own column says nothing about where the code continues, so
/// the column is taken from the first character after the comments (and
/// after any newlines following them). Returns whether a comment was
/// consumed; a `{` that does not open a comment leaves the measurement as
/// it was.
fn skip_leading_comments<C: Cursor>(
    state: &mut ScannerState,
    cursor: &mut C,
    max_depth: u32,
) -> Result<bool, ScanError> {
    let mut skipped = false;
    while cursor.lookahead() == '{' {
        cursor.skip();
        if cursor.lookahead() != '-' {
            break;
        }
        cursor.skip();
        skipped = true;
        content::skip_block_comment(cursor, max_depth)?;

        while matches!(cursor.lookahead(), ' ' | '\n' | '\r' | '\t') {
            if cursor.lookahead() == '\n' {
                cursor.skip();
                cursor.skip_while(|c| c == ' ');
                state.indent_length = cursor.column();
            } else {
                cursor.skip();
            }
        }
        trace!(column = state.indent_length, "re-measured after block comment");
    }
    Ok(skipped)
}

/// Whether the line continues with `--` or `{-`.
///
/// Consumes at most two characters of lookahead.
fn comment_follows<C: Cursor>(cursor: &mut C) -> bool {
    if cursor.lookahead() == '-' {
        cursor.skip();
        if cursor.lookahead() == '-' {
            return true;
        }
    }
    if cursor.lookahead() == '{' {
        cursor.skip();
        if cursor.lookahead() == '-' {
            return true;
        }
    }
    false
}
