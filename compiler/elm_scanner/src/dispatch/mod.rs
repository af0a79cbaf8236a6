//! Per-call token selection.
//!
//! The host asks for one token per call and says which kinds it would
//! accept. [`scan`] tries the candidates in a fixed priority order and
//! stops at the first that applies:
//!
//! 1. error recovery (every kind valid): nothing
//! 2. a queued layout close from an earlier call
//! 3. multiline string content
//! 4. leading trivia: newlines (measuring indentation), ambiguous `-`,
//!    line comments after a newline, end of input
//! 5. the `in` keyword closing a `let` on the same line; an identifier
//!    starting with `i` leaves only the off-side rule
//! 6. `)`, `,` or `}` closing a section
//! 7. opening a section at the current column
//! 8. block comment content
//! 9. the off-side rule after a newline
//! 10. shader content

use std::ops::ControlFlow;

use elm_lexer_core::Cursor;
use tracing::trace;

use crate::config::ScannerConfig;
use crate::content;
use crate::error::ScanError;
use crate::layout;
use crate::state::ScannerState;
use crate::token_kind::{TokenKind, ValidSymbols};

/// What the trivia pass learned about the text before the next token.
#[derive(Copy, Clone, Debug)]
struct Trivia {
    /// A `\n` was consumed; `indent_length` holds the new line's column.
    has_newline: bool,
    /// No comment was consumed after the token end was marked. Once this is
    /// false, marking the end again would swallow the comment.
    can_mark_end: bool,
}

/// Choose the token for one host call.
///
/// `Ok(None)` means "no match": the host falls back to its own lexer and
/// may discard the consumed characters.
pub(crate) fn scan<C: Cursor>(
    state: &mut ScannerState,
    cursor: &mut C,
    valid: ValidSymbols,
    config: &ScannerConfig,
) -> Result<Option<TokenKind>, ScanError> {
    if valid.is_error_recovery() {
        trace!("host in error recovery");
        return Ok(None);
    }

    if let Some(kind) = state.runback.take_acceptable(valid) {
        trace!(%kind, pending = state.runback.len(), "replay queued close");
        return Ok(Some(kind));
    }
    state.runback.clear();

    if valid.accepts(TokenKind::StringContentMultiline) {
        let has_content = content::scan_multiline_string(cursor);
        return Ok(has_content.then_some(TokenKind::StringContentMultiline));
    }

    cursor.mark_end();
    let mut trivia = match skip_trivia(state, cursor, valid) {
        ControlFlow::Break(token) => return Ok(token),
        ControlFlow::Continue(trivia) => trivia,
    };

    let mut found_in = false;
    match in_keyword(cursor, valid) {
        InKeyword::Absent => {}
        InKeyword::Found if trivia.has_newline => found_in = true,
        InKeyword::Found => {
            let closed = state.indents.pop();
            trace!(?closed, "`in` closes let on the same line");
            return Ok(Some(TokenKind::EndSection));
        }
        InKeyword::Partial => {
            // Part of an identifier is consumed, so only the indentation
            // measured before it can still decide anything.
            if !trivia.has_newline {
                return Ok(None);
            }
            let outcome = layout::close_sections(state, cursor, valid, false, config)?;
            return Ok(outcome.token);
        }
    }

    if valid.accepts(TokenKind::EndSection) && matches!(cursor.lookahead(), ')' | ',' | '}') {
        let closed = state.indents.pop();
        trace!(?closed, delimiter = %cursor.lookahead(), "delimiter closes section");
        return Ok(Some(TokenKind::EndSection));
    }

    if valid.accepts(TokenKind::OpenSection) && !cursor.is_eof() {
        let column = cursor.column();
        state.indents.push(column, config.max_indent_depth)?;
        trace!(column, depth = state.indents.depth(), "open section");
        return Ok(Some(TokenKind::OpenSection));
    }

    if valid.accepts(TokenKind::BlockCommentContent) {
        if !trivia.can_mark_end {
            return Ok(None);
        }
        content::scan_block_comment_content(cursor, config.max_comment_depth)?;
        return Ok(Some(TokenKind::BlockCommentContent));
    }

    if trivia.has_newline {
        let outcome = layout::close_sections(state, cursor, valid, found_in, config)?;
        if outcome.skipped_comment {
            trivia.can_mark_end = false;
        }
        if outcome.token.is_some() {
            return Ok(outcome.token);
        }
    }

    if valid.accepts(TokenKind::ShaderContent) {
        if !trivia.can_mark_end {
            return Ok(None);
        }
        content::scan_shader_content(cursor);
        return Ok(Some(TokenKind::ShaderContent));
    }

    Ok(None)
}

/// Consume whitespace and line comments ahead of the next token.
///
/// Breaks with the call's final answer when trivia alone decides it (a
/// negation `-`, a stray `-`, end of input); continues with what was
/// measured otherwise.
fn skip_trivia<C: Cursor>(
    state: &mut ScannerState,
    cursor: &mut C,
    valid: ValidSymbols,
) -> ControlFlow<Option<TokenKind>, Trivia> {
    let mut trivia = Trivia {
        has_newline: false,
        can_mark_end: true,
    };
    loop {
        if cursor.is_eof() {
            if valid.accepts(TokenKind::EndSection) {
                trace!("end of input closes section");
                return ControlFlow::Break(Some(TokenKind::EndSection));
            }
            if valid.accepts(TokenKind::EndDecl) {
                trace!("end of input ends declaration");
                return ControlFlow::Break(Some(TokenKind::EndDecl));
            }
            return ControlFlow::Continue(trivia);
        }

        match cursor.lookahead() {
            ' ' | '\r' => cursor.skip(),
            '\n' => {
                cursor.skip();
                cursor.skip_while(|c| c == ' ');
                trivia.has_newline = true;
                state.indent_length = cursor.column();
            }
            '-' if !valid.accepts(TokenKind::BlockCommentContent) => {
                cursor.advance();
                let next = cursor.lookahead();
                if valid.accepts(TokenKind::MinusNoSpace) && content::starts_negated_operand(next) {
                    if !trivia.can_mark_end {
                        return ControlFlow::Break(None);
                    }
                    cursor.mark_end();
                    return ControlFlow::Break(Some(TokenKind::MinusNoSpace));
                }
                if next == '-' && trivia.has_newline {
                    trivia.can_mark_end = false;
                    cursor.advance();
                    cursor.advance_to_line_end();
                } else {
                    return ControlFlow::Break(None);
                }
            }
            _ => return ControlFlow::Continue(trivia),
        }
    }
}

/// Result of looking for the keyword `in`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum InKeyword {
    /// Not looked at, or the line does not start with `i`.
    Absent,
    /// `in` followed by whitespace or end of input.
    Found,
    /// An identifier starting with `i` or `in`; its prefix was consumed.
    Partial,
}

/// Look for the keyword `in`.
///
/// Consumes the `i` and `n` it inspects. Only looks when a section close is
/// acceptable.
fn in_keyword<C: Cursor>(cursor: &mut C, valid: ValidSymbols) -> InKeyword {
    if !valid.accepts(TokenKind::EndSection) || cursor.lookahead() != 'i' {
        return InKeyword::Absent;
    }
    cursor.skip();
    if cursor.lookahead() != 'n' {
        return InKeyword::Partial;
    }
    cursor.skip();
    if cursor.is_eof() || matches!(cursor.lookahead(), ' ' | '\r' | '\n') {
        InKeyword::Found
    } else {
        InKeyword::Partial
    }
}
