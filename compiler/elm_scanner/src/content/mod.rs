//! Scanners for composite lexical content.
//!
//! Each scanner owns one loop over the [`Cursor`] and is bounded by the
//! input length or an explicit terminator. All of them mark the token end
//! before any lookahead that may turn out not to belong to the token, so
//! that lookahead stays available to the host.

use elm_lexer_core::Cursor;

use crate::error::ScanError;

/// Scan the body of a `"""` string.
///
/// Stops before a closing `"""`, before any `\` (escapes belong to the
/// grammar), or at end of input. A lone `"` or `""` is ordinary content.
/// Returns `true` only if at least one character of content was consumed.
pub(crate) fn scan_multiline_string<C: Cursor>(cursor: &mut C) -> bool {
    let mut has_content = false;
    loop {
        if cursor.is_eof() {
            cursor.mark_end();
            return has_content;
        }
        match cursor.lookahead() {
            '"' => {
                cursor.mark_end();
                cursor.advance();
                if cursor.lookahead() == '"' {
                    cursor.advance();
                    if cursor.lookahead() == '"' {
                        return has_content;
                    }
                }
                has_content = true;
            }
            '\\' => {
                cursor.mark_end();
                return has_content;
            }
            _ => {
                has_content = true;
                cursor.advance();
            }
        }
    }
}

/// Scan the body of a `{- ... -}` comment, nested comments included.
///
/// The token ends before the `-}` that closes the enclosing comment. Nested
/// `{- -}` pairs are part of the body. An unterminated comment runs to end
/// of input and is still a valid body.
pub(crate) fn scan_block_comment_content<C: Cursor>(
    cursor: &mut C,
    max_depth: u32,
) -> Result<(), ScanError> {
    cursor.mark_end();
    // Levels opened inside the body; the enclosing comment is not counted.
    let mut depth: u32 = 0;
    while !cursor.is_eof() {
        match cursor.lookahead() {
            '-' => {
                if depth == 0 {
                    cursor.mark_end();
                }
                cursor.advance();
                if cursor.lookahead() == '}' {
                    if depth == 0 {
                        return Ok(());
                    }
                    cursor.advance();
                    depth -= 1;
                    if depth == 0 {
                        cursor.mark_end();
                    }
                }
            }
            '{' => {
                cursor.advance();
                if cursor.lookahead() == '-' {
                    cursor.advance();
                    depth += 1;
                    if depth >= max_depth {
                        return Err(ScanError::CommentDepthExceeded { limit: max_depth });
                    }
                }
            }
            _ => cursor.advance(),
        }
    }
    cursor.mark_end();
    Ok(())
}

/// Skip the rest of a block comment whose `{-` was already consumed.
///
/// Consumes through the matching `-}` or to end of input.
pub(crate) fn skip_block_comment<C: Cursor>(cursor: &mut C, max_depth: u32) -> Result<(), ScanError> {
    let mut depth: u32 = 1;
    while depth > 0 && !cursor.is_eof() {
        match cursor.lookahead() {
            '{' => {
                cursor.skip();
                if cursor.lookahead() == '-' {
                    cursor.skip();
                    depth += 1;
                    if depth > max_depth {
                        return Err(ScanError::CommentDepthExceeded { limit: max_depth });
                    }
                }
            }
            '-' => {
                cursor.skip();
                if cursor.lookahead() == '}' {
                    cursor.skip();
                    depth -= 1;
                }
            }
            _ => cursor.skip(),
        }
    }
    Ok(())
}

/// Scan the body of a `[glsl| ... |]` block.
///
/// The token ends before `|]`; end of input also ends it.
pub(crate) fn scan_shader_content<C: Cursor>(cursor: &mut C) {
    loop {
        if cursor.is_eof() {
            cursor.mark_end();
            return;
        }
        if cursor.lookahead() == '|' {
            cursor.mark_end();
            cursor.advance();
            if cursor.lookahead() == ']' {
                cursor.advance();
                return;
            }
        } else {
            cursor.advance();
        }
    }
}

/// Whether `c`, directly after a `-`, makes that `-` a negation.
///
/// Anything above ASCII is accepted so non-ASCII identifiers work; the
/// grammar validates the operand itself.
#[inline]
pub(crate) fn starts_negated_operand(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '(' || u32::from(c) > 127
}

#[cfg(test)]
mod tests;
