#![allow(clippy::unwrap_used)]

use super::*;
use elm_lexer_core::{SourceBuffer, SourceCursor, Span};
use pretty_assertions::assert_eq;

/// Helper: slice the source covered by the cursor's current token.
fn token_text<'a>(source: &'a str, cursor: &SourceCursor<'_>) -> &'a str {
    &source[cursor.token_span().to_range()]
}

// === Multiline Strings ===

#[test]
fn string_stops_before_backslash() {
    let source = r#""""abc\""""#;
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    cursor.reset(3);
    assert!(scan_multiline_string(&mut cursor));
    assert_eq!(token_text(source, &cursor), "abc");
    assert_eq!(cursor.token_span(), Span::new(3, 6));
}

#[test]
fn string_stops_before_closing_quotes() {
    let source = "line one\nline two\"\"\"";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    assert!(scan_multiline_string(&mut cursor));
    assert_eq!(token_text(source, &cursor), "line one\nline two");
}

#[test]
fn string_keeps_single_and_double_quotes() {
    let source = r#"say "hi" and ""twice"" then"""rest"#;
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    assert!(scan_multiline_string(&mut cursor));
    assert_eq!(
        token_text(source, &cursor),
        r#"say "hi" and ""twice"" then"#
    );
}

#[test]
fn string_with_no_content_is_not_a_token() {
    let buf = SourceBuffer::new(r#"""""#);
    let mut cursor = buf.cursor();
    assert!(!scan_multiline_string(&mut cursor));

    let buf = SourceBuffer::new(r"\n");
    let mut cursor = buf.cursor();
    assert!(!scan_multiline_string(&mut cursor));

    let buf = SourceBuffer::new("");
    let mut cursor = buf.cursor();
    assert!(!scan_multiline_string(&mut cursor));
}

#[test]
fn string_runs_to_eof_when_unterminated() {
    let source = "abc\"\"";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    assert!(scan_multiline_string(&mut cursor));
    assert_eq!(token_text(source, &cursor), "abc\"\"");
}

#[test]
fn string_does_not_treat_dashes_as_comments() {
    let source = "-- not a comment\"\"\"";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    assert!(scan_multiline_string(&mut cursor));
    assert_eq!(token_text(source, &cursor), "-- not a comment");
}

// === Block Comments ===

#[test]
fn nested_comment_is_one_token() {
    let source = "{- a {- b -} c -}";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_block_comment_content(&mut cursor, 256).unwrap();
    assert_eq!(token_text(source, &cursor), source);
}

#[test]
fn comment_body_stops_before_closer() {
    let source = " doc text -} rest";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_block_comment_content(&mut cursor, 256).unwrap();
    assert_eq!(token_text(source, &cursor), " doc text ");
}

#[test]
fn comment_body_includes_nested_pairs() {
    let source = " outer {- inner -} tail -}";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_block_comment_content(&mut cursor, 256).unwrap();
    assert_eq!(token_text(source, &cursor), " outer {- inner -} tail ");
}

#[test]
fn comment_body_keeps_lone_dashes_and_braces() {
    let source = " a - b { c } -} x";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_block_comment_content(&mut cursor, 256).unwrap();
    assert_eq!(token_text(source, &cursor), " a - b { c } ");
}

#[test]
fn unterminated_comment_runs_to_eof() {
    let source = " never {- closed";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_block_comment_content(&mut cursor, 256).unwrap();
    assert_eq!(token_text(source, &cursor), source);
}

#[test]
fn empty_comment_body_is_zero_width() {
    let buf = SourceBuffer::new("-}");
    let mut cursor = buf.cursor();
    scan_block_comment_content(&mut cursor, 256).unwrap();
    assert_eq!(cursor.token_span(), Span::point(0));
}

#[test]
fn comment_nesting_is_bounded() {
    let source = "{-".repeat(5);
    let buf = SourceBuffer::new(&source);
    let mut cursor = buf.cursor();
    assert_eq!(
        scan_block_comment_content(&mut cursor, 4),
        Err(ScanError::CommentDepthExceeded { limit: 4 })
    );

    let source = format!("{}{}", "{-".repeat(3), "-}".repeat(3));
    let buf = SourceBuffer::new(&source);
    let mut cursor = buf.cursor();
    assert_eq!(scan_block_comment_content(&mut cursor, 4), Ok(()));
}

#[test]
fn skip_consumes_through_matching_closer() {
    let source = " a {- b -} c -}\nnext";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    skip_block_comment(&mut cursor, 256).unwrap();
    assert_eq!(cursor.lookahead(), '\n');
}

#[test]
fn skip_stops_at_eof_when_unterminated() {
    let buf = SourceBuffer::new(" {- a -}");
    let mut cursor = buf.cursor();
    skip_block_comment(&mut cursor, 256).unwrap();
    assert!(cursor.is_eof());
}

#[test]
fn skip_nesting_is_bounded() {
    let buf = SourceBuffer::new("{-{-{-");
    let mut cursor = buf.cursor();
    assert_eq!(
        skip_block_comment(&mut cursor, 3),
        Err(ScanError::CommentDepthExceeded { limit: 3 })
    );
}

// === Shader Blocks ===

#[test]
fn shader_stops_before_terminator() {
    let source = "\nvoid main () { gl_FragColor = vec4(1.0); }\n|] rest";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_shader_content(&mut cursor);
    assert_eq!(
        token_text(source, &cursor),
        "\nvoid main () { gl_FragColor = vec4(1.0); }\n"
    );
}

#[test]
fn shader_keeps_lone_pipes() {
    let source = "a || b | c|]";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_shader_content(&mut cursor);
    assert_eq!(token_text(source, &cursor), "a || b | c");
}

#[test]
fn shader_runs_to_eof_when_unterminated() {
    let source = "float x = 1.0;";
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_shader_content(&mut cursor);
    assert_eq!(token_text(source, &cursor), source);
}

// === Minus Disambiguation ===

#[test]
fn negated_operand_starts() {
    assert!(starts_negated_operand('x'));
    assert!(starts_negated_operand('Z'));
    assert!(starts_negated_operand('('));
    assert!(starts_negated_operand('λ'));
    assert!(starts_negated_operand('é'));
}

#[test]
fn binary_minus_followers() {
    assert!(!starts_negated_operand(' '));
    assert!(!starts_negated_operand('1'));
    assert!(!starts_negated_operand('-'));
    assert!(!starts_negated_operand('>'));
    assert!(!starts_negated_operand('\0'));
}

// === Property Tests ===

mod proptest_content {
    use super::super::{scan_block_comment_content, scan_multiline_string, scan_shader_content};
    use elm_lexer_core::SourceBuffer;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn scanners_terminate_within_source(source in "[-{}|\\]\"\\\\a \n]{0,64}") {
            let buf = SourceBuffer::new(&source);
            let len = buf.len();

            let mut cursor = buf.cursor();
            let _ = scan_block_comment_content(&mut cursor, 8);
            prop_assert!(cursor.token_span().end <= len);

            let mut cursor = buf.cursor();
            scan_multiline_string(&mut cursor);
            prop_assert!(cursor.token_span().end <= len);

            let mut cursor = buf.cursor();
            scan_shader_content(&mut cursor);
            prop_assert!(cursor.token_span().end <= len);
        }
    }
}
