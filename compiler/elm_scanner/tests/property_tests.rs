//! Property tests: termination, bounded state, checkpoint fidelity, and the
//! off-side rule over generated layouts.

use elm_lexer_core::SourceBuffer;
use elm_scanner::{ExternalScanner, TokenKind, ValidSymbols};
use proptest::prelude::*;

/// Source text dense in the characters the scanner reacts to.
fn arb_source() -> impl Strategy<Value = String> {
    "[a-z \n(),{}|\\]\\-\"\\\\]{0,80}"
}

/// Any candidate set, the all-kinds recovery set included.
fn arb_valid() -> impl Strategy<Value = ValidSymbols> {
    any::<u8>().prop_map(ValidSymbols::from_bits_truncate)
}

/// Scan calls at arbitrary offsets; offsets past the end clamp to EOF.
fn arb_calls() -> impl Strategy<Value = Vec<(u32, ValidSymbols)>> {
    proptest::collection::vec((0u32..90, arb_valid()), 1..40)
}

proptest! {
    #[test]
    fn calls_terminate_with_bounded_state(source in arb_source(), calls in arb_calls()) {
        let buf = SourceBuffer::new(&source);
        let mut scanner = ExternalScanner::new();
        for (pos, valid) in calls {
            let mut cursor = buf.cursor();
            cursor.reset(pos);
            let start = cursor.position();
            if scanner.scan(&mut cursor, valid) {
                let (symbol, span) = cursor.token();
                let kind = symbol.and_then(TokenKind::from_symbol);
                prop_assert!(kind.is_some_and(|kind| valid.accepts(kind)));
                prop_assert!(span.start >= start);
                prop_assert!(span.end <= buf.len());
            }
            prop_assert!(scanner.state().indents().depth() <= 256);
            prop_assert!(scanner.state().indents().depth() >= 1);
        }
    }

    #[test]
    fn checkpoint_restores_equal_state(source in arb_source(), calls in arb_calls()) {
        let buf = SourceBuffer::new(&source);
        let mut scanner = ExternalScanner::new();
        for (pos, valid) in calls {
            let mut cursor = buf.cursor();
            cursor.reset(pos);
            scanner.scan(&mut cursor, valid);

            // Columns stay below 256 on inputs this short.
            let mut bytes = [0u8; 1024];
            let len = scanner.serialize(&mut bytes);
            prop_assert!(len > 0);
            let mut restored = ExternalScanner::new();
            restored.deserialize(&bytes[..len]);
            prop_assert_eq!(restored.state(), scanner.state());
        }
    }

    #[test]
    fn error_recovery_is_always_no_match(source in arb_source(), pos in 0u32..90) {
        let buf = SourceBuffer::new(&source);
        let mut scanner = ExternalScanner::new();
        let mut cursor = buf.cursor();
        cursor.reset(pos);
        prop_assert!(!scanner.scan(&mut cursor, ValidSymbols::all()));
    }

    #[test]
    fn section_closes_only_left_of_its_column(
        column in 1u32..16,
        deeper in proptest::collection::vec(1u32..8, 0..6),
        dedent in 0u32..16,
    ) {
        let dedent = dedent % column;
        let indent = |n: u32| " ".repeat(n as usize);

        let mut source = format!("let\n{}x\n", indent(column));
        let mut line_ends = vec![source.len() - 1];
        for extra in &deeper {
            source.push_str(&indent(column + extra));
            source.push_str("y\n");
            line_ends.push(source.len() - 1);
        }
        source.push_str(&indent(dedent));
        source.push('z');

        let buf = SourceBuffer::new(&source);
        let mut scanner = ExternalScanner::new();
        let closes = ValidSymbols::END_DECL | ValidSymbols::END_SECTION;

        let mut cursor = buf.cursor();
        cursor.reset(3);
        prop_assert!(scanner.scan(&mut cursor, ValidSymbols::OPEN_SECTION));
        prop_assert_eq!(scanner.state().indents().sections(), &[column]);

        let last = line_ends.len() - 1;
        for (i, &end) in line_ends.iter().enumerate() {
            let mut cursor = buf.cursor();
            cursor.reset(u32::try_from(end).unwrap_or(u32::MAX));
            let produced = scanner.scan(&mut cursor, closes);
            if i < last {
                // The next line is indented deeper: still inside the section.
                prop_assert!(!produced);
                prop_assert!(scanner.state().indents().has_open_section());
            } else {
                prop_assert!(produced);
                prop_assert_eq!(cursor.result_symbol(), Some(TokenKind::EndSection.symbol()));
                prop_assert!(!scanner.state().indents().has_open_section());
            }
        }
    }
}
