//! The closed vocabulary of tokens the external scanner can produce.
//!
//! Each [`TokenKind`] carries a stable symbol id (its discriminant) that the
//! host grammar declares in the same order among its external tokens. The
//! host passes the kinds it currently accepts as a [`ValidSymbols`] set.

use std::fmt;

use bitflags::bitflags;

/// A token the external scanner can produce.
///
/// # Repr
///
/// `#[repr(u8)]` discriminants are the symbol ids reported to the host via
/// [`Cursor::set_result_symbol`](elm_lexer_core::Cursor::set_result_symbol).
/// They must match the order of the grammar's external token list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Virtual token ending a declaration inside a layout section.
    EndDecl = 0,
    /// Virtual token opening a layout section after `let`, `of`, etc.
    OpenSection = 1,
    /// Virtual token closing a layout section.
    EndSection = 2,
    /// A `-` glued to the following operand (`-x`, `-(f y)`), i.e. negation.
    MinusNoSpace = 3,
    /// Body of a `[glsl| ... |]` block.
    ShaderContent = 4,
    /// Body of a `{- ... -}` comment, nested comments included.
    BlockCommentContent = 5,
    /// Body of a `"""` string up to the next escape or closing quotes.
    StringContentMultiline = 6,
}

impl TokenKind {
    /// Every kind, in symbol-id order.
    pub const ALL: [TokenKind; 7] = [
        TokenKind::EndDecl,
        TokenKind::OpenSection,
        TokenKind::EndSection,
        TokenKind::MinusNoSpace,
        TokenKind::ShaderContent,
        TokenKind::BlockCommentContent,
        TokenKind::StringContentMultiline,
    ];

    /// Stable symbol id reported to the host.
    #[inline]
    pub const fn symbol(self) -> u16 {
        self as u16
    }

    /// Look up a kind by its symbol id.
    pub fn from_symbol(symbol: u16) -> Option<TokenKind> {
        Self::ALL.get(usize::from(symbol)).copied()
    }

    /// The single-kind [`ValidSymbols`] set for this kind.
    #[inline]
    pub const fn flag(self) -> ValidSymbols {
        ValidSymbols::from_bits_truncate(1 << self as u8)
    }

    /// `true` for tokens synthesized from layout rather than read from text.
    pub const fn is_virtual(self) -> bool {
        matches!(
            self,
            TokenKind::EndDecl | TokenKind::OpenSection | TokenKind::EndSection
        )
    }

    /// Short lowercase name used in logs and test output.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::EndDecl => "end_decl",
            TokenKind::OpenSection => "open_section",
            TokenKind::EndSection => "end_section",
            TokenKind::MinusNoSpace => "minus_without_trailing_whitespace",
            TokenKind::ShaderContent => "glsl_content",
            TokenKind::BlockCommentContent => "block_comment_content",
            TokenKind::StringContentMultiline => "string_content_multiline",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// The set of token kinds the host accepts at the current position.
    ///
    /// Bit `n` corresponds to the [`TokenKind`] with symbol id `n`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ValidSymbols: u8 {
        const END_DECL = 1 << 0;
        const OPEN_SECTION = 1 << 1;
        const END_SECTION = 1 << 2;
        const MINUS_NO_SPACE = 1 << 3;
        const SHADER_CONTENT = 1 << 4;
        const BLOCK_COMMENT_CONTENT = 1 << 5;
        const STRING_CONTENT_MULTILINE = 1 << 6;
    }
}

impl ValidSymbols {
    /// Build a set from a host's per-symbol boolean table.
    ///
    /// Entries beyond the seven known kinds are ignored; missing entries
    /// count as not valid.
    pub fn from_table(table: &[bool]) -> ValidSymbols {
        table
            .iter()
            .zip(TokenKind::ALL)
            .filter(|(valid, _)| **valid)
            .fold(ValidSymbols::empty(), |set, (_, kind)| set | kind.flag())
    }

    /// Whether `kind` is acceptable.
    #[inline]
    pub const fn accepts(self, kind: TokenKind) -> bool {
        self.contains(kind.flag())
    }

    /// A host signals error recovery by marking every kind valid at once.
    ///
    /// Layout logic must not fabricate virtual tokens while the host is
    /// recovering, so the scanner answers "no match" to such calls.
    #[inline]
    pub const fn is_error_recovery(self) -> bool {
        self.is_all()
    }
}
