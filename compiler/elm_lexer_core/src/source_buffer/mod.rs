//! Sentinel-terminated source buffer and the in-memory [`Cursor`].
//!
//! The buffer stores the source bytes followed by a single `0x00` sentinel,
//! so reading the byte at the end of input is always in bounds and yields
//! the `'\0'` lookahead the scanner treats as end of input.
//!
//! [`SourceCursor`] follows the token-boundary rules of a tree-sitter lexer:
//! skipped characters move the token start, the token end is the last
//! marked position (or the current one if never marked), and an end before
//! the start collapses to a zero-width token at the end.

use std::ops::Range;

use crate::{Cursor, Span};

/// Owned source bytes plus a trailing `0x00` sentinel.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00]
///  ^                ^
///  0           source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
}

impl SourceBuffer {
    /// Create a buffer from UTF-8 source text.
    pub fn new(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Create a buffer from raw bytes that may not be valid UTF-8.
    ///
    /// Sources larger than `u32::MAX` bytes are truncated to `u32::MAX`;
    /// positions are 32-bit throughout.
    pub fn from_bytes(source: &[u8]) -> Self {
        let source_len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        let kept = &source[..source_len as usize];
        let mut buf = Vec::with_capacity(kept.len() + 1);
        buf.extend_from_slice(kept);
        buf.push(0);
        Self { buf, source_len }
    }

    /// Returns the source bytes (without the sentinel).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Create a [`SourceCursor`] over the whole source, positioned at byte 0.
    pub fn cursor(&self) -> SourceCursor<'_> {
        SourceCursor::new(&self.buf, self.source_len, vec![0..self.source_len])
    }

    /// Create a [`SourceCursor`] that only sees the given byte ranges.
    ///
    /// Ranges are clamped to the source, empty ranges are dropped, and the
    /// rest are visited in ascending order. Advancing off the end of one
    /// range continues at the start of the next; the input ends after the
    /// last range. An empty range list yields a cursor already at EOF.
    pub fn cursor_with_ranges(&self, ranges: &[Range<u32>]) -> SourceCursor<'_> {
        let mut included: Vec<Range<u32>> = ranges
            .iter()
            .map(|r| r.start.min(self.source_len)..r.end.min(self.source_len))
            .filter(|r| r.start < r.end)
            .collect();
        included.sort_by_key(|r| r.start);
        SourceCursor::new(&self.buf, self.source_len, included)
    }
}

/// In-memory [`Cursor`] over a [`SourceBuffer`].
///
/// Besides the [`Cursor`] contract it exposes what a host reads back after
/// a scan: the token span, the reported symbol, and [`reset`](Self::reset)
/// to resume scanning wherever the host's own lexing left off.
#[derive(Clone, Debug)]
pub struct SourceCursor<'a> {
    /// Source bytes followed by the `0x00` sentinel.
    buf: &'a [u8],
    source_len: u32,
    /// Included ranges in ascending order. Never overlapping.
    ranges: Vec<Range<u32>>,
    /// Index into `ranges` of the range containing `pos`.
    range_idx: usize,
    pos: u32,
    token_start: u32,
    token_end: Option<u32>,
    result_symbol: Option<u16>,
}

impl<'a> SourceCursor<'a> {
    fn new(buf: &'a [u8], source_len: u32, ranges: Vec<Range<u32>>) -> Self {
        debug_assert!(
            buf.get(source_len as usize) == Some(&0),
            "sentinel byte must follow the source"
        );
        let start = ranges.first().map_or(source_len, |r| r.start);
        let mut cursor = Self {
            buf,
            source_len,
            ranges,
            range_idx: 0,
            pos: start,
            token_start: start,
            token_end: None,
            result_symbol: None,
        };
        cursor.reset(start);
        cursor
    }

    /// Start a new token at byte offset `pos`.
    ///
    /// Clears the marked end and the reported symbol. A position outside
    /// every included range moves forward to the start of the next range.
    pub fn reset(&mut self, pos: u32) {
        let pos = pos.min(self.source_len);
        self.range_idx = self
            .ranges
            .iter()
            .position(|r| pos < r.end)
            .unwrap_or(self.ranges.len());
        self.pos = match self.ranges.get(self.range_idx) {
            Some(range) => pos.max(range.start),
            None => self.end_of_input(),
        };
        self.token_start = self.pos;
        self.token_end = None;
        self.result_symbol = None;
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Span of the token produced since the last [`reset`](Self::reset).
    pub fn token_span(&self) -> Span {
        let end = self.token_end.unwrap_or(self.pos);
        Span::new(self.token_start.min(end), end)
    }

    /// Symbol reported through [`Cursor::set_result_symbol`], if any.
    pub fn result_symbol(&self) -> Option<u16> {
        self.result_symbol
    }

    /// Reported symbol and span together, the pair a host records per token.
    pub fn token(&self) -> (Option<u16>, Span) {
        (self.result_symbol, self.token_span())
    }

    /// Position reported once every range is exhausted.
    fn end_of_input(&self) -> u32 {
        self.ranges.last().map_or(self.source_len, |r| r.end)
    }

    /// Byte at `pos`, or the sentinel past the source.
    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    /// Decode the character at the current position.
    ///
    /// Returns the character and its width in bytes. Invalid UTF-8 decodes
    /// as the raw byte value with width 1.
    fn decode(&self) -> (char, u32) {
        let lead = self.byte_at(self.pos);
        let width = utf8_char_width(lead);
        if width == 1 {
            return (char::from(lead), 1);
        }
        let start = self.pos as usize;
        let end = (start + width as usize).min(self.source_len as usize);
        match std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(c) => (c, width),
            None => (char::from(lead), 1),
        }
    }

    fn step(&mut self) {
        if self.is_eof() {
            return;
        }
        let (_, width) = self.decode();
        self.pos = self.pos.saturating_add(width);
        while let Some(range) = self.ranges.get(self.range_idx) {
            if self.pos < range.end {
                break;
            }
            self.range_idx += 1;
            match self.ranges.get(self.range_idx) {
                Some(next) => self.pos = self.pos.max(next.start),
                None => self.pos = self.end_of_input(),
            }
        }
    }
}

/// Number of bytes in the UTF-8 sequence introduced by `byte`.
///
/// Continuation and invalid lead bytes count as 1 so they are consumed
/// one at a time.
#[inline]
fn utf8_char_width(byte: u8) -> u32 {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

impl Cursor for SourceCursor<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        if self.is_eof() {
            '\0'
        } else {
            self.decode().0
        }
    }

    #[inline]
    fn advance(&mut self) {
        self.step();
    }

    #[inline]
    fn skip(&mut self) {
        self.step();
        self.token_start = self.pos;
    }

    #[inline]
    fn mark_end(&mut self) {
        self.token_end = Some(self.pos);
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "line length <= source_len which fits in u32"
    )]
    fn column(&mut self) -> u32 {
        let before = &self.buf[..self.pos as usize];
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
        // Count characters by their lead bytes; continuation bytes are 0b10xx_xxxx.
        before[line_start..]
            .iter()
            .filter(|&&b| b & 0xC0 != 0x80)
            .count() as u32
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.range_idx >= self.ranges.len()
    }

    fn is_at_included_range_start(&self) -> bool {
        self.ranges
            .get(self.range_idx)
            .is_some_and(|r| r.start == self.pos)
    }

    fn set_result_symbol(&mut self, symbol: u16) {
        self.result_symbol = Some(symbol);
    }
}
