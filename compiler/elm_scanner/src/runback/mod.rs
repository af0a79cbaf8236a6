//! Pending layout closes, replayed one per scan call.
//!
//! A single line can close several sections at once, but the host accepts
//! one token per call. The layout engine pushes every close it discovers,
//! in pop order, then [`seals`](Runback::seal) the queue. Replay pops from
//! the back of the storage, so the first tag discovered is the first tag
//! replayed.
//!
//! The storage order is also the serialized order: the last stored tag is
//! the next one to replay.

use smallvec::SmallVec;

use crate::token_kind::{TokenKind, ValidSymbols};

/// A queued layout close.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunbackTag {
    EndDecl = 0,
    EndSection = 1,
}

impl RunbackTag {
    /// The token this tag replays as.
    #[inline]
    pub const fn token_kind(self) -> TokenKind {
        match self {
            RunbackTag::EndDecl => TokenKind::EndDecl,
            RunbackTag::EndSection => TokenKind::EndSection,
        }
    }

    /// Serialized byte.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Parse a serialized byte.
    pub const fn from_byte(byte: u8) -> Option<RunbackTag> {
        match byte {
            0 => Some(RunbackTag::EndDecl),
            1 => Some(RunbackTag::EndSection),
            _ => None,
        }
    }
}

/// Queue of layout closes awaiting replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Runback {
    tags: SmallVec<[RunbackTag; 8]>,
}

impl Runback {
    /// Number of queued tags.
    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The tag the next replay would produce.
    #[inline]
    pub fn peek(&self) -> Option<RunbackTag> {
        self.tags.last().copied()
    }

    /// Tags in storage order (next replay last).
    pub fn as_slice(&self) -> &[RunbackTag] {
        &self.tags
    }

    pub(crate) fn push(&mut self, tag: RunbackTag) {
        self.tags.push(tag);
    }

    /// Flip collection order into replay order.
    pub(crate) fn seal(&mut self) {
        self.tags.reverse();
    }

    pub(crate) fn clear(&mut self) {
        self.tags.clear();
    }

    /// Pop the next tag if the host accepts its token kind.
    ///
    /// Leaves the queue untouched when the next tag is not acceptable.
    pub(crate) fn take_acceptable(&mut self, valid: ValidSymbols) -> Option<TokenKind> {
        let kind = self.peek()?.token_kind();
        if !valid.accepts(kind) {
            return None;
        }
        self.tags.pop();
        Some(kind)
    }
}
