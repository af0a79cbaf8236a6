//! Persistent scanner state: indent stack, measured column, runback queue.
//!
//! One [`ScannerState`] belongs to one parse session. Cloning it yields an
//! independent snapshot; the codec turns snapshots into bytes for the host's
//! checkpoints.

use smallvec::SmallVec;

use crate::error::ScanError;
use crate::runback::Runback;

/// Columns of the open layout sections, innermost last.
///
/// # Invariant
///
/// The bottom entry is a `0` sentinel that is never popped, so the stack is
/// never empty and [`top`](Self::top) is always defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentStack {
    entries: SmallVec<[u32; 16]>,
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentStack {
    /// A stack holding only the sentinel.
    pub fn new() -> Self {
        let mut entries = SmallVec::new();
        entries.push(0);
        IndentStack { entries }
    }

    /// Column of the innermost open section (`0` when none is open).
    #[inline]
    pub fn top(&self) -> u32 {
        self.entries.last().copied().unwrap_or(0)
    }

    /// Number of entries, sentinel included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Whether any section above the sentinel is open.
    #[inline]
    pub fn has_open_section(&self) -> bool {
        self.entries.len() > 1
    }

    /// Section columns above the sentinel, outermost first.
    pub fn sections(&self) -> &[u32] {
        &self.entries[1..]
    }

    /// Open a section at `column`.
    ///
    /// Fails without modifying the stack once it holds `limit` entries.
    pub(crate) fn push(&mut self, column: u32, limit: usize) -> Result<(), ScanError> {
        if self.entries.len() >= limit {
            return Err(ScanError::IndentDepthExceeded { limit });
        }
        self.entries.push(column);
        Ok(())
    }

    /// Close the innermost section. The sentinel stays.
    pub(crate) fn pop(&mut self) -> Option<u32> {
        if self.has_open_section() {
            self.entries.pop()
        } else {
            None
        }
    }
}

/// Everything the scanner remembers between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannerState {
    /// Column of the first non-space character on the last measured line.
    pub(crate) indent_length: u32,
    pub(crate) indents: IndentStack,
    pub(crate) runback: Runback,
}

impl ScannerState {
    /// Fresh state: sentinel-only stack, empty queue, column 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the fresh state in place.
    pub fn reset(&mut self) {
        self.indent_length = 0;
        self.indents = IndentStack::new();
        self.runback.clear();
    }

    /// Column measured after the most recent newline.
    #[inline]
    pub fn indent_length(&self) -> u32 {
        self.indent_length
    }

    #[inline]
    pub fn indents(&self) -> &IndentStack {
        &self.indents
    }

    #[inline]
    pub fn runback(&self) -> &Runback {
        &self.runback
    }
}
