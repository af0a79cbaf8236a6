//! Byte encoding of [`ScannerState`] for host checkpoints.
//!
//! # Layout
//!
//! ```text
//! [runback_count: u8][runback tags: u8 * count][width: u8 = 4][indent_length: u32 LE][sections: u8 * n]
//! ```
//!
//! Tags are written in storage order (next replay last). Sections are the
//! indent stack above the sentinel, outermost first; the sentinel itself is
//! implied. An empty buffer encodes the fresh state.
//!
//! The format is internal to one scanner build and carries no version.
//! Values that do not fit their field are rejected rather than truncated.

use thiserror::Error;

use crate::runback::RunbackTag;
use crate::state::ScannerState;

/// Bytes used for `indent_length`.
const INDENT_LENGTH_WIDTH: u8 = 4;

/// Why a state could not be encoded or a buffer could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CodecError {
    #[error("serialized state needs {needed} bytes but the buffer holds {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    #[error("{len} queued layout tokens exceed the 255-entry encoding limit")]
    RunbackTooLong { len: usize },
    #[error("section column {column} exceeds the one-byte encoding limit")]
    ColumnOutOfRange { column: u32 },
    #[error("serialized state truncated: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },
    #[error("unknown runback tag byte {0:#04x}")]
    InvalidTag(u8),
    #[error("indent length width {0} exceeds 4 bytes")]
    InvalidIndentWidth(u8),
    #[error("serialized indent stack exceeds {limit} entries")]
    StackTooDeep { limit: usize },
}

/// Number of bytes [`encode`] writes for `state`.
pub fn encoded_len(state: &ScannerState) -> usize {
    1 + state.runback.len() + 1 + usize::from(INDENT_LENGTH_WIDTH) + state.indents.sections().len()
}

/// Encode `state` into the front of `buf`, returning the bytes written.
///
/// Nothing is written unless the whole state fits.
pub fn encode(state: &ScannerState, buf: &mut [u8]) -> Result<usize, CodecError> {
    let runback = state.runback.as_slice();
    let runback_count = u8::try_from(runback.len())
        .map_err(|_| CodecError::RunbackTooLong { len: runback.len() })?;
    let sections = state
        .indents
        .sections()
        .iter()
        .map(|&column| u8::try_from(column).map_err(|_| CodecError::ColumnOutOfRange { column }))
        .collect::<Result<Vec<u8>, _>>()?;

    let needed = encoded_len(state);
    if needed > buf.len() {
        return Err(CodecError::BufferTooSmall {
            needed,
            capacity: buf.len(),
        });
    }

    let mut out = buf.iter_mut();
    let mut write = |byte: u8| {
        if let Some(slot) = out.next() {
            *slot = byte;
        }
    };
    write(runback_count);
    runback.iter().for_each(|tag| write(tag.to_byte()));
    write(INDENT_LENGTH_WIDTH);
    state.indent_length.to_le_bytes().into_iter().for_each(&mut write);
    sections.into_iter().for_each(&mut write);
    Ok(needed)
}

/// Decode a buffer produced by [`encode`].
///
/// An empty buffer yields the fresh state. `max_indent_depth` bounds the
/// restored stack (sentinel included) the same way it bounds live pushes.
pub fn decode(buf: &[u8], max_indent_depth: usize) -> Result<ScannerState, CodecError> {
    let mut state = ScannerState::new();
    if buf.is_empty() {
        return Ok(state);
    }

    let mut reader = Reader { buf, pos: 0 };
    let runback_count = reader.byte()?;
    for &byte in reader.take(usize::from(runback_count))? {
        state
            .runback
            .push(RunbackTag::from_byte(byte).ok_or(CodecError::InvalidTag(byte))?);
    }

    let width = reader.byte()?;
    if width > INDENT_LENGTH_WIDTH {
        return Err(CodecError::InvalidIndentWidth(width));
    }
    let mut le_bytes = [0u8; 4];
    le_bytes[..usize::from(width)].copy_from_slice(reader.take(usize::from(width))?);
    state.indent_length = u32::from_le_bytes(le_bytes);

    for &column in reader.rest() {
        state
            .indents
            .push(u32::from(column), max_indent_depth)
            .map_err(|_| CodecError::StackTooDeep {
                limit: max_indent_depth,
            })?;
    }
    Ok(state)
}

/// Forward-only reader with truncation checks.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos + n;
        let bytes = self.buf.get(self.pos..end).ok_or(CodecError::Truncated {
            needed: end,
            found: self.buf.len(),
        })?;
        self.pos = end;
        Ok(bytes)
    }

    fn byte(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos..];
        self.pos = self.buf.len();
        rest
    }
}
