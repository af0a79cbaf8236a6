//! The host-facing scanner handle.
//!
//! Owns one [`ScannerState`] for one parse session and translates between
//! the host's calling convention (booleans, byte buffers) and the internal
//! `Result`-based API. Errors never cross this boundary: a rejected scan is
//! "no match" and an unencodable state is a zero-length checkpoint.

use elm_lexer_core::Cursor;
use tracing::{debug, trace, warn};

use crate::codec;
use crate::config::ScannerConfig;
use crate::dispatch;
use crate::state::ScannerState;
use crate::token_kind::ValidSymbols;

/// External scanner instance for one parse session.
#[derive(Clone, Debug, Default)]
pub struct ExternalScanner {
    state: ScannerState,
    config: ScannerConfig,
}

impl ExternalScanner {
    /// Create a scanner with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with the given limits.
    pub fn with_config(config: ScannerConfig) -> Self {
        debug!(?config, "scanner created");
        ExternalScanner {
            state: ScannerState::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Read-only view of the current state.
    #[inline]
    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Try to produce one token at the cursor.
    ///
    /// On `true`, the token kind has been reported through
    /// [`Cursor::set_result_symbol`] and its end through the cursor's marks.
    /// On `false` the host lexes the position itself.
    pub fn scan<C: Cursor>(&mut self, cursor: &mut C, valid: ValidSymbols) -> bool {
        match dispatch::scan(&mut self.state, cursor, valid, &self.config) {
            Ok(Some(kind)) => {
                trace!(%kind, virtual_token = kind.is_virtual(), "emit");
                cursor.set_result_symbol(kind.symbol());
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(%err, "scan rejected");
                false
            }
        }
    }

    /// Write a checkpoint of the state into `buf`, returning its length.
    ///
    /// At most `serialization_buffer_size` bytes are used. Returns `0` when
    /// the state cannot be encoded; the host then cannot resume from this
    /// checkpoint.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        let capacity = buf.len().min(self.config.serialization_buffer_size);
        match codec::encode(&self.state, &mut buf[..capacity]) {
            Ok(len) => len,
            Err(err) => {
                warn!(%err, "state not serialized");
                0
            }
        }
    }

    /// Restore a checkpoint written by [`serialize`](Self::serialize).
    ///
    /// An empty buffer restores the fresh state. A malformed buffer is
    /// rejected and leaves the fresh state in place.
    pub fn deserialize(&mut self, buf: &[u8]) {
        self.state.reset();
        match codec::decode(buf, self.config.max_indent_depth) {
            Ok(state) => {
                debug!(
                    len = buf.len(),
                    depth = state.indents().depth(),
                    pending = state.runback().len(),
                    "state restored"
                );
                self.state = state;
            }
            Err(err) => warn!(%err, len = buf.len(), "serialized state rejected"),
        }
    }
}
