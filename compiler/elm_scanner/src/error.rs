//! Scan-time rejections.
//!
//! None of these reach the host as errors: the lifecycle layer logs them and
//! answers "no match", which sends the host back to grammar-driven lexing.

use thiserror::Error;

/// Why a scan was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ScanError {
    /// Opening another layout section would exceed the indent stack bound.
    #[error("layout nesting exceeds {limit} open sections")]
    IndentDepthExceeded { limit: usize },
    /// A block comment nests deeper than the configured bound.
    #[error("block comment nesting exceeds depth {limit}")]
    CommentDepthExceeded { limit: u32 },
}
