//! Layout-aware external scanner for the Elm grammar.
//!
//! A tree-sitter grammar cannot express Elm's off-side rule, nested block
//! comments, or the bodies of multiline strings and GLSL blocks. The host
//! parser delegates those tokens to this crate: at every position where one
//! of them is acceptable it calls [`ExternalScanner::scan`] with the set of
//! acceptable [`TokenKind`]s, and the scanner either produces one token or
//! answers "no match".
//!
//! # Tokens
//!
//! - **Virtual layout tokens** (`EndDecl`, `OpenSection`, `EndSection`):
//!   zero-width, synthesized from indentation, delimiters, and `in`.
//! - **Content tokens**: comment, string, and shader bodies.
//! - **`MinusNoSpace`**: a `-` glued to its operand, i.e. negation.
//!
//! # State
//!
//! The scanner remembers an indent stack (open section columns), the last
//! measured column, and a queue of pending closes. The host checkpoints it
//! with [`ExternalScanner::serialize`] and rewinds with
//! [`ExternalScanner::deserialize`]; see [`codec`] for the byte layout.
//!
//! # Debugging
//!
//! - `RUST_LOG=elm_scanner=trace`: every token decision and layout step.
//! - `RUST_LOG=elm_scanner=debug`: state restores and resets.
//!
//! Call [`init_tracing`] once to install a subscriber.

pub mod codec;
mod config;
mod content;
mod dispatch;
mod error;
mod layout;
mod runback;
mod scanner;
mod state;
mod token_kind;

pub use codec::CodecError;
pub use config::{ScannerConfig, MAX_COMMENT_DEPTH, MAX_INDENT_DEPTH, SERIALIZATION_BUFFER_SIZE};
pub use error::ScanError;
pub use runback::{Runback, RunbackTag};
pub use scanner::ExternalScanner;
pub use state::{IndentStack, ScannerState};
pub use token_kind::{TokenKind, ValidSymbols};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
