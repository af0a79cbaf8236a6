//! Scanner limits.

/// Maximum number of entries on the indent stack, sentinel included.
pub const MAX_INDENT_DEPTH: usize = 256;

/// Maximum block comment nesting, the enclosing comment included.
pub const MAX_COMMENT_DEPTH: u32 = 256;

/// Serialization buffer size a tree-sitter host hands to the scanner.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Configuration for an [`ExternalScanner`](crate::ExternalScanner).
///
/// Every limit caps work or memory under adversarial input. Hitting one
/// turns the current call into "no match" instead of growing without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScannerConfig {
    /// Open layout sections allowed at once (sentinel included).
    pub max_indent_depth: usize,
    /// Nested `{-` levels a comment may reach.
    pub max_comment_depth: u32,
    /// Upper bound on the bytes written by `serialize`, regardless of the
    /// buffer the host provides.
    pub serialization_buffer_size: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            max_indent_depth: MAX_INDENT_DEPTH,
            max_comment_depth: MAX_COMMENT_DEPTH,
            serialization_buffer_size: SERIALIZATION_BUFFER_SIZE,
        }
    }
}

impl ScannerConfig {
    /// Create a config with the given indent stack bound.
    pub fn with_max_indent_depth(max_indent_depth: usize) -> Self {
        Self {
            max_indent_depth,
            ..Default::default()
        }
    }

    /// Create a config with the given comment nesting bound.
    pub fn with_max_comment_depth(max_comment_depth: u32) -> Self {
        Self {
            max_comment_depth,
            ..Default::default()
        }
    }

    /// Create a config with the given serialization budget.
    pub fn with_serialization_buffer_size(serialization_buffer_size: usize) -> Self {
        Self {
            serialization_buffer_size,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_limits() {
        let config = ScannerConfig::default();
        assert_eq!(config.max_indent_depth, 256);
        assert_eq!(config.max_comment_depth, 256);
        assert_eq!(config.serialization_buffer_size, 1024);
    }

    #[test]
    fn with_constructors_override_one_field() {
        let config = ScannerConfig::with_max_indent_depth(8);
        assert_eq!(config.max_indent_depth, 8);
        assert_eq!(config.max_comment_depth, MAX_COMMENT_DEPTH);

        let config = ScannerConfig::with_max_comment_depth(3);
        assert_eq!(config.max_comment_depth, 3);
        assert_eq!(config.max_indent_depth, MAX_INDENT_DEPTH);

        let config = ScannerConfig::with_serialization_buffer_size(16);
        assert_eq!(config.serialization_buffer_size, 16);
    }
}
