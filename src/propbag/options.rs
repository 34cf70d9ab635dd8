//! Decoder configuration.

/// Largest accepted absolute character count for a text value.
pub const DEFAULT_MAX_TEXT_CHARS: i32 = 10_000;
/// Largest accepted element count for an array of dictionaries.
pub const DEFAULT_MAX_ARRAY_LEN: u32 = 25_000;
/// Deepest accepted nesting of dictionaries inside structs and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Limits and diagnostics applied while decoding.
///
/// The defaults bound memory and time on malformed input; they are safety
/// caps, not limits defined by the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Text values whose character count falls outside `[-max, max]` are rejected.
    pub max_text_chars: i32,
    /// Arrays declaring more elements than this are rejected.
    pub max_array_len: u32,
    /// Maximum nesting depth; the top-level dictionary sits at depth 0.
    pub max_depth: usize,
    /// Compare each property's declared size with the bytes its payload
    /// consumed and log mismatches. Never affects the result.
    pub check_declared_sizes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            check_declared_sizes: cfg!(debug_assertions),
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_declared_size_check(mut self, enabled: bool) -> Self {
        self.check_declared_sizes = enabled;
        self
    }
}
