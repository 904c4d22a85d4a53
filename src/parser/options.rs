//! Parsing options and configuration.

use crate::extract::RenderMode;

/// Minimum number of extracted characters for a buffer to count as a résumé.
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 50;

/// Options for turning a document into a résumé record.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Minimum characters of extracted text (0 = no check)
    pub min_content_chars: usize,

    /// Whether a failed page-based open may be retried once in reduced mode
    pub fallback: bool,

    /// Engine configuration for the first open attempt
    pub render_mode: RenderMode,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum content length.
    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }

    /// Accept any amount of extracted text.
    pub fn without_min_content(mut self) -> Self {
        self.min_content_chars = 0;
        self
    }

    /// Enable or disable the reduced-mode retry.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Surface the first open failure instead of retrying.
    pub fn without_fallback(mut self) -> Self {
        self.fallback = false;
        self
    }

    /// Set the engine configuration for the first attempt.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Open straight in reduced mode.
    pub fn reduced(mut self) -> Self {
        self.render_mode = RenderMode::Reduced;
        self
    }

    /// Engine configuration for the retry, if one is allowed after `mode` failed.
    pub(crate) fn retry_mode(&self, mode: RenderMode) -> Option<RenderMode> {
        match mode {
            RenderMode::Full if self.fallback => Some(RenderMode::Reduced),
            _ => None,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            fallback: true,
            render_mode: RenderMode::Full,
        }
    }
}
