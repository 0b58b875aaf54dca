//! PDF extraction options.

use std::time::Duration;

/// Default cap on processed pages.
pub const DEFAULT_MAX_PAGES: u32 = 15;

/// Default vertical tolerance, in text-space units, for runs on one line.
pub const DEFAULT_LINE_TOLERANCE: f32 = 5.0;

/// Default bound on loading a single document.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimum characters for an extraction to count as successful.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 10;

/// Options for extracting text from PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Pages beyond this count are skipped
    pub max_pages: u32,

    /// Runs whose baselines differ by no more than this share a line
    pub line_tolerance: f32,

    /// Time allowed for each loader candidate
    pub load_timeout: Duration,

    /// Minimum characters of extracted text
    pub min_text_chars: usize,

    /// Whether to process pages in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page cap.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the same-line tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the per-candidate load timeout.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Set the minimum text length.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Process pages one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            parallel: false,
        }
    }
}
