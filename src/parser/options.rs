//! Parsing options and configuration.

/// Options for parsing exported HTML.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for malformed links
    pub error_mode: ErrorMode,

    /// Whether adjacent identically-styled runs are merged
    pub merge_runs: bool,

    /// Whether decoded non-breaking spaces become ordinary spaces
    pub nbsp_to_space: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep unrecognized hrefs verbatim).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable run merging.
    pub fn with_merge_runs(mut self, merge: bool) -> Self {
        self.merge_runs = merge;
        self
    }

    /// Enable or disable non-breaking-space substitution.
    pub fn with_nbsp_to_space(mut self, substitute: bool) -> Self {
        self.nbsp_to_space = substitute;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            merge_runs: true,
            nbsp_to_space: true,
        }
    }
}

/// Error handling mode for anchor hrefs that are not a recognized
/// redirect-wrapper shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the parse on any malformed link
    #[default]
    Strict,
    /// Keep the raw href verbatim and log a warning
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().lenient().with_merge_runs(false);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.merge_runs);
        assert!(options.nbsp_to_space);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.merge_runs);
        assert!(options.nbsp_to_space);
    }
}
