//! Error types for rowdeck.

/// Result type alias for rowdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the list core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row was addressed at an index path that does not exist.
    #[error("no row at section {section}, row {row}")]
    OutOfRange { section: usize, row: usize },

    /// The host supplied a contradictory or incomplete configuration.
    ///
    /// These indicate a programming error by the host and are reported
    /// fail-fast at configuration time; they are not recoverable at runtime.
    #[error("invalid list configuration: {0}")]
    Config(#[from] ConfigError),

    /// A controller tried to acquire a viewport that another controller
    /// already holds.
    #[error("viewport already has an attached controller")]
    ViewportInUse,
}

impl Error {
    /// Create an out-of-range error.
    pub fn out_of_range(section: usize, row: usize) -> Self {
        Self::OutOfRange { section, row }
    }
}

/// Configuration precondition violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A top header is rendered but no top header height was provided.
    #[error("a top header is configured but no top header height is set")]
    TopHeaderHeightMissing,

    /// Section headers are rendered but the section header height is not
    /// positive.
    #[error("section headers are configured but the section header height is not positive")]
    SectionHeaderHeightMissing,

    /// Auto-highlighting without highlight persistence is contradictory:
    /// the highlight would be placed and immediately lost on pointer exit.
    #[error("auto-highlighting the first row requires keeping the highlight")]
    AutoHighlightWithoutKeep,

    /// Rows must occupy vertical space for offset math to be meaningful.
    #[error("row height must be positive")]
    NonPositiveRowHeight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = Error::out_of_range(2, 7);
        assert_eq!(err.to_string(), "no row at section 2, row 7");
    }

    #[test]
    fn test_config_error_wraps() {
        let err: Error = ConfigError::NonPositiveRowHeight.into();
        assert!(matches!(
            err,
            Error::Config(ConfigError::NonPositiveRowHeight)
        ));
        assert!(err.to_string().contains("row height"));
    }
}
