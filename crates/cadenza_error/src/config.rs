//! Configuration error types.

/// Configuration error with source location.
///
/// Raised for invalid or unsupported parameter combinations detected at
/// request-build time, such as an unrecognized aspect ratio. These are
/// programming/configuration mistakes, not runtime conditions, and abort
/// the current call.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadenza_error::ConfigError;
    ///
    /// let err = ConfigError::new("Invalid aspect ratio: panoramic");
    /// assert!(err.message.contains("aspect ratio"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
