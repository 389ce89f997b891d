//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, StorageError};

/// The foundation error enum, one variant per error domain.
///
/// # Examples
///
/// ```
/// use cadenza_error::{CadenzaError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: CadenzaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CadenzaErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Cadenza error with kind discrimination.
///
/// # Examples
///
/// ```
/// use cadenza_error::{CadenzaResult, ConfigError};
///
/// fn might_fail() -> CadenzaResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cadenza Error: {}", _0)]
pub struct CadenzaError(Box<CadenzaErrorKind>);

impl CadenzaError {
    /// Create a new error from a kind.
    pub fn new(kind: CadenzaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CadenzaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CadenzaErrorKind
impl<T> From<T> for CadenzaError
where
    T: Into<CadenzaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cadenza operations.
pub type CadenzaResult<T> = std::result::Result<T, CadenzaError>;
