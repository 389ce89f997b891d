//! Rate limit configuration.

use cadenza_error::{CadenzaResult, ConfigError};
use serde::{Deserialize, Serialize};

/// Per-scope rate limit settings.
///
/// A provider instance holds two of these: one for the user scope and one
/// for the global scope. They are checked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether this scope is limited at all.
    pub enabled: bool,
    /// Maximum number of requests granted per window.
    pub limit: u32,
    /// Window length in seconds. Always positive.
    pub window_secs: u64,
}

impl RateLimitConfig {
    /// Create a validated config. The window must be positive.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `window_secs` is zero.
    pub fn new(enabled: bool, limit: u32, window_secs: u64) -> CadenzaResult<Self> {
        if window_secs == 0 {
            return Err(ConfigError::new("Rate limit window must be positive").into());
        }
        Ok(Self {
            enabled,
            limit,
            window_secs,
        })
    }

    /// A disabled config that admits everything without accounting.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            limit: 0,
            window_secs: 3600,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_window_is_rejected() {
        assert!(RateLimitConfig::new(true, 10, 0).is_err());
    }

    #[test]
    fn default_is_disabled() {
        assert!(!RateLimitConfig::default().enabled);
    }
}
