//! Fixed-window rate limiting for outbound AI API calls.
//!
//! Two independent scopes guard every call: a per-user bucket and a single
//! global bucket. Windows are fixed, not sliding: a counter resets only
//! when a request arrives after the window has expired, never proactively.
//!
//! # Example
//!
//! ```
//! use cadenza_rate_limit::{FixedWindowLimiter, RateLimitConfig, Scope};
//!
//! let limiter = FixedWindowLimiter::new();
//! let config = RateLimitConfig::new(true, 2, 3600).unwrap();
//!
//! assert!(limiter.allow(&Scope::User(1), &config, 1_000));
//! assert!(limiter.allow(&Scope::User(1), &config, 1_010));
//! assert!(!limiter.allow(&Scope::User(1), &config, 1_020));
//! // A different user has its own counter.
//! assert!(limiter.allow(&Scope::User(2), &config, 1_020));
//! // The window elapses and the original user is admitted again.
//! assert!(limiter.allow(&Scope::User(1), &config, 4_600));
//! ```

mod config;
mod limiter;
mod scope;

pub use config::RateLimitConfig;
pub use limiter::FixedWindowLimiter;
pub use scope::Scope;
