//! Fixed-window counter limiter.

use crate::{RateLimitConfig, Scope};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Counter state for one scope in its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowCounter {
    /// Epoch seconds at which the current window opened.
    window_start: u64,
    /// Requests granted so far in the current window.
    count: u32,
}

/// Fixed-window rate limiter keyed by [`Scope`].
///
/// The read of the counter, the window-reset decision, and the increment
/// happen under a single lock, so two concurrent requests can never both
/// observe `count < limit` and both increment past the limit.
#[derive(Debug, Default)]
pub struct FixedWindowLimiter {
    counters: Mutex<HashMap<Scope, WindowCounter>>,
}

impl FixedWindowLimiter {
    /// Create a limiter with no recorded usage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a request in `scope` is admitted at `now_secs`.
    ///
    /// Disabled configs always admit and do no accounting. Otherwise the
    /// counter for the scope is reset when absent or expired, then the
    /// request is admitted and counted if the window still has quota.
    /// A denial leaves the counter untouched.
    pub fn allow(&self, scope: &Scope, config: &RateLimitConfig, now_secs: u64) -> bool {
        if !config.enabled {
            return true;
        }

        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let counter = counters.entry(*scope).or_insert(WindowCounter {
            window_start: now_secs,
            count: 0,
        });

        if now_secs.saturating_sub(counter.window_start) >= config.window_secs {
            counter.window_start = now_secs;
            counter.count = 0;
        }

        if counter.count < config.limit {
            counter.count += 1;
            debug!(
                scope = %scope,
                count = counter.count,
                limit = config.limit,
                "Request admitted"
            );
            true
        } else {
            debug!(scope = %scope, limit = config.limit, "Request denied");
            false
        }
    }

    /// Admit using the wall clock.
    pub fn allow_now(&self, scope: &Scope, config: &RateLimitConfig) -> bool {
        self.allow(scope, config, epoch_secs())
    }

    /// Drop all counters, reopening every window.
    pub fn reset(&self) {
        self.counters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Granted count for a scope in its current window. Zero when the
    /// scope has never been seen.
    pub fn current_count(&self, scope: &Scope) -> u32 {
        self.counters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(scope)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

/// Current wall-clock time as epoch seconds.
fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
