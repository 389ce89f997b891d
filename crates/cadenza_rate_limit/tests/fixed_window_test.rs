//! Tests for fixed-window limiter semantics.

use cadenza_rate_limit::{FixedWindowLimiter, RateLimitConfig, Scope};

const HOUR: u64 = 3600;

#[test]
fn disabled_config_always_allows() {
    let limiter = FixedWindowLimiter::new();
    let config = RateLimitConfig::new(false, 0, HOUR).unwrap();

    for i in 0..100 {
        assert!(limiter.allow(&Scope::Global, &config, 1_000 + i));
    }
    // Disabled scopes do no accounting at all.
    assert_eq!(limiter.current_count(&Scope::Global), 0);
}

#[test]
fn exactly_first_n_requests_are_admitted() {
    let limiter = FixedWindowLimiter::new();
    let config = RateLimitConfig::new(true, 3, HOUR).unwrap();

    for _ in 0..3 {
        assert!(limiter.allow(&Scope::User(1), &config, 1_000));
    }
    assert!(!limiter.allow(&Scope::User(1), &config, 1_000));
    // Denials leave the counter unchanged.
    assert_eq!(limiter.current_count(&Scope::User(1)), 3);
}

#[test]
fn window_expiry_resets_the_counter() {
    let limiter = FixedWindowLimiter::new();
    let config = RateLimitConfig::new(true, 1, HOUR).unwrap();

    assert!(limiter.allow(&Scope::User(1), &config, 1_000));
    // Still inside the window.
    assert!(!limiter.allow(&Scope::User(1), &config, 1_000 + HOUR - 1));
    // Window boundary crossed; count resets to 1 for the admitted call.
    assert!(limiter.allow(&Scope::User(1), &config, 1_000 + HOUR));
    assert_eq!(limiter.current_count(&Scope::User(1)), 1);
}

#[test]
fn denials_do_not_accumulate_across_windows() {
    let limiter = FixedWindowLimiter::new();
    let config = RateLimitConfig::new(true, 1, HOUR).unwrap();

    assert!(limiter.allow(&Scope::Global, &config, 0));
    for i in 1..10 {
        assert!(!limiter.allow(&Scope::Global, &config, i));
    }
    assert!(limiter.allow(&Scope::Global, &config, HOUR + 1));
}

#[test]
fn scopes_hold_independent_counters() {
    let limiter = FixedWindowLimiter::new();
    let config = RateLimitConfig::new(true, 1, HOUR).unwrap();

    assert!(limiter.allow(&Scope::User(1), &config, 1_000));
    assert!(!limiter.allow(&Scope::User(1), &config, 1_000));
    // Exhausting user:1 does not affect user:2 or global.
    assert!(limiter.allow(&Scope::User(2), &config, 1_000));
    assert!(limiter.allow(&Scope::Global, &config, 1_000));
}

#[test]
fn reset_clears_all_usage() {
    let limiter = FixedWindowLimiter::new();
    let config = RateLimitConfig::new(true, 1, HOUR).unwrap();

    assert!(limiter.allow(&Scope::User(1), &config, 1_000));
    assert!(!limiter.allow(&Scope::User(1), &config, 1_000));
    limiter.reset();
    assert!(limiter.allow(&Scope::User(1), &config, 1_000));
}

#[test]
fn concurrent_requests_never_exceed_the_limit() {
    use std::sync::Arc;

    let limiter = Arc::new(FixedWindowLimiter::new());
    let config = RateLimitConfig::new(true, 50, HOUR).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            std::thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..25 {
                    if limiter.allow(&Scope::Global, &config, 1_000) {
                        admitted += 1;
                    }
                }
                admitted
            })
        })
        .collect();

    let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 50);
    assert_eq!(limiter.current_count(&Scope::Global), 50);
}
