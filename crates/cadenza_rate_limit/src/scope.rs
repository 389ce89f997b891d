//! Rate limit scopes.

/// Identifies one independent rate-limit counter.
///
/// Exhausting one scope never affects another: `user:1` and `user:2` hold
/// separate counters, as do any user scope and the global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Scope {
    /// The single shared bucket for all callers.
    #[display("global")]
    Global,
    /// A per-user bucket.
    #[display("user:{}", _0)]
    User(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_keys_are_distinct() {
        assert_eq!(Scope::Global.to_string(), "global");
        assert_eq!(Scope::User(42).to_string(), "user:42");
        assert_ne!(Scope::User(1), Scope::User(2));
    }
}
