use imitation_core::types::PoolToken;
use std::collections::HashSet;
use std::sync::Mutex;

/// Set of presence tokens indicating "players currently looking". Decoupled
/// from matchmaking — it's an availability signal only, a client never
/// derives a match from pool membership directly.
#[derive(Default)]
pub struct PoolRegistry {
    tokens: Mutex<HashSet<PoolToken>>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    /// `Join(token?) -> token`. Mints a random token when none is supplied.
    /// Returns `(token, created)` where `created` is false when the caller's
    /// own token was already present.
    pub fn join(&self, token: Option<PoolToken>) -> (PoolToken, bool) {
        let token = token.unwrap_or_else(PoolToken::random);
        let mut tokens = self.tokens.lock().unwrap();
        let created = tokens.insert(token.clone());
        (token, created)
    }

    pub fn leave(&self, token: &PoolToken) {
        self.tokens.lock().unwrap().remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_without_token_mints_one_and_increments_count() {
        let pool = PoolRegistry::new();
        let (token, created) = pool.join(None);
        assert!(created);
        assert_eq!(pool.count(), 1);
        assert!(!token.as_str().is_empty());
    }

    #[test]
    fn rejoining_same_token_is_idempotent() {
        let pool = PoolRegistry::new();
        let (token, _) = pool.join(None);
        let (_, created_again) = pool.join(Some(token));
        assert!(!created_again);
        assert_eq!(pool.count(), 1);
    }

    #[test]
    fn leave_removes_token_and_decrements_count() {
        let pool = PoolRegistry::new();
        let (token, _) = pool.join(None);
        pool.leave(&token);
        assert_eq!(pool.count(), 0);
    }

    #[test]
    fn leaving_unknown_token_is_a_no_op() {
        let pool = PoolRegistry::new();
        pool.leave(&PoolToken::random());
        assert_eq!(pool.count(), 0);
    }
}
