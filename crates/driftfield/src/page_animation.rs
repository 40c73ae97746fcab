//! Which pages have already played their entrance animation.
//!
//! Owned by the application shell. Soft navigations keep the record so a
//! page animates only on its first visit; a full reload starts fresh.

use std::collections::HashSet;

/// Set of page keys whose entrance animation has played.
#[derive(Debug, Clone, Default)]
pub struct PageAnimationRegistry {
    played: HashSet<String>,
}

impl PageAnimationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` on the first call for `key`, then `false` until
    /// [`PageAnimationRegistry::reset`].
    pub fn should_animate(&mut self, key: &str) -> bool {
        if self.played.contains(key) {
            return false;
        }
        self.played.insert(key.to_owned());
        true
    }

    /// Checks without recording.
    #[must_use]
    pub fn has_played(&self, key: &str) -> bool {
        self.played.contains(key)
    }

    /// Records `key` as played without asking.
    pub fn mark_played(&mut self, key: &str) {
        self.played.insert(key.to_owned());
    }

    /// Forgets every key. Call on full reload.
    pub fn reset(&mut self) {
        self.played.clear();
    }

    /// Number of keys recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.played.len()
    }

    /// True if nothing has played yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animates_once_per_key() {
        let mut registry = PageAnimationRegistry::new();

        assert!(registry.should_animate("/"));
        assert!(!registry.should_animate("/"));
        assert!(registry.should_animate("/logs"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reset_forgets() {
        let mut registry = PageAnimationRegistry::new();
        registry.mark_played("/");
        assert!(registry.has_played("/"));

        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.should_animate("/"));
    }
}
