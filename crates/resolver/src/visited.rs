//! Visited-identifier state
//!
//! Once an identifier has been assigned to an emitted cluster it can never be
//! reassigned. This state object is the only mutation surface the resolver
//! touches, so a sharded implementation can wrap it in a single synchronized
//! component rather than sharing ambient mutable state.

use std::collections::HashSet;

/// The set of identifiers already assigned to an emitted cluster
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Has this identifier been assigned to a cluster?
    pub fn is_visited(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Assign this identifier to the current cluster
    pub fn mark_visited(&mut self, id: impl Into<String>) {
        self.seen.insert(id.into());
    }

    /// Number of assigned identifiers
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_check() {
        let mut visited = VisitedSet::new();
        assert!(!visited.is_visited("GB-CHC-1"));

        visited.mark_visited("GB-CHC-1");
        assert!(visited.is_visited("GB-CHC-1"));
        assert!(!visited.is_visited("GB-COH-9"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_marking_twice_is_harmless() {
        let mut visited = VisitedSet::new();
        visited.mark_visited("GB-CHC-1");
        visited.mark_visited("GB-CHC-1");
        assert_eq!(visited.len(), 1);
    }
}
