// Edge-triggered state set

use std::collections::HashSet;
use std::hash::Hash;

/// A set of discrete states that remembers which members were added or
/// removed since the last history clear.
///
/// Membership is the current truth; the added/removed sets are the
/// per-frame history that drives edge-triggered logic (play an animation
/// once when a state turns on, not every frame it stays on).
#[derive(Debug)]
pub struct TransitionSet<T: Copy + Eq + Hash> {
    /// States that are currently active
    members: HashSet<T>,

    /// States that became active since the last clear
    added: HashSet<T>,

    /// States that became inactive since the last clear
    removed: HashSet<T>,
}

impl<T: Copy + Eq + Hash> TransitionSet<T> {
    /// Create an empty set with no history
    pub fn new() -> Self {
        Self {
            members: HashSet::new(),
            added: HashSet::new(),
            removed: HashSet::new(),
        }
    }

    /// Activate a state
    ///
    /// Records an added edge only when the state was actually inactive.
    /// Re-adding an active state changes nothing, within or across frames.
    pub fn add(&mut self, state: T) {
        if self.members.insert(state) {
            self.added.insert(state);
        }
    }

    /// Deactivate a state
    ///
    /// Records a removed edge only when the state was actually active.
    pub fn remove(&mut self, state: T) {
        if self.members.remove(&state) {
            self.removed.insert(state);
        }
    }

    /// Check if a state is currently active
    pub fn has(&self, state: T) -> bool {
        self.members.contains(&state)
    }

    /// Check if a state became active since the last clear
    pub fn was_added(&self, state: T) -> bool {
        self.added.contains(&state)
    }

    /// Check if a state became inactive since the last clear
    pub fn was_removed(&self, state: T) -> bool {
        self.removed.contains(&state)
    }

    /// Check if anything changed since the last clear
    pub fn been_modified(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// Forget this frame's history, leaving membership untouched
    ///
    /// Call exactly once per tick, after every edge query for that tick.
    pub fn clear_history(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    /// Iterate over the active states (copies, in no particular order)
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.members.iter().copied()
    }

    /// Number of active states
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if no states are active
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T: Copy + Eq + Hash> Default for TransitionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Flag {
        Running,
        Jumping,
        Falling,
    }

    #[test]
    fn test_add_records_edge() {
        let mut set = TransitionSet::new();
        set.add(Flag::Running);

        assert!(set.has(Flag::Running));
        assert!(set.was_added(Flag::Running));
        assert!(!set.was_removed(Flag::Running));
    }

    #[test]
    fn test_double_add_single_edge() {
        let mut set = TransitionSet::new();
        set.add(Flag::Running);
        set.clear_history();

        // Re-adding an active state must not produce a fresh edge
        set.add(Flag::Running);
        assert!(set.has(Flag::Running));
        assert!(!set.was_added(Flag::Running));
        assert!(!set.been_modified());
    }

    #[test]
    fn test_double_add_same_frame() {
        let mut set = TransitionSet::new();
        set.add(Flag::Jumping);
        set.add(Flag::Jumping);

        assert!(set.was_added(Flag::Jumping));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_records_edge() {
        let mut set = TransitionSet::new();
        set.add(Flag::Running);
        set.clear_history();

        set.remove(Flag::Running);
        assert!(!set.has(Flag::Running));
        assert!(set.was_removed(Flag::Running));
    }

    #[test]
    fn test_remove_absent_no_edge() {
        let mut set: TransitionSet<Flag> = TransitionSet::new();
        set.remove(Flag::Falling);

        assert!(!set.was_removed(Flag::Falling));
        assert!(!set.been_modified());
    }

    #[test]
    fn test_clear_history_keeps_membership() {
        let mut set = TransitionSet::new();
        set.add(Flag::Running);
        set.add(Flag::Jumping);
        set.clear_history();

        assert!(set.has(Flag::Running));
        assert!(set.has(Flag::Jumping));
        assert!(!set.was_added(Flag::Running));
        assert!(!set.was_added(Flag::Jumping));
        assert!(!set.been_modified());
    }

    #[test]
    fn test_remove_then_add_yields_both_edges() {
        let mut set = TransitionSet::new();
        set.add(Flag::Running);
        set.clear_history();

        // The remove-then-add pattern forces a fresh added edge
        set.remove(Flag::Running);
        set.add(Flag::Running);

        assert!(set.has(Flag::Running));
        assert!(set.was_removed(Flag::Running));
        assert!(set.was_added(Flag::Running));
    }

    #[test]
    fn test_add_then_remove_yields_both_edges() {
        let mut set = TransitionSet::new();
        set.add(Flag::Falling);
        set.remove(Flag::Falling);

        assert!(!set.has(Flag::Falling));
        assert!(set.was_added(Flag::Falling));
        assert!(set.was_removed(Flag::Falling));
    }

    #[test]
    fn test_been_modified() {
        let mut set: TransitionSet<Flag> = TransitionSet::new();
        assert!(!set.been_modified());

        set.add(Flag::Running);
        assert!(set.been_modified());

        set.clear_history();
        assert!(!set.been_modified());

        set.remove(Flag::Running);
        assert!(set.been_modified());
    }

    #[test]
    fn test_iter_snapshot() {
        let mut set = TransitionSet::new();
        set.add(Flag::Running);
        set.add(Flag::Falling);

        let states: Vec<Flag> = set.iter().collect();
        assert_eq!(states.len(), 2);
        assert!(states.contains(&Flag::Running));
        assert!(states.contains(&Flag::Falling));
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut set: TransitionSet<Flag> = TransitionSet::new();
        assert!(set.is_empty());

        set.add(Flag::Jumping);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());

        set.remove(Flag::Jumping);
        assert!(set.is_empty());
    }
}
