//! Undo/redo history over full snapshots.
//!
//! The history never sees the live value; callers hand in the state as it
//! is right now and install whatever comes back. Snapshots are owned clones,
//! so mutating the live value can never reach into a stored one.

use std::collections::VecDeque;

/// Two stacks of snapshots with an optional depth limit.
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    /// Maximum undo depth (0 = unlimited)
    max_snapshots: usize,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: Clone> History<T> {
    /// Creates an empty history keeping at most `max_snapshots` undo steps.
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_snapshots,
        }
    }

    /// Records `current` as the state to return to, and drops the redo branch.
    ///
    /// Must be called before the mutation it guards.
    pub fn checkpoint(&mut self, current: &T) {
        self.undo_stack.push_back(current.clone());
        self.redo_stack.clear();
        if self.max_snapshots > 0 && self.undo_stack.len() > self.max_snapshots {
            self.undo_stack.pop_front();
            log::debug!("History limit {} reached; dropped oldest snapshot", self.max_snapshots);
        }
    }

    /// Steps back: returns the previous state and parks `current` for redo.
    ///
    /// Returns `None` (and changes nothing) when there is nothing to undo.
    pub fn undo(&mut self, current: &T) -> Option<T> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Steps forward: returns the next state and parks `current` for undo.
    pub fn redo(&mut self, current: &T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current.clone());
        Some(next)
    }

    /// Drops the most recent checkpoint without restoring it.
    ///
    /// Used when the edit the checkpoint guarded turned out to be a no-op.
    pub fn discard_last(&mut self) -> Option<T> {
        self.undo_stack.pop_back()
    }

    /// Empties both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut history: History<Vec<i32>> = History::new(0);
        assert_eq!(history.undo(&vec![1]), None);
        assert_eq!(history.redo(&vec![1]), None);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn new_checkpoint_clears_redo_branch() {
        let mut history = History::new(0);
        history.checkpoint(&vec![1]);
        let previous = history.undo(&vec![1, 2]).unwrap();
        assert_eq!(previous, vec![1]);
        assert!(history.can_redo());

        history.checkpoint(&previous);
        assert!(!history.can_redo());
    }

    #[test]
    fn snapshots_are_independent_of_the_live_value() {
        let mut history = History::new(0);
        let mut live = vec![1, 2];
        history.checkpoint(&live);
        live.push(3);
        live[0] = 99;
        assert_eq!(history.undo(&live), Some(vec![1, 2]));
    }

    #[test]
    fn depth_limit_drops_oldest_snapshot() {
        let mut history = History::new(2);
        history.checkpoint(&1);
        history.checkpoint(&2);
        history.checkpoint(&3);
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.undo(&4), Some(3));
        assert_eq!(history.undo(&3), Some(2));
        assert_eq!(history.undo(&2), None);
    }

    #[test]
    fn discard_last_removes_only_the_newest_checkpoint() {
        let mut history = History::new(0);
        history.checkpoint(&"a");
        history.checkpoint(&"b");
        assert_eq!(history.discard_last(), Some("b"));
        assert_eq!(history.undo_depth(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut history = History::new(0);
        history.checkpoint(&1);
        history.checkpoint(&2);
        history.undo(&3);
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    proptest! {
        #[test]
        fn undo_then_redo_restores_the_current_state(
            edits in prop::collection::vec(any::<i16>(), 1..24),
            undos in 1usize..24,
        ) {
            let mut history = History::new(0);
            let mut live: Vec<i16> = Vec::new();
            for value in edits {
                history.checkpoint(&live);
                live.push(value);
            }

            let undos = undos.min(history.undo_depth());
            let mut states = vec![live.clone()];
            for _ in 0..undos {
                live = history.undo(&live).expect("checkpointed state must be undoable");
                states.push(live.clone());
            }

            states.pop();
            while let Some(expected) = states.pop() {
                live = history.redo(&live).expect("undone state must be redoable");
                prop_assert_eq!(&live, &expected);
            }
            prop_assert!(!history.can_redo());
        }
    }
}
