//! Bounded undo history owned by the repository.

use taskpile_core::Task;
use time::OffsetDateTime;

/// Maximum number of reversible actions kept in memory.
pub const HISTORY_LIMIT: usize = 10;

/// What kind of mutation an entry reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// A task was created.
    Add,
    /// A task's fields were overwritten.
    Update,
    /// A task was removed.
    Delete,
    /// A task's completion flag was flipped.
    ToggleComplete,
    /// The collection was rearranged.
    Reorder,
    /// A bulk removal (completed-only or everything).
    Clear,
}

/// Record sufficient to reverse exactly one past mutation.
///
/// `tasks` holds whatever snapshot the reversal needs: the created task for
/// `Add`, the pre-mutation task for `Update`/`ToggleComplete`, the removed
/// tasks for `Delete`/`Clear`, and the entire pre-reorder collection for
/// `Reorder`.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Which mutation this entry reverses.
    pub kind: ActionKind,
    /// Snapshot needed for the reversal.
    pub tasks: Vec<Task>,
    /// When the mutation happened.
    pub at: OffsetDateTime,
}

/// Most-recent-first stack of at most [`HISTORY_LIMIT`] entries.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Push a new entry, evicting the oldest when the stack is full.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Pop the most recent entry, if any.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Number of undoable actions currently held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to undo.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry(kind: ActionKind) -> HistoryEntry {
        HistoryEntry {
            kind,
            tasks: Vec::new(),
            at: datetime!(2025-03-01 09:00 UTC),
        }
    }

    #[test]
    fn history_is_most_recent_first() {
        let mut history = History::default();
        history.push(entry(ActionKind::Add));
        history.push(entry(ActionKind::Delete));

        let top = history.pop().unwrap_or_else(|| panic!("history must not be empty"));
        assert_eq!(top.kind, ActionKind::Delete);
        let next = history.pop().unwrap_or_else(|| panic!("history must not be empty"));
        assert_eq!(next.kind, ActionKind::Add);
        assert!(history.pop().is_none());
    }

    #[test]
    fn pushing_past_the_limit_evicts_the_oldest() {
        let mut history = History::default();
        history.push(entry(ActionKind::Add));
        for _ in 0..HISTORY_LIMIT {
            history.push(entry(ActionKind::Update));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);

        // The initial Add entry fell off the end.
        let mut last = None;
        while let Some(popped) = history.pop() {
            last = Some(popped.kind);
        }
        assert_eq!(last, Some(ActionKind::Update));
    }
}
