//! The authoritative task collection with bounded multi-step undo.
//!
//! Every mutating operation runs as one synchronous transaction: mutate the
//! in-memory collection, push a history entry, persist through the injected
//! [`StateStore`]. A failed persist is logged and the operation still
//! reports success — the in-memory state stays the source of truth for the
//! rest of the session and the next successful save reconciles the file.

use anyhow::{Context, Result};
use taskpile_core::{Task, TaskDraft, TaskId, TaskPatch};
use tracing::warn;

use crate::clock::Clock;
use crate::history::{ActionKind, History, HistoryEntry};
use crate::state_store::StateStore;

/// Owner of the raw task collection and the undo history.
///
/// The base ordering is newest-first: `add` inserts at the front. Filtering
/// and sorting live in `taskpile_core::view` and never touch this state.
pub struct TaskRepository<S, C> {
    tasks: Vec<Task>,
    history: History,
    store: S,
    clock: C,
}

impl<S, C> TaskRepository<S, C>
where
    S: StateStore,
    C: Clock,
{
    /// Load the persisted collection and start with an empty history.
    ///
    /// Filter/sort configuration and the history log are deliberately not
    /// persisted; only the task collection survives a restart.
    ///
    /// # Errors
    /// Returns an error when the backing store cannot be read.
    pub fn open(store: S, clock: C) -> Result<Self> {
        let tasks = store
            .load()
            .map_err(Into::into)
            .context("failed to load task collection")?;
        Ok(Self {
            tasks,
            history: History::default(),
            store,
            clock,
        })
    }

    /// Read-only view of the raw collection, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of undoable actions currently held.
    #[must_use]
    pub const fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Create a task from the draft and insert it at the front.
    ///
    /// Returns the created task so the caller can refresh its view.
    pub fn add(&mut self, draft: TaskDraft) -> Task {
        let now = self.clock.now();
        let task = Task {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            completed: false,
            created_at: now,
            updated_at: now,
            due_date: draft.due_date,
            priority: draft.priority,
            category: draft.category,
        };
        self.tasks.insert(0, task.clone());
        self.push_history(ActionKind::Add, vec![task.clone()]);
        self.persist();
        task
    }

    /// Apply a partial update to the task with the given id.
    ///
    /// Silent no-op (returns `None`) when the id is unknown. `id` and
    /// `created_at` are preserved; `updated_at` is bumped to now.
    pub fn update(&mut self, id: TaskId, patch: &TaskPatch) -> Option<Task> {
        let now = self.clock.now();
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let before = self.tasks[index].clone();

        patch.apply_to(&mut self.tasks[index]);
        self.tasks[index].updated_at = now;
        let updated = self.tasks[index].clone();

        self.push_history(ActionKind::Update, vec![before]);
        self.persist();
        Some(updated)
    }

    /// Remove the task with the given id. Returns `false` when unknown.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let removed = self.tasks.remove(index);
        self.push_history(ActionKind::Delete, vec![removed]);
        self.persist();
        true
    }

    /// Flip the completion flag of the task with the given id.
    ///
    /// Silent no-op (returns `None`) when the id is unknown.
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<Task> {
        let now = self.clock.now();
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let before = self.tasks[index].clone();

        self.tasks[index].completed = !self.tasks[index].completed;
        self.tasks[index].updated_at = now;
        let toggled = self.tasks[index].clone();

        self.push_history(ActionKind::ToggleComplete, vec![before]);
        self.persist();
        Some(toggled)
    }

    /// Move the task at `src` so it ends up at `dst`.
    ///
    /// Both indices address the repository's own ordering, never a filtered
    /// view; callers holding view positions must translate them first (see
    /// `taskpile_core::view::translate_view_indices`). Splice-out then
    /// splice-in: the task is removed at `src` and reinserted at `dst` in
    /// the shortened list. Out-of-range indices are rejected as a no-op.
    pub fn reorder(&mut self, src: usize, dst: usize) -> bool {
        if src >= self.tasks.len() || dst >= self.tasks.len() {
            return false;
        }
        let before = self.tasks.clone();
        let moved = self.tasks.remove(src);
        self.tasks.insert(dst, moved);

        self.push_history(ActionKind::Reorder, before);
        self.persist();
        true
    }

    /// Remove every completed task. Returns the number removed; zero means
    /// the operation was a no-op and nothing was recorded.
    pub fn clear_completed(&mut self) -> usize {
        let removed: Vec<Task> = self.tasks.iter().filter(|t| t.completed).cloned().collect();
        if removed.is_empty() {
            return 0;
        }
        self.tasks.retain(|t| !t.completed);
        let count = removed.len();
        self.push_history(ActionKind::Clear, removed);
        self.persist();
        count
    }

    /// Remove every task. Returns the number removed; zero means the
    /// collection was already empty and nothing was recorded.
    pub fn clear_all(&mut self) -> usize {
        if self.tasks.is_empty() {
            return 0;
        }
        let removed = std::mem::take(&mut self.tasks);
        let count = removed.len();
        self.push_history(ActionKind::Clear, removed);
        self.persist();
        count
    }

    /// Reverse the most recent mutation. Returns `false` when there is
    /// nothing to undo. Undo is not itself undoable: no entry is pushed and
    /// there is no redo stack.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };

        match entry.kind {
            ActionKind::Add => {
                self.tasks
                    .retain(|task| !entry.tasks.iter().any(|added| added.id == task.id));
            }
            ActionKind::Update | ActionKind::ToggleComplete => {
                for snapshot in entry.tasks {
                    if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == snapshot.id) {
                        // Full overwrite, not a merge.
                        *slot = snapshot;
                    }
                }
            }
            ActionKind::Delete | ActionKind::Clear => {
                // Removed tasks come back at the front. Bulk clears lose
                // the original positions; the entry does not record them.
                let mut restored = entry.tasks;
                restored.append(&mut self.tasks);
                self.tasks = restored;
            }
            ActionKind::Reorder => {
                self.tasks = entry.tasks;
            }
        }

        self.persist();
        true
    }

    fn push_history(&mut self, kind: ActionKind, tasks: Vec<Task>) {
        self.history.push(HistoryEntry {
            kind,
            tasks,
            at: self.clock.now(),
        });
    }

    /// Write-through persistence. The mutation already happened, so a failed
    /// save only logs; the next successful save reconciles the file.
    fn persist(&self) {
        if let Err(err) = self.store.save(&self.tasks) {
            let err: anyhow::Error = err.into();
            warn!(error = %err, "failed to persist task collection");
        }
    }
}
