//! Storage abstraction required by [`TaskRepository`](crate::TaskRepository).

use anyhow::Error;
use taskpile_core::Task;
use taskpile_store_json::JsonStore;

/// Minimal persistence contract: load the whole collection once at startup,
/// save the whole collection after every mutation.
pub trait StateStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Load the persisted task collection. An absent backing record must be
    /// reported as an empty collection, not an error.
    ///
    /// # Errors
    /// Returns a store-specific error when reading fails.
    fn load(&self) -> Result<Vec<Task>, Self::Error>;

    /// Replace the persisted collection with the given one.
    ///
    /// # Errors
    /// Returns a store-specific error when writing fails.
    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error>;
}

impl StateStore for JsonStore {
    type Error = taskpile_store_json::JsonStoreError;

    fn load(&self) -> Result<Vec<Task>, Self::Error> {
        Self::load(self)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        Self::save(self, tasks)
    }
}

impl<S> StateStore for &S
where
    S: StateStore + ?Sized,
{
    type Error = S::Error;

    fn load(&self) -> Result<Vec<Task>, Self::Error> {
        S::load(self)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        S::save(self, tasks)
    }
}

impl<S> StateStore for std::sync::Arc<S>
where
    S: StateStore,
{
    type Error = S::Error;

    fn load(&self) -> Result<Vec<Task>, Self::Error> {
        S::load(self)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        S::save(self, tasks)
    }
}
