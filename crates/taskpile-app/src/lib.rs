//! Application layer for taskpile.
//!
//! This crate owns the mutable task collection: CRUD, bulk clears, reorder,
//! and the bounded undo history, persisting through an injected store.

pub mod clock;
pub mod history;
pub mod repository;
pub mod state_store;

// Re-exports for convenience
pub use clock::{Clock, SystemClock};
pub use history::{ActionKind, HISTORY_LIMIT, History, HistoryEntry};
pub use repository::TaskRepository;
pub use state_store::StateStore;
