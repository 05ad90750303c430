//! Domain types and the derived-view projector for taskpile.

/// Filter configuration and text matching.
pub mod filter;
/// Identifier types.
pub mod id;
/// Sort configuration and comparators.
pub mod sort;
/// Task model and mutation payloads.
pub mod task;
/// Pure projection from the raw collection to the displayed sequence.
pub mod view;

pub use filter::{FilterOptions, TextMatcher};
pub use id::TaskId;
pub use sort::{Direction, ParseSortError, SortBy, SortOptions};
pub use task::{Category, FieldPatch, ParseFieldError, Priority, Task, TaskDraft, TaskPatch};
pub use view::{project, translate_view_indices};
