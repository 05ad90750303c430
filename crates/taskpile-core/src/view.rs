//! Derived view over the raw task collection.
//!
//! Filtering and sorting never mutate the repository's collection; the
//! projector clones matching tasks into a fresh sequence the presentation
//! layer can render and index freely.

use crate::filter::FilterOptions;
use crate::sort::SortOptions;
use crate::task::Task;

/// Produce the filtered, sorted sequence for display.
///
/// Pure function of its inputs: identical inputs yield identical output and
/// the source slice is left untouched. The sort is stable, so tasks with
/// equal keys keep their relative order from the filtered sequence.
#[must_use]
pub fn project(tasks: &[Task], filter: &FilterOptions, sort: &SortOptions) -> Vec<Task> {
    // Normalize the search query once, not per task.
    let matcher = filter.matcher();
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|t| filter.matches_with(matcher.as_ref(), t))
        .cloned()
        .collect();
    view.sort_by(|a, b| sort.compare(a, b));
    view
}

/// Translate drag positions within a projected view into raw-collection
/// indices suitable for `reorder`.
///
/// The view indexes a filtered/sorted sequence while reorder operates on the
/// repository's own ordering, so the ids at `src`/`dst` are resolved first
/// and then located in `raw`. Returns `None` when either position is out of
/// range or an id has vanished from the raw collection (stale view) — the
/// caller must treat that as "do not reorder".
#[must_use]
pub fn translate_view_indices(
    view: &[Task],
    raw: &[Task],
    src: usize,
    dst: usize,
) -> Option<(usize, usize)> {
    let src_id = view.get(src)?.id;
    let dst_id = view.get(dst)?.id;
    let raw_src = raw.iter().position(|t| t.id == src_id)?;
    let raw_dst = raw.iter().position(|t| t.id == dst_id)?;
    Some((raw_src, raw_dst))
}
