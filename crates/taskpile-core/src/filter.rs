use crate::task::{Category, Priority, Task};
use std::collections::BTreeSet;
use time::Date;

/// View-side filter configuration. Ephemeral: never persisted, resets to
/// [`FilterOptions::default`] on every start.
///
/// All predicates are AND-combined, and each is skipped while its field sits
/// at the "no restriction" default.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Free-text search matched against title and description.
    pub search: String,
    /// Include completed tasks in the view.
    pub show_completed: bool,
    /// Accepted categories; empty set means no restriction.
    pub categories: BTreeSet<Category>,
    /// Accepted priorities; empty set means no restriction.
    pub priorities: BTreeSet<Priority>,
    /// Inclusive lower bound on the due date.
    pub due_from: Option<Date>,
    /// Inclusive upper bound on the due date.
    pub due_to: Option<Date>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            show_completed: true,
            categories: BTreeSet::new(),
            priorities: BTreeSet::new(),
            due_from: None,
            due_to: None,
        }
    }
}

impl FilterOptions {
    /// Normalize the search query once. `None` when the query is blank.
    #[must_use]
    pub fn matcher(&self) -> Option<TextMatcher> {
        TextMatcher::new(&self.search)
    }

    /// Decide whether a task belongs in the filtered view.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_with(self.matcher().as_ref(), task)
    }

    /// Like [`matches`](Self::matches), but with a prebuilt matcher so
    /// projection loops normalize the query once instead of per task.
    #[must_use]
    pub fn matches_with(&self, matcher: Option<&TextMatcher>, task: &Task) -> bool {
        if !self.show_completed && task.completed {
            return false;
        }
        if let Some(matcher) = matcher {
            if !matcher.matches(task) {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&task.category) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }
        self.due_date_in_range(task)
    }

    /// A task without a due date never matches once either bound is set.
    fn due_date_in_range(&self, task: &Task) -> bool {
        if self.due_from.is_none() && self.due_to.is_none() {
            return true;
        }
        let Some(due) = task.due_date else {
            return false;
        };
        if self.due_from.is_some_and(|from| due < from) {
            return false;
        }
        !self.due_to.is_some_and(|to| due > to)
    }
}

/// Case-insensitive substring matcher over task text fields.
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank inputs.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Determine whether the title or description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title)
            || task
                .description
                .as_deref()
                .is_some_and(|text| self.matches_field(text))
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use time::macros::{date, datetime};

    fn task(title: &str) -> Task {
        Task {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            completed: false,
            created_at: datetime!(2025-03-01 09:00 UTC),
            updated_at: datetime!(2025-03-01 09:00 UTC),
            due_date: None,
            priority: Priority::Medium,
            category: Category::Other,
        }
    }

    #[test]
    fn matcher_skips_blank_queries() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new("   ").is_none());
        assert!(TextMatcher::new("\n").is_none());
    }

    #[test]
    fn matcher_finds_text_in_title_and_description() {
        let mut subject = task("Buy milk");
        subject.description = Some("Semi-skimmed, two liters".into());

        let matcher = TextMatcher::new("MILK")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&subject));

        let matcher = TextMatcher::new("liters")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&subject));

        let missing = TextMatcher::new("bread")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!missing.matches(&subject));
    }

    #[test]
    fn prebuilt_matcher_agrees_with_matches() {
        let mut subject = task("Buy milk");
        subject.description = Some("two liters".into());
        let other = task("Ship release");

        let filter = FilterOptions {
            search: "  MILK  ".into(),
            ..FilterOptions::default()
        };
        let matcher = filter.matcher();
        assert!(matcher.is_some());
        for candidate in [&subject, &other] {
            assert_eq!(
                filter.matches_with(matcher.as_ref(), candidate),
                filter.matches(candidate)
            );
        }

        // Blank query: no matcher, everything with default flags passes.
        let blank = FilterOptions::default();
        assert!(blank.matcher().is_none());
        assert!(blank.matches_with(None, &subject));
    }

    #[test]
    fn default_filter_matches_everything() {
        let mut done = task("done one");
        done.completed = true;
        let filter = FilterOptions::default();
        assert!(filter.matches(&task("anything")));
        assert!(filter.matches(&done));
    }

    #[test]
    fn hide_completed_excludes_done_tasks() {
        let mut done = task("finished");
        done.completed = true;
        let filter = FilterOptions {
            show_completed: false,
            ..FilterOptions::default()
        };
        assert!(!filter.matches(&done));
        assert!(filter.matches(&task("open")));
    }

    #[test]
    fn category_and_priority_sets_restrict_when_nonempty() {
        let mut subject = task("groceries");
        subject.category = Category::Shopping;
        subject.priority = Priority::Low;

        let mut filter = FilterOptions::default();
        filter.categories.insert(Category::Work);
        assert!(!filter.matches(&subject));

        filter.categories.insert(Category::Shopping);
        assert!(filter.matches(&subject));

        filter.priorities.insert(Priority::High);
        assert!(!filter.matches(&subject));
    }

    #[test]
    fn due_range_excludes_tasks_without_due_date() {
        let undated = task("someday");
        let mut dated = task("deadline");
        dated.due_date = Some(date!(2025 - 03 - 05));

        let filter = FilterOptions {
            due_from: Some(date!(2025 - 03 - 01)),
            ..FilterOptions::default()
        };
        assert!(!filter.matches(&undated));
        assert!(filter.matches(&dated));
    }

    #[test]
    fn due_range_bounds_are_inclusive() {
        let mut subject = task("edge");
        subject.due_date = Some(date!(2025 - 03 - 05));

        let filter = FilterOptions {
            due_from: Some(date!(2025 - 03 - 05)),
            due_to: Some(date!(2025 - 03 - 05)),
            ..FilterOptions::default()
        };
        assert!(filter.matches(&subject));

        let filter = FilterOptions {
            due_to: Some(date!(2025 - 03 - 04)),
            ..FilterOptions::default()
        };
        assert!(!filter.matches(&subject));
    }
}
