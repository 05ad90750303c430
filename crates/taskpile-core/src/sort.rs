use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Sort key selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// By due date; tasks without one always rank last.
    DueDate,
    /// By priority level.
    Priority,
    /// By creation time.
    #[default]
    CreatedAt,
    /// By title, case-insensitively.
    Alphabetical,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl Direction {
    /// Flip an ordering according to the direction.
    #[must_use]
    pub const fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Asc => ord,
            Self::Desc => ord.reverse(),
        }
    }
}

/// View-side sort configuration. Ephemeral like [`FilterOptions`]: the
/// default (newest created first) is restored on every start.
///
/// [`FilterOptions`]: crate::filter::FilterOptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    /// Which key to compare.
    pub sort_by: SortBy,
    /// Ascending or descending.
    pub direction: Direction,
}

impl SortOptions {
    /// Compare two tasks under this configuration.
    ///
    /// Intended for a stable sort; equal keys keep their incoming relative
    /// order. Tasks without a due date rank after tasks with one under
    /// [`SortBy::DueDate`] regardless of direction.
    #[must_use]
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ord = match self.sort_by {
            SortBy::DueDate => match (a.due_date, b.due_date) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Greater,
                (Some(_), None) => return Ordering::Less,
                (Some(x), Some(y)) => x.cmp(&y),
            },
            SortBy::Priority => a.priority.cmp(&b.priority),
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            SortBy::Alphabetical => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        self.direction.apply(ord)
    }
}

/// Error returned when a sort token from the CLI cannot be parsed.
#[derive(Debug, Error)]
pub enum ParseSortError {
    /// Unknown sort key token.
    #[error("unknown sort key '{0}' (expected due, priority, created, or title)")]
    Key(String),
    /// Unknown direction token.
    #[error("unknown direction '{0}' (expected asc or desc)")]
    Direction(String),
}

impl FromStr for SortBy {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "due" | "due-date" | "duedate" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "created" | "created-at" | "createdat" => Ok(Self::CreatedAt),
            "title" | "alpha" | "alphabetical" => Ok(Self::Alphabetical),
            _ => Err(ParseSortError::Key(s.to_owned())),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseSortError::Direction(s.to_owned())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::DueDate => "due",
            Self::Priority => "priority",
            Self::CreatedAt => "created",
            Self::Alphabetical => "title",
        };
        f.write_str(token)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::task::{Category, Priority};
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
    fn missing_due_date_ranks_last_in_both_directions() {
        let mut dated = task("dated");
        dated.due_date = Some(date!(2025 - 03 - 10));
        let undated = task("undated");

        for direction in [Direction::Asc, Direction::Desc] {
            let sort = SortOptions {
                sort_by: SortBy::DueDate,
                direction,
            };
            assert_eq!(sort.compare(&dated, &undated), Ordering::Less);
            assert_eq!(sort.compare(&undated, &dated), Ordering::Greater);
        }
    }

    #[test]
    fn priority_compares_through_enum_ordering() {
        let mut high = task("high");
        high.priority = Priority::High;
        let mut low = task("low");
        low.priority = Priority::Low;

        let asc = SortOptions {
            sort_by: SortBy::Priority,
            direction: Direction::Asc,
        };
        assert_eq!(asc.compare(&low, &high), Ordering::Less);

        let desc = SortOptions {
            sort_by: SortBy::Priority,
            direction: Direction::Desc,
        };
        assert_eq!(desc.compare(&low, &high), Ordering::Greater);
    }

    #[test]
    fn alphabetical_ignores_case() {
        let a = task("apple");
        let b = task("Banana");
        let sort = SortOptions {
            sort_by: SortBy::Alphabetical,
            direction: Direction::Asc,
        };
        assert_eq!(sort.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn sort_tokens_parse() {
        assert_eq!("due".parse::<SortBy>().expect("must parse"), SortBy::DueDate);
        assert_eq!(
            "Alphabetical".parse::<SortBy>().expect("must parse"),
            SortBy::Alphabetical
        );
        assert!("size".parse::<SortBy>().is_err());
        assert_eq!(
            "DESC".parse::<Direction>().expect("must parse"),
            Direction::Desc
        );
        assert!("sideways".parse::<Direction>().is_err());
    }
}
