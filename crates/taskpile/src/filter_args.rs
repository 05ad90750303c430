//! Conversion from CLI flags to the core filter/sort configuration.

use clap::Args;
use taskpile_core::{Category, Direction, FilterOptions, Priority, SortBy, SortOptions};
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

pub(crate) const DAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Error type returned while constructing view options from CLI inputs.
#[derive(Debug, Error)]
pub enum ViewArgsError {
    /// A due-date bound did not parse as `YYYY-MM-DD`.
    #[error("invalid {field} date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Which flag carried the value.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// Filter flags shared by `ls` and `mv`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text to find in titles or descriptions.
    #[arg(long)]
    pub text: Option<String>,

    /// Hide completed tasks from the view.
    #[arg(long)]
    pub hide_completed: bool,

    /// Only show these categories (repeatable).
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<Category>,

    /// Only show these priorities (repeatable).
    #[arg(short = 'p', long = "priority")]
    pub priorities: Vec<Priority>,

    /// Inclusive lower bound on the due date (YYYY-MM-DD).
    #[arg(long)]
    pub due_from: Option<String>,

    /// Inclusive upper bound on the due date (YYYY-MM-DD).
    #[arg(long)]
    pub due_to: Option<String>,
}

impl FilterArgs {
    /// Build the core [`FilterOptions`].
    ///
    /// # Errors
    /// Returns an error when a due-date bound cannot be parsed.
    pub fn build(&self) -> Result<FilterOptions, ViewArgsError> {
        let mut options = FilterOptions {
            show_completed: !self.hide_completed,
            due_from: parse_day("due_from", self.due_from.as_deref())?,
            due_to: parse_day("due_to", self.due_to.as_deref())?,
            ..FilterOptions::default()
        };
        if let Some(text) = &self.text {
            options.search.clone_from(text);
        }
        options.categories.extend(self.categories.iter().copied());
        options.priorities.extend(self.priorities.iter().copied());
        Ok(options)
    }
}

/// Sort flags shared by `ls` and `mv`.
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Sort key: due, priority, created, or title.
    #[arg(long, default_value_t = SortBy::default())]
    pub sort: SortBy,

    /// Sort direction: asc or desc.
    #[arg(long, default_value_t = Direction::default())]
    pub direction: Direction,
}

impl SortArgs {
    /// Build the core [`SortOptions`].
    #[must_use]
    pub const fn build(&self) -> SortOptions {
        SortOptions {
            sort_by: self.sort,
            direction: self.direction,
        }
    }
}

/// Parse a `YYYY-MM-DD` day string.
///
/// # Errors
/// Returns an error naming the offending flag when parsing fails.
pub fn parse_day(field: &'static str, value: Option<&str>) -> Result<Option<Date>, ViewArgsError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Date::parse(trimmed, DAY_FORMAT)
        .map(Some)
        .map_err(|_| ViewArgsError::InvalidDate {
            field,
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_day_accepts_iso_days_and_blank_inputs() {
        let parsed = parse_day("due_from", Some("2025-03-05"))
            .unwrap_or_else(|err| panic!("must parse day: {err}"));
        assert_eq!(parsed, Some(date!(2025 - 03 - 05)));

        assert_eq!(
            parse_day("due_from", None).unwrap_or_else(|err| panic!("must accept None: {err}")),
            None
        );
        assert_eq!(
            parse_day("due_from", Some("  "))
                .unwrap_or_else(|err| panic!("must accept blank: {err}")),
            None
        );
    }

    #[test]
    fn parse_day_rejects_other_formats() {
        assert!(parse_day("due_to", Some("03/05/2025")).is_err());
        assert!(parse_day("due_to", Some("tomorrow")).is_err());
    }

    #[test]
    fn filter_args_map_onto_core_options() {
        let args = FilterArgs {
            text: Some("milk".into()),
            hide_completed: true,
            categories: vec![Category::Shopping],
            priorities: vec![Priority::Low, Priority::Medium],
            due_from: Some("2025-03-01".into()),
            due_to: None,
        };
        let options = args.build().unwrap_or_else(|err| panic!("build filter: {err}"));

        assert_eq!(options.search, "milk");
        assert!(!options.show_completed);
        assert!(options.categories.contains(&Category::Shopping));
        assert_eq!(options.priorities.len(), 2);
        assert_eq!(options.due_from, Some(date!(2025 - 03 - 01)));
        assert_eq!(options.due_to, None);
    }

    #[test]
    fn default_args_mean_no_restriction() {
        let options = FilterArgs::default()
            .build()
            .unwrap_or_else(|err| panic!("build filter: {err}"));
        assert!(options.search.is_empty());
        assert!(options.show_completed);
        assert!(options.categories.is_empty());
        assert!(options.priorities.is_empty());
    }
}
