//! CLI entry point for taskpile.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use config::Config;
use filter_args::{FilterArgs, SortArgs};
use taskpile_app::{SystemClock, TaskRepository};
use taskpile_core::{Category, Priority};
use taskpile_store_json::JsonStore;

mod commands;
mod config;
mod filter_args;

/// A task list that lives in a single JSON file.
#[derive(Parser, Debug)]
#[command(
    name = "taskpile",
    version,
    about = "taskpile: personal tasks with filtered views and bounded undo"
)]
struct Cli {
    /// Path to the data file (overrides config/env resolution).
    #[arg(long)]
    data_file: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

/// Output format for `ls`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LsFormat {
    /// Human-readable list.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        #[arg(long, default_value_t = Priority::default())]
        priority: Priority,
        #[arg(long, default_value_t = Category::default())]
        category: Category,
    },

    /// Show the filtered, sorted view of the collection.
    Ls {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        sort: SortArgs,
        #[arg(long, value_enum, default_value = "text")]
        format: LsFormat,
    },

    /// Edit fields of an existing task.
    Edit {
        #[arg(long)]
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description entirely.
        #[arg(long)]
        clear_description: bool,
        /// New due date as YYYY-MM-DD.
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date entirely.
        #[arg(long)]
        clear_due: bool,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        category: Option<Category>,
    },

    /// Toggle a task between open and completed.
    Done {
        #[arg(long)]
        task: String,
    },

    /// Delete a task.
    Rm {
        #[arg(long)]
        task: String,
    },

    /// Move a task within the current view; positions refer to the view
    /// produced by the same filter and sort flags.
    Mv {
        /// Current position in the view (0-based).
        #[arg(long)]
        from: usize,
        /// Target position in the view (0-based).
        #[arg(long)]
        to: usize,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        sort: SortArgs,
    },

    /// Remove every completed task.
    ClearCompleted,

    /// Remove every task.
    ClearAll {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Reverse the most recent mutation (up to 10 steps).
    Undo,
}

fn main() -> Result<()> {
    let Cli { data_file, cmd } = Cli::parse();
    install_tracing();

    let data_file = match data_file {
        Some(path) => path.into(),
        None => Config::load()?.data_file,
    };
    let store = JsonStore::new(data_file);
    let mut repo = TaskRepository::open(store, SystemClock)?;
    commands::run(cmd, &mut repo)
}

fn install_tracing() {
    // Respects RUST_LOG; defaults to INFO.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "taskpile",
            "add",
            "--title",
            "Buy milk",
            "--priority",
            "low",
            "--category",
            "shopping",
            "--due",
            "2025-03-05",
        ]);

        match cli.cmd {
            Command::Add {
                title,
                priority,
                category,
                due,
                ..
            } => {
                assert_eq!(title, "Buy milk");
                assert_eq!(priority, Priority::Low);
                assert_eq!(category, Category::Shopping);
                assert_eq!(due.as_deref(), Some("2025-03-05"));
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_ls_command_with_filters() {
        let cli = Cli::parse_from([
            "taskpile",
            "ls",
            "--text",
            "report",
            "--hide-completed",
            "--category",
            "work",
            "--sort",
            "priority",
            "--direction",
            "asc",
            "--format",
            "json",
        ]);

        match cli.cmd {
            Command::Ls { filter, sort, format } => {
                assert_eq!(filter.text.as_deref(), Some("report"));
                assert!(filter.hide_completed);
                assert_eq!(filter.categories, vec![Category::Work]);
                assert_eq!(sort.sort, taskpile_core::SortBy::Priority);
                assert_eq!(sort.direction, taskpile_core::Direction::Asc);
                assert_eq!(format, LsFormat::Json);
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn parse_mv_command_with_view_flags() {
        let cli = Cli::parse_from([
            "taskpile",
            "mv",
            "--from",
            "2",
            "--to",
            "0",
            "--hide-completed",
        ]);

        match cli.cmd {
            Command::Mv {
                from, to, filter, ..
            } => {
                assert_eq!(from, 2);
                assert_eq!(to, 0);
                assert!(filter.hide_completed);
            }
            _ => panic!("expected mv command"),
        }
    }

    #[test]
    fn edit_rejects_conflicting_description_flags() {
        let result = Cli::try_parse_from([
            "taskpile",
            "edit",
            "--task",
            "0195b2c0-0000-7000-8000-000000000000",
            "--description",
            "text",
            "--clear-description",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_undo_command() {
        let cli = Cli::parse_from(["taskpile", "undo"]);
        assert!(matches!(cli.cmd, Command::Undo));
    }
}
