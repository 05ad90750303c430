//! Command dispatch and output rendering.

use anyhow::Result;
use taskpile_app::{Clock, StateStore, TaskRepository};
use taskpile_core::Task;

use crate::filter_args::DAY_FORMAT;
use crate::{Command, LsFormat};

mod handlers;

/// Execute a parsed command against the repository.
///
/// # Errors
/// Returns an error when user input cannot be interpreted or when
/// rendering fails. Unknown task ids are reported but do not fail.
pub fn run<S, C>(cmd: Command, repo: &mut TaskRepository<S, C>) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    match cmd {
        Command::Add {
            title,
            description,
            due,
            priority,
            category,
        } => handlers::handle_add(repo, &title, description, due.as_deref(), priority, category),
        Command::Ls {
            filter,
            sort,
            format,
        } => handlers::handle_ls(repo, &filter, &sort, format),
        Command::Edit {
            task,
            title,
            description,
            clear_description,
            due,
            clear_due,
            priority,
            category,
        } => handlers::handle_edit(
            repo,
            &task,
            title.as_deref(),
            description,
            clear_description,
            due.as_deref(),
            clear_due,
            priority,
            category,
        ),
        Command::Done { task } => handlers::handle_done(repo, &task),
        Command::Rm { task } => handlers::handle_rm(repo, &task),
        Command::Mv {
            from,
            to,
            filter,
            sort,
        } => handlers::handle_mv(repo, from, to, &filter, &sort),
        Command::ClearCompleted => handlers::handle_clear_completed(repo),
        Command::ClearAll { yes } => handlers::handle_clear_all(repo, yes),
        Command::Undo => handlers::handle_undo(repo),
    }
}

/// Print tasks in the requested format.
fn render_tasks(tasks: &[Task], format: LsFormat) -> Result<()> {
    match format {
        LsFormat::Text => {
            if tasks.is_empty() {
                println!("no tasks match");
                return Ok(());
            }
            for (index, task) in tasks.iter().enumerate() {
                println!("{}", render_line(index, task)?);
            }
            Ok(())
        }
        LsFormat::Json => {
            println!("{}", serde_json::to_string_pretty(tasks)?);
            Ok(())
        }
    }
}

fn render_line(index: usize, task: &Task) -> Result<String> {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!(
        "{index:>3} [{mark}] {} {:<8} {:<8} {}",
        task.id, task.priority, task.category, task.title
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!("  (due {})", due.format(DAY_FORMAT)?));
    }
    Ok(line)
}
