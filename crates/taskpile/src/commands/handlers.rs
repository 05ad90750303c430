//! One handler per subcommand.

use std::io::{self, Write as _};

use anyhow::{Context as _, Result, bail};
use taskpile_app::{Clock, StateStore, TaskRepository};
use taskpile_core::{
    Category, FieldPatch, Priority, TaskDraft, TaskId, TaskPatch, project, translate_view_indices,
};

use crate::LsFormat;
use crate::filter_args::{FilterArgs, SortArgs, parse_day};

use super::render_tasks;

pub fn handle_add<S, C>(
    repo: &mut TaskRepository<S, C>,
    title: &str,
    description: Option<String>,
    due: Option<&str>,
    priority: Priority,
    category: Category,
) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    let title = title.trim().to_owned();
    if title.is_empty() {
        bail!("title must not be blank");
    }
    let draft = TaskDraft {
        title,
        description: description.filter(|d| !d.trim().is_empty()),
        due_date: parse_day("due", due)?,
        priority,
        category,
    };
    let task = repo.add(draft);
    println!("added {} ({})", task.title, task.id);
    Ok(())
}

pub fn handle_ls<S, C>(
    repo: &TaskRepository<S, C>,
    filter: &FilterArgs,
    sort: &SortArgs,
    format: LsFormat,
) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    let view = project(repo.tasks(), &filter.build()?, &sort.build());
    render_tasks(&view, format)
}

#[allow(clippy::too_many_arguments)]
pub fn handle_edit<S, C>(
    repo: &mut TaskRepository<S, C>,
    task: &str,
    title: Option<&str>,
    description: Option<String>,
    clear_description: bool,
    due: Option<&str>,
    clear_due: bool,
    priority: Option<Priority>,
    category: Option<Category>,
) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    let id = parse_id(task)?;
    let title = match title.map(str::trim) {
        Some("") => bail!("title must not be blank"),
        other => other.map(str::to_owned),
    };
    let patch = TaskPatch {
        title,
        description: field_patch(description, clear_description),
        due_date: parse_day("due", due)?
            .map(FieldPatch::Set)
            .or(clear_due.then_some(FieldPatch::Clear)),
        priority,
        category,
    };
    if patch.is_empty() {
        println!("nothing to change");
        return Ok(());
    }
    match repo.update(id, &patch) {
        Some(updated) => println!("updated {} ({})", updated.title, updated.id),
        None => println!("no task with id {id}"),
    }
    Ok(())
}

pub fn handle_done<S, C>(repo: &mut TaskRepository<S, C>, task: &str) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    let id = parse_id(task)?;
    match repo.toggle_completion(id) {
        Some(toggled) if toggled.completed => println!("completed {}", toggled.title),
        Some(toggled) => println!("reopened {}", toggled.title),
        None => println!("no task with id {id}"),
    }
    Ok(())
}

pub fn handle_rm<S, C>(repo: &mut TaskRepository<S, C>, task: &str) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    let id = parse_id(task)?;
    if repo.delete(id) {
        println!("deleted {id}");
    } else {
        println!("no task with id {id}");
    }
    Ok(())
}

pub fn handle_mv<S, C>(
    repo: &mut TaskRepository<S, C>,
    from: usize,
    to: usize,
    filter: &FilterArgs,
    sort: &SortArgs,
) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    let view = project(repo.tasks(), &filter.build()?, &sort.build());
    let Some((src, dst)) = translate_view_indices(&view, repo.tasks(), from, to) else {
        println!(
            "no task at view position {}",
            stale_view_position(view.len(), from, to)
        );
        return Ok(());
    };
    if repo.reorder(src, dst) {
        println!("moved task to position {to}");
    } else {
        println!("could not move task; run ls and retry");
    }
    Ok(())
}

/// Which of the two view positions made the move fail.
const fn stale_view_position(view_len: usize, from: usize, to: usize) -> usize {
    if from >= view_len { from } else { to }
}

pub fn handle_clear_completed<S, C>(repo: &mut TaskRepository<S, C>) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    let removed = repo.clear_completed();
    println!("removed {removed} completed task(s)");
    Ok(())
}

pub fn handle_clear_all<S, C>(repo: &mut TaskRepository<S, C>, yes: bool) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    if !yes && !confirm("delete ALL tasks? [y/N] ")? {
        println!("aborted");
        return Ok(());
    }
    let removed = repo.clear_all();
    println!("removed {removed} task(s)");
    Ok(())
}

pub fn handle_undo<S, C>(repo: &mut TaskRepository<S, C>) -> Result<()>
where
    S: StateStore,
    C: Clock,
{
    if repo.undo() {
        println!("undid the last change ({} left)", repo.history_len());
    } else {
        println!("nothing to undo");
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<TaskId> {
    raw.trim()
        .parse()
        .with_context(|| format!("'{raw}' is not a task id"))
}

fn field_patch(value: Option<String>, clear: bool) -> Option<FieldPatch<String>> {
    match (value, clear) {
        (Some(v), _) => Some(FieldPatch::Set(v)),
        (None, true) => Some(FieldPatch::Clear),
        (None, false) => None,
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
