//! Task list commands.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use dashboard_core::models::{Priority, Task, TaskId, TaskInput};
use dashboard_http::ApiClient;

use super::JsonArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub command: TasksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TasksSubcommand {
    /// List all tasks
    List(JsonArgs),

    /// Create a task
    Create(CreateArgs),

    /// Update fields of an existing task
    Update(UpdateArgs),

    /// Delete a task
    Delete(TaskArgs),

    /// Flip a task's completion state
    Toggle(TaskArgs),

    /// Show completion progress
    Progress(JsonArgs),
}

#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Task ID
    pub id: TaskId,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Task title
    #[arg(long)]
    pub title: String,

    /// Task priority (low, medium, high)
    #[arg(long, default_value_t = Priority::Medium)]
    pub priority: Priority,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Task ID
    pub id: TaskId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub priority: Option<Priority>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,

    #[arg(long)]
    pub completed: Option<bool>,
}

pub async fn handle(cmd: TasksCommand, client: &ApiClient) -> Result<()> {
    match cmd.command {
        TasksSubcommand::List(args) => list(args, client).await,
        TasksSubcommand::Create(args) => create(args, client).await,
        TasksSubcommand::Update(args) => update(args, client).await,
        TasksSubcommand::Delete(args) => delete(args, client).await,
        TasksSubcommand::Toggle(args) => toggle(args, client).await,
        TasksSubcommand::Progress(args) => progress(args, client).await,
    }
}

async fn list(args: JsonArgs, client: &ApiClient) -> Result<()> {
    let tasks = client.tasks().await.context("Failed to list tasks")?;

    if args.pretty {
        return output::json_pretty(&tasks);
    }
    if args.json {
        return output::json_lines(&tasks);
    }

    if tasks.is_empty() {
        eprintln!("{}", "No tasks found.".dimmed());
        return Ok(());
    }

    for task in &tasks {
        print_task(task);
    }

    Ok(())
}

async fn create(args: CreateArgs, client: &ApiClient) -> Result<()> {
    let mut input = TaskInput::new(&args.title).priority(args.priority);
    if let Some(due) = args.due {
        input = input.due(due);
    }

    let task = client
        .create_task(&input)
        .await
        .context("Failed to create task")?;

    output::success(&format!("Created task #{}", task.id));
    print_task(&task);

    Ok(())
}

async fn update(args: UpdateArgs, client: &ApiClient) -> Result<()> {
    // The update endpoint replaces the whole task, so start from its current state
    let tasks = client.tasks().await.context("Failed to list tasks")?;
    let current = tasks
        .iter()
        .find(|t| t.id == args.id)
        .with_context(|| format!("Task #{} not found", args.id))?;

    let mut input = TaskInput::from(current);
    if let Some(title) = args.title {
        input.title = title;
    }
    if let Some(priority) = args.priority {
        input.priority = priority;
    }
    if let Some(due) = args.due {
        input.due_date = Some(due);
    }
    if let Some(completed) = args.completed {
        input.completed = Some(completed);
    }

    let task = client
        .update_task(args.id, &input)
        .await
        .context("Failed to update task")?;

    output::success(&format!("Updated task #{}", task.id));
    print_task(&task);

    Ok(())
}

async fn delete(args: TaskArgs, client: &ApiClient) -> Result<()> {
    client
        .delete_task(args.id)
        .await
        .context("Failed to delete task")?;

    output::success(&format!("Deleted task #{}", args.id));

    Ok(())
}

async fn toggle(args: TaskArgs, client: &ApiClient) -> Result<()> {
    let task = client
        .toggle_task(args.id)
        .await
        .context("Failed to toggle task")?;

    print_task(&task);

    Ok(())
}

async fn progress(args: JsonArgs, client: &ApiClient) -> Result<()> {
    let progress = client
        .task_progress()
        .await
        .context("Failed to fetch task progress")?;

    if args.enabled() {
        return output::json_pretty(&progress);
    }

    output::field("Completed", &format!("{}/{}", progress.completed, progress.total));
    output::field("Progress", &format!("{}%", progress.percentage));

    Ok(())
}

fn print_task(task: &Task) {
    let mark = if task.completed {
        "[x]".green()
    } else {
        "[ ]".normal()
    };
    let priority = match task.priority {
        Priority::High => task.priority.as_str().red(),
        Priority::Medium => task.priority.as_str().yellow(),
        Priority::Low => task.priority.as_str().dimmed(),
    };

    print!("{} #{} {} ({})", mark, task.id, task.title, priority);
    if let Some(due) = task.due_date {
        print!(" {} {}", "due".dimmed(), due);
    }
    println!();
}
