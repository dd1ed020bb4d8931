use std::process::ExitCode;

use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use trove_core::date::{format_due_date, parse_date, today};
use trove_core::{Completion, TaskCollection, TaskDraft};

use trove_todo::cli::{Cli, Commands, ViewArgs};
use trove_todo::config::Config;
use trove_todo::display::{DisplayMode, format_summary, format_task, supports_color};
use trove_todo::{CliError, Collection, Result, TaskStore};

const EMPTY_ACTIVE: &str = "Your to-do list is currently empty. Add a task to get started.";
const EMPTY_BIN: &str = "The recycle bin is empty.";

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `TROVE_LOG` (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("TROVE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg = Config::load()?.with_data_directory(cli.data_dir);
    let store = TaskStore::from_config(&cfg);

    match cli.command {
        Commands::Add {
            title,
            details,
            due,
            priority,
            done,
        } => {
            let due_date = due.as_deref().map(parse_date).transpose()?;
            let draft = TaskDraft::new(title.join(" "), details)
                .with_due_date(due_date)
                .with_priority(priority)
                .with_completed(Completion::from(done));

            let task = store.add_task(draft)?;
            println!(
                "Task ❝{}❞ added successfully! (due: {})",
                task.title,
                format_due_date(task.due_date)
            );
        }

        Commands::List { view } => {
            let active = store.load(Collection::Active)?;
            print_collection(&active, view, EMPTY_ACTIVE);
        }

        Commands::Bin { view } => {
            let recycled = store.load(Collection::Recycled)?;
            print_collection(&recycled, view, EMPTY_BIN);
        }

        Commands::Edit {
            title,
            new_title,
            details,
            due,
            priority,
            completed,
        } => {
            if new_title.is_none()
                && details.is_none()
                && due.is_none()
                && priority.is_none()
                && completed.is_none()
            {
                return Err(CliError::validation(
                    "edit",
                    "At least one of --title, --details, --due, --priority or --completed must be provided",
                ));
            }

            let title = title.join(" ");
            let active = store.load(Collection::Active)?;
            let mut fields = active.get_or_err(&title)?.fields();

            if let Some(new_title) = new_title {
                fields.title = new_title;
            }
            if let Some(details) = details {
                fields.details = details;
            }
            if let Some(due) = due {
                fields.due_date = parse_date(&due)?;
            }
            if let Some(priority) = priority {
                fields.priority = priority;
            }
            if let Some(completed) = completed {
                fields.completed = completed;
            }

            let task = store.edit_task(&title, fields)?;
            println!("Task '{}' updated successfully!", task.title);
        }

        Commands::Delete { title } => {
            let title = title.join(" ");
            store.delete_task(&title)?;
            println!("Task '{}' moved to recycle bin.", title);
        }

        Commands::Restore { title } => {
            let title = title.join(" ");
            store.restore_task(&title)?;
            println!("Task '{}' restored successfully!", title);
        }
    }

    Ok(())
}

fn print_collection(tasks: &TaskCollection, view: ViewArgs, empty_message: &str) {
    if tasks.is_empty() {
        println!("{}", empty_message);
        return;
    }

    let mode = if view.compact {
        DisplayMode::Compact
    } else if view.detailed {
        DisplayMode::Detailed
    } else {
        DisplayMode::Default
    };
    let use_color = !view.no_color && supports_color();
    let today = today();

    for (index, task) in tasks.iter().enumerate() {
        println!("{}", format_task(task, index + 1, today, mode, use_color));
    }

    println!();
    println!(
        "{}",
        format_summary(
            tasks.len(),
            tasks.count_completed(),
            tasks.count_expired(today),
            use_color
        )
    );
}
