//! Task display formatting module
//!
//! Handles colored output and different view modes for tasks

use chrono::NaiveDate;
use colored::*;

use trove_core::date::{format_added_date, format_due_date};
use trove_core::{Priority, Remaining, Task};

/// Display mode for task list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    /// Minimal one-line format
    Compact,
    /// Full info, one field per line
    Detailed,
    /// Balanced view with clear status indicators (default)
    Default,
}

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn paint_priority(priority: Priority, use_color: bool) -> String {
    let label = format!("[{}]", priority);
    if !use_color {
        return label;
    }
    match priority {
        Priority::Low => label.green().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::High => label.red().bold().to_string(),
    }
}

fn paint_remaining(remaining: Remaining, use_color: bool) -> String {
    let label = format!("({})", remaining);
    if !use_color {
        return label;
    }
    match remaining {
        Remaining::Expired => label.red().bold().to_string(),
        r if r.is_imminent() => label.yellow().to_string(),
        _ => label.normal().to_string(),
    }
}

/// Format a task for display; `index` is its 1-based position in the list
pub fn format_task(
    task: &Task,
    index: usize,
    today: NaiveDate,
    mode: DisplayMode,
    use_color: bool,
) -> String {
    let checkbox = if task.is_done() { "[✓]" } else { "[ ]" };
    let remaining = task.remaining(today);
    let due = format_due_date(task.due_date);

    let title = if !use_color {
        task.title.clone()
    } else if remaining.is_expired() {
        task.title.dimmed().to_string()
    } else if task.is_done() {
        task.title.green().to_string()
    } else {
        task.title.bold().to_string()
    };

    let number = if use_color {
        format!("{}.", index).bright_black().to_string()
    } else {
        format!("{}.", index)
    };

    match mode {
        DisplayMode::Compact => {
            format!("{} {} {} {}", number, checkbox, title, paint_remaining(remaining, use_color))
        }
        DisplayMode::Detailed => {
            let parts = [
                format!("{} {} {}", number, checkbox, title),
                format!("Details: {}", task.details),
                format!("Due: {} {}", due, paint_remaining(remaining, use_color)),
                format!("Priority: {}", paint_priority(task.priority, use_color)),
                format!("Completed: {}", task.completed),
                format!("Added: {}", format_added_date(task.added_date())),
            ];
            parts.join("\n  ")
        }
        DisplayMode::Default => {
            let details = if use_color {
                task.details.bright_black().to_string()
            } else {
                task.details.clone()
            };
            format!(
                "{} {} {} {} {} {} {}",
                number,
                checkbox,
                paint_priority(task.priority, use_color),
                title,
                details,
                due,
                paint_remaining(remaining, use_color)
            )
        }
    }
}

/// Format a summary line for task list
pub fn format_summary(total: usize, completed: usize, expired: usize, use_color: bool) -> String {
    let parts = [
        format!("{} total", total),
        if use_color {
            format!("{} done", completed).green().to_string()
        } else {
            format!("{} done", completed)
        },
        if expired > 0 {
            if use_color {
                format!("{} expired", expired).red().to_string()
            } else {
                format!("{} expired", expired)
            }
        } else {
            String::new()
        },
    ];

    let summary: Vec<&str> = parts.iter().filter(|s| !s.is_empty()).map(|s| s.as_str()).collect();

    format!("[{}]", summary.join(" | "))
}
