use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use trove_core::{Completion, Priority};

#[derive(Parser)]
#[command(name = "trove")]
#[command(about = "A to-do list with a recycle bin, kept in plain JSON files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    /// Directory holding the task files (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared rendering flags for list views
#[derive(Args, Clone, Copy, Debug)]
pub struct ViewArgs {
    /// Use compact one-line format
    #[arg(long, short = 'c', conflicts_with = "detailed")]
    pub compact: bool,
    /// Use detailed format with full info
    #[arg(long)]
    pub detailed: bool,
    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adds a task
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// What the task is about
        #[arg(long, short = 'D', value_name = "TEXT")]
        details: String,
        /// Due date (defaults to today)
        #[arg(long, short = 'd', value_name = "DATE")]
        due: Option<String>,
        /// Task priority (low, medium, high)
        #[arg(long, short = 'p', value_name = "PRIORITY", default_value = "low")]
        priority: Priority,
        /// Mark the task as already completed
        #[arg(long)]
        done: bool,
    },

    /// Lists active tasks
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Lists tasks in the recycle bin
    Bin {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Edit a task; fields not given keep their current value
    Edit {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// New title
        #[arg(long = "title", short = 't', value_name = "TITLE")]
        new_title: Option<String>,
        /// New details
        #[arg(long, short = 'D', value_name = "TEXT")]
        details: Option<String>,
        /// New due date
        #[arg(long, short = 'd', value_name = "DATE")]
        due: Option<String>,
        /// New priority (low, medium, high)
        #[arg(long, short = 'p', value_name = "PRIORITY")]
        priority: Option<Priority>,
        /// New completion status (yes, no)
        #[arg(long, value_name = "YES|NO")]
        completed: Option<Completion>,
    },

    /// Moves a task to the recycle bin
    Delete {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Restores a task from the recycle bin
    Restore {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "trove", "add", "Complete", "AI", "Project", "-D", "Research", "--due", "tomorrow",
            "-p", "high",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                title,
                details,
                due,
                priority,
                done,
            } => {
                assert_eq!(title.join(" "), "Complete AI Project");
                assert_eq!(details, "Research");
                assert_eq!(due.as_deref(), Some("tomorrow"));
                assert_eq!(priority, Priority::High);
                assert!(!done);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_add_requires_details() {
        assert!(Cli::try_parse_from(["trove", "add", "Title"]).is_err());
    }

    #[test]
    fn test_parse_edit_with_global_data_dir() {
        let cli = Cli::try_parse_from([
            "trove", "edit", "Old", "name", "--title", "New", "--completed", "yes", "--data-dir",
            "/tmp/trove",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/trove")));
        match cli.command {
            Commands::Edit {
                title,
                new_title,
                completed,
                details,
                ..
            } => {
                assert_eq!(title, vec!["Old", "name"]);
                assert_eq!(new_title.as_deref(), Some("New"));
                assert_eq!(completed, Some(Completion::Yes));
                assert!(details.is_none());
            }
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn test_rejects_unknown_priority() {
        let result = Cli::try_parse_from(["trove", "add", "T", "-D", "d", "-p", "urgent"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["trove", "edit", "T", "--completed", "n"]).unwrap();
        match cli.command {
            Commands::Edit { completed, .. } => assert_eq!(completed, Some(Completion::No)),
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn test_compact_conflicts_with_detailed() {
        assert!(Cli::try_parse_from(["trove", "list", "--compact", "--detailed"]).is_err());
    }
}
