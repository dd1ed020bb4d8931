//! Trove CLI - command surface and JSON storage for the task lifecycle

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod storage;

pub use error::{CliError, Result};
pub use storage::{Backend, Collection, FileBackend, MemoryBackend, TaskStore};
