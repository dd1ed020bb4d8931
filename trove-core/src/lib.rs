//! Trove Core - Pure domain logic for the task lifecycle
//!
//! This crate contains no I/O operations. All persistence
//! is handled by adapters in consuming crates.

pub mod date;
pub mod error;
pub mod task;

pub use date::Remaining;
pub use error::{CoreError, Result};
pub use task::{Completion, Priority, Task, TaskCollection, TaskDraft, TaskFields, delete, restore};
