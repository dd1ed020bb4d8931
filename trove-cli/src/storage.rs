//! JSON storage adapter for the active list and the recycle bin
//!
//! Each collection is one JSON array, read and written whole on every
//! operation. Where the bytes live is decided by a [`Backend`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use trove_core::{Task, TaskCollection, TaskDraft, TaskFields};

use crate::config::Config;
use crate::error::{CliError, Result};

/// Which of the two collections an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Active,
    Recycled,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Recycled => write!(f, "recycle bin"),
        }
    }
}

/// Raw blob storage keyed by name
pub trait Backend {
    /// Read the named blob, `None` if it does not exist
    fn read(&self, name: &str) -> io::Result<Option<String>>;

    /// Replace the named blob
    fn write(&self, name: &str, contents: &str) -> io::Result<()>;
}

/// One file per collection inside a directory
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Backend for FileBackend {
    fn read(&self, name: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.dir.join(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), contents)
    }
}

/// In-memory backend for tests
#[derive(Default)]
pub struct MemoryBackend {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob directly, bypassing serialization
    pub fn insert(&self, name: impl Into<String>, contents: impl Into<String>) {
        self.blobs.borrow_mut().insert(name.into(), contents.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.blobs.borrow().get(name).cloned()
    }
}

impl Backend for MemoryBackend {
    fn read(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.get(name))
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        self.insert(name, contents);
        Ok(())
    }
}

/// Task store over two named collections
pub struct TaskStore<B: Backend> {
    backend: B,
    active_name: String,
    recycle_name: String,
}

impl TaskStore<FileBackend> {
    /// File-backed store laid out as described by the config
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            FileBackend::new(cfg.data_path()),
            &cfg.active_filename,
            &cfg.recycle_filename,
        )
    }
}

impl<B: Backend> TaskStore<B> {
    pub fn new(backend: B, active_name: impl Into<String>, recycle_name: impl Into<String>) -> Self {
        Self {
            backend,
            active_name: active_name.into(),
            recycle_name: recycle_name.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn name(&self, collection: Collection) -> &str {
        match collection {
            Collection::Active => &self.active_name,
            Collection::Recycled => &self.recycle_name,
        }
    }

    /// Load a collection
    ///
    /// Missing content, or content that is not JSON at all, yields an empty
    /// collection. Well-formed JSON holding records that do not fit the task
    /// layout is an error, so no later save can overwrite it.
    pub fn load(&self, collection: Collection) -> Result<TaskCollection> {
        let name = self.name(collection);
        let contents = self
            .backend
            .read(name)
            .map_err(|e| CliError::io(format!("Failed to read {}", name), e))?;

        let Some(contents) = contents else {
            debug!(%collection, file = name, "no stored state, starting empty");
            return Ok(TaskCollection::new());
        };

        match decode(name, &contents) {
            Ok(tasks) => {
                debug!(%collection, file = name, count = tasks.len(), "loaded tasks");
                Ok(tasks)
            }
            Err(CliError::MalformedStorage { source, .. })
                if source.is_syntax() || source.is_eof() =>
            {
                warn!(%collection, file = name, error = %source, "treating malformed storage as empty");
                Ok(TaskCollection::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite a collection with `tasks`
    pub fn save(&self, collection: Collection, tasks: &TaskCollection) -> Result<()> {
        let name = self.name(collection);
        let contents = encode(tasks)?;
        self.backend
            .write(name, &contents)
            .map_err(|e| CliError::io(format!("Failed to write {}", name), e))?;
        debug!(%collection, file = name, count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Create a task from `draft` and append it to the active list
    pub fn add_task(&self, draft: TaskDraft) -> Result<Task> {
        let task = draft.into_task()?;
        let mut active = self.load(Collection::Active)?;
        active.add(task.clone())?;
        self.save(Collection::Active, &active)?;
        Ok(task)
    }

    /// Replace the editable fields of the active task titled `title`
    pub fn edit_task(&self, title: &str, fields: TaskFields) -> Result<Task> {
        let mut active = self.load(Collection::Active)?;
        let task = active.update(title, fields)?.clone();
        self.save(Collection::Active, &active)?;
        Ok(task)
    }

    /// Move an active task to the recycle bin
    pub fn delete_task(&self, title: &str) -> Result<()> {
        let mut active = self.load(Collection::Active)?;
        let mut recycled = self.load(Collection::Recycled)?;
        trove_core::delete(&mut active, &mut recycled, title)?;
        // Destination first: a failed second write leaves a copy, not a gap
        self.save(Collection::Recycled, &recycled)?;
        self.save(Collection::Active, &active)?;
        Ok(())
    }

    /// Move a task from the recycle bin back to the active list
    pub fn restore_task(&self, title: &str) -> Result<()> {
        let mut recycled = self.load(Collection::Recycled)?;
        let mut active = self.load(Collection::Active)?;
        trove_core::restore(&mut recycled, &mut active, title)?;
        // Destination first, as in delete_task
        self.save(Collection::Active, &active)?;
        self.save(Collection::Recycled, &recycled)?;
        Ok(())
    }
}

fn decode(name: &str, contents: &str) -> Result<TaskCollection> {
    serde_json::from_str(contents).map_err(|e| CliError::malformed(name, e))
}

/// Pretty-print with four-space indentation
fn encode(tasks: &TaskCollection) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tasks.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| CliError::parse_with_source("Encoded tasks are not UTF-8", e))
}
