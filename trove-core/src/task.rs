//! Task domain model
//!
//! Pure domain logic for the task lifecycle with no I/O operations.
//! A task lives in exactly one collection at a time: the active list or
//! the recycle bin.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::date::{Remaining, added_date_serde, due_date_serde};
use crate::error::{CoreError, Result};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CoreError::parse(format!(
                "Unknown priority '{}'. Expected Low, Medium or High",
                other
            ))),
        }
    }
}

/// Completion status, stored as "Yes" / "No"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Completion {
    Yes,
    #[default]
    No,
}

impl Completion {
    pub fn is_done(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Completion {
    fn from(done: bool) -> Self {
        if done { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_done() { "Yes" } else { "No" })
    }
}

impl FromStr for Completion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            other => Err(CoreError::parse(format!(
                "Unknown completion status '{}'. Expected Yes or No",
                other
            ))),
        }
    }
}

/// A single task
///
/// `added_date` is fixed at creation; every other field can be replaced
/// through [`Task::apply`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub details: String,
    #[serde(rename = "due date", with = "due_date_serde")]
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub completed: Completion,
    #[serde(rename = "added date", with = "added_date_serde")]
    added_date: NaiveDateTime,
}

impl Task {
    /// Create a task stamped with `added`, truncated to whole seconds
    pub fn created_at(
        title: impl Into<String>,
        details: impl Into<String>,
        due_date: NaiveDate,
        added: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            due_date,
            priority: Priority::default(),
            completed: Completion::default(),
            added_date: added.with_nanosecond(0).unwrap_or(added),
        }
    }

    /// Builder method to set priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method to set completion status
    pub fn with_completed(mut self, completed: Completion) -> Self {
        self.completed = completed;
        self
    }

    pub fn added_date(&self) -> NaiveDateTime {
        self.added_date
    }

    pub fn is_done(&self) -> bool {
        self.completed.is_done()
    }

    /// Case-insensitive title comparison used for the uniqueness check
    pub fn title_eq_ignore_case(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Snapshot of the editable fields
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            details: self.details.clone(),
            due_date: self.due_date,
            priority: self.priority,
            completed: self.completed,
        }
    }

    /// Replace every editable field, keeping `added_date`
    pub fn apply(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.details = fields.details;
        self.due_date = fields.due_date;
        self.priority = fields.priority;
        self.completed = fields.completed;
    }

    /// Time left until the due date
    pub fn remaining(&self, today: NaiveDate) -> Remaining {
        Remaining::between(self.due_date, today)
    }
}

/// The editable part of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub details: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub completed: Completion,
}

/// User input for a new task, validated before it becomes a [`Task`]
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub details: String,
    /// Defaults to today when unset
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub completed: Completion,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            ..Self::default()
        }
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_completed(mut self, completed: Completion) -> Self {
        self.completed = completed;
        self
    }

    /// All fields must be filled in
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "Task title cannot be empty"));
        }
        if self.details.trim().is_empty() {
            return Err(CoreError::validation("details", "Task details cannot be empty"));
        }
        Ok(())
    }

    /// Validate and stamp the task with `now`
    pub fn into_task_at(self, now: NaiveDateTime) -> Result<Task> {
        self.validate()?;
        let due_date = self.due_date.unwrap_or_else(|| now.date());
        Ok(
            Task::created_at(self.title.trim(), self.details, due_date, now)
                .with_priority(self.priority)
                .with_completed(self.completed),
        )
    }

    /// Validate and stamp the task with the current local time
    pub fn into_task(self) -> Result<Task> {
        self.into_task_at(Local::now().naive_local())
    }
}

/// Ordered collection of tasks
///
/// Insertion order is display order. Serialized as a bare JSON array.
/// This is a pure domain model with no I/O operations; persistence is
/// handled by storage adapters in consuming crates.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    /// Create a new empty task collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task, rejecting titles already present (ignoring case)
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.contains_title_ignore_case(&task.title) {
            return Err(CoreError::DuplicateTitle(task.title));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Append without the uniqueness check
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the editable fields of the task titled `title`
    ///
    /// The new title is not checked against the other tasks.
    pub fn update(&mut self, title: &str, fields: TaskFields) -> Result<&Task> {
        let task = self.get_mut_or_err(title)?;
        task.apply(fields);
        Ok(&*task)
    }

    /// Remove and return the first task titled `title`
    pub fn remove(&mut self, title: &str) -> Option<Task> {
        self.position(title).map(|idx| self.tasks.remove(idx))
    }

    pub fn contains_title_ignore_case(&self, title: &str) -> bool {
        self.tasks.iter().any(|t| t.title_eq_ignore_case(title))
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.title == title)
    }

    /// Get the first task with exactly this title
    pub fn get(&self, title: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.title == title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.title == title)
    }

    /// Get or return error if task not found
    pub fn get_or_err(&self, title: &str) -> Result<&Task> {
        self.get(title)
            .ok_or_else(|| CoreError::TaskNotFound(title.to_string()))
    }

    /// Get mutable or return error if task not found
    pub fn get_mut_or_err(&mut self, title: &str) -> Result<&mut Task> {
        self.get_mut(title)
            .ok_or_else(|| CoreError::TaskNotFound(title.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.title.as_str()).collect()
    }

    /// Count total tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if collection is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Count completed tasks
    pub fn count_completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_done()).count()
    }

    /// Count tasks whose due date has passed
    pub fn count_expired(&self, today: NaiveDate) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.remaining(today).is_expired())
            .count()
    }
}

impl From<Vec<Task>> for TaskCollection {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl From<TaskCollection> for Vec<Task> {
    fn from(collection: TaskCollection) -> Self {
        collection.tasks
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Move the task titled `title` from `from` to the end of `to`
fn move_task(from: &mut TaskCollection, to: &mut TaskCollection, title: &str) -> Result<()> {
    let task = from
        .remove(title)
        .ok_or_else(|| CoreError::TaskNotFound(title.to_string()))?;
    to.push(task);
    Ok(())
}

/// Send an active task to the recycle bin
pub fn delete(active: &mut TaskCollection, recycled: &mut TaskCollection, title: &str) -> Result<()> {
    move_task(active, recycled, title)
}

/// Bring a task back from the recycle bin
pub fn restore(
    recycled: &mut TaskCollection,
    active: &mut TaskCollection,
    title: &str,
) -> Result<()> {
    move_task(recycled, active, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stamp() -> NaiveDateTime {
        day(2025, 1, 1).and_hms_opt(9, 30, 0).unwrap()
    }

    fn task(title: &str) -> Task {
        Task::created_at(title, "details", day(2025, 1, 5), stamp())
    }

    #[test]
    fn test_task_creation() {
        let task = Task::created_at("Write report", "Quarterly numbers", day(2025, 1, 5), stamp())
            .with_priority(Priority::High);

        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.completed, Completion::No);
        assert_eq!(task.added_date(), stamp());
        assert!(!task.is_done());
    }

    #[test]
    fn test_added_date_truncated_to_seconds() {
        let precise = stamp().with_nanosecond(123_456_789).unwrap();
        let task = Task::created_at("A", "b", day(2025, 1, 5), precise);
        assert_eq!(task.added_date(), stamp());
    }

    #[test]
    fn test_priority_and_completion_parsing() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" medium ".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());

        assert_eq!("yes".parse::<Completion>().unwrap(), Completion::Yes);
        assert_eq!("N".parse::<Completion>().unwrap(), Completion::No);
        assert!("maybe".parse::<Completion>().is_err());
        assert_eq!(Completion::from(true), Completion::Yes);
    }

    #[test]
    fn test_draft_validation() {
        let err = TaskDraft::new("  ", "something").into_task_at(stamp()).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "title"));

        let err = TaskDraft::new("Title", "").into_task_at(stamp()).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "details"));
    }

    #[test]
    fn test_draft_defaults() {
        let task = TaskDraft::new("  Padded  ", "d").into_task_at(stamp()).unwrap();

        assert_eq!(task.title, "Padded");
        assert_eq!(task.due_date, stamp().date());
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.completed, Completion::No);
        assert_eq!(task.added_date(), stamp());
    }

    #[test]
    fn test_add_rejects_duplicate_ignoring_case() {
        let mut active = TaskCollection::new();
        active.add(task("A")).unwrap();

        let err = active.add(task("a")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateTitle(ref t) if t == "a"));
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut active = TaskCollection::new();
        active.add(task("Zeta")).unwrap();
        active.add(task("Alpha")).unwrap();
        active.add(task("Mid")).unwrap();

        assert_eq!(active.titles(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_update_preserves_added_date() {
        let mut active = TaskCollection::from(vec![task("A"), task("B")]);
        let fields = TaskFields {
            title: "A2".to_string(),
            details: "new details".to_string(),
            due_date: day(2026, 3, 1),
            priority: Priority::Medium,
            completed: Completion::Yes,
        };

        let updated = active.update("A", fields.clone()).unwrap();
        assert_eq!(updated.fields(), fields);
        assert_eq!(updated.added_date(), stamp());
        assert_eq!(active.titles(), vec!["A2", "B"]);
    }

    #[test]
    fn test_update_allows_duplicate_title() {
        let mut active = TaskCollection::from(vec![task("A"), task("B")]);
        let mut fields = active.get("B").unwrap().fields();
        fields.title = "A".to_string();

        active.update("B", fields).unwrap();
        assert_eq!(active.titles(), vec!["A", "A"]);
    }

    #[test]
    fn test_update_missing() {
        let mut active = TaskCollection::from(vec![task("A")]);
        let fields = task("X").fields();

        let err = active.update("X", fields).unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(ref t) if t == "X"));
    }

    #[test]
    fn test_delete_and_restore() {
        let mut active = TaskCollection::from(vec![task("A")]);
        let mut recycled = TaskCollection::new();
        let original = active.get("A").unwrap().clone();

        assert!(active.add(task("a")).is_err());

        delete(&mut active, &mut recycled, "A").unwrap();
        assert!(active.is_empty());
        assert_eq!(recycled.as_slice(), &[original.clone()]);

        restore(&mut recycled, &mut active, "A").unwrap();
        assert_eq!(active.as_slice(), &[original]);
        assert!(recycled.is_empty());
    }

    #[test]
    fn test_delete_appends_to_end_of_bin() {
        let mut active = TaskCollection::from(vec![task("A"), task("B")]);
        let mut recycled = TaskCollection::from(vec![task("Old")]);

        delete(&mut active, &mut recycled, "B").unwrap();
        assert_eq!(active.titles(), vec!["A"]);
        assert_eq!(recycled.titles(), vec!["Old", "B"]);
    }

    #[test]
    fn test_move_missing_title() {
        let mut active = TaskCollection::from(vec![task("A")]);
        let mut recycled = TaskCollection::new();

        assert!(matches!(
            delete(&mut active, &mut recycled, "a"),
            Err(CoreError::TaskNotFound(_))
        ));
        assert!(matches!(
            restore(&mut recycled, &mut active, "A"),
            Err(CoreError::TaskNotFound(_))
        ));
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_counts() {
        let mut done = task("Done");
        done.completed = Completion::Yes;
        let mut late = task("Late");
        late.due_date = day(2024, 12, 31);
        let collection = TaskCollection::from(vec![done, late, task("Open")]);

        assert_eq!(collection.count_completed(), 1);
        assert_eq!(collection.count_expired(day(2025, 1, 1)), 1);
    }

    #[test]
    fn test_json_layout() {
        let task = task("A").with_priority(Priority::High);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "A",
                "details": "details",
                "due date": "05-Jan-2025",
                "priority": "High",
                "completed": "No",
                "added date": "2025-01-01 09:30:00 AM"
            })
        );
    }

    #[test]
    fn test_collection_serializes_as_array() {
        let collection = TaskCollection::from(vec![task("A"), task("B")]);
        let json = serde_json::to_string(&collection).unwrap();
        assert!(json.starts_with('['));

        let back: TaskCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
    }
}
