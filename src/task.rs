use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, DAY_KEY_FORMAT};
use crate::error::PlannerError;

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Where a task is stored on the board. "Overdue" is never stored; see [`Bucket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Location {
    Someday,
    Day(NaiveDate),
}

impl Location {
    pub const SOMEDAY_KEY: &'static str = "someday";
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Someday => f.write_str(Self::SOMEDAY_KEY),
            Location::Day(date) => write!(f, "{}", date.format(DAY_KEY_FORMAT)),
        }
    }
}

impl FromStr for Location {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::SOMEDAY_KEY {
            return Ok(Location::Someday);
        }
        NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(Location::Day)
            .map_err(|_| PlannerError::InvalidLocation(s.to_string()))
    }
}

impl TryFrom<String> for Location {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

/// The bucket a task is displayed in, computed from its location and due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Someday,
    Overdue,
    Day(NaiveDate),
}

impl From<Location> for Bucket {
    fn from(location: Location) -> Self {
        match location {
            Location::Someday => Bucket::Someday,
            Location::Day(date) => Bucket::Day(date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Blocked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
            TaskStatus::Blocked => "Blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    /// Next priority in the card's quick-cycle order; `None` wraps back to `Low`.
    pub fn cycle(current: Option<Priority>) -> Option<Priority> {
        match current {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => Some(Priority::Urgent),
            Some(Priority::Urgent) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Private,
    Work,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "calendar::hhmm_opt"
    )]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Person>,
    pub location: Location,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A bare task in the someday bucket.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: title.into(),
            notes: None,
            description: None,
            tags: None,
            people: None,
            due_date: None,
            scheduled_date: None,
            scheduled_time: None,
            status: None,
            priority: None,
            category: None,
            subtasks: None,
            completed: false,
            created_by: None,
            location: Location::Someday,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }

    pub fn bucket(&self, today: NaiveDate) -> Bucket {
        if self.is_overdue(today) {
            Bucket::Overdue
        } else {
            self.location.into()
        }
    }

    /// (completed, total) subtask counts.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let subtasks = self.subtasks.as_deref().unwrap_or_default();
        let done = subtasks.iter().filter(|s| s.completed).count();
        (done, subtasks.len())
    }

    pub fn subtask_mut(&mut self, subtask_id: &str) -> Option<&mut Subtask> {
        self.subtasks
            .as_mut()
            .and_then(|subtasks| subtasks.iter_mut().find(|s| s.id == subtask_id))
    }

    /// Applies every field set on the patch. Does not touch `updated_at`.
    pub fn apply(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            notes,
            description,
            tags,
            people,
            due_date,
            scheduled_time,
            status,
            priority,
            category,
            completed,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(people) = people {
            self.people = people;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(scheduled_time) = scheduled_time {
            self.scheduled_time = scheduled_time;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
    }
}

/// Partial update for a task. The outer `Option` means "leave alone";
/// `Some(None)` clears an optional field.
///
/// `location` and `scheduled_date` are deliberately absent: they only change
/// through [`crate::store::TaskStore::move_task`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub tags: Option<Option<Vec<String>>>,
    pub people: Option<Option<Vec<Person>>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub scheduled_time: Option<Option<NaiveTime>>,
    pub status: Option<Option<TaskStatus>>,
    pub priority: Option<Option<Priority>>,
    pub category: Option<Option<Category>>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl Subtask {
    pub fn apply(&mut self, patch: SubtaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}
