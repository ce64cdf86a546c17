//! State of the task edit dialog.

use crate::calendar;
use crate::error::{PlannerError, Result};
use crate::task::{Priority, Task, TaskPatch, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Notes,
    Tags,
    DueDate,
    ScheduledTime,
    Status,
    Priority,
    Subtasks,
}

impl Field {
    pub const ORDER: [Field; 8] = [
        Field::Title,
        Field::Notes,
        Field::Tags,
        Field::DueDate,
        Field::ScheduledTime,
        Field::Status,
        Field::Priority,
        Field::Subtasks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Task name",
            Field::Notes => "Notes",
            Field::Tags => "Tags",
            Field::DueDate => "Due date",
            Field::ScheduledTime => "Scheduled time",
            Field::Status => "Status",
            Field::Priority => "Priority",
            Field::Subtasks => "Subtasks",
        }
    }

    fn is_choice(self) -> bool {
        matches!(self, Field::Status | Field::Priority)
    }
}

#[derive(Debug, Clone)]
pub struct EditForm {
    pub task_id: String,
    pub title: String,
    pub notes: String,
    pub tag_input: String,
    pub tags: Vec<String>,
    pub due_date: String,
    pub scheduled_time: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub people: Vec<String>,
    pub created_by: Option<String>,
    pub focus: Field,
    /// Selected row while the subtask list is focused.
    pub subtask_cursor: usize,
}

impl EditForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            notes: task.notes.clone().unwrap_or_default(),
            tag_input: String::new(),
            tags: task.tags.clone().unwrap_or_default(),
            due_date: task.due_date.map(calendar::day_key).unwrap_or_default(),
            scheduled_time: task
                .scheduled_time
                .map(calendar::format_time)
                .unwrap_or_default(),
            status: task.status.unwrap_or(TaskStatus::Todo),
            priority: task.priority.unwrap_or(Priority::Medium),
            people: task.people.iter().flatten().map(|p| p.name.clone()).collect(),
            created_by: task.created_by.as_ref().map(|p| p.name.clone()),
            focus: Field::Title,
            subtask_cursor: 0,
        }
    }

    /// Adds the pending tag input; blanks and duplicates are ignored.
    pub fn add_tag(&mut self) -> bool {
        let tag = self.tag_input.trim().to_string();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        self.tag_input.clear();
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Notes => Some(&mut self.notes),
            Field::Tags => Some(&mut self.tag_input),
            Field::DueDate => Some(&mut self.due_date),
            Field::ScheduledTime => Some(&mut self.scheduled_time),
            Field::Status | Field::Priority | Field::Subtasks => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.text_mut() {
            text.push(c);
        }
    }

    /// Deletes a character; on an empty tag input it drops the last tag.
    pub fn backspace(&mut self) {
        if self.focus == Field::Tags && self.tag_input.is_empty() {
            if let Some(last) = self.tags.last().cloned() {
                self.remove_tag(&last);
            }
            return;
        }
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub fn next_field(&mut self) {
        self.move_focus(1);
    }

    pub fn prev_field(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, delta: isize) {
        let len = Field::ORDER.len() as isize;
        let index = Field::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0) as isize;
        self.focus = Field::ORDER[(index + delta).rem_euclid(len) as usize];
    }

    /// Cycles the focused status/priority selection.
    pub fn cycle_choice(&mut self, delta: isize) {
        if !self.focus.is_choice() {
            return;
        }
        match self.focus {
            Field::Status => self.status = cycle(&TaskStatus::ALL, self.status, delta),
            Field::Priority => self.priority = cycle(&Priority::ALL, self.priority, delta),
            _ => {}
        }
    }

    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn to_patch(&self) -> Result<TaskPatch> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        let notes = self.notes.trim();
        let due_date = match self.due_date.trim() {
            "" => None,
            s => Some(calendar::parse_day(s)?),
        };
        let scheduled_time = match self.scheduled_time.trim() {
            "" => None,
            s => Some(calendar::parse_time(s)?),
        };

        Ok(TaskPatch {
            title: Some(title.to_string()),
            notes: Some((!notes.is_empty()).then(|| notes.to_string())),
            tags: Some((!self.tags.is_empty()).then(|| self.tags.clone())),
            due_date: Some(due_date),
            scheduled_time: Some(scheduled_time),
            status: Some(Some(self.status)),
            priority: Some(Some(self.priority)),
            ..Default::default()
        })
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(index + delta).rem_euclid(len) as usize]
}
