use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::debug;

use crate::calendar::{self, DayColumn};
use crate::error::{PlannerError, Result};
use crate::task::{generate_id, Bucket, Location, Subtask, SubtaskPatch, Task, TaskPatch};

pub const DEFAULT_TIMELINE_DAYS: usize = 14;

/// In-memory task list plus the first day of the visible timeline.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    timeline_start: NaiveDate,
    timeline_days: usize,
}

impl TaskStore {
    pub fn with_timeline(start: NaiveDate, timeline_days: usize) -> Self {
        Self {
            tasks: Vec::new(),
            timeline_start: start,
            timeline_days,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlannerError::task_not_found(id))
    }

    /// Creates a someday task at the front of the list and returns its id.
    pub fn add_task(&mut self, title: &str) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        let task = Task::new(title);
        let id = task.id.clone();
        self.tasks.insert(0, task);
        debug!(task_id = %id, "task added");
        Ok(id)
    }

    pub fn insert_task(&mut self, task: Task) {
        debug!(task_id = %task.id, "task inserted");
        self.tasks.push(task);
    }

    pub fn update_task(&mut self, id: &str, mut patch: TaskPatch) -> Result<()> {
        trim_title(&mut patch.title)?;
        let task = self.task_mut(id)?;
        task.apply(patch);
        task.updated_at = Utc::now();
        debug!(task_id = %id, "task updated");
        Ok(())
    }

    /// Puts the task at `location`. Day locations become the scheduled date;
    /// moving back to someday drops both the scheduled date and time.
    pub fn move_task(&mut self, id: &str, location: Location) -> Result<()> {
        let task = self.task_mut(id)?;
        task.location = location;
        match location {
            Location::Day(date) => task.scheduled_date = Some(date),
            Location::Someday => {
                task.scheduled_date = None;
                task.scheduled_time = None;
            }
        }
        task.updated_at = Utc::now();
        debug!(task_id = %id, %location, "task moved");
        Ok(())
    }

    pub fn schedule_at(&mut self, id: &str, day: NaiveDate, time: NaiveTime) -> Result<()> {
        let task = self.task_mut(id)?;
        task.location = Location::Day(day);
        task.scheduled_date = Some(day);
        task.scheduled_time = Some(time);
        task.updated_at = Utc::now();
        debug!(task_id = %id, %day, %time, "task scheduled");
        Ok(())
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PlannerError::task_not_found(id))?;
        debug!(task_id = %id, "task deleted");
        Ok(self.tasks.remove(index))
    }

    pub fn toggle_completed(&mut self, id: &str) -> Result<bool> {
        let task = self.task_mut(id)?;
        task.completed = !task.completed;
        task.updated_at = Utc::now();
        debug!(task_id = %id, completed = task.completed, "task toggled");
        Ok(task.completed)
    }

    pub fn add_subtask(&mut self, task_id: &str, title: &str) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        let task = self.task_mut(task_id)?;
        let subtask = Subtask {
            id: generate_id(),
            title: title.to_string(),
            completed: false,
        };
        let subtask_id = subtask.id.clone();
        task.subtasks.get_or_insert_with(Vec::new).push(subtask);
        task.updated_at = Utc::now();
        debug!(%task_id, %subtask_id, "subtask added");
        Ok(subtask_id)
    }

    pub fn update_subtask(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        mut patch: SubtaskPatch,
    ) -> Result<()> {
        trim_title(&mut patch.title)?;
        let task = self.task_mut(task_id)?;
        let subtask = task
            .subtask_mut(subtask_id)
            .ok_or_else(|| subtask_not_found(task_id, subtask_id))?;
        subtask.apply(patch);
        task.updated_at = Utc::now();
        debug!(%task_id, %subtask_id, "subtask updated");
        Ok(())
    }

    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> Result<()> {
        let task = self.task_mut(task_id)?;
        let subtasks = task
            .subtasks
            .as_mut()
            .ok_or_else(|| subtask_not_found(task_id, subtask_id))?;
        let before = subtasks.len();
        subtasks.retain(|s| s.id != subtask_id);
        if subtasks.len() == before {
            return Err(subtask_not_found(task_id, subtask_id));
        }
        task.updated_at = Utc::now();
        debug!(%task_id, %subtask_id, "subtask deleted");
        Ok(())
    }

    /// Tasks whose stored location matches, ignoring overdue derivation.
    pub fn tasks_at(&self, location: Location) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.location == location).collect()
    }

    /// Tasks displayed in `bucket` on `today`.
    pub fn tasks_in(&self, bucket: Bucket, today: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.bucket(today) == bucket)
            .collect()
    }

    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        self.tasks_in(Bucket::Overdue, today)
    }

    /// Tasks shown on `day` at `time`. Overdue tasks have left the day.
    pub fn tasks_in_slot(&self, day: NaiveDate, time: NaiveTime, today: NaiveDate) -> Vec<&Task> {
        self.tasks_at(Location::Day(day))
            .into_iter()
            .filter(|t| !t.is_overdue(today) && t.scheduled_time == Some(time))
            .collect()
    }

    pub fn timeline_start(&self) -> NaiveDate {
        self.timeline_start
    }

    pub fn timeline_len(&self) -> usize {
        self.timeline_days
    }

    pub fn set_timeline_start(&mut self, date: NaiveDate) {
        self.timeline_start = date;
        debug!(%date, "timeline start set");
    }

    pub fn shift_week(&mut self, weeks: i64) {
        self.set_timeline_start(calendar::add_days(self.timeline_start, weeks * 7));
    }

    pub fn timeline_days(&self, today: NaiveDate) -> Vec<DayColumn> {
        calendar::timeline(self.timeline_start, self.timeline_days, today)
    }
}

/// Trims a patched title in place; a blank one is rejected.
fn trim_title(title: &mut Option<String>) -> Result<()> {
    if let Some(title) = title.as_mut() {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        *title = trimmed.to_string();
    }
    Ok(())
}

fn subtask_not_found(task_id: &str, subtask_id: &str) -> PlannerError {
    PlannerError::SubtaskNotFound {
        task: task_id.to_string(),
        subtask: subtask_id.to_string(),
    }
}
