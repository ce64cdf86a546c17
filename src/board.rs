//! Read-only view of the store arranged the way the board shows it.

use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::calendar::{self, DayColumn, TimeSlot};
use crate::store::TaskStore;
use crate::task::{Bucket, Priority, Task, TaskStatus};

const SUBTASK_PREVIEW: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct SubtaskLine {
    pub title: String,
    pub completed: bool,
}

/// Everything a task card displays.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCard {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub overdue: bool,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub subtasks_done: usize,
    pub subtasks_total: usize,
    pub subtask_preview: Vec<SubtaskLine>,
    pub tags: Vec<String>,
    pub people: Vec<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(with = "calendar::hhmm_opt")]
    pub scheduled_time: Option<NaiveTime>,
}

impl TaskCard {
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        let (subtasks_done, subtasks_total) = task.subtask_progress();
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            completed: task.completed,
            overdue: task.is_overdue(today),
            priority: task.priority,
            status: task.status,
            subtasks_done,
            subtasks_total,
            subtask_preview: task
                .subtasks
                .iter()
                .flatten()
                .take(SUBTASK_PREVIEW)
                .map(|s| SubtaskLine {
                    title: s.title.clone(),
                    completed: s.completed,
                })
                .collect(),
            tags: task.tags.clone().unwrap_or_default(),
            people: task
                .people
                .iter()
                .flatten()
                .map(|p| p.initials())
                .collect(),
            due_date: task.due_date,
            scheduled_time: task.scheduled_time,
        }
    }

    /// Subtasks beyond the preview, shown as "+N more subtasks".
    pub fn hidden_subtasks(&self) -> usize {
        self.subtasks_total.saturating_sub(self.subtask_preview.len())
    }

    pub fn summary(&self) -> String {
        let mut line = String::new();
        line.push_str(if self.completed { "[x] " } else { "[ ] " });
        if let Some(time) = self.scheduled_time {
            let _ = write!(line, "{} ", calendar::format_time(time));
        }
        line.push_str(&self.title);
        if let Some(priority) = self.priority {
            let _ = write!(line, " !{}", priority.label());
        }
        if self.subtasks_total > 0 {
            let _ = write!(line, " ({}/{})", self.subtasks_done, self.subtasks_total);
        }
        if !self.tags.is_empty() {
            let _ = write!(line, " #{}", self.tags.join(" #"));
        }
        if let Some(due) = self.due_date {
            let _ = write!(line, " due {}", calendar::day_key(due));
        }
        line
    }
}

fn cards<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: NaiveDate) -> Vec<TaskCard> {
    tasks
        .into_iter()
        .map(|t| TaskCard::from_task(t, today))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCards {
    #[serde(flatten)]
    pub column: DayColumn,
    pub is_today: bool,
    pub tasks: Vec<TaskCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotCards {
    #[serde(flatten)]
    pub slot: TimeSlot,
    pub tasks: Vec<TaskCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub today: NaiveDate,
    pub range_label: String,
    pub someday: Vec<TaskCard>,
    pub overdue: Vec<TaskCard>,
    pub days: Vec<DayCards>,
    /// Today's time slots.
    pub agenda: Vec<SlotCards>,
}

impl BoardSnapshot {
    pub fn build(store: &TaskStore, today: NaiveDate, slots: &[TimeSlot]) -> Self {
        let days = store
            .timeline_days(today)
            .into_iter()
            .map(|column| DayCards {
                is_today: column.date == today,
                tasks: cards(store.tasks_in(Bucket::Day(column.date), today), today),
                column,
            })
            .collect();

        let agenda = slots
            .iter()
            .map(|slot| SlotCards {
                slot: slot.clone(),
                tasks: cards(store.tasks_in_slot(today, slot.time, today), today),
            })
            .collect();

        Self {
            today,
            range_label: calendar::range_label(store.timeline_start(), store.timeline_len()),
            someday: cards(store.tasks_in(Bucket::Someday, today), today),
            overdue: cards(store.overdue_tasks(today), today),
            days,
            agenda,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.range_label);

        let _ = writeln!(out, "\nSomeday ({})", self.someday.len());
        push_cards(&mut out, &self.someday);

        if !self.overdue.is_empty() {
            let _ = writeln!(out, "\nOverdue ({})", self.overdue.len());
            push_cards(&mut out, &self.overdue);
        }

        for day in &self.days {
            let _ = writeln!(out, "\n{}", day.column.label);
            if day.tasks.is_empty() {
                let _ = writeln!(out, "  No tasks");
            }
            push_cards(&mut out, &day.tasks);
        }

        let scheduled: Vec<&SlotCards> = self
            .agenda
            .iter()
            .filter(|s| !s.tasks.is_empty())
            .collect();
        if !scheduled.is_empty() {
            let _ = writeln!(out, "\nToday");
            for slot in scheduled {
                for card in &slot.tasks {
                    let _ = writeln!(out, "  {:>8}  {}", slot.slot.display, card.title);
                }
            }
        }
        out
    }
}

fn push_cards(out: &mut String, cards: &[TaskCard]) {
    for card in cards {
        let _ = writeln!(out, "  {}", card.summary());
        for subtask in &card.subtask_preview {
            let mark = if subtask.completed { "●" } else { "○" };
            let _ = writeln!(out, "      {mark} {}", subtask.title);
        }
        if card.hidden_subtasks() > 0 {
            let _ = writeln!(out, "      +{} more subtasks", card.hidden_subtasks());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::time_slots;
    use crate::demo;
    use crate::store::DEFAULT_TIMELINE_DAYS;
    use crate::task::Location;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn seeded() -> TaskStore {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        demo::seed(&mut store, today());
        store
    }

    #[test]
    fn test_snapshot_places_each_task_once() {
        let store = seeded();
        let snapshot = BoardSnapshot::build(&store, today(), &time_slots(8, 20, 30));

        let in_days: usize = snapshot.days.iter().map(|d| d.tasks.len()).sum();
        assert_eq!(snapshot.someday.len() + snapshot.overdue.len() + in_days, 3);
        assert_eq!(snapshot.days.len(), 14);
        assert!(snapshot.days[0].is_today);
        assert_eq!(snapshot.days[0].tasks[0].title, "Develop For Team UX");
        assert!(snapshot.overdue[0].overdue);
        assert_eq!(snapshot.range_label, "Oct 19 - Nov 1, 2026");
    }

    #[test]
    fn test_card_preview_limits_subtasks() {
        let store = seeded();
        let overdue = store.overdue_tasks(today());
        let card = TaskCard::from_task(overdue[0], today());
        assert_eq!(card.subtasks_total, 4);
        assert_eq!(card.subtasks_done, 1);
        assert_eq!(card.subtask_preview.len(), 3);
        assert_eq!(card.hidden_subtasks(), 1);
        assert_eq!(card.people, vec!["JD".to_string(), "MC".to_string()]);
        assert_eq!(card.priority, Some(Priority::Urgent));
    }

    #[test]
    fn test_agenda_holds_scheduled_tasks() {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        let id = store.add_task("Dentist").unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        store.schedule_at(&id, today(), time).unwrap();

        let snapshot = BoardSnapshot::build(&store, today(), &time_slots(8, 20, 30));
        let nine = snapshot.agenda.iter().find(|s| s.slot.time == time).unwrap();
        assert_eq!(nine.tasks.len(), 1);
        assert!(snapshot.render_text().contains("9:00 AM  Dentist"));
    }

    #[test]
    fn test_text_lists_subtask_preview() {
        let text = BoardSnapshot::build(&seeded(), today(), &[]).render_text();
        assert!(text.contains("      ● Create slide deck\n"));
        assert!(text.contains("      +1 more subtasks\n"));
    }

    #[test]
    fn test_text_and_json_output() {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        let id = store.add_task("Water plants").unwrap();
        store.move_task(&id, Location::Day(today())).unwrap();

        let snapshot = BoardSnapshot::build(&store, today(), &[]);
        let text = snapshot.render_text();
        assert!(text.contains("Today • 19\n  [ ] Water plants"));
        assert!(text.contains("Tomorrow • 20\n  No tasks"));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["days"][0]["key"], "2026-10-19");
        assert_eq!(json["days"][0]["tasks"][0]["title"], "Water plants");
        assert_eq!(json["someday"].as_array().unwrap().len(), 0);
    }
}
