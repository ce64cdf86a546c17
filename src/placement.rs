//! Translates a drop onto a board zone into a store mutation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::calendar::{self, DAY_KEY_FORMAT};
use crate::error::{PlannerError, Result};
use crate::store::TaskStore;
use crate::task::Location;

const OVERDUE_ID: &str = "overdue";
const TIME_SLOT_PREFIX: &str = "time-";

/// A zone on the board that a dragged task can be released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Someday,
    Overdue,
    Day(NaiveDate),
    /// A time slot in today's agenda.
    TimeSlot(NaiveTime),
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Someday => f.write_str(Location::SOMEDAY_KEY),
            DropTarget::Overdue => f.write_str(OVERDUE_ID),
            DropTarget::Day(date) => write!(f, "{}", date.format(DAY_KEY_FORMAT)),
            DropTarget::TimeSlot(time) => {
                write!(f, "{TIME_SLOT_PREFIX}{}", calendar::format_time(*time))
            }
        }
    }
}

impl FromStr for DropTarget {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        if s == OVERDUE_ID {
            return Ok(DropTarget::Overdue);
        }
        if let Some(time) = s.strip_prefix(TIME_SLOT_PREFIX) {
            return calendar::parse_time(time).map(DropTarget::TimeSlot);
        }
        match s.parse::<Location>()? {
            Location::Someday => Ok(DropTarget::Someday),
            Location::Day(date) => Ok(DropTarget::Day(date)),
        }
    }
}

/// The store mutation a drop resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Move(Location),
    Schedule { day: NaiveDate, time: NaiveTime },
}

pub fn resolve(target: DropTarget, today: NaiveDate) -> Result<Placement> {
    match target {
        DropTarget::Someday => Ok(Placement::Move(Location::Someday)),
        DropTarget::Day(date) => Ok(Placement::Move(Location::Day(date))),
        DropTarget::TimeSlot(time) => Ok(Placement::Schedule { day: today, time }),
        // Overdue membership comes from the due date alone.
        DropTarget::Overdue => Err(PlannerError::DropRejected(target.to_string())),
    }
}

pub fn apply_drop(
    store: &mut TaskStore,
    task_id: &str,
    target: DropTarget,
    today: NaiveDate,
) -> Result<Placement> {
    let placement = resolve(target, today)?;
    match placement {
        Placement::Move(location) => store.move_task(task_id, location)?,
        Placement::Schedule { day, time } => store.schedule_at(task_id, day, time)?,
    }
    info!(%task_id, %target, "task dropped");
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEFAULT_TIMELINE_DAYS;
    use crate::task::Bucket;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    #[test]
    fn test_parse_drop_ids() {
        assert_eq!("someday".parse::<DropTarget>().unwrap(), DropTarget::Someday);
        assert_eq!("overdue".parse::<DropTarget>().unwrap(), DropTarget::Overdue);
        assert_eq!(
            "2026-10-21".parse::<DropTarget>().unwrap(),
            DropTarget::Day(date(2026, 10, 21))
        );
        assert_eq!(
            "time-14:30".parse::<DropTarget>().unwrap(),
            DropTarget::TimeSlot(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
        assert!("time-noon".parse::<DropTarget>().is_err());
        assert!("backlog".parse::<DropTarget>().is_err());
    }

    #[test]
    fn test_drop_ids_print_back() {
        let slot = DropTarget::TimeSlot(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(slot.to_string(), "time-08:00");
        assert_eq!(DropTarget::Day(today()).to_string(), "2026-10-19");
    }

    #[test]
    fn test_drop_on_day_moves_task() {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        let id = store.add_task("Plan").unwrap();
        let day = date(2026, 10, 23);

        let placement = apply_drop(&mut store, &id, DropTarget::Day(day), today()).unwrap();
        assert_eq!(placement, Placement::Move(Location::Day(day)));
        assert_eq!(store.task(&id).unwrap().scheduled_date, Some(day));
    }

    #[test]
    fn test_drop_on_time_slot_schedules_today() {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        let id = store.add_task("Review").unwrap();
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();

        apply_drop(&mut store, &id, DropTarget::TimeSlot(time), today()).unwrap();
        let task = store.task(&id).unwrap();
        assert_eq!(task.location, Location::Day(today()));
        assert_eq!(task.scheduled_time, Some(time));
        assert_eq!(store.tasks_in_slot(today(), time, today()).len(), 1);
    }

    #[test]
    fn test_drop_on_overdue_is_rejected() {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        let id = store.add_task("Late").unwrap();

        let err = apply_drop(&mut store, &id, DropTarget::Overdue, today()).unwrap_err();
        assert!(matches!(err, PlannerError::DropRejected(_)));
        assert_eq!(store.task(&id).unwrap().bucket(today()), Bucket::Someday);
    }

    #[test]
    fn test_drop_unknown_task() {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        let err = apply_drop(&mut store, "ghost", DropTarget::Someday, today()).unwrap_err();
        assert!(matches!(err, PlannerError::TaskNotFound(_)));
    }
}
