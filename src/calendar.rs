//! Date arithmetic for the timeline columns and the today time slots.

use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::{PlannerError, Result};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    #[serde(serialize_with = "hhmm::serialize")]
    pub time: NaiveTime,
    pub display: String,
}

pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DAY_KEY_FORMAT)
        .map_err(|_| PlannerError::InvalidDate(s.to_string()))
}

pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map_err(|_| PlannerError::InvalidTime(s.to_string()))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(date)
}

pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    let day = date.format("%-d");
    if date == today {
        format!("Today • {day}")
    } else if Some(date) == today.succ_opt() {
        format!("Tomorrow • {day}")
    } else {
        format!("{} • {day}", date.format("%A"))
    }
}

/// `len` consecutive day columns starting at `start`.
pub fn timeline(start: NaiveDate, len: usize, today: NaiveDate) -> Vec<DayColumn> {
    (0..len as i64)
        .map(|offset| {
            let date = add_days(start, offset);
            DayColumn {
                date,
                key: day_key(date),
                label: day_label(date, today),
            }
        })
        .collect()
}

/// Header text such as `Oct 19 - Nov 1, 2026`.
pub fn range_label(start: NaiveDate, len: usize) -> String {
    let last = add_days(start, len.saturating_sub(1) as i64);
    format!("{} - {}", start.format("%b %-d"), last.format("%b %-d, %Y"))
}

/// Slots from `start_hour:00` through the last step of `end_hour`.
pub fn time_slots(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<TimeSlot> {
    let step = step_minutes.clamp(1, 60) as usize;
    (start_hour..=end_hour)
        .flat_map(|hour| (0..60).step_by(step).map(move |minute| (hour, minute)))
        .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
        .map(|time| TimeSlot {
            time,
            display: time.format("%-I:%M %p").to_string(),
        })
        .collect()
}

pub mod hhmm {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }
}

pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_str(&super::format_time(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_time(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
