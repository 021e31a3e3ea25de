use crate::calendar::WorkCalendar;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An assignee's working-capacity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssigneeCapacity {
    /// Identifier for the person; matches `Task::assignee` and
    /// `PersonalScheduleEntry::user_id`.
    pub user_id: String,
    /// Fraction of standard full-time hours (1.0 = full-time, 0.5 = half-time).
    pub capacity_rate: f64,
    /// Ordering key for display sequencing in summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
}

impl AssigneeCapacity {
    pub fn new(user_id: impl Into<String>, capacity_rate: f64) -> Self {
        Self {
            user_id: user_id.into(),
            capacity_rate,
            sequence: None,
        }
    }

    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// Externally booked time (meetings, leave) that reduces availability on
/// the days it overlaps. Read-only input; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalScheduleEntry {
    pub user_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
}

impl PersonalScheduleEntry {
    pub fn new(
        user_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        title: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            start,
            end,
            title: title.into(),
        }
    }

    /// Hours of this entry falling on the given calendar day. Entries
    /// spanning midnight contribute to each day they overlap.
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        let day_start = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        let day_end = day_start + Duration::days(1);
        let start = self.start.max(day_start);
        let end = self.end.min(day_end);
        if end <= start {
            return 0.0;
        }
        (end - start).num_minutes() as f64 / 60.0
    }
}

/// Computes how many hours a person can work on a given day.
///
/// Three distinct ceilings are exposed and must stay distinct:
/// `standard_hours` (unscaled), `rate_allowed_hours` (scaled by the
/// assignee's capacity rate), and `available_hours` (rate-allowed minus
/// personal-schedule conflicts).
pub struct CapacityModel<'a> {
    calendar: &'a WorkCalendar,
    standard_daily_hours: f64,
    personal_schedule: &'a [PersonalScheduleEntry],
}

impl<'a> CapacityModel<'a> {
    pub fn new(
        calendar: &'a WorkCalendar,
        standard_daily_hours: f64,
        personal_schedule: &'a [PersonalScheduleEntry],
    ) -> Self {
        Self {
            calendar,
            standard_daily_hours,
            personal_schedule,
        }
    }

    pub fn calendar(&self) -> &WorkCalendar {
        self.calendar
    }

    /// Unscaled standard capacity; 0 on non-working days.
    pub fn standard_hours(&self, date: NaiveDate) -> f64 {
        if self.calendar.is_working_day(date) {
            self.standard_daily_hours
        } else {
            0.0
        }
    }

    /// Capacity-rate ceiling without personal-schedule deductions.
    pub fn rate_allowed_hours(&self, date: NaiveDate, assignee: &AssigneeCapacity) -> f64 {
        if !self.calendar.is_working_day(date) {
            return 0.0;
        }
        self.standard_daily_hours * assignee.capacity_rate
    }

    /// Hours actually available: rate-allowed minus overlapping personal
    /// schedule time, clipped at 0.
    pub fn available_hours(&self, date: NaiveDate, assignee: &AssigneeCapacity) -> f64 {
        if !self.calendar.is_working_day(date) {
            return 0.0;
        }
        let booked = self.personal_schedule_hours(date, &assignee.user_id);
        (self.standard_daily_hours * assignee.capacity_rate - booked).max(0.0)
    }

    /// Personal-schedule hours booked for a user on a given day.
    pub fn personal_schedule_hours(&self, date: NaiveDate, user_id: &str) -> f64 {
        self.personal_schedule
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.hours_on(date))
            .sum()
    }
}
