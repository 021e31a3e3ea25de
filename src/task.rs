use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of work an hour entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourType {
    Normal,
    Overtime,
}

impl Default for HourType {
    fn default() -> Self {
        HourType::Normal
    }
}

/// A single hour record attached to a task period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    pub hours: f64,
    #[serde(default)]
    pub hour_type: HourType,
}

impl HourEntry {
    pub fn normal(hours: f64) -> Self {
        Self {
            hours,
            hour_type: HourType::Normal,
        }
    }
}

/// One of a task's three period records (baseline, planned, actual).
///
/// A missing end date means a single-day period ending on `start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub hours: Vec<HourEntry>,
}

impl TaskPeriod {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>, hours: f64) -> Self {
        Self {
            start: Some(start),
            end,
            hours: vec![HourEntry::normal(hours)],
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.hours.iter().map(|entry| entry.hours).sum()
    }

    /// Effective inclusive end: a period without an end date is a single day.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        self.end.or(self.start)
    }
}

/// How a task's progress percentage is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMeasurement {
    /// 0% until complete, then 100%.
    ZeroOneHundred,
    /// 50% once started, 100% once complete.
    FiftyFifty,
    /// The task's own reported percentage.
    PercentComplete,
}

impl ProgressMeasurement {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressMeasurement::ZeroOneHundred => "0_100",
            ProgressMeasurement::FiftyFifty => "50_50",
            ProgressMeasurement::PercentComplete => "percent_complete",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "0_100" => Some(ProgressMeasurement::ZeroOneHundred),
            "50_50" => Some(ProgressMeasurement::FiftyFifty),
            "percent_complete" => Some(ProgressMeasurement::PercentComplete),
            _ => None,
        }
    }
}

impl Default for ProgressMeasurement {
    fn default() -> Self {
        ProgressMeasurement::PercentComplete
    }
}

/// A project task with baseline/planned/actual periods and hour records.
///
/// The planned period decides which calendar days and months the task
/// occupies; baseline and actual hours ride along without changing
/// occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub baseline: TaskPeriod,
    #[serde(default)]
    pub planned: TaskPeriod,
    #[serde(default)]
    pub actual: TaskPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<f64>,
    #[serde(default)]
    pub progress_measurement: ProgressMeasurement,
    /// Whether the task has been marked complete (drives the
    /// zero-one-hundred and fifty-fifty conventions).
    #[serde(default)]
    pub is_complete: bool,
    /// Whether work has started (drives the fifty-fifty convention).
    #[serde(default)]
    pub is_started: bool,
}

impl Task {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phase: None,
            assignee: None,
            baseline: TaskPeriod::default(),
            planned: TaskPeriod::default(),
            actual: TaskPeriod::default(),
            percent_complete: None,
            progress_measurement: ProgressMeasurement::default(),
            is_complete: false,
            is_started: false,
        }
    }

    pub fn with_planned(mut self, start: NaiveDate, end: Option<NaiveDate>, hours: f64) -> Self {
        self.planned = TaskPeriod::new(start, end, hours);
        self
    }

    pub fn with_actual(mut self, start: NaiveDate, end: Option<NaiveDate>, hours: f64) -> Self {
        self.actual = TaskPeriod::new(start, end, hours);
        self
    }

    pub fn with_baseline(mut self, start: NaiveDate, end: Option<NaiveDate>, hours: f64) -> Self {
        self.baseline = TaskPeriod::new(start, end, hours);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn planned_total_hours(&self) -> f64 {
        self.planned.total_hours()
    }

    pub fn actual_total_hours(&self) -> f64 {
        self.actual.total_hours()
    }

    pub fn baseline_total_hours(&self) -> f64 {
        self.baseline.total_hours()
    }

    /// Progress as a fraction in [0, 1] under the task's measurement
    /// convention.
    pub fn progress_fraction(&self) -> f64 {
        self.progress_fraction_under(self.progress_measurement)
    }

    /// Progress under an explicit convention, overriding the task's own.
    pub fn progress_fraction_under(&self, measurement: ProgressMeasurement) -> f64 {
        match measurement {
            ProgressMeasurement::ZeroOneHundred => {
                if self.is_complete { 1.0 } else { 0.0 }
            }
            ProgressMeasurement::FiftyFifty => {
                if self.is_complete {
                    1.0
                } else if self.is_started {
                    0.5
                } else {
                    0.0
                }
            }
            ProgressMeasurement::PercentComplete => {
                self.percent_complete.unwrap_or(0.0).clamp(0.0, 1.0)
            }
        }
    }
}
