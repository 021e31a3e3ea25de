use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod daily;
pub mod forecast;
pub mod monthly;

/// Why a task could not be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningReason {
    /// The planned period contains no working days.
    NoWorkingDays,
    /// The task has no planned start date.
    MissingPlannedStart,
}

impl WarningReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningReason::NoWorkingDays => "NO_WORKING_DAYS",
            WarningReason::MissingPlannedStart => "MISSING_PLANNED_START",
        }
    }
}

/// A task that could not be allocated. Not an error: the task is skipped
/// and reported so batch computation over many tasks never aborts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfeasibleTaskWarning {
    pub task_id: i32,
    pub task_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    pub reason: WarningReason,
}

impl fmt::Display for InfeasibleTaskWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task {} '{}' ({}): {}",
            self.task_id,
            self.task_name,
            self.assignee.as_deref().unwrap_or("unassigned"),
            self.reason.as_str()
        )?;
        if let (Some(start), Some(end)) = (self.period_start, self.period_end) {
            write!(f, " for period {start}..{end}")?;
        }
        Ok(())
    }
}
