use super::{InfeasibleTaskWarning, WarningReason};
use crate::capacity::{AssigneeCapacity, CapacityModel};
use crate::task::Task;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const EPSILON: f64 = 1e-9;

/// One day of an assignee's workload view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAllocationDetail {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_company_holiday: bool,
    /// Calendar availability: rate capacity minus personal-schedule time.
    pub available_hours: f64,
    /// Unscaled standard capacity for the day.
    pub standard_hours: f64,
    /// Capacity-rate ceiling, ignoring personal schedule.
    pub rate_allowed_hours: f64,
    /// Hours allocated across all tasks active this day.
    pub allocated_hours: f64,
    pub is_overloaded: bool,
    pub overloaded_hours: f64,
    pub is_overloaded_by_standard: bool,
    pub is_over_rate_capacity: bool,
}

/// Result of a daily allocation run over a date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAllocationReport {
    pub per_day: Vec<DailyAllocationDetail>,
    pub warnings: Vec<InfeasibleTaskWarning>,
}

impl DailyAllocationReport {
    pub fn overloaded_days(&self) -> usize {
        self.per_day.iter().filter(|day| day.is_overloaded).count()
    }

    pub fn total_allocated_hours(&self) -> f64 {
        self.per_day.iter().map(|day| day.allocated_hours).sum()
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("days={}", self.per_day.len()));
        parts.push(format!("allocated={:.2}", self.total_allocated_hours()));
        let overloaded = self.overloaded_days();
        if overloaded > 0 {
            parts.push(format!("overloaded={overloaded}"));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("warnings={}", self.warnings.len()));
        }
        parts.join(", ")
    }
}

/// Spreads each task's planned hours evenly across the working days of
/// its own planned period and checks every day of the query window
/// against the assignee's three capacity ceilings.
pub struct DailyAllocationEngine<'a> {
    capacity: &'a CapacityModel<'a>,
}

struct TaskShare {
    start: NaiveDate,
    end: NaiveDate,
    daily_hours: f64,
}

impl<'a> DailyAllocationEngine<'a> {
    pub fn new(capacity: &'a CapacityModel<'a>) -> Self {
        Self { capacity }
    }

    pub fn allocate(
        &self,
        tasks: &[Task],
        assignee: &AssigneeCapacity,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> DailyAllocationReport {
        let calendar = self.capacity.calendar();
        let mut shares: Vec<TaskShare> = Vec::with_capacity(tasks.len());
        let mut warnings = Vec::new();

        for task in tasks {
            let Some(start) = task.planned.start else {
                warnings.push(InfeasibleTaskWarning {
                    task_id: task.id,
                    task_name: task.name.clone(),
                    assignee: task.assignee.clone(),
                    period_start: None,
                    period_end: task.planned.end,
                    reason: WarningReason::MissingPlannedStart,
                });
                continue;
            };
            let end = task.planned.effective_end().unwrap_or(start);

            // The share is computed over the task's own period, not the
            // query window.
            let working_days = calendar.count_working_days(start, end);
            if working_days == 0 {
                warnings.push(InfeasibleTaskWarning {
                    task_id: task.id,
                    task_name: task.name.clone(),
                    assignee: task.assignee.clone(),
                    period_start: Some(start),
                    period_end: Some(end),
                    reason: WarningReason::NoWorkingDays,
                });
                continue;
            }

            shares.push(TaskShare {
                start,
                end,
                daily_hours: task.planned_total_hours() / working_days as f64,
            });
        }

        let mut per_day = Vec::new();
        let mut date = range_start;
        while date <= range_end {
            let working = calendar.is_working_day(date);
            let allocated_hours: f64 = if working {
                shares
                    .iter()
                    .filter(|share| share.start <= date && date <= share.end)
                    .map(|share| share.daily_hours)
                    .sum()
            } else {
                0.0
            };

            let available_hours = self.capacity.available_hours(date, assignee);
            let standard_hours = self.capacity.standard_hours(date);
            let rate_allowed_hours = self.capacity.rate_allowed_hours(date, assignee);

            per_day.push(DailyAllocationDetail {
                date,
                is_weekend: calendar.is_weekend(date),
                is_company_holiday: calendar.is_company_holiday(date),
                available_hours,
                standard_hours,
                rate_allowed_hours,
                allocated_hours,
                is_overloaded: allocated_hours > available_hours + EPSILON,
                overloaded_hours: (allocated_hours - available_hours).max(0.0),
                is_overloaded_by_standard: allocated_hours > standard_hours + EPSILON,
                is_over_rate_capacity: allocated_hours > rate_allowed_hours + EPSILON,
            });
            date += Duration::days(1);
        }

        DailyAllocationReport { per_day, warnings }
    }
}
