use super::{InfeasibleTaskWarning, WarningReason};
use crate::calendar::{first_day_of_month, last_day_of_month, month_key};
use crate::capacity::{AssigneeCapacity, CapacityModel};
use crate::quantize::Quantizer;
use crate::task::Task;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allocation figures for one calendar month of a task's planned period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationDetail {
    /// Working days of the task's period falling in this month.
    pub working_days: i64,
    /// Assignee availability summed over those working days. Descriptive
    /// only; it never alters the allocation ratio.
    pub available_hours: f64,
    pub planned_hours: f64,
    pub actual_hours: f64,
    pub baseline_hours: f64,
    /// This month's working days over the task's total working days.
    pub allocation_ratio: f64,
}

/// A task's hours distributed over the months its planned period
/// overlaps. Keys are "YYYY/MM"; the map's lexical order is
/// chronological. Created fresh per allocation call, immutable once
/// returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAllocationResult {
    pub task_id: i32,
    pub months: BTreeMap<String, AllocationDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<InfeasibleTaskWarning>,
}

impl TaskAllocationResult {
    fn unallocatable(task_id: i32, warning: InfeasibleTaskWarning) -> Self {
        Self {
            task_id,
            months: BTreeMap::new(),
            warning: Some(warning),
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.warning.is_none() && !self.months.is_empty()
    }

    pub fn total_planned_hours(&self) -> f64 {
        self.months.values().map(|detail| detail.planned_hours).sum()
    }

    pub fn total_actual_hours(&self) -> f64 {
        self.months.values().map(|detail| detail.actual_hours).sum()
    }

    pub fn total_baseline_hours(&self) -> f64 {
        self.months.values().map(|detail| detail.baseline_hours).sum()
    }
}

/// Distributes one task's baseline/planned/actual hours across calendar
/// months in proportion to working-day share.
pub struct MonthlyAllocationEngine<'a> {
    capacity: &'a CapacityModel<'a>,
}

impl<'a> MonthlyAllocationEngine<'a> {
    pub fn new(capacity: &'a CapacityModel<'a>) -> Self {
        Self { capacity }
    }

    pub fn allocate(
        &self,
        task: &Task,
        assignee: Option<&AssigneeCapacity>,
        quantizer: Option<&Quantizer>,
    ) -> TaskAllocationResult {
        let Some(start) = task.planned.start else {
            return TaskAllocationResult::unallocatable(
                task.id,
                InfeasibleTaskWarning {
                    task_id: task.id,
                    task_name: task.name.clone(),
                    assignee: task.assignee.clone(),
                    period_start: None,
                    period_end: task.planned.end,
                    reason: WarningReason::MissingPlannedStart,
                },
            );
        };
        let end = task.planned.effective_end().unwrap_or(start);

        let calendar = self.capacity.calendar();
        let total_working_days = calendar.count_working_days(start, end);
        if total_working_days == 0 {
            return TaskAllocationResult::unallocatable(
                task.id,
                InfeasibleTaskWarning {
                    task_id: task.id,
                    task_name: task.name.clone(),
                    assignee: task.assignee.clone(),
                    period_start: Some(start),
                    period_end: Some(end),
                    reason: WarningReason::NoWorkingDays,
                },
            );
        }

        // Walk the months the period overlaps, in order.
        let mut keys: Vec<String> = Vec::new();
        let mut working_days: Vec<i64> = Vec::new();
        let mut ratios: Vec<f64> = Vec::new();
        let mut availability: Vec<f64> = Vec::new();

        let mut cursor = first_day_of_month(start);
        while cursor <= end {
            let month_start = cursor.max(start);
            let month_end = last_day_of_month(cursor).min(end);
            let days = calendar.count_working_days(month_start, month_end);

            keys.push(month_key(cursor));
            working_days.push(days);
            ratios.push(days as f64 / total_working_days as f64);
            availability.push(self.availability_over(month_start, month_end, assignee));

            cursor = last_day_of_month(cursor) + Duration::days(1);
        }

        let planned = Self::distribute(task.planned_total_hours(), &ratios, quantizer);
        let actual = Self::distribute(task.actual_total_hours(), &ratios, quantizer);
        let baseline = Self::distribute(task.baseline_total_hours(), &ratios, quantizer);

        let mut months = BTreeMap::new();
        for (idx, key) in keys.into_iter().enumerate() {
            months.insert(
                key,
                AllocationDetail {
                    working_days: working_days[idx],
                    available_hours: availability[idx],
                    planned_hours: planned[idx],
                    actual_hours: actual[idx],
                    baseline_hours: baseline[idx],
                    allocation_ratio: ratios[idx],
                },
            );
        }

        TaskAllocationResult {
            task_id: task.id,
            months,
            warning: None,
        }
    }

    /// Prorate a task total over the month ratios, each series quantized
    /// independently against its own total.
    fn distribute(total: f64, ratios: &[f64], quantizer: Option<&Quantizer>) -> Vec<f64> {
        let raw: Vec<f64> = ratios.iter().map(|ratio| total * ratio).collect();
        match quantizer {
            Some(quantizer) => quantizer.quantize(&raw),
            None => raw,
        }
    }

    fn availability_over(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        assignee: Option<&AssigneeCapacity>,
    ) -> f64 {
        self.capacity
            .calendar()
            .working_days_in_range(start, end)
            .into_iter()
            .map(|date| match assignee {
                Some(assignee) => self.capacity.available_hours(date, assignee),
                None => self.capacity.standard_hours(date),
            })
            .sum()
    }
}
