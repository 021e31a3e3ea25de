use crate::calculations::daily::{DailyAllocationEngine, DailyAllocationReport};
use crate::calculations::forecast::{ForecastCalculationService, ForecastMethod, ForecastResult};
use crate::calculations::monthly::{MonthlyAllocationEngine, TaskAllocationResult};
use crate::calculations::InfeasibleTaskWarning;
use crate::calendar::{month_key, WorkCalendar};
use crate::capacity::{AssigneeCapacity, CapacityModel, PersonalScheduleEntry};
use crate::config::EngineConfig;
use crate::quantize::{QuantizeError, Quantizer};
use crate::summary::{ContributingTask, SummaryAccumulator, SummaryReport};
use crate::task::{ProgressMeasurement, Task};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A monthly earned-value summary plus the warnings gathered while
/// building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub report: SummaryReport,
    pub warnings: Vec<InfeasibleTaskWarning>,
}

/// Facade bundling the calendar, configuration, assignee capacities and
/// personal schedules behind the engine's public operations. Each call is
/// a pure function of the engine's snapshot and its arguments; inputs are
/// never mutated.
pub struct AllocationEngine {
    calendar: WorkCalendar,
    config: EngineConfig,
    capacities: Vec<AssigneeCapacity>,
    personal_schedule: Vec<PersonalScheduleEntry>,
    quantizer: Option<Quantizer>,
}

impl AllocationEngine {
    pub fn new(calendar: WorkCalendar, config: EngineConfig) -> Result<Self, QuantizeError> {
        let quantizer = match config.quantization_step {
            Some(step) => Some(Quantizer::new(step)?),
            None => None,
        };
        Ok(Self {
            calendar,
            config,
            capacities: Vec::new(),
            personal_schedule: Vec::new(),
            quantizer,
        })
    }

    pub fn with_capacities(mut self, capacities: Vec<AssigneeCapacity>) -> Self {
        self.capacities = capacities;
        self
    }

    pub fn with_personal_schedule(mut self, entries: Vec<PersonalScheduleEntry>) -> Self {
        self.personal_schedule = entries;
        self
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn capacity_for(&self, user_id: &str) -> Option<&AssigneeCapacity> {
        self.capacities
            .iter()
            .find(|capacity| capacity.user_id == user_id)
    }

    fn capacity_model(&self) -> CapacityModel<'_> {
        CapacityModel::new(
            &self.calendar,
            self.config.standard_daily_hours,
            &self.personal_schedule,
        )
    }

    /// Per-day workload for one assignee over a date window.
    pub fn allocate_daily(
        &self,
        tasks: &[Task],
        assignee: &AssigneeCapacity,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> DailyAllocationReport {
        let capacity = self.capacity_model();
        DailyAllocationEngine::new(&capacity).allocate(tasks, assignee, range_start, range_end)
    }

    /// Month-bucket allocation for one task, quantized per the engine
    /// configuration.
    pub fn allocate_monthly(&self, task: &Task) -> TaskAllocationResult {
        let capacity = self.capacity_model();
        let assignee = task
            .assignee
            .as_deref()
            .and_then(|user_id| self.capacity_for(user_id));
        MonthlyAllocationEngine::new(&capacity).allocate(task, assignee, self.quantizer.as_ref())
    }

    /// Estimate-at-completion for one task.
    pub fn forecast(
        &self,
        task: &Task,
        method: ForecastMethod,
        measurement: ProgressMeasurement,
        as_of: NaiveDate,
    ) -> ForecastResult {
        ForecastCalculationService::new(&self.calendar).forecast(task, method, measurement, as_of)
    }

    /// Monthly earned-value summary grouped by assignee name.
    pub fn summarize_by_assignee(
        &self,
        tasks: &[Task],
        method: ForecastMethod,
        measurement: ProgressMeasurement,
        as_of: NaiveDate,
    ) -> MonthlySummary {
        let mut accumulator = SummaryAccumulator::new();
        for capacity in &self.capacities {
            if let Some(sequence) = capacity.sequence {
                accumulator.set_group_sequence(capacity.user_id.clone(), sequence);
            }
        }
        self.summarize(tasks, method, measurement, as_of, accumulator, |task| {
            task.assignee.clone().unwrap_or_else(|| "unassigned".into())
        })
    }

    /// Monthly earned-value summary grouped by phase name.
    pub fn summarize_by_phase(
        &self,
        tasks: &[Task],
        method: ForecastMethod,
        measurement: ProgressMeasurement,
        as_of: NaiveDate,
    ) -> MonthlySummary {
        self.summarize(
            tasks,
            method,
            measurement,
            as_of,
            SummaryAccumulator::new(),
            |task| task.phase.clone().unwrap_or_else(|| "unphased".into()),
        )
    }

    /// Allocate and forecast per task in parallel (tasks are
    /// independent), then fold sequentially into the accumulator.
    fn summarize<F>(
        &self,
        tasks: &[Task],
        method: ForecastMethod,
        measurement: ProgressMeasurement,
        as_of: NaiveDate,
        mut accumulator: SummaryAccumulator,
        group_key: F,
    ) -> MonthlySummary
    where
        F: Fn(&Task) -> String + Sync,
    {
        let per_task: Vec<(TaskAllocationResult, ForecastResult, String, &Task)> = tasks
            .par_iter()
            .map(|task| {
                let allocation = self.allocate_monthly(task);
                let forecast = self.forecast(task, method, measurement, as_of);
                (allocation, forecast, group_key(task), task)
            })
            .collect();

        let mut warnings = Vec::new();
        for (allocation, forecast, group, task) in per_task {
            if let Some(warning) = allocation.warning {
                if self.config.count_unallocatable_tasks {
                    if let Some(start) = task.planned.start {
                        accumulator.accumulate_count_only(&group, &month_key(start));
                    }
                }
                warnings.push(warning);
                continue;
            }
            for (month, detail) in &allocation.months {
                accumulator.accumulate(
                    &group,
                    month,
                    detail.planned_hours,
                    detail.actual_hours,
                    detail.baseline_hours,
                    forecast.hours * detail.allocation_ratio,
                    Some(ContributingTask {
                        task_id: task.id,
                        task_name: task.name.clone(),
                        detail: detail.clone(),
                    }),
                );
            }
        }

        MonthlySummary {
            report: accumulator.get_totals(),
            warnings,
        }
    }
}
