use crate::calendar::WorkCalendar;
use crate::task::{ProgressMeasurement, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Earned-value forecast flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// max(planned, actual): never forecast below either figure.
    PlannedOrActual,
    /// Remaining work proceeds exactly at planned cost.
    Optimistic,
    /// Remaining work proceeds at the observed cost performance (CPI).
    Realistic,
    /// Remaining work proceeds at observed cost and schedule performance
    /// (CPI * SPI).
    Conservative,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::PlannedOrActual => "planned_or_actual",
            ForecastMethod::Optimistic => "optimistic",
            ForecastMethod::Realistic => "realistic",
            ForecastMethod::Conservative => "conservative",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "planned_or_actual" => Some(ForecastMethod::PlannedOrActual),
            "optimistic" => Some(ForecastMethod::Optimistic),
            "realistic" => Some(ForecastMethod::Realistic),
            "conservative" => Some(ForecastMethod::Conservative),
            _ => None,
        }
    }
}

/// Projected total hours at completion for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub task_id: i32,
    pub method: ForecastMethod,
    pub hours: f64,
}

/// Computes estimate-at-completion figures. Pure function of its inputs;
/// every degenerate denominator degrades to a neutral value instead of
/// propagating NaN or infinity.
pub struct ForecastCalculationService<'a> {
    calendar: &'a WorkCalendar,
}

impl<'a> ForecastCalculationService<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self { calendar }
    }

    pub fn forecast(
        &self,
        task: &Task,
        method: ForecastMethod,
        measurement: ProgressMeasurement,
        as_of: NaiveDate,
    ) -> ForecastResult {
        let bac = task.planned_total_hours();
        let ac = task.actual_total_hours();

        if bac <= 0.0 {
            // Nothing was planned; the actuals are the forecast.
            return ForecastResult {
                task_id: task.id,
                method,
                hours: ac,
            };
        }

        let progress = task.progress_fraction_under(measurement);
        let ev = bac * progress;

        let hours = match method {
            ForecastMethod::PlannedOrActual => bac.max(ac),
            ForecastMethod::Optimistic => ac + (bac - ev),
            ForecastMethod::Realistic => {
                let cpi = if ac > 0.0 && ev > 0.0 { ev / ac } else { 1.0 };
                ac + (bac - ev) / cpi
            }
            ForecastMethod::Conservative => {
                let elapsed = self.elapsed_fraction(task, as_of);
                if ac <= 0.0 || elapsed <= 0.0 {
                    bac
                } else {
                    let cpi = ev / ac;
                    let spi = ev / (bac * elapsed);
                    let index = cpi * spi;
                    if index > 0.0 { ac + (bac - ev) / index } else { bac }
                }
            }
        };

        ForecastResult {
            task_id: task.id,
            method,
            hours,
        }
    }

    /// Fraction of the planned period's working days elapsed as of a
    /// date, clamped to (0, 1]. Returns 0 when the period has not started
    /// or cannot be measured.
    fn elapsed_fraction(&self, task: &Task, as_of: NaiveDate) -> f64 {
        let Some(start) = task.planned.start else {
            return 0.0;
        };
        let end = task.planned.effective_end().unwrap_or(start);
        let total = self.calendar.count_working_days(start, end);
        if total == 0 || as_of < start {
            return 0.0;
        }
        let elapsed = self.calendar.count_working_days(start, as_of.min(end));
        (elapsed as f64 / total as f64).min(1.0)
    }
}
