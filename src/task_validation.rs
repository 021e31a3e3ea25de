use crate::capacity::AssigneeCapacity;
use crate::task::{ProgressMeasurement, Task, TaskPeriod};
use std::collections::HashSet;
use std::fmt;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct TaskValidationError {
    message: String,
}

impl TaskValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskValidationError {}

fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

fn validate_period(task_id: i32, label: &str, period: &TaskPeriod) -> Result<(), TaskValidationError> {
    if let (Some(start), Some(end)) = (period.start, period.end) {
        if end < start {
            return Err(TaskValidationError::new(format!(
                "task {} {} period ends {} before it starts {}",
                task_id, label, end, start
            )));
        }
    }
    if period.start.is_none() && period.end.is_some() {
        return Err(TaskValidationError::new(format!(
            "task {} {} period has an end date but no start date",
            task_id, label
        )));
    }
    for entry in &period.hours {
        if !entry.hours.is_finite() || entry.hours < -EPSILON {
            return Err(TaskValidationError::new(format!(
                "task {} {} period has invalid hour entry {}",
                task_id, label, entry.hours
            )));
        }
    }
    Ok(())
}

pub fn validate_task(task: &Task) -> Result<(), TaskValidationError> {
    validate_period(task.id, "planned", &task.planned)?;
    validate_period(task.id, "actual", &task.actual)?;
    validate_period(task.id, "baseline", &task.baseline)?;

    if let Some(pct) = task.percent_complete {
        if !pct.is_finite() || pct < -EPSILON || pct > 1.0 + EPSILON {
            return Err(TaskValidationError::new(format!(
                "task {} has invalid percent_complete {} (must be between 0 and 1)",
                task.id, pct
            )));
        }
    }

    match task.progress_measurement {
        ProgressMeasurement::ZeroOneHundred => {
            if let Some(pct) = task.percent_complete {
                if !(approx_equal(pct, 0.0) || approx_equal(pct, 1.0)) {
                    return Err(TaskValidationError::new(format!(
                        "task {} progress_measurement=0_100 requires percent_complete of 0 or 1 (got {})",
                        task.id, pct
                    )));
                }
            }
        }
        ProgressMeasurement::FiftyFifty => {
            if let Some(pct) = task.percent_complete {
                let allowed = [0.0, 0.5, 1.0];
                if !allowed.iter().any(|v| approx_equal(*v, pct)) {
                    return Err(TaskValidationError::new(format!(
                        "task {} progress_measurement=50_50 requires percent_complete of 0, 0.5, or 1 (got {})",
                        task.id, pct
                    )));
                }
            }
        }
        ProgressMeasurement::PercentComplete => {}
    }

    Ok(())
}

pub fn validate_capacity(capacity: &AssigneeCapacity) -> Result<(), TaskValidationError> {
    if !capacity.capacity_rate.is_finite() || capacity.capacity_rate < -EPSILON {
        return Err(TaskValidationError::new(format!(
            "assignee {} has invalid capacity_rate {}",
            capacity.user_id, capacity.capacity_rate
        )));
    }
    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen = HashSet::new();
    for task in tasks {
        validate_task(task)?;
        if !seen.insert(task.id) {
            return Err(TaskValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }
    Ok(())
}
