pub mod calculations;
pub mod calendar;
pub mod capacity;
pub mod config;
pub mod engine;
pub mod quantize;
pub mod report;
pub mod summary;
pub mod task;
pub mod task_validation;

pub use calculations::daily::{DailyAllocationDetail, DailyAllocationEngine, DailyAllocationReport};
pub use calculations::forecast::{ForecastCalculationService, ForecastMethod, ForecastResult};
pub use calculations::monthly::{AllocationDetail, MonthlyAllocationEngine, TaskAllocationResult};
pub use calculations::{InfeasibleTaskWarning, WarningReason};
pub use calendar::{WorkCalendar, WorkCalendarConfig, month_key};
pub use capacity::{AssigneeCapacity, CapacityModel, PersonalScheduleEntry};
pub use config::EngineConfig;
pub use engine::{AllocationEngine, MonthlySummary};
pub use quantize::{QuantizeError, Quantizer};
pub use report::{
    ReportError, daily_to_dataframe, save_summary_to_csv, save_summary_to_json,
    summary_to_dataframe,
};
pub use summary::{
    ContributingTask, SummaryAccumulator, SummaryReport, SummaryRow, SummaryTotal,
};
pub use task::{HourEntry, HourType, ProgressMeasurement, Task, TaskPeriod};
pub use task_validation::{
    TaskValidationError, validate_capacity, validate_task, validate_task_collection,
};
