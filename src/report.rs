use crate::calculations::daily::DailyAllocationReport;
use crate::summary::{SummaryReport, SummaryRow};
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum ReportError {
    Serialization(SerdeJsonError),
    DataFrame(PolarsError),
    Io(io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Serialization(err) => write!(f, "serialization error: {err}"),
            ReportError::DataFrame(err) => write!(f, "dataframe conversion error: {err}"),
            ReportError::Io(err) => write!(f, "io error: {err}"),
            ReportError::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<SerdeJsonError> for ReportError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<PolarsError> for ReportError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

impl From<io::Error> for ReportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ReportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Linearize a summary grid into a DataFrame, one row per (month, group)
/// cell.
pub fn summary_to_dataframe(report: &SummaryReport) -> ReportResult<DataFrame> {
    let months: Vec<&str> = report.rows.iter().map(|row| row.month_key.as_str()).collect();
    let groups: Vec<&str> = report.rows.iter().map(|row| row.group_key.as_str()).collect();
    let task_counts: Vec<u32> = report.rows.iter().map(|row| row.task_count as u32).collect();
    let baseline: Vec<f64> = report.rows.iter().map(|row| row.baseline_hours).collect();
    let planned: Vec<f64> = report.rows.iter().map(|row| row.planned_hours).collect();
    let actual: Vec<f64> = report.rows.iter().map(|row| row.actual_hours).collect();
    let forecast: Vec<f64> = report.rows.iter().map(|row| row.forecast_hours).collect();
    let difference: Vec<f64> = report.rows.iter().map(|row| row.difference).collect();

    let columns = vec![
        Series::new(PlSmallStr::from_static("month"), months).into_column(),
        Series::new(PlSmallStr::from_static("group"), groups).into_column(),
        Series::new(PlSmallStr::from_static("task_count"), task_counts).into_column(),
        Series::new(PlSmallStr::from_static("baseline_hours"), baseline).into_column(),
        Series::new(PlSmallStr::from_static("planned_hours"), planned).into_column(),
        Series::new(PlSmallStr::from_static("actual_hours"), actual).into_column(),
        Series::new(PlSmallStr::from_static("forecast_hours"), forecast).into_column(),
        Series::new(PlSmallStr::from_static("difference"), difference).into_column(),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Linearize a daily workload report into a DataFrame, one row per day.
pub fn daily_to_dataframe(report: &DailyAllocationReport) -> ReportResult<DataFrame> {
    let dates: Vec<i32> = report.per_day.iter().map(|day| date_to_i32(day.date)).collect();
    let weekend: Vec<bool> = report.per_day.iter().map(|day| day.is_weekend).collect();
    let holiday: Vec<bool> = report
        .per_day
        .iter()
        .map(|day| day.is_company_holiday)
        .collect();
    let available: Vec<f64> = report.per_day.iter().map(|day| day.available_hours).collect();
    let standard: Vec<f64> = report.per_day.iter().map(|day| day.standard_hours).collect();
    let rate_allowed: Vec<f64> = report
        .per_day
        .iter()
        .map(|day| day.rate_allowed_hours)
        .collect();
    let allocated: Vec<f64> = report.per_day.iter().map(|day| day.allocated_hours).collect();
    let overloaded: Vec<bool> = report.per_day.iter().map(|day| day.is_overloaded).collect();
    let overloaded_hours: Vec<f64> = report
        .per_day
        .iter()
        .map(|day| day.overloaded_hours)
        .collect();
    let over_standard: Vec<bool> = report
        .per_day
        .iter()
        .map(|day| day.is_overloaded_by_standard)
        .collect();
    let over_rate: Vec<bool> = report
        .per_day
        .iter()
        .map(|day| day.is_over_rate_capacity)
        .collect();

    let date_series =
        Series::new(PlSmallStr::from_static("date"), dates).cast(&DataType::Date)?;
    let columns = vec![
        date_series.into_column(),
        Series::new(PlSmallStr::from_static("is_weekend"), weekend).into_column(),
        Series::new(PlSmallStr::from_static("is_company_holiday"), holiday).into_column(),
        Series::new(PlSmallStr::from_static("available_hours"), available).into_column(),
        Series::new(PlSmallStr::from_static("standard_hours"), standard).into_column(),
        Series::new(PlSmallStr::from_static("rate_allowed_hours"), rate_allowed).into_column(),
        Series::new(PlSmallStr::from_static("allocated_hours"), allocated).into_column(),
        Series::new(PlSmallStr::from_static("is_overloaded"), overloaded).into_column(),
        Series::new(PlSmallStr::from_static("overloaded_hours"), overloaded_hours).into_column(),
        Series::new(PlSmallStr::from_static("is_overloaded_by_standard"), over_standard)
            .into_column(),
        Series::new(PlSmallStr::from_static("is_over_rate_capacity"), over_rate).into_column(),
    ];
    Ok(DataFrame::new(columns)?)
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}

#[derive(Serialize, Deserialize)]
struct SummaryCsvRecord {
    month: String,
    group: String,
    task_count: usize,
    baseline_hours: f64,
    planned_hours: f64,
    actual_hours: f64,
    forecast_hours: f64,
    difference: f64,
}

impl From<&SummaryRow> for SummaryCsvRecord {
    fn from(row: &SummaryRow) -> Self {
        Self {
            month: row.month_key.clone(),
            group: row.group_key.clone(),
            task_count: row.task_count,
            baseline_hours: row.baseline_hours,
            planned_hours: row.planned_hours,
            actual_hours: row.actual_hours,
            forecast_hours: row.forecast_hours,
            difference: row.difference,
        }
    }
}

pub fn save_summary_to_csv<P: AsRef<Path>>(report: &SummaryReport, path: P) -> ReportResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &report.rows {
        writer.serialize(SummaryCsvRecord::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_summary_to_json<P: AsRef<Path>>(report: &SummaryReport, path: P) -> ReportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
