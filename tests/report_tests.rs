use chrono::NaiveDate;
use workload_tool::calendar::WorkCalendar;
use workload_tool::capacity::{AssigneeCapacity, CapacityModel};
use workload_tool::calculations::daily::DailyAllocationEngine;
use workload_tool::report::{
    daily_to_dataframe, save_summary_to_csv, save_summary_to_json, summary_to_dataframe,
};
use workload_tool::summary::{SummaryAccumulator, SummaryReport};
use workload_tool::task::Task;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_report() -> SummaryReport {
    let mut acc = SummaryAccumulator::new();
    acc.accumulate("alice", "2024/03", 10.0, 8.0, 10.0, 11.0, None);
    acc.accumulate("bob", "2024/03", 20.0, 25.0, 18.0, 27.0, None);
    acc.accumulate("alice", "2024/04", 5.0, 0.0, 5.0, 5.0, None);
    acc.get_totals()
}

#[test]
fn summary_dataframe_has_one_row_per_cell() {
    let report = sample_report();
    let df = summary_to_dataframe(&report).unwrap();
    assert_eq!(df.height(), 3);

    let expected = [
        "month",
        "group",
        "task_count",
        "baseline_hours",
        "planned_hours",
        "actual_hours",
        "forecast_hours",
        "difference",
    ];
    for name in expected {
        assert!(df.column(name).is_ok(), "missing column {name}");
    }

    let planned = df.column("planned_hours").unwrap().f64().unwrap();
    let total: f64 = planned.into_iter().flatten().sum();
    assert_eq!(total, 35.0);
}

#[test]
fn daily_dataframe_carries_dates_and_flags() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = DailyAllocationEngine::new(&model);
    let alice = AssigneeCapacity::new("alice", 1.0);

    let task = Task::new(1, "t").with_planned(date(2024, 3, 4), Some(date(2024, 3, 8)), 10.0);
    let report = engine.allocate(&[task], &alice, date(2024, 3, 4), date(2024, 3, 10));

    let df = daily_to_dataframe(&report).unwrap();
    assert_eq!(df.height(), 7);
    let weekend = df.column("is_weekend").unwrap().bool().unwrap();
    let weekend_count = weekend.into_iter().flatten().filter(|flag| *flag).count();
    assert_eq!(weekend_count, 2);
    assert!(df.column("date").unwrap().date().is_ok());
}

#[test]
fn csv_export_writes_one_line_per_row() {
    let report = sample_report();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.csv");
    save_summary_to_csv(&report, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("month"));
    assert!(header.contains("forecast_hours"));
    assert_eq!(lines.count(), report.rows.len());
    assert!(contents.contains("2024/03"));
}

#[test]
fn json_export_round_trips() {
    let report = sample_report();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    save_summary_to_json(&report, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let restored: SummaryReport = serde_json::from_str(&contents).unwrap();
    assert_eq!(restored, report);
}
