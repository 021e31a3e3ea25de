use chrono::NaiveDate;
use workload_tool::calculations::WarningReason;
use workload_tool::calculations::monthly::MonthlyAllocationEngine;
use workload_tool::calendar::WorkCalendar;
use workload_tool::capacity::{AssigneeCapacity, CapacityModel, PersonalScheduleEntry};
use workload_tool::quantize::Quantizer;
use workload_tool::task::Task;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month_boundary_split_prorates_by_working_days() {
    // Mon 2024-01-29 .. Fri 2024-02-02: 3 January working days,
    // 2 February working days, no holidays.
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);

    let task = Task::new(1, "migration")
        .with_planned(date(2024, 1, 29), Some(date(2024, 2, 2)), 10.0);
    let result = engine.allocate(&task, None, None);

    assert!(result.is_allocated());
    assert_eq!(result.months.len(), 2);

    let january = &result.months["2024/01"];
    assert_eq!(january.working_days, 3);
    assert!((january.allocation_ratio - 0.6).abs() < 1e-9);
    assert!((january.planned_hours - 6.0).abs() < 1e-9);

    let february = &result.months["2024/02"];
    assert_eq!(february.working_days, 2);
    assert!((february.allocation_ratio - 0.4).abs() < 1e-9);
    assert!((february.planned_hours - 4.0).abs() < 1e-9);
}

#[test]
fn task_within_a_single_month_has_ratio_one() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);

    let task = Task::new(2, "design")
        .with_planned(date(2024, 3, 4), Some(date(2024, 3, 15)), 40.0);
    let result = engine.allocate(&task, None, None);

    assert_eq!(result.months.len(), 1);
    let march = &result.months["2024/03"];
    assert_eq!(march.allocation_ratio, 1.0);
    assert_eq!(march.planned_hours, 40.0);
}

#[test]
fn same_ratio_applies_to_actual_and_baseline() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);

    let task = Task::new(3, "rollout")
        .with_planned(date(2024, 1, 29), Some(date(2024, 2, 2)), 10.0)
        .with_actual(date(2024, 1, 29), Some(date(2024, 2, 2)), 5.0)
        .with_baseline(date(2024, 1, 29), Some(date(2024, 2, 2)), 20.0);
    let result = engine.allocate(&task, None, None);

    let january = &result.months["2024/01"];
    assert!((january.actual_hours - 3.0).abs() < 1e-9);
    assert!((january.baseline_hours - 12.0).abs() < 1e-9);
}

#[test]
fn missing_end_date_means_single_day_task() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);

    let task = Task::new(4, "hotfix").with_planned(date(2024, 3, 4), None, 4.0);
    let result = engine.allocate(&task, None, None);

    assert_eq!(result.months.len(), 1);
    let march = &result.months["2024/03"];
    assert_eq!(march.working_days, 1);
    assert_eq!(march.allocation_ratio, 1.0);
    assert_eq!(march.planned_hours, 4.0);
}

#[test]
fn weekend_only_period_is_unallocatable() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);

    let task = Task::new(5, "weekend work")
        .with_planned(date(2024, 3, 9), Some(date(2024, 3, 10)), 8.0);
    let result = engine.allocate(&task, None, None);

    assert!(!result.is_allocated());
    assert!(result.months.is_empty());
    let warning = result.warning.as_ref().expect("expected NO_WORKING_DAYS warning");
    assert_eq!(warning.reason, WarningReason::NoWorkingDays);
    assert_eq!(result.total_planned_hours(), 0.0);
}

#[test]
fn missing_planned_start_is_unallocatable() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);

    let result = engine.allocate(&Task::new(6, "undated"), None, None);
    assert!(!result.is_allocated());
    assert_eq!(
        result.warning.unwrap().reason,
        WarningReason::MissingPlannedStart
    );
}

#[test]
fn quantized_months_conserve_the_task_total() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);
    let quantizer = Quantizer::new(0.25).unwrap();

    // 7h across 3 + 2 working days: raw shares 4.2 / 2.8 are off-step
    let task = Task::new(7, "handover")
        .with_planned(date(2024, 1, 29), Some(date(2024, 2, 2)), 7.0);
    let result = engine.allocate(&task, None, Some(&quantizer));

    let january = &result.months["2024/01"];
    let february = &result.months["2024/02"];
    assert_eq!(january.planned_hours, 4.25);
    assert_eq!(february.planned_hours, 2.75);
    assert!((result.total_planned_hours() - 7.0).abs() < 1e-9);
}

#[test]
fn availability_reflects_assignee_rate_and_conflicts_without_changing_ratio() {
    let cal = WorkCalendar::default();
    let monday = date(2024, 3, 4);
    let booked = vec![PersonalScheduleEntry::new(
        "alice",
        monday.and_hms_opt(9, 0, 0).unwrap(),
        monday.and_hms_opt(11, 0, 0).unwrap(),
        "standup block",
    )];
    let model = CapacityModel::new(&cal, 7.5, &booked);
    let engine = MonthlyAllocationEngine::new(&model);
    let alice = AssigneeCapacity::new("alice", 0.5);

    // Mon-Tue task: availability 1.75 + 3.75, ratio still 1.0
    let task = Task::new(8, "pairing")
        .with_assignee("alice")
        .with_planned(monday, Some(date(2024, 3, 5)), 6.0);
    let result = engine.allocate(&task, Some(&alice), None);

    let march = &result.months["2024/03"];
    assert!((march.available_hours - 5.5).abs() < 1e-9);
    assert_eq!(march.allocation_ratio, 1.0);
    assert_eq!(march.planned_hours, 6.0);
}

#[test]
fn long_task_spans_intermediate_months() {
    let cal = WorkCalendar::default();
    let model = CapacityModel::new(&cal, 7.5, &[]);
    let engine = MonthlyAllocationEngine::new(&model);

    let task = Task::new(9, "platform")
        .with_planned(date(2024, 1, 15), Some(date(2024, 4, 12)), 100.0);
    let result = engine.allocate(&task, None, None);

    let months: Vec<&String> = result.months.keys().collect();
    assert_eq!(months, vec!["2024/01", "2024/02", "2024/03", "2024/04"]);
    let ratio_sum: f64 = result.months.values().map(|d| d.allocation_ratio).sum();
    assert!((ratio_sum - 1.0).abs() < 1e-9);
    assert!((result.total_planned_hours() - 100.0).abs() < 1e-9);
}
