use chrono::{Duration, NaiveDate, Weekday};
use workload_tool::calendar::{WorkCalendar, month_key};

#[test]
fn default_calendar_weekends_not_working() {
    let cal = WorkCalendar::default();
    // 2024-03-02 is a Saturday, 2024-03-03 is a Sunday
    let sat = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    let sun = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
    assert!(!cal.is_working_day(sat));
    assert!(!cal.is_working_day(sun));
    assert!(cal.is_weekend(sat));
    assert!(cal.is_weekend(sun));
}

#[test]
fn holidays_block_working_days_by_exact_date() {
    let holiday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(); // a Monday
    let cal = WorkCalendar::with_holidays([holiday]);
    assert!(!cal.is_working_day(holiday));
    assert!(cal.is_company_holiday(holiday));
    // Same day the following year is unaffected
    let next_year = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
    assert!(cal.is_working_day(next_year));
}

#[test]
fn count_working_days_is_inclusive() {
    let cal = WorkCalendar::default();
    let mon = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let fri = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    assert_eq!(cal.count_working_days(mon, fri), 5);
    assert_eq!(cal.count_working_days(mon, mon), 1);
}

#[test]
fn count_working_days_empty_when_start_after_end() {
    let cal = WorkCalendar::default();
    let mon = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let fri = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    assert_eq!(cal.count_working_days(fri, mon), 0);
}

#[test]
fn count_working_days_decomposes_at_any_midpoint() {
    let mut cal = WorkCalendar::default();
    cal.add_holiday(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let total = cal.count_working_days(start, end);

    let mut mid = start;
    while mid < end {
        let left = cal.count_working_days(start, mid);
        let right = cal.count_working_days(mid + Duration::days(1), end);
        assert_eq!(left + right, total, "split at {mid}");
        mid += Duration::days(1);
    }
}

#[test]
fn working_days_in_range_matches_count() {
    let cal = WorkCalendar::with_holidays([NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()]);
    let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let days = cal.working_days_in_range(start, end);
    assert_eq!(days.len() as i64, cal.count_working_days(start, end));
    assert_eq!(days.len(), 4); // Mon, Tue, Thu, Fri
}

#[test]
fn custom_working_week_round_trips_through_config() {
    let working = vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Sat,
    ];
    let holidays = vec![NaiveDate::from_ymd_opt(2024, 6, 19).unwrap()];
    let cal = WorkCalendar::custom(working, holidays.clone());

    // Friday off, Saturday on
    assert!(!cal.is_working_day(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()));
    assert!(cal.is_working_day(NaiveDate::from_ymd_opt(2024, 6, 22).unwrap()));

    let config = cal.to_config();
    assert_eq!(config.holidays(), holidays.as_slice());
    let recreated = WorkCalendar::from_config(&config);
    assert_eq!(recreated.to_config(), config);
}

#[test]
fn month_key_sorts_chronologically() {
    let mut keys = vec![
        month_key(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()),
        month_key(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
        month_key(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
    ];
    keys.sort();
    assert_eq!(keys, vec!["2024/02", "2024/11", "2025/02"]);
}
