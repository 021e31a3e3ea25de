use crate::calculations::monthly::AllocationDetail;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One task's contribution to a summary cell, kept for drill-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingTask {
    pub task_id: i32,
    pub task_name: String,
    pub detail: AllocationDetail,
}

/// A cell of the (month x group) summary grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Assignee name or phase name, depending on the grouping.
    pub group_key: String,
    /// "YYYY/MM".
    pub month_key: String,
    pub task_count: usize,
    pub baseline_hours: f64,
    pub planned_hours: f64,
    pub actual_hours: f64,
    pub forecast_hours: f64,
    /// Always actual - planned.
    pub difference: f64,
    pub details: Vec<ContributingTask>,
}

/// Summed figures over a slice of the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotal {
    pub task_count: usize,
    pub baseline_hours: f64,
    pub planned_hours: f64,
    pub actual_hours: f64,
    pub forecast_hours: f64,
    pub difference: f64,
}

impl SummaryTotal {
    fn add_row(&mut self, row: &SummaryRow) {
        self.task_count += row.task_count;
        self.baseline_hours += row.baseline_hours;
        self.planned_hours += row.planned_hours;
        self.actual_hours += row.actual_hours;
        self.forecast_hours += row.forecast_hours;
        self.difference += row.difference;
    }
}

/// The linearized summary: rows plus month/group axes and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub rows: Vec<SummaryRow>,
    /// Distinct months, lexically sorted (chronological for "YYYY/MM").
    pub months: Vec<String>,
    /// Distinct groups in display order (sequence number, then name).
    pub groups: Vec<String>,
    pub month_totals: BTreeMap<String, SummaryTotal>,
    pub group_totals: BTreeMap<String, SummaryTotal>,
    pub grand_total: SummaryTotal,
}

impl SummaryReport {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("rows={}", self.rows.len()));
        parts.push(format!("months={}", self.months.len()));
        parts.push(format!("groups={}", self.groups.len()));
        parts.push(format!("tasks={}", self.grand_total.task_count));
        parts.push(format!("planned={:.2}", self.grand_total.planned_hours));
        parts.push(format!("actual={:.2}", self.grand_total.actual_hours));
        parts.join(", ")
    }
}

/// Folds per-task, per-month figures into a sparse grid keyed by
/// (month, group). Not safe for concurrent mutation; feed it
/// sequentially and linearize once with `get_totals`.
#[derive(Debug, Default)]
pub struct SummaryAccumulator {
    rows: BTreeMap<(String, String), SummaryRow>,
    sequences: HashMap<String, i32>,
}

impl SummaryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display sequence number for a group. Groups without one
    /// sort after sequenced groups, by name.
    pub fn set_group_sequence(&mut self, group_key: impl Into<String>, sequence: i32) {
        self.sequences.insert(group_key.into(), sequence);
    }

    /// Fold one task-month contribution into the grid. Creates the row on
    /// first sight; `difference` is recomputed on every call.
    pub fn accumulate(
        &mut self,
        group_key: &str,
        month_key: &str,
        planned_hours: f64,
        actual_hours: f64,
        baseline_hours: f64,
        forecast_hours: f64,
        detail: Option<ContributingTask>,
    ) {
        let row = self
            .rows
            .entry((month_key.to_string(), group_key.to_string()))
            .or_insert_with(|| SummaryRow {
                group_key: group_key.to_string(),
                month_key: month_key.to_string(),
                task_count: 0,
                baseline_hours: 0.0,
                planned_hours: 0.0,
                actual_hours: 0.0,
                forecast_hours: 0.0,
                difference: 0.0,
                details: Vec::new(),
            });

        row.task_count += 1;
        row.baseline_hours += baseline_hours;
        row.planned_hours += planned_hours;
        row.actual_hours += actual_hours;
        row.forecast_hours += forecast_hours;
        row.difference = row.actual_hours - row.planned_hours;
        if let Some(detail) = detail {
            row.details.push(detail);
        }
    }

    /// Count a task in a cell without contributing hours. Used when the
    /// unallocatable-task count policy is enabled.
    pub fn accumulate_count_only(&mut self, group_key: &str, month_key: &str) {
        self.accumulate(group_key, month_key, 0.0, 0.0, 0.0, 0.0, None);
    }

    /// Linearize the grid: row list, sorted axes, and totals. Each total
    /// is a single pass over the rows filtered by month or group.
    pub fn get_totals(&self) -> SummaryReport {
        let rows: Vec<SummaryRow> = self.rows.values().cloned().collect();

        let mut months: Vec<String> = rows.iter().map(|row| row.month_key.clone()).collect();
        months.sort();
        months.dedup();

        let mut groups: Vec<String> = rows.iter().map(|row| row.group_key.clone()).collect();
        groups.sort();
        groups.dedup();
        groups.sort_by(|a, b| {
            let seq_a = self.sequences.get(a).copied().unwrap_or(i32::MAX);
            let seq_b = self.sequences.get(b).copied().unwrap_or(i32::MAX);
            seq_a.cmp(&seq_b).then_with(|| a.cmp(b))
        });

        let mut month_totals: BTreeMap<String, SummaryTotal> = BTreeMap::new();
        let mut group_totals: BTreeMap<String, SummaryTotal> = BTreeMap::new();
        let mut grand_total = SummaryTotal::default();
        for row in &rows {
            month_totals
                .entry(row.month_key.clone())
                .or_default()
                .add_row(row);
            group_totals
                .entry(row.group_key.clone())
                .or_default()
                .add_row(row);
            grand_total.add_row(row);
        }

        SummaryReport {
            rows,
            months,
            groups,
            month_totals,
            group_totals,
            grand_total,
        }
    }
}
