use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::database::models::{AggregateRow, AttendanceRecord, AttendanceStatus, StatusCounts};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Employee,
    Department,
    #[default]
    All,
}

impl GroupBy {
    fn key_and_label(&self, record: &AttendanceRecord) -> (String, String) {
        match self {
            GroupBy::Employee => (record.employee_id.to_string(), record.employee_name.clone()),
            GroupBy::Department => (record.department.to_lowercase(), record.department.clone()),
            GroupBy::All => ("all".to_string(), "Todos".to_string()),
        }
    }
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "employee" => Ok(GroupBy::Employee),
            "department" => Ok(GroupBy::Department),
            "all" | "none" | "" => Ok(GroupBy::All),
            _ => Err(format!("Invalid grouping: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Leave weekend/holiday records out of the rate denominators. They are
    /// still counted in `total` and `status_counts`.
    pub exclude_non_working_days: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    AttendanceRate,
    PunctualityRate,
    Label,
}

/// Rounded integer percentage, 0 for an empty denominator.
pub fn rate(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u32
}

/// Percent change from `previous` to `current`, `None` without a baseline.
pub fn trend_percent(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    let change = (current - previous) / previous.abs() * 100.0;
    Some((change * 10.0).round() / 10.0)
}

#[derive(Default)]
struct Accumulator {
    key: String,
    label: String,
    counts: StatusCounts,
    work_minutes: f64,
    overtime_minutes: f64,
    late_minutes: u32,
}

impl Accumulator {
    fn push(&mut self, record: &AttendanceRecord) {
        self.counts.record(record.status);
        self.work_minutes += record.work_hours * 60.0;
        self.overtime_minutes += record.overtime_hours * 60.0;
        self.late_minutes += record.late_minutes;
    }

    fn finish(self, options: AggregateOptions) -> AggregateRow {
        let counts = self.counts;
        let total = counts.sum();
        let denominator = if options.exclude_non_working_days {
            total - counts.weekend - counts.holiday
        } else {
            total
        };
        let present_like: u32 = AttendanceStatus::ALL
            .iter()
            .filter(|s| s.is_present_like())
            .map(|s| counts.get(*s))
            .sum();

        AggregateRow {
            key: self.key,
            label: self.label,
            total,
            attendance_rate: rate(present_like, denominator),
            punctuality_rate: rate(counts.present, denominator),
            work_hours: (self.work_minutes / 60.0 * 100.0).round() / 100.0,
            overtime_hours: (self.overtime_minutes / 60.0 * 100.0).round() / 100.0,
            late_minutes: self.late_minutes,
            late_count: counts.late,
            absent_count: counts.absent,
            status_counts: counts,
        }
    }
}

/// Groups records and derives per-group metrics. Rows come out in the
/// order their key was first seen; no group is dropped.
pub fn aggregate(
    records: &[AttendanceRecord],
    group_by: GroupBy,
    options: AggregateOptions,
) -> Vec<AggregateRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for record in records {
        let (key, label) = group_by.key_and_label(record);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(Accumulator {
                key,
                label,
                ..Accumulator::default()
            });
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    groups.into_iter().map(|g| g.finish(options)).collect()
}

/// Aggregates everything into a single row, even for no records.
pub fn aggregate_all(records: &[AttendanceRecord], options: AggregateOptions) -> AggregateRow {
    aggregate(records, GroupBy::All, options)
        .into_iter()
        .next()
        .unwrap_or_else(|| {
            Accumulator {
                key: "all".to_string(),
                label: "Todos".to_string(),
                ..Accumulator::default()
            }
            .finish(options)
        })
}

/// Re-orders rows on request; rates sort highest first, labels A to Z.
pub fn sort_rows(rows: &mut [AggregateRow], key: SortKey) {
    match key {
        SortKey::AttendanceRate => rows.sort_by(|a, b| b.attendance_rate.cmp(&a.attendance_rate)),
        SortKey::PunctualityRate => {
            rows.sort_by(|a, b| b.punctuality_rate.cmp(&a.punctuality_rate))
        }
        SortKey::Label => rows.sort_by_key(|r| r.label.to_lowercase()),
    }
}
