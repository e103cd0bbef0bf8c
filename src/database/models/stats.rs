use serde::Serialize;

use super::attendance::AttendanceStatus;

/// One counter per attendance status.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub incomplete: u32,
    pub weekend: u32,
    pub holiday: u32,
}

impl StatusCounts {
    pub fn record(&mut self, status: AttendanceStatus) {
        *self.slot(status) += 1;
    }

    pub fn get(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Late => self.late,
            AttendanceStatus::Incomplete => self.incomplete,
            AttendanceStatus::Weekend => self.weekend,
            AttendanceStatus::Holiday => self.holiday,
        }
    }

    pub fn sum(&self) -> u32 {
        AttendanceStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }

    fn slot(&mut self, status: AttendanceStatus) -> &mut u32 {
        match status {
            AttendanceStatus::Present => &mut self.present,
            AttendanceStatus::Absent => &mut self.absent,
            AttendanceStatus::Late => &mut self.late,
            AttendanceStatus::Incomplete => &mut self.incomplete,
            AttendanceStatus::Weekend => &mut self.weekend,
            AttendanceStatus::Holiday => &mut self.holiday,
        }
    }
}

/// Aggregated attendance for one group key.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRow {
    pub key: String,
    pub label: String,
    pub total: u32,
    pub status_counts: StatusCounts,
    pub attendance_rate: u32,
    pub punctuality_rate: u32,
    pub work_hours: f64,
    pub overtime_hours: f64,
    pub late_minutes: u32,
    pub late_count: u32,
    pub absent_count: u32,
}

/// Report payload: per-group rows plus the overall row and its trend
/// against the preceding period of the same length.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub rows: Vec<AggregateRow>,
    pub overall: AggregateRow,
    pub previous_attendance_rate: Option<u32>,
    pub attendance_trend: Option<f64>,
}
