use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// One employee's attendance for one calendar day, already classified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub late_minutes: u32,
    pub early_departure_minutes: u32,
    pub work_hours: f64,
    pub overtime_hours: f64,
    pub status: AttendanceStatus,
}

/// Unclassified punches as they come off a time clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendance {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Incomplete => "incomplete",
        Weekend => "weekend",
        Holiday => "holiday",
    }
}

impl AttendanceStatus {
    /// Statuses that count as a worked day in attendance rates.
    pub fn is_present_like(&self) -> bool {
        match self {
            AttendanceStatus::Present | AttendanceStatus::Late | AttendanceStatus::Incomplete => {
                true
            }
            AttendanceStatus::Absent | AttendanceStatus::Weekend | AttendanceStatus::Holiday => {
                false
            }
        }
    }

    pub fn is_non_working_day(&self) -> bool {
        matches!(self, AttendanceStatus::Weekend | AttendanceStatus::Holiday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in AttendanceStatus::ALL {
            let parsed: AttendanceStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, *status);
        }
        assert_eq!("LATE".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Late));
        assert!("unknown".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_snake_case_string() {
        let json = serde_json::to_string(&AttendanceStatus::Incomplete).unwrap();
        assert_eq!(json, "\"incomplete\"");
    }

    #[test]
    fn test_present_like_statuses() {
        let present_like: Vec<_> = AttendanceStatus::ALL
            .iter()
            .filter(|s| s.is_present_like())
            .collect();
        assert_eq!(
            present_like,
            vec![
                &AttendanceStatus::Present,
                &AttendanceStatus::Late,
                &AttendanceStatus::Incomplete
            ]
        );
    }
}
