use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkSchedule {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub shift: ShiftKind,
    pub status: ScheduleStatus,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum ShiftKind {
        Morning => "morning",
        Afternoon => "afternoon",
        Night => "night",
        Off => "off",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum ScheduleStatus {
        Scheduled => "scheduled",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl ShiftKind {
    /// Nominal paid hours for the shift.
    pub fn hours(&self) -> f64 {
        match self {
            ShiftKind::Morning | ShiftKind::Afternoon | ShiftKind::Night => 8.0,
            ShiftKind::Off => 0.0,
        }
    }
}
