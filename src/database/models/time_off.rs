use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub request_type: TimeOffType,
    pub reason: Option<String>,
    pub status: TimeOffStatus,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffRequestInput {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub request_type: TimeOffType,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub reviewer: Option<String>,
    pub notes: Option<String>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum TimeOffType {
        Vacation => "vacation",
        Sick => "sick",
        Personal => "personal",
        MaternityPaternity => "maternity_paternity",
        Bereavement => "bereavement",
        Other => "other",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum TimeOffStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Cancelled => "cancelled",
    }
}

impl TimeOffStatus {
    /// Approval and rejection only leave `pending`; cancellation is allowed
    /// from `pending` or `approved`. Rejected and cancelled are terminal.
    pub fn can_transition_to(&self, next: TimeOffStatus) -> bool {
        match (self, next) {
            (TimeOffStatus::Pending, TimeOffStatus::Approved) => true,
            (TimeOffStatus::Pending, TimeOffStatus::Rejected) => true,
            (TimeOffStatus::Pending, TimeOffStatus::Cancelled) => true,
            (TimeOffStatus::Approved, TimeOffStatus::Cancelled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TimeOffStatus::Rejected | TimeOffStatus::Cancelled)
    }
}

impl TimeOffRequest {
    /// Calendar days covered, both ends included.
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Days covered that fall Monday to Friday.
    pub fn business_days(&self) -> i64 {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as i64
    }
}
