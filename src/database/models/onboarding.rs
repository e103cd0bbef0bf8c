use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub id: Uuid,
    pub employee_name: String,
    pub department: String,
    pub position: Option<String>,
    pub start_date: NaiveDate,
    pub tasks: Vec<OnboardingTask>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTask {
    pub id: Uuid,
    pub title: String,
    pub category: TaskCategory,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingInput {
    pub employee_name: String,
    pub department: String,
    pub position: Option<String>,
    pub start_date: NaiveDate,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum TaskCategory {
        Documentation => "documentation",
        Equipment => "equipment",
        Access => "access",
        Training => "training",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum TaskStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

impl TaskStatus {
    /// The next status in the one-way lifecycle, `None` once completed.
    pub fn next(&self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Completed),
            TaskStatus::Completed => None,
        }
    }
}

impl OnboardingRecord {
    /// Completed tasks as a rounded percentage; 0 when there are no tasks.
    pub fn progress(&self) -> u32 {
        let total = self.tasks.len();
        if total == 0 {
            return 0;
        }
        let completed = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.status == TaskStatus::Completed)
    }
}
