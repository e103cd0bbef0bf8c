use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{
    AttendanceRecord, Employee, OnboardingRecord, PayrollLineItem, TimeOffRequest, WorkSchedule,
};

#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

/// A row type kept in a named table of the data store.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: &'static str;

    fn id(&self) -> Uuid;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Serialized (camelCase) field name.
    pub field: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }
}

/// Result of [`DataStore::update_if`].
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<R> {
    Updated(R),
    /// The guarded field no longer holds the expected value; nothing was written.
    Stale,
    Missing,
}

impl<R> Guarded<R> {
    pub fn updated(self) -> Option<R> {
        match self {
            Guarded::Updated(record) => Some(record),
            Guarded::Stale | Guarded::Missing => None,
        }
    }
}

/// CRUD over named tables. Missing ids are reported as `None`/`false`,
/// never as errors; callers decide whether that is a `NotFound`.
pub trait DataStore: Clone + Send + Sync + 'static {
    fn fetch_all<R: Record>(
        &self,
        order_by: Option<&OrderBy>,
    ) -> impl Future<Output = Result<Vec<R>, DataAccessError>> + Send;

    fn fetch_one<R: Record>(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<R>, DataAccessError>> + Send;

    fn insert<R: Record>(&self, record: R)
    -> impl Future<Output = Result<R, DataAccessError>> + Send;

    /// Shallow merge of `patch` (a JSON object) into the stored record.
    fn update<R: Record>(
        &self,
        id: Uuid,
        patch: Value,
    ) -> impl Future<Output = Result<Option<R>, DataAccessError>> + Send;

    /// Like [`DataStore::update`], but only when the stored `field` still
    /// equals `expected`. The check and the write happen atomically.
    fn update_if<R: Record>(
        &self,
        id: Uuid,
        field: &str,
        expected: Value,
        patch: Value,
    ) -> impl Future<Output = Result<Guarded<R>, DataAccessError>> + Send;

    fn delete<R: Record>(&self, id: Uuid)
    -> impl Future<Output = Result<bool, DataAccessError>> + Send;
}

/// Top-level merge used by every store so patch semantics match.
pub(crate) fn merge_patch(target: &mut Value, patch: &Value) -> Result<(), DataAccessError> {
    let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) else {
        return Err(DataAccessError::InvalidPatch(
            "patch and record must both be JSON objects".to_string(),
        ));
    };
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
    Ok(())
}

pub(crate) fn guard_holds(record: &Value, field: &str, expected: &Value) -> bool {
    record.get(field) == Some(expected)
}

macro_rules! record_table {
    ($($ty:ty => $table:literal),* $(,)?) => {
        $(
            impl Record for $ty {
                const TABLE: &'static str = $table;

                fn id(&self) -> Uuid {
                    self.id
                }
            }
        )*
    };
}

record_table! {
    AttendanceRecord => "attendance_records",
    Employee => "employees",
    OnboardingRecord => "onboarding_records",
    PayrollLineItem => "payroll_line_items",
    TimeOffRequest => "time_off_requests",
    WorkSchedule => "work_schedules",
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_patch_overwrites_top_level_keys_only() {
        let mut record = json!({"id": "a", "status": "pending", "notes": {"x": 1}});
        merge_patch(&mut record, &json!({"status": "approved", "notes": {"y": 2}})).unwrap();
        assert_eq!(
            record,
            json!({"id": "a", "status": "approved", "notes": {"y": 2}})
        );
    }

    #[test]
    fn test_merge_patch_never_rewrites_the_id() {
        let mut record = json!({"id": "a"});
        merge_patch(&mut record, &json!({"id": "b"})).unwrap();
        assert_eq!(record, json!({"id": "a"}));
    }

    #[test]
    fn test_guard_compares_a_single_field() {
        let record = json!({"id": "a", "status": "pending"});
        assert!(guard_holds(&record, "status", &json!("pending")));
        assert!(!guard_holds(&record, "status", &json!("approved")));
        assert!(!guard_holds(&record, "reviewedBy", &Value::Null));
    }

    #[test]
    fn test_merge_patch_rejects_non_objects() {
        let mut record = json!({"id": "a"});
        assert!(merge_patch(&mut record, &json!([1, 2])).is_err());
    }
}
