use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use uuid::Uuid;

use crate::database::store::{
    DataAccessError, DataStore, Guarded, OrderBy, Record, guard_holds, merge_patch,
};

type Tables = HashMap<&'static str, Vec<Value>>;

/// Insertion-ordered store kept in process memory. Backs the mock data
/// source and the test suite.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    failing: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            tables: Arc::default(),
            failing: true,
        }
    }

    fn check(&self) -> Result<(), DataAccessError> {
        if self.failing {
            return Err(DataAccessError::Unavailable(
                "in-memory store configured to fail".to_string(),
            ));
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, DataAccessError> {
        self.check()?;
        let guard = self
            .tables
            .read()
            .map_err(|_| DataAccessError::Unavailable("store lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, DataAccessError>,
    ) -> Result<T, DataAccessError> {
        self.check()?;
        let mut guard = self
            .tables
            .write()
            .map_err(|_| DataAccessError::Unavailable("store lock poisoned".to_string()))?;
        f(&mut guard)
    }
}

fn has_id(value: &Value, id: Uuid) -> bool {
    value
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Uuid>().ok())
        == Some(id)
}

/// Patches one row in place. With a guard, the row is only touched while
/// `field` still equals the expected value.
fn patch_row<R: Record>(
    tables: &mut Tables,
    id: Uuid,
    guard: Option<(&str, &Value)>,
    patch: &Value,
) -> Result<Guarded<R>, DataAccessError> {
    let Some(row) = tables
        .get_mut(R::TABLE)
        .and_then(|rows| rows.iter_mut().find(|row| has_id(row, id)))
    else {
        return Ok(Guarded::Missing);
    };

    if let Some((field, expected)) = guard {
        if !guard_holds(row, field, expected) {
            return Ok(Guarded::Stale);
        }
    }

    let mut merged = row.clone();
    merge_patch(&mut merged, patch)?;
    // Reject patches that would leave the row unreadable
    let record: R = serde_json::from_value(merged.clone())?;
    *row = merged;
    Ok(Guarded::Updated(record))
}

fn timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// Nulls and missing fields sort first, numbers numerically, timestamps
/// chronologically, everything else by its string form.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => match (timestamp(x), timestamp(y)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x.cmp(y),
        },
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

impl DataStore for InMemoryStore {
    async fn fetch_all<R: Record>(
        &self,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<R>, DataAccessError> {
        let mut rows = self.read(|tables| tables.get(R::TABLE).cloned().unwrap_or_default())?;

        if let Some(order) = order_by {
            // Stable sort keeps insertion order among equal keys
            rows.sort_by(|a, b| {
                let ordering = compare_field(a.get(&order.field), b.get(&order.field));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(DataAccessError::from))
            .collect()
    }

    async fn fetch_one<R: Record>(&self, id: Uuid) -> Result<Option<R>, DataAccessError> {
        let row = self.read(|tables| {
            tables
                .get(R::TABLE)
                .and_then(|rows| rows.iter().find(|row| has_id(row, id)).cloned())
        })?;

        row.map(serde_json::from_value)
            .transpose()
            .map_err(DataAccessError::from)
    }

    async fn insert<R: Record>(&self, record: R) -> Result<R, DataAccessError> {
        let value = serde_json::to_value(&record)?;
        self.write(|tables| {
            tables.entry(R::TABLE).or_default().push(value);
            Ok(())
        })?;
        Ok(record)
    }

    async fn update<R: Record>(&self, id: Uuid, patch: Value) -> Result<Option<R>, DataAccessError> {
        let outcome = self.write(|tables| patch_row::<R>(tables, id, None, &patch))?;
        Ok(outcome.updated())
    }

    async fn update_if<R: Record>(
        &self,
        id: Uuid,
        field: &str,
        expected: Value,
        patch: Value,
    ) -> Result<Guarded<R>, DataAccessError> {
        self.write(|tables| patch_row::<R>(tables, id, Some((field, &expected)), &patch))
    }

    async fn delete<R: Record>(&self, id: Uuid) -> Result<bool, DataAccessError> {
        self.write(|tables| {
            let Some(rows) = tables.get_mut(R::TABLE) else {
                return Ok(false);
            };
            match rows.iter().position(|row| has_id(row, id)) {
                Some(index) => {
                    rows.remove(index);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}
