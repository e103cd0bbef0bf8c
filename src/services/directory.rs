use uuid::Uuid;

use crate::database::{DataStore, OrderBy, models::Employee};
use crate::error::AppError;
use crate::reporting::RecordFilter;

#[derive(Clone)]
pub struct DirectoryService<S: DataStore> {
    store: S,
}

impl<S: DataStore> DirectoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Employees sorted by name. The filter's date range applies to hire dates.
    pub async fn search(&self, filter: &RecordFilter) -> Result<Vec<Employee>, AppError> {
        let employees = self
            .store
            .fetch_all::<Employee>(Some(&OrderBy::asc("name")))
            .await?;
        Ok(filter.apply(&employees))
    }

    pub async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        self.store
            .fetch_one::<Employee>(id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee", id))
    }
}
