use crate::database::{DataStore, OrderBy, models::WorkSchedule};
use crate::error::AppError;
use crate::reporting::RecordFilter;

#[derive(Clone)]
pub struct ScheduleService<S: DataStore> {
    store: S,
}

impl<S: DataStore> ScheduleService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<WorkSchedule>, AppError> {
        let schedules = self
            .store
            .fetch_all::<WorkSchedule>(Some(&OrderBy::asc("date")))
            .await?;
        Ok(filter.apply(&schedules))
    }

    /// Planned hours across the matching schedules.
    pub async fn planned_hours(&self, filter: &RecordFilter) -> Result<f64, AppError> {
        let schedules = self.list(filter).await?;
        Ok(schedules.iter().map(|s| s.shift.hours()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        InMemoryStore,
        models::{ScheduleStatus, ShiftKind},
    };
    use crate::reporting::DateRange;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn schedule(day: u32, shift: ShiftKind) -> WorkSchedule {
        WorkSchedule {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            employee_name: "Osvaldo Capita".to_string(),
            department: "Operações".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            shift,
            status: ScheduleStatus::Scheduled,
        }
    }

    #[tokio::test]
    async fn test_list_by_date_range() {
        let store = InMemoryStore::new();
        for s in [
            schedule(3, ShiftKind::Night),
            schedule(1, ShiftKind::Morning),
            schedule(2, ShiftKind::Off),
        ] {
            store.insert(s).await.unwrap();
        }
        let service = ScheduleService::new(store);

        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
        );
        let listed = service
            .list(&RecordFilter::new().date_range(range))
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].shift, ShiftKind::Morning);

        let hours = service
            .planned_hours(&RecordFilter::new().date_range(range))
            .await
            .unwrap();
        assert_eq!(hours, ShiftKind::Morning.hours());
    }
}
