use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::database::{
    DataStore, Guarded, OrderBy,
    models::{ReviewInput, TimeOffRequest, TimeOffRequestInput, TimeOffStatus},
};
use crate::error::AppError;
use crate::reporting::RecordFilter;

#[derive(Clone)]
pub struct TimeOffService<S: DataStore> {
    store: S,
}

impl<S: DataStore> TimeOffService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new time-off request in `pending`
    pub async fn create(&self, input: TimeOffRequestInput) -> Result<TimeOffRequest, AppError> {
        let employee_name = input.employee_name.trim();
        if employee_name.is_empty() {
            return Err(AppError::validation("Employee name is required"));
        }
        if input.end_date < input.start_date {
            return Err(AppError::validation("End date cannot be before start date"));
        }

        let now = Utc::now();
        let request = TimeOffRequest {
            id: Uuid::new_v4(),
            employee_id: input.employee_id,
            employee_name: employee_name.to_string(),
            start_date: input.start_date,
            end_date: input.end_date,
            request_type: input.request_type,
            reason: input.reason.filter(|r| !r.trim().is_empty()),
            status: TimeOffStatus::Pending,
            reviewed_by: None,
            review_notes: None,
            created_at: now,
            updated_at: now,
        };

        let request = self.store.insert(request).await?;
        log::info!(
            "Created {} time-off request {} for {}",
            request.request_type,
            request.id,
            request.employee_name
        );
        Ok(request)
    }

    /// Newest first, optionally narrowed by status and the usual filter
    pub async fn list(
        &self,
        status: Option<TimeOffStatus>,
        filter: &RecordFilter,
    ) -> Result<Vec<TimeOffRequest>, AppError> {
        let requests = self
            .store
            .fetch_all::<TimeOffRequest>(Some(&OrderBy::desc("createdAt")))
            .await?;

        Ok(requests
            .into_iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter(|r| filter.matches(r))
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<TimeOffRequest, AppError> {
        self.store
            .fetch_one::<TimeOffRequest>(id)
            .await?
            .ok_or_else(|| AppError::not_found("Time-off request", id))
    }

    pub async fn approve(&self, id: Uuid, review: ReviewInput) -> Result<TimeOffRequest, AppError> {
        self.transition(id, TimeOffStatus::Approved, review).await
    }

    /// Rejections must say why
    pub async fn reject(&self, id: Uuid, review: ReviewInput) -> Result<TimeOffRequest, AppError> {
        if review.notes.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(AppError::validation("A note is required to reject a request"));
        }
        self.transition(id, TimeOffStatus::Rejected, review).await
    }

    pub async fn cancel(&self, id: Uuid) -> Result<TimeOffRequest, AppError> {
        self.transition(id, TimeOffStatus::Cancelled, ReviewInput::default())
            .await
    }

    async fn transition(
        &self,
        id: Uuid,
        next: TimeOffStatus,
        review: ReviewInput,
    ) -> Result<TimeOffRequest, AppError> {
        let current = self.get(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(current.status, next));
        }

        let mut patch = json!({
            "status": next,
            "updatedAt": Utc::now(),
        });
        if next != TimeOffStatus::Cancelled {
            patch["reviewedBy"] = json!(review.reviewer);
            patch["reviewNotes"] = json!(review.notes);
        }

        // Only write over the status that was checked
        let outcome = self
            .store
            .update_if::<TimeOffRequest>(id, "status", json!(current.status), patch)
            .await?;
        let updated = match outcome {
            Guarded::Updated(request) => request,
            Guarded::Missing => return Err(AppError::not_found("Time-off request", id)),
            Guarded::Stale => {
                let latest = self.get(id).await?;
                return Err(AppError::invalid_transition(latest.status, next));
            }
        };

        log::info!(
            "Time-off request {} moved from {} to {}",
            id,
            current.status,
            updated.status
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use crate::database::models::TimeOffType;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn input() -> TimeOffRequestInput {
        TimeOffRequestInput {
            employee_id: Uuid::new_v4(),
            employee_name: "Isabel dos Santos".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 16).unwrap(),
            request_type: TimeOffType::Vacation,
            reason: Some("Férias anuais".to_string()),
        }
    }

    fn review(notes: Option<&str>) -> ReviewInput {
        ReviewInput {
            reviewer: Some("Gestora de RH".to_string()),
            notes: notes.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let service = TimeOffService::new(InMemoryStore::new());
        let request = service.create(input()).await.unwrap();
        assert_eq!(request.status, TimeOffStatus::Pending);
        assert_eq!(service.get(request.id).await.unwrap(), request);
    }

    #[tokio::test]
    async fn test_create_validates_dates_and_name() {
        let service = TimeOffService::new(InMemoryStore::new());

        let mut reversed = input();
        reversed.end_date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert!(matches!(service.create(reversed).await, Err(AppError::Validation(_))));

        let mut nameless = input();
        nameless.employee_name = " ".to_string();
        assert!(matches!(service.create(nameless).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_approve_then_cancel() {
        let service = TimeOffService::new(InMemoryStore::new());
        let request = service.create(input()).await.unwrap();

        let approved = service.approve(request.id, review(None)).await.unwrap();
        assert_eq!(approved.status, TimeOffStatus::Approved);
        assert_eq!(approved.reviewed_by.as_deref(), Some("Gestora de RH"));

        let cancelled = service.cancel(request.id).await.unwrap();
        assert_eq!(cancelled.status, TimeOffStatus::Cancelled);
        // Cancelling keeps the original review
        assert_eq!(cancelled.reviewed_by.as_deref(), Some("Gestora de RH"));
    }

    #[tokio::test]
    async fn test_rejected_is_terminal() {
        let service = TimeOffService::new(InMemoryStore::new());
        let request = service.create(input()).await.unwrap();

        assert!(matches!(
            service.reject(request.id, review(Some("  "))).await,
            Err(AppError::Validation(_))
        ));

        let rejected = service
            .reject(request.id, review(Some("Período de fecho de contas")))
            .await
            .unwrap();
        assert_eq!(rejected.status, TimeOffStatus::Rejected);

        assert!(matches!(
            service.approve(request.id, review(None)).await,
            Err(AppError::InvalidTransition { .. })
        ));
        assert!(matches!(
            service.cancel(request.id).await,
            Err(AppError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_request_is_not_found() {
        let service = TimeOffService::new(InMemoryStore::new());
        assert!(matches!(
            service.approve(Uuid::new_v4(), review(None)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_search() {
        let service = TimeOffService::new(InMemoryStore::new());
        let first = service.create(input()).await.unwrap();
        let mut other = input();
        other.employee_name = "Kiame Lourenço".to_string();
        service.create(other).await.unwrap();
        service.approve(first.id, review(None)).await.unwrap();

        let approved = service
            .list(Some(TimeOffStatus::Approved), &RecordFilter::new())
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, first.id);

        let kiame = service
            .list(None, &RecordFilter::new().search("kiame"))
            .await
            .unwrap();
        assert_eq!(kiame.len(), 1);
        assert_eq!(kiame[0].employee_name, "Kiame Lourenço");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_approve_and_reject_have_one_winner() {
        let service = TimeOffService::new(InMemoryStore::new());

        for _ in 0..100 {
            let request = service.create(input()).await.unwrap();

            let approver = service.clone();
            let approve = tokio::spawn(async move {
                approver.approve(request.id, review(None)).await
            });
            let rejecter = service.clone();
            let reject = tokio::spawn(async move {
                rejecter
                    .reject(request.id, review(Some("Equipa sem cobertura")))
                    .await
            });
            let approved = approve.await.unwrap();
            let rejected = reject.await.unwrap();

            let winner = match (approved, rejected) {
                (Ok(winner), Err(AppError::InvalidTransition { .. }))
                | (Err(AppError::InvalidTransition { .. }), Ok(winner)) => winner,
                (approved, rejected) => panic!(
                    "expected exactly one transition, got {:?} and {:?}",
                    approved.map(|r| r.status),
                    rejected.map(|r| r.status)
                ),
            };
            assert_eq!(service.get(request.id).await.unwrap().status, winner.status);
        }
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_data_access_error() {
        let service = TimeOffService::new(InMemoryStore::failing());
        assert!(matches!(
            service.create(input()).await,
            Err(AppError::DataAccess(_))
        ));
    }
}
