use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;

use crate::database::{
    DataStore,
    models::{OnboardingInput, OnboardingRecord},
};
use crate::error::AppError;
use crate::handlers::shared::{ApiResponse, FilterParams};
use crate::services::OnboardingService;

/// An onboarding record with its completion percentage.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingView {
    #[serde(flatten)]
    pub record: OnboardingRecord,
    pub progress: u32,
}

impl From<OnboardingRecord> for OnboardingView {
    fn from(record: OnboardingRecord) -> Self {
        Self {
            progress: record.progress(),
            record,
        }
    }
}

pub async fn create_onboarding<S: DataStore>(
    service: web::Data<OnboardingService<S>>,
    input: web::Json<OnboardingInput>,
) -> Result<HttpResponse, AppError> {
    let record = service.create(input.into_inner()).await?;
    Ok(ApiResponse::created(OnboardingView::from(record)))
}

pub async fn get_onboardings<S: DataStore>(
    service: web::Data<OnboardingService<S>>,
    params: web::Query<FilterParams>,
) -> Result<HttpResponse, AppError> {
    let records: Vec<OnboardingView> = service
        .list(&params.to_filter()?)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ApiResponse::ok(records))
}

pub async fn get_onboarding<S: DataStore>(
    service: web::Data<OnboardingService<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let record = service.get(path.into_inner()).await?;
    Ok(ApiResponse::ok(OnboardingView::from(record)))
}

pub async fn advance_task<S: DataStore>(
    service: web::Data<OnboardingService<S>>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (record_id, task_id) = path.into_inner();
    let record = service.advance_task(record_id, task_id).await?;
    Ok(ApiResponse::ok(OnboardingView::from(record)))
}
