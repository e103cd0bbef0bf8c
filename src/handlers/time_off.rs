use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::{
    DataStore,
    models::{ReviewInput, TimeOffRequestInput, TimeOffStatus},
};
use crate::error::AppError;
use crate::handlers::shared::{ApiResponse, FilterParams};
use crate::services::TimeOffService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffQuery {
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
}

/// Create a new time-off request
pub async fn create_time_off_request<S: DataStore>(
    service: web::Data<TimeOffService<S>>,
    input: web::Json<TimeOffRequestInput>,
) -> Result<HttpResponse, AppError> {
    let request = service.create(input.into_inner()).await?;
    Ok(ApiResponse::created(request))
}

/// Get time-off requests with optional filtering
pub async fn get_time_off_requests<S: DataStore>(
    service: web::Data<TimeOffService<S>>,
    query: web::Query<TimeOffQuery>,
) -> Result<HttpResponse, AppError> {
    // Convert status string to enum if provided
    let status = query
        .status
        .as_deref()
        .map(str::parse::<TimeOffStatus>)
        .transpose()
        .map_err(AppError::Validation)?;

    let filter = FilterParams {
        start_date: query.start_date,
        end_date: query.end_date,
        department: None,
        search: query.search.clone(),
    }
    .to_filter()?;

    let requests = service.list(status, &filter).await?;
    Ok(ApiResponse::ok(requests))
}

/// Get a specific time-off request by ID
pub async fn get_time_off_request<S: DataStore>(
    service: web::Data<TimeOffService<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request = service.get(path.into_inner()).await?;
    Ok(ApiResponse::ok(request))
}

pub async fn approve_time_off_request<S: DataStore>(
    service: web::Data<TimeOffService<S>>,
    path: web::Path<Uuid>,
    input: Option<web::Json<ReviewInput>>,
) -> Result<HttpResponse, AppError> {
    let review = input.map(web::Json::into_inner).unwrap_or_default();
    let request = service.approve(path.into_inner(), review).await?;
    Ok(ApiResponse::ok(request))
}

pub async fn reject_time_off_request<S: DataStore>(
    service: web::Data<TimeOffService<S>>,
    path: web::Path<Uuid>,
    input: web::Json<ReviewInput>,
) -> Result<HttpResponse, AppError> {
    let request = service
        .reject(path.into_inner(), input.into_inner())
        .await?;
    Ok(ApiResponse::ok(request))
}

pub async fn cancel_time_off_request<S: DataStore>(
    service: web::Data<TimeOffService<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request = service.cancel(path.into_inner()).await?;
    Ok(ApiResponse::ok(request))
}
