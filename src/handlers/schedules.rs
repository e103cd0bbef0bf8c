use actix_web::{HttpResponse, web};

use crate::database::DataStore;
use crate::error::AppError;
use crate::handlers::shared::{ApiResponse, FilterParams};
use crate::services::ScheduleService;

/// Work schedules in date order
pub async fn get_schedules<S: DataStore>(
    service: web::Data<ScheduleService<S>>,
    params: web::Query<FilterParams>,
) -> Result<HttpResponse, AppError> {
    let schedules = service.list(&params.to_filter()?).await?;
    Ok(ApiResponse::ok(schedules))
}
