use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::database::DataStore;
use crate::error::AppError;
use crate::handlers::shared::{ApiResponse, FilterParams};
use crate::services::DirectoryService;

pub async fn get_employees<S: DataStore>(
    service: web::Data<DirectoryService<S>>,
    params: web::Query<FilterParams>,
) -> Result<HttpResponse, AppError> {
    let employees = service.search(&params.to_filter()?).await?;
    Ok(ApiResponse::ok(employees))
}

pub async fn get_employee<S: DataStore>(
    service: web::Data<DirectoryService<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee = service.get(path.into_inner()).await?;
    Ok(ApiResponse::ok(employee))
}
