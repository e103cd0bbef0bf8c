use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::{
    DataStore,
    models::{NewLineItem, PayrollLineItem, PayrollSummary},
};
use crate::error::AppError;
use crate::format::format_currency;
use crate::handlers::shared::ApiResponse;
use crate::services::PayrollService;

/// A line item together with its display amount.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    #[serde(flatten)]
    pub item: PayrollLineItem,
    pub formatted_amount: String,
}

impl From<PayrollLineItem> for LineItemView {
    fn from(item: PayrollLineItem) -> Self {
        Self {
            formatted_amount: format_currency(item.amount),
            item,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummaryView {
    #[serde(flatten)]
    pub summary: PayrollSummary,
    pub formatted: FormattedSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSummary {
    pub base_salary: String,
    pub benefits: String,
    pub deductions: String,
    pub gross: String,
    pub net: String,
}

impl From<PayrollSummary> for PayrollSummaryView {
    fn from(summary: PayrollSummary) -> Self {
        Self {
            formatted: FormattedSummary {
                base_salary: format_currency(summary.base_salary),
                benefits: format_currency(summary.benefits),
                deductions: format_currency(summary.deductions),
                gross: format_currency(summary.gross),
                net: format_currency(summary.net),
            },
            summary,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParams {
    /// Minor units
    pub base_salary: i64,
}

pub async fn get_line_items<S: DataStore>(
    service: web::Data<PayrollService<S>>,
) -> Result<HttpResponse, AppError> {
    let items: Vec<LineItemView> = service.list().await?.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(items))
}

pub async fn create_line_item<S: DataStore>(
    service: web::Data<PayrollService<S>>,
    input: web::Json<NewLineItem>,
) -> Result<HttpResponse, AppError> {
    let item = service.create(input.into_inner()).await?;
    Ok(ApiResponse::created(LineItemView::from(item)))
}

pub async fn delete_line_item<S: DataStore>(
    service: web::Data<PayrollService<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Line item deleted",
    )))
}

pub async fn get_summary<S: DataStore>(
    service: web::Data<PayrollService<S>>,
    params: web::Query<SummaryParams>,
) -> Result<HttpResponse, AppError> {
    let summary = service.summary(params.base_salary).await?;
    Ok(ApiResponse::ok(PayrollSummaryView::from(summary)))
}
