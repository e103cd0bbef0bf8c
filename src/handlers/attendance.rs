use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::DataStore;
use crate::error::AppError;
use crate::handlers::shared::{ApiResponse, FilterParams};
use crate::reporting::{AggregateOptions, GroupBy, SortKey, sort_rows};
use crate::services::{AttendanceReportService, ReportQuery};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub search: Option<String>,
    pub group_by: Option<String>,
    pub sort_by: Option<SortKey>,
    #[serde(default)]
    pub exclude_non_working_days: bool,
}

impl ReportParams {
    fn filter_params(&self) -> FilterParams {
        FilterParams {
            start_date: self.start_date,
            end_date: self.end_date,
            department: self.department.clone(),
            search: self.search.clone(),
        }
    }
}

/// Aggregated attendance for the selected period
pub async fn get_report<S: DataStore>(
    service: web::Data<AttendanceReportService<S>>,
    params: web::Query<ReportParams>,
) -> Result<HttpResponse, AppError> {
    let group_by = params
        .group_by
        .as_deref()
        .unwrap_or_default()
        .parse::<GroupBy>()
        .map_err(AppError::Validation)?;

    let query = ReportQuery {
        filter: params.filter_params().to_filter()?,
        group_by,
        options: AggregateOptions {
            exclude_non_working_days: params.exclude_non_working_days,
        },
    };

    let mut report = service.report(&query).await?;
    if let Some(key) = params.sort_by {
        sort_rows(&mut report.rows, key);
    }
    Ok(ApiResponse::ok(report))
}

/// Classified daily records matching the filter
pub async fn get_records<S: DataStore>(
    service: web::Data<AttendanceReportService<S>>,
    params: web::Query<FilterParams>,
) -> Result<HttpResponse, AppError> {
    let records = service.records(&params.to_filter()?).await?;
    Ok(ApiResponse::ok(records))
}
