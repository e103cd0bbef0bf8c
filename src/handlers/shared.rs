use actix_web::HttpResponse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::reporting::{DateRange, RecordFilter};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    // Success with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    // Success with message
    pub fn success_with_message(data: Option<T>, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
        }
    }

    pub fn ok(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data))
    }

    pub fn created(data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::success(data))
    }
}

impl ApiResponse<()> {
    // Error response (no data)
    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// Query parameters shared by every filtered listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub search: Option<String>,
}

impl FilterParams {
    /// A date range needs both ends; a reversed range is allowed and
    /// simply matches nothing.
    pub fn to_filter(&self) -> Result<RecordFilter, AppError> {
        let mut filter = RecordFilter::new();
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => filter = filter.date_range(DateRange::new(start, end)),
            (None, None) => {}
            _ => {
                return Err(AppError::validation(
                    "startDate and endDate must be given together",
                ));
            }
        }
        if let Some(department) = &self.department {
            filter = filter.department(department.as_str());
        }
        if let Some(search) = &self.search {
            filter = filter.search(search.as_str());
        }
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_range_is_rejected() {
        let params = FilterParams {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert!(matches!(params.to_filter(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_params_match_everything() {
        assert_eq!(FilterParams::default().to_filter().unwrap(), RecordFilter::new());
    }
}
