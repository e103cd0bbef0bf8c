use crate::database::{DataStore, OrderBy, models::AttendanceRecord, models::AttendanceReport};
use crate::error::AppError;
use crate::reporting::{
    AggregateOptions, DateRange, GroupBy, RecordFilter, aggregate, aggregate_all, trend_percent,
};

/// What a report is asked for: which records, how to group them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub filter: RecordFilter,
    pub group_by: GroupBy,
    pub options: AggregateOptions,
}

/// Builds attendance reports from whatever the data store holds.
#[derive(Clone)]
pub struct AttendanceReportService<S: DataStore> {
    store: S,
}

impl<S: DataStore> AttendanceReportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn all_records(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(self
            .store
            .fetch_all::<AttendanceRecord>(Some(&OrderBy::asc("date")))
            .await?)
    }

    pub async fn records(&self, filter: &RecordFilter) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = self.all_records().await?;
        Ok(filter.apply(&records))
    }

    pub async fn report(&self, query: &ReportQuery) -> Result<AttendanceReport, AppError> {
        let records = self.all_records().await?;
        let report = build_report(&records, query);
        log::debug!(
            "Attendance report: {} rows, overall attendance {}%",
            report.rows.len(),
            report.overall.attendance_rate
        );
        Ok(report)
    }
}

/// Filters and aggregates `records`. With a date range, the same-length
/// period right before it provides the comparison rate; the trend is
/// `None` when that period has no data.
pub fn build_report(records: &[AttendanceRecord], query: &ReportQuery) -> AttendanceReport {
    let filtered = query.filter.apply(records);
    let rows = aggregate(&filtered, query.group_by, query.options);
    let overall = aggregate_all(&filtered, query.options);

    let previous = query
        .filter
        .date_range
        .as_ref()
        .and_then(DateRange::previous)
        .map(|range| {
            let filter = RecordFilter {
                date_range: Some(range),
                ..query.filter.clone()
            };
            filter.apply(records)
        })
        .filter(|previous| !previous.is_empty())
        .map(|previous| aggregate_all(&previous, query.options));

    let previous_attendance_rate = previous.as_ref().map(|row| row.attendance_rate);
    let attendance_trend = previous_attendance_rate.and_then(|rate| {
        trend_percent(overall.attendance_rate as f64, rate as f64)
    });

    AttendanceReport {
        rows,
        overall,
        previous_attendance_rate,
        attendance_trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use crate::database::models::AttendanceStatus;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn record(name: &str, department: &str, date: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            employee_name: name.to_string(),
            department: department.to_string(),
            date,
            clock_in: None,
            clock_out: None,
            late_minutes: if status == AttendanceStatus::Late { 30 } else { 0 },
            early_departure_minutes: 0,
            work_hours: 0.0,
            overtime_hours: 0.0,
            status,
        }
    }

    fn records() -> Vec<AttendanceRecord> {
        vec![
            // Previous week: 1 of 2 present
            record("Ana", "Vendas", day(3), AttendanceStatus::Present),
            record("Rui", "Vendas", day(4), AttendanceStatus::Absent),
            // Current week
            record("Ana", "Vendas", day(10), AttendanceStatus::Present),
            record("Rui", "Vendas", day(11), AttendanceStatus::Late),
            record("Eva", "Tecnologia", day(12), AttendanceStatus::Absent),
            record("Eva", "Tecnologia", day(13), AttendanceStatus::Present),
        ]
    }

    fn this_week() -> DateRange {
        DateRange::new(day(10), day(16))
    }

    #[test]
    fn test_report_groups_current_period() {
        let query = ReportQuery {
            filter: RecordFilter::new().date_range(this_week()),
            group_by: GroupBy::Department,
            options: AggregateOptions::default(),
        };
        let report = build_report(&records(), &query);

        let labels: Vec<_> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Vendas", "Tecnologia"]);
        assert_eq!(report.overall.total, 4);
        assert_eq!(report.overall.attendance_rate, 75);
    }

    #[test]
    fn test_trend_compares_against_previous_period() {
        let query = ReportQuery {
            filter: RecordFilter::new().date_range(this_week()),
            ..Default::default()
        };
        let report = build_report(&records(), &query);
        assert_eq!(report.previous_attendance_rate, Some(50));
        assert_eq!(report.attendance_trend, Some(50.0));
    }

    #[test]
    fn test_no_trend_without_baseline() {
        let query = ReportQuery {
            filter: RecordFilter::new().date_range(DateRange::new(day(3), day(4))),
            ..Default::default()
        };
        let report = build_report(&records(), &query);
        assert_eq!(report.previous_attendance_rate, None);
        assert_eq!(report.attendance_trend, None);

        // No range at all: nothing to compare with either
        let report = build_report(&records(), &ReportQuery::default());
        assert_eq!(report.attendance_trend, None);
        assert_eq!(report.overall.total, 6);
    }

    #[test]
    fn test_empty_selection_yields_zero_overall() {
        let query = ReportQuery {
            filter: RecordFilter::new().department("Logística"),
            ..Default::default()
        };
        let report = build_report(&records(), &query);
        assert!(report.rows.is_empty());
        assert_eq!(report.overall.total, 0);
        assert_eq!(report.overall.attendance_rate, 0);
    }

    #[tokio::test]
    async fn test_service_reads_through_store() {
        let store = InMemoryStore::new();
        for r in records() {
            store.insert(r).await.unwrap();
        }
        let service = AttendanceReportService::new(store);

        let filtered = service
            .records(&RecordFilter::new().search("eva"))
            .await
            .unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered[0].date < filtered[1].date);

        let report = service.report(&ReportQuery::default()).await.unwrap();
        assert_eq!(report.overall.status_counts.sum(), 6);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let service = AttendanceReportService::new(InMemoryStore::failing());
        assert!(matches!(
            service.report(&ReportQuery::default()).await,
            Err(AppError::DataAccess(_))
        ));
    }
}
