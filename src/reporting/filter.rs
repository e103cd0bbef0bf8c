use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::database::models::{
    AttendanceRecord, Employee, OnboardingRecord, TimeOffRequest, WorkSchedule,
};

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days covered; 0 for a reversed range.
    pub fn len_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// The range of equal length ending the day before this one starts.
    pub fn previous(&self) -> Option<DateRange> {
        let len = self.len_days();
        if len == 0 {
            return None;
        }
        let end = self.start.pred_opt()?;
        let start = end.checked_sub_signed(chrono::Duration::days(len - 1))?;
        Some(DateRange { start, end })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// Anything the filter stage can narrow.
pub trait Filterable {
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Days the record covers; a dated record covers just its date.
    fn span(&self) -> Option<DateRange> {
        self.date().map(|date| DateRange::new(date, date))
    }

    fn department(&self) -> &str;

    /// Fields matched by free-text search.
    fn search_fields(&self) -> Vec<&str>;
}

/// Predicates combined with AND; a `None` predicate matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub date_range: Option<DateRange>,
    pub department: Option<String>,
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        if let Some(range) = &self.date_range {
            match record.span() {
                Some(span) if range.overlaps(&span) => {}
                _ => return false,
            }
        }

        if let Some(department) = self.department.as_deref().map(str::trim) {
            if !department.is_empty() && record.department().to_lowercase() != department.to_lowercase()
            {
                return false;
            }
        }

        if let Some(needle) = self.search.as_deref().map(str::trim) {
            if !needle.is_empty() {
                let needle = needle.to_lowercase();
                if !record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
                {
                    return false;
                }
            }
        }

        true
    }

    /// Keeps matching records in their original order.
    pub fn apply<T: Filterable + Clone>(&self, records: &[T]) -> Vec<T> {
        records.iter().filter(|r| self.matches(*r)).cloned().collect()
    }
}

impl Filterable for AttendanceRecord {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.employee_name.as_str(), self.department.as_str()]
    }
}

impl Filterable for WorkSchedule {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.employee_name.as_str(), self.department.as_str()]
    }
}

impl Filterable for Employee {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.hire_date)
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.department.as_str(),
            self.position.as_str(),
            self.email.as_str(),
        ]
    }
}

impl Filterable for TimeOffRequest {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.start_date)
    }

    fn span(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start_date, self.end_date))
    }

    fn department(&self) -> &str {
        ""
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.employee_name.as_str()]
    }
}

impl Filterable for OnboardingRecord {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.start_date)
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.employee_name.as_str(), self.department.as_str()];
        if let Some(position) = &self.position {
            fields.push(position.as_str());
        }
        fields
    }
}
