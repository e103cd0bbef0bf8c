//! Attendance pipeline: source -> filter -> classifier -> aggregator.
//!
//! Every stage is a plain synchronous function over an in-memory slice.

pub mod aggregator;
pub mod classifier;
pub mod filter;
pub mod generator;

pub use aggregator::{AggregateOptions, GroupBy, SortKey, aggregate, aggregate_all, sort_rows, trend_percent};
pub use classifier::{HolidayCalendar, WorkRules, classify};
pub use filter::{DateRange, Filterable, RecordFilter};
pub use generator::{ClockedEmployee, MockAttendanceSource};
