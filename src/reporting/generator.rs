use chrono::NaiveTime;
use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

use crate::database::{
    DataStore,
    models::{AttendanceRecord, Employee, RawAttendance},
};
use crate::error::AppError;
use crate::reporting::{
    classifier::{WorkRules, classify},
    filter::DateRange,
};

/// Identity of an employee as the time clock sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockedEmployee {
    pub id: Uuid,
    pub name: String,
    pub department: String,
}

impl From<&Employee> for ClockedEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            department: employee.department.clone(),
        }
    }
}

/// Produces plausible punches for demos and tests. The same seed, employees
/// and range always yield the same records.
#[derive(Debug, Clone)]
pub struct MockAttendanceSource {
    employees: Vec<ClockedEmployee>,
    seed: u64,
}

impl MockAttendanceSource {
    pub fn new(employees: Vec<ClockedEmployee>, seed: u64) -> Self {
        Self { employees, seed }
    }

    /// One raw row per employee per day, weekends and holidays included.
    pub fn raw_records(&self, range: &DateRange, rules: &WorkRules) -> Vec<RawAttendance> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut rows = Vec::new();

        for date in range.days() {
            for employee in &self.employees {
                let (clock_in, clock_out) = if rules.is_working_day(date) {
                    Self::working_day_punches(&mut rng, rules)
                } else if rng.random_bool(0.05) {
                    // Occasional weekend or holiday cover
                    (at(9, 0), at(13, rng.random_range(0..60)))
                } else {
                    (None, None)
                };

                rows.push(RawAttendance {
                    employee_id: employee.id,
                    employee_name: employee.name.clone(),
                    department: employee.department.clone(),
                    date,
                    clock_in,
                    clock_out,
                });
            }
        }

        rows
    }

    /// Roughly 80% on time, 8% late, 5% leaving early, 7% absent.
    fn working_day_punches(
        rng: &mut StdRng,
        rules: &WorkRules,
    ) -> (Option<NaiveTime>, Option<NaiveTime>) {
        let start = rules.shift_start;
        let end = rules.shift_end;
        let roll: u32 = rng.random_range(0..100);

        match roll {
            0..80 => (
                offset(start, -(rng.random_range(0..15) as i64)),
                offset(end, rng.random_range(0..90)),
            ),
            80..88 => (
                offset(start, rules.late_grace_minutes as i64 + rng.random_range(1..90)),
                offset(end, rng.random_range(0..30)),
            ),
            88..93 => (
                offset(start, -(rng.random_range(0..10) as i64)),
                offset(end, -rng.random_range(30..240)),
            ),
            _ => (None, None),
        }
    }

    /// Classified records, ready for the filter and aggregator stages.
    pub fn records(&self, range: &DateRange, rules: &WorkRules) -> Vec<AttendanceRecord> {
        self.raw_records(range, rules)
            .iter()
            .map(|raw| classify(raw, rules))
            .collect()
    }

    /// Loads generated records through the regular store interface.
    pub async fn seed_store<S: DataStore>(
        &self,
        store: &S,
        range: &DateRange,
        rules: &WorkRules,
    ) -> Result<usize, AppError> {
        let records = self.records(range, rules);
        let count = records.len();
        for record in records {
            store.insert(record).await?;
        }
        log::info!(
            "Seeded {} mock attendance records for {} to {}",
            count,
            range.start,
            range.end
        );
        Ok(count)
    }
}

fn at(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn offset(time: NaiveTime, minutes: i64) -> Option<NaiveTime> {
    Some(time.overflowing_add_signed(chrono::Duration::minutes(minutes)).0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::AttendanceStatus;
    use chrono::NaiveDate;

    fn staff() -> Vec<ClockedEmployee> {
        ["Ana Cristina", "Bento Kiala", "Celeste Mavinga"]
            .iter()
            .map(|name| ClockedEmployee {
                id: Uuid::new_v4(),
                name: name.to_string(),
                department: "Operações".to_string(),
            })
            .collect()
    }

    fn june() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
    }

    #[test]
    fn test_one_row_per_employee_per_day() {
        let source = MockAttendanceSource::new(staff(), 7);
        let rows = source.raw_records(&june(), &WorkRules::default());
        assert_eq!(rows.len(), 3 * 30);
    }

    #[test]
    fn test_same_seed_same_punches() {
        let employees = staff();
        let a = MockAttendanceSource::new(employees.clone(), 42).raw_records(&june(), &WorkRules::default());
        let b = MockAttendanceSource::new(employees, 42).raw_records(&june(), &WorkRules::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_weekends_are_classified_as_such() {
        let source = MockAttendanceSource::new(staff(), 1);
        let records = source.records(&june(), &WorkRules::default());
        // 1 June 2024 is a Saturday
        assert!(records
            .iter()
            .filter(|r| r.date == NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .all(|r| r.status == AttendanceStatus::Weekend));
        assert!(records.iter().any(|r| r.status.is_present_like()));
    }
}
