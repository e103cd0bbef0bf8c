use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

use crate::database::models::{AttendanceRecord, AttendanceStatus, RawAttendance};

/// Fixed-date public holidays in Angola as (month, day).
const ANGOLAN_PUBLIC_HOLIDAYS: [(u32, u32); 10] = [
    (1, 1),   // Dia do Ano Novo
    (2, 4),   // Início da Luta Armada
    (3, 8),   // Dia Internacional da Mulher
    (3, 23),  // Dia da Libertação da África Austral
    (4, 4),   // Dia da Paz
    (5, 1),   // Dia do Trabalhador
    (9, 17),  // Dia do Fundador da Nação
    (11, 2),  // Dia dos Finados
    (11, 11), // Dia da Independência
    (12, 25), // Dia de Natal
];

#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    recurring: HashSet<(u32, u32)>,
    dates: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn angola() -> Self {
        Self {
            recurring: ANGOLAN_PUBLIC_HOLIDAYS.into_iter().collect(),
            dates: HashSet::new(),
        }
    }

    /// Adds a one-off holiday such as Carnival or a bridge day.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.dates.insert(date);
        self
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date) || self.recurring.contains(&(date.month(), date.day()))
    }
}

#[derive(Debug, Clone)]
pub struct WorkRules {
    pub shift_start: NaiveTime,
    pub shift_end: NaiveTime,
    pub break_minutes: u32,
    pub late_grace_minutes: u32,
    pub holidays: HolidayCalendar,
}

impl Default for WorkRules {
    fn default() -> Self {
        Self {
            shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            shift_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            break_minutes: 60,
            late_grace_minutes: 0,
            holidays: HolidayCalendar::angola(),
        }
    }
}

impl WorkRules {
    pub fn scheduled_minutes(&self) -> u32 {
        minutes_between(self.shift_start, self.shift_end).saturating_sub(self.break_minutes)
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.holidays.is_holiday(date)
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes from `from` to `to`, wrapping past midnight.
fn minutes_between(from: NaiveTime, to: NaiveTime) -> u32 {
    let minutes = (to - from).num_minutes();
    if minutes < 0 {
        (minutes + MINUTES_PER_DAY) as u32
    } else {
        minutes as u32
    }
}

/// Where `time` falls relative to the shift start, in minutes. Times in
/// the second half of the off-shift gap are early arrivals (negative).
fn shift_offset(time: NaiveTime, rules: &WorkRules) -> i64 {
    let length = minutes_between(rules.shift_start, rules.shift_end) as i64;
    let offset = minutes_between(rules.shift_start, time) as i64;
    if offset > length + (MINUTES_PER_DAY - length) / 2 {
        offset - MINUTES_PER_DAY
    } else {
        offset
    }
}

fn hours(minutes: u32) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

/// Assigns exactly one status to a day of punches and derives its metrics.
pub fn classify(raw: &RawAttendance, rules: &WorkRules) -> AttendanceRecord {
    let worked_minutes = match (raw.clock_in, raw.clock_out) {
        (Some(clock_in), Some(clock_out)) => {
            minutes_between(clock_in, clock_out).saturating_sub(rules.break_minutes)
        }
        _ => 0,
    };

    let non_working = if rules.holidays.is_holiday(raw.date) {
        Some(AttendanceStatus::Holiday)
    } else if is_weekend(raw.date) {
        Some(AttendanceStatus::Weekend)
    } else {
        None
    };

    let mut late_minutes = 0;
    let mut early_departure_minutes = 0;
    let status = match (non_working, raw.clock_in, raw.clock_out) {
        (Some(status), _, _) => status,
        (None, None, _) => AttendanceStatus::Absent,
        (None, Some(clock_in), clock_out) => {
            let shift_length = minutes_between(rules.shift_start, rules.shift_end) as i64;
            let arrived = shift_offset(clock_in, rules);
            let minutes_late = arrived.max(0) as u32;
            if minutes_late > rules.late_grace_minutes {
                late_minutes = minutes_late;
            }

            early_departure_minutes = match clock_out {
                // Day never closed: count the rest of the shift as missed
                None => (shift_length - arrived.max(0)).max(1) as u32,
                // Clock-out is always after clock-in, so measure forward from it
                Some(clock_out) => {
                    let left = arrived + minutes_between(clock_in, clock_out) as i64;
                    (shift_length - left).max(0) as u32
                }
            };

            if early_departure_minutes > 0 {
                AttendanceStatus::Incomplete
            } else if late_minutes > 0 {
                AttendanceStatus::Late
            } else {
                AttendanceStatus::Present
            }
        }
    };

    let overtime_minutes = if status.is_non_working_day() {
        worked_minutes
    } else {
        worked_minutes.saturating_sub(rules.scheduled_minutes())
    };

    AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id: raw.employee_id,
        employee_name: raw.employee_name.clone(),
        department: raw.department.clone(),
        date: raw.date,
        clock_in: raw.clock_in,
        clock_out: raw.clock_out,
        late_minutes,
        early_departure_minutes,
        work_hours: hours(worked_minutes),
        overtime_hours: hours(overtime_minutes),
        status,
    }
}
