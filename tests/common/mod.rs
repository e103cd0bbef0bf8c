#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use fake::Fake;
use fake::faker::name::en::Name;
use uuid::Uuid;

use kwanza_erp::database::models::{AttendanceRecord, AttendanceStatus, Employee, EmployeeStatus, RawAttendance};
use kwanza_erp::database::{DataStore, InMemoryStore};

/// Env keys read by `Config`.
pub const CONFIG_KEYS: [&str; 11] = [
    "DATABASE_URL",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "CLIENT_BASE_URL",
    "DATA_SOURCE",
    "MOCK_SEED",
    "WORKDAY_START",
    "WORKDAY_END",
    "BREAK_MINUTES",
    "LATE_GRACE_MINUTES",
];

/// Snapshot of env vars, restored on drop.
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    pub fn clear(keys: &[&'static str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();
        for key in keys {
            unsafe { std::env::remove_var(key) };
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn fake_employee(department: &str) -> Employee {
    let name: String = Name().fake();
    Employee {
        id: Uuid::new_v4(),
        email: format!("{}@kwanza.ao", name.to_lowercase().replace(' ', ".")),
        name,
        department: department.to_string(),
        position: "Técnico".to_string(),
        hire_date: date(2023, 1, 9),
        status: EmployeeStatus::Active,
        base_salary: 25_000_000,
    }
}

pub fn raw(
    employee: &Employee,
    day: NaiveDate,
    clock_in: Option<NaiveTime>,
    clock_out: Option<NaiveTime>,
) -> RawAttendance {
    RawAttendance {
        employee_id: employee.id,
        employee_name: employee.name.clone(),
        department: employee.department.clone(),
        date: day,
        clock_in,
        clock_out,
    }
}

pub fn record(name: &str, department: &str, day: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        employee_name: name.to_string(),
        department: department.to_string(),
        date: day,
        clock_in: None,
        clock_out: None,
        late_minutes: 0,
        early_departure_minutes: 0,
        work_hours: 0.0,
        overtime_hours: 0.0,
        status,
    }
}

pub async fn store_with<R: kwanza_erp::database::Record>(records: Vec<R>) -> InMemoryStore {
    let store = InMemoryStore::new();
    for record in records {
        store.insert(record).await.unwrap();
    }
    store
}

pub fn state(store: InMemoryStore) -> kwanza_erp::AppState<InMemoryStore> {
    kwanza_erp::AppState::new(store)
}
