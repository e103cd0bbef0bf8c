//! Demo data for the in-memory backend.
//!
//! Everything is written through [`DataStore`], so the rest of the
//! application cannot tell generated records from persisted ones.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::database::{
    DataStore,
    models::{
        Calculation, Employee, EmployeeStatus, LineItemKind, NewLineItem, ScheduleStatus,
        ShiftKind, WorkSchedule,
    },
};
use crate::error::AppError;
use crate::reporting::{ClockedEmployee, DateRange, MockAttendanceSource, WorkRules};
use crate::services::payroll::{build_line_item, statutory_social_security};

const STAFF: &[(&str, &str, &str, i64)] = &[
    ("Ana Cristina Neto", "Vendas", "Gestora de Contas", 35_000_000),
    ("Bento Kiala", "Vendas", "Comercial", 22_000_000),
    ("Celeste Mavinga", "Tecnologia", "Engenheira de Software", 48_000_000),
    ("Domingos Cassoma", "Tecnologia", "Técnico de Suporte", 25_000_000),
    ("Esperança Lukamba", "Finanças", "Contabilista", 38_000_000),
    ("Fernando Sapalo", "Finanças", "Tesoureiro", 30_000_000),
    ("Graça Chipenda", "Recursos Humanos", "Técnica de RH", 28_000_000),
    ("Hélder Muteka", "Operações", "Supervisor", 32_000_000),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub employees: usize,
    pub attendance_records: usize,
    pub schedules: usize,
    pub line_items: usize,
}

pub fn demo_employees(hired_from: NaiveDate) -> Vec<Employee> {
    STAFF
        .iter()
        .enumerate()
        .map(|(i, (name, department, position, salary))| Employee {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!(
                "{}@kwanza.ao",
                name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".")
            ),
            department: department.to_string(),
            position: position.to_string(),
            hire_date: hired_from + Duration::days(45 * i as i64),
            status: EmployeeStatus::Active,
            base_salary: *salary,
        })
        .collect()
}

fn schedules_for(employees: &[Employee], range: &DateRange, rules: &WorkRules) -> Vec<WorkSchedule> {
    range
        .days()
        .flat_map(move |date| {
            employees.iter().enumerate().map(move |(i, employee)| {
                let shift = if !rules.is_working_day(date) {
                    ShiftKind::Off
                } else if employee.department == "Operações" && i % 2 == 1 {
                    ShiftKind::Afternoon
                } else {
                    ShiftKind::Morning
                };
                WorkSchedule {
                    id: Uuid::new_v4(),
                    employee_id: employee.id,
                    employee_name: employee.name.clone(),
                    department: employee.department.clone(),
                    date,
                    shift,
                    status: ScheduleStatus::Scheduled,
                }
            })
        })
        .collect()
}

/// Fills `store` with staff, `days` of past attendance up to `today`,
/// two weeks of schedules from `today`, and a sample payslip.
pub async fn seed_demo_data<S: DataStore>(
    store: &S,
    today: NaiveDate,
    days: i64,
    rules: &WorkRules,
    seed: u64,
) -> Result<SeedSummary, AppError> {
    let mut summary = SeedSummary::default();

    let employees = demo_employees(today - Duration::days(3 * 365));
    for employee in &employees {
        store.insert(employee.clone()).await?;
    }
    summary.employees = employees.len();

    let history = DateRange::new(today - Duration::days(days.max(1) - 1), today);
    let source = MockAttendanceSource::new(
        employees.iter().map(ClockedEmployee::from).collect(),
        seed,
    );
    summary.attendance_records = source.seed_store(store, &history, rules).await?;

    let upcoming = DateRange::new(today, today + Duration::days(13));
    for schedule in schedules_for(&employees, &upcoming, rules) {
        store.insert(schedule).await?;
        summary.schedules += 1;
    }

    let base_salary = employees.first().map(|e| e.base_salary).unwrap_or_default();
    let items = [
        statutory_social_security(base_salary),
        NewLineItem {
            kind: LineItemKind::Benefit,
            name: "Subsídio de alimentação".to_string(),
            description: None,
            calculation: Calculation::Fixed { amount: 1_500_000 },
        },
        NewLineItem {
            kind: LineItemKind::Benefit,
            name: "Subsídio de transporte".to_string(),
            description: None,
            calculation: Calculation::Percentage {
                percentage: 5.0,
                base_amount: base_salary,
            },
        },
    ];
    for input in items {
        store.insert(build_line_item(input)?).await?;
        summary.line_items += 1;
    }

    log::info!(
        "Seeded demo data: {} employees, {} attendance records, {} schedules, {} line items",
        summary.employees,
        summary.attendance_records,
        summary.schedules,
        summary.line_items
    );
    Ok(summary)
}
