use kwanza_erp::database::models::AttendanceStatus;
use kwanza_erp::format::{format_currency, parse_currency};
use kwanza_erp::reporting::{
    AggregateOptions, DateRange, GroupBy, RecordFilter, WorkRules, aggregate, aggregate_all,
    classify,
};
use pretty_assertions::assert_eq;

mod common;

use common::{date, fake_employee, raw, record, time};

#[test]
fn test_present_late_absent_scenario() {
    let employee = fake_employee("Vendas");
    let rules = WorkRules::default();
    // 3-5 June 2024 are Monday to Wednesday
    let raws = [
        raw(&employee, date(2024, 6, 3), Some(time(8, 0)), Some(time(17, 0))),
        raw(&employee, date(2024, 6, 4), Some(time(8, 30)), Some(time(17, 0))),
        raw(&employee, date(2024, 6, 5), None, None),
    ];
    let records: Vec<_> = raws.iter().map(|r| classify(r, &rules)).collect();

    let statuses: Vec<_> = records.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![AttendanceStatus::Present, AttendanceStatus::Late, AttendanceStatus::Absent]
    );
    assert_eq!(records[1].late_minutes, 30);

    let rows = aggregate(&records, GroupBy::Employee, AggregateOptions::default());
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.label, employee.name);
    assert_eq!(row.total, 3);
    assert_eq!(row.late_count, 1);
    assert_eq!(row.absent_count, 1);
    assert_eq!(row.attendance_rate, 67);
    assert_eq!(row.punctuality_rate, 33);
}

#[test]
fn test_filter_then_aggregate_keeps_invariants() {
    let records = vec![
        record("Ana", "Vendas", date(2024, 6, 1), AttendanceStatus::Weekend),
        record("Ana", "Vendas", date(2024, 6, 3), AttendanceStatus::Present),
        record("Rui", "Tecnologia", date(2024, 6, 3), AttendanceStatus::Incomplete),
        record("Rui", "Tecnologia", date(2024, 6, 4), AttendanceStatus::Late),
        record("Eva", "Finanças", date(2024, 6, 1), AttendanceStatus::Holiday),
    ];

    assert_eq!(RecordFilter::new().apply(&records), records);

    for group_by in [GroupBy::Employee, GroupBy::Department, GroupBy::All] {
        for exclude in [false, true] {
            let options = AggregateOptions {
                exclude_non_working_days: exclude,
            };
            for row in aggregate(&records, group_by, options) {
                assert_eq!(row.status_counts.sum(), row.total);
                assert!(row.attendance_rate <= 100);
                assert!(row.punctuality_rate <= row.attendance_rate);
            }
        }
    }

    // A group made only of a holiday is kept, and excluding it leaves no denominator
    let rows = aggregate(
        &records,
        GroupBy::Department,
        AggregateOptions {
            exclude_non_working_days: true,
        },
    );
    let financas = rows.iter().find(|r| r.label == "Finanças").unwrap();
    assert_eq!(financas.total, 1);
    assert_eq!(financas.attendance_rate, 0);
}

#[test]
fn test_empty_input_yields_zero_rates() {
    assert!(aggregate(&[], GroupBy::Department, AggregateOptions::default()).is_empty());
    let overall = aggregate_all(&[], AggregateOptions::default());
    assert_eq!(overall.total, 0);
    assert_eq!(overall.attendance_rate, 0);
    assert_eq!(overall.punctuality_rate, 0);
}

#[test]
fn test_mock_period_filtering() {
    let employee = fake_employee("Operações");
    let rules = WorkRules::default();
    let june = DateRange::new(date(2024, 6, 1), date(2024, 6, 30));
    let records: Vec<_> = june
        .days()
        .map(|day| classify(&raw(&employee, day, Some(time(7, 55)), Some(time(17, 5))), &rules))
        .collect();

    let second_week = RecordFilter::new().date_range(DateRange::new(date(2024, 6, 10), date(2024, 6, 16)));
    let week = second_week.apply(&records);
    assert_eq!(week.len(), 7);

    let row = aggregate_all(
        &week,
        AggregateOptions {
            exclude_non_working_days: true,
        },
    );
    assert_eq!(row.status_counts.weekend, 2);
    assert_eq!(row.attendance_rate, 100);
    assert_eq!(row.punctuality_rate, 100);
}

#[test]
fn test_currency_round_trip() {
    for minor in [0, 1, 100, 123_456_789, -1, -123_456_789] {
        assert_eq!(parse_currency(&format_currency(minor)), Ok(minor));
    }
    assert_eq!(format_currency(123_456_789), "1\u{a0}234\u{a0}567,89\u{a0}Kz");
}
